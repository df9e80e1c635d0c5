//! Computes the per-category breakdown for one transaction type.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    DatabaseID,
    models::{Category, CategoryColor, Transaction, TransactionType},
};

/// One category's share of the total for a transaction type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    /// The ID of the category.
    pub category_id: DatabaseID,
    /// The name of the category.
    pub category_name: String,
    /// The display color of the category.
    pub category_color: CategoryColor,
    /// The sum of transaction amounts in this category.
    pub amount: f64,
    /// This category's share of the grand total, as a percentage.
    ///
    /// Zero when the grand total is zero. Across all categories of a type the
    /// percentages sum to 100 (up to floating point rounding).
    pub percentage: f64,
}

/// Group the transactions of type `transaction_type` by category and compute
/// each category's share of the total.
///
/// The result is sorted by amount, largest first; categories with equal
/// amounts keep the order in which they were first encountered. Transactions
/// whose category is not in `categories` are dropped from the breakdown and
/// logged, so this function cannot fail.
pub fn category_summary(
    transactions: &[Transaction],
    categories: &[Category],
    transaction_type: TransactionType,
) -> Vec<CategorySummary> {
    let categories_by_id: HashMap<DatabaseID, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    // Group totals keyed by category, preserving first-encounter order so
    // that equal amounts sort stably.
    let mut group_order: Vec<DatabaseID> = Vec::new();
    let mut group_totals: HashMap<DatabaseID, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
    {
        if !categories_by_id.contains_key(&transaction.category_id) {
            tracing::warn!(
                "dropping transaction {} from category summary: category {} does not exist",
                transaction.id,
                transaction.category_id
            );
            continue;
        }

        group_totals
            .entry(transaction.category_id)
            .and_modify(|total| *total += transaction.amount)
            .or_insert_with(|| {
                group_order.push(transaction.category_id);
                transaction.amount
            });
    }

    let grand_total: f64 = group_totals.values().sum();

    let mut summaries: Vec<CategorySummary> = group_order
        .into_iter()
        .map(|category_id| {
            let category = categories_by_id[&category_id];
            let amount = group_totals[&category_id];
            let percentage = if grand_total > 0.0 {
                amount / grand_total * 100.0
            } else {
                0.0
            };

            CategorySummary {
                category_id,
                category_name: category.name.to_string(),
                category_color: category.color,
                amount,
                percentage,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    summaries
}
