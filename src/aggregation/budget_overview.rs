//! Computes spending against each budget and its utilization tier.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    DatabaseID,
    models::{Budget, Category, Transaction, TransactionType},
};

/// The utilization percentages at which a budget changes tier.
///
/// This is the single source of truth for tier classification; call sites
/// must not hard-code their own cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierThresholds {
    /// Utilization at or above this percentage is [BudgetTier::Warning].
    pub warning: f64,
    /// Utilization at or above this percentage is [BudgetTier::Danger].
    pub danger: f64,
}

/// The default tier thresholds: warn at 70% utilization, danger at 90%.
pub const DEFAULT_TIER_THRESHOLDS: TierThresholds = TierThresholds {
    warning: 70.0,
    danger: 90.0,
};

/// The classification bucket for a budget's utilization, used by the client
/// for status coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// Utilization below the warning threshold.
    Safe,
    /// Utilization at or above the warning threshold.
    Warning,
    /// Utilization at or above the danger threshold.
    Danger,
}

impl TierThresholds {
    /// Classify a raw utilization percentage into a tier.
    pub fn tier(&self, utilization: f64) -> BudgetTier {
        if utilization >= self.danger {
            BudgetTier::Danger
        } else if utilization >= self.warning {
            BudgetTier::Warning
        } else {
            BudgetTier::Safe
        }
    }
}

/// A budget together with its category and the amount spent against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetWithCategory {
    /// The budget itself.
    #[serde(flatten)]
    pub budget: Budget,
    /// The category the budget limits.
    pub category: Category,
    /// The sum of expense transactions in the budget's category, recomputed
    /// from the live ledger on every read.
    pub spent: f64,
}

impl BudgetWithCategory {
    /// The raw spent-to-limit ratio as a percentage.
    ///
    /// May exceed 100 when the budget is blown; threshold logic needs the
    /// uncapped value.
    pub fn utilization(&self) -> f64 {
        if self.budget.amount <= 0.0 {
            return 0.0;
        }

        self.spent / self.budget.amount * 100.0
    }

    /// The utilization capped at 100, for display as a progress bar.
    pub fn capped_utilization(&self) -> f64 {
        self.utilization().min(100.0)
    }
}

/// Pair each budget with its category and the total spent against it.
///
/// Spent is the sum of expense-type transaction amounts in the budget's
/// category; income never counts against a budget. Budgets whose category is
/// not in `categories` are dropped from the overview and logged, so this
/// function cannot fail.
pub fn budget_overview(
    budgets: &[Budget],
    categories: &[Category],
    transactions: &[Transaction],
) -> Vec<BudgetWithCategory> {
    let categories_by_id: HashMap<DatabaseID, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let mut spent_by_category: HashMap<DatabaseID, f64> = HashMap::new();
    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        *spent_by_category
            .entry(transaction.category_id)
            .or_insert(0.0) += transaction.amount;
    }

    budgets
        .iter()
        .filter_map(|budget| {
            let Some(category) = categories_by_id.get(&budget.category_id) else {
                tracing::warn!(
                    "dropping budget {} from overview: category {} does not exist",
                    budget.id,
                    budget.category_id
                );
                return None;
            };

            Some(BudgetWithCategory {
                budget: budget.clone(),
                category: (*category).clone(),
                spent: spent_by_category
                    .get(&budget.category_id)
                    .copied()
                    .unwrap_or(0.0),
            })
        })
        .collect()
}

#[cfg(test)]
mod budget_overview_tests {
    use time::macros::date;

    use crate::models::{
        Budget, Category, CategoryColor, CategoryName, Transaction, TransactionType,
    };

    use super::{BudgetTier, DEFAULT_TIER_THRESHOLDS, budget_overview};

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: CategoryName::new_unchecked(name),
            category_type: TransactionType::Expense,
            color: CategoryColor::Orange,
            icon: None,
        }
    }

    fn budget(id: i64, amount: f64, category_id: i64) -> Budget {
        Budget {
            id,
            category_id,
            amount,
            period: "monthly".to_string(),
        }
    }

    fn transaction(amount: f64, transaction_type: TransactionType, category_id: i64) -> Transaction {
        Transaction {
            id: 0,
            description: String::new(),
            amount,
            date: date!(2025 - 01 - 15),
            transaction_type,
            category_id,
        }
    }

    #[test]
    fn spent_sums_expenses_in_the_budget_category() {
        let categories = [category(1, "Groceries"), category(2, "Rent")];
        let budgets = [budget(1, 800.0, 1)];
        let transactions = [
            transaction(250.0, TransactionType::Expense, 1),
            transaction(1200.0, TransactionType::Expense, 2),
            transaction(5000.0, TransactionType::Income, 1),
        ];

        let overview = budget_overview(&budgets, &categories, &transactions);

        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].spent, 250.0);
        assert_eq!(overview[0].utilization(), 31.25);
        assert_eq!(
            DEFAULT_TIER_THRESHOLDS.tier(overview[0].utilization()),
            BudgetTier::Safe
        );
    }

    #[test]
    fn spent_is_idempotent_across_reads() {
        let categories = [category(1, "Groceries")];
        let budgets = [budget(1, 800.0, 1)];
        let transactions = [transaction(250.0, TransactionType::Expense, 1)];

        let first = budget_overview(&budgets, &categories, &transactions);
        let second = budget_overview(&budgets, &categories, &transactions);

        assert_eq!(first, second);
    }

    #[test]
    fn raw_utilization_can_exceed_100_while_capped_cannot() {
        let categories = [category(1, "Groceries")];
        let budgets = [budget(1, 100.0, 1)];
        let transactions = [transaction(250.0, TransactionType::Expense, 1)];

        let overview = budget_overview(&budgets, &categories, &transactions);

        assert_eq!(overview[0].utilization(), 250.0);
        assert_eq!(overview[0].capped_utilization(), 100.0);
    }

    #[test]
    fn budget_with_no_transactions_has_zero_spent() {
        let categories = [category(1, "Groceries")];
        let budgets = [budget(1, 800.0, 1)];

        let overview = budget_overview(&budgets, &categories, &[]);

        assert_eq!(overview[0].spent, 0.0);
        assert_eq!(overview[0].utilization(), 0.0);
    }

    #[test]
    fn orphaned_budgets_are_dropped() {
        let categories = [category(1, "Groceries")];
        let budgets = [budget(1, 800.0, 1), budget(2, 500.0, 42)];

        let overview = budget_overview(&budgets, &categories, &[]);

        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].budget.id, 1);
    }

    #[test]
    fn tier_boundaries_follow_the_thresholds() {
        let cases = [
            (0.0, BudgetTier::Safe),
            (69.9, BudgetTier::Safe),
            (70.0, BudgetTier::Warning),
            (89.9, BudgetTier::Warning),
            (90.0, BudgetTier::Danger),
            (250.0, BudgetTier::Danger),
        ];

        for (utilization, expected_tier) in cases {
            assert_eq!(
                DEFAULT_TIER_THRESHOLDS.tier(utilization),
                expected_tier,
                "utilization {utilization}"
            );
        }
    }
}
