//! Computes the income/expense/balance totals for a set of transactions.

use serde::Serialize;

use crate::models::{Transaction, TransactionType};

/// The income, expense, and balance totals for a set of transactions.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// Income minus expense.
    pub balance: f64,
}

/// Sum `transactions` into income and expense totals.
///
/// An empty slice produces all-zero totals; this function cannot fail.
pub fn transaction_summary(transactions: &[Transaction]) -> TransactionSummary {
    let (income, expense) = transactions.iter().fold(
        (0.0, 0.0),
        |(income, expense), transaction| match transaction.transaction_type {
            TransactionType::Income => (income + transaction.amount, expense),
            TransactionType::Expense => (income, expense + transaction.amount),
        },
    );

    TransactionSummary {
        income,
        expense,
        balance: income - expense,
    }
}

#[cfg(test)]
mod transaction_summary_tests {
    use time::macros::date;

    use crate::models::{Transaction, TransactionType};

    use super::transaction_summary;

    fn transaction(amount: f64, transaction_type: TransactionType) -> Transaction {
        Transaction {
            id: 0,
            description: String::new(),
            amount,
            date: date!(2025 - 01 - 15),
            transaction_type,
            category_id: 1,
        }
    }

    #[test]
    fn empty_ledger_sums_to_zero() {
        let summary = transaction_summary(&[]);

        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.expense, 0.0);
        assert_eq!(summary.balance, 0.0);
    }

    #[test]
    fn sums_income_and_expense_partitions() {
        let transactions = [
            transaction(5000.0, TransactionType::Income),
            transaction(250.0, TransactionType::Expense),
            transaction(1200.0, TransactionType::Expense),
        ];

        let summary = transaction_summary(&transactions);

        assert_eq!(summary.income, 5000.0);
        assert_eq!(summary.expense, 1450.0);
        assert_eq!(summary.balance, 3550.0);
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let ledgers = [
            vec![],
            vec![transaction(100.0, TransactionType::Income)],
            vec![
                transaction(100.0, TransactionType::Income),
                transaction(175.5, TransactionType::Expense),
                transaction(33.3, TransactionType::Expense),
                transaction(12.0, TransactionType::Income),
            ],
        ];

        for transactions in ledgers {
            let summary = transaction_summary(&transactions);

            assert_eq!(summary.balance, summary.income - summary.expense);
        }
    }
}
