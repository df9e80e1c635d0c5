//! Computes the income/expense series over the trailing calendar months.

use serde::Serialize;
use time::{Date, Month};

use crate::models::{Transaction, TransactionType};

/// The number of trailing months shown when the client does not ask for a
/// specific window.
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// The largest window a client may request, ten years of months.
pub const MAX_TREND_MONTHS: u32 = 120;

/// The income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// The abbreviated name of the month, e.g., "Jan".
    pub month: String,
    /// The year the month falls in.
    pub year: i32,
    /// The sum of income amounts within the month.
    pub income: f64,
    /// The sum of expense amounts within the month.
    pub expense: f64,
}

/// Bucket `transactions` into the `months` calendar months ending with the
/// month of `today`, oldest bucket first.
///
/// `today` should be the current date in the server's configured timezone
/// (see [local_today](crate::local_today)); buckets span whole calendar
/// months of that date's calendar. The result always has exactly `months`
/// entries; months with no transactions have zero totals.
pub fn monthly_trends(
    transactions: &[Transaction],
    months: u32,
    today: Date,
) -> Vec<MonthlyTrend> {
    (0..months)
        .rev()
        .map(|months_back| {
            let (year, month) = month_before(today.year(), today.month(), months_back);

            let (income, expense) = transactions
                .iter()
                .filter(|transaction| {
                    transaction.date.year() == year && transaction.date.month() == month
                })
                .fold((0.0, 0.0), |(income, expense), transaction| {
                    match transaction.transaction_type {
                        TransactionType::Income => (income + transaction.amount, expense),
                        TransactionType::Expense => (income, expense + transaction.amount),
                    }
                });

            MonthlyTrend {
                month: month_abbreviation(month).to_string(),
                year,
                income,
                expense,
            }
        })
        .collect()
}

/// The calendar month `months_back` months before `month` of `year`.
///
/// The arithmetic is done in i64 so that large `months_back` values step far
/// into the past instead of wrapping around into the future.
fn month_before(year: i32, month: Month, months_back: u32) -> (i32, Month) {
    let total_months = i64::from(year) * 12 + (month as i64 - 1) - i64::from(months_back);

    let year = total_months.div_euclid(12) as i32;
    let month = Month::try_from((total_months.rem_euclid(12) + 1) as u8)
        .expect("month index is always in 1..=12 after rem_euclid");

    (year, month)
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
