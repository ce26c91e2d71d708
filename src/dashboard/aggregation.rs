//! Transaction data aggregation for the dashboard.
//!
//! Provides pure functions that group transactions by category or month, work
//! out each category's share of spending and compare spending against budgets.
//! Empty input always produces an empty or absent result, and a division by
//! zero produces 0. Amounts are at most [crate::MAX_AMOUNT], so totals and
//! percentages are always finite.

use serde::{Deserialize, Serialize};

use crate::{Budget, Category, Transaction, YearMonth};

/// The number of months shown in the monthly totals chart.
pub(crate) const MONTHLY_TOTALS_LIMIT: usize = 6;

/// Spending at or below this fraction of a budget counts as comfortably under budget.
pub(crate) const UNDER_BUDGET_THRESHOLD: f64 = 0.8;

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category the amounts were summed for.
    pub category: Category,
    /// The sum of the transaction amounts.
    pub amount: f64,
}

/// The total amount spent in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// The month the amounts were summed for.
    pub month: YearMonth,
    /// A short label for charts, e.g. "Jan 2024".
    pub label: String,
    /// The sum of the transaction amounts.
    pub total: f64,
}

/// How much of the total spending went to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// The category.
    pub category: Category,
    /// The sum of the transaction amounts in the category.
    pub amount: f64,
    /// `amount` as a percentage of the total over all categories.
    pub percentage: f64,
}

/// A budget compared against what was actually spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUsage {
    /// The budgeted category.
    pub category: Category,
    /// The budget for the month.
    pub budget_amount: f64,
    /// How much was spent in the category.
    pub actual_amount: f64,
    /// `actual_amount` as a percentage of `budget_amount`.
    pub percent_used: f64,
}

impl BudgetUsage {
    /// Whether more was spent than budgeted. Spending exactly the budget is not over budget.
    pub fn is_over_budget(&self) -> bool {
        self.actual_amount > self.budget_amount
    }

    /// Whether spending is at or below 80% of the budget.
    pub fn is_under_budget(&self) -> bool {
        self.actual_amount <= self.budget_amount * UNDER_BUDGET_THRESHOLD
    }

    /// How much of the budget is left, negative when over budget.
    pub fn remaining(&self) -> f64 {
        self.budget_amount - self.actual_amount
    }
}

/// Every budget for a month compared against spending, plus the insights
/// derived from the comparison.
///
/// A budget that is neither over budget nor under 80% of its budget appears
/// in `entries` only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    /// One entry per budget in the target month, in the order the budgets were given.
    pub entries: Vec<BudgetUsage>,
    /// The sum of all budgets in the target month.
    pub total_budget: f64,
    /// The sum of the spending in the budgeted categories.
    pub total_spent: f64,
    /// Entries where more was spent than budgeted.
    pub over_budget: Vec<BudgetUsage>,
    /// Entries where spending is at or below 80% of the budget.
    pub under_budget: Vec<BudgetUsage>,
}

/// Sums transaction amounts by category.
///
/// # Returns
/// One total per category that appears in `transactions`, in the order each
/// category was first encountered.
pub fn totals_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions {
        match totals
            .iter_mut()
            .find(|total| total.category == transaction.category)
        {
            Some(total) => total.amount += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category,
                amount: transaction.amount,
            }),
        }
    }

    totals
}

/// Sums transaction amounts by month.
///
/// # Returns
/// Totals in chronological order, limited to the most recent
/// [MONTHLY_TOTALS_LIMIT] months that have transactions.
pub fn totals_by_month(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut totals: Vec<(YearMonth, f64)> = Vec::new();

    for transaction in transactions {
        let month = YearMonth::from(transaction.date);

        match totals.iter_mut().find(|(total_month, _)| *total_month == month) {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((month, transaction.amount)),
        }
    }

    totals.sort_by_key(|(month, _)| *month);
    let skip = totals.len().saturating_sub(MONTHLY_TOTALS_LIMIT);

    totals
        .into_iter()
        .skip(skip)
        .map(|(month, total)| MonthlyTotal {
            month,
            label: month.label(),
            total,
        })
        .collect()
}

/// Works out what percentage of the total spending each category makes up.
///
/// # Returns
/// Shares ordered from the largest amount to the smallest. Categories with
/// equal amounts keep the order they were first encountered in.
pub fn category_share(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let totals = totals_by_category(transactions);
    let grand_total: f64 = totals.iter().map(|total| total.amount).sum();

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|total| CategoryShare {
            category: total.category,
            amount: total.amount,
            percentage: percentage(total.amount, grand_total),
        })
        .collect();

    // `sort_by` is stable, which keeps ties in encounter order.
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    shares
}

/// Compares the budgets for `target_month` against spending.
///
/// The actual amount for a budget is the total of `transactions` in the
/// budget's category, so callers should pass only the transactions for
/// `target_month`. Budgets for other months are ignored.
pub fn budget_comparison(
    transactions: &[Transaction],
    budgets: &[Budget],
    target_month: YearMonth,
) -> BudgetComparison {
    let totals = totals_by_category(transactions);

    let entries: Vec<BudgetUsage> = budgets
        .iter()
        .filter(|budget| budget.month == target_month)
        .map(|budget| {
            let actual_amount = totals
                .iter()
                .find(|total| total.category == budget.category)
                .map_or(0.0, |total| total.amount);

            BudgetUsage {
                category: budget.category,
                budget_amount: budget.amount,
                actual_amount,
                percent_used: percentage(actual_amount, budget.amount),
            }
        })
        .collect();

    let total_budget = entries.iter().map(|entry| entry.budget_amount).sum();
    let total_spent = entries.iter().map(|entry| entry.actual_amount).sum();
    let over_budget = entries
        .iter()
        .filter(|entry| entry.is_over_budget())
        .cloned()
        .collect();
    let under_budget = entries
        .iter()
        .filter(|entry| entry.is_under_budget())
        .cloned()
        .collect();

    BudgetComparison {
        entries,
        total_budget,
        total_spent,
        over_budget,
        under_budget,
    }
}

/// Finds the category with the most spending.
///
/// # Returns
/// `None` for empty input. If several categories share the largest amount,
/// the first one encountered wins.
pub fn top_category(transactions: &[Transaction]) -> Option<CategoryTotal> {
    totals_by_category(transactions)
        .into_iter()
        .fold(None, |top, total| match top {
            Some(top) if top.amount >= total.amount => Some(top),
            _ => Some(total),
        })
}

/// Finds the transaction with the latest date.
///
/// # Returns
/// `None` for empty input. If several transactions share the latest date,
/// the earliest one in `transactions` wins.
pub fn most_recent(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions
        .iter()
        .fold(None, |latest: Option<&Transaction>, transaction| {
            match latest {
                Some(latest) if latest.date >= transaction.date => Some(latest),
                _ => Some(transaction),
            }
        })
}

/// Selects the transactions that happened in `month`.
pub fn transactions_in_month(transactions: &[Transaction], month: YearMonth) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| month.contains(transaction.date))
        .cloned()
        .collect()
}

/// `part` as a percentage of `whole`.
///
/// Returns 0 if `whole` is 0 or the result is too large to represent, so the
/// output is always a finite number.
fn percentage(part: f64, whole: f64) -> f64 {
    let percentage = part / whole * 100.0;

    if percentage.is_finite() {
        percentage
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, macros::date};

    use crate::{
        Budget, Category, MAX_AMOUNT, Transaction, YearMonth,
        dashboard::aggregation::{
            CategoryTotal, budget_comparison, category_share, most_recent, percentage,
            top_category, totals_by_category, totals_by_month, transactions_in_month,
        },
    };

    fn create_test_transaction(amount: f64, date: Date, category: Category) -> Transaction {
        Transaction {
            id: 0,
            amount,
            date,
            description: "test".to_owned(),
            category,
        }
    }

    fn create_test_budget(category: Category, amount: f64, month: &str) -> Budget {
        Budget {
            id: 0,
            category,
            amount,
            month: month.parse().unwrap(),
        }
    }

    fn month(text: &str) -> YearMonth {
        text.parse().unwrap()
    }

    #[test]
    fn totals_by_category_sums_per_category() {
        let transactions = vec![
            create_test_transaction(10.0, date!(2024 - 01 - 15), Category::Food),
            create_test_transaction(50.0, date!(2024 - 01 - 20), Category::Transportation),
            create_test_transaction(5.5, date!(2024 - 02 - 10), Category::Food),
        ];

        let result = totals_by_category(&transactions);

        assert_eq!(
            result,
            vec![
                CategoryTotal {
                    category: Category::Food,
                    amount: 15.5
                },
                CategoryTotal {
                    category: Category::Transportation,
                    amount: 50.0
                },
            ]
        );
    }

    #[test]
    fn totals_by_category_conserves_total() {
        let transactions = vec![
            create_test_transaction(12.25, date!(2024 - 01 - 01), Category::Food),
            create_test_transaction(800.0, date!(2024 - 01 - 02), Category::Rent),
            create_test_transaction(3.75, date!(2024 - 01 - 03), Category::Food),
            create_test_transaction(42.0, date!(2024 - 01 - 04), Category::Other),
        ];

        let category_sum: f64 = totals_by_category(&transactions)
            .iter()
            .map(|total| total.amount)
            .sum();
        let transaction_sum: f64 = transactions.iter().map(|t| t.amount).sum();

        assert!((category_sum - transaction_sum).abs() < 1e-9);
    }

    #[test]
    fn totals_by_category_handles_empty_input() {
        assert!(totals_by_category(&[]).is_empty());
    }

    #[test]
    fn totals_by_month_sums_and_sorts_months() {
        let transactions = vec![
            create_test_transaction(30.0, date!(2024 - 02 - 10), Category::Food),
            create_test_transaction(100.0, date!(2024 - 01 - 15), Category::Food),
            create_test_transaction(50.0, date!(2024 - 01 - 20), Category::Travel),
        ];

        let result = totals_by_month(&transactions);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].month, month("2024-01"));
        assert_eq!(result[0].label, "Jan 2024");
        assert_eq!(result[0].total, 150.0);
        assert_eq!(result[1].month, month("2024-02"));
        assert_eq!(result[1].total, 30.0);
    }

    #[test]
    fn totals_by_month_keeps_most_recent_six_months() {
        let transactions: Vec<_> = (1u8..=8)
            .map(|month_number| {
                let calendar_month = Month::try_from(month_number).unwrap();
                let date = Date::from_calendar_date(2023, calendar_month, 1).unwrap();
                create_test_transaction(f64::from(month_number), date, Category::Food)
            })
            .collect();

        let result = totals_by_month(&transactions);

        let months: Vec<_> = result.iter().map(|total| total.month.to_string()).collect();
        assert_eq!(
            months,
            vec!["2023-03", "2023-04", "2023-05", "2023-06", "2023-07", "2023-08"]
        );
    }

    #[test]
    fn totals_by_month_orders_across_years() {
        let transactions = vec![
            create_test_transaction(1.0, date!(2024 - 01 - 01), Category::Food),
            create_test_transaction(2.0, date!(2023 - 12 - 31), Category::Food),
        ];

        let result = totals_by_month(&transactions);

        assert_eq!(result[0].month, month("2023-12"));
        assert_eq!(result[1].month, month("2024-01"));
    }

    #[test]
    fn totals_by_month_handles_empty_input() {
        assert!(totals_by_month(&[]).is_empty());
    }

    #[test]
    fn category_share_orders_by_amount_descending() {
        let transactions = vec![
            create_test_transaction(25.0, date!(2024 - 01 - 01), Category::Food),
            create_test_transaction(50.0, date!(2024 - 01 - 02), Category::Rent),
            create_test_transaction(25.0, date!(2024 - 01 - 03), Category::Travel),
        ];

        let result = category_share(&transactions);

        let got: Vec<_> = result
            .iter()
            .map(|share| (share.category, share.amount, share.percentage))
            .collect();
        assert_eq!(
            got,
            vec![
                (Category::Rent, 50.0, 50.0),
                (Category::Food, 25.0, 25.0),
                (Category::Travel, 25.0, 25.0),
            ]
        );
    }

    #[test]
    fn category_share_percentages_sum_to_100() {
        let transactions = vec![
            create_test_transaction(10.0, date!(2024 - 01 - 01), Category::Food),
            create_test_transaction(20.0, date!(2024 - 01 - 02), Category::Rent),
            create_test_transaction(70.3, date!(2024 - 01 - 03), Category::Utilities),
        ];

        let total: f64 = category_share(&transactions)
            .iter()
            .map(|share| share.percentage)
            .sum();

        assert!((total - 100.0).abs() < 1e-9, "got total percentage {total}");
    }

    #[test]
    fn category_share_handles_empty_input() {
        assert!(category_share(&[]).is_empty());
    }

    #[test]
    fn budget_comparison_matches_worked_example() {
        let budgets = vec![
            create_test_budget(Category::Food, 100.0, "2024-01"),
            create_test_budget(Category::Rent, 1000.0, "2024-01"),
        ];
        let transactions = vec![
            create_test_transaction(30.0, date!(2024 - 01 - 05), Category::Food),
            create_test_transaction(90.0, date!(2024 - 01 - 20), Category::Food),
            create_test_transaction(1000.0, date!(2024 - 01 - 01), Category::Rent),
        ];

        let result = budget_comparison(&transactions, &budgets, month("2024-01"));

        assert_eq!(result.entries.len(), 2);
        let food = &result.entries[0];
        assert_eq!(food.category, Category::Food);
        assert_eq!(food.actual_amount, 120.0);
        assert_eq!(food.remaining(), -20.0);
        assert!(food.is_over_budget());
        assert_eq!(food.percent_used, 120.0);
        let rent = &result.entries[1];
        assert_eq!(rent.category, Category::Rent);
        assert_eq!(rent.actual_amount, 1000.0);
        assert!(!rent.is_over_budget());
        assert_eq!(rent.percent_used, 100.0);

        assert_eq!(result.over_budget, vec![food.clone()]);
        assert!(result.under_budget.is_empty());
        assert_eq!(result.total_budget, 1100.0);
        assert_eq!(result.total_spent, 1120.0);
    }

    #[test]
    fn budget_comparison_leaves_80_to_100_percent_unclassified() {
        let budgets = vec![
            create_test_budget(Category::Food, 100.0, "2024-01"),
            create_test_budget(Category::Travel, 100.0, "2024-01"),
            create_test_budget(Category::Shopping, 100.0, "2024-01"),
        ];
        let transactions = vec![
            create_test_transaction(80.0, date!(2024 - 01 - 05), Category::Food),
            create_test_transaction(90.0, date!(2024 - 01 - 05), Category::Travel),
        ];

        let result = budget_comparison(&transactions, &budgets, month("2024-01"));

        let under: Vec<_> = result.under_budget.iter().map(|e| e.category).collect();
        assert_eq!(under, vec![Category::Food, Category::Shopping]);
        assert!(result.over_budget.is_empty());
        assert_eq!(result.entries[2].actual_amount, 0.0);
        assert_eq!(result.entries[2].percent_used, 0.0);
    }

    #[test]
    fn budget_comparison_is_empty_without_budgets_for_month() {
        let budgets = vec![create_test_budget(Category::Food, 100.0, "2023-12")];
        let transactions = vec![
            create_test_transaction(30.0, date!(2024 - 01 - 05), Category::Food),
            create_test_transaction(90.0, date!(2024 - 01 - 20), Category::Rent),
        ];

        let result = budget_comparison(&transactions, &budgets, month("2024-01"));

        assert!(result.entries.is_empty());
        assert!(result.over_budget.is_empty());
        assert!(result.under_budget.is_empty());
        assert_eq!(result.total_budget, 0.0);
        assert_eq!(result.total_spent, 0.0);
    }

    #[test]
    fn top_category_picks_largest_total() {
        let transactions = vec![
            create_test_transaction(10.0, date!(2024 - 01 - 01), Category::Food),
            create_test_transaction(15.0, date!(2024 - 01 - 02), Category::Travel),
            create_test_transaction(10.0, date!(2024 - 01 - 03), Category::Food),
        ];

        assert_eq!(
            top_category(&transactions),
            Some(CategoryTotal {
                category: Category::Food,
                amount: 20.0
            })
        );
    }

    #[test]
    fn top_category_breaks_ties_by_first_encountered() {
        let transactions = vec![
            create_test_transaction(10.0, date!(2024 - 01 - 01), Category::Shopping),
            create_test_transaction(10.0, date!(2024 - 01 - 02), Category::Food),
        ];

        let top = top_category(&transactions).unwrap();

        assert_eq!(top.category, Category::Shopping);
    }

    #[test]
    fn top_category_handles_empty_input() {
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn most_recent_handles_empty_and_single_input() {
        assert_eq!(most_recent(&[]), None);

        let only = create_test_transaction(1.0, date!(2024 - 01 - 01), Category::Food);
        assert_eq!(most_recent(std::slice::from_ref(&only)), Some(&only));
    }

    #[test]
    fn most_recent_picks_latest_date_and_first_on_ties() {
        let mut transactions = vec![
            create_test_transaction(1.0, date!(2024 - 01 - 01), Category::Food),
            create_test_transaction(2.0, date!(2024 - 03 - 01), Category::Food),
            create_test_transaction(3.0, date!(2024 - 02 - 01), Category::Food),
            create_test_transaction(4.0, date!(2024 - 03 - 01), Category::Food),
        ];
        for (id, transaction) in transactions.iter_mut().enumerate() {
            transaction.id = id as i64 + 1;
        }

        let latest = most_recent(&transactions).unwrap();

        assert_eq!(latest.id, 2);
    }

    #[test]
    fn transactions_in_month_filters_by_month() {
        let transactions = vec![
            create_test_transaction(1.0, date!(2024 - 01 - 31), Category::Food),
            create_test_transaction(2.0, date!(2024 - 02 - 01), Category::Food),
            create_test_transaction(3.0, date!(2023 - 02 - 15), Category::Food),
        ];

        let result = transactions_in_month(&transactions, month("2024-02"));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].amount, 2.0);
    }

    #[test]
    fn percentage_of_zero_is_zero() {
        assert_eq!(percentage(0.0, 0.0), 0.0);
        assert_eq!(percentage(10.0, 0.0), 0.0);
    }

    #[test]
    fn percentage_that_overflows_is_zero() {
        assert_eq!(percentage(MAX_AMOUNT, f64::MIN_POSITIVE), 0.0);
    }

    #[test]
    fn largest_amounts_give_finite_results() {
        let transactions = vec![
            create_test_transaction(MAX_AMOUNT, date!(2024 - 01 - 01), Category::Food),
            create_test_transaction(MAX_AMOUNT, date!(2024 - 01 - 02), Category::Food),
            create_test_transaction(MAX_AMOUNT, date!(2024 - 01 - 03), Category::Rent),
        ];
        let budgets = vec![create_test_budget(Category::Food, MAX_AMOUNT, "2024-01")];

        let shares = category_share(&transactions);
        let comparison = budget_comparison(&transactions, &budgets, month("2024-01"));
        let monthly = totals_by_month(&transactions);

        assert!(shares.iter().all(|share| share.amount.is_finite()));
        assert!(shares.iter().all(|share| share.percentage.is_finite()));
        assert_eq!(shares[0].amount, 2.0 * MAX_AMOUNT);
        assert_eq!(comparison.entries[0].percent_used, 200.0);
        assert_eq!(comparison.total_spent, 2.0 * MAX_AMOUNT);
        assert_eq!(monthly[0].total, 3.0 * MAX_AMOUNT);
    }
}
