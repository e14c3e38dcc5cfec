use crate::models::{CategoryTotal, SpendingSummary, SubscriptionTotal, Transaction};
use std::collections::HashMap;
use tracing::debug;

pub const SUBSCRIPTIONS_CATEGORY: &str = "subscriptions";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NO_DESCRIPTION: &str = "(no description)";

/// Aggregate expenses (rows with a negative amount) into totals.
///
/// The total and the per-category totals are accumulated in the same pass
/// over the same rows, so they always agree. Subscriptions are the expense
/// rows whose category is "subscriptions" in any letter case, grouped by
/// description.
pub fn summarize(transactions: &[Transaction]) -> SpendingSummary {
    let mut total_spent_cents: i64 = 0;
    let mut expense_count = 0;
    let mut by_category: HashMap<&str, i64> = HashMap::new();
    let mut by_subscription: HashMap<&str, i64> = HashMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        let spent = transaction.amount_cents.map_or(0, i64::saturating_abs);

        total_spent_cents = total_spent_cents.saturating_add(spent);
        expense_count += 1;

        let category = transaction.category.as_deref().unwrap_or(UNCATEGORIZED);
        let entry = by_category.entry(category).or_insert(0);
        *entry = entry.saturating_add(spent);

        if transaction.category_is(SUBSCRIPTIONS_CATEGORY) {
            let description = transaction.description.as_deref().unwrap_or(NO_DESCRIPTION);
            let entry = by_subscription.entry(description).or_insert(0);
            *entry = entry.saturating_add(spent);
        }
    }

    let mut categories: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total_cents)| CategoryTotal {
            category: category.to_string(),
            total_cents,
        })
        .collect();
    categories.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| a.category.cmp(&b.category))
    });

    let mut subscriptions: Vec<SubscriptionTotal> = by_subscription
        .into_iter()
        .map(|(description, total_cents)| SubscriptionTotal {
            description: description.to_string(),
            total_cents,
        })
        .collect();
    subscriptions.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| a.description.cmp(&b.description))
    });

    debug!(
        expense_count,
        category_count = categories.len(),
        subscription_count = subscriptions.len(),
        "Spending summarized"
    );

    SpendingSummary {
        total_spent_cents,
        expense_count,
        categories,
        subscriptions,
    }
}
