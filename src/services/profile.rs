use crate::filters::format_dollars;
use crate::models::{SpendingProfile, SpendingSummary};

pub const TOP_CATEGORY_COUNT: usize = 3;

/// Render the summary as the plain-text profile sent to the advice model.
///
/// Categories and subscriptions are re-sorted here so the output does not
/// depend on how the summary was built.
pub fn build_profile(summary: &SpendingSummary) -> SpendingProfile {
    let mut categories: Vec<_> = summary.categories.iter().collect();
    categories.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| a.category.cmp(&b.category))
    });
    let top_categories = categories
        .iter()
        .take(TOP_CATEGORY_COUNT)
        .map(|c| format!("{}: {}", c.category, format_dollars(c.total_cents)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut subscriptions: Vec<_> = summary.subscriptions.iter().collect();
    subscriptions.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| a.description.cmp(&b.description))
    });
    let subscriptions_text = if subscriptions.is_empty() {
        "None".to_string()
    } else {
        subscriptions
            .iter()
            .map(|s| format!("{}: {}", s.description, format_dollars(s.total_cents)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    SpendingProfile::new(format!(
        "Total Spent: {}\n\nTop Categories:\n{}\n\nSubscriptions:\n{}",
        format_dollars(summary.total_spent_cents),
        top_categories,
        subscriptions_text
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTotal, SubscriptionTotal};

    fn category(name: &str, cents: i64) -> CategoryTotal {
        CategoryTotal {
            category: name.into(),
            total_cents: cents,
        }
    }

    #[test]
    fn test_profile_takes_top_three_categories() {
        let summary = SpendingSummary {
            total_spent_cents: 150000,
            expense_count: 9,
            categories: vec![
                category("Travel", 5000),
                category("Rent", 100000),
                category("Food", 30000),
                category("Fun", 15000),
            ],
            subscriptions: vec![
                SubscriptionTotal {
                    description: "Spotify".into(),
                    total_cents: 1000,
                },
                SubscriptionTotal {
                    description: "Netflix".into(),
                    total_cents: 1500,
                },
            ],
        };

        let profile = build_profile(&summary);
        assert_eq!(
            profile.as_str(),
            "Total Spent: $1500.00\n\n\
             Top Categories:\nRent: $1000.00\nFood: $300.00\nFun: $150.00\n\n\
             Subscriptions:\nNetflix: $15.00\nSpotify: $10.00"
        );
    }

    #[test]
    fn test_profile_without_subscriptions_says_none() {
        let summary = SpendingSummary {
            total_spent_cents: 7000,
            expense_count: 2,
            categories: vec![category("Food", 7000)],
            subscriptions: vec![],
        };

        let profile = build_profile(&summary);
        assert!(profile.as_str().ends_with("Subscriptions:\nNone"));
        assert!(profile.as_str().contains("Top Categories:\nFood: $70.00\n"));
    }

    #[test]
    fn test_profile_of_empty_summary() {
        let profile = build_profile(&SpendingSummary::default());
        assert_eq!(
            profile.as_str(),
            "Total Spent: $0.00\n\nTop Categories:\n\n\nSubscriptions:\nNone"
        );
    }

    #[test]
    fn test_profile_is_deterministic_for_ties() {
        let a = SpendingSummary {
            total_spent_cents: 300,
            expense_count: 3,
            categories: vec![category("B", 100), category("A", 100), category("C", 100)],
            subscriptions: vec![],
        };
        let mut b = a.clone();
        b.categories.reverse();

        assert_eq!(build_profile(&a), build_profile(&b));
        assert!(build_profile(&a).as_str().contains("A: $1.00\nB: $1.00\nC: $1.00"));
    }
}
