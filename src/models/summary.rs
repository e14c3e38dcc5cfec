use crate::filters::format_dollars;

/// Summed absolute expense amount for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
}

impl CategoryTotal {
    pub fn total_display(&self) -> String {
        format_dollars(self.total_cents)
    }
}

/// Summed absolute expense amount for one subscription, keyed by description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTotal {
    pub description: String,
    pub total_cents: i64,
}

impl SubscriptionTotal {
    pub fn total_display(&self) -> String {
        format_dollars(self.total_cents)
    }
}

/// Aggregates derived from one upload. Both lists are sorted by amount, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendingSummary {
    pub total_spent_cents: i64,
    pub expense_count: usize,
    pub categories: Vec<CategoryTotal>,
    pub subscriptions: Vec<SubscriptionTotal>,
}

impl SpendingSummary {
    pub fn total_spent_display(&self) -> String {
        format_dollars(self.total_spent_cents)
    }

    pub fn has_subscriptions(&self) -> bool {
        !self.subscriptions.is_empty()
    }
}

/// Plain-text snapshot of a [`SpendingSummary`] used as prompt input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingProfile(String);

impl SpendingProfile {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for SpendingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
