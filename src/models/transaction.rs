/// One typed row of an uploaded spending CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Signed amount; negative values are expenses. `None` when the cell was empty.
    pub amount_cents: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub row_number: usize,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount_cents.is_some_and(|cents| cents < 0)
    }

    pub fn category_is(&self, name: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(name))
    }
}

/// An uploaded CSV after loading: the raw cells for display plus typed rows.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    /// Column names, trimmed of surrounding whitespace.
    pub headers: Vec<String>,
    /// Raw records padded to the header width.
    pub rows: Vec<Vec<String>>,
    pub transactions: Vec<Transaction>,
}

impl LoadedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(amount_cents: Option<i64>, category: Option<&str>) -> Transaction {
        Transaction {
            amount_cents,
            category: category.map(String::from),
            description: None,
            row_number: 2,
        }
    }

    #[test]
    fn test_is_expense() {
        assert!(row(Some(-1), None).is_expense());
        assert!(!row(Some(0), None).is_expense());
        assert!(!row(Some(500), None).is_expense());
        assert!(!row(None, None).is_expense());
    }

    #[test]
    fn test_category_is_ignores_case() {
        assert!(row(None, Some("Subscriptions")).category_is("subscriptions"));
        assert!(row(None, Some("SUBSCRIPTIONS")).category_is("subscriptions"));
        assert!(!row(None, Some("Subscription")).category_is("subscriptions"));
        assert!(!row(None, None).category_is("subscriptions"));
    }
}
