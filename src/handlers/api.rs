use axum::extract::Multipart;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::error::AppError;
use crate::filters::format_decimal;
use crate::handlers::upload::{analyze, read_upload};
use crate::models::{CategoryTotal, SpendingSummary, SubscriptionTotal};

/// `AppError` rendered as `{"error": "..."}` instead of an HTML fragment.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
        }

        if let AppError::Io(_) | AppError::Internal(_) = &self.0 {
            tracing::error!("API error: {}", self.0);
        }

        (
            self.0.status(),
            Json(ErrorBody {
                error: self.0.user_message(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct AmountEntry {
    pub name: String,
    pub amount_cents: i64,
    pub amount: String,
}

impl From<&CategoryTotal> for AmountEntry {
    fn from(c: &CategoryTotal) -> Self {
        Self {
            name: c.category.clone(),
            amount_cents: c.total_cents,
            amount: format_decimal(c.total_cents),
        }
    }
}

impl From<&SubscriptionTotal> for AmountEntry {
    fn from(s: &SubscriptionTotal) -> Self {
        Self {
            name: s.description.clone(),
            amount_cents: s.total_cents,
            amount: format_decimal(s.total_cents),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub row_count: usize,
    pub expense_count: usize,
    pub total_spent_cents: i64,
    pub total_spent: String,
    pub categories: Vec<AmountEntry>,
    pub subscriptions: Vec<AmountEntry>,
    pub profile: String,
}

impl SummaryResponse {
    fn new(row_count: usize, summary: &SpendingSummary, profile: String) -> Self {
        Self {
            row_count,
            expense_count: summary.expense_count,
            total_spent_cents: summary.total_spent_cents,
            total_spent: format_decimal(summary.total_spent_cents),
            categories: summary.categories.iter().map(AmountEntry::from).collect(),
            subscriptions: summary.subscriptions.iter().map(AmountEntry::from).collect(),
            profile,
        }
    }
}

/// Same pipeline as the upload page, answered as JSON.
pub async fn summary(multipart: Multipart) -> Result<Json<SummaryResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let analysis = analyze(&upload.content)?;

    Ok(Json(SummaryResponse::new(
        analysis.table.row_count(),
        &analysis.summary,
        analysis.profile.as_str().to_string(),
    )))
}
