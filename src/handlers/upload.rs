use askama::Template;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult, RenderHtml};
use crate::models::{AiProvider, LoadedTable, SpendingProfile, SpendingSummary};
use crate::services::csv_parser::parse_csv;
use crate::services::profile::build_profile;
use crate::services::spending::summarize;
use crate::state::AppState;
use crate::VERSION;

/// Name of the multipart field carrying the CSV.
pub const FILE_FIELD: &str = "file";

// Templates

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub version: &'static str,
}

#[derive(Template)]
#[template(path = "pages/report.html")]
pub struct ReportTemplate {
    pub title: String,
    pub version: &'static str,
    pub file_name: String,
    pub table: LoadedTable,
    pub summary: SpendingSummary,
    pub profile: SpendingProfile,
    pub provider: AiProvider,
    pub model: String,
}

/// Everything derived from one uploaded file.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: LoadedTable,
    pub summary: SpendingSummary,
    pub profile: SpendingProfile,
}

/// An uploaded file as received.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Loader, aggregator and profile builder, in that order.
pub fn analyze(content: &[u8]) -> AppResult<Analysis> {
    let table = parse_csv(content)?;
    let summary = summarize(&table.transactions);
    let profile = build_profile(&summary);
    Ok(Analysis {
        table,
        summary,
        profile,
    })
}

/// Body read failures past the configured upload limit keep their 413.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Upload(e.body_text())
    }
}

/// Pull the CSV out of a multipart body. Other fields are ignored.
pub async fn read_upload(mut multipart: Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload.csv".to_string());

        let content = field.bytes().await.map_err(multipart_error)?.to_vec();

        if content.is_empty() {
            return Err(AppError::Upload("The uploaded file is empty.".into()));
        }

        debug!(file_name = %file_name, size_bytes = content.len(), "Received CSV file");
        return Ok(UploadedFile { file_name, content });
    }

    Err(AppError::Upload("No file uploaded.".into()))
}

// Handlers

pub async fn index() -> AppResult<Html<String>> {
    IndexTemplate {
        title: "Personal Finance AI Coach".into(),
        version: VERSION,
    }
    .render_html()
}

pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> AppResult<Html<String>> {
    let upload_id = Uuid::new_v4();
    let upload = read_upload(multipart).await?;
    info!(upload_id = %upload_id, file_name = %upload.file_name, "Processing uploaded CSV");

    let analysis = analyze(&upload.content)?;

    info!(
        upload_id = %upload_id,
        rows = analysis.table.row_count(),
        expenses = analysis.summary.expense_count,
        total_spent_cents = analysis.summary.total_spent_cents,
        "Upload summarized"
    );

    ReportTemplate {
        title: "Spending Report".into(),
        version: VERSION,
        file_name: upload.file_name,
        table: analysis.table,
        summary: analysis.summary,
        profile: analysis.profile,
        provider: state.config.ai.provider,
        model: state.config.ai.model.clone(),
    }
    .render_html()
}
