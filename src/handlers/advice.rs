use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

use crate::error::{AppResult, RenderHtml};
use crate::models::SpendingProfile;
use crate::services::advice::{answer_question, request_advice, AdviceOutcome};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "partials/advice.html")]
pub struct AdviceTemplate {
    pub outcome: AdviceOutcome,
}

#[derive(Template)]
#[template(path = "partials/prompt.html")]
pub struct PromptTemplate {
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AdviceForm {
    pub profile: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub api_key: String,
}

fn api_key(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|k| !k.is_empty())
}

/// "Get AI Advice": tips for the spending profile carried by the form.
/// Without a profile there is nothing to advise on and no remote call is made.
pub async fn advice(
    State(state): State<AppState>,
    Form(form): Form<AdviceForm>,
) -> AppResult<Html<String>> {
    let profile = SpendingProfile::new(form.profile);
    if profile.is_empty() {
        return PromptTemplate {
            message: "Upload a CSV file first to get advice on your spending.",
        }
        .render_html();
    }
    let outcome = request_advice(
        &state.http,
        &state.config.ai,
        api_key(&form.api_key),
        &profile,
    )
    .await;

    AdviceTemplate { outcome }.render_html()
}

/// Free-text question. A blank question asks the user to type one and makes no remote call.
pub async fn ask(
    State(state): State<AppState>,
    Form(form): Form<QuestionForm>,
) -> AppResult<Html<String>> {
    if form.question.trim().is_empty() {
        return PromptTemplate {
            message: "Type a question above, e.g. \"How can I save $200/month?\"",
        }
        .render_html();
    }

    let outcome = answer_question(
        &state.http,
        &state.config.ai,
        api_key(&form.api_key),
        &form.question,
    )
    .await;

    AdviceTemplate { outcome }.render_html()
}
