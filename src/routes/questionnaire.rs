use axum::{
    extract::rejection::JsonRejection,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::{ApiError, AppState};
use crate::questionnaire::{score, QuestionnaireAnswers, ScoreBand};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/questionnaire", post(handler))
}

#[derive(Debug, Serialize)]
struct QuestionnaireResponse {
    success: bool,
    score: u32,
    band: ScoreBand,
    recommendations: &'static [&'static str],
}

/// Handle `POST /questionnaire`. Unknown answers score zero; only a body
/// that is not a JSON object of strings is rejected.
async fn handler(
    body: Result<Json<QuestionnaireAnswers>, JsonRejection>,
) -> Result<Json<QuestionnaireResponse>, ApiError> {
    // ---
    let Json(answers) = body?;
    let total = score(&answers);
    let band = ScoreBand::for_score(total);
    info!("POST /questionnaire - score {} ({:?})", total, band);

    Ok(Json(QuestionnaireResponse {
        success: true,
        score: total,
        band,
        recommendations: band.recommendations(),
    }))
}
