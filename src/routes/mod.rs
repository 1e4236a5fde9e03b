use axum::Router;

use crate::{Config, ReadingStore};

mod chart_data;
mod dashboard;
mod error;
mod health;
mod ingest;
mod questionnaire;

pub use error::ApiError;

/// State shared by every route: the store handle decided at startup and the
/// configuration snapshot.
pub type AppState = (ReadingStore, Config);

// ---

pub fn router(store: ReadingStore, config: Config) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(chart_data::router())
        .merge(ingest::router())
        .merge(questionnaire::router())
        .merge(health::router())
        .with_state((store, config))
}
