//! `waterwatch`: a water quality dashboard.
//!
//! Reads TDS and temperature readings from a remote store, classifies them
//! against fixed thresholds and serves advice, a chart feed, sensor ingestion
//! and a household questionnaire over HTTP.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): each one exposes
//! a small surface re-exported here, and sibling modules import from the crate
//! root rather than reaching into each other's files.

pub mod config;
pub mod models;
pub mod quality;
pub mod questionnaire;
pub mod report;
pub mod routes;
pub mod store;

pub use config::Config;

// These are re-exported for routes/*.rs and store/*.rs, so they only depend on
// the crate root and not on where a type happens to be defined.
pub use models::{ChartPoint, Measurement, Reading, StoredReading};
pub use report::WaterReport;
pub use store::ReadingStore;
