//! Client for the Get-Site-Styles design-token API.
//!
//! [`client::AnalysisClient`] sends one analysis request and returns the
//! parsed [`models::AnalysisResult`]. [`insights`] and [`tokens`] derive
//! advice and summaries from a result without any I/O.

pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod report;
pub mod session;
pub mod tokens;

pub use client::AnalysisClient;
pub use error::{Error, Result};
pub use insights::generate_insights;
pub use models::{AnalysisRequest, AnalysisResult, ColorFormat, Insight, InsightKind, OutputFormat};
pub use session::Session;
pub use tokens::summarize;
