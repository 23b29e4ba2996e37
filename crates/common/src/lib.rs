//! Literatus Common Library
//!
//! Shared code for the Literatus services including:
//! - Paper model and in-memory library store
//! - Assistant (AI provider) abstraction
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod assistant;
pub mod config;
pub mod errors;
pub mod library;
pub mod metrics;
pub mod model;

// Re-export commonly used types
pub use assistant::{AnalysisReport, Assistant, ExtractedMetadata};
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use library::Library;
pub use model::{AiSummary, Paper, ReadStatus};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How many related titles an analysis attaches to a paper
pub const RELATED_TITLE_LIMIT: usize = 3;

/// How much extracted PDF text is forwarded to the assistant
pub const EXTRACT_TEXT_LIMIT: usize = 4000;
