//! Shared building blocks for the KakaoTalk analyzer.
//!
//! Models, error type, date formats, report formatting and CLI settings used
//! by the data pipeline and the binary.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{AnalyzerError, Result};
