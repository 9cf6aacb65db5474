//! Data pipeline for the KakaoTalk analyzer.
//!
//! Responsible for finding the newest chat export, reading its CSV rows,
//! counting messages per sender inside a date window and writing the ranked
//! report.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod report;
pub mod selector;

pub use kakao_core as core;
