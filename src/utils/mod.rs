//! Utility modules: build info, local persistence, score submission.

pub mod build_info;
pub mod persistence;
pub mod score_sink;

pub use build_info::*;
pub use score_sink::*;
