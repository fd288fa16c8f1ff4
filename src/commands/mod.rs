//! CLI command implementations.
//!
//! Available commands:
//! - **score**: Score one ad-hoc list of follow-up outcomes
//! - **assess**: Score, rank and summarize every case in a JSON export
//! - **init**: Write a default `.derivapp.toml`

pub mod assess;
pub mod init;
pub mod score;

pub use assess::{handle_assess, AssessConfig};
pub use init::init_config;
pub use score::{handle_score, ScoreConfig};
