//! CLI command implementations.
//!
//! - **analyze**: project summary report, saved as JSON
//! - **complexity**: parse-tree complexity metrics for a file or directory
//! - **security**: rule-based security scan
//! - **init**: write a default configuration file

pub mod analyze;
pub mod complexity;
pub mod init;
pub mod security;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use complexity::{handle_complexity, ComplexityConfig};
pub use init::init_config;
pub use security::{handle_security, SecurityCommandConfig};
