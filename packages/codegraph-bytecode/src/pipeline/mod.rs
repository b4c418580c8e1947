//! Pipeline orchestration
//!
//! - `session`: session-scoped state (config, subtype oracle, reset)
//! - `method_runner`: per-method analyses on a rayon pool

pub mod method_runner;
pub mod session;

pub use method_runner::MethodAnalysisRunner;
pub use session::AnalysisSession;
