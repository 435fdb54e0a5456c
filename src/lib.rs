pub mod cli;
pub mod config;
pub mod contacts;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod outlet;
pub mod research;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{ResearchError, Result};
pub use research::context::ResearchContext;
pub use research::launch;
pub use research::orchestrator::ResearchOrchestrator;
pub use types::{ResearchReport, ResearchRequest, SenderProfile};
