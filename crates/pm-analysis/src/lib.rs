//! # pm-analysis
//!
//! The post-mortem pipeline on top of [`pm_core`] and [`pm_llm`]:
//!
//! ```text
//! RawIncident -> normalize -> PromptBuilder::build -> CompletionClient::complete_with(extract_json)
//!             -> enhance -> PostMortemReport
//! ```
//!
//! [`Analyzer`] wires the steps together. The pieces are public so the CLI
//! can run them individually (`normalize`, `prompt`) without a network call.

pub mod analyzer;
pub mod enhance;
pub mod error;
pub mod prompts;

pub use analyzer::{Analyzer, ModelParams};
pub use enhance::{enhance, enhance_at};
pub use error::PromptError;
pub use prompts::{PromptBuilder, PromptTemplates};
