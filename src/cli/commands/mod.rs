//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod aggregate;
pub mod build;
pub mod compile;
pub mod completions;
pub mod config;
pub mod matching;

// Re-export argument types for use in mod.rs
pub use aggregate::AggregateArgs;
pub use build::BuildArgs;
pub use compile::CompileArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use matching::MatchArgs;
