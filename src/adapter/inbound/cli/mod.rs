//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod opportunities;
pub mod output;
pub mod progress;
pub mod run;
