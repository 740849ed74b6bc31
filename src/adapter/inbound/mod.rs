//! Driving adapters: the command line and quote file readers.

pub mod cli;
pub mod source;
