//! sensectl library - exposes modules for integration tests

pub mod cli;
pub mod client;
pub mod commands;
pub mod output;
