//! SupportSense daemon library - exposes modules for testing.

pub mod config;
pub mod db;
pub mod routes;
pub mod seed;
pub mod server;
