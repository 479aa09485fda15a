pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod common;
pub mod configuration;
pub mod core;
pub mod logger;
pub mod session;
