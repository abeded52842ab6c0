pub mod cli;
pub mod commands;
pub mod core;
pub mod human;
pub mod interactive;
pub mod resolver;
pub mod services;

pub use crate::core::{init_logging, App, CliMode, ConfigStore};
