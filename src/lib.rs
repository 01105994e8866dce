// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod analytics;
pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod csv;
pub mod file;
pub mod patch;
pub mod progress;
pub mod rank;
pub mod render;
pub mod runner;

pub use error::{Error, Result};
