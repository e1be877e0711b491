//! # romatag Common Library
//!
//! Shared code for the romatag workspace:
//! - Error and result types
//! - Configuration loading (TOML file, environment, compiled defaults)

pub mod config;
pub mod error;

pub use error::{Error, Result};
