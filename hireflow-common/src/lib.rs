//! # Hireflow Common Library
//!
//! Shared code for the hireflow services:
//! - Common error type
//! - Bootstrap configuration loading and module root resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
