//! # Beecal Library
//!
//! This library exposes the beecal application modules for testing and integration.
//!
//! The binary drives these modules through the `main.rs` entry point.

pub mod cli;
pub mod config;
pub mod error;
pub mod source;

// Re-export beecal_core for convenience
pub use beecal_core;
