//! # tgkit-core
//!
//! Core types, update decoding, configuration, and error handling for tgkit.

pub mod config;
pub mod error;
pub mod types;
pub mod update;
