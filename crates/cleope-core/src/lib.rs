//! CLEOPE Core - Domain models, selections, and configuration
//!
//! This crate contains the domain types shared by the catalogue client and the
//! pseudopath resolver, the error taxonomy, and the layered configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod selections;

pub use config::{LayeredConfig, Settings};
pub use error::{CleopeError, Result};
