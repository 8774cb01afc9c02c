//! Error types for CLEOPE

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleopeError {
    // Input errors
    #[error("Unknown mission: {name}")]
    UnknownMission { name: String },

    #[error("Unknown product type {product_type} for mission {mission}")]
    UnknownProductType {
        mission: String,
        product_type: String,
    },

    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Invalid sensing range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid sampling frequency '{value}'. Use D, W or M, optionally prefixed by an integer (e.g. \"2 W\")")]
    InvalidFrequency { value: String },

    #[error("Invalid footprint: {reason}")]
    InvalidFootprint { reason: String },

    #[error("Unsupported product {product}: {reason}")]
    UnsupportedProduct { product: String, reason: String },

    #[error("Invalid file pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("No {what} selection recorded in {path}")]
    MissingSelection { what: String, path: PathBuf },

    // Remote errors
    #[error("Catalogue request failed: {reason}")]
    Catalogue { reason: String },

    #[error("Malformed catalogue response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Product not found in catalogue: {name}")]
    ProductNotFound { name: String },

    // Missing data errors
    #[error("No {variable} data found between {earliest} and {latest}")]
    NoDataFound {
        variable: String,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("No file matching {pattern} inside {product}")]
    MissingFile { product: PathBuf, pattern: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CleopeError {
    fn from(err: serde_json::Error) -> Self {
        CleopeError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for CleopeError {
    fn from(err: csv::Error) -> Self {
        CleopeError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CleopeError>;
