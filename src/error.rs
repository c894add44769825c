//! Error handling for FrameSaver-RS
//!
//! This module defines the crate-level error type and a Result alias. Module
//! errors (`WorkflowError`, `ParamError`, `ExtractionError`) convert into it.

use crate::config::params::ParamError;
use crate::extraction::ExtractionError;
use crate::workflow::WorkflowError;
use thiserror::Error;

/// Main error type for FrameSaver-RS operations
#[derive(Error, Debug)]
pub enum FrameSaverError {
    /// Errors related to loading or mutating a workflow graph
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Errors raised by the frame extraction pass
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Errors related to parameter registration
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FrameSaverError>,
    },
}

impl FrameSaverError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FrameSaverError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for FrameSaver-RS operations
pub type Result<T> = std::result::Result<T, FrameSaverError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, WorkflowError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| FrameSaverError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| FrameSaverError::from(e).with_context(f()))
    }
}
