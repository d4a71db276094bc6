//! Shared utilities, configuration, and error handling for Siteplan
//!
//! This crate provides common functionality used across the Siteplan workspace:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Database pool bootstrap and repository error classification
//! - Pagination for list queries

pub mod config;
pub mod db;
pub mod error;
pub mod pagination;

pub use config::{Config, LogFormat};
pub use db::{connect, RepositoryError};
pub use error::{Error, Result};
pub use pagination::Pagination;
