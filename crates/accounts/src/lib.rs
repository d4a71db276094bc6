//! User-account read model for Siteplan
//!
//! Accounts are owned by an external authentication subsystem. This crate
//! only reads the `users` table so that project ownership and admin search
//! can refer to accounts by id and username.

mod backend;
mod error;
mod types;

pub use backend::AccountBackend;
pub use error::AccountError;
pub use types::UserAccount;
