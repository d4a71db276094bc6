//! Record types for the Projects domain

pub mod coordinates;
pub mod entities;
