//! # dropvault-core
//!
//! Core crate for DropVault. Contains the collaborator traits (blob
//! storage, caller identity), configuration schemas, typed identifiers,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other DropVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
