//! # dropvault-auth
//!
//! Caller identity for DropVault. Sessions are issued by an external
//! identity provider; this crate only verifies their HS256 tokens and
//! exposes the subject as a [`dropvault_core::types::UserId`].

pub mod jwt;

pub use jwt::{JwtDecoder, SessionClaims};
