//! JWT session token verification.

pub mod claims;
pub mod decoder;

pub use claims::SessionClaims;
pub use decoder::JwtDecoder;
