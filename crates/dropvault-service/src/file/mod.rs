//! File uploads and the policy applied to them.

pub mod policy;
pub mod upload;

pub use policy::UploadPolicy;
pub use upload::{RegisterUploadParams, SimpleUploadParams, UploadService, UploadedObject};
