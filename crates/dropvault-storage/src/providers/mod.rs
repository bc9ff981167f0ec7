//! Blob store implementations.

#[cfg(feature = "imagekit")]
pub mod imagekit;
#[cfg(feature = "local")]
pub mod local;

#[cfg(feature = "imagekit")]
pub use imagekit::ImageKitBlobStore;
#[cfg(feature = "local")]
pub use local::LocalBlobStore;
