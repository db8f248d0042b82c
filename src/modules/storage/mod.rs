//! Storage module for private document access
//!
//! Provides an S3-compatible client that issues time-limited signed URLs.

mod object_storage;

pub use object_storage::{ObjectStorageClient, SignedUrlIssuer};

#[cfg(test)]
pub use object_storage::object_key;
