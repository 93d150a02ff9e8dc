//! Object storage client for uploaded images.
//!
//! Wraps the S3 SDK behind a small interface: put, delete, and public URL
//! construction. Works against AWS as well as S3-compatible servers
//! (MinIO et al.) via the optional endpoint override.

pub mod client;
pub mod config;

pub use client::{StorageClient, StorageError};
pub use config::StorageConfig;
