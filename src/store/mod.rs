//! Secret store abstraction.
//!
//! # Overview
//!
//! The rest of the application talks to the cloud secret store through the
//! [`SecretStore`] trait. All methods are blocking and are only ever called
//! from detached worker threads; the concrete AWS adapter lives in
//! [`aws`] and bridges to the async SDK internally.
//!
//! The store is responsible for pre-filtering its listing: reserved
//! configuration entries (names ending in [`CONFIG_SUFFIX`]) and records
//! without a creation timestamp never reach the analyzer.

pub mod aws;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use aws::AwsSecretStore;

/// Reserved name suffix marking tool-owned configuration entries.
///
/// Secrets carrying this suffix are metadata, not candidates for cleanup,
/// and are excluded from every listing.
pub const CONFIG_SUFFIX: &str = "#config";

/// Metadata for one stored secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    /// Unique secret name.
    pub name: String,
    /// Creation timestamp. Always present; records without one are
    /// dropped by the store.
    pub created: DateTime<Utc>,
    /// Last access timestamp, absent for secrets never read.
    pub last_accessed: Option<DateTime<Utc>>,
    /// Optional human-entered description.
    pub description: Option<String>,
}

/// Metadata for one version of a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretVersion {
    /// Version identifier, unique within the secret.
    pub version_id: String,
    /// Version creation timestamp, if the service reported one.
    pub created: Option<DateTime<Utc>>,
    /// Last access timestamp for this version.
    pub last_accessed: Option<DateTime<Utc>>,
    /// Staging labels attached to this version (e.g. AWSCURRENT).
    pub stages: Vec<String>,
}

/// Error type for secret store operations.
///
/// Callers treat these as opaque: the session layer renders the message
/// and never branches on the variant.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The client could not be initialized (credentials, region, runtime).
    #[error("failed to initialize secret store client: {0}")]
    Init(String),

    /// A service call failed (transport, auth, throttling, not-found).
    #[error("{operation} failed: {message}")]
    Api {
        /// The service operation that failed.
        operation: &'static str,
        /// Rendered error chain from the SDK.
        message: String,
    },
}

/// Blocking interface to the secret store.
///
/// Implementations must be shareable across worker threads.
pub trait SecretStore: Send + Sync {
    /// List all secrets, paginated to exhaustion.
    ///
    /// The returned records are pre-filtered (no reserved configuration
    /// entries, no records without a creation timestamp) and ranked
    /// oldest-accessed first with never-accessed entries last.
    fn list_secrets(&self) -> Result<Vec<SecretRecord>, StoreError>;

    /// List all versions of one secret, paginated to exhaustion.
    fn list_versions(&self, name: &str) -> Result<Vec<SecretVersion>, StoreError>;

    /// Fetch the value of one secret version.
    fn get_value(&self, name: &str, version_id: &str) -> Result<String, StoreError>;

    /// Permanently delete one secret.
    fn delete_secret(&self, name: &str) -> Result<(), StoreError>;
}
