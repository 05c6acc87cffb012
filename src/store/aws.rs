//! AWS Secrets Manager adapter.
//!
//! # Overview
//!
//! Thin blocking facade over the async AWS SDK. The adapter owns a tokio
//! runtime; every trait method enters it with `block_on`, so callers (the
//! session's worker threads) never see async types. Credentials and region
//! come from the ambient AWS environment.
//!
//! Listing applies the store-side contract: pagination to exhaustion,
//! exclusion of reserved configuration entries and of records without a
//! creation timestamp, and ranking oldest-accessed first with
//! never-accessed entries last.

use std::cmp::Ordering;

use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::primitives::DateTime as SmithyDateTime;
use aws_sdk_secretsmanager::Client;
use chrono::{DateTime, Utc};
use tokio::runtime::Runtime;

use super::{SecretRecord, SecretStore, SecretVersion, StoreError, CONFIG_SUFFIX};

/// Page size for listing calls.
const PAGE_SIZE: i32 = 100;

/// Blocking AWS Secrets Manager client.
pub struct AwsSecretStore {
    runtime: Runtime,
    client: Client,
}

impl AwsSecretStore {
    /// Connect using ambient credential resolution.
    ///
    /// Fails when the tokio runtime cannot start or no region is
    /// configured; credential problems surface later as API errors on the
    /// first call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Init`] on initialization failure.
    pub fn connect() -> Result<Self, StoreError> {
        let runtime = Runtime::new().map_err(|e| StoreError::Init(e.to_string()))?;

        let config = runtime.block_on(aws_config::load_defaults(BehaviorVersion::latest()));
        if config.region().is_none() {
            return Err(StoreError::Init(
                "no AWS region configured (set AWS_REGION or a profile region)".to_string(),
            ));
        }

        log::info!(
            "Connected to AWS Secrets Manager in region {:?}",
            config.region()
        );

        let client = Client::new(&config);
        Ok(Self { runtime, client })
    }
}

impl SecretStore for AwsSecretStore {
    fn list_secrets(&self) -> Result<Vec<SecretRecord>, StoreError> {
        self.runtime.block_on(async {
            let mut records = Vec::new();
            let mut next_token: Option<String> = None;

            loop {
                let mut request = self.client.list_secrets().max_results(PAGE_SIZE);
                if let Some(token) = next_token.take() {
                    request = request.next_token(token);
                }

                let output = request
                    .send()
                    .await
                    .map_err(|e| api_error("ListSecrets", &e))?;

                for entry in output.secret_list() {
                    let Some(name) = entry.name() else { continue };

                    if name.ends_with(CONFIG_SUFFIX) {
                        log::debug!("Skipping reserved configuration entry: {}", name);
                        continue;
                    }

                    let Some(created) = entry.created_date().and_then(to_utc) else {
                        log::debug!("Skipping secret without creation date: {}", name);
                        continue;
                    };

                    records.push(SecretRecord {
                        name: name.to_string(),
                        created,
                        last_accessed: entry.last_accessed_date().and_then(to_utc),
                        description: entry.description().map(str::to_string),
                    });
                }

                next_token = output.next_token().map(str::to_string);
                if next_token.is_none() {
                    break;
                }
            }

            rank_by_recency(&mut records);
            log::info!("Listed {} secrets", records.len());
            Ok(records)
        })
    }

    fn list_versions(&self, name: &str) -> Result<Vec<SecretVersion>, StoreError> {
        self.runtime.block_on(async {
            let mut versions = Vec::new();
            let mut next_token: Option<String> = None;

            loop {
                let mut request = self
                    .client
                    .list_secret_version_ids()
                    .secret_id(name)
                    .include_deprecated(true)
                    .max_results(PAGE_SIZE);
                if let Some(token) = next_token.take() {
                    request = request.next_token(token);
                }

                let output = request
                    .send()
                    .await
                    .map_err(|e| api_error("ListSecretVersionIds", &e))?;

                for entry in output.versions() {
                    let Some(version_id) = entry.version_id() else {
                        continue;
                    };

                    versions.push(SecretVersion {
                        version_id: version_id.to_string(),
                        created: entry.created_date().and_then(to_utc),
                        last_accessed: entry.last_accessed_date().and_then(to_utc),
                        stages: entry.version_stages().to_vec(),
                    });
                }

                next_token = output.next_token().map(str::to_string);
                if next_token.is_none() {
                    break;
                }
            }

            log::debug!("Listed {} versions for {}", versions.len(), name);
            Ok(versions)
        })
    }

    fn get_value(&self, name: &str, version_id: &str) -> Result<String, StoreError> {
        self.runtime.block_on(async {
            let output = self
                .client
                .get_secret_value()
                .secret_id(name)
                .version_id(version_id)
                .send()
                .await
                .map_err(|e| api_error("GetSecretValue", &e))?;

            // Binary payloads are not rendered in the terminal.
            let value = output
                .secret_string()
                .map(str::to_string)
                .unwrap_or_else(|| "(binary payload)".to_string());

            Ok(value)
        })
    }

    fn delete_secret(&self, name: &str) -> Result<(), StoreError> {
        self.runtime.block_on(async {
            self.client
                .delete_secret()
                .secret_id(name)
                .force_delete_without_recovery(true)
                .send()
                .await
                .map_err(|e| api_error("DeleteSecret", &e))?;

            log::info!("Deleted secret: {}", name);
            Ok(())
        })
    }
}

/// Wrap an SDK error with the failing operation name.
fn api_error<E: std::error::Error>(operation: &'static str, err: &E) -> StoreError {
    StoreError::Api {
        operation,
        message: format!("{}", DisplayErrorContext(err)),
    }
}

/// Convert a smithy timestamp to chrono UTC.
fn to_utc(dt: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}

/// Rank records oldest-accessed first; never-accessed entries sort last,
/// among themselves by creation date.
pub(crate) fn rank_by_recency(records: &mut [SecretRecord]) {
    records.sort_by(|a, b| match (a.last_accessed, b.last_accessed) {
        (None, None) => a.created.cmp(&b.created),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.cmp(&y),
    });
}
