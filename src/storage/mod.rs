//! Azure Blob Storage service-SAS issuance.
//!
//! Stored records keep permanent (unsigned) blob URLs. Reads hand out
//! short-lived read-only URLs; uploads get a create/write URL plus the
//! permanent URL the client should persist afterwards.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use crate::config::{StorageConfig, MAX_SAS_TTL_SECS};

type HmacSha256 = Hmac<Sha256>;

const SAS_VERSION: &str = "2021-08-06";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage connection string: missing {0}")]
    MissingCredential(&'static str),

    #[error("Storage container name is not configured")]
    MissingContainer,

    #[error("Invalid storage account key: {0}")]
    InvalidAccountKey(String),

    #[error("Invalid SAS lifetime {0}s (expected 1..={})", MAX_SAS_TTL_SECS)]
    InvalidTtl(i64),

    #[error("Failed to sign SAS token: {0}")]
    Signing(String),
}

/// Permission set for a service SAS, rendered in Azure's canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SasPermissions {
    Read,
    CreateWrite,
}

impl SasPermissions {
    pub fn as_str(&self) -> &'static str {
        match self {
            SasPermissions::Read => "r",
            SasPermissions::CreateWrite => "cw",
        }
    }
}

/// Result of an upload request: `sas_url` to PUT the blob to, `storage_url`
/// to store on the record once the upload succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSas {
    pub sas_url: String,
    pub storage_url: String,
}

#[derive(Debug, Clone)]
pub struct BlobSigner {
    account_name: String,
    account_key: String,
    blob_endpoint: String,
    container: String,
    read_ttl: Duration,
    upload_ttl: Duration,
}

impl BlobSigner {
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if config.container_name.trim().is_empty() {
            return Err(StorageError::MissingContainer);
        }
        let credentials = parse_connection_string(&config.connection_string)?;
        Ok(Self {
            account_name: credentials.account_name,
            account_key: credentials.account_key,
            blob_endpoint: credentials.blob_endpoint,
            container: config.container_name.clone(),
            read_ttl: sas_ttl(config.read_sas_ttl_secs)?,
            upload_ttl: sas_ttl(config.upload_sas_ttl_secs)?,
        })
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Permanent URL of `blob_name`, no query string.
    pub fn storage_url(&self, blob_name: &str) -> String {
        format!("{}/{}", self.container_base_url(), encode_blob_path(blob_name))
    }

    /// Read-only URL for a bare blob name. An empty name yields an empty string.
    pub fn read_sas_url(&self, blob_name: &str) -> Result<String, StorageError> {
        if blob_name.is_empty() {
            return Ok(String::new());
        }
        self.signed_url(blob_name, SasPermissions::Read, Utc::now() + self.read_ttl)
    }

    pub fn upload_sas(&self, file_name: &str) -> Result<UploadSas, StorageError> {
        let sas_url = self.signed_url(
            file_name,
            SasPermissions::CreateWrite,
            Utc::now() + self.upload_ttl,
        )?;
        Ok(UploadSas {
            sas_url,
            storage_url: self.storage_url(file_name),
        })
    }

    pub fn signed_url(
        &self,
        blob_name: &str,
        permissions: SasPermissions,
        expiry: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        let token = self.sas_token(blob_name, permissions, expiry)?;
        Ok(format!("{}?{}", self.storage_url(blob_name), token))
    }

    /// Query string (without leading `?`) for a blob service SAS.
    pub fn sas_token(
        &self,
        blob_name: &str,
        permissions: SasPermissions,
        expiry: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        let expiry = expiry.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let canonical_resource = format!(
            "/blob/{}/{}/{}",
            self.account_name, self.container, blob_name
        );

        // Field order for service SAS version 2020-12-06 and later
        let string_to_sign = [
            permissions.as_str(),
            "", // signed start
            &expiry,
            &canonical_resource,
            "", // signed identifier
            "", // signed IP
            "", // signed protocol
            SAS_VERSION,
            "b", // signed resource: blob
            "", // snapshot time
            "", // encryption scope
            "", // rscc
            "", // rscd
            "", // rsce
            "", // rscl
            "", // rsct
        ]
        .join("\n");

        let signature = self.sign(&string_to_sign)?;
        debug!(blob = blob_name, permissions = permissions.as_str(), "issued SAS token");

        Ok(format!(
            "se={}&sp={}&sv={}&sr=b&sig={}",
            urlencoding::encode(&expiry),
            permissions.as_str(),
            SAS_VERSION,
            urlencoding::encode(&signature)
        ))
    }

    fn sign(&self, string_to_sign: &str) -> Result<String, StorageError> {
        let key = BASE64
            .decode(self.account_key.as_bytes())
            .map_err(|e| StorageError::InvalidAccountKey(e.to_string()))?;
        let mut mac =
            HmacSha256::new_from_slice(&key).map_err(|e| StorageError::Signing(e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    fn container_base_url(&self) -> String {
        format!("{}/{}", self.blob_endpoint.trim_end_matches('/'), self.container)
    }

    /// Re-sign one stored reference. Any stale query string is stripped
    /// before the blob name is extracted. References outside this container
    /// are returned as stored.
    pub fn resign_reference(&self, stored: &str) -> Result<String, StorageError> {
        let stored = stored.trim();
        if stored.is_empty() {
            return Ok(String::new());
        }

        let without_query = stored.split('?').next().unwrap_or_default();
        match self.blob_name_from_reference(without_query) {
            Some(blob_name) => self.read_sas_url(&blob_name),
            None => Ok(stored.to_string()),
        }
    }

    /// Re-sign a comma-separated list of references, dropping empty entries.
    pub fn resign_reference_list(&self, stored: &str) -> Result<String, StorageError> {
        let mut signed = Vec::new();
        for entry in stored.split(',') {
            let url = self.resign_reference(entry)?;
            if !url.is_empty() {
                signed.push(url);
            }
        }
        Ok(signed.join(","))
    }

    fn blob_name_from_reference(&self, reference: &str) -> Option<String> {
        let prefix = format!("{}/", self.container_base_url());
        let raw = match reference.strip_prefix(&prefix) {
            Some(rest) => rest,
            None if !reference.contains("://") => reference.trim_start_matches('/'),
            None => return None,
        };
        if raw.is_empty() {
            return None;
        }
        let name = urlencoding::decode(raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        Some(name)
    }
}

struct Credentials {
    account_name: String,
    account_key: String,
    blob_endpoint: String,
}

/// Parse `AccountName=...;AccountKey=...;EndpointSuffix=...` (and the
/// optional `DefaultEndpointsProtocol` / `BlobEndpoint` overrides).
fn parse_connection_string(connection_string: &str) -> Result<Credentials, StorageError> {
    let mut account_name = None;
    let mut account_key = None;
    let mut protocol = "https";
    let mut suffix = DEFAULT_ENDPOINT_SUFFIX;
    let mut blob_endpoint = None;

    for part in connection_string.split(';') {
        // Values such as base64 keys may themselves contain '='
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim() {
            "AccountName" => account_name = Some(value.trim().to_string()),
            "AccountKey" => account_key = Some(value.trim().to_string()),
            "DefaultEndpointsProtocol" => protocol = value.trim(),
            "EndpointSuffix" => suffix = value.trim(),
            "BlobEndpoint" => blob_endpoint = Some(value.trim().to_string()),
            _ => {}
        }
    }

    let account_name = account_name
        .filter(|s| !s.is_empty())
        .ok_or(StorageError::MissingCredential("AccountName"))?;
    let account_key = account_key
        .filter(|s| !s.is_empty())
        .ok_or(StorageError::MissingCredential("AccountKey"))?;
    let blob_endpoint = blob_endpoint
        .unwrap_or_else(|| format!("{}://{}.blob.{}", protocol, account_name, suffix));

    Ok(Credentials {
        account_name,
        account_key,
        blob_endpoint,
    })
}

fn sas_ttl(secs: i64) -> Result<Duration, StorageError> {
    if !(1..=MAX_SAS_TTL_SECS).contains(&secs) {
        return Err(StorageError::InvalidTtl(secs));
    }
    Duration::try_seconds(secs).ok_or(StorageError::InvalidTtl(secs))
}

fn encode_blob_path(blob_name: &str) -> String {
    blob_name
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
