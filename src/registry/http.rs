//! HTTP implementations of the control plane and discovery interfaces.
//!
//! Registry operations go through a small JSON API:
//! - `POST   {base}/registry/typedefinitions` submits a descriptor
//! - `DELETE {base}/registry/typedefinitions/{name}` removes one
//! - `GET    {base}/version` reports the server version
//!
//! The discovery document is fetched from its well-known path as an opaque
//! blob; no structure is assumed beyond "bytes".

use crate::core::config::Config;
use crate::core::error::{CreationError, DeletionError, ProbeError};
use crate::registry::client::{ControlPlane, DocumentSource, RegistrationHandle};
use crate::registry::descriptor::TypeDescriptor;
use crate::registry::version::ServerVersion;
use anyhow::{Context, Result};
use bytes::Bytes;
use serde::Deserialize;
use std::time::Duration;

/// Version report returned by `GET /version`.
#[derive(Debug, Deserialize)]
struct VersionReport {
    version: String,
}

/// HTTP client for the control plane's type registry.
pub struct HttpControlPlane {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpControlPlane {
    /// Build a client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(
                config.control_plane.request_timeout_seconds,
            ))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.control_plane.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn registry_url(&self) -> String {
        format!("{}/registry/typedefinitions", self.base_url)
    }
}

impl ControlPlane for HttpControlPlane {
    fn register(&self, descriptor: &TypeDescriptor) -> Result<RegistrationHandle, CreationError> {
        let response = self
            .http
            .post(self.registry_url())
            .json(descriptor)
            .send()
            .map_err(|e| CreationError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CreationError::with_status(
                format!("registry rejected {}: {}", descriptor.registry_name(), body),
                status.as_u16(),
            ));
        }

        Ok(RegistrationHandle::new(descriptor.registry_name()))
    }

    fn deregister(&self, handle: RegistrationHandle) -> Result<(), DeletionError> {
        let url = format!("{}/{}", self.registry_url(), handle.name());
        let response = self
            .http
            .delete(&url)
            .send()
            .map_err(|e| DeletionError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DeletionError::with_status(
                format!("registry refused to delete {}: {}", handle.name(), body),
                status.as_u16(),
            ));
        }

        Ok(())
    }

    fn server_version(&self) -> Result<ServerVersion, ProbeError> {
        let url = format!("{}/version", self.base_url);
        let report: VersionReport = self
            .http
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProbeError::new(e.to_string()))?
            .json()
            .map_err(|e| ProbeError::new(e.to_string()))?;

        ServerVersion::parse(&report.version)
            .map_err(|e| ProbeError::new(format!("unparseable server version: {}", e)))
    }
}

/// HTTP fetcher for the generated API document.
pub struct HttpDocumentSource {
    http: reqwest::blocking::Client,
    url: String,
}

impl HttpDocumentSource {
    /// Build a fetcher from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(
                config.control_plane.request_timeout_seconds,
            ))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            url: format!(
                "{}{}",
                config.control_plane.base_url.trim_end_matches('/'),
                config.discovery.document_path
            ),
        })
    }
}

impl DocumentSource for HttpDocumentSource {
    fn fetch(&self) -> Result<Bytes, ProbeError> {
        self.http
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProbeError::new(e.to_string()))?
            .bytes()
            .map_err(|e| ProbeError::new(e.to_string()))
    }
}
