//! Common test utilities.
//!
//! This module contains shared helpers for integration tests.
//! Import with `mod common;` in test files.

use bytes::Bytes;
use regprobe::client::{ControlPlane, DocumentSource, RegistrationHandle};
use regprobe::config::Config;
use regprobe::descriptor::{TypeDescriptor, TypeScope};
use regprobe::error::{CreationError, DeletionError, ProbeError};
use regprobe::version::ServerVersion;
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Create a minimal valid configuration file.
pub fn create_minimal_config() -> NamedTempFile {
    let config_content = r#"
[control_plane]
base_url = "http://127.0.0.1:8080"
"#;

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(config_content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Create a configuration with custom convergence settings.
pub fn create_config_with_convergence(
    interval_seconds: u64,
    timeout_seconds: u64,
    verify: bool,
) -> NamedTempFile {
    let config_content = format!(
        r#"
[control_plane]
base_url = "http://127.0.0.1:8080"

[convergence]
interval_seconds = {}
timeout_seconds = {}
verify = {}
"#,
        interval_seconds, timeout_seconds, verify
    );

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(config_content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Load a config from a temp file.
pub fn load_config(file: &NamedTempFile) -> Config {
    Config::from_file(file.path()).expect("Failed to load config")
}

/// A fixed descriptor for tests that do not need randomized names.
pub fn widget_descriptor() -> TypeDescriptor {
    TypeDescriptor {
        group: "example.com".to_string(),
        version: "v1".to_string(),
        kind: "Widget".to_string(),
        plural: "widgets".to_string(),
        scope: TypeScope::Cluster,
    }
}

/// A document blob in which the given descriptor is fully visible.
pub fn matching_document(descriptor: &TypeDescriptor) -> Bytes {
    Bytes::from(format!(
        r#"{{"paths":{{"{}":{{}}}},"definitions":{{"{}":{{}}}}}}"#,
        descriptor.route_token(),
        descriptor.definition_token()
    ))
}

/// A document blob in which nothing is visible yet.
pub fn stale_document() -> Bytes {
    Bytes::from_static(br#"{"paths":{},"definitions":{}}"#)
}

// ============================================================================
// Fake control plane
// ============================================================================

/// In-memory control plane that records calls and can be scripted to fail.
pub struct FakeControlPlane {
    register_calls: AtomicU32,
    deregister_calls: AtomicU32,
    fail_register: Option<String>,
    fail_deregister: Option<String>,
    version: ServerVersion,
}

impl FakeControlPlane {
    /// A control plane that accepts everything.
    pub fn new() -> Self {
        Self {
            register_calls: AtomicU32::new(0),
            deregister_calls: AtomicU32::new(0),
            fail_register: None,
            fail_deregister: None,
            version: ServerVersion::new(1, 13, 0),
        }
    }

    /// Make every registration call fail with the given message.
    pub fn failing_register(mut self, message: &str) -> Self {
        self.fail_register = Some(message.to_string());
        self
    }

    /// Make every deregistration call fail with the given message.
    pub fn failing_deregister(mut self, message: &str) -> Self {
        self.fail_deregister = Some(message.to_string());
        self
    }

    /// Report a specific server version.
    pub fn reporting_version(mut self, version: ServerVersion) -> Self {
        self.version = version;
        self
    }

    /// Number of registration calls observed.
    pub fn register_calls(&self) -> u32 {
        self.register_calls.load(Ordering::SeqCst)
    }

    /// Number of deregistration calls observed.
    pub fn deregister_calls(&self) -> u32 {
        self.deregister_calls.load(Ordering::SeqCst)
    }
}

impl ControlPlane for FakeControlPlane {
    fn register(&self, descriptor: &TypeDescriptor) -> Result<RegistrationHandle, CreationError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_register {
            Some(ref message) => Err(CreationError::new(message.clone())),
            None => Ok(RegistrationHandle::new(descriptor.registry_name())),
        }
    }

    fn deregister(&self, _handle: RegistrationHandle) -> Result<(), DeletionError> {
        self.deregister_calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_deregister {
            Some(ref message) => Err(DeletionError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn server_version(&self) -> Result<ServerVersion, ProbeError> {
        Ok(self.version)
    }
}

// ============================================================================
// Scripted document source
// ============================================================================

/// One scripted fetch response.
pub enum FetchScript {
    /// Return this blob.
    Document(Bytes),
    /// Fail the fetch with this message.
    Failure(String),
}

/// Document source that replays a script; the last entry repeats forever.
pub struct ScriptedDocuments {
    script: Vec<FetchScript>,
    cursor: Mutex<usize>,
    fetch_calls: AtomicU32,
}

impl ScriptedDocuments {
    /// Replay the given script, repeating the final entry once exhausted.
    pub fn new(script: Vec<FetchScript>) -> Self {
        assert!(!script.is_empty(), "script must have at least one entry");
        Self {
            script,
            cursor: Mutex::new(0),
            fetch_calls: AtomicU32::new(0),
        }
    }

    /// A source that always serves the same blob.
    pub fn always(document: Bytes) -> Self {
        Self::new(vec![FetchScript::Document(document)])
    }

    /// A source whose every fetch fails.
    pub fn always_failing(message: &str) -> Self {
        Self::new(vec![FetchScript::Failure(message.to_string())])
    }

    /// Number of fetches observed.
    pub fn fetch_calls(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl DocumentSource for ScriptedDocuments {
    fn fetch(&self) -> Result<Bytes, ProbeError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let mut cursor = self.cursor.lock().unwrap();
        let index = (*cursor).min(self.script.len() - 1);
        *cursor += 1;
        match &self.script[index] {
            FetchScript::Document(bytes) => Ok(bytes.clone()),
            FetchScript::Failure(message) => Err(ProbeError::new(message.clone())),
        }
    }
}
