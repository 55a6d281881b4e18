//! ## sparhund-telemetry::events
//! **Structured event records with a common actor envelope**
//!
//! Every observed action becomes one [`EventRecord`]: an envelope
//! (timestamp plus the identity of the simulating process) with the
//! category payload flattened alongside it. Payload keys never collide
//! with envelope keys; the executable payload describes the *child*
//! process while the `actor_*` fields always describe the simulator.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Failure to resolve the acting user/process identity.
///
/// Every event requires a complete envelope, so this is fatal to the
/// run that hits it.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("cannot resolve current executable path: {0}")]
    Executable(#[source] io::Error),
}

/// Identity of the process performing the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub process_id: u32,
    pub process_name: String,
}

impl Identity {
    /// Reads the identity from the host environment.
    pub fn current() -> Result<Self, IdentityError> {
        let exe = std::env::current_exe().map_err(IdentityError::Executable)?;
        Ok(Self {
            user: whoami::username(),
            process_id: std::process::id(),
            process_name: exe.to_string_lossy().into_owned(),
        })
    }
}

/// Event categories, one per action kind the simulator performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    File,
    Network,
    Executable,
}

impl EventCategory {
    /// Key under which this category's events appear in the persisted log.
    pub fn key(&self) -> &'static str {
        match self {
            EventCategory::File => "file_processes",
            EventCategory::Network => "network_processes",
            EventCategory::Executable => "executable_processes",
        }
    }
}

/// What was done to a file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileActivityKind {
    Create,
    Modify,
    Delete,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilePayload {
    /// Absolute path acted upon.
    pub filepath: PathBuf,
    pub activity_kind: FileActivityKind,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NetworkPayload {
    /// Remote endpoint contacted.
    pub source_host: String,
    pub source_port: u16,
    /// Local egress address and the scheme-default port (443/80), not
    /// the ephemeral source port of the connection.
    pub destination_host: String,
    pub destination_port: u16,
    pub request_protocol: String,
    /// Byte length of the response body.
    pub content_length: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExecutablePayload {
    /// Pid of the spawned child, not of the simulator.
    pub process_id: u32,
    pub process_name: String,
    /// Executable plus space-joined arguments.
    pub command: String,
}

/// Category-specific portion of an event record.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EventPayload {
    File(FilePayload),
    Network(NetworkPayload),
    Executable(ExecutablePayload),
}

impl EventPayload {
    pub fn category(&self) -> EventCategory {
        match self {
            EventPayload::File(_) => EventCategory::File,
            EventPayload::Network(_) => EventCategory::Network,
            EventPayload::Executable(_) => EventCategory::Executable,
        }
    }
}

/// One structured, timestamped description of a single observed action.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub actor_user: String,
    pub actor_process_id: u32,
    pub actor_process_name: String,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl EventRecord {
    /// Builds a record stamped with the invocation instant.
    pub fn new(payload: EventPayload) -> Result<Self, IdentityError> {
        Self::at(Utc::now(), payload)
    }

    /// Builds a record with an explicit timestamp. Network events use
    /// this to pin the record to the request start rather than the
    /// append instant.
    pub fn at(timestamp: DateTime<Utc>, payload: EventPayload) -> Result<Self, IdentityError> {
        let identity = Identity::current()?;
        Ok(Self {
            timestamp,
            actor_user: identity.user,
            actor_process_id: identity.process_id,
            actor_process_name: identity.process_name,
            payload,
        })
    }

    pub fn category(&self) -> EventCategory {
        self.payload.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_payload() -> EventPayload {
        EventPayload::File(FilePayload {
            filepath: PathBuf::from("/tmp/x.txt"),
            activity_kind: FileActivityKind::Create,
        })
    }

    #[test]
    fn identity_resolves_from_host() {
        let identity = Identity::current().unwrap();
        assert!(!identity.process_name.is_empty());
        assert!(identity.process_id > 0);
    }

    #[test]
    fn envelope_fields_are_complete() {
        let record = EventRecord::new(file_payload()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        for key in [
            "timestamp",
            "actor_user",
            "actor_process_id",
            "actor_process_name",
        ] {
            assert!(value.get(key).is_some(), "missing envelope key {key}");
        }
        // Payload keys are flattened next to the envelope.
        assert_eq!(value["filepath"], "/tmp/x.txt");
        assert_eq!(value["activity_kind"], "create");
    }

    #[test]
    fn executable_payload_keys_stay_disjoint_from_envelope() {
        let record = EventRecord::new(EventPayload::Executable(ExecutablePayload {
            process_id: 4242,
            process_name: "echo".into(),
            command: "echo hi".into(),
        }))
        .unwrap();
        let value = serde_json::to_value(&record).unwrap();
        // The child pid must not clobber the actor pid.
        assert_eq!(value["process_id"], 4242);
        assert_eq!(
            value["actor_process_id"],
            u64::from(std::process::id()),
        );
        assert_eq!(value["process_name"], "echo");
    }

    #[test]
    fn explicit_timestamp_is_preserved() {
        let start = Utc::now() - chrono::Duration::seconds(30);
        let record = EventRecord::at(start, file_payload()).unwrap();
        assert_eq!(record.timestamp, start);
    }

    #[test]
    fn category_follows_payload() {
        assert_eq!(
            EventRecord::new(file_payload()).unwrap().category(),
            EventCategory::File
        );
        assert_eq!(EventCategory::Network.key(), "network_processes");
    }
}
