//! Network action unit: one outbound GET, logged and persisted.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use sparhund_telemetry::{EventPayload, EventRecord, NetworkPayload};

use crate::error::SimulationError;
use crate::SimulationRun;

impl SimulationRun {
    /// Fetches the configured endpoint, logs one network event, and
    /// stores the response body in a fresh scratch file.
    ///
    /// The event timestamp is the request-start instant. The
    /// `destination_port` is the scheme default (443 for https, 80
    /// otherwise), not the ephemeral source port of the connection.
    /// Transport and DNS failures propagate and abort the run.
    pub fn fetch_data(&mut self) -> Result<PathBuf, SimulationError> {
        let started_at = Utc::now();
        let response = reqwest::blocking::get(self.config().network.endpoint.as_str())?;
        let url = response.url().clone();
        let body = response.bytes()?;

        let local_ip = local_ip_address::local_ip()?;
        let record = EventRecord::at(
            started_at,
            EventPayload::Network(network_payload(
                &url,
                local_ip.to_string(),
                body.len() as u64,
            )),
        )?;
        self.store_mut().append(record);
        debug!(url = %url, bytes = body.len(), "endpoint fetched");

        let path = self.create_file(None, None)?;
        fs::write(&path, &body)?;
        Ok(path)
    }
}

/// Builds the network payload for a completed fetch: remote endpoint
/// as `source_*`, local egress point as `destination_*` with the
/// scheme-default port.
fn network_payload(
    url: &reqwest::Url,
    destination_host: String,
    content_length: u64,
) -> NetworkPayload {
    let request_protocol = url.scheme().to_string();
    let destination_port = scheme_default_port(&request_protocol);
    NetworkPayload {
        source_host: url.host_str().unwrap_or_default().to_string(),
        source_port: url.port_or_known_default().unwrap_or(destination_port),
        destination_host,
        destination_port,
        request_protocol,
        content_length,
    }
}

fn scheme_default_port(scheme: &str) -> u16 {
    if scheme == "https" {
        443
    } else {
        80
    }
}
