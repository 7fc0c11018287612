// src/reconcile.rs

//! Verify the newest local event reached the server.
//!
//! 1. scan the local event log for the newest event
//! 2. scan the server access log, newest first, for requests of the configured
//!    session id and device sent at or after the local event; the device is
//!    the user agent of the local event unless one is configured
//! 3. there must be exactly one such request and its payload must equal the
//!    local payload

use crate::common::{Count, FPath, ResultScan};
use crate::config::Config;
use crate::data::record::{LocalRecord, ServerRecord};
use crate::printer::diag::{DiagLevel, DiagnosticSink};
use crate::readers::locallog::LocalLogLoader;
use crate::readers::serverlog::ServerLogLoader;

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Result of reconciling the local event log against the server access log.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReconcileOutcome {
    /// The local event log file does not exist.
    LocalNotFound,
    /// The local event log has no well-formed newest event.
    LocalEmpty,
    /// The server access log file does not exist.
    ServerNotFound,
    /// A log file exists but could not be read.
    ReadFailed(FPath),
    /// No server request matched the local event.
    NoMatch,
    /// More than one server request matched the local event.
    Ambiguous(Count),
    /// One server request matched but its payload differs.
    PayloadMismatch {
        local: String,
        server: String,
    },
    /// One server request matched with the same payload.
    Matched(ServerRecord),
}

impl ReconcileOutcome {
    #[inline(always)]
    pub const fn is_matched(&self) -> bool {
        matches!(*self, ReconcileOutcome::Matched(_))
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::LocalNotFound => write!(f, "local event log not found"),
            ReconcileOutcome::LocalEmpty => write!(f, "local event log has no well-formed event"),
            ReconcileOutcome::ServerNotFound => write!(f, "server access log not found"),
            ReconcileOutcome::ReadFailed(path) => write!(f, "failed to read {:?}", path),
            ReconcileOutcome::NoMatch => write!(f, "no server request matched the local event"),
            ReconcileOutcome::Ambiguous(count) => {
                write!(f, "{} server requests matched the local event; expected one", count)
            }
            ReconcileOutcome::PayloadMismatch { local, server } => {
                write!(f, "payload mismatch; local {:?}, server {:?}", local, server)
            }
            ReconcileOutcome::Matched(record) => {
                write!(f, "matched server request from {} at {}", record.address, match record.datetime {
                    Some(dt) => dt.to_rfc3339(),
                    None => String::new(),
                })
            }
        }
    }
}

/// The records read while reconciling, and the outcome.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReconcileReport {
    /// The newest local record, if read.
    pub local: Vec<LocalRecord>,
    /// Matching server records, newest first.
    pub server: Vec<ServerRecord>,
    pub outcome: Option<ReconcileOutcome>,
}

impl ReconcileReport {
    fn finish(
        mut self,
        outcome: ReconcileOutcome,
    ) -> ReconcileReport {
        defñ!("{:?}", outcome);
        self.outcome = Some(outcome);
        self
    }

    pub fn is_matched(&self) -> bool {
        matches!(&self.outcome, Some(outcome) if outcome.is_matched())
    }
}

/// Reconcile per `config`.
pub fn reconcile(
    config: &Config,
    diag: &dyn DiagnosticSink,
) -> ReconcileReport {
    defn!("({:?})", config);
    let mut report = ReconcileReport::default();

    let local_loader = LocalLogLoader::new(config.local_tz_offset);
    report.local = match local_loader.load(&config.local_input, diag) {
        ResultScan::Found(records) => records,
        ResultScan::FileNotFound => return report.finish(ReconcileOutcome::LocalNotFound),
        ResultScan::Err(_err) => {
            return report.finish(ReconcileOutcome::ReadFailed(config.local_input.clone()))
        }
    };
    let local: LocalRecord = match report.local.first() {
        Some(local) if !local.is_empty() => local.clone(),
        _ => return report.finish(ReconcileOutcome::LocalEmpty),
    };
    let send_time = match local.datetime {
        Some(dt) => dt,
        None => return report.finish(ReconcileOutcome::LocalEmpty),
    };
    diag.info(&format!("local event at {} from {:?}", send_time, local.user_agent));
    if diag.enabled(DiagLevel::Debug) {
        diag.debug(&format!("local payload {:?}", local.data));
    }

    // the configured device, else the device of the local event
    let device: Option<&str> = match config.server_device.as_deref() {
        Some(device) => Some(device),
        None if !local.user_agent.is_empty() => Some(local.user_agent.as_str()),
        None => None,
    };
    defo!("device {:?}", device);
    let server_loader = ServerLogLoader::new(
        &config.server_pid,
        device,
        &local.data,
        send_time,
    );
    report.server = match server_loader.load(&config.server_input, diag) {
        ResultScan::Found(records) => records,
        ResultScan::FileNotFound => return report.finish(ReconcileOutcome::ServerNotFound),
        ResultScan::Err(_err) => {
            return report.finish(ReconcileOutcome::ReadFailed(config.server_input.clone()))
        }
    };
    diag.info(&format!("{} server requests of session {:?}", report.server.len(), config.server_pid));

    let outcome = match report.server.as_slice() {
        [] => ReconcileOutcome::NoMatch,
        [server] => match server.payload() {
            Some(payload) if payload == local.data => ReconcileOutcome::Matched(server.clone()),
            payload => ReconcileOutcome::PayloadMismatch {
                local: local.data.clone(),
                server: payload.unwrap_or_default().to_string(),
            },
        },
        servers => ReconcileOutcome::Ambiguous(servers.len()),
    };
    defx!("{:?}", outcome);

    report.finish(outcome)
}
