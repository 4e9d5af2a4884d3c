//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::Value;
use session_markers::markers::{IdentityAliaser, Marker, MarkerKind, MarkerSet};
use session_markers::session::{ChannelNotifier, ClientEvent, MarkerStore, MarkersModule};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// Starts a module against `scratch`, restoring anything persisted there
pub fn start_module(
    scratch: &TempDir,
) -> (MarkersModule<ChannelNotifier>, UnboundedReceiver<ClientEvent>) {
    let (notifier, events) = ChannelNotifier::channel();
    let module = MarkersModule::start(
        notifier,
        MarkerStore::in_scratch_dir(scratch.path()),
        Box::new(IdentityAliaser),
    );
    (module, events)
}

pub fn marker(path: &str, line: i32, message: &str) -> Marker {
    Marker::new(MarkerKind::Error, path, line, 1, message, true)
}

pub fn marker_set(name: &str, base_path: Option<&str>, markers: Vec<Marker>) -> MarkerSet {
    MarkerSet::new(name, base_path.map(PathBuf::from), markers)
}

/// Drains every queued event
pub fn drain_events(events: &mut UnboundedReceiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

/// Runs the stdio host over `requests` and returns every output line as JSON
pub async fn serve_lines(scratch: &TempDir, requests: &[Value]) -> Vec<Value> {
    let input: String = requests
        .iter()
        .map(|request| format!("{}\n", request))
        .collect();
    serve_raw(scratch, input.as_bytes()).await
}

/// Runs the stdio host over raw input bytes and returns every output line as JSON
pub async fn serve_raw(scratch: &TempDir, input: &[u8]) -> Vec<Value> {
    let (module, events) = start_module(scratch);
    let mut output: Vec<u8> = Vec::new();

    session_markers::server::serve(module, events, input, &mut output).await;

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
