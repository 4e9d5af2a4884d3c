//! Line-delimited JSON-RPC host over stdio
//!
//! One request per input line. Each response is written before the events
//! the request produced. A line that is not valid UTF-8 or JSON gets an error
//! response and serving continues. End of input, or a client that stops
//! reading, counts as a clean session end; only a failing input stream skips
//! persisting the registry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

use crate::markers::HomeAliaser;
use crate::session::handlers;
use crate::session::{ChannelNotifier, ClientEvent, MarkerStore, MarkersModule, Notifier, ParamError};

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(#[from] ParamError),
}

impl RpcError {
    pub fn code(&self) -> i64 {
        match self {
            RpcError::Parse(_) => -32700,
            RpcError::InvalidRequest(_) => -32600,
            RpcError::MethodNotFound(_) => -32601,
            RpcError::InvalidParams(_) => -32602,
        }
    }
}

/// Routes one method call to its handler
pub fn dispatch<N: Notifier>(
    module: &mut MarkersModule<N>,
    method: &str,
    params: &Value,
) -> Result<Value, RpcError> {
    match method {
        "markers_tab_closed" => handlers::markers_tab_closed(module, params)?,
        "update_active_marker_set" => handlers::update_active_marker_set(module, params)?,
        "clear_active_marker_set" => handlers::clear_active_marker_set(module, params)?,
        "show_markers" => handlers::show_markers(module, params)?,
        "get_markers_state" => return Ok(module.state_as_json()),
        _ => return Err(RpcError::MethodNotFound(method.to_string())),
    }
    Ok(Value::Null)
}

/// Handles one raw request line and returns the response object
pub fn handle_line<N: Notifier>(module: &mut MarkersModule<N>, line: &str) -> Value {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!("Rejecting unparseable request: {}", e);
            return error_response(Value::Null, &RpcError::Parse(e.to_string()));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request = match Request::deserialize(&value) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting invalid request: {}", e);
            return error_response(id, &RpcError::InvalidRequest(e.to_string()));
        }
    };

    debug!("Handling '{}'", request.method);

    match dispatch(module, &request.method, &request.params) {
        Ok(result) => json!({ "id": request.id, "result": result }),
        Err(e) => {
            warn!("'{}' failed: {}", request.method, e);
            error_response(request.id, &e)
        }
    }
}

/// Like [`handle_line`], for a line read as raw bytes
pub fn handle_bytes<N: Notifier>(module: &mut MarkersModule<N>, line: &[u8]) -> Value {
    match std::str::from_utf8(line) {
        Ok(line) => handle_line(module, line),
        Err(e) => {
            warn!("Rejecting request that is not UTF-8: {}", e);
            error_response(Value::Null, &RpcError::Parse(e.to_string()))
        }
    }
}

fn error_response(id: Value, error: &RpcError) -> Value {
    json!({
        "id": id,
        "error": { "code": error.code(), "message": error.to_string() },
    })
}

async fn write_line<W, T>(output: &mut W, value: &T) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_string(value)?;
    line.push('\n');
    output.write_all(line.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

async fn respond<W: AsyncWrite + Unpin>(
    output: &mut W,
    response: &Value,
    events: &mut UnboundedReceiver<ClientEvent>,
) -> anyhow::Result<()> {
    write_line(output, response).await?;
    while let Ok(event) = events.try_recv() {
        write_line(output, &event).await?;
    }
    Ok(())
}

/// Serves requests from `input` until it ends, then shuts the module down
pub async fn serve<R, W>(
    mut module: MarkersModule<ChannelNotifier>,
    mut events: UnboundedReceiver<ClientEvent>,
    mut input: R,
    mut output: W,
) where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line: Vec<u8> = Vec::new();

    let terminated_normally = loop {
        line.clear();
        match input.read_until(b'\n', &mut line).await {
            Ok(0) => break true,
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read request: {}", e);
                break false;
            }
        }

        if line.trim_ascii().is_empty() {
            continue;
        }

        let response = handle_bytes(&mut module, line.trim_ascii());
        if let Err(e) = respond(&mut output, &response, &mut events).await {
            // The registry is consistent; the client just stopped listening
            warn!("Client stopped reading responses: {}", e);
            break true;
        }
    };

    module.shutdown(terminated_normally);
}

pub async fn run_server(scratch_dir: &Path) -> anyhow::Result<()> {
    info!("Starting session-markers server (scratch: {:?})", scratch_dir);

    let (notifier, events) = ChannelNotifier::channel();
    let module = MarkersModule::start(
        notifier,
        MarkerStore::in_scratch_dir(scratch_dir),
        Box::new(HomeAliaser::new()),
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(module, events, stdin, stdout).await;

    info!("session-markers server stopped");
    Ok(())
}
