//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use courier_domain::{BodyType, FormDataEntry, FormDataKind, HttpMethod, KeyValueRow, StoreKind};
use courier_infrastructure::STORAGE_DIR_ENV;

/// Persisted API workbench: edit request forms, SSE and WebSocket sessions.
#[derive(Debug, Parser)]
#[command(name = "courier", version, about)]
pub struct Cli {
    /// Directory holding the store records
    #[arg(long, global = true, env = STORAGE_DIR_ENV)]
    pub storage_dir: Option<PathBuf>,

    /// Timeout for dispatched requests, in milliseconds
    #[arg(long, global = true, default_value_t = 30_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the current snapshot of a store
    Show {
        /// get, post, put, delete, sse or websocket
        store: StoreKind,
    },
    /// List every store with its persistence key
    Keys,
    /// Forget the saved record of a store
    Reset {
        /// Store to reset
        store: StoreKind,
    },
    /// Edit or send one of the HTTP request forms
    Http {
        /// GET, POST, PUT or DELETE
        method: HttpMethod,
        #[command(subcommand)]
        action: HttpAction,
    },
    /// Edit the SSE subscription
    Sse {
        #[command(subcommand)]
        action: SseAction,
    },
    /// Edit the WebSocket session
    Ws {
        #[command(subcommand)]
        action: WsAction,
    },
}

/// Request form actions.
#[derive(Debug, Subcommand)]
pub enum HttpAction {
    /// Replace the URL
    SetUrl {
        /// New URL, stored verbatim
        url: String,
    },
    /// Replace all query parameters (`key=value`, `!key=value` disables)
    SetParams {
        #[arg(value_parser = parse_row)]
        rows: Vec<KeyValueRow>,
    },
    /// Replace all headers (`key=value`, `!key=value` disables)
    SetHeaders {
        #[arg(value_parser = parse_row)]
        rows: Vec<KeyValueRow>,
    },
    /// Switch the body between json and form-data (POST, PUT)
    BodyType {
        /// json or form-data
        body_type: BodyType,
    },
    /// Replace the raw body text (POST, PUT)
    BodyRaw {
        /// Body text
        text: String,
    },
    /// Replace the form-data fields (`key=value`, `key=@` for a file field)
    BodyForm {
        #[arg(value_parser = parse_form_entry)]
        entries: Vec<FormDataEntry>,
    },
    /// Dispatch the form
    Send {
        /// Load a file into a file field for this dispatch (`key=path`)
        #[arg(long = "attach", value_parser = parse_attachment)]
        attachments: Vec<(String, PathBuf)>,
    },
}

/// SSE subscription actions.
#[derive(Debug, Subcommand)]
pub enum SseAction {
    /// Replace the endpoint URL
    SetUrl {
        /// New URL
        url: String,
    },
    /// Listen for another named event
    AddEvent {
        /// Event name
        name: String,
    },
    /// Stop listening for a named event
    RemoveEvent {
        /// Event name
        name: String,
    },
}

/// WebSocket session actions.
#[derive(Debug, Subcommand)]
pub enum WsAction {
    /// Replace the endpoint URL
    SetUrl {
        /// New URL
        url: String,
    },
    /// Record a message in the history
    Record {
        /// Message text
        message: String,
    },
}

/// Parses `key=value` into a row; a leading `!` disables it.
pub fn parse_row(input: &str) -> Result<KeyValueRow, String> {
    let (enabled, assignment) = match input.strip_prefix('!') {
        Some(rest) => (false, rest),
        None => (true, input),
    };
    let (key, value) = assignment.split_once('=').unwrap_or((assignment, ""));
    if key.is_empty() {
        return Err(format!("missing key in {input:?}"));
    }

    Ok(KeyValueRow {
        key: key.to_string(),
        value: value.to_string(),
        enabled,
    })
}

/// Parses a form field; `key=@` marks a file field.
pub fn parse_form_entry(input: &str) -> Result<FormDataEntry, String> {
    let row = parse_row(input)?;
    let mut entry = if row.value == "@" {
        FormDataEntry {
            key: row.key,
            kind: FormDataKind::File,
            ..FormDataEntry::default()
        }
    } else {
        FormDataEntry::text(row.key, row.value)
    };
    entry.enabled = row.enabled;
    Ok(entry)
}

/// Parses `key=path` for `--attach`.
pub fn parse_attachment(input: &str) -> Result<(String, PathBuf), String> {
    match input.split_once('=') {
        Some((key, path)) if !key.is_empty() && !path.is_empty() => {
            Ok((key.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected key=path, got {input:?}")),
    }
}
