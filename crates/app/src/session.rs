//! Runs parsed commands against the workbench.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use courier_application::{
    ApplicationError, Backing, DispatchRequest, HttpClientError, HttpFormStore, PersistError,
    SharedStorage, StorageError, Workbench,
};
use courier_domain::{
    DispatchResponse, FileAttachment, FormDataKind, FormDataValue, HttpMethod, RequestBody,
    StoreKind,
};
use courier_infrastructure::{ReqwestHttpClient, SerializationError, to_json_stable};
use tracing::debug;

use crate::cli::{Command, HttpAction, SseAction, WsAction};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A body action was given to a form without a body.
    #[error("the {0} form has no body")]
    NoBody(HttpMethod),

    /// `--attach` named a field that is not an enabled file field.
    #[error("no enabled file field named {0:?}")]
    NoFileField(String),

    /// An attachment could not be read.
    #[error("failed to read {path}: {source}")]
    Attachment {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A store record could not be saved.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Dispatch failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] HttpClientError),

    /// A snapshot could not be rendered.
    #[error(transparent)]
    Render(#[from] SerializationError),
}

/// Workbench opened over one storage, plus the settings commands need.
pub struct Session {
    workbench: Workbench,
    storage: SharedStorage,
    request_timeout: Duration,
}

impl Session {
    /// Opens every store from `storage`.
    pub fn open(storage: SharedStorage, request_timeout: Duration) -> Self {
        let workbench = Workbench::open(&Backing::Storage(Arc::clone(&storage)));
        Self {
            workbench,
            storage,
            request_timeout,
        }
    }

    /// Runs one command and returns what should be printed.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be saved, the command does not
    /// apply to the chosen form, or a dispatch fails.
    pub async fn run(&mut self, command: Command) -> Result<String, CommandError> {
        match command {
            Command::Show { store } => self.show(store),
            Command::Keys => self.keys(),
            Command::Reset { store } => {
                self.storage.remove(store.persistence_key())?;
                Ok(format!("{store} reset\n"))
            }
            Command::Http { method, action } => self.http(method, action).await,
            Command::Sse { action } => self.sse(action),
            Command::Ws { action } => self.ws(action),
        }
    }

    fn show(&self, store: StoreKind) -> Result<String, CommandError> {
        let snapshot = self
            .workbench
            .snapshot(store)
            .map_err(SerializationError::Serialize)?;
        Ok(to_json_stable(&snapshot)?)
    }

    fn keys(&self) -> Result<String, CommandError> {
        let mut out = String::new();
        for store in StoreKind::all() {
            let saved = if self.storage.contains(store.persistence_key())? {
                "saved"
            } else {
                "default"
            };
            let _ = writeln!(
                out,
                "{:<10} {:<18} {saved}",
                store.name(),
                store.persistence_key()
            );
        }
        Ok(out)
    }

    async fn http(
        &mut self,
        method: HttpMethod,
        action: HttpAction,
    ) -> Result<String, CommandError> {
        match action {
            HttpAction::SetUrl { url } => match method {
                HttpMethod::Get => self.workbench.get_form_mut().set_url(url)?,
                HttpMethod::Delete => self.workbench.delete_form_mut().set_url(url)?,
                HttpMethod::Post | HttpMethod::Put => self.body_form(method)?.set_url(url)?,
            },
            HttpAction::SetParams { rows } => match method {
                HttpMethod::Get => self.workbench.get_form_mut().set_params(rows)?,
                HttpMethod::Delete => self.workbench.delete_form_mut().set_params(rows)?,
                HttpMethod::Post | HttpMethod::Put => self.body_form(method)?.set_params(rows)?,
            },
            HttpAction::SetHeaders { rows } => match method {
                HttpMethod::Get => self.workbench.get_form_mut().set_headers(rows)?,
                HttpMethod::Delete => self.workbench.delete_form_mut().set_headers(rows)?,
                HttpMethod::Post | HttpMethod::Put => self.body_form(method)?.set_headers(rows)?,
            },
            HttpAction::BodyType { body_type } => {
                self.body_form(method)?.set_body_type(body_type)?;
            }
            HttpAction::BodyRaw { text } => self.body_form(method)?.set_body_raw(text)?,
            HttpAction::BodyForm { entries } => {
                self.body_form(method)?.set_body_form_data(entries)?;
            }
            HttpAction::Send { attachments } => {
                for (key, path) in attachments {
                    let attachment = read_attachment(&path).await?;
                    attach(self.body_form(method)?, &key, attachment)?;
                }
                return self.send(method).await;
            }
        }

        self.show(StoreKind::for_method(method))
    }

    async fn send(&self, method: HttpMethod) -> Result<String, CommandError> {
        let client = ReqwestHttpClient::with_timeout(self.request_timeout)?;
        let response = DispatchRequest::new(Arc::new(client))
            .execute(&self.workbench, method)
            .await?;
        Ok(render_response(&response))
    }

    fn sse(&mut self, action: SseAction) -> Result<String, CommandError> {
        let store = self.workbench.sse_mut();
        match action {
            SseAction::SetUrl { url } => store.set_url(url)?,
            SseAction::AddEvent { name } => {
                if !store.add_custom_event(&name)? {
                    debug!(%name, "event already present");
                }
            }
            SseAction::RemoveEvent { name } => {
                if !store.remove_custom_event(&name)? {
                    debug!(%name, "event not present");
                }
            }
        }
        self.show(StoreKind::Sse)
    }

    fn ws(&mut self, action: WsAction) -> Result<String, CommandError> {
        let store = self.workbench.websocket_mut();
        match action {
            WsAction::SetUrl { url } => store.set_url(url)?,
            WsAction::Record { message } => {
                if !store.add_message_to_history(&message)? {
                    debug!(%message, "message already in history");
                }
            }
        }
        self.show(StoreKind::WebSocket)
    }

    fn body_form(
        &mut self,
        method: HttpMethod,
    ) -> Result<&mut HttpFormStore<RequestBody>, CommandError> {
        match method {
            HttpMethod::Post => Ok(self.workbench.post_form_mut()),
            HttpMethod::Put => Ok(self.workbench.put_form_mut()),
            HttpMethod::Get | HttpMethod::Delete => Err(CommandError::NoBody(method)),
        }
    }
}

async fn read_attachment(path: &Path) -> Result<FileAttachment, CommandError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| CommandError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(FileAttachment::new(file_name, data))
}

/// Loads `attachment` into every enabled file field named `key`.
fn attach(
    form: &mut HttpFormStore<RequestBody>,
    key: &str,
    attachment: FileAttachment,
) -> Result<(), CommandError> {
    let mut entries = form.request().body.body_form_data.clone();
    let mut matched = false;
    for entry in entries
        .iter_mut()
        .filter(|e| e.enabled && e.kind == FormDataKind::File && e.key == key)
    {
        entry.value = FormDataValue::File(attachment.clone());
        matched = true;
    }
    if !matched {
        return Err(CommandError::NoFileField(key.to_string()));
    }

    form.set_body_form_data(entries)?;
    Ok(())
}

fn render_response(response: &DispatchResponse) -> String {
    let outcome = if response.is_success() { "" } else { " error" };
    let mut out = format!(
        "HTTP {}{outcome} ({})\n",
        response.status,
        response.duration_display()
    );
    for (name, value) in &response.headers {
        let _ = writeln!(out, "{name}: {value}");
    }
    out.push('\n');
    out.push_str(&response.body_text());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
