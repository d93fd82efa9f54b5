//! Integration tests for store persistence
//!
//! These tests open a workbench over file storage in a temporary directory,
//! mutate it, and reopen it to check what survives.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::tempdir;

use courier_application::{Backing, SharedStorage, Workbench};
use courier_domain::{
    BodyType, FileAttachment, FormDataEntry, FormDataKind, FormDataValue, HttpFormState,
    KeyValueRow, MESSAGE_HISTORY_LIMIT, StoreKind,
};
use courier_infrastructure::FileStorage;

fn backing(dir: &Path) -> Backing {
    let storage: SharedStorage = Arc::new(FileStorage::new(dir));
    Backing::Storage(storage)
}

fn read_record(dir: &Path, kind: StoreKind) -> Value {
    let path = dir.join(format!("{}.json", kind.persistence_key()));
    let content = std::fs::read_to_string(&path).expect("record file");
    serde_json::from_str(&content).expect("record json")
}

#[test]
fn test_fresh_directory_yields_defaults() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let workbench = Workbench::open(&backing(temp_dir.path()));

    assert_eq!(workbench.get_form().state(), &HttpFormState::default_get());
    assert_eq!(workbench.post_form().state(), &HttpFormState::default_post());
    assert_eq!(workbench.put_form().state(), &HttpFormState::default_put());
    assert_eq!(workbench.delete_form().state(), &HttpFormState::default_delete());
    assert_eq!(
        workbench.sse().custom_events(),
        &["user-login".to_string(), "user-logout".to_string()]
    );
    assert_eq!(workbench.websocket().history().count(), 0);

    // Opening alone writes nothing
    assert_eq!(std::fs::read_dir(temp_dir.path()).map(Iterator::count).unwrap_or(0), 0);
}

#[test]
fn test_every_store_survives_reopen() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    {
        let mut workbench = Workbench::open(&backing(temp_dir.path()));
        workbench.get_form_mut().set_url("https://api.example.com/users").unwrap();
        workbench
            .get_form_mut()
            .set_params(vec![KeyValueRow::new("page", "2")])
            .unwrap();
        workbench.post_form_mut().set_body_raw("{\"name\":\"x\"}").unwrap();
        workbench
            .put_form_mut()
            .set_headers(vec![KeyValueRow::disabled("X-Trace", "1")])
            .unwrap();
        workbench.delete_form_mut().set_url("https://api.example.com/users/7").unwrap();
        workbench.sse_mut().add_custom_event("order-created").unwrap();
        workbench.websocket_mut().set_url("wss://ws.example.com").unwrap();
        workbench.websocket_mut().add_message_to_history("hello").unwrap();
    }

    let workbench = Workbench::open(&backing(temp_dir.path()));

    assert_eq!(workbench.get_form().request().url, "https://api.example.com/users");
    assert_eq!(workbench.get_form().request().params, vec![KeyValueRow::new("page", "2")]);
    assert_eq!(workbench.post_form().request().body.body_raw, "{\"name\":\"x\"}");
    assert!(!workbench.put_form().request().headers[0].enabled);
    assert_eq!(workbench.delete_form().request().url, "https://api.example.com/users/7");
    assert_eq!(workbench.sse().custom_events().last().map(String::as_str), Some("order-created"));
    assert_eq!(workbench.websocket().url(), "wss://ws.example.com");
    assert_eq!(workbench.websocket().history().collect::<Vec<_>>(), vec!["hello"]);
}

#[test]
fn test_mutation_writes_its_own_record() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut workbench = Workbench::open(&backing(temp_dir.path()));

    workbench.sse_mut().set_url("https://stream.example.com").unwrap();

    assert_eq!(
        read_record(temp_dir.path(), StoreKind::Sse)["url"],
        json!("https://stream.example.com")
    );
    for kind in StoreKind::all().iter().filter(|k| **k != StoreKind::Sse) {
        let path = temp_dir.path().join(format!("{}.json", kind.persistence_key()));
        assert!(!path.exists(), "{kind} should not be written");
    }
}

#[test]
fn test_post_record_uses_camel_case_fields() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut workbench = Workbench::open(&backing(temp_dir.path()));

    workbench.post_form_mut().set_body_type(BodyType::FormData).unwrap();

    let record = read_record(temp_dir.path(), StoreKind::Post);
    assert_eq!(record["request"]["bodyType"], json!("form-data"));
    assert!(record["request"]["bodyRaw"].is_string());
    assert!(record["request"]["bodyFormData"].is_array());
}

#[test]
fn test_file_attachment_is_lost_after_reload() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let attachment = FileAttachment::new("avatar.png", vec![0x89, 0x50, 0x4e, 0x47]);

    {
        let mut workbench = Workbench::open(&backing(temp_dir.path()));
        workbench
            .put_form_mut()
            .set_body_form_data(vec![
                FormDataEntry::text("title", "Hello"),
                FormDataEntry::file("avatar", attachment),
            ])
            .unwrap();
    }

    let record = read_record(temp_dir.path(), StoreKind::Put);
    assert_eq!(record["request"]["bodyFormData"][1]["value"], json!(""));

    let workbench = Workbench::open(&backing(temp_dir.path()));
    let entries = &workbench.put_form().request().body.body_form_data;
    assert_eq!(entries[0], FormDataEntry::text("title", "Hello"));
    assert_eq!(entries[1].key, "avatar");
    assert_eq!(entries[1].kind, FormDataKind::File);
    assert!(entries[1].enabled);
    assert_eq!(entries[1].attachment(), None);
    assert_eq!(entries[1].value, FormDataValue::Text(String::new()));
}

#[test]
fn test_text_only_form_round_trips_exactly() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let expected = {
        let mut workbench = Workbench::open(&backing(temp_dir.path()));
        let form = workbench.post_form_mut();
        form.set_body_type(BodyType::FormData).unwrap();
        form.set_body_form_data(vec![
            FormDataEntry::text("a", "1"),
            FormDataEntry::text("b", "2").disabled(),
        ])
        .unwrap();
        form.state().clone()
    };

    let workbench = Workbench::open(&backing(temp_dir.path()));

    assert_eq!(workbench.post_form().state(), &expected);
}

#[test]
fn test_partial_record_keeps_defaults() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    std::fs::write(
        temp_dir.path().join("http-post-store.json"),
        r#"{"request":{"url":"https://partial.example.com"}}"#,
    )
    .unwrap();

    let workbench = Workbench::open(&backing(temp_dir.path()));
    let request = workbench.post_form().request();
    let defaults = HttpFormState::default_post().request;

    assert_eq!(request.url, "https://partial.example.com");
    assert_eq!(request.headers, defaults.headers);
    assert_eq!(request.body, defaults.body);
}

#[test]
fn test_corrupt_record_falls_back_to_defaults() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    std::fs::write(temp_dir.path().join("http-get-store.json"), "{not json").unwrap();
    std::fs::write(temp_dir.path().join("websocket-store.json"), r#"{"url": 42}"#).unwrap();

    let workbench = Workbench::open(&backing(temp_dir.path()));

    assert_eq!(workbench.get_form().state(), &HttpFormState::default_get());
    assert_eq!(workbench.websocket().url(), "wss://echo.websocket.org");
}

#[test]
fn test_history_cap_holds_across_reload() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    {
        let mut workbench = Workbench::open(&backing(temp_dir.path()));
        for i in 1..=MESSAGE_HISTORY_LIMIT + 1 {
            workbench
                .websocket_mut()
                .add_message_to_history(&format!("m{i}"))
                .unwrap();
        }
    }

    let record = read_record(temp_dir.path(), StoreKind::WebSocket);
    let saved: VecDeque<String> =
        serde_json::from_value(record["messageHistory"].clone()).expect("history array");
    assert_eq!(saved.len(), MESSAGE_HISTORY_LIMIT);
    assert_eq!(saved.front().map(String::as_str), Some("m21"));
    assert_eq!(saved.back().map(String::as_str), Some("m2"));

    let workbench = Workbench::open(&backing(temp_dir.path()));
    assert_eq!(workbench.websocket().history().count(), MESSAGE_HISTORY_LIMIT);
}

#[test]
fn test_oversized_history_is_trimmed_on_load() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let history: Vec<String> = (0..30).map(|i| format!("m{i}")).collect();
    std::fs::write(
        temp_dir.path().join("websocket-store.json"),
        json!({ "messageHistory": history }).to_string(),
    )
    .unwrap();

    let workbench = Workbench::open(&backing(temp_dir.path()));

    let loaded: Vec<_> = workbench.websocket().history().collect();
    assert_eq!(loaded.len(), MESSAGE_HISTORY_LIMIT);
    assert_eq!(loaded[0], "m0");
}
