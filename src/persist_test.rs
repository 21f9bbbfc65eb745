use uuid::Uuid;

use super::*;
use crate::error::ErrorCode;
use crate::input::Tool;

fn sample_history() -> History {
    let rect = factory::create_element(Tool::Rectangle, Uuid::new_v4(), 0.0, 0.0, 10.0, 20.0, None).unwrap();
    let arrow = factory::create_element(Tool::Arrow, Uuid::new_v4(), 5.0, 5.0, 50.0, 5.0, None).unwrap();
    let mut pencil = factory::create_element(Tool::Pencil, Uuid::new_v4(), 1.0, 1.0, 1.0, 1.0, None).unwrap();
    pencil.push_point(Point::new(4.0, 8.0));
    let mut text = factory::create_element(Tool::Text, Uuid::new_v4(), 2.0, 3.0, 50.0, 35.0, Some("a\nb")).unwrap();
    if let Some(data) = text.text_data_mut() {
        data.font_size = 24.0;
    }

    let mut history = History::new();
    history.commit(vec![rect.clone()]);
    history.commit(vec![rect, arrow, pencil, text]);
    history.undo();
    history
}

// =============================================================
// Round trip
// =============================================================

#[test]
fn history_survives_json() {
    let history = sample_history();
    let json = PersistedHistory::from(&history).to_json().unwrap();
    let restored = PersistedHistory::from_json(&json).unwrap().into_history().unwrap();
    assert_eq!(restored, history);
    assert_eq!(restored.index(), 1);
}

#[test]
fn json_uses_host_field_names() {
    let json = PersistedHistory::from(&sample_history()).to_json().unwrap();
    assert!(json.contains("\"historyIndex\":1"));
    assert!(json.contains("\"type\":\"RECTANGLE\""));
    assert!(json.contains("\"fontSize\":24.0"));
    assert!(!json.contains("headPoints"));
    assert!(!json.contains("lines"));
}

#[test]
fn vector_records_omit_optional_fields() {
    let rect = factory::create_element(Tool::Rectangle, Uuid::new_v4(), 0.0, 0.0, 1.0, 1.0, None).unwrap();
    let value = serde_json::to_value(ElementRecord::from(&rect)).unwrap();
    let fields = value.as_object().unwrap();
    assert!(!fields.contains_key("points"));
    assert!(!fields.contains_key("text"));
}

// =============================================================
// Re-derivation on load
// =============================================================

#[test]
fn pencil_bounds_are_rebuilt_from_points() {
    let json = format!(
        r#"{{"history":[[{{"id":"{}","type":"PENCIL","x1":0,"y1":0,"x2":0,"y2":0,"points":[{{"x":3,"y":4}},{{"x":9,"y":1}}]}}]],"historyIndex":0}}"#,
        Uuid::new_v4()
    );
    let history = PersistedHistory::from_json(&json).unwrap().into_history().unwrap();
    let e = &history.current()[0];
    assert_eq!((e.x1, e.y1, e.x2, e.y2), (3.0, 1.0, 9.0, 4.0));
}

#[test]
fn text_lines_are_rebuilt() {
    let json = format!(
        r#"{{"history":[[{{"id":"{}","type":"TEXT","x1":0,"y1":0,"x2":0,"y2":0,"text":"x\ny\nz"}}]],"historyIndex":0}}"#,
        Uuid::new_v4()
    );
    let history = PersistedHistory::from_json(&json).unwrap().into_history().unwrap();
    let data = history.current()[0].text_data().unwrap();
    assert_eq!(data.lines().len(), 3);
    assert!((data.font_size - 16.0).abs() < 1e-12);
}

// =============================================================
// Errors
// =============================================================

#[test]
fn unknown_type_fails_to_decode() {
    let json = format!(
        r#"{{"history":[[{{"id":"{}","type":"STAR","x1":0,"y1":0,"x2":0,"y2":0}}]],"historyIndex":0}}"#,
        Uuid::new_v4()
    );
    let err = PersistedHistory::from_json(&json).unwrap_err();
    assert_eq!(err.error_code(), "E_PERSIST_DECODE");
}

#[test]
fn cursor_outside_stack_is_rejected() {
    let persisted = PersistedHistory { history: vec![Vec::new()], history_index: 3 };
    let err = persisted.into_history().unwrap_err();
    assert!(matches!(err, PersistError::IndexOutOfRange { index: 3, len: 1 }));
    assert_eq!(err.error_code(), "E_PERSIST_INDEX");
}

#[test]
fn empty_stack_is_rejected() {
    let persisted = PersistedHistory { history: Vec::new(), history_index: 0 };
    assert!(persisted.into_history().is_err());
}
