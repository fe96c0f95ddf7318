//! Reducer Tests
//!
//! Behavioral properties of the reducer over whole action sequences,
//! including actions parsed from their wire form.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use table_editor::state::persistence;
use table_editor::{reduce, Action, AppState, Row, Table, User};

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@x.com", id),
    }
}

fn row(id: &str, text: &str, minute: i64) -> Row {
    Row {
        id: id.to_string(),
        text: text.to_string(),
        created_by: "Alice".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minute),
        modified_by: None,
        modified_at: None,
    }
}

fn table(id: &str, name: &str, rows: Vec<Row>) -> Table {
    Table {
        id: id.to_string(),
        name: name.to_string(),
        rows,
        created_by: "Alice".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
    }
}

/// A mixed sequence touching every action kind.
fn script() -> Vec<Action> {
    vec![
        Action::AddUser(user("u1", "Alice")),
        Action::AddUser(user("u2", "Bob")),
        Action::SetActiveUser(Some("u2".to_string())),
        Action::AddTable(table("t1", "Inventory", vec![])),
        Action::AddTable(table("t2", "Notes", vec![row("n1", "hello", 0)])),
        Action::add_row("t1", row("r1", "Widget", 1)),
        Action::add_row("t1", row("r2", "Gadget", 2)),
        Action::update_row("t1", row("r2", "Gizmo", 3)),
        Action::delete_row("t2", "n1"),
        Action::rename_table("t2", "Scratch"),
        Action::UpdateUser(user("u1", "Alicia")),
        Action::DeleteUser("u2".to_string()),
        Action::Unknown("SORT_ROWS".to_string()),
    ]
}

fn run(state: &AppState, actions: &[Action]) -> AppState {
    actions
        .iter()
        .fold(state.clone(), |acc, action| reduce(&acc, action))
}

#[test]
fn test_every_prefix_is_deterministic_and_input_untouched() {
    let actions = script();
    let mut state = AppState::default();

    for action in &actions {
        let before = state.clone();
        let a = reduce(&state, action);
        let b = reduce(&state, action);
        assert_eq!(a, b, "{} is not deterministic", action.kind());
        assert_eq!(state, before, "{} mutated its input", action.kind());
        state = a;
    }
}

#[test]
fn test_script_final_state() {
    let state = run(&AppState::default(), &script());

    assert_eq!(state.users, vec![user("u1", "Alicia")]);
    // Bob was active and got deleted.
    assert!(state.active_user_id.is_none());

    let inventory = state.find_table("t1").unwrap();
    let texts: Vec<&str> = inventory.rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Widget", "Gizmo"]);

    let scratch = state.find_table("t2").unwrap();
    assert_eq!(scratch.name, "Scratch");
    assert!(scratch.rows.is_empty());
}

#[test]
fn test_update_user_idempotent_for_every_user() {
    let state = run(&AppState::default(), &script()[..5]);
    for u in &state.users {
        assert_eq!(reduce(&state, &Action::UpdateUser(u.clone())), state);
    }
}

#[test]
fn test_delete_table_leaves_no_reachable_rows() {
    let rows = vec![row("a", "1", 0), row("b", "2", 1), row("c", "3", 2)];
    let state = reduce(&AppState::default(), &Action::AddTable(table("t1", "Inventory", rows)));
    let next = reduce(&state, &Action::DeleteTable("t1".to_string()));

    assert!(next.find_table("t1").is_none());
    assert!(next
        .tables
        .iter()
        .flat_map(|t| t.rows.iter())
        .all(|r| !["a", "b", "c"].contains(&r.id.as_str())));
}

#[test]
fn test_serialize_then_load_from_storage_is_identity() {
    let actions = script();
    let mut state = AppState::default();

    for action in &actions {
        state = reduce(&state, action);
        let snapshot = persistence::deserialize(&persistence::serialize(&state).unwrap()).unwrap();
        let restored = reduce(&AppState::default(), &Action::LoadFromStorage(snapshot));
        assert_eq!(restored, state);
    }
}

#[test]
fn test_update_row_in_missing_table_is_no_op() {
    let state = run(&AppState::default(), &script());
    let action = Action::from_json(json!({
        "type": "UPDATE_ROW",
        "payload": {
            "tableId": "missing",
            "row": {
                "id": "r1",
                "text": "X",
                "createdBy": "Alice",
                "createdAt": "2024-03-01T12:00:00Z",
                "modifiedBy": null,
                "modifiedAt": null
            }
        }
    }))
    .unwrap();

    assert_eq!(reduce(&state, &action), state);
}

#[test]
fn test_wire_actions_drive_the_scenario() {
    let wire = vec![
        json!({"type": "ADD_USER", "payload": {"id": "u1", "name": "Alice", "email": "a@x.com"}}),
        json!({"type": "SET_ACTIVE_USER", "payload": "u1"}),
        json!({"type": "ADD_TABLE", "payload": {
            "id": "t1", "name": "Inventory", "rows": [],
            "createdBy": "Alice", "createdAt": "2024-01-15T09:00:00.000Z"
        }}),
        json!({"type": "ADD_ROW", "payload": {"tableId": "t1", "row": {
            "id": "r1", "text": "Widget", "createdBy": "Alice",
            "createdAt": "2024-01-15T09:05:00.000Z", "modifiedBy": null, "modifiedAt": null
        }}}),
        json!({"type": "SOMETHING_THE_REDUCER_IGNORES", "payload": 42}),
    ];

    let state = wire
        .into_iter()
        .map(|v| Action::from_json(v).unwrap())
        .fold(AppState::default(), |acc, action| reduce(&acc, &action));

    assert_eq!(state.users.len(), 1);
    assert_eq!(state.active_user_id.as_deref(), Some("u1"));
    assert_eq!(state.tables[0].name, "Inventory");
    assert_eq!(state.tables[0].rows[0].text, "Widget");
}

#[test]
fn test_duplicates_are_accepted_by_reducer() {
    let state = run(
        &AppState::default(),
        &[
            Action::AddUser(user("u1", "Alice")),
            Action::AddUser(user("u1", "Alice")),
            Action::AddTable(table("t1", "A", vec![])),
            Action::AddTable(table("t1", "B", vec![])),
        ],
    );
    assert_eq!(state.users.len(), 2);

    // Renaming by a duplicated id touches every match.
    let renamed = reduce(&state, &Action::rename_table("t1", "C"));
    assert!(renamed.tables.iter().all(|t| t.name == "C"));
}
