use abot_chat::api::ApiClient;
use abot_chat::app::ChatApp;
use abot_chat::canned::{CannedResponder, ChartFixtures};
use abot_chat::dispatcher::{CannedSource, Dispatcher, RemoteSource};
use abot_chat::error::AbotError;
use abot_chat::models::{ChatTurn, Role};
use abot_chat::session::{SessionState, GREETING};
use serde_json::json;
use std::sync::Arc;

fn canned_dispatcher() -> Dispatcher {
    let charts = ChartFixtures {
        temperature: json!({"data": [{"name": "temp", "y": [25.0, 26.0]}]}),
        humidity: json!({"data": [{"name": "rh", "y": [55.0, 56.0]}]}),
    };
    let responder = CannedResponder::with_charts(charts, None);
    Dispatcher::new(Arc::new(CannedSource::new(responder)))
}

fn remote_dispatcher(endpoint: &str) -> Dispatcher {
    let client = ApiClient::new(endpoint, None).unwrap();
    Dispatcher::new(Arc::new(RemoteSource::new(client)))
}

fn summary(turns: &[ChatTurn]) -> Vec<(Role, Option<String>)> {
    turns.iter().map(|t| (t.role, t.text.clone())).collect()
}

#[test]
fn test_new_session_is_seeded_with_greeting() {
    let state = SessionState::new(1).unwrap();
    assert_eq!(state.turns().len(), 1);
    let greeting = state.turns().last().unwrap();
    assert_eq!(greeting.role, Role::Ai);
    assert_eq!(greeting.text.as_deref(), Some(GREETING));
    assert!(!state.has_pending_reply());
    assert_eq!(state.session_id().len(), 32);
}

#[test]
fn test_bootstrap_is_idempotent() {
    let mut slot = None;
    let first_id = SessionState::bootstrap(&mut slot, 1)
        .unwrap()
        .session_id()
        .to_string();
    let first_turn = slot.as_ref().unwrap().turns().last().unwrap().id.clone();
    let pool_ptr = slot.as_ref().unwrap().worker_pool() as *const _;

    let state = SessionState::bootstrap(&mut slot, 1).unwrap();
    assert_eq!(state.session_id(), first_id);
    assert_eq!(state.turns().len(), 1);
    assert_eq!(state.turns().last().unwrap().id, first_turn);
    assert_eq!(state.worker_pool() as *const _, pool_ptr);
}

#[test]
fn test_reply_is_appended_after_its_human_turn() {
    let dispatcher = canned_dispatcher();
    let mut state = SessionState::new(2).unwrap();

    state.send_message(&dispatcher, "Hello").unwrap();
    assert!(state.has_pending_reply());
    assert_eq!(state.turns().last().unwrap().role, Role::Human);

    let reply = state.resolve_pending(|_| {}).unwrap().clone();
    assert_eq!(reply.text.as_deref(), Some("Hello! How can I assist you today?"));
    assert!(!state.has_pending_reply());

    assert_eq!(
        summary(state.turns().as_slice()),
        vec![
            (Role::Ai, Some(GREETING.to_string())),
            (Role::Human, Some("Hello".to_string())),
            (Role::Ai, Some("Hello! How can I assist you today?".to_string())),
        ]
    );
}

#[test]
fn test_second_submission_is_refused_while_pending() {
    let dispatcher = canned_dispatcher();
    let mut state = SessionState::new(1).unwrap();

    state.send_message(&dispatcher, "hello").unwrap();
    let err = state.send_message(&dispatcher, "list of warehouses").unwrap_err();
    assert!(matches!(err, AbotError::ReplyPending));
    assert_eq!(state.turns().len(), 2);

    state.resolve_pending(|_| {});
    state.send_message(&dispatcher, "list of warehouses").unwrap();
    state.resolve_pending(|_| {});

    let roles: Vec<Role> = state.turns().iter().map(|t| t.role).collect();
    assert_eq!(
        roles,
        vec![Role::Ai, Role::Human, Role::Ai, Role::Human, Role::Ai]
    );
}

#[test]
fn test_resolve_without_pending_is_noop() {
    let mut state = SessionState::new(1).unwrap();
    assert!(state.resolve_pending(|_| {}).is_none());
    assert_eq!(state.turns().len(), 1);
}

#[test]
fn test_clicking_a_button_equals_typing_its_label() {
    let mut clicked = ChatApp::new(canned_dispatcher(), 1);
    clicked.submit("hello").unwrap();
    clicked.resolve_pending().unwrap();
    let frame = clicked.refresh(80).unwrap();
    assert_eq!(frame.action(1), Some("What can you do?"));
    clicked.activate(1).unwrap();
    clicked.resolve_pending().unwrap();

    let mut typed = ChatApp::new(canned_dispatcher(), 1);
    typed.submit("hello").unwrap();
    typed.resolve_pending().unwrap();
    typed.submit("What can you do?").unwrap();
    typed.resolve_pending().unwrap();

    let clicked_turns = summary(clicked.session().unwrap().turns().as_slice());
    let typed_turns = summary(typed.session().unwrap().turns().as_slice());
    assert_eq!(clicked_turns, typed_turns);
    assert_eq!(clicked_turns.len(), 5);
}

#[test]
fn test_activating_unknown_button_changes_nothing() {
    let mut app = ChatApp::new(canned_dispatcher(), 1);
    app.refresh(80).unwrap();
    assert!(app.activate(1).is_err());
    assert_eq!(app.session().unwrap().turns().len(), 1);
    assert!(!app.session().unwrap().has_pending_reply());
}

#[test]
fn test_remote_http_error_lands_as_red_turn() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/chat")
        .with_status(429)
        .with_body(r#"{"detail": "rate limited"}"#)
        .create();

    let dispatcher = remote_dispatcher(&format!("{}/chat", server.url()));
    let mut state = SessionState::new(1).unwrap();
    state.send_message(&dispatcher, "hello").unwrap();
    let reply = state.resolve_pending(|_| {}).unwrap();

    assert_eq!(reply.role, Role::Ai);
    assert_eq!(reply.text.as_deref(), Some("Error: rate limited"));
    assert_eq!(
        reply.extras.as_ref().and_then(|e| e.color.as_deref()),
        Some("red")
    );
}

#[test]
fn test_remote_network_failure_lands_as_no_response() {
    let dispatcher = remote_dispatcher("http://127.0.0.1:9/chat");
    let mut state = SessionState::new(1).unwrap();
    state.send_message(&dispatcher, "hello").unwrap();
    let reply = state.resolve_pending(|_| {}).unwrap();
    assert_eq!(reply.text.as_deref(), Some("Error: No response received"));
}

#[test]
fn test_remote_reply_sends_session_id() {
    let mut server = mockito::Server::new();
    let mut state = SessionState::new(1).unwrap();
    let mock = server
        .mock("POST", "/chat")
        .match_body(mockito::Matcher::Json(
            json!({"text": "hello", "sender_id": state.session_id()}),
        ))
        .with_status(200)
        .with_body(r#"[{"text": "Hi from the API"}]"#)
        .expect(1)
        .create();

    let dispatcher = remote_dispatcher(&format!("{}/chat", server.url()));
    state.send_message(&dispatcher, "hello").unwrap();
    let reply = state.resolve_pending(|_| {}).unwrap();
    assert_eq!(reply.text.as_deref(), Some("Hi from the API"));
    mock.assert();
}

#[test]
fn test_waiting_callback_ticks_during_slow_reply() {
    use abot_chat::config::DelayRange;
    use std::time::Duration;

    let charts = ChartFixtures {
        temperature: json!({}),
        humidity: json!({}),
    };
    let delay = DelayRange {
        min: Duration::from_millis(300),
        max: Duration::from_millis(300),
    };
    let dispatcher = Dispatcher::new(Arc::new(CannedSource::new(CannedResponder::with_charts(
        charts,
        Some(delay),
    ))));

    let mut state = SessionState::new(1).unwrap();
    state.send_message(&dispatcher, "hello").unwrap();
    let mut frames = 0;
    state.resolve_pending(|_| frames += 1);
    assert!(frames >= 2, "only {} waiting frames", frames);
}

#[test]
fn test_turn_ids_stay_unique_across_a_session() {
    let dispatcher = canned_dispatcher();
    let mut state = SessionState::new(1).unwrap();
    for i in 0..50 {
        state.send_message(&dispatcher, &format!("message {}", i)).unwrap();
        state.resolve_pending(|_| {});
    }
    let mut ids: Vec<&str> = state.turns().iter().map(|t| t.id.as_str()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(total, 101);
}
