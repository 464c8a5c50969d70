//! Integration tests for the client context and chat session.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

use minechat_core::{
    ChatError, ChatState, ClientConfig, ClientContext, Command, Parameter, ParameterKind,
};
use minechat_input::MockInput;
use minechat_settings::SettingsError;

fn write_options(root: &Path, content: &str) {
    fs::write(root.join("options.txt"), content).unwrap();
}

fn client(root: &Path, mock: &MockInput) -> ClientContext {
    let config = ClientConfig::default()
        .with_root(root)
        .with_settle_delay(Duration::ZERO);
    ClientContext::new(config, Arc::new(mock.clone())).unwrap()
}

/// Test the complete flow from options.txt to a typed command.
#[tokio::test]
async fn test_ban_command_full_workflow() {
    let temp = tempdir().unwrap();
    write_options(
        temp.path(),
        "version:3700\nkey_key.chat:key.keyboard.t\nkey_key.command:key.keyboard.slash\n",
    );
    let mock = MockInput::new();
    let mut client = client(temp.path(), &mock);

    client
        .register_command(
            Command::new(["ban"], vec![Parameter::required("player", ParameterKind::String)])
                .unwrap(),
        )
        .unwrap();

    let line = client
        .session_mut()
        .send_command("ban", &["PlayerX"])
        .await
        .unwrap();

    assert_eq!(line, "/ban PlayerX");
    assert_eq!(mock.pressed_keys(), vec!["t"]);
    assert_eq!(mock.typed_text(), vec!["/ban PlayerX"]);
    assert_eq!(client.session().state(), ChatState::Open);
}

/// A missing required argument fails before any input is emitted.
#[tokio::test]
async fn test_kick_without_target_emits_nothing() {
    let temp = tempdir().unwrap();
    write_options(temp.path(), "key_key.chat:key.keyboard.t\n");
    let mock = MockInput::new();
    let mut client = client(temp.path(), &mock);
    client
        .register_command(
            Command::new(["kick"], vec![Parameter::required("player", ParameterKind::String)])
                .unwrap(),
        )
        .unwrap();

    let err = client
        .session_mut()
        .send_command::<&str>("kick", &[])
        .await
        .unwrap_err();

    assert!(err.is_command());
    assert_eq!(mock.call_count(), 0);
    assert_eq!(client.session().state(), ChatState::Closed);
}

#[tokio::test]
async fn test_open_twice_is_rejected() {
    let temp = tempdir().unwrap();
    write_options(temp.path(), "key_key.chat:key.keyboard.t\n");
    let mock = MockInput::new();
    let mut client = client(temp.path(), &mock);

    client.session_mut().open().await.unwrap();
    let err = client.session_mut().open().await.unwrap_err();

    assert!(err.is_state());
    assert_eq!(client.session().state(), ChatState::Open);
    assert_eq!(mock.call_count(), 1);
}

#[test]
fn test_type_text_while_closed() {
    let temp = tempdir().unwrap();
    write_options(temp.path(), "key_key.chat:key.keyboard.t\n");
    let mock = MockInput::new();
    let mut client = client(temp.path(), &mock);

    let err = client.session_mut().type_text("hello").unwrap_err();

    assert!(matches!(
        err,
        ChatError::InvalidState { current: ChatState::Closed, .. }
    ));
    assert!(mock.typed_text().is_empty());
}

#[test]
fn test_overlapping_aliases_are_rejected() {
    let temp = tempdir().unwrap();
    write_options(temp.path(), "");
    let mock = MockInput::new();
    let mut client = client(temp.path(), &mock);

    client
        .register_command(Command::new(["ban"], vec![]).unwrap())
        .unwrap();
    let err = client
        .register_command(Command::new(["b", "ban"], vec![]).unwrap())
        .unwrap_err();

    assert!(err.is_registration());
    assert_eq!(client.commands().len(), 1);
    assert!(client.resolve_command("b").is_none());
    assert_eq!(client.resolve_command("ban").unwrap().names().len(), 1);
}

#[test]
fn test_bindings_resolve_through_tiers() {
    let temp = tempdir().unwrap();
    write_options(temp.path(), "key_key.chat:key.keyboard.y\n");
    let mock = MockInput::new();

    let client = client(temp.path(), &mock);
    assert_eq!(client.session().bindings().chat.name(), "y");
    assert_eq!(client.session().bindings().command.name(), "slash");

    let explicit = ClientContext::new(
        ClientConfig::default()
            .with_root(temp.path())
            .with_chat_key("key.keyboard.u")
            .with_command_key("period"),
        Arc::new(mock.clone()),
    )
    .unwrap();
    assert_eq!(explicit.session().bindings().chat.name(), "u");
    assert_eq!(explicit.session().bindings().command.name(), "period");
}

#[test]
fn test_unresolvable_binding_aborts_construction() {
    let temp = tempdir().unwrap();
    write_options(temp.path(), "lang:en_us\n");
    let defaults = temp.path().join("default.options.txt");
    fs::write(&defaults, "key_key.command:key.keyboard.slash\n").unwrap();

    let err = ClientContext::new(
        ClientConfig::default()
            .with_root(temp.path())
            .with_defaults(&defaults),
        Arc::new(MockInput::new()),
    )
    .unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("key_key.chat"));
}

#[test]
fn test_missing_options_file_is_io_error() {
    let temp = tempdir().unwrap();

    let err = ClientContext::new(
        ClientConfig::default().with_root(temp.path()),
        Arc::new(MockInput::new()),
    )
    .unwrap_err();

    assert!(matches!(err, ChatError::Settings(SettingsError::NotFound(_))));
    assert!(!err.is_configuration());
}

#[test]
fn test_malformed_lines_surface_as_warnings() {
    let temp = tempdir().unwrap();
    write_options(
        temp.path(),
        "key_key.chat:key.keyboard.t\njustakey\nlastServer:mc.example.org:25565\n",
    );

    let client = client(temp.path(), &MockInput::new());

    assert_eq!(client.parse_warnings().len(), 1);
    assert_eq!(client.settings().len(), 2);
    assert_eq!(client.setting("lastServer"), Some("mc.example.org:25565"));
    assert_eq!(client.setting("key_key.inventory"), Some("key.keyboard.e"));
}

#[test]
fn test_duplicate_keys_are_not_counted_as_skipped() {
    let temp = tempdir().unwrap();
    write_options(
        temp.path(),
        "key_key.chat:key.keyboard.t\nfov:0.0\nfov:1.0\nnocolon\n",
    );

    let client = client(temp.path(), &MockInput::new());

    assert_eq!(client.parse_warnings().len(), 2);
    assert_eq!(client.skipped_lines(), 1);
    assert_eq!(client.setting("fov"), Some("1.0"));
}

#[tokio::test]
async fn test_inline_options_and_vanilla_commands() {
    let mut options = BTreeMap::new();
    options.insert("key_key.chat".to_string(), "key.keyboard.t".to_string());
    let mock = MockInput::new();

    let config = ClientConfig::default()
        .with_root("/nonexistent/minecraft")
        .with_options(options)
        .with_version("1.20.4")
        .with_command_prefix("/")
        .with_settle_delay(Duration::ZERO)
        .with_vanilla_commands();
    let mut client = ClientContext::new(config, Arc::new(mock.clone())).unwrap();

    assert_eq!(client.version(), Some("1.20.4"));
    assert!(client.parse_warnings().is_empty());

    let line = client
        .session_mut()
        .send_command_and_submit("w", &["Alex", "meet", "at", "spawn"])
        .await
        .unwrap();

    assert_eq!(line, "/msg Alex meet at spawn");
    assert_eq!(mock.pressed_keys(), vec!["t", "enter"]);
    assert_eq!(client.session().state(), ChatState::Closed);
    assert_eq!(mock.typed_text(), vec![line]);
}

#[test]
fn test_config_file_round_trip() {
    let temp = tempdir().unwrap();
    write_options(temp.path(), "key_key.chat:key.keyboard.t\n");
    let config_path = temp.path().join("minechat.toml");
    fs::write(
        &config_path,
        format!(
            "root = {:?}\nsettle_delay_ms = 0\n\n[[commands]]\nnames = [\"spawn\"]\n",
            temp.path().display().to_string()
        ),
    )
    .unwrap();

    let config = ClientConfig::from_file(&config_path).unwrap();
    let client = ClientContext::new(config, Arc::new(MockInput::new())).unwrap();

    assert_eq!(client.root(), temp.path());
    assert!(client.resolve_command("spawn").is_some());
}

#[test]
fn test_invalid_config_file() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("minechat.toml");
    fs::write(&config_path, "settle_delay_ms = \"fast\"\n").unwrap();

    let err = ClientConfig::from_file(&config_path).unwrap_err();

    assert!(matches!(err, ChatError::InvalidConfig { .. }));
    assert!(err.is_configuration());
}

/// Two clients share nothing and can run concurrently.
#[tokio::test]
async fn test_independent_clients_run_concurrently() {
    let temp_a = tempdir().unwrap();
    let temp_b = tempdir().unwrap();
    write_options(temp_a.path(), "key_key.chat:key.keyboard.t\n");
    write_options(temp_b.path(), "key_key.chat:key.keyboard.y\n");
    let mock_a = MockInput::new();
    let mock_b = MockInput::new();
    let mut a = client(temp_a.path(), &mock_a);
    let mut b = client(temp_b.path(), &mock_b);

    let (ra, rb) = tokio::join!(a.session_mut().send("from a"), b.session_mut().send("from b"));
    ra.unwrap();
    rb.unwrap();

    assert_eq!(mock_a.pressed_keys(), vec!["t"]);
    assert_eq!(mock_b.pressed_keys(), vec!["y"]);
    assert_eq!(mock_a.typed_text(), vec!["from a"]);
    assert_eq!(mock_b.typed_text(), vec!["from b"]);
}
