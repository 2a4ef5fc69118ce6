//! Drives a `Launcher` end to end through a fake environment.

use std::io::Cursor;

use tag_launcher::config::{AdhocTagStyle, Config};
use tag_launcher::error::{LauncherError, Result};
use tag_launcher::launcher::{Action, DisplayStatus, Environment, Launcher};
use tag_launcher::stdin_commands;

/// Records everything the launcher asks of it. URLs fail to open unless
/// `can_browse` is set.
#[derive(Default)]
struct FakeEnvironment {
    tags: Vec<String>,
    views: Vec<String>,
    executables: Vec<String>,
    can_browse: bool,
    statuses: Vec<DisplayStatus>,
    executed: Vec<Action>,
}

impl FakeEnvironment {
    fn desktop() -> Self {
        FakeEnvironment {
            tags: vec!["work".into(), "web".into(), "media".into()],
            views: vec!["editor".into(), "www".into(), "terms".into()],
            executables: vec![
                "firefox".into(),
                "feh".into(),
                "fetchmail".into(),
                "urxvt".into(),
                "xterm".into(),
            ],
            ..Default::default()
        }
    }
}

impl Environment for FakeEnvironment {
    fn tag_names(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn view_names(&self) -> Vec<String> {
        self.views.clone()
    }

    fn executable_names(&self) -> Vec<String> {
        self.executables.clone()
    }

    fn show_status(&mut self, status: &DisplayStatus) {
        self.statuses.push(status.clone());
    }

    fn execute(&mut self, action: &Action) -> Result<()> {
        if let Action::OpenUrl(url) = action {
            if !self.can_browse {
                return Err(LauncherError::UnsupportedTarget(url.clone()));
            }
        }
        self.executed.push(action.clone());
        Ok(())
    }
}

fn counter_config() -> Config {
    Config {
        adhoc_tags: Some(AdhocTagStyle::Counter),
        ..Default::default()
    }
}

#[test]
fn test_refresh_pulls_pools_from_environment() {
    let env = FakeEnvironment::desktop();
    let mut launcher = Launcher::new(&counter_config());
    assert!(launcher.pools().tags.is_empty());

    launcher.refresh_pools(&env);
    assert_eq!(launcher.pools().tags.len(), 3);
    assert_eq!(launcher.pools().views.len(), 3);
    assert_eq!(launcher.pools().executables.len(), 5);
    // firefox, feh and fetchmail share a bucket
    assert_eq!(launcher.pools().executables.bucket_count(), 3);
}

#[test]
fn test_completion_cycles_through_every_candidate() {
    let env = FakeEnvironment::desktop();
    let mut launcher = Launcher::new(&counter_config());
    launcher.refresh_pools(&env);

    let mut seen = Vec::new();
    let mut index = 0;
    while let Some(suggestion) = launcher.on_completion_requested("urxvt @e", index) {
        seen.push(suggestion);
        index += 1;
    }

    assert_eq!(seen.len(), 3);
    assert!(seen.contains(&"@editor".to_string()));
    assert!(seen.iter().all(|s| s.starts_with('@')));
    assert!(launcher.completed());
}

#[test]
fn test_typing_completing_and_committing_a_command() {
    let mut env = FakeEnvironment::desktop();
    let mut launcher = Launcher::new(&counter_config());
    launcher.refresh_pools(&env);

    assert_eq!(
        launcher.on_text_changed("urx"),
        DisplayStatus::Launch("urx".into())
    );
    let program = launcher.on_completion_requested("urx", 0).unwrap();
    assert_eq!(program, "urxvt");

    let line = format!("{} @editor", program);
    let action = launcher.on_commit(&line).unwrap();
    let Action::RunCommand(descriptor) = &action else {
        panic!("Expected RunCommand, got {:?}", action);
    };
    assert_eq!(descriptor.tags.iter().collect::<Vec<_>>(), ["adhoc-1"]);
    assert!(descriptor.synthetic_tag);

    assert_eq!(launcher.execute(&action, &mut env), DisplayStatus::Idle);
    assert_eq!(env.executed, vec![action]);
    assert_eq!(env.statuses.last(), Some(&DisplayStatus::Idle));
}

#[test]
fn test_unsupported_target_becomes_status_message() {
    let mut env = FakeEnvironment::desktop();
    let mut launcher = Launcher::new(&counter_config());

    assert_eq!(
        launcher.on_text_changed("http://example.com"),
        DisplayStatus::Goto("http://example.com".into())
    );
    let action = launcher.on_commit("http://example.com").unwrap();
    let status = launcher.execute(&action, &mut env);

    assert_eq!(
        status,
        DisplayStatus::Error("Cannot open http://example.com".into())
    );
    assert!(env.executed.is_empty());

    // the launcher keeps working afterwards
    env.can_browse = true;
    let action = launcher.on_commit("subtle wm").unwrap();
    assert_eq!(launcher.execute(&action, &mut env), DisplayStatus::Idle);
    assert_eq!(
        env.executed,
        vec![Action::OpenUrl("https://www.google.com/#q=subtle%20wm".into())]
    );
}

#[test]
fn test_jsonl_session_over_fake_environment() {
    let mut env = FakeEnvironment::desktop();
    let mut launcher = Launcher::new(&counter_config());
    launcher.refresh_pools(&env);

    let input = concat!(
        r#"{"type": "textChanged", "text": "xtern", "requestId": "1"}"#,
        "\n",
        r#"{"type": "complete", "text": "xtern", "requestId": "2"}"#,
        "\n",
        r#"{"type": "commit", "text": "http://example.com", "requestId": "3"}"#,
        "\n",
    );
    let mut out = Vec::new();
    stdin_commands::run(&mut launcher, &mut env, Cursor::new(input), &mut out).unwrap();

    let responses: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["text"], "Launch xtern");
    assert_eq!(responses[1]["suggestion"], "xterm");
    assert_eq!(responses[1]["line"], "xterm");
    assert_eq!(responses[2]["type"], "action");
    assert_eq!(responses[2]["action"]["type"], "openUrl");
    assert_eq!(responses[3]["type"], "status");
    assert_eq!(responses[3]["text"], "Cannot open http://example.com");
    assert!(responses.iter().all(|r| r["requestId"].is_string()));
}

#[test]
fn test_invalid_utf8_line_is_reported() {
    let mut env = FakeEnvironment::desktop();
    let mut launcher = Launcher::new(&counter_config());

    let mut input = b"{\"type\": \"textChanged\", \"text\": \"".to_vec();
    input.extend_from_slice(&[0xff, 0xfe]);
    input.extend_from_slice(b"\"}\n{\"type\": \"refresh\"}\n");

    let mut out = Vec::new();
    stdin_commands::run(&mut launcher, &mut env, Cursor::new(input), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(r#""type":"error""#));
    assert!(lines[1].contains(r#""text":"Nothing selected""#));
    assert_eq!(launcher.pools().tags.len(), 3);
}
