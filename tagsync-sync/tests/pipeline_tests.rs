//! Orchestrator behavior against a scripted runner: command order, fail-fast,
//! dry run and remote setup.

use std::cell::RefCell;
use std::collections::HashMap;

use rstest::rstest;
use tagsync_core::{RemoteSetup, RepoUrl, SyncConfig};
use tagsync_sync::{CommandRunner, SyncError, TagSync};

const ORIGIN: &str = "https://example.com/eea.git";

// ---------------------------------------------------------------------------
// Scripted runner
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeRunner {
    responses: HashMap<String, Result<String, String>>,
    calls: RefCell<Vec<(String, bool)>>,
}

impl FakeRunner {
    fn ok(mut self, command: &str, output: &str) -> Self {
        self.responses
            .insert(command.to_string(), Ok(output.to_string()));
        self
    }

    fn fail(mut self, command: &str, output: &str) -> Self {
        self.responses
            .insert(command.to_string(), Err(output.to_string()));
        self
    }

    fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(c, _)| c.clone()).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, args: &[String], ignore_error: bool) -> Result<String, SyncError> {
        let command = args.join(" ");
        self.calls.borrow_mut().push((command.clone(), ignore_error));
        match self.responses.get(&command) {
            Some(Ok(out)) => Ok(out.clone()),
            Some(Err(out)) if ignore_error => Ok(out.clone()),
            Some(Err(out)) => Err(SyncError::CommandFailed {
                command,
                output: out.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}

fn happy_runner() -> FakeRunner {
    FakeRunner::default()
        .ok(
            &format!("git ls-remote --tags {ORIGIN}"),
            "abc123\trefs/tags/v1.0\ndef456\trefs/tags/v2.0",
        )
        .ok(
            &format!("git ls-remote {ORIGIN} refs/tags/v2.0"),
            "def456\trefs/tags/v2.0",
        )
        .ok("git rev-parse --abbrev-ref HEAD", "main")
}

fn config() -> SyncConfig {
    SyncConfig::new(ORIGIN)
}

// ---------------------------------------------------------------------------
// 1. Happy path
// ---------------------------------------------------------------------------

#[test]
fn run_issues_commands_in_order_and_reports() {
    let runner = happy_runner();
    let report = TagSync::new(&runner, config()).run().expect("run");

    assert_eq!(report.tag.as_str(), "v2.0");
    assert_eq!(report.commit.as_str(), "def456");
    assert_eq!(report.branch.as_str(), "main");
    assert_eq!(report.destination_remote.as_str(), "mma");
    assert!(!report.dry_run);

    assert_eq!(
        runner.commands(),
        vec![
            format!("git ls-remote --tags {ORIGIN}"),
            format!("git ls-remote {ORIGIN} refs/tags/v2.0"),
            "git rev-parse --abbrev-ref HEAD".to_string(),
            format!("git fetch {ORIGIN} def456"),
            "git merge --no-ff def456".to_string(),
            "git push mma main".to_string(),
        ]
    );
    assert!(runner.calls.borrow().iter().all(|(_, ignore)| !ignore));
}

#[test]
fn configured_git_program_is_used_for_every_call() {
    let runner = FakeRunner::default()
        .ok(
            &format!("/opt/git/bin/git ls-remote --tags {ORIGIN}"),
            "abc123\trefs/tags/v1.0",
        )
        .ok(
            &format!("/opt/git/bin/git ls-remote {ORIGIN} refs/tags/v1.0"),
            "abc123\trefs/tags/v1.0",
        )
        .ok("/opt/git/bin/git rev-parse --abbrev-ref HEAD", "release");
    let mut cfg = config();
    cfg.git = "/opt/git/bin/git".to_string();

    let report = TagSync::new(&runner, cfg).run().expect("run");
    assert_eq!(report.commit.as_str(), "abc123");
    assert!(runner
        .commands()
        .iter()
        .all(|c| c.starts_with("/opt/git/bin/git ")));
}

#[test]
fn latest_follows_listing_order_not_semver() {
    let runner = FakeRunner::default()
        .ok(
            &format!("git ls-remote --tags {ORIGIN}"),
            "aaa\trefs/tags/v10.0\nbbb\trefs/tags/v9.0",
        )
        .ok(
            &format!("git ls-remote {ORIGIN} refs/tags/v9.0"),
            "bbb\trefs/tags/v9.0",
        );
    let resolved = TagSync::new(&runner, config())
        .resolve_latest()
        .expect("resolve");
    assert_eq!(resolved.tag.as_str(), "v9.0");
    assert_eq!(resolved.commit.as_str(), "bbb");
}

// ---------------------------------------------------------------------------
// 2. Validation failures stop before anything else runs
// ---------------------------------------------------------------------------

#[test]
fn empty_listing_fails_with_no_tags_found() {
    let runner = FakeRunner::default().ok(&format!("git ls-remote --tags {ORIGIN}"), "");
    let err = TagSync::new(&runner, config()).run().unwrap_err();

    assert!(matches!(err, SyncError::NoTagsFound { .. }), "got: {err}");
    assert_eq!(runner.commands().len(), 1);
}

#[test]
fn marker_free_listing_fails_with_no_valid_tags() {
    let runner = FakeRunner::default().ok(
        &format!("git ls-remote --tags {ORIGIN}"),
        "abc123\trefs/heads/main",
    );
    let err = TagSync::new(&runner, config()).run().unwrap_err();

    assert!(matches!(err, SyncError::NoValidTags { .. }), "got: {err}");
    assert_eq!(runner.commands().len(), 1);
}

#[test]
fn empty_tag_query_fails_before_fetch() {
    let runner = FakeRunner::default()
        .ok(
            &format!("git ls-remote --tags {ORIGIN}"),
            "abc123\trefs/tags/v1.0",
        )
        .ok(&format!("git ls-remote {ORIGIN} refs/tags/v1.0"), "");
    let err = TagSync::new(&runner, config()).run().unwrap_err();

    match &err {
        SyncError::TagNotResolved { tag, .. } => assert_eq!(tag.as_str(), "v1.0"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("v1.0"));
    assert_eq!(runner.commands().len(), 2);
    assert!(runner.commands().iter().all(|c| !c.contains("fetch")));
}

#[test]
fn invalid_config_runs_nothing() {
    let runner = happy_runner();
    let mut cfg = config();
    cfg.remote_setup = RemoteSetup::Ensure;

    let err = TagSync::new(&runner, cfg).run().unwrap_err();
    assert!(matches!(err, SyncError::Config(_)), "got: {err}");
    assert!(runner.commands().is_empty());
}

// ---------------------------------------------------------------------------
// 3. Fail fast
// ---------------------------------------------------------------------------

#[rstest]
#[case::listing(format!("git ls-remote --tags {ORIGIN}"), 1)]
#[case::resolve(format!("git ls-remote {ORIGIN} refs/tags/v2.0"), 2)]
#[case::branch("git rev-parse --abbrev-ref HEAD".to_string(), 3)]
#[case::fetch(format!("git fetch {ORIGIN} def456"), 4)]
#[case::merge("git merge --no-ff def456".to_string(), 5)]
#[case::push("git push mma main".to_string(), 6)]
fn failing_step_stops_the_run(#[case] failing: String, #[case] issued: usize) {
    let runner = happy_runner().fail(&failing, "fatal: simulated failure");
    let err = TagSync::new(&runner, config()).run().unwrap_err();

    match err {
        SyncError::CommandFailed { command, output } => {
            assert_eq!(command, failing);
            assert_eq!(output, "fatal: simulated failure");
        }
        other => panic!("unexpected error: {other}"),
    }
    let commands = runner.commands();
    assert_eq!(commands.len(), issued);
    assert_eq!(commands.last(), Some(&failing));
}

#[test]
fn command_failed_message_contains_command_and_output() {
    let err = SyncError::CommandFailed {
        command: "git push mma main".to_string(),
        output: "rejected".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("git push mma main"));
    assert!(msg.contains("rejected"));
}

// ---------------------------------------------------------------------------
// 4. Dry run and remote setup
// ---------------------------------------------------------------------------

#[test]
fn dry_run_stops_before_mutating_commands() {
    let runner = happy_runner();
    let report = TagSync::new(&runner, config())
        .dry_run(true)
        .run()
        .expect("dry run");

    assert!(report.dry_run);
    assert_eq!(report.tag.as_str(), "v2.0");
    assert_eq!(runner.commands().len(), 3);
    assert!(runner
        .commands()
        .iter()
        .all(|c| !c.contains("fetch") && !c.contains("merge") && !c.contains("push")));
}

#[test]
fn ensure_policy_adds_remote_ignoring_failure() {
    let runner = happy_runner().fail(
        "git remote add mma https://example.com/mma.git",
        "error: remote mma already exists.",
    );
    let mut cfg = config();
    cfg.remote_setup = RemoteSetup::Ensure;
    cfg.destination_url = Some(RepoUrl::from("https://example.com/mma.git"));

    TagSync::new(&runner, cfg).run().expect("run");

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 7);
    assert_eq!(
        calls[3],
        ("git remote add mma https://example.com/mma.git".to_string(), true)
    );
    assert_eq!(calls[4].0, format!("git fetch {ORIGIN} def456"));
}

#[test]
fn precondition_policy_never_touches_remotes() {
    let runner = happy_runner();
    TagSync::new(&runner, config()).run().expect("run");
    assert!(runner.commands().iter().all(|c| !c.contains("remote add")));
}

#[test]
fn remote_tags_lists_every_tag_with_hash() {
    let runner = happy_runner();
    let tags = TagSync::new(&runner, config()).remote_tags().expect("tags");
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].tag.as_str(), "v1.0");
    assert_eq!(tags[1].commit.as_str(), "def456");
}
