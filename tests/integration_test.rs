//! Integration tests for sessionizer
//!
//! The filesystem side runs against isolated temp home directories; the tmux
//! side runs against a recording runner so no real tmux server is touched.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use sessionizer::error::{Error, Result, ScanError, TmuxError};
use sessionizer::project::build_entries;
use sessionizer::scan::collect_directories;
use sessionizer::tmux::{finish, AttachStrategy, Outcome, SessionLauncher, TmuxRunner};
use sessionizer::tui::{FilterListState, PickerState};

/// Runner that records every invocation and models tmux's session table
#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<Vec<OsString>>>,
    sessions: Mutex<HashSet<String>>,
    fail_attach: bool,
}

impl RecordingRunner {
    fn failing_attach() -> Self {
        Self {
            fail_attach: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Vec<OsString>> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, args: &[&OsStr]) {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_os_string()).collect());
    }

    fn display(args: &[&OsStr]) -> String {
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
        format!("tmux {}", args.join(" "))
    }
}

#[async_trait]
impl TmuxRunner for RecordingRunner {
    async fn run_detached(&self, args: &[&OsStr]) -> Result<()> {
        self.record(args);

        if args.first() == Some(&OsStr::new("new-session")) {
            let name = args[3].to_string_lossy().into_owned();
            if !self.sessions.lock().unwrap().insert(name.clone()) {
                return Err(TmuxError::CommandFailed {
                    command: Self::display(args),
                    stderr: format!("duplicate session: {name}"),
                }
                .into());
            }
        }
        Ok(())
    }

    async fn run_attached(&self, args: &[&OsStr]) -> Result<()> {
        self.record(args);

        if self.fail_attach {
            return Err(TmuxError::CommandFailed {
                command: Self::display(args),
                stderr: "no server running".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Build a fake home with `dev` and `.config` roots
fn create_test_home() -> TempDir {
    let home = TempDir::new().unwrap();
    let root = home.path();

    std::fs::create_dir_all(root.join("dev/sessionizer")).unwrap();
    std::fs::create_dir_all(root.join("dev/my.project:v2")).unwrap();
    std::fs::write(root.join("dev/README.md"), "# notes\n").unwrap();
    std::fs::create_dir_all(root.join(".config/nvim")).unwrap();
    std::fs::create_dir_all(root.join(".config/tmux")).unwrap();
    std::fs::write(root.join(".config/user-dirs.dirs"), "").unwrap();

    home
}

fn strings(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

#[tokio::test]
async fn test_collect_one_entry_per_subdirectory() {
    let home = create_test_home();

    let listings = collect_directories(home.path(), &["dev", ".config"])
        .await
        .unwrap();
    let entries = build_entries(home.path(), &listings);

    let summary: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.description(), e.title()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("dev", "my.project:v2"),
            ("dev", "sessionizer"),
            (".config", "nvim"),
            (".config", "tmux"),
        ]
    );

    for entry in &entries {
        assert!(entry.path().is_dir());
        assert!(entry.path().starts_with(home.path()));
    }
    assert_eq!(
        entries[1].path(),
        home.path().join("dev").join("sessionizer")
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinked_directory_is_not_offered() {
    let home = create_test_home();
    std::os::unix::fs::symlink(
        home.path().join(".config/nvim"),
        home.path().join("dev/nvim-link"),
    )
    .unwrap();

    let listings = collect_directories(home.path(), &["dev"]).await.unwrap();
    let entries = build_entries(home.path(), &listings);

    let titles: Vec<&str> = entries.iter().map(|e| e.title()).collect();
    assert_eq!(titles, vec!["my.project:v2", "sessionizer"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_directory_launches_at_real_path() {
    use std::os::unix::ffi::OsStrExt;

    let home = TempDir::new().unwrap();
    let raw = OsStr::from_bytes(b"proj\xffname");
    std::fs::create_dir_all(home.path().join("dev").join(raw)).unwrap();

    let listings = collect_directories(home.path(), &["dev"]).await.unwrap();
    let entries = build_entries(home.path(), &listings);

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert!(entry.path().is_dir());
    assert_eq!(entry.title(), "proj\u{fffd}name");

    let launcher = SessionLauncher::new(RecordingRunner::default());
    launcher
        .launch(entry.path(), AttachStrategy::Attach)
        .await
        .unwrap();

    let calls = launcher.runner().calls();
    assert_eq!(calls[0][5], entry.path().as_os_str());
    assert_eq!(calls[0][3], "proj\u{fffd}name");
}

#[tokio::test]
async fn test_missing_root_is_fatal() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("dev/sessionizer")).unwrap();

    let err = collect_directories(home.path(), &["dev", ".config"])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Scan(ScanError::ReadDir { .. })));
}

#[tokio::test]
async fn test_root_that_is_a_file_is_fatal() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("dev"), "not a directory").unwrap();

    let result = collect_directories(home.path(), &["dev"]).await;
    assert!(matches!(result, Err(Error::Scan(ScanError::ReadDir { .. }))));
}

#[tokio::test]
async fn test_filtering_is_non_destructive() {
    let home = create_test_home();
    let listings = collect_directories(home.path(), &["dev", ".config"])
        .await
        .unwrap();
    let entries = build_entries(home.path(), &listings);

    let mut state = FilterListState::new(&entries);
    let original: Vec<usize> = state.matches().iter().map(|m| m.index).collect();

    state.start_filtering();
    state.set_filter("tm", &entries);
    assert_eq!(state.matches().len(), 1);
    state.set_filter("tm", &entries);
    assert_eq!(state.matches().len(), 1);

    state.clear_filter(&entries);
    let restored: Vec<usize> = state.matches().iter().map(|m| m.index).collect();
    assert_eq!(restored, original);
    assert_eq!(restored.len(), entries.len());
}

#[tokio::test]
async fn test_attach_outside_tmux() {
    let launcher = SessionLauncher::new(RecordingRunner::default());
    let path = Path::new("/home/me/dev/my.project:v2");

    launcher.launch(path, AttachStrategy::Attach).await.unwrap();

    assert_eq!(
        launcher.runner().calls(),
        vec![
            strings(&[
                "new-session",
                "-d",
                "-s",
                "my_project_v2",
                "-c",
                "/home/me/dev/my.project:v2"
            ]),
            strings(&["attach-session", "-t", "my_project_v2"]),
        ]
    );
}

#[tokio::test]
async fn test_switch_client_inside_tmux() {
    let launcher = SessionLauncher::new(RecordingRunner::default());
    let strategy = AttachStrategy::from_marker(Some("/tmp/tmux-1000/default,4242,0".as_ref()));

    launcher
        .launch(Path::new("/home/me/.config/nvim"), strategy)
        .await
        .unwrap();

    let calls = launcher.runner().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], strings(&["switch-client", "-t", "nvim"]));
}

#[tokio::test]
async fn test_empty_marker_attaches() {
    let launcher = SessionLauncher::new(RecordingRunner::default());
    let strategy = AttachStrategy::from_marker(Some("".as_ref()));

    launcher
        .launch(Path::new("/home/me/dev/site"), strategy)
        .await
        .unwrap();

    let calls = launcher.runner().calls();
    assert_eq!(calls[1], strings(&["attach-session", "-t", "site"]));
}

#[tokio::test]
async fn test_create_or_reuse_is_idempotent() {
    let launcher = SessionLauncher::new(RecordingRunner::default());
    let path = Path::new("/home/me/dev/sessionizer");

    launcher.launch(path, AttachStrategy::Attach).await.unwrap();
    launcher.launch(path, AttachStrategy::Attach).await.unwrap();

    let calls = launcher.runner().calls();
    let attaches = calls
        .iter()
        .filter(|c| c[0] == "attach-session")
        .count();
    assert_eq!(calls.len(), 4);
    assert_eq!(attaches, 2);
}

#[tokio::test]
async fn test_attach_failure_is_fatal() {
    let launcher = SessionLauncher::new(RecordingRunner::failing_attach());

    let result = finish(
        Some(Path::new("/home/me/dev/sessionizer")),
        &launcher,
        AttachStrategy::Attach,
    )
    .await;

    assert!(matches!(result, Err(Error::Tmux(_))));
}

#[tokio::test]
async fn test_cancel_never_invokes_tmux() {
    let launcher = SessionLauncher::new(RecordingRunner::default());

    let outcome = finish(None, &launcher, AttachStrategy::Attach).await.unwrap();

    assert_eq!(outcome, Outcome::NoSelection);
    assert_eq!(outcome.exit_code(), 10);
    assert!(launcher.runner().calls().is_empty());
}

#[tokio::test]
async fn test_picker_choice_flows_into_launcher() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    let home = create_test_home();
    let listings = collect_directories(home.path(), &["dev", ".config"])
        .await
        .unwrap();
    let entries = build_entries(home.path(), &listings);

    let mut state = PickerState::new(entries);
    for c in "nvim".chars() {
        state.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let selection: Option<PathBuf> = state.into_choice();

    let launcher = SessionLauncher::new(RecordingRunner::default());
    let outcome = finish(selection.as_deref(), &launcher, AttachStrategy::Attach)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Attached);
    assert_eq!(outcome.exit_code(), 0);

    let calls = launcher.runner().calls();
    let expected_dir = home.path().join(".config").join("nvim");
    assert_eq!(calls[0][5], expected_dir.into_os_string());
    assert_eq!(calls[1], strings(&["attach-session", "-t", "nvim"]));
}
