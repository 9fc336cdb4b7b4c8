use composeman::infra::discovery::COMPOSE_FILE_NAME;
use composeman::test_support::MockComposeRuntime;
use composeman::{ActionService, ComposeDiscovery, UpdateOutcome};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn fixture(temp: &TempDir) -> (Arc<ActionService>, Arc<MockComposeRuntime>, PathBuf) {
    let base = temp.path().join("docker");
    let dir = base.join("shop");
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join(COMPOSE_FILE_NAME);
    fs::write(
        &file,
        "services:\n  web:\n    image: nginx:1.25\n    ports:\n      - \"8080:80\"\n",
    )
    .unwrap();

    let mock = Arc::new(MockComposeRuntime::new());
    let actions = Arc::new(ActionService::new(
        Arc::new(ComposeDiscovery::new(vec![base])),
        mock.clone(),
    ));

    (actions, mock, file)
}

#[test]
fn update_round_trip_touches_only_the_image() {
    let temp = TempDir::new().unwrap();
    let (actions, _mock, file) = fixture(&temp);

    let outcome = actions.update_version("docker/shop", "web", "1.26");

    assert_eq!(outcome, UpdateOutcome::Updated);
    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("nginx:1.26"));
    assert!(!content.contains("nginx:1.25"));
    // Unrelated fields survive the rewrite
    assert!(content.contains("8080:80"));
}

#[test]
fn update_sequences_pull_then_up() {
    let temp = TempDir::new().unwrap();
    let (actions, mock, _file) = fixture(&temp);

    actions.update_version("docker/shop", "web", "1.26");

    assert_eq!(
        mock.get_commands(),
        vec!["pull:web".to_string(), "up:web".to_string()]
    );
}

#[test]
fn concurrent_updates_serialize_on_the_key_lock() {
    let temp = TempDir::new().unwrap();
    let (actions, _mock, file) = fixture(&temp);

    let mut handles = Vec::new();
    for version in ["9.1", "9.2"] {
        let actions = actions.clone();
        handles.push(thread::spawn(move || {
            actions.update_version("docker/shop", "web", version)
        }));
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap(), UpdateOutcome::Updated);
    }

    // The file holds exactly one of the requested versions, never a merge
    let content = fs::read_to_string(&file).unwrap();
    let first = content.contains("nginx:9.1");
    let second = content.contains("nginx:9.2");
    assert!(first ^ second, "conteúdo inesperado: {content}");
}

#[test]
fn failed_update_leaves_the_file_alone() {
    let temp = TempDir::new().unwrap();
    let (actions, mock, file) = fixture(&temp);

    assert_eq!(
        actions.update_version("docker/shop", "ghost", "2.0"),
        UpdateOutcome::Failed
    );
    assert_eq!(
        actions.update_version("docker/gone", "web", "2.0"),
        UpdateOutcome::Failed
    );

    assert!(fs::read_to_string(&file).unwrap().contains("nginx:1.25"));
    assert!(mock.get_commands().is_empty());
}

#[test]
fn lifecycle_actions_report_by_exit_code() {
    let temp = TempDir::new().unwrap();
    let (actions, mock, _file) = fixture(&temp);

    assert!(actions.start("docker/shop", "web"));
    assert!(actions.stop("docker/shop", "web"));
    assert!(actions.restart("docker/shop", "web"));

    mock.set_fail_on("restart");
    assert!(!actions.restart("docker/shop", "web"));

    assert_eq!(
        mock.get_commands(),
        vec![
            "up:web".to_string(),
            "stop:web".to_string(),
            "restart:web".to_string(),
            "restart:web".to_string(),
        ]
    );
}
