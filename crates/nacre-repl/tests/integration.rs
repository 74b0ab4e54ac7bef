//! Scripted sessions driven the way `--vfs`/`--startup` drive them:
//! bytes come off the real filesystem, then replay through the shell.

use std::fs;
use std::io::Write;

use nacre_kernel::{ScriptRunner, ScriptStatus, Shell, ShellConfig};

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn shell_with_tree(dir: &tempfile::TempDir) -> Shell {
    let csv = "path,type,encoding,content\n\
               srv/www/index.html,file,,<html/>\n\
               srv/www/logs,dir,,\n";
    let path = write_fixture(dir, "tree.csv", csv);
    let bytes = fs::read(&path).unwrap();

    let mut shell = Shell::new(ShellConfig::default());
    shell.load_vfs(bytes, "tree.csv").unwrap();
    shell
}

async fn replay(shell: &mut Shell, source: &str) -> (Vec<String>, ScriptStatus) {
    let mut runner = ScriptRunner::new(source);
    let mut lines: Vec<String> = Vec::new();
    loop {
        let status = runner
            .step(shell, &mut |line: &str| lines.push(line.to_string()))
            .await;
        if status != ScriptStatus::Running {
            return (lines, status);
        }
    }
}

fn outputs_contain(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line == needle)
}

#[tokio::test]
async fn scripted_session_walks_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with_tree(&dir);
    let script = write_fixture(
        &dir,
        "startup.sh",
        "cd /srv/www\nls\ntouch logs/access.log\nls logs\n",
    );

    let source = fs::read_to_string(&script).unwrap();
    let (lines, status) = replay(&mut shell, &source).await;

    assert_eq!(status, ScriptStatus::Completed);
    assert!(outputs_contain(&lines, "index.html  logs"));
    assert!(outputs_contain(&lines, "access.log"));
    assert!(outputs_contain(&lines, "[script] completed without errors"));
}

#[tokio::test]
async fn failing_line_is_attributed() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with_tree(&dir);

    let source = "# header\ncd /srv\ncd missing\nls\n";
    let (lines, status) = replay(&mut shell, &source).await;

    assert_eq!(status, ScriptStatus::Stopped { line: 3 });
    assert!(outputs_contain(&lines, "cd: missing: No such file or directory"));
    assert!(outputs_contain(&lines, "[script] stopped at line 3"));
    // Nothing after the failure ran.
    assert!(!outputs_contain(&lines, "[user@host]$ ls"));
}

#[tokio::test]
async fn exit_stops_replay_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with_tree(&dir);

    let source = "pwd\nexit\npwd\n";
    let (lines, status) = replay(&mut shell, &source).await;

    assert_eq!(status, ScriptStatus::Terminated);
    assert!(outputs_contain(&lines, "bye"));
    assert!(!outputs_contain(&lines, "[script] completed without errors"));
    assert_eq!(lines.iter().filter(|l| *l == "/").count(), 1);
}

#[tokio::test]
async fn prompt_echo_carries_the_identity() {
    let mut shell = Shell::new(ShellConfig {
        user: "alice".to_string(),
        host: "box".to_string(),
    });
    let (lines, status) = replay(&mut shell, "pwd\n").await;

    assert_eq!(status, ScriptStatus::Completed);
    assert!(outputs_contain(&lines, "[alice@box]$ pwd"));
}

#[tokio::test]
async fn bad_tree_file_leaves_shell_usable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "bad.csv", "path,type,encoding,content\nx,gizmo,,\n");

    let mut shell = Shell::new(ShellConfig::default());
    let err = shell
        .load_vfs(fs::read(&path).unwrap(), "bad.csv")
        .unwrap_err();
    assert!(err.to_string().contains("row 1"));

    let (lines, status) = replay(&mut shell, "pwd\nvfs-info\n").await;
    assert_eq!(status, ScriptStatus::Completed);
    assert!(outputs_contain(&lines, "/"));
    assert!(outputs_contain(&lines, "VFS not loaded."));
}
