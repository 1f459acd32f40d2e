use assert_cmd::Command;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;

const URL: &str = "https://api.apiverve.com/v1/mcp";

/// Config file locations used by one test run
struct TestPaths {
    claude: ChildPath,
    vscode: ChildPath,
    cursor: ChildPath,
    app_config: ChildPath,
}

fn setup_paths(temp_dir: &assert_fs::TempDir) -> TestPaths {
    TestPaths {
        claude: temp_dir.child("Claude/claude_desktop_config.json"),
        vscode: temp_dir.child("Code/User/settings.json"),
        cursor: temp_dir.child("Cursor/User/settings.json"),
        app_config: temp_dir.child("apiverve-mcp/config.toml"),
    }
}

/// Binary invocation isolated from the real user's config files
fn command(temp_dir: &assert_fs::TempDir, paths: &TestPaths) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_apiverve-mcp"));
    cmd.env("HOME", temp_dir.path())
        .env("APPDATA", temp_dir.path())
        .env("APIVERVE_MCP_CONFIG", paths.app_config.path())
        .env("APIVERVE_MCP_CLAUDE_CONFIG_PATH", paths.claude.path())
        .env("APIVERVE_MCP_VSCODE_CONFIG_PATH", paths.vscode.path())
        .env("APIVERVE_MCP_CURSOR_CONFIG_PATH", paths.cursor.path())
        .env_remove("APIVERVE_MCP_TARGET")
        .env_remove("RUST_LOG");
    cmd
}

fn write_file(path: &ChildPath, content: &str) {
    if let Some(parent) = path.path().parent() {
        fs::create_dir_all(parent).unwrap();
    }
    path.write_str(content).unwrap();
}

fn read_json(path: &ChildPath) -> Value {
    serde_json::from_str(&fs::read_to_string(path.path()).unwrap()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help() {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_apiverve-mcp"));
        cmd.arg("--help").assert().success().stdout(
            predicate::str::contains("adds the APIVerve MCP server")
                .and(predicate::str::contains("claude"))
                .and(predicate::str::contains("vscode"))
                .and(predicate::str::contains("cursor")),
        );
    }

    #[test]
    fn test_cli_version() {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_apiverve-mcp"));
        cmd.arg("--version").assert().success().stdout(predicate::str::contains("apiverve-mcp"));
    }

    #[test]
    fn test_default_target_is_claude() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);

        command(&temp_dir, &paths).assert().success().stdout(
            predicate::str::contains("Claude Desktop config path")
                .and(predicate::str::contains("APIVerve MCP server added to Claude Desktop config"))
                .and(predicate::str::contains("Next steps")),
        );

        assert_eq!(
            read_json(&paths.claude),
            json!({ "mcpServers": { "apiverve": { "type": "sse", "url": URL } } })
        );
        paths.vscode.assert(predicate::path::missing());
        paths.cursor.assert(predicate::path::missing());
    }

    #[test]
    fn test_all_configures_every_client() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        write_file(&paths.vscode, r#"{"editor.fontSize": 13}"#);

        command(&temp_dir, &paths).arg("all").assert().success();

        assert_eq!(read_json(&paths.claude)["mcpServers"]["apiverve"]["url"], json!(URL));
        assert_eq!(read_json(&paths.cursor)["mcpServers"]["apiverve"]["url"], json!(URL));
        let vscode = read_json(&paths.vscode);
        assert_eq!(vscode["editor.fontSize"], json!(13));
        assert_eq!(
            vscode["mcp"]["servers"]["APIVerve"],
            json!({ "type": "sse", "url": URL, "headers": {} })
        );
    }

    #[test]
    fn test_failure_exits_one_and_continues_with_other_clients() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        // A regular file where the VS Code User directory should be
        write_file(&temp_dir.child("Code/User"), "blocking file");

        command(&temp_dir, &paths).arg("all").assert().code(1).stderr(
            predicate::str::contains("Failed to configure VS Code")
                .and(predicate::str::contains("Manual configuration"))
                .and(predicate::str::contains("\"apiverve\""))
                .and(predicate::str::contains(URL)),
        );

        assert_eq!(read_json(&paths.claude)["mcpServers"]["apiverve"]["type"], json!("sse"));
        assert_eq!(read_json(&paths.cursor)["mcpServers"]["apiverve"]["type"], json!("sse"));
    }

    #[test]
    fn test_malformed_config_is_replaced_with_warning() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        write_file(&paths.cursor, "{not json");

        command(&temp_dir, &paths)
            .arg("cursor")
            .assert()
            .success()
            .stderr(predicate::str::contains("Could not parse existing config"));

        assert_eq!(
            read_json(&paths.cursor),
            json!({ "mcpServers": { "apiverve": { "type": "sse", "url": URL } } })
        );
    }

    #[test]
    fn test_rerun_reports_already_present() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);

        command(&temp_dir, &paths).arg("vscode").assert().success();
        let first = fs::read_to_string(paths.vscode.path()).unwrap();

        command(&temp_dir, &paths)
            .arg("vscode")
            .assert()
            .success()
            .stdout(predicate::str::contains("already present in VS Code config"));
        assert_eq!(fs::read_to_string(paths.vscode.path()).unwrap(), first);
    }

    #[test]
    fn test_dry_run_prints_without_writing() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);

        command(&temp_dir, &paths).args(["all", "--dry-run"]).assert().success().stdout(
            predicate::str::contains("Dry run")
                .and(predicate::str::contains("\"APIVerve\""))
                .and(predicate::str::contains("no files were changed")),
        );

        paths.claude.assert(predicate::path::missing());
        paths.vscode.assert(predicate::path::missing());
        paths.cursor.assert(predicate::path::missing());
    }

    #[test]
    fn test_backup_flag_copies_existing_config() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        write_file(&paths.claude, r#"{"before": true}"#);

        command(&temp_dir, &paths)
            .args(["claude", "--backup"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Backup created"));

        let backups: Vec<_> = fs::read_dir(temp_dir.child("Claude").path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".backup."))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), r#"{"before": true}"#);
    }

    #[test]
    fn test_app_config_default_target() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        write_file(&paths.app_config, "[default]\ntarget = \"all\"\n");

        command(&temp_dir, &paths).assert().success();

        paths.claude.assert(predicate::path::exists());
        paths.vscode.assert(predicate::path::exists());
        paths.cursor.assert(predicate::path::exists());
    }

    #[test]
    fn test_cli_target_overrides_app_config() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        write_file(&paths.app_config, "[default]\ntarget = \"all\"\n");

        command(&temp_dir, &paths).arg("cursor").assert().success();

        paths.cursor.assert(predicate::path::exists());
        paths.claude.assert(predicate::path::missing());
    }

    #[test]
    fn test_target_env_var_overrides_app_config() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        write_file(&paths.app_config, "[default]\ntarget = \"all\"\n");

        command(&temp_dir, &paths).env("APIVERVE_MCP_TARGET", "vscode").assert().success();

        paths.vscode.assert(predicate::path::exists());
        paths.claude.assert(predicate::path::missing());
        paths.cursor.assert(predicate::path::missing());
    }

    #[test]
    fn test_target_argument_overrides_env_var() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);

        command(&temp_dir, &paths)
            .env("APIVERVE_MCP_TARGET", "vscode")
            .arg("cursor")
            .assert()
            .success();

        paths.cursor.assert(predicate::path::exists());
        paths.vscode.assert(predicate::path::missing());
    }

    #[test]
    fn test_invalid_app_config_fails() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);
        write_file(&paths.app_config, "[default\n");

        command(&temp_dir, &paths)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load app configuration"));

        paths.claude.assert(predicate::path::missing());
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let paths = setup_paths(&temp_dir);

        command(&temp_dir, &paths)
            .arg("zed")
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value 'zed'"));
    }
}
