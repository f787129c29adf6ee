//! Test environment builder for isolated Redeploy testing.
//!
//! Every `TestEnv` owns a temp directory holding:
//! - `bin/` with shell-script stand-ins for `git`, `go` and `systemctl`
//! - `state/` that the scripts read (heads, failure markers) and append
//!   their invocations to (`calls.log`)
//! - `src/app/` as the working copy, `work/` as the deploy target and
//!   `home/` as HOME
//!
//! The scripts call coreutils by absolute path so they keep working when
//! PATH is narrowed to the fake bin dir.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running the redeploy binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

const FAKE_GIT: &str = r#"#!/bin/sh
echo "git $*" >> "$FAKE_STATE/calls.log"
case "$1" in
  rev-parse)
    if [ "$2" = "HEAD" ]; then
      if [ ! -f "$FAKE_STATE/local_head" ]; then
        echo "fatal: not a git repository" >&2
        exit 128
      fi
      /bin/cat "$FAKE_STATE/local_head"
    else
      if [ ! -f "$FAKE_STATE/remote_head" ]; then
        echo "fatal: ambiguous argument '$2': unknown revision" >&2
        exit 128
      fi
      /bin/cat "$FAKE_STATE/remote_head"
    fi
    ;;
  fetch)
    if [ -f "$FAKE_STATE/fetch_slow" ]; then
      : > "$FAKE_STATE/fetch_started"
      /bin/sleep 10
    fi
    ;;
  pull)
    if [ "$2" = "--ff-only" ] && [ -f "$FAKE_STATE/ff_fail" ]; then
      echo "fatal: Not possible to fast-forward, aborting." >&2
      exit 128
    fi
    if [ -f "$FAKE_STATE/pull_fail" ]; then
      echo "CONFLICT (content): Merge conflict in main.go" >&2
      exit 1
    fi
    /bin/cp "$FAKE_STATE/remote_head" "$FAKE_STATE/local_head"
    ;;
  clone)
    for dest; do :; done
    /bin/mkdir -p "$dest/.git"
    /bin/cp "$FAKE_STATE/remote_head" "$FAKE_STATE/local_head"
    ;;
  *)
    echo "unexpected git invocation: $*" >&2
    exit 2
    ;;
esac
"#;

const FAKE_GO: &str = r#"#!/bin/sh
echo "go $*" >> "$FAKE_STATE/calls.log"
echo "$PWD" > "$FAKE_STATE/go_cwd"
if [ -f "$FAKE_STATE/go_fail" ]; then
  echo "./main.go:3:1: syntax error: non-declaration statement outside function body" >&2
  exit 2
fi
if [ -f "$FAKE_STATE/no_output" ]; then
  exit 0
fi
printf 'binary built from %s\n' "$(/bin/cat "$FAKE_STATE/local_head")" > "$3"
"#;

const FAKE_SYSTEMCTL: &str = r#"#!/bin/sh
echo "systemctl $*" >> "$FAKE_STATE/calls.log"
if [ "$1" = "--user" ]; then
  shift
fi
case "$1" in
  restart)
    if [ -f "$FAKE_STATE/restart_fail" ]; then
      echo "Job for $2 failed because the control process exited with error code." >&2
      exit 5
    fi
    ;;
  status)
    echo "* $2 - fake unit"
    echo "   Active: active (running)"
    ;;
esac
"#;

/// Isolated environment with fake external tools first on PATH
pub struct TestEnv {
    pub root: TempDir,
    /// Only the fake bin dir is on PATH (no system directories)
    isolated_path: bool,
}

impl TestEnv {
    /// Environment with an existing working copy and all tools installed
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let env = Self {
            root,
            isolated_path: false,
        };
        fs::create_dir_all(env.bin_dir()).expect("create bin dir");
        fs::create_dir_all(env.state_dir()).expect("create state dir");
        fs::create_dir_all(env.home_dir()).expect("create home dir");
        fs::create_dir_all(env.repo().join(".git")).expect("create working copy");
        env.install_tool("git", FAKE_GIT);
        env.install_tool("go", FAKE_GO);
        env.install_tool("systemctl", FAKE_SYSTEMCTL);
        env
    }

    /// Remove the working copy so the run has to clone
    pub fn without_repo(self) -> Self {
        fs::remove_dir_all(self.repo()).expect("remove working copy");
        self
    }

    /// Uninstall a fake tool and hide the system PATH so it cannot resolve
    pub fn without_tool(mut self, tool: &str) -> Self {
        fs::remove_file(self.bin_dir().join(tool)).expect("remove tool");
        self.isolated_path = true;
        self
    }

    /// Set the local HEAD and the remote branch head the fake git reports
    pub fn with_heads(self, local: &str, remote: &str) -> Self {
        self.write_state("local_head", local);
        self.write_state("remote_head", remote);
        self
    }

    /// Only the remote branch exists (clone scenario)
    pub fn with_remote_head(self, remote: &str) -> Self {
        self.write_state("remote_head", remote);
        self
    }

    /// Create a marker file that switches a fake tool into a failure mode
    pub fn with_marker(self, name: &str) -> Self {
        self.write_state(name, "");
        self
    }

    /// Pre-existing deployed binary
    pub fn with_deployed(self, content: &str) -> Self {
        fs::create_dir_all(self.work_dir()).expect("create work dir");
        fs::write(self.deployed(), content).expect("write deployed binary");
        self
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.path().join("state")
    }

    pub fn home_dir(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn repo(&self) -> PathBuf {
        self.root.path().join("src").join("app")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    /// Final path of the deployed binary
    pub fn deployed(&self) -> PathBuf {
        self.work_dir().join("app")
    }

    /// Write a config file under the temp root and return its path
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.root.path().join("redeploy.toml");
        fs::write(&path, content).expect("write config");
        path
    }

    /// Invocations recorded by the fake tools, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.state_dir().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Number of recorded invocations starting with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn read_state(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.state_dir().join(name)).ok()
    }

    /// Run with the required flags plus `extra`
    pub fn run(&self, extra: &[&str]) -> TestResult {
        self.run_with_env(extra, &[])
    }

    /// Run with the required flags plus `extra` and extra env vars
    pub fn run_with_env(&self, extra: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let repo = self.repo();
        let work = self.work_dir();
        let mut args: Vec<&str> = vec![
            "--repo",
            repo.to_str().expect("utf-8 temp path"),
            "--service",
            "app.service",
            "--binary-name",
            "app",
            "--work-dir",
            work.to_str().expect("utf-8 temp path"),
        ];
        args.extend_from_slice(extra);
        self.run_raw_with_env(&args, env_vars)
    }

    /// Run with exactly `args`
    pub fn run_raw(&self, args: &[&str]) -> TestResult {
        self.run_raw_with_env(args, &[])
    }

    /// Start the binary with the required flags and return without waiting
    pub fn spawn(&self) -> Child {
        let repo = self.repo();
        let work = self.work_dir();
        let args = [
            "--repo",
            repo.to_str().expect("utf-8 temp path"),
            "--service",
            "app.service",
            "--binary-name",
            "app",
            "--work-dir",
            work.to_str().expect("utf-8 temp path"),
        ];
        self.command(&args, &[])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn redeploy")
    }

    fn run_raw_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let output = self
            .command(args, env_vars)
            .output()
            .expect("Failed to execute redeploy");
        output_to_result(output)
    }

    fn command(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let path = if self.isolated_path {
            self.bin_dir().display().to_string()
        } else {
            format!("{}:/usr/bin:/bin", self.bin_dir().display())
        };

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_redeploy"));
        cmd.current_dir(self.root.path())
            .args(args)
            .env("PATH", path)
            .env("HOME", self.home_dir())
            .env("XDG_CONFIG_HOME", self.home_dir().join(".config"))
            .env("FAKE_STATE", self.state_dir())
            .env_remove("RUST_LOG");
        for var in [
            "REDEPLOY_URL",
            "REDEPLOY_BRANCH",
            "REDEPLOY_REMOTE",
            "REDEPLOY_WORK_DIR",
            "REDEPLOY_LDFLAGS",
            "REDEPLOY_USER_SERVICE",
            "REDEPLOY_USE_SUDO",
            "REDEPLOY_ALWAYS_BUILD",
        ] {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    fn install_tool(&self, name: &str, script: &str) {
        let path = self.bin_dir().join(name);
        fs::write(&path, script).expect("write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
    }

    fn write_state(&self, name: &str, content: &str) {
        fs::write(self.state_dir().join(name), content).expect("write state");
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// True if `path` has any execute bit set
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
