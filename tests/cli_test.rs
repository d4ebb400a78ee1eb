use assert_cmd::Command;
use ghrest_test_utils::{MockGitHub, TestHome, fixtures};
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// `ghrest` isolated from the developer's token, home and config
fn ghrest(home: &TestHome) -> Command {
  let mut cmd = Command::cargo_bin("ghrest").unwrap();
  cmd
    .env("HOME", home.home_dir())
    .env_remove("GITHUB_TOKEN")
    .env_remove("GH_TOKEN")
    .env_remove("RUST_LOG")
    .arg("--colors")
    .arg("never")
    .arg("--config-dir")
    .arg(home.config_dir());
  cmd
}

fn ghrest_against(home: &TestHome, server: &MockGitHub) -> Command {
  let mut cmd = ghrest(home);
  cmd.arg("--base-url").arg(server.uri()).arg("--token").arg("test_token");
  cmd
}

fn mount_user(server: &MockGitHub) {
  server.mount(
    Mock::given(method("GET"))
      .and(path("/user"))
      .and(header("authorization", "Bearer test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::user("octocat", 1))),
  );
}

#[test]
fn test_whoami_object_format() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  mount_user(&server);

  ghrest_against(&home, &server)
    .arg("whoami")
    .assert()
    .success()
    .stdout(predicate::str::contains("octocat").and(predicate::str::contains("#1")));
}

#[test]
fn test_whoami_json_format_is_parseable() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  mount_user(&server);

  let output = ghrest_against(&home, &server)
    .args(["--format", "json", "whoami"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let value: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(value, fixtures::user("octocat", 1));
}

#[test]
fn test_whoami_text_format_prints_body_verbatim() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  server.mount(
    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"login":"octocat","id":1}"#)),
  );

  ghrest_against(&home, &server)
    .args(["-f", "text", "whoami"])
    .assert()
    .success()
    .stdout(r#"{"login":"octocat","id":1}"#.to_string() + "\n");
}

#[test]
fn test_token_from_netrc() {
  let home = TestHome::new();
  home.write_netrc("machine api.github.com\n  login octocat\n  password netrc_token\n");
  let server = MockGitHub::start();
  server.mount(
    Mock::given(method("GET"))
      .and(path("/user"))
      .and(header("authorization", "Bearer netrc_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::user("octocat", 1))),
  );

  ghrest(&home)
    .arg("--base-url")
    .arg(server.uri())
    .arg("whoami")
    .assert()
    .success()
    .stdout(predicate::str::contains("octocat"));
}

#[test]
fn test_runs_list_filters() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  server.mount(
    Mock::given(method("GET"))
      .and(path("/repos/octocat/Hello-World/actions/runs"))
      .and(query_param("branch", "main"))
      .and(query_param("per_page", "5"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "total_count": 12,
        "workflow_runs": [fixtures::workflow_run(30433642, "completed")]
      }))),
  );

  ghrest_against(&home, &server)
    .args(["runs", "-R", "octocat/Hello-World", "list", "--branch", "main", "-n", "5"])
    .assert()
    .success()
    .stdout(
      predicate::str::contains("#30433642")
        .and(predicate::str::contains("Success"))
        .and(predicate::str::contains("Showing 1 of 12 runs")),
    );
}

#[test]
fn test_runs_cancel_reports_success() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  server.mount(
    Mock::given(method("POST"))
      .and(path("/repos/octocat/Hello-World/actions/runs/42/cancel"))
      .respond_with(ResponseTemplate::new(202).set_body_json(json!({}))),
  );

  ghrest_against(&home, &server)
    .args(["runs", "--repo", "https://github.com/octocat/Hello-World", "cancel", "42"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Cancellation requested for run 42 (HTTP 202)"));
}

#[test]
fn test_runs_cancel_not_found_exits_non_zero() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  server.mount(
    Mock::given(method("POST"))
      .and(path("/repos/octocat/Hello-World/actions/runs/42/cancel"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"}))),
  );

  ghrest_against(&home, &server)
    .args(["runs", "-R", "octocat/Hello-World", "cancel", "42"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found (HTTP 404): Not Found"));
}

#[test]
fn test_unauthorized_read_fails() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  server.mount(
    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"}))),
  );

  ghrest_against(&home, &server)
    .arg("whoami")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Bad credentials"));
}

#[test]
fn test_invalid_repo_is_rejected_by_parser() {
  let home = TestHome::new();

  ghrest(&home)
    .args(["branches", "-R", "not-a-repo", "list"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not-a-repo"));
}

#[test]
fn test_zero_timeout_is_rejected_by_parser() {
  let home = TestHome::new();

  ghrest(&home)
    .args(["--timeout", "0", "whoami"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn test_config_init_then_show() {
  let home = TestHome::new();

  ghrest(&home)
    .args(["config", "init"])
    .assert()
    .success()
    .stdout(predicate::str::contains("config.toml"));
  assert!(home.config_dir().join("config.toml").exists());

  ghrest(&home)
    .args(["config", "init"])
    .assert()
    .success()
    .stdout(predicate::str::contains("already exists"));

  ghrest(&home)
    .args(["--token", "ghp_secret1234", "config", "show"])
    .assert()
    .success()
    .stdout(
      predicate::str::contains("base_url = \"https://api.github.com\"")
        .and(predicate::str::contains("****1234"))
        .and(predicate::str::contains("ghp_secret").not()),
    );
}

#[test]
fn test_config_file_base_url_is_used() {
  let home = TestHome::new();
  let server = MockGitHub::start();
  mount_user(&server);
  home.write_settings(&format!("base_url = \"{}\"\ntoken = \"test_token\"\n", server.uri()));

  ghrest(&home)
    .arg("whoami")
    .assert()
    .success()
    .stdout(predicate::str::contains("octocat"));
}

#[test]
fn test_version_command() {
  let home = TestHome::new();

  ghrest(&home)
    .arg("version")
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("ghrest {}", env!("CARGO_PKG_VERSION"))));
}
