use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Return a `Command` for the `skillconv` binary built by Cargo.
fn skillconv() -> Command {
    cargo_bin_cmd!("skillconv")
}

/// Path to a fixture skill directory under `tests/fixtures`.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Create a temp dir with a named subdirectory containing a SKILL.md.
/// Returns the parent TempDir (for lifetime) and the path to the subdirectory.
fn make_skill_dir(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
    let parent = tempdir().unwrap();
    let dir = parent.path().join(name);
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("SKILL.md"), content).unwrap();
    (parent, dir)
}

// ── Global flags ────────────────────────────────────────────────────

#[test]
fn help_flag() {
    skillconv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LangChain tool wrappers"));
}

#[test]
fn version_flag() {
    skillconv()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn about_flag() {
    skillconv()
        .arg("--about")
        .assert()
        .success()
        .stdout(predicate::str::contains("skillconv:"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("licence:"));
}

#[test]
fn no_args_shows_usage() {
    skillconv()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ── convert ─────────────────────────────────────────────────────────

#[test]
fn convert_weather_to_stdout() {
    skillconv()
        .args(["convert", fixture("weather").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("from langchain.agents import tool"))
        .stdout(predicate::str::contains("def weather_curl() -> str:"))
        .stdout(predicate::str::contains("tools = [weather_curl]"))
        .stdout(predicate::str::contains(
            "can get current weather and forecasts (no api key required).",
        ));
}

#[test]
fn convert_github_resolves_distinct_tools() {
    let output = skillconv()
        .args(["convert", fixture("github").to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("@tool").count(), 5);
    assert!(stdout.contains(
        "tools = [github_pr_checks, github_run_list, github_run_view, \
         github_api_repos_owner_repo_pulls_55, github_issue_list]"
    ));
    assert!(stdout.contains("You have access to multiple tools"));
}

#[test]
fn convert_accepts_skill_md_path() {
    let skill_md = fixture("weather").join("SKILL.md");
    skillconv()
        .args(["convert", skill_md.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("def weather_curl"));
}

#[test]
fn convert_parameterized_command() {
    let (_parent, dir) = make_skill_dir(
        "weather",
        "---\nname: weather\ndescription: Get current weather\n---\n\
         ```bash\ncurl -s \"wttr.in/{location}?format=3\"\n```\n",
    );
    skillconv()
        .args(["convert", dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "def weather_curl(location: str) -> str:",
        ))
        .stdout(predicate::str::contains(
            r#"command = "curl -s \"wttr.in/" + location + "?format=3\"""#,
        ));
}

#[test]
fn convert_missing_skill_md() {
    let parent = tempdir().unwrap();
    skillconv()
        .args(["convert", parent.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no SKILL.md found"));
}

#[test]
fn convert_unreadable_file() {
    skillconv()
        .args(["convert", "/nonexistent/skill/SKILL.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn convert_writes_output_file_once() {
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("agents/weather_agent.py");
    let skill = fixture("weather");

    skillconv()
        .args(["convert", skill.to_str().unwrap(), "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated"));
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("def weather_curl() -> str:"));

    skillconv()
        .args(["convert", skill.to_str().unwrap(), "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Unchanged"));
}

#[test]
fn convert_check_reports_stale_output() {
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("weather_agent.py");
    fs::write(&out, "# stale\n").unwrap();

    skillconv()
        .args(["convert", fixture("weather").to_str().unwrap(), "--check", "--output"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Would update"))
        .stderr(predicate::str::contains("-# stale"))
        .stderr(predicate::str::contains("+@tool"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "# stale\n");
}

#[test]
fn convert_check_passes_when_current() {
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("weather_agent.py");
    let skill = fixture("weather");

    skillconv()
        .args(["convert", skill.to_str().unwrap(), "--output"])
        .arg(&out)
        .assert()
        .success();
    skillconv()
        .args(["convert", skill.to_str().unwrap(), "--check", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("ok"));
}

#[test]
fn convert_check_requires_output() {
    skillconv()
        .args(["convert", fixture("weather").to_str().unwrap(), "--check"])
        .assert()
        .failure();
}

#[test]
fn convert_max_tools_flag() {
    let output = skillconv()
        .args(["convert", fixture("github").to_str().unwrap(), "--max-tools", "2"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("@tool").count(), 2);
    assert!(stdout.contains("tools = [github_pr_checks, github_run_list]"));
}

#[test]
fn convert_dedup_flag() {
    let output = skillconv()
        .args([
            "convert",
            fixture("weather").to_str().unwrap(),
            "--dedup",
            "exact-command",
        ])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("tools = [weather_curl, weather_curl_2]"));
}

#[test]
fn convert_quote_arguments_flag() {
    let (_parent, dir) =
        make_skill_dir("files", "---\nname: files\n---\n```bash\nls -la {path}\n```\n");
    skillconv()
        .args(["convert", dir.to_str().unwrap(), "--quote-arguments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("import shlex"))
        .stdout(predicate::str::contains("shlex.quote(path)"));
}

#[test]
fn convert_with_config_file() {
    let (_parent, dir) = make_skill_dir(
        "k8s",
        "---\nname: k8s\ndescription: Kubernetes helper\n---\n\
         ```sh\nkubectl get pods\nkubectl describe pod <pod>\n```\n",
    );
    let cfg = dir.join("skillconv.yml");
    fs::write(
        &cfg,
        "shell_tags: [sh]\ncommand_shapes:\n  kubectl: subcommand\nexample_query: List my pods\n",
    )
    .unwrap();
    skillconv()
        .args(["convert", dir.to_str().unwrap(), "--config"])
        .arg(&cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains("tools = [k8s_get_pods, k8s_describe_pod]"))
        .stdout(predicate::str::contains("def k8s_describe_pod(pod: str) -> str:"))
        .stdout(predicate::str::contains(r#"{"input": "List my pods"}"#));
}

#[test]
fn convert_invalid_config_file() {
    let (_parent, dir) = make_skill_dir("x", "---\nname: x\n---\n");
    let cfg = dir.join("bad.yml");
    fs::write(&cfg, "no_such_option: true\n").unwrap();
    skillconv()
        .args(["convert", dir.to_str().unwrap(), "--config"])
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn convert_document_without_commands() {
    let (_parent, dir) = make_skill_dir("empty", "Just some prose.\n");
    skillconv()
        .args(["convert", dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("tools = []"))
        .stdout(predicate::str::contains("@tool").not());
}

// ── inspect ─────────────────────────────────────────────────────────

#[test]
fn inspect_text() {
    skillconv()
        .args(["inspect", fixture("github").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("name:        github"))
        .stdout(predicate::str::contains("primary tool: gh"))
        .stdout(predicate::str::contains("commands (6):"))
        .stdout(predicate::str::contains("tools (5):"));
}

#[test]
fn inspect_json() {
    let output = skillconv()
        .args(["inspect", fixture("weather").to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["skill_name"], "weather");
    assert_eq!(v["metadata"]["homepage"], "https://wttr.in/:help");
    assert_eq!(v["pattern"]["primary_tool"], "curl");
    assert_eq!(v["commands"].as_array().unwrap().len(), 2);
    assert_eq!(v["tools"][0]["name"], "weather_curl");
}

#[test]
fn inspect_missing_skill() {
    let parent = tempdir().unwrap();
    skillconv()
        .args(["inspect", parent.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("skillconv inspect"));
}

// ── params ──────────────────────────────────────────────────────────

#[test]
fn params_text_both_syntaxes() {
    skillconv()
        .args(["params", "a/{x}/<y>/{x}"])
        .assert()
        .success()
        .stdout("x: string (required)\ny: string (required)\n");
}

#[test]
fn params_json() {
    let output = skillconv()
        .args(["params", "curl -s \"wttr.in/{location}?format=3\"", "--format", "json"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v[0]["name"], "location");
    assert_eq!(v[0]["type"], "string");
    assert_eq!(v[0]["required"], true);
}

#[test]
fn params_none() {
    skillconv()
        .args(["params", "gh pr list"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no parameters"));
}
