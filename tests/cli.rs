//! End-to-end runs of the `screencat` binary against a temporary catalog.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::{TempDir, tempdir};

const CATALOG: &str = r#"[
	{ "id": "c1", "name": "Fruits", "screens": ["Alpha", "Beta", "Gamma"] },
	{ "id": "c2", "name": "Tools", "screens": ["Hammer", "Saw"] }
]"#;

fn fixture() -> TempDir {
	let dir = tempdir().unwrap();
	fs::write(dir.path().join("catalog.json"), CATALOG).unwrap();
	dir
}

fn screencat(dir: &Path) -> Command {
	let mut command = Command::new(env!("CARGO_BIN_EXE_screencat"));
	command
		.current_dir(dir)
		.env("SCREENCAT_CONFIG_DIR", dir.join("config"))
		.env_remove("SCREENCAT_LOG")
		.arg("--catalog")
		.arg(dir.join("catalog.json"));
	command
}

fn stdout(output: &Output) -> String {
	assert!(
		output.status.success(),
		"screencat failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn one_shot_query_prints_highlighted_rows() {
	let dir = fixture();
	let output = screencat(dir.path()).args(["-q", "alp"]).output().unwrap();
	assert_eq!(stdout(&output), "Fruits\n  [Alp]ha\n  Beta\n  Gamma\n");
}

#[test]
fn empty_query_lists_the_catalog() {
	let dir = fixture();
	let output = screencat(dir.path()).output().unwrap();
	let text = stdout(&output);
	assert!(text.starts_with("Fruits\n  Alpha\n"));
	assert!(text.contains("Tools\n  Hammer\n  Saw"));
}

#[test]
fn json_output_is_a_list_of_items() {
	let dir = fixture();
	let output = screencat(dir.path())
		.args(["-q", "saw", "-o", "json"])
		.output()
		.unwrap();
	let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
	assert_eq!(value[0]["type"], "sectionHeader");
	assert_eq!(value[0]["value"], "Tools");
	assert_eq!(value[1]["value"], "Saw");
	assert_eq!(value[1]["categoryId"], "c2");
}

#[test]
fn invalid_threshold_is_rejected() {
	let dir = fixture();
	let output = screencat(dir.path())
		.args(["--threshold", "2"])
		.output()
		.unwrap();
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("search.threshold"));
}

#[test]
fn config_file_in_working_directory_is_applied() {
	let dir = fixture();
	fs::write(
		dir.path().join("screencat.toml"),
		"[search]\nthreshold = 2.0\n",
	)
	.unwrap();
	let output = screencat(dir.path()).output().unwrap();
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("configuration key"));

	let output = screencat(dir.path()).arg("--no-config").output().unwrap();
	assert!(output.status.success());
}

#[test]
fn interactive_mode_prints_settled_query() {
	let dir = fixture();
	let mut child = screencat(dir.path())
		.args(["-i", "--debounce-ms", "50"])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.unwrap();
	{
		let mut stdin = child.stdin.take().unwrap();
		stdin.write_all(b"s\nsa\nsaw\n").unwrap();
	}
	let output = child.wait_with_output().unwrap();
	let text = stdout(&output);
	// The initial listing is printed before any query settles.
	assert!(text.starts_with("Fruits\n  Alpha\n"));
	assert!(text.trim_end().ends_with("Tools\n  [Saw]\n  Hammer"));
}

#[test]
fn interactive_mode_names_the_query_without_matches() {
	let dir = fixture();
	let mut child = screencat(dir.path())
		.args(["-i", "--debounce-ms", "50"])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.unwrap();
	{
		let mut stdin = child.stdin.take().unwrap();
		stdin.write_all(b"zzzqx\n").unwrap();
	}
	let output = child.wait_with_output().unwrap();
	let text = stdout(&output);
	assert!(text.trim_end().ends_with("No matches for 'zzzqx'"));
}

#[test]
fn missing_catalog_is_reported() {
	let dir = tempdir().unwrap();
	let output = screencat(dir.path()).output().unwrap();
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("failed to open catalog"));
}
