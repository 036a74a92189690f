//! Integration tests: end-to-end fixture comparison through the library and
//! the `amdil-cmp` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

use amdil_core::FixtureName;
use amdil_golden::{GoldenConfig, GoldenRunner, InProcessDisassembler, Outcome};

fn bundled(file: &str) -> PathBuf {
    GoldenConfig::bundled_resource_dir().join(file)
}

/// Copies the bundled `simple` fixture into a fresh resource directory.
struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("res")).expect("mkdir res");
        std::fs::create_dir(dir.path().join("work")).expect("mkdir work");
        for file in ["il_simple.bin", "il_simple.txt"] {
            std::fs::copy(bundled(file), dir.path().join("res").join(file)).expect("copy fixture");
        }
        Self { dir }
    }

    fn res(&self) -> PathBuf {
        self.dir.path().join("res")
    }

    fn work(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    fn scratch(&self) -> PathBuf {
        self.work().join("il_simple_out.txt")
    }

    fn config(&self) -> GoldenConfig {
        GoldenConfig::new(self.res()).with_work_dir(self.work())
    }

    /// Flips one bit of one byte of the reference listing.
    fn corrupt_reference(&self) {
        let path = self.res().join("il_simple.txt");
        let mut bytes = std::fs::read(&path).expect("read reference");
        bytes[0] ^= 0x20;
        std::fs::write(&path, bytes).expect("write reference");
    }

    fn amdil_cmp(&self, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_amdil-cmp"))
            .arg("--res-dir")
            .arg(self.res())
            .arg("--work-dir")
            .arg(self.work())
            .args(extra)
            .env_remove("AMDIL_DIS")
            .env_remove("AMDIL_LAUNCHER")
            .env_remove("AMDIL_RES_DIR")
            .env("AMDIL_LOG_LEVEL", "none")
            .output()
            .expect("spawn amdil-cmp")
    }
}

fn simple() -> FixtureName {
    FixtureName::new("simple").expect("valid name")
}

fn assert_mismatch_line(stdout: &[u8]) {
    let text = std::str::from_utf8(stdout).expect("stdout is UTF-8");
    let line = text.strip_suffix('\n').expect("line ends with newline");
    let rest = line.strip_prefix("got ").expect("line starts with 'got '");
    let (got, expected) = rest.split_once(", expected ").expect("line has ', expected '");
    for digest in [got, expected] {
        assert_eq!(digest.len(), 64, "digest must be 64 hex chars: {digest}");
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
    assert_ne!(got, expected);
}

#[tokio::test]
async fn bundled_fixture_matches_with_in_process_backend() {
    let sandbox = Sandbox::new();
    let runner = GoldenRunner::new(InProcessDisassembler, sandbox.config());

    let record = runner.compare(&simple()).await.expect("compare");
    assert_eq!(record.outcome, Outcome::Match);
    assert!(!sandbox.scratch().exists(), "scratch must be removed after a match");
}

#[tokio::test]
async fn corrupted_reference_is_a_mismatch() {
    let sandbox = Sandbox::new();
    sandbox.corrupt_reference();
    let runner = GoldenRunner::new(InProcessDisassembler, sandbox.config());

    let record = runner.compare(&simple()).await.expect("compare");
    assert_eq!(record.outcome, Outcome::Mismatch);
    assert_eq!(
        std::fs::read(sandbox.scratch()).expect("scratch kept"),
        std::fs::read(bundled("il_simple.txt")).expect("bundled reference"),
        "scratch holds the real listing"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn external_tool_receives_input_and_output_paths() {
    use amdil_golden::ProcessDisassembler;

    // `cp` satisfies the `(input, output)` contract: the "listing" is a copy
    // of the input, so a reference equal to the input matches.
    let sandbox = Sandbox::new();
    std::fs::copy(sandbox.res().join("il_simple.bin"), sandbox.res().join("il_simple.txt"))
        .expect("make reference equal to input");
    let runner = GoldenRunner::new(ProcessDisassembler::new(PathBuf::from("cp")), sandbox.config());

    let record = runner.compare(&simple()).await.expect("compare");
    assert_eq!(record.outcome, Outcome::Match);
    assert!(!sandbox.scratch().exists());
}

#[test]
fn cli_exits_zero_and_removes_scratch_on_match() {
    let sandbox = Sandbox::new();
    let out = sandbox.amdil_cmp(&["simple"]);

    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty(), "nothing is printed on a match");
    assert!(!sandbox.scratch().exists());
}

#[test]
fn cli_exits_one_and_keeps_scratch_on_mismatch() {
    let sandbox = Sandbox::new();
    sandbox.corrupt_reference();
    let out = sandbox.amdil_cmp(&["simple"]);

    assert_eq!(out.status.code(), Some(1));
    assert_mismatch_line(&out.stdout);
    assert!(sandbox.scratch().exists(), "scratch must be left for inspection");
}

#[test]
fn cli_mismatch_is_deterministic() {
    let sandbox = Sandbox::new();
    sandbox.corrupt_reference();
    let first = sandbox.amdil_cmp(&["simple"]);
    let second = sandbox.amdil_cmp(&["simple"]);

    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn cli_missing_fixture_is_infrastructure_failure() {
    let sandbox = Sandbox::new();
    let out = sandbox.amdil_cmp(&["absent"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_rejects_path_like_names() {
    let sandbox = Sandbox::new();
    let out = sandbox.amdil_cmp(&["../simple"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn cli_missing_tool_is_infrastructure_failure() {
    let sandbox = Sandbox::new();
    let out = sandbox.amdil_cmp(&["--tool", "/nonexistent/amdil-dis", "simple"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!sandbox.scratch().exists());
}

#[cfg(unix)]
#[test]
fn cli_runs_external_tool() {
    let sandbox = Sandbox::new();
    std::fs::copy(sandbox.res().join("il_simple.bin"), sandbox.res().join("il_simple.txt"))
        .expect("make reference equal to input");
    let out = sandbox.amdil_cmp(&["--tool", "cp", "simple"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn cli_writes_json_report() {
    let sandbox = Sandbox::new();
    let report_path = sandbox.dir.path().join("report.json");
    let report_arg = report_path.to_str().expect("UTF-8 temp path");
    let out = sandbox.amdil_cmp(&["--report", report_arg, "simple", "absent"]);
    assert_eq!(out.status.code(), Some(2), "a missing fixture dominates the exit status");

    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&report_path).expect("report written")).expect("valid JSON");
    assert_eq!(value["records"][0]["name"], "simple");
    assert_eq!(value["records"][0]["outcome"], "match");
    assert_eq!(value["failures"][0]["name"], "absent");
}

#[test]
fn bundled_reference_is_listing_of_bundled_input() {
    let mut listing = Vec::new();
    let code = std::fs::read(bundled("il_simple.bin")).expect("read input");
    amdil_disasm::disassemble(&mut listing, &code).expect("disassemble");
    assert_eq!(listing, std::fs::read(bundled("il_simple.txt")).expect("read reference"));
}
