use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ICICI_STATEMENT: &str = "ICICI BANK\n\
    Credit Card Statement\n\
    Name: JOHN SMITH\n\
    Card ending in 1234\n\
    Statement Period: 01-Jan to 31-Jan\n\
    Due Date: 15-Feb\n\
    Total Amount Due: 5,432.10\n";

const SPARSE_SBI_STATEMENT: &str = "State Bank of India card account summary\n\
    Name: ASHA RAO\n\
    Thank you for banking with us.\n";

const UNKNOWN_STATEMENT: &str = "Generic Credit Union monthly statement\n\
    Name: JANE DOE\n\
    Total Due: 10.00\n";

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, "{}").unwrap();
        Self { dir, config }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cardstmt").unwrap();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}

#[test]
fn test_banks_lists_default_catalog() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("HDFC"))
        .stdout(predicate::str::contains("AMERICAN EXPRESS"));
}

#[test]
fn test_banks_json() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["banks", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 5);
    assert_eq!(json["banks"][0], "HDFC");
}

#[test]
fn test_process_text_file_to_json() {
    let ws = Workspace::new();
    let input = ws.write("icici.txt", ICICI_STATEMENT);

    let output = ws.cmd().arg("process").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["issuer"], "ICICI");
    assert_eq!(json["cardholder_name"], "JOHN SMITH");
    assert_eq!(json["card_suffix"], "1234");
    assert_eq!(json["billing_cycle"], "01-Jan to 31-Jan");
    assert_eq!(json["due_date"], "15-Feb");
    assert_eq!(json["amount_due"], "₹5,432.10");
    assert_eq!(json["quality"], "complete");
}

#[test]
fn test_process_writes_output_file() {
    let ws = Workspace::new();
    let input = ws.write("icici.txt", ICICI_STATEMENT);
    let output_path = ws.path().join("out.csv");

    ws.cmd()
        .arg("process")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output_path)
        .assert()
        .success();

    let csv = fs::read_to_string(&output_path).unwrap();
    assert!(csv.starts_with("issuer,cardholder_name,card_suffix"));
    assert!(csv.contains("ICICI,JOHN SMITH,1234"));
}

#[test]
fn test_process_partial_warns() {
    let ws = Workspace::new();
    let input = ws.write("sbi.txt", SPARSE_SBI_STATEMENT);

    ws.cmd()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quality\":\"partial\""))
        .stderr(predicate::str::contains("Some fields could not be extracted"));
}

#[test]
fn test_process_short_text_fails() {
    let ws = Workspace::new();
    let input = ws.write("short.txt", "HDFC BANK");

    ws.cmd()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("too short"));
}

#[test]
fn test_process_unknown_bank() {
    let ws = Workspace::new();
    let input = ws.write("other.txt", UNKNOWN_STATEMENT);

    ws.cmd()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bank not recognized"));

    ws.cmd()
        .arg("process")
        .arg(&input)
        .arg("--allow-unknown")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"issuer\":\"UNKNOWN\""));
}

#[test]
fn test_process_unsupported_extension() {
    let ws = Workspace::new();
    let input = ws.write("statement.docx", ICICI_STATEMENT);

    ws.cmd()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_process_invalid_pdf() {
    let ws = Workspace::new();
    let input = ws.write("broken.pdf", "this is not a pdf document");

    ws.cmd().arg("process").arg(&input).assert().failure();
}

#[test]
fn test_inspect_lists_rules() {
    let ws = Workspace::new();
    let input = ws.write("icici.txt", ICICI_STATEMENT);

    ws.cmd()
        .arg("inspect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("ICICI"))
        .stdout(predicate::str::contains("statement_period"))
        .stdout(predicate::str::contains("total_amount_due"));
}

#[test]
fn test_batch_with_summary() {
    let ws = Workspace::new();
    ws.write("a.txt", ICICI_STATEMENT);
    ws.write("b.txt", SPARSE_SBI_STATEMENT);
    ws.write("c.txt", "too short");
    let out_dir = ws.path().join("out");
    let pattern = ws.path().join("*.txt");

    ws.cmd()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"));

    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());
    assert!(!out_dir.join("c.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("filename,status,issuer"));
    assert!(lines[1].starts_with("a.txt,success,ICICI"));
    assert!(lines[2].starts_with("b.txt,partial,SBI"));
    assert!(lines[3].starts_with("c.txt,error"));
}

#[test]
fn test_batch_keeps_outputs_with_shared_stem() {
    let ws = Workspace::new();
    ws.write("a.txt", ICICI_STATEMENT);
    ws.write("a.text", SPARSE_SBI_STATEMENT);
    let out_dir = ws.path().join("out");

    ws.cmd()
        .arg("batch")
        .arg(ws.path().join("a.*").to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .success();

    // "a.text" sorts before "a.txt" and claims the plain name
    let first = fs::read_to_string(out_dir.join("a.json")).unwrap();
    let second = fs::read_to_string(out_dir.join("a-txt.json")).unwrap();
    assert!(first.contains("\"issuer\":\"SBI\""));
    assert!(second.contains("\"issuer\":\"ICICI\""));
}

#[test]
fn test_batch_stops_on_error() {
    let ws = Workspace::new();
    ws.write("a.txt", "too short");

    ws.cmd()
        .arg("batch")
        .arg(ws.path().join("*.txt").to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_init_get_set() {
    let ws = Workspace::new();
    let config = ws.path().join("nested").join("cardstmt.json");

    Command::cargo_bin("cardstmt")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    Command::cargo_bin("cardstmt")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.partial_threshold", "5"])
        .assert()
        .success();

    Command::cargo_bin("cardstmt")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.partial_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));

    Command::cargo_bin("cardstmt")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.no_such_key", "1"])
        .assert()
        .failure();
}
