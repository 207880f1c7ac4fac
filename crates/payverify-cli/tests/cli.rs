use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TELEBIRR_RECEIPT: &str = r#"<html><body>
<table>
  <tr><td>የከፋይ ስም/Payer Name</td><td>Abebe Kebede</td></tr>
  <tr><td>የክፍያው ሁኔታ/transaction status</td><td>Completed</td></tr>
  <tr><td>የገንዘብ ተቀባይ ስም/Credited Party name</td><td>Selam Shop</td></tr>
</table>
<table>
  <tr><td>የክፍያ ቁጥር/Invoice No.</td><td>የክፍያ ቀን/Payment date</td><td>የተከፈለው መጠን/Settled Amount</td></tr>
  <tr><td>CHQ0FJ403O</td><td>06-11-2025 11:40:12</td><td>500.00 Birr</td></tr>
</table>
</body></html>"#;

fn payverify(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("payverify").unwrap();
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_receipt(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let tmp = TempDir::new().unwrap();
    payverify(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("payverify"));
}

// --- Extract ---

#[test]
fn extract_telebirr_json() {
    let tmp = TempDir::new().unwrap();
    let receipt = write_receipt(tmp.path(), "receipt.html", TELEBIRR_RECEIPT);

    payverify(tmp.path())
        .arg("extract")
        .arg(&receipt)
        .args(["-p", "TeleBirr"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""invoiceNo": "CHQ0FJ403O""#))
        .stdout(predicate::str::contains(r#""payerName": "Abebe Kebede""#));
}

#[test]
fn extract_with_parsed_date() {
    let tmp = TempDir::new().unwrap();
    let receipt = write_receipt(tmp.path(), "receipt.html", TELEBIRR_RECEIPT);

    payverify(tmp.path())
        .arg("extract")
        .arg(&receipt)
        .arg("--parse-date")
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-11-06T11:40:12+00:00"));
}

#[test]
fn extract_csv_to_file() {
    let tmp = TempDir::new().unwrap();
    let receipt = write_receipt(tmp.path(), "receipt.html", TELEBIRR_RECEIPT);
    let output = tmp.path().join("out.csv");

    payverify(tmp.path())
        .arg("extract")
        .arg(&receipt)
        .args(["-f", "csv", "-o"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("totalPaidAmount,"));
    assert!(csv.contains("CHQ0FJ403O"));
}

#[test]
fn extract_unreadable_receipt_gives_empty_fields() {
    let tmp = TempDir::new().unwrap();
    let receipt = write_receipt(tmp.path(), "broken.pdf", "%PDF-1.4 not really");

    payverify(tmp.path())
        .arg("extract")
        .arg(&receipt)
        .args(["-p", "CBE"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""invoiceNo": """#))
        .stdout(predicate::str::contains(r#""paymentDate": null"#));
}

#[test]
fn extract_missing_file() {
    let tmp = TempDir::new().unwrap();
    payverify(tmp.path())
        .args(["extract", "nope.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

// --- Batch ---

#[test]
fn batch_writes_outputs_and_summary() {
    let tmp = TempDir::new().unwrap();
    let receipts = tmp.path().join("receipts");
    fs::create_dir(&receipts).unwrap();
    write_receipt(&receipts, "a.html", TELEBIRR_RECEIPT);
    write_receipt(&receipts, "b.html", "<p>Receipt not found</p>");
    write_receipt(&receipts, "notes.txt", "ignored");
    let out = tmp.path().join("out");

    payverify(tmp.path())
        .arg("batch")
        .arg(receipts.join("*").to_string_lossy().as_ref())
        .arg("-o")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 receipts"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("notes.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.html,success,CHQ0FJ403O"));
    assert!(summary.contains("b.html,empty"));
}

#[test]
fn batch_no_matches() {
    let tmp = TempDir::new().unwrap();
    payverify(tmp.path())
        .args(["batch", "*.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

// --- Config ---

#[test]
fn config_init_and_add_provider() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    let config_arg = config.to_string_lossy().into_owned();

    payverify(tmp.path())
        .args(["config", "init", "-c", &config_arg])
        .assert()
        .success();
    assert!(config.exists());

    payverify(tmp.path())
        .args(["config", "init", "-c", &config_arg])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    payverify(tmp.path())
        .args(["-c", &config_arg, "config", "add-provider", "CBE", "https://apps.cbe.com.et:100/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered CBE"));

    payverify(tmp.path())
        .args(["-c", &config_arg, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://apps.cbe.com.et:100/"))
        .stdout(predicate::str::contains(r#""timeout_secs": 10"#));
}

#[test]
fn config_path_reports_missing_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("absent.json");

    payverify(tmp.path())
        .args(["config", "path", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}

// --- Verify ---

#[test]
fn verify_unregistered_provider() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    fs::write(&config, r#"{"providers": []}"#).unwrap();

    payverify(tmp.path())
        .arg("-c")
        .arg(&config)
        .args(["verify", "--provider", "CBE", "--receipt-id", "FT1", "--user-id", "u1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provider not registered: CBE"));
}

#[test]
fn verify_malformed_config() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    fs::write(&config, "{ providers: ").unwrap();

    payverify(tmp.path())
        .arg("-c")
        .arg(&config)
        .args(["verify", "--provider", "CBE", "--receipt-id", "FT1", "--user-id", "u1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}
