#![cfg(feature = "cli")]

use std::process::{Command, Output};

const MOZILLA_URI: &str = "d1010c55036d6f7a696c6c612e6f7267";

fn ndefprims(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ndefprims"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("ndefprims should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

#[test]
fn decode_outputs_record_json() {
    let output = ndefprims(&["--format", "json", "decode", MOZILLA_URI]);
    let json = stdout_json(&output);

    assert_eq!(json["message_size"], 16);
    let records = json["records"].as_array().expect("records should be an array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["tnf"], "well-known");
    assert_eq!(records[0]["type"], "U");
    assert_eq!(records[0]["content"], "url");
    assert_eq!(records[0]["summary"], "http://mozilla.org");
}

#[test]
fn encode_uri_matches_reference_bytes() {
    let output = ndefprims(&["--format", "json", "encode", "--uri", "http://mozilla.org"]);
    let json = stdout_json(&output);

    assert_eq!(json["hex"], MOZILLA_URI);
    assert_eq!(json["size"], 16);
}

#[test]
fn encode_raw_writes_message_bytes() {
    let output = ndefprims(&["--format", "raw", "encode", "--text", "hi", "--lang", "en"]);
    assert!(output.status.success());
    assert_eq!(
        output.stdout,
        vec![0xd1, 0x01, 0x05, b'T', 0x02, b'e', b'n', b'h', b'i']
    );
}

#[test]
fn handover_request_decodes_nested_carrier() {
    let output = ndefprims(&[
        "--format",
        "json",
        "handover",
        "request",
        "01:02:03:04:05:06",
        "--cps",
        "2",
        "--collision",
        "4660",
    ]);
    let encoded = stdout_json(&output);
    let hex = encoded["hex"].as_str().expect("hex should be a string");

    let output = ndefprims(&["--format", "json", "decode", "--nested", hex]);
    let json = stdout_json(&output);
    let records = json["records"].as_array().expect("records should be an array");

    assert_eq!(records[0]["type"], "Hr");
    assert_eq!(
        records[0]["summary"],
        "request cr=0x1234 bt=01:02:03:04:05:06 cps=activating"
    );
    assert_eq!(records[1]["depth"], 1);
    assert_eq!(records[1]["type"], "cr");
    assert_eq!(records[2]["type"], "ac");
    let oob = records
        .iter()
        .find(|r| r["type"] == "application/vnd.bluetooth.ep.oob")
        .expect("bluetooth oob record should be present");
    assert_eq!(oob["payload_hex"], "0800060504030201");
    assert_eq!(oob["id"], "0");
}

#[test]
fn handover_select_has_no_collision_record() {
    let output = ndefprims(&["--format", "json", "handover", "select", "aa:bb:cc:dd:ee:ff"]);
    let encoded = stdout_json(&output);
    let hex = encoded["hex"].as_str().expect("hex should be a string");

    let output = ndefprims(&["--format", "json", "decode", "--nested", hex]);
    let json = stdout_json(&output);
    let records = json["records"].as_array().expect("records should be an array");

    assert_eq!(records[0]["type"], "Hs");
    assert_eq!(records[0]["summary"], "select bt=AA:BB:CC:DD:EE:FF cps=active");
    assert!(records.iter().all(|r| r["type"] != "cr"));
}

#[test]
fn invalid_mac_exits_with_usage() {
    let output = ndefprims(&["handover", "select", "not-a-mac"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn malformed_message_exits_with_data_invalid() {
    // Payload length 12 with only 3 payload bytes present.
    let output = ndefprims(&["decode", "d1010c55036d6f"]);
    assert_eq!(output.status.code(), Some(60));

    // Chunked record.
    let output = ndefprims(&["decode", "b1010155"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn version_reports_package_version() {
    let output = ndefprims(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("ndefprims {}", env!("CARGO_PKG_VERSION"))
    );
}
