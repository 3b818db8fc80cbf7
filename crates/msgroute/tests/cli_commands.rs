#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const MANIFEST: &str = r#"{
    "handlers": [
        {
            "name": "connections",
            "messages": [
                "https://didcomm.org/connections/1.0/invitation",
                "https://didcomm.org/connections/1.0/request"
            ]
        },
        { "name": "basic", "messages": ["https://didcomm.org/basicmessage/1.0/message"] },
        {
            "name": "issue-v1",
            "messages": [
                "https://didcomm.org/issue-credential/1.0/offer-credential",
                "https://didcomm.org/issue-credential/1.1/request-credential"
            ]
        },
        {
            "name": "issue-shadow",
            "messages": ["https://didcomm.org/issue-credential/1.0/offer-credential"]
        }
    ]
}"#;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "msgroute-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("handlers.json");
    std::fs::write(&path, contents).expect("manifest should be writable");
    path
}

fn msgroute(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_msgroute"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("msgroute should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be json")
}

#[test]
fn parse_prints_descriptor_json() {
    let output = msgroute(&[
        "--format",
        "json",
        "parse",
        "https://didcomm.org/issue-credential/1.1/offer-credential",
    ]);

    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["doc_uri"], "https://didcomm.org");
    assert_eq!(payload["protocol_name"], "issue-credential");
    assert_eq!(payload["protocol_minor_version"], 1);
    assert_eq!(payload["message_name"], "offer-credential");
}

#[test]
fn parse_malformed_returns_data_invalid() {
    let output = msgroute(&["--format", "json", "parse", "not-a-valid-uri"]);

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed type URI"));
}

#[test]
fn protocols_lists_deduplicated_uris_in_order() {
    let dir = unique_temp_dir("protocols");
    let manifest = write_manifest(&dir, MANIFEST);

    let output = msgroute(&[
        "--format",
        "raw",
        "protocols",
        "--manifest",
        manifest.to_str().expect("utf-8 path"),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "https://didcomm.org/connections/1.0",
            "https://didcomm.org/basicmessage/1.0",
            "https://didcomm.org/issue-credential/1.0",
            "https://didcomm.org/issue-credential/1.1",
        ]
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn resolve_prefers_first_registered_handler() {
    let dir = unique_temp_dir("resolve");
    let manifest = write_manifest(&dir, MANIFEST);

    let output = msgroute(&[
        "--format",
        "json",
        "resolve",
        "--manifest",
        manifest.to_str().expect("utf-8 path"),
        "https://didcomm.org/issue-credential/1.0/offer-credential",
    ]);

    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["handler"], "issue-v1");
    assert_eq!(payload["shape"], "issue-v1/offer-credential");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn resolve_unsupported_returns_not_found() {
    let dir = unique_temp_dir("resolve-missing");
    let manifest = write_manifest(&dir, MANIFEST);

    let output = msgroute(&[
        "resolve",
        "--manifest",
        manifest.to_str().expect("utf-8 path"),
        "https://didcomm.org/basicmessage/1.1/message",
    ]);

    assert_eq!(output.status.code(), Some(4));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn discover_filters_by_peer_protocols() {
    let dir = unique_temp_dir("discover-peer");
    let manifest = write_manifest(&dir, MANIFEST);

    let output = msgroute(&[
        "--format",
        "json",
        "discover",
        "--manifest",
        manifest.to_str().expect("utf-8 path"),
        "--peer",
        "https://didcomm.org/basicmessage/1.2",
        "--peer",
        "https://didcomm.org/issue-credential/1.1",
    ]);

    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["count"], 1);
    assert_eq!(
        payload["protocols"][0],
        "https://didcomm.org/issue-credential/1.1"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn discover_wildcard_query() {
    let dir = unique_temp_dir("discover-query");
    let manifest = write_manifest(&dir, MANIFEST);

    let output = msgroute(&[
        "--format",
        "json",
        "discover",
        "--manifest",
        manifest.to_str().expect("utf-8 path"),
        "--query",
        "https://didcomm.org/issue-credential/*",
    ]);

    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["count"], 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_manifest_returns_data_invalid() {
    let dir = unique_temp_dir("bad-manifest");
    let manifest = write_manifest(
        &dir,
        r#"{ "handlers": [ { "name": "bad", "messages": ["nope"] } ] }"#,
    );

    let output = msgroute(&[
        "protocols",
        "--manifest",
        manifest.to_str().expect("utf-8 path"),
    ]);

    assert_eq!(output.status.code(), Some(60));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_reports_package_version() {
    let output = msgroute(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn extended_version_reports_enabled_features() {
    let output = msgroute(&["version", "--extended"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: msgroute"));
    assert!(stdout.contains("features: cli=true"));
}
