// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fs;

use assert_cmd::Command;

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = dir.path().join("artifacts/contracts/Simple7702Account.sol");
    fs::create_dir_all(&artifacts).unwrap();
    fs::write(
        artifacts.join("Simple7702Account.json"),
        r#"{
            "contractName": "Simple7702Account",
            "abi": [],
            "bytecode": "0x600a600c600039600a6000f3602a60005260206000f3",
            "deployedBytecode": "0x602a60005260206000f3",
            "linkReferences": {}
        }"#,
    )
    .unwrap();
    fs::write(dir.path().join("aa-deploy.toml"), "[paths]\n").unwrap();
    dir
}

#[test]
fn prints_deterministic_address() {
    let dir = project();
    let output = Command::cargo_bin("aa-deploy")
        .unwrap()
        .current_dir(dir.path())
        .args(["address", "Simple7702Account"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap().to_lowercase();
    assert!(
        stdout.contains("0x94c193a5c76faec23853b7924159e2f8a6a73b64"),
        "{stdout}"
    );
}

#[test]
fn missing_artifact_fails() {
    let dir = project();
    Command::cargo_bin("aa-deploy")
        .unwrap()
        .current_dir(dir.path())
        .args(["address", "EntryPoint"])
        .assert()
        .failure();
}

#[test]
fn unknown_tag_fails_before_connecting() {
    let dir = project();
    let output = Command::cargo_bin("aa-deploy")
        .unwrap()
        .current_dir(dir.path())
        .args(["deploy", "--tags", "paymaster", "--endpoint", "http://127.0.0.1:1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no deploy scripts match"), "{stderr}");
}

#[test]
fn explicit_config_must_exist() {
    let dir = project();
    Command::cargo_bin("aa-deploy")
        .unwrap()
        .current_dir(dir.path())
        .args(["address", "Simple7702Account", "--config", "missing.toml"])
        .assert()
        .failure();
}
