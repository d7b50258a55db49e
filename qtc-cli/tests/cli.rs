//! `qtc-wallet` command-line behaviour.

use std::process::{Command, Output};

const WALLET: &str = env!("CARGO_BIN_EXE_qtc-wallet");
const HELPER: &str = env!("CARGO_BIN_EXE_qtc-provider");

const HD_MASTER: &str = "18f5f04c5e7f540db6458b4fc1fb4db8da50d0759df7b5a4fb3d737206259683\
                         afc11ebaebeea30a4345abb933f96f713d0bb8dd6a8483055a30d274b5f07902";

fn wallet(args: &[&str]) -> Output {
    wallet_with_env(args, &[])
}

fn wallet_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    Command::new(WALLET)
        .args(args)
        .current_dir(dir.path())
        .env_remove("QTC_PROVIDER")
        .env_remove("QTC_PROVIDER_BIN")
        .env_remove("QTC_ADDRESS_COUNT")
        .envs(vars.iter().copied())
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_decode() {
    let output = wallet(&["decode", "qtc1zcqum3fkmuhyjgl6f5ffmwssnr6yewgtqtv88j8"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("qtc"));
    assert!(text.contains("Witness version: 2"));
}

#[test]
fn test_decode_rejects_bad_checksum() {
    let output = wallet(&["decode", "qtc1zcqum3fkmuhyjgl6f5ffmwssnr6yewgtqtv88j9"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn test_derive_child() {
    let output = wallet(&["derive", "--master-hex", HD_MASTER, "--path", "m/44'/0'/0/5"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("qtc1zrgua8p9hl43nv7ut0xek2gmfuukkwe29a9n4y5"));
    assert!(text.contains("092468a256bc97cad48729911f6a04a37a41915c77857753dea728a86f9b79f2"));
}

#[test]
fn test_derive_rejects_hardened_index() {
    let output = wallet(&["derive", "--master-hex", HD_MASTER, "--path", "m/44'/0'/0/5'"]);
    assert!(!output.status.success());
}

#[test]
fn test_generate_from_seed_is_reproducible() {
    let seed = "42".repeat(48);
    let args = ["generate", "--method", "hd-multi", "--count", "3", "--seed-hex", &seed];

    let first = wallet(&args);
    let second = wallet(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let value: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(value["method"], "hd-multi");
    assert_eq!(value["addresses"].as_array().unwrap().len(), 3);
    assert_eq!(value["addresses"][2]["path"], "m/44'/0'/0/2");
}

#[test]
fn test_generate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.json");

    let output = wallet(&[
        "generate",
        "--method",
        "primary",
        "--output",
        path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["witness_version"], 1);
    assert!(value["addresses"][0]["address"].as_str().unwrap().starts_with("qtc1p"));
}

#[test]
fn test_generate_via_helper_matches_native() {
    let seed = "07".repeat(48);
    let native = wallet(&["generate", "--method", "pq-hd", "--seed-hex", &seed]);
    let process = wallet(&[
        "generate",
        "--method",
        "pq-hd",
        "--seed-hex",
        &seed,
        "--provider",
        "process",
        "--provider-bin",
        HELPER,
    ]);
    assert!(native.status.success());
    assert_eq!(native.stdout, process.stdout);
}

#[test]
fn test_count_on_single_address_method_fails() {
    let output = wallet(&["generate", "--method", "primary", "--count", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("single address"));
}

#[test]
fn test_process_provider_without_helper_fails() {
    let output = wallet(&["generate", "--provider", "process"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_provider_from_env() {
    let seed = "07".repeat(48);
    let args = ["generate", "--method", "pq-hd", "--seed-hex", &seed];
    let native = wallet(&args);
    let process = wallet_with_env(
        &args,
        &[("QTC_PROVIDER", "process"), ("QTC_PROVIDER_BIN", HELPER)],
    );
    assert!(process.status.success());
    assert_eq!(native.stdout, process.stdout);

    let missing_helper = wallet_with_env(&args, &[("QTC_PROVIDER", "process")]);
    assert_eq!(missing_helper.status.code(), Some(1));
}

#[test]
fn test_flag_overrides_env() {
    let output = wallet_with_env(
        &["generate", "--method", "primary", "--provider", "native"],
        &[("QTC_PROVIDER", "process")],
    );
    assert!(output.status.success());
}

#[test]
fn test_env_address_count_applies_to_multi_address_only() {
    let seed = "42".repeat(48);
    let vars = [("QTC_ADDRESS_COUNT", "2")];

    let hd = wallet_with_env(&["generate", "--method", "hd-multi", "--seed-hex", &seed], &vars);
    let value: serde_json::Value = serde_json::from_slice(&hd.stdout).unwrap();
    assert_eq!(value["addresses"].as_array().unwrap().len(), 2);

    let primary = wallet_with_env(&["generate", "--method", "primary", "--seed-hex", &seed], &vars);
    assert!(primary.status.success());
    let value: serde_json::Value = serde_json::from_slice(&primary.stdout).unwrap();
    assert_eq!(value["addresses"].as_array().unwrap().len(), 1);

    let explicit = wallet_with_env(
        &["generate", "--method", "hd-multi", "--count", "3", "--seed-hex", &seed],
        &vars,
    );
    let value: serde_json::Value = serde_json::from_slice(&explicit.stdout).unwrap();
    assert_eq!(value["addresses"].as_array().unwrap().len(), 3);
}

#[test]
fn test_invalid_env_values_are_usage_errors() {
    let bad_provider = wallet_with_env(&["generate"], &[("QTC_PROVIDER", "hsm")]);
    assert_eq!(bad_provider.status.code(), Some(2));

    let bad_count = wallet_with_env(&["generate"], &[("QTC_ADDRESS_COUNT", "many")]);
    assert_eq!(bad_count.status.code(), Some(2));
}

#[test]
fn test_dotenv_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "QTC_ADDRESS_COUNT=4\n").unwrap();
    let seed = "42".repeat(48);

    let output = Command::new(WALLET)
        .args(["generate", "--method", "hd-multi", "--seed-hex", &seed])
        .current_dir(dir.path())
        .env_remove("QTC_PROVIDER")
        .env_remove("QTC_PROVIDER_BIN")
        .env_remove("QTC_ADDRESS_COUNT")
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["addresses"].as_array().unwrap().len(), 4);
}
