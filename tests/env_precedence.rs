use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sitediet"));
    cmd.env("HOME", home);
    cmd.current_dir(home);
    cmd.env_remove("SITEDIET_CONFIG");
    cmd.env_remove("SITEDIET_UI_COLOR");
    cmd.env_remove("SITEDIET_ANALYZE_MIN_SCORE");
    cmd.env_remove("SITEDIET_REPORTS_DIR");
    cmd.env_remove("SITEDIET_FIXES_OUTPUT_DIR");
    cmd
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let home = std::env::temp_dir().join(format!("sitediet-env-test-{}-{seq}", std::process::id()));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdirs");
    }
    std::fs::write(path, bytes).expect("write");
}

fn write_report(home: &Path) -> PathBuf {
    let path = home.join("report.json");
    write_file(
        &path,
        serde_json::to_string(&json!({
            "requestedUrl": "https://example.com/",
            "categories": {
                "performance": {
                    "title": "Performance",
                    "auditRefs": [{"id": "speed-index"}]
                }
            },
            "audits": {
                "speed-index": {
                    "id": "speed-index",
                    "title": "Speed Index",
                    "score": 0.3,
                    "scoreDisplayMode": "numeric"
                }
            }
        }))
        .expect("serialize")
        .as_bytes(),
    );
    path
}

fn failed_audit_ids(out: &Output) -> Vec<String> {
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    v.get("failed_audits")
        .and_then(|s| s.as_array())
        .expect("failed_audits")
        .iter()
        .filter_map(|a| a.get("id").and_then(|s| s.as_str()))
        .map(str::to_string)
        .collect()
}

#[test]
fn env_overrides_config_file() {
    let home = make_temp_home();
    let report = write_report(&home);
    write_file(
        home.join(".config/sitediet/config.toml").as_path(),
        br#"
[analyze]
min_score = 0.5
"#,
    );

    let out = {
        let mut cmd = base_cmd(&home);
        cmd.env("SITEDIET_ANALYZE_MIN_SCORE", "0.25");
        cmd.args(["analyze", report.to_str().unwrap(), "--output", "json"]);
        cmd.output().expect("run sitediet")
    };
    assert!(out.status.success());
    // 0.3 is above the env threshold even though the file says 0.5
    assert!(failed_audit_ids(&out).is_empty());

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn cli_flag_overrides_env() {
    let home = make_temp_home();
    let report = write_report(&home);

    let out = {
        let mut cmd = base_cmd(&home);
        cmd.env("SITEDIET_ANALYZE_MIN_SCORE", "0.25");
        cmd.args([
            "analyze",
            report.to_str().unwrap(),
            "--min-score",
            "0.5",
            "--output",
            "json",
        ]);
        cmd.output().expect("run sitediet")
    };
    assert!(out.status.success());
    assert_eq!(failed_audit_ids(&out), vec!["speed-index"]);

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn cli_config_path_overrides_env_config_path() {
    let home = make_temp_home();
    let report = write_report(&home);

    let cfg_env = home.join("env-config.toml");
    let cfg_cli = home.join("cli-config.toml");
    write_file(
        cfg_env.as_path(),
        br#"
[analyze]
min_score = 0.25
"#,
    );
    write_file(
        cfg_cli.as_path(),
        br#"
[analyze]
min_score = 0.5
"#,
    );

    let out = {
        let mut cmd = base_cmd(&home);
        cmd.env("SITEDIET_CONFIG", &cfg_env);
        cmd.args(["analyze", report.to_str().unwrap(), "--output", "json"]);
        cmd.arg("--config");
        cmd.arg(&cfg_cli);
        cmd.output().expect("run sitediet")
    };
    assert!(out.status.success());
    assert_eq!(failed_audit_ids(&out), vec!["speed-index"]);

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn env_reports_dir_changes_discovery() {
    let home = make_temp_home();
    write_file(
        home.join("custom-reports/latest.json").as_path(),
        serde_json::to_string(&json!({
            "requestedUrl": "https://example.com/",
            "categories": {},
            "audits": {}
        }))
        .expect("serialize")
        .as_bytes(),
    );

    let out = {
        let mut cmd = base_cmd(&home);
        cmd.env("SITEDIET_REPORTS_DIR", "custom-reports");
        cmd.args(["analyze", "--output", "json"]);
        cmd.output().expect("run sitediet")
    };
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn invalid_env_boolean_exits_2() {
    let home = make_temp_home();
    let report = write_report(&home);

    let out = {
        let mut cmd = base_cmd(&home);
        cmd.env("SITEDIET_UI_COLOR", "maybe");
        cmd.args(["analyze", report.to_str().unwrap()]);
        cmd.output().expect("run sitediet")
    };
    assert_eq!(out.status.code(), Some(2));

    let _ = std::fs::remove_dir_all(&home);
}
