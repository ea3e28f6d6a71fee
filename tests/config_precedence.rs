use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;

fn sitediet_cmd(home: &Path) -> Command {
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

fn run(home: &Path, args: &[&str]) -> Output {
    sitediet_cmd(home).args(args).output().expect("run sitediet")
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);

    let temp = std::env::temp_dir();
    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let uniq = format!("sitediet-config-test-{}-{seq}", std::process::id());
    let home = temp.join(uniq);
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
                    "score": 0.5,
                    "auditRefs": [{"id": "speed-index"}]
                }
            },
            "audits": {
                "speed-index": {
                    "id": "speed-index",
                    "title": "Speed Index",
                    "score": 0.3,
                    "scoreDisplayMode": "numeric",
                    "numericValue": 6000.0
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
fn config_min_score_changes_failed_audit_filtering() {
    let home = make_temp_home();
    let report = write_report(&home);

    // default threshold 0.5 keeps the 0.3 audit
    let out = run(&home, &["analyze", report.to_str().unwrap(), "--output", "json"]);
    assert!(out.status.success());
    assert_eq!(failed_audit_ids(&out), vec!["speed-index"]);

    write_file(
        home.join(".config/sitediet/config.toml").as_path(),
        br#"
[analyze]
min_score = 0.25
"#,
    );

    let out = run(&home, &["analyze", report.to_str().unwrap(), "--output", "json"]);
    assert!(out.status.success());
    assert!(failed_audit_ids(&out).is_empty());

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn config_fixes_output_dir_changes_default_save_path() {
    let home = make_temp_home();
    let report = write_report(&home);
    write_file(
        home.join(".config/sitediet/config.toml").as_path(),
        br#"
[fixes]
output_dir = "quality/fixes"
"#,
    );

    let out = run(&home, &["fixes", report.to_str().unwrap()]);
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("quality/fixes/fixes-"), "stdout={stdout}");
    let entries: Vec<_> = std::fs::read_dir(home.join("quality/fixes"))
        .expect("fixes dir")
        .flatten()
        .collect();
    assert_eq!(entries.len(), 1);

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn config_show_emits_effective_config() {
    let home = make_temp_home();
    write_file(
        home.join(".config/sitediet/config.toml").as_path(),
        br#"
[analyze]
min_score = 0.75
"#,
    );

    let out = run(&home, &["config", "--show"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("min_score = 0.75"), "stdout={stdout}");
    assert!(stdout.contains("config_path"), "stdout={stdout}");

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn invalid_config_min_score_exits_2() {
    let home = make_temp_home();
    let report = write_report(&home);
    write_file(
        home.join(".config/sitediet/config.toml").as_path(),
        br#"
[analyze]
min_score = 3.0
"#,
    );

    let out = run(&home, &["analyze", report.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn init_scaffolds_directories_and_config() {
    let home = make_temp_home();

    let out = run(&home, &["init"]);
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    assert!(home.join(".lighthouse/reports").is_dir());
    assert!(home.join(".lighthouse/fixes").is_dir());
    let config = std::fs::read_to_string(home.join(".config/sitediet/config.toml"))
        .expect("read scaffolded config");
    assert!(config.contains("[analyze]"), "config={config}");

    // a second init refuses to clobber without --force
    write_file(
        home.join(".config/sitediet/config.toml").as_path(),
        b"[ui]\ncolor = false\n",
    );
    let out = run(&home, &["init"]);
    assert!(out.status.success());
    let config = std::fs::read_to_string(home.join(".config/sitediet/config.toml"))
        .expect("read config");
    assert!(config.contains("color = false"), "config={config}");

    let out = run(&home, &["init", "--force"]);
    assert!(out.status.success());
    let config = std::fs::read_to_string(home.join(".config/sitediet/config.toml"))
        .expect("read config");
    assert!(config.contains("[analyze]"), "config={config}");

    let _ = std::fs::remove_dir_all(&home);
}
