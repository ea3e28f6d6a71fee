use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::LighthouseReport;

pub fn load(path: &Path) -> Result<LighthouseReport> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(crate::exit::report_not_found(format!(
                "report not found: {}\nrun `lighthouse <url> --output=json --output-path={}` first, or pass a report path",
                path.display(),
                path.display()
            )));
        }
        Err(err) => {
            return Err(crate::exit::report_unreadable_err(
                anyhow::Error::new(err)
                    .context(format!("failed to read report: {}", path.display())),
            ));
        }
    };

    let report: LighthouseReport = match serde_json::from_str(&text) {
        Ok(report) => report,
        Err(err) => {
            return Err(crate::exit::report_unreadable_err(
                anyhow::Error::new(err)
                    .context(format!("report is not valid JSON: {}", path.display())),
            ));
        }
    };

    Ok(report)
}

pub fn resolve_report_path(explicit: Option<&Path>, reports_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(crate::exit::report_not_found(format!(
            "report not found: {}",
            path.display()
        )));
    }

    let latest = reports_dir.join("latest.json");
    if latest.exists() {
        return Ok(latest);
    }

    newest_json(reports_dir)?.ok_or_else(|| {
        crate::exit::report_not_found(format!(
            "no report found in {}\nrun lighthouse first, or pass a report path",
            reports_dir.display()
        ))
    })
}

fn newest_json(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in WalkDir::new(dir).max_depth(1).into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let mtime = entry
            .metadata()
            .with_context(|| format!("failed to stat {}", path.display()))?
            .modified()
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let replace = match &newest {
            Some((best, _)) => mtime > *best,
            None => true,
        };
        if replace {
            newest = Some((mtime, path.to_path_buf()));
        }
    }

    Ok(newest.map(|(_, path)| path))
}
