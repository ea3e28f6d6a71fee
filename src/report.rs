use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{AnalysisDoc, Fix, FixDoc, Priority};

pub const NO_ISSUES_LINE: &str = "No issues found! Great job!";

const PRIORITY_ORDER: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

pub fn render_fixes(fixes: &[Fix]) -> String {
    use std::fmt::Write as _;

    if fixes.is_empty() {
        return format!("{NO_ISSUES_LINE}\n");
    }

    let mut out = String::new();
    for priority in PRIORITY_ORDER {
        let bucket: Vec<&Fix> = fixes.iter().filter(|f| f.priority == priority).collect();
        if bucket.is_empty() {
            continue;
        }

        let _ = writeln!(out, "## {}", priority.heading());
        for fix in bucket {
            let _ = writeln!(out);
            let _ = writeln!(out, "### {}", fix.title);
            let _ = writeln!(out);
            let _ = writeln!(out, "**Impact:** {}", fix.impact);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", fix.description);
            if let Some(diagnosis) = &fix.diagnosis {
                let _ = writeln!(out);
                let _ = writeln!(out, "**Diagnosis:** {diagnosis}");
            }
            for snippet in &fix.fixes {
                let _ = writeln!(out);
                let _ = writeln!(out, "#### {}", snippet.title);
                let _ = writeln!(out);
                write_fenced_code_block(&mut out, &snippet.snippet_type, &snippet.code);
            }
        }
        let _ = writeln!(out);
    }
    out
}

pub fn render_fix_doc_markdown(doc: &FixDoc) -> String {
    use std::fmt::Write as _;

    if doc.fixes.is_empty() {
        return render_fixes(&doc.fixes);
    }

    let mut out = String::new();
    let _ = writeln!(out, "# Lighthouse Fix Plan");
    let _ = writeln!(out);
    if let Some(url) = &doc.url {
        let _ = writeln!(out, "- URL: {url}");
    }
    let _ = writeln!(out, "- Generated: {}", doc.generated_at);
    let _ = writeln!(out, "- Fixes: {}", doc.fixes.len());
    let _ = writeln!(out);
    out.push_str(&render_fixes(&doc.fixes));
    out
}

pub fn render_analysis_markdown(doc: &AnalysisDoc) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = writeln!(out, "# Lighthouse Analysis");
    let _ = writeln!(out);
    if let Some(url) = &doc.url {
        let _ = writeln!(out, "- URL: {url}");
    }
    if let Some(final_url) = &doc.final_url {
        if doc.url.as_deref() != Some(final_url) {
            let _ = writeln!(out, "- Final URL: {final_url}");
        }
    }
    if let Some(fetch_time) = &doc.fetch_time {
        let _ = writeln!(out, "- Fetched: {fetch_time}");
    }
    if let Some(version) = &doc.lighthouse_version {
        let _ = writeln!(out, "- Lighthouse: {version}");
    }
    let _ = writeln!(out, "- Generated: {}", doc.generated_at);

    let _ = writeln!(out);
    let _ = writeln!(out, "## Category Scores");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Category | Score |");
    let _ = writeln!(out, "|----------|------:|");
    for category in &doc.category_scores {
        match category.score {
            Some(score) => {
                let _ = writeln!(out, "| {} | {score} |", category.title);
            }
            None => {
                let _ = writeln!(out, "| {} | n/a |", category.title);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Core Web Vitals");
    if doc.core_web_vitals.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "_No vitals present in this report._");
    }
    for vital in &doc.core_web_vitals {
        let value = vital
            .display_value
            .clone()
            .or_else(|| vital.value.map(|v| format!("{v:.0}")))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(out, "- **{}**: {} ({})", vital.name, value, vital.rating);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Opportunities");
    if doc.opportunities.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "_No opportunities detected._");
    }
    for opportunity in &doc.opportunities {
        let seconds = (opportunity.wasted_ms / 1000.0).round() as i64;
        let _ = writeln!(
            out,
            "- **{}**: potential savings `{seconds}s` ({} item(s))",
            opportunity.title, opportunity.item_count
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Diagnostics");
    if doc.diagnostics.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "_No diagnostics flagged._");
    }
    for diagnostic in &doc.diagnostics {
        match &diagnostic.display_value {
            Some(display) => {
                let _ = writeln!(out, "- **{}**: {display}", diagnostic.title);
            }
            None => {
                let _ = writeln!(out, "- **{}**", diagnostic.title);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Failed Audits ({})", doc.failed_audits.len());
    if doc.failed_audits.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "_No audits below the threshold._");
    }
    for audit in &doc.failed_audits {
        let score = (audit.score * 100.0).round() as i64;
        match &audit.display_value {
            Some(display) => {
                let _ = writeln!(out, "- `{}` {} [{score}] ({display})", audit.id, audit.title);
            }
            None => {
                let _ = writeln!(out, "- `{}` {} [{score}]", audit.id, audit.title);
            }
        }
    }

    out
}

fn write_fenced_code_block(out: &mut String, lang: &str, content: &str) {
    use std::fmt::Write as _;

    let _ = writeln!(out, "```{lang}");
    let _ = writeln!(out, "{}", content.trim_end());
    let _ = writeln!(out, "```");
}

pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    use std::io::Write;

    let buf = serde_json::to_vec_pretty(value)?;

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(&buf) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
        Err(err) => return Err(err.into()),
    }
    match stdout.write_all(b"\n") {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

pub fn write_stdout(content: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(content.as_bytes()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

pub fn save_markdown(path: &Path, content: &str) -> Result<()> {
    let save = || -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    };
    save().map_err(crate::exit::write_failed_err)
}
