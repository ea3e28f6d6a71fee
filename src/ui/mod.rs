use anyhow::Error;
use std::io::{self, Write};

use crate::core::{AnalysisDoc, FixDoc, Priority};

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub color: bool,
    pub stdout_is_tty: bool,
    pub stderr_is_tty: bool,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error:");
    let _ = writeln!(stderr, "  {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(stderr, "next:");
    let _ = writeln!(stderr, "  - re-run with `--verbose` for more detail");
    let _ = writeln!(
        stderr,
        "  - see `sitediet --help` for commands and options"
    );
}

pub fn print_analysis(doc: &AnalysisDoc, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    if let Some(url) = &doc.url {
        let _ = writeln!(out, "Report: {url}");
    }
    if let Some(fetch_time) = &doc.fetch_time {
        let _ = writeln!(out, "Fetched: {fetch_time}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Category scores:");
    let title_w = doc
        .category_scores
        .iter()
        .map(|c| c.title.chars().count())
        .max()
        .unwrap_or(0);
    for category in &doc.category_scores {
        let _ = writeln!(
            out,
            "  {}  {}",
            pad_end(&category.title, title_w),
            format_score(category.score, cfg.color)
        );
    }

    if !doc.core_web_vitals.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Core Web Vitals:");
        for vital in &doc.core_web_vitals {
            let mark = if vital.passed { "✅" } else { "❌" };
            let value = vital
                .display_value
                .clone()
                .or_else(|| vital.value.map(|v| format!("{v:.0}")))
                .unwrap_or_else(|| "n/a".to_string());
            let _ = writeln!(out, "  {mark} {}: {} ({})", vital.name, value, vital.rating);
        }
    }

    if !doc.opportunities.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top opportunities:");
        for opportunity in doc.opportunities.iter().take(5) {
            let seconds = (opportunity.wasted_ms / 1000.0).round() as i64;
            let _ = writeln!(
                out,
                "  - {} (~{seconds}s, {} item(s))",
                opportunity.title, opportunity.item_count
            );
        }
        if doc.opportunities.len() > 5 {
            let _ = writeln!(out, "  ... ({} more)", doc.opportunities.len() - 5);
        }
    }

    let _ = writeln!(out);
    if doc.failed_audits.is_empty() {
        let _ = writeln!(out, "No audits below the threshold.");
    } else if cfg.verbose {
        let _ = writeln!(out, "Failed audits ({}):", doc.failed_audits.len());
        for audit in &doc.failed_audits {
            let score = (audit.score * 100.0).round() as i64;
            let _ = writeln!(out, "  - {} [{}]", audit.title, score);
        }
    } else {
        let _ = writeln!(
            out,
            "Failed audits: {} (use --verbose to list them)",
            doc.failed_audits.len()
        );
    }
}

pub fn print_fixes_summary(doc: &FixDoc, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    if doc.fixes.is_empty() {
        let _ = writeln!(out, "{}", crate::report::NO_ISSUES_LINE);
        return;
    }

    let high = doc.fixes.iter().filter(|f| f.priority == Priority::High).count();
    let medium = doc
        .fixes
        .iter()
        .filter(|f| f.priority == Priority::Medium)
        .count();
    let low = doc.fixes.iter().filter(|f| f.priority == Priority::Low).count();

    let _ = writeln!(
        out,
        "Fixes: {} ({} / {} / {})",
        doc.fixes.len(),
        format_priority_count(Priority::High, high, cfg.color),
        format_priority_count(Priority::Medium, medium, cfg.color),
        format_priority_count(Priority::Low, low, cfg.color)
    );

    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        for fix in doc.fixes.iter().filter(|f| f.priority == priority) {
            let _ = writeln!(
                out,
                "  - {} [{}]",
                fix.title,
                format_priority(fix.priority, cfg.color)
            );
        }
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        return format!("{bytes} B");
    }
    if b < MB {
        return format!("{:.1} KiB", b / KB);
    }
    if b < GB {
        return format!("{:.1} MiB", b / MB);
    }
    format!("{:.1} GiB", b / GB)
}

fn format_score(score: Option<i64>, color: bool) -> String {
    let Some(score) = score else {
        return "n/a".to_string();
    };
    if !color {
        return score.to_string();
    }

    let code = if score >= 90 {
        "32"
    } else if score >= 50 {
        "33"
    } else {
        "31"
    };
    format!("\x1b[{code}m{score}\x1b[0m")
}

fn format_priority(priority: Priority, color: bool) -> String {
    if !color {
        return priority.as_str().to_string();
    }

    let code = match priority {
        Priority::High => "31",
        Priority::Medium => "33",
        Priority::Low => "90",
    };
    format!("\x1b[{code}m{}\x1b[0m", priority.as_str())
}

fn format_priority_count(priority: Priority, count: usize, color: bool) -> String {
    format!("{count} {}", format_priority(priority, color))
}

fn pad_end(s: &str, width: usize) -> String {
    let w = s.chars().count();
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}
