use std::time::Duration;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::analyzer::Analyzer;
use crate::core::{AnalysisDoc, FixDoc, LighthouseReport};
use crate::rules::FixRuleEngine;

pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub min_score: f64,
    pub show_progress: bool,
}

#[derive(Clone)]
pub struct Engine {
    opts: EngineOptions,
}

impl Engine {
    pub fn new(opts: EngineOptions) -> Self {
        Self { opts }
    }

    pub fn analyze(&self, report: &LighthouseReport, category: Option<&str>) -> AnalysisDoc {
        let pb = self.spinner("Analyzing report...");
        let doc = analysis_doc(report, category, self.opts.min_score);
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        doc
    }

    pub fn fixes(&self, report: &LighthouseReport, category: Option<&str>) -> FixDoc {
        let pb = self.spinner("Generating fixes...");
        let fixes = FixRuleEngine::new(report).with_category(category).run();
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        FixDoc {
            schema_version: SCHEMA_VERSION.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: now_rfc3339(),
            url: report.url().map(str::to_string),
            fixes,
        }
    }

    fn spinner(&self, message: &str) -> Option<indicatif::ProgressBar> {
        use std::io::IsTerminal;

        if !(self.opts.show_progress && std::io::stderr().is_terminal()) {
            return None;
        }
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    }
}

pub fn analysis_doc(
    report: &LighthouseReport,
    category_filter: Option<&str>,
    min_score: f64,
) -> AnalysisDoc {
    let analyzer = Analyzer::new(report);
    let summary = analyzer.summary();
    AnalysisDoc {
        schema_version: SCHEMA_VERSION.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: now_rfc3339(),
        url: summary.url,
        final_url: summary.final_url,
        fetch_time: summary.fetch_time,
        lighthouse_version: summary.lighthouse_version,
        category_scores: summary.category_scores,
        core_web_vitals: analyzer.core_web_vitals(),
        failed_audits: analyzer.failed_audit_summaries(category_filter, min_score),
        opportunities: analyzer.opportunities(),
        diagnostics: analyzer.diagnostics(),
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
