use std::collections::HashSet;

use crate::core::{
    Audit, AuditDetails, CategoryScore, Diagnostic, FailedAudit, LighthouseReport, Opportunity,
    Summary, Vital,
};

pub const DEFAULT_MIN_SCORE: f64 = 0.5;

pub const DIAGNOSTIC_AUDITS: [&str; 6] = [
    "bootup-time",
    "mainthread-work-breakdown",
    "long-tasks",
    "dom-size",
    "network-requests",
    "total-byte-weight",
];

pub const VITAL_AUDITS: [&str; 6] = [
    "largest-contentful-paint",
    "max-potential-fid",
    "cumulative-layout-shift",
    "first-contentful-paint",
    "total-blocking-time",
    "speed-index",
];

pub struct Analyzer<'a> {
    report: &'a LighthouseReport,
}

impl<'a> Analyzer<'a> {
    pub fn new(report: &'a LighthouseReport) -> Self {
        Self { report }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            url: self.report.requested_url.clone(),
            final_url: self.report.final_url.clone(),
            fetch_time: self.report.fetch_time.clone(),
            lighthouse_version: self.report.lighthouse_version.clone(),
            category_scores: self.category_scores(),
        }
    }

    pub fn category_scores(&self) -> Vec<CategoryScore> {
        self.report
            .ordered_category_ids()
            .into_iter()
            .filter_map(|id| self.report.category(id).map(|c| (id, c)))
            .map(|(id, category)| CategoryScore {
                id: id.to_string(),
                title: category.title.clone(),
                score: category.score.map(|s| (s * 100.0).round() as i64),
            })
            .collect()
    }

    pub fn failed_audits(&self, category_filter: Option<&str>, min_score: f64) -> Vec<&'a Audit> {
        let category_ids: Vec<&str> = match category_filter {
            Some(id) => vec![id],
            None => self.report.ordered_category_ids(),
        };

        let mut seen = HashSet::new();
        let mut failed = Vec::new();
        for category_id in category_ids {
            let Some(category) = self.report.category(category_id) else {
                continue;
            };
            for audit_ref in &category.audit_refs {
                if !seen.insert(audit_ref.id.as_str()) {
                    continue;
                }
                let Some(audit) = self.report.audit(&audit_ref.id) else {
                    continue;
                };
                let Some(score) = audit.score else {
                    continue;
                };
                if score < min_score && audit.score_display_mode.is_scored() {
                    failed.push(audit);
                }
            }
        }
        failed
    }

    pub fn failed_audit_summaries(
        &self,
        category_filter: Option<&str>,
        min_score: f64,
    ) -> Vec<FailedAudit> {
        self.failed_audits(category_filter, min_score)
            .into_iter()
            .map(|audit| FailedAudit {
                id: audit.id.clone(),
                title: audit.title.clone(),
                score: audit.score.unwrap_or(0.0),
                display_value: audit.display_value.clone(),
            })
            .collect()
    }

    pub fn opportunities(&self) -> Vec<Opportunity> {
        let mut opportunities: Vec<Opportunity> = self
            .report
            .audits
            .values()
            .filter(|audit| {
                matches!(audit.details, Some(AuditDetails::Opportunity { .. }))
                    && audit.score.unwrap_or(0.0) < 1.0
            })
            .map(|audit| Opportunity {
                id: audit.id.clone(),
                title: audit.title.clone(),
                description: audit.description.clone(),
                score: audit.score,
                wasted_ms: audit.savings_ms(),
                wasted_bytes: audit.savings_bytes(),
                item_count: audit.items().len(),
            })
            .collect();

        opportunities.sort_by(|a, b| {
            b.wasted_ms
                .partial_cmp(&a.wasted_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        opportunities
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        DIAGNOSTIC_AUDITS
            .iter()
            .filter_map(|id| self.report.audit(id))
            .filter(|audit| audit.score.unwrap_or(0.0) < 1.0)
            .map(|audit| Diagnostic {
                id: audit.id.clone(),
                title: audit.title.clone(),
                display_value: audit.display_value.clone(),
                numeric_value: audit.numeric_value,
                numeric_unit: audit.numeric_unit.clone(),
            })
            .collect()
    }

    pub fn core_web_vitals(&self) -> Vec<Vital> {
        VITAL_AUDITS
            .iter()
            .filter_map(|id| self.report.audit(id))
            .map(|audit| {
                let rating = rating(audit.score);
                Vital {
                    id: audit.id.clone(),
                    name: audit.title.clone(),
                    value: audit.numeric_value,
                    unit: audit.numeric_unit.clone(),
                    display_value: audit.display_value.clone(),
                    rating: rating.to_string(),
                    passed: rating == "pass",
                }
            })
            .collect()
    }

    pub fn render_markdown(&self, category_filter: Option<&str>, min_score: f64) -> String {
        let doc = crate::engine::analysis_doc(self.report, category_filter, min_score);
        crate::report::render_analysis_markdown(&doc)
    }
}

pub fn rating(score: Option<f64>) -> &'static str {
    match score {
        Some(s) if s >= 0.9 => "pass",
        Some(s) if s >= 0.5 => "average",
        _ => "fail",
    }
}
