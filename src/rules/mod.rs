use crate::core::{Audit, Fix, LighthouseReport, Priority, CATEGORY_ORDER};

mod accessibility;
mod best_practices;
mod performance;
mod seo;

pub const FIX_SCORE_THRESHOLD: f64 = 0.9;
pub const EXTENSION_SCHEME_MARKER: &str = "-extension://";
pub const FRAMEWORK_CHUNK_MARKER: &str = "/_next/";

pub type RuleFn = fn(&Audit) -> Option<Fix>;

const RULES: &[(&str, RuleFn)] = &[
    // performance
    ("server-response-time", performance::server_response_time),
    ("unused-javascript", performance::unused_javascript),
    ("speed-index", performance::speed_index),
    ("lcp-breakdown-insight", performance::lcp_breakdown_insight),
    ("document-latency-insight", performance::document_latency_insight),
    ("max-potential-fid", performance::max_potential_fid),
    ("render-blocking-resources", performance::render_blocking_resources),
    ("unminified-css", performance::unminified_css),
    ("unminified-javascript", performance::unminified_javascript),
    ("unused-css-rules", performance::unused_css_rules),
    ("modern-image-formats", performance::modern_image_formats),
    ("offscreen-images", performance::offscreen_images),
    ("uses-optimized-images", performance::uses_optimized_images),
    ("document-title", performance::document_title),
    // accessibility
    ("color-contrast", accessibility::color_contrast),
    ("heading-order", accessibility::heading_order),
    ("image-alt", accessibility::image_alt),
    ("label", accessibility::label),
    ("button-name", accessibility::button_name),
    ("link-name", accessibility::link_name),
    // seo
    ("meta-description", seo::meta_description),
    ("canonical", seo::canonical),
    ("structured-data", seo::structured_data),
    // best-practices
    ("errors-in-console", best_practices::errors_in_console),
    ("valid-source-maps", best_practices::valid_source_maps),
    ("bf-cache", best_practices::bf_cache),
    ("viewport", best_practices::viewport),
    ("http-status-code", best_practices::http_status_code),
    ("no-vulnerable-libraries", best_practices::no_vulnerable_libraries),
];

pub fn rule_for(audit_id: &str) -> Option<RuleFn> {
    RULES
        .iter()
        .find(|(id, _)| *id == audit_id)
        .map(|(_, rule)| *rule)
}

pub struct FixRuleEngine<'a> {
    report: &'a LighthouseReport,
    category_filter: Option<String>,
    fixes: Vec<Fix>,
}

impl<'a> FixRuleEngine<'a> {
    pub fn new(report: &'a LighthouseReport) -> Self {
        Self {
            report,
            category_filter: None,
            fixes: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category_filter = category.map(str::to_string);
        self
    }

    pub fn run(mut self) -> Vec<Fix> {
        for category_id in CATEGORY_ORDER {
            if let Some(filter) = &self.category_filter {
                if filter != category_id {
                    continue;
                }
            }

            if let Some(category) = self.report.category(category_id) {
                for audit_ref in &category.audit_refs {
                    let Some(audit) = self.report.audit(&audit_ref.id) else {
                        continue;
                    };
                    let Some(score) = audit.score else {
                        continue;
                    };
                    if score >= FIX_SCORE_THRESHOLD {
                        continue;
                    }
                    let Some(rule) = rule_for(&audit.id) else {
                        continue;
                    };
                    if let Some(fix) = rule(audit) {
                        self.add_fix(fix);
                    }
                }
            }

            if category_id == "performance" {
                if let Some(fix) = performance::framework_bundle_fix(self.report) {
                    self.add_fix(fix);
                }
            }
        }
        self.fixes
    }

    fn add_fix(&mut self, fix: Fix) {
        self.fixes.push(fix);
    }
}

pub(crate) fn fix(
    audit: &Audit,
    title: impl Into<String>,
    priority: Priority,
    impact: impl Into<String>,
    description: impl Into<String>,
) -> Fix {
    Fix {
        audit: audit.id.clone(),
        title: title.into(),
        priority,
        impact: impact.into(),
        description: description.into(),
        diagnosis: None,
        fixes: Vec::new(),
    }
}

pub(crate) fn format_ms(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{ms:.0} ms")
    } else {
        format!("{:.1} s", ms / 1000.0)
    }
}
