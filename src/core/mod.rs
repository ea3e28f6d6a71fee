mod analysis;
mod audit;
mod fix;
mod lhr;
mod priority;

pub use analysis::{
    AnalysisDoc, CategoryScore, Diagnostic, FailedAudit, FixDoc, Opportunity, Summary, Vital,
};
pub use audit::{Audit, AuditDetails, DetailItem, ScoreDisplayMode};
pub use fix::{Fix, Snippet};
pub use lhr::{AuditRef, Category, LighthouseReport};
pub use priority::Priority;

pub const CATEGORY_ORDER: [&str; 4] = ["performance", "accessibility", "seo", "best-practices"];
