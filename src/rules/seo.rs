use crate::core::{Audit, Fix, Priority, Snippet};

use super::fix;

pub(super) fn meta_description(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Add a meta description",
        Priority::Medium,
        "Search engines improvise the result snippet".to_string(),
        "One or two sentences summarizing the page; search engines show it \
         under the title and it drives click-through.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Describe the page",
        r#"<meta name="description" content="Compare team and enterprise plans, with per-seat pricing and a 30-day trial.">"#,
    ));
    Some(out)
}

pub(super) fn canonical(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Fix the canonical link",
        Priority::Medium,
        "Duplicate URLs split ranking signals across variants".to_string(),
        "Point every variant (query strings, trailing slashes, http/https) \
         at one absolute canonical URL.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Declare the canonical URL",
        r#"<link rel="canonical" href="https://example.com/pricing">"#,
    ));
    Some(out)
}

pub(super) fn structured_data(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Add structured data",
        Priority::Low,
        "The page is not eligible for rich results".to_string(),
        "JSON-LD in the page head lets search engines render rich snippets. \
         Validate with the Rich Results Test after deploying.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Describe the page in JSON-LD",
        r#"<script type="application/ld+json">
{
  "@context": "https://schema.org",
  "@type": "Product",
  "name": "Team plan",
  "offers": { "@type": "Offer", "price": "12.00", "priceCurrency": "USD" }
}
</script>"#,
    ));
    Some(out)
}
