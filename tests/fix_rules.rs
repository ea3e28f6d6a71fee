use serde_json::json;

use sitediet::core::{LighthouseReport, Priority};
use sitediet::rules::FixRuleEngine;

fn report(value: serde_json::Value) -> LighthouseReport {
    serde_json::from_value(value).expect("parse report")
}

fn perf_report(audit: serde_json::Value) -> LighthouseReport {
    let id = audit
        .get("id")
        .and_then(|v| v.as_str())
        .expect("audit id")
        .to_string();
    let mut audits = serde_json::Map::new();
    audits.insert(id.clone(), audit);
    report(json!({
        "categories": {
            "performance": {
                "title": "Performance",
                "auditRefs": [{"id": id}]
            }
        },
        "audits": audits
    }))
}

#[test]
fn ttfb_rule_reports_critically_high_and_acceptable_tiers() {
    let slow = perf_report(json!({
        "id": "server-response-time",
        "title": "Reduce initial server response time",
        "score": 0.2,
        "numericValue": 1200.0
    }));
    let fixes = FixRuleEngine::new(&slow).run();
    assert_eq!(fixes.len(), 1);
    assert!(
        fixes[0]
            .diagnosis
            .as_deref()
            .expect("diagnosis")
            .contains("critically high")
    );

    let fast = perf_report(json!({
        "id": "server-response-time",
        "title": "Reduce initial server response time",
        "score": 0.8,
        "numericValue": 350.0
    }));
    let fixes = FixRuleEngine::new(&fast).run();
    assert_eq!(fixes.len(), 1);
    assert!(
        fixes[0]
            .diagnosis
            .as_deref()
            .expect("diagnosis")
            .contains("acceptable")
    );
}

#[test]
fn unmapped_audit_ids_are_silently_skipped() {
    let report = perf_report(json!({
        "id": "uses-long-cache-ttl",
        "title": "Serve static assets with an efficient cache policy",
        "score": 0.0
    }));
    assert!(FixRuleEngine::new(&report).run().is_empty());
}

#[test]
fn audits_at_or_above_the_threshold_produce_no_fix() {
    let report = perf_report(json!({
        "id": "server-response-time",
        "title": "Reduce initial server response time",
        "score": 0.9,
        "numericValue": 100.0
    }));
    assert!(FixRuleEngine::new(&report).run().is_empty());
}

#[test]
fn unused_javascript_separates_extension_urls_from_first_party() {
    let report = perf_report(json!({
        "id": "unused-javascript",
        "title": "Reduce unused JavaScript",
        "score": 0.3,
        "details": {
            "type": "opportunity",
            "items": [
                {"url": "https://example.com/app.js", "wastedBytes": 120000.0},
                {"url": "chrome-extension://abcdef/content.js", "wastedBytes": 80000.0}
            ],
            "overallSavingsMs": 450.0,
            "overallSavingsBytes": 200000.0
        }
    }));

    let fixes = FixRuleEngine::new(&report).run();
    let fix = fixes.iter().find(|f| f.audit == "unused-javascript").expect("fix");

    let ignore_block = fix
        .fixes
        .iter()
        .find(|s| s.title.contains("can ignore"))
        .expect("extension block");
    assert!(ignore_block.code.contains("chrome-extension://abcdef/content.js"));
    assert!(!ignore_block.code.contains("https://example.com/app.js"));

    assert!(fix.fixes.iter().any(|s| s.title.contains("first-party")));
    // the byte total spans all items; the diagnosis counts first-party only
    assert!(fix.impact.contains("195.3 KiB"), "impact={}", fix.impact);
    assert!(
        fix.diagnosis
            .as_deref()
            .expect("diagnosis")
            .contains("1 first-party")
    );
}

#[test]
fn framework_chunks_append_a_synthesized_fix_after_the_performance_pass() {
    let report = perf_report(json!({
        "id": "unused-javascript",
        "title": "Reduce unused JavaScript",
        "score": 0.3,
        "details": {
            "type": "opportunity",
            "items": [
                {"url": "https://example.com/_next/static/chunks/main.js", "wastedBytes": 90000.0},
                {"url": "https://example.com/vendor.js", "wastedBytes": 10000.0}
            ],
            "overallSavingsMs": 300.0,
            "overallSavingsBytes": 100000.0
        }
    }));

    let fixes = FixRuleEngine::new(&report).run();
    assert_eq!(fixes.len(), 2);
    assert_eq!(fixes[0].title, "Remove unused JavaScript");
    assert_eq!(fixes[1].title, "Trim framework chunks");
    // only the framework chunk's bytes count here
    assert!(fixes[1].impact.contains("87.9 KiB"), "impact={}", fixes[1].impact);
}

#[test]
fn category_filter_restricts_the_engine_pass() {
    let report = report(json!({
        "categories": {
            "performance": {
                "title": "Performance",
                "auditRefs": [{"id": "server-response-time"}]
            },
            "seo": {
                "title": "SEO",
                "auditRefs": [{"id": "meta-description"}]
            }
        },
        "audits": {
            "server-response-time": {
                "id": "server-response-time",
                "title": "Reduce initial server response time",
                "score": 0.2,
                "numericValue": 800.0
            },
            "meta-description": {
                "id": "meta-description",
                "title": "Document has a meta description",
                "score": 0.0
            }
        }
    }));

    let fixes = FixRuleEngine::new(&report).with_category(Some("seo")).run();
    let ids: Vec<&str> = fixes.iter().map(|f| f.audit.as_str()).collect();
    assert_eq!(ids, vec!["meta-description"]);
}

#[test]
fn empty_fix_list_renders_the_no_issues_line() {
    let report = perf_report(json!({
        "id": "speed-index",
        "title": "Speed Index",
        "score": 0.95,
        "numericValue": 1500.0
    }));
    let fixes = FixRuleEngine::new(&report).run();
    assert!(fixes.is_empty());
    assert_eq!(
        sitediet::report::render_fixes(&fixes),
        "No issues found! Great job!\n"
    );
}

#[test]
fn rendering_groups_by_priority_and_keeps_emission_order_within_buckets() {
    let report = report(json!({
        "categories": {
            "performance": {
                "title": "Performance",
                // emission order: low (document-title), high (server-response-time),
                // medium (speed-index)
                "auditRefs": [
                    {"id": "document-title"},
                    {"id": "server-response-time"},
                    {"id": "speed-index"}
                ]
            }
        },
        "audits": {
            "document-title": {
                "id": "document-title",
                "title": "Document has a title element",
                "score": 0.0
            },
            "server-response-time": {
                "id": "server-response-time",
                "title": "Reduce initial server response time",
                "score": 0.2,
                "numericValue": 700.0
            },
            "speed-index": {
                "id": "speed-index",
                "title": "Speed Index",
                "score": 0.4,
                "numericValue": 5200.0
            }
        }
    }));

    let fixes = FixRuleEngine::new(&report).run();
    assert_eq!(
        fixes.iter().map(|f| f.priority).collect::<Vec<_>>(),
        vec![Priority::Low, Priority::High, Priority::Medium]
    );

    let rendered = sitediet::report::render_fixes(&fixes);
    let high = rendered.find("## High Priority").expect("high section");
    let medium = rendered.find("## Medium Priority").expect("medium section");
    let low = rendered.find("## Low Priority").expect("low section");
    assert!(high < medium && medium < low, "rendered={rendered}");

    let ttfb = rendered.find("Reduce server response time").expect("ttfb fix");
    let speed = rendered.find("Improve Speed Index").expect("speed fix");
    let title = rendered.find("Add a document title").expect("title fix");
    assert!(ttfb < speed && speed < title);
}

#[test]
fn empty_buckets_are_omitted_from_the_rendering() {
    let report = perf_report(json!({
        "id": "speed-index",
        "title": "Speed Index",
        "score": 0.4,
        "numericValue": 5200.0
    }));
    let fixes = FixRuleEngine::new(&report).run();
    let rendered = sitediet::report::render_fixes(&fixes);
    assert!(rendered.contains("## Medium Priority"));
    assert!(!rendered.contains("## High Priority"));
    assert!(!rendered.contains("## Low Priority"));
}
