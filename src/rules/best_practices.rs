use crate::core::{Audit, Fix, Priority, Snippet};

use super::fix;

pub(super) fn errors_in_console(audit: &Audit) -> Option<Fix> {
    let items = audit.items();
    let mut out = fix(
        audit,
        "Fix console errors",
        Priority::Medium,
        format!("{} error(s) logged during page load", items.len()),
        "Errors during load usually mean a broken feature for someone. Fix \
         them or stop shipping the code that throws.",
    );

    let logged: Vec<&str> = items
        .iter()
        .filter_map(|item| item.extra_str("description"))
        .take(5)
        .collect();
    if !logged.is_empty() {
        out.fixes
            .push(Snippet::new("text", "Logged errors", logged.join("\n")));
    }
    out.fixes.push(Snippet::new(
        "js",
        "Report errors you cannot reproduce locally",
        r#"window.addEventListener("error", (e) => {
  navigator.sendBeacon("/errors", JSON.stringify({ msg: e.message, src: e.filename }));
});"#,
    ));
    Some(out)
}

pub(super) fn valid_source_maps(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Publish valid source maps",
        Priority::Low,
        "Production stack traces point at minified code".to_string(),
        "Source maps make production errors debuggable. Generate them in the \
         build and upload them where your error tracker can find them.",
    );
    out.fixes.push(Snippet::new(
        "bash",
        "Emit source maps from the build",
        "npx esbuild src/app.js --bundle --minify --sourcemap --outfile=dist/app.js",
    ));
    Some(out)
}

pub(super) fn bf_cache(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Restore back/forward cache eligibility",
        Priority::Medium,
        "Back navigation reloads the page from scratch".to_string(),
        "An unload handler or an open connection keeps the page out of the \
         back/forward cache. Use pagehide and close connections on hide.",
    );
    out.fixes.push(Snippet::new(
        "js",
        "Replace unload with pagehide",
        r#"// before: window.addEventListener("unload", flush);
window.addEventListener("pagehide", (e) => {
  if (!e.persisted) flush();
});"#,
    ));
    Some(out)
}

pub(super) fn viewport(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Add a viewport meta tag",
        Priority::High,
        "Mobile browsers render the desktop layout, then scale it".to_string(),
        "Without a viewport tag the page is laid out at 980px and taps wait \
         for the double-tap-to-zoom timeout.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Declare the viewport",
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
    ));
    Some(out)
}

pub(super) fn http_status_code(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Return a successful HTTP status code",
        Priority::High,
        "The page answers with an error status".to_string(),
        "Crawlers drop pages that answer 4xx/5xx. Serve 200 for real pages \
         and a real 404 page only at unknown URLs.",
    );
    out.fixes.push(Snippet::new(
        "bash",
        "Check what the page actually returns",
        "curl -s -o /dev/null -w '%{http_code}\\n' https://example.com/",
    ));
    Some(out)
}

pub(super) fn no_vulnerable_libraries(audit: &Audit) -> Option<Fix> {
    let count = audit.items().len();
    let mut out = fix(
        audit,
        "Update vulnerable JavaScript libraries",
        Priority::High,
        format!("{count} front-end librar(ies) have known vulnerabilities"),
        "Known CVEs in front-end libraries are trivially scanned for. \
         Update, or remove libraries the page no longer needs.",
    );
    out.fixes.push(Snippet::new(
        "bash",
        "Audit and update",
        "npm audit --omit=dev\nnpm update && npm audit fix",
    ));
    Some(out)
}
