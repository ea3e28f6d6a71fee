use crate::core::{Audit, Fix, LighthouseReport, Priority, Snippet};

use super::{fix, format_ms, EXTENSION_SCHEME_MARKER, FRAMEWORK_CHUNK_MARKER};

pub(super) fn server_response_time(audit: &Audit) -> Option<Fix> {
    let ttfb = audit.numeric_ms();
    let diagnosis = if ttfb > 1000.0 {
        format!(
            "Time to first byte is critically high ({}). The server itself is the bottleneck; nothing downstream can compensate.",
            format_ms(ttfb)
        )
    } else if ttfb > 600.0 {
        format!(
            "Time to first byte is elevated ({}). Look at uncached page renders and slow upstream calls.",
            format_ms(ttfb)
        )
    } else if ttfb > 400.0 {
        format!(
            "Time to first byte is moderate ({}). There is headroom, but it is not the first thing to fix.",
            format_ms(ttfb)
        )
    } else {
        format!("Time to first byte is acceptable ({}).", format_ms(ttfb))
    };

    let mut out = fix(
        audit,
        "Reduce server response time",
        Priority::High,
        format!(
            "Every request waits {} before the first byte arrives",
            format_ms(ttfb)
        ),
        "Slow responses delay every other metric on the page. Cache rendered \
         output, move work off the request path, or serve from an edge closer \
         to the user.",
    );
    out.diagnosis = Some(diagnosis);
    out.fixes.push(Snippet::new(
        "text",
        "Cache rendered pages at the CDN",
        "Cache-Control: public, s-maxage=300, stale-while-revalidate=60",
    ));
    out.fixes.push(Snippet::new(
        "bash",
        "Measure where the time goes",
        r#"curl -o /dev/null -s -w "dns=%{time_namelookup} connect=%{time_connect} ttfb=%{time_starttransfer}\n" https://example.com/"#,
    ));
    Some(out)
}

pub(super) fn unused_javascript(audit: &Audit) -> Option<Fix> {
    let items = audit.items();
    let total_wasted_bytes: f64 = items.iter().filter_map(|i| i.wasted_bytes).sum();
    let first_party: Vec<&str> = items
        .iter()
        .filter_map(|i| i.url.as_deref())
        .filter(|url| !url.contains(EXTENSION_SCHEME_MARKER))
        .collect();
    let extensions: Vec<&str> = items
        .iter()
        .filter_map(|i| i.url.as_deref())
        .filter(|url| url.contains(EXTENSION_SCHEME_MARKER))
        .collect();

    let mut out = fix(
        audit,
        "Remove unused JavaScript",
        Priority::High,
        format!(
            "{} of JavaScript is downloaded but never executed ({} potential savings)",
            crate::ui::format_bytes(total_wasted_bytes as u64),
            format_ms(audit.savings_ms())
        ),
        "Unused code still has to be downloaded, parsed and compiled. Split \
         bundles along routes and load the rest on demand.",
    );
    out.diagnosis = Some(format!(
        "{} first-party bundle(s) ship unused code",
        first_party.len()
    ));
    out.fixes.push(Snippet::new(
        "bash",
        "Inspect first-party bundles",
        "npx source-map-explorer 'dist/**/*.js'",
    ));
    out.fixes.push(Snippet::new(
        "js",
        "Load below-the-fold code on demand",
        r#"// before: import { Chart } from "./chart";
const { Chart } = await import("./chart"); // only when the section scrolls in"#,
    ));
    if !extensions.is_empty() {
        out.fixes.push(Snippet::new(
            "text",
            "Browser extensions (can ignore)",
            extensions.join("\n"),
        ));
    }
    Some(out)
}

pub(super) fn speed_index(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Improve Speed Index",
        Priority::Medium,
        format!(
            "Visible content takes {} to settle",
            format_ms(audit.numeric_ms())
        ),
        "The page paints late or in large jumps. Prioritize above-the-fold \
         content and defer everything the first viewport does not need.",
    );
    out.fixes.push(Snippet::new(
        "css",
        "Skip rendering work for off-screen sections",
        r#".below-fold {
  content-visibility: auto;
  contain-intrinsic-size: 1px 600px;
}"#,
    ));
    Some(out)
}

pub(super) fn lcp_breakdown_insight(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Speed up the Largest Contentful Paint element",
        Priority::High,
        "The largest element above the fold paints too late".to_string(),
        "Make the LCP resource discoverable from the initial HTML and give it \
         priority over everything else in the first viewport.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Preload the hero image",
        r#"<link rel="preload" as="image" href="/img/hero.avif" fetchpriority="high">"#,
    ));
    out.fixes.push(Snippet::new(
        "html",
        "Never lazy-load the LCP element",
        r#"<img src="/img/hero.avif" fetchpriority="high" decoding="async" alt="...">"#,
    ));
    Some(out)
}

pub(super) fn document_latency_insight(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Cut document request latency",
        Priority::Medium,
        "The HTML document itself arrives slowly".to_string(),
        "Avoid redirect chains to the document, compress the HTML response \
         and keep it cacheable.",
    );
    out.fixes.push(Snippet::new(
        "text",
        "Compress and cache the document response",
        "Content-Encoding: br\nCache-Control: public, max-age=0, s-maxage=60",
    ));
    out.fixes.push(Snippet::new(
        "bash",
        "Check for redirect chains",
        "curl -sIL -o /dev/null -w '%{num_redirects} redirects, final %{url_effective}\\n' https://example.com",
    ));
    Some(out)
}

pub(super) fn max_potential_fid(audit: &Audit) -> Option<Fix> {
    let fid = audit.numeric_ms();
    let diagnosis = if fid > 200.0 {
        format!(
            "Max potential input delay is critical ({}). Long tasks are blocking the main thread.",
            format_ms(fid)
        )
    } else if fid > 100.0 {
        format!(
            "Max potential input delay needs improvement ({}).",
            format_ms(fid)
        )
    } else if fid > 50.0 {
        format!(
            "Max potential input delay is acceptable, could be better ({}).",
            format_ms(fid)
        )
    } else {
        format!("Max potential input delay is good ({}).", format_ms(fid))
    };

    let mut out = fix(
        audit,
        "Break up long main-thread tasks",
        Priority::High,
        format!(
            "An interaction could wait up to {} for the main thread",
            format_ms(fid)
        ),
        "Input stays frozen while a long task runs. Chunk synchronous work \
         and move pure computation off the main thread.",
    );
    out.diagnosis = Some(diagnosis);
    out.fixes.push(Snippet::new(
        "js",
        "Yield between work chunks",
        r#"for (const chunk of chunks) {
  process(chunk);
  await new Promise((resolve) => setTimeout(resolve, 0));
}"#,
    ));
    out.fixes.push(Snippet::new(
        "js",
        "Move computation to a worker",
        r#"const worker = new Worker("/js/heavy.js");
worker.postMessage(payload);
worker.onmessage = (e) => render(e.data);"#,
    ));
    Some(out)
}

pub(super) fn render_blocking_resources(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Eliminate render-blocking resources",
        Priority::High,
        format!(
            "First paint is blocked for {}",
            format_ms(audit.savings_ms())
        ),
        "Scripts and stylesheets in <head> block rendering until they are \
         fetched. Defer scripts and inline the small amount of CSS the first \
         paint actually needs.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Defer scripts",
        r#"<script src="/js/app.js" defer></script>"#,
    ));
    out.fixes.push(Snippet::new(
        "html",
        "Load non-critical CSS asynchronously",
        r#"<link rel="preload" href="/css/site.css" as="style" onload="this.onload=null;this.rel='stylesheet'">
<noscript><link rel="stylesheet" href="/css/site.css"></noscript>"#,
    ));
    Some(out)
}

pub(super) fn unminified_css(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Minify CSS",
        Priority::Medium,
        format!(
            "{} of whitespace and comments ship to every visitor",
            crate::ui::format_bytes(audit.savings_bytes() as u64)
        ),
        "Serve minified stylesheets from the build step.",
    );
    out.fixes.push(Snippet::new(
        "bash",
        "Minify in the build",
        "npx lightningcss --minify --bundle src/site.css -o dist/site.css",
    ));
    Some(out)
}

pub(super) fn unminified_javascript(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Minify JavaScript",
        Priority::Medium,
        format!(
            "{} of unminified JavaScript ships to every visitor",
            crate::ui::format_bytes(audit.savings_bytes() as u64)
        ),
        "Serve minified bundles from the build step.",
    );
    out.fixes.push(Snippet::new(
        "bash",
        "Minify in the build",
        "npx esbuild src/app.js --minify --bundle --outfile=dist/app.js",
    ));
    Some(out)
}

pub(super) fn unused_css_rules(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Remove unused CSS rules",
        Priority::Medium,
        format!(
            "{} of CSS never matches anything on the page",
            crate::ui::format_bytes(audit.savings_bytes() as u64)
        ),
        "Purge selectors the rendered pages never use, per template if \
         possible.",
    );
    out.fixes.push(Snippet::new(
        "bash",
        "Purge unused selectors",
        "npx purgecss --css dist/site.css --content 'dist/**/*.html' -o dist/",
    ));
    Some(out)
}

pub(super) fn modern_image_formats(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Serve images in modern formats",
        Priority::Medium,
        format!(
            "{} could be saved with AVIF/WebP",
            crate::ui::format_bytes(audit.savings_bytes() as u64)
        ),
        "AVIF and WebP compress far better than JPEG/PNG at the same visual \
         quality. Keep the original as a fallback.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Offer modern formats with a fallback",
        r#"<picture>
  <source srcset="/img/photo.avif" type="image/avif">
  <source srcset="/img/photo.webp" type="image/webp">
  <img src="/img/photo.jpg" alt="...">
</picture>"#,
    ));
    out.fixes.push(Snippet::new(
        "bash",
        "Convert existing assets",
        "npx @squoosh/cli --avif auto img/*.jpg",
    ));
    Some(out)
}

pub(super) fn offscreen_images(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Defer offscreen images",
        Priority::Medium,
        format!(
            "{} of below-the-fold images load up front",
            crate::ui::format_bytes(audit.savings_bytes() as u64)
        ),
        "Let the browser fetch images only as they approach the viewport.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Lazy-load below-the-fold images",
        r#"<img src="/img/gallery-04.webp" loading="lazy" decoding="async" alt="...">"#,
    ));
    Some(out)
}

pub(super) fn uses_optimized_images(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Compress images",
        Priority::Medium,
        format!(
            "{} could be saved with better compression",
            crate::ui::format_bytes(audit.savings_bytes() as u64)
        ),
        "Re-encode JPEGs at a sane quality level; most photographs survive \
         quality 80 untouched.",
    );
    out.fixes.push(Snippet::new(
        "bash",
        "Re-encode JPEGs",
        "npx sharp-cli --input 'img/*.jpg' --output dist/img/ --quality 80",
    ));
    Some(out)
}

pub(super) fn document_title(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Add a document title",
        Priority::Low,
        "The page has no usable <title>".to_string(),
        "The title names the tab, the bookmark and the search result. One \
         short, specific line per page.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Set a descriptive title",
        "<title>Checkout - Example Store</title>",
    ));
    Some(out)
}

pub(super) fn framework_bundle_fix(report: &LighthouseReport) -> Option<Fix> {
    let audit = report.audit("unused-javascript")?;
    let framework_items: Vec<&crate::core::DetailItem> = audit
        .items()
        .iter()
        .filter(|item| {
            item.url
                .as_deref()
                .is_some_and(|url| url.contains(FRAMEWORK_CHUNK_MARKER))
        })
        .collect();
    if framework_items.is_empty() {
        return None;
    }

    let wasted_bytes: f64 = framework_items.iter().filter_map(|i| i.wasted_bytes).sum();
    let mut out = fix(
        audit,
        "Trim framework chunks",
        Priority::Medium,
        format!(
            "{} of framework-bundled JavaScript goes unused across {} chunk(s)",
            crate::ui::format_bytes(wasted_bytes as u64),
            framework_items.len()
        ),
        "Framework chunks grow with every page-level import. Move rarely \
         used components behind dynamic imports so they leave the shared \
         bundles.",
    );
    out.fixes.push(Snippet::new(
        "js",
        "Split page-level components out of shared chunks",
        r#"import dynamic from "next/dynamic";

const AdminPanel = dynamic(() => import("../components/AdminPanel"), {
  ssr: false,
});"#,
    ));
    out.fixes.push(Snippet::new(
        "bash",
        "See what each chunk contains",
        "ANALYZE=true npx next build",
    ));
    Some(out)
}
