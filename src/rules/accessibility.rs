use crate::core::{Audit, Fix, Priority, Snippet};

use super::fix;

pub(super) fn color_contrast(audit: &Audit) -> Option<Fix> {
    let count = audit.items().len();
    let mut out = fix(
        audit,
        "Fix insufficient color contrast",
        Priority::High,
        format!("{count} element(s) fall below the WCAG AA contrast ratio"),
        "Low-contrast text is unreadable for a large share of users. Aim for \
         4.5:1 on body text and 3:1 on large headings.",
    );
    out.fixes.push(Snippet::new(
        "css",
        "Raise text contrast",
        r#"/* 4.6:1 on white, passes AA for body text */
.muted {
  color: #595959;
}"#,
    ));
    Some(out)
}

pub(super) fn heading_order(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Fix heading order",
        Priority::Medium,
        "Headings skip levels, breaking the page outline".to_string(),
        "Screen readers navigate by heading level. Step down one level at a \
         time and style with CSS, not by picking a smaller heading tag.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Step headings one level at a time",
        r#"<h1>Plans</h1>
  <h2>Team plan</h2>
    <h3>Billing</h3>"#,
    ));
    Some(out)
}

pub(super) fn image_alt(audit: &Audit) -> Option<Fix> {
    let count = audit.items().len();
    let mut out = fix(
        audit,
        "Add alt text to images",
        Priority::High,
        format!("{count} image(s) have no text alternative"),
        "Describe what the image conveys; mark purely decorative images with \
         an empty alt so they are skipped.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Describe meaningful images, silence decorative ones",
        r#"<img src="/img/chart-q3.png" alt="Q3 revenue up 18% over Q2">
<img src="/img/divider.svg" alt="">"#,
    ));
    Some(out)
}

pub(super) fn label(audit: &Audit) -> Option<Fix> {
    let count = audit.items().len();
    let mut out = fix(
        audit,
        "Label form controls",
        Priority::High,
        format!("{count} form control(s) have no associated label"),
        "Placeholders disappear on input and are not announced reliably. \
         Every control needs a real label.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Associate labels with controls",
        r#"<label for="email">Email address</label>
<input id="email" type="email" autocomplete="email">"#,
    ));
    Some(out)
}

pub(super) fn button_name(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Give buttons an accessible name",
        Priority::Medium,
        "Icon-only buttons announce as just \"button\"".to_string(),
        "A button with no text content needs an explicit accessible name.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Name icon-only buttons",
        r#"<button type="button" aria-label="Close dialog">
  <svg aria-hidden="true">…</svg>
</button>"#,
    ));
    Some(out)
}

pub(super) fn link_name(audit: &Audit) -> Option<Fix> {
    let mut out = fix(
        audit,
        "Use descriptive link text",
        Priority::Medium,
        "Links read as \"click here\" out of context".to_string(),
        "Links are often navigated as a list, stripped of surrounding text. \
         The link text alone should say where it goes.",
    );
    out.fixes.push(Snippet::new(
        "html",
        "Say where the link goes",
        r#"<!-- before: <a href="/pricing">click here</a> -->
<a href="/pricing">See pricing plans</a>"#,
    ));
    Some(out)
}
