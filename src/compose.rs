use crate::types::{PageRecord, ResolvedPage, SiteSettings, SourceKind, TemplateRecord};
use thiserror::Error as ThisError;

pub const HARDCODED_TITLE: &str = "Welcome";
const HARDCODED_BODY: &str =
    "<p>This site is running on built-in default content. \
     Connect a database to manage pages.</p>";

const BUILTIN_WRAPPER_BODY: &str =
    "<div><h1>{{page_title}}</h1><div>{{page_content}}</div></div>";
const BUILTIN_WRAPPER_CSS: &str = "body{font-family:sans-serif;margin:2rem;line-height:1.5}";

#[derive(Debug, ThisError)]
pub enum ComposeError {
    /// The one hard error in composition: with neither a body nor a
    /// header/footer pair there is no markup to compose, and the caller
    /// must fall back further.
    #[error("template '{0}' provides neither body nor header/footer markup")]
    NoTemplate(String),
}

/// Merge one page, its template and the site settings into a renderable
/// document. Pure and idempotent: the same triple always composes to a
/// byte-identical result. The output is unsanitized markup (template script
/// included); sandboxing it is the caller's trust boundary, not ours.
pub fn compose(
    page: &PageRecord,
    template: &TemplateRecord,
    settings: &SiteSettings,
    source: SourceKind,
) -> Result<ResolvedPage, ComposeError> {
    let mut html = if template.is_wrapped() {
        compose_wrapped(page, template, settings)
    } else if let Some(body) = template.body.as_deref() {
        compose_single_body(page, body)
    } else {
        return Err(ComposeError::NoTemplate(template.name.clone()));
    };

    if !template.script.is_empty() {
        html.push_str("<script>");
        html.push_str(&template.script);
        html.push_str("</script>");
    }

    Ok(ResolvedPage {
        html,
        stylesheet: combine_stylesheets(settings, template, page),
        source,
    })
}

/// Header with placeholders substituted, raw page content, footer verbatim.
fn compose_wrapped(page: &PageRecord, template: &TemplateRecord, settings: &SiteSettings) -> String {
    let header = template.header.as_deref().unwrap_or_default();
    let footer = template.footer.as_deref().unwrap_or_default();

    let mut html = substitute(header, "{{page_title}}", &page.title);
    html = substitute(&html, "{{template_css}}", &template.css);
    html = substitute(&html, "{{page_css}}", &page.page_css);
    html = substitute(&html, "{{custom_css}}", &settings.custom_css);
    html.push_str(&page.content);
    html.push_str(footer);
    html
}

fn compose_single_body(page: &PageRecord, body: &str) -> String {
    let html = substitute(body, "{{page_title}}", &page.title);
    substitute(&html, "{{page_content}}", &page.content)
}

/// Literal, first-occurrence-only replacement. A template repeating a
/// placeholder only gets the first occurrence filled; kept that way for
/// compatibility with existing template data.
fn substitute(haystack: &str, token: &str, value: &str) -> String {
    haystack.replacen(token, value, 1)
}

/// Fixed cascade order: site settings, then template, then page, so later
/// layers can override earlier ones under normal CSS rules. Absent layers
/// contribute nothing; this never fails.
fn combine_stylesheets(
    settings: &SiteSettings,
    template: &TemplateRecord,
    page: &PageRecord,
) -> String {
    [
        settings.custom_css.as_str(),
        template.css.as_str(),
        page.page_css.as_str(),
    ]
    .iter()
    .filter(|layer| !layer.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join("\n")
}

/// Compose a page under the built-in wrapper. Infallible: used when a page
/// exists but no stored template is usable, not even the default one.
pub fn compose_builtin(
    page: &PageRecord,
    settings: &SiteSettings,
    source: SourceKind,
) -> ResolvedPage {
    let template = builtin_template();
    ResolvedPage {
        html: compose_single_body(page, BUILTIN_WRAPPER_BODY),
        stylesheet: combine_stylesheets(settings, &template, page),
        source,
    }
}

/// Minimal wrapper synthesized when a page exists but no stored template
/// can be found for it, not even the default one.
pub fn builtin_template() -> TemplateRecord {
    TemplateRecord {
        name: "builtin".to_string(),
        body: Some(BUILTIN_WRAPPER_BODY.to_string()),
        header: None,
        footer: None,
        css: BUILTIN_WRAPPER_CSS.to_string(),
        script: String::new(),
    }
}

/// Last-resort document used when the static dataset itself is unreadable.
pub fn hardcoded_page() -> ResolvedPage {
    ResolvedPage {
        html: substitute(
            &substitute(BUILTIN_WRAPPER_BODY, "{{page_title}}", HARDCODED_TITLE),
            "{{page_content}}",
            HARDCODED_BODY,
        ),
        stylesheet: String::new(),
        source: SourceKind::Hardcoded,
    }
}
