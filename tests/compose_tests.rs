use pagefall::compose::{self, ComposeError, HARDCODED_TITLE};
use pagefall::types::{PageRecord, SiteSettings, SourceKind, TemplateRecord};

fn page() -> PageRecord {
    PageRecord {
        slug: "about".to_string(),
        title: "About Us".to_string(),
        content: "<p>Hello</p>".to_string(),
        page_css: ".about{color:red}".to_string(),
        template: "default".to_string(),
        status: "published".to_string(),
    }
}

fn settings() -> SiteSettings {
    SiteSettings {
        custom_css: "body{background:#eee}".to_string(),
        site_title: "Test Site".to_string(),
    }
}

fn wrapped_template() -> TemplateRecord {
    TemplateRecord {
        name: "default".to_string(),
        body: None,
        header: Some(
            "<head><title>{{page_title}}</title><style>{{template_css}}|{{page_css}}|{{custom_css}}</style></head><main>"
                .to_string(),
        ),
        footer: Some("</main><footer>{{page_title}}</footer>".to_string()),
        css: "main{padding:1rem}".to_string(),
        script: String::new(),
    }
}

fn body_template() -> TemplateRecord {
    TemplateRecord {
        name: "plain".to_string(),
        body: Some("<article><h1>{{page_title}}</h1>{{page_content}}</article>".to_string()),
        header: None,
        footer: None,
        css: String::new(),
        script: String::new(),
    }
}

#[test]
fn wrapped_mode_substitutes_header_and_appends_footer_verbatim() {
    let resolved = compose::compose(&page(), &wrapped_template(), &settings(), SourceKind::Live)
        .expect("compose failed");

    assert!(resolved.html.starts_with("<head><title>About Us</title>"));
    assert!(
        resolved
            .html
            .contains("<style>main{padding:1rem}|.about{color:red}|body{background:#eee}</style>")
    );
    assert!(resolved.html.contains("<main><p>Hello</p></main>"));
    // Footer placeholders are never substituted.
    assert!(resolved.html.ends_with("<footer>{{page_title}}</footer>"));
    assert_eq!(resolved.source, SourceKind::Live);
}

#[test]
fn single_body_mode_substitutes_title_and_content() {
    let resolved = compose::compose(&page(), &body_template(), &settings(), SourceKind::Static)
        .expect("compose failed");

    assert_eq!(
        resolved.html,
        "<article><h1>About Us</h1><p>Hello</p></article>"
    );
    assert_eq!(resolved.source, SourceKind::Static);
}

#[test]
fn substitution_is_first_occurrence_only() {
    let mut template = body_template();
    template.body = Some("{{page_title}} and again {{page_title}}".to_string());

    let resolved = compose::compose(&page(), &template, &settings(), SourceKind::Static)
        .expect("compose failed");

    assert_eq!(resolved.html, "About Us and again {{page_title}}");
}

#[test]
fn missing_fields_substitute_as_empty_strings() {
    let mut blank = page();
    blank.title = String::new();
    blank.content = String::new();

    let resolved = compose::compose(&blank, &body_template(), &settings(), SourceKind::Static)
        .expect("compose failed");

    assert_eq!(resolved.html, "<article><h1></h1></article>");
    assert!(!resolved.html.contains("null"));
    assert!(!resolved.html.contains("undefined"));
}

#[test]
fn stylesheet_order_is_settings_then_template_then_page() {
    let resolved = compose::compose(&page(), &wrapped_template(), &settings(), SourceKind::Live)
        .expect("compose failed");

    assert_eq!(
        resolved.stylesheet,
        "body{background:#eee}\nmain{padding:1rem}\n.about{color:red}"
    );
}

#[test]
fn empty_stylesheet_layers_are_skipped_but_order_holds() {
    let mut no_custom = settings();
    no_custom.custom_css = String::new();

    let resolved = compose::compose(&page(), &wrapped_template(), &no_custom, SourceKind::Live)
        .expect("compose failed");
    assert_eq!(resolved.stylesheet, "main{padding:1rem}\n.about{color:red}");

    let mut bare = page();
    bare.page_css = String::new();
    let mut template = wrapped_template();
    template.css = String::new();
    let resolved = compose::compose(&bare, &template, &settings(), SourceKind::Live)
        .expect("compose failed");
    assert_eq!(resolved.stylesheet, "body{background:#eee}");
}

#[test]
fn composition_is_idempotent() {
    let first = compose::compose(&page(), &wrapped_template(), &settings(), SourceKind::Live)
        .expect("compose failed");
    let second = compose::compose(&page(), &wrapped_template(), &settings(), SourceKind::Live)
        .expect("compose failed");

    assert_eq!(first, second);
}

#[test]
fn template_with_no_markup_is_a_hard_error() {
    let template = TemplateRecord {
        name: "broken".to_string(),
        body: None,
        header: None,
        footer: None,
        css: String::new(),
        script: String::new(),
    };

    let err = compose::compose(&page(), &template, &settings(), SourceKind::Static)
        .expect_err("expected composition to fail");
    assert!(matches!(err, ComposeError::NoTemplate(name) if name == "broken"));
}

#[test]
fn header_without_footer_is_not_wrapped_mode() {
    let template = TemplateRecord {
        name: "half".to_string(),
        body: None,
        header: Some("<main>".to_string()),
        footer: None,
        css: String::new(),
        script: String::new(),
    };

    assert!(compose::compose(&page(), &template, &settings(), SourceKind::Static).is_err());
}

#[test]
fn template_script_is_appended_as_script_block() {
    let mut template = body_template();
    template.script = "console.log('hi')".to_string();

    let resolved = compose::compose(&page(), &template, &settings(), SourceKind::Static)
        .expect("compose failed");
    assert!(resolved.html.ends_with("<script>console.log('hi')</script>"));
}

#[test]
fn builtin_wrapper_composes_without_a_stored_template() {
    let resolved = compose::compose_builtin(&page(), &settings(), SourceKind::Live);

    assert_eq!(
        resolved.html,
        "<div><h1>About Us</h1><div><p>Hello</p></div></div>"
    );
    assert_eq!(resolved.source, SourceKind::Live);
    // Baseline stylesheet still layers under the page's own css.
    assert!(resolved.stylesheet.starts_with("body{background:#eee}"));
    assert!(resolved.stylesheet.ends_with(".about{color:red}"));
}

#[test]
fn hardcoded_page_uses_fixed_welcome_title() {
    let resolved = compose::hardcoded_page();

    assert_eq!(resolved.source, SourceKind::Hardcoded);
    assert!(resolved.html.contains(&format!("<h1>{HARDCODED_TITLE}</h1>")));
    assert!(resolved.stylesheet.is_empty());
}
