use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::naming::alias::AliasTable;
use crate::naming::normalize::{identifier_from_attr, safe_name_from_text};

use super::element_model::{ElementCandidate, ElementKind};

/// Suffix appended to button and link names that do not come from an alias.
pub const ACTION_SUFFIX: &str = "_button";

static CSS_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").expect("static regex"));

// ============================================================================
// Extraction entry points
// ============================================================================

/// Parse `html` and extract element candidates.
///
/// Output order: input-like fields, then buttons, then links, each in
/// document order. Elements without usable identity are skipped silently.
pub fn extract(html: &str, aliases: &AliasTable) -> Vec<ElementCandidate> {
    let document = Html::parse_document(html);
    extract_from_document(&document, aliases)
}

/// Same as [`extract`] for an already-parsed document.
pub fn extract_from_document(document: &Html, aliases: &AliasTable) -> Vec<ElementCandidate> {
    let elements: Vec<ElementRef<'_>> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect();

    let mut candidates = Vec::new();
    candidates.extend(elements.iter().filter_map(|el| input_candidate(*el)));
    candidates.extend(
        elements
            .iter()
            .filter(|el| el.value().name() == "button")
            .filter_map(|el| action_candidate(*el, ElementKind::Button, aliases)),
    );
    candidates.extend(
        elements
            .iter()
            .filter(|el| el.value().name() == "a")
            .filter_map(|el| action_candidate(*el, ElementKind::Link, aliases)),
    );
    candidates
}

// ============================================================================
// Per-kind rules
// ============================================================================

/// `<input>` (not hidden), `<textarea>` and `<select>`: `id` first, then `name`.
fn input_candidate(el: ElementRef<'_>) -> Option<ElementCandidate> {
    let tag = el.value().name();
    let input_like = match tag {
        "input" => !attr(el, "type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
        "textarea" | "select" => true,
        _ => false,
    };
    if !input_like {
        return None;
    }

    if let Some(id) = attr(el, "id") {
        return Some(ElementCandidate::new(
            identifier_from_attr(id),
            id_selector(id),
            ElementKind::Input,
        ));
    }

    attr(el, "name").map(|name| {
        ElementCandidate::new(
            identifier_from_attr(name),
            format!("[name='{}']", escape_css_single(name)),
            ElementKind::Input,
        )
    })
}

/// Buttons and links share one policy; only the selector scope differs.
fn action_candidate(
    el: ElementRef<'_>,
    kind: ElementKind,
    aliases: &AliasTable,
) -> Option<ElementCandidate> {
    if let Some(id) = attr(el, "id") {
        return Some(ElementCandidate::new(
            format!("{}{}", identifier_from_attr(id), ACTION_SUFFIX),
            id_selector(id),
            kind,
        ));
    }

    let text = visible_text(el);
    if text.is_empty() {
        return None;
    }

    let name = match aliases.resolve(&text) {
        Some(alias) => alias.to_string(),
        None => safe_name_from_text(&text, ACTION_SUFFIX),
    };

    Some(ElementCandidate::new(
        name,
        has_text_selector(kind, &text),
        kind,
    ))
}

// ============================================================================
// Selector helpers
// ============================================================================

/// `#id` for plain CSS identifiers, `[id='...']` otherwise.
pub fn id_selector(id: &str) -> String {
    if CSS_IDENT.is_match(id) {
        format!("#{}", id)
    } else {
        format!("[id='{}']", escape_css_single(id))
    }
}

/// Text-content match scoped to the element kind, e.g. `button:has-text("Login")`.
pub fn has_text_selector(kind: ElementKind, text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{}:has-text(\"{}\")", kind.text_scope(), escaped)
}

fn escape_css_single(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Non-empty attribute value, trimmed.
fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Descendant text with whitespace runs collapsed.
fn visible_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
