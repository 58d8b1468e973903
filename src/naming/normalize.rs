use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder word used when visible text has nothing usable left.
pub const UNNAMED: &str = "unnamed";

/// Python keywords; an element named after one gets a trailing `_`.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Members every page object already defines; element names must not shadow them.
pub const RESERVED_MEMBERS: &[&str] = &[
    "page",
    "_element",
    "fill_input",
    "click_button",
    "get_text",
    "is_visible",
];

static NOT_ALNUM_OR_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("static regex"));

// A capitalized word preceded by anything: "HTTPServer" -> "HTTP_Server"
static BEFORE_CAPITALIZED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static regex"));

// Lower/digit directly followed by upper: "loginPage" -> "login_Page"
static LOWER_TO_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

// ============================================================================
// Visible text -> identifier
// ============================================================================

/// Split visible text into lowercase identifier words.
///
/// Everything outside ASCII alphanumerics and whitespace is dropped first,
/// so `"Log in!"` becomes `["log", "in"]` and `"×"` becomes `[]`.
pub fn to_identifier_words(text: &str) -> Vec<String> {
    NOT_ALNUM_OR_SPACE
        .replace_all(text, "")
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Derive a snake_case name from visible text and append `suffix`.
///
/// Falls back to `"unnamed" + suffix` when the cleaned text is empty.
pub fn safe_name_from_text(text: &str, suffix: &str) -> String {
    let words = to_identifier_words(text);
    let base = if words.is_empty() {
        UNNAMED.to_string()
    } else {
        words.join("_")
    };
    guard_identifier(format!("{}{}", base, suffix))
}

/// Turn an `id` / `name` attribute value into an identifier fragment.
///
/// Lowercases and replaces anything outside `[a-z0-9_]` with `_`.
pub fn identifier_from_attr(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    guard_identifier(cleaned)
}

/// Keep a derived name importable: no leading digit, no keyword, no clash
/// with members of the generated class.
fn guard_identifier(name: String) -> String {
    let name = if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("el_{}", name)
    } else {
        name
    };

    if PYTHON_KEYWORDS.contains(&name.as_str()) || RESERVED_MEMBERS.contains(&name.as_str()) {
        format!("{}_", name)
    } else {
        name
    }
}

// ============================================================================
// Naming convention conversion
// ============================================================================

/// Convert `CapitalizedWords` to `separator_joined` form.
///
/// Two boundary rules run in sequence: first split before every capitalized
/// word, then split lower/digit-to-upper transitions. `"HTTPServerPage"`
/// yields `"http_server_page"` and `"LoginPage"` yields `"login_page"`.
pub fn camel_to_snake(name: &str) -> String {
    let split_words = BEFORE_CAPITALIZED_WORD.replace_all(name, "${1}_${2}");
    LOWER_TO_UPPER
        .replace_all(&split_words, "${1}_${2}")
        .to_lowercase()
}

/// Derive a page-object class name from a URL.
///
/// Uses the last two path parts (split on `/`, `-` and `_`), capitalized and
/// joined, plus `Page`. A URL without path parts maps to `HomePage`.
pub fn class_name_from_url(url: &str) -> String {
    let path = crate::artifact::path::url_path(url);
    let parts: Vec<String> = path
        .split(['/', '-', '_'])
        .map(|p| p.chars().filter(|c| c.is_ascii_alphanumeric()).collect::<String>())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        return "HomePage".to_string();
    }

    let tail = &parts[parts.len().saturating_sub(2)..];
    let mut name: String = tail.iter().map(|p| capitalize(p)).collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'P');
    }
    name.push_str("Page");
    name
}

/// Check that a name can be emitted verbatim as a class name.
pub fn is_valid_artifact_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
