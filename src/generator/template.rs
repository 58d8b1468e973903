//! Source text emitted into page-object artifacts (Python, pytest-playwright).
//!
//! The declaration line shape is what `artifact::scanner` reads back, so any
//! change here must stay compatible with `scanner::declared_name`.

/// Indentation of declaration lines inside the constructor.
pub const DECLARATION_INDENT: &str = "        ";

/// Constructor line that binds the page context.
pub const PAGE_BINDING: &str = "self.page = page";

/// Presence of this text means the generic block is already in the artifact.
pub const GENERIC_MARKER: &str = "def fill_input";

pub const GENERIC_METHODS: &str = r#"
    # --- Generic element methods ---
    def _element(self, locator_name):
        locator = getattr(self, locator_name, None)
        if locator is None or locator_name == "page" or callable(locator):
            raise AttributeError(f"unknown element name: {locator_name}")
        return locator

    def fill_input(self, locator_name, value):
        self._element(locator_name).fill(value)

    def click_button(self, locator_name):
        self._element(locator_name).click()

    def get_text(self, locator_name):
        return self._element(locator_name).inner_text()

    def is_visible(self, locator_name):
        return self._element(locator_name).is_visible()
"#;

pub const LOGIN_METHOD: &str = r#"
    def do_login(self, user, pwd):
        self.fill_input("username", user)
        self.fill_input("password", pwd)
        self.click_button("login_button")
"#;

pub const LOGOUT_METHOD: &str = r#"
    def logout(self):
        self.click_button("logout_button")
"#;

/// Class declaration and constructor for a new artifact.
pub fn class_header(artifact_name: &str) -> String {
    format!(
        "class {}:\n    def __init__(self, page):\n{}{}\n\n",
        artifact_name, DECLARATION_INDENT, PAGE_BINDING
    )
}

/// `        self.<name> = page.locator('<selector>')`
///
/// The selector goes in single quotes; text selectors carry their own
/// double quotes, and any single quote or backslash is escaped.
pub fn declaration_line(name: &str, selector: &str) -> String {
    format!(
        "{}self.{} = page.locator({})\n",
        DECLARATION_INDENT,
        name,
        single_quoted(selector)
    )
}

/// Python single-quoted string literal.
pub fn single_quoted(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::scanner::declared_name;

    #[test]
    fn declaration_line_round_trips_through_scanner() {
        let line = declaration_line("search", "[name='q']");
        assert_eq!(line, "        self.search = page.locator('[name=\\'q\\']')\n");
        assert_eq!(declared_name(line.trim_end()), Some("search"));
    }

    #[test]
    fn header_ends_with_page_binding_and_blank_line() {
        let header = class_header("LoginPage");
        assert!(header.starts_with("class LoginPage:\n"));
        assert!(header.ends_with("        self.page = page\n\n"));
    }
}
