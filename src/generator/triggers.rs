use serde::{Deserialize, Serialize};

use super::template::{LOGIN_METHOD, LOGOUT_METHOD};

/// A method block appended to artifacts whose URL contains `url_contains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTrigger {
    /// Case-insensitive substring matched against the page URL.
    pub url_contains: String,
    /// Method name; `def <name>(` in an artifact counts as already present.
    pub name: String,
    /// Source block appended verbatim.
    pub body: String,
}

impl MethodTrigger {
    pub fn new(url_contains: impl Into<String>, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url_contains: url_contains.into(),
            name: name.into(),
            body: body.into(),
        }
    }

    pub fn matches_url(&self, url: &str) -> bool {
        !self.url_contains.is_empty()
            && url
                .to_lowercase()
                .contains(&self.url_contains.to_lowercase())
    }

    /// Whether `content` already carries this block, verbatim or by its `def`.
    pub fn is_present_in(&self, content: &str) -> bool {
        content.contains(self.body.as_str()) || content.contains(&format!("def {}(", self.name))
    }
}

pub fn default_triggers() -> Vec<MethodTrigger> {
    vec![
        MethodTrigger::new("/login", "do_login", LOGIN_METHOD),
        MethodTrigger::new("/secure", "logout", LOGOUT_METHOD),
    ]
}

/// Triggers whose pattern occurs in `url`, in table order.
pub fn matching<'a>(triggers: &'a [MethodTrigger], url: &str) -> Vec<&'a MethodTrigger> {
    triggers.iter().filter(|t| t.matches_url(url)).collect()
}
