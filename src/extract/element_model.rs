use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Input,
    Button,
    Link,
}

impl ElementKind {
    /// Tag used to scope text-match selectors for this kind.
    pub fn text_scope(&self) -> &'static str {
        match self {
            ElementKind::Input => "input",
            ElementKind::Button => "button",
            ElementKind::Link => "a",
        }
    }
}

/// One extracted (name, selector) pair, not yet reconciled against an
/// existing artifact. Names are identifier-safe but may repeat within a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementCandidate {
    pub name: String,
    pub selector: String,
    pub kind: ElementKind,
}

impl ElementCandidate {
    pub fn new(name: impl Into<String>, selector: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            kind,
        }
    }
}
