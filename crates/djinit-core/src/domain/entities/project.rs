use std::fmt;

use super::DomainError;
use super::render::RenderContext;
use crate::domain::resolver::ResolvedSelection;

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 49;

/// Names Django or Python tooling already claims inside a project.
const RESERVED_NAMES: &[&str] = &[
    "test", "tests", "django", "admin", "api", "static", "media", "manage", "settings", "urls",
    "wsgi", "asgi", "models", "views",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// A project or app name usable as a Python package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: String| DomainError::InvalidName {
            name: name.clone(),
            reason,
        };

        let len = name.chars().count();
        if len < MIN_NAME_LEN {
            return Err(invalid(format!(
                "must be at least {MIN_NAME_LEN} characters"
            )));
        }
        if len > MAX_NAME_LEN {
            return Err(invalid(format!("must be at most {MAX_NAME_LEN} characters")));
        }

        let mut chars = name.chars();
        if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("must start with a letter".into()));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                "only letters, digits and underscores are allowed".into(),
            ));
        }

        if PYTHON_KEYWORDS.contains(&name.as_str()) {
            return Err(invalid("is a Python keyword".into()));
        }
        let lowered = name.to_ascii_lowercase();
        if RESERVED_NAMES.contains(&lowered.as_str()) {
            return Err(invalid("is reserved by Django".into()));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the writer needs to materialize one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    project_name: ModuleName,
    app_name: ModuleName,
    selection: ResolvedSelection,
    init_git: bool,
}

impl ProjectSpec {
    pub fn new(
        project_name: impl Into<String>,
        app_name: impl Into<String>,
        selection: ResolvedSelection,
        init_git: bool,
    ) -> Result<Self, DomainError> {
        let project_name = ModuleName::new(project_name)?;
        let app_name = ModuleName::new(app_name)?;

        if project_name.as_str().eq_ignore_ascii_case(app_name.as_str()) {
            return Err(DomainError::NameCollision {
                name: app_name.to_string(),
            });
        }

        Ok(Self {
            project_name,
            app_name,
            selection,
            init_git,
        })
    }

    pub fn project_name(&self) -> &str {
        self.project_name.as_str()
    }

    pub fn app_name(&self) -> &str {
        self.app_name.as_str()
    }

    pub fn selection(&self) -> &ResolvedSelection {
        &self.selection
    }

    pub fn init_git(&self) -> bool {
        self.init_git
    }

    /// A render context for this project with a freshly generated secret key.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.project_name(), self.app_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(name: &str) -> String {
        match ModuleName::new(name) {
            Err(DomainError::InvalidName { reason, .. }) => reason,
            other => panic!("expected InvalidName for {name:?}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_typical_names() {
        for ok in ["mysite", "shop_api", "Blog2", "ab"] {
            assert!(ModuleName::new(ok).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(reason("a").contains("at least"));
        assert!(reason(&"x".repeat(50)).contains("at most"));
        assert!(reason("1site").contains("start with a letter"));
        assert!(reason("my-site").contains("only letters"));
    }

    #[test]
    fn rejects_keywords_and_reserved_names() {
        assert!(reason("class").contains("keyword"));
        assert!(reason("Admin").contains("reserved"));
        assert!(reason("settings").contains("reserved"));
    }

    #[test]
    fn project_and_app_must_differ() {
        let err = ProjectSpec::new("shop", "Shop", ResolvedSelection::empty(), false).unwrap_err();
        assert!(matches!(err, DomainError::NameCollision { .. }));
    }

    #[test]
    fn spec_exposes_names_and_flag() {
        let spec = ProjectSpec::new("shop", "catalog", ResolvedSelection::empty(), true).unwrap();
        assert_eq!(spec.project_name(), "shop");
        assert_eq!(spec.app_name(), "catalog");
        assert!(spec.init_git());
        assert!(spec.selection().is_empty());
    }
}
