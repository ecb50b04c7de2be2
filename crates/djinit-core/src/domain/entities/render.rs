use std::collections::BTreeMap;

use uuid::Uuid;

/// Path token replaced by the project (Django settings package) name.
pub const PROJECT_TOKEN: &str = "__PROJECT__";
/// Path token replaced by the application name.
pub const APP_TOKEN: &str = "__APP__";

/// Context for template rendering.
///
/// A **Value Object** holding the variables substituted into the composed
/// tree. Immutable after creation; [`RenderContext::with_variable`] returns a
/// new instance.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `project_name` | "shop" | User input |
/// | `app_name` | "catalog" | User input |
/// | `secret_key` | "django-insecure-…" | Generated per scaffold |
///
/// Content placeholders are written `{{ name }}` or `{{name}}`. Paths use
/// the `__PROJECT__` and `__APP__` tokens instead, since braces are awkward
/// in file names.
#[derive(Debug, Clone)]
pub struct RenderContext {
    project_name: String,
    app_name: String,
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    /// Create a context with `project_name` and `app_name` set and a fresh
    /// `secret_key`.
    pub fn new(project_name: impl Into<String>, app_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        let app_name = app_name.into();

        let mut variables = BTreeMap::new();
        variables.insert("project_name".to_string(), project_name.clone());
        variables.insert("app_name".to_string(), app_name.clone());
        variables.insert("secret_key".to_string(), generate_secret_key());

        Self {
            project_name,
            app_name,
            variables,
        }
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Replace `{{ var }}` and `{{var}}` placeholders.
    ///
    /// Unknown placeholders stay literal.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (key, value) in &self.variables {
            for placeholder in [format!("{{{{ {key} }}}}"), format!("{{{{{key}}}}}")] {
                if result.contains(&placeholder) {
                    result = result.replace(&placeholder, value);
                }
            }
        }

        result
    }

    /// Replace the `__PROJECT__` and `__APP__` path tokens.
    pub fn render_path(&self, path: &str) -> String {
        path.replace(PROJECT_TOKEN, &self.project_name)
            .replace(APP_TOKEN, &self.app_name)
    }
}

/// A Django-style development secret key: `django-insecure-` + 64 hex chars.
pub fn generate_secret_key() -> String {
    format!(
        "django-insecure-{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}
