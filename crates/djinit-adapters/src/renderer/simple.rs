//! Simple variable substitution renderer.

use djinit_core::{
    application::ports::TemplateRenderer,
    domain::{RenderContext, VirtualFileTree},
    error::DjinitResult,
};
use tracing::{debug, instrument};

/// Renderer using the domain's `{{ var }}` / `__TOKEN__` substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(files = tree.len()))]
    fn render(&self, tree: &VirtualFileTree, context: &RenderContext) -> DjinitResult<VirtualFileTree> {
        let rendered = tree.render(context)?;
        debug!(
            project = context.project_name(),
            app = context.app_name(),
            "tree rendered"
        );
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use djinit_core::domain::{FeatureCatalog, FileTree, ResolvedSelection, TemplateComposer};

    #[test]
    fn renders_composed_tree() {
        let base = FileTree::new()
            .with_file("__APP__/apps.py", "name = \"{{ app_name }}\"\n")
            .unwrap();
        let catalog = FeatureCatalog::empty();
        let tree = TemplateComposer::new(&catalog)
            .compose(&base, &ResolvedSelection::empty())
            .unwrap();

        let out = SimpleRenderer::new()
            .render(&tree, &RenderContext::new("shop", "catalog"))
            .unwrap();

        assert_eq!(out.get("catalog/apps.py"), Some("name = \"catalog\"\n"));
    }
}
