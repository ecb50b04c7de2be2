pub mod common;
pub mod feature;
pub mod file_tree;
pub mod project;
pub mod render;

pub use crate::domain::DomainError;
pub use feature::{Feature, FeatureBuilder, FeatureId, Fragment, MergeStrategy};
pub use file_tree::{FileTree, VirtualFileTree};
pub use project::{ModuleName, ProjectSpec};
pub use render::RenderContext;
