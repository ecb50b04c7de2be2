//! Template composition: base tree + resolved features → [`VirtualFileTree`].
//!
//! ## Merge strategies
//!
//! | Strategy | Target must exist? | On clash |
//! |----------|--------------------|----------|
//! | create-or-replace | no (must NOT exist) | `ComposerConflict` |
//! | anchor-insert | yes, with marker pair | `AnchorNotFound` |
//! | list-entry | no | deduplicated |
//!
//! ## Anchors
//!
//! An anchor region is the lines between a line ending in
//! `djinit:begin <name>` and the next line ending in `djinit:end <name>`:
//!
//! ```text
//! INSTALLED_APPS = [
//!     "django.contrib.staticfiles",
//!     # djinit:begin third-party-apps
//!     "rest_framework",          <- inserted
//!     # djinit:end third-party-apps
//! ]
//! ```
//!
//! Inserted blocks go right above the end marker, indented like it. A fragment
//! applied twice to the same anchor of the same file lands once; a different
//! fragment is always appended, even when its lines already occur in the
//! region. Markers stay in the output so a later run over the same selection
//! is byte-identical.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, instrument, trace};

use super::DomainError;
use super::catalog::FeatureCatalog;
use super::entities::common::RelativePath;
use super::entities::{FileTree, Fragment, MergeStrategy, VirtualFileTree};
use super::resolver::ResolvedSelection;

const BEGIN_MARKER: &str = "djinit:begin";
const END_MARKER: &str = "djinit:end";

/// Merges feature fragments into a base tree. Never touches disk.
#[derive(Debug, Clone, Copy)]
pub struct TemplateComposer<'a> {
    catalog: &'a FeatureCatalog,
}

/// `(path, anchor, content)` of every anchor fragment applied so far.
type AppliedAnchors = HashSet<(RelativePath, String, String)>;

/// A file while composition is in progress.
#[derive(Debug)]
enum WorkingFile {
    Text(String),
    /// A list file; `BTreeSet` gives dedup + byte-order sort for free.
    List(BTreeSet<String>),
}

impl<'a> TemplateComposer<'a> {
    pub fn new(catalog: &'a FeatureCatalog) -> Self {
        Self { catalog }
    }

    /// Compose `base` with every fragment of every feature in `selection`.
    ///
    /// Features apply in catalog order, fragments in declared order. Any
    /// violation aborts the whole call.
    #[instrument(skip_all, fields(features = selection.len(), base_files = base.len()))]
    pub fn compose(
        &self,
        base: &FileTree,
        selection: &ResolvedSelection,
    ) -> Result<VirtualFileTree, DomainError> {
        let mut files: BTreeMap<RelativePath, WorkingFile> = base
            .iter()
            .map(|(path, content)| (path.clone(), WorkingFile::Text(content.to_string())))
            .collect();
        let mut applied = AppliedAnchors::new();

        for id in selection.iter() {
            let feature = self.catalog.lookup(id.as_str())?;
            for fragment in feature.fragments() {
                trace!(feature = %id, path = %fragment.path, strategy = %fragment.strategy, "applying fragment");
                apply_fragment(&mut files, &mut applied, fragment)?;
            }
        }

        let tree: BTreeMap<RelativePath, String> = files
            .into_iter()
            .map(|(path, file)| (path, finalize(file)))
            .collect();

        debug!(files = tree.len(), "composition complete");
        Ok(VirtualFileTree::from_map(tree))
    }
}

fn apply_fragment(
    files: &mut BTreeMap<RelativePath, WorkingFile>,
    applied: &mut AppliedAnchors,
    fragment: &Fragment,
) -> Result<(), DomainError> {
    let path = &fragment.path;

    match &fragment.strategy {
        MergeStrategy::CreateOrReplace => {
            if files.contains_key(path) {
                return Err(DomainError::ComposerConflict {
                    path: path.to_string(),
                });
            }
            files.insert(path.clone(), WorkingFile::Text(fragment.content.clone()));
        }

        MergeStrategy::AnchorInsert { anchor } => {
            let not_found = || DomainError::AnchorNotFound {
                path: path.to_string(),
                anchor: anchor.clone(),
            };
            let Some(WorkingFile::Text(text)) = files.get_mut(path) else {
                return Err(not_found());
            };
            let updated = insert_at_anchor(text, anchor, &fragment.content).ok_or_else(not_found)?;
            let key = fragment.content.trim_end_matches(['\r', '\n']).to_string();
            if applied.insert((path.clone(), anchor.clone(), key)) {
                *text = updated;
            } else {
                trace!(path = %path, anchor = %anchor, "fragment already applied");
            }
        }

        MergeStrategy::ListEntry => {
            let entry = fragment.content.trim_end().to_string();
            let file = files
                .entry(path.clone())
                .or_insert_with(|| WorkingFile::List(BTreeSet::new()));
            if let WorkingFile::Text(text) = &*file {
                let seeded = seed_entries(text);
                *file = WorkingFile::List(seeded);
            }
            if let WorkingFile::List(entries) = file {
                entries.insert(entry);
            }
        }
    }

    Ok(())
}

/// Existing non-empty lines of a base list file.
fn seed_entries(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn finalize(file: WorkingFile) -> String {
    match file {
        WorkingFile::Text(text) => text,
        WorkingFile::List(entries) => {
            let mut out = String::new();
            for entry in entries {
                out.push_str(&entry);
                out.push('\n');
            }
            out
        }
    }
}

/// Insert `block` before the end marker of `anchor`.
///
/// Returns `None` if either marker is missing. The file's line ending
/// (`\r\n` or `\n`) is kept.
fn insert_at_anchor(text: &str, anchor: &str, block: &str) -> Option<String> {
    let begin = format!("{BEGIN_MARKER} {anchor}");
    let end = format!("{END_MARKER} {anchor}");

    let lines: Vec<&str> = text.lines().collect();
    let begin_idx = lines
        .iter()
        .position(|line| line.trim_end().ends_with(&begin))?;
    let end_idx = begin_idx
        + 1
        + lines[begin_idx + 1..]
            .iter()
            .position(|line| line.trim_end().ends_with(&end))?;

    let end_line = lines[end_idx];
    let indent = &end_line[..end_line.len() - end_line.trim_start().len()];

    let block_lines: Vec<String> = block
        .trim_end_matches(['\r', '\n'])
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect();

    let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + block_lines.len());
    out.extend_from_slice(&lines[..end_idx]);
    out.extend(block_lines.iter().map(String::as_str));
    out.extend_from_slice(&lines[end_idx..]);

    let mut result = out.join(eol);
    if text.ends_with('\n') {
        result.push_str(eol);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Feature;
    use crate::domain::resolver::Resolver;

    fn path(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    const SETTINGS: &str = "\
INSTALLED_APPS = [
    \"django.contrib.admin\",
    # djinit:begin third-party-apps
    # djinit:end third-party-apps
]
";

    fn base() -> FileTree {
        FileTree::new()
            .with_file("settings/base.py", SETTINGS)
            .unwrap()
            .with_file("requirements.txt", "Django==5.2.6\nasgiref==3.9.1\n")
            .unwrap()
            .with_file("manage.py", "#!/usr/bin/env python\n")
            .unwrap()
    }

    fn compose(features: Vec<Feature>, requested: &[&str]) -> Result<VirtualFileTree, DomainError> {
        let catalog = FeatureCatalog::new(features).unwrap();
        let selection = Resolver::new(&catalog).resolve(requested).unwrap();
        TemplateComposer::new(&catalog).compose(&base(), &selection)
    }

    #[test]
    fn minimal_selection_reproduces_base_exactly() {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("drf")
                .fragment(Fragment::list_entry(path("requirements.txt"), "djangorestframework==3.16.0"))
                .build()
                .unwrap(),
        ])
        .unwrap();

        let tree = TemplateComposer::new(&catalog)
            .compose(&base(), &ResolvedSelection::empty())
            .unwrap();
        assert_eq!(tree.files(), base().files());
    }

    #[test]
    fn anchor_insert_indents_to_end_marker() {
        let tree = compose(
            vec![
                Feature::builder("drf")
                    .fragment(Fragment::anchor(
                        path("settings/base.py"),
                        "third-party-apps",
                        "\"rest_framework\",",
                    ))
                    .build()
                    .unwrap(),
            ],
            &["drf"],
        )
        .unwrap();

        assert_eq!(
            tree.get("settings/base.py").unwrap(),
            "\
INSTALLED_APPS = [
    \"django.contrib.admin\",
    # djinit:begin third-party-apps
    \"rest_framework\",
    # djinit:end third-party-apps
]
"
        );
    }

    #[test]
    fn anchor_insert_appends_in_catalog_order() {
        let tree = compose(
            vec![
                Feature::builder("drf")
                    .fragment(Fragment::anchor(path("settings/base.py"), "third-party-apps", "\"rest_framework\","))
                    .build()
                    .unwrap(),
                Feature::builder("cors")
                    .fragment(Fragment::anchor(path("settings/base.py"), "third-party-apps", "\"corsheaders\","))
                    .build()
                    .unwrap(),
            ],
            &["cors", "drf"],
        )
        .unwrap();

        let settings = tree.get("settings/base.py").unwrap();
        let drf = settings.find("rest_framework").unwrap();
        let cors = settings.find("corsheaders").unwrap();
        assert!(drf < cors);
    }

    #[test]
    fn same_fragment_twice_in_one_feature_applies_once() {
        let block = "\"x\",";
        let tree = compose(
            vec![
                Feature::builder("a")
                    .fragment(Fragment::anchor(path("settings/base.py"), "third-party-apps", block))
                    .fragment(Fragment::anchor(path("settings/base.py"), "third-party-apps", block))
                    .build()
                    .unwrap(),
            ],
            &["a"],
        )
        .unwrap();

        assert_eq!(tree.get("settings/base.py").unwrap().matches(block).count(), 1);
    }

    #[test]
    fn block_matching_part_of_an_earlier_block_is_still_inserted() {
        let base = FileTree::new()
            .with_file("conf.py", "# djinit:begin s\n# djinit:end s\n")
            .unwrap();
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("a")
                .fragment(Fragment::anchor(path("conf.py"), "s", "X = {\n}\n"))
                .build()
                .unwrap(),
            Feature::builder("b")
                .fragment(Fragment::anchor(path("conf.py"), "s", "}"))
                .build()
                .unwrap(),
        ])
        .unwrap();
        let selection = Resolver::new(&catalog).resolve(&["a", "b"]).unwrap();
        let tree = TemplateComposer::new(&catalog).compose(&base, &selection).unwrap();

        assert_eq!(
            tree.get("conf.py").unwrap(),
            "# djinit:begin s\nX = {\n}\n}\n# djinit:end s\n"
        );
    }

    #[test]
    fn anchor_insert_keeps_crlf_line_endings() {
        let text = "a\r\n# djinit:begin s\r\n# djinit:end s\r\n";
        let out = insert_at_anchor(text, "s", "x").unwrap();
        assert_eq!(out, "a\r\n# djinit:begin s\r\nx\r\n# djinit:end s\r\n");
    }

    #[test]
    fn identical_fragments_from_two_features_apply_once() {
        let block = "\"django.contrib.postgres\",";
        let tree = compose(
            vec![
                Feature::builder("a")
                    .fragment(Fragment::anchor(path("settings/base.py"), "third-party-apps", block))
                    .build()
                    .unwrap(),
                Feature::builder("b")
                    .fragment(Fragment::anchor(path("settings/base.py"), "third-party-apps", block))
                    .build()
                    .unwrap(),
            ],
            &["a", "b"],
        )
        .unwrap();

        assert_eq!(tree.get("settings/base.py").unwrap().matches(block).count(), 1);
    }

    #[test]
    fn multi_line_block_keeps_relative_indent() {
        let text = "X = {\n    # djinit:begin inner\n    # djinit:end inner\n}\n";
        let out = insert_at_anchor(text, "inner", "\"a\": [\n    1,\n],").unwrap();
        assert_eq!(
            out,
            "X = {\n    # djinit:begin inner\n    \"a\": [\n        1,\n    ],\n    # djinit:end inner\n}\n"
        );
    }

    #[test]
    fn missing_anchor_fails() {
        let err = compose(
            vec![
                Feature::builder("drf")
                    .fragment(Fragment::anchor(path("settings/base.py"), "middleware", "x"))
                    .build()
                    .unwrap(),
            ],
            &["drf"],
        )
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::AnchorNotFound {
                path: "settings/base.py".into(),
                anchor: "middleware".into()
            }
        );
    }

    #[test]
    fn anchor_in_missing_file_fails() {
        let err = compose(
            vec![
                Feature::builder("drf")
                    .fragment(Fragment::anchor(path("nope.py"), "x", "y"))
                    .build()
                    .unwrap(),
            ],
            &["drf"],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::AnchorNotFound { .. }));
    }

    #[test]
    fn unterminated_anchor_fails() {
        assert!(insert_at_anchor("# djinit:begin x\nfoo\n", "x", "y").is_none());
        assert!(insert_at_anchor("# djinit:end x\n# djinit:begin x\n", "x", "y").is_none());
    }

    #[test]
    fn list_entries_are_sorted_and_deduplicated() {
        let tree = compose(
            vec![
                Feature::builder("whitenoise")
                    .fragment(Fragment::list_entry(path("requirements.txt"), "whitenoise==6.9.0"))
                    .build()
                    .unwrap(),
                Feature::builder("drf")
                    .fragment(Fragment::list_entry(path("requirements.txt"), "djangorestframework==3.16.0"))
                    .fragment(Fragment::list_entry(path("requirements.txt"), "Django==5.2.6"))
                    .build()
                    .unwrap(),
            ],
            &["whitenoise", "drf"],
        )
        .unwrap();

        assert_eq!(
            tree.get("requirements.txt").unwrap(),
            "Django==5.2.6\nasgiref==3.9.1\ndjangorestframework==3.16.0\nwhitenoise==6.9.0\n"
        );
    }

    #[test]
    fn list_entry_creates_missing_file() {
        let tree = compose(
            vec![
                Feature::builder("gunicorn")
                    .fragment(Fragment::list_entry(path("Procfile.d/web"), "gunicorn"))
                    .build()
                    .unwrap(),
            ],
            &["gunicorn"],
        )
        .unwrap();
        assert_eq!(tree.get("Procfile.d/web"), Some("gunicorn\n"));
    }

    #[test]
    fn create_over_base_file_is_a_conflict() {
        let err = compose(
            vec![
                Feature::builder("a")
                    .fragment(Fragment::create(path("settings/base.py"), "X = 1\n"))
                    .build()
                    .unwrap(),
            ],
            &["a"],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::ComposerConflict {
                path: "settings/base.py".into()
            }
        );
    }

    #[test]
    fn two_features_creating_same_file_conflict() {
        let catalog = FeatureCatalog::new(vec![
            Feature::builder("a")
                .fragment(Fragment::create(path("settings/base.py"), "A\n"))
                .build()
                .unwrap(),
            Feature::builder("b")
                .fragment(Fragment::create(path("settings/base.py"), "B\n"))
                .build()
                .unwrap(),
        ])
        .unwrap();
        let selection = Resolver::new(&catalog).resolve(["a", "b"]).unwrap();

        let err = TemplateComposer::new(&catalog)
            .compose(&FileTree::new(), &selection)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::ComposerConflict {
                path: "settings/base.py".into()
            }
        );
    }

    #[test]
    fn create_then_anchor_in_same_feature() {
        let tree = compose(
            vec![
                Feature::builder("drf")
                    .fragment(Fragment::create(
                        path("api/urls.py"),
                        "urlpatterns = [\n    # djinit:begin api-routes\n    # djinit:end api-routes\n]\n",
                    ))
                    .fragment(Fragment::anchor(path("api/urls.py"), "api-routes", "path('', index),"))
                    .build()
                    .unwrap(),
            ],
            &["drf"],
        )
        .unwrap();

        assert!(tree.get("api/urls.py").unwrap().contains("    path('', index),\n"));
    }
}
