use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use crate::config::RulesConfig;

/// Category and destination used for every extension that no rule claims,
/// and for categories without an explicit destination mapping.
pub const FALLBACK_CATEGORY: &str = "other";

/// Pure extension -> category -> destination computation.
///
/// Owns the rule set and ignore set for its lifetime; both are read-only
/// after construction.
pub struct Classifier {
    directories: BTreeMap<String, String>,
    file_types: BTreeMap<String, Vec<String>>,
    ignore: HashSet<String>,
}

impl Classifier {
    pub fn new(config: RulesConfig) -> Self {
        Self {
            directories: config.directories,
            file_types: config.file_types,
            ignore: config.ignore_list.into_iter().collect(),
        }
    }

    /// Whether the file's name (not path) is in the ignore set.
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.ignore.contains(name))
    }

    /// First category whose extension list contains `ext`, scanning in
    /// category-name order. Overlapping extensions across categories are
    /// first-match-wins.
    pub fn category_for(&self, ext: &str) -> &str {
        self.file_types
            .iter()
            .find(|(_, extensions)| extensions.iter().any(|e| e == ext))
            .map(|(category, _)| category.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Destination sub-directory for a category, falling back when the
    /// category has no mapping.
    pub fn destination_dir(&self, category: &str) -> &str {
        self.directories
            .get(category)
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Destination path for a file: `root / subdir / file_name`.
    /// No side effects and no filesystem access.
    pub fn destination(&self, root: &Path, file: &Path) -> PathBuf {
        let ext = extract_extension(file);
        let category = self.category_for(&ext);
        let subdir = self.destination_dir(category);
        root.join(subdir).join(file.file_name().unwrap_or_default())
    }
}

/// Lowercased extension without the dot; empty when the file has none,
/// which matches no category and falls through to the fallback.
fn extract_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn classifier() -> Classifier {
        let mut directories = BTreeMap::new();
        directories.insert("documents".to_string(), "docs".to_string());
        directories.insert("media".to_string(), "pics".to_string());

        let mut file_types = BTreeMap::new();
        file_types.insert("documents".to_string(), vec!["pdf".into(), "docx".into()]);
        file_types.insert("media".to_string(), vec!["jpg".into(), "png".into()]);

        Classifier::new(RulesConfig {
            directories,
            file_types,
            ignore_list: vec!["keepme.tmp".to_string()],
        })
    }

    #[test]
    fn known_extension_routes_to_category_directory() {
        let c = classifier();
        let root = Path::new("/src");
        let dest = c.destination(root, Path::new("/src/a/b/report.pdf"));
        assert_eq!(dest, Path::new("/src/docs/report.pdf"));
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let c = classifier();
        let dest = c.destination(Path::new("/src"), Path::new("/src/PHOTO.JPG"));
        assert_eq!(dest, Path::new("/src/pics/PHOTO.JPG"));
    }

    #[test]
    fn unknown_extension_falls_back() {
        let c = classifier();
        let dest = c.destination(Path::new("/src"), Path::new("/src/note.unknownext"));
        assert_eq!(dest, Path::new("/src/other/note.unknownext"));
    }

    #[test]
    fn missing_extension_falls_back() {
        let c = classifier();
        let dest = c.destination(Path::new("/src"), Path::new("/src/LICENSE"));
        assert_eq!(dest, Path::new("/src/other/LICENSE"));
    }

    #[test]
    fn category_without_directory_mapping_falls_back() {
        let mut file_types = BTreeMap::new();
        file_types.insert("archives".to_string(), vec!["zip".into()]);
        let c = Classifier::new(RulesConfig {
            directories: BTreeMap::new(),
            file_types,
            ignore_list: vec![],
        });

        assert_eq!(c.category_for("zip"), "archives");
        let dest = c.destination(Path::new("/src"), Path::new("/src/a.zip"));
        assert_eq!(dest, Path::new("/src/other/a.zip"));
    }

    #[test]
    fn overlapping_extensions_are_first_match_wins() {
        let mut file_types = BTreeMap::new();
        file_types.insert("alpha".to_string(), vec!["dat".into()]);
        file_types.insert("beta".to_string(), vec!["dat".into()]);
        let c = Classifier::new(RulesConfig {
            directories: BTreeMap::new(),
            file_types,
            ignore_list: vec![],
        });

        assert_eq!(c.category_for("dat"), "alpha");
    }

    #[test]
    fn ignore_set_matches_file_name_only() {
        let c = classifier();
        assert!(c.is_ignored(Path::new("/src/deep/nested/keepme.tmp")));
        assert!(!c.is_ignored(Path::new("/src/keepme.tmp.bak")));
    }
}
