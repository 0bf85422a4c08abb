use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use crate::errors::{Result, ShipshapeError};

/// Classification rules as loaded from the JSON config file.
///
/// All fields are optional; a missing config is legal and yields empty rule
/// sets, which routes every file to the fallback category and ignores
/// nothing.
#[derive(Debug, Default, Deserialize)]
pub struct RulesConfig {
    /// Category name -> destination sub-directory name.
    #[serde(default)]
    pub directories: BTreeMap<String, String>,

    /// Category name -> extensions belonging to that category.
    #[serde(default)]
    pub file_types: BTreeMap<String, Vec<String>>,

    /// Literal file names to skip unconditionally.
    #[serde(default)]
    pub ignore_list: Vec<String>,
}

impl RulesConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(&path)?;

        let mut config: RulesConfig =
            serde_json::from_str(&data).map_err(|e| ShipshapeError::Json {
                path: path.as_ref().to_path_buf(),
                source: e,
            })?;

        config.normalize();
        Ok(config)
    }

    /// Normalize all extensions to lowercase without a leading dot so that
    /// lookups never depend on how the config file spelled them.
    fn normalize(&mut self) {
        for extensions in self.file_types.values_mut() {
            for ext in extensions.iter_mut() {
                *ext = ext.trim_start_matches('.').to_lowercase();
            }
        }
    }
}
