use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_system_dir() -> PathBuf {
    PathBuf::from("/usr/share/dictd")
}

fn default_user_subdir() -> String {
    ".dictd".to_string()
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("/media/sd/.dictd")
}

/// Where dictionaries are looked for on disk.
///
/// The scan order is: `system_dir`, then `$HOME/{user_subdir}`, then
/// `media_dir`, then every entry of `extra_dirs`.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_system_dir")]
    pub system_dir: PathBuf,
    /// Subdirectory of the user's home directory, resolved at scan time.
    #[serde(default = "default_user_subdir")]
    pub user_subdir: String,
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
    #[serde(default)]
    pub extra_dirs: Vec<PathBuf>,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            system_dir: default_system_dir(),
            user_subdir: default_user_subdir(),
            media_dir: default_media_dir(),
            extra_dirs: vec![],
        }
    }
}
