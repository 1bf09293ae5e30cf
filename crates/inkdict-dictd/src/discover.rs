//! On-disk discovery.
//!
//! Dictionaries are looked for in a fixed, ordered set of directories.
//! Each opened dictionary is inserted at the front of the collection,
//! so the last pair found is the first dictionary queried. A directory
//! that is missing or unreadable contributes nothing; a candidate that
//! fails validation is skipped; a validated pair that fails to open
//! loses only itself.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use inkdict_config::dictionary::DictionaryConfig;
use inkdict_core::collection::DictionaryCollection;
use inkdict_core::dictionary::Dictionary;

use crate::dictionary::DictdDictionary;

pub const INDEX_SUFFIX: &str = ".index";
pub const DATA_SUFFIX: &str = ".dict.dz";

/// Scan the configured locations and return the opened collection.
pub fn discover(config: &DictionaryConfig) -> DictionaryCollection {
    discover_dirs(&scan_dirs(config))
}

/// Scan an explicit list of directories, in order.
pub fn discover_dirs(dirs: &[PathBuf]) -> DictionaryCollection {
    let mut collection = DictionaryCollection::new();
    for dir in dirs {
        load_dir(&mut collection, dir);
    }
    collection
}

fn scan_dirs(config: &DictionaryConfig) -> Vec<PathBuf> {
    let mut dirs = vec![config.system_dir.clone()];
    if let Some(user) = user_dir(env::var_os("HOME"), &config.user_subdir) {
        dirs.push(user);
    }
    dirs.push(config.media_dir.clone());
    dirs.extend(config.extra_dirs.iter().cloned());
    dirs
}

/// `$HOME/{subdir}`, or `None` when no home directory is known — that
/// location is then simply absent, not an error.
fn user_dir(home: Option<OsString>, subdir: &str) -> Option<PathBuf> {
    let home = home.filter(|h| !h.is_empty())?;
    Some(PathBuf::from(home).join(subdir))
}

fn load_dir(collection: &mut DictionaryCollection, dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("skipping dictionary dir {}: {e}", dir.display());
            return;
        }
    };

    // read_dir order is filesystem-dependent; sort so that repeated
    // scans of an unchanged tree build identically ordered collections.
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();

    for index_path in paths {
        let Some(file_name) = index_path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(base) = file_name.strip_suffix(INDEX_SUFFIX) else {
            continue;
        };
        let data_path = dir.join(format!("{base}{DATA_SUFFIX}"));

        let Some(sort) = DictdDictionary::validate(&index_path, &data_path) else {
            tracing::debug!("not a dictionary pair: {}", index_path.display());
            continue;
        };

        match DictdDictionary::open(&index_path, &data_path, sort) {
            Ok(dict) => {
                tracing::info!(
                    "loaded dictionary {} ({}, {} entries)",
                    index_path.display(),
                    dict.name().unwrap_or("<unnamed>"),
                    dict.entry_count()
                );
                collection.insert_front(Box::new(dict));
            }
            Err(e) => {
                tracing::warn!("failed to open {}: {e}", index_path.display());
            }
        }
    }
}
