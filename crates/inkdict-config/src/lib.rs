use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::lookup::LookupConfig;
use self::runtime::RuntimeConfig;

pub mod dictionary;
pub mod lookup;
pub mod runtime;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub lookup: LookupConfig,
    pub runtime: RuntimeConfig,
}

impl Config {
    pub fn new() -> Self {
        let mut dictionary = DictionaryConfig::new();
        if let Ok(dir) = env::var("DICT_SYSTEM_DIR") {
            dictionary.system_dir = dir.into();
        }
        if let Ok(dir) = env::var("DICT_MEDIA_DIR") {
            dictionary.media_dir = dir.into();
        }

        let mut lookup = LookupConfig::new();
        lookup.articles_max = env::var("ARTICLES_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(lookup.articles_max);

        let mut runtime = RuntimeConfig::new();
        if let Ok(name) = env::var("INKDICT_SOCKET_NAME") {
            runtime.socket_name = name;
        }

        Config {
            dictionary,
            lookup,
            runtime,
        }
    }
}
