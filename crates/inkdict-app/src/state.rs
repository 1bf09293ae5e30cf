use inkdict_config::Config;
use inkdict_core::collection::DictionaryCollection;

/// Built once at startup; the collection is only ever read afterwards,
/// so no locking is needed around it.
pub struct AppState {
    pub config: Config,
    pub dicts: DictionaryCollection,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let dicts = inkdict_dictd::discover(&config.dictionary);
        tracing::info!("loaded {} dictionaries", dicts.len());

        Self { config, dicts }
    }
}
