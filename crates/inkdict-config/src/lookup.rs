use serde::{Deserialize, Serialize};

fn default_articles_max() -> usize {
    10
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    /// Upper bound on articles emitted per dictionary for one query.
    #[serde(default = "default_articles_max")]
    pub articles_max: usize,
}

impl LookupConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            articles_max: default_articles_max(),
        }
    }
}
