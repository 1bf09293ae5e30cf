use serde::{Deserialize, Serialize};

fn default_socket_name() -> String {
    "inkdict".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Service name used for the single-instance socket file.
    #[serde(default = "default_socket_name")]
    pub socket_name: String,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            socket_name: default_socket_name(),
        }
    }
}
