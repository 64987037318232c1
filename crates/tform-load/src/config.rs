use serde::{Deserialize, Serialize};
use tform_eval::EvalConfig;

/// Configuration for loading an instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Extension of document source files, without the dot.
    pub source_extension: String,
    /// Extension of JSON data files, without the dot.
    pub data_extension: String,
    /// Limits applied when evaluating the instance.
    pub eval: EvalConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            source_extension: "tfm".into(),
            data_extension: "json".into(),
            eval: EvalConfig::default(),
        }
    }
}
