use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TAGGER_MODEL: &str = "wd14-vit-v2-git";
pub const DEFAULT_TAGGER_THRESHOLD: f64 = 0.35;

#[derive(Debug, Clone, Serialize)]
pub struct InterrogateRequest {
    pub image: String,
    pub model: String,
    pub threshold: f64,
}

impl InterrogateRequest {
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            model: DEFAULT_TAGGER_MODEL.to_string(),
            threshold: DEFAULT_TAGGER_THRESHOLD,
        }
    }
}

/// Tag/caption labels keyed to a confidence or descriptive value. A sorted
/// map keeps the joined tag list deterministic.
#[derive(Debug, Deserialize)]
pub struct InterrogateResponse {
    pub caption: BTreeMap<String, Value>,
}
