use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_NEGATIVE_PROMPT: &str = "EasyNegative";
pub const DEFAULT_SAMPLER: &str = "DPM++ 2M Karras";
pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_STEPS: u32 = 20;
pub const DEFAULT_BATCH_SIZE: u32 = 1;

/// Generation request for the txt2img endpoint. Everything besides the
/// prompt is pinned to the command defaults; `generate_with` is the escape
/// hatch for callers that need to override them.
#[derive(Debug, Clone, Serialize)]
pub struct Txt2ImgRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub sampler_name: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub batch_size: u32,
    /// Extension payloads keyed by script name, passed through untouched.
    pub alwayson_scripts: Map<String, Value>,
}

impl Txt2ImgRequest {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
            sampler_name: DEFAULT_SAMPLER.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            steps: DEFAULT_STEPS,
            batch_size: DEFAULT_BATCH_SIZE,
            alwayson_scripts: Map::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Txt2ImgResponse {
    pub images: Vec<String>,
}
