pub mod imagine;
pub mod tagger;

pub use imagine::{imagine, GENERATION_FAILED_REPLY, IMAGE_MIME};
pub use tagger::{
    tagger, TaggerOutcome, IMAGE_INPUT_TIMEOUT, IMAGE_PROMPT_REPLY, PARSE_FAILED_REPLY,
    TIMEOUT_REPLY,
};
