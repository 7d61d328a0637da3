pub mod auth;
pub mod tagger;
pub mod txt2img;

pub use auth::*;
pub use tagger::*;
pub use txt2img::*;
