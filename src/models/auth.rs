use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
}
