use std::env;

#[derive(Debug, Clone)]
pub struct WebuiConfig {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for WebuiConfig {
    fn default() -> Self {
        WebuiConfig {
            host: None,
            username: None,
            password: None,
        }
    }
}

impl WebuiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("SD_WEBUI_HOST").ok();
        let username = env::var("SD_WEBUI_USER").ok();
        let password = env::var("SD_WEBUI_PASS").ok();

        WebuiConfig {
            host,
            username,
            password,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Login is only attempted when both halves of the credential pair are
    /// configured.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}
