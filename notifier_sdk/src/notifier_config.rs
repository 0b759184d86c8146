use std::time::Duration;

const DEFAULT_SERVER: &str = "localhost";
const DEFAULT_PORT: u32 = 3000;
const DEFAULT_PATH: &str = "/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct NotifierConfig {
    server: String,
    port: u32,
    #[serde(default = "default_path")]
    path: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl NotifierConfig {
    pub fn new(server: &str, port: u32) -> Self {
        Self {
            server: server.to_string(),
            port,
            path: DEFAULT_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;

        self
    }

    pub fn get_base_url(&self) -> String {
        format!("http://{}:{}", self.server, self.port)
    }

    pub fn get_url(&self) -> String {
        format!("{}{}", self.get_base_url(), self.path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER, DEFAULT_PORT)
    }
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
