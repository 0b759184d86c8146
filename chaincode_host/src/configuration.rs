use std::path::PathBuf;

use notifier_sdk::NotifierConfig;

const ENV_PREFIX: &str = "ANNULATION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    Memory,
    Disk,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HostSettings {
    pub host: String,
    pub port: u16,
    pub ledger: LedgerBackend,
    pub ledger_name: String,
    pub ledger_dir: Option<PathBuf>,
    pub notify: bool,
    pub notifier: NotifierConfig,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            ledger: LedgerBackend::Memory,
            ledger_name: "annulations".to_string(),
            ledger_dir: None,
            notify: true,
            notifier: NotifierConfig::default(),
        }
    }
}

/// Reads host settings from `ANNULATION_*` environment variables, e.g.
/// `ANNULATION_PORT` or `ANNULATION_NOTIFIER__SERVER`.  Anything unset keeps its
/// default.
pub fn get_host_config() -> HostSettings {
    match load_host_config() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Host settings not loaded, using defaults: {:?}", e);

            HostSettings::default()
        }
    }
}

fn load_host_config() -> Result<HostSettings, config::ConfigError> {
    let defaults = HostSettings::default();

    config::Config::builder()
        .set_default("host", defaults.host)?
        .set_default("port", defaults.port as i64)?
        .set_default("ledger", "memory")?
        .set_default("ledger_name", defaults.ledger_name)?
        .set_default("notify", defaults.notify)?
        .set_default("notifier.server", "localhost")?
        .set_default("notifier.port", 3000_i64)?
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
