mod http_notifier;
mod notifier;
mod notifier_config;

pub use http_notifier::HttpNotifier;
pub use notifier::{spawn_notify, NoopNotifier, Notifier, NotifyErr};
pub use notifier_config::NotifierConfig;
