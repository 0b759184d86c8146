use async_trait::async_trait;

use crate::{Notifier, NotifierConfig, NotifyErr};

const REIMBURSEMENT_FORM: [(&str, &str); 1] = [("toto", "titi")];

/// Posts the fixed reimbursement form to the configured endpoint
pub struct HttpNotifier {
    config: NotifierConfig,
    client: reqwest::Client,
}

impl HttpNotifier {
    pub fn new(config: NotifierConfig) -> Result<Self, NotifyErr> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| NotifyErr::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self) -> Result<String, NotifyErr> {
        let url = self.config.get_url();

        tracing::info!("Sending reimbursement notification to {}", url);

        let resp = self
            .client
            .post(&url)
            .form(&REIMBURSEMENT_FORM)
            .send()
            .await
            .map_err(|e| NotifyErr::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let server_msg = resp
                .text()
                .await
                .map_err(|e| NotifyErr::Network(e.to_string()))?;

            return Err(NotifyErr::Server(server_msg));
        }

        let data = resp
            .text()
            .await
            .map_err(|e| NotifyErr::Network(e.to_string()))?;

        Ok(data)
    }
}
