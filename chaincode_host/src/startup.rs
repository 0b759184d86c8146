use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use chaincode::{Dispatcher, Invocation, Response};
use local_ledger::{DiskLedger, Ledger, MemoryLedger};
use notifier_sdk::{HttpNotifier, NoopNotifier, Notifier};
use serde::{Deserialize, Serialize};
use std::{error::Error, sync::Arc};

use crate::*;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub ledger: Arc<dyn Ledger>,
}

/// Response envelope returned to HTTP callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InvokeResponse {
    Success { payload: String },
    Error { message: String },
}

impl From<Response> for InvokeResponse {
    fn from(response: Response) -> Self {
        match response {
            Response::Success { payload } => InvokeResponse::Success {
                payload: String::from_utf8_lossy(&payload).into_owned(),
            },
            Response::Error { message } => InvokeResponse::Error { message },
        }
    }
}

pub async fn run(settings: HostSettings) -> Result<(), Box<dyn Error>> {
    let state = build_state(&settings).await?;
    let app = chaincode_app(state);
    let url = format!("{}:{}", settings.host, settings.port);

    tracing::info!("listening on {}", url);
    let listener = tokio::net::TcpListener::bind(url).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires the ledger backend and notifier named in `settings` into a dispatcher
pub async fn build_state(settings: &HostSettings) -> Result<AppState, Box<dyn Error>> {
    let ledger: Arc<dyn Ledger> = match (settings.ledger, &settings.ledger_dir) {
        (LedgerBackend::Memory, _) => Arc::new(MemoryLedger::new()),
        (LedgerBackend::Disk, Some(dir)) => Arc::new(DiskLedger::open(dir.clone()).await?),
        (LedgerBackend::Disk, None) => {
            Arc::new(DiskLedger::open_default(&settings.ledger_name).await?)
        }
    };

    let notifier: Arc<dyn Notifier> = if settings.notify {
        Arc::new(HttpNotifier::new(settings.notifier.clone())?)
    } else {
        tracing::info!("Notifications disabled");
        Arc::new(NoopNotifier)
    };

    let dispatcher = Dispatcher::annulation(notifier)?;

    Ok(AppState {
        dispatcher: Arc::new(dispatcher),
        ledger,
    })
}

pub fn chaincode_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/init", post(init))
        .route("/invoke", post(invoke))
        .with_state(state)
}

async fn root() -> &'static str {
    "annulation chaincode"
}

async fn init(State(state): State<AppState>) -> (StatusCode, Json<InvokeResponse>) {
    to_http(state.dispatcher.init())
}

async fn invoke(
    State(state): State<AppState>,
    Json(invocation): Json<Invocation>,
) -> (StatusCode, Json<InvokeResponse>) {
    let response = state
        .dispatcher
        .invoke(state.ledger.as_ref(), &invocation)
        .await;

    to_http(response)
}

fn to_http(response: Response) -> (StatusCode, Json<InvokeResponse>) {
    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(response.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use document::Annulation;
    use serde_json::json;

    async fn test_server(settings: HostSettings) -> axum_test::TestServer {
        let state = build_state(&settings).await.unwrap();

        axum_test::TestServer::new(chaincode_app(state)).unwrap()
    }

    fn quiet_settings() -> HostSettings {
        HostSettings {
            notify: false,
            ..HostSettings::default()
        }
    }

    async fn post_invoke(
        server: &axum_test::TestServer,
        function: &str,
        args: &[&str],
    ) -> (StatusCode, InvokeResponse) {
        let response = server
            .post("/invoke")
            .json(&json!({"function": function, "args": args}))
            .await;

        (response.status_code(), response.json::<InvokeResponse>())
    }

    #[tokio::test]
    async fn init_should_answer_success() {
        let server = test_server(quiet_settings()).await;

        let response = server.post("/init").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<InvokeResponse>(),
            InvokeResponse::Success {
                payload: String::new()
            }
        );
    }

    #[tokio::test]
    async fn should_create_and_query_over_http() {
        let server = test_server(quiet_settings()).await;

        let (status, _) =
            post_invoke(&server, "createAnnulation", &["ANN05", "07", r#"["CON03"]"#]).await;

        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_invoke(&server, "queryAnnulation", &["ANN05"]).await;

        assert_eq!(status, StatusCode::OK);

        match body {
            InvokeResponse::Success { payload } => {
                let annulation = Annulation::from_slice(payload.as_bytes()).unwrap();

                assert_eq!(annulation, Annulation::new("07", vec!["CON03".to_owned()]));
            }
            InvokeResponse::Error { message } => panic!("query failed: {}", message),
        }
    }

    #[tokio::test]
    async fn should_answer_error_envelope_for_unknown_function() {
        let server = test_server(quiet_settings()).await;

        let (status, body) = post_invoke(&server, "burnAnnulation", &[]).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            InvokeResponse::Error {
                message: "Received unknown function burnAnnulation invocation".to_string()
            }
        );
    }

    #[tokio::test]
    async fn should_serve_from_disk_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let settings = HostSettings {
            ledger: LedgerBackend::Disk,
            ledger_dir: Some(dir.path().to_path_buf()),
            ..quiet_settings()
        };
        let server = test_server(settings.clone()).await;

        post_invoke(&server, "initLedger", &[]).await;

        let restarted = test_server(settings).await;
        let (status, body) = post_invoke(&restarted, "queryAllAnnulations", &[]).await;

        assert_eq!(status, StatusCode::OK);

        match body {
            InvokeResponse::Success { payload } => {
                let entries: serde_json::Value = serde_json::from_str(&payload).unwrap();

                assert_eq!(entries[0]["Key"], json!("ANN0"));
                assert_eq!(entries[1]["Record"]["flyNumber"], json!("04"));
            }
            InvokeResponse::Error { message } => panic!("scan failed: {}", message),
        }
    }
}
