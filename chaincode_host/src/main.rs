use chaincode_host::{get_host_config, startup::run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let settings = get_host_config();

    run(settings).await
}
