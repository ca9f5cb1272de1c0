use log::{error, info};

use election_ledger::{build, error::Result, Config};

async fn run() -> Result<()> {
    info!("Configuring server...");
    let config = Config::load()?;
    let relay = build(&config).await?;
    info!("...server configured!");
    relay.listen().await
}

#[tokio::main]
async fn main() {
    // Set up logging.
    log4rs::init_file("log4rs.yaml", Default::default()).expect("Failed to initialise logging");
    info!("Initialised logging");

    // Launch server.
    if let Err(err) = run().await {
        error!("{err}");
        error!("Critical failure, shutting down");
        std::process::exit(1)
    }
}
