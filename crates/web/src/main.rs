use std::{error::Error, process::ExitCode, sync::Arc};

use database::{DatabaseConnectionInfo, SqliteDatabase};
use log::{error, info};
use web::{bind, config::ServerConfig, start_web_server, WebState};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            error!("{}", why);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    // config
    let database_connection_info =
        DatabaseConnectionInfo::from_env().ok_or("expected DB_PATH in env.")?;
    let server_config =
        ServerConfig::from_env().ok_or("expected a valid PORT in env.")?;

    // database
    let database = SqliteDatabase::connect(database_connection_info)
        .await
        .map_err(|why| format!("Failed to open connection to database: {}", why))?;
    database
        .init_table()
        .await
        .map_err(|why| format!("Failed to initialize table: {}", why))?;
    info!("rides table ready");

    // web server
    let listener = bind(&server_config)
        .await
        .map_err(|why| format!("Failed to bind port {}: {}", server_config.port, why))?;
    start_web_server(
        listener,
        WebState {
            rides: Arc::new(database.clone()),
        },
    )
    .await?;

    database.close().await;
    Ok(())
}
