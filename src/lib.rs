pub mod audit;
pub mod config;
pub mod error;
pub mod telemetry;

mod cli;
mod infra;
mod routes;
mod server;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
