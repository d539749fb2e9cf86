mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use zephyrus_or::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
