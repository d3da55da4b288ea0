mod cli;
mod infra;
mod page;
mod report;
mod routes;
mod server;

use promotion_dashboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
