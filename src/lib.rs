pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod store;
pub mod submissions;
pub mod telemetry;

pub use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
