mod cli;
mod render;
mod screen;

use resume_screener::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
