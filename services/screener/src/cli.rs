use crate::screen::{run_extract, run_screen, ExtractArgs, ScreenArgs};
use clap::{Parser, Subcommand};
use resume_screener::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Resume Screener",
    about = "Check resumes against required qualifications and file them into Accepted/Rejected",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Screen resumes and copy each into Accepted/ or Rejected/
    Screen(ScreenArgs),
    /// Print the extracted text of a single document
    Extract(ExtractArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Screen(args) => run_screen(args).await,
        Command::Extract(args) => run_extract(args),
    }
}
