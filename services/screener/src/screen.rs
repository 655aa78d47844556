use crate::render::{OutputFormat, RowWriter};
use chrono::Local;
use clap::Args;
use resume_screener::config::AppConfig;
use resume_screener::error::AppError;
use resume_screener::screening::{
    parse_qualifications, BatchError, BatchEvaluator, BatchEvent, ClassificationRouter,
    ContentExtractor, PreviewError, Qualification, RunSummary, TextExtractor,
    DEFAULT_QUALIFICATIONS,
};
use resume_screener::telemetry;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Resume files to screen (.pdf, .docx, anything else is read as UTF-8 text)
    pub(crate) files: Vec<PathBuf>,
    /// Required qualification phrase; repeat for several
    #[arg(long, short = 'r')]
    pub(crate) require: Vec<String>,
    /// File listing one required qualification per line
    #[arg(long)]
    pub(crate) qualifications: Option<PathBuf>,
    /// Append the starter qualification list
    #[arg(long)]
    pub(crate) defaults: bool,
    /// Directory holding Accepted/ and Rejected/ (overrides SCREENER_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// How result rows are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// After the run, print the extracted text of the document at this position
    #[arg(long)]
    pub(crate) preview: Vec<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ExtractArgs {
    /// Document to read
    pub(crate) file: PathBuf,
}

pub(crate) async fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = args.output_dir.clone() {
        config.output.base_dir = dir;
    }

    telemetry::init(&config.telemetry)?;

    let qualifications = collect_qualifications(&args)?;
    let router = ClassificationRouter::new(&config.output.base_dir);
    router.ensure_buckets()?;
    info!(
        ?config.environment,
        output_dir = %router.base_dir().display(),
        "resume screener ready"
    );

    let evaluator = BatchEvaluator::new(router);
    let summary = screen(
        &evaluator,
        args.files,
        qualifications,
        args.format,
        io::stdout(),
    )
    .await?;

    eprintln!(
        "Eligibility check completed at {}: {} approved, {} rejected ({} unreadable) in {} ms.",
        summary.finished_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
        summary.approved,
        summary.rejected,
        summary.unreadable,
        summary.duration().num_milliseconds()
    );

    let mut stdout = io::stdout();
    for index in args.preview {
        if let Err(err) = write_preview(&evaluator, index, &mut stdout) {
            eprintln!("Could not preview file: {err}");
        }
    }

    Ok(())
}

pub(crate) fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    let text = ContentExtractor::new()
        .extract(&args.file)
        .map_err(PreviewError::from)?;
    let mut stdout = io::stdout();
    writeln!(stdout, "{text}")?;
    Ok(())
}

/// Runs the batch in the background and renders each row to `out` as it arrives.
pub(crate) async fn screen<W: Write>(
    evaluator: &BatchEvaluator,
    files: Vec<PathBuf>,
    qualifications: Vec<Qualification>,
    format: OutputFormat,
    out: W,
) -> Result<RunSummary, AppError> {
    let mut run = evaluator.spawn(files, qualifications)?;
    let mut rows = RowWriter::new(format, out)?;
    let mut outcome = None;

    while let Some(event) = run.next_event().await {
        match event {
            BatchEvent::Evaluated(result) => rows.write_row(&result.row())?,
            BatchEvent::Completed(summary) => outcome = Some(Ok(summary)),
            BatchEvent::Failed(failure) => outcome = Some(Err(BatchError::from(failure))),
        }
    }
    run.join().await?;
    rows.into_inner()?;

    match outcome {
        Some(Ok(summary)) => Ok(summary),
        Some(Err(err)) => Err(err.into()),
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "screening worker exited without a completion signal",
        )
        .into()),
    }
}

/// Qualifications from `--require`, then the file, then the starter list, blank lines dropped.
pub(crate) fn collect_qualifications(args: &ScreenArgs) -> Result<Vec<Qualification>, AppError> {
    let mut raw: Vec<String> = args.require.clone();

    if let Some(path) = &args.qualifications {
        raw.push(fs::read_to_string(path)?);
    }
    if args.defaults {
        raw.extend(DEFAULT_QUALIFICATIONS.iter().map(|phrase| phrase.to_string()));
    }

    Ok(parse_qualifications(&raw.join("\n")))
}

fn write_preview<W: Write>(
    evaluator: &BatchEvaluator,
    index: usize,
    out: &mut W,
) -> Result<(), AppError> {
    let text = evaluator.preview(index)?;
    let name = evaluator
        .last_run()
        .get(index)
        .map(|document| document.display_name.clone())
        .unwrap_or_default();

    writeln!(out, "\n--- Resume preview: {name} ---")?;
    writeln!(out, "{text}")?;
    Ok(())
}
