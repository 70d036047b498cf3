use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use fa1::{format::DEFAULT_FILE_NAME, Records};
use tracing::{info, warn};

#[derive(Parser)]
#[clap(about = "Read and write CMC850 FA1 program/alarm images")]
struct App {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an image from a JSON document of programs and alarms
    Encode {
        #[clap(short, long)]
        input: PathBuf,
        #[clap(short, long, default_value = DEFAULT_FILE_NAME)]
        output: PathBuf,
    },
    /// Print (or write) the programs and alarms stored in an image
    Decode {
        image: PathBuf,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// List occupied slots and flag checksum mismatches
    Inspect { image: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), color_eyre::Report> {
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();
    match app.command {
        Command::Encode { input, output } => run_encode(input, output).await,
        Command::Decode { image, output } => run_decode(image, output).await,
        Command::Inspect { image } => run_inspect(image).await,
    }
}

async fn run_encode(input: PathBuf, output: PathBuf) -> Result<(), color_eyre::Report> {
    let json = tokio::fs::read(&input)
        .await
        .wrap_err_with(|| format!("reading {}", input.display()))?;
    let records: Records = serde_json::from_slice(&json)
        .wrap_err_with(|| format!("parsing {}", input.display()))?;

    let image = records.encode()?;
    tokio::fs::write(&output, image.as_bytes())
        .await
        .wrap_err_with(|| format!("writing {}", output.display()))?;
    info!(output = %output.display(), "Wrote image");
    Ok(())
}

async fn run_decode(image: PathBuf, output: Option<PathBuf>) -> Result<(), color_eyre::Report> {
    let bytes = tokio::fs::read(&image)
        .await
        .wrap_err_with(|| format!("reading {}", image.display()))?;
    let records = fa1::decode(&bytes)?;
    let json = serde_json::to_string_pretty(&records)?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .wrap_err_with(|| format!("writing {}", path.display()))?;
            info!(output = %path.display(), "Wrote records");
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn run_inspect(image: PathBuf) -> Result<(), color_eyre::Report> {
    let bytes = tokio::fs::read(&image)
        .await
        .wrap_err_with(|| format!("reading {}", image.display()))?;

    let reports = fa1::inspect(&bytes)?;
    let mut bad = 0usize;
    for report in &reports {
        let slot = report.slot;
        if report.checksum_ok() {
            info!(
                section = ?slot.section,
                block = slot.block,
                entry = slot.entry,
                offset = report.offset(),
                name = %report.name,
                "Slot"
            );
        } else {
            bad += 1;
            warn!(
                section = ?slot.section,
                block = slot.block,
                entry = slot.entry,
                offset = report.offset(),
                name = %report.name,
                stored = report.stored_checksum,
                computed = report.computed_checksum,
                "Checksum mismatch"
            );
        }
    }
    info!(slots = reports.len(), bad, "Inspected image");
    Ok(())
}
