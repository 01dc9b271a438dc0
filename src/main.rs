use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rs_path_correction::corrector::Corrector;
use rs_path_correction::datastore::{DataStore, TextDataStore};
use rs_path_correction::parameters::path_correction::Parameters;
use rs_path_correction::path::Path;
use rs_path_correction::segments::{closest_approaches, detect_segments};
use rs_path_correction::utils::{dump_segments, dump_steps, max_deviation};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Corrects a recorded tooltip path so that it follows moving gates.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Recorded path, one sample per line.
    input: PathBuf,

    /// YAML file with correction parameters and path layout.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the corrected full-record path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Normalize the time column to [0, 1] before correcting.
    #[arg(short, long)]
    normalize_time: bool,

    /// Column delimiter of the input and output files.
    #[arg(short, long, default_value_t = ' ')]
    delimiter: char,

    /// Print every corrected step.
    #[arg(long)]
    dump: bool,

    /// Debug level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let parameters = match &cli.config {
        Some(file) => Parameters::from_yaml_file(file)
            .with_context(|| format!("Failed to load parameters from {}", file.display()))?,
        None => Parameters::default(),
    };
    info!("Parameters:\n{}", parameters.to_yaml());

    let delimiter = u8::try_from(cli.delimiter)
        .with_context(|| format!("Delimiter '{}' is not a single byte", cli.delimiter))?;
    let store = TextDataStore::with_delimiter(delimiter);
    let data = store
        .retrieve(&cli.input)
        .with_context(|| format!("Failed to read path from {}", cli.input.display()))?;
    let mut path = Path::new(data, parameters.layout).context("Path does not match the layout")?;
    if cli.normalize_time {
        path.normalize_time().context("Cannot normalize time")?;
    }
    info!("Read {} samples from {}", path.len(), cli.input.display());

    let segments = detect_segments(&path)?;
    dump_segments(segments.ends(), &closest_approaches(&path, &segments));

    let corrector = Corrector::new(&parameters)?;
    let corrected = corrector.correct_segmented(&path, &segments)?;
    if cli.dump {
        dump_steps(&corrected.steps);
    }

    let positions = corrected.positions();
    println!(
        "{} corrected positions, {} acceleration limited, peak acceleration {:.4} m/s², max deviation {:.2} mm",
        corrected.len(),
        corrected.limited_steps(),
        corrected.peak_acceleration(),
        max_deviation(&positions, &path.tooltips()[1..]) * 1000.0
    );

    if let Some(output) = &cli.output {
        let full = path.with_corrected_tooltips(&positions)?;
        store
            .store(full.matrix(), output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Corrected path written to {}", output.display());
    }
    Ok(())
}
