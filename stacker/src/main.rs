use anyhow::Context;
use clap::Parser;
use generator::synthetic::{self, SyntheticConfig};
use render::export;
use render::plot::{ChartRenderer, PlotMode};
use render::style::MarkerPalette;
use std::path::PathBuf;
use workflow::config::StackConfig;
use workflow::report::RunReport;
use workflow::runner::Runner;

mod generator;
mod render;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Stacked-periodogram aggregation driver")]
struct Args {
    /// Folder holding the periodogram files to stack
    #[arg(long)]
    folder: Option<PathBuf>,
    /// Load the run setup from YAML instead of flags
    #[arg(long)]
    config: Option<PathBuf>,
    /// Case name used in output file names (defaults to the folder name)
    #[arg(long)]
    case_name: Option<String>,
    /// Field delimiter of the input tables
    #[arg(long, default_value_t = ' ')]
    delimiter: char,
    /// Comment prefix of the input tables
    #[arg(long, default_value_t = '#')]
    comments: char,
    /// Write the stacked table next to the inputs
    #[arg(long, default_value_t = false)]
    save: bool,
    /// Leave the column header out of the stacked table
    #[arg(long, default_value_t = false)]
    no_header: bool,
    /// Chart files to render (repeatable)
    #[arg(long, value_enum)]
    plot: Vec<PlotMode>,
    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
    /// Generate this many synthetic inputs into the folder first
    #[arg(long)]
    synthesize: Option<usize>,
    /// Seed for the synthetic generator
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        StackConfig::load(path)?
    } else {
        let folder = args
            .folder
            .context("either --folder or --config is required")?;
        StackConfig::from_args(folder, args.case_name, args.delimiter, args.comments)
    };

    if let Some(files) = args.synthesize {
        let synthetic_config = SyntheticConfig {
            files,
            seed: args.seed,
            ..Default::default()
        };
        let written = synthetic::write_inputs(&config.folder, &synthetic_config)?;
        println!(
            "Synthesized {} periodogram files in {}",
            written.len(),
            config.folder.display()
        );
    }

    let runner = Runner::new(config.clone());
    let summary = runner.execute()?;

    println!(
        "Stacked {} periodograms -> {} grid points, {} skipped",
        summary.folded,
        summary.stacked.len(),
        summary.skipped.len()
    );
    for entry in &summary.skipped {
        println!("  skipped {}: {}", entry.name, entry.reason);
    }

    if args.save {
        let path = config.data_path();
        export::write_table(
            &summary.stacked,
            &path,
            config.delimiter,
            config.comments,
            !args.no_header,
        )?;
        println!("Wrote {}", path.display());
    }

    if !args.plot.is_empty() {
        let case_name = config.effective_case_name();
        let palette = MarkerPalette::from_config(&config.ref_colors, &config.ref_styles)?;
        let renderer = ChartRenderer::new(&case_name, &config.ref_lines, palette);
        for mode in &args.plot {
            let path = match mode {
                PlotMode::Combined => {
                    let path = config.chart_path("Combined");
                    renderer.combined(&summary.stacked, &path)?;
                    path
                }
                PlotMode::Separate => {
                    let path = config.chart_path("Separate");
                    renderer.separate(&summary.stacked, &path)?;
                    path
                }
            };
            println!("Wrote {}", path.display());
        }
    }

    if let Some(path) = args.report {
        let report = RunReport {
            case_name: config.effective_case_name(),
            folder: config.folder.display().to_string(),
            grid_points: summary.stacked.len(),
            folded: summary.folded,
            skipped: summary.skipped.clone(),
        };
        report.write(&path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
