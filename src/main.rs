use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing::{error, info};

use summary_eval::{app::ComponentRegistry, config::Config, observability, reader, render};

/// Evaluate a machine-generated summary against a reference summary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the model-generated summary (.txt or .pdf)
    hypothesis: PathBuf,

    /// Path to the reference summary (.txt or .pdf)
    reference: PathBuf,

    /// Where to write the rendered score table
    /// (defaults to <output-dir>/<hypothesis stem>.svg)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the report as JSON in addition to the table
    #[arg(long)]
    json: bool,

    /// Skip semantic scoring even when enabled in the environment
    #[arg(long)]
    no_semantic: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| {
                panic_info
                    .payload()
                    .downcast_ref::<String>()
                    .map(|s| s.as_str())
            })
            .unwrap_or("unknown panic payload");

        if let Some(location) = panic_info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                message,
                "panic occurred"
            );
        } else {
            error!(message, "panic occurred without location information");
        }
    }));

    observability::init()?;
    let args = Args::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if args.no_semantic {
        config = config.with_semantic_disabled();
    }

    let hypothesis = reader::read_document(&args.hypothesis).with_context(|| {
        format!(
            "failed to load hypothesis document {}",
            args.hypothesis.display()
        )
    })?;
    let reference = reader::read_document(&args.reference).with_context(|| {
        format!(
            "failed to load reference document {}",
            args.reference.display()
        )
    })?;

    let artifact_path = args
        .output
        .unwrap_or_else(|| render::default_artifact_path(&args.hypothesis, config.output_dir()));

    let registry = ComponentRegistry::build(config).context("failed to build component registry")?;
    let report = registry.pipeline().score_pair(&hypothesis, &reference).await;

    println!("{}", style("Summary evaluation").bold());
    print!("{}", render::format_table(&report));
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    }

    render::render_svg(&report, &artifact_path)?;
    info!(path = %artifact_path.display(), "score table rendered");
    println!("Results saved as '{}'", artifact_path.display());

    Ok(())
}
