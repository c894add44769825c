//! FrameSaver - Command Line Entry Point
//!
//! Loads an API-format workflow, runs the frame saver build step against it
//! and writes the resulting workflow.

use anyhow::{bail, Context};
use clap::Parser;
use framesaver_rs::{
    config::{FrameSaverConfig, ParamRegistry, UserInput},
    extension::FrameSaverExtension,
    workflow::{NodeOutput, NodeRole, TracingDiagnostics, WorkflowGenerator, WorkflowGraph},
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "framesaver", version, about = "Add frame extraction outputs to a video workflow")]
struct Cli {
    /// Input workflow (API format JSON)
    #[arg(short, long)]
    workflow: PathBuf,

    /// Output path; the workflow is printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the first frame
    #[arg(long)]
    save_first: bool,

    /// Save the last frame
    #[arg(long)]
    save_last: bool,

    /// First frame of the range to save (0-based)
    #[arg(long, allow_hyphen_values = true)]
    range_start: Option<i64>,

    /// Last frame of the range to save (0-based, inclusive)
    #[arg(long, allow_hyphen_values = true)]
    range_end: Option<i64>,

    /// Node whose output 0 is the final image output (defaults to the last decode node)
    #[arg(long)]
    final_output: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit with an error if any build step reported a failure
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a valid workflow
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,framesaver_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FrameSaverConfig::load(path)?,
        None => FrameSaverConfig::load_from_default_location(),
    };

    let mut registry = ParamRegistry::new();
    let mut generator = WorkflowGenerator::new();
    let extension = FrameSaverExtension::init(&config, &mut registry, &mut generator);

    let mut input = UserInput::new();
    if let Some(params) = extension.params() {
        input.set(&params.save_first, cli.save_first);
        input.set(&params.save_last, cli.save_last);
        if let Some(start) = cli.range_start {
            input.set(&params.range_start, start);
        }
        if let Some(end) = cli.range_end {
            input.set(&params.range_end, end);
        }
    }

    let mut graph =
        WorkflowGraph::load(&cli.workflow)?.with_first_dynamic_id(config.ids.first_dynamic_id);
    match cli.final_output {
        Some(id) => graph
            .set_final_image_out(NodeOutput::new(id, 0))
            .context("Invalid --final-output")?,
        None => {
            graph.infer_final_image_out(config.nodes.class_type(NodeRole::Decode));
        }
    }

    let mut diagnostics = TracingDiagnostics::new();
    generator.generate(&mut graph, &input, &mut diagnostics);

    if cli.strict && diagnostics.reported() > 0 {
        bail!("{} build step(s) failed", diagnostics.reported());
    }

    match &cli.output {
        Some(path) => {
            graph.save(path)?;
            tracing::info!("Wrote {} nodes to {:?}", graph.len(), path);
        }
        None => println!("{}", graph.to_json_string_pretty()?),
    }

    Ok(())
}
