use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use cliptree::layout::{LayoutConfig, LayoutError};
use cliptree::scene::Scene;
use cliptree::script::{self, Runner, ScriptError};
use cliptree::svg;
use cliptree::tree::{BranchPolicy, TreeStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read script: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("invalid layout settings: {0}")]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to encode scene: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Svg,
}

#[derive(Parser, Debug)]
#[command(name = "cliptree", about = "Lay out a branching clip tree from a command script")]
struct Cli {
    /// Script to run; reads stdin when omitted or `-`.
    script: Option<PathBuf>,

    #[arg(long, value_enum, env = "CLIPTREE_FORMAT", default_value = "json")]
    format: Format,

    /// Let placeholders without media branch.
    #[arg(long, env = "CLIPTREE_PERMISSIVE")]
    permissive: bool,

    #[arg(long, env = "CLIPTREE_SIBLING_SPACING")]
    sibling_spacing: Option<f64>,

    #[arg(long, env = "CLIPTREE_LEVEL_HEIGHT")]
    level_height: Option<f64>,
}

impl Cli {
    fn layout_config(&self) -> LayoutConfig {
        let mut config = LayoutConfig::default();
        if let Some(spacing) = self.sibling_spacing {
            config.sibling_spacing = spacing;
        }
        if let Some(height) = self.level_height {
            config.level_height = height;
        }
        config
    }

    fn policy(&self) -> BranchPolicy {
        if self.permissive { BranchPolicy::Permissive } else { BranchPolicy::RequireMedia }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "cliptree failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let source = read_script(cli.script.as_deref()).map_err(CliError::Read)?;
    let steps = script::parse(&source)?;

    let mut store = TreeStore::with_config(cli.layout_config(), cli.policy())?;
    let mut runner = Runner::new(&mut store);
    runner.run(&steps)?;
    let rejected = runner.rejected_media();

    let scene = Scene::build(&store);
    info!(steps = steps.len(), nodes = scene.nodes.len(), rejected_media = rejected, "script applied");

    let output = match cli.format {
        Format::Json => serde_json::to_string_pretty(&scene)? + "\n",
        Format::Svg => svg::render(&scene),
    };
    io::stdout().lock().write_all(output.as_bytes()).map_err(CliError::Write)
}

fn read_script(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
