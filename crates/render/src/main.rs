//! Search for a straightedge-and-compass construction of the square puzzle
//! and report it as text, JSON or an SVG drawing.

mod report;
mod svg;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use euclidea_solver::{ConstructionBudget, ConstructionProblem, SearchConfig, Strategy, search};

use report::Report;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    DepthFirst,
    BreadthFirst,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::DepthFirst => Strategy::DepthFirst,
            StrategyArg::BreadthFirst => Strategy::BreadthFirst,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "euclidea")]
#[command(about = "Construct (side/2, 3·side/8) inside a square with straightedge and compass")]
struct Args {
    /// Side length of the square
    #[arg(long, default_value_t = 8)]
    side: i64,

    #[arg(long, value_enum, default_value = "depth-first")]
    strategy: StrategyArg,

    /// Draw circles while the world holds at most this many entities
    #[arg(long)]
    circle_stage_max: Option<usize>,

    /// Draw lines while the world holds at most this many entities
    #[arg(long)]
    line_stage_max: Option<usize>,

    /// Start from the two-circle, three-line budget
    #[arg(long)]
    hint: bool,

    /// Give up after expanding this many worlds
    #[arg(long)]
    max_expansions: Option<usize>,

    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Write the final world as an SVG drawing
    #[arg(long)]
    svg: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: Level,
}

impl Args {
    fn budget(&self) -> ConstructionBudget {
        let base = if self.hint {
            ConstructionBudget::hint()
        } else {
            ConstructionBudget::default()
        };
        ConstructionBudget {
            circle_stage_max: self.circle_stage_max.unwrap_or(base.circle_stage_max),
            line_stage_max: self.line_stage_max.unwrap_or(base.line_stage_max),
        }
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            strategy: self.strategy.into(),
            max_expansions: self.max_expansions,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(args.log_level)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let problem = ConstructionProblem::square(args.side)
        .with_context(|| format!("no square puzzle with side {}", args.side))?
        .with_budget(args.budget());
    let config = args.search_config();
    info!(goal = %problem.goal(), budget = ?problem.budget(), strategy = ?config.strategy, "searching");

    let outcome = search(&problem, &config);
    let report = Report::new(&problem, config.strategy, &outcome);
    match args.format {
        Format::Text => print!("{}", report.to_text()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = &args.svg {
        let world = outcome
            .solution()
            .and_then(|solution| solution.goal())
            .unwrap_or(problem.initial());
        let title = format!("goal {}", problem.goal());
        let drawing = svg::world_to_svg(world, problem.goal(), 600.0, 600.0, &title);
        fs::write(path, drawing).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote drawing");
    }

    Ok(())
}
