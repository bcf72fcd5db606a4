use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use eca_core::config::{AppConfig, GridFormat};
use eca_core::seed::SeedKind;
use eca_data::ColumnSelector;
use eca_lib::app::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one rule, print its metrics and write the artifacts
    Run(RunArgs),
    /// Print the metrics of a simulated rule or of a saved grid file
    Analyze(AnalyzeArgs),
    /// Summarize a slice of the 256-rule space
    Survey(SurveyArgs),
    /// Measure divergence between the configured seed and another seed
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct SimArgs {
    /// Wolfram rule number (0-255)
    #[arg(short, long, allow_negative_numbers = true)]
    rule: Option<i64>,

    /// Number of cells per generation
    #[arg(short, long)]
    width: Option<usize>,

    /// Number of generations, including the initial row
    #[arg(short, long)]
    generations: Option<usize>,

    /// Initial row: center, pair, random, or a 0/1 string
    #[arg(short, long)]
    seed: Option<SeedKind>,

    /// Seed for the random initial row
    #[arg(long)]
    random_seed: Option<u64>,
}

impl SimArgs {
    fn apply(&self, config: &mut AppConfig) {
        let sim = &mut config.simulation;
        if let Some(rule) = self.rule {
            sim.rule = rule;
        }
        if let Some(width) = self.width {
            sim.width = width;
        }
        if let Some(generations) = self.generations {
            sim.generations = generations;
        }
        if let Some(seed) = &self.seed {
            sim.seed = seed.clone();
        }
        if let Some(random_seed) = self.random_seed {
            sim.random_seed = random_seed;
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Results directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Grid export format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Skip writing artifacts
    #[arg(long)]
    no_write: bool,

    /// Print the grid to stdout
    #[arg(long)]
    print: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Analyze this grid file (.txt or .pbm) instead of simulating
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Largest autocorrelation lag
    #[arg(long)]
    max_lag: Option<usize>,

    /// Largest spatial autocorrelation lag of the final generation
    #[arg(long)]
    spatial_max_lag: Option<usize>,

    /// Column for balance, runs and autocorrelation (default: center)
    #[arg(long)]
    column: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SurveyArgs {
    #[arg(long)]
    start: Option<u8>,
    #[arg(long)]
    end: Option<u8>,
    #[arg(long)]
    step: Option<usize>,
    #[arg(short, long)]
    width: Option<usize>,
    #[arg(short, long)]
    generations: Option<usize>,

    /// Results directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Skip writing survey.json
    #[arg(long)]
    no_write: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Seed to compare against the configured one
    #[arg(long, default_value = "pair")]
    against: SeedKind,

    /// Print every n-th generation
    #[arg(long, default_value_t = 10)]
    stride: usize,

    /// Print the comparison as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Pbm,
}

impl From<FormatArg> for GridFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => GridFormat::Text,
            FormatArg::Pbm => GridFormat::Pbm,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    eca_core::init_logging(cli.verbose);
    let mut config = AppConfig::load(&cli.config)?;
    tracing::debug!(command = ?cli.command, "Dispatching");

    match cli.command {
        Command::Run(args) => {
            args.sim.apply(&mut config);
            if let Some(out) = args.out {
                config.output.directory = out;
            }
            if let Some(format) = args.format {
                config.output.grid_format = format.into();
            }
            let app = App::new(config)?;
            let (outcome, report, written) = app.run_and_report(!args.no_write)?;
            if args.print {
                println!("{}", outcome.grid.to_art());
            }
            print!("{}", report.render_summary());
            for path in written {
                println!("[✓] {}", path.display());
            }
        }
        Command::Analyze(args) => {
            args.sim.apply(&mut config);
            if let Some(max_lag) = args.max_lag {
                config.analysis.max_lag = max_lag;
            }
            if let Some(spatial_max_lag) = args.spatial_max_lag {
                config.analysis.spatial_max_lag = spatial_max_lag;
            }
            if let Some(column) = args.column {
                config.analysis.column = ColumnSelector::Index(column);
            }
            let app = App::new(config)?;
            let report = match &args.grid {
                Some(path) => app.report_for_file(path)?,
                None => {
                    let outcome = app.simulate()?;
                    app.report(&outcome)?
                }
            };
            if args.json {
                println!("{}", eca_io::to_json_pretty(&report)?);
            } else {
                print!("{}", report.render_summary());
            }
        }
        Command::Survey(args) => {
            let survey = &mut config.survey;
            if let Some(start) = args.start {
                survey.start = start;
            }
            if let Some(end) = args.end {
                survey.end = end;
            }
            if let Some(step) = args.step {
                survey.step = step;
            }
            if let Some(width) = args.width {
                survey.width = width;
            }
            if let Some(generations) = args.generations {
                survey.generations = generations;
            }
            if let Some(out) = args.out {
                config.output.directory = out;
            }
            let app = App::new(config)?;
            let (report, path) = app.survey(!args.no_write)?;
            print!("{}", report.render_table());
            if let Some(path) = path {
                println!("[✓] {}", path.display());
            }
        }
        Command::Compare(args) => {
            args.sim.apply(&mut config);
            let app = App::new(config)?;
            let comparison = app.compare(&args.against)?;
            if args.json {
                println!("{}", eca_io::to_json_pretty(&comparison)?);
            } else {
                print!("{}", comparison.render(args.stride));
            }
        }
    }

    Ok(())
}
