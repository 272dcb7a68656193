use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use cli::input::read_points;
use cli::input::text::TextReader;
use cli::output::ResultWriter;
use clustering::error::num_clusters_from_signed;
use clustering::{KMeans, KMeansResult, Point};
use config::enums::{AssignmentMode, InitStrategy};
use config::kmeans::KMeansConfig;
use log::info;

#[derive(clap::ValueEnum, Clone, Debug, PartialEq)]
enum InitStrategyArgs {
    FirstK,
    Strided,
    Random,
    PlusPlus,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq)]
enum AssignmentModeArgs {
    Settled,
    Final,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Text file with one point per line
    #[arg(long, required = true)]
    input_path: String,

    /// Number of leading columns of each line that form a point
    #[arg(long, required = true)]
    num_columns: usize,

    /// Number of clusters. 0 writes every point as unclustered
    #[arg(long, allow_negative_numbers = true)]
    num_clusters: Option<i64>,

    #[arg(long)]
    max_iteration: Option<usize>,

    #[arg(long = "init-strategy", value_enum)]
    init_strategy: Option<InitStrategyArgs>,

    /// Seed for the random and plus-plus init strategies
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long)]
    tolerance: Option<f64>,

    #[arg(long = "assignment", value_enum)]
    assignment_mode: Option<AssignmentModeArgs>,

    /// YAML file with a KMeansConfig. Flags given on the command line take precedence
    #[arg(long)]
    config: Option<String>,

    /// Where to write the result. Defaults to stdout
    #[arg(long)]
    output_path: Option<String>,
}

fn build_config(args: &Args, num_points: usize) -> Result<KMeansConfig> {
    let mut config = match &args.config {
        Some(path) => KMeansConfig::from_yaml_file(path)?,
        None => KMeansConfig::default(),
    };

    if let Some(num_clusters) = args.num_clusters {
        config.num_clusters = num_clusters_from_signed(num_clusters, num_points)?;
    }
    if let Some(max_iteration) = args.max_iteration {
        config.max_iteration = max_iteration;
    }
    if let Some(init_strategy) = &args.init_strategy {
        config.init_strategy = match init_strategy {
            InitStrategyArgs::FirstK => InitStrategy::FirstK,
            InitStrategyArgs::Strided => InitStrategy::Strided,
            InitStrategyArgs::Random => InitStrategy::Random { seed: args.seed },
            InitStrategyArgs::PlusPlus => InitStrategy::PlusPlus { seed: args.seed },
        };
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(assignment_mode) = &args.assignment_mode {
        config.assignment_mode = match assignment_mode {
            AssignmentModeArgs::Settled => AssignmentMode::Settled,
            AssignmentModeArgs::Final => AssignmentMode::Final,
        };
    }
    Ok(config)
}

fn write_output(points: &[Point], result: &KMeansResult, output_path: Option<&str>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
            ResultWriter::new(BufWriter::new(file)).write(points, result)
        }
        None => ResultWriter::new(std::io::stdout().lock()).write(points, result),
    }
}

fn run(args: &Args) -> Result<()> {
    let mut input = TextReader::from_path(&args.input_path, args.num_columns)?;
    let points = read_points(&mut input);
    info!("Read {} points from {}", points.len(), args.input_path);

    let config = build_config(args, points.len())?;
    let kmeans = KMeans::new(config);
    let result = kmeans.cluster(&points)?;
    info!(
        "Clustering finished: {:?} after {} iterations",
        result.termination, result.iterations
    );

    write_output(&points, &result, args.output_path.as_deref())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    run(&args)
}
