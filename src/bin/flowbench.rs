use log::LevelFilter;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
    time::Instant,
};
use structopt::StructOpt;

use flownet::{
    experiments::{
        average_time_experiment, bipartite_reduction_experiment, write_results,
        ExperimentConfig, ExperimentRow, GraphModel,
    },
    FlowAlgorithm,
};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Clone, Copy, Debug)]
enum ModelKind {
    ErdosRenyi,
    BarabasiAlbert,
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erdos-renyi" | "er" => Ok(ModelKind::ErdosRenyi),
            "barabasi-albert" | "ba" => Ok(ModelKind::BarabasiAlbert),
            _ => Err(format!(
                "unknown graph model '{}', expected 'erdos-renyi' or 'barabasi-albert'",
                s
            )),
        }
    }
}

#[derive(StructOpt)]
enum Experiment {
    /// Average max-flow time on random graphs, from vertex 0 to the last one
    Flow {
        #[structopt(long, default_value = "erdos-renyi")]
        model: ModelKind,

        /// Edge probability (Erdős–Rényi) or edges per new vertex (Barabási–Albert)
        #[structopt(long, default_value = "0.1")]
        param: f64,

        #[structopt(long, default_value = "30")]
        max_capacity: u64,
    },
    /// Average matching time on random bipartite graphs
    Bipartite {
        #[structopt(long, default_value = "0.1")]
        probability: f64,
    },
}

#[derive(StructOpt)]
struct Args {
    #[structopt(subcommand)]
    experiment: Experiment,

    #[structopt(short, long, default_value = "dinitz")]
    algorithm: FlowAlgorithm,

    #[structopt(long, default_value = "100")]
    max_size: usize,

    #[structopt(long, default_value = "5")]
    step: usize,

    #[structopt(short, long, default_value = "100")]
    trials: usize,

    #[structopt(short, long, default_value = "0")]
    seed: u64,

    /// CSV output, stdout if missing
    #[structopt(short, long)]
    output: Option<PathBuf>,

    #[structopt(short, long)]
    verbose: bool,
}

// Mimalloc allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn init_logger(verbose: bool) {
    let start = Instant::now();
    let level = if verbose || cfg!(feature = "verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| {
            writeln!(
                buf,
                "{:.2?} {} - {}",
                start.elapsed(),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn write_output(output: Option<&PathBuf>, rows: &[ExperimentRow]) -> io::Result<()> {
    match output {
        Some(path) => {
            let mut output_file = BufWriter::new(File::create(path)?);
            write_results(&mut output_file, rows)?;
            output_file.flush()
        }
        None => write_results(&mut io::stdout().lock(), rows),
    }
}

fn main() {
    let args = Args::from_args();
    init_logger(args.verbose);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut config = ExperimentConfig {
        algorithm: args.algorithm,
        max_size: args.max_size,
        step: args.step,
        trials: args.trials,
        ..ExperimentConfig::default()
    };

    let rows = match args.experiment {
        Experiment::Flow {
            model,
            param,
            max_capacity,
        } => {
            let model = match model {
                ModelKind::ErdosRenyi => GraphModel::ErdosRenyi { p: param },
                ModelKind::BarabasiAlbert => GraphModel::BarabasiAlbert {
                    m: param.max(1.0) as usize,
                },
            };
            config.max_capacity = max_capacity;
            log::info!("Running {:?} with {:?}", model, config.algorithm);
            average_time_experiment(&mut rng, model, &config)
        }
        Experiment::Bipartite { probability } => {
            log::info!(
                "Running bipartite reduction with p = {} and {:?}",
                probability,
                config.algorithm
            );
            bipartite_reduction_experiment(&mut rng, probability, &config)
        }
    };

    if let Err(err) = write_output(args.output.as_ref(), &rows) {
        log::error!("Cannot write results: {}", err);
        std::process::exit(1);
    }
}
