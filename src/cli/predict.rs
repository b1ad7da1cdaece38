use std::path::PathBuf;

use clap::Args;

use seqvm::artifact::ProgramBundle;
use seqvm::report;
use seqvm::search::Metric;
use seqvm::vm::Addressing;

use super::{exit_with, load_config, read_target};

#[derive(Args)]
pub struct PredictArgs {
    /// Target values (0-65535). Read from stdin when omitted.
    #[arg(allow_hyphen_values = true)]
    pub values: Vec<String>,
    /// Read the target from stdin even if values are given
    #[arg(long)]
    pub stdin: bool,
    /// Config file with a [search] section
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Steps each candidate may run (default: 500)
    #[arg(long, value_name = "N")]
    pub steps: Option<u32>,
    /// Initial program-length ceiling (default: 100)
    #[arg(long, value_name = "N")]
    pub max_length: Option<u16>,
    /// Cells per memory tape (default: 100)
    #[arg(long, value_name = "N")]
    pub tape_length: Option<u16>,
    /// Total candidates to evaluate (default: 10000)
    #[arg(short, long, value_name = "N")]
    pub depth: Option<u32>,
    /// Values to predict past the target (default: 10)
    #[arg(short = 'n', long, value_name = "N")]
    pub extra: Option<u16>,
    /// Steps allowed while predicting (default: 10000)
    #[arg(long, value_name = "N")]
    pub extend_steps: Option<u32>,
    /// Parallel search workers, 1-256 (default: 1)
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<u16>,
    /// Master seed for a reproducible search
    #[arg(long)]
    pub seed: Option<u64>,
    /// Scoring metric: absolute or circular
    #[arg(long)]
    pub metric: Option<Metric>,
    /// Pointer wrap modulus: program or tape
    #[arg(long)]
    pub addressing: Option<Addressing>,
    /// Print the whole output, fitted prefix included
    #[arg(long)]
    pub full: bool,
    /// Print the winning program's listing to stderr
    #[arg(long)]
    pub show_program: bool,
    /// Save the winning program as a replayable bundle
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

pub fn cmd_predict(args: PredictArgs) {
    let mut config = load_config(args.config.as_deref());
    if let Some(v) = args.steps {
        config.step_budget = v;
    }
    if let Some(v) = args.max_length {
        config.length_limit = v;
    }
    if let Some(v) = args.tape_length {
        config.tape_length = v;
    }
    if let Some(v) = args.depth {
        config.search_depth = v;
    }
    if let Some(v) = args.extra {
        config.extra = v;
    }
    if let Some(v) = args.extend_steps {
        config.extend_budget = v;
    }
    if let Some(v) = args.workers {
        config.workers = v;
    }
    if let Some(v) = args.metric {
        config.metric = v;
    }
    if let Some(v) = args.addressing {
        config.addressing = v;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Err(e) = config.validate() {
        exit_with(&e, None);
    }

    let target = read_target(&args.values, args.stdin);
    let seed = config.seed.unwrap_or_else(seqvm::search::seed::entropy_seed);
    config.seed = Some(seed);

    eprintln!(
        "Searching {} candidate(s) across {} worker(s) (seed {})...",
        config.search_depth, config.workers, seed
    );
    let start = std::time::Instant::now();
    let prediction = match seqvm::predict(&target, &config) {
        Ok(p) => p,
        Err(e) => exit_with(&e, None),
    };
    eprintln!(
        "Done in {:.1}s: {}",
        start.elapsed().as_secs_f64(),
        report::format_summary(&prediction)
    );

    if args.show_program {
        eprintln!("{}", report::format_program(prediction.machine.program()));
    }

    if let Some(ref path) = args.save {
        let bundle = ProgramBundle::from_prediction(&prediction, &target, &config);
        if let Err(e) = bundle.save(path) {
            exit_with(&e, None);
        }
        eprintln!("Saved program to {}", path.display());
    }

    let shown = if args.full {
        prediction.output()
    } else {
        prediction.continuation()
    };
    println!("{}", report::format_sequence(shown));

    if prediction.continuation().len() < usize::from(config.extra) {
        eprintln!(
            "warning: step budget exhausted after {} of {} predicted value(s)",
            prediction.continuation().len(),
            config.extra
        );
    }
}
