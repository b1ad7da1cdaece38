use std::path::PathBuf;

use clap::Args;

use seqvm::artifact::ProgramBundle;
use seqvm::report;
use seqvm::search::score_with;

use super::exit_with;

#[derive(Args)]
pub struct ReplayArgs {
    /// Bundle written by `predict --save`
    pub bundle: PathBuf,
    /// Values to produce (default: target length + 10)
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,
    /// Step budget (default: 10000)
    #[arg(long, value_name = "N", default_value = "10000")]
    pub steps: u32,
    /// Print the program listing to stderr
    #[arg(long)]
    pub show_program: bool,
}

pub fn cmd_replay(args: ReplayArgs) {
    let bundle = match ProgramBundle::load(&args.bundle) {
        Ok(b) => b,
        Err(e) => exit_with(&e, None),
    };

    let count = args.count.unwrap_or(bundle.target.len() + 10);
    let machine = bundle.replay(count, args.steps);
    let score = score_with(bundle.metric, &bundle.target, machine.output());

    eprintln!(
        "Replaying {} ({} instruction(s), fitted score {}, replay score {})",
        report::short_fingerprint(&bundle.program),
        bundle.program.len(),
        bundle.score,
        score,
    );
    if args.show_program {
        eprintln!("{}", report::format_program(&bundle.program));
    }
    println!("{}", report::format_sequence(machine.output()));
}
