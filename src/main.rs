use std::path::PathBuf;
use std::time::Duration;

use log::*;
use structopt::StructOpt;

use roundsat::scheduler::{self, Scheduler, SolveOutcome};
use roundsat::{cnf, ProcessSolver, ScheduleError};

#[derive(StructOpt, Debug)]
struct Opt {
    /// Number of teams (even, at least 4)
    #[structopt(name = "TEAMS")]
    teams: u32,

    /// External DIMACS solver executable
    #[structopt(short, long, default_value = "glucose-syrup")]
    solver: String,

    /// Extra arguments passed to the solver before the formula file
    #[structopt(long = "solver-arg")]
    solver_args: Vec<String>,

    /// Time budget for the solver call, in seconds
    #[structopt(short, long, default_value = "60")]
    timeout: f32,

    /// Write the DIMACS formula to a file
    #[structopt(short, long)]
    output_cnf: Option<PathBuf>,

    /// Stop after encoding, without running the solver
    #[structopt(short, long)]
    encode_only: bool,

    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    #[structopt(short, long)]
    quiet: bool,
}

fn main() {
    let options = Opt::from_args();

    stderrlog::StdErrLog::new()
        .verbosity(usize::from(options.verbose))
        .quiet(options.quiet)
        .module(module_path!())
        .module("roundsat")
        .show_module_names(true)
        .color(stderrlog::ColorChoice::Auto)
        .init()
        .unwrap();

    info!("Arguments {:#?}", options);

    if let Err(err) = run(&options) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(options: &Opt) -> Result<(), ScheduleError> {
    if options.output_cnf.is_some() || options.encode_only {
        let (_idx, formula) = scheduler::encode(options.teams)?;
        if let Some(path) = &options.output_cnf {
            std::fs::write(path, cnf::to_dimacs_string(&formula))?;
            info!("Wrote cnf file {:?}", path);
        }
        if options.encode_only {
            return Ok(());
        }
    }

    // glucose only prints the assignment when asked for it.
    let args = if options.solver_args.is_empty() {
        vec!["-model".to_string()]
    } else {
        options.solver_args.clone()
    };

    let solver = ProcessSolver::new(
        &options.solver,
        args,
        Duration::from_secs_f32(options.timeout),
    );

    match Scheduler::new(solver).solve(options.teams)? {
        SolveOutcome::Solved(schedule) => {
            if !options.quiet {
                println!("Schedule for {} teams:", options.teams);
                println!("{}", schedule);
            }
        }
        SolveOutcome::Unsatisfiable => {
            println!("infeasible");
        }
    }

    Ok(())
}
