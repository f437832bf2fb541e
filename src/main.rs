//! Spendable CLI
//!
//! Loads a menu fixture and lists the fewest top-ups after which a balance
//! can be spent exactly.

use std::{
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};

use humanize_duration::{Truncate, prelude::DurationExt};
use thiserror::Error;
use tracing::info;

use spendable::{
    config::SolveArgs,
    fixtures::{Fixture, FixtureError},
    logging::{self, LoggingError},
    report::{self, ReportError},
    solvers::{Solver, SolverError},
    topup::PolicyError,
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[expect(clippy::print_stderr, reason = "CLI error reporting")]
fn main() -> ExitCode {
    let args = match SolveArgs::load() {
        Ok(args) => args,
        Err(error) => {
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = run(&args) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &SolveArgs) -> Result<(), CliError> {
    logging::init(&args.logging)?;

    let loaded = Fixture::with_base_path(&args.fixtures).load_menu(&args.menu)?;
    let policy = loaded.policy(args.top_up, args.max_top_ups)?;

    info!(
        menu = %args.menu,
        items = loaded.menu().len(),
        top_up = %policy.amount(),
        max_top_ups = policy.max_top_ups(),
        "loaded menu"
    );

    let start = Instant::now();
    let solutions = args.solver().solve(args.balance, loaded.menu(), &policy)?;
    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    report::write_solutions(&mut handle, &args.balance, &policy, &solutions)?;

    writeln!(handle, "Solved in {}", elapsed.human(Truncate::Nano))?;

    Ok(())
}
