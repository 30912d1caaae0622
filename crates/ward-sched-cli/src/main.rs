// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use ward_sched_model::prelude::{InstanceLoader, SolutionLoader};
use ward_sched_verify::prelude::{ScoreReport, score_solution};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(
    instance_path: &str,
    solution_path: &str,
    verbose: bool,
) -> Result<ScoreReport, Box<dyn std::error::Error>> {
    let instance = InstanceLoader::new().from_path(instance_path)?;
    let solution = SolutionLoader::new().from_path(solution_path)?;
    Ok(score_solution(&instance, &solution, verbose)?)
}

fn main() -> ExitCode {
    enable_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("Usage: {} <instance_file> <solution_file> [verbose]", args[0]);
        return ExitCode::from(2);
    }
    // Any fourth argument turns on per-violation detail lines.
    let verbose = args.len() == 4;

    match run(&args[1], &args[2], verbose) {
        Ok(report) => {
            if verbose {
                for (_, line) in report.iter_details() {
                    println!("{line}");
                }
                println!();
            }
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("verification failed: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
