use std::process::ExitCode;

use clap::Parser;

use gpu_accelerator::cli::{self, Args};
use gpu_accelerator::log_init::{init_logger, level_for_verbosity};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logger(args.log_file.clone(), level_for_verbosity(args.verbose)) {
        eprintln!("warning: {e}");
    }

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
