// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, run the upload, report.
// - This is the single place that decides the process exit code:
//   0 only when the service accepted the file, 1 for everything else.

use clap::Parser;
use gofile_cli::cli::{self, Args};

fn main() {
    let args = Args::parse();

    let code = match cli::run(&args) {
        Ok(outcome) => cli::report(&outcome),
        Err(err) => {
            eprintln!("Error: {err:#}");
            1
        }
    };
    std::process::exit(code);
}
