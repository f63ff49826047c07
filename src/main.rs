// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::io::Write;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;

use potability_inference::cli::args::Cli;
use potability_inference::cli::predict::run_prediction;
use potability_inference::error;

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            process::exit(0);
        }
        Err(e) => {
            // Every failure exits with 1, argument errors included.
            let _ = e.print();
            process::exit(1);
        }
    };

    match run_prediction(&args) {
        Ok(prediction) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{}", prediction.label).and_then(|()| stdout.flush()) {
                error!("Failed to write prediction: {e}");
                process::exit(1);
            }
        }
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}
