use std::env::args_os;
use std::process::ExitCode;

use bitmap_transformer::{transform_bitmap, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    let outcomes = match transform_bitmap(&arguments) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("Loading failed because of: {}", e);
            return ExitCode::FAILURE;
        }
    };
    for outcome in outcomes {
        match outcome.result {
            Ok(_) => println!(
                "Saved {} to {}",
                outcome.transformation,
                outcome.output_file.display()
            ),
            Err(e) => eprintln!(
                "Error saving {}: {}",
                outcome.output_file.display(),
                e
            ),
        }
    }
    ExitCode::SUCCESS
}
