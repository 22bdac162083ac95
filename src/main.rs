use std::process::ExitCode;

use contact_book::cli::run_app;

fn main() -> ExitCode {
    match run_app() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
