use std::process::ExitCode;

fn main() -> ExitCode {
    stylist_cli::run()
}
