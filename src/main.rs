use std::process::ExitCode;

fn main() -> ExitCode {
    parklot_lib::run()
}
