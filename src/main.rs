use std::process::ExitCode;

mod demo;

fn main() -> ExitCode {
    match demo::registry() {
        Ok(registry) => alb_local::run(registry),
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::FAILURE
        }
    }
}
