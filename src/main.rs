use std::process::ExitCode;

fn main() -> ExitCode {
    match flow_fps::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("flow-fps stopped: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
