use std::process::ExitCode;
use rpc_harness::cli::run_cli;
use rpc_harness::HarnessError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run_cli().await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e.downcast_ref::<HarnessError>().map(HarnessError::exit_code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
