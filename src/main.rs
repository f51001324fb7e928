use std::process::ExitCode;
use utest_runner::{cli, core::TestStatus, infra::logging};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    // Parse command line arguments
    let options = cli::parse_args();

    // Run the tests and map the verdict to the exit status
    match cli::process_command(options).await {
        Ok(TestStatus::Passed) => ExitCode::SUCCESS,
        Ok(TestStatus::Failed) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
