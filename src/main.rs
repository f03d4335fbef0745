use std::process::ExitCode;

use stacklab::{bind_addr_from_env, config, logger, make_router, run_app};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    if let Err(error) = logger::init(&logger::level_from_env()) {
        eprintln!("Error: {error:#}");
        return ExitCode::FAILURE;
    }

    // Every generated link depends on the origin, so a bad SITE is fatal.
    let site = match config::init_from_env() {
        Ok(site) => site,
        Err(error) => {
            tracing::error!(%error, "invalid site configuration");
            return ExitCode::FAILURE;
        }
    };

    let addr = match bind_addr_from_env() {
        Ok(addr) => addr,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "invalid bind address");
            return ExitCode::FAILURE;
        }
    };

    match run_app(make_router(), addr, site.clone()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "server failed");
            ExitCode::FAILURE
        }
    }
}
