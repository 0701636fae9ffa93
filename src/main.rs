use clap::Parser;
use std::sync::Arc;

use demo_server::cli::Cli;
use demo_server::config::{AppState, Config};
use demo_server::{banner, browser, logger, server, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::from_cli(&cli)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<()> {
    let addr = cfg.get_socket_addr()?;
    let url = cfg.public_url();
    let state = Arc::new(AppState::new(cfg));

    let demo_dir = state
        .config
        .content
        .project_dir
        .join(state.rewriter.mount().trim_start_matches('/'));
    if !demo_dir.is_dir() {
        logger::log_warning(&format!(
            "Demo directory '{}' not found; every request will get 404",
            demo_dir.display()
        ));
    }

    print!("{}", banner::render(&url, &state.config.content.pages));
    println!();

    // Bind failures end the process here
    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &state.config);

    if state.config.browser.open {
        browser::spawn_open(url);
    }

    server::run(listener, state, server::shutdown_signal()).await;
    println!("\n{}", banner::farewell());
    Ok(())
}
