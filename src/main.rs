//! dogpost - terminal client for the dog post service

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dogpost::{
    config::Config,
    services::ConsoleNotifier,
    shell::{self, AppContext, Command, ConsoleConfirm, Flow, Route, Shell},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they do not interleave with rendered pages
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dogpost=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "dogpost.yml".to_string());
    let config = Config::load_with_env(Path::new(&config_path))?;
    tracing::info!(base_url = %config.api.base_url, "Configuration loaded");

    let input = shell::stdin_lines();
    let ctx = AppContext::new(
        config,
        Arc::new(ConsoleNotifier),
        Arc::new(ConsoleConfirm::new(input.clone())),
    )?;

    let mut shell = Shell::new(ctx);
    shell.start(Route::default()).await;
    println!("{}", shell.render());

    while let Some(line) = shell::read_line(&input, "> ").await {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(shell::CommandError::Empty) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match shell.execute(command).await {
            Flow::Quit => break,
            Flow::Help => println!("{}", shell::HELP),
            Flow::Continue => println!("{}", shell.render()),
        }
    }

    tracing::info!("Bye");
    Ok(())
}
