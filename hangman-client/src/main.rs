use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tokio::signal;
use tracing::{error, info};

use hangman_client::{
    config::Config,
    console::ConsoleApp,
    identity::IdentityService,
    lookup::DataDragonLookup,
    ranking::RankingClient,
    reporter::{ResultReporter, result_channel},
};
use hangman_core::{HangmanGame, Session, WordSource};
use hangman_persistence::{SessionRepository, connection::connect_and_migrate};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they stay out of the game's output
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = Config::new()?;
    info!("Starting hangman with {:?}", config);

    let word_source = match &config.words_file {
        Some(path) => {
            info!("Loading words from {}", path);
            WordSource::from_file(path)?
        }
        None => WordSource::champions(),
    };
    info!("Word catalog has {} entries", word_source.len());

    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("Failed to open session database {}", config.database_url))?;
    let session = Session::new(Arc::new(SessionRepository::new(db)));

    let ranking =
        RankingClient::with_timeout(&config.leaderboard_url, session, config.request_timeout())?;
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?;
    let lookup = Arc::new(DataDragonLookup::new(
        http,
        &config.lookup_base_url,
        &config.lookup_version,
        &config.lookup_locale,
    ));

    let (forwarder, receiver) = result_channel();
    let reporter = ResultReporter::new(ranking.clone()).spawn(receiver);

    let mut game = HangmanGame::new(word_source);
    game.add_handler(Box::new(forwarder));

    let mut console = ConsoleApp::new(
        game,
        IdentityService::new(ranking),
        lookup,
        std::io::stdout(),
    );

    tokio::select! {
        result = console.run(BufReader::new(tokio::io::stdin())) => {
            if let Err(e) = result {
                error!("Console stopped: {:#}", e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    // Dropping the game closes the result channel so the reporter can finish
    drop(console);
    match tokio::time::timeout(Duration::from_secs(5), reporter).await {
        Ok(Ok(summary)) => info!("Submitted {} results", summary.submitted),
        Ok(Err(e)) => error!("Result reporter panicked: {}", e),
        Err(_) => error!("Timed out waiting for pending results"),
    }

    Ok(())
}
