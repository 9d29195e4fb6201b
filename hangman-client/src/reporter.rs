//! Decouples round results from the network.
//!
//! The game publishes `RoundFinished` on its event bus. [`ResultForwarder`]
//! pushes the result into a channel without blocking, and a separate task
//! running [`ResultReporter`] submits it to the leaderboard.

use hangman_core::{GameEvent, GameEventHandler};
use hangman_types::{RoundId, ScoreResult};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::ranking::RankingClient;

pub fn result_channel() -> (ResultForwarder, mpsc::UnboundedReceiver<ScoreResult>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ResultForwarder { sender }, receiver)
}

/// Event handler that hands finished rounds to the reporter task.
#[derive(Debug, Clone)]
pub struct ResultForwarder {
    sender: mpsc::UnboundedSender<ScoreResult>,
}

impl GameEventHandler for ResultForwarder {
    fn handle_event(&mut self, event: GameEvent) {
        if let GameEvent::RoundFinished { result } = event {
            if self.sender.send(result).is_err() {
                warn!("Result reporter has stopped; round result not submitted");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Submitted,
    Failed,
    Duplicate,
    NoIdentity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub submitted: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Submits each round result at most once, under the nickname captured
/// when the round ended. Failures are logged and dropped.
#[derive(Debug)]
pub struct ResultReporter {
    ranking: RankingClient,
    last_round: Option<RoundId>,
    summary: ReportSummary,
}

impl ResultReporter {
    pub fn new(ranking: RankingClient) -> Self {
        Self {
            ranking,
            last_round: None,
            summary: ReportSummary::default(),
        }
    }

    pub fn summary(&self) -> ReportSummary {
        self.summary
    }

    pub async fn report(&mut self, result: &ScoreResult) -> ReportOutcome {
        let outcome = self.submit(result).await;
        match outcome {
            ReportOutcome::Submitted => self.summary.submitted += 1,
            ReportOutcome::Failed => self.summary.failed += 1,
            ReportOutcome::Duplicate | ReportOutcome::NoIdentity => self.summary.skipped += 1,
        }
        outcome
    }

    async fn submit(&mut self, result: &ScoreResult) -> ReportOutcome {
        // Rounds finish one at a time, so a repeat can only be the latest one
        if self.last_round == Some(result.round_id) {
            warn!("Round {} was already reported; skipping", result.round_id);
            return ReportOutcome::Duplicate;
        }
        self.last_round = Some(result.round_id);

        let Some(nick) = result.nick.as_deref() else {
            warn!("No nickname set; dropping result of round {}", result.round_id);
            return ReportOutcome::NoIdentity;
        };

        match self
            .ranking
            .submit_result(nick, result.points_awarded)
            .await
        {
            Ok(()) => {
                info!(
                    "Reported round {} for {}: {} points",
                    result.round_id, nick, result.points_awarded
                );
                ReportOutcome::Submitted
            }
            Err(e) => {
                warn!("Failed to report round {}: {}", result.round_id, e);
                ReportOutcome::Failed
            }
        }
    }

    /// Drain `receiver` until every sender is dropped.
    pub async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<ScoreResult>) -> ReportSummary {
        while let Some(result) = receiver.recv().await {
            self.report(&result).await;
        }
        info!("Result reporter finished: {:?}", self.summary);
        self.summary
    }

    pub fn spawn(self, receiver: mpsc::UnboundedReceiver<ScoreResult>) -> JoinHandle<ReportSummary> {
        tokio::spawn(self.run(receiver))
    }
}
