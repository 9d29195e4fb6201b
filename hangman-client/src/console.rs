use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use hangman_core::HangmanGame;
use hangman_types::{GameError, GuessOutcome, IgnoreReason, RoundId, ScoreResult};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::identity::{IdentityService, Registration};
use crate::lookup::{
    ChampionLookup, display_name, lookup_splash_or_default, lookup_title_or_default,
};
use crate::ranking::player_standing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(char),
    NewRound,
    Rank,
    Help,
    Logout,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let mut chars = line.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        return Command::Guess(letter);
    }

    match line.to_ascii_lowercase().as_str() {
        "" | "new" => Command::NewRound,
        "rank" => Command::Rank,
        "help" | "?" => Command::Help,
        "logout" => Command::Logout,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

const HELP: &str = "\
Commands:
  <letter>   guess a letter
  new        start a new round (an empty line works too)
  rank       show the leaderboard
  logout     forget your nickname
  help       show this message
  quit       leave the game";

/// Title and splash of a round's word, fetched while the round is played.
struct PendingLookup {
    round_id: RoundId,
    task: JoinHandle<(String, String)>,
}

/// Line-oriented terminal front end. Game state advances before any
/// network call made on its behalf returns.
pub struct ConsoleApp<W: Write> {
    game: HangmanGame,
    identity: IdentityService,
    lookup: Arc<dyn ChampionLookup>,
    pending_lookup: Option<PendingLookup>,
    out: W,
}

impl<W: Write> ConsoleApp<W> {
    pub fn new(
        game: HangmanGame,
        identity: IdentityService,
        lookup: Arc<dyn ChampionLookup>,
        out: W,
    ) -> Self {
        Self {
            game,
            identity,
            lookup,
            pending_lookup: None,
            out,
        }
    }

    pub fn game(&self) -> &HangmanGame {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Play until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();

        if !self.ensure_identity(&mut lines).await? {
            return Ok(());
        }
        writeln!(self.out, "{}", HELP)?;
        self.prefetch_lookups();
        self.print_round()?;

        while let Some(line) = lines.next_line().await? {
            match parse_command(&line) {
                Command::Guess(letter) => self.guess(letter).await?,
                Command::NewRound => {
                    self.game.new_round();
                    self.prefetch_lookups();
                    self.print_round()?;
                }
                Command::Rank => self.show_ranking().await?,
                Command::Help => writeln!(self.out, "{}", HELP)?,
                Command::Logout => {
                    self.identity.forget().await?;
                    self.game.set_player(None);
                    writeln!(self.out, "Logged out.")?;
                    if !self.ensure_identity(&mut lines).await? {
                        break;
                    }
                    self.print_round()?;
                }
                Command::Quit => break,
                Command::Unknown(text) => {
                    writeln!(self.out, "Unknown command {:?}. Type help.", text)?;
                }
            }
        }

        writeln!(self.out, "Bye!")?;
        self.out.flush()?;
        Ok(())
    }

    /// Ask for a nickname until one is stored. Returns false on end of input.
    async fn ensure_identity<R: AsyncBufRead + Unpin>(
        &mut self,
        lines: &mut Lines<R>,
    ) -> Result<bool> {
        if let Some(nick) = self.identity.current_nick().await? {
            writeln!(self.out, "Welcome back, {}!", nick)?;
            self.game.set_player(Some(nick));
            return Ok(true);
        }

        loop {
            write!(self.out, "Choose a nickname: ")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                return Ok(false);
            };

            match self.identity.choose_nick(&line).await {
                Ok(registration) => {
                    let nick = line.trim().to_string();
                    if let Registration::Failed(e) = registration {
                        writeln!(
                            self.out,
                            "Welcome, {}! (leaderboard unavailable: {})",
                            nick, e
                        )?;
                    } else {
                        writeln!(self.out, "Welcome, {}!", nick)?;
                    }
                    self.game.set_player(Some(nick));
                    return Ok(true);
                }
                Err(e) => {
                    debug!("Rejected nickname {:?}: {:#}", line, e);
                    writeln!(self.out, "Please enter a nickname.")?;
                }
            }
        }
    }

    async fn guess(&mut self, letter: char) -> Result<()> {
        let outcome = match self.game.guess(letter) {
            Ok(outcome) => outcome,
            Err(GameError::InvalidLetter { letter }) => {
                writeln!(self.out, "{:?} is not a letter.", letter)?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match outcome {
            GuessOutcome::Hit { letter } => writeln!(self.out, "Yes, {} is there.", letter)?,
            GuessOutcome::Miss { letter } => writeln!(self.out, "No {}.", letter)?,
            GuessOutcome::Ignored {
                letter,
                reason: IgnoreReason::AlreadyGuessed,
            } => writeln!(self.out, "You already tried {}.", letter)?,
            GuessOutcome::Ignored {
                reason: IgnoreReason::RoundOver,
                ..
            } => {
                writeln!(self.out, "The round is over. Type new to play again.")?;
                return Ok(());
            }
        }

        self.print_round()?;

        if outcome.changed_round() && self.game.round().outcome().is_terminal() {
            if let Some(result) = self.game.last_result().cloned() {
                self.print_result(&result).await?;
            }
        }
        Ok(())
    }

    fn print_round(&mut self) -> Result<()> {
        let view = self.game.round().view();
        let masked: Vec<String> = view.masked_word.chars().map(String::from).collect();
        let missed: Vec<String> = view.missed_letters.iter().map(char::to_string).collect();

        writeln!(self.out)?;
        writeln!(self.out, "  {}", masked.join(" "))?;
        writeln!(
            self.out,
            "  Misses: {} ({} attempts left)",
            if missed.is_empty() {
                "-".to_string()
            } else {
                missed.join(", ")
            },
            view.remaining_attempts
        )?;
        Ok(())
    }

    /// Start fetching title and splash for the current round's word.
    fn prefetch_lookups(&mut self) {
        let round_id = self.game.round().id();
        let word = self.game.round().word().to_string();
        let lookup = self.lookup.clone();

        let task = tokio::spawn(async move {
            let title = lookup_title_or_default(lookup.as_ref(), &word).await;
            let splash = lookup_splash_or_default(lookup.as_ref(), &word).await;
            (title, splash)
        });

        if let Some(previous) = self.pending_lookup.replace(PendingLookup { round_id, task }) {
            previous.task.abort();
        }
    }

    async fn finished_lookups(&mut self, result: &ScoreResult) -> (String, String) {
        match self.pending_lookup.take() {
            Some(pending) if pending.round_id == result.round_id => {
                pending.task.await.unwrap_or_else(|e| {
                    warn!("Lookup task for {} failed: {}", result.word, e);
                    (String::new(), String::new())
                })
            }
            other => {
                if let Some(stale) = other {
                    stale.task.abort();
                }
                let title = lookup_title_or_default(self.lookup.as_ref(), &result.word).await;
                let splash = lookup_splash_or_default(self.lookup.as_ref(), &result.word).await;
                (title, splash)
            }
        }
    }

    async fn print_result(&mut self, result: &ScoreResult) -> Result<()> {
        let name = display_name(&result.word);
        let (title, splash) = self.finished_lookups(result).await;

        if result.is_win() {
            writeln!(self.out, "You won! +{} points", result.points_awarded)?;
        } else {
            writeln!(self.out, "You lost. 0 points")?;
        }

        if title.is_empty() {
            writeln!(self.out, "The champion was {}.", name)?;
        } else {
            writeln!(self.out, "The champion was {}, {}.", name, title)?;
        }
        if !splash.is_empty() {
            writeln!(self.out, "Splash: {}", splash)?;
        }
        writeln!(self.out, "Type new for another round.")?;
        Ok(())
    }

    async fn show_ranking(&mut self) -> Result<()> {
        let ranking = self.identity.ranking().clone();
        let entries = match ranking.fetch_leaderboard().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not show leaderboard: {}", e);
                writeln!(self.out, "Leaderboard unavailable: {}", e)?;
                return Ok(());
            }
        };

        writeln!(self.out, "Leaderboard:")?;
        if entries.is_empty() {
            writeln!(self.out, "  (empty)")?;
        }
        for (index, entry) in entries.iter().enumerate() {
            writeln!(self.out, "  {:>3}. {:<20} {}", index + 1, entry.nick, entry.points)?;
        }

        let Some(nick) = self.identity.current_nick().await? else {
            return Ok(());
        };
        match player_standing(&entries, &nick) {
            Some((position, _)) => writeln!(self.out, "You are #{}.", position)?,
            None => writeln!(self.out, "You are not ranked yet.")?,
        }
        let best = self.identity.session().best_score().await?;
        writeln!(self.out, "Your best score: {}", best)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_letter() {
        assert_eq!(parse_command("a"), Command::Guess('a'));
        assert_eq!(parse_command("  Z \n"), Command::Guess('Z'));
        assert_eq!(parse_command("7"), Command::Guess('7'));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command(""), Command::NewRound);
        assert_eq!(parse_command("new"), Command::NewRound);
        assert_eq!(parse_command("RANK"), Command::Rank);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("logout"), Command::Logout);
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(
            parse_command("ashe"),
            Command::Unknown("ashe".to_string())
        );
    }
}
