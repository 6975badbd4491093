use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::error::GameError;
use crate::games::SessionRng;
use crate::log;
use super::game_state::Match;
use super::settings::MatchSettings;
use super::types::{GameOutcome, Position};

/// Shares a match between the caller's input handling and the bot's turn.
#[derive(Clone)]
pub struct MatchSession {
    state: Arc<Mutex<Match>>,
    bot_delay: Duration,
}

impl MatchSession {
    pub fn new(game: Match, bot_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(game)),
            bot_delay,
        }
    }

    pub fn from_settings(settings: &MatchSettings, rng: &mut SessionRng) -> Self {
        Self::new(Match::from_settings(settings, rng), settings.bot_delay())
    }

    pub async fn snapshot(&self) -> Match {
        self.state.lock().await.clone()
    }

    pub async fn place_mark(&self, row: usize, col: usize) -> Result<GameOutcome, GameError> {
        self.state.lock().await.place_mark(row, col)
    }

    pub async fn reset(&self) {
        self.state.lock().await.reset();
    }

    /// Plays the bot's turn if it has one. The search runs on a blocking
    /// thread without holding the lock; its result is dropped if the match
    /// was reset before it finished.
    pub async fn play_bot_turn(&self) -> Option<Position> {
        let request = self.state.lock().await.bot_request()?;

        if !self.bot_delay.is_zero() {
            tokio::time::sleep(self.bot_delay).await;
        }

        let pos = match tokio::task::spawn_blocking(move || request.compute()).await {
            Ok(Some(pos)) => pos,
            Ok(None) => return None,
            Err(e) => {
                log!("Bot search task failed: {}", e);
                return None;
            }
        };

        let mut game = self.state.lock().await;
        match game.apply_bot_move(request.generation, pos) {
            Ok(true) => Some(pos),
            Ok(false) => None,
            Err(e) => {
                log!("Bot failed to place mark at {}: {}", pos, e);
                None
            }
        }
    }
}
