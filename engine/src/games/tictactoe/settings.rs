use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::games::SessionRng;
use super::bot_controller::Difficulty;
use super::game_state::MatchMode;
use super::types::Mark;

pub const MAX_BOT_DELAY_MS: u64 = 5_000;
const DEFAULT_BOT_DELAY_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSetting {
    SinglePlayer,
    TwoPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkChoice {
    X,
    O,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub mode: ModeSetting,
    pub difficulty: Difficulty,
    pub human_mark: MarkChoice,
    pub bot_delay_ms: u64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            mode: ModeSetting::SinglePlayer,
            difficulty: Difficulty::Medium,
            human_mark: MarkChoice::X,
            bot_delay_ms: DEFAULT_BOT_DELAY_MS,
        }
    }
}

impl MatchSettings {
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    pub fn resolve_mode(&self, rng: &mut SessionRng) -> MatchMode {
        match self.mode {
            ModeSetting::TwoPlayer => MatchMode::TwoPlayer,
            ModeSetting::SinglePlayer => {
                let human_mark = match self.human_mark {
                    MarkChoice::X => Mark::X,
                    MarkChoice::O => Mark::O,
                    MarkChoice::Random => rng.random_mark(),
                };
                MatchMode::VsBot {
                    difficulty: self.difficulty,
                    human_mark,
                }
            }
        }
    }
}

impl Validate for MatchSettings {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "Bot delay ({} ms) cannot exceed {} ms",
                self.bot_delay_ms, MAX_BOT_DELAY_MS
            ));
        }
        Ok(())
    }
}
