use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::countries::EMOJI_COUNTRIES;

pub const DEFAULT_ROUNDS: usize = 3;
pub const DEFAULT_QUESTIONS_PER_ROUND: usize = 5;
pub const DEFAULT_TIMER_SECONDS: u32 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub rounds: usize,
    pub questions_per_round: usize,
    pub timer_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            questions_per_round: DEFAULT_QUESTIONS_PER_ROUND,
            timer_seconds: DEFAULT_TIMER_SECONDS,
        }
    }
}

impl GameConfig {
    pub fn total_questions(&self) -> usize {
        self.rounds.saturating_mul(self.questions_per_round)
    }

    /// Every knob must be at least one for a session to make sense.
    pub fn is_playable(&self) -> bool {
        self.rounds > 0 && self.questions_per_round > 0 && self.timer_seconds > 0
    }

    /// Whether a table of `table_len` questions can serve a whole game
    pub fn fits(&self, table_len: usize) -> bool {
        self.total_questions() <= table_len
    }
}

pub trait ConfigStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "flagquiz") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("flagquiz_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> GameConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<GameConfig>(&bytes) {
                Ok(cfg) if cfg.is_playable() && cfg.fits(EMOJI_COUNTRIES.len()) => return cfg,
                Ok(cfg) => {
                    tracing::warn!(?cfg, path = %self.path.display(), "ignoring unplayable config");
                }
                Err(err) => {
                    tracing::warn!(%err, path = %self.path.display(), "ignoring malformed config");
                }
            }
        }
        GameConfig::default()
    }

    fn save(&self, cfg: &GameConfig) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(io::Error::from)?;
        fs::write(&self.path, data)
    }
}
