use crate::debug_log;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_LIVES: u32 = 6;
pub const PHRASE_FILE_NAME: &str = "wordphrases.txt";
pub const NARRATIVE_FILE_NAME: &str = "crossman_states.txt";

const RESOURCES_DIR: &str = "resources";
const APP_DIR: &str = "crossman";

/// Where a round gets its phrases and scenes from, and how many lives it allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub phrase_path: PathBuf,
    pub narrative_path: PathBuf,
    pub max_lives: u32,
}

impl GameConfig {
    pub fn new(phrase_path: impl Into<PathBuf>, narrative_path: impl Into<PathBuf>) -> Self {
        Self {
            phrase_path: phrase_path.into(),
            narrative_path: narrative_path.into(),
            max_lives: DEFAULT_MAX_LIVES,
        }
    }

    #[must_use]
    pub fn with_max_lives(mut self, max_lives: u32) -> Self {
        self.max_lives = max_lives;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            resolve_resource(PHRASE_FILE_NAME),
            resolve_resource(NARRATIVE_FILE_NAME),
        )
    }
}

/// Per-user data directory, e.g. `~/.local/share/crossman` on Linux.
pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

/// Places a resource called `name` is looked for, in order.
pub fn resource_candidates(name: &str) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(name), Path::new(RESOURCES_DIR).join(name)];
    if let Some(dir) = get_data_dir() {
        candidates.push(dir.join(name));
    }
    candidates
}

/// First existing candidate, or the bare name so that loading reports it missing.
pub fn resolve_resource(name: &str) -> PathBuf {
    resource_candidates(name)
        .into_iter()
        .find(|path| path.is_file())
        .unwrap_or_else(|| {
            debug_log!("No '{}' found in any resource location", name);
            PathBuf::from(name)
        })
}
