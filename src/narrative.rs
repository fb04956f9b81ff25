use crate::error::{CrossmanError, Result};
use crate::{debug_log, info_log};
use std::fs;
use std::io;
use std::path::Path;

/// Separates one scene from the next in the narrative file.
pub const BLOCK_DELIMITER: char = '%';

/// Ordered scene descriptions, one per wrong-guess count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNarrative {
    blocks: Vec<String>,
}

impl StateNarrative {
    pub fn parse(content: &str) -> Self {
        Self {
            blocks: content.split(BLOCK_DELIMITER).map(str::to_string).collect(),
        }
    }

    /// Returns `Ok(None)` when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let narrative = Self::parse(&content);
                debug_log!(
                    "Loaded {} narrative blocks from '{}'",
                    narrative.len(),
                    path.display()
                );
                Ok(Some(narrative))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info_log!("Narrative file '{}' not found", path.display());
                Ok(None)
            }
            Err(source) => Err(CrossmanError::Resource {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The scene for `wrong_count`, reusing the last block past the end.
    pub fn block(&self, wrong_count: u32) -> &str {
        let last = self.blocks.len().saturating_sub(1);
        let index = usize::try_from(wrong_count).map_or(last, |i| i.min(last));
        self.blocks.get(index).map_or("", |block| block.trim())
    }
}
