use crate::error::{CrossmanError, Result};
use crate::{debug_log, info_log};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::io;
use std::path::Path;

/// Returned when the phrase file does not exist.
pub const MISSING_FILE_PHRASE: &str = "malum";
/// Returned when the phrase file exists but has no usable lines.
pub const EMPTY_LIST_PHRASE: &str = "memento more";

/// Lines containing this marker are annotations, not phrases.
const ANNOTATION_MARKER: char = '[';

pub fn load_phrases_from_str(data: &str) -> Vec<String> {
    data.lines()
        .filter(|line| !line.trim().is_empty() && !line.contains(ANNOTATION_MARKER))
        .map(|line| line.trim().to_lowercase())
        .collect()
}

pub fn choose_phrase<R: Rng + ?Sized>(phrases: &[String], rng: &mut R) -> String {
    match phrases.choose(rng) {
        Some(phrase) => phrase.clone(),
        None => {
            info_log!("Phrase list is empty, using '{}'", EMPTY_LIST_PHRASE);
            EMPTY_LIST_PHRASE.to_string()
        }
    }
}

/// Read the phrase file at `path` and pick one phrase uniformly at random.
///
/// A missing file and an empty list fall back to different fixed phrases.
/// Any other read failure is returned to the caller.
pub fn load_random_phrase<P: AsRef<Path>, R: Rng + ?Sized>(path: P, rng: &mut R) -> Result<String> {
    let path = path.as_ref();
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info_log!(
                "Phrase file '{}' not found, using '{}'",
                path.display(),
                MISSING_FILE_PHRASE
            );
            return Ok(MISSING_FILE_PHRASE.to_string());
        }
        Err(source) => {
            return Err(CrossmanError::Resource {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let phrases = load_phrases_from_str(&data);
    debug_log!("Loaded {} phrases from '{}'", phrases.len(), path.display());
    Ok(choose_phrase(&phrases, rng))
}
