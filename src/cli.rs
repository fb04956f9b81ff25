use crate::config::GameConfig;
use crate::debug_log;
use crate::game_state::{GameInterface, UserAction, is_replay_answer};
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

pub const GUESS_PROMPT: &str =
    "Can you hear what the man is saying? Type a letter or solve the phrase: ";
pub const REPLAY_PROMPT: &str = "\nWould you like another chance to be redeemed? (yes/no): ";
pub const FAREWELL_MESSAGE: &str = "The History of Crossman ends here.";

/// Blank lines printed when the terminal cannot be cleared.
const CLEAR_FALLBACK_LINES: usize = 100;

/// Crossman: help the man on the cross by guessing what he is saying
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited phrase file
    #[arg(short = 'p', long = "phrases")]
    pub phrase_path: Option<PathBuf>,

    /// Path to the '%'-delimited scene file
    #[arg(short = 's', long = "states")]
    pub narrative_path: Option<PathBuf>,

    /// Wrong guesses allowed before the man dies
    #[arg(
        short = 'l',
        long = "max-lives",
        default_value_t = crate::config::DEFAULT_MAX_LIVES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_lives: u32,

    /// Use the full-screen interface
    #[arg(long)]
    pub tui: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Explicit paths win over the resolved defaults.
    pub fn to_config(&self) -> GameConfig {
        let mut config = GameConfig::default().with_max_lives(self.max_lives);
        if let Some(path) = &self.phrase_path {
            config.phrase_path = path.clone();
        }
        if let Some(path) = &self.narrative_path {
            config.narrative_path = path.clone();
        }
        config
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Line-oriented interface over any reader/writer pair.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    clear_screen: bool,
    delay: Duration,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            clear_screen: false,
            delay: Duration::ZERO,
        }
    }

    /// Clear the terminal before every view.
    #[must_use]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Base pause after the ending message; the farewell waits twice as long.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn clear(&mut self) {
        if execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0)).is_err() {
            self.emit(&"\n".repeat(CLEAR_FALLBACK_LINES));
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = write!(self.writer, "{text}").and_then(|()| self.writer.flush()) {
            debug_log!("Write error: {}", e);
        }
    }

    fn pause(&self, factor: u32) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay * factor);
        }
    }

    /// `None` on end of input or a read error.
    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                debug_log!("Read error: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_view(&mut self, view: &str) {
        if self.clear_screen {
            self.clear();
        }
        self.emit(&format!("{view}\n"));
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        self.emit(GUESS_PROMPT);
        Some(match self.read_line() {
            Some(line) => UserAction::Guess(line),
            None => UserAction::Exit,
        })
    }

    fn display_ending(&mut self, message: &str) {
        self.emit(&format!("\n{message}\n\n"));
        self.pause(1);
    }

    fn confirm_replay(&mut self) -> bool {
        self.emit(REPLAY_PROMPT);
        self.read_line().is_some_and(|answer| is_replay_answer(&answer))
    }

    fn display_farewell(&mut self) {
        self.emit(&format!("{FAREWELL_MESSAGE}\n"));
        self.pause(2);
    }
}
