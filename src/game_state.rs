use crate::config::GameConfig;
use crate::error::Result;
use crate::narrative::StateNarrative;
use crate::phrases::load_random_phrase;
use crate::{debug_log, info_log};
use rand::Rng;

pub const LOSS_MESSAGE: &str = "The man died in horrible agony because of you.";
pub const VICTORY_MESSAGE: &str = "He shall be remembered for all time, and you with him. Thank you!";

const HIDDEN_LETTER: char = '_';
const SEPARATOR_WIDTH: usize = 30;
/// A wrong full-phrase guess costs this many lives.
const PHRASE_GUESS_PENALTY: u32 = 2;

/// One round of Crossman: the secret phrase, the letters tried so far and
/// how far the man has suffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    phrase: String,
    tried_letters: Vec<char>,
    wrong_count: u32,
    max_lives: u32,
}

impl GameState {
    pub fn new(phrase: impl Into<String>, max_lives: u32) -> Self {
        Self {
            phrase: phrase.into().to_lowercase(),
            tried_letters: Vec::new(),
            wrong_count: 0,
            max_lives,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Letters tried so far, in the order they were first guessed.
    pub fn tried_letters(&self) -> &[char] {
        &self.tried_letters
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Not clamped: goes negative when a phrase guess overshoots the last life.
    pub fn lives_remaining(&self) -> i64 {
        i64::from(self.max_lives) - i64::from(self.wrong_count)
    }

    /// Apply one line of player input.
    ///
    /// More than one character is a guess at the whole phrase; a single
    /// character is a letter guess. Blank input is ignored; otherwise the
    /// input is taken as typed, surrounding spaces included.
    pub fn process_guess(&mut self, input: &str) {
        if input.trim().is_empty() {
            return;
        }
        let guess = input.to_lowercase();
        let mut chars = guess.chars();

        let Some(letter) = chars.next() else {
            return;
        };

        if chars.next().is_some() {
            if guess == self.phrase {
                info_log!("Phrase solved outright");
                self.tried_letters = self.distinct_phrase_chars();
            } else {
                self.wrong_count += PHRASE_GUESS_PENALTY;
                debug_log!("Wrong phrase guess, wrong count now {}", self.wrong_count);
            }
            return;
        }

        if !self.phrase.contains(letter) {
            self.wrong_count += 1;
            debug_log!("'{}' not in phrase, wrong count now {}", letter, self.wrong_count);
        }

        if !self.tried_letters.contains(&letter) {
            self.tried_letters.push(letter);
        }
    }

    fn distinct_phrase_chars(&self) -> Vec<char> {
        let mut chars = Vec::new();
        for c in self.phrase.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        chars
    }

    pub fn is_won(&self) -> bool {
        self.phrase
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| self.tried_letters.contains(&c))
    }

    pub fn is_lost(&self) -> bool {
        self.wrong_count >= self.max_lives
    }

    pub fn is_game_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    /// Loss is checked first, so a round that is both won and lost reads as lost.
    /// Also meaningful mid-round.
    pub fn ending_message(&self) -> &'static str {
        if self.is_lost() {
            LOSS_MESSAGE
        } else {
            VICTORY_MESSAGE
        }
    }

    /// The phrase with unguessed letters blanked, upper-cased.
    pub fn obscured_phrase(&self) -> String {
        self.phrase
            .chars()
            .map(|c| {
                if !c.is_alphabetic() || self.tried_letters.contains(&c) {
                    c
                } else {
                    HIDDEN_LETTER
                }
            })
            .collect::<String>()
            .to_uppercase()
    }

    pub fn render_view(&self, narrative: Option<&StateNarrative>) -> String {
        let scene = match narrative {
            Some(narrative) => narrative.block(self.wrong_count).to_string(),
            None => format!("The crucified man's state: {}", self.wrong_count),
        };

        let known = self
            .tried_letters
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
            .to_uppercase();

        [
            scene,
            format!("\n{}\n", self.obscured_phrase()),
            "-".repeat(SEPARATOR_WIDTH),
            format!("KNOWN LETTERS: {known}"),
            format!("TIME LEFT: {}", self.lives_remaining()),
        ]
        .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// The terminal side of the game. Implemented by the line-based CLI and the
/// full-screen TUI.
pub trait GameInterface {
    fn display_view(&mut self, view: &str);
    /// `None` means the input could not be read and the game should stop.
    fn read_guess(&mut self) -> Option<UserAction>;
    fn display_ending(&mut self, message: &str);
    fn confirm_replay(&mut self) -> bool;
    fn display_farewell(&mut self);
}

pub fn is_replay_answer(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

enum RoundOutcome {
    Finished,
    Quit,
}

fn play_round<I: GameInterface + ?Sized>(
    game: &mut GameState,
    narrative: Option<&StateNarrative>,
    interface: &mut I,
) -> RoundOutcome {
    while !game.is_game_over() {
        interface.display_view(&game.render_view(narrative));
        match interface.read_guess() {
            Some(UserAction::Guess(guess)) => game.process_guess(&guess),
            Some(UserAction::Exit) | None => return RoundOutcome::Quit,
        }
    }
    interface.display_view(&game.render_view(narrative));
    RoundOutcome::Finished
}

/// Play rounds until the player declines a replay or input runs out.
pub fn game_loop<I, R>(config: &GameConfig, interface: &mut I, rng: &mut R) -> Result<()>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    loop {
        let phrase = load_random_phrase(&config.phrase_path, rng)?;
        let narrative = StateNarrative::load(&config.narrative_path)?;
        let mut game = GameState::new(phrase, config.max_lives);
        info_log!("New round, phrase of {} characters", game.phrase().chars().count());

        if let RoundOutcome::Quit = play_round(&mut game, narrative.as_ref(), interface) {
            info_log!("Player left mid-round");
            interface.display_farewell();
            return Ok(());
        }

        info_log!(
            "Round over: {} after {} wrong guesses",
            if game.is_lost() { "lost" } else { "won" },
            game.wrong_count()
        );
        interface.display_ending(game.ending_message());

        if !interface.confirm_replay() {
            interface.display_farewell();
            return Ok(());
        }
    }
}
