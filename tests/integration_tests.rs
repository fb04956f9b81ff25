// Integration tests for crossman
// These tests play whole rounds through the public driver

use crossman::cli::{CliInterface, FAREWELL_MESSAGE, GUESS_PROMPT};
use crossman::game_state::{LOSS_MESSAGE, VICTORY_MESSAGE};
use crossman::phrases::{EMPTY_LIST_PHRASE, MISSING_FILE_PHRASE};
use crossman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

/// Scripted interface that records everything the driver shows.
#[derive(Default)]
struct ScriptedInterface {
    guesses: VecDeque<UserAction>,
    replays: VecDeque<bool>,
    views: Vec<String>,
    endings: Vec<String>,
    farewells: usize,
}

impl ScriptedInterface {
    fn new(guesses: &[&str], replays: &[bool]) -> Self {
        Self {
            guesses: guesses
                .iter()
                .map(|g| UserAction::Guess(g.to_string()))
                .collect(),
            replays: replays.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl GameInterface for ScriptedInterface {
    fn display_view(&mut self, view: &str) {
        self.views.push(view.to_string());
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        Some(self.guesses.pop_front().unwrap_or(UserAction::Exit))
    }

    fn display_ending(&mut self, message: &str) {
        self.endings.push(message.to_string());
    }

    fn confirm_replay(&mut self) -> bool {
        self.replays.pop_front().unwrap_or(false)
    }

    fn display_farewell(&mut self) {
        self.farewells += 1;
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("crossman_it_{}_{name}", std::process::id()))
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = temp_path(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_winning_round_by_letters() {
    let phrases = write_temp("win_letters_phrases.txt", "[header]\nAB C\n");
    let states = write_temp("win_letters_states.txt", "calm%hurt%dead");
    let config = GameConfig::new(&phrases, &states);
    let mut interface = ScriptedInterface::new(&["a", "b", "c"], &[false]);
    let mut rng = StdRng::seed_from_u64(11);

    game_loop(&config, &mut interface, &mut rng).unwrap();

    assert_eq!(interface.endings, vec![VICTORY_MESSAGE.to_string()]);
    assert_eq!(interface.farewells, 1);
    // One view per guess plus the final view
    assert_eq!(interface.views.len(), 4);
    assert!(interface.views[1].contains("\nA_ _\n"));
    let last = interface.views.last().unwrap();
    assert!(last.starts_with("calm"));
    assert!(last.contains("KNOWN LETTERS: A, B, C"));
    assert!(last.ends_with("TIME LEFT: 6"));

    fs::remove_file(phrases).unwrap();
    fs::remove_file(states).unwrap();
}

#[test]
fn test_losing_round_walks_the_narrative() {
    let phrases = write_temp("lose_phrases.txt", "dog\n");
    let states = write_temp("lose_states.txt", "s0%s1%s2");
    let config = GameConfig::new(&phrases, &states).with_max_lives(3);
    let mut interface = ScriptedInterface::new(&["x", "y", "z"], &[false]);
    let mut rng = StdRng::seed_from_u64(5);

    game_loop(&config, &mut interface, &mut rng).unwrap();

    assert_eq!(interface.endings, vec![LOSS_MESSAGE.to_string()]);
    let scenes: Vec<&str> = interface
        .views
        .iter()
        .map(|v| v.lines().next().unwrap())
        .collect();
    assert_eq!(scenes, vec!["s0", "s1", "s2", "s2"]);
    assert!(interface.views.last().unwrap().ends_with("TIME LEFT: 0"));

    fs::remove_file(phrases).unwrap();
    fs::remove_file(states).unwrap();
}

#[test]
fn test_missing_resources_use_fallbacks() {
    let phrases = temp_path("missing_phrases.txt");
    let states = temp_path("missing_states.txt");
    let _ = fs::remove_file(&phrases);
    let _ = fs::remove_file(&states);
    let config = GameConfig::new(&phrases, &states);
    let mut interface = ScriptedInterface::new(&[MISSING_FILE_PHRASE], &[false]);
    let mut rng = StdRng::seed_from_u64(5);

    game_loop(&config, &mut interface, &mut rng).unwrap();

    assert!(interface.views[0].starts_with("The crucified man's state: 0"));
    assert!(interface.views[0].contains("\n_____\n"));
    assert_eq!(interface.endings, vec![VICTORY_MESSAGE.to_string()]);
}

#[test]
fn test_empty_phrase_file_uses_empty_list_fallback() {
    let phrases = write_temp("empty_phrases.txt", "\n[nothing here]\n   \n");
    let mut rng = StdRng::seed_from_u64(5);
    let phrase = load_random_phrase(&phrases, &mut rng).unwrap();
    assert_eq!(phrase, EMPTY_LIST_PHRASE);
    fs::remove_file(phrases).unwrap();
}

#[test]
fn test_replay_starts_a_fresh_round() {
    let phrases = write_temp("replay_phrases.txt", "sin\n");
    let states = temp_path("replay_states_missing.txt");
    let config = GameConfig::new(&phrases, &states);
    let mut interface = ScriptedInterface::new(&["q", "sin", "sin"], &[true, false]);
    let mut rng = StdRng::seed_from_u64(5);

    game_loop(&config, &mut interface, &mut rng).unwrap();

    assert_eq!(interface.endings.len(), 2);
    // Second round starts with no wrong guesses or known letters
    let second_round_start = &interface.views[3];
    assert!(second_round_start.starts_with("The crucified man's state: 0"));
    assert!(second_round_start.contains("KNOWN LETTERS: \n"));
    assert_eq!(interface.farewells, 1);

    fs::remove_file(phrases).unwrap();
}

#[test]
fn test_exit_mid_round_says_farewell() {
    let phrases = write_temp("exit_phrases.txt", "memento mori\n");
    let config = GameConfig::new(&phrases, temp_path("exit_states_missing.txt"));
    let mut interface = ScriptedInterface::new(&["m"], &[]);
    let mut rng = StdRng::seed_from_u64(5);

    game_loop(&config, &mut interface, &mut rng).unwrap();

    assert!(interface.endings.is_empty());
    assert_eq!(interface.farewells, 1);
    fs::remove_file(phrases).unwrap();
}

#[test]
fn test_unreadable_phrase_file_is_an_error() {
    let phrases = temp_path("binary_phrases.txt");
    fs::write(&phrases, [0xc3, 0x28, b'\n']).unwrap();
    let config = GameConfig::new(&phrases, temp_path("binary_states_missing.txt"));
    let mut interface = ScriptedInterface::new(&[], &[]);
    let mut rng = StdRng::seed_from_u64(5);

    let result = game_loop(&config, &mut interface, &mut rng);
    assert!(matches!(result, Err(CrossmanError::Resource { .. })));
    assert!(interface.views.is_empty());
    fs::remove_file(phrases).unwrap();
}

#[test]
fn test_cli_interface_full_game() {
    let phrases = write_temp("cli_phrases.txt", "Ecce Homo\n");
    let config = GameConfig::new(&phrases, temp_path("cli_states_missing.txt"));
    let input = "z\nwrong guess\necce homo\nno\n";
    let mut interface = CliInterface::new(Cursor::new(input), Vec::new());
    let mut rng = StdRng::seed_from_u64(5);

    game_loop(&config, &mut interface, &mut rng).unwrap();

    let output = String::from_utf8(interface.into_writer()).unwrap();
    assert_eq!(output.matches(GUESS_PROMPT).count(), 3);
    assert!(output.contains("____ ____"));
    assert!(output.contains("TIME LEFT: 5"));
    assert!(output.contains("TIME LEFT: 3"));
    assert!(output.contains("ECCE HOMO"));
    assert!(output.contains(VICTORY_MESSAGE));
    assert!(output.ends_with(&format!("{FAREWELL_MESSAGE}\n")));
    fs::remove_file(phrases).unwrap();
}

#[test]
fn test_cli_interface_end_of_input_stops_cleanly() {
    let phrases = write_temp("eof_phrases.txt", "dies irae\n");
    let config = GameConfig::new(&phrases, temp_path("eof_states_missing.txt"));
    let mut interface = CliInterface::new(Cursor::new("d\n"), Vec::new());
    let mut rng = StdRng::seed_from_u64(5);

    game_loop(&config, &mut interface, &mut rng).unwrap();

    let output = String::from_utf8(interface.into_writer()).unwrap();
    assert!(output.contains("D___ ____"));
    assert!(!output.contains(VICTORY_MESSAGE));
    assert!(output.ends_with(&format!("{FAREWELL_MESSAGE}\n")));
    fs::remove_file(phrases).unwrap();
}

#[test]
fn test_bundled_resources_are_playable() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources");
    let phrases = fs::read_to_string(root.join("wordphrases.txt")).unwrap();
    let candidates = load_phrases_from_str(&phrases);
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|p| !p.contains('[')));

    let narrative = StateNarrative::load(root.join("crossman_states.txt"))
        .unwrap()
        .unwrap();
    assert_eq!(narrative.len(), 7);
    assert!(narrative.block(6).contains("It is over."));
}
