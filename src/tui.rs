//! Full-screen terminal interface for Crossman.
//!
//! Renders the scene, the obscured phrase and the player's input with
//! Ratatui on top of a Crossterm alternate screen.
//!
//! # State Machine
//! - `EnteringGuess` → (round over) → `ConfirmingReplay` → `EnteringGuess` or `Farewell`
//! - ESC from any state leaves the game.

use crate::error::Result;
use crate::game_state::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::thread;
use std::time::Duration;

const FAREWELL_PAUSE: Duration = Duration::from_secs(2);

const HEADER_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const INPUT_STYLE: Style = Style::new().fg(Color::White);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    ConfirmingReplay,
    Farewell,
}

impl TuiState {
    fn instructions(self) -> &'static str {
        match self {
            Self::EnteringGuess => "Type a letter or the whole phrase | ENTER: Submit | ESC: Quit",
            Self::ConfirmingReplay => "Another chance to be redeemed? Y: Yes | N: No | ESC: Quit",
            Self::Farewell => "",
        }
    }
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: String,
    input: String,
    message: String,
    state: TuiState,
}

impl TuiInterface {
    pub fn new() -> Result<Self> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            view: String::new(),
            input: String::new(),
            message: String::new(),
            state: TuiState::EnteringGuess,
        })
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let (view, input, message, state) = (&self.view, &self.input, &self.message, self.state);
        self.terminal.draw(|f| render(f, view, input, message, state))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Next key press, skipping releases and non-key events.
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                Event::Resize(..) => self.draw_or_log(),
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Whether a key press ends editing, edits the buffer, or is ignored.
#[derive(Debug, PartialEq, Eq)]
enum Edit {
    Submit,
    Quit,
    Changed,
    Ignored,
}

fn apply_key(input: &mut String, key: KeyEvent) -> Edit {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Edit::Quit;
        }
        return Edit::Ignored;
    }
    match key.code {
        KeyCode::Enter => Edit::Submit,
        KeyCode::Esc => Edit::Quit,
        KeyCode::Backspace => {
            input.pop();
            Edit::Changed
        }
        KeyCode::Char(c) if !c.is_control() => {
            input.push(c);
            Edit::Changed
        }
        _ => Edit::Ignored,
    }
}

fn render(f: &mut Frame, view: &str, input: &str, message: &str, state: TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Scene and phrase
            Constraint::Length(3), // Message
            Constraint::Length(3), // Input
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    render_boxed(f, chunks[0], Paragraph::new("CROSSMAN").style(HEADER_STYLE), None);
    render_boxed(
        f,
        chunks[1],
        Paragraph::new(view.to_string()).wrap(Wrap { trim: false }),
        Some("The Hill"),
    );
    render_boxed(
        f,
        chunks[2],
        Paragraph::new(Line::from(Span::styled(message.to_string(), MESSAGE_STYLE))),
        None,
    );

    let prompt = match state {
        TuiState::EnteringGuess => format!("> {input}_"),
        TuiState::ConfirmingReplay | TuiState::Farewell => String::new(),
    };
    render_boxed(
        f,
        chunks[3],
        Paragraph::new(prompt).style(INPUT_STYLE),
        Some("What is he saying?"),
    );
    render_boxed(
        f,
        chunks[4],
        Paragraph::new(state.instructions()).style(Style::default().fg(Color::Gray)),
        None,
    );
}

fn render_boxed(f: &mut Frame, area: Rect, paragraph: Paragraph, title: Option<&str>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(title) = title {
        block = block.title(title.to_string());
    }
    f.render_widget(paragraph.block(block), area);
}

impl GameInterface for TuiInterface {
    fn display_view(&mut self, view: &str) {
        self.view = view.to_string();
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        self.state = TuiState::EnteringGuess;
        self.input.clear();
        loop {
            self.draw_or_log();
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("read_guess() - Input error: {}, returning Exit", e);
                    return None;
                }
            };
            match apply_key(&mut self.input, key) {
                Edit::Submit => {
                    let guess = std::mem::take(&mut self.input);
                    debug_log!("read_guess() - Submitted '{}'", guess);
                    self.message.clear();
                    return Some(UserAction::Guess(guess));
                }
                Edit::Quit => return Some(UserAction::Exit),
                Edit::Changed | Edit::Ignored => {}
            }
        }
    }

    fn display_ending(&mut self, message: &str) {
        self.message = message.to_string();
        self.draw_or_log();
    }

    fn confirm_replay(&mut self) -> bool {
        self.state = TuiState::ConfirmingReplay;
        loop {
            self.draw_or_log();
            let Ok(key) = self.next_key() else {
                return false;
            };
            match key.code {
                KeyCode::Char('y' | 'Y') => {
                    self.message.clear();
                    return true;
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => return false,
                _ => {}
            }
        }
    }

    fn display_farewell(&mut self) {
        self.state = TuiState::Farewell;
        self.message = crate::cli::FAREWELL_MESSAGE.to_string();
        self.draw_or_log();
        thread::sleep(FAREWELL_PAUSE);
    }
}
