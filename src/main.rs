use crossman::cli::{CliInterface, parse_cli};
use crossman::error::Result;
use crossman::game_state::{GameInterface, game_loop};
use crossman::logging::init_logging;
use crossman::tui::TuiInterface;
use log::{error, info};
use std::io;
use std::process::ExitCode;
use std::time::Duration;

const ENDING_PAUSE: Duration = Duration::from_secs(1);

fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let config = cli.to_config();
    info!(
        "Phrases: '{}', scenes: '{}', lives: {}",
        config.phrase_path.display(),
        config.narrative_path.display(),
        config.max_lives
    );

    let mut rng = rand::thread_rng();
    let mut interface: Box<dyn GameInterface> = if cli.tui {
        Box::new(TuiInterface::new()?)
    } else {
        Box::new(
            CliInterface::new(io::stdin().lock(), io::stdout())
                .with_clear_screen(true)
                .with_delay(ENDING_PAUSE),
        )
    };

    game_loop(&config, interface.as_mut(), &mut rng)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("crossman: {e}");
            ExitCode::FAILURE
        }
    }
}
