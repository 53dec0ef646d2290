mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use flagquiz::{
    config::{ConfigStore, FileConfigStore, GameConfig},
    countries::EMOJI_COUNTRIES,
    quiz::{Advance, Phase, Quiz, TickOutcome},
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, QuizEventSource, Runner, Ticker},
    telemetry,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::{debug, warn};

/// guess the country behind each emoji flag before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed trivia game for the terminal: name the country behind each emoji flag, round after round, before the countdown reaches zero."
)]
pub struct Cli {
    /// number of rounds to play
    #[clap(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: Option<u32>,

    /// number of questions in each round
    #[clap(short = 'q', long, value_parser = clap::value_parser!(u32).range(1..))]
    questions_per_round: Option<u32>,

    /// seconds allowed per question
    #[clap(short = 't', long, value_parser = clap::value_parser!(u32).range(1..))]
    timer_seconds: Option<u32>,

    /// seed for the question order, for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay command line settings on top of the stored configuration
    fn apply_to(&self, mut config: GameConfig) -> GameConfig {
        if let Some(rounds) = self.rounds {
            config.rounds = rounds as usize;
        }
        if let Some(per_round) = self.questions_per_round {
            config.questions_per_round = per_round as usize;
        }
        if let Some(secs) = self.timer_seconds {
            config.timer_seconds = secs;
        }
        config
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// A new question is on screen; its countdown starts now
    NewCountdown,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub quiz: Quiz,
}

impl App {
    pub fn new(config: GameConfig, rng: StdRng) -> flagquiz::Result<Self> {
        Ok(Self {
            quiz: Quiz::start(config, &EMOJI_COUNTRIES, rng)?,
        })
    }

    pub fn on_tick(&mut self) {
        match self.quiz.tick() {
            Ok(TickOutcome::Counting(_)) => {}
            Ok(TickOutcome::TimedOut) => debug!("showing answer after timeout"),
            Err(err) => debug!(%err, "stale tick ignored"),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Action::Quit;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            return self.restart();
        }

        match self.quiz.phase() {
            Phase::Playing => {
                let result = match key.code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quiz.push_char(c)
                    }
                    KeyCode::Backspace => self.quiz.pop_char().map(|_| ()),
                    KeyCode::Enter => self.quiz.submit().map(|_| ()),
                    _ => Ok(()),
                };
                if let Err(err) = result {
                    debug!(%err, "input ignored");
                }
                Action::Continue
            }
            Phase::Revealed => match key.code {
                KeyCode::Enter | KeyCode::Char('n') | KeyCode::Right => match self.quiz.next() {
                    Ok(Advance::Question(_)) => Action::NewCountdown,
                    Ok(Advance::Finished) => Action::Continue,
                    Err(err) => {
                        debug!(%err, "input ignored");
                        Action::Continue
                    }
                },
                _ => Action::Continue,
            },
            Phase::GameOver => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.restart(),
                KeyCode::Char('q') => Action::Quit,
                _ => Action::Continue,
            },
        }
    }

    fn restart(&mut self) -> Action {
        match self.quiz.restart() {
            Ok(()) => Action::NewCountdown,
            Err(err) => {
                warn!(%err, "restart failed");
                Action::Continue
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    telemetry::init_tracing();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());

    let mut app = match App::new(config, cli.rng()) {
        Ok(app) => app,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, err).exit();
        }
    };
    remember_settings(&cli, &store, &app)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::every_second());
    let res = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

/// Persist the settings of a game that actually started, when asked to
fn remember_settings<S: ConfigStore>(cli: &Cli, store: &S, app: &App) -> io::Result<()> {
    if cli.save_config {
        store.save(app.quiz.config())?;
    }
    Ok(())
}

fn start_tui<B: Backend, E: QuizEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            QuizEvent::Tick => {
                // Only an unresolved question has a running clock
                if app.quiz.phase() == Phase::Playing {
                    app.on_tick();
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            QuizEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            QuizEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.on_key(key) {
                    Action::Quit => break,
                    Action::NewCountdown => runner.rearm(),
                    Action::Continue => {}
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
