mod cli;

use std::fs::{self, File};
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::{WrapErr, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flurry_config::Config;
use flurry_core::SnowSettings;
use flurry_effect::{SeededRng, SnowSimulation, Step, TerminalCanvas};
use ratatui::{DefaultTerminal, Frame, text::Line, widgets::Paragraph};

use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    if let Some(path) = &cli.write_config {
        Config::write_default(path)?;
        println!("wrote default config to {}", path.display());
        return Ok(());
    }

    // Settle the config before the terminal switches screens.
    let (config, settings) = load_settings(&cli)?;
    let text = read_input(cli.input.as_deref())?;
    let rng = match cli.seed {
        Some(seed) => SeededRng::from_seed(seed),
        None => SeededRng::from_os_rng(),
    };

    let terminal = ratatui::init();
    let result = start(terminal, &text, settings, &config, rng);
    ratatui::restore();
    result
}

/// Load the config file, apply command line overrides and validate.
fn load_settings(cli: &Cli) -> color_eyre::Result<(Config, SnowSettings)> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(fps) = cli.fps {
        config.frame_rate = fps;
    }
    if cli.no_hold {
        config.hold_final_frame = false;
    }
    let settings = config.validate()?;
    Ok((config, settings))
}

/// Log to `path` with `info` as the default level; `RUST_LOG` overrides it.
fn init_logging(path: &Path) -> color_eyre::Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn read_input(path: Option<&Path>) -> color_eyre::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).wrap_err_with(|| format!("cannot read {}", path.display()))
        }
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("no text to reveal: pass a file or pipe text on stdin");
            }
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn start(
    terminal: DefaultTerminal,
    text: &str,
    settings: SnowSettings,
    config: &Config,
    rng: SeededRng,
) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    let canvas = TerminalCanvas::with_text(text, size.width, size.height);
    log::info!(
        "revealing {} characters on a {}x{} terminal",
        canvas.entity_count(),
        size.width,
        size.height
    );
    let simulation = SnowSimulation::new(canvas, settings, rng);
    App::new(simulation, config).run(terminal)
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    simulation: SnowSimulation<TerminalCanvas, SeededRng>,
    /// Last frame produced by the simulation.
    frame: Vec<Line<'static>>,
    frame_interval: Duration,
    hold_final_frame: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(simulation: SnowSimulation<TerminalCanvas, SeededRng>, config: &Config) -> Self {
        Self {
            running: false,
            simulation,
            frame: Vec::new(),
            frame_interval: config.frame_interval(),
            hold_final_frame: config.hold_final_frame,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let mut next_tick = Instant::now();
        while self.running {
            let now = Instant::now();
            if now >= next_tick {
                next_tick = now + self.frame_interval;
                self.advance();
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events(next_tick.saturating_duration_since(Instant::now()))?;
        }
        log::info!("stopped after {} frames", self.simulation.ticks());
        Ok(())
    }

    /// Step the simulation once, keeping the last frame once it finishes.
    fn advance(&mut self) {
        match self.simulation.tick() {
            Step::Frame(frame) => self.frame = frame,
            Step::Finished if !self.hold_final_frame => self.quit(),
            Step::Finished => {}
        }
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        frame.render_widget(Paragraph::new(self.frame.clone()), frame.area());
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame goes out on time.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    ///
    /// Any key dismisses the held final frame.
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ if self.simulation.is_finished() => self.quit(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
