mod commands;
mod config;
mod input;
mod msg;
mod pump;
mod storage;
mod theme;
mod ui;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{cursor, execute, terminal};
use num_traits::FromPrimitive;
use stopwatch_core::{Change, Stopwatch};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::Config;
use crate::msg::{AppOp, Message};
use crate::pump::Pump;
use crate::storage::PrefStorage;
use crate::theme::Theme;

const APP_NAME: &str = "Stopwatch";
const LOG_FILE: &str = "stopwatch.log";

struct StopwatchApp<W: Write> {
    out: W,
    storage: PrefStorage,
    pump: Pump,
    tick_ms: u64,

    stopwatch: Stopwatch,
    theme: Theme,
}

impl<W: Write> StopwatchApp<W> {
    fn new(out: W, storage: PrefStorage, pump: Pump, tick_ms: u64) -> Self {
        let theme = storage.load_theme();
        log::info!("preferences in {}, theme is {}", storage.root().display(), theme.as_str());
        Self {
            out,
            storage,
            pump,
            tick_ms,
            stopwatch: Stopwatch::new(),
            theme,
        }
    }

    fn redraw(&mut self) {
        let rows = terminal::size().map(|(_, rows)| rows).unwrap_or(24);
        if let Err(e) = ui::draw_stopwatch(&mut self.out, &self.stopwatch.snapshot(), self.theme, rows) {
            log::error!("can't redraw: {}", e);
        }
    }

    fn changed(&mut self, change: Option<Change>) {
        if let Some(change) = change {
            if change != Change::Ticked {
                log::debug!("{:?} at {}", change, self.stopwatch.elapsed());
            }
            self.redraw();
        }
    }

    fn handle_pump(&mut self, generation: usize) {
        if !self.pump.accepts(generation) {
            return;
        }
        let change = self.stopwatch.tick(self.tick_ms);
        self.changed(change);
    }

    /// Returns false once the app should exit.
    fn handle_key(&mut self, key: char) -> bool {
        match Command::from_key(key) {
            Some(command) => self.handle_command(command),
            None => true,
        }
    }

    fn handle_command(&mut self, command: Command) -> bool {
        log::debug!("command {:?}", command);
        match command {
            Command::ToggleRun => {
                let change = if self.stopwatch.is_running() {
                    self.pump.stop();
                    self.stopwatch.stop()
                } else {
                    let change = self.stopwatch.start();
                    self.pump.start(self.tick_ms);
                    change
                };
                self.changed(change);
            }
            Command::Reset => {
                self.pump.stop();
                let change = self.stopwatch.reset();
                self.changed(change);
            }
            Command::Lap => {
                let change = self.stopwatch.record_lap();
                self.changed(change);
            }
            Command::ClearLaps => {
                let change = self.stopwatch.clear_laps();
                self.changed(change);
            }
            Command::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.storage.save_theme(self.theme);
                self.redraw();
            }
            Command::Quit => return false,
        }
        true
    }

    fn shutdown(&mut self) {
        if self.pump.is_running() {
            log::debug!("stopping pump on exit");
        }
        self.pump.shutdown();
    }
}

/// Raw mode plus alternate screen for as long as this lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), terminal::EnterAlternateScreen) {
            terminal::disable_raw_mode().ok();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show).ok();
        terminal::disable_raw_mode().ok();
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("can't create {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("can't open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("can't install logger")
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let data_dir = match config.data_dir {
        Some(dir) => dir,
        None => storage::default_data_dir()?,
    };
    let log_file = config.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE));
    init_logging(&log_file)?;
    log::info!("{} PID is {}", APP_NAME, std::process::id());

    let (main_tx, main_rx) = crossbeam_channel::unbounded::<Message>();
    let pump = Pump::spawn();
    let ticks = pump.ticks().clone();

    let guard = TerminalGuard::enter().context("can't set up terminal")?;
    input::spawn(main_tx);

    let mut app = StopwatchApp::new(io::stdout(), PrefStorage::new(data_dir), pump, config.tick_ms);
    app.redraw();

    loop {
        let msg = crossbeam_channel::select! {
            recv(main_rx) -> msg => msg,
            recv(ticks) -> msg => msg,
        };
        let Ok(msg) = msg else { break };
        match FromPrimitive::from_usize(msg.id) {
            Some(AppOp::Redraw) => app.redraw(),
            Some(AppOp::Rawkeys) => {
                let key = char::from_u32(msg.arg as u32).unwrap_or('\u{0000}');
                if key != '\u{0000}' && !app.handle_key(key) {
                    break;
                }
            }
            Some(AppOp::Pump) => app.handle_pump(msg.arg),
            Some(AppOp::Quit) => break,
            None => log::error!("unknown opcode: {:?}", msg),
        }
    }

    // Clean up
    app.shutdown();
    drop(guard);
    log::info!("{} exiting at {}", APP_NAME, app.stopwatch.elapsed());
    Ok(())
}
