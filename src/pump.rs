//! Periodic tick source for the main loop.
//!
//! The pump runs on its own thread and posts `AppOp::Pump` every interval
//! while started. Ticks go through a single-slot channel of their own: when
//! the main loop hasn't taken the previous tick yet, the new one is dropped,
//! so a slow consumer never builds a backlog. Each message carries the
//! generation it was produced under; stopping bumps the generation, so a tick
//! still sitting in the slot is stale and the main loop drops it.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::msg::{AppOp, Message};

#[derive(Debug)]
enum PumpCtl {
    Start { interval_ms: u64, generation: usize },
    Stop,
    Quit,
}

pub struct Pump {
    ctl: Sender<PumpCtl>,
    ticks: Receiver<Message>,
    running: bool,
    generation: usize,
    handle: Option<JoinHandle<()>>,
}

impl Pump {
    pub fn spawn() -> Self {
        let (ctl, ctl_rx) = crossbeam_channel::unbounded();
        let (tick_tx, ticks) = crossbeam_channel::bounded(1);
        let handle = thread::spawn(move || pump_thread(ctl_rx, tick_tx));
        Self {
            ctl,
            ticks,
            running: false,
            generation: 0,
            handle: Some(handle),
        }
    }

    /// No-op if already running, so there is never more than one tick source.
    pub fn start(&mut self, interval_ms: u64) {
        if self.running {
            return;
        }
        self.running = true;
        let ctl = PumpCtl::Start { interval_ms, generation: self.generation };
        if self.ctl.send(ctl).is_err() {
            log::error!("pump thread is gone");
        }
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.generation = self.generation.wrapping_add(1);
        self.ctl.send(PumpCtl::Stop).ok();
    }

    /// Where the ticks arrive; holds at most one pending tick.
    pub fn ticks(&self) -> &Receiver<Message> {
        &self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True if a pump message stamped with `generation` should be delivered.
    pub fn accepts(&self, generation: usize) -> bool {
        self.running && generation == self.generation
    }

    pub fn shutdown(&mut self) {
        self.stop();
        self.ctl.send(PumpCtl::Quit).ok();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("pump thread panicked");
            }
        }
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

fn pump_thread(ctl: Receiver<PumpCtl>, ticks: Sender<Message>) {
    let mut interval = Duration::from_millis(10);
    let mut generation = 0;
    let mut running = false;

    loop {
        // Wait one interval for control traffic when running, block otherwise
        let msg = if running {
            match ctl.recv_timeout(interval) {
                Ok(msg) => Some(msg),
                Err(RecvTimeoutError::Timeout) => {
                    match ticks.try_send(Message::new_scalar(AppOp::Pump, generation)) {
                        Ok(()) => {}
                        // previous tick not taken yet
                        Err(TrySendError::Full(_)) => log::trace!("pump tick skipped"),
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                    None
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match ctl.recv() {
                Ok(msg) => Some(msg),
                Err(_) => break,
            }
        };

        match msg {
            Some(PumpCtl::Start { interval_ms, generation: g }) => {
                interval = Duration::from_millis(interval_ms.max(1));
                generation = g;
                running = true;
            }
            Some(PumpCtl::Stop) => running = false,
            Some(PumpCtl::Quit) => break,
            None => {}
        }
    }
    log::debug!("pump thread exiting");
}
