//! Run loop
//!
//! Each tick: poll one command, apply it, step the simulation, draw the diff,
//! sleep a fixed delay. Quit is checked once per tick, before stepping.

use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::platform::{Command, InputSource};
use crate::renderer::{DisplaySurface, render_diff};
use crate::sim::{Polarity, Simulation, TickInput, tick};

/// Totals for one run of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub polarity_flips: u64,
    pub velocity_resets: u64,
}

/// Simulation plus the loop state around it
pub struct App {
    sim: Simulation,
    polarity: Polarity,
    frame_delay: Duration,
    /// Stop after this many ticks (headless runs)
    max_ticks: Option<u64>,
    glyph: char,
    summary: RunSummary,
}

impl App {
    pub fn new(sim: Simulation, frame_delay: Duration) -> Self {
        Self {
            sim,
            polarity: Polarity::Normal,
            frame_delay,
            max_ticks: None,
            glyph: ' ',
            summary: RunSummary::default(),
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn into_simulation(self) -> Simulation {
        self.sim
    }

    /// Run one tick for `command`. Returns `false` once the loop should stop.
    pub fn frame<S>(&mut self, command: Option<Command>, surface: &mut S) -> Result<bool>
    where
        S: DisplaySurface + ?Sized,
    {
        let input = match command {
            Some(Command::Quit) => return Ok(false),
            Some(Command::TogglePolarity) => TickInput {
                toggle_polarity: true,
            },
            None => TickInput::default(),
        };

        let stats = tick(&mut self.sim, &mut self.polarity, &input);
        render_diff(self.sim.particles(), surface, self.glyph)?;

        self.summary.ticks += 1;
        self.summary.velocity_resets += stats.velocity_resets as u64;
        if input.toggle_polarity {
            self.summary.polarity_flips += 1;
        }
        Ok(true)
    }

    /// Loop until a quit command or the tick limit
    pub fn run<S, I>(&mut self, surface: &mut S, input: &mut I) -> Result<RunSummary>
    where
        S: DisplaySurface + ?Sized,
        I: InputSource + ?Sized,
    {
        log::info!(
            "Run loop starting ({} particles, delay {:?})",
            self.sim.particles().len(),
            self.frame_delay
        );

        loop {
            if self.max_ticks.is_some_and(|max| self.summary.ticks >= max) {
                break;
            }
            let command = input.poll()?;
            if !self.frame(command, surface)? {
                break;
            }
            if !self.frame_delay.is_zero() {
                thread::sleep(self.frame_delay);
            }
        }

        log::info!(
            "Run loop stopped: {} ticks, {} polarity flips, {} velocity resets",
            self.summary.ticks,
            self.summary.polarity_flips,
            self.summary.velocity_resets
        );
        Ok(self.summary)
    }
}
