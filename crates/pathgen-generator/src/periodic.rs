//! Generation over time.
//!
//! A [`PeriodicTask`] is a deterministic ticker: the host feeds it elapsed
//! time and it answers with the work due in that tick. The
//! [`GenerationController`] pairs one task with one generator and exposes
//! the three host controls: toggle periodic generation, generate once, and
//! reset.

use std::time::Duration;

use pathgen_core::DiagnosticKind;

use crate::base::{GenerationReport, GeneratorState};
use crate::config::PeriodicSettings;
use crate::generator::{Generator, PathGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    /// Suspended until `remaining` has elapsed.
    Waiting { remaining: Duration },
    /// A batch spread over several ticks, `done` units in.
    InBatch { done: usize },
}

/// Work due in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchStep {
    /// The tick starts a new batch.
    pub opens: bool,
    pub units: usize,
    /// The batch ends in this tick and the curve must be updated.
    pub closes: bool,
}

/// Interval-driven batch scheduler.
///
/// At most one batch is due per tick; time beyond the interval is dropped
/// rather than caught up. A stop request is honoured at the top of the
/// next tick spent waiting, or when the open batch closes.
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    state: TaskState,
    stop_requested: bool,
    interval: Duration,
    units_per_batch: usize,
    units_per_tick: Option<usize>,
}

impl PeriodicTask {
    pub fn new(settings: &PeriodicSettings) -> Self {
        let mut task = Self {
            state: TaskState::Idle,
            stop_requested: false,
            interval: Duration::ZERO,
            units_per_batch: 0,
            units_per_tick: None,
        };
        task.configure(settings);
        task
    }

    fn configure(&mut self, settings: &PeriodicSettings) {
        self.interval = settings.interval();
        self.units_per_batch = settings.units_per_batch;
        self.units_per_tick = settings.units_per_tick.map(|n| n.max(1));
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Running and not asked to stop.
    pub fn is_running(&self) -> bool {
        self.state != TaskState::Idle && !self.stop_requested
    }

    pub fn is_active(&self) -> bool {
        self.state != TaskState::Idle
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Start with fresh settings; the first batch is due on the next tick.
    /// Returns `false` if the task was already running.
    pub fn start(&mut self, settings: &PeriodicSettings) -> bool {
        if self.is_active() {
            if self.stop_requested {
                self.stop_requested = false;
                return true;
            }
            return false;
        }
        self.configure(settings);
        self.stop_requested = false;
        self.state = TaskState::Waiting {
            remaining: Duration::ZERO,
        };
        true
    }

    pub fn request_stop(&mut self) {
        if self.is_active() {
            self.stop_requested = true;
        }
    }

    /// Drop an open batch without finishing it and wait a full interval.
    pub fn abandon_batch(&mut self) {
        if let TaskState::InBatch { .. } = self.state {
            self.suspend();
        }
    }

    fn suspend(&mut self) {
        self.state = if self.stop_requested {
            self.stop_requested = false;
            TaskState::Idle
        } else {
            TaskState::Waiting {
                remaining: self.interval,
            }
        };
    }

    /// Advance by `dt` and return the work due, if any.
    pub fn advance(&mut self, dt: Duration) -> Option<BatchStep> {
        match self.state {
            TaskState::Idle => None,
            TaskState::Waiting { remaining } => {
                if self.stop_requested {
                    self.stop_requested = false;
                    self.state = TaskState::Idle;
                    return None;
                }
                if dt < remaining {
                    self.state = TaskState::Waiting {
                        remaining: remaining - dt,
                    };
                    return None;
                }
                Some(self.step(0, true))
            }
            TaskState::InBatch { done } => Some(self.step(done, false)),
        }
    }

    fn step(&mut self, done: usize, opens: bool) -> BatchStep {
        let left = self.units_per_batch.saturating_sub(done);
        let units = self.units_per_tick.map_or(left, |n| n.min(left));
        let done = done + units;
        let closes = done >= self.units_per_batch;
        if closes {
            self.suspend();
        } else {
            self.state = TaskState::InBatch { done };
        }
        BatchStep {
            opens,
            units,
            closes,
        }
    }
}

/// One generator plus its periodic task.
///
/// Manual generation requested while a periodic batch is open is queued
/// and run right after that batch's curve update.
pub struct GenerationController<G = Generator> {
    generator: G,
    task: PeriodicTask,
    queued: usize,
}

impl<G: PathGenerator> GenerationController<G> {
    pub fn new(generator: G) -> Self {
        let task = PeriodicTask::new(&generator.core().settings().periodic);
        Self {
            generator,
            task,
            queued: 0,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn task(&self) -> &PeriodicTask {
        &self.task
    }

    /// Manual calls waiting for the open batch to close.
    pub fn queued(&self) -> usize {
        self.queued
    }

    /// Initialize the generator and start periodic generation if enabled.
    pub fn initialize(&mut self) {
        self.generator.initialize();
        if self.generator.core().settings().periodic.enabled {
            self.start_periodic();
        }
    }

    /// Flip periodic generation. Returns whether it is running afterwards.
    pub fn toggle_periodic_generation(&mut self) -> bool {
        if self.task.is_running() {
            self.stop_periodic();
            false
        } else {
            self.start_periodic()
        }
    }

    /// Start periodic generation; ignored while a task is already running.
    pub fn start_periodic(&mut self) -> bool {
        if self.task.is_running() {
            self.generator.core_mut().note(
                DiagnosticKind::AlreadyRunning,
                "periodic generation already running",
            );
            return true;
        }
        let settings = self.generator.core().settings().periodic.clone();
        let started = self.task.start(&settings);
        if started {
            tracing::info!(
                generator = %self.generator.core().name(),
                interval = ?settings.interval(),
                units = settings.units_per_batch,
                "periodic generation started"
            );
        }
        started
    }

    /// Stop periodic generation at the next suspension point.
    pub fn stop_periodic(&mut self) {
        if self.task.is_running() {
            tracing::info!(generator = %self.generator.core().name(), "periodic generation stopping");
        }
        self.task.request_stop();
    }

    /// Generate one unit now, or queue it behind the open periodic batch.
    pub fn trigger_manual(&mut self) -> pathgen_core::Result<Option<GenerationReport>> {
        if self.generator.state() == GeneratorState::Generating {
            self.queued += 1;
            tracing::debug!(
                generator = %self.generator.core().name(),
                queued = self.queued,
                "manual generation queued behind periodic batch"
            );
            return Ok(None);
        }
        self.generator.generate_point().map(Some)
    }

    /// Clear the generator. An open batch is dropped and queued calls discarded.
    pub fn reset(&mut self) {
        self.task.abandon_batch();
        self.queued = 0;
        self.generator.clear();
    }

    /// Advance time by `dt`. Returns the report of a batch that closed in
    /// this tick.
    pub fn tick(&mut self, dt: Duration) -> Option<GenerationReport> {
        let step = self.task.advance(dt)?;
        if step.opens {
            if let Err(err) = self.generator.begin_batch() {
                self.generator.core_mut().report(err);
                self.task.abandon_batch();
                return None;
            }
        }
        for _ in 0..step.units {
            self.generator.core_mut().count_unit();
            self.generator.produce_unit();
        }
        if !step.closes {
            return None;
        }

        let report = self.generator.end_batch();
        tracing::debug!(
            generator = %self.generator.core().name(),
            units = report.units,
            added = report.added,
            evicted = report.evicted,
            "periodic batch done"
        );
        self.run_queued();
        Some(report)
    }

    fn run_queued(&mut self) {
        for _ in 0..std::mem::take(&mut self.queued) {
            if let Err(err) = self.generator.generate_point() {
                self.generator.core_mut().report(err);
            }
        }
    }
}
