use crate::errors::{Result, RouteError};

use log::debug;


// Elapsed time this close to the total counts as arrived, so a run of
// 0.1s ticks adding up to the total in exact arithmetic still completes
const COMPLETION_EPSILON: f64 = 1e-9;

/// Progress state of a [`RouteSession`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Animating,
    Completed,
}

/// Result of [`RouteSession::start`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A route is already animating, the request was ignored
    Busy,
}

/// Snapshot returned by every tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub elapsed_time: f64,
    pub fraction_complete: f64,
    pub phase: Phase,
}

impl Progress {
    /// Whole percent, as shown next to the progress bar
    pub fn percent(&self) -> u32 {
        (self.fraction_complete * 100.0).round() as u32
    }
}

/// Time and cost of an accepted route
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSummary {
    pub path: Vec<usize>,
    pub total_time: f64,
    pub total_cost: f64,
}

impl RouteSummary {
    /// Cost rounded to two decimals
    pub fn formatted_cost(&self) -> String {
        format!("{:.2}", self.total_cost)
    }
}

/// Time-stepped progress along one route.
///
/// `Idle -> Animating -> Completed -> Idle`. The session never reads a clock:
/// the caller advances it with [`tick`](Self::tick) and releases a completed
/// route with [`finish`](Self::finish) once its display hold is over.
#[derive(Clone, Debug, Default)]
pub struct RouteSession {
    path: Vec<usize>,
    total_time: f64,
    elapsed_time: f64,
    cost_rate: f64,
    phase: Phase,
}

impl RouteSession {

    pub fn new() -> Self {
        Self::default()
    }

    /// Begin animating `path`.
    ///
    /// `weight` gives the edge weight between two consecutive nodes, infinite when
    /// they are not connected. Fails with `InvalidPath` for an empty or broken path.
    pub fn start<W>(&mut self, path: &[usize], weight: W, cost_rate: f64) -> Result<StartOutcome>
    where
        W: Fn(usize, usize) -> f64,
    {
        if self.phase == Phase::Animating {
            return Ok(StartOutcome::Busy);
        }
        if path.is_empty() {
            return Err(RouteError::InvalidPath("path is empty".to_string()));
        }

        let mut total_time = 0.0;
        for pair in path.windows(2) {
            let w = weight(pair[0], pair[1]);
            if !w.is_finite() {
                return Err(RouteError::InvalidPath(format!("nodes {} and {} are not connected", pair[0], pair[1])));
            }
            total_time += w;
        }

        self.path = path.to_vec();
        self.total_time = total_time;
        self.elapsed_time = 0.0;
        self.cost_rate = cost_rate;
        self.phase = Phase::Animating;
        debug!("session started: {path:?}, {total_time}s");

        Ok(StartOutcome::Started)
    }

    /// Advance the animation by `delta` seconds.
    ///
    /// Outside `Animating` this is a no-op that reports the current state.
    /// Negative or non-finite deltas advance nothing.
    pub fn tick(&mut self, delta: f64) -> Progress {
        if self.phase == Phase::Animating {
            let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
            self.elapsed_time = (self.elapsed_time + delta).min(self.total_time);

            if self.total_time - self.elapsed_time <= COMPLETION_EPSILON * self.total_time.max(1.0) {
                self.elapsed_time = self.total_time;
                self.phase = Phase::Completed;
                debug!("session completed after {}s", self.total_time);
            }
        }
        self.progress()
    }

    /// Release a completed route. Returns false, changing nothing, in any other phase
    pub fn finish(&mut self) -> bool {
        if self.phase != Phase::Completed {
            return false;
        }
        self.reset();
        true
    }

    /// Back to `Idle` from any phase
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn progress(&self) -> Progress {
        Progress {
            elapsed_time: self.elapsed_time,
            fraction_complete: self.fraction_complete(),
            phase: self.phase,
        }
    }

    /// `elapsed / total`, zero for a zero-length route
    pub fn fraction_complete(&self) -> f64 {
        if self.total_time == 0.0 {
            0.0
        } else {
            self.elapsed_time / self.total_time
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn cost_rate(&self) -> f64 {
        self.cost_rate
    }

    pub fn total_cost(&self) -> f64 {
        self.total_time * self.cost_rate
    }

    /// Summary of the active route, `None` while idle
    pub fn summary(&self) -> Option<RouteSummary> {
        if self.phase == Phase::Idle {
            return None;
        }
        Some(RouteSummary {
            path: self.path.clone(),
            total_time: self.total_time,
            total_cost: self.total_cost(),
        })
    }
}
