use crate::errors::{Result, RouteError};
use super::session::{Phase, Progress, RouteSession};

use log::info;


const EPSILON: f64 = 1e-9;

/// What one call to [`AnimationClock::advance`] did to the session
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockEvent {
    /// Not enough time passed for a tick, or nothing is running
    Waiting,
    /// Latest progress after one or more ticks, or while a completed route is held.
    /// The tick that completes the route always ends the call, so the host sees
    /// the finished progress before any hold time is counted
    Progress(Progress),
    /// The hold ran out and the session was released back to idle
    Reset,
}

/// Cooperative scheduler for a [`RouteSession`].
///
/// The host reports how much wall time passed and the clock turns that into
/// fixed-size ticks. Once the route completes, the clock keeps it on display
/// for the hold duration and then calls [`RouteSession::finish`].
#[derive(Clone, Debug)]
pub struct AnimationClock {
    tick_interval: f64,
    hold: f64,
    carry: f64,
    held: f64,
}

impl AnimationClock {

    /// `tick_interval` and `hold` are in seconds. The interval must be positive
    /// and the hold non-negative, both finite
    pub fn new(tick_interval: f64, hold: f64) -> Result<Self> {
        if !tick_interval.is_finite() || tick_interval <= 0.0 {
            return Err(RouteError::InvalidConfig(format!("tick interval must be positive, got {tick_interval}")));
        }
        if !hold.is_finite() || hold < 0.0 {
            return Err(RouteError::InvalidConfig(format!("hold must be non-negative, got {hold}")));
        }
        Ok(Self {
            tick_interval,
            hold,
            carry: 0.0,
            held: 0.0,
        })
    }

    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    pub fn hold(&self) -> f64 {
        self.hold
    }

    /// Forget any partial tick or hold time
    pub fn reset(&mut self) {
        self.carry = 0.0;
        self.held = 0.0;
    }

    pub fn advance(&mut self, session: &mut RouteSession, wall_delta: f64) -> ClockEvent {
        if session.phase() == Phase::Idle {
            self.reset();
            return ClockEvent::Waiting;
        }
        if !wall_delta.is_finite() || wall_delta <= 0.0 {
            return ClockEvent::Waiting;
        }

        self.carry += wall_delta;
        let mut event = ClockEvent::Waiting;

        while self.carry + EPSILON >= self.tick_interval {
            self.carry -= self.tick_interval;

            match session.phase() {
                Phase::Animating => {
                    let progress = session.tick(self.tick_interval);
                    if progress.phase == Phase::Completed {
                        // Hold starts counting on the next call
                        self.carry = 0.0;
                        return ClockEvent::Progress(progress);
                    }
                    event = ClockEvent::Progress(progress);
                }
                Phase::Completed => {
                    self.held += self.tick_interval;
                    if self.held + EPSILON >= self.hold {
                        session.finish();
                        self.reset();
                        info!("route display hold of {}s elapsed, session reset", self.hold);
                        return ClockEvent::Reset;
                    }
                    event = ClockEvent::Progress(session.progress());
                }
                Phase::Idle => {
                    self.reset();
                    break;
                }
            }
        }

        event
    }
}

impl Default for AnimationClock {
    /// 100ms ticks and a 3s hold
    fn default() -> Self {
        Self {
            tick_interval: 0.1,
            hold: 3.0,
            carry: 0.0,
            held: 0.0,
        }
    }
}
