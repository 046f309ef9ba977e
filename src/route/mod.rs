mod clock;
mod planner;
mod session;

pub use clock::{AnimationClock, ClockEvent};
pub use planner::{Rejection, RouteOutcome, RoutePlanner};
pub use session::{Phase, Progress, RouteSession, RouteSummary, StartOutcome};
