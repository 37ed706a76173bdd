//! Core state types for the elevator simulation.
//!
//! Defines the mutable state owned by the engine:
//! - `ReservoirState`    water masses in the top and bottom reservoir
//! - `EnergyAccumulator` banked motor energy between ticks
//! - `MotionState`       elevator/counterweight positions and travel direction
//! - `RunState`          running or terminally stopped
//!
//! plus the per-tick `Snapshot` handed to the presentation layer and the
//! `TickOutcome` returned by `Engine::tick`.

/// Travel direction of the elevator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign of the elevator's position change while moving this way.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Why a run ended. Both reasons are terminal for the engine instance;
/// restarting means constructing a fresh engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// Top reservoir drained before the cycle completed.
    ReservoirEmpty,
    /// Elevator finished the down-leg.
    AtBottom,
}

/// Run lifecycle of one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped(HaltReason),
}

/// Water masses in the two reservoirs. Transfers conserve the total;
/// each side stays in `[0, capacity]`.
#[derive(Debug, Clone)]
pub struct ReservoirState {
    pub water_top: f64,    // kg
    pub water_bottom: f64, // kg
}

/// Energy banked between water transfer and motion. Water flow credits it,
/// motion debits it, so a partial-flow tick can still move later.
#[derive(Debug, Clone)]
pub struct EnergyAccumulator {
    pub energy_generated: f64, // J
}

/// Positions and direction of the coupled elevator/counterweight pair.
#[derive(Debug, Clone)]
pub struct MotionState {
    pub elevator_position: f64,      // m, in [0, height]
    pub counterweight_position: f64, // m, mirrors the elevator
    pub direction: Direction,
    pub car_attached: bool, // car rides only on the up-leg
}

/// Per-tick report consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub elevator_position: f64,      // m
    pub counterweight_position: f64, // m
    pub water_top: f64,              // kg
    pub water_bottom: f64,           // kg
    pub flow_rate: f64,              // kg moved this tick
    pub lifted_mass: f64,            // kg on the cable this tick
    pub car_attached: bool,
    pub direction: Direction,
}

/// Result of one `tick()` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// State advanced; render this snapshot.
    Step(Snapshot),
    /// Terminal state reached; stop the frame clock.
    Halt(HaltReason),
}
