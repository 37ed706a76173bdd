pub mod configuration;
pub mod simulation;
pub mod visualization;

pub use simulation::constants::{ConfigurationError, PhysicalConstants};
pub use simulation::engine::Engine;
pub use simulation::states::{
    Direction, EnergyAccumulator, HaltReason, MotionState, ReservoirState, RunState, Snapshot,
    TickOutcome,
};

pub use configuration::config::ElevatorConfig;

pub use visualization::elevator_vis2d::run_2d;
