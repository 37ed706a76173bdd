//! The simulation engine: one struct owning all physical state, advanced one
//! discrete tick at a time by [`Engine::tick`].
//!
//! Energy bookkeeping per tick: water falls from the top reservoir to the
//! bottom one, crediting the energy accumulator at
//! `flow * g * height * efficiency`; the elevator advances one tick's worth
//! of distance only when the accumulator covers the energy the leg requires,
//! debiting it on motion. The up- and down-leg share one code path; only the
//! force constants, lifted mass, and sign differ.
//!
//! The engine holds no timers and knows nothing about rendering; an external
//! driver calls `tick()` at whatever cadence it likes and renders the
//! returned [`Snapshot`]. After a [`TickOutcome::Halt`], further `tick()`
//! calls are no-ops returning the same halt.

use tracing::{debug, info};

use crate::configuration::config::ElevatorConfig;
use crate::simulation::constants::{ConfigurationError, PhysicalConstants};
use crate::simulation::states::{
    Direction, EnergyAccumulator, HaltReason, MotionState, ReservoirState, RunState, Snapshot,
    TickOutcome,
};

/// Counterweighted elevator driven by water flow between two reservoirs.
pub struct Engine {
    constants: PhysicalConstants,
    reservoir: ReservoirState,
    accumulator: EnergyAccumulator,
    motion: MotionState,
    run_state: RunState,
}

impl Engine {
    /// Validate the configuration, derive constants, and place the system in
    /// its initial state: top reservoir full, elevator at the bottom with the
    /// car attached, counterweight at the top.
    pub fn new(cfg: &ElevatorConfig) -> Result<Self, ConfigurationError> {
        let constants = PhysicalConstants::derive(cfg)?;

        debug!(
            energy_per_trip_up = constants.energy_per_trip_up,
            energy_per_trip_down = constants.energy_per_trip_down,
            "engine constructed"
        );

        Ok(Self {
            reservoir: ReservoirState {
                water_top: constants.reservoir_capacity,
                water_bottom: 0.0,
            },
            accumulator: EnergyAccumulator {
                energy_generated: 0.0,
            },
            motion: MotionState {
                elevator_position: 0.0,
                counterweight_position: constants.height,
                direction: Direction::Up,
                car_attached: true,
            },
            run_state: RunState::Running,
            constants,
        })
    }

    /// Advance the system by one tick.
    ///
    /// Once a halt has been returned the engine is terminal: every further
    /// call is a no-op that returns the same halt again.
    pub fn tick(&mut self) -> TickOutcome {
        if let RunState::Stopped(reason) = self.run_state {
            return TickOutcome::Halt(reason);
        }

        if self.reservoir.water_top <= 0.0 {
            return self.halt(HaltReason::ReservoirEmpty);
        }

        let c = &self.constants;
        let (force, _) = self.leg_profile();
        let step = c.step_distance();

        // Energy to cover one tick of travel, and the water mass whose fall
        // through the full height supplies exactly that at the motor's
        // efficiency.
        let energy_required = force * step;
        let head_energy = c.gravity * c.height * c.motor_efficiency;
        let nominal_flow = energy_required / head_energy;

        // Transfer water top -> bottom, draining whatever remains when the
        // reservoir can't cover the nominal draw. The reported flow is what
        // actually moved; energy is credited proportionally either way.
        let flow = nominal_flow.min(self.reservoir.water_top);
        self.reservoir.water_top -= flow;
        self.reservoir.water_bottom += flow;
        self.accumulator.energy_generated += flow * head_energy;

        // Motion gate: hold position until the banked energy covers the tick.
        if self.accumulator.energy_generated >= energy_required {
            let height = self.constants.height;
            let next = self.motion.elevator_position + step * self.motion.direction.sign();
            self.motion.elevator_position = next.clamp(0.0, height);
            self.motion.counterweight_position = height - self.motion.elevator_position;
            self.accumulator.energy_generated -= energy_required;
        }

        match self.motion.direction {
            Direction::Up if self.motion.elevator_position >= self.constants.height => {
                // Top of the up-leg: the car is left behind, the platform
                // comes back down alone.
                self.motion.direction = Direction::Down;
                self.motion.car_attached = false;
                info!("top reached, car detached, heading down");
            }
            Direction::Down if self.motion.elevator_position <= 0.0 => {
                return self.halt(HaltReason::AtBottom);
            }
            _ => {}
        }

        TickOutcome::Step(self.report(flow))
    }

    /// Snapshot of the current state without advancing it. Reports zero flow.
    pub fn snapshot(&self) -> Snapshot {
        self.report(0.0)
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Force and lifted mass for the current leg. The down-leg constants
    /// already assume the car was dropped at the top.
    fn leg_profile(&self) -> (f64, f64) {
        let c = &self.constants;
        match self.motion.direction {
            Direction::Up => (
                c.f_gravity_up + c.f_friction_up,
                c.platform_mass + c.car_mass,
            ),
            Direction::Down => (c.f_gravity_down + c.f_friction_down, c.platform_mass),
        }
    }

    fn halt(&mut self, reason: HaltReason) -> TickOutcome {
        self.run_state = RunState::Stopped(reason);
        info!(?reason, "simulation halted");
        TickOutcome::Halt(reason)
    }

    fn report(&self, flow_rate: f64) -> Snapshot {
        let (_, lifted_mass) = self.leg_profile();
        Snapshot {
            elevator_position: self.motion.elevator_position,
            counterweight_position: self.motion.counterweight_position,
            water_top: self.reservoir.water_top,
            water_bottom: self.reservoir.water_bottom,
            flow_rate,
            lifted_mass,
            car_attached: self.motion.car_attached,
            direction: self.motion.direction,
        }
    }
}
