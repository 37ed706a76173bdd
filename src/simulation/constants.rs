//! Derived physical constants for the elevator simulation
//!
//! `PhysicalConstants` is computed once from an [`ElevatorConfig`] and never
//! mutated afterwards:
//! - effective masses for the up- and down-leg,
//! - gravity and friction forces per leg,
//! - total energy needed per leg (work / motor efficiency)
//!
//! Domain validation happens here; a bad constant aborts construction with a
//! [`ConfigurationError`] and no partial engine is ever created.

use thiserror::Error;

use crate::configuration::config::ElevatorConfig;

/// Construction-time validation failure. Fatal; nothing is built.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("motor efficiency must be in (0, 1], got {0}")]
    EfficiencyOutOfRange(f64),

    #[error("reservoir capacity must be non-negative, got {0}")]
    NegativeCapacity(f64),

    #[error("friction coefficient must be non-negative, got {0}")]
    NegativeFriction(f64),

    #[error(
        "counterweight mass {counterweight} must be less than the lifted mass {lifted} \
         (platform + car)"
    )]
    CounterweightTooHeavy { counterweight: f64, lifted: f64 },
}

/// Immutable constants derived once at engine construction.
#[derive(Debug, Clone)]
pub struct PhysicalConstants {
    pub car_mass: f64,             // kg
    pub platform_mass: f64,        // kg
    pub counterweight_mass: f64,   // kg
    pub height: f64,               // m
    pub gravity: f64,              // m/s^2
    pub trip_time: f64,            // ticks per leg
    pub motor_efficiency: f64,     // (0, 1]
    pub reservoir_capacity: f64,   // kg
    pub friction_coefficient: f64, // applied to gravity force

    pub m_eff_up: f64,        // platform + car - counterweight
    pub m_eff_down: f64,      // platform - counterweight
    pub f_gravity_up: f64,    // m_eff_up * g
    pub f_friction_up: f64,   // mu * f_gravity_up
    pub f_gravity_down: f64,  // |m_eff_down| * g
    pub f_friction_down: f64, // mu * f_gravity_down
    pub energy_per_trip_up: f64,   // (f_gravity_up + f_friction_up) * height / efficiency
    pub energy_per_trip_down: f64, // (f_gravity_down + f_friction_down) * height / efficiency
}

fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::NonPositive { name, value })
    }
}

impl PhysicalConstants {
    /// Validate the configuration and derive all per-leg constants.
    ///
    /// A zero reservoir capacity is accepted: the engine constructs but halts
    /// with an empty reservoir on its first tick.
    pub fn derive(cfg: &ElevatorConfig) -> Result<Self, ConfigurationError> {
        let car_mass = require_positive("car_mass", cfg.car_mass)?;
        let platform_mass = require_positive("platform_mass", cfg.platform_mass)?;
        let counterweight_mass = require_positive("counterweight_mass", cfg.counterweight_mass)?;
        let height = require_positive("height", cfg.height)?;
        let gravity = require_positive("gravity", cfg.gravity)?;
        let trip_time = require_positive("trip_time", cfg.trip_time)?;

        if !(cfg.motor_efficiency > 0.0 && cfg.motor_efficiency <= 1.0) {
            return Err(ConfigurationError::EfficiencyOutOfRange(cfg.motor_efficiency));
        }
        if cfg.reservoir_capacity < 0.0 {
            return Err(ConfigurationError::NegativeCapacity(cfg.reservoir_capacity));
        }
        if cfg.friction_coefficient < 0.0 {
            return Err(ConfigurationError::NegativeFriction(cfg.friction_coefficient));
        }

        // The model assumes a positive up-leg effective mass: the motor lifts
        // against gravity, water flows downhill, and the reservoirs drain
        // monotonically. A counterweight outweighing platform + car inverts
        // the up-leg force and would drive the water transfer backwards.
        if platform_mass + car_mass <= counterweight_mass {
            return Err(ConfigurationError::CounterweightTooHeavy {
                counterweight: counterweight_mass,
                lifted: platform_mass + car_mass,
            });
        }

        let m_eff_up = platform_mass + car_mass - counterweight_mass;
        let m_eff_down = platform_mass - counterweight_mass;

        // The reference model keeps the up-leg sign and takes the magnitude
        // on the down-leg; friction scales the gravity force, not the normal
        // force. Preserved as-is.
        let f_gravity_up = m_eff_up * gravity;
        let f_friction_up = cfg.friction_coefficient * f_gravity_up;
        let f_gravity_down = m_eff_down.abs() * gravity;
        let f_friction_down = cfg.friction_coefficient * f_gravity_down;

        let energy_per_trip_up = (f_gravity_up + f_friction_up) * height / cfg.motor_efficiency;
        let energy_per_trip_down =
            (f_gravity_down + f_friction_down) * height / cfg.motor_efficiency;

        Ok(Self {
            car_mass,
            platform_mass,
            counterweight_mass,
            height,
            gravity,
            trip_time,
            motor_efficiency: cfg.motor_efficiency,
            reservoir_capacity: cfg.reservoir_capacity,
            friction_coefficient: cfg.friction_coefficient,
            m_eff_up,
            m_eff_down,
            f_gravity_up,
            f_friction_up,
            f_gravity_down,
            f_friction_down,
            energy_per_trip_up,
            energy_per_trip_down,
        })
    }

    /// Vertical distance the elevator covers in one tick.
    pub fn step_distance(&self) -> f64 {
        self.height / self.trip_time
    }
}
