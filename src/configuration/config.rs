//! Configuration types for loading elevator scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of the
//! simulation constants. Every field carries a default matching the reference
//! demonstration, so a partial (or empty) YAML file still produces a runnable
//! scenario.
//!
//! # YAML format
//! A full scenario YAML matching these types:
//!
//! ```yaml
//! car_mass: 2000.0              # kg, dropped off at the top
//! platform_mass: 500.0          # kg, always on the cable
//! counterweight_mass: 1500.0    # kg
//! height: 50.0                  # m, full travel of the elevator
//! gravity: 9.81                 # m/s^2
//! trip_time: 60.0               # ticks per leg (one tick per animation frame)
//! motor_efficiency: 0.8         # fraction in (0, 1]
//! reservoir_capacity: 25000.0   # kg of water in the top reservoir at start
//! friction_coefficient: 0.35    # cable/pulley friction, applied to gravity force
//! ```
//!
//! The engine maps this configuration into its derived runtime constants
//! ([`PhysicalConstants`](crate::simulation::constants::PhysicalConstants)),
//! validating domains once at construction.

use serde::Deserialize;

/// Fixed constants for one elevator scenario.
/// All fields default to the reference demonstration values.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ElevatorConfig {
    pub car_mass: f64,             // kg, lifted only on the up-leg
    pub platform_mass: f64,        // kg, lifted on both legs
    pub counterweight_mass: f64,   // kg
    pub height: f64,               // m, elevator travel height
    pub gravity: f64,              // m/s^2
    pub trip_time: f64,            // ticks for one full leg
    pub motor_efficiency: f64,     // fraction in (0, 1]
    pub reservoir_capacity: f64,   // kg of water, top reservoir starts full
    pub friction_coefficient: f64, // applied to the gravity force, not the normal force
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            car_mass: 2000.0,
            platform_mass: 500.0,
            counterweight_mass: 1500.0,
            height: 50.0,
            gravity: 9.81,
            trip_time: 60.0,
            motor_efficiency: 0.8,
            reservoir_capacity: 25000.0,
            friction_coefficient: 0.35,
        }
    }
}
