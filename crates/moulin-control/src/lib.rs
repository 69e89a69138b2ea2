// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Moulin Control
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Descent control: velocity PID, wall constraints, the constrained
//! integrator, per-step telemetry and the simulation entry point.

pub mod constraints;
pub mod integrator;
pub mod pid;
pub mod simulation;
pub mod telemetry;

pub use simulation::{run_simulation, Simulation, SimulationReport, SimulationResult};
