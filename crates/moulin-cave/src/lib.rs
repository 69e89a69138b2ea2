// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Moulin Cave
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shaft geometry: wall profiles, reference paths and the step axes they share.
//!
//! Everything here runs once per simulation, before integration.

pub mod boundary;
pub mod reference;
pub mod sampling;
