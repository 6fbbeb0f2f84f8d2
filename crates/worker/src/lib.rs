//! Periodic sweep implementations.
//!
//! Each sweep is a single-pass batch over current rows: load, evaluate,
//! write back, emit notifications best-effort. The API server triggers
//! them on demand and runs them on an interval; the `motormate-worker`
//! binary runs the same sweeps as a standalone scheduler.

pub mod alerts;
pub mod expiry;
