//! Shared types for the ManufacturePro dashboard.
//!
//! Everything here is pure: no I/O, no browser or server APIs. Both the
//! gateway (`backend`) and the wasm client (`frontend`) evaluate access
//! decisions through this crate so the two can never disagree.

pub mod system;
