//! API exposure modules
//!
//! Each exposure type consumes the resource registry and produces a Router
//! for that protocol.

pub mod rest;

pub use rest::RestExposure;
