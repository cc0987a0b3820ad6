//! Security and traffic-shaping subsystem.
//!
//! # Data Flow
//! ```text
//! handler → dispatcher
//!     → admission.rs (optional counting semaphore, queue or reject)
//!     → backend call
//! ```
//!
//! # Design Decisions
//! - Admission is off unless configured; no limiter runs by default
//! - Authentication is not enforced by the gateway itself

pub mod admission;

pub use admission::{AdmissionError, AdmissionGate};
