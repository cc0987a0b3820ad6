//! Bounded admission gate for backend calls.
//!
//! A counting semaphore with `max_in_flight` permits wraps each dispatch.
//! With [`AdmissionPolicy::Queue`] a request waits for a permit until its
//! deadline; with [`AdmissionPolicy::Reject`] it fails at once when the gate
//! is full. The permit is held for the duration of the backend call and
//! released on drop, including when the call is cancelled.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

use crate::config::{AdmissionConfig, AdmissionPolicy};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("all {0} backend call slots are in use")]
    Full(usize),
    #[error("timed out waiting for a backend call slot")]
    Timeout,
}

/// Counting semaphore in front of the dispatcher.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    permits: Arc<Semaphore>,
    capacity: usize,
    policy: AdmissionPolicy,
}

impl AdmissionGate {
    pub fn new(config: &AdmissionConfig) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(config.max_in_flight)),
            capacity: config.max_in_flight,
            policy: config.policy,
        }
    }

    /// Obtain a slot for one backend call.
    pub async fn admit(&self, deadline: Instant) -> Result<OwnedSemaphorePermit, AdmissionError> {
        match self.policy {
            AdmissionPolicy::Reject => self
                .permits
                .clone()
                .try_acquire_owned()
                .map_err(|_| AdmissionError::Full(self.capacity)),
            AdmissionPolicy::Queue => {
                match tokio::time::timeout_at(deadline, self.permits.clone().acquire_owned()).await {
                    Ok(Ok(permit)) => Ok(permit),
                    Ok(Err(_closed)) => Err(AdmissionError::Full(self.capacity)),
                    Err(_elapsed) => Err(AdmissionError::Timeout),
                }
            }
        }
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
