//! Async orchestration around the loadout optimizer.
//!
//! This crate wires the pure optimizer in loadout-core to a repository and a
//! bounded pool of blocking workers. Consumers build an [`OptimizerService`]
//! over any [`LoadoutRepository`] and call it from async code.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the optimizer service and its reports
//! - [`repository`] defines the storage contract and an in-memory store
//! - [`config`] and [`error`] hold runtime settings and failures
pub mod config;
pub mod error;
pub mod repository;
pub mod service;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use repository::{InMemoryRepository, LoadoutRepository, RepositoryError};
pub use service::{EffectLine, EffectReport, OptimizerService};
