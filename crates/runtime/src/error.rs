//! Unified error types surfaced by the optimizer service.
//!
//! Wraps failures from core validation, worker coordination, and repositories
//! so clients can bubble them up with consistent context.
use std::time::Duration;

use loadout_core::{
    CharacterId, CoreError, CostumeId, EquipError, ErrorSeverity, LevelError, OptimizeError,
};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),

    #[error("costume {0} not found")]
    CostumeNotFound(CostumeId),

    #[error("optimization did not finish within {0:?}")]
    Timeout(Duration),

    #[error("optimizer worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("optimizer worker pool is closed")]
    WorkerPoolClosed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CoreError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Optimize(err) => err.severity(),
            Self::Equip(err) => err.severity(),
            Self::Level(err) => err.severity(),
            Self::CharacterNotFound(_) | Self::CostumeNotFound(_) => ErrorSeverity::Validation,
            Self::Timeout(_) | Self::WorkerJoin(_) | Self::WorkerPoolClosed | Self::Repository(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Optimize(err) => err.error_code(),
            Self::Equip(err) => err.error_code(),
            Self::Level(err) => err.error_code(),
            Self::CharacterNotFound(_) => "RUNTIME_CHARACTER_NOT_FOUND",
            Self::CostumeNotFound(_) => "RUNTIME_COSTUME_NOT_FOUND",
            Self::Timeout(_) => "RUNTIME_TIMEOUT",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::WorkerPoolClosed => "RUNTIME_WORKER_POOL_CLOSED",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
        }
    }
}
