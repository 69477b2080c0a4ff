//! The module contains the errors the engine can return.
//!
//! Failures fall in four families:
//!
//! - the record store could not be reached or answered garbage ([`Store`]);
//! - the store answered but refused the request ([`Rejected`]);
//! - a required entity does not exist ([`KeyNotFound`]);
//! - input or stored data breaks a business rule ([`Forbidden`],
//!   [`InvalidAmount`], [`InvalidMonth`], [`InvalidDate`], [`InvalidRecord`]).
//!
//!  [`Store`]: EngineError::Store
//!  [`Rejected`]: EngineError::Rejected
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidMonth`]: EngineError::InvalidMonth
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidRecord`]: EngineError::InvalidRecord
use thiserror::Error;

use crate::store::StoreError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Rejected by record store: {0}")]
    Rejected(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::Rejected(a), Self::Rejected(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidMonth(a), Self::InvalidMonth(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
            (Self::Configuration(a), Self::Configuration(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
