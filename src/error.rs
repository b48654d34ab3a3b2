//! Error taxonomy for the boundaries spec.md does *not* designate as
//! silent (construction/config/registration failures). Every in-cycle
//! rejection the admission gate performs stays silent by design — see
//! `admission::Rejection` — and is logged, not raised.

use ordered_float::OrderedFloat;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bag level count must be at least 1")]
    InvalidLevels,
    #[error("admission threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(OrderedFloat<f32>),
    #[error("forgetting rate or durability decay is outside [0, 1]")]
    RateOutOfRange,
}

#[derive(Debug, Error)]
pub enum OperatorError {
    #[error("operator '{0}' is already registered")]
    AlreadyRegistered(String),
    #[error("operator '{0}' is not registered")]
    NotRegistered(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid term: {0}")]
    InvalidTerm(String),
    #[error("invalid truth value: {0}")]
    InvalidTruth(String),
    #[error("invalid punctuation character '{0}'")]
    InvalidPunctuation(char),
    #[error("invalid time specification: {0}")]
    InvalidTime(String),
    #[error("grammar rejected input: {0}")]
    Grammar(String),
}
