use thiserror::Error;

use crate::Face;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid argument type: {0}")]
    InvalidArgumentType(&'static str),
    #[error("face values must be distinct, {0} appears more than once")]
    DuplicateFace(Face),
    #[error("face {0} does not exist on this die")]
    FaceNotFound(Face),
    #[error("weight {0} is not a valid weight")]
    InvalidWeightType(String),
    #[error("total weight must be finite and greater than zero")]
    ZeroTotalWeight,
    #[error("must request a \"narrow\" or \"wide\" table, got {0:?}")]
    InvalidFormat(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("no results yet, play the game first")]
    NoResults,
    #[error("dice have different face counts: {0:?}")]
    IncompatibleDice(Vec<usize>),
}

pub type Result<T> = core::result::Result<T, Error>;
