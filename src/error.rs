use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The recurrence is only defined from degree 1 upwards.
    #[error("degree must be at least 1, got {n}")]
    NonPositiveDegree { n: i64 },

    #[error("failed to spawn evaluation thread: {0}")]
    Spawn(#[from] io::Error),

    #[error("evaluation thread panicked")]
    Panicked,
}
