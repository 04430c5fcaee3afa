use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("question count must be between {min} and {max}, got {got}", min = QuestionCount::MIN, max = QuestionCount::MAX)]
pub struct QuestionCountError {
    pub got: i64,
}

/// Number of questions requested for a generated quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;
    pub const DEFAULT: u32 = 20;
    /// Quick picks offered next to the free-form input.
    pub const PRESETS: [u32; 5] = [10, 20, 30, 50, 100];

    /// # Errors
    ///
    /// Returns `QuestionCountError` if `value` is outside `MIN..=MAX`.
    pub fn new(value: u32) -> Result<Self, QuestionCountError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuestionCountError {
                got: i64::from(value),
            })
        }
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionCount {
    type Err = QuestionCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.trim().parse().map_err(|_| QuestionCountError { got: 0 })?;
        let value = u32::try_from(raw).map_err(|_| QuestionCountError { got: raw })?;
        Self::new(value)
    }
}
