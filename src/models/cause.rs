use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Binary outcome of an incident, as labelled in the dataset (`y`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Cause {
    /// Code 0
    #[strum(serialize = "Human error")]
    HumanError,

    /// Code 1
    #[strum(serialize = "Just bad luck")]
    BadLuck,
}

impl Cause {
    /// Numeric code used by the dataset and the classifier
    pub fn code(self) -> u8 {
        match self {
            Cause::HumanError => 0,
            Cause::BadLuck => 1,
        }
    }

    pub fn from_code(code: usize) -> Option<Self> {
        match code {
            0 => Some(Cause::HumanError),
            1 => Some(Cause::BadLuck),
            _ => None,
        }
    }

    /// Parse a visitor's guess. Only the two exact labels are accepted.
    pub fn parse_guess(choice: &str) -> Result<Self> {
        Cause::from_str(choice).map_err(|_| {
            AppError::Validation(format!(
                "unrecognized guess '{}', expected one of: {}",
                choice,
                Cause::iter()
                    .map(|c| format!("'{}'", c))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }
}
