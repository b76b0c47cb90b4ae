//! Sort state for the campaign list
//!
//! The chosen sort is remembered between runs as a single string of the
//! form `<field>#<asc|desc>`, stored under [`SORT_STATE_KEY`].

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Persisted-state key holding the encoded [`SortState`]
pub const SORT_STATE_KEY: &str = "email-sort-type";

/// Column a campaign list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Date,
    Name,
    Status,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Date, SortField::Name, SortField::Status];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Name => "name",
            SortField::Status => "status",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = SortStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortField::Date),
            "name" => Ok(SortField::Name),
            "status" => Ok(SortField::Status),
            other => Err(SortStateError::UnknownField(other.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Errors decoding a persisted sort state
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortStateError {
    #[error("unknown sort field: {0:?}")]
    UnknownField(String),

    #[error("malformed sort state: {0:?}")]
    Malformed(String),
}

/// The sort the user last picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub ascending: bool,
}

impl SortState {
    pub fn new(field: SortField, ascending: bool) -> Self {
        Self { field, ascending }
    }

    pub fn direction(&self) -> SortDirection {
        SortDirection::from_ascending(self.ascending)
    }

    /// Encodes as `<field>#<asc|desc>`
    pub fn encode(&self) -> String {
        format!("{}#{}", self.field, self.direction().as_str())
    }

    /// Decodes `<field>#<direction>`
    ///
    /// Only the literal `asc` is ascending; any other direction text sorts
    /// descending. A missing separator or an unknown field is an error.
    pub fn decode(raw: &str) -> Result<Self, SortStateError> {
        let (field, direction) = raw
            .split_once('#')
            .ok_or_else(|| SortStateError::Malformed(raw.to_string()))?;

        Ok(Self {
            field: field.parse()?,
            ascending: direction == "asc",
        })
    }
}
