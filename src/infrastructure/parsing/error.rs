//! Row-level parsing errors
//!
//! None of these abort an extraction run: a row that fails is skipped and the
//! error is kept in the run report.

use thiserror::Error;

use crate::domain::vehicle_id::IdentityError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Row {row_index} has {found} cells, at least {required} required")]
    TooFewCells {
        row_index: usize,
        found: usize,
        required: usize,
    },

    #[error("Row {row_index} has no detail link in the model column")]
    MissingDetailLink { row_index: usize },

    #[error("Row {row_index} has a detail link without href")]
    MissingHref { row_index: usize },

    #[error("Row {row_index} identity could not be resolved: {source}")]
    UnresolvableIdentity {
        row_index: usize,
        #[source]
        source: IdentityError,
    },
}

/// Coarse category of a skipped row, used for report counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipKind {
    TooFewCells,
    MissingDetailLink,
    MissingHref,
    UnresolvableIdentity,
}

impl ParsingError {
    pub const fn row_index(&self) -> usize {
        match self {
            Self::TooFewCells { row_index, .. }
            | Self::MissingDetailLink { row_index }
            | Self::MissingHref { row_index }
            | Self::UnresolvableIdentity { row_index, .. } => *row_index,
        }
    }

    pub const fn kind(&self) -> SkipKind {
        match self {
            Self::TooFewCells { .. } => SkipKind::TooFewCells,
            Self::MissingDetailLink { .. } => SkipKind::MissingDetailLink,
            Self::MissingHref { .. } => SkipKind::MissingHref,
            Self::UnresolvableIdentity { .. } => SkipKind::UnresolvableIdentity,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
