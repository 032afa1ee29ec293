//! Query failures

use thiserror::Error;

/// Why a store was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStoreReason {
    #[error("foreign format tag {found:#010x}")]
    ForeignFormatTag { found: u32 },

    #[error("report item {item} references missing collection {parent}")]
    DanglingParent { item: usize, parent: usize },

    #[error("report item {item} references missing usage descriptor {index}")]
    DanglingUsage { item: usize, index: usize },
}

/// Failure of a usage-location query.
///
/// Checks run in declaration order, so when several conditions hold the
/// earliest variant is the one reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("Required argument was not supplied")]
    NullArgument,

    #[error("Invalid preparsed data: {0}")]
    InvalidStore(InvalidStoreReason),

    #[error("Collection {collection} is out of range for {collection_count} collections")]
    BadParameter {
        collection: usize,
        collection_count: usize,
    },

    #[error("Usage not found")]
    UsageNotFound,
}

impl QueryError {
    /// `UsageNotFound` ends an enumeration; it is not a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::UsageNotFound)
    }

    /// True when the store itself, rather than the arguments, is at fault.
    pub fn is_store_fault(&self) -> bool {
        matches!(self, QueryError::InvalidStore(_))
    }
}

impl From<InvalidStoreReason> for QueryError {
    fn from(reason: InvalidStoreReason) -> Self {
        QueryError::InvalidStore(reason)
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
