//! Errors raised while building, loading or exporting a preparsed descriptor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(
        "Report item {item} references collection {parent}, \
         but only {collection_count} collections exist"
    )]
    DanglingParent {
        item: usize,
        parent: usize,
        collection_count: usize,
    },

    #[error(
        "Report item {item} references usage descriptor {index}, \
         but only {usage_count} descriptors exist"
    )]
    DanglingUsage {
        item: usize,
        index: usize,
        usage_count: usize,
    },

    #[error("Collection {collection} has parent {parent}, which is not declared before it")]
    InvalidCollectionParent { collection: usize, parent: usize },

    #[error("Report item {item} has inverted usage range {minimum:#x}..={maximum:#x}")]
    InvertedRange {
        item: usize,
        minimum: u32,
        maximum: u32,
    },

    #[error("Preparsed data has foreign format tag {found:#010x}")]
    ForeignFormatTag { found: u32 },

    #[error("Invalid descriptor document: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True for errors caused by a reference pointing outside its table.
    pub fn is_dangling_reference(&self) -> bool {
        matches!(
            self,
            StoreError::DanglingParent { .. }
                | StoreError::DanglingUsage { .. }
                | StoreError::InvalidCollectionParent { .. }
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_parent_display() {
        let err = StoreError::DanglingParent {
            item: 4,
            parent: 9,
            collection_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Report item 4 references collection 9, but only 3 collections exist"
        );
        assert!(err.is_dangling_reference());
    }

    #[test]
    fn test_inverted_range_display_is_hex() {
        let err = StoreError::InvertedRange {
            item: 0,
            minimum: 0x39,
            maximum: 0x30,
        };
        assert!(err.to_string().contains("0x39..=0x30"));
        assert!(!err.is_dangling_reference());
    }

    #[test]
    fn test_foreign_tag_display() {
        let err = StoreError::ForeignFormatTag { found: 0xDEAD_BEEF };
        assert!(err.to_string().contains("0xdeadbeef"));
    }
}
