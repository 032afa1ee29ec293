//! Query results

/// Where a usage was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsageLocation {
    /// Collection directly owning the matching report item. Pass it back as
    /// the next `min_collection` to continue an enumeration.
    pub collection: usize,
    /// Ordinal position of the matching item in the store's report item
    /// table. This is the value legacy callers receive as the "report ID".
    pub item_index: usize,
    /// The matching item's protocol-level report ID (0 when none is declared).
    pub report_id: u8,
}
