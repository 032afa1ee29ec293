//! Checked construction of preparsed descriptors

use tracing::{debug, trace, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{PREPARSED_FORMAT_TAG, PreparsedDescriptor, ReportItemSpec};
use crate::types::{Collection, CollectionKind, ReportItem, UsageDescriptor};

/// Accumulates collections and report items, then validates them into a store.
///
/// Collections must be added before the collections and items that reference
/// them, which mirrors the order a descriptor decoder encounters them in.
#[derive(Debug, Default)]
pub struct PreparsedDescriptorBuilder {
    collections: Vec<Collection>,
    report_items: Vec<ReportItem>,
    usage_descriptors: Vec<UsageDescriptor>,
}

impl PreparsedDescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collection and return its index.
    pub fn add_collection(&mut self, kind: CollectionKind, parent: Option<usize>) -> usize {
        let index = self.collections.len();
        trace!(index, ?kind, ?parent, "recording collection");
        self.collections.push(Collection::new(kind, parent));
        index
    }

    /// Record a report item and its usage descriptor, returning the item index.
    pub fn add_report_item(&mut self, spec: ReportItemSpec) -> usize {
        let index = self.report_items.len();
        let first_usage_descriptor = self.usage_descriptors.len();
        trace!(
            index,
            kind = ?spec.report_kind,
            page = spec.usage_page,
            usage = ?spec.usage,
            parent = spec.parent_collection,
            "recording report item"
        );

        self.usage_descriptors.push(spec.usage);
        self.report_items.push(ReportItem {
            report_kind: spec.report_kind,
            usage_page: spec.usage_page,
            parent_collection: spec.parent_collection,
            first_usage_descriptor,
            is_variable: spec.is_variable,
            report_id: spec.report_id,
        });
        index
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn report_item_count(&self) -> usize {
        self.report_items.len()
    }

    /// Validate every reference and stamp the format tag.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: a collection whose parent is not
    /// declared before it, a report item pointing at a missing collection, or
    /// an inverted usage range.
    pub fn build(self) -> StoreResult<PreparsedDescriptor> {
        let checked = validate(&self.collections, &self.report_items, &self.usage_descriptors);
        if let Err(err) = checked {
            warn!(error = %err, "rejecting preparsed descriptor");
            return Err(err);
        }

        debug!(
            collections = self.collections.len(),
            report_items = self.report_items.len(),
            usages = self.usage_descriptors.len(),
            "built preparsed descriptor"
        );

        Ok(PreparsedDescriptor::from_raw_parts(
            PREPARSED_FORMAT_TAG,
            self.collections,
            self.report_items,
            self.usage_descriptors,
        ))
    }
}

/// Check the references and ranges of a set of tables.
///
/// Shared by [`PreparsedDescriptorBuilder::build`] and JSON export, so every
/// exported document loads back.
pub(crate) fn validate(
    collections: &[Collection],
    report_items: &[ReportItem],
    usage_descriptors: &[UsageDescriptor],
) -> StoreResult<()> {
    for (collection, c) in collections.iter().enumerate() {
        if let Some(parent) = c.parent.filter(|&parent| parent >= collection) {
            return Err(StoreError::InvalidCollectionParent { collection, parent });
        }
    }

    let collection_count = collections.len();
    for (item, report_item) in report_items.iter().enumerate() {
        if report_item.parent_collection >= collection_count {
            return Err(StoreError::DanglingParent {
                item,
                parent: report_item.parent_collection,
                collection_count,
            });
        }

        let usage = usage_descriptors
            .get(report_item.first_usage_descriptor)
            .ok_or(StoreError::DanglingUsage {
                item,
                index: report_item.first_usage_descriptor,
                usage_count: usage_descriptors.len(),
            })?;
        if !usage.is_well_formed() {
            let (minimum, maximum) = usage.bounds();
            return Err(StoreError::InvertedRange {
                item,
                minimum,
                maximum,
            });
        }
    }

    Ok(())
}
