//! The preparsed descriptor record set

use serde::{Deserialize, Serialize};

use crate::builder::{self, PreparsedDescriptorBuilder};
use crate::error::{StoreError, StoreResult};
use crate::types::{Collection, CollectionKind, ReportItem, ReportKind, UsageDescriptor};

/// Marker stamped by [`PreparsedDescriptorBuilder`]: the four bytes `"hid "`.
pub const PREPARSED_FORMAT_TAG: u32 = u32::from_be_bytes(*b"hid ");

/// Immutable, indexed view of a HID report descriptor.
///
/// Built once (through the builder, [`PreparsedDescriptor::from_json`], or
/// [`PreparsedDescriptor::from_raw_parts`] for data decoded elsewhere) and then
/// only read. All accessors take `&self`, so a store can be shared across
/// threads and queried concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparsedDescriptor {
    format_tag: u32,
    collections: Vec<Collection>,
    report_items: Vec<ReportItem>,
    usage_descriptors: Vec<UsageDescriptor>,
}

impl PreparsedDescriptor {
    /// Assemble a store from tables decoded elsewhere.
    ///
    /// References are not checked; queries bounds-check them instead. Only
    /// the collection adjacency lists are derived here (items whose parent is
    /// out of range are left unowned).
    pub fn from_raw_parts(
        format_tag: u32,
        mut collections: Vec<Collection>,
        report_items: Vec<ReportItem>,
        usage_descriptors: Vec<UsageDescriptor>,
    ) -> Self {
        for collection in &mut collections {
            collection.report_items.clear();
        }
        for (index, item) in report_items.iter().enumerate() {
            if let Some(owner) = collections.get_mut(item.parent_collection) {
                owner.report_items.push(index);
            }
        }

        Self {
            format_tag,
            collections,
            report_items,
            usage_descriptors,
        }
    }

    pub fn builder() -> PreparsedDescriptorBuilder {
        PreparsedDescriptorBuilder::new()
    }

    pub fn format_tag(&self) -> u32 {
        self.format_tag
    }

    /// A store is valid when it carries [`PREPARSED_FORMAT_TAG`].
    pub fn is_valid(&self) -> bool {
        self.format_tag == PREPARSED_FORMAT_TAG
    }

    /// [`is_valid`](Self::is_valid) as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ForeignFormatTag`] when the tag does not match.
    pub fn ensure_valid(&self) -> StoreResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(StoreError::ForeignFormatTag {
                found: self.format_tag,
            })
        }
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn report_item_count(&self) -> usize {
        self.report_items.len()
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn report_items(&self) -> &[ReportItem] {
        &self.report_items
    }

    pub fn usage_descriptors(&self) -> &[UsageDescriptor] {
        &self.usage_descriptors
    }

    pub fn collection(&self, index: usize) -> Option<&Collection> {
        self.collections.get(index)
    }

    pub fn report_item(&self, index: usize) -> Option<&ReportItem> {
        self.report_items.get(index)
    }

    pub fn usage_descriptor(&self, index: usize) -> Option<&UsageDescriptor> {
        self.usage_descriptors.get(index)
    }

    /// The usage descriptor a report item points at, if the reference is in range.
    pub fn usage_of(&self, item: &ReportItem) -> Option<&UsageDescriptor> {
        self.usage_descriptors.get(item.first_usage_descriptor)
    }

    /// Report items directly owned by `collection`, with their indices.
    pub fn items_in(&self, collection: usize) -> impl Iterator<Item = (usize, &ReportItem)> + '_ {
        self.collections
            .get(collection)
            .map(Collection::report_items)
            .unwrap_or_default()
            .iter()
            .filter_map(move |&index| self.report_items.get(index).map(|item| (index, item)))
    }

    /// Indices of the collections whose parent is `collection`.
    pub fn children(&self, collection: usize) -> Vec<usize> {
        self.collections
            .iter()
            .enumerate()
            .filter(|(_, c)| c.parent == Some(collection))
            .map(|(index, _)| index)
            .collect()
    }

    /// Parent chain of `collection`, nearest first, ending at a top-level collection.
    ///
    /// The walk stops after `collection_count` steps so a corrupt parent cycle
    /// cannot loop forever.
    pub fn ancestors(&self, collection: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.collections.get(collection).and_then(|c| c.parent);
        while let Some(parent) = current {
            if chain.len() >= self.collections.len() {
                break;
            }
            chain.push(parent);
            current = self.collections.get(parent).and_then(|c| c.parent);
        }
        chain
    }

    /// Load a store from a JSON [`DescriptorSpec`] document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] for malformed documents and any builder
    /// validation error for documents describing an inconsistent store.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let spec: DescriptorSpec = serde_json::from_str(json)?;
        spec.build()
    }

    /// Export the store as a JSON [`DescriptorSpec`] document.
    ///
    /// # Errors
    ///
    /// Fails for invalid stores and for stores the builder would reject, such
    /// as raw tables with dangling references, so the output always loads back
    /// through [`PreparsedDescriptor::from_json`].
    pub fn to_json(&self) -> StoreResult<String> {
        let spec = DescriptorSpec::try_from(self)?;
        Ok(serde_json::to_string_pretty(&spec)?)
    }
}

/// Declarative form of a store, used for fixtures and JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescriptorSpec {
    #[serde(default)]
    pub collections: Vec<CollectionSpec>,
    #[serde(default)]
    pub report_items: Vec<ReportItemSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectionSpec {
    #[serde(default)]
    pub kind: CollectionKind,
    #[serde(default)]
    pub parent: Option<usize>,
}

/// A report item together with its own usage descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportItemSpec {
    pub report_kind: ReportKind,
    pub usage_page: u32,
    pub usage: UsageDescriptor,
    pub parent_collection: usize,
    #[serde(default = "default_variable")]
    pub is_variable: bool,
    #[serde(default)]
    pub report_id: u8,
}

fn default_variable() -> bool {
    true
}

impl ReportItemSpec {
    /// A variable item carrying a single usage, with no report ID.
    pub fn variable(
        report_kind: ReportKind,
        usage_page: u32,
        usage: u32,
        parent_collection: usize,
    ) -> Self {
        Self {
            report_kind,
            usage_page,
            usage: UsageDescriptor::Single(usage),
            parent_collection,
            is_variable: true,
            report_id: 0,
        }
    }

    pub fn with_usage(mut self, usage: UsageDescriptor) -> Self {
        self.usage = usage;
        self
    }

    pub fn array(mut self) -> Self {
        self.is_variable = false;
        self
    }

    pub fn with_report_id(mut self, report_id: u8) -> Self {
        self.report_id = report_id;
        self
    }
}

impl DescriptorSpec {
    /// Run this document through the builder.
    ///
    /// # Errors
    ///
    /// Any [`PreparsedDescriptorBuilder::build`] validation error.
    pub fn build(&self) -> StoreResult<PreparsedDescriptor> {
        let mut builder = PreparsedDescriptorBuilder::new();
        for collection in &self.collections {
            builder.add_collection(collection.kind, collection.parent);
        }
        for item in &self.report_items {
            builder.add_report_item(*item);
        }
        builder.build()
    }
}

impl TryFrom<&PreparsedDescriptor> for DescriptorSpec {
    type Error = StoreError;

    fn try_from(store: &PreparsedDescriptor) -> StoreResult<Self> {
        store.ensure_valid()?;
        builder::validate(&store.collections, &store.report_items, &store.usage_descriptors)?;

        let collections = store
            .collections
            .iter()
            .map(|c| CollectionSpec {
                kind: c.kind,
                parent: c.parent,
            })
            .collect();

        let report_items = store
            .report_items
            .iter()
            .enumerate()
            .map(|(index, item)| -> StoreResult<ReportItemSpec> {
                let usage = store.usage_of(item).ok_or(StoreError::DanglingUsage {
                    item: index,
                    index: item.first_usage_descriptor,
                    usage_count: store.usage_descriptors.len(),
                })?;
                Ok(ReportItemSpec {
                    report_kind: item.report_kind,
                    usage_page: item.usage_page,
                    usage: *usage,
                    parent_collection: item.parent_collection,
                    is_variable: item.is_variable,
                    report_id: item.report_id,
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Self {
            collections,
            report_items,
        })
    }
}
