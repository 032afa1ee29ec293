//! Preparsed HID report descriptor model
//!
//! A preparsed descriptor is the indexed, immutable form of a HID report
//! descriptor: a flat table of collections, a flat table of report items each
//! pointing at its owning collection, and the usage descriptors those items
//! carry. It is built once and then queried repeatedly without touching the
//! raw descriptor bytes again.
//!
//! Stores come from [`PreparsedDescriptorBuilder`] (validated),
//! [`PreparsedDescriptor::from_json`] (validated, for fixtures and tooling) or
//! [`PreparsedDescriptor::from_raw_parts`] (unchecked hand-off from a decoder).

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod builder;
pub mod error;
pub mod store;
pub mod types;

pub use builder::PreparsedDescriptorBuilder;
pub use error::{StoreError, StoreResult};
pub use store::{
    CollectionSpec, DescriptorSpec, PREPARSED_FORMAT_TAG, PreparsedDescriptor, ReportItemSpec,
};
pub use types::{Collection, CollectionKind, ReportItem, ReportKind, UsageDescriptor};

/// Generic Desktop usage page.
pub const USAGE_PAGE_GENERIC_DESKTOP: u32 = 0x01;
/// Button usage page.
pub const USAGE_PAGE_BUTTON: u32 = 0x09;

/// Generic Desktop X axis.
pub const USAGE_X: u32 = 0x30;
/// Generic Desktop Y axis.
pub const USAGE_Y: u32 = 0x31;
/// Generic Desktop hat switch.
pub const USAGE_HAT_SWITCH: u32 = 0x39;
