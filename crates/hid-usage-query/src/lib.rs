//! Usage-location queries over preparsed HID report descriptors
//!
//! Answers "where else does this usage appear?" for a [`PreparsedDescriptor`]:
//! given a report kind, usage page and usage, find the next collection after a
//! starting collection that owns a variable report item carrying that usage.
//! Repeating the call with the returned collection as the new lower bound
//! enumerates every such collection, for example every hat switch of a
//! multi-stick device.
//!
//! All entry points are pure functions of an immutable store; they never
//! mutate it, keep no state between calls and can run concurrently against a
//! shared store.
//!
//! ```
//! use hid_preparsed::{CollectionKind, PreparsedDescriptor, ReportItemSpec, ReportKind};
//! use hid_usage_query::{QueryError, UsageQuery};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = PreparsedDescriptor::builder();
//! let app = builder.add_collection(CollectionKind::Application, None);
//! let left = builder.add_collection(CollectionKind::Physical, Some(app));
//! let right = builder.add_collection(CollectionKind::Physical, Some(app));
//! builder.add_report_item(ReportItemSpec::variable(ReportKind::Input, 0x01, 0x39, right));
//! builder.add_report_item(ReportItemSpec::variable(ReportKind::Input, 0x01, 0x39, left));
//! let store = builder.build()?;
//!
//! let hats = UsageQuery::new(ReportKind::Input, 0x01, 0x39)
//!     .locations(&store, app)
//!     .map(|found| found.map(|location| location.collection))
//!     .collect::<Result<Vec<_>, QueryError>>()?;
//! assert_eq!(hats, vec![left, right]);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod iter;
pub mod location;
pub mod query;

pub use error::{InvalidStoreReason, QueryError, QueryResult};
pub use iter::UsageLocations;
pub use location::UsageLocation;
pub use query::{
    ANY_USAGE_PAGE, UsageQuery, find_next_usage_location, find_next_usage_location_checked,
    find_usage_location_in,
};

pub use hid_preparsed::PreparsedDescriptor;
