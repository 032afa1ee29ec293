//! Usage-location search over a preparsed descriptor

use hid_preparsed::{PreparsedDescriptor, ReportItem, ReportKind, UsageDescriptor};

use crate::error::{InvalidStoreReason, QueryError, QueryResult};
use crate::iter::UsageLocations;
use crate::location::UsageLocation;

/// Usage page value that matches every page.
pub const ANY_USAGE_PAGE: u32 = 0;

/// The (report kind, usage page, usage) part of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsageQuery {
    pub report_kind: ReportKind,
    /// [`ANY_USAGE_PAGE`] matches items on every page.
    pub usage_page: u32,
    pub usage: u32,
}

impl UsageQuery {
    pub fn new(report_kind: ReportKind, usage_page: u32, usage: u32) -> Self {
        Self {
            report_kind,
            usage_page,
            usage,
        }
    }

    pub fn any_page(report_kind: ReportKind, usage: u32) -> Self {
        Self::new(report_kind, ANY_USAGE_PAGE, usage)
    }

    /// Kind, page and usage test. Ignores the collection bound and the
    /// variable/array classification.
    pub fn matches(&self, item: &ReportItem, usage: &UsageDescriptor) -> bool {
        item.report_kind == self.report_kind
            && (self.usage_page == ANY_USAGE_PAGE || item.usage_page == self.usage_page)
            && usage.contains(self.usage)
    }

    /// Next location whose collection index is strictly greater than `min_collection`.
    ///
    /// # Errors
    ///
    /// See [`find_next_usage_location`].
    pub fn next_after(
        &self,
        store: &PreparsedDescriptor,
        min_collection: usize,
    ) -> QueryResult<UsageLocation> {
        find_next_usage_location(
            self.report_kind,
            self.usage_page,
            self.usage,
            min_collection,
            store,
        )
    }

    /// First location directly inside `collection`.
    ///
    /// # Errors
    ///
    /// See [`find_usage_location_in`].
    pub fn within(
        &self,
        store: &PreparsedDescriptor,
        collection: usize,
    ) -> QueryResult<UsageLocation> {
        find_usage_location_in(
            self.report_kind,
            self.usage_page,
            self.usage,
            collection,
            store,
        )
    }

    /// Enumerate every location after `start`, in increasing collection order.
    pub fn locations<'a>(
        &self,
        store: &'a PreparsedDescriptor,
        start: usize,
    ) -> UsageLocations<'a> {
        UsageLocations::new(*self, store, start)
    }
}

/// Find the nearest collection after `min_collection` that exposes `usage`
/// through a variable report item.
///
/// Every report item is scanned. Among the qualifying ones the item with the
/// smallest parent collection wins; on equal parents the lower item index
/// wins. The returned [`UsageLocation::collection`] can be fed back as
/// `min_collection` to walk forward until [`QueryError::UsageNotFound`].
///
/// # Errors
///
/// In order of precedence:
/// - [`QueryError::InvalidStore`] when the store's format tag is foreign,
/// - [`QueryError::BadParameter`] when `min_collection >= collection_count`,
/// - [`QueryError::InvalidStore`] when the scan meets a report item whose
///   collection or usage reference is out of range,
/// - [`QueryError::UsageNotFound`] when no item qualifies.
pub fn find_next_usage_location(
    report_kind: ReportKind,
    usage_page: u32,
    usage: u32,
    min_collection: usize,
    store: &PreparsedDescriptor,
) -> QueryResult<UsageLocation> {
    check_store(store)?;
    check_collection(store, min_collection)?;

    let query = UsageQuery::new(report_kind, usage_page, usage);
    let mut best: Option<UsageLocation> = None;

    for (item_index, item) in store.report_items().iter().enumerate() {
        let descriptor = resolve(store, item_index, item)?;

        if !query.matches(item, descriptor)
            || item.parent_collection <= min_collection
            || !item.is_variable
        {
            continue;
        }

        if best.is_none_or(|b| item.parent_collection < b.collection) {
            best = Some(UsageLocation {
                collection: item.parent_collection,
                item_index,
                report_id: item.report_id,
            });
        }
    }

    best.ok_or(QueryError::UsageNotFound)
}

/// [`find_next_usage_location`] for callers holding an optional store handle.
///
/// # Errors
///
/// [`QueryError::NullArgument`] when `store` is `None`, otherwise the errors
/// of [`find_next_usage_location`].
pub fn find_next_usage_location_checked(
    report_kind: ReportKind,
    usage_page: u32,
    usage: u32,
    min_collection: usize,
    store: Option<&PreparsedDescriptor>,
) -> QueryResult<UsageLocation> {
    let store = store.ok_or(QueryError::NullArgument)?;
    find_next_usage_location(report_kind, usage_page, usage, min_collection, store)
}

/// Find `usage` among the report items directly owned by `collection`.
///
/// Only that collection's adjacency list is visited. The first qualifying item
/// in item index order wins.
///
/// # Errors
///
/// Same precedence as [`find_next_usage_location`], with `collection` in
/// place of `min_collection`.
pub fn find_usage_location_in(
    report_kind: ReportKind,
    usage_page: u32,
    usage: u32,
    collection: usize,
    store: &PreparsedDescriptor,
) -> QueryResult<UsageLocation> {
    check_store(store)?;
    check_collection(store, collection)?;

    let query = UsageQuery::new(report_kind, usage_page, usage);
    for (item_index, item) in store.items_in(collection) {
        let descriptor = resolve(store, item_index, item)?;
        if item.is_variable && query.matches(item, descriptor) {
            return Ok(UsageLocation {
                collection,
                item_index,
                report_id: item.report_id,
            });
        }
    }

    Err(QueryError::UsageNotFound)
}

fn check_store(store: &PreparsedDescriptor) -> QueryResult<()> {
    if store.is_valid() {
        Ok(())
    } else {
        Err(InvalidStoreReason::ForeignFormatTag {
            found: store.format_tag(),
        }
        .into())
    }
}

fn check_collection(store: &PreparsedDescriptor, collection: usize) -> QueryResult<()> {
    let collection_count = store.collection_count();
    if collection < collection_count {
        Ok(())
    } else {
        Err(QueryError::BadParameter {
            collection,
            collection_count,
        })
    }
}

fn resolve<'a>(
    store: &'a PreparsedDescriptor,
    item_index: usize,
    item: &ReportItem,
) -> QueryResult<&'a UsageDescriptor> {
    if item.parent_collection >= store.collection_count() {
        return Err(InvalidStoreReason::DanglingParent {
            item: item_index,
            parent: item.parent_collection,
        }
        .into());
    }
    store.usage_of(item).ok_or_else(|| {
        InvalidStoreReason::DanglingUsage {
            item: item_index,
            index: item.first_usage_descriptor,
        }
        .into()
    })
}
