//! Caller-held enumeration of usage locations

use std::iter::FusedIterator;

use hid_preparsed::PreparsedDescriptor;

use crate::error::QueryError;
use crate::location::UsageLocation;
use crate::query::UsageQuery;

/// Repeatedly runs a [`UsageQuery`], feeding each found collection back in as
/// the next lower bound.
///
/// Yields locations in strictly increasing collection order and ends cleanly
/// when the usage is no longer found. Any other error is yielded once, after
/// which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct UsageLocations<'a> {
    query: UsageQuery,
    store: &'a PreparsedDescriptor,
    cursor: usize,
    done: bool,
}

impl<'a> UsageLocations<'a> {
    pub fn new(query: UsageQuery, store: &'a PreparsedDescriptor, start: usize) -> Self {
        Self {
            query,
            store,
            cursor: start,
            done: false,
        }
    }

    /// Current exclusive lower bound.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for UsageLocations<'_> {
    type Item = Result<UsageLocation, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.query.next_after(self.store, self.cursor) {
            Ok(location) => {
                self.cursor = location.collection;
                Some(Ok(location))
            }
            Err(QueryError::UsageNotFound) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // Each remaining collection can be found once; a failing step adds
        // one error item.
        let remaining = self.store.collection_count().saturating_sub(self.cursor.saturating_add(1));
        (0, Some(remaining.saturating_add(1)))
    }
}

impl FusedIterator for UsageLocations<'_> {}
