use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};

use crate::model::NoiseEntry;

/// Entries bucketed by the calendar day they were recorded on.
///
/// Days are keyed in the time zone the index was built with, so an entry late
/// in the evening lands on the viewer's day rather than the UTC one. Within a
/// bucket entries keep the order they were given in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedIndex {
    buckets: BTreeMap<NaiveDate, Vec<NoiseEntry>>,
}

impl GroupedIndex {
    pub fn build<Tz: TimeZone>(entries: &[NoiseEntry], tz: &Tz) -> Self {
        let mut buckets: BTreeMap<NaiveDate, Vec<NoiseEntry>> = BTreeMap::new();
        for entry in entries {
            let day = entry.date.with_timezone(tz).date_naive();
            buckets.entry(day).or_default().push(entry.clone());
        }
        Self { buckets }
    }

    /// Buckets, most recent day first.
    pub fn buckets(&self) -> impl Iterator<Item = (NaiveDate, &[NoiseEntry])> + '_ {
        self.buckets
            .iter()
            .rev()
            .map(|(day, entries)| (*day, entries.as_slice()))
    }

    /// Days with at least one entry, most recent first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().rev().copied()
    }

    pub fn bucket(&self, day: NaiveDate) -> Option<&[NoiseEntry]> {
        self.buckets.get(&day).map(Vec::as_slice)
    }

    pub fn day_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
