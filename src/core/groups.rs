//! Breakdown of an agent's entries by site and by calendar month.

use crate::models::entry::TimeEntry;
use crate::utils::date::month_key;
use std::collections::BTreeMap;

/// Bucket label for entries recorded without a site.
pub const UNSPECIFIED_SITE: &str = "unspecified";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupTotals {
    pub hours_milli: i64,
    pub amount_cents: i64,
}

impl GroupTotals {
    fn absorb(&mut self, e: &TimeEntry) {
        self.hours_milli += e.hours_milli;
        self.amount_cents += e.amount_cents;
    }
}

/// Totals per site name. Entries without a site land under
/// [`UNSPECIFIED_SITE`].
pub fn group_by_site(entries: &[TimeEntry]) -> BTreeMap<String, GroupTotals> {
    let mut groups: BTreeMap<String, GroupTotals> = BTreeMap::new();
    for e in entries {
        let key = e
            .site_name
            .clone()
            .unwrap_or_else(|| UNSPECIFIED_SITE.to_string());
        groups.entry(key).or_default().absorb(e);
    }
    groups
}

/// Totals per calendar month, keyed "YYYY-MM" so the map iterates in
/// chronological order. Undated rows have no month and are skipped.
pub fn group_by_month(entries: &[TimeEntry]) -> BTreeMap<String, GroupTotals> {
    let mut groups: BTreeMap<String, GroupTotals> = BTreeMap::new();
    for e in entries {
        if let Some(d) = e.date {
            groups.entry(month_key(d)).or_default().absorb(e);
        }
    }
    groups
}
