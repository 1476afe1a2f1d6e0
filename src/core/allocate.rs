//! Oldest-first distribution of a payment across unsettled entries.
//!
//! The allocator is pure: it reads entry state and returns the per-entry
//! deltas to apply, leaving persistence to the caller so the whole payment
//! can be committed in one transaction.

use crate::models::entry::TimeEntry;

/// One entry touched by an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDelta {
    pub entry_id: i64,
    /// Cents taken from the payment for this entry. Always > 0.
    pub applied_cents: i64,
    /// Resulting paid total for the entry, never above its amount.
    pub new_paid_cents: i64,
}

/// Outcome of distributing one payment.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    pub deltas: Vec<EntryDelta>,
    /// Cents left over once every unsettled entry is fully covered.
    pub unallocated_cents: i64,
}

impl Allocation {
    pub fn applied_cents(&self) -> i64 {
        self.deltas.iter().map(|d| d.applied_cents).sum()
    }
}

/// Walk unsettled entries oldest first and fill each one up before moving
/// to the next. Entries sharing a date (and undated legacy rows, which sort
/// before every dated one) keep their input order, so callers loading rows
/// ordered by (date, id) get a deterministic result. Running the allocator
/// again on the updated state distributes nothing further for the same
/// payment.
pub fn allocate(payment_cents: i64, entries: &[TimeEntry]) -> Allocation {
    let mut open: Vec<&TimeEntry> = entries.iter().filter(|e| e.is_unsettled()).collect();
    open.sort_by_key(|e| e.date);

    let mut remaining = payment_cents.max(0);
    let mut deltas = Vec::new();

    for entry in open {
        if remaining == 0 {
            break;
        }
        let applied = entry.outstanding_cents().min(remaining);
        if applied == 0 {
            continue;
        }
        remaining -= applied;
        deltas.push(EntryDelta {
            entry_id: entry.id,
            applied_cents: applied,
            new_paid_cents: entry.paid_cents + applied,
        });
    }

    Allocation {
        deltas,
        unallocated_cents: remaining,
    }
}
