use chrono::NaiveDate;
use crewledger::core::allocate::allocate;
use crewledger::core::groups::{UNSPECIFIED_SITE, group_by_month, group_by_site};
use crewledger::core::ledger::{DateRange, compute_totals};
use crewledger::models::entry::TimeEntry;
use crewledger::models::payment::Payment;
use crewledger::utils::money::{
    amount_for, format_cents, format_hours, parse_amount, parse_hours,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

/// Entry with full control over id, optional date and paid state
fn entry(id: i64, d: Option<&str>, amount_cents: i64, paid_cents: i64) -> TimeEntry {
    TimeEntry {
        id,
        agent_id: 1,
        site_id: None,
        site_name: None,
        date: d.map(date),
        start: None,
        end: None,
        hours_milli: amount_cents, // 10.00/h keeps the numbers readable
        rate_cents: 1000,
        amount_cents,
        paid_cents,
        note: String::new(),
        created_at: String::new(),
    }
}

fn payment(d: &str, amount_cents: i64) -> Payment {
    Payment::new(1, date(d), amount_cents, "")
}

#[test]
fn allocation_fills_oldest_entry_first() {
    let entries = vec![
        entry(1, Some("2025-02-10"), 10_000, 0),
        entry(2, Some("2025-01-10"), 10_000, 0),
    ];

    let alloc = allocate(15_000, &entries);

    assert_eq!(alloc.deltas.len(), 2);
    // January, although loaded second, is filled first
    assert_eq!(alloc.deltas[0].entry_id, 2);
    assert_eq!(alloc.deltas[0].applied_cents, 10_000);
    assert_eq!(alloc.deltas[0].new_paid_cents, 10_000);
    assert_eq!(alloc.deltas[1].entry_id, 1);
    assert_eq!(alloc.deltas[1].applied_cents, 5_000);
    assert_eq!(alloc.unallocated_cents, 0);
    assert_eq!(alloc.applied_cents(), 15_000);
}

#[test]
fn allocation_skips_settled_entries() {
    let entries = vec![
        entry(1, Some("2025-01-10"), 10_000, 10_000),
        entry(2, Some("2025-02-10"), 10_000, 4_000),
    ];

    let alloc = allocate(5_000, &entries);

    assert_eq!(alloc.deltas.len(), 1);
    assert_eq!(alloc.deltas[0].entry_id, 2);
    assert_eq!(alloc.deltas[0].new_paid_cents, 9_000);
}

#[test]
fn allocation_excess_stays_unallocated() {
    let entries = vec![entry(1, Some("2025-01-10"), 10_000, 0)];

    let alloc = allocate(13_000, &entries);

    assert_eq!(alloc.deltas.len(), 1);
    assert_eq!(alloc.deltas[0].new_paid_cents, 10_000);
    assert_eq!(alloc.unallocated_cents, 3_000);
}

#[test]
fn allocation_on_settled_ledger_distributes_nothing() {
    let entries = vec![
        entry(1, Some("2025-01-10"), 10_000, 10_000),
        entry(2, Some("2025-02-10"), 5_000, 5_000),
    ];

    let alloc = allocate(2_000, &entries);

    assert!(alloc.deltas.is_empty());
    assert_eq!(alloc.unallocated_cents, 2_000);
}

#[test]
fn allocation_same_date_keeps_input_order() {
    let entries = vec![
        entry(7, Some("2025-01-10"), 10_000, 0),
        entry(8, Some("2025-01-10"), 10_000, 0),
    ];

    let alloc = allocate(12_000, &entries);

    assert_eq!(alloc.deltas[0].entry_id, 7);
    assert_eq!(alloc.deltas[0].applied_cents, 10_000);
    assert_eq!(alloc.deltas[1].entry_id, 8);
    assert_eq!(alloc.deltas[1].applied_cents, 2_000);
}

#[test]
fn allocation_undated_entry_sorts_before_dated() {
    let entries = vec![
        entry(1, Some("2025-01-10"), 10_000, 0),
        entry(2, None, 10_000, 0),
    ];

    let alloc = allocate(4_000, &entries);

    assert_eq!(alloc.deltas.len(), 1);
    assert_eq!(alloc.deltas[0].entry_id, 2);
}

#[test]
fn allocation_never_overfills_an_entry() {
    let entries = vec![
        entry(1, Some("2025-01-10"), 3_000, 1_000),
        entry(2, Some("2025-01-11"), 5_000, 0),
    ];

    let alloc = allocate(100_000, &entries);

    for d in &alloc.deltas {
        let e = entries.iter().find(|e| e.id == d.entry_id).unwrap();
        assert!(d.new_paid_cents <= e.amount_cents);
        assert!(d.applied_cents > 0);
    }
    assert_eq!(alloc.applied_cents(), 7_000);
    assert_eq!(alloc.unallocated_cents, 93_000);
}

#[test]
fn allocation_ignores_non_positive_payment() {
    let entries = vec![entry(1, Some("2025-01-10"), 10_000, 0)];

    let alloc = allocate(-500, &entries);
    assert!(alloc.deltas.is_empty());
    assert_eq!(alloc.unallocated_cents, 0);
}

#[test]
fn totals_sum_paid_from_payment_records() {
    // Entry settlement and payment records can disagree after an entry
    // deletion; the paid column follows the payment records
    let entries = vec![entry(1, Some("2025-01-10"), 10_000, 0)];
    let payments = vec![payment("2025-01-15", 4_000), payment("2025-02-15", 2_000)];

    let t = compute_totals(&entries, &payments, &DateRange::all());
    assert_eq!(t.amount_cents, 10_000);
    assert_eq!(t.paid_cents, 6_000);
    assert_eq!(t.due_cents, 4_000);
}

#[test]
fn totals_due_is_floored_at_zero() {
    let entries = vec![entry(1, Some("2025-01-10"), 10_000, 10_000)];
    let payments = vec![payment("2025-01-15", 13_000)];

    let t = compute_totals(&entries, &payments, &DateRange::all());
    assert_eq!(t.paid_cents, 13_000);
    assert_eq!(t.due_cents, 0);
}

#[test]
fn totals_respect_the_date_window() {
    let entries = vec![
        entry(1, Some("2025-01-10"), 10_000, 0),
        entry(2, Some("2025-02-10"), 8_000, 0),
        entry(3, None, 5_000, 0), // undated rows drop out of any bounded window
    ];
    let payments = vec![payment("2025-01-20", 3_000), payment("2025-03-01", 9_000)];

    let january = DateRange::parse(Some("2025-01")).expect("range");
    let t = compute_totals(&entries, &payments, &january);
    assert_eq!(t.amount_cents, 10_000);
    assert_eq!(t.paid_cents, 3_000);
    assert_eq!(t.due_cents, 7_000);

    // The open range keeps everything, undated included
    let all = compute_totals(&entries, &payments, &DateRange::all());
    assert_eq!(all.amount_cents, 23_000);
    assert_eq!(all.paid_cents, 12_000);
}

#[test]
fn date_range_parsing() {
    assert!(DateRange::parse(None).expect("none").is_open());
    assert!(DateRange::parse(Some("all")).expect("all").is_open());
    assert!(DateRange::parse(Some("ALL")).expect("ALL").is_open());

    let year = DateRange::parse(Some("2025")).expect("year");
    assert_eq!(year.start, Some(date("2025-01-01")));
    assert_eq!(year.end, Some(date("2025-12-31")));

    let feb = DateRange::parse(Some("2024-02")).expect("leap month");
    assert_eq!(feb.end, Some(date("2024-02-29")));

    let day = DateRange::parse(Some("2025-03-10")).expect("day");
    assert_eq!(day.start, day.end);

    let span = DateRange::parse(Some("2024-11:2025-02")).expect("span");
    assert_eq!(span.start, Some(date("2024-11-01")));
    assert_eq!(span.end, Some(date("2025-02-28")));

    assert!(DateRange::parse(Some("2025-1")).is_err());
    assert!(DateRange::parse(Some("2024-13")).is_err());
    assert!(DateRange::parse(Some("2024-01:2024")).is_err());
}

#[test]
fn paid_state_clamps_on_load() {
    let mut over = entry(1, Some("2025-01-10"), 10_000, 12_000);
    over.clamp_paid();
    assert_eq!(over.paid_cents, 10_000);
    assert!(!over.is_unsettled());

    let mut negative = entry(2, Some("2025-01-10"), 10_000, -500);
    negative.clamp_paid();
    assert_eq!(negative.paid_cents, 0);
    assert_eq!(negative.outstanding_cents(), 10_000);
}

#[test]
fn money_rounding_is_exact_half_up() {
    // 1.005 h at 15.00/h is 15.075 and rounds to 15.08
    assert_eq!(amount_for(1_005, 1_500), 1_508);
    // plain cases stay exact
    assert_eq!(amount_for(8_000, 1_000), 8_000);
    assert_eq!(amount_for(7_500, 1_250), 9_375);
    // zero rate or zero hours bill nothing
    assert_eq!(amount_for(0, 1_500), 0);
    assert_eq!(amount_for(8_000, 0), 0);
}

#[test]
fn money_parsing_and_formatting() {
    assert_eq!(parse_amount("15"), Some(1_500));
    assert_eq!(parse_amount("15.5"), Some(1_550));
    assert_eq!(parse_amount("15.08"), Some(1_508));
    assert_eq!(parse_amount("15,08"), Some(1_508));
    assert_eq!(parse_amount("15.005"), Some(1_501)); // extra digit rounds half-up
    assert_eq!(parse_amount("-3"), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount(""), None);

    assert_eq!(parse_hours("8"), Some(8_000));
    assert_eq!(parse_hours("7.75"), Some(7_750));
    assert_eq!(parse_hours("1.005"), Some(1_005));

    assert_eq!(format_cents(1_507), "15.07");
    assert_eq!(format_cents(5), "0.05");
    assert_eq!(format_cents(-250), "-2.50");
    assert_eq!(format_hours(7_750), "7.75");
}

#[test]
fn site_groups_bucket_unassigned_entries() {
    let mut depot = entry(1, Some("2025-01-10"), 8_000, 0);
    depot.site_name = Some("Depot".into());
    let mut depot2 = entry(2, Some("2025-02-10"), 2_000, 0);
    depot2.site_name = Some("Depot".into());
    let loose = entry(3, Some("2025-01-11"), 4_000, 0);

    let groups = group_by_site(&[depot, depot2, loose]);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups["Depot"].amount_cents, 10_000);
    assert_eq!(groups[UNSPECIFIED_SITE].amount_cents, 4_000);
}

#[test]
fn month_groups_run_chronologically_and_skip_undated() {
    let entries = vec![
        entry(1, Some("2025-03-10"), 8_000, 0),
        entry(2, Some("2025-01-15"), 6_000, 0),
        entry(3, Some("2025-01-20"), 2_000, 0),
        entry(4, None, 9_000, 0),
    ];

    let groups = group_by_month(&entries);

    let keys: Vec<&str> = groups.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["2025-01", "2025-03"]);
    assert_eq!(groups["2025-01"].amount_cents, 8_000);
    assert_eq!(groups["2025-01"].hours_milli, 8_000);
    assert_eq!(groups["2025-03"].amount_cents, 8_000);
}
