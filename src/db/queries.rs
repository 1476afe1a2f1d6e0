use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::agent::Agent;
use crate::models::entry::TimeEntry;
use crate::models::payment::Payment;
use crate::models::site::Site;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

// ---------------------------------------------------------------------------
// row mappers
// ---------------------------------------------------------------------------

fn parse_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
    match s {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(AppError::InvalidDate(raw)),
                )
            }),
    }
}

fn parse_opt_time(s: Option<String>) -> Result<Option<NaiveTime>> {
    match s {
        None => Ok(None),
        Some(raw) => NaiveTime::parse_from_str(&raw, "%H:%M")
            .map(Some)
            .map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(AppError::InvalidTime(raw)),
                )
            }),
    }
}

pub fn map_agent_row(row: &Row) -> Result<Agent> {
    Ok(Agent {
        id: row.get("id")?,
        name: row.get("name")?,
        rate_cents: row.get("rate_cents")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_site_row(row: &Row) -> Result<Site> {
    Ok(Site {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

/// Map an entries row (joined with sites for the display name).
///
/// The paid total is clamped into [0, amount] here, at the load boundary,
/// so hand-edited or pre-migration values can never push balances negative
/// downstream.
pub fn map_entry_row(row: &Row) -> Result<TimeEntry> {
    let mut entry = TimeEntry {
        id: row.get("id")?,
        agent_id: row.get("agent_id")?,
        site_id: row.get("site_id")?,
        site_name: row.get("site_name")?,
        date: parse_opt_date(row.get("date")?)?,
        start: parse_opt_time(row.get("start_time")?)?,
        end: parse_opt_time(row.get("end_time")?)?,
        hours_milli: row.get("hours_milli")?,
        rate_cents: row.get("rate_cents")?,
        amount_cents: row.get("amount_cents")?,
        paid_cents: row.get("paid_cents")?,
        note: row.get::<_, Option<String>>("note")?.unwrap_or_default(),
        created_at: row.get("created_at")?,
    };
    entry.clamp_paid();
    Ok(entry)
}

pub fn map_payment_row(row: &Row) -> Result<Payment> {
    Ok(Payment {
        id: row.get("id")?,
        agent_id: row.get("agent_id")?,
        date: parse_opt_date(row.get("date")?)?,
        amount_cents: row.get("amount_cents")?,
        note: row.get::<_, Option<String>>("note")?.unwrap_or_default(),
        created_at: row.get("created_at")?,
    })
}

// ---------------------------------------------------------------------------
// agents
// ---------------------------------------------------------------------------

pub fn insert_agent(conn: &Connection, agent: &Agent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO agents (name, rate_cents, created_at) VALUES (?1, ?2, ?3)",
        params![agent.name, agent.rate_cents, agent.created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Look an agent up by numeric id first, then by exact name.
pub fn find_agent(conn: &Connection, ident: &str) -> AppResult<Option<Agent>> {
    if let Ok(id) = ident.trim().parse::<i64>() {
        let found = conn
            .query_row(
                "SELECT id, name, rate_cents, created_at FROM agents WHERE id = ?1",
                [id],
                map_agent_row,
            )
            .optional()?;
        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(conn
        .query_row(
            "SELECT id, name, rate_cents, created_at FROM agents WHERE name = ?1",
            [ident.trim()],
            map_agent_row,
        )
        .optional()?)
}

/// Like [`find_agent`] but failing with `AgentNotFound` instead of `None`.
pub fn require_agent(conn: &Connection, ident: &str) -> AppResult<Agent> {
    find_agent(conn, ident)?.ok_or_else(|| AppError::AgentNotFound(ident.to_string()))
}

pub fn load_agents(pool: &mut DbPool) -> AppResult<Vec<Agent>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT id, name, rate_cents, created_at FROM agents ORDER BY name ASC")?;

    let rows = stmt.query_map([], map_agent_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_agent_rate(conn: &Connection, agent_id: i64, rate_cents: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE agents SET rate_cents = ?1 WHERE id = ?2",
        params![rate_cents, agent_id],
    )?;
    Ok(())
}

pub fn update_agent_name(conn: &Connection, agent_id: i64, name: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE agents SET name = ?1 WHERE id = ?2",
        params![name, agent_id],
    )?;
    Ok(())
}

pub fn delete_agent(conn: &Connection, agent_id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM agents WHERE id = ?1", [agent_id])?;
    Ok(())
}

/// How many entries and payments still reference an agent. Used to refuse
/// deleting an agent that would orphan ledger rows.
pub fn count_agent_records(conn: &Connection, agent_id: i64) -> AppResult<(i64, i64)> {
    let entries: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE agent_id = ?1",
        [agent_id],
        |row| row.get(0),
    )?;
    let payments: i64 = conn.query_row(
        "SELECT COUNT(*) FROM payments WHERE agent_id = ?1",
        [agent_id],
        |row| row.get(0),
    )?;
    Ok((entries, payments))
}

// ---------------------------------------------------------------------------
// sites
// ---------------------------------------------------------------------------

pub fn insert_site(conn: &Connection, site: &Site) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sites (name, created_at) VALUES (?1, ?2)",
        params![site.name, site.created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_site(conn: &Connection, ident: &str) -> AppResult<Option<Site>> {
    if let Ok(id) = ident.trim().parse::<i64>() {
        let found = conn
            .query_row(
                "SELECT id, name, created_at FROM sites WHERE id = ?1",
                [id],
                map_site_row,
            )
            .optional()?;
        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(conn
        .query_row(
            "SELECT id, name, created_at FROM sites WHERE name = ?1",
            [ident.trim()],
            map_site_row,
        )
        .optional()?)
}

/// Like [`find_site`] but failing with `SiteNotFound` instead of `None`.
pub fn require_site(conn: &Connection, ident: &str) -> AppResult<Site> {
    find_site(conn, ident)?.ok_or_else(|| AppError::SiteNotFound(ident.to_string()))
}

/// Fetch a site by name, creating it on the fly when missing. Entry
/// creation uses this so `--site` never needs a separate registration
/// step.
pub fn find_or_create_site(conn: &Connection, name: &str) -> AppResult<Site> {
    if let Some(site) = find_site(conn, name)? {
        return Ok(site);
    }

    let mut site = Site::new(0, name);
    site.id = insert_site(conn, &site)?;
    Ok(site)
}

pub fn load_sites(pool: &mut DbPool) -> AppResult<Vec<Site>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT id, name, created_at FROM sites ORDER BY name ASC")?;

    let rows = stmt.query_map([], map_site_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// How many entries still point at a site. Used to refuse deleting a
/// site that is referenced by the ledger.
pub fn count_site_entries(conn: &Connection, site_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE site_id = ?1",
        [site_id],
        |row| row.get(0),
    )?)
}

pub fn delete_site(conn: &Connection, site_id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM sites WHERE id = ?1", [site_id])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// entries
// ---------------------------------------------------------------------------

const ENTRY_SELECT: &str = "SELECT e.id, e.agent_id, e.site_id, s.name AS site_name,
            e.date, e.start_time, e.end_time,
            e.hours_milli, e.rate_cents, e.amount_cents, e.paid_cents,
            e.note, e.created_at
     FROM entries e
     LEFT JOIN sites s ON s.id = e.site_id";

pub fn insert_entry(conn: &Connection, entry: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entries (agent_id, site_id, date, start_time, end_time,
                              hours_milli, rate_cents, amount_cents, paid_cents,
                              note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            entry.agent_id,
            entry.site_id,
            entry.date.map(|d| d.format("%Y-%m-%d").to_string()),
            entry.start.map(|t| t.format("%H:%M").to_string()),
            entry.end.map(|t| t.format("%H:%M").to_string()),
            entry.hours_milli,
            entry.rate_cents,
            entry.amount_cents,
            entry.paid_cents,
            entry.note,
            entry.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All entries for one agent, oldest first.
///
/// Ordered by (date, id): SQLite sorts NULL dates before every real one,
/// so undated legacy rows come first, and rows sharing a date keep
/// insertion order. The allocator relies on this load order.
pub fn load_entries_for_agent(pool: &mut DbPool, agent_id: i64) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "{ENTRY_SELECT}
     WHERE e.agent_id = ?1
     ORDER BY e.date ASC, e.id ASC"
    );
    let mut stmt = pool.conn.prepare(&sql)?;

    let rows = stmt.query_map([agent_id], map_entry_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let sql = format!(
        "{ENTRY_SELECT}
     WHERE e.id = ?1"
    );
    Ok(conn.query_row(&sql, [id], map_entry_row).optional()?)
}

/// Update an entry (all fields except id and created_at).
pub fn update_entry(conn: &Connection, entry: &TimeEntry) -> AppResult<()> {
    conn.execute(
        "UPDATE entries
         SET site_id = ?1, date = ?2, start_time = ?3, end_time = ?4,
             hours_milli = ?5, rate_cents = ?6, amount_cents = ?7,
             paid_cents = ?8, note = ?9
         WHERE id = ?10",
        params![
            entry.site_id,
            entry.date.map(|d| d.format("%Y-%m-%d").to_string()),
            entry.start.map(|t| t.format("%H:%M").to_string()),
            entry.end.map(|t| t.format("%H:%M").to_string()),
            entry.hours_milli,
            entry.rate_cents,
            entry.amount_cents,
            entry.paid_cents,
            entry.note,
            entry.id,
        ],
    )?;
    Ok(())
}

pub fn update_entry_paid(conn: &Connection, entry_id: i64, paid_cents: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE entries SET paid_cents = ?1 WHERE id = ?2",
        params![paid_cents, entry_id],
    )?;
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// payments
// ---------------------------------------------------------------------------

pub fn insert_payment(conn: &Connection, payment: &Payment) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO payments (agent_id, date, amount_cents, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            payment.agent_id,
            payment.date.map(|d| d.format("%Y-%m-%d").to_string()),
            payment.amount_cents,
            payment.note,
            payment.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_payments_for_agent(pool: &mut DbPool, agent_id: i64) -> AppResult<Vec<Payment>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, agent_id, date, amount_cents, note, created_at
         FROM payments
         WHERE agent_id = ?1
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map([agent_id], map_payment_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_payment(conn: &Connection, id: i64) -> AppResult<Option<Payment>> {
    Ok(conn
        .query_row(
            "SELECT id, agent_id, date, amount_cents, note, created_at
             FROM payments WHERE id = ?1",
            [id],
            map_payment_row,
        )
        .optional()?)
}

pub fn delete_payment(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM payments WHERE id = ?1", [id])?;
    Ok(())
}
