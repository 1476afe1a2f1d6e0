use crate::config::Config;
use crate::core::ledger::{DateRange, compute_totals};
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries_for_agent, load_payments_for_agent, require_agent};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_due};
use crate::utils::money::{format_cents, format_hours, format_money};
use crate::utils::table::{Column, Table};

/// High-level business logic for the `list` command.
pub struct ListLogic;

impl ListLogic {
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        agent_ident: &str,
        period: Option<&str>,
        unpaid_only: bool,
        payments: bool,
    ) -> AppResult<()> {
        let agent = require_agent(&pool.conn, agent_ident)?;
        let range = DateRange::parse(period)?;

        if payments {
            return Self::list_payments(pool, cfg, agent.id, &agent.name, &range);
        }

        let entries = load_entries_for_agent(pool, agent.id)?;
        let all_payments = load_payments_for_agent(pool, agent.id)?;

        let visible: Vec<_> = entries
            .iter()
            .filter(|e| range.contains(e.date))
            .filter(|e| !unpaid_only || e.is_unsettled())
            .collect();

        if visible.is_empty() {
            info(format!("No entries for {}.", agent.name));
            return Ok(());
        }

        println!("\n📒 Entries for {}:\n", agent.name);

        let mut table = Table::new(vec![
            Column::right("ID", 4),
            Column::left("DATE", 10),
            Column::left("TIME", 11),
            Column::right("HOURS", 7),
            Column::right("RATE", 8),
            Column::right("AMOUNT", 9),
            Column::right("PAID", 9),
            Column::right("DUE", 9),
            Column::left("SITE", 16),
            Column::left("NOTE", 20),
        ]);

        for e in &visible {
            let time = match (e.start, e.end) {
                (Some(s), Some(en)) => {
                    format!("{}-{}", s.format("%H:%M"), en.format("%H:%M"))
                }
                _ => String::new(),
            };

            table.add_row(vec![
                e.id.to_string(),
                e.date_str(),
                time,
                format_hours(e.hours_milli),
                format_cents(e.rate_cents),
                format_cents(e.amount_cents),
                format_cents(e.paid_cents),
                format_cents(e.outstanding_cents()),
                e.site_name.clone().unwrap_or_default(),
                e.note.clone(),
            ]);
        }
        print!("{}", table.render());

        // Footer totals respect the same period filter; payments outside
        // the window are excluded from the paid total as well.
        let totals = compute_totals(&entries, &all_payments, &range);
        let due_color = color_for_due(totals.due_cents);
        println!(
            "\nTotal: {} h | amount {} | paid {} | due {}{}{}",
            format_hours(totals.hours_milli),
            format_money(totals.amount_cents, &cfg.currency),
            format_money(totals.paid_cents, &cfg.currency),
            due_color,
            format_money(totals.due_cents, &cfg.currency),
            RESET
        );

        Ok(())
    }

    fn list_payments(
        pool: &mut DbPool,
        cfg: &Config,
        agent_id: i64,
        agent_name: &str,
        range: &DateRange,
    ) -> AppResult<()> {
        let payments = load_payments_for_agent(pool, agent_id)?;
        let visible: Vec<_> = payments
            .iter()
            .filter(|p| range.contains(p.date))
            .collect();

        if visible.is_empty() {
            info(format!("No payments for {}.", agent_name));
            return Ok(());
        }

        println!("\n💶 Payments for {}:\n", agent_name);

        let mut table = Table::new(vec![
            Column::right("ID", 4),
            Column::left("DATE", 10),
            Column::right("AMOUNT", 9),
            Column::left("NOTE", 30),
        ]);

        let mut total = 0;
        for p in &visible {
            total += p.amount_cents;
            table.add_row(vec![
                p.id.to_string(),
                p.date_str(),
                format_cents(p.amount_cents),
                p.note.clone(),
            ]);
        }
        print!("{}", table.render());

        println!("\nTotal paid: {}", format_money(total, &cfg.currency));
        Ok(())
    }
}
