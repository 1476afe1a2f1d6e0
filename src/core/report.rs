use crate::config::Config;
use crate::core::groups::{group_by_month, group_by_site};
use crate::core::ledger::{DateRange, compute_totals};
use crate::db::pool::DbPool;
use crate::db::queries::{
    load_agents, load_entries_for_agent, load_payments_for_agent, require_agent,
};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_due};
use crate::utils::money::{format_cents, format_hours, format_money};
use crate::utils::table::{Column, Table};
use clap::ValueEnum;

/// Axis for the `report` breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKey {
    /// Group by job site
    Site,
    /// Group by calendar month
    Month,
}

/// High-level business logic for `balance` and `report`.
pub struct ReportLogic;

impl ReportLogic {
    /// Per-agent balance table: worked hours, billed amount, paid and due.
    pub fn balance(
        pool: &mut DbPool,
        cfg: &Config,
        agent_ident: Option<&str>,
        period: Option<&str>,
    ) -> AppResult<()> {
        let range = DateRange::parse(period)?;

        let agents = match agent_ident {
            Some(ident) => vec![require_agent(&pool.conn, ident)?],
            None => load_agents(pool)?,
        };

        if agents.is_empty() {
            info("No agents registered yet. Use 'agent add <name>' first.");
            return Ok(());
        }

        println!("\n💰 Balance:\n");

        let mut table = Table::new(vec![
            Column::right("ID", 4),
            Column::left("AGENT", 24),
            Column::right("HOURS", 8),
            Column::right("AMOUNT", 10),
            Column::right("PAID", 10),
            Column::right("DUE", 10),
        ]);

        let mut grand_amount = 0;
        let mut grand_paid = 0;
        let mut grand_due = 0;

        for agent in &agents {
            let entries = load_entries_for_agent(pool, agent.id)?;
            let payments = load_payments_for_agent(pool, agent.id)?;
            let totals = compute_totals(&entries, &payments, &range);

            grand_amount += totals.amount_cents;
            grand_paid += totals.paid_cents;
            grand_due += totals.due_cents;

            table.add_row(vec![
                agent.id.to_string(),
                agent.name.clone(),
                format_hours(totals.hours_milli),
                format_cents(totals.amount_cents),
                format_cents(totals.paid_cents),
                format_cents(totals.due_cents),
            ]);
        }
        print!("{}", table.render());

        let due_color = color_for_due(grand_due);
        println!(
            "\nOverall: billed {} | paid {} | due {}{}{}",
            format_money(grand_amount, &cfg.currency),
            format_money(grand_paid, &cfg.currency),
            due_color,
            format_money(grand_due, &cfg.currency),
            RESET
        );

        Ok(())
    }

    /// Breakdown of one agent's billed work by site or by month.
    ///
    /// Sites are listed biggest first; months run chronologically. The
    /// breakdown covers entries only, so no paid/due columns here.
    pub fn report(
        pool: &mut DbPool,
        cfg: &Config,
        agent_ident: &str,
        key: ReportKey,
        period: Option<&str>,
    ) -> AppResult<()> {
        let agent = require_agent(&pool.conn, agent_ident)?;
        let range = DateRange::parse(period)?;

        let entries = load_entries_for_agent(pool, agent.id)?;
        let visible: Vec<_> = entries
            .iter()
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect();

        if visible.is_empty() {
            info(format!("No entries for {}.", agent.name));
            return Ok(());
        }

        let (label, rows): (&str, Vec<(String, i64, i64)>) = match key {
            ReportKey::Site => {
                let mut rows: Vec<_> = group_by_site(&visible)
                    .into_iter()
                    .map(|(name, g)| (name, g.hours_milli, g.amount_cents))
                    .collect();
                rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
                ("SITE", rows)
            }
            ReportKey::Month => (
                "MONTH",
                group_by_month(&visible)
                    .into_iter()
                    .map(|(month, g)| (month, g.hours_milli, g.amount_cents))
                    .collect(),
            ),
        };

        println!("\n📊 Report for {} by {}:\n", agent.name, label.to_lowercase());

        let mut table = Table::new(vec![
            Column::left(label, 20),
            Column::right("HOURS", 8),
            Column::right("AMOUNT", 10),
        ]);

        let mut total_hours = 0;
        let mut total_amount = 0;
        for (name, hours, amount) in &rows {
            total_hours += hours;
            total_amount += amount;
            table.add_row(vec![
                name.clone(),
                format_hours(*hours),
                format_cents(*amount),
            ]);
        }
        print!("{}", table.render());

        println!(
            "\nTotal: {} h | {}",
            format_hours(total_hours),
            format_money(total_amount, &cfg.currency)
        );

        Ok(())
    }
}
