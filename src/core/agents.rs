use crate::config::Config;
use crate::db::log::cllog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_agent_records, delete_agent, find_agent, insert_agent, load_agents, require_agent,
    update_agent_name, update_agent_rate,
};
use crate::errors::{AppError, AppResult};
use crate::models::agent::Agent;
use crate::ui::messages::{info, success, warning};
use crate::utils::money::{format_cents, format_money};
use crate::utils::table::{Column, Table};

/// High-level business logic for the `agent` subcommands.
pub struct AgentLogic;

impl AgentLogic {
    pub fn add(pool: &mut DbPool, cfg: &Config, name: &str, rate_cents: Option<i64>) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("agent name cannot be empty".into()));
        }
        if find_agent(&pool.conn, name)?.is_some() {
            return Err(AppError::Other(format!("agent '{}' already exists", name)));
        }

        let rate = match rate_cents {
            Some(r) if r >= 0 => r,
            Some(r) => return Err(AppError::InvalidRate(format_cents(r))),
            None => cfg.default_rate_cents()?,
        };

        let mut agent = Agent::new(0, name, rate);
        agent.id = insert_agent(&pool.conn, &agent)?;

        cllog(
            &pool.conn,
            "agent",
            &format!("agent {}", agent.id),
            &format!("Added agent {} at {}/h", agent.name, format_cents(rate)),
        )?;

        success(format!(
            "Added agent #{} '{}' at {}/h.",
            agent.id,
            agent.name,
            format_money(rate, &cfg.currency)
        ));
        Ok(())
    }

    pub fn list(pool: &mut DbPool, cfg: &Config) -> AppResult<()> {
        let agents = load_agents(pool)?;

        if agents.is_empty() {
            info("No agents registered yet. Use 'agent add <name>' first.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("ID", 4),
            Column::left("NAME", 24),
            Column::right("RATE/H", 10),
        ]);
        for a in &agents {
            table.add_row(vec![
                a.id.to_string(),
                a.name.clone(),
                format_money(a.rate_cents, &cfg.currency),
            ]);
        }
        print!("{}", table.render());
        Ok(())
    }

    /// Entries and payments reference the agent id, so history and
    /// balances follow the new name.
    pub fn rename(pool: &mut DbPool, ident: &str, new_name: &str) -> AppResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::Other("agent name cannot be empty".into()));
        }

        let agent = require_agent(&pool.conn, ident)?;
        if let Some(existing) = find_agent(&pool.conn, new_name)?
            && existing.id != agent.id
        {
            return Err(AppError::Other(format!(
                "agent '{}' already exists",
                new_name
            )));
        }

        update_agent_name(&pool.conn, agent.id, new_name)?;

        cllog(
            &pool.conn,
            "agent",
            &format!("agent {}", agent.id),
            &format!("Renamed agent {} → {}", agent.name, new_name),
        )?;

        success(format!("Renamed agent '{}' to '{}'.", agent.name, new_name));
        Ok(())
    }

    /// Change the default hourly rate for NEW entries. Rates already
    /// captured on existing entries are left untouched.
    pub fn rate(pool: &mut DbPool, cfg: &Config, ident: &str, rate_cents: i64) -> AppResult<()> {
        if rate_cents < 0 {
            return Err(AppError::InvalidRate(format_cents(rate_cents)));
        }

        let agent = require_agent(&pool.conn, ident)?;
        update_agent_rate(&pool.conn, agent.id, rate_cents)?;

        cllog(
            &pool.conn,
            "agent",
            &format!("agent {}", agent.id),
            &format!(
                "Rate for {} changed {} → {}",
                agent.name,
                format_cents(agent.rate_cents),
                format_cents(rate_cents)
            ),
        )?;

        success(format!(
            "Rate for '{}' is now {}/h.",
            agent.name,
            format_money(rate_cents, &cfg.currency)
        ));
        info("Existing entries keep the rate they were recorded with.");
        Ok(())
    }

    /// Remove an agent with no remaining ledger rows. Deleting one that
    /// still has entries or payments is refused instead of cascading.
    pub fn del(pool: &mut DbPool, ident: &str) -> AppResult<()> {
        let agent = require_agent(&pool.conn, ident)?;

        let (entries, payments) = count_agent_records(&pool.conn, agent.id)?;
        if entries > 0 || payments > 0 {
            warning(format!(
                "Agent '{}' still has {} entries and {} payments. Delete those first.",
                agent.name, entries, payments
            ));
            return Ok(());
        }

        delete_agent(&pool.conn, agent.id)?;
        cllog(
            &pool.conn,
            "agent",
            &format!("agent {}", agent.id),
            &format!("Deleted agent {}", agent.name),
        )?;

        info(format!("Deleted agent '{}'.", agent.name));
        Ok(())
    }
}
