use crate::core::allocate::allocate;
use crate::core::ledger::{DateRange, compute_totals};
use crate::db::log::cllog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    insert_payment, load_entries_for_agent, load_payments_for_agent, require_agent,
    update_entry_paid,
};
use crate::errors::{AppError, AppResult};
use crate::models::payment::Payment;
use crate::ui::messages::{info, success, warning};
use crate::utils::money::{format_cents, format_money};
use chrono::NaiveDate;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// High-level business logic for the `pay` command.
pub struct PayLogic;

impl PayLogic {
    /// Record a payment and spread it across the agent's unsettled
    /// entries, oldest first.
    ///
    /// The payment row and every per-entry update are committed in one
    /// transaction. A payment larger than the outstanding balance is
    /// accepted after confirmation (`force` skips the prompt); the excess
    /// stays on the payment record and keeps counting toward the agent's
    /// paid total.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &crate::config::Config,
        agent_ident: &str,
        amount_cents: i64,
        date: NaiveDate,
        note: Option<&str>,
        force: bool,
    ) -> AppResult<()> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "payment amount must be greater than zero".into(),
            ));
        }

        let agent = require_agent(&pool.conn, agent_ident)?;

        let entries = load_entries_for_agent(pool, agent.id)?;
        let payments = load_payments_for_agent(pool, agent.id)?;
        let totals = compute_totals(&entries, &payments, &DateRange::all());

        let cur = cfg.currency.as_str();

        // ------------------------------------------------
        // 1️⃣ Overpayment guard
        // ------------------------------------------------
        if amount_cents > totals.due_cents && !force {
            let prompt = format!(
                "Payment of {} exceeds the outstanding balance of {} for {}. Record it anyway?",
                format_money(amount_cents, cur),
                format_money(totals.due_cents, cur),
                agent.name
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        // ------------------------------------------------
        // 2️⃣ Allocate oldest-first, then persist atomically
        // ------------------------------------------------
        let allocation = allocate(amount_cents, &entries);

        let payment = Payment::new(agent.id, date, amount_cents, note.unwrap_or(""));

        let payment_id;
        {
            let tx = pool.conn.transaction()?;

            payment_id = insert_payment(&tx, &payment)?;
            for delta in &allocation.deltas {
                update_entry_paid(&tx, delta.entry_id, delta.new_paid_cents)?;
            }

            cllog(
                &tx,
                "pay",
                &format!("payment {}", payment_id),
                &format!(
                    "Payment of {} for agent {} ({} entries touched, {} unallocated)",
                    format_money(amount_cents, cur),
                    agent.name,
                    allocation.deltas.len(),
                    format_money(allocation.unallocated_cents, cur)
                ),
            )?;

            tx.commit()?;
        }

        // ------------------------------------------------
        // 3️⃣ Report what the money covered
        // ------------------------------------------------
        // Detail lines stay symbol-free; the headline below carries the
        // configured currency.
        for delta in &allocation.deltas {
            let entry = entries.iter().find(|e| e.id == delta.entry_id);
            let (date_label, amount) = match entry {
                Some(e) => (e.date_str(), e.amount_cents),
                None => (String::new(), delta.new_paid_cents),
            };

            if delta.new_paid_cents >= amount {
                info(format!(
                    "  entry #{} ({}): +{} → settled",
                    delta.entry_id,
                    date_label,
                    format_cents(delta.applied_cents)
                ));
            } else {
                info(format!(
                    "  entry #{} ({}): +{} → {} of {} paid",
                    delta.entry_id,
                    date_label,
                    format_cents(delta.applied_cents),
                    format_cents(delta.new_paid_cents),
                    format_cents(amount)
                ));
            }
        }

        if allocation.unallocated_cents > 0 {
            warning(format!(
                "{} could not be applied to any entry; it still counts toward {}'s paid total.",
                format_money(allocation.unallocated_cents, cur),
                agent.name
            ));
        }

        success(format!(
            "💶 Recorded payment #{} of {} for {}.",
            payment_id,
            format_money(amount_cents, cur),
            agent.name
        ));

        Ok(())
    }
}
