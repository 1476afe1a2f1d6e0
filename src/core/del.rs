use crate::db::log::cllog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_entry, delete_payment, find_entry, find_payment};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::money::format_cents;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn entry(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let entry = find_entry(&pool.conn, id)?.ok_or(AppError::EntryNotFound(id))?;

        delete_entry(&pool.conn, id)?;
        cllog(
            &pool.conn,
            "del",
            &format!("entry {}", id),
            &format!(
                "Deleted entry {} ({} on {})",
                id,
                format_cents(entry.amount_cents),
                entry.date_str()
            ),
        )?;

        info(format!(
            "Deleted entry #{} ({} on {}).",
            id,
            format_cents(entry.amount_cents),
            entry.date_str()
        ));

        if entry.paid_cents > 0 {
            info(format!(
                "The {} already paid on it stays on the payment records.",
                format_cents(entry.paid_cents)
            ));
        }

        Ok(())
    }

    /// Delete a payment record. The per-entry settlement it produced is
    /// left as it stands: payments are ledger facts, not undo-able
    /// transfers.
    pub fn payment(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let payment = find_payment(&pool.conn, id)?.ok_or(AppError::PaymentNotFound(id))?;

        delete_payment(&pool.conn, id)?;
        cllog(
            &pool.conn,
            "del",
            &format!("payment {}", id),
            &format!(
                "Deleted payment {} ({} on {})",
                id,
                format_cents(payment.amount_cents),
                payment.date_str()
            ),
        )?;

        info(format!(
            "Deleted payment #{} ({} on {}).",
            id,
            format_cents(payment.amount_cents),
            payment.date_str()
        ));
        info("Per-entry paid amounts were not changed.");

        Ok(())
    }
}
