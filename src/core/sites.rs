use crate::db::log::cllog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_site_entries, delete_site, find_site, insert_site, load_sites, require_site,
};
use crate::errors::{AppError, AppResult};
use crate::models::site::Site;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Column, Table};

/// High-level business logic for the `site` subcommands.
pub struct SiteLogic;

impl SiteLogic {
    pub fn add(pool: &mut DbPool, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("site name cannot be empty".into()));
        }
        if find_site(&pool.conn, name)?.is_some() {
            return Err(AppError::Other(format!("site '{}' already exists", name)));
        }

        let mut site = Site::new(0, name);
        site.id = insert_site(&pool.conn, &site)?;

        cllog(
            &pool.conn,
            "site",
            &format!("site {}", site.id),
            &format!("Added site {}", site.name),
        )?;

        success(format!("Added site #{} '{}'.", site.id, site.name));
        Ok(())
    }

    pub fn list(pool: &mut DbPool) -> AppResult<()> {
        let sites = load_sites(pool)?;

        if sites.is_empty() {
            info("No sites registered yet.");
            return Ok(());
        }

        let mut table = Table::new(vec![Column::right("ID", 4), Column::left("NAME", 30)]);
        for s in &sites {
            table.add_row(vec![s.id.to_string(), s.name.clone()]);
        }
        print!("{}", table.render());
        Ok(())
    }

    /// Remove a site no entry points at. Deleting one that is still
    /// referenced is refused so past entries keep their site name.
    pub fn del(pool: &mut DbPool, ident: &str) -> AppResult<()> {
        let site = require_site(&pool.conn, ident)?;

        let entries = count_site_entries(&pool.conn, site.id)?;
        if entries > 0 {
            warning(format!(
                "Site '{}' is still referenced by {} entries. Reassign or delete those first.",
                site.name, entries
            ));
            return Ok(());
        }

        delete_site(&pool.conn, site.id)?;
        cllog(
            &pool.conn,
            "site",
            &format!("site {}", site.id),
            &format!("Deleted site {}", site.name),
        )?;

        info(format!("Deleted site '{}'.", site.name));
        Ok(())
    }
}
