pub mod add;
pub mod agents;
pub mod allocate;
pub mod backup;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod groups;
pub mod ledger;
pub mod list;
pub mod log;
pub mod pay;
pub mod report;
pub mod sites;
