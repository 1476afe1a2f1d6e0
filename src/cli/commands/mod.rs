pub mod add;
pub mod agent;
pub mod backup;
pub mod balance;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod pay;
pub mod report;
pub mod site;
