pub mod agent;
pub mod entry;
pub mod payment;
pub mod site;
