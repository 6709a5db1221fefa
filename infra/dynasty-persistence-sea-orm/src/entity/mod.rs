pub mod account;
pub mod coach;
pub mod dynasty;
pub mod dynasty_access;
