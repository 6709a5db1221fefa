pub mod dynasty_access;
