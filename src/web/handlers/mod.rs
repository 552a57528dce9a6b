pub mod analyze;
pub mod auth;
pub mod dashboard;
pub mod dataset;
