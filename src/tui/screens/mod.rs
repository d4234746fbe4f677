pub mod dashboard;
pub mod results;
pub mod settings;
pub mod statistics;
