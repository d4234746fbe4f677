pub mod chart;
pub mod header;
pub mod help;
pub mod logs;
pub mod progress;
pub mod results_table;
pub mod stats;
