pub mod run;
pub mod schedule;
pub mod settings;
