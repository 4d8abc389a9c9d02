//! Programmer salary statistics from HeadHunter and SuperJob vacancies.

pub mod boards;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod posting;
pub mod report;
pub mod retry;
pub mod salary;
pub mod stats;
