pub mod activity;
pub mod case_id;
mod columns;
pub mod error;
pub mod event_log;
pub mod ingestion;
pub mod outcomes;
pub mod outputs;
pub mod pipelines;
pub mod scope;
pub mod temporal;
pub mod validation;
