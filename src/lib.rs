// src/lib.rs — Library root for interview-coach

pub mod cli;
pub mod infra;
pub mod interview;
pub mod memory;
pub mod provider;
pub mod session;
pub mod voice;
