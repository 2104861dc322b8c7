pub mod assembler;
pub mod batch;
pub mod config;
pub mod operation;
pub mod path;
