pub mod config;
pub mod error;
pub mod importer;
pub mod result_assembler;
pub mod sampler;
pub mod service;
pub mod sql_server;
pub mod structs;
pub mod traits;

#[cfg(test)]
mod test_support;
