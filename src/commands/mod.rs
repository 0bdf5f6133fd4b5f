pub mod build;
pub mod config;
pub mod new;
pub mod publish;
pub mod serve;
