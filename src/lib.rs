pub mod audit;
pub mod bank;
pub mod config;
pub mod consts;
pub mod error;
pub mod narrative;
pub mod scorer;
pub mod session;
pub mod taxonomy;
