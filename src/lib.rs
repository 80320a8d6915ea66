pub mod config;
pub mod db;
pub mod error;
pub mod introspect;
pub mod logging;
pub mod naming;
pub mod registry;
pub mod schema;
