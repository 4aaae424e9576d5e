pub mod client;
pub mod client_error;
pub mod config;
pub mod grouping;
pub mod model;
pub mod reminder;
pub mod settings;
pub mod store;
