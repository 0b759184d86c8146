mod configuration;
pub mod startup;

pub use configuration::*;
