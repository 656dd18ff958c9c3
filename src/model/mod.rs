pub mod conditions;
pub mod env;
pub mod results;
pub mod scenarios;
