pub mod engine;
pub mod forecast;
pub mod policy;
pub mod trip;
