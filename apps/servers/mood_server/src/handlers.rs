pub mod analyze;
pub mod forecast;
pub mod health;
pub mod timeline;
