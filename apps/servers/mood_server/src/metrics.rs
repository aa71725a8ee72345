pub mod http;
pub mod mood;

pub use http::{metrics_handler, metrics_middleware};
pub use mood::{record_classification, record_forecast};
