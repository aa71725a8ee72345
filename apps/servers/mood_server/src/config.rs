use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log filter directives
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,

	/// Server host
	#[arg(long, env = "HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Server port
	#[arg(long, env = "PORT", default_value = "8080")]
	pub port: u16,

	/// Comma separated origins allowed by CORS, `*` for any
	#[arg(long, env = "ALLOWED_ORIGINS", default_value = "http://localhost:5173")]
	pub allowed_origins: String,

	/// Max request body size in KiB
	#[arg(long, env = "MAX_REQUEST_SIZE", default_value = "256")]
	pub max_request_size: usize,

	/// Per request timeout in milliseconds
	#[arg(long, env = "TASK_TIMEOUT_MS", default_value = "10000")]
	pub task_timeout_ms: u64,

	/// Max requests handled at once
	#[arg(long, env = "MAX_CONCURRENT_REQ", default_value = "256")]
	pub max_concurrent_req: usize,

	/// Observations needed before a forecast is attempted
	#[arg(long, env = "MIN_HISTORY", default_value_t = mood_engine::MIN_HISTORY)]
	pub min_history: usize,

	/// Probe a running server's health endpoint and exit
	#[arg(long, env = "HEALTH_CHECK")]
	pub health_check: bool,
}

impl Config {
	#[must_use]
	pub fn origins(&self) -> Vec<&str> {
		self.allowed_origins.split(',').map(str::trim).filter(|origin| !origin.is_empty()).collect()
	}

	#[must_use]
	pub fn bind_addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}
