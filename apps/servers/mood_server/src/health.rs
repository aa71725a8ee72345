use crate::Config;
use anyhow::{bail, Result};
use std::time::Duration;

/// Probes `/health` on the configured address of a running server.
pub async fn perform_health_check(config: &Config) -> Result<()> {
	let url = format!("http://{}/health", config.bind_addr());

	let response = reqwest::Client::new().get(&url).timeout(Duration::from_secs(10)).send().await?;
	if !response.status().is_success() {
		bail!("health check failed: HTTP {}", response.status());
	}

	println!("Health check passed");
	Ok(())
}
