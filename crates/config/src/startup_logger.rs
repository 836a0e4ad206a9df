//! Service startup logging for CancerRAG

use crate::Settings;
use std::env;
use tracing::{debug, info};

/// Logs service, platform and configured sources at startup
pub fn log_service_info(settings: &Settings) {
	// Root package name, not this crate's
	let service_name = "cancerrag";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== CancerRAG Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🧠 Completion: {} at {}",
		settings.completion.model, settings.completion.endpoint
	);
	info!("🔑 API key from {}", settings.completion.api_key.description());
	info!(
		"📚 Sources: oncokb={} civic={} clinical_trials={}",
		settings.sources.oncokb.endpoint,
		settings.sources.civic.endpoint,
		settings.sources.clinical_trials.endpoint
	);
	debug!(
		"Source timeouts (ms): oncokb={} civic={} clinical_trials={}",
		settings.sources.oncokb.timeout_ms,
		settings.sources.civic.timeout_ms,
		settings.sources.clinical_trials.timeout_ms
	);

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 CancerRAG Finished");
	info!(
		"🕒 Finished at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
