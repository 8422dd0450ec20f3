//! ip-geo-batch - Batch IP geolocation web utility
//!
//! This is the composition root that wires together all the components.

use ip_geo_batch::adapters::inbound::ApiServer;
use ip_geo_batch::adapters::outbound::IpApiLookup;
use ip_geo_batch::application::LookupService;
use ip_geo_batch::config::load_config;
use ip_geo_batch::infrastructure::shutdown_signal;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let limits = cfg.pipeline_limits();
    tracing::info!(
        "starting ip-geo-batch listen={} upstream={} max_addresses={} batch_size={} batch_delay={:?}",
        cfg.listen_addr,
        cfg.upstream_url,
        limits.max_addresses,
        limits.batch_size,
        limits.batch_delay
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapter
    let lookup = Arc::new(IpApiLookup::new(cfg.upstream_url.clone(), cfg.upstream_timeout())?);

    // 2. Application service
    let service = LookupService::new(lookup, limits);

    // 3. Inbound adapter
    let server = ApiServer::new(cfg.listen_addr.clone(), service)
        .with_body_limit(cfg.body_limit_bytes)
        .with_cors(cfg.cors_enabled);

    tokio::spawn(shutdown_signal(server.shutdown_handle()));

    server.run().await
}
