use mailauth_api::AppState;
use mailauth_application::ports::DnsResolver;
use mailauth_domain::Config;
use mailauth_infrastructure::dns::HickoryDnsResolver;
use std::sync::Arc;
use tracing::info;

/// Wires the resolver into the use cases the API and the CLI share.
pub fn build_app_state(config: &Config) -> anyhow::Result<AppState> {
    let resolver = HickoryDnsResolver::from_config(&config.dns)?;

    info!(
        upstreams = resolver.upstreams().len(),
        timeout_ms = config.dns.query_timeout,
        tcp_fallback = config.dns.tcp_fallback,
        "DNS resolver ready"
    );

    let resolver: Arc<dyn DnsResolver> = Arc::new(resolver);
    Ok(AppState::new(resolver, &config.mail_service))
}
