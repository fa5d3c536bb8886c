//! city-resolver - resolves the selected city once and prints it
//!
//! This is the composition root that wires together all the components.

use city_resolver::adapters::outbound::{
    build_client, FileSelectionStore, HttpCityDirectory, HttpLocationSearch,
    MaxMindPositionProvider, NominatimReverseGeocoder, StaticPositionProvider,
};
use city_resolver::config::{load_config, Config};
use city_resolver::domain::ports::{PositionProvider, SelectionStore};
use city_resolver::{LocationResolver, ResolutionOutcome};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;
    cfg.validate()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "starting city-resolver api={} geocoder={}",
        cfg.api_base_url,
        cfg.geocoder_url
    );

    // ===== COMPOSITION ROOT =====

    // 1. Create outbound adapters
    let client = build_client(&cfg.user_agent, cfg.lookup_timeout())?;

    let directory = Arc::new(HttpCityDirectory::new(&cfg.api_base_url, client.clone()));
    let geocoder = Arc::new(NominatimReverseGeocoder::new(&cfg.geocoder_url, client.clone()));
    let search = Arc::new(HttpLocationSearch::new(&cfg.api_base_url, client.clone()));
    let position = position_provider(&cfg, client);
    let store = Arc::new(FileSelectionStore::open(&cfg.selection_path).await);

    // 2. Create application service
    let resolver = LocationResolver::new(
        directory,
        geocoder,
        search,
        position,
        store.clone(),
        cfg.resolver_settings(),
    );

    let settings = resolver.settings();
    tracing::debug!(
        "position timeout {:?}, lookup timeout {:?}",
        settings.position_options.timeout,
        settings.lookup_timeout
    );

    // 3. Run once and report
    let outcome = resolver.run().await;
    match &outcome {
        ResolutionOutcome::NotReady => {
            anyhow::bail!("city directory unavailable at {}", cfg.api_base_url)
        }
        ResolutionOutcome::Kept => {
            tracing::info!("keeping stored selection from {}", store.path().display())
        }
        _ => {}
    }

    if let Some(selected) = store.get().await {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    }

    Ok(())
}

/// Pick the position source: fixed coordinates, then the GeoIP database,
/// otherwise none.
fn position_provider(cfg: &Config, client: reqwest::Client) -> Option<Arc<dyn PositionProvider>> {
    if let Some(coords) = cfg.static_coordinates() {
        tracing::info!(
            "using fixed position {},{}",
            coords.latitude,
            coords.longitude
        );
        return Some(Arc::new(StaticPositionProvider::new(coords)) as Arc<dyn PositionProvider>);
    }

    let path = cfg.geoip_path.as_ref()?;
    match MaxMindPositionProvider::from_file(path, &cfg.public_ip_url, client) {
        Ok(p) => {
            tracing::info!("GeoIP DB loaded from {}", path);
            Some(Arc::new(p) as Arc<dyn PositionProvider>)
        }
        Err(e) => {
            tracing::error!("failed to load GeoIP DB from {}: {:?}", path, e);
            None
        }
    }
}
