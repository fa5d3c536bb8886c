//! Location Resolver - Main application use case
//!
//! Picks one directory city as the session's selected location, preferring
//! the user's real position and otherwise falling back to the default city.

use crate::domain::entities::{City, SelectedLocation};
use crate::domain::errors::{LookupError, PositionError};
use crate::domain::ports::{
    CityDirectory, LocationSearch, PositionProvider, ReverseGeocoder, SelectionStore,
};
use crate::domain::services::CityMatcher;
use crate::domain::value_objects::{DefaultCity, MatchSource, PositionOptions};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Tunables for a resolver.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Options passed to the position provider; `timeout` is enforced here
    pub position_options: PositionOptions,
    /// Upper bound for each reverse geocode and search call
    pub lookup_timeout: Duration,
    /// Aliases identifying the default city
    pub default_city: DefaultCity,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            position_options: PositionOptions::default(),
            lookup_timeout: Duration::from_secs(10),
            default_city: DefaultCity::default(),
        }
    }
}

/// Result of one call into the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// A city was matched from the user's position
    Resolved { city: City, source: MatchSource },
    /// The default city was selected
    Fallback { city: City },
    /// An explicit, non-default selection was left untouched
    Kept,
    /// The city list is not loaded yet; nothing was attempted
    NotReady,
    /// Resolution already ran (or is running) for this session
    AlreadyAttempted,
}

impl ResolutionOutcome {
    /// The city written to the selection store, if any.
    pub fn selected(&self) -> Option<&City> {
        match self {
            Self::Resolved { city, .. } | Self::Fallback { city } => Some(city),
            _ => None,
        }
    }
}

/// Lifecycle of a resolver.
///
/// `Idle -> Attempting -> Done` and never back. The `Idle -> Attempting`
/// (or `Idle -> Done(Kept)`) transition is taken under the state lock before
/// any I/O, so at most one caller ever performs work.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverState {
    Idle,
    Attempting,
    Done(ResolutionOutcome),
}

/// Location resolver - main application use case.
///
/// One instance serves one session. It orchestrates:
/// 1. The position provider (optional; absent means no geolocation)
/// 2. The reverse geocoder
/// 3. Direct matching against the directory, then the location search
/// 4. The default-city fallback
///
/// and writes the result to the selection store exactly once.
pub struct LocationResolver {
    directory: Arc<dyn CityDirectory>,
    geocoder: Arc<dyn ReverseGeocoder>,
    search: Arc<dyn LocationSearch>,
    position: Option<Arc<dyn PositionProvider>>,
    store: Arc<dyn SelectionStore>,
    settings: ResolverSettings,
    state: Mutex<ResolverState>,
}

impl LocationResolver {
    /// Create a new resolver in the `Idle` state.
    pub fn new(
        directory: Arc<dyn CityDirectory>,
        geocoder: Arc<dyn ReverseGeocoder>,
        search: Arc<dyn LocationSearch>,
        position: Option<Arc<dyn PositionProvider>>,
        store: Arc<dyn SelectionStore>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            directory,
            geocoder,
            search,
            position,
            store,
            settings,
            state: Mutex::new(ResolverState::Idle),
        }
    }

    /// Load the city list and current selection, then resolve.
    ///
    /// A directory failure leaves the resolver `Idle` so a later call can
    /// still run once the backend is reachable.
    pub async fn run(&self) -> ResolutionOutcome {
        if self.geo_attempted() {
            return ResolutionOutcome::AlreadyAttempted;
        }

        let cities = match self.directory.list().await {
            Ok(cities) => cities,
            Err(e) => {
                tracing::error!("failed to load city directory: {}", e);
                return ResolutionOutcome::NotReady;
            }
        };

        let current = self.store.get().await;
        self.resolve_location(&cities, current.as_ref()).await
    }

    /// Resolve the selected city for this session.
    ///
    /// Safe to call on every change of its inputs: only the first call
    /// with a non-empty city list does anything. Never fails; every
    /// collaborator error degrades to the default-city fallback.
    ///
    /// # Arguments
    /// * `cities` - The full directory, in list order
    /// * `current` - The session's current selection, if any
    pub async fn resolve_location(
        &self,
        cities: &[City],
        current: Option<&SelectedLocation>,
    ) -> ResolutionOutcome {
        // Non-empty directory always yields a default
        let Some(default) = CityMatcher::default_city(cities, &self.settings.default_city) else {
            tracing::debug!("city directory empty, deferring location resolution");
            return ResolutionOutcome::NotReady;
        };

        {
            let mut state = self.state.lock();
            if *state != ResolverState::Idle {
                return ResolutionOutcome::AlreadyAttempted;
            }

            if let Some(selection) = current {
                if !CityMatcher::is_default_selection(selection, &self.settings.default_city) {
                    tracing::debug!(
                        "keeping explicit selection {} ({})",
                        selection.name(),
                        selection.id()
                    );
                    *state = ResolverState::Done(ResolutionOutcome::Kept);
                    return ResolutionOutcome::Kept;
                }
            }

            *state = ResolverState::Attempting;
        }

        let mut guard = AttemptGuard {
            state: &self.state,
            store: self.store.clone(),
            pending: Some(ResolutionOutcome::Fallback {
                city: default.clone(),
            }),
        };

        let outcome = match self.locate(cities).await {
            Some((city, source)) => ResolutionOutcome::Resolved { city, source },
            None => ResolutionOutcome::Fallback {
                city: default.clone(),
            },
        };

        guard.pending = Some(outcome.clone());

        if let Some(city) = outcome.selected() {
            if let Err(e) = self.store.set(SelectedLocation::from(city.clone())).await {
                tracing::error!("failed to store selected location {}: {}", city.id, e);
            }
        }
        guard.disarm();

        match &outcome {
            ResolutionOutcome::Resolved { city, source } => {
                tracing::info!("resolved location to {} ({}) via {}", city.name, city.id, source)
            }
            ResolutionOutcome::Fallback { city } => {
                tracing::info!("using default location {} ({})", city.name, city.id)
            }
            _ => {}
        }

        *self.state.lock() = ResolverState::Done(outcome.clone());
        outcome
    }

    /// Find the user's city from their position. `None` means fall back.
    async fn locate(&self, cities: &[City]) -> Option<(City, MatchSource)> {
        let Some(provider) = &self.position else {
            tracing::debug!("geolocation not available");
            return None;
        };

        let options = &self.settings.position_options;
        let coords = match tokio::time::timeout(options.timeout, provider.current_position(options))
            .await
            .unwrap_or(Err(PositionError::Timeout))
        {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!("geolocation failed: {}", e);
                return None;
            }
        };

        let address = match self.bounded(self.geocoder.reverse(coords)).await {
            Ok(address) => address,
            Err(e) => {
                tracing::error!(
                    "reverse geocoding failed for ({}, {}): {}",
                    coords.latitude,
                    coords.longitude,
                    e
                );
                return None;
            }
        };

        let candidates = CityMatcher::candidate_names(&address);
        if candidates.is_empty() {
            tracing::debug!("geocoded address has no place names");
            return None;
        }

        if let Some((city, source)) = CityMatcher::match_candidates(cities, &candidates) {
            return Some((city.clone(), source));
        }

        for name in &candidates {
            match self.bounded(self.search.search(name)).await {
                Ok(results) => {
                    if let Some(found) = CityMatcher::city_from_search(cities, &results) {
                        return Some(found);
                    }
                }
                Err(e) => tracing::warn!("location search for {:?} failed: {}", name, e),
            }
        }

        tracing::debug!("no city matched {:?}", candidates);
        None
    }

    /// Run a lookup under `lookup_timeout`.
    async fn bounded<T, F>(&self, lookup: F) -> Result<T, LookupError>
    where
        F: Future<Output = Result<T, LookupError>>,
    {
        let limit = self.settings.lookup_timeout;
        tokio::time::timeout(limit, lookup)
            .await
            .unwrap_or(Err(LookupError::Timeout(limit)))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ResolverState {
        self.state.lock().clone()
    }

    /// Whether resolution has been tried (or skipped) for this session.
    pub fn geo_attempted(&self) -> bool {
        *self.state.lock() != ResolverState::Idle
    }

    /// Whether a resolution is in flight.
    pub fn geo_loading(&self) -> bool {
        *self.state.lock() == ResolverState::Attempting
    }

    /// Settings this resolver was built with.
    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }
}

/// Ends an in-flight attempt whose future is dropped before completing.
///
/// The state moves to `Done` with the pending outcome (the default city
/// until a match is found) and its city is written from a detached task,
/// so the session is never left `Attempting`.
struct AttemptGuard<'a> {
    state: &'a Mutex<ResolverState>,
    store: Arc<dyn SelectionStore>,
    pending: Option<ResolutionOutcome>,
}

impl AttemptGuard<'_> {
    fn disarm(&mut self) {
        self.pending = None;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        let Some(outcome) = self.pending.take() else {
            return;
        };
        let city = outcome.selected().cloned();
        *self.state.lock() = ResolverState::Done(outcome);

        let Some(city) = city else {
            return;
        };
        tracing::warn!(
            "location resolution cancelled, storing {} ({})",
            city.name,
            city.id
        );

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = self.store.clone();
                handle.spawn(async move {
                    if let Err(e) = store.set(SelectedLocation::from(city.clone())).await {
                        tracing::error!("failed to store selected location {}: {}", city.id, e);
                    }
                });
            }
            Err(_) => tracing::error!("no runtime to store selected location {}", city.id),
        }
    }
}
