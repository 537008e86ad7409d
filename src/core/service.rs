//! The data provider: single point of truth for the dataset and its load state

use crate::core::model::{Country, Snapshot};
use crate::core::observable::Observable;
use crate::core::source::{DataSource, LoadError};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, instrument, warn};

type PendingLoad = Shared<BoxFuture<'static, Result<Snapshot, LoadError>>>;

struct Inner {
    source: Arc<dyn DataSource>,
    olympics: Observable<Option<Snapshot>>,
    loading: Observable<bool>,
    error: Observable<Option<String>>,
    // At most one fetch runs at a time; later callers join it.
    in_flight: Mutex<Option<PendingLoad>>,
}

/// Loads the dataset from a [`DataSource`] and publishes it to any number of
/// consumers. Clones share the same state.
#[derive(Clone)]
pub struct OlympicService {
    inner: Arc<Inner>,
}

impl OlympicService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                olympics: Observable::new(None),
                loading: Observable::new(false),
                error: Observable::new(None),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Fetches the dataset and publishes it.
    ///
    /// On failure the previous snapshot (if any) stays published, the error
    /// message is stored for [`OlympicService::get_error`] and returned. Calling
    /// again after a failure makes a fresh attempt. Calls made while a load
    /// is still running wait for that load instead of fetching again.
    pub async fn load_initial_data(&self) -> Result<Snapshot, LoadError> {
        let pending = {
            let mut in_flight = self.inner.in_flight.lock().await;
            match in_flight.as_ref() {
                Some(pending) => {
                    debug!("Joining in-flight dataset load");
                    pending.clone()
                }
                None => {
                    let inner = Arc::clone(&self.inner);
                    let pending = inner.fetch_and_publish().boxed().shared();
                    *in_flight = Some(pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    /// Latest published dataset, `None` before the first successful load.
    pub fn get_snapshot(&self) -> Option<Snapshot> {
        self.inner.olympics.get()
    }

    pub fn subscribe_snapshot(&self) -> watch::Receiver<Option<Snapshot>> {
        self.inner.olympics.subscribe()
    }

    /// Looks up a country by name, loading the dataset first if nothing has
    /// been published yet.
    ///
    /// The name may be percent-encoded and is matched case-insensitively.
    /// Load failures and undecodable names resolve to `None`.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Option<Country> {
        let snapshot = match self.get_snapshot() {
            Some(snapshot) => snapshot,
            None => match self.load_initial_data().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    debug!(error = %e, "Dataset unavailable, lookup abandoned");
                    return None;
                }
            },
        };

        let wanted = match urlencoding::decode(name) {
            Ok(decoded) => decoded.to_lowercase(),
            Err(e) => {
                warn!(error = %e, "Country name is not valid percent-encoded UTF-8");
                return None;
            }
        };

        let found = snapshot
            .iter()
            .find(|c| c.country.to_lowercase() == wanted)
            .cloned();
        if found.is_none() {
            debug!("No country named {wanted}");
        }
        found
    }

    pub fn is_loading(&self) -> watch::Receiver<bool> {
        self.inner.loading.subscribe()
    }

    pub fn get_error(&self) -> watch::Receiver<Option<String>> {
        self.inner.error.subscribe()
    }

    pub fn loading_now(&self) -> bool {
        self.inner.loading.get()
    }

    pub fn current_error(&self) -> Option<String> {
        self.inner.error.get()
    }
}

impl Inner {
    async fn fetch_and_publish(self: Arc<Self>) -> Result<Snapshot, LoadError> {
        self.loading.set(true);
        let source = self.source.describe();
        info!("Loading Olympic data from {source}");

        let outcome = match self.source.fetch().await {
            Ok(countries) => {
                let snapshot: Snapshot = Arc::new(countries);
                debug!(countries = snapshot.len(), "Dataset loaded");
                self.olympics.set(Some(Arc::clone(&snapshot)));
                self.loading.set(false);
                self.error.set(None);
                Ok(snapshot)
            }
            Err(e) => {
                self.loading.set(false);
                let message = e.to_string();
                error!(source = %source, "Error loading Olympic data: {message}");
                self.error.set(Some(message));
                Err(e)
            }
        };

        *self.in_flight.lock().await = None;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Participation;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct MockSource {
        call_count: AtomicUsize,
        responses: std::sync::Mutex<VecDeque<Result<Vec<Country>, LoadError>>>,
        delay: Option<Duration>,
    }

    impl MockSource {
        fn new(responses: Vec<Result<Vec<Country>, LoadError>>) -> Arc<Self> {
            Arc::new(Self {
                call_count: AtomicUsize::new(0),
                responses: std::sync::Mutex::new(responses.into()),
                delay: None,
            })
        }

        fn delayed(responses: Vec<Result<Vec<Country>, LoadError>>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                call_count: AtomicUsize::new(0),
                responses: std::sync::Mutex::new(responses.into()),
                delay: Some(delay),
            })
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DataSource for MockSource {
        async fn fetch(&self) -> Result<Vec<Country>, LoadError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LoadError::client("no more responses")))
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    fn dataset() -> Vec<Country> {
        vec![
            Country {
                id: Some(1),
                country: "Italy".to_string(),
                participations: vec![Participation {
                    id: 1,
                    year: 2012,
                    city: "Londres".to_string(),
                    medals_count: 28,
                    athlete_count: 372,
                }],
            },
            Country {
                id: Some(2),
                country: "France".to_string(),
                participations: vec![Participation {
                    id: 2,
                    year: 2016,
                    city: "Rio de Janeiro".to_string(),
                    medals_count: 42,
                    athlete_count: 401,
                }],
            },
        ]
    }

    #[tokio::test]
    async fn test_snapshot_absent_before_load() {
        let service = OlympicService::new(MockSource::new(vec![]));
        assert!(service.get_snapshot().is_none());
        assert!(!service.loading_now());
        assert!(service.current_error().is_none());
    }

    #[tokio::test]
    async fn test_load_success_publishes_dataset_and_clears_error() {
        let source = MockSource::new(vec![
            Err(LoadError::server(500, "Internal Server Error")),
            Ok(dataset()),
        ]);
        let service = OlympicService::new(source.clone());

        assert!(service.load_initial_data().await.is_err());
        assert!(service.current_error().is_some());

        let snapshot = service.load_initial_data().await.unwrap();
        assert_eq!(*snapshot, dataset());
        assert_eq!(service.get_snapshot().as_deref(), Some(&dataset()));
        assert!(service.current_error().is_none());
        assert!(!service.loading_now());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_snapshot() {
        let source = MockSource::new(vec![
            Ok(dataset()),
            Err(LoadError::client("connection refused")),
        ]);
        let service = OlympicService::new(source);

        service.load_initial_data().await.unwrap();
        let err = service.load_initial_data().await.unwrap_err();

        assert_eq!(err, LoadError::client("connection refused"));
        assert_eq!(service.get_snapshot().as_deref(), Some(&dataset()));
        assert_eq!(
            service.current_error().as_deref(),
            Some("Client-side error: connection refused")
        );
        assert!(!service.loading_now());
    }

    #[tokio::test]
    async fn test_load_failure_without_snapshot() {
        let service = OlympicService::new(MockSource::new(vec![Err(LoadError::server(
            404, "Not Found",
        ))]));

        assert!(service.load_initial_data().await.is_err());
        assert!(service.get_snapshot().is_none());
        let error = service.current_error().unwrap();
        assert!(error.starts_with("Server-side error: 404"));
    }

    #[tokio::test]
    async fn test_subscribers_observe_published_snapshot() {
        let service = OlympicService::new(MockSource::new(vec![Ok(dataset())]));
        let mut early = service.subscribe_snapshot();
        assert!(early.borrow_and_update().is_none());

        service.load_initial_data().await.unwrap();

        assert!(early.has_changed().unwrap());
        assert_eq!(early.borrow_and_update().as_ref().map(|s| s.len()), Some(2));

        // A late subscriber gets the current value straight away
        let late = service.subscribe_snapshot();
        assert_eq!(late.borrow().as_ref().map(|s| s.len()), Some(2));
    }

    #[tokio::test]
    async fn test_loading_flag_toggles_during_fetch() {
        let source = MockSource::delayed(vec![Ok(dataset())], Duration::from_millis(50));
        let service = OlympicService::new(source);
        let mut loading = service.is_loading();
        assert!(!*loading.borrow_and_update());

        let background = service.clone();
        let handle = tokio::spawn(async move { background.load_initial_data().await });

        loading.wait_for(|l| *l).await.unwrap();
        loading.wait_for(|l| !*l).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_error_stream_reports_failure() {
        let service = OlympicService::new(MockSource::new(vec![Err(LoadError::client("offline"))]));
        let mut errors = service.get_error();
        assert!(errors.borrow_and_update().is_none());

        let _ = service.load_initial_data().await;

        errors.changed().await.unwrap();
        assert_eq!(
            errors.borrow().as_deref(),
            Some("Client-side error: offline")
        );
    }

    #[tokio::test]
    async fn test_find_by_name_is_case_insensitive_and_decodes() {
        let source = MockSource::new(vec![Ok(dataset())]);
        let service = OlympicService::new(source.clone());

        let lower = service.find_by_name("france").await.unwrap();
        let exact = service.find_by_name("France").await.unwrap();
        let encoded = service.find_by_name("Fr%61nce").await.unwrap();

        assert_eq!(lower.country, "France");
        assert_eq!(lower, exact);
        assert_eq!(exact, encoded);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_find_by_name_triggers_single_load() {
        let source = MockSource::new(vec![Ok(dataset())]);
        let service = OlympicService::new(source.clone());

        assert!(service.get_snapshot().is_none());
        let italy = service.find_by_name("ITALY").await;

        assert_eq!(italy.map(|c| c.country), Some("Italy".to_string()));
        assert_eq!(source.calls(), 1);
        assert!(service.get_snapshot().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_first_lookups_share_one_fetch() {
        let source = MockSource::delayed(vec![Ok(dataset())], Duration::from_millis(20));
        let service = OlympicService::new(source.clone());

        let (italy, france, again) = tokio::join!(
            service.find_by_name("italy"),
            service.find_by_name("france"),
            service.load_initial_data(),
        );

        assert!(italy.is_some());
        assert!(france.is_some());
        assert!(again.is_ok());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_find_by_name_no_match() {
        let service = OlympicService::new(MockSource::new(vec![Ok(dataset())]));
        assert!(service.find_by_name("Atlantis").await.is_none());
        assert!(service.current_error().is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_swallows_load_failure() {
        let source = MockSource::new(vec![Err(LoadError::client("offline")), Ok(dataset())]);
        let service = OlympicService::new(source.clone());

        assert!(service.find_by_name("Italy").await.is_none());
        assert!(service.current_error().is_some());

        // The next lookup retries the load
        assert!(service.find_by_name("Italy").await.is_some());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_find_by_name_rejects_invalid_encoding() {
        let service = OlympicService::new(MockSource::new(vec![Ok(dataset())]));
        assert!(service.find_by_name("%FF%FE").await.is_none());
    }
}
