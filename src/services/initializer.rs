use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use crate::services::seeder::Seeder;
use crate::services::store::Store;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Ensures the store has been seeded at least once per process
///
/// When seeding leaves the store empty, each call below the retry ceiling
/// schedules one delayed forced reseed as a tokio task and returns `false`.
/// The task's handle is kept so callers can await the outcome through
/// [`Initializer::take_pending_retry`]. Reaching the ceiling resets the
/// counter and schedules nothing.
#[derive(Clone)]
pub struct Initializer {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<Store>,
    seeder: Arc<dyn Seeder>,
    max_retries: u32,
    retry_delay: Duration,
    state: Mutex<InitState>,
    pending: Mutex<Option<JoinHandle<bool>>>,
}

#[derive(Debug, Default, Clone, Copy)]
struct InitState {
    initialized: bool,
    retries: u32,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Initializer {
    pub fn new(
        store: Arc<Store>,
        seeder: Arc<dyn Seeder>,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                seeder,
                max_retries,
                retry_delay,
                state: Mutex::new(InitState::default()),
                pending: Mutex::new(None),
            }),
        }
    }

    pub fn with_defaults(store: Arc<Store>, seeder: Arc<dyn Seeder>) -> Self {
        Self::new(store, seeder, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY)
    }

    /// Seed the store unless already initialized (or `force`), returning
    /// whether pets are available now
    pub fn ensure_initialized(&self, force: bool) -> bool {
        let mut state = lock(&self.inner.state);

        if state.initialized && !force {
            tracing::debug!("Store already initialized, skipping");
            return true;
        }

        tracing::info!("Initializing store (force: {})", force);
        self.inner.seeder.seed(&self.inner.store, force);

        let pet_count = self.inner.store.pet_count();
        if pet_count > 0 {
            tracing::info!("Store initialized with {} pets", pet_count);
            state.initialized = true;
            state.retries = 0;
            return true;
        }

        state.retries += 1;
        tracing::warn!(
            "No pets available after initialization (attempt {}/{})",
            state.retries,
            self.inner.max_retries
        );

        if state.retries < self.inner.max_retries {
            let attempt = state.retries;
            drop(state);
            self.schedule_retry(attempt);
        } else {
            tracing::error!("Max initialization retries reached, giving up until the next call");
            state.retries = 0;
        }

        false
    }

    /// True when the store currently holds any pets
    ///
    /// Reads only the pet count; the initialized flag and retry counter are untouched.
    pub fn verify(&self) -> bool {
        let ok = self.inner.store.pet_count() > 0;
        if !ok {
            tracing::warn!("Store verification failed: no pets found");
        }
        ok
    }

    pub fn is_initialized(&self) -> bool {
        lock(&self.inner.state).initialized
    }

    pub fn retry_count(&self) -> u32 {
        lock(&self.inner.state).retries
    }

    /// Take the handle of the most recently scheduled retry, if any
    ///
    /// The handle resolves to whether the retry left pets in the store.
    pub fn take_pending_retry(&self) -> Option<JoinHandle<bool>> {
        lock(&self.inner.pending).take()
    }

    fn schedule_retry(&self, attempt: u32) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Cannot schedule initialization retry {}: {}", attempt, e);
                return;
            }
        };

        tracing::info!(
            "Scheduling forced reseed in {:?} (retry {})",
            self.inner.retry_delay,
            attempt
        );

        let inner = Arc::clone(&self.inner);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(inner.retry_delay).await;
            inner.seeder.seed(&inner.store, true);

            let pet_count = inner.store.pet_count();
            if pet_count == 0 {
                tracing::warn!("Still no pets after retry {}", attempt);
                return false;
            }

            let mut state = lock(&inner.state);
            state.initialized = true;
            state.retries = 0;
            tracing::info!("Loaded {} pets on retry {}", pet_count, attempt);
            true
        });

        // A replaced handle is detached; that retry still runs to completion.
        *lock(&self.inner.pending) = Some(handle);
    }
}
