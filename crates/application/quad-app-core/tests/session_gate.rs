use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use quad_app_core::app_core::{AppCommand, AppStore};
use quad_app_core::domain::Route;
use quad_app_core::kernel::AppKernel;
use quad_app_core::ports::{
    AuthPort, EventStorePort, NavigatorPort, SetOp, SnapshotCallback, StoreError, Subscription,
};
use quad_core::{Event, EventId, NewEventRecord};
use quad_memstore::MemoryAuthProvider;

type SharedSnapshotCallback = Arc<dyn Fn(Vec<Event>) + Send + Sync>;

#[derive(Clone, Default)]
struct FakeEventStore {
    opened: Arc<AtomicUsize>,
    cancelled: Arc<AtomicUsize>,
    watchers: Arc<Mutex<Vec<SharedSnapshotCallback>>>,
}

impl FakeEventStore {
    fn push_snapshot(&self, events: Vec<Event>) {
        for watcher in self.watchers.lock().unwrap().iter() {
            watcher(events.clone());
        }
    }
}

impl EventStorePort for FakeEventStore {
    fn watch_events(&self, on_snapshot: SnapshotCallback) -> Subscription {
        let on_snapshot: SharedSnapshotCallback = Arc::from(on_snapshot);
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.watchers.lock().unwrap().push(on_snapshot.clone());
        on_snapshot(Vec::new());
        let cancelled = self.cancelled.clone();
        Subscription::new(move || {
            cancelled.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn create_event(&self, _record: NewEventRecord) -> Result<EventId, StoreError> {
        Ok("e1".into())
    }

    fn update_participants(&self, _event_id: &EventId, _op: SetOp) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Clone)]
struct NavCall {
    kind: &'static str,
    route: Route,
    events_visible: usize,
    watches_cancelled: usize,
}

/// Records each transition together with what the store and watch looked
/// like at the instant it fired.
#[derive(Clone)]
struct RecordingNavigator {
    store: AppStore,
    cancelled: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<NavCall>>>,
}

impl RecordingNavigator {
    fn new(store: AppStore, cancelled: Arc<AtomicUsize>) -> Self {
        Self {
            store,
            cancelled,
            calls: Arc::default(),
        }
    }

    fn record(&self, kind: &'static str, route: Route) {
        self.calls.lock().unwrap().push(NavCall {
            kind,
            route,
            events_visible: self.store.state().feed.events.len(),
            watches_cancelled: self.cancelled.load(Ordering::SeqCst),
        });
    }

    fn last(&self) -> Option<NavCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl NavigatorPort for RecordingNavigator {
    fn replace(&self, route: Route) {
        self.record("replace", route);
    }

    fn push(&self, route: Route) {
        self.record("push", route);
    }
}

struct Fixture {
    auth: MemoryAuthProvider,
    events: FakeEventStore,
    navigator: RecordingNavigator,
    kernel: AppKernel<MemoryAuthProvider, FakeEventStore, RecordingNavigator>,
}

fn fixture() -> Fixture {
    let store = AppStore::default();
    let auth = MemoryAuthProvider::new();
    let events = FakeEventStore::default();
    let navigator = RecordingNavigator::new(store.clone(), events.cancelled.clone());
    let kernel = AppKernel::new(store, auth.clone(), events.clone(), navigator.clone());
    Fixture {
        auth,
        events,
        navigator,
        kernel,
    }
}

fn sample_event() -> Event {
    Event {
        id: "e1".into(),
        title: "Study Group".into(),
        description: "desc".into(),
        date: "May 1".into(),
        time: "5pm".into(),
        location: "Lib 201".into(),
        creator_id: "u1".into(),
        creator_email: "u1@campus.edu".into(),
        participants: vec!["u1".into()],
        created_at: 1,
    }
}

#[test]
fn initial_unauthenticated_state_redirects_to_login() {
    let mut fx = fixture();
    fx.kernel.activate();
    fx.kernel.tick();

    assert!(!fx.kernel.store.state().session.is_signed_in());
    assert_eq!(fx.events.opened.load(Ordering::SeqCst), 0);
    let call = fx.navigator.last().unwrap();
    assert_eq!(call.kind, "replace");
    assert_eq!(call.route, Route::Login);
}

#[test]
fn sign_in_opens_the_watch_and_navigates_to_events() {
    let mut fx = fixture();
    fx.kernel.activate();
    fx.auth.sign_in("u1", "u1@campus.edu");
    fx.kernel.tick();

    let state = fx.kernel.store.state();
    assert!(state.session.is_signed_in());
    assert!(!state.feed.loading, "initial snapshot must settle loading");
    assert_eq!(fx.events.opened.load(Ordering::SeqCst), 1);
    let call = fx.navigator.last().unwrap();
    assert_eq!((call.kind, call.route), ("replace", Route::Events));
}

#[test]
fn redelivered_identity_performs_no_redundant_work() {
    let mut fx = fixture();
    fx.kernel.activate();
    fx.auth.sign_in("u1", "u1@campus.edu");
    fx.kernel.tick();
    fx.auth.sign_in("u1", "u1@campus.edu");
    fx.kernel.tick();

    assert_eq!(fx.events.opened.load(Ordering::SeqCst), 1);
    assert_eq!(fx.events.cancelled.load(Ordering::SeqCst), 0);
}

#[test]
fn sign_out_cancels_and_clears_before_the_login_transition() {
    let mut fx = fixture();
    fx.kernel.activate();
    fx.auth.sign_in("u1", "u1@campus.edu");
    fx.kernel.tick();

    fx.events.push_snapshot(vec![sample_event()]);
    fx.kernel.tick();
    assert_eq!(fx.kernel.store.state().feed.events.len(), 1);

    fx.kernel.dispatch(AppCommand::SignOut);
    fx.kernel.tick();

    let state = fx.kernel.store.state();
    assert!(!state.session.is_signed_in());
    assert!(state.feed.events.is_empty());
    assert_eq!(fx.events.cancelled.load(Ordering::SeqCst), 1);

    // The login transition must observe an already-cancelled watch and an
    // already-cleared list.
    let call = fx.navigator.last().unwrap();
    assert_eq!((call.kind, call.route), ("replace", Route::Login));
    assert_eq!(call.events_visible, 0);
    assert_eq!(call.watches_cancelled, 1);
}

#[test]
fn snapshots_from_the_cancelled_watch_are_dropped_after_sign_out() {
    let mut fx = fixture();
    fx.kernel.activate();
    fx.auth.sign_in("u1", "u1@campus.edu");
    fx.kernel.tick();

    fx.kernel.dispatch(AppCommand::SignOut);
    fx.kernel.tick();

    // The fake keeps invoking registered callbacks even after cancel; the
    // kernel must drop these by watch id.
    fx.events.push_snapshot(vec![sample_event()]);
    fx.kernel.tick();
    assert!(fx.kernel.store.state().feed.events.is_empty());
}

#[test]
fn deactivate_unsubscribes_unconditionally() {
    let mut fx = fixture();
    fx.kernel.activate();
    fx.auth.sign_in("u1", "u1@campus.edu");
    fx.kernel.tick();
    assert_eq!(fx.events.opened.load(Ordering::SeqCst), 1);

    fx.kernel.deactivate();
    assert_eq!(fx.events.cancelled.load(Ordering::SeqCst), 1);

    // Provider changes no longer reach the kernel.
    let calls_before = fx.navigator.calls.lock().unwrap().len();
    fx.auth.sign_out().unwrap();
    fx.kernel.tick();
    assert_eq!(fx.navigator.calls.lock().unwrap().len(), calls_before);
}
