use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::domain::{Route, SessionState, SessionUser};
use crate::ports::{AuthPort, EventStorePort, NavigatorPort, Subscription};
use crate::repository::{self, EventWatcher};

/// The application core: command dispatch, the session gate, and the event
/// loop gluing port callbacks back into the pure reducer. All collaborator
/// handles arrive through the constructor; nothing is reached ambiently.
pub struct AppKernel<A, E, N> {
    pub store: AppStore,
    auth: Arc<A>,
    events: Arc<E>,
    navigator: Arc<N>,

    watcher: EventWatcher<E>,
    auth_watch: Option<Subscription>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<A, E, N> AppKernel<A, E, N>
where
    A: AuthPort,
    E: EventStorePort,
    N: NavigatorPort,
{
    pub fn new(store: AppStore, auth: A, events: E, navigator: N) -> Self {
        let (tx, rx) = mpsc::channel(quad_config::EVENT_CHANNEL_CAPACITY);
        let events = Arc::new(events);
        Self {
            store,
            auth: Arc::new(auth),
            watcher: EventWatcher::new(events.clone(), tx.clone()),
            events,
            navigator: Arc::new(navigator),
            auth_watch: None,
            tx,
            rx,
        }
    }

    /// Begins observing the session. The provider notifies immediately with
    /// the current state, so the first `tick` after activation settles the
    /// session gate.
    pub fn activate(&mut self) {
        if self.auth_watch.is_some() {
            return;
        }
        let tx = self.tx.clone();
        let watch = self.auth.observe_session(Box::new(move |session| {
            if tx.try_send(DomainEvent::SessionChanged(session)).is_err() {
                tracing::warn!("event channel full, dropping session change");
            }
        }));
        self.auth_watch = Some(watch);
    }

    /// Screen teardown: unconditionally unsubscribes from both the session
    /// and the event collection.
    pub fn deactivate(&mut self) {
        if let Some(watch) = self.auth_watch.take() {
            watch.cancel();
        }
        self.watcher.close();
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::SignOut => {
                // The unauthenticated notification arrives through the auth
                // watch and is handled by the session gate in tick().
                if let Err(e) = self.auth.sign_out() {
                    self.store
                        .apply(DomainEvent::UserError(format!("Sign out failed: {e}")));
                }
            }

            AppCommand::Navigate(route) => self.navigator.push(route),

            AppCommand::ToggleForm => self.store.apply(DomainEvent::FormToggled),

            AppCommand::SetDraftField(field, value) => {
                self.store
                    .apply(DomainEvent::DraftFieldSet(field, quad_config::clamp_field(value)));
            }

            AppCommand::SubmitEvent => {
                let state = self.store.state();
                // Only one submission may be in flight per form instance.
                if state.form.in_flight() {
                    return;
                }
                let SessionState::SignedIn { epoch, user } = state.session else {
                    self.navigator.replace(Route::Login);
                    return;
                };
                if let Some(field) = state.form.draft.first_blank_field() {
                    self.store.apply(DomainEvent::SubmitBlocked { field });
                    return;
                }
                self.store.apply(DomainEvent::SubmitStarted);

                let store = self.events.clone();
                let tx = self.tx.clone();
                let draft = state.form.draft;
                let spawn_res = std::thread::Builder::new()
                    .name("quad-create-event".into())
                    .spawn(move || {
                        let ev = match repository::create_event(&*store, &draft, Some(&user)) {
                            Ok(_) => DomainEvent::CreateSucceeded { epoch },
                            Err(e) => DomainEvent::CreateFailed {
                                epoch,
                                message: e.to_string(),
                            },
                        };
                        let _ = tx.blocking_send(ev);
                    });
                if let Err(e) = spawn_res {
                    self.store.apply(DomainEvent::CreateFailed {
                        epoch,
                        message: format!("Failed to start create worker thread: {e}"),
                    });
                }
            }

            AppCommand::ToggleParticipation(event_id) => {
                let state = self.store.state();
                let SessionState::SignedIn { epoch, user } = state.session else {
                    self.navigator.replace(Route::Login);
                    return;
                };
                let Some(event) = state.feed.events.iter().find(|e| e.id == event_id).cloned()
                else {
                    self.store
                        .apply(DomainEvent::UserError("Event no longer exists".into()));
                    return;
                };

                let store = self.events.clone();
                let tx = self.tx.clone();
                let spawn_res = std::thread::Builder::new()
                    .name("quad-toggle-membership".into())
                    .spawn(move || {
                        let ev =
                            match repository::toggle_participation(&*store, &event, Some(&user)) {
                                Ok(action) => DomainEvent::ToggleSucceeded { epoch, action },
                                Err(e) => DomainEvent::ToggleFailed {
                                    epoch,
                                    message: e.to_string(),
                                },
                            };
                        let _ = tx.blocking_send(ev);
                    });
                if let Err(e) = spawn_res {
                    self.store.apply(DomainEvent::ToggleFailed {
                        epoch,
                        message: format!("Failed to start toggle worker thread: {e}"),
                    });
                }
            }

            AppCommand::DismissNotice => self.store.apply(DomainEvent::NoticeDismissed),
        }
    }

    /// Call from the UI loop to process queued port callbacks and worker
    /// results. Deliveries from a cancelled watch or a closed session span
    /// are dropped here.
    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.process(ev);
        }
    }

    fn process(&mut self, ev: DomainEvent) {
        match ev {
            DomainEvent::SessionChanged(next) => self.handle_session_change(next),
            ev => {
                match &ev {
                    DomainEvent::WatchSnapshot { watch_id, .. } => {
                        if self.store.state().feed.watch_id != Some(*watch_id) {
                            tracing::debug!(%watch_id, "dropping snapshot for stale watch");
                            return;
                        }
                    }
                    DomainEvent::CreateSucceeded { epoch }
                    | DomainEvent::CreateFailed { epoch, .. }
                    | DomainEvent::ToggleSucceeded { epoch, .. }
                    | DomainEvent::ToggleFailed { epoch, .. } => {
                        if self.store.state().session.epoch() != Some(*epoch) {
                            tracing::debug!("dropping mutation result from a stale session");
                            return;
                        }
                    }
                    _ => {}
                }
                self.store.apply(ev);
            }
        }
    }

    /// The session gate. Authenticated: open the feed (idempotent for a
    /// re-delivered identity) and move to the events screen. Unauthenticated:
    /// cancel the watch and clear local state synchronously, then redirect
    /// to login.
    fn handle_session_change(&mut self, next: Option<SessionUser>) {
        match next {
            Some(user) => {
                if let SessionState::SignedIn { user: current, .. } = &self.store.state().session {
                    if current.user_id == user.user_id {
                        return;
                    }
                }
                let epoch = Uuid::new_v4();
                let watch_id = self.watcher.open();
                self.store.apply(DomainEvent::SignedIn {
                    epoch,
                    user,
                    watch_id,
                });
                self.navigator.replace(Route::Events);
            }
            None => {
                if self.store.state().session == SessionState::SignedOut {
                    return;
                }
                self.watcher.close();
                self.store.apply(DomainEvent::SignedOut);
                self.navigator.replace(Route::Login);
            }
        }
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }
}
