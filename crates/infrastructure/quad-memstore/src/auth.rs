use std::sync::{Arc, Mutex};

use quad_app_core::domain::SessionUser;
use quad_app_core::ports::{AuthError, AuthPort, SessionCallback, Subscription};

type SharedSessionCallback = Arc<dyn Fn(Option<SessionUser>) + Send + Sync>;

struct AuthInner {
    session: Option<SessionUser>,
    next_watcher_id: u64,
    watchers: Vec<(u64, SharedSessionCallback)>,
}

/// In-process session registry. Observers get the current state immediately
/// on subscribe and one notification per change, in change order. Clones
/// share the session.
#[derive(Clone)]
pub struct MemoryAuthProvider {
    inner: Arc<Mutex<AuthInner>>,
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AuthInner {
                session: None,
                next_watcher_id: 0,
                watchers: Vec::new(),
            })),
        }
    }

    pub fn sign_in(&self, user_id: impl Into<String>, email: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        let user = SessionUser {
            user_id: user_id.into(),
            email: email.into(),
        };
        inner.session = Some(user.clone());
        for (_, watcher) in &inner.watchers {
            watcher(Some(user.clone()));
        }
    }
}

impl AuthPort for MemoryAuthProvider {
    fn observe_session(&self, on_change: SessionCallback) -> Subscription {
        let on_change: SharedSessionCallback = Arc::from(on_change);
        let watcher_id;
        {
            let mut inner = self.inner.lock().unwrap();
            watcher_id = inner.next_watcher_id;
            inner.next_watcher_id += 1;
            inner.watchers.push((watcher_id, on_change.clone()));
            on_change(inner.session.clone());
        }

        let inner = self.inner.clone();
        Subscription::new(move || {
            let mut inner = inner.lock().unwrap();
            inner.watchers.retain(|(id, _)| *id != watcher_id);
        })
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        let mut inner = self.inner.lock().unwrap();
        inner.session = None;
        for (_, watcher) in &inner.watchers {
            watcher(None);
        }
        Ok(())
    }
}
