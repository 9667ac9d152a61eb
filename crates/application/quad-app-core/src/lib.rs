pub mod app_core;
pub mod domain;
pub mod kernel;
pub mod ports;
pub mod repository;
pub mod viewmodel;

pub use app_core::*;
pub use domain::{
    AppState, FeedState, FormPhase, FormState, Notice, NoticeKind, Route, SessionEpoch,
    SessionState, SessionUser, WatchId,
};
pub use kernel::AppKernel;
pub use ports::{
    AuthError, AuthPort, EventStorePort, NavigatorPort, SessionCallback, SetOp, SnapshotCallback,
    StoreError, Subscription,
};
pub use repository::{EventWatcher, RepoError};
pub use viewmodel::*;
