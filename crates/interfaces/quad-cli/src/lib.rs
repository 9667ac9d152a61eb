pub mod commands;

use std::time::{Duration, Instant};

use quad_app_core::{AppKernel, AppState, AuthPort, EventStorePort, NavigatorPort, Route};

/// Navigation host for a terminal session: transitions are logged, not
/// rendered.
pub struct TracingNavigator;

impl NavigatorPort for TracingNavigator {
    fn replace(&self, route: Route) {
        tracing::debug!(?route, "navigate (replace)");
    }

    fn push(&self, route: Route) {
        tracing::debug!(?route, "navigate (push)");
    }
}

/// Ticks the kernel until `pred` holds or the deadline passes. Worker
/// threads and snapshot callbacks land between ticks.
pub fn wait_for<A, E, N>(
    kernel: &mut AppKernel<A, E, N>,
    timeout: Duration,
    pred: impl Fn(&AppState) -> bool,
) -> anyhow::Result<AppState>
where
    A: AuthPort,
    E: EventStorePort,
    N: NavigatorPort,
{
    let deadline = Instant::now() + timeout;
    loop {
        kernel.tick();
        let state = kernel.store.state();
        if pred(&state) {
            return Ok(state);
        }
        if Instant::now() > deadline {
            anyhow::bail!("timed out waiting for the kernel to settle");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}
