//! Route-tracking adapter for host routers
//!
//! The host framework owns navigation; it hands this adapter two accessors
//! (current path, current params) and calls [`RouteTracker::on_navigation`]
//! whenever they change. The tracking call is deferred to the next scheduler
//! tick so it never runs inside the host's render pass, and all gating
//! (initialization, auto-tracking flag) stays in the facade.

use std::sync::Arc;

use crate::events::EventParams;
use crate::sdk::TiktokSdk;

/// Re-evaluated on every navigation change; `None` means "no route yet".
pub type PathAccessor = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Re-evaluated on every navigation change.
pub type ParamsAccessor = Arc<dyn Fn() -> Option<EventParams> + Send + Sync>;

/// Forwards navigation changes to [`TiktokSdk::track_route_change`].
pub struct RouteTracker {
    sdk: Arc<TiktokSdk>,
    current_path: PathAccessor,
    current_params: ParamsAccessor,
}

impl RouteTracker {
    pub fn new(sdk: Arc<TiktokSdk>, current_path: PathAccessor, current_params: ParamsAccessor) -> Self {
        Self {
            sdk,
            current_path,
            current_params,
        }
    }

    /// Called by the host on every navigation change. Must run inside the
    /// host's tokio runtime: the tracking call is spawned onto the next tick.
    pub fn on_navigation(&self) {
        let Some(path) = (self.current_path)() else {
            return;
        };
        let params = (self.current_params)();
        let sdk = Arc::clone(&self.sdk);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            let tracked = sdk.track_route_change(path.clone(), params).await;
            if !tracked {
                log::debug!("route change to {path} not tracked");
            }
        });
    }
}
