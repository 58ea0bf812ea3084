//! Vendor SDK bindings
//!
//! One canonical contract for every platform: each adapter translates the
//! resolved `(app_id, tiktok_app_id, debug_mode)` tuple and the serialized
//! event parameters into its vendor SDK's shape. The facade never talks to a
//! vendor SDK directly and adapter failures stay inside `Result` values —
//! nothing panics across this boundary.

use std::sync::Arc;

use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::events::EventParams;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

pub mod mock;

/// Adapter over one vendor analytics SDK.
pub trait VendorBridge: Send + Sync {
    /// Initialize the vendor SDK with the canonical configuration tuple.
    fn initialize(&self, config: &ResolvedConfig) -> Result<()>;

    /// Forward one event to the vendor SDK.
    fn track_event(&self, event_name: &str, params: &EventParams) -> Result<()>;

    /// Best-effort log-level change. Adapters whose vendor SDK cannot change
    /// the level after initialization succeed without effect.
    fn set_debug_mode(&self, enabled: bool) -> Result<()>;
}

/// The vendor bridge for the current build target.
pub fn vendor_bridge() -> Arc<dyn VendorBridge> {
    #[cfg(target_os = "android")]
    {
        Arc::new(android::AndroidBridge::new())
    }
    #[cfg(target_os = "ios")]
    {
        Arc::new(ios::IosBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Arc::new(stub::StubBridge)
    }
}
