//! Native core for the TikTok Business analytics bridge.
//!
//! The hosting mobile application talks to one [`TiktokSdk`] session object:
//! it resolves platform-keyed ids, initializes the vendor SDK through the
//! platform binding for the current target, and forwards tracking calls with
//! state gating. Every exported operation resolves to a `bool`; failures are
//! logged, never thrown across the module boundary.

uniffi::setup_scaffolding!();

pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod routing;
pub mod sdk;

// Re-export commonly used types for convenience
pub use config::{InitOptions, Platform, PlatformValue, ResolvedConfig};
pub use error::{Result, TiktokError};
pub use events::{EventName, EventParams, EventScalar, EventValue, PurchaseContent};
pub use lifecycle::{AppLifecycleEvent, AppLifecycleNotifier, AppLifecycleObserver};
pub use routing::{ParamsAccessor, PathAccessor, RouteTracker};
pub use sdk::TiktokSdk;
