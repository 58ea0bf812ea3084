//! SDK facade: initialization state and event forwarding
//!
//! [`TiktokSdk`] is an explicit session object the host constructs and owns —
//! there is no module-level state, so tests can run any number of independent
//! sessions. The session moves one way from Uninitialized to Initialized and
//! gates every tracking call on that state. All exported operations resolve
//! to a `bool`; internal errors are logged and mapped, never propagated to
//! the host.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::bridge::{vendor_bridge, VendorBridge};
use crate::config::{InitOptions, Platform, PlatformValue, ResolvedConfig};
use crate::error::{Result, TiktokError};
use crate::events::{self, EventName, EventParams, EventValue, PurchaseContent};
use crate::lifecycle::{AppLifecycleEvent, AppLifecycleNotifier, AppLifecycleObserver};

/// Mutable session state. Written once by `initialize`, read everywhere else.
#[derive(Debug, Default)]
struct SdkState {
    initialized: bool,
    auto_track_app_lifecycle: bool,
    auto_track_route_changes: bool,
    config: Option<ResolvedConfig>,
    lifecycle_token: Option<u64>,
}

/// Facade over the per-platform TikTok Business SDK bindings.
#[derive(uniffi::Object)]
pub struct TiktokSdk {
    platform: Platform,
    bridge: Arc<dyn VendorBridge>,
    notifier: Option<Arc<dyn AppLifecycleNotifier>>,
    state: RwLock<SdkState>,
}

#[uniffi::export(async_runtime = "tokio")]
impl TiktokSdk {
    /// Session bound to the current platform's vendor SDK, without
    /// app-lifecycle auto-tracking.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Self::with_collaborators(Platform::current(), vendor_bridge(), None)
    }

    /// Session bound to the current platform's vendor SDK with the host's
    /// lifecycle notifier attached, enabling foreground `Launch` tracking.
    #[uniffi::constructor]
    pub fn with_lifecycle_notifier(notifier: Arc<dyn AppLifecycleNotifier>) -> Arc<Self> {
        Self::with_collaborators(Platform::current(), vendor_bridge(), Some(notifier))
    }

    /// Initialize the vendor SDK. At most once per session: a second call
    /// warns and resolves `false` without touching the existing state.
    pub async fn initialize(
        self: Arc<Self>,
        app_id: PlatformValue,
        tiktok_app_id: PlatformValue,
        options: Option<InitOptions>,
    ) -> bool {
        let options = options.unwrap_or_default();
        let result = Self::initialize_inner(&self, &app_id, &tiktok_app_id, &options);
        self.report("initialize", result)
    }

    /// Forward a standard or custom event. Resolves `false` before
    /// initialization without reaching the vendor SDK.
    pub async fn track_event(
        &self,
        event_name: String,
        event_params: Option<HashMap<String, EventValue>>,
    ) -> bool {
        let params = event_params.unwrap_or_default();
        let result = self.track_event_inner(&event_name, &params);
        self.report("track_event", result)
    }

    /// Forward a screen view as a `ViewContent` event. Requires an
    /// initialized session with `auto_track_route_changes` enabled.
    pub async fn track_route_change(
        &self,
        route_name: String,
        params: Option<HashMap<String, EventValue>>,
    ) -> bool {
        let result = self.track_route_change_inner(&route_name, params.as_ref());
        self.report("track_route_change", result)
    }

    /// Best-effort log-level change. Several vendor SDKs fix the level at
    /// initialization, in which case this resolves `true` without effect.
    pub async fn set_debug_mode(&self, enabled: bool) -> bool {
        let result = self.bridge.set_debug_mode(enabled);
        self.report("set_debug_mode", result)
    }

    /// `Search` event with the canonical `search_string` parameter.
    pub async fn track_search(
        &self,
        query: String,
        additional_params: Option<HashMap<String, EventValue>>,
    ) -> bool {
        let params = events::search_params(&query, additional_params);
        let result = self.track_event_inner(EventName::Search.as_str(), &params);
        self.report("track_search", result)
    }

    /// `ViewContent` event with canonical content parameters.
    pub async fn track_view_content(
        &self,
        content_id: String,
        content_type: Option<String>,
        additional_params: Option<HashMap<String, EventValue>>,
    ) -> bool {
        let params =
            events::view_content_params(&content_id, content_type.as_deref(), additional_params);
        let result = self.track_event_inner(EventName::ViewContent.as_str(), &params);
        self.report("track_view_content", result)
    }

    /// `CompletePayment` event with value, currency, and optional line items.
    pub async fn track_complete_purchase(
        &self,
        value: f64,
        currency: String,
        contents: Option<Vec<PurchaseContent>>,
        additional_params: Option<HashMap<String, EventValue>>,
    ) -> bool {
        let params = events::purchase_params(value, &currency, contents, additional_params);
        let result = self.track_event_inner(EventName::CompletePayment.as_str(), &params);
        self.report("track_complete_purchase", result)
    }

    /// Whether `initialize` has succeeded on this session.
    pub fn is_initialized(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .initialized
    }

    /// Detach the app-lifecycle observer if one was registered. Idempotent;
    /// the initialization state is not reset.
    pub fn cleanup(&self) {
        let token = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .lifecycle_token
            .take();
        if let (Some(token), Some(notifier)) = (token, self.notifier.as_ref()) {
            notifier.unsubscribe(token);
            log::debug!("lifecycle observer detached");
        }
    }
}

impl TiktokSdk {
    /// Session with explicit collaborators. Hosts embedding the crate
    /// directly (and tests) use this to supply their own bridge and
    /// lifecycle notifier.
    pub fn with_collaborators(
        platform: Platform,
        bridge: Arc<dyn VendorBridge>,
        notifier: Option<Arc<dyn AppLifecycleNotifier>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            platform,
            bridge,
            notifier,
            state: RwLock::new(SdkState::default()),
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolved configuration retained by a successful `initialize`.
    pub fn resolved_config(&self) -> Option<ResolvedConfig> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .config
            .clone()
    }

    fn initialize_inner(
        sdk: &Arc<Self>,
        app_id: &PlatformValue,
        tiktok_app_id: &PlatformValue,
        options: &InitOptions,
    ) -> Result<()> {
        // Write lock held across the vendor call: concurrent initialize
        // attempts serialize here and the loser sees `initialized`.
        let mut state = sdk.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.initialized {
            return Err(TiktokError::AlreadyInitialized);
        }

        let app_id = app_id.resolve(sdk.platform);
        if app_id.is_empty() {
            return Err(TiktokError::InvalidConfig(
                "appId resolved to an empty string".into(),
            ));
        }
        let tiktok_app_id = tiktok_app_id.resolve(sdk.platform);
        if tiktok_app_id.is_empty() {
            return Err(TiktokError::InvalidConfig(
                "tiktokAppId resolved to an empty string".into(),
            ));
        }

        let config = ResolvedConfig {
            app_id,
            tiktok_app_id,
            debug_mode: options.debug_mode,
        };
        log::info!(
            "initializing TikTok Business SDK on {} with app_id={}",
            sdk.platform,
            config.app_id
        );
        sdk.bridge.initialize(&config)?;

        state.initialized = true;
        state.auto_track_app_lifecycle = options.auto_track_app_lifecycle;
        state.auto_track_route_changes = options.auto_track_route_changes;
        state.config = Some(config);
        drop(state);

        // Subscribe with no lock held and after the state flip: notifiers
        // commonly replay the current lifecycle state synchronously from
        // inside subscribe, which re-enters the session through the
        // observer. The vendor SDK emits its own install/launch events at
        // init; the observer covers foreground transitions.
        if options.auto_track_app_lifecycle {
            if let Some(notifier) = sdk.notifier.as_ref() {
                let token = notifier.subscribe(Arc::new(LifecycleForwarder {
                    sdk: Arc::downgrade(sdk),
                }));
                sdk.state
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .lifecycle_token = Some(token);
            }
        }

        log::info!("TikTok Business SDK initialized");
        Ok(())
    }

    fn track_event_inner(&self, event_name: &str, params: &EventParams) -> Result<()> {
        if !self.is_initialized() {
            return Err(TiktokError::NotInitialized);
        }
        log::debug!("tracking event {event_name}");
        self.bridge.track_event(event_name, params)
    }

    fn track_route_change_inner(
        &self,
        route_name: &str,
        params: Option<&EventParams>,
    ) -> Result<()> {
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if !state.initialized {
                return Err(TiktokError::NotInitialized);
            }
            if !state.auto_track_route_changes {
                return Err(TiktokError::RouteTrackingDisabled);
            }
        }
        let event = events::route_change_params(route_name, params)?;
        log::debug!("tracking route change to {route_name}");
        self.bridge
            .track_event(EventName::ViewContent.as_str(), &event)
    }

    /// Map an operation result to the boolean the host sees, logging
    /// precondition violations as warnings and real failures as errors.
    fn report(&self, operation: &str, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                if err.is_precondition() {
                    log::warn!("{operation}: {err}");
                } else {
                    log::error!("{operation}: {err}");
                }
                false
            }
        }
    }
}

/// Observer registered with the host lifecycle notifier. Holds a weak
/// reference so a dangling host subscription cannot keep the session alive.
struct LifecycleForwarder {
    sdk: Weak<TiktokSdk>,
}

impl AppLifecycleObserver for LifecycleForwarder {
    fn on_lifecycle_event(&self, event: AppLifecycleEvent) {
        let Some(sdk) = self.sdk.upgrade() else {
            return;
        };
        match event {
            AppLifecycleEvent::Foreground => {
                let result = sdk.track_event_inner(EventName::Launch.as_str(), &EventParams::new());
                sdk.report("lifecycle launch", result);
            }
            AppLifecycleEvent::Background => {
                log::debug!("app moved to background");
            }
        }
    }
}
