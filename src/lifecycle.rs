//! Host application lifecycle collaborator contracts
//!
//! The host framework owns the actual foreground/background notifications;
//! this crate only consumes them. Both traits are foreign-callback
//! interfaces, so a Kotlin/Swift host implements the notifier on its side
//! (ProcessLifecycleOwner, UIApplication notifications) and hands it to the
//! session constructor. The facade subscribes an observer when
//! `auto_track_app_lifecycle` is enabled and detaches it again in
//! `cleanup()`.

use std::sync::Arc;

/// Application lifecycle transition reported by the host.
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLifecycleEvent {
    Foreground,
    Background,
}

/// Receiver for lifecycle transitions.
#[uniffi::export(with_foreign)]
pub trait AppLifecycleObserver: Send + Sync {
    fn on_lifecycle_event(&self, event: AppLifecycleEvent);
}

/// Host-side notifier the facade registers its observer with.
///
/// `subscribe` returns an opaque token used to detach the observer later.
/// Implemented by the hosting application, not by this crate. Notifiers may
/// deliver the current lifecycle state synchronously from inside
/// `subscribe`; the facade supports that re-entry.
#[uniffi::export(with_foreign)]
pub trait AppLifecycleNotifier: Send + Sync {
    fn subscribe(&self, observer: Arc<dyn AppLifecycleObserver>) -> u64;
    fn unsubscribe(&self, token: u64);
}
