//! Shared helpers for the facade integration tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tiktok_business_core::bridge::mock::MockBridge;
use tiktok_business_core::{
    AppLifecycleEvent, AppLifecycleNotifier, AppLifecycleObserver, Platform, TiktokSdk,
};

/// Session backed by a recording mock bridge.
pub fn sdk_with_mock(platform: Platform) -> (Arc<TiktokSdk>, Arc<MockBridge>) {
    let bridge = MockBridge::new();
    let sdk = TiktokSdk::with_collaborators(platform, bridge.clone(), None);
    (sdk, bridge)
}

/// In-memory stand-in for the host's app-lifecycle notifier.
#[derive(Default)]
pub struct TestNotifier {
    observers: Mutex<HashMap<u64, Arc<dyn AppLifecycleObserver>>>,
    next_token: AtomicU64,
    replay_foreground_on_subscribe: bool,
}

impl TestNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Notifier that reports the current (foreground) state synchronously
    /// from inside `subscribe`, the way ProcessLifecycleOwner-backed hosts
    /// do.
    pub fn replaying_foreground() -> Arc<Self> {
        Arc::new(Self {
            replay_foreground_on_subscribe: true,
            ..Self::default()
        })
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Deliver a lifecycle event to every subscribed observer.
    pub fn emit(&self, event: AppLifecycleEvent) {
        let observers: Vec<_> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for observer in observers {
            observer.on_lifecycle_event(event);
        }
    }
}

impl AppLifecycleNotifier for TestNotifier {
    fn subscribe(&self, observer: Arc<dyn AppLifecycleObserver>) -> u64 {
        if self.replay_foreground_on_subscribe {
            observer.on_lifecycle_event(AppLifecycleEvent::Foreground);
        }
        let token = self.next_token.fetch_add(1, Ordering::SeqCst);
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, observer);
        token
    }

    fn unsubscribe(&self, token: u64) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&token);
    }
}
