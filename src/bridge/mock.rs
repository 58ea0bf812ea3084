//! Recording bridge for tests
//!
//! Stands in for a vendor SDK: records every call, exposes call counts, and
//! can be scripted to fail. Public so host applications can drive their own
//! integration tests against the facade without a device.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::bridge::VendorBridge;
use crate::config::ResolvedConfig;
use crate::error::{Result, TiktokError};
use crate::events::EventParams;

/// One `track_event` call observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub name: String,
    pub params: EventParams,
}

#[derive(Default)]
pub struct MockBridge {
    init_calls: Mutex<Vec<ResolvedConfig>>,
    events: Mutex<Vec<RecordedEvent>>,
    debug_calls: Mutex<Vec<bool>>,
    fail_initialize: AtomicBool,
    fail_track: AtomicBool,
}

impl MockBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script the next `initialize` calls to fail.
    pub fn fail_initialize(&self, fail: bool) {
        self.fail_initialize.store(fail, Ordering::SeqCst);
    }

    /// Script the next `track_event` calls to fail.
    pub fn fail_track(&self, fail: bool) {
        self.fail_track.store(fail, Ordering::SeqCst);
    }

    pub fn init_count(&self) -> usize {
        self.init_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last_init_config(&self) -> Option<ResolvedConfig> {
        self.init_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn debug_mode_calls(&self) -> Vec<bool> {
        self.debug_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl VendorBridge for MockBridge {
    fn initialize(&self, config: &ResolvedConfig) -> Result<()> {
        self.init_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(config.clone());
        if self.fail_initialize.load(Ordering::SeqCst) {
            return Err(TiktokError::Bridge("scripted initialize failure".into()));
        }
        Ok(())
    }

    fn track_event(&self, event_name: &str, params: &EventParams) -> Result<()> {
        if self.fail_track.load(Ordering::SeqCst) {
            return Err(TiktokError::Bridge("scripted track failure".into()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedEvent {
                name: event_name.to_string(),
                params: params.clone(),
            });
        Ok(())
    }

    fn set_debug_mode(&self, enabled: bool) -> Result<()> {
        self.debug_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(enabled);
        Ok(())
    }
}
