//! Fallback binding for platforms without a vendor SDK
//!
//! Desktop and CI builds get this adapter. Every operation reports
//! `PlatformUnsupported`, so the exported surface resolves `false` the same
//! way the web fallback of the original bridge did.

use crate::bridge::VendorBridge;
use crate::config::ResolvedConfig;
use crate::error::{Result, TiktokError};
use crate::events::EventParams;

pub struct StubBridge;

impl StubBridge {
    fn unsupported(operation: &str) -> TiktokError {
        TiktokError::PlatformUnsupported(format!(
            "no TikTok Business SDK on this platform ({operation})"
        ))
    }
}

impl VendorBridge for StubBridge {
    fn initialize(&self, config: &ResolvedConfig) -> Result<()> {
        log::debug!(
            "stub bridge: ignoring initialize for app_id={}",
            config.app_id
        );
        Err(Self::unsupported("initialize"))
    }

    fn track_event(&self, event_name: &str, _params: &EventParams) -> Result<()> {
        log::debug!("stub bridge: ignoring event {event_name}");
        Err(Self::unsupported("track_event"))
    }

    fn set_debug_mode(&self, enabled: bool) -> Result<()> {
        log::debug!("stub bridge: ignoring set_debug_mode({enabled})");
        Err(Self::unsupported("set_debug_mode"))
    }
}
