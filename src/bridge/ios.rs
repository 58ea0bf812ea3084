//! iOS binding over the TikTok Business Swift SDK
//!
//! The Swift side exposes a small C shim (see the host project's
//! `TiktokBusinessShim.swift`) that builds the typed `TikTokConfig` and calls
//! `TikTokBusiness.trackEvent`. This adapter owns the string marshaling and
//! maps shim failures to `TiktokError::Bridge`.

use std::ffi::CString;
use std::os::raw::c_char;

use crate::bridge::VendorBridge;
use crate::config::ResolvedConfig;
use crate::error::{Result, TiktokError};
use crate::events::{params_to_json, EventParams};

extern "C" {
    fn tt_business_initialize(
        app_id: *const c_char,
        tiktok_app_id: *const c_char,
        debug_mode: bool,
    ) -> bool;
    fn tt_business_track_event(event_name: *const c_char, properties_json: *const c_char) -> bool;
    fn tt_business_set_debug_mode(enabled: bool) -> bool;
}

fn c_string(context: &str, value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|_| TiktokError::Bridge(format!("{context} contains an interior NUL byte")))
}

pub struct IosBridge;

impl IosBridge {
    pub fn new() -> Self {
        IosBridge
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl VendorBridge for IosBridge {
    fn initialize(&self, config: &ResolvedConfig) -> Result<()> {
        let app_id = c_string("app_id", &config.app_id)?;
        let tiktok_app_id = c_string("tiktok_app_id", &config.tiktok_app_id)?;

        let ok =
            unsafe { tt_business_initialize(app_id.as_ptr(), tiktok_app_id.as_ptr(), config.debug_mode) };
        if ok {
            Ok(())
        } else {
            Err(TiktokError::Bridge(
                "TikTokBusiness.initializeSdk reported failure".into(),
            ))
        }
    }

    fn track_event(&self, event_name: &str, params: &EventParams) -> Result<()> {
        let name = c_string("event name", event_name)?;
        let json = c_string("event params", &params_to_json(params)?)?;

        let ok = unsafe { tt_business_track_event(name.as_ptr(), json.as_ptr()) };
        if ok {
            Ok(())
        } else {
            Err(TiktokError::Bridge(format!(
                "TikTokBusiness.trackEvent({event_name}) reported failure"
            )))
        }
    }

    fn set_debug_mode(&self, enabled: bool) -> Result<()> {
        let ok = unsafe { tt_business_set_debug_mode(enabled) };
        if !ok {
            // The Swift SDK cannot change log level after init; treat the
            // shim's refusal as a successful no-op.
            log::info!("set_debug_mode({enabled}): unsupported after init on iOS, no-op");
        }
        Ok(())
    }
}
