//! Android binding over the TikTok Business Kotlin SDK (JNI)
//!
//! Translates the canonical configuration tuple into a `TTConfig` builder and
//! forwards events as `TikTokBusinessSdk.trackEvent(name, JSONObject)`. The
//! JavaVM handle is captured in `JNI_OnLoad` when the host loads the library.
//!
//! Every JNI failure, including pending Java exceptions, is converted into
//! `TiktokError::Bridge` so nothing unwinds across the FFI boundary.

use std::sync::RwLock;

use jni::objects::{JObject, JValue};
use jni::sys::{jint, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use lazy_static::lazy_static;

use crate::bridge::VendorBridge;
use crate::config::ResolvedConfig;
use crate::error::{Result, TiktokError};
use crate::events::{params_to_json, EventParams};

const SDK_CLASS: &str = "com/tiktok/TikTokBusinessSdk";
const CONFIG_CLASS: &str = "com/tiktok/TikTokBusinessSdk$TTConfig";
const LOG_LEVEL_CLASS: &str = "com/tiktok/TikTokBusinessSdk$LogLevel";

lazy_static! {
    static ref JAVA_VM: RwLock<Option<JavaVM>> = RwLock::new(None);
}

#[no_mangle]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut std::ffi::c_void) -> jint {
    if let Ok(mut slot) = JAVA_VM.write() {
        *slot = Some(vm);
    }
    JNI_VERSION_1_6
}

fn jni_error(context: &str, err: jni::errors::Error) -> TiktokError {
    TiktokError::Bridge(format!("{context}: {err}"))
}

/// Convert a pending Java exception into an error, clearing it first.
fn check_exception(env: &mut JNIEnv<'_>, context: &str) -> Result<()> {
    if env.exception_check().map_err(|e| jni_error(context, e))? {
        env.exception_clear().map_err(|e| jni_error(context, e))?;
        return Err(TiktokError::Bridge(format!(
            "{context}: Java exception thrown by vendor SDK"
        )));
    }
    Ok(())
}

pub struct AndroidBridge;

impl AndroidBridge {
    pub fn new() -> Self {
        AndroidBridge
    }

    fn with_env<T>(&self, f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T>) -> Result<T> {
        let vm_slot = JAVA_VM
            .read()
            .map_err(|_| TiktokError::Bridge("JavaVM lock poisoned".into()))?;
        let vm = vm_slot
            .as_ref()
            .ok_or_else(|| TiktokError::Bridge("JavaVM not captured, JNI_OnLoad missing".into()))?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_error("attach_current_thread", e))?;
        f(&mut env)
    }

    /// Application context via `android.app.ActivityThread.currentApplication()`.
    fn application_context<'a>(env: &mut JNIEnv<'a>) -> Result<JObject<'a>> {
        let app = env
            .call_static_method(
                "android/app/ActivityThread",
                "currentApplication",
                "()Landroid/app/Application;",
                &[],
            )
            .map_err(|e| jni_error("currentApplication", e))?
            .l()
            .map_err(|e| jni_error("currentApplication", e))?;
        if app.is_null() {
            return Err(TiktokError::Bridge("application context is null".into()));
        }
        Ok(app)
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl VendorBridge for AndroidBridge {
    fn initialize(&self, config: &ResolvedConfig) -> Result<()> {
        self.with_env(|env| {
            let context = Self::application_context(env)?;

            let tt_config = env
                .new_object(
                    CONFIG_CLASS,
                    "(Landroid/content/Context;)V",
                    &[JValue::Object(&context)],
                )
                .map_err(|e| jni_error("new TTConfig", e))?;
            check_exception(env, "new TTConfig")?;

            let app_id = env
                .new_string(&config.app_id)
                .map_err(|e| jni_error("app_id", e))?;
            env.call_method(
                &tt_config,
                "setAppId",
                "(Ljava/lang/String;)Lcom/tiktok/TikTokBusinessSdk$TTConfig;",
                &[JValue::Object(&app_id)],
            )
            .map_err(|e| jni_error("setAppId", e))?;

            let tiktok_app_id = env
                .new_string(&config.tiktok_app_id)
                .map_err(|e| jni_error("tiktok_app_id", e))?;
            env.call_method(
                &tt_config,
                "setTTAppId",
                "(Ljava/lang/String;)Lcom/tiktok/TikTokBusinessSdk$TTConfig;",
                &[JValue::Object(&tiktok_app_id)],
            )
            .map_err(|e| jni_error("setTTAppId", e))?;

            if config.debug_mode {
                let debug_level = env
                    .get_static_field(
                        LOG_LEVEL_CLASS,
                        "DEBUG",
                        "Lcom/tiktok/TikTokBusinessSdk$LogLevel;",
                    )
                    .map_err(|e| jni_error("LogLevel.DEBUG", e))?
                    .l()
                    .map_err(|e| jni_error("LogLevel.DEBUG", e))?;
                env.call_method(
                    &tt_config,
                    "setLogLevel",
                    "(Lcom/tiktok/TikTokBusinessSdk$LogLevel;)Lcom/tiktok/TikTokBusinessSdk$TTConfig;",
                    &[JValue::Object(&debug_level)],
                )
                .map_err(|e| jni_error("setLogLevel", e))?;
            }
            check_exception(env, "TTConfig setup")?;

            env.call_static_method(
                SDK_CLASS,
                "initializeSdk",
                "(Lcom/tiktok/TikTokBusinessSdk$TTConfig;)V",
                &[JValue::Object(&tt_config)],
            )
            .map_err(|e| jni_error("initializeSdk", e))?;
            check_exception(env, "initializeSdk")
        })
    }

    fn track_event(&self, event_name: &str, params: &EventParams) -> Result<()> {
        let json = params_to_json(params)?;
        self.with_env(|env| {
            let name = env
                .new_string(event_name)
                .map_err(|e| jni_error("event name", e))?;
            let json = env.new_string(&json).map_err(|e| jni_error("params", e))?;

            let props = env
                .new_object(
                    "org/json/JSONObject",
                    "(Ljava/lang/String;)V",
                    &[JValue::Object(&json)],
                )
                .map_err(|e| jni_error("new JSONObject", e))?;
            check_exception(env, "new JSONObject")?;

            env.call_static_method(
                SDK_CLASS,
                "trackEvent",
                "(Ljava/lang/String;Lorg/json/JSONObject;)V",
                &[JValue::Object(&name), JValue::Object(&props)],
            )
            .map_err(|e| jni_error("trackEvent", e))?;
            check_exception(env, "trackEvent")
        })
    }

    fn set_debug_mode(&self, enabled: bool) -> Result<()> {
        // The Kotlin SDK fixes its log level at initializeSdk time; this is a
        // documented no-op afterwards.
        log::info!("set_debug_mode({enabled}): log level fixed at init on Android, no-op");
        Ok(())
    }
}
