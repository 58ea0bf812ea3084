//! SDK configuration and platform id resolution
//!
//! The hosting application may supply a single id string for all platforms or
//! a per-platform map with a mandatory fallback. [`PlatformValue::resolve`]
//! collapses either shape into the one string valid for the current runtime,
//! so every platform binding downstream sees the same canonical
//! [`ResolvedConfig`] tuple.

use serde::Serialize;

/// Mobile platform the crate is running on.
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    /// Desktop, web preview, CI — no vendor SDK available.
    Other,
}

impl Platform {
    /// Platform of the current build target.
    pub fn current() -> Self {
        #[cfg(target_os = "ios")]
        {
            Platform::Ios
        }
        #[cfg(target_os = "android")]
        {
            Platform::Android
        }
        #[cfg(not(any(target_os = "ios", target_os = "android")))]
        {
            Platform::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Other => "other",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An id that is either shared across platforms or keyed per platform.
///
/// The per-platform variant requires a fallback at the type level, so a map
/// without a usable entry cannot be constructed.
#[derive(uniffi::Enum, Debug, Clone, PartialEq, Eq)]
pub enum PlatformValue {
    /// One id used on every platform.
    Single(String),
    /// Platform-keyed ids with a mandatory fallback.
    PerPlatform {
        ios: Option<String>,
        android: Option<String>,
        fallback: String,
    },
}

impl PlatformValue {
    /// Resolve to the single id valid for `platform`.
    ///
    /// Platform entries that are absent or empty fall back to the mandatory
    /// fallback id. Pure function, no side effects.
    pub fn resolve(&self, platform: Platform) -> String {
        match self {
            PlatformValue::Single(value) => value.clone(),
            PlatformValue::PerPlatform {
                ios,
                android,
                fallback,
            } => {
                let entry = match platform {
                    Platform::Ios => ios.as_deref(),
                    Platform::Android => android.as_deref(),
                    Platform::Other => None,
                };
                match entry {
                    Some(value) if !value.is_empty() => value.to_string(),
                    _ => fallback.clone(),
                }
            }
        }
    }
}

impl From<&str> for PlatformValue {
    fn from(value: &str) -> Self {
        PlatformValue::Single(value.to_string())
    }
}

impl From<String> for PlatformValue {
    fn from(value: String) -> Self {
        PlatformValue::Single(value)
    }
}

/// Optional initialization settings with the documented defaults.
#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// Verbose vendor SDK logging for development builds.
    #[uniffi(default = false)]
    pub debug_mode: bool,
    /// Track app foreground/background transitions automatically.
    #[uniffi(default = true)]
    pub auto_track_app_lifecycle: bool,
    /// Allow `track_route_change` to forward screen views.
    #[uniffi(default = true)]
    pub auto_track_route_changes: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            debug_mode: false,
            auto_track_app_lifecycle: true,
            auto_track_route_changes: true,
        }
    }
}

/// The canonical configuration tuple handed to every platform binding.
///
/// Retained by the facade for the lifetime of the session once `initialize`
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub app_id: String,
    pub tiktok_app_id: String,
    pub debug_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_resolves_unchanged_on_every_platform() {
        let value = PlatformValue::Single("com.example.app".to_string());
        for platform in [Platform::Ios, Platform::Android, Platform::Other] {
            assert_eq!(value.resolve(platform), "com.example.app");
        }
    }

    #[test]
    fn per_platform_map_prefers_platform_entry() {
        let value = PlatformValue::PerPlatform {
            ios: Some("id-ios".to_string()),
            android: Some("id-android".to_string()),
            fallback: "id-default".to_string(),
        };

        let cases = [
            (Platform::Ios, "id-ios"),
            (Platform::Android, "id-android"),
            (Platform::Other, "id-default"),
        ];
        for (platform, expected) in cases {
            assert_eq!(value.resolve(platform), expected, "platform {platform}");
        }
    }

    #[test]
    fn missing_platform_entry_falls_back() {
        let value = PlatformValue::PerPlatform {
            ios: None,
            android: Some("id-android".to_string()),
            fallback: "id-default".to_string(),
        };
        assert_eq!(value.resolve(Platform::Ios), "id-default");
        assert_eq!(value.resolve(Platform::Android), "id-android");
    }

    #[test]
    fn empty_platform_entry_falls_back() {
        let value = PlatformValue::PerPlatform {
            ios: Some(String::new()),
            android: None,
            fallback: "id-default".to_string(),
        };
        assert_eq!(value.resolve(Platform::Ios), "id-default");
    }

    #[test]
    fn init_options_defaults() {
        let options = InitOptions::default();
        assert!(!options.debug_mode);
        assert!(options.auto_track_app_lifecycle);
        assert!(options.auto_track_route_changes);
    }
}
