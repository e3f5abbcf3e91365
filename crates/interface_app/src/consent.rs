//! Cookie consent
//!
//! Necessary cookies are always on. Analytics and marketing are opt-in and
//! the banner keeps showing until a choice has been stored under
//! [`STORAGE_KEY`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Key the stored choice lives under
pub const STORAGE_KEY: &str = "vesta_cookie_consent";

/// A stored cookie choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookiePreferences {
    pub necessary: bool,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub marketing: bool,
    pub timestamp: DateTime<Utc>,
}

impl CookiePreferences {
    fn new(analytics: bool, marketing: bool, now: DateTime<Utc>) -> Self {
        Self {
            necessary: true,
            analytics,
            marketing,
            timestamp: now,
        }
    }
}

/// Consent state for one visitor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieConsent {
    stored: Option<CookiePreferences>,
}

impl CookieConsent {
    /// Restores consent from the stored JSON, if any
    ///
    /// Unreadable values are discarded so the visitor is asked again.
    pub fn load(stored: Option<&str>) -> Self {
        let stored = stored.and_then(|raw| match serde_json::from_str::<CookiePreferences>(raw) {
            Ok(prefs) => Some(CookiePreferences {
                necessary: true,
                ..prefs
            }),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cookie consent");
                None
            }
        });
        Self { stored }
    }

    /// The banner is shown until a choice is stored
    pub fn shows_banner(&self) -> bool {
        self.stored.is_none()
    }

    pub fn preferences(&self) -> Option<&CookiePreferences> {
        self.stored.as_ref()
    }

    pub fn analytics_enabled(&self) -> bool {
        self.stored.is_some_and(|p| p.analytics)
    }

    pub fn marketing_enabled(&self) -> bool {
        self.stored.is_some_and(|p| p.marketing)
    }

    pub fn accept_all(&mut self, now: DateTime<Utc>) -> CookiePreferences {
        self.save_custom(true, true, now)
    }

    pub fn reject_all(&mut self, now: DateTime<Utc>) -> CookiePreferences {
        self.save_custom(false, false, now)
    }

    /// Stores the choice made in the settings panel
    pub fn save_custom(&mut self, analytics: bool, marketing: bool, now: DateTime<Utc>) -> CookiePreferences {
        let prefs = CookiePreferences::new(analytics, marketing, now);
        info!(analytics, marketing, "Cookie consent stored");
        self.stored = Some(prefs);
        prefs
    }

    /// JSON to persist under [`STORAGE_KEY`], or `None` before any choice
    pub fn to_json(&self) -> Result<Option<String>, serde_json::Error> {
        self.stored.as_ref().map(serde_json::to_string).transpose()
    }
}
