//! Site-level configuration, read from the environment the same way
//! for every binary that embeds the server.

use std::sync::Arc;

use anyhow::{Result, anyhow};

use crate::acontext::AContext;
use crate::store::Store;
use crate::util::{getenv, getenv_or};

/// Cookie checked against the configured admin token to enable edit
/// mode.
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub site_name: String,
    /// Tracking widget is injected on every GET when set.
    pub analytics_code: Option<String>,
    pub google_verification: Option<String>,
    pub bing_verification: Option<String>,
    pub yandex_verification: Option<String>,
    /// Viewers presenting this token get edit mode.
    pub admin_token: Option<String>,
    /// Local directory served under /static.
    pub asset_dir: Option<String>,
    /// Mount the /page/<name> route backed by the store.
    pub use_static_pages: bool,
}

impl SiteSettings {
    pub fn from_env() -> Result<Self> {
        Ok(SiteSettings {
            site_name: getenv_or("PAGEKIT_SITE_NAME", Some("pagekit site"))?,
            analytics_code: getenv("PAGEKIT_ANALYTICS_CODE")?,
            google_verification: getenv("PAGEKIT_GOOGLE_VERIFICATION")?,
            bing_verification: getenv("PAGEKIT_BING_VERIFICATION")?,
            yandex_verification: getenv("PAGEKIT_YANDEX_VERIFICATION")?,
            admin_token: getenv("PAGEKIT_ADMIN_TOKEN")?,
            asset_dir: getenv("PAGEKIT_ASSET_DIR")?,
            use_static_pages:
                getenv_or("PAGEKIT_USE_STATIC_PAGES", Some("1"))? == "1",
        })
    }

    /// Whether the requesting viewer is the site admin: requires a
    /// configured token, presented as cookie or query parameter.
    pub fn is_admin_request(&self, context: &AContext) -> bool {
        let token = match &self.admin_token {
            Some(t) => t,
            None => return false,
        };
        if let Some(v) = context.cookie(ADMIN_TOKEN_COOKIE) {
            if v == token {
                return true;
            }
        }
        if let Some(v) = context.get_param(ADMIN_TOKEN_COOKIE) {
            if v == *token {
                return true;
            }
        }
        false
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            site_name: "pagekit site".into(),
            analytics_code: None,
            google_verification: None,
            bing_verification: None,
            yandex_verification: None,
            admin_token: None,
            asset_dir: None,
            use_static_pages: true,
        }
    }
}

/// What every page handler gets to see of the site: the settings and
/// the record store, if one is configured.
pub struct Site {
    pub settings: SiteSettings,
    pub store: Option<Arc<dyn Store>>,
}

impl Site {
    pub fn new(settings: SiteSettings, store: Option<Arc<dyn Store>>) -> Arc<Self> {
        Arc::new(Site { settings, store })
    }

    /// The store, or an error for call sites that require one.
    pub fn xstore(&self) -> Result<&Arc<dyn Store>> {
        self.store.as_ref().ok_or_else(
            || anyhow!("no record store configured for this site"))
    }
}
