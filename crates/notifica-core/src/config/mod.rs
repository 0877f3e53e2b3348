//! Client configuration resolution.
//!
//! `ClientConfig` is what embedders hand us (from code, a config file, or the
//! environment). `ConfigResolver` validates it into a `ResolvedConfig` that the
//! transport, caches, and poller share for the lifetime of a session.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::labels::{LabelOverrides, Labels, Locale};
use crate::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://app.usenotifica.com.br";
pub const DEFAULT_POLLING_INTERVAL_MS: i64 = 30_000;
pub const DEFAULT_PAGE_SIZE: usize = 20;

const ENV_API_URL: &str = "NOTIFICA_API_URL";
const ENV_PUBLISHABLE_KEY: &str = "NOTIFICA_PUBLISHABLE_KEY";
const ENV_API_KEY: &str = "NOTIFICA_API_KEY";
const ENV_SUBSCRIBER_ID: &str = "NOTIFICA_SUBSCRIBER_ID";
const ENV_POLLING_INTERVAL_MS: &str = "NOTIFICA_POLLING_INTERVAL_MS";
const ENV_LOCALE: &str = "NOTIFICA_LOCALE";
const ENV_PAGE_SIZE: &str = "NOTIFICA_PAGE_SIZE";
const ENV_ORIGIN: &str = "NOTIFICA_ORIGIN";

/// Unvalidated connection parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub publishable_key: Option<String>,
    /// Legacy name for `publishable_key`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub subscriber_id: Option<String>,
    #[serde(default)]
    pub polling_interval_ms: Option<i64>,
    #[serde(default)]
    pub locale: Option<Locale>,
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Origin reported to the API and quoted in 403 diagnostics.
    #[serde(default)]
    pub origin: Option<String>,
    /// Wording that replaces the locale's defaults.
    #[serde(default)]
    pub labels: LabelOverrides,
}

impl ClientConfig {
    /// Read `NOTIFICA_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| non_empty(lookup(name));

        let polling_interval_ms = read(ENV_POLLING_INTERVAL_MS)
            .map(|raw| {
                raw.parse::<i64>().map_err(|error| {
                    Error::Configuration(format!(
                        "{ENV_POLLING_INTERVAL_MS} must be an integer: {error}"
                    ))
                })
            })
            .transpose()?;
        let page_size = read(ENV_PAGE_SIZE)
            .map(|raw| {
                raw.parse::<usize>().map_err(|error| {
                    Error::Configuration(format!(
                        "{ENV_PAGE_SIZE} must be a positive integer: {error}"
                    ))
                })
            })
            .transpose()?;
        let locale = read(ENV_LOCALE).map(|raw| raw.parse::<Locale>()).transpose()?;

        Ok(Self {
            api_url: read(ENV_API_URL),
            publishable_key: read(ENV_PUBLISHABLE_KEY),
            api_key: read(ENV_API_KEY),
            subscriber_id: read(ENV_SUBSCRIBER_ID),
            polling_interval_ms,
            locale,
            page_size,
            origin: read(ENV_ORIGIN),
            labels: LabelOverrides::from_lookup(read),
        })
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            publishable_key: other.publishable_key.or(self.publishable_key),
            api_key: other.api_key.or(self.api_key),
            subscriber_id: other.subscriber_id.or(self.subscriber_id),
            polling_interval_ms: other.polling_interval_ms.or(self.polling_interval_ms),
            locale: other.locale.or(self.locale),
            page_size: other.page_size.or(self.page_size),
            origin: other.origin.or(self.origin),
            labels: self.labels.merge(other.labels),
        }
    }
}

/// Validated configuration shared by every component of a session.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_url: String,
    pub publishable_key: String,
    pub subscriber_id: String,
    /// Raw interval; `<= 0` disables polling.
    pub polling_interval_ms: i64,
    pub locale: Locale,
    pub page_size: usize,
    pub origin: Option<String>,
    pub labels: LabelOverrides,
}

impl ResolvedConfig {
    /// Polling cadence, or `None` when polling is disabled.
    #[must_use]
    pub fn polling_interval(&self) -> Option<Duration> {
        u64::try_from(self.polling_interval_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Whether two configs can share the same caches.
    ///
    /// A different subscriber, endpoint, credential, origin or page size means
    /// cached items belong to a different scope and must be rebuilt.
    #[must_use]
    pub fn same_scope(&self, other: &Self) -> bool {
        self.subscriber_id == other.subscriber_id
            && self.api_url == other.api_url
            && self.publishable_key == other.publishable_key
            && self.page_size == other.page_size
            && self.origin == other.origin
    }

    /// The locale's label table with any overrides applied.
    #[must_use]
    pub fn label_table(&self) -> Labels {
        self.locale.labels().with_overrides(&self.labels)
    }

    /// Whether the key is a development (`pk_test_`) key.
    #[must_use]
    pub fn is_test_key(&self) -> bool {
        self.publishable_key.starts_with("pk_test_")
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ResolvedConfig")
            .field("api_url", &self.api_url)
            .field("publishable_key", &"[REDACTED]")
            .field("subscriber_id", &self.subscriber_id)
            .field("polling_interval_ms", &self.polling_interval_ms)
            .field("locale", &self.locale)
            .field("page_size", &self.page_size)
            .field("origin", &self.origin)
            .field("labels", &self.labels)
            .finish()
    }
}

/// Turns `ClientConfig` into `ResolvedConfig`.
///
/// Holds the "legacy key already reported" flag, so the deprecation warning
/// fires at most once per resolver rather than once per resolution.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    legacy_key_warned: AtomicBool,
}

impl ConfigResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, config: ClientConfig) -> Result<ResolvedConfig> {
        let publishable_key = self.resolve_key(config.publishable_key, config.api_key)?;
        let subscriber_id = non_empty(config.subscriber_id).ok_or_else(|| {
            Error::Configuration("missing subscriber id".to_string())
        })?;
        let api_url = normalize_api_url(config.api_url.as_deref().unwrap_or(DEFAULT_API_URL))?;

        let page_size = config.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(Error::Configuration(
                "page size must be at least 1".to_string(),
            ));
        }

        let polling_interval_ms = config
            .polling_interval_ms
            .unwrap_or(DEFAULT_POLLING_INTERVAL_MS);
        if polling_interval_ms <= 0 {
            tracing::debug!(polling_interval_ms, "Polling disabled by configuration");
        }

        Ok(ResolvedConfig {
            api_url,
            publishable_key,
            subscriber_id,
            polling_interval_ms,
            locale: config.locale.unwrap_or_default(),
            page_size,
            origin: non_empty(config.origin),
            labels: config.labels,
        })
    }

    /// Whether this resolver has already emitted the legacy-key warning.
    pub fn legacy_key_warned(&self) -> bool {
        self.legacy_key_warned.load(Ordering::Relaxed)
    }

    fn resolve_key(
        &self,
        publishable_key: Option<String>,
        api_key: Option<String>,
    ) -> Result<String> {
        if let Some(key) = non_empty(publishable_key) {
            return Ok(key);
        }

        if let Some(key) = non_empty(api_key) {
            if !self.legacy_key_warned.swap(true, Ordering::Relaxed) {
                tracing::warn!(
                    "`api_key` is deprecated and will be removed in 0.3.0; use `publishable_key` instead"
                );
            }
            return Ok(key);
        }

        Err(Error::Configuration(
            "missing publishable key; get one from the Notifica dashboard".to_string(),
        ))
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Configuration("API URL must not be empty".to_string()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Configuration(
            "API URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trimmed value, or `None` when missing or blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
