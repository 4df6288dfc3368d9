//! Store configuration loaded from environment variables.
//!
//! - `STORE_BACKEND`      = `supabase` (default) | `memory`
//! - `SUPABASE_URL`       = project URL, e.g. `https://xyz.supabase.co` (required for supabase)
//! - `SUPABASE_KEY`       = service-role key (required for supabase)
//! - `STORE_TIMEOUT_SECS` = request timeout, default 15

use std::{str::FromStr, sync::Arc, time::Duration};

use crate::{
    errors::{Result, StoreError},
    memory::InMemoryStore,
    store::ContextStore,
    supabase::SupabaseStore,
};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Supabase,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" | "postgrest" => Ok(StoreBackend::Supabase),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(StoreError::NotConfigured(format!(
                "unsupported STORE_BACKEND `{other}` (expected `supabase` or `memory`)"
            ))),
        }
    }
}

/// Connection settings for the selected backend.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Reads the configuration and checks that the selected backend has what it needs.
    ///
    /// # Errors
    /// [`StoreError::NotConfigured`] naming the missing or malformed variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |k: &str| get(k).filter(|v| !v.trim().is_empty());

        let backend = match get("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None => StoreBackend::Supabase,
        };

        let timeout = match get("STORE_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(StoreError::NotConfigured(
                        "STORE_TIMEOUT_SECS must be at least 1 second".into(),
                    ));
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    return Err(StoreError::NotConfigured(
                        "STORE_TIMEOUT_SECS must be a whole number".into(),
                    ));
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let cfg = Self {
            backend,
            supabase_url: get("SUPABASE_URL"),
            supabase_key: get("SUPABASE_KEY"),
            timeout,
        };

        if cfg.backend == StoreBackend::Supabase {
            let url = cfg.supabase_url.as_deref().ok_or_else(|| {
                StoreError::NotConfigured("missing required environment variable: SUPABASE_URL".into())
            })?;
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(StoreError::NotConfigured(
                    "SUPABASE_URL must start with http:// or https://".into(),
                ));
            }
            if cfg.supabase_key.is_none() {
                return Err(StoreError::NotConfigured(
                    "missing required environment variable: SUPABASE_KEY".into(),
                ));
            }
        }

        Ok(cfg)
    }

    /// Builds the configured backend.
    pub fn build(&self) -> Result<Arc<dyn ContextStore>> {
        Ok(match self.backend {
            StoreBackend::Memory => Arc::new(InMemoryStore::new()),
            StoreBackend::Supabase => {
                let url = self.supabase_url.as_deref().unwrap_or_default();
                let key = self.supabase_key.as_deref().unwrap_or_default();
                Arc::new(SupabaseStore::new(url, key, self.timeout)?)
            }
        })
    }
}
