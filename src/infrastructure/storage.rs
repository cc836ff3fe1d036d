use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::StorageKeys;
use crate::domain::errors::{AppError, CacheResult};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{CurrencyPair, PricePoint};
use crate::domain::rates::RatePoint;
use crate::{log_debug, log_warn};

/// Everything the dashboard persists between sessions. Price series are
/// stored already enriched and replayed without recomputation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub historical_data: HashMap<CurrencyPair, Vec<PricePoint>>,
    pub interest_rates: HashMap<String, Vec<RatePoint>>,
    pub last_update: Option<String>,
}

impl DashboardSnapshot {
    pub fn to_json(&self) -> CacheResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CacheResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.historical_data.values().all(Vec::is_empty)
            && self.interest_rates.values().all(Vec::is_empty)
    }
}

/// Key-value persistence for [`DashboardSnapshot`].
///
/// The snapshot is split over the three configured keys so each part can be
/// refreshed on its own. Implementors only provide raw string access.
pub trait SnapshotStore {
    fn keys(&self) -> &StorageKeys;
    fn read(&self, key: &str) -> CacheResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> CacheResult<()>;
    fn remove(&mut self, key: &str) -> CacheResult<()>;

    /// `Ok(None)` when nothing was ever saved
    fn load(&self) -> CacheResult<Option<DashboardSnapshot>> {
        let keys = self.keys().clone();
        let historical = self.read(&keys.historical_data)?;
        let rates = self.read(&keys.interest_rates)?;
        if historical.is_none() && rates.is_none() {
            return Ok(None);
        }

        let historical_data = match non_blank("historical data", historical) {
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                log_warn!(
                    LogComponent::Infrastructure("Storage"),
                    "cached historical data is unreadable: {}",
                    e
                );
                AppError::CacheError(format!("historical data: {}", e))
            })?,
            None => HashMap::new(),
        };
        let interest_rates = match non_blank("interest rates", rates) {
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                log_warn!(
                    LogComponent::Infrastructure("Storage"),
                    "cached interest rates are unreadable: {}",
                    e
                );
                AppError::CacheError(format!("interest rates: {}", e))
            })?,
            None => HashMap::new(),
        };
        let last_update = self.read(&keys.last_update_time)?;

        log_debug!(
            LogComponent::Infrastructure("Storage"),
            "loaded snapshot: {} pairs, {} currencies",
            historical_data.len(),
            interest_rates.len()
        );
        Ok(Some(DashboardSnapshot { historical_data, interest_rates, last_update }))
    }

    fn save(&mut self, snapshot: &DashboardSnapshot) -> CacheResult<()> {
        let keys = self.keys().clone();
        self.write(&keys.historical_data, &serde_json::to_string(&snapshot.historical_data)?)?;
        self.write(&keys.interest_rates, &serde_json::to_string(&snapshot.interest_rates)?)?;
        match &snapshot.last_update {
            Some(stamp) => self.write(&keys.last_update_time, stamp)?,
            None => self.remove(&keys.last_update_time)?,
        }
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        let keys = self.keys().clone();
        self.remove(&keys.historical_data)?;
        self.remove(&keys.interest_rates)?;
        self.remove(&keys.last_update_time)
    }
}

fn non_blank(what: &str, raw: Option<String>) -> Option<String> {
    match raw {
        Some(text) if text.trim().is_empty() => {
            log_warn!(LogComponent::Infrastructure("Storage"), "cached {} is blank", what);
            None
        }
        other => other,
    }
}

/// In-process store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    keys: StorageKeys,
    entries: HashMap<String, String>,
}

impl MemorySnapshotStore {
    pub fn new(keys: StorageKeys) -> Self {
        Self { keys, entries: HashMap::new() }
    }

    /// Raw value under `key`, for inspecting what was persisted
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    fn read(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> CacheResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorageSnapshotStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use web_sys::Storage;

    use super::SnapshotStore;
    use crate::config::StorageKeys;
    use crate::domain::errors::{AppError, CacheResult};
    use crate::domain::logging::LogComponent;
    use crate::log_warn;

    /// `window.localStorage`, falling back to `sessionStorage` when a write
    /// is refused (quota, private browsing)
    pub struct LocalStorageSnapshotStore {
        keys: StorageKeys,
        local: Option<Storage>,
        session: Option<Storage>,
    }

    impl LocalStorageSnapshotStore {
        pub fn new(keys: StorageKeys) -> CacheResult<Self> {
            let window = web_sys::window()
                .ok_or_else(|| AppError::CacheError("window is not available".to_string()))?;
            let local = window.local_storage().ok().flatten();
            let session = window.session_storage().ok().flatten();
            if local.is_none() && session.is_none() {
                return Err(AppError::CacheError("no web storage available".to_string()));
            }
            Ok(Self { keys, local, session })
        }
    }

    fn js_error(op: &str, key: &str, err: wasm_bindgen::JsValue) -> AppError {
        AppError::CacheError(format!("{} '{}' failed: {:?}", op, key, err))
    }

    impl SnapshotStore for LocalStorageSnapshotStore {
        fn keys(&self) -> &StorageKeys {
            &self.keys
        }

        fn read(&self, key: &str) -> CacheResult<Option<String>> {
            for storage in self.local.iter().chain(self.session.iter()) {
                if let Some(value) = storage.get_item(key).map_err(|e| js_error("read", key, e))? {
                    return Ok(Some(value));
                }
            }
            Ok(None)
        }

        fn write(&mut self, key: &str, value: &str) -> CacheResult<()> {
            if let Some(local) = &self.local {
                match local.set_item(key, value) {
                    Ok(()) => return Ok(()),
                    Err(e) => {
                        log_warn!(
                            LogComponent::Infrastructure("Storage"),
                            "localStorage write of '{}' refused, trying sessionStorage: {:?}",
                            key,
                            e
                        );
                    }
                }
            }
            match &self.session {
                Some(session) => session.set_item(key, value).map_err(|e| js_error("write", key, e)),
                None => Err(AppError::CacheError(format!("write '{}' failed: no storage left", key))),
            }
        }

        fn remove(&mut self, key: &str) -> CacheResult<()> {
            for storage in self.local.iter().chain(self.session.iter()) {
                storage.remove_item(key).map_err(|e| js_error("remove", key, e))?;
            }
            Ok(())
        }
    }
}
