use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use crate::application::{DashboardData, DashboardService};
use crate::config::DashboardConfig;
use crate::domain::{chart::Timeframe, errors::AppError, logging::LogComponent};
use crate::infrastructure::storage::DashboardSnapshot;
use crate::time_utils::{self, format_date_label, parse_iso_date};
use crate::log_info;

fn to_js(err: AppError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(e.into()))
}

/// Fixed-decimal number for the rates panel, `-` when missing
#[wasm_bindgen(js_name = formatNumber)]
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    time_utils::format_number(value, decimals)
}

/// Amount with its currency symbol, `-` when missing
#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(value: Option<f64>, currency: &str) -> String {
    time_utils::format_currency(value, currency)
}

/// JavaScript bridge. Holds the timeline position and hands every query to
/// the application layer; results cross the boundary as JSON strings.
#[wasm_bindgen]
pub struct FxDashboardApi {
    service: DashboardService,
    date: Option<NaiveDate>,
    timeframe: Timeframe,
}

#[wasm_bindgen]
impl FxDashboardApi {
    /// Build from an optional config document; missing fields use defaults.
    /// In demo mode the bundled sample is loaded straight away.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<FxDashboardApi, JsValue> {
        let config = match config_json.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => DashboardConfig::from_json(text).map_err(to_js)?,
            _ => DashboardConfig::default(),
        };
        let timeframe = config.default_timeframe;
        let demo_mode = config.demo_mode;
        let mut api = Self { service: DashboardService::new(config), date: None, timeframe };
        if demo_mode {
            api.load_demo()?;
        }
        Ok(api)
    }

    #[wasm_bindgen(getter, js_name = demoMode)]
    pub fn demo_mode(&self) -> bool {
        self.service.config().demo_mode
    }

    #[wasm_bindgen(js_name = loadDemo)]
    pub fn load_demo(&mut self) -> Result<(), JsValue> {
        self.load(DashboardData::demo())
    }

    /// Replay a snapshot for the configured default pair
    #[wasm_bindgen(js_name = loadSnapshot)]
    pub fn load_snapshot(&mut self, snapshot_json: &str) -> Result<(), JsValue> {
        let snapshot = DashboardSnapshot::from_json(snapshot_json).map_err(to_js)?;
        let pair = self.service.config().default_pair.clone();
        let data = DashboardData::from_snapshot(&snapshot, &pair).ok_or_else(|| {
            to_js(AppError::CacheError(format!("snapshot has no history for {}", pair)))
        })?;
        self.load(data)
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let data = self
            .service
            .data()
            .ok_or_else(|| to_js(AppError::CacheError("nothing loaded".to_string())))?;
        data.to_snapshot().to_json().map_err(to_js)
    }

    #[wasm_bindgen(js_name = setDate)]
    pub fn set_date(&mut self, date: &str) -> Result<(), JsValue> {
        self.date = Some(parse_iso_date(date).map_err(to_js)?);
        Ok(())
    }

    /// Unknown codes select `1D`
    #[wasm_bindgen(js_name = setTimeframe)]
    pub fn set_timeframe(&mut self, code: &str) {
        self.timeframe = Timeframe::from_code(code);
    }

    #[wasm_bindgen(getter)]
    pub fn timeframe(&self) -> String {
        self.timeframe.code().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn date(&self) -> Option<String> {
        self.date.map(|d| d.to_string())
    }

    #[wasm_bindgen(js_name = dateLabel)]
    pub fn date_label(&self) -> Option<String> {
        self.date.map(format_date_label)
    }

    #[wasm_bindgen(js_name = availableDatesJson)]
    pub fn available_dates_json(&self) -> Result<String, JsValue> {
        json(&self.service.available_dates())
    }

    /// Serialized view for the current date, `null` before anything is loaded
    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        let view = self.date.and_then(|date| self.service.view(date, self.timeframe));
        json(&view)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl FxDashboardApi {
    /// Load the cached snapshot from web storage. Returns `false` when
    /// nothing usable is cached, and in demo mode, which keeps the sample.
    #[wasm_bindgen(js_name = loadFromStorage)]
    pub fn load_from_storage(&mut self) -> Result<bool, JsValue> {
        use crate::infrastructure::storage::{LocalStorageSnapshotStore, SnapshotStore};

        if self.service.config().demo_mode {
            return Ok(false);
        }

        let keys = self.service.config().storage_keys.clone();
        let store = LocalStorageSnapshotStore::new(keys).map_err(to_js)?;
        let pair = self.service.config().default_pair.clone();
        match store.load().map_err(to_js)? {
            Some(snapshot) => match DashboardData::from_snapshot(&snapshot, &pair) {
                Some(data) => self.load(data).map(|_| true),
                None => Ok(false),
            },
            None => Ok(false),
        }
    }

    #[wasm_bindgen(js_name = saveToStorage)]
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        use crate::infrastructure::storage::{LocalStorageSnapshotStore, SnapshotStore};

        let data = self
            .service
            .data()
            .ok_or_else(|| to_js(AppError::CacheError("nothing loaded".to_string())))?;
        let mut snapshot = data.to_snapshot();
        snapshot.last_update = Some(String::from(js_sys::Date::new_0().to_iso_string()));
        let mut store =
            LocalStorageSnapshotStore::new(self.service.config().storage_keys.clone()).map_err(to_js)?;
        store.save(&snapshot).map_err(to_js)
    }
}

impl FxDashboardApi {
    /// Load `data` and move the timeline to its latest date
    fn load(&mut self, data: DashboardData) -> Result<(), JsValue> {
        self.service.load(data).map_err(to_js)?;
        self.date = self.service.latest_date();
        log_info!(
            LogComponent::Presentation("FxDashboardApi"),
            "timeline positioned at {:?}",
            self.date
        );
        Ok(())
    }
}
