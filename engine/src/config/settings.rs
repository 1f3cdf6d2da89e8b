// Dashboard settings, loaded from a JSON file and/or environment variables
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

/// Opaque identifiers of the four sheet tabs.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SheetIds {
    pub revenue: String,
    pub payments: String,
    pub products: String,
    pub customers: String,
}

impl Default for SheetIds {
    fn default() -> Self {
        SheetIds {
            revenue: "faturamento".to_string(),
            payments: "pagamentos".to_string(),
            products: "produtos".to_string(),
            customers: "clientes".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    pub sheets: SheetIds,
    pub source_dir: PathBuf,
    pub fetch_timeout_ms: u64,
    // Matched case-insensitively as substrings of the method name.
    pub negative_payment_methods: Vec<String>,
    pub inactivity_days: i64,
    pub top_products: usize,
    pub top_clients: usize,
    pub top_categories: usize,
    pub recurrence_cap: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            sheets: SheetIds::default(),
            source_dir: PathBuf::from("data"),
            fetch_timeout_ms: 10_000,
            negative_payment_methods: vec!["vale presente".to_string()],
            inactivity_days: 60,
            top_products: 10,
            top_clients: 5,
            top_categories: 8,
            recurrence_cap: 10,
        }
    }
}

impl DashboardSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let settings: DashboardSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        tracing::debug!(config = %path.display(), "Loaded dashboard settings");
        Ok(settings)
    }

    /// Reads the file named by `DASHBOARD_CONFIG` when set, defaults otherwise,
    /// then applies environment overrides.
    pub fn from_env_or_default() -> Result<Self> {
        let base = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim())?,
            _ => Self::default(),
        };
        Ok(base.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut String); 4] = [
            ("DASHBOARD_GID_FATURAMENTO", &mut self.sheets.revenue),
            ("DASHBOARD_GID_PAGAMENTOS", &mut self.sheets.payments),
            ("DASHBOARD_GID_PRODUTOS", &mut self.sheets.products),
            ("DASHBOARD_GID_CLIENTES", &mut self.sheets.customers),
        ];
        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = value.trim().to_string();
            }
        }
        if let Some(dir) = lookup("DASHBOARD_SOURCE_DIR").filter(|v| !v.trim().is_empty()) {
            self.source_dir = PathBuf::from(dir.trim());
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ids = [
            &self.sheets.revenue,
            &self.sheets.payments,
            &self.sheets.products,
            &self.sheets.customers,
        ];
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(EngineError::ConfigError("sheet ids must not be empty".to_string()));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(EngineError::ConfigError("fetch_timeout_ms must be greater than 0".to_string()));
        }
        if self.recurrence_cap == 0 {
            return Err(EngineError::ConfigError("recurrence_cap must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
