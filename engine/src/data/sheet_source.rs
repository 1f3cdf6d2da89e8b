// Sources of raw sheet text. Transport is an outside concern: the engine only
// asks "give me the CSV for this id, or fail".
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch(&self, sheet_id: &str) -> Result<String>;
}

/// Reads `<dir>/<sheet_id>.csv`, e.g. tabs downloaded from the spreadsheet export.
pub struct FileSheetSource {
    dir: PathBuf,
}

impl FileSheetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, sheet_id: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet_id))
    }
}

#[async_trait]
impl SheetSource for FileSheetSource {
    async fn fetch(&self, sheet_id: &str) -> Result<String> {
        let path = self.path_for(sheet_id);
        tracing::debug!(sheet = %sheet_id, path = %path.display(), "Reading sheet from file");
        match tokio::fs::read(&path).await {
            // Exports are UTF-8; a stray invalid byte should not lose the sheet.
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(EngineError::SourceFetch {
                sheet: sheet_id.to_string(),
                status: "not found".to_string(),
            }),
            Err(e) => Err(EngineError::SourceFetch {
                sheet: sheet_id.to_string(),
                status: e.to_string(),
            }),
        }
    }
}

/// In-memory sheets keyed by id.
#[derive(Debug, Clone, Default)]
pub struct StaticSheetSource {
    sheets: HashMap<String, String>,
}

impl StaticSheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, sheet_id: impl Into<String>, csv: impl Into<String>) -> Self {
        self.sheets.insert(sheet_id.into(), csv.into());
        self
    }
}

#[async_trait]
impl SheetSource for StaticSheetSource {
    async fn fetch(&self, sheet_id: &str) -> Result<String> {
        self.sheets
            .get(sheet_id)
            .cloned()
            .ok_or_else(|| EngineError::SourceFetch {
                sheet: sheet_id.to_string(),
                status: "not found".to_string(),
            })
    }
}
