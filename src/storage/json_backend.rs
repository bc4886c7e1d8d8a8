use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use super::{InMemorySource, LedgerSnapshot, LedgerSource};
use crate::domain::{AdHocRecord, FixedObligation, QueryWindow, Reminder};
use crate::errors::EngineResult;

const TMP_SUFFIX: &str = "tmp";

/// A [`LedgerSource`] backed by a JSON snapshot file, read once at load time.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
    inner: InMemorySource,
}

impl JsonSource {
    pub fn load(path: impl Into<PathBuf>) -> EngineResult<Self> {
        let path = path.into();
        let snapshot = load_snapshot_from_path(&path)?;
        Ok(Self {
            path,
            inner: InMemorySource::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        self.inner.snapshot()
    }
}

impl LedgerSource for JsonSource {
    fn fetch_expenses(&self, window: &QueryWindow) -> EngineResult<Vec<AdHocRecord>> {
        self.inner.fetch_expenses(window)
    }

    fn fetch_fixed_obligations(
        &self,
        active_only: bool,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<FixedObligation>> {
        self.inner.fetch_fixed_obligations(active_only, as_of)
    }

    fn fetch_income(&self, window: &QueryWindow) -> EngineResult<Vec<AdHocRecord>> {
        self.inner.fetch_income(window)
    }

    fn fetch_reminders(&self) -> EngineResult<Vec<Reminder>> {
        self.inner.fetch_reminders()
    }
}

pub fn save_snapshot_to_path(snapshot: &LedgerSnapshot, path: &Path) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_snapshot_from_path(path: &Path) -> EngineResult<LedgerSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&data)?;
    Ok(snapshot)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> EngineResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
