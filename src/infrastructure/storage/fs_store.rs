use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::Report;
use crate::error::Result;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn get_path_for_key(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write_json_file<T: serde::Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
    ) -> Result<PathBuf> {
        self.ensure_dir(&self.data_dir)?;

        let path = self.get_path_for_key(key);
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    fn read_json_file<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&content)?))
        } else {
            Ok(None)
        }
    }
}

impl Storage for FileSystemStore {
    fn save_report(&self, report: &Report) -> Result<PathBuf> {
        // nanosecond suffix keeps two runs within the same second apart
        let now = Utc::now();
        let key = format!(
            "{}_{}_{:09}",
            StorageKeys::REPORT_PREFIX,
            now.timestamp(),
            now.timestamp_subsec_nanos()
        );
        self.write_json_file(&key, report)
    }

    fn load_report(&self, path: &Path) -> Result<Option<Report>> {
        self.read_json_file(path)
    }
}
