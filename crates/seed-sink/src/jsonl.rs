//! JSONL (JSON Lines) record sink.
//!
//! Each model is written to `<output_dir>/<Model>.jsonl`, one JSON object
//! per line. Writes are buffered per model and flushed by
//! [`RecordSink::flush`], before reading a file back, and before truncating
//! it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use seed_core::{SeedRecord, SeedValue};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::SinkError;
use crate::traits::RecordSink;

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

struct ModelFile {
    writer: BufWriter<File>,
    next_id: i64,
}

/// Sink appending records to one JSONL file per model.
pub struct JsonlSink {
    output_dir: PathBuf,
    files: Mutex<HashMap<String, ModelFile>>,
}

impl JsonlSink {
    /// Create a sink writing into `output_dir`, creating the directory when
    /// missing.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, SinkError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;
        info!("Writing JSONL output to '{}'", output_dir.display());
        Ok(Self {
            output_dir,
            files: Mutex::new(HashMap::new()),
        })
    }

    /// Path of the file holding `model`.
    pub fn path_for(&self, model: &str) -> PathBuf {
        self.output_dir.join(format!("{model}.jsonl"))
    }

    fn count_lines(path: &Path) -> Result<u64, SinkError> {
        if !path.exists() {
            return Ok(0);
        }
        let reader = BufReader::new(File::open(path)?);
        let mut count = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn open(&self, model: &str) -> Result<ModelFile, SinkError> {
        let path = self.path_for(model);
        let existing = Self::count_lines(&path)?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!("Opened '{}' ({} existing lines)", path.display(), existing);
        Ok(ModelFile {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
            next_id: existing as i64,
        })
    }
}

#[async_trait::async_trait]
impl RecordSink for JsonlSink {
    async fn create(&self, record: &SeedRecord) -> Result<SeedValue> {
        let mut files = self.files.lock().await;
        let file = match files.entry(record.model.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(self.open(&record.model)?),
        };

        let mut fields = record.to_json();
        let id = match record.id().filter(|v| !v.is_null()) {
            Some(id) => id.clone(),
            None => {
                file.next_id += 1;
                let id = SeedValue::Int(file.next_id);
                if let Some(id_field) = &record.id_field {
                    fields.insert(id_field.clone(), id.to_json());
                }
                id
            }
        };

        let line = serde_json::to_string(&serde_json::Value::Object(fields))
            .map_err(SinkError::from)?;
        writeln!(file.writer, "{line}").map_err(SinkError::from)?;

        Ok(id)
    }

    async fn delete_all(&self, model: &str) -> Result<u64> {
        let mut files = self.files.lock().await;
        if let Some(mut file) = files.remove(model) {
            file.writer.flush().map_err(SinkError::from)?;
        }

        let path = self.path_for(model);
        let removed = Self::count_lines(&path)?;
        if path.exists() {
            File::create(&path).map_err(SinkError::from)?;
        }
        debug!("Truncated '{}' ({} records)", path.display(), removed);
        Ok(removed)
    }

    async fn existing_records(&self, model: &str) -> Result<Vec<SeedRecord>> {
        let mut files = self.files.lock().await;
        if let Some(file) = files.get_mut(model) {
            file.writer.flush().map_err(SinkError::from)?;
        }

        let path = self.path_for(model);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path).map_err(SinkError::from)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(SinkError::from)?;
            if line.trim().is_empty() {
                continue;
            }
            let value: serde_json::Value =
                serde_json::from_str(&line).map_err(SinkError::from)?;
            let mut record = SeedRecord::new(model, records.len() as u64);
            if let serde_json::Value::Object(map) = value {
                for (name, field) in &map {
                    record.insert(name.clone(), SeedValue::from_json(field));
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    async fn flush(&self) -> Result<()> {
        let mut files = self.files.lock().await;
        for file in files.values_mut() {
            file.writer.flush().map_err(SinkError::from)?;
        }
        Ok(())
    }
}
