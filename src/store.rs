use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::types::{SessionResult, HISTORY_LIMIT};

/// Bounded log of finished sessions, newest first.
pub trait ResultStore {
    /// Records a result, dropping the oldest entries past the capacity.
    fn append(&mut self, result: SessionResult) -> Result<()>;

    /// Stored results, most recent first.
    fn list(&self) -> Vec<SessionResult>;
}

#[derive(Debug, Clone)]
pub struct MemoryResultStore {
    results: VecDeque<SessionResult>,
    capacity: usize,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_LIMIT)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, result: SessionResult) {
        self.results.push_front(result);
        self.results.truncate(self.capacity);
    }
}

impl Default for MemoryResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore for MemoryResultStore {
    fn append(&mut self, result: SessionResult) -> Result<()> {
        self.push(result);
        Ok(())
    }

    fn list(&self) -> Vec<SessionResult> {
        self.results.iter().cloned().collect()
    }
}

/// Result history kept in a JSON file, rewritten on every append.
#[derive(Debug)]
pub struct JsonFileResultStore {
    path: PathBuf,
    cache: MemoryResultStore,
}

impl JsonFileResultStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut cache = MemoryResultStore::new();

        if path.exists() {
            let file = File::open(&path)?;
            let stored: Vec<SessionResult> = serde_json::from_reader(BufReader::new(file))?;
            if stored.len() > HISTORY_LIMIT {
                warn!(
                    path = %path.display(),
                    stored = stored.len(),
                    limit = HISTORY_LIMIT,
                    "Result history over limit, trimming"
                );
            }
            // stored newest first; push oldest first to keep that order
            for result in stored.into_iter().take(HISTORY_LIMIT).rev() {
                cache.push(result);
            }
            info!(path = %path.display(), count = cache.results.len(), "Loaded result history");
        } else {
            debug!(path = %path.display(), "No result history yet");
        }

        Ok(Self { path, cache })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, results: &MemoryResultStore) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        serde_json::to_writer_pretty(file, &results.results)?;
        Ok(())
    }
}

impl ResultStore for JsonFileResultStore {
    /// The cached history only changes once the file write succeeds.
    fn append(&mut self, result: SessionResult) -> Result<()> {
        let mut updated = self.cache.clone();
        updated.push(result);
        self.save(&updated)?;
        self.cache = updated;
        debug!(path = %self.path.display(), count = self.cache.results.len(), "Saved result history");
        Ok(())
    }

    fn list(&self) -> Vec<SessionResult> {
        self.cache.list()
    }
}
