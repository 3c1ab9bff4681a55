//! Run records: per-generation statistics and the best genome so far.
//!
//! The trainer hands records to a [`RecordSink`] and never looks at the
//! result beyond logging a warning, so a broken disk cannot stop a run.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimulationError;
use super::genome::GenomeId;

/// One agent's contribution to a generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationEntry {
    /// Genome the agent was built from.
    pub genome_id: GenomeId,
    /// Resources eaten over the generation.
    pub resources_eaten: u32,
    /// Fitness, survival bonus included.
    pub fitness: f32,
    /// Controller weights.
    pub weights: Vec<f32>,
}

/// Statistics of a finished generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation index.
    pub generation: u32,
    /// Mean resources eaten per agent.
    pub average_score: f32,
    /// One entry per agent, in agent id order.
    pub entries: Vec<GenerationEntry>,
}

/// The fittest genome seen so far in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    /// Generation in which the genome was evaluated.
    pub generation: u32,
    /// Its fitness.
    pub fitness: f32,
    /// Run it belongs to.
    pub run_id: String,
    /// Controller weights.
    pub weights: Vec<f32>,
}

/// Destination of run records.
pub trait RecordSink: Send {
    /// Stores the statistics of a finished generation.
    fn record_generation(&mut self, record: &GenerationRecord) -> Result<(), SimulationError>;

    /// Stores the current best genome.
    fn record_best(&mut self, record: &BestRecord) -> Result<(), SimulationError>;
}

/// Creates a run identifier from the current UTC time and a random suffix.
pub fn new_run_id() -> String {
    let suffix: u32 = rand::rng().random_range(0..0x0100_0000);
    format!("{}-{suffix:06x}", Utc::now().format("%Y%m%d-%H%M%S"))
}

/// Appends records to plain text files.
///
/// Generation lines go to `<stats_dir>/<run_id>.txt` as
/// `generation;resources_eaten;[w,...]`, one line per agent. Best records are
/// appended to a shared log as `fitness;<run_id>.txt;[w,...]`.
#[derive(Debug)]
pub struct FileRecordSink {
    stats_path: PathBuf,
    best_path: PathBuf,
    run_id: String,
}

impl FileRecordSink {
    /// Creates the stats directory if needed. Files are opened lazily on write.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(stats_dir: P, best_log: Q, run_id: &str) -> Result<Self, SimulationError> {
        fs::create_dir_all(stats_dir.as_ref())?;
        if let Some(parent) = best_log.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            stats_path: stats_dir.as_ref().join(format!("{run_id}.txt")),
            best_path: best_log.as_ref().to_path_buf(),
            run_id: run_id.to_string(),
        })
    }

    /// File receiving the generation lines of this run.
    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }

    fn append(path: &Path) -> Result<BufWriter<File>, SimulationError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(BufWriter::new(file))
    }
}

impl RecordSink for FileRecordSink {
    fn record_generation(&mut self, record: &GenerationRecord) -> Result<(), SimulationError> {
        let mut out = Self::append(&self.stats_path)?;
        for entry in &record.entries {
            let weights = serde_json::to_string(&entry.weights)?;
            writeln!(out, "{};{};{}", record.generation, entry.resources_eaten, weights)?;
        }
        out.flush()?;
        Ok(())
    }

    fn record_best(&mut self, record: &BestRecord) -> Result<(), SimulationError> {
        let mut out = Self::append(&self.best_path)?;
        let weights = serde_json::to_string(&record.weights)?;
        writeln!(out, "{};{}.txt;{}", record.fitness, self.run_id, weights)?;
        out.flush()?;
        Ok(())
    }
}

/// Keeps every record in memory.
///
/// Clones share the same storage, so a test can keep one handle and give the
/// other to a trainer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<MemoryRecords>>,
}

#[derive(Debug, Default)]
struct MemoryRecords {
    generations: Vec<GenerationRecord>,
    best: Vec<BestRecord>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryRecords> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generation records in emission order.
    pub fn generations(&self) -> Vec<GenerationRecord> {
        self.lock().generations.clone()
    }

    /// Best records in emission order.
    pub fn best(&self) -> Vec<BestRecord> {
        self.lock().best.clone()
    }
}

impl RecordSink for MemorySink {
    fn record_generation(&mut self, record: &GenerationRecord) -> Result<(), SimulationError> {
        self.lock().generations.push(record.clone());
        Ok(())
    }

    fn record_best(&mut self, record: &BestRecord) -> Result<(), SimulationError> {
        self.lock().best.push(record.clone());
        Ok(())
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RecordSink for NullSink {
    fn record_generation(&mut self, _record: &GenerationRecord) -> Result<(), SimulationError> {
        Ok(())
    }

    fn record_best(&mut self, _record: &BestRecord) -> Result<(), SimulationError> {
        Ok(())
    }
}
