//! Persistence hand-off for projection snapshots
//!
//! A run produces one complete snapshot set per plan. Sinks replace the
//! stored set for that plan as a whole; readers never see a mix of old and
//! new rows.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SinkError;
use crate::projection::{ProjectionResult, SimulationSnapshot};

/// Destination for a plan's snapshot set
pub trait SnapshotSink {
    /// Replace every stored snapshot for `plan_id` with `snapshots`
    fn replace_snapshots(&mut self, plan_id: u32, snapshots: &[SimulationSnapshot]) -> Result<(), SinkError>;

    fn store(&mut self, result: &ProjectionResult) -> Result<(), SinkError> {
        self.replace_snapshots(result.plan_id, &result.snapshots)
    }
}

/// Keeps snapshot sets in memory, keyed by plan
#[derive(Debug, Default)]
pub struct MemorySink {
    plans: HashMap<u32, Vec<SimulationSnapshot>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self, plan_id: u32) -> Option<&[SimulationSnapshot]> {
        self.plans.get(&plan_id).map(Vec::as_slice)
    }
}

impl SnapshotSink for MemorySink {
    fn replace_snapshots(&mut self, plan_id: u32, snapshots: &[SimulationSnapshot]) -> Result<(), SinkError> {
        self.plans.insert(plan_id, snapshots.to_vec());
        Ok(())
    }
}

/// Writes one `plan_<id>.csv` per plan into a directory.
///
/// Rows go to a temporary file first, which is then renamed over the
/// previous file.
#[derive(Debug, Clone)]
pub struct CsvDirectorySink {
    dir: PathBuf,
}

#[derive(serde::Serialize)]
struct CsvRow {
    year: i32,
    age: i32,
    income: i64,
    expenses: i64,
    savings: i64,
    investments: i64,
    balance: i64,
}

impl From<&SimulationSnapshot> for CsvRow {
    fn from(s: &SimulationSnapshot) -> Self {
        Self {
            year: s.year,
            age: s.age,
            income: s.income,
            expenses: s.expenses,
            savings: s.savings,
            investments: s.investments,
            balance: s.balance,
        }
    }
}

impl CsvDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, plan_id: u32) -> PathBuf {
        self.dir.join(format!("plan_{}.csv", plan_id))
    }

    fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SinkError + '_ {
        move |source| SinkError::Io { path: path.to_path_buf(), source }
    }
}

impl SnapshotSink for CsvDirectorySink {
    fn replace_snapshots(&mut self, plan_id: u32, snapshots: &[SimulationSnapshot]) -> Result<(), SinkError> {
        fs::create_dir_all(&self.dir).map_err(Self::io_err(&self.dir))?;

        let target = self.path_for(plan_id);
        let tmp = self.dir.join(format!(".plan_{}.csv.tmp", plan_id));

        let write = || -> Result<(), SinkError> {
            let mut writer = csv::Writer::from_path(&tmp)?;
            for snapshot in snapshots {
                writer.serialize(CsvRow::from(snapshot))?;
            }
            writer.flush().map_err(Self::io_err(&tmp))?;
            Ok(())
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        fs::rename(&tmp, &target).map_err(Self::io_err(&target))?;
        log::debug!("wrote {} snapshots to {}", snapshots.len(), target.display());
        Ok(())
    }
}
