use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::SinkError;
use crate::reporting::StatisticsSink;
use crate::statistics::Snapshot;

/// One emitted snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub generation: usize,
    pub replicate: usize,
    pub snapshot: Snapshot,
}

/// In-memory sink keeping every emitted snapshot.
///
/// The recorder itself is moved into the driver; keep a clone (or a
/// [`TrajectoryRecorder::handle`]) to read the records afterwards.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryRecorder {
    records: Arc<Mutex<Vec<Record>>>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A second handle onto the same records.
    pub fn handle(&self) -> Self {
        self.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        // A poisoned lock only means a panic elsewhere; the data is still valid.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of all records in emission order.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// `(generation, value)` series of `stat` for one replicate. Undefined
    /// values are skipped.
    pub fn series(&self, replicate: usize, stat: &str) -> Vec<(usize, f64)> {
        self.lock()
            .iter()
            .filter(|r| r.replicate == replicate)
            .filter_map(|r| r.snapshot.get(stat).map(|v| (r.generation, v)))
            .collect()
    }
}

impl StatisticsSink for TrajectoryRecorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn receive(
        &mut self,
        generation: usize,
        replicate: usize,
        snapshot: &Snapshot,
    ) -> Result<(), SinkError> {
        self.lock().push(Record {
            generation,
            replicate,
            snapshot: snapshot.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_shares_records_between_handles() {
        let recorder = TrajectoryRecorder::new();
        let mut sink = recorder.handle();

        let mut s = Snapshot::new();
        s.insert("alleleFreq[0][0]", 0.5);
        sink.receive(0, 0, &s).unwrap();
        s.insert("alleleFreq[0][0]", 0.6);
        sink.receive(10, 0, &s).unwrap();
        sink.receive(10, 1, &s).unwrap();

        assert_eq!(recorder.len(), 3);
        assert_eq!(
            recorder.series(0, "alleleFreq[0][0]"),
            vec![(0, 0.5), (10, 0.6)]
        );
        assert!(recorder.series(2, "alleleFreq[0][0]").is_empty());
    }
}
