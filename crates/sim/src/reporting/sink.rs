use crate::errors::SinkError;
use crate::statistics::Snapshot;

/// Receiver of sampled statistics.
///
/// The driver calls `receive` synchronously, once per replicate, on sampled
/// generations only, and `finish` once when the run terminates. Sinks must
/// not hold on to the snapshot reference.
pub trait StatisticsSink: Send {
    /// Short label used in log messages and errors.
    fn name(&self) -> &str;

    fn receive(
        &mut self,
        generation: usize,
        replicate: usize,
        snapshot: &Snapshot,
    ) -> Result<(), SinkError>;

    /// Flush any buffered output.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
