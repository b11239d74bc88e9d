use std::io::{self, Write};

use crate::errors::SinkError;
use crate::reporting::StatisticsSink;
use crate::statistics::Snapshot;

/// Prints one row per sampled generation: an optional `Generation g:` prefix
/// followed by each selected statistic of each replicate, tab separated.
///
/// ```text
/// Generation 0:	0.205	0.190	0.215
/// Generation 10:	0.230	0.150	0.260
/// ```
pub struct ConsoleSink<W: Write + Send> {
    writer: W,
    stats: Vec<String>,
    replicates: usize,
    precision: usize,
    show_generation: bool,
}

impl ConsoleSink<io::Stdout> {
    /// Print to standard output.
    pub fn stdout(stats: Vec<String>, replicates: usize) -> Self {
        Self::new(io::stdout(), stats, replicates)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W, stats: Vec<String>, replicates: usize) -> Self {
        Self {
            writer,
            stats,
            replicates,
            precision: 3,
            show_generation: true,
        }
    }

    /// Number of decimals per value (default 3).
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Toggle the `Generation g:` prefix (default on).
    pub fn show_generation(mut self, show: bool) -> Self {
        self.show_generation = show;
        self
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> StatisticsSink for ConsoleSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn receive(
        &mut self,
        generation: usize,
        replicate: usize,
        snapshot: &Snapshot,
    ) -> Result<(), SinkError> {
        if replicate == 0 && self.show_generation {
            write!(self.writer, "Generation {generation}:\t")?;
        }
        for stat in &self.stats {
            match snapshot.get(stat) {
                Some(value) => write!(self.writer, "{value:.prec$}\t", prec = self.precision)?,
                None => write!(self.writer, "NA\t")?,
            }
        }
        if replicate + 1 == self.replicates {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(value: f64) -> Snapshot {
        let mut s = Snapshot::new();
        s.insert("alleleFreq[0][0]", value);
        s
    }

    #[test]
    fn test_console_rows() {
        let mut sink = ConsoleSink::new(Vec::new(), vec!["alleleFreq[0][0]".into()], 2);
        sink.receive(0, 0, &snapshot(0.2)).unwrap();
        sink.receive(0, 1, &snapshot(0.25)).unwrap();
        sink.receive(10, 0, &snapshot(0.3)).unwrap();
        sink.receive(10, 1, &snapshot(0.125)).unwrap();
        sink.finish().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "Generation 0:\t0.200\t0.250\t\nGeneration 10:\t0.300\t0.125\t\n");
    }

    #[test]
    fn test_console_undefined_and_precision() {
        let mut sink = ConsoleSink::new(Vec::new(), vec!["R2[0][1]".into()], 1)
            .precision(4)
            .show_generation(false);
        let mut s = Snapshot::new();
        s.mark_undefined("R2[0][1]");
        sink.receive(3, 0, &s).unwrap();
        let mut s = Snapshot::new();
        s.insert("R2[0][1]", 0.5);
        sink.receive(4, 0, &s).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "NA\t\n0.5000\t\n");
    }
}
