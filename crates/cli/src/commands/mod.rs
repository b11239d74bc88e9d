pub mod drift;
pub mod ld_decay;
pub mod run;

use anyhow::{Context, Result};
use std::io;
use wfsim_sim::reporting::{ConsoleSink, DelimitedFileSink, Record, TrajectoryRecorder};
use wfsim_sim::simulation::{RunSummary, SimulatorBuilder};

use crate::printing::progress_bar;

/// What a command run produced.
pub struct Outcome {
    pub summary: RunSummary,
    pub records: Vec<Record>,
}

/// Build the simulator with the console, file and in-memory sinks and run it
/// to completion.
pub fn execute(
    builder: SimulatorBuilder,
    console: Option<ConsoleSink<io::Stdout>>,
    output: Option<&str>,
    show_progress: bool,
) -> Result<Outcome> {
    let recorder = TrajectoryRecorder::new();
    let mut builder = builder.sink(recorder.handle());
    if let Some(console) = console {
        builder = builder.sink(console);
    }
    if let Some(template) = output {
        builder = builder.sink(DelimitedFileSink::new(template));
    }
    let mut sim = builder.build().context("Invalid simulation parameters")?;

    let pb = if show_progress {
        Some(progress_bar(sim.config().execution.generations)?)
    } else {
        None
    };

    while !sim.is_terminated() {
        sim.step()
            .with_context(|| format!("Simulation failed at generation {}", sim.generation()))?;
        if let Some(pb) = &pb {
            pb.set_position(sim.generation() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    Ok(Outcome {
        summary: sim.summary(),
        records: recorder.records(),
    })
}
