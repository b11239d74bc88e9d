//! Evolution driver.
//!
//! [`Simulator`] owns the replicate set and runs the fixed per-generation
//! pipeline: mate every replicate, then on sampled generations compute one
//! snapshot per replicate and hand it to each registered sink.

use crate::base::GenomeLayout;
use crate::errors::{PopulationError, SimulationError, SinkError};
use crate::evolution::MatingScheme;
use crate::reporting::StatisticsSink;
use crate::simulation::{Configuration, ReplicateSet};
use crate::statistics::Snapshot;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle of a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Uninitialized,
    Initializing,
    /// `generation` is the index of the next generation to execute.
    Running { generation: usize },
    Terminated,
}

/// Cloneable flag requesting termination after the current generation.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations executed
    pub generations: usize,
    pub replicates: usize,
    /// Generations whose statistics were emitted
    pub samples: usize,
    /// Sink errors logged and tolerated or fatal
    pub sink_errors: usize,
    /// Whether the run ended before the configured generation count
    pub stopped_early: bool,
}

/// Main simulation driver.
pub struct Simulator {
    config: Configuration,
    layout: Arc<GenomeLayout>,
    scheme: MatingScheme,
    replicates: Option<ReplicateSet>,
    sinks: Vec<Box<dyn StatisticsSink>>,
    state: SimulationState,
    generation: usize,
    generation_limit: usize,
    stop: StopHandle,
    samples: usize,
    sink_errors: usize,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("generation_limit", &self.generation_limit)
            .field("sinks", &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Create a driver from a configuration.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidConfiguration`] if validation fails.
    pub fn new(config: Configuration) -> Result<Self, SimulationError> {
        config.validate()?;
        let layout = Arc::new(config.layout()?);
        let scheme = config.mating_scheme(&layout)?;
        let generation_limit = config.execution.generations;
        Ok(Self {
            config,
            layout,
            scheme,
            replicates: None,
            sinks: Vec::new(),
            state: SimulationState::Uninitialized,
            generation: 0,
            generation_limit,
            stop: StopHandle::default(),
            samples: 0,
            sink_errors: 0,
        })
    }

    /// Register a sink. Sinks receive snapshots in registration order.
    pub fn add_sink(&mut self, sink: Box<dyn StatisticsSink>) {
        self.sinks.push(sink);
    }

    pub fn with_sink(mut self, sink: impl StatisticsSink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn layout(&self) -> &GenomeLayout {
        &self.layout
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Number of generations executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current replicate populations, once initialized.
    pub fn replicates(&self) -> Option<&ReplicateSet> {
        self.replicates.as_ref()
    }

    /// Handle that stops the run after the generation in progress.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stop after `limit` generations. Never extends the configured count.
    pub fn set_generation_limit(&mut self, limit: usize) {
        self.generation_limit = limit.min(self.config.execution.generations);
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SimulationState::Terminated
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            generations: self.generation,
            replicates: self.config.execution.replicates,
            samples: self.samples,
            sink_errors: self.sink_errors,
            stopped_early: self.generation < self.config.execution.generations,
        }
    }

    fn ensure_not_terminated(&self) -> Result<(), SimulationError> {
        if self.is_terminated() {
            return Err(SimulationError::AlreadyTerminated {
                generation: self.generation,
            });
        }
        Ok(())
    }

    /// Seed every replicate. Does nothing if already initialized.
    pub fn initialize(&mut self) -> Result<(), SimulationError> {
        self.ensure_not_terminated()?;
        if self.state != SimulationState::Uninitialized {
            return Ok(());
        }

        self.state = SimulationState::Initializing;
        let execution = &self.config.execution;
        info!(
            population_size = self.config.population.size,
            loci = self.layout.num_loci(),
            replicates = execution.replicates,
            generations = execution.generations,
            seed = ?execution.seed,
            "Initializing simulation"
        );

        let replicates = ReplicateSet::initialize(
            self.config.population.size,
            Arc::clone(&self.layout),
            &self.config.initialization,
            self.config.replicate_rngs(),
        );
        match replicates {
            Ok(replicates) => self.replicates = Some(replicates),
            Err(e) => {
                self.state = SimulationState::Terminated;
                return Err(e.into());
            }
        }

        self.state = SimulationState::Running { generation: 0 };
        if self.should_stop() {
            self.terminate()?;
        }
        Ok(())
    }

    fn should_stop(&self) -> bool {
        self.generation >= self.generation_limit || self.stop.is_stopped()
    }

    fn is_sampled(&self, generation: usize) -> bool {
        self.config
            .execution
            .sampling
            .should_sample(generation, self.config.execution.generations)
            || generation + 1 == self.generation_limit
    }

    /// Execute one generation and emit its statistics if it is sampled.
    ///
    /// Initializes the driver first if needed.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        self.ensure_not_terminated()?;
        if self.state == SimulationState::Uninitialized {
            self.initialize()?;
            if self.is_terminated() {
                return Ok(());
            }
        }
        if self.should_stop() {
            return self.terminate();
        }

        let generation = self.generation;
        if let Err(e) = self.advance(generation) {
            return Err(self.abort(e));
        }

        // Counts as executed once mating succeeds.
        self.generation += 1;
        self.state = SimulationState::Running {
            generation: self.generation,
        };
        if let Err(e) = self.sample(generation) {
            return Err(self.abort(e));
        }
        if self.should_stop() {
            self.terminate()?;
        }
        Ok(())
    }

    fn advance(&mut self, generation: usize) -> Result<(), SimulationError> {
        let replicates = self
            .replicates
            .as_mut()
            .ok_or(PopulationError::EmptyPopulation)?;
        replicates.advance_all(&self.scheme, generation)?;
        Ok(())
    }

    fn sample(&mut self, generation: usize) -> Result<(), SimulationError> {
        if !self.is_sampled(generation) {
            return Ok(());
        }

        let request = &self.config.statistics;
        let snapshots = self
            .replicates
            .as_ref()
            .ok_or(PopulationError::EmptyPopulation)?
            .for_each(|population| request.compute(population))
            .into_iter()
            .collect::<Result<Vec<Snapshot>, _>>()?;
        debug!(generation, replicates = snapshots.len(), "Sampled statistics");

        self.samples += 1;
        self.emit(generation, &snapshots)
    }

    /// Deliver one generation's snapshots to every sink. A fatal failure is
    /// reported only after the whole emission completes.
    fn emit(&mut self, generation: usize, snapshots: &[Snapshot]) -> Result<(), SimulationError> {
        let fail_on_error = self.config.execution.fail_on_sink_error;
        let mut fatal: Option<(String, SinkError)> = None;

        for (replicate, snapshot) in snapshots.iter().enumerate() {
            for sink in self.sinks.iter_mut() {
                if let Err(e) = sink.receive(generation, replicate, snapshot) {
                    warn!(sink = sink.name(), generation, replicate, error = %e, "Sink failed");
                    self.sink_errors += 1;
                    if (e.is_fatal() || fail_on_error) && fatal.is_none() {
                        fatal = Some((sink.name().to_string(), e));
                    }
                }
            }
        }

        match fatal {
            Some((sink, source)) => Err(SimulationError::Sink {
                sink,
                generation,
                source,
            }),
            None => Ok(()),
        }
    }

    /// Flush every sink, logging failures.
    fn finish_sinks(&mut self) -> Option<(String, SinkError)> {
        let fail_on_error = self.config.execution.fail_on_sink_error;
        let mut fatal = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.finish() {
                warn!(sink = sink.name(), error = %e, "Sink failed to finish");
                self.sink_errors += 1;
                if (e.is_fatal() || fail_on_error) && fatal.is_none() {
                    fatal = Some((sink.name().to_string(), e));
                }
            }
        }
        fatal
    }

    /// Terminate on `error`, flushing sinks without escalating their failures.
    fn abort(&mut self, error: SimulationError) -> SimulationError {
        self.state = SimulationState::Terminated;
        warn!(generation = self.generation, %error, "Simulation aborted");
        self.finish_sinks();
        error
    }

    fn terminate(&mut self) -> Result<(), SimulationError> {
        self.state = SimulationState::Terminated;
        info!(
            generations = self.generation,
            samples = self.samples,
            sink_errors = self.sink_errors,
            stopped = self.stop.is_stopped(),
            "Simulation terminated"
        );
        match self.finish_sinks() {
            Some((sink, source)) => Err(SimulationError::Sink {
                sink,
                generation: self.generation,
                source,
            }),
            None => Ok(()),
        }
    }

    /// Run until termination, initializing first if needed.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        self.ensure_not_terminated()?;
        while !self.is_terminated() {
            self.step()?;
        }
        Ok(self.summary())
    }
}
