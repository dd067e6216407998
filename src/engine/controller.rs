// src/engine/controller.rs

//! The poll loop.
//!
//! Each cycle walks every watched file in order: fingerprint it, dispatch its
//! command if the fingerprint differs from the cache, then record the new
//! fingerprint. After the last file the cache is persisted once (when the
//! store is persistent) and the loop sleeps for the check period.
//!
//! Work is strictly sequential. The only way out of the loop besides an
//! error is the shutdown future passed to [`PollController::run`], or the
//! optional cycle limit.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::engine::dispatcher::{CycleOutcome, Dispatcher};
use crate::engine::WatchSpec;
use crate::errors::{Result, RuwnchError};
use crate::exec::CommandExecutor;
use crate::fs::FileSystem;
use crate::watch::{fingerprint, CacheStore, ChangeCache};

/// Loop lifecycle. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Why [`PollController::run`] returned without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The shutdown future resolved. The cycle in flight, if any, was not
    /// persisted.
    Interrupted,
    /// `max_cycles` cycles ran and were persisted.
    CycleLimit { cycles: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Sleep between the end of one cycle and the start of the next.
    pub check_period: Duration,
    /// Stop after this many cycles (used for `--once`); `None` runs forever.
    pub max_cycles: Option<u64>,
}

impl LoopOptions {
    pub fn from_settings(settings: &Settings, once: bool) -> Self {
        Self {
            check_period: settings.check_period(),
            max_cycles: once.then_some(1),
        }
    }
}

pub struct PollController<E: CommandExecutor> {
    spec: WatchSpec,
    fs: Arc<dyn FileSystem>,
    store: Box<dyn CacheStore>,
    cache: ChangeCache,
    dispatcher: Dispatcher<E>,
    options: LoopOptions,
    state: LoopState,
    cycles: u64,
}

impl<E: CommandExecutor> PollController<E> {
    /// Create a controller in the `Running` state with the cache loaded from
    /// `store`.
    pub fn new(
        spec: WatchSpec,
        fs: Arc<dyn FileSystem>,
        store: Box<dyn CacheStore>,
        dispatcher: Dispatcher<E>,
        options: LoopOptions,
    ) -> Result<Self> {
        let cache = store.load()?;
        Ok(Self {
            spec,
            fs,
            store,
            cache,
            dispatcher,
            options,
            state: LoopState::Running,
            cycles: 0,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn cache(&self) -> &ChangeCache {
        &self.cache
    }

    /// Number of cycles that ran to completion.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one pass over every watched file, without persisting or sleeping.
    ///
    /// A file that cannot be read aborts the cycle with
    /// [`RuwnchError::FileAccess`]; so does a failed command when
    /// `quit_on_error` is set.
    pub async fn run_cycle(&mut self) -> Result<Vec<CycleOutcome>> {
        let mut outcomes = Vec::with_capacity(self.spec.files().len());

        for (index, path) in self.spec.files().iter().enumerate() {
            let new_fingerprint = fingerprint(self.fs.as_ref(), path)?;
            let absolute = self
                .fs
                .absolute(path)
                .map_err(|err| RuwnchError::FileAccess {
                    path: path.clone(),
                    reason: format!("{err:#}"),
                })?
                .to_string_lossy()
                .into_owned();

            if self.cache.has_changed(&absolute, &new_fingerprint) {
                let report = self
                    .dispatcher
                    .dispatch(&self.spec, index, &absolute)
                    .await?;
                outcomes.push(CycleOutcome::Changed(report));
            } else {
                outcomes.push(CycleOutcome::Unchanged {
                    index,
                    file: absolute.clone(),
                });
            }

            self.cache.update(&absolute, new_fingerprint);
        }

        self.cycles += 1;
        Ok(outcomes)
    }

    /// Write the cache back if the store keeps it across runs.
    pub fn persist(&mut self) -> Result<()> {
        if self.store.is_persistent() {
            self.store.persist(&self.cache)?;
        }
        Ok(())
    }

    /// Drive cycles until `shutdown` resolves, an error occurs, or the cycle
    /// limit is reached. The controller is `Stopped` afterwards in every
    /// case.
    ///
    /// `shutdown` is checked before every cycle and raced against the cycle
    /// and the sleep; whichever is in progress is dropped when it fires.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<LoopExit>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            mode = %self.spec.mode(),
            files = self.spec.files().len(),
            check_period = ?self.options.check_period,
            persistent_cache = self.store.is_persistent(),
            "poll loop started"
        );

        loop {
            let step = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                res = self.cycle_then_sleep() => Some(res),
            };

            match step {
                None => {
                    self.state = LoopState::Stopped;
                    warn!("interrupt detected; quitting");
                    return Ok(LoopExit::Interrupted);
                }
                Some(Err(err)) => {
                    self.state = LoopState::Stopped;
                    error!(error = %err, "fatal error; stopping poll loop");
                    return Err(err);
                }
                Some(Ok(true)) => {
                    self.state = LoopState::Stopped;
                    info!(cycles = self.cycles, "cycle limit reached; stopping");
                    return Ok(LoopExit::CycleLimit {
                        cycles: self.cycles,
                    });
                }
                Some(Ok(false)) => {}
            }
        }
    }

    /// One cycle plus persist, then the sleep unless the cycle limit was hit.
    /// Returns `true` when the loop should stop.
    async fn cycle_then_sleep(&mut self) -> Result<bool> {
        let outcomes = self.run_cycle().await?;
        self.persist()?;

        let dispatched = outcomes.iter().filter(|o| o.is_changed()).count();
        debug!(cycle = self.cycles, dispatched, "cycle complete");

        if self
            .options
            .max_cycles
            .is_some_and(|max| self.cycles >= max)
        {
            return Ok(true);
        }

        tokio::time::sleep(self.options.check_period).await;
        Ok(false)
    }
}
