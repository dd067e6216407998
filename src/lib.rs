// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod invocation;
pub mod logging;
pub mod types;
pub mod watch;

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::engine::{Dispatcher, LoopExit, LoopOptions, PollController, WatchSpec};
use crate::errors::Result;
use crate::exec::{CommandExecutor, ShellExecutor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::invocation::Invocation;
use crate::watch::{
    ensure_cache_file, save_last_invocation, CacheStore, JsonCacheStore, MemoryCacheStore,
};

/// High-level entry point used by `main.rs`.
///
/// Runs against the real filesystem and shell, and stops on Ctrl-C.
pub async fn run(args: CliArgs, settings: Settings) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    run_with(args, settings, fs, ShellExecutor::new(), ctrl_c()).await?;
    Ok(())
}

/// Wire everything together with injectable collaborators.
///
/// This:
/// - generates the cache file if missing
/// - resolves the invocation (including `last` replay) into a `WatchSpec`
/// - stores the invocation for later replay
/// - picks a persistent or in-memory cache store
/// - runs the poll loop until `shutdown` resolves
///
/// Returns `None` for `--dry-run`, otherwise how the loop ended.
pub async fn run_with<E, F>(
    args: CliArgs,
    settings: Settings,
    fs: Arc<dyn FileSystem>,
    executor: E,
    shutdown: F,
) -> Result<Option<LoopExit>>
where
    E: CommandExecutor,
    F: Future<Output = ()>,
{
    ensure_cache_file(fs.as_ref(), &args.cache)?;

    let invocation = Invocation::resolve(&args, &settings, fs.as_ref())?;
    let spec = invocation.to_spec()?;

    if args.dry_run {
        print_dry_run(&spec, &settings);
        return Ok(None);
    }

    if settings.last_command_cache_enabled() {
        save_last_invocation(fs.as_ref(), &args.cache, &invocation.to_argv())?;
    }

    let store: Box<dyn CacheStore> = if settings.hash_cache_enabled() {
        Box::new(JsonCacheStore::new(args.cache.clone(), Arc::clone(&fs)))
    } else {
        Box::new(MemoryCacheStore::new())
    };

    let dispatcher = Dispatcher::new(executor, settings.quit_on_error());
    let options = LoopOptions::from_settings(&settings, args.once);

    let mut controller = PollController::new(spec, fs, store, dispatcher, options)?;
    let exit = controller.run(shutdown).await?;

    info!(?exit, cycles = controller.cycles(), "ruwnch stopped");
    Ok(Some(exit))
}

/// Resolves on Ctrl-C. If the signal handler cannot be installed the future
/// never resolves, so the loop keeps running.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Simple dry-run output: print the mode and which command each file fires.
fn print_dry_run(spec: &WatchSpec, settings: &Settings) {
    println!("ruwnch dry-run");
    println!("  mode = {}", spec.mode());
    println!("  checkPeriod = {:?}", settings.check_period());
    println!("  enableHashCache = {}", settings.hash_cache_enabled());
    println!("  quitOnError = {}", settings.quit_on_error());
    println!();

    println!("files ({}):", spec.files().len());
    for (index, file) in spec.files().iter().enumerate() {
        println!("  - {}", file.display());
        if let Some(command) = spec.command_for(index) {
            println!("      cmd: {command}");
        }
    }

    debug!("dry-run complete (no execution)");
}
