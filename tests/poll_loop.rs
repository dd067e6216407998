// tests/poll_loop.rs

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ruwnch::engine::{
    CycleOutcome, Dispatcher, LoopExit, LoopOptions, LoopState, PollController, WatchSpec,
};
use ruwnch::errors::RuwnchError;
use ruwnch::fs::mock::MockFileSystem;
use ruwnch::fs::FileSystem;
use ruwnch::watch::{CacheStore, JsonCacheStore, MemoryCacheStore};
use ruwnch_test_utils::fake_executor::{executed, FakeExecutor};
use ruwnch_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

const CACHE: &str = "ruwnch.cache.json";

struct Harness {
    fs: MockFileSystem,
    log: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    fn new(files: &[(&str, &str)]) -> Self {
        let fs = MockFileSystem::new();
        for (path, content) in files {
            fs.add_file(path, *content);
        }
        Self {
            fs,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn controller(
        &self,
        spec: WatchSpec,
        executor: FakeExecutor,
        persistent: bool,
        quit_on_error: bool,
        options: LoopOptions,
    ) -> PollController<FakeExecutor> {
        let fs: Arc<dyn FileSystem> = Arc::new(self.fs.clone());
        let store: Box<dyn CacheStore> = if persistent {
            Box::new(JsonCacheStore::new(CACHE, Arc::clone(&fs)))
        } else {
            Box::new(MemoryCacheStore::new())
        };
        PollController::new(
            spec,
            fs,
            store,
            Dispatcher::new(executor, quit_on_error),
            options,
        )
        .unwrap()
    }

    fn simple(&self, spec: WatchSpec, persistent: bool) -> PollController<FakeExecutor> {
        self.controller(
            spec,
            FakeExecutor::new(Arc::clone(&self.log)),
            persistent,
            false,
            fast(None),
        )
    }

    fn executed(&self) -> Vec<String> {
        executed(&self.log)
    }
}

fn fast(max_cycles: Option<u64>) -> LoopOptions {
    LoopOptions {
        check_period: Duration::ZERO,
        max_cycles,
    }
}

fn pair(file: &str, command: &str) -> (String, String) {
    (file.to_string(), command.to_string())
}

fn dispatched(outcomes: &[CycleOutcome]) -> Vec<(String, String)> {
    outcomes
        .iter()
        .filter_map(|o| match o {
            CycleOutcome::Changed(report) => Some((report.file.clone(), report.command.clone())),
            CycleOutcome::Unchanged { .. } => None,
        })
        .collect()
}

#[tokio::test]
async fn unchanged_single_file_dispatches_once_across_two_cycles() -> TestResult {
    init_tracing();

    let h = Harness::new(&[("a.txt", "hello")]);
    let mut ctl = h.simple(WatchSpec::new(["a.txt"], ["echo hi"])?, true);

    let first = ctl.run_cycle().await?;
    ctl.persist()?;
    let second = ctl.run_cycle().await?;

    assert_eq!(dispatched(&first), vec![pair("/mock/a.txt", "echo hi")]);
    assert!(dispatched(&second).is_empty());
    assert_eq!(h.executed(), vec!["echo hi"]);
    assert_eq!(ctl.cycles(), 2);
    Ok(())
}

#[tokio::test]
async fn only_the_changed_file_triggers_the_shared_command() -> TestResult {
    init_tracing();

    let h = Harness::new(&[("a.txt", "a"), ("b.txt", "b")]);
    let mut ctl = h.simple(WatchSpec::new(["a.txt", "b.txt"], ["build"])?, true);

    ctl.run_cycle().await?;
    h.log.lock().unwrap().clear();

    h.fs.add_file("b.txt", "b changed");
    let outcomes = ctl.run_cycle().await?;

    assert_eq!(dispatched(&outcomes), vec![pair("/mock/b.txt", "build")]);
    assert_eq!(h.executed(), vec!["build"]);
    Ok(())
}

#[tokio::test]
async fn multi_to_multi_change_runs_its_own_command_only() -> TestResult {
    let h = Harness::new(&[("a.txt", "a"), ("b.txt", "b"), ("c.txt", "c")]);
    let spec = WatchSpec::new(["a.txt", "b.txt", "c.txt"], ["cmd a", "cmd b", "cmd c"])?;
    let mut ctl = h.simple(spec, false);

    ctl.run_cycle().await?;
    assert_eq!(h.executed(), vec!["cmd a", "cmd b", "cmd c"]);
    h.log.lock().unwrap().clear();

    h.fs.add_file("c.txt", "c2");
    ctl.run_cycle().await?;
    assert_eq!(h.executed(), vec!["cmd c"]);
    Ok(())
}

#[tokio::test]
async fn idle_cycles_persist_identical_cache_content() -> TestResult {
    let h = Harness::new(&[("a.txt", "a"), ("b.txt", "b")]);
    let mut ctl = h.simple(WatchSpec::new(["a.txt", "b.txt"], ["x", "y"])?, true);

    ctl.run_cycle().await?;
    ctl.persist()?;
    let after_first = h.fs.contents(CACHE).unwrap();

    let second = ctl.run_cycle().await?;
    ctl.persist()?;
    let after_second = h.fs.contents(CACHE).unwrap();

    assert!(dispatched(&second).is_empty());
    assert_eq!(after_first, after_second);
    Ok(())
}

#[tokio::test]
async fn persisted_cache_suppresses_dispatch_in_the_next_run() -> TestResult {
    let h = Harness::new(&[("a.txt", "hello")]);

    let mut first_run = h.simple(WatchSpec::new(["a.txt"], ["echo hi"])?, true);
    first_run.run_cycle().await?;
    first_run.persist()?;

    let mut second_run = h.simple(WatchSpec::new(["a.txt"], ["echo hi"])?, true);
    assert_eq!(second_run.cache().len(), 1);
    second_run.run_cycle().await?;

    assert_eq!(h.executed(), vec!["echo hi"]);
    Ok(())
}

#[tokio::test]
async fn disabled_cache_forgets_across_runs_but_remembers_within_a_run() -> TestResult {
    let h = Harness::new(&[("a.txt", "hello")]);

    let mut first_run = h.simple(WatchSpec::new(["a.txt"], ["echo hi"])?, false);
    first_run.run_cycle().await?;
    first_run.run_cycle().await?;
    first_run.persist()?;
    assert_eq!(h.executed(), vec!["echo hi"]);
    assert!(h.fs.contents(CACHE).is_none());

    let mut second_run = h.simple(WatchSpec::new(["a.txt"], ["echo hi"])?, false);
    assert!(second_run.cache().is_empty());
    second_run.run_cycle().await?;
    assert_eq!(h.executed(), vec!["echo hi", "echo hi"]);
    Ok(())
}

#[tokio::test]
async fn duplicate_files_share_one_cache_entry() -> TestResult {
    let h = Harness::new(&[("a.txt", "hello")]);
    let mut ctl = h.simple(WatchSpec::new(["a.txt", "a.txt"], ["first", "second"])?, false);

    ctl.run_cycle().await?;

    // The second entry sees the fingerprint the first entry just recorded.
    assert_eq!(h.executed(), vec!["first"]);
    assert_eq!(ctl.cache().len(), 1);
    Ok(())
}

#[tokio::test]
async fn unreadable_file_stops_the_cycle() -> TestResult {
    let h = Harness::new(&[("a.txt", "a"), ("b.txt", "b")]);
    let mut ctl = h.simple(WatchSpec::new(["a.txt", "b.txt"], ["x", "y"])?, true);

    ctl.run_cycle().await?;
    h.fs.remove_file("a.txt");
    h.fs.add_file("b.txt", "b changed");

    match ctl.run_cycle().await {
        Err(RuwnchError::FileAccess { path, .. }) => assert_eq!(path.to_str(), Some("a.txt")),
        other => panic!("expected FileAccess, got {other:?}"),
    }
    assert_eq!(h.executed(), vec!["x", "y"]);
    Ok(())
}

#[tokio::test]
async fn stderr_without_quit_on_error_keeps_looping() -> TestResult {
    init_tracing();

    let h = Harness::new(&[("a.txt", "a"), ("b.txt", "b")]);
    let executor = FakeExecutor::new(Arc::clone(&h.log)).with_stderr("x", "oops");
    let mut ctl = h.controller(
        WatchSpec::new(["a.txt", "b.txt"], ["x", "y"])?,
        executor,
        true,
        false,
        fast(Some(3)),
    );

    let exit = with_timeout(ctl.run(std::future::pending::<()>())).await?;

    assert_eq!(exit, LoopExit::CycleLimit { cycles: 3 });
    assert_eq!(h.executed(), vec!["x", "y"]);
    assert_eq!(ctl.state(), LoopState::Stopped);
    Ok(())
}

#[tokio::test]
async fn stderr_with_quit_on_error_stops_before_the_next_file() -> TestResult {
    init_tracing();

    let h = Harness::new(&[("a.txt", "a"), ("b.txt", "b")]);
    let executor = FakeExecutor::new(Arc::clone(&h.log)).with_stderr("x", "oops");
    let mut ctl = h.controller(
        WatchSpec::new(["a.txt", "b.txt"], ["x", "y"])?,
        executor,
        true,
        true,
        fast(None),
    );

    let result = with_timeout(ctl.run(std::future::pending::<()>())).await;

    assert!(matches!(result, Err(RuwnchError::CommandFailed { .. })));
    assert_eq!(h.executed(), vec!["x"]);
    assert_eq!(ctl.cycles(), 0);
    assert_eq!(ctl.state(), LoopState::Stopped);
    Ok(())
}

#[tokio::test]
async fn interrupt_before_first_cycle_runs_nothing() -> TestResult {
    let h = Harness::new(&[("a.txt", "a")]);
    let mut ctl = h.simple(WatchSpec::new(["a.txt"], ["x"])?, true);

    let exit = ctl.run(async {}).await?;

    assert_eq!(exit, LoopExit::Interrupted);
    assert_eq!(ctl.state(), LoopState::Stopped);
    assert_eq!(ctl.cycles(), 0);
    assert!(h.executed().is_empty());
    assert!(h.fs.contents(CACHE).is_none());
    Ok(())
}

#[tokio::test]
async fn interrupt_during_sleep_ends_the_loop() -> TestResult {
    let h = Harness::new(&[("a.txt", "a")]);
    let mut ctl = h.controller(
        WatchSpec::new(["a.txt"], ["x"])?,
        FakeExecutor::new(Arc::clone(&h.log)),
        true,
        false,
        LoopOptions {
            check_period: Duration::from_secs(3600),
            max_cycles: None,
        },
    );

    let shutdown = tokio::time::sleep(Duration::from_millis(50));
    let exit = with_timeout(ctl.run(shutdown)).await?;

    assert_eq!(exit, LoopExit::Interrupted);
    assert_eq!(ctl.cycles(), 1);
    assert_eq!(h.executed(), vec!["x"]);
    assert!(h.fs.contents(CACHE).is_some());
    Ok(())
}
