// tests/mode_resolution.rs

use proptest::prelude::*;

use ruwnch::engine::{resolve_mode, WatchSpec};
use ruwnch::errors::RuwnchError;
use ruwnch::types::ExecutionMode;

#[test]
fn resolves_the_three_valid_arities() {
    assert_eq!(resolve_mode(1, 1).unwrap(), ExecutionMode::SingleToSingle);
    assert_eq!(resolve_mode(3, 1).unwrap(), ExecutionMode::MultiToSingle);
    assert_eq!(resolve_mode(3, 3).unwrap(), ExecutionMode::MultiToMulti);
}

#[test]
fn rejects_mismatched_arity() {
    for (files, commands) in [(2, 3), (1, 3), (0, 0), (0, 1), (4, 2)] {
        match resolve_mode(files, commands) {
            Err(RuwnchError::InvalidArity { files: f, commands: c }) => {
                assert_eq!((f, c), (files, commands));
            }
            other => panic!("expected InvalidArity for ({files}, {commands}), got {other:?}"),
        }
    }
}

#[test]
fn watch_spec_rejects_invalid_arity_before_anything_runs() {
    let err = WatchSpec::new(["a.txt", "b.txt"], ["x", "y", "z"]).unwrap_err();
    assert!(err.is_startup_error());
    assert!(err.to_string().contains("Number of arguments incorrect"));
}

#[test]
fn multi_to_multi_maps_by_position_even_with_duplicate_files() {
    let spec = WatchSpec::new(["a.txt", "b.txt", "a.txt"], ["first", "second", "third"]).unwrap();

    assert_eq!(spec.mode(), ExecutionMode::MultiToMulti);
    assert_eq!(spec.command_for(0), Some("first"));
    assert_eq!(spec.command_for(1), Some("second"));
    assert_eq!(spec.command_for(2), Some("third"));
    assert_eq!(spec.command_for(3), None);
}

#[test]
fn single_command_modes_always_pick_the_one_command() {
    let single = WatchSpec::new(["a.txt"], ["build"]).unwrap();
    assert_eq!(single.command_for(0), Some("build"));

    let multi = WatchSpec::new(["a.txt", "b.txt", "c.txt"], ["build"]).unwrap();
    assert_eq!(multi.mode(), ExecutionMode::MultiToSingle);
    assert_eq!(multi.command_for(2), Some("build"));
}

proptest! {
    #[test]
    fn resolution_is_total_and_deterministic(files in 0usize..50, commands in 0usize..50) {
        let first = resolve_mode(files, commands);
        let second = resolve_mode(files, commands);

        let expected = if files == 1 && commands == 1 {
            Some(ExecutionMode::SingleToSingle)
        } else if files > 1 && commands == 1 {
            Some(ExecutionMode::MultiToSingle)
        } else if files == commands && files > 1 {
            Some(ExecutionMode::MultiToMulti)
        } else {
            None
        };

        prop_assert_eq!(first.ok(), expected);
        prop_assert_eq!(second.ok(), expected);
    }
}
