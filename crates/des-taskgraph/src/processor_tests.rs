// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::graph::TaskGraph;
use crate::tasklist::TaskList;

#[test]
fn run_executes_invalid_tasks_in_topological_order_and_validates_them() {
    let mut graph = TaskGraph::new();
    let mut list = TaskList::new();
    let a = list.append_task(&mut graph, "a").unwrap();
    let b = list.append_task(&mut graph, "b").unwrap();
    let c = list.append_task(&mut graph, "c").unwrap();

    let mut executed = Vec::new();
    let results = TaskProcessor::run(&mut graph, |_, id| {
        executed.push(id);
        TaskOutcome::Completed
    })
    .unwrap();

    assert_eq!(executed, vec![a, b, c]);
    assert_eq!(results.len(), 3);
    for &id in &[a, b, c] {
        assert!(graph.task(id).unwrap().aggregate_valid());
    }
}

#[test]
fn run_skips_already_valid_tasks() {
    let mut graph = TaskGraph::new();
    let mut list = TaskList::new();
    let a = list.append_task(&mut graph, "a").unwrap();
    let b = list.append_task(&mut graph, "b").unwrap();
    graph.set_self_valid(a, true).unwrap();
    graph.set_self_valid(b, true).unwrap();

    let results = TaskProcessor::run(&mut graph, |_, _| TaskOutcome::Completed).unwrap();
    assert!(results.iter().all(|(_, outcome)| *outcome == TaskOutcome::SkippedValid));
}

#[test]
fn a_failed_task_stays_invalid_and_blocks_its_successor() {
    let mut graph = TaskGraph::new();
    let mut list = TaskList::new();
    let a = list.append_task(&mut graph, "a").unwrap();
    let b = list.append_task(&mut graph, "b").unwrap();

    TaskProcessor::run(&mut graph, |_, id| {
        if id == a {
            TaskOutcome::Failed("boom".to_string())
        } else {
            TaskOutcome::Completed
        }
    })
    .unwrap();

    assert!(!graph.task(a).unwrap().aggregate_valid());
    assert!(!graph.task(b).unwrap().aggregate_valid(), "b never becomes valid because a never did");
}
