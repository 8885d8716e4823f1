// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::graph::TaskGraph;

#[test]
fn append_task_chains_in_order() {
    let mut graph = TaskGraph::new();
    let mut list = TaskList::new();
    let a = list.append_task(&mut graph, "a").unwrap();
    let b = list.append_task(&mut graph, "b").unwrap();
    assert_eq!(list.tasks(), &[a, b]);
    assert_eq!(graph.successors_of(a), &[b]);
    assert_eq!(graph.predecessors_of(b), &[a]);
}

#[test]
fn unknown_task_operations_return_error() {
    let mut graph = TaskGraph::new();
    let mut other_graph = TaskGraph::new();
    let mut list = TaskList::new();
    list.append_task(&mut graph, "a").unwrap();
    let foreign = other_graph.add_task("foreign");
    assert!(list.add_task_before(&mut graph, foreign, "x").is_err());
    assert!(list.remove_task(&mut graph, foreign).is_err());
}

#[test]
fn remove_task_updates_list_membership() {
    let mut graph = TaskGraph::new();
    let mut list = TaskList::new();
    let a = list.append_task(&mut graph, "a").unwrap();
    let b = list.append_task(&mut graph, "b").unwrap();
    list.remove_task(&mut graph, a).unwrap();
    assert_eq!(list.tasks(), &[b]);
}
