// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exercises the `Model` facade wiring the catalog, chemistry, task-graph,
//! and executive crates together the way a real plant model would, rather
//! than any one crate in isolation.

use crate::support::fixtures::CATALOG_CSV;
use des_chem::{MaterialCatalog, Mixture, Substance};
use des_executive::{Priority, Receiver, RunState, SimTime};
use des_model::Model;
use des_statemachine::ModelState;
use des_taskgraph::TaskOutcome;
use std::cell::RefCell;
use std::rc::Rc;

fn load_catalog() -> MaterialCatalog {
    let mut catalog = MaterialCatalog::new();
    catalog.load_csv(CATALOG_CSV.as_bytes(), &[]).expect("fixture catalog must load");
    catalog
}

#[test]
fn a_mixture_built_from_catalog_materials_thermally_mixes_inside_the_model() {
    let mut model = Model::new();
    *model.catalog_mut() = load_catalog();

    let water = model.catalog().get_by_name("water").expect("water is in the fixture catalog").clone();
    let koh = model.catalog().get_by_name("potassium hydroxide").expect("koh is in the fixture catalog").clone();

    let mut mixture = Mixture::new();
    mixture.add_material(Substance::new(water.clone(), 100.0, 293.15));
    mixture.add_material(Substance::new(koh, 150.0, 314.15));
    let id = model.add_mixture(mixture);

    model.mutate_mixture(id, |m| m.add_material(Substance::new(water, 100.0, 373.15))).expect("no reactions watch this mixture");

    let mixture = model.mixture(id).expect("mixture was just added");
    assert!((mixture.mass() - 350.0).abs() < 1e-9);
    let expected_celsius = (100.0 * 20.0 + 150.0 * 41.0 + 100.0 * 100.0) / 350.0;
    assert!((des_core::units::kelvin_to_celsius(mixture.temperature()) - expected_celsius).abs() < 1e-6);
}

#[test]
fn task_graph_work_and_executive_pumping_are_independent_facets_of_one_model() {
    let mut model = Model::new();

    let prep = model.graph_mut().add_task("prepare batch");
    let react = model.graph_mut().add_task("run reaction");
    model.graph_mut().connect(prep, react).expect("both tasks exist");

    let executed = Rc::new(RefCell::new(false));
    let executed_in_pump = executed.clone();
    model
        .executive_mut()
        .request_event(
            Receiver::Synchronous(Box::new(move |_exec, _now| {
                *executed_in_pump.borrow_mut() = true;
            })),
            SimTime::new(0.0),
            Priority::NORMAL,
        )
        .expect("scheduling at time zero is always causally valid");

    let outcomes = model
        .process_tasks(|_graph, _id| TaskOutcome::Completed)
        .expect("neither task fails in this scenario");
    assert_eq!(outcomes.len(), 2);
    assert!(model.graph().task(prep).expect("task exists").aggregate_valid());
    assert!(model.graph().task(react).expect("task exists").aggregate_valid());

    model.validate().expect("Idle -> Validated is always legal from a fresh model");
    model.run().expect("Validated -> Running is always legal, and the queue drains");
    assert!(*executed.borrow());
    assert_eq!(model.executive().state(), RunState::Finished);
    assert_eq!(model.state(), ModelState::Finished);
}
