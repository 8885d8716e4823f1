// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::support::fixtures::parse_emission_tests;

const SAMPLE: &str = r#"<?xml version="1.0"?>
<EmissionTests>
  <Test num="1">
    <Stimulus>
      <Material name="water" quantity="100.0" />
      <Material name="sodium chloride" quantity="0.058443" />
      <Parameter name="initialTankTemperature" value="20.0" />
      <Parameter name="finalTankTemperature" value="80.0" />
      <Parameter name="systemPressure" value="760.0" />
    </Stimulus>
    <Response>
      <Model name="tankHeating">
        <Material name="water" kilograms="100.0" />
      </Model>
    </Response>
  </Test>
  <Test num="2">
    <Stimulus>
      <Material name="water" quantity="50.0" />
      <Parameter name="controlTemperature" value="65.0" />
    </Stimulus>
    <Response>
      <Model name="tankHeating">
        <Material name="water" kilograms="50.0" />
      </Model>
    </Response>
  </Test>
</EmissionTests>
"#;

#[test]
fn parses_every_test_case_in_a_suite() {
    let suite = parse_emission_tests(SAMPLE).expect("fixture must parse");
    assert_eq!(suite.tests.len(), 2);
    assert_eq!(suite.tests[0].num, 1);
    assert_eq!(suite.tests[1].num, 2);
}

#[test]
fn stimulus_carries_materials_and_named_parameters() {
    let suite = parse_emission_tests(SAMPLE).expect("fixture must parse");
    let first = &suite.tests[0];
    assert_eq!(first.stimulus.materials.len(), 2);
    assert_eq!(first.stimulus.materials[0].name, "water");
    assert!((first.stimulus.materials[0].quantity - 100.0).abs() < 1e-9);

    assert_eq!(first.stimulus.parameter("initialTankTemperature"), Some(20.0));
    assert_eq!(first.stimulus.parameter("finalTankTemperature"), Some(80.0));
    assert_eq!(first.stimulus.parameter("systemPressure"), Some(760.0));
    assert_eq!(first.stimulus.parameter("leakRateOfAirIntoSystem"), None);
}

#[test]
fn response_nests_expected_materials_under_named_models() {
    let suite = parse_emission_tests(SAMPLE).expect("fixture must parse");
    let response = &suite.tests[0].response;
    let model = response.model("tankHeating").expect("tankHeating model must be present");
    assert_eq!(model.kilograms_of("water"), Some(100.0));
    assert_eq!(response.model("nonexistent"), None);
}

#[test]
fn a_test_case_may_omit_some_stimulus_materials_entirely() {
    let suite = parse_emission_tests(SAMPLE).expect("fixture must parse");
    let second = &suite.tests[1];
    assert_eq!(second.stimulus.materials.len(), 1);
    assert_eq!(second.stimulus.parameter("controlTemperature"), Some(65.0));
}

#[test]
fn malformed_xml_fails_to_parse() {
    let err = parse_emission_tests("<EmissionTests><Test num=\"1\">");
    assert!(err.is_err());
}
