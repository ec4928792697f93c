//! Attribute value domains.

use concrete_tests::prelude::*;

/// A state `s` with one transition, ready for attribute values.
fn state_and_transition(metamodel: &Metamodel) -> ScenarioResult<(Harness<'_>, NodeId, NodeId)> {
    let mut harness = Harness::new(metamodel, &["Statemachine"])?;
    let machine = harness.model.named_root("Statemachine", "sm")?;
    let state = harness.model.named_child(machine, "states", "State", "s")?;
    let transition = harness.model.child(state, "transitions", "Transition")?;
    harness.model.value(transition, "target", "s")?;
    Ok((harness, state, transition))
}

#[test]
fn test_enum_literals() -> ScenarioResult<()> {
    let metamodel = state_machine()?;
    let state = metamodel.get_class_id("State").unwrap();
    let kind = metamodel.find_feature(state, "kind").unwrap();
    let checker = ConstraintChecker::new(&metamodel, []);

    assert!(checker.is_valid_value(kind, "NORMAL"));
    assert!(checker.is_valid_value(kind, "INITIAL"));
    assert!(!checker.is_valid_value(kind, "FINAL"));
    assert!(!checker.is_valid_value(kind, "normal"));
    Ok(())
}

#[test]
fn test_boolean_literals() -> ScenarioResult<()> {
    let metamodel = state_machine()?;
    let transition = metamodel.get_class_id("Transition").unwrap();
    let enabled = metamodel.find_feature(transition, "enabled").unwrap();
    let checker = ConstraintChecker::new(&metamodel, []);

    assert!(checker.is_valid_value(enabled, "true"));
    assert!(checker.is_valid_value(enabled, "false"));
    assert!(!checker.is_valid_value(enabled, "1"));
    assert!(!checker.is_valid_value(enabled, "TRUE"));
    Ok(())
}

#[test]
fn test_integer_literals() -> ScenarioResult<()> {
    let metamodel = state_machine()?;
    let machine = metamodel.get_class_id("Statemachine").unwrap();
    let priority = metamodel.find_feature(machine, "priority").unwrap();
    let checker = ConstraintChecker::new(&metamodel, []);

    for valid in ["0", "42", "-7"] {
        assert!(checker.is_valid_value(priority, valid), "{}", valid);
    }
    for invalid in ["007", "+5", "5.0", ""] {
        assert!(!checker.is_valid_value(priority, invalid), "{:?}", invalid);
    }
    Ok(())
}

#[test]
fn test_free_text_accepts_anything() -> ScenarioResult<()> {
    let metamodel = state_machine()?;
    let transition = metamodel.get_class_id("Transition").unwrap();
    let event = metamodel.find_feature(transition, "event").unwrap();
    let checker = ConstraintChecker::new(&metamodel, []);

    assert!(checker.is_valid_value(event, ""));
    assert!(checker.is_valid_value(event, "on click!"));
    Ok(())
}

#[test]
fn test_out_of_domain_values_are_annotated_on_their_slot() -> ScenarioResult<()> {
    // GIVEN a bad enum literal and a bad boolean
    let metamodel = state_machine()?;
    let (mut harness, state, transition) = state_and_transition(&metamodel)?;
    harness.model.value(state, "kind", "FINAL")?;
    harness.model.value(transition, "enabled", "yes")?;
    harness.model.value(transition, "event", "go")?;
    let kind = harness.model.slot(state, "kind")?;
    let enabled = harness.model.slot(transition, "enabled")?;
    let event = harness.model.slot(transition, "event")?;

    // WHEN
    harness.commit();

    // THEN
    harness.verify(kind, Expect::exactly(["value not allowed"]))?;
    harness.verify(enabled, Expect::exactly(["value not allowed"]))?;
    harness.verify(event, Expect::clean())?;
    harness.verify(state, Expect::clean())
}

#[test]
fn test_each_bad_value_is_reported_once_per_slot() -> ScenarioResult<()> {
    let metamodel = limits_free_metamodel()?;
    let mut harness = Harness::new(&metamodel, &["Sample"])?;
    let sample = harness.model.root_element("Sample")?;
    for reading in ["1", "x", "2", "y"] {
        harness.model.value(sample, "readings", reading)?;
    }
    let readings = harness.model.slot(sample, "readings")?;

    harness.commit();

    harness.verify(readings, Expect::exactly(["value not allowed"]))
}

/// `Sample { readings: Integer[0..*] }`
fn limits_free_metamodel() -> ScenarioResult<Metamodel> {
    let mut builder = MetamodelBuilder::new();
    builder
        .add_class("Sample")
        .attribute("readings", "Integer", Multiplicity::many())
        .done()?;
    Ok(builder.build()?)
}
