//! Structural conformance of elements: placement, abstractness and identity.

use concrete_core::ModelError;
use concrete_tests::prelude::*;

mod placement {
    use super::*;

    #[test]
    fn test_root_accepts_only_whitelisted_classes() -> ScenarioResult<()> {
        init_tracing();

        // GIVEN a note and a state machine at the root
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let note = harness.model.root_element("Note")?;
        let machine = harness.model.named_root("Statemachine", "sm")?;

        // WHEN
        harness.commit();

        // THEN
        harness.verify(note, Expect::exactly(["element of class 'Note' not allowed"]))?;
        harness.verify(machine, Expect::clean())
    }

    #[test]
    fn test_containment_rejects_incompatible_class() -> ScenarioResult<()> {
        // GIVEN a transition and a note placed among states
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.named_root("Statemachine", "sm")?;
        let transition = harness.model.child(machine, "states", "Transition")?;
        let note = harness.model.child(machine, "states", "Note")?;

        // WHEN
        harness.commit();

        // THEN
        harness.verify(
            transition,
            Expect::new().contains("element of class 'Transition' not allowed"),
        )?;
        harness.verify(note, Expect::exactly(["element of class 'Note' not allowed"]))
    }

    #[test]
    fn test_slots_only_take_children_of_their_kind() -> ScenarioResult<()> {
        // GIVEN a machine with an attribute slot and a containment slot
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.named_root("Statemachine", "sm")?;
        let name = harness.model.slot(machine, "name")?;
        let states = harness.model.slot(machine, "states")?;

        // WHEN an element goes into the attribute and a value into the containment
        let element = harness.model.child(machine, "name", "State");
        let value = harness.model.value(machine, "states", "idle");

        // THEN both edits are refused and the model stays valid
        assert!(matches!(
            element,
            Err(ScenarioError::Model(ModelError::NotAContainmentSlot(slot))) if slot == name
        ));
        assert!(matches!(
            value,
            Err(ScenarioError::Model(ModelError::NotAValueSlot(slot))) if slot == states
        ));
        assert_eq!(harness.model.tree().children(name).len(), 1);
        assert!(harness.model.tree().children(states).is_empty());
        harness.commit();
        assert!(harness.problems().is_empty());
        Ok(())
    }

    #[test]
    fn test_subclasses_fit_their_parent_feature() -> ScenarioResult<()> {
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.named_root("Statemachine", "sm")?;
        let state = harness.model.named_child(machine, "states", "State", "idle")?;
        let last = harness.model.named_child(machine, "states", "FinalState", "done")?;

        harness.commit();

        harness.verify(state, Expect::clean())?;
        harness.verify(last, Expect::clean())?;
        assert!(harness.problems().is_empty());
        Ok(())
    }

    #[test]
    fn test_valid_instance_matches_subtype_relation() -> ScenarioResult<()> {
        // GIVEN every pair of classes
        let metamodel = state_machine()?;
        let checker = ConstraintChecker::new(&metamodel, []);

        for expected in metamodel.all_classes() {
            for actual in metamodel.all_classes() {
                // WHEN
                let valid = checker.is_valid_instance(TypeRef::Class(expected.id), actual.id);

                // THEN
                let related = actual.id == expected.id
                    || metamodel.get_supertypes(actual.id).any(|c| c == expected.id);
                assert_eq!(valid, related, "{} as {}", actual.name, expected.name);
            }
        }
        Ok(())
    }
}

mod abstractness {
    use super::*;

    #[test]
    fn test_abstract_instance_is_flagged_even_where_its_class_fits() -> ScenarioResult<()> {
        // GIVEN an AbstractState in a feature typed AbstractState
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.named_root("Statemachine", "sm")?;
        let state = harness.model.named_child(machine, "states", "AbstractState", "a")?;
        let abstract_state = metamodel.get_class_id("AbstractState").unwrap();

        // WHEN
        harness.commit();

        // THEN the type check passes but the element is still invalid
        assert!(harness
            .checker()
            .is_valid_instance(TypeRef::Class(abstract_state), abstract_state));
        harness.verify(state, Expect::exactly(["class 'AbstractState' is abstract"]))
    }

    #[test]
    fn test_abstract_class_at_root_reports_both_problems() -> ScenarioResult<()> {
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let state = harness.model.named_root("AbstractState", "a")?;

        harness.commit();

        harness.verify(
            state,
            Expect::exactly([
                "element of class 'AbstractState' not allowed",
                "class 'AbstractState' is abstract",
            ]),
        )
    }
}

mod identity {
    use super::*;

    #[test]
    fn test_elements_sharing_an_identifier_are_both_flagged() -> ScenarioResult<()> {
        // GIVEN two states named id1 and one named id2
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.named_root("Statemachine", "sm")?;
        let first = harness.model.named_child(machine, "states", "State", "id1")?;
        let second = harness.model.named_child(machine, "states", "State", "id1")?;
        let other = harness.model.named_child(machine, "states", "State", "id2")?;

        // WHEN
        harness.commit();

        // THEN
        harness.verify(first, Expect::exactly(["duplicate identifier 'id1'"]))?;
        harness.verify(second, Expect::exactly(["duplicate identifier 'id1'"]))?;
        harness.verify(other, Expect::clean())?;
        harness.verify(machine, Expect::clean())
    }

    #[test]
    fn test_duplicates_across_containers_are_detected() -> ScenarioResult<()> {
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.named_root("Statemachine", "shared")?;
        let state = harness.model.named_child(machine, "states", "State", "shared")?;

        harness.commit();

        harness.verify(machine, Expect::exactly(["duplicate identifier 'shared'"]))?;
        harness.verify(state, Expect::exactly(["duplicate identifier 'shared'"]))
    }
}

mod placeholders {
    use super::*;

    #[test]
    fn test_placeholders_are_never_annotated() -> ScenarioResult<()> {
        // GIVEN empty placeholders at the root and among states
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.named_root("Statemachine", "sm")?;
        let in_states = harness.model.placeholder(machine, "states")?;
        let root = harness.model.root();
        let at_root = harness.model.tree_mut().add_placeholder(root)?;

        // WHEN
        harness.commit();

        // THEN
        let problems = harness.problems();
        assert!(!problems.has_problems(in_states));
        assert!(!problems.has_problems(at_root));
        assert!(problems.is_empty());
        Ok(())
    }

    #[test]
    fn test_placeholder_does_not_fill_a_required_feature() -> ScenarioResult<()> {
        let metamodel = state_machine()?;
        let mut harness = Harness::new(&metamodel, &["Statemachine"])?;
        let machine = harness.model.root_element("Statemachine")?;
        harness.model.placeholder(machine, "name")?;
        let name = harness.model.slot(machine, "name")?;

        harness.commit();

        harness.verify(name, Expect::exactly(["'name' must be specified"]))
    }
}
