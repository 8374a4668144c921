use cgo_bindgen::error::RegistryError;
use cgo_bindgen::overrides::{sfml, ArrayRole, Dispatch, OverrideRegistry, StructOverride, UnionMapper, UnionOverride};
use cgo_bindgen::ir::Field;
use cgo_bindgen::test_support::fixture_declarations;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn event_union(registry: &OverrideRegistry) -> &UnionOverride {
    registry.union_override_for("sfEvent").unwrap()
}

#[test]
fn curated_tables_are_consistent() {
    assert_eq!(sfml::registry().validate(), Ok(()));
}

#[test]
fn lookups() {
    let registry = sfml::registry();
    assert_eq!(registry.struct_override_for("sfVector2i").unwrap().target_name, "Vector2i");
    assert!(registry.struct_override_for("sfSprite").is_none());
    assert!(registry.return_param_override_for("sfRenderWindow_pollEvent", "event").is_some());
    assert!(registry.return_param_override_for("sfRenderWindow_pollEvent", "renderWindow").is_none());

    let pointer = registry.array_param_override_for("sfVertexBuffer_update", "vertices");
    assert!(matches!(pointer, Some(ArrayRole::Pointer { owner, .. }) if owner.native_name == "sfVertex"));
    let count = registry.array_param_override_for("sfVertexBuffer_update", "vertexCount");
    assert!(matches!(count, Some(ArrayRole::Count { rule, .. }) if rule.param == "vertices"));
    assert!(registry.array_param_override_for("sfVertexBuffer_update", "offset").is_none());
}

#[test]
fn aliases_share_the_first_registered_owner() {
    let registry = sfml::registry();
    let glsl = registry.struct_override_for("sfGlslVec2").unwrap();
    assert!(!registry.is_canonical(glsl));
    assert_eq!(registry.struct_override_by_target("Vector2f").unwrap().native_name, "sfVector2f");
}

#[test]
fn payloads_are_known_union_members() {
    let registry = sfml::registry();
    assert!(registry.is_union_payload("sfKeyEvent"));
    assert!(!registry.is_union_payload("sfMouseWheelEvent"));
    assert!(!registry.is_union_payload("sfVector2i"));
}

#[test]
fn validate_reports_every_broken_rule() {
    let broken = OverrideRegistry::new(
        vec![
            StructOverride::new("sfBad", "Bad", &[("X", "int32"), ("Y", "int32")], &[("x", "int")]),
            StructOverride::new("sfPayload", "Payload", &[("X", "int32")], &[("x", "int")]),
        ],
        vec![UnionOverride {
            native_name: "sfU".to_string(),
            target_name: "U".to_string(),
            base_name: "BaseU".to_string(),
            discriminant: Field::new("Type", "UType"),
            cdiscriminant: Field::new("type", "sfUType"),
            accessor: "UType".to_string(),
            mappers: vec![
                UnionMapper::unit("A", &["sfUA"]),
                UnionMapper::unit("B", &["sfUA", "sfUB"]),
                UnionMapper::unit("C", &[]),
                UnionMapper::with_payload("D", "payload", "sfPayload", &["sfUD"]),
            ],
        }],
        Vec::new(),
        Vec::new(),
    );
    let errors = broken.validate().unwrap_err();
    assert_eq!(
        errors,
        vec![
            RegistryError::FieldCountMismatch { native: "sfBad".to_string(), fields: 2, cfields: 1 },
            RegistryError::DuplicateDiscriminant {
                union: "sfU".to_string(),
                value: "sfUA".to_string(),
                first: "A".to_string(),
                second: "B".to_string(),
            },
            RegistryError::EmptyMapper { union: "sfU".to_string(), variant: "C".to_string() },
            RegistryError::MissingPayloadOverride {
                union: "sfU".to_string(),
                variant: "D".to_string(),
                payload: "sfPayload".to_string(),
            },
        ]
    );
}

#[test]
fn payload_type_must_carry_the_variant_name() {
    let renamed = OverrideRegistry::new(
        vec![StructOverride::new("sfKeyEvent", "KeyboardEvent", &[("Type", "EventType")], &[("type", "sfEventType")])],
        vec![UnionOverride {
            native_name: "sfEvent".to_string(),
            target_name: "Event".to_string(),
            base_name: "BaseEvent".to_string(),
            discriminant: Field::new("Type", "EventType"),
            cdiscriminant: Field::new("type", "sfEventType"),
            accessor: "EventType".to_string(),
            mappers: vec![UnionMapper::with_payload("KeyEvent", "key", "sfKeyEvent", &["sfEvtKeyPressed"])],
        }],
        Vec::new(),
        Vec::new(),
    );
    assert_eq!(
        renamed.validate(),
        Err(vec![RegistryError::PayloadVariantMismatch {
            union: "sfEvent".to_string(),
            variant: "KeyEvent".to_string(),
            target: "KeyboardEvent".to_string(),
        }])
    );
}

#[test]
fn uncovered_discriminants_fall_to_unknown() {
    let registry = sfml::registry();
    let decls = fixture_declarations().unwrap();
    let uncovered = registry.uncovered_discriminants(event_union(&registry), &decls);
    assert_eq!(uncovered, ["sfEvtMouseWheelMoved", "sfEvtJoystickButtonPressed", "sfEvtCount"]);
}

#[test]
fn mouse_entered_dispatches_to_its_unit_variant() {
    let registry = sfml::registry();
    match event_union(&registry).dispatch("sfEvtMouseEntered") {
        Dispatch::Variant(m) => {
            assert_eq!(m.variant, "MouseEnteredEvent");
            assert!(m.payload.is_none());
        }
        Dispatch::Unknown => panic!("sfEvtMouseEntered must be mapped"),
    }
}

fn mapped_discriminants() -> Vec<String> {
    let registry = sfml::registry();
    event_union(&registry).mappers.iter().flat_map(|m| m.discriminants.clone()).collect()
}

proptest! {
    #[test]
    fn dispatch_reports_the_input_discriminant(d in prop::sample::select(mapped_discriminants())) {
        let registry = sfml::registry();
        match event_union(&registry).dispatch(&d) {
            Dispatch::Variant(m) => prop_assert!(m.discriminants.contains(&d)),
            Dispatch::Unknown => prop_assert!(false, "{d} is mapped but dispatched to unknown"),
        }
    }

    #[test]
    fn unmapped_values_never_panic(d in "[a-zA-Z]{1,16}") {
        let registry = sfml::registry();
        let union = event_union(&registry);
        let mapped = union.mappers.iter().any(|m| m.discriminants.contains(&d));
        prop_assert_eq!(matches!(union.dispatch(&d), Dispatch::Unknown), !mapped);
    }
}
