use cgo_bindgen::error::LoadError;
use cgo_bindgen::ir::TypeKind;
use cgo_bindgen::store::{Declarations, SkipRules};
use pretty_assertions::assert_eq;

const TYPES: &str = r#"[
    {"name": "sfVector2i", "type": "typedef"},
    {"name": "sfRenderWindow", "type": "struct"},
    {"name": "sfUint32", "type": "typedef"},
    {"name": "sfEventType", "type": "enum", "enumerators": [
        {"name": "sfEvtClosed"}, {"name": "sfEvtResized"}, {"name": "sfEvtLostFocus"}
    ]},
    {"name": "sfJoystickIdentification", "type": "struct"}
]"#;

const FUNCTIONS: &str = r#"[
    {"name": "sfRenderWindow_isOpen", "parameters": [{"name": "renderWindow", "type": "const sfRenderWindow*"}], "return_type": "sfBool"},
    {"name": "sfJoystick_isConnected", "parameters": [{"name": "joystick", "type": "unsigned int"}], "return_type": "sfBool"},
    {"name": "sfShape_create", "parameters": [], "return_type": "sfShape*"},
    {"name": "sfRenderWindow_display", "parameters": [{"type": "sfRenderWindow*"}]},
    {"name": "sfRenderWindow_isOpen", "parameters": [], "return_type": "int"}
]"#;

#[test]
fn load_filters_and_keeps_order() {
    let decls = Declarations::load(TYPES, FUNCTIONS, &SkipRules::sfml().unwrap()).unwrap();

    let types: Vec<_> = decls.types().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(types, ["sfVector2i", "sfRenderWindow", "sfEventType"]);
    assert_eq!(decls.type_decl("sfVector2i").unwrap().kind, TypeKind::Struct);

    let functions: Vec<_> = decls.functions().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, ["sfRenderWindow_isOpen", "sfRenderWindow_display"]);

    // first duplicate wins
    assert_eq!(decls.functions()[0].return_type, "sfBool");
    // anonymous parameter, void default
    let display = &decls.functions()[1];
    assert_eq!(display.parameters[0].name, "");
    assert_eq!(display.return_type, "void");
}

#[test]
fn enumerator_order_is_preserved() {
    let decls = Declarations::load(TYPES, "[]", &SkipRules::none()).unwrap();
    let names: Vec<_> = decls.type_decl("sfEventType").unwrap().enumerators.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["sfEvtClosed", "sfEvtResized", "sfEvtLostFocus"]);
    assert!(decls.is_enum("sfEventType"));
    assert!(decls.is_known("sfUint32"));
}

#[test]
fn malformed_source_reports_the_json_path() {
    let bad = r#"[{"name": "sfSprite", "type": "struct"}, {"name": "sfColor", "type": 7}]"#;
    let err = Declarations::load(bad, "[]", &SkipRules::none()).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, LoadError::Json { what: "types list", .. }));
    assert!(message.contains("[1].type"), "{message}");
}

#[test]
fn unknown_kind_is_fatal() {
    let bad = r#"[{"name": "sfSprite", "type": "class"}]"#;
    assert!(Declarations::load(bad, "[]", &SkipRules::none()).is_err());
}

#[test]
fn empty_name_is_fatal() {
    let bad = r#"[{"name": "", "type": "struct"}]"#;
    let err = Declarations::load(bad, "[]", &SkipRules::none()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyName { what: "type", index: 0 }));
}

#[test]
fn missing_file_is_an_io_error() {
    let missing = std::path::Path::new("/nonexistent/types.json");
    let err = Declarations::from_paths(missing, missing, &SkipRules::none()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
