//! A small, self-consistent slice of the CSFML surface for tests and smoke
//! runs.
use crate::error::LoadError;
use crate::ir::{FunctionDecl, TypeDecl};
use crate::store::{Declarations, SkipRules};

pub fn fixture_types() -> Vec<TypeDecl> {
    vec![
        TypeDecl::new_struct("sfVector2i"),
        TypeDecl::new_struct("sfVector2f"),
        TypeDecl::new_struct("sfVector2u"),
        TypeDecl::new_struct("sfColor"),
        TypeDecl::new_struct("sfIntRect"),
        TypeDecl::new_struct("sfFloatRect"),
        TypeDecl::new_struct("sfVertex"),
        TypeDecl::new_struct("sfVideoMode"),
        TypeDecl::new_struct("sfContextSettings"),
        TypeDecl::new_struct("sfTime"),
        TypeDecl::new_struct("sfTransform"),
        TypeDecl::new_struct("sfRenderWindow"),
        TypeDecl::new_struct("sfTexture"),
        TypeDecl::new_struct("sfSprite"),
        TypeDecl::new_struct("sfVertexBuffer"),
        TypeDecl::new_struct("sfEvent"),
        TypeDecl::new_struct("sfBool"),
        TypeDecl::new_enum("sfPrimitiveType", &["sfPoints", "sfLines", "sfLineStrip", "sfTriangles"]),
        TypeDecl::new_enum("sfKeyCode", &["sfKeyUnknown", "sfKeyA", "sfKeyB"]),
        TypeDecl::new_enum("sfScancode", &["sfScanUnknown", "sfScanA", "sfScanB"]),
        TypeDecl::new_enum("sfMouseButton", &["sfMouseLeft", "sfMouseRight", "sfMouseMiddle"]),
        TypeDecl::new_enum("sfMouseWheel", &["sfMouseVerticalWheel", "sfMouseHorizontalWheel"]),
        TypeDecl::new_enum("sfSensorType", &["sfSensorAccelerometer", "sfSensorGyroscope"]),
        TypeDecl::new_enum(
            "sfEventType",
            &[
                "sfEvtClosed",
                "sfEvtResized",
                "sfEvtLostFocus",
                "sfEvtGainedFocus",
                "sfEvtTextEntered",
                "sfEvtKeyPressed",
                "sfEvtKeyReleased",
                "sfEvtMouseWheelMoved",
                "sfEvtMouseWheelScrolled",
                "sfEvtMouseButtonPressed",
                "sfEvtMouseButtonReleased",
                "sfEvtMouseMoved",
                "sfEvtMouseEntered",
                "sfEvtMouseLeft",
                "sfEvtJoystickButtonPressed",
                "sfEvtTouchBegan",
                "sfEvtTouchMoved",
                "sfEvtTouchEnded",
                "sfEvtSensorChanged",
                "sfEvtCount",
            ],
        ),
        TypeDecl::new_struct("sfJoystickIdentification"),
    ]
}

pub fn fixture_functions() -> Vec<FunctionDecl> {
    vec![
        FunctionDecl::new(
            "sfRenderWindow_create",
            &[("mode", "sfVideoMode"), ("title", "const char*"), ("style", "sfUint32"), ("settings", "const sfContextSettings*")],
            "sfRenderWindow*",
        ),
        FunctionDecl::new("sfRenderWindow_destroy", &[("renderWindow", "sfRenderWindow*")], "void"),
        FunctionDecl::new("sfRenderWindow_getPosition", &[("renderWindow", "const sfRenderWindow*")], "sfVector2i"),
        FunctionDecl::new(
            "sfRenderWindow_setPosition",
            &[("renderWindow", "sfRenderWindow*"), ("position", "sfVector2i")],
            "void",
        ),
        FunctionDecl::new("sfRenderWindow_isOpen", &[("renderWindow", "const sfRenderWindow*")], "sfBool"),
        FunctionDecl::new(
            "sfRenderWindow_pollEvent",
            &[("renderWindow", "sfRenderWindow*"), ("event", "sfEvent*")],
            "sfBool",
        ),
        FunctionDecl::new(
            "sfRenderWindow_setTitle",
            &[("renderWindow", "sfRenderWindow*"), ("title", "const char*")],
            "void",
        ),
        FunctionDecl::new(
            "sfRenderWindow_clear",
            &[("renderWindow", "sfRenderWindow*"), ("color", "sfColor")],
            "void",
        ),
        FunctionDecl::new("sfMouse_getPosition", &[("w", "const sfRenderWindow*")], "sfVector2i"),
        FunctionDecl::new(
            "sfSprite_setTexture",
            &[("sprite", "sfSprite*"), ("texture", "const sfTexture*"), ("resetRect", "sfBool")],
            "void",
        ),
        FunctionDecl::new("sfSprite_getTexture", &[("sprite", "const sfSprite*")], "const sfTexture*"),
        FunctionDecl::new("sfSprite_getTransform", &[("sprite", "const sfSprite*")], "sfTransform"),
        FunctionDecl::new(
            "sfTransform_translate",
            &[("transform", "sfTransform*"), ("x", "float"), ("y", "float")],
            "void",
        ),
        FunctionDecl::new("sfTexture_getNativeHandle", &[("texture", "const sfTexture*")], "unsigned int"),
        FunctionDecl::new(
            "sfIntRect_intersects",
            &[("rect1", "const sfIntRect*"), ("rect2", "const sfIntRect*"), ("intersection", "sfIntRect*")],
            "sfBool",
        ),
        FunctionDecl::new(
            "sfVertexBuffer_update",
            &[
                ("vertexBuffer", "sfVertexBuffer*"),
                ("vertices", "const sfVertex*"),
                ("vertexCount", "unsigned int"),
                ("offset", "unsigned int"),
            ],
            "sfBool",
        ),
        FunctionDecl::new(
            "sfVertexBuffer_setPrimitiveType",
            &[("vertexBuffer", "sfVertexBuffer*"), ("type", "sfPrimitiveType")],
            "void",
        ),
        FunctionDecl::new("sfJoystick_isConnected", &[("joystick", "unsigned int")], "sfBool"),
        FunctionDecl::new("sfSleep", &[("duration", "sfTime")], "void"),
    ]
}

/// Fixture declarations filtered through the CSFML skip rules.
pub fn fixture_declarations() -> Result<Declarations, LoadError> {
    Declarations::from_decls(fixture_types(), fixture_functions(), &SkipRules::sfml()?)
}
