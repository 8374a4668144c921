// Curated override tables for the CSFML 2.x surface.

use crate::ir::Field;

use super::{OverrideRegistry, ReturnParamOverride, Shape, StructOverride, UnionMapper, UnionOverride};

const EVENT_BASE: &str = "BaseEvent";

pub fn registry() -> OverrideRegistry {
    OverrideRegistry::new(struct_overrides(), vec![event_union()], return_params(), vec!["sfTransform".to_string()])
}

fn vec2(native: &str, target: &str, go: &str, c: &str) -> StructOverride {
    StructOverride::new(native, target, &[("X", go), ("Y", go)], &[("x", c), ("y", c)])
}

fn vec3(native: &str, target: &str, go: &str, c: &str) -> StructOverride {
    StructOverride::new(native, target, &[("X", go), ("Y", go), ("Z", go)], &[("x", c), ("y", c), ("z", c)])
}

fn vec4(native: &str, target: &str, go: &str, c: &str) -> StructOverride {
    StructOverride::new(
        native,
        target,
        &[("X", go), ("Y", go), ("Z", go), ("W", go)],
        &[("x", c), ("y", c), ("z", c), ("w", c)],
    )
}

fn event(native: &str, target: &str, fields: &[(&str, &str)], cfields: &[(&str, &str)]) -> StructOverride {
    let mut all_fields = vec![("Type", "EventType")];
    all_fields.extend_from_slice(fields);
    let mut all_cfields = vec![("type", "sfEventType")];
    all_cfields.extend_from_slice(cfields);
    StructOverride::new(native, target, &all_fields, &all_cfields).with_base(EVENT_BASE)
}

fn struct_overrides() -> Vec<StructOverride> {
    vec![
        // ---- vectors ----
        vec2("sfVector2i", "Vector2i", "int32", "int"),
        vec2("sfVector2f", "Vector2f", "float32", "float"),
        vec2("sfVector2u", "Vector2u", "uint32", "sfUint32"),
        vec3("sfVector3f", "Vector3f", "float32", "float"),
        vec2("sfGlslIvec2", "Vector2i", "int32", "int"),
        vec3("sfGlslIvec3", "Vector3i", "int32", "int"),
        vec4("sfGlslIvec4", "Vector4i", "int32", "int"),
        vec2("sfGlslBvec2", "Vector2b", "bool", "sfBool"),
        vec3("sfGlslBvec3", "Vector3b", "bool", "sfBool"),
        vec4("sfGlslBvec4", "Vector4b", "bool", "sfBool"),
        vec2("sfGlslVec2", "Vector2f", "float32", "float"),
        vec3("sfGlslVec3", "Vector3f", "float32", "float"),
        vec4("sfGlslVec4", "Vector4f", "float32", "float"),
        // ---- window ----
        StructOverride::new(
            "sfVideoMode",
            "VideoMode",
            &[("Width", "uint32"), ("Height", "uint32"), ("BitsPerPixel", "uint32")],
            &[("width", "sfUint32"), ("height", "sfUint32"), ("bitsPerPixel", "sfUint32")],
        ),
        StructOverride::new(
            "sfContextSettings",
            "ContextSettings",
            &[
                ("DepthBits", "uint32"), ("StencilBits", "uint32"), ("AntialiasingLevel", "uint32"),
                ("MajorVersion", "uint32"), ("MinorVersion", "uint32"), ("AttributeFlags", "uint32"),
                ("SRgbCapable", "bool"),
            ],
            &[
                ("depthBits", "sfUint32"), ("stencilBits", "sfUint32"), ("antialiasingLevel", "sfUint32"),
                ("majorVersion", "sfUint32"), ("minorVersion", "sfUint32"), ("attributeFlags", "sfUint32"),
                ("sRgbCapable", "sfBool"),
            ],
        )
        // mutated in place by callers, keep reference semantics
        .with_shape(Shape::Pointer),
        // ---- system ----
        StructOverride::new("sfTime", "Time", &[("Microseconds", "int64")], &[("microseconds", "sfInt64")]),
        // ---- graphics ----
        StructOverride::new(
            "sfColor",
            "Color",
            &[("R", "uint8"), ("G", "uint8"), ("B", "uint8"), ("A", "uint8")],
            &[("r", "sfUint8"), ("g", "sfUint8"), ("b", "sfUint8"), ("a", "sfUint8")],
        ),
        StructOverride::new(
            "sfIntRect",
            "IntRect",
            &[("Left", "int32"), ("Top", "int32"), ("Width", "int32"), ("Height", "int32")],
            &[("left", "sfInt32"), ("top", "sfInt32"), ("width", "sfInt32"), ("height", "sfInt32")],
        ),
        StructOverride::new(
            "sfFloatRect",
            "FloatRect",
            &[("Left", "float32"), ("Top", "float32"), ("Width", "float32"), ("Height", "float32")],
            &[("left", "float"), ("top", "float"), ("width", "float"), ("height", "float")],
        ),
        StructOverride::new(
            "sfRenderStates",
            "RenderStates",
            &[("BlendMode", "BlendMode"), ("Transform", "Transform"), ("Texture", "*Texture"), ("Shader", "*Shader")],
            &[
                ("blendMode", "sfBlendMode"),
                ("transform", "sfTransform"),
                ("texture", "const sfTexture*"),
                ("shader", "const sfShader*"),
            ],
        ),
        StructOverride::new(
            "sfBlendMode",
            "BlendMode",
            &[
                ("ColorSrcFactor", "BlendFactor"), ("ColorDstFactor", "BlendFactor"), ("ColorEquation", "BlendEquation"),
                ("AlphaSrcFactor", "BlendFactor"), ("AlphaDstFactor", "BlendFactor"), ("AlphaEquation", "BlendEquation"),
            ],
            &[
                ("colorSrcFactor", "sfBlendFactor"), ("colorDstFactor", "sfBlendFactor"), ("colorEquation", "sfBlendEquation"),
                ("alphaSrcFactor", "sfBlendFactor"), ("alphaDstFactor", "sfBlendFactor"), ("alphaEquation", "sfBlendEquation"),
            ],
        ),
        StructOverride::new(
            "sfGlyph",
            "Glyph",
            &[("Advance", "float32"), ("Bounds", "FloatRect"), ("TextureRect", "IntRect")],
            &[("advance", "float"), ("bounds", "sfFloatRect"), ("textureRect", "sfIntRect")],
        ),
        StructOverride::new("sfFontInfo", "FontInfo", &[("Family", "string")], &[("family", "const char*")]),
        StructOverride::new(
            "sfVertex",
            "Vertex",
            &[("Position", "Vector2f"), ("Color", "Color"), ("TexCoords", "Vector2f")],
            &[("position", "sfVector2f"), ("color", "sfColor"), ("texCoords", "sfVector2f")],
        )
        .with_array_param("sfVertexBuffer_update", "vertices", "vertexCount"),
        // ---- event payloads ----
        event(
            "sfKeyEvent",
            "KeyEvent",
            &[("Code", "KeyCode"), ("Scancode", "Scancode"), ("Alt", "bool"), ("Control", "bool"), ("Shift", "bool"), ("System", "bool")],
            &[("code", "sfKeyCode"), ("scancode", "sfScancode"), ("alt", "sfBool"), ("control", "sfBool"), ("shift", "sfBool"), ("system", "sfBool")],
        ),
        event("sfTextEvent", "TextEvent", &[("Unicode", "uint32")], &[("unicode", "sfUint32")]),
        event("sfMouseMoveEvent", "MouseMoveEvent", &[("X", "int32"), ("Y", "int32")], &[("x", "int"), ("y", "int")]),
        event(
            "sfMouseButtonEvent",
            "MouseButtonEvent",
            &[("Button", "MouseButton"), ("X", "int32"), ("Y", "int32")],
            &[("button", "sfMouseButton"), ("x", "int"), ("y", "int")],
        ),
        event(
            "sfMouseWheelEvent",
            "MouseWheelEvent",
            &[("Delta", "int32"), ("X", "int32"), ("Y", "int32")],
            &[("delta", "int"), ("x", "int"), ("y", "int")],
        ),
        event(
            "sfMouseWheelScrollEvent",
            "MouseWheelScrollEvent",
            &[("Wheel", "MouseWheel"), ("Delta", "float32"), ("X", "int32"), ("Y", "int32")],
            &[("wheel", "sfMouseWheel"), ("delta", "float"), ("x", "int"), ("y", "int")],
        ),
        event(
            "sfSizeEvent",
            "SizeEvent",
            &[("Width", "uint32"), ("Height", "uint32")],
            &[("width", "unsigned int"), ("height", "unsigned int")],
        ),
        event(
            "sfTouchEvent",
            "TouchEvent",
            &[("Finger", "uint32"), ("X", "int32"), ("Y", "int32")],
            &[("finger", "unsigned int"), ("x", "int"), ("y", "int")],
        ),
        event(
            "sfSensorEvent",
            "SensorEvent",
            &[("SensorType", "SensorType"), ("X", "float32"), ("Y", "float32"), ("Z", "float32")],
            &[("sensorType", "sfSensorType"), ("x", "float"), ("y", "float"), ("z", "float")],
        ),
    ]
}

fn event_union() -> UnionOverride {
    UnionOverride {
        native_name: "sfEvent".to_string(),
        target_name: "Event".to_string(),
        base_name: EVENT_BASE.to_string(),
        discriminant: Field::new("Type", "EventType"),
        cdiscriminant: Field::new("type", "sfEventType"),
        accessor: "EventType".to_string(),
        // sfEvtMouseWheelMoved (deprecated), joystick events and sfEvtCount
        // are left to the unknown variant.
        mappers: vec![
            UnionMapper::unit("ClosedEvent", &["sfEvtClosed"]),
            UnionMapper::unit("LostFocusEvent", &["sfEvtLostFocus"]),
            UnionMapper::unit("GainedFocusEvent", &["sfEvtGainedFocus"]),
            UnionMapper::unit("MouseEnteredEvent", &["sfEvtMouseEntered"]),
            UnionMapper::unit("MouseLeftEvent", &["sfEvtMouseLeft"]),
            UnionMapper::with_payload("SizeEvent", "size", "sfSizeEvent", &["sfEvtResized"]),
            UnionMapper::with_payload("KeyEvent", "key", "sfKeyEvent", &["sfEvtKeyPressed", "sfEvtKeyReleased"]),
            UnionMapper::with_payload("TextEvent", "text", "sfTextEvent", &["sfEvtTextEntered"]),
            UnionMapper::with_payload("MouseMoveEvent", "mouseMove", "sfMouseMoveEvent", &["sfEvtMouseMoved"]),
            UnionMapper::with_payload(
                "MouseButtonEvent",
                "mouseButton",
                "sfMouseButtonEvent",
                &["sfEvtMouseButtonPressed", "sfEvtMouseButtonReleased"],
            ),
            UnionMapper::with_payload(
                "MouseWheelScrollEvent",
                "mouseWheelScroll",
                "sfMouseWheelScrollEvent",
                &["sfEvtMouseWheelScrolled"],
            ),
            UnionMapper::with_payload(
                "TouchEvent",
                "touch",
                "sfTouchEvent",
                &["sfEvtTouchBegan", "sfEvtTouchMoved", "sfEvtTouchEnded"],
            ),
            UnionMapper::with_payload("SensorEvent", "sensor", "sfSensorEvent", &["sfEvtSensorChanged"]),
        ],
    }
}

fn return_params() -> Vec<ReturnParamOverride> {
    [
        ("sfRenderWindow_pollEvent", "event"),
        ("sfRenderWindow_waitEvent", "event"),
        ("sfWindowBase_pollEvent", "event"),
        ("sfWindowBase_waitEvent", "event"),
        ("sfWindow_pollEvent", "event"),
        ("sfWindow_waitEvent", "event"),
        ("sfIntRect_intersects", "intersection"),
        ("sfFloatRect_intersects", "intersection"),
    ]
    .into_iter()
    .map(|(function, param)| ReturnParamOverride::new(function, param))
    .collect()
}
