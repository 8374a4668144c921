//! Type Lowering Engine.
//!
//! Declarations become enums or opaque handles; struct overrides become Go
//! value types with conversion functions (and bulk array codecs where a
//! function passes them as counted sequences); union overrides become an
//! interface, one type per variant, and a dispatch function.
use indexmap::IndexSet;

use crate::config::ArrayMarshal;
use crate::ir::{clean_type, Field, TypeDecl};
use crate::mapping::cgo_base;
use crate::naming;
use crate::overrides::{Shape, StructOverride, UnionMapper, UnionOverride};
use crate::plan::{EnumDecl, EnumVariant, FunctionPlan, InterfaceDecl, Item, Receiver, StructDecl};

use super::convert::{from_c_fn, override_from_native, override_to_native};
use super::LowerCtx;

/// Go-side representation of the `sfBool` crossings.
pub fn support_items() -> Vec<Item> {
    vec![
        Item::Function(FunctionPlan::helper(
            "boolToSfBool",
            None,
            vec![Field::new("b", "bool")],
            &["C.sfBool"],
            vec!["if b {\n\treturn C.sfTrue\n}".to_string(), "return C.sfFalse".to_string()],
        )),
        Item::Function(FunctionPlan::helper(
            "sfBoolToBool",
            None,
            vec![Field::new("b", "C.sfBool")],
            &["bool"],
            vec!["return b != C.sfFalse".to_string()],
        )),
    ]
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

/// Enums and opaque handles. Declarations covered by an override are
/// emitted from the registry instead.
#[tracing::instrument(level = "debug", skip_all, fields(decl = %decl.name))]
pub fn lower_decl(ctx: &LowerCtx<'_>, decl: &TypeDecl) -> Vec<Item> {
    let registry = ctx.registry();
    if !decl.name.starts_with(ctx.prefix()) {
        tracing::trace!("outside the prefix, skipped");
        return Vec::new();
    }
    if registry.struct_override_for(&decl.name).is_some() || registry.union_override_for(&decl.name).is_some() {
        return Vec::new();
    }
    let name = naming::target_type_name(&decl.name, ctx.prefix());
    if decl.is_enum() {
        return vec![Item::Enum(lower_enum(ctx, decl, &name))];
    }
    lower_handle(ctx, &decl.name, &name)
}

fn lower_enum(ctx: &LowerCtx<'_>, decl: &TypeDecl, name: &str) -> EnumDecl {
    EnumDecl {
        name: name.to_string(),
        underlying: "int32".to_string(),
        variants: decl
            .enumerators
            .iter()
            .map(|e| EnumVariant {
                name: naming::target_type_name(&e.name, ctx.prefix()),
                value: format!("C.{}", e.name),
            })
            .collect(),
    }
}

fn lower_handle(ctx: &LowerCtx<'_>, native: &str, name: &str) -> Vec<Item> {
    let var = naming::receiver_var(name);
    let ctype = cgo_base(native);
    let receiver = Some(Receiver { var: var.clone(), ty: format!("*{name}") });

    if ctx.registry().is_value_handle(native) {
        return vec![
            Item::Struct(StructDecl { name: name.to_string(), embeds: Vec::new(), fields: vec![Field::new("obj", &ctype)] }),
            Item::Function(FunctionPlan::helper(
                "ToC",
                Some(Receiver { var: var.clone(), ty: name.to_string() }),
                Vec::new(),
                &[&ctype],
                vec![format!("return {var}.obj")],
            )),
            Item::Function(FunctionPlan::helper(
                &from_c_fn(name),
                None,
                vec![Field::new("obj", &ctype)],
                &[&format!("*{name}")],
                vec![format!("return &{name}{{obj: obj}}")],
            )),
        ];
    }

    let ptr_type = format!("*{ctype}");
    vec![
        Item::Struct(StructDecl { name: name.to_string(), embeds: Vec::new(), fields: vec![Field::new("ptr", &ptr_type)] }),
        Item::Function(FunctionPlan::helper(
            "ToC",
            receiver,
            Vec::new(),
            &[&ptr_type],
            vec![format!("if {var} == nil {{\n\treturn nil\n}}"), format!("return {var}.ptr")],
        )),
        Item::Function(FunctionPlan::helper(
            &from_c_fn(name),
            None,
            vec![Field::new("ptr", &ptr_type)],
            &[&format!("*{name}")],
            vec!["if ptr == nil {\n\treturn nil\n}".to_string(), format!("return &{name}{{ptr: ptr}}")],
        )),
    ]
}

// ————————————————————————————————————————————————————————————————————————————
// STRUCT OVERRIDES
// ————————————————————————————————————————————————————————————————————————————

/// Emitted once per Go type, by the override that owns the target name,
/// and only when its native declaration is present. Union payloads are
/// emitted with their union.
#[tracing::instrument(level = "debug", skip_all, fields(native = %o.native_name))]
pub fn lower_struct_override(ctx: &LowerCtx<'_>, o: &StructOverride) -> Vec<Item> {
    let registry = ctx.registry();
    if !registry.is_canonical(o) || registry.is_union_payload(&o.native_name) || !ctx.decls().is_known(&o.native_name) {
        return Vec::new();
    }
    let mut items = override_items(ctx, o);
    if !o.array_params.is_empty() {
        items.extend(array_codecs(ctx, o));
    }
    items
}

/// Struct, forward conversion and inverse conversion.
fn override_items(ctx: &LowerCtx<'_>, o: &StructOverride) -> Vec<Item> {
    let ctype = cgo_base(&o.native_name);
    let target = &o.target_name;

    let mut from_params = Vec::new();
    if let Some(base) = &o.base {
        from_params.push(Field::new("base", base));
    }
    from_params.push(Field::new("cObj", &ctype));
    let from_ret = if o.shape == Shape::Pointer { format!("*{target}") } else { target.clone() };
    let base_expr = o.base.as_ref().map(|_| "base");

    vec![
        Item::Struct(StructDecl { name: target.clone(), embeds: o.base.iter().cloned().collect(), fields: o.fields.clone() }),
        Item::Function(FunctionPlan::helper(
            "ToC",
            Some(Receiver { var: "v".to_string(), ty: target.clone() }),
            Vec::new(),
            &[&ctype],
            vec![format!("return {}", override_to_native(ctx, o, "v"))],
        )),
        Item::Function(FunctionPlan::helper(
            &from_c_fn(target),
            None,
            from_params,
            &[&from_ret],
            vec![format!("return {}", override_from_native(ctx, o, "cObj", base_expr))],
        )),
    ]
}

const MALLOC_CHECK: &str = "if ptr == nil {\n\tpanic(\"C.malloc failed\")\n}";

/// `NewXSliceFromCArray` / `NewXCArrayFromGoSlice`. Both start with the
/// layout-size guard, so a mismatched pair panics before touching memory.
fn array_codecs(ctx: &LowerCtx<'_>, o: &StructOverride) -> Vec<Item> {
    let ctype = cgo_base(&o.native_name);
    let target = &o.target_name;
    let guard = format!(
        "if unsafe.Sizeof({target}{{}}) != unsafe.Sizeof({ctype}{{}}) {{\n\tpanic(\"{target}: Go layout size differs from {ctype}\")\n}}"
    );
    // value returned by NewXFromC is *X for pointer-shaped overrides
    let deref = if o.shape == Shape::Pointer { "*" } else { "" };
    let from_c = from_c_fn(target);
    let base_arg = o.base.as_ref().map(|b| format!("{b}{{}}, ")).unwrap_or_default();

    let (decode, encode) = match ctx.config.array_marshal {
        ArrayMarshal::ElementWise => (
            vec![
                guard.clone(),
                "cSlice := unsafe.Slice(ptr, int(count))".to_string(),
                format!("slice := make([]{target}, int(count))"),
                format!("for i := range cSlice {{\n\tslice[i] = {deref}{from_c}({base_arg}cSlice[i])\n}}"),
                "return slice".to_string(),
            ],
            vec![
                guard,
                format!("ptr := (*{ctype})(C.malloc(C.size_t(len(slice)) * C.size_t(unsafe.Sizeof({ctype}{{}}))))"),
                MALLOC_CHECK.to_string(),
                "cSlice := unsafe.Slice(ptr, len(slice))".to_string(),
                "for i, v := range slice {\n\tcSlice[i] = v.ToC()\n}".to_string(),
                "return ptr".to_string(),
            ],
        ),
        ArrayMarshal::RawCopy => (
            vec![
                guard.clone(),
                format!("slice := make([]{target}, int(count))"),
                format!(
                    "if count > 0 {{\n\tC.memcpy(unsafe.Pointer(&slice[0]), unsafe.Pointer(ptr), count*C.size_t(unsafe.Sizeof({ctype}{{}})))\n}}"
                ),
                "return slice".to_string(),
            ],
            vec![
                guard,
                format!("size := C.size_t(len(slice)) * C.size_t(unsafe.Sizeof({ctype}{{}}))"),
                "ptr := C.malloc(size)".to_string(),
                MALLOC_CHECK.to_string(),
                "if len(slice) > 0 {\n\tC.memcpy(ptr, unsafe.Pointer(&slice[0]), size)\n}".to_string(),
                format!("return (*{ctype})(ptr)"),
            ],
        ),
    };

    vec![
        Item::Function(FunctionPlan::helper(
            &format!("New{target}SliceFromCArray"),
            None,
            vec![Field::new("ptr", &format!("*{ctype}")), Field::new("count", "C.size_t")],
            &[&format!("[]{target}")],
            decode,
        )),
        Item::Function(FunctionPlan::helper(
            &format!("New{target}CArrayFromGoSlice"),
            None,
            vec![Field::new("slice", &format!("[]{target}"))],
            &[&format!("*{ctype}")],
            encode,
        )),
    ]
}

// ————————————————————————————————————————————————————————————————————————————
// UNIONS
// ————————————————————————————————————————————————————————————————————————————

#[tracing::instrument(level = "debug", skip_all, fields(union = %u.native_name))]
pub fn lower_union(ctx: &LowerCtx<'_>, u: &UnionOverride) -> Vec<Item> {
    if !ctx.decls().is_known(&u.native_name) {
        return Vec::new();
    }
    let ctype = cgo_base(&u.native_name);
    let disc_ty = &u.discriminant.ty;
    let base = &u.base_name;

    let mut items = vec![
        Item::Interface(InterfaceDecl {
            name: u.target_name.clone(),
            methods: vec![format!("{}() {disc_ty}", u.accessor), format!("BaseToC() {ctype}")],
        }),
        Item::Struct(StructDecl { name: base.clone(), embeds: Vec::new(), fields: vec![Field::new("cObj", &ctype)] }),
        Item::Function(FunctionPlan::helper(
            "BaseToC",
            Some(Receiver { var: "b".to_string(), ty: base.clone() }),
            Vec::new(),
            &[&ctype],
            vec!["return b.cObj".to_string()],
        )),
    ];

    let mut emitted = IndexSet::new();
    for mapper in &u.mappers {
        if !emitted.insert(mapper.variant.as_str()) {
            continue;
        }
        match payload_override(ctx, mapper) {
            Some(payload) => items.extend(override_items(ctx, payload)),
            None => items.push(Item::Struct(unit_variant(u, &mapper.variant))),
        }
        items.push(Item::Function(accessor(u, &mapper.variant)));
    }

    let unknown = u.unknown_variant();
    items.push(Item::Struct(unit_variant(u, &unknown)));
    items.push(Item::Function(accessor(u, &unknown)));
    items.push(Item::Function(dispatch(ctx, u)));
    items
}

fn payload_override<'a>(ctx: &LowerCtx<'a>, mapper: &UnionMapper) -> Option<&'a StructOverride> {
    let payload = mapper.payload.as_ref()?;
    ctx.registry().struct_override_for(&clean_type(&payload.ty))
}

/// Variant with no data beyond the discriminant.
fn unit_variant(u: &UnionOverride, name: &str) -> StructDecl {
    StructDecl { name: name.to_string(), embeds: vec![u.base_name.clone()], fields: vec![u.discriminant.clone()] }
}

fn accessor(u: &UnionOverride, variant: &str) -> FunctionPlan {
    FunctionPlan::helper(
        &u.accessor,
        Some(Receiver { var: "v".to_string(), ty: variant.to_string() }),
        Vec::new(),
        &[&u.discriminant.ty],
        vec![format!("return v.{}", u.discriminant.name)],
    )
}

/// `NewEventFromC`: read the discriminant out of the raw union, pick the
/// first mapper claiming it, fall back to the unknown variant.
fn dispatch(ctx: &LowerCtx<'_>, u: &UnionOverride) -> FunctionPlan {
    let ctype = cgo_base(&u.native_name);
    let disc_ctype = cgo_base(&clean_type(&u.cdiscriminant.ty));
    let disc_ty = &u.discriminant.ty;
    let disc_var = naming::camel_case(disc_ty);
    let base_field = &u.discriminant.name;

    let mut arms = Vec::new();
    let mut claimed = IndexSet::new();
    for mapper in &u.mappers {
        // first mapper claiming a value owns it
        let values: Vec<String> = mapper
            .discriminants
            .iter()
            .filter(|d| claimed.insert(d.as_str()))
            .map(|d| naming::target_type_name(d, ctx.prefix()))
            .collect();
        if values.is_empty() {
            continue;
        }
        let construct = match payload_override(ctx, mapper) {
            Some(payload) => format!(
                "{}(base, *(*{})(unsafe.Pointer(&cObj)))",
                from_c_fn(&payload.target_name),
                cgo_base(&payload.native_name)
            ),
            None => format!("{}{{{}: base, {base_field}: {disc_var}}}", mapper.variant, u.base_name),
        };
        arms.push(format!("case {}:\n\treturn {construct}", values.join(", ")));
    }
    arms.push(format!(
        "default:\n\treturn {}{{{}: base, {base_field}: {disc_var}}}",
        u.unknown_variant(),
        u.base_name
    ));

    FunctionPlan::helper(
        &from_c_fn(&u.target_name),
        None,
        vec![Field::new("cObj", &ctype)],
        &[&u.target_name],
        vec![
            format!("base := {}{{cObj: cObj}}", u.base_name),
            format!("{disc_var} := {disc_ty}(*(*{disc_ctype})(unsafe.Pointer(&cObj)))"),
            format!("switch {disc_var} {{\n{}\n}}", arms.join("\n")),
        ],
    )
}
