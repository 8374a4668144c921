//! Value conversion expressions across the cgo boundary.
//!
//! `to_native` turns a Go expression into the native value it stands for;
//! `from_native` is the inverse. Struct overrides are expanded field by
//! field into composite literals, recursing through nested overrides, so a
//! single expression covers the whole value.
use crate::mapping::{cgo_base, cgo_type, Primitive, TargetKind, TargetType};
use crate::naming;
use crate::overrides::{Shape, StructOverride};

use super::LowerCtx;

/// Native value for `expr`. For overrides and unions this is always the
/// by-value form; callers needing a pointer take the address of a local.
pub fn to_native(ctx: &LowerCtx<'_>, ty: &TargetType, expr: &str) -> String {
    match ty.kind {
        TargetKind::Void => expr.to_string(),
        TargetKind::Address => format!("unsafe.Pointer({expr})"),
        TargetKind::String => format!("C.CString({expr})"),
        TargetKind::Primitive(_) if ty.is_pointer => format!("({})(unsafe.Pointer({expr}))", cgo_type(&ty.native)),
        TargetKind::Primitive(Primitive::Bool) => format!("boolToSfBool({expr})"),
        TargetKind::Primitive(_) => format!("{}({expr})", cgo_base(&ty.native.base)),
        TargetKind::Enum if ty.is_pointer => format!("({})(unsafe.Pointer({expr}))", cgo_type(&ty.native)),
        TargetKind::Enum => format!("{}({expr})", cgo_base(&ty.native.base)),
        TargetKind::Handle => handle_to_native(ctx, ty, expr),
        TargetKind::Union => format!("{expr}.BaseToC()"),
        TargetKind::Override => match ctx.registry().struct_override_for(&ty.native.base) {
            Some(o) => override_to_native(ctx, o, expr),
            None => expr.to_string(),
        },
    }
}

fn handle_to_native(ctx: &LowerCtx<'_>, ty: &TargetType, expr: &str) -> String {
    let native_pointer = ty.native.is_pointer();
    if ctx.mapper.is_value_handle(ty) {
        if native_pointer { format!("&{expr}.obj") } else { format!("{expr}.ToC()") }
    } else if native_pointer {
        format!("{expr}.ToC()")
    } else {
        format!("*{expr}.ToC()")
    }
}

/// `C.sfVector2i{x: C.int(v.X), y: C.int(v.Y)}`
pub fn override_to_native(ctx: &LowerCtx<'_>, o: &StructOverride, expr: &str) -> String {
    let members = o
        .pairs()
        .map(|(field, cfield)| {
            let ty = ctx.mapper.map_field(&field.ty, &cfield.ty);
            let value = to_native(ctx, &ty, &format!("{expr}.{}", field.name));
            format!("{}: {value}", naming::cgo_field(&cfield.name))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}{{{members}}}", cgo_base(&o.native_name))
}

/// Go value for the native `expr`, shaped as `ty` says.
pub fn from_native(ctx: &LowerCtx<'_>, ty: &TargetType, expr: &str) -> String {
    match ty.kind {
        TargetKind::Void => String::new(),
        TargetKind::Address => format!("uintptr({expr})"),
        TargetKind::String => format!("C.GoString({expr})"),
        TargetKind::Primitive(_) if ty.is_pointer => format!("({})(unsafe.Pointer({expr}))", ty.go_type()),
        TargetKind::Primitive(Primitive::Bool) => format!("sfBoolToBool({expr})"),
        TargetKind::Primitive(p) => format!("{}({expr})", p.go_name()),
        TargetKind::Enum if ty.is_pointer => format!("({})(unsafe.Pointer({expr}))", ty.go_type()),
        TargetKind::Enum => format!("{}({expr})", ty.name),
        TargetKind::Handle => handle_from_native(ctx, ty, expr),
        TargetKind::Union => {
            let arg = if ty.native.is_pointer() { format!("*{expr}") } else { expr.to_string() };
            format!("{}({arg})", from_c_fn(&ty.name))
        }
        TargetKind::Override => match ctx.registry().struct_override_for(&ty.native.base) {
            Some(o) => override_from_native(ctx, o, expr, None),
            None => expr.to_string(),
        },
    }
}

fn handle_from_native(ctx: &LowerCtx<'_>, ty: &TargetType, expr: &str) -> String {
    let native_pointer = ty.native.is_pointer();
    let arg = match (ctx.mapper.is_value_handle(ty), native_pointer) {
        (true, true) => format!("*{expr}"),
        (false, false) => format!("&{expr}"),
        _ => expr.to_string(),
    };
    let call = format!("{}({arg})", from_c_fn(&ty.name));
    // NewXFromC hands back *X
    if ty.is_pointer { call } else { format!("*{call}") }
}

/// `Vector2i{X: int32(cval.x), Y: int32(cval.y)}`. Variants embedding a base
/// type get it as the first member.
pub fn override_from_native(ctx: &LowerCtx<'_>, o: &StructOverride, expr: &str, base: Option<&str>) -> String {
    let mut members = Vec::with_capacity(o.fields.len() + 1);
    if let (Some(base_ty), Some(base_expr)) = (&o.base, base) {
        members.push(format!("{base_ty}: {base_expr}"));
    }
    for (field, cfield) in o.pairs() {
        let ty = ctx.mapper.map_field(&field.ty, &cfield.ty);
        let value = from_native(ctx, &ty, &format!("{expr}.{}", naming::cgo_field(&cfield.name)));
        members.push(format!("{}: {value}", field.name));
    }
    let literal = format!("{}{{{}}}", o.target_name, members.join(", "));
    if o.shape == Shape::Pointer { format!("&{literal}") } else { literal }
}

/// `Vertex` → `NewVertexFromC`
pub fn from_c_fn(type_name: &str) -> String {
    format!("New{type_name}FromC")
}
