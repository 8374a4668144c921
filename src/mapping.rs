//! Type Mapping Engine.
//!
//! Resolves a native type string to a Go type descriptor. Resolution order,
//! first match wins:
//!
//! 1. union override
//! 2. struct override (pointer-ness from the override's [`Shape`])
//! 3. known declaration (enum or opaque handle, pointer-ness from the qualifier)
//! 4. primitive table, defaulting to `int32`
use serde::Serialize;

use crate::ir::NativeType;
use crate::naming;
use crate::overrides::{OverrideRegistry, Shape};
use crate::store::Declarations;

// ————————————————————————————————————————————————————————————————————————————
// PRIMITIVES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Byte,
    Uintptr,
}

impl Primitive {
    pub const ALL: [Primitive; 13] = [
        Self::I8, Self::I16, Self::I32, Self::I64,
        Self::U8, Self::U16, Self::U32, Self::U64,
        Self::F32, Self::F64, Self::Bool, Self::Byte, Self::Uintptr,
    ];

    pub fn go_name(self) -> &'static str {
        match self {
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Uintptr => "uintptr",
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::I8 | Self::U8 | Self::Byte | Self::Bool => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 | Self::F32 => 32,
            Self::I64 | Self::U64 | Self::F64 | Self::Uintptr => 64,
        }
    }

    pub fn from_go_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.go_name() == name)
    }

    /// Native primitive spellings and the CSFML fixed-width aliases.
    pub fn from_native(base: &str) -> Option<Self> {
        let p = match base {
            "sfBool" => Self::Bool,
            "sfInt8" | "signed char" | "int8_t" => Self::I8,
            "sfInt16" | "short" | "int16_t" => Self::I16,
            "sfInt32" | "int" | "int32_t" => Self::I32,
            "sfInt64" | "long" | "long long" | "int64_t" => Self::I64,
            "sfUint8" | "unsigned char" | "uint8_t" => Self::U8,
            "sfUint16" | "unsigned short" | "uint16_t" => Self::U16,
            "sfUint32" | "sfChar32" | "sfUint" | "unsigned int" | "uint32_t" => Self::U32,
            "sfUint64" | "unsigned long" | "unsigned long long" | "size_t" | "uint64_t" => Self::U64,
            "float" => Self::F32,
            "double" => Self::F64,
            "char" => Self::Byte,
            "sfWindowHandle" => Self::Uintptr,
            _ => return None,
        };
        Some(p)
    }
}

/// Width of a native primitive spelling as the C side lays it out.
fn native_bits(base: &str) -> Option<u32> {
    match base {
        // typedef int sfBool
        "sfBool" => Some(32),
        other => Primitive::from_native(other).map(Primitive::bits),
    }
}

/// How a primitive crosses the boundary. cgo types are nominal, so a
/// conversion is always emitted; this only records whether it also
/// changes width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CastKind {
    Nominal,
    Resize,
}

pub fn cast_kind(native_base: &str, target: Primitive) -> CastKind {
    match native_bits(native_base) {
        Some(bits) if target != Primitive::Bool && bits != target.bits() => CastKind::Resize,
        _ => CastKind::Nominal,
    }
}

/// True when `target` occupies exactly the bytes of the native primitive.
/// Unlike [`cast_kind`], `bool` against a 32-bit `sfBool` does not match.
pub fn same_layout(native_base: &str, target: Primitive) -> bool {
    native_bits(native_base).is_none_or(|bits| bits == target.bits())
}

/// Go primitive a native pointer may point at. Pointers are reinterpreted
/// with `unsafe.Pointer`, so the pointee must match the native width:
/// `sfBool*` becomes `*int32`, not `*bool`.
pub fn pointee_primitive(native_base: &str, target: Primitive) -> Primitive {
    if same_layout(native_base, target) {
        return target;
    }
    match native_bits(native_base) {
        Some(8) => Primitive::I8,
        Some(16) => Primitive::I16,
        Some(64) => Primitive::I64,
        _ => Primitive::I32,
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TARGET TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetKind {
    /// No value (`void` return).
    Void,
    /// `void*`, carried as `uintptr`.
    Address,
    String,
    Primitive(Primitive),
    Enum,
    /// Opaque compound type with no override.
    Handle,
    Override,
    Union,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    /// Go name without pointer marker; empty for [`TargetKind::Void`].
    pub name: String,
    pub is_pointer: bool,
    pub kind: TargetKind,
    pub native: NativeType,
}

impl TargetType {
    /// Go spelling, e.g. `*RenderWindow`, `Vector2i`, `int32`.
    pub fn go_type(&self) -> String {
        if self.is_pointer { format!("*{}", self.name) } else { self.name.clone() }
    }

    pub fn is_void(&self) -> bool {
        self.kind == TargetKind::Void
    }

    /// Known opaque compound type: not an override, not an enum.
    pub fn is_known_compound(&self) -> bool {
        self.kind == TargetKind::Handle
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match self.kind {
            TargetKind::Primitive(p) => Some(p),
            _ => None,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// MAPPER
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    decls: &'a Declarations,
    registry: &'a OverrideRegistry,
    prefix: &'a str,
}

impl<'a> TypeMapper<'a> {
    pub fn new(decls: &'a Declarations, registry: &'a OverrideRegistry, prefix: &'a str) -> Self {
        Self { decls, registry, prefix }
    }

    pub fn decls(&self) -> &'a Declarations { self.decls }
    pub fn registry(&self) -> &'a OverrideRegistry { self.registry }
    pub fn prefix(&self) -> &'a str { self.prefix }

    pub fn map(&self, raw: &str) -> TargetType {
        let native = NativeType::parse(raw);
        let base = native.base.as_str();

        if let Some(u) = self.registry.union_override_for(base) {
            // interfaces are never pointer-typed on the Go side
            return TargetType { name: u.target_name.clone(), is_pointer: false, kind: TargetKind::Union, native };
        }
        if let Some(o) = self.registry.struct_override_for(base) {
            return TargetType {
                name: o.target_name.clone(),
                is_pointer: o.shape == Shape::Pointer,
                kind: TargetKind::Override,
                native,
            };
        }
        if let Some(decl) = self.decls.type_decl(base) {
            let kind = if decl.is_enum() { TargetKind::Enum } else { TargetKind::Handle };
            return TargetType {
                name: naming::target_type_name(base, self.prefix),
                is_pointer: native.is_pointer(),
                kind,
                native,
            };
        }
        if native.is_void() {
            return if native.is_pointer() {
                TargetType { name: Primitive::Uintptr.go_name().to_string(), is_pointer: false, kind: TargetKind::Address, native }
            } else {
                TargetType { name: String::new(), is_pointer: false, kind: TargetKind::Void, native }
            };
        }
        if base == "char" && native.pointer_depth == 1 {
            return TargetType { name: "string".to_string(), is_pointer: false, kind: TargetKind::String, native };
        }
        let primitive = Primitive::from_native(base).unwrap_or_else(|| {
            tracing::debug!(native = %raw, "no mapping for native type, falling back to int32");
            Primitive::I32
        });
        let primitive = if native.is_pointer() { pointee_primitive(base, primitive) } else { primitive };
        TargetType {
            name: primitive.go_name().to_string(),
            is_pointer: native.is_pointer(),
            kind: TargetKind::Primitive(primitive),
            native,
        }
    }

    /// Type of the value a native pointer points at: `sfEvent*` → `Event`.
    pub fn map_pointee(&self, raw: &str) -> TargetType {
        match raw.rfind('*') {
            Some(at) => {
                let mut inner = raw.to_string();
                inner.remove(at);
                self.map(&inner)
            }
            None => self.map(raw),
        }
    }

    /// Resolve one side of a struct-override field pair. The native field
    /// decides the conversion; the Go field decides the Go-side spelling.
    pub fn map_field(&self, go_type: &str, native_type: &str) -> TargetType {
        let mut t = self.map(native_type);
        let (is_pointer, name) = match go_type.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, go_type),
        };
        let mut name = name.to_string();
        if let TargetKind::Primitive(mapped) = t.kind {
            if let Some(p) = Primitive::from_go_name(&name) {
                if t.native.is_pointer() && !same_layout(&t.native.base, p) {
                    // keep the width-exact pointee the native side dictates
                    name = mapped.go_name().to_string();
                } else {
                    t.kind = TargetKind::Primitive(p);
                }
            }
        }
        if t.kind != TargetKind::Void {
            t.name = name;
            t.is_pointer = is_pointer;
        }
        t
    }

    pub fn is_value_handle(&self, t: &TargetType) -> bool {
        t.kind == TargetKind::Handle && self.registry.is_value_handle(&t.native.base)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CGO SPELLING
// ————————————————————————————————————————————————————————————————————————————

/// cgo name of a native base type, e.g. `unsigned int` → `C.uint`.
pub fn cgo_base(base: &str) -> String {
    let name = match base {
        "unsigned int" => "uint",
        "unsigned char" => "uchar",
        "unsigned short" => "ushort",
        "unsigned long" => "ulong",
        "signed char" => "schar",
        "long long" => "longlong",
        "unsigned long long" => "ulonglong",
        other => other,
    };
    format!("C.{}", name.replace(' ', "_"))
}

/// cgo spelling of a full native type, e.g. `const sfVector2f*` → `*C.sfVector2f`.
pub fn cgo_type(native: &NativeType) -> String {
    if native.is_void() && native.is_pointer() {
        return format!("{}unsafe.Pointer", "*".repeat(native.pointer_depth - 1));
    }
    format!("{}{}", "*".repeat(native.pointer_depth), cgo_base(&native.base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeDecl;
    use crate::store::SkipRules;
    use pretty_assertions::assert_eq;

    fn decls() -> Declarations {
        Declarations::from_decls(
            vec![
                TypeDecl::new_struct("sfRenderWindow"),
                TypeDecl::new_struct("sfVector2i"),
                TypeDecl::new_enum("sfBlendFactor", &["sfBlendFactorZero"]),
            ],
            Vec::new(),
            &SkipRules::none(),
        )
        .unwrap()
    }

    #[test]
    fn resolution_order() {
        let decls = decls();
        let registry = crate::overrides::sfml::registry();
        let mapper = TypeMapper::new(&decls, &registry, "sf");

        let v = mapper.map("const sfVector2i*");
        assert_eq!((v.go_type(), v.kind), ("Vector2i".to_string(), TargetKind::Override));

        let w = mapper.map("sfRenderWindow*");
        assert_eq!((w.go_type(), w.kind), ("*RenderWindow".to_string(), TargetKind::Handle));
        assert!(w.is_known_compound());

        let e = mapper.map("sfBlendFactor");
        assert_eq!((e.go_type(), e.kind), ("BlendFactor".to_string(), TargetKind::Enum));

        let settings = mapper.map("sfContextSettings");
        assert_eq!(settings.go_type(), "*ContextSettings");

        assert_eq!(mapper.map("void").kind, TargetKind::Void);
        assert_eq!(mapper.map("void*").go_type(), "uintptr");
        assert_eq!(mapper.map("const char*").go_type(), "string");
        assert_eq!(mapper.map("float*").go_type(), "*float32");
        assert_eq!(mapper.map("sfBool").go_type(), "bool");
        assert_eq!(mapper.map("sfMystery").go_type(), "int32");
    }

    #[test]
    fn cgo_spelling() {
        assert_eq!(cgo_type(&NativeType::parse("unsigned int")), "C.uint");
        assert_eq!(cgo_type(&NativeType::parse("const sfVector2f*")), "*C.sfVector2f");
        assert_eq!(cgo_type(&NativeType::parse("void*")), "unsafe.Pointer");
        assert_eq!(cgo_type(&NativeType::parse("size_t")), "C.size_t");
    }

    #[test]
    fn casts_are_classified_by_width() {
        assert_eq!(cast_kind("int", Primitive::I32), CastKind::Nominal);
        assert_eq!(cast_kind("int", Primitive::I64), CastKind::Resize);
        assert_eq!(cast_kind("sfBool", Primitive::Bool), CastKind::Nominal);
        assert_eq!(cast_kind("sfMystery", Primitive::I32), CastKind::Nominal);
    }

    #[test]
    fn pointers_to_resized_primitives_use_the_native_width() {
        let decls = decls();
        let registry = crate::overrides::sfml::registry();
        let mapper = TypeMapper::new(&decls, &registry, "sf");

        assert!(!same_layout("sfBool", Primitive::Bool));
        assert_eq!(mapper.map("sfBool*").go_type(), "*int32");
        assert_eq!(mapper.map("sfBool").go_type(), "bool");
        assert_eq!(mapper.map("unsigned int*").go_type(), "*uint32");
        assert_eq!(mapper.map_field("*bool", "sfBool*").go_type(), "*int32");
        assert_eq!(mapper.map_field("*float32", "float*").go_type(), "*float32");
    }
}
