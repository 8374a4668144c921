// Declaration model as loaded from the native API dump. No target types here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[serde(alias = "typedef", alias = "union")]
    Struct,                  // opaque to the generator unless overridden
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
}

/// One entry of the types list, e.g. `sfVector2i`, `sfEventType`, `sfSprite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TypeKind,
    /// Declaration order is discriminant order.
    #[serde(default)]
    pub enumerators: Vec<Enumerator>,
}

/// `(name, type)` pair. Used for native parameters and for both sides of a
/// struct override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(rename = "type", alias = "Type")]
    pub ty: String,
}

/// One entry of the functions list, e.g. `sfRenderWindow_pollEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Field>,
    #[serde(default = "void_type")]
    pub return_type: String,
}

fn void_type() -> String { "void".to_string() }

impl TypeDecl {
    pub fn new_struct(name: &str) -> Self {
        Self { name: name.to_string(), kind: TypeKind::Struct, enumerators: Vec::new() }
    }
    pub fn new_enum(name: &str, enumerators: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Enum,
            enumerators: enumerators.iter().map(|e| Enumerator { name: e.to_string() }).collect(),
        }
    }
    pub fn is_enum(&self) -> bool { self.kind == TypeKind::Enum }
}

impl Field {
    pub fn new(name: &str, ty: &str) -> Self {
        Self { name: name.to_string(), ty: ty.to_string() }
    }
}

impl FunctionDecl {
    pub fn new(name: &str, parameters: &[(&str, &str)], return_type: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: parameters.iter().map(|(n, t)| Field::new(n, t)).collect(),
            return_type: return_type.to_string(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&Field> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NATIVE TYPE STRINGS
// ————————————————————————————————————————————————————————————————————————————

/// A native type string split into its clean base and qualifiers,
/// e.g. `"const struct sfVector2f*"` → base `sfVector2f`, const, one pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    pub base: String,
    pub is_const: bool,
    pub pointer_depth: usize,
}

impl NativeType {
    pub fn parse(raw: &str) -> Self {
        let is_const = raw.split_whitespace().any(|w| w == "const")
            || raw.contains("const ");
        let pointer_depth = raw.matches('*').count();
        Self { base: clean_type(raw), is_const, pointer_depth }
    }
    pub fn is_pointer(&self) -> bool { self.pointer_depth > 0 }
    pub fn is_void(&self) -> bool { self.base == "void" }
}

/// Strip `const `, `struct ` and `*` from a native type string.
pub fn clean_type(raw: &str) -> String {
    let t = raw.replace("const ", "").replace("struct ", "").replace('*', "");
    let t = t.trim();
    // trailing `const` as in `char *const`
    let t = t.strip_suffix(" const").unwrap_or(t);
    t.split_whitespace().collect::<Vec<_>>().join(" ")
}
