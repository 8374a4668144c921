//! Override registry: hand-curated rules that reshape native structs, unions
//! and parameter conventions into Go value types.
//!
//! The registry is built once, then only read. Tables are kept as ordered
//! maps so everything derived from them (variant order, dispatch arms) is
//! stable across runs.
pub mod sfml;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::RegistryError;
use crate::ir::{clean_type, Field};
use crate::store::Declarations;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// How the Go side holds an overridden value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Shape {
    #[default]
    Value,
    /// Always `*T`, even when the native side passes by value.
    Pointer,
}

/// `function.param` is a counted sequence whose length travels in
/// `function.count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayParamOverride {
    pub function: String,
    pub param: String,
    pub count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructOverride {
    pub native_name: String,
    pub target_name: String,
    /// Embedded parent, set for union variants.
    pub base: Option<String>,
    pub shape: Shape,
    /// Target-side fields; position `i` pairs with `cfields[i]`.
    pub fields: Vec<Field>,
    pub cfields: Vec<Field>,
    pub array_params: Vec<ArrayParamOverride>,
}

/// Binds discriminant values to one variant. `payload` names the union
/// member holding the variant's data (`key: sfKeyEvent`); `None` for
/// variants that carry nothing beyond the discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionMapper {
    pub variant: String,
    pub discriminants: Vec<String>,
    pub payload: Option<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionOverride {
    pub native_name: String,
    /// Go interface every variant implements.
    pub target_name: String,
    /// Go struct embedded in every variant, holding the raw native value.
    pub base_name: String,
    pub discriminant: Field,
    pub cdiscriminant: Field,
    /// Name of the interface method reporting the discriminant.
    pub accessor: String,
    pub mappers: Vec<UnionMapper>,
}

/// Native output parameter folded into the Go return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnParamOverride {
    pub function: String,
    pub param: String,
}

/// Result of resolving a discriminant against a union's mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<'a> {
    Variant(&'a UnionMapper),
    Unknown,
}

/// Which side of an [`ArrayParamOverride`] a parameter sits on.
#[derive(Debug, Clone, Copy)]
pub enum ArrayRole<'a> {
    Pointer { owner: &'a StructOverride, rule: &'a ArrayParamOverride },
    Count { owner: &'a StructOverride, rule: &'a ArrayParamOverride },
}

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
    structs: IndexMap<String, StructOverride>,
    unions: IndexMap<String, UnionOverride>,
    return_params: IndexMap<(String, String), ReturnParamOverride>,
    value_handles: IndexSet<String>,
    // derived
    by_target: IndexMap<String, String>,
    union_payloads: IndexSet<String>,
}

impl OverrideRegistry {
    pub fn new(
        structs: Vec<StructOverride>,
        unions: Vec<UnionOverride>,
        return_params: Vec<ReturnParamOverride>,
        value_handles: Vec<String>,
    ) -> Self {
        let mut by_target = IndexMap::new();
        for s in &structs {
            // first native name to claim a target name owns its conversions
            by_target.entry(s.target_name.clone()).or_insert_with(|| s.native_name.clone());
        }
        let union_payloads = unions
            .iter()
            .flat_map(|u| u.mappers.iter())
            .filter_map(|m| m.payload.as_ref().map(|p| clean_type(&p.ty)))
            .collect();
        Self {
            structs: structs.into_iter().map(|s| (s.native_name.clone(), s)).collect(),
            unions: unions.into_iter().map(|u| (u.native_name.clone(), u)).collect(),
            return_params: return_params
                .into_iter()
                .map(|r| ((r.function.clone(), r.param.clone()), r))
                .collect(),
            value_handles: value_handles.into_iter().collect(),
            by_target,
            union_payloads,
        }
    }

    pub fn struct_overrides(&self) -> impl Iterator<Item = &StructOverride> { self.structs.values() }
    pub fn union_overrides(&self) -> impl Iterator<Item = &UnionOverride> { self.unions.values() }

    pub fn struct_override_for(&self, native_name: &str) -> Option<&StructOverride> {
        self.structs.get(native_name)
    }

    /// The override owning a Go type name (first registered wins when
    /// several native aliases share one target).
    pub fn struct_override_by_target(&self, target_name: &str) -> Option<&StructOverride> {
        self.by_target.get(target_name).and_then(|native| self.structs.get(native))
    }

    /// True for the override that emits the Go type and its conversions.
    pub fn is_canonical(&self, o: &StructOverride) -> bool {
        self.by_target.get(&o.target_name) == Some(&o.native_name)
    }

    pub fn union_override_for(&self, native_name: &str) -> Option<&UnionOverride> {
        self.unions.get(native_name)
    }

    /// Struct overrides that only exist as a union variant payload.
    pub fn is_union_payload(&self, native_name: &str) -> bool {
        self.union_payloads.contains(native_name)
    }

    pub fn return_param_override_for(&self, function: &str, param: &str) -> Option<&ReturnParamOverride> {
        self.return_params.get(&(function.to_string(), param.to_string()))
    }

    pub fn return_params_of<'a>(&'a self, function: &'a str) -> impl Iterator<Item = &'a ReturnParamOverride> + 'a {
        self.return_params.values().filter(move |r| r.function == function)
    }

    /// Checked as both the pointer side and the count side.
    pub fn array_param_override_for(&self, function: &str, param: &str) -> Option<ArrayRole<'_>> {
        for owner in self.structs.values() {
            for rule in owner.array_params.iter().filter(|r| r.function == function) {
                if rule.param == param {
                    return Some(ArrayRole::Pointer { owner, rule });
                }
                if rule.count == param {
                    return Some(ArrayRole::Count { owner, rule });
                }
            }
        }
        None
    }

    pub fn array_params_of<'a>(
        &'a self,
        function: &'a str,
    ) -> impl Iterator<Item = (&'a StructOverride, &'a ArrayParamOverride)> + 'a {
        self.structs
            .values()
            .flat_map(|o| o.array_params.iter().map(move |r| (o, r)))
            .filter(move |(_, r)| r.function == function)
    }

    /// Opaque handles held by value (`obj C.sfX`) instead of by pointer.
    pub fn is_value_handle(&self, native_name: &str) -> bool {
        self.value_handles.contains(native_name)
    }

    // ---- invariants ----

    /// Structural checks over the whole table. Meant for tests and for a
    /// sanity pass at startup; lowering never repairs a bad table.
    pub fn validate(&self) -> Result<(), Vec<RegistryError>> {
        let mut errors = Vec::new();

        for o in self.structs.values() {
            if o.fields.len() != o.cfields.len() {
                errors.push(RegistryError::FieldCountMismatch {
                    native: o.native_name.clone(),
                    fields: o.fields.len(),
                    cfields: o.cfields.len(),
                });
            }
            let mut seen = IndexSet::new();
            for rule in &o.array_params {
                if !seen.insert((&rule.function, &rule.param)) {
                    errors.push(RegistryError::DuplicateArrayParam {
                        native: o.native_name.clone(),
                        function: rule.function.clone(),
                        param: rule.param.clone(),
                    });
                }
            }
        }

        for u in self.unions.values() {
            let mut owner_of: IndexMap<&str, &str> = IndexMap::new();
            for m in &u.mappers {
                if m.discriminants.is_empty() {
                    errors.push(RegistryError::EmptyMapper { union: u.native_name.clone(), variant: m.variant.clone() });
                }
                for value in &m.discriminants {
                    if let Some(first) = owner_of.insert(value.as_str(), m.variant.as_str()) {
                        errors.push(RegistryError::DuplicateDiscriminant {
                            union: u.native_name.clone(),
                            value: value.clone(),
                            first: first.to_string(),
                            second: m.variant.clone(),
                        });
                    }
                }
                if let Some(payload) = &m.payload {
                    let native = clean_type(&payload.ty);
                    match self.structs.get(&native) {
                        Some(o) if o.fields.iter().any(|f| f.name == u.discriminant.name) => {
                            // dispatch builds the payload type, the accessor is declared on the variant
                            if o.target_name != m.variant {
                                errors.push(RegistryError::PayloadVariantMismatch {
                                    union: u.native_name.clone(),
                                    variant: m.variant.clone(),
                                    target: o.target_name.clone(),
                                });
                            }
                        }
                        _ => errors.push(RegistryError::MissingPayloadOverride {
                            union: u.native_name.clone(),
                            variant: m.variant.clone(),
                            payload: native,
                        }),
                    }
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Enumerators of the discriminant enum no mapper claims; these resolve
    /// to the unknown variant.
    pub fn uncovered_discriminants(&self, union: &UnionOverride, decls: &Declarations) -> Vec<String> {
        let Some(domain) = decls.type_decl(&clean_type(&union.cdiscriminant.ty)) else {
            return Vec::new();
        };
        domain
            .enumerators
            .iter()
            .filter(|e| matches!(union.dispatch(&e.name), Dispatch::Unknown))
            .map(|e| e.name.clone())
            .collect()
    }
}

impl StructOverride {
    pub fn new(native_name: &str, target_name: &str, fields: &[(&str, &str)], cfields: &[(&str, &str)]) -> Self {
        Self {
            native_name: native_name.to_string(),
            target_name: target_name.to_string(),
            base: None,
            shape: Shape::Value,
            fields: fields.iter().map(|(n, t)| Field::new(n, t)).collect(),
            cfields: cfields.iter().map(|(n, t)| Field::new(n, t)).collect(),
            array_params: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_array_param(mut self, function: &str, param: &str, count: &str) -> Self {
        self.array_params.push(ArrayParamOverride {
            function: function.to_string(),
            param: param.to_string(),
            count: count.to_string(),
        });
        self
    }

    /// `(target, native)` field pairs in declaration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Field, &Field)> {
        self.fields.iter().zip(self.cfields.iter())
    }
}

impl UnionMapper {
    pub fn unit(variant: &str, discriminants: &[&str]) -> Self {
        Self {
            variant: variant.to_string(),
            discriminants: discriminants.iter().map(|d| d.to_string()).collect(),
            payload: None,
        }
    }

    pub fn with_payload(variant: &str, member: &str, native_type: &str, discriminants: &[&str]) -> Self {
        Self { payload: Some(Field::new(member, native_type)), ..Self::unit(variant, discriminants) }
    }
}

impl UnionOverride {
    /// First mapper whose value set contains `discriminant`, else the
    /// unknown sentinel.
    pub fn dispatch(&self, discriminant: &str) -> Dispatch<'_> {
        self.mappers
            .iter()
            .find(|m| m.discriminants.iter().any(|d| d == discriminant))
            .map_or(Dispatch::Unknown, Dispatch::Variant)
    }

    /// Go name of the fallback variant.
    pub fn unknown_variant(&self) -> String {
        format!("Unknown{}", self.target_name)
    }
}

impl ReturnParamOverride {
    pub fn new(function: &str, param: &str) -> Self {
        Self { function: function.to_string(), param: param.to_string() }
    }
}
