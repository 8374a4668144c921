//! Every field an override carries must survive the trip through its native
//! counterpart: the Go range has to fit the native range, and both
//! conversion directions must pair the same fields in the same order.
use cgo_bindgen::config::GeneratorConfig;
use cgo_bindgen::ir::NativeType;
use cgo_bindgen::lower::convert::{override_from_native, override_to_native};
use cgo_bindgen::lower::LowerCtx;
use cgo_bindgen::mapping::{cast_kind, cgo_base, CastKind, Primitive};
use cgo_bindgen::naming::cgo_field;
use cgo_bindgen::overrides::{sfml, StructOverride};
use cgo_bindgen::test_support::fixture_declarations;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Integer range of a primitive; `None` for floats and bool.
fn range(p: Primitive) -> Option<(i128, i128)> {
    let r = match p {
        Primitive::I8 => (i8::MIN as i128, i8::MAX as i128),
        Primitive::I16 => (i16::MIN as i128, i16::MAX as i128),
        Primitive::I32 => (i32::MIN as i128, i32::MAX as i128),
        Primitive::I64 => (i64::MIN as i128, i64::MAX as i128),
        Primitive::U8 | Primitive::Byte => (0, u8::MAX as i128),
        Primitive::U16 => (0, u16::MAX as i128),
        Primitive::U32 => (0, u32::MAX as i128),
        Primitive::U64 | Primitive::Uintptr => (0, u64::MAX as i128),
        Primitive::F32 | Primitive::F64 | Primitive::Bool => return None,
    };
    Some(r)
}

/// `(override, go field, go primitive, native base)` for every primitive pair.
fn primitive_pairs() -> Vec<(String, String, Primitive, String)> {
    let decls = fixture_declarations().unwrap();
    let registry = sfml::registry();
    let config = GeneratorConfig::default();
    let ctx = LowerCtx::new(&decls, &registry, &config);
    registry
        .struct_overrides()
        .flat_map(|o| o.pairs().map(move |(f, c)| (o, f, c)))
        .filter_map(|(o, field, cfield)| {
            let ty = ctx.mapper.map_field(&field.ty, &cfield.ty);
            let p = ty.primitive()?;
            Some((o.native_name.clone(), field.name.clone(), p, NativeType::parse(&cfield.ty).base))
        })
        .collect()
}

#[test]
fn fixture_has_primitive_pairs_of_every_flavor() {
    let flavors: Vec<Primitive> = primitive_pairs().into_iter().map(|(_, _, p, _)| p).collect();
    for p in [Primitive::I32, Primitive::U32, Primitive::U8, Primitive::I64, Primitive::F32, Primitive::Bool] {
        assert!(flavors.contains(&p), "no override field maps to {p:?}");
    }
}

#[test]
fn widths_match() {
    for (owner, field, p, native) in primitive_pairs() {
        assert_eq!(cast_kind(&native, p), CastKind::Nominal, "{owner}.{field}: {native} -> {}", p.go_name());
    }
}

#[test]
fn floats_stay_floats() {
    for (owner, field, p, native) in primitive_pairs() {
        if matches!(p, Primitive::F32 | Primitive::F64) {
            assert_eq!(Primitive::from_native(&native), Some(p), "{owner}.{field}");
        }
    }
}

proptest! {
    #[test]
    fn boundary_values_fit_the_native_range(
        pair in prop::sample::select(primitive_pairs()),
        pick in 0usize..3,
    ) {
        let (owner, field, p, native) = pair;
        let (Some((lo, hi)), Some(native_p)) = (range(p), Primitive::from_native(&native)) else {
            return Ok(());
        };
        let native_range = range(native_p);
        prop_assert!(native_range.is_some(), "{owner}.{field}: integer {p:?} stored in non-integer {native}");
        let (native_lo, native_hi) = native_range.unwrap();
        let value = [lo, 0, hi][pick];
        prop_assert!(native_lo <= value && value <= native_hi, "{owner}.{field}: {value} does not fit {native}");
    }
}

// ---- member pairing of the two conversion literals ----

/// `C.sfX{a: 1, b: T{c: 2}}` → `("C.sfX", [("a", "1"), ("b", "T{c: 2}")])`.
/// A leading `&` is dropped.
fn literal_members(literal: &str) -> (String, Vec<(String, String)>) {
    let literal = literal.strip_prefix('&').unwrap_or(literal);
    let open = literal.find('{').unwrap();
    assert!(literal.ends_with('}'), "{literal}");
    let inner = &literal[open + 1..literal.len() - 1];

    let mut members = Vec::new();
    let (mut depth, mut start) = (0i32, 0);
    let bytes = inner.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'{' | b'(' => depth += 1,
            b'}' | b')' => depth -= 1,
            b',' if depth == 0 => {
                members.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    members.push(&inner[start..]);
    let members = members
        .into_iter()
        .filter(|m| !m.trim().is_empty())
        .map(|m| {
            let (key, value) = m.trim().split_once(": ").unwrap();
            (key.to_string(), value.to_string())
        })
        .collect();
    (literal[..open].to_string(), members)
}

/// `value` reads exactly `path`, not a longer identifier sharing its prefix.
fn reads(value: &str, path: &str) -> bool {
    value.match_indices(path).any(|(at, _)| {
        let next = value[at + path.len()..].chars().next();
        !matches!(next, Some(c) if c.is_alphanumeric() || c == '_')
    })
}

fn check_pairing(ctx: &LowerCtx<'_>, o: &StructOverride, to_c: &str, from_c: &str, go_path: &str, c_path: &str) {
    let (to_type, to_members) = literal_members(to_c);
    let (from_type, from_members) = literal_members(from_c);
    assert_eq!(to_type, cgo_base(&o.native_name));
    assert_eq!(from_type, o.target_name);
    assert_eq!(to_members.len(), o.fields.len(), "{to_c}");
    assert_eq!(from_members.len(), o.fields.len(), "{from_c}");

    for (i, (field, cfield)) in o.pairs().enumerate() {
        let cname = cgo_field(&cfield.name);
        let (to_key, to_value) = &to_members[i];
        let (from_key, from_value) = &from_members[i];
        assert_eq!((to_key.as_str(), from_key.as_str()), (cname.as_str(), field.name.as_str()), "{}", o.native_name);

        let go_read = format!("{go_path}.{}", field.name);
        let c_read = format!("{c_path}.{cname}");
        assert!(reads(to_value, &go_read), "{}: `{to_value}` should read {go_read}", o.native_name);
        assert!(reads(from_value, &c_read), "{}: `{from_value}` should read {c_read}", o.native_name);

        let nested = ctx.registry().struct_override_for(&NativeType::parse(&cfield.ty).base);
        if let Some(inner) = nested.filter(|_| to_value.contains('{') && from_value.contains('{')) {
            check_pairing(ctx, inner, to_value, from_value, &go_read, &c_read);
        }
    }
}

fn override_names() -> Vec<String> {
    sfml::registry().struct_overrides().map(|o| o.native_name.clone()).collect()
}

#[test]
fn nested_overrides_expand_inline() {
    let decls = fixture_declarations().unwrap();
    let registry = sfml::registry();
    let config = GeneratorConfig::default();
    let ctx = LowerCtx::new(&decls, &registry, &config);
    let vertex = registry.struct_override_for("sfVertex").unwrap();
    let to_c = override_to_native(&ctx, vertex, "v");
    assert!(to_c.starts_with("C.sfVertex{position: C.sfVector2f{x: C.float(v.Position.X), y: C.float(v.Position.Y)}"));
    let from_c = override_from_native(&ctx, vertex, "cObj", None);
    assert!(from_c.ends_with("TexCoords: Vector2f{X: float32(cObj.texCoords.x), Y: float32(cObj.texCoords.y)}}"));
}

proptest! {
    #[test]
    fn both_directions_pair_the_same_fields(native in prop::sample::select(override_names())) {
        let decls = fixture_declarations().unwrap();
        let registry = sfml::registry();
        let config = GeneratorConfig::default();
        let ctx = LowerCtx::new(&decls, &registry, &config);
        let o = registry.struct_override_for(&native).unwrap();

        let to_c = override_to_native(&ctx, o, "v");
        let from_c = override_from_native(&ctx, o, "cObj", None);
        check_pairing(&ctx, o, &to_c, &from_c, "v", "cObj");
    }
}
