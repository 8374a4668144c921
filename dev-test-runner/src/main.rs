//! Smoke runner: lower a declaration pack end to end and check that every
//! native symbol the generated Go calls is a declared function.
//!
//! Usage: `dev-test-runner [TYPES.json FUNCTIONS.json]`. Without arguments
//! the built-in fixture is used.
use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use cgo_bindgen::codegen::render_file;
use cgo_bindgen::config::{ArrayMarshal, GeneratorConfig};
use cgo_bindgen::lower::Generator;
use cgo_bindgen::overrides::sfml;
use cgo_bindgen::store::{Declarations, SkipRules};
use cgo_bindgen::test_support::fixture_declarations;

static NATIVE_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"C\.(sf\w+_\w+)\(").unwrap());

fn load() -> Result<Declarations> {
    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    match args.as_slice() {
        [] => Ok(fixture_declarations()?),
        [types, functions] => Ok(Declarations::from_paths(types, functions, &SkipRules::sfml()?)?),
        _ => bail!("expected no arguments or TYPES.json FUNCTIONS.json"),
    }
}

fn main() -> Result<()> {
    cgo_bindgen::init_tracing();
    let decls = load().context("loading declarations")?;
    let registry = sfml::registry();
    if let Err(errors) = registry.validate() {
        bail!("registry invalid: {errors:?}");
    }

    let raw_copy = GeneratorConfig { array_marshal: ArrayMarshal::RawCopy, ..GeneratorConfig::default() };
    for config in [GeneratorConfig::default(), raw_copy] {
        let output = Generator::new(&decls, &registry, &config).run();
        let functions_src = render_file(&config, &output.functions);
        let types_src = render_file(&config, &output.types);

        let declared: BTreeSet<&str> = decls.functions().iter().map(|f| f.name.as_str()).collect();
        let called: BTreeSet<&str> = NATIVE_CALL
            .captures_iter(&functions_src)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        let undeclared: Vec<_> = called.difference(&declared).collect();

        let summary = serde_json::json!({
            "array_marshal": config.array_marshal,
            "types_bytes": types_src.len(),
            "functions_bytes": functions_src.len(),
            "native_calls": called.len(),
            "lowering_errors": output.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        eprintln!("{summary}");
        if !undeclared.is_empty() {
            bail!("generated code calls undeclared symbols: {undeclared:?}");
        }
    }
    eprintln!("✅ smoke run passed");
    Ok(())
}
