//! Declaration store: the filtered, de-duplicated native declarations for
//! one generation pass.
//!
//! Skip rules are applied exactly once, here. Nothing downstream knows a
//! declaration was ever present.
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::error::LoadError;
use crate::ir::{FunctionDecl, TypeDecl};

// ————————————————————————————————————————————————————————————————————————————
// SKIP RULES
// ————————————————————————————————————————————————————————————————————————————

/// Exact-name set plus unanchored regex patterns (a pattern matches if it
/// matches anywhere in the name).
#[derive(Debug, Clone, Default)]
pub struct SkipRules {
    names: IndexSet<String>,
    patterns: Vec<Regex>,
}

impl SkipRules {
    pub fn none() -> Self { Self::default() }

    pub fn new<N, P>(names: N, patterns: P) -> Result<Self, LoadError>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| LoadError::SkipPattern { pattern: p.to_string(), source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { names: names.into_iter().map(Into::into).collect(), patterns })
    }

    /// The curated CSFML skip list: primitive typedefs the mapping table
    /// already covers, plus modules the bindings do not wrap.
    pub fn sfml() -> Result<Self, LoadError> {
        Self::new(
            [
                // types
                "sfWindowHandle", "sfBool", "sfChar32",
                "sfUint8", "sfUint16", "sfUint32", "sfUint64",
                "sfInt8", "sfInt16", "sfInt32", "sfInt64",
                // functions
                "sfShape_create", "sfContext_getFunction",
                "sfVideoMode_getFullscreenModes", "sfVertexArray_getVertex",
            ],
            ["sfJoystick*", "sfVulkan*", "sfThread*", ".*_createVulkanSurface"],
        )
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.names.contains(name) || self.patterns.iter().any(|rx| rx.is_match(name))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default)]
pub struct Declarations {
    types: Vec<TypeDecl>,
    functions: Vec<FunctionDecl>,
    type_index: IndexMap<String, usize>,
}

impl Declarations {
    /// Parse both JSON lists and filter them. Any malformed entry fails the
    /// whole load.
    pub fn load(types_src: &str, functions_src: &str, rules: &SkipRules) -> Result<Self, LoadError> {
        let types = crate::path_de::from_str_with_path::<Vec<TypeDecl>>(types_src, "types list")?;
        let functions = crate::path_de::from_str_with_path::<Vec<FunctionDecl>>(functions_src, "functions list")?;
        Self::from_decls(types, functions, rules)
    }

    pub fn from_paths(types_path: &Path, functions_path: &Path, rules: &SkipRules) -> Result<Self, LoadError> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
        };
        let types = crate::path_de::from_slice_with_path::<Vec<TypeDecl>>(&read(types_path)?, "types list")?;
        let functions =
            crate::path_de::from_slice_with_path::<Vec<FunctionDecl>>(&read(functions_path)?, "functions list")?;
        Self::from_decls(types, functions, rules)
    }

    /// Stable filter: skipped names and later duplicates are dropped;
    /// everything else keeps its input position.
    pub fn from_decls(
        types: Vec<TypeDecl>,
        functions: Vec<FunctionDecl>,
        rules: &SkipRules,
    ) -> Result<Self, LoadError> {
        let mut out = Self::default();

        for (index, decl) in types.into_iter().enumerate() {
            if decl.name.is_empty() {
                return Err(LoadError::EmptyName { what: "type", index });
            }
            if rules.is_skipped(&decl.name) || out.type_index.contains_key(&decl.name) {
                tracing::trace!(name = %decl.name, "skipping type");
                continue;
            }
            out.type_index.insert(decl.name.clone(), out.types.len());
            out.types.push(decl);
        }

        let mut seen = IndexSet::<String>::new();
        for (index, decl) in functions.into_iter().enumerate() {
            if decl.name.is_empty() {
                return Err(LoadError::EmptyName { what: "function", index });
            }
            if rules.is_skipped(&decl.name) || !seen.insert(decl.name.clone()) {
                tracing::trace!(name = %decl.name, "skipping function");
                continue;
            }
            out.functions.push(decl);
        }

        tracing::debug!(types = out.types.len(), functions = out.functions.len(), "declarations loaded");
        Ok(out)
    }

    pub fn types(&self) -> &[TypeDecl] { &self.types }
    pub fn functions(&self) -> &[FunctionDecl] { &self.functions }

    pub fn type_decl(&self, native_name: &str) -> Option<&TypeDecl> {
        self.type_index.get(native_name).map(|&i| &self.types[i])
    }

    pub fn is_known(&self, native_name: &str) -> bool {
        self.type_index.contains_key(native_name)
    }

    pub fn is_enum(&self, native_name: &str) -> bool {
        self.type_decl(native_name).is_some_and(TypeDecl::is_enum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeDecl;

    #[test]
    fn regex_rules_match_anywhere_in_the_name() {
        let rules = SkipRules::sfml().unwrap();
        assert!(rules.is_skipped("sfJoystick_isConnected"));
        assert!(rules.is_skipped("sfWindow_createVulkanSurface"));
        assert!(rules.is_skipped("sfBool"));
        assert!(!rules.is_skipped("sfRenderWindow_create"));
    }

    #[test]
    fn bad_pattern_is_a_load_error() {
        let err = SkipRules::new(Vec::<String>::new(), ["sf(("]).unwrap_err();
        assert!(matches!(err, LoadError::SkipPattern { .. }));
    }

    #[test]
    fn filter_is_stable_and_keeps_first_duplicate() {
        let types = vec![
            TypeDecl::new_struct("sfSprite"),
            TypeDecl::new_struct("sfBool"),
            TypeDecl::new_enum("sfSprite", &["sfA"]),
            TypeDecl::new_struct("sfTexture"),
        ];
        let decls = Declarations::from_decls(types, Vec::new(), &SkipRules::sfml().unwrap()).unwrap();
        let names: Vec<_> = decls.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["sfSprite", "sfTexture"]);
        assert!(!decls.is_enum("sfSprite"));
    }
}
