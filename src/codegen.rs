//! Go writer. Turns plan items into gofmt-shaped source text.
use std::fmt::Write as _;

use crate::config::GeneratorConfig;
use crate::plan::{EnumDecl, FunctionPlan, InterfaceDecl, Item, StructDecl};

#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generated-code marker, package clause, cgo preamble and imports.
    pub fn header(&mut self, package: &str, preamble: &[String], needs_unsafe: bool) {
        let _ = writeln!(self.out, "// Code generated by cgo-bindgen. DO NOT EDIT.\n");
        let _ = writeln!(self.out, "package {package}\n");
        if !preamble.is_empty() {
            self.out.push_str("/*\n");
            for line in preamble {
                let _ = writeln!(self.out, "{line}");
            }
            self.out.push_str("*/\n");
        }
        self.out.push_str("import \"C\"\n\n");
        if needs_unsafe {
            self.out.push_str("import \"unsafe\"\n\n");
        }
    }

    pub fn emit(&mut self, item: &Item) {
        match item {
            Item::Struct(s) => self.emit_struct(s),
            Item::Enum(e) => self.emit_enum(e),
            Item::Interface(i) => self.emit_interface(i),
            Item::Function(f) => self.emit_function(f),
        }
        self.out.push('\n');
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_struct(&mut self, s: &StructDecl) {
        let _ = writeln!(self.out, "type {} struct {{", s.name);
        for embed in &s.embeds {
            let _ = writeln!(self.out, "\t{embed}");
        }
        // gofmt aligns field types in one column
        let width = s.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
        for field in &s.fields {
            let _ = writeln!(self.out, "\t{:width$} {}", field.name, field.ty);
        }
        self.out.push_str("}\n");
    }

    fn emit_enum(&mut self, e: &EnumDecl) {
        let _ = writeln!(self.out, "type {} {}\n", e.name, e.underlying);
        if e.variants.is_empty() {
            return;
        }
        self.out.push_str("const (\n");
        let width = e.variants.iter().map(|v| v.name.len()).max().unwrap_or(0);
        for v in &e.variants {
            let _ = writeln!(self.out, "\t{:width$} {} = {}", v.name, e.name, v.value);
        }
        self.out.push_str(")\n");
    }

    fn emit_interface(&mut self, i: &InterfaceDecl) {
        let _ = writeln!(self.out, "type {} interface {{", i.name);
        for m in &i.methods {
            let _ = writeln!(self.out, "\t{m}");
        }
        self.out.push_str("}\n");
    }

    fn emit_function(&mut self, f: &FunctionPlan) {
        if let Some(native) = &f.native_name {
            let _ = writeln!(self.out, "// {} wraps {native}.", f.name);
        }
        let _ = writeln!(self.out, "{} {{", f.signature());
        for statement in &f.body {
            for line in statement.lines() {
                let _ = writeln!(self.out, "\t{line}");
            }
        }
        self.out.push_str("}\n");
    }
}

fn uses_unsafe(items: &[Item]) -> bool {
    items.iter().any(|item| match item {
        Item::Function(f) => f.body.iter().any(|s| s.contains("unsafe.")) || f.params.iter().any(|p| p.ty.contains("unsafe.")),
        Item::Struct(s) => s.fields.iter().any(|f| f.ty.contains("unsafe.")),
        _ => false,
    })
}

/// A complete Go source file for `items`.
pub fn render_file(config: &GeneratorConfig, items: &[Item]) -> String {
    let mut cg = Codegen::new();
    cg.header(&config.package, &config.cgo_preamble, uses_unsafe(items));
    for item in items {
        cg.emit(item);
    }
    cg.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn function_bodies_are_indented_line_by_line() {
        let f = FunctionPlan::helper(
            "boolToSfBool",
            None,
            vec![Field::new("b", "bool")],
            &["C.sfBool"],
            vec!["if b {\n\treturn C.sfTrue\n}".to_string(), "return C.sfFalse".to_string()],
        );
        let mut cg = Codegen::new();
        cg.emit(&Item::Function(f));
        assert_eq!(
            cg.into_string(),
            "func boolToSfBool(b bool) C.sfBool {\n\tif b {\n\t\treturn C.sfTrue\n\t}\n\treturn C.sfFalse\n}\n\n"
        );
    }

    #[test]
    fn unsafe_import_only_when_used() {
        let config = GeneratorConfig { cgo_preamble: Vec::new(), ..GeneratorConfig::default() };
        let plain = render_file(&config, &[]);
        assert!(!plain.contains("import \"unsafe\""));
        assert!(plain.starts_with("// Code generated by cgo-bindgen. DO NOT EDIT.\n\npackage sfml\n"));

        let f = FunctionPlan::helper("f", None, Vec::new(), &[], vec!["_ = unsafe.Pointer(nil)".to_string()]);
        assert!(render_file(&config, &[Item::Function(f)]).contains("import \"unsafe\""));
    }
}
