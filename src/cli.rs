//! Minimal CLI: declarations → (types | functions | all | plan)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use cgo_bindgen::codegen::render_file;
use cgo_bindgen::config::{ArrayMarshal, GeneratorConfig};
use cgo_bindgen::lower::{Generator, Output};
use cgo_bindgen::naming::NameStyle;
use cgo_bindgen::overrides::sfml;
use cgo_bindgen::store::{Declarations, SkipRules};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Go (cgo) bindings from CSFML type and function declarations
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit the Go types file (enums, handles, overrides, unions)
    Types(SingleOut),
    /// emit the Go functions file
    Functions(SingleOut),
    /// emit both files into a directory
    All(AllOut),
    /// print the emission plans as JSON
    Plan(SingleOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON list of type declarations
    #[arg(long)]
    types: PathBuf,

    /// JSON list of function declarations
    #[arg(long)]
    functions: PathBuf,

    /// generator config (JSON); flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// rename methods Go-style (`getPosition` → `Position`, `create` → `New…`)
    #[arg(long, default_value_t = false)]
    idiomatic_names: bool,

    /// marshal counted sequences with one memcpy instead of per element
    #[arg(long, default_value_t = false)]
    raw_copy: bool,
}

#[derive(clap::Parser, Debug)]
struct SingleOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct AllOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn config(&self) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::load(self.config.as_deref())?;
        if self.idiomatic_names {
            config.name_style = NameStyle::Idiomatic;
        }
        if self.raw_copy {
            config.array_marshal = ArrayMarshal::RawCopy;
        }
        Ok(config)
    }

    fn declarations(&self) -> Result<Declarations> {
        let rules = SkipRules::sfml()?;
        let decls = Declarations::from_paths(&self.types, &self.functions, &rules)
            .context("failed to load declarations")?;
        Ok(decls)
    }
}

/// What a run produced and whether every declaration made it.
pub struct Report {
    pub failed: usize,
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<Report> {
        let (settings, no_op) = match &self.cmd {
            Command::Types(t) | Command::Functions(t) | Command::Plan(t) => (&t.input_settings, t.no_op),
            Command::All(t) => (&t.input_settings, t.no_op),
        };
        // debug path
        if no_op {
            eprintln!("{self:#?}");
            return Ok(Report { failed: 0 });
        }

        // 1) load
        let config = settings.config()?;
        let decls = settings.declarations()?;
        let registry = sfml::registry();
        if let Err(errors) = registry.validate() {
            for error in &errors {
                eprintln!("{} {error}", "registry:".red().bold());
            }
            anyhow::bail!("override registry is inconsistent ({} problems)", errors.len());
        }

        // 2) lower
        let output = Generator::new(&decls, &registry, &config).run();

        // 3) write
        match &self.cmd {
            Command::Types(t) => write_or_print(t.out.as_deref(), &render_file(&config, &output.types))?,
            Command::Functions(t) => write_or_print(t.out.as_deref(), &render_file(&config, &output.functions))?,
            Command::Plan(t) => {
                let plan = serde_json::json!({ "types": output.types, "functions": output.functions });
                write_or_print(t.out.as_deref(), &serde_json::to_string_pretty(&plan)?)?;
            }
            Command::All(t) => {
                write_or_print(Some(&t.out_dir.join(&config.types_file_name)), &render_file(&config, &output.types))?;
                write_or_print(
                    Some(&t.out_dir.join(&config.functions_file_name)),
                    &render_file(&config, &output.functions),
                )?;
            }
        }

        summarize(&output);
        Ok(Report { failed: output.errors.len() })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_or_print(out: Option<&Path>, src: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{src}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("{} {}", "wrote".green(), out.display());
    Ok(())
}

fn summarize(output: &Output) {
    for error in &output.errors {
        eprintln!("{} {error}", "skipped:".yellow().bold());
    }
    let status = if output.is_clean() { "✅".to_string() } else { format!("❌ {} failed", output.errors.len()) };
    eprintln!(
        "{status} {} type items, {} functions",
        output.types.len().to_string().bold(),
        output.functions.len().to_string().bold(),
    );
}
