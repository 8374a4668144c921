//! Lowering: native declarations → Go emission plans.
//!
//! Each declaration is lowered independently. Both engines run over rayon
//! and collect in input order, so output is identical across runs.
pub mod convert;
pub mod function;
pub mod types;

use rayon::prelude::*;

use crate::config::GeneratorConfig;
use crate::error::LoweringError;
use crate::mapping::TypeMapper;
use crate::overrides::OverrideRegistry;
use crate::plan::{FunctionPlan, Item};
use crate::store::Declarations;

/// Read-only state shared by every lowering call.
#[derive(Debug, Clone, Copy)]
pub struct LowerCtx<'a> {
    pub mapper: TypeMapper<'a>,
    pub config: &'a GeneratorConfig,
}

impl<'a> LowerCtx<'a> {
    pub fn new(decls: &'a Declarations, registry: &'a OverrideRegistry, config: &'a GeneratorConfig) -> Self {
        Self { mapper: TypeMapper::new(decls, registry, &config.prefix), config }
    }

    pub fn decls(&self) -> &'a Declarations { self.mapper.decls() }
    pub fn registry(&self) -> &'a OverrideRegistry { self.mapper.registry() }
    pub fn prefix(&self) -> &'a str { self.mapper.prefix() }
}

#[derive(Debug, Default)]
pub struct Output {
    pub types: Vec<Item>,
    pub functions: Vec<Item>,
    /// Declarations that failed to lower; everything else is in the output.
    pub errors: Vec<LoweringError>,
}

impl Output {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Generator<'a> {
    ctx: LowerCtx<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(decls: &'a Declarations, registry: &'a OverrideRegistry, config: &'a GeneratorConfig) -> Self {
        Self { ctx: LowerCtx::new(decls, registry, config) }
    }

    pub fn ctx(&self) -> &LowerCtx<'a> {
        &self.ctx
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn lower_types(&self) -> Vec<Item> {
        let ctx = &self.ctx;
        let registry = ctx.registry();

        let mut items = types::support_items();

        let per_decl: Vec<Vec<Item>> = ctx.decls().types().par_iter().map(|decl| types::lower_decl(ctx, decl)).collect();
        items.extend(per_decl.into_iter().flatten());

        let overrides: Vec<_> = registry.struct_overrides().collect();
        let per_override: Vec<Vec<Item>> = overrides.par_iter().map(|o| types::lower_struct_override(ctx, o)).collect();
        items.extend(per_override.into_iter().flatten());

        for union in registry.union_overrides() {
            let uncovered = registry.uncovered_discriminants(union, ctx.decls());
            if !uncovered.is_empty() {
                tracing::debug!(union = %union.native_name, ?uncovered, "discriminants resolve to the unknown variant");
            }
            items.extend(types::lower_union(ctx, union));
        }
        items
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn lower_functions(&self) -> (Vec<FunctionPlan>, Vec<LoweringError>) {
        let ctx = &self.ctx;
        let results: Vec<_> = ctx.decls().functions().par_iter().map(|f| function::lower_function(ctx, f)).collect();

        let mut plans = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(Some(plan)) => plans.push(plan),
                Ok(None) => {}
                Err(error) => {
                    tracing::error!(function = %error.function(), %error, "declaration not lowered");
                    errors.push(error);
                }
            }
        }
        (plans, errors)
    }

    pub fn run(&self) -> Output {
        let types = self.lower_types();
        let (functions, errors) = self.lower_functions();
        tracing::info!(types = types.len(), functions = functions.len(), errors = errors.len(), "lowering finished");
        Output { types, functions: functions.into_iter().map(Item::Function).collect(), errors }
    }
}
