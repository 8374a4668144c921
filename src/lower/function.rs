//! Function Lowering Engine.
//!
//! One forward pass per declaration: parse the name, classify the receiver,
//! pick an emission strategy for every parameter, emit the call, then build
//! the return values. Statements are appended in that order and never
//! revisited.
use crate::error::LoweringError;
use crate::ir::{clean_type, Field, FunctionDecl, NativeType};
use crate::mapping::{cast_kind, cgo_base, cgo_type, TargetKind, TargetType};
use crate::naming;
use crate::overrides::ArrayRole;
use crate::plan::{Argument, FunctionPlan, ParamStrategy, Receiver};

use super::convert::{from_native, to_native};
use super::LowerCtx;

/// Local holding the native return value.
const RESULT_LOCAL: &str = "cval";

/// `Ok(None)` when the name has no namespace separator: such functions are
/// outside the `Namespace_method` convention and produce nothing.
#[tracing::instrument(level = "debug", skip_all, fields(function = %decl.name))]
pub fn lower_function(ctx: &LowerCtx<'_>, decl: &FunctionDecl) -> Result<Option<FunctionPlan>, LoweringError> {
    let stripped = naming::strip_prefix(&decl.name, ctx.prefix());
    let Some((namespace, method)) = stripped.split_once('_') else {
        tracing::trace!("no namespace separator, skipped");
        return Ok(None);
    };
    check_overrides(ctx, decl)?;

    let receiver_native = format!("{}{namespace}", ctx.prefix());
    let is_method = decl
        .parameters
        .first()
        .is_some_and(|first| clean_type(&first.ty) == receiver_native && ctx.decls().is_known(&receiver_native));

    let style = ctx.config.name_style;
    let receiver_var = is_method.then(|| naming::receiver_var(&naming::target_type_name(&receiver_native, ctx.prefix())));
    let names = go_param_names(decl, receiver_var.as_deref());

    let mut plan = FunctionPlan {
        native_name: Some(decl.name.clone()),
        name: if is_method { naming::method_name(method, style) } else { naming::method_name(stripped, style) },
        receiver: None,
        params: Vec::new(),
        returns: Vec::new(),
        body: Vec::new(),
        arguments: Vec::new(),
        promoted: Vec::new(),
    };
    let mut promoted: Vec<(TargetType, String)> = Vec::new();

    for (index, param) in decl.parameters.iter().enumerate() {
        let name = &names[index];

        if index == 0 {
            if let Some(var) = &receiver_var {
                let ty = ctx.mapper.map(&param.ty);
                let go_type = if ty.kind == TargetKind::Handle { format!("*{}", ty.name) } else { ty.go_type() };
                let (expr, _) = convert_arg(ctx, &ty, var, &mut plan.body);
                plan.receiver = Some(Receiver { var: var.clone(), ty: go_type });
                plan.arguments.push(Argument { param: name.clone(), expr, strategy: ParamStrategy::Receiver });
                continue;
            }
        }

        // a. counted sequence
        if let Some(role) = ctx.registry().array_param_override_for(&decl.name, &param.name) {
            let argument = match role {
                ArrayRole::Pointer { owner, rule } => {
                    let local = naming::native_local(name);
                    plan.params.push(Field::new(name, &format!("[]{}", owner.target_name)));
                    plan.body.push(format!("{local} := New{}CArrayFromGoSlice({name})", owner.target_name));
                    plan.body.push(format!("defer C.free(unsafe.Pointer({local}))"));
                    Argument { param: name.clone(), expr: local, strategy: ParamStrategy::Sequence { count: rule.count.clone() } }
                }
                ArrayRole::Count { rule, .. } => {
                    let sequence = param_index(decl, &rule.param).map_or(rule.param.as_str(), |i| names[i].as_str());
                    let count_base = NativeType::parse(&param.ty).base;
                    Argument {
                        param: name.clone(),
                        expr: format!("{}(len({sequence}))", cgo_base(&count_base)),
                        strategy: ParamStrategy::SequenceLength { sequence: sequence.to_string() },
                    }
                }
            };
            plan.arguments.push(argument);
            continue;
        }

        // b. promoted output
        if ctx.registry().return_param_override_for(&decl.name, &param.name).is_some() {
            let pointee = ctx.mapper.map_pointee(&param.ty);
            let local = naming::native_local(name);
            plan.body.push(format!("var {local} {}", cgo_type(&pointee.native)));
            plan.arguments.push(Argument { param: name.clone(), expr: format!("&{local}"), strategy: ParamStrategy::Promoted });
            plan.promoted.push(name.clone());
            promoted.push((pointee, local));
            continue;
        }

        // c..f
        let ty = ctx.mapper.map(&param.ty);
        let (expr, strategy) = convert_arg(ctx, &ty, name, &mut plan.body);
        plan.params.push(Field::new(name, &ty.go_type()));
        plan.arguments.push(Argument { param: name.clone(), expr, strategy });
    }

    let args = plan.arguments.iter().map(|a| a.expr.as_str()).collect::<Vec<_>>().join(", ");
    let call = format!("C.{}({args})", decl.name);
    let primary = ctx.mapper.map(&decl.return_type);

    let mut values = Vec::new();
    for (ty, local) in &promoted {
        plan.returns.push(ty.go_type());
        values.push(from_native(ctx, ty, local));
    }
    if primary.is_void() {
        plan.body.push(call);
    } else {
        plan.body.push(format!("{RESULT_LOCAL} := {call}"));
        plan.returns.push(primary.go_type());
        values.push(from_native(ctx, &primary, RESULT_LOCAL));
    }
    if !values.is_empty() {
        plan.body.push(format!("return {}", values.join(", ")));
    }

    tracing::trace!(signature = %plan.signature(), "lowered");
    Ok(Some(plan))
}

/// Pairings that name parameters must match the declaration, or the whole
/// declaration is rejected before anything is emitted.
fn check_overrides(ctx: &LowerCtx<'_>, decl: &FunctionDecl) -> Result<(), LoweringError> {
    let registry = ctx.registry();
    for rule in registry.return_params_of(&decl.name) {
        if decl.param(&rule.param).is_none() {
            return Err(LoweringError::MissingReturnParam { function: decl.name.clone(), param: rule.param.clone() });
        }
    }
    for (owner, rule) in registry.array_params_of(&decl.name) {
        let Some(pointer) = decl.param(&rule.param) else {
            return Err(LoweringError::MissingArrayParam { function: decl.name.clone(), param: rule.param.clone() });
        };
        if decl.param(&rule.count).is_none() {
            return Err(LoweringError::MissingCountParam {
                function: decl.name.clone(),
                param: rule.param.clone(),
                count: rule.count.clone(),
            });
        }
        let native = NativeType::parse(&pointer.ty);
        if native.base != owner.native_name || !native.is_pointer() {
            return Err(LoweringError::ArrayParamTypeMismatch {
                function: decl.name.clone(),
                param: rule.param.clone(),
                expected: owner.native_name.clone(),
                found: pointer.ty.clone(),
            });
        }
    }
    Ok(())
}

/// Strategies c to f: overrides, unions, handles, strings, then primitives.
fn convert_arg(ctx: &LowerCtx<'_>, ty: &TargetType, name: &str, body: &mut Vec<String>) -> (String, ParamStrategy) {
    let expr = to_native(ctx, ty, name);
    match ty.kind {
        TargetKind::Override | TargetKind::Union => {
            let by_ref = ty.native.is_pointer();
            let local = naming::native_local(name);
            body.push(format!("{local} := {expr}"));
            let expr = if by_ref { format!("&{local}") } else { local };
            let strategy = if ty.kind == TargetKind::Override {
                ParamStrategy::Override { by_ref }
            } else {
                ParamStrategy::Union { by_ref }
            };
            (expr, strategy)
        }
        TargetKind::Handle => (expr, ParamStrategy::Handle),
        TargetKind::String => (expr, ParamStrategy::String),
        TargetKind::Enum => (expr, ParamStrategy::Enum),
        TargetKind::Address | TargetKind::Void => (expr, ParamStrategy::Address),
        TargetKind::Primitive(p) => (expr, ParamStrategy::Primitive { cast: cast_kind(&ty.native.base, p) }),
    }
}

/// Sanitized Go names, one per native parameter. Names that would shadow
/// the receiver or the result local get a trailing `_`.
fn go_param_names(decl: &FunctionDecl, receiver_var: Option<&str>) -> Vec<String> {
    decl.parameters
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let name = naming::param_name(&p.name, index);
            if index == 0 && receiver_var.is_some() {
                return name;
            }
            if Some(name.as_str()) == receiver_var || name == RESULT_LOCAL {
                format!("{name}_")
            } else {
                name
            }
        })
        .collect()
}

fn param_index(decl: &FunctionDecl, name: &str) -> Option<usize> {
    decl.parameters.iter().position(|p| p.name == name)
}
