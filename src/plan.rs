//! Emission instructions handed to the writer. Every body entry is a complete
//! Go statement (multi-line statements carry their own inner indentation).
use serde::Serialize;

use crate::ir::Field;
use crate::mapping::CastKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receiver {
    pub var: String,
    /// Go spelling, e.g. `*RenderWindow`.
    pub ty: String,
}

/// How one native argument is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum ParamStrategy {
    Receiver,
    /// Pointer side of a counted sequence.
    Sequence { count: String },
    /// Count side of a counted sequence, derived from the slice length.
    SequenceLength { sequence: String },
    /// Output parameter folded into the return values.
    Promoted,
    Override { by_ref: bool },
    Union { by_ref: bool },
    Handle,
    String,
    Enum,
    Address,
    Primitive { cast: CastKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Native parameter name (synthesized when the native one is empty).
    pub param: String,
    pub expr: String,
    #[serde(flatten)]
    pub strategy: ParamStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionPlan {
    /// Native symbol this function wraps; `None` for generated helpers.
    pub native_name: Option<String>,
    pub name: String,
    pub receiver: Option<Receiver>,
    pub params: Vec<Field>,
    /// Go return types in order: promoted outputs first, then the primary.
    pub returns: Vec<String>,
    pub body: Vec<String>,
    pub arguments: Vec<Argument>,
    /// Names of the promoted output parameters, in parameter order.
    pub promoted: Vec<String>,
}

impl FunctionPlan {
    /// A generated helper with no native counterpart.
    pub fn helper(name: &str, receiver: Option<Receiver>, params: Vec<Field>, returns: &[&str], body: Vec<String>) -> Self {
        Self {
            native_name: None,
            name: name.to_string(),
            receiver,
            params,
            returns: returns.iter().map(|r| r.to_string()).collect(),
            body,
            arguments: Vec::new(),
            promoted: Vec::new(),
        }
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    /// `""`, `T`, or `(A, B)`.
    pub fn return_type(&self) -> String {
        match self.returns.as_slice() {
            [] => String::new(),
            [single] => single.clone(),
            many => format!("({})", many.join(", ")),
        }
    }

    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        let receiver = self
            .receiver
            .as_ref()
            .map(|r| format!("({} {}) ", r.var, r.ty))
            .unwrap_or_default();
        let ret = self.return_type();
        let ret = if ret.is_empty() { ret } else { format!(" {ret}") };
        format!("func {receiver}{}({params}){ret}", self.name)
    }

    pub fn argument(&self, param: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.param == param)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDecl {
    pub name: String,
    /// Embedded types, listed before the named fields.
    pub embeds: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumVariant {
    pub name: String,
    /// Go expression for the value, e.g. `C.sfEvtClosed`.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub underlying: String,
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDecl {
    pub name: String,
    /// Method signatures without the `func` keyword, e.g. `EventType() EventType`.
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "item", rename_all = "kebab-case")]
pub enum Item {
    Struct(StructDecl),
    Enum(EnumDecl),
    Interface(InterfaceDecl),
    Function(FunctionPlan),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Enum(e) => &e.name,
            Self::Interface(i) => &i.name,
            Self::Function(f) => &f.name,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionPlan> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}
