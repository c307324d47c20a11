use faxc_par::TypeName;

/// Resolved types. Only `Void`, `Int` and `Char` are ever constructed:
/// the declarator grammar has no syntax for pointers, arrays or
/// `struct NAME` references, so the richer forms the type grammar
/// allows for in principle never reach this registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Void,
    Int,
    Char,
}

impl TypeKind {
    pub fn from_type_name(name: TypeName) -> TypeKind {
        match name {
            TypeName::Void => TypeKind::Void,
            TypeName::Int => TypeKind::Int,
            TypeName::Char => TypeKind::Char,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Void => "void",
            TypeKind::Int => "int",
            TypeKind::Char => "char",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
}

/// A name bound in some scope. `param_types` is populated only for
/// `SymbolKind::Function` entries.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub ty: TypeKind,
    pub kind: SymbolKind,
    pub initialized: bool,
    pub param_types: Vec<TypeKind>,
}

impl SymbolEntry {
    pub fn variable(ty: TypeKind) -> Self {
        Self { ty, kind: SymbolKind::Variable, initialized: true, param_types: Vec::new() }
    }

    pub fn parameter(ty: TypeKind) -> Self {
        Self { ty, kind: SymbolKind::Parameter, initialized: true, param_types: Vec::new() }
    }

    pub fn function(ty: TypeKind, param_types: Vec<TypeKind>) -> Self {
        Self { ty, kind: SymbolKind::Function, initialized: true, param_types }
    }
}
