use crate::error::{CodeGenError, Result};
use faxc_sem::TypeKind;
use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;

/// Maps the analyzer's resolved types onto LLVM value types: `int -> i32,
/// char -> i8`. `void` has no basic-value representation and is only
/// legal as a function return type, never as a variable's type.
pub fn basic_type<'ctx>(context: &'ctx Context, ty: TypeKind) -> Result<BasicTypeEnum<'ctx>> {
    match ty {
        TypeKind::Int => Ok(context.i32_type().into()),
        TypeKind::Char => Ok(context.i8_type().into()),
        TypeKind::Void => Err(CodeGenError::UnsupportedConstruct("variable of type void".to_string())),
    }
}
