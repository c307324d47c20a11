//! faxc-gen - lowers a validated AST into textual LLVM IR.
//!
//! SSA temporaries (`t0, t1, …`) and basic-block labels (`label0,
//! label1, …`) are drawn from counters that live for the whole
//! compilation unit, never reset between functions. The local-variable
//! table, by contrast, is cleared at the start of every function.

mod error;
mod expr;
mod function;
mod stmt;
mod types;

pub use crate::error::{CodeGenError, Result};

use faxc_par::Program;
use faxc_sem::TypeKind;
use faxc_util::{FxHashMap, Interner, Symbol};
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::values::{BasicValueEnum, FunctionValue, IntValue, PointerValue};
use inkwell::AddressSpace;

/// Every local — a `VariableDecl` or a function parameter alike — is
/// modeled as an entry-block alloca, so a later assignment to either
/// one is an ordinary `store` with nothing further to special-case.
#[derive(Clone, Copy)]
struct LocalSlot<'ctx> {
    ptr: PointerValue<'ctx>,
    ty: inkwell::types::BasicTypeEnum<'ctx>,
}

#[derive(Clone, Copy)]
struct FunctionMeta<'ctx> {
    return_type: TypeKind,
    value: FunctionValue<'ctx>,
}

pub struct CodeGen<'ctx, 'i> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    interner: &'i Interner,
    functions: FxHashMap<Symbol, FunctionMeta<'ctx>>,
    locals: FxHashMap<Symbol, LocalSlot<'ctx>>,
    temp_counter: u32,
    label_counter: u32,
    string_counter: u32,
}

impl<'ctx, 'i> CodeGen<'ctx, 'i> {
    pub fn new(context: &'ctx Context, module_name: &str, interner: &'i Interner) -> Self {
        let module = context.create_module(module_name);
        let triple = inkwell::targets::TargetTriple::create("x86_64-unknown-linux-gnu");
        module.set_triple(&triple);

        let mut codegen = Self {
            context,
            module,
            builder: context.create_builder(),
            interner,
            functions: FxHashMap::default(),
            locals: FxHashMap::default(),
            temp_counter: 0,
            label_counter: 0,
            string_counter: 0,
        };
        codegen.declare_runtime();
        codegen
    }

    /// `printf`/`scanf` prototypes, declared once up front the way the
    /// fixed prologue requires.
    fn declare_runtime(&mut self) {
        let i8_ptr = self.context.ptr_type(AddressSpace::default());
        let i32_type = self.context.i32_type();
        let printf_ty = i32_type.fn_type(&[i8_ptr.into()], true);
        self.module.add_function("printf", printf_ty, Some(Linkage::External));
        let scanf_ty = i32_type.fn_type(&[i8_ptr.into()], true);
        self.module.add_function("scanf", scanf_ty, Some(Linkage::External));
    }

    /// Lower the whole program and render the module as LLVM IR text.
    pub fn generate(mut self, program: &Program) -> Result<String> {
        for decl in program {
            if let faxc_par::Decl::Function(f) = decl {
                self.declare_function(f)?;
            }
        }
        for decl in program {
            match decl {
                faxc_par::Decl::Function(f) => {
                    if f.body.is_some() {
                        self.lower_function(f)?;
                    }
                }
                faxc_par::Decl::Variable(v) => self.lower_global_variable(v)?,
            }
        }
        Ok(format!("; LLVM IR Generated Code\n{}", self.module.print_to_string().to_string()))
    }

    fn name_of(&self, symbol: Symbol) -> String {
        self.interner.resolve(symbol).to_string()
    }

    fn fresh_temp(&mut self) -> String {
        let name = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        name
    }

    fn new_block(&mut self, function: FunctionValue<'ctx>) -> inkwell::basic_block::BasicBlock<'ctx> {
        let name = format!("label{}", self.label_counter);
        self.label_counter += 1;
        self.context.append_basic_block(function, &name)
    }

    fn current_function(&self) -> FunctionValue<'ctx> {
        self.builder
            .get_insert_block()
            .and_then(|block| block.get_parent())
            .expect("lowering always happens inside a function body")
    }

    /// Appends an unconditional branch to `target` unless the current
    /// block already ends in a terminator (e.g. a `return` inside an
    /// `if` arm).
    fn branch_if_unterminated(&mut self, target: inkwell::basic_block::BasicBlock<'ctx>) -> Result<()> {
        let current = self.builder.get_insert_block().expect("builder has a current block while lowering a function");
        if current.get_terminator().is_none() {
            self.builder.build_unconditional_branch(target).map_err(llvm_err)?;
        }
        Ok(())
    }

    /// Widens an `i8` operand to `i32`; passes an `i32` through
    /// unchanged. Arithmetic and comparisons in this language are
    /// always carried out in `i32`.
    fn as_i32(&mut self, value: BasicValueEnum<'ctx>) -> Result<IntValue<'ctx>> {
        match value {
            BasicValueEnum::IntValue(v) if v.get_type() == self.context.i32_type() => Ok(v),
            BasicValueEnum::IntValue(v) => {
                let name = self.fresh_temp();
                self.builder.build_int_z_extend(v, self.context.i32_type(), &name).map_err(llvm_err)
            }
            _ => Err(CodeGenError::UnsupportedConstruct("non-integer operand in an arithmetic or comparison expression".to_string())),
        }
    }
}

fn llvm_err(err: impl std::fmt::Display) -> CodeGenError {
    CodeGenError::LlvmOperationFailed(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_lex::tokenize;
    use faxc_par::parse;
    use faxc_util::Handler;
    use inkwell::context::Context;

    fn generate_ir(source: &str) -> String {
        let mut interner = Interner::new();
        let tokens = tokenize(source, &mut interner).expect("lexing should succeed");
        let mut handler = Handler::new();
        let program = parse(&tokens, &interner, &mut handler);
        assert!(!handler.has_errors(), "source should parse cleanly");
        assert!(faxc_sem::analyze(&program, &interner, &mut handler), "source should pass semantic analysis");
        let context = Context::create();
        CodeGen::new(&context, "test", &interner).generate(&program).expect("codegen should succeed")
    }

    /// Collects every `%name = ...` line in `ir` with how many times
    /// that name was defined. A well-formed function never defines the
    /// same SSA temporary twice.
    fn ssa_definition_counts(ir: &str) -> FxHashMap<String, u32> {
        let mut counts = FxHashMap::default();
        for line in ir.lines() {
            let trimmed = line.trim_start();
            if let Some(rest) = trimmed.strip_prefix('%') {
                if let Some(name_end) = rest.find(" = ") {
                    *counts.entry(rest[..name_end].to_string()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Collects every `labelN:` block-label definition in `ir` with how
    /// many times that label was defined.
    fn label_definition_counts(ir: &str) -> FxHashMap<String, u32> {
        let mut counts = FxHashMap::default();
        for line in ir.lines() {
            let trimmed = line.trim();
            if let Some(name) = trimmed.strip_suffix(':') {
                if name.starts_with("label") && name[5..].chars().all(|c| c.is_ascii_digit()) {
                    *counts.entry(name.to_string()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    const LOOPY_PROGRAM: &str = "
        int f(int x) {
            x = x + 1;
            int s;
            s = 0;
            int i;
            for (i = 0; i < x; i = i + 1) {
                if (i < 5) {
                    s = s + i;
                } else {
                    s = s - 1;
                }
            }
            while (s > 0) {
                s = s - 1;
            }
            return s;
        }
        int main() { return f(10); }
    ";

    #[test]
    fn every_ssa_temporary_is_defined_at_most_once() {
        let ir = generate_ir(LOOPY_PROGRAM);
        for (name, count) in ssa_definition_counts(&ir) {
            assert_eq!(count, 1, "%{name} was defined {count} times");
        }
    }

    #[test]
    fn every_label_is_defined_exactly_once() {
        let ir = generate_ir(LOOPY_PROGRAM);
        let counts = label_definition_counts(&ir);
        assert!(!counts.is_empty(), "the loopy program should allocate at least one label");
        for (name, count) in counts {
            assert_eq!(count, 1, "{name} was defined {count} times");
        }
    }

    #[test]
    fn assigning_to_a_parameter_lowers_to_an_ordinary_store() {
        let ir = generate_ir("int f(int x) { x = x + 1; return x; }");
        assert!(ir.contains("store i32"));
    }
}
