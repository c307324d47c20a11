use crate::{llvm_err, CodeGen, CodeGenError, Result};
use faxc_par::{AssignmentExpr, BinOp, BinaryExpr, CallExpr, Expr, UnOp, UnaryExpr};
use inkwell::module::Linkage;
use inkwell::types::BasicMetadataTypeEnum;
use inkwell::values::{BasicValueEnum, IntValue};
use inkwell::IntPredicate;

impl<'ctx, 'i> CodeGen<'ctx, 'i> {
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Result<BasicValueEnum<'ctx>> {
        match expr {
            Expr::Binary(e) => self.lower_binary(e).map(Into::into),
            Expr::Unary(e) => self.lower_unary(e).map(Into::into),
            Expr::Call(e) => self.lower_call(e),
            Expr::Assignment(e) => self.lower_assignment(e),
            Expr::Identifier(name, span) => self.lower_identifier(*name, *span),
            Expr::Number(lexeme, _) => self.lower_number(*lexeme).map(Into::into),
            Expr::String(lexeme, _) => self.lower_string_literal(*lexeme),
        }
    }

    /// Evaluates `expr` and widens it to an `i32`, then compares it
    /// against zero to recover the `i1` a branch instruction needs —
    /// every value this language produces, comparisons included, lives
    /// in `i32` until the branch site itself demands a bit.
    pub(crate) fn lower_condition(&mut self, expr: &Expr) -> Result<IntValue<'ctx>> {
        let value = self.lower_expr(expr)?;
        let value = self.as_i32(value)?;
        let zero = self.context.i32_type().const_zero();
        let name = self.fresh_temp();
        self.builder.build_int_compare(IntPredicate::NE, value, zero, &name).map_err(llvm_err)
    }

    fn lower_binary(&mut self, e: &BinaryExpr) -> Result<IntValue<'ctx>> {
        let left = self.lower_expr(&e.left)?;
        let left = self.as_i32(left)?;
        let right = self.lower_expr(&e.right)?;
        let right = self.as_i32(right)?;
        let name = self.fresh_temp();

        match e.op {
            BinOp::Add => self.builder.build_int_add(left, right, &name).map_err(llvm_err),
            BinOp::Sub => self.builder.build_int_sub(left, right, &name).map_err(llvm_err),
            BinOp::Mul => self.builder.build_int_mul(left, right, &name).map_err(llvm_err),
            BinOp::Div => self.builder.build_int_signed_div(left, right, &name).map_err(llvm_err),
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                let predicate = match e.op {
                    BinOp::Eq => IntPredicate::EQ,
                    BinOp::Ne => IntPredicate::NE,
                    BinOp::Lt => IntPredicate::SLT,
                    BinOp::Le => IntPredicate::SLE,
                    BinOp::Gt => IntPredicate::SGT,
                    BinOp::Ge => IntPredicate::SGE,
                    _ => unreachable!(),
                };
                let bit = self.builder.build_int_compare(predicate, left, right, &name).map_err(llvm_err)?;
                let widen_name = self.fresh_temp();
                self.builder.build_int_z_extend(bit, self.context.i32_type(), &widen_name).map_err(llvm_err)
            }
        }
    }

    fn lower_unary(&mut self, e: &UnaryExpr) -> Result<IntValue<'ctx>> {
        let operand = self.lower_expr(&e.operand)?;
        let operand = self.as_i32(operand)?;
        let name = self.fresh_temp();
        match e.op {
            UnOp::Neg => {
                let zero = self.context.i32_type().const_zero();
                self.builder.build_int_sub(zero, operand, &name).map_err(llvm_err)
            }
            UnOp::Not => {
                let zero = self.context.i32_type().const_zero();
                let bit = self.builder.build_int_compare(IntPredicate::EQ, operand, zero, &name).map_err(llvm_err)?;
                let widen_name = self.fresh_temp();
                self.builder.build_int_z_extend(bit, self.context.i32_type(), &widen_name).map_err(llvm_err)
            }
        }
    }

    /// Unknown callees default to an `i32`-returning external function
    /// with `i32`-typed parameters inferred from the call's own argument
    /// count — normally unreachable once semantic analysis has run, but
    /// the lowering table sanctions the fallback regardless.
    fn lower_call(&mut self, e: &CallExpr) -> Result<BasicValueEnum<'ctx>> {
        let function = match self.functions.get(&e.callee) {
            Some(meta) => meta.value,
            None => {
                let i32_type = self.context.i32_type();
                let params: Vec<BasicMetadataTypeEnum> = e.args.iter().map(|_| i32_type.into()).collect();
                let fn_type = i32_type.fn_type(&params, false);
                self.module.add_function(&self.name_of(e.callee), fn_type, Some(Linkage::External))
            }
        };

        let mut args = Vec::with_capacity(e.args.len());
        for arg in &e.args {
            args.push(self.lower_expr(arg)?.into());
        }
        let name = self.fresh_temp();
        let call = self.builder.build_call(function, &args, &name).map_err(llvm_err)?;
        Ok(call
            .try_as_basic_value()
            .left()
            .unwrap_or_else(|| self.context.i32_type().const_zero().into()))
    }

    /// Every local, parameters included, lives in an alloca (see
    /// `lower_function`), so an assignment is always a plain `store` —
    /// there is no separate "target is a parameter" case to reject.
    fn lower_assignment(&mut self, e: &AssignmentExpr) -> Result<BasicValueEnum<'ctx>> {
        let value = self.lower_expr(&e.value)?;
        match self.locals.get(&e.target) {
            Some(slot) => {
                self.builder.build_store(slot.ptr, value).map_err(llvm_err)?;
                Ok(value)
            }
            None => Err(CodeGenError::UndefinedVariable(self.name_of(e.target))),
        }
    }

    fn lower_identifier(&mut self, name: faxc_util::Symbol, _span: faxc_util::Span) -> Result<BasicValueEnum<'ctx>> {
        match self.locals.get(&name) {
            Some(slot) => {
                let temp = self.fresh_temp();
                self.builder.build_load(slot.ty, slot.ptr, &temp).map_err(llvm_err)
            }
            None => Err(CodeGenError::UndefinedVariable(self.name_of(name))),
        }
    }

    /// Materializes the decimal lexeme directly as an `i32` constant —
    /// no `add i32 <lit>, 0` instruction is emitted for it.
    fn lower_number(&mut self, lexeme: faxc_util::Symbol) -> Result<IntValue<'ctx>> {
        let text = self.interner.resolve(lexeme);
        let value: u64 = text.parse().map_err(|_| CodeGenError::UnsupportedConstruct(format!("malformed number literal '{text}'")))?;
        Ok(self.context.i32_type().const_int(value, false))
    }

    /// Emits a private constant byte array (with an explicit trailing
    /// NUL) and returns a pointer to its first byte.
    fn lower_string_literal(&mut self, lexeme: faxc_util::Symbol) -> Result<BasicValueEnum<'ctx>> {
        let text = self.interner.resolve(lexeme).to_string();
        let mut bytes = text.into_bytes();
        bytes.push(0);

        let i8_type = self.context.i8_type();
        let array_value = i8_type.const_array(&bytes.iter().map(|b| i8_type.const_int(*b as u64, false)).collect::<Vec<_>>());
        let name = format!("str.{}", self.string_counter);
        self.string_counter += 1;

        let global = self.module.add_global(array_value.get_type(), None, &name);
        global.set_linkage(Linkage::Internal);
        global.set_constant(true);
        global.set_initializer(&array_value);

        let zero = self.context.i32_type().const_zero();
        let temp = self.fresh_temp();
        let ptr = unsafe {
            self.builder
                .build_in_bounds_gep(array_value.get_type(), global.as_pointer_value(), &[zero, zero], &temp)
                .map_err(llvm_err)?
        };
        Ok(ptr.into())
    }
}
