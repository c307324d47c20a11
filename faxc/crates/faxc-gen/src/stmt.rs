use crate::types::basic_type;
use crate::{llvm_err, CodeGen, LocalSlot, Result};
use faxc_par::{ForInit, ForStmt, IfStmt, Stmt, VariableDecl, WhileStmt};
use faxc_sem::TypeKind;

impl<'ctx, 'i> CodeGen<'ctx, 'i> {
    pub(crate) fn lower_block(&mut self, block: &[Stmt], return_type: TypeKind) -> Result<()> {
        for stmt in block {
            self.lower_stmt(stmt, return_type)?;
        }
        Ok(())
    }

    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt, return_type: TypeKind) -> Result<()> {
        match stmt {
            Stmt::Compound(block) => self.lower_block(block, return_type),
            Stmt::Expr(Some(expr)) => self.lower_expr(expr).map(|_| ()),
            Stmt::Expr(None) => Ok(()),
            Stmt::Decl(v) => self.lower_local_variable(v),
            Stmt::Return(value, _) => self.lower_return(value.as_ref(), return_type),
            Stmt::If(s) => self.lower_if(s, return_type),
            Stmt::While(s) => self.lower_while(s, return_type),
            Stmt::For(s) => self.lower_for(s, return_type),
        }
    }

    /// `VariableDecl` ::= `%name = alloca <ty>; store <ty> <init>, <ty>* %name`
    /// (zero if no initializer given).
    pub(crate) fn lower_local_variable(&mut self, v: &VariableDecl) -> Result<()> {
        let ty = basic_type(self.context, TypeKind::from_type_name(v.ty))?;
        let ptr = self.builder.build_alloca(ty, &self.name_of(v.name)).map_err(llvm_err)?;
        let init_value = match &v.init {
            Some(expr) => self.lower_expr(expr)?,
            None => ty.into_int_type().const_zero().into(),
        };
        self.builder.build_store(ptr, init_value).map_err(llvm_err)?;
        self.locals.insert(v.name, LocalSlot { ptr, ty });
        Ok(())
    }

    fn lower_return(&mut self, value: Option<&faxc_par::Expr>, return_type: TypeKind) -> Result<()> {
        match (value, return_type) {
            (Some(expr), TypeKind::Void) => {
                self.lower_expr(expr)?;
                self.builder.build_return(None).map_err(llvm_err)?;
            }
            (Some(expr), _) => {
                let v = self.lower_expr(expr)?;
                self.builder.build_return(Some(&v)).map_err(llvm_err)?;
            }
            (None, TypeKind::Void) => {
                self.builder.build_return(None).map_err(llvm_err)?;
            }
            (None, other) => {
                let zero = basic_type(self.context, other)?.into_int_type().const_zero();
                self.builder.build_return(Some(&zero)).map_err(llvm_err)?;
            }
        }
        Ok(())
    }

    /// Always allocates three labels (then/else/end), even without a
    /// source `else` — the else block just falls straight through to
    /// `end`, matching the "unused-else-slot" boundary behavior.
    fn lower_if(&mut self, s: &IfStmt, return_type: TypeKind) -> Result<()> {
        let cond = self.lower_condition(&s.cond)?;
        let function = self.current_function();
        let then_bb = self.new_block(function);
        let else_bb = self.new_block(function);
        let end_bb = self.new_block(function);
        self.builder.build_conditional_branch(cond, then_bb, else_bb).map_err(llvm_err)?;

        self.builder.position_at_end(then_bb);
        self.lower_stmt(&s.then_branch, return_type)?;
        self.branch_if_unterminated(end_bb)?;

        self.builder.position_at_end(else_bb);
        if let Some(else_branch) = &s.else_branch {
            self.lower_stmt(else_branch, return_type)?;
        }
        self.branch_if_unterminated(end_bb)?;

        self.builder.position_at_end(end_bb);
        Ok(())
    }

    fn lower_while(&mut self, s: &WhileStmt, return_type: TypeKind) -> Result<()> {
        let function = self.current_function();
        let cond_bb = self.new_block(function);
        let body_bb = self.new_block(function);
        let end_bb = self.new_block(function);
        self.builder.build_unconditional_branch(cond_bb).map_err(llvm_err)?;

        self.builder.position_at_end(cond_bb);
        let cond = self.lower_condition(&s.cond)?;
        self.builder.build_conditional_branch(cond, body_bb, end_bb).map_err(llvm_err)?;

        self.builder.position_at_end(body_bb);
        self.lower_stmt(&s.body, return_type)?;
        self.branch_if_unterminated(cond_bb)?;

        self.builder.position_at_end(end_bb);
        Ok(())
    }

    /// An absent condition always branches straight to `body`, so an
    /// empty `for (;;) { … }` loops unconditionally.
    fn lower_for(&mut self, s: &ForStmt, return_type: TypeKind) -> Result<()> {
        match &s.init {
            ForInit::Decl(d) => self.lower_local_variable(d)?,
            ForInit::Expr(e) => {
                self.lower_expr(e)?;
            }
            ForInit::Empty => {}
        }

        let function = self.current_function();
        let cond_bb = self.new_block(function);
        let body_bb = self.new_block(function);
        let incr_bb = self.new_block(function);
        let end_bb = self.new_block(function);
        self.builder.build_unconditional_branch(cond_bb).map_err(llvm_err)?;

        self.builder.position_at_end(cond_bb);
        match &s.cond {
            Some(cond) => {
                let c = self.lower_condition(cond)?;
                self.builder.build_conditional_branch(c, body_bb, end_bb).map_err(llvm_err)?;
            }
            None => {
                self.builder.build_unconditional_branch(body_bb).map_err(llvm_err)?;
            }
        }

        self.builder.position_at_end(body_bb);
        self.lower_stmt(&s.body, return_type)?;
        self.branch_if_unterminated(incr_bb)?;

        self.builder.position_at_end(incr_bb);
        if let Some(incr) = &s.incr {
            self.lower_expr(incr)?;
        }
        self.builder.build_unconditional_branch(cond_bb).map_err(llvm_err)?;

        self.builder.position_at_end(end_bb);
        Ok(())
    }
}
