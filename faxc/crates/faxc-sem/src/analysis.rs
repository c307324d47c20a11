use crate::scope::{RibKind, ScopeTree};
use crate::types::{SymbolEntry, SymbolKind, TypeKind};
use crate::SemaError;
use faxc_par::{Decl, Expr, ForInit, FunctionDecl, Program, Stmt, VariableDecl};
use faxc_util::{Interner, Symbol};

/// Walks a [`Program`] exactly once, populating a [`ScopeTree`] and
/// validating every use it finds. Stops at the first error: analysis
/// results are never partial, they either fully succeed or are discarded.
pub struct Analyzer<'i> {
    scopes: ScopeTree,
    interner: &'i Interner,
}

impl<'i> Analyzer<'i> {
    pub fn new(interner: &'i Interner) -> Self {
        Self { scopes: ScopeTree::new(), interner }
    }

    pub fn analyze(mut self, program: &Program) -> Result<(), SemaError> {
        for decl in program {
            self.analyze_decl(decl)?;
        }
        Ok(())
    }

    fn name_of(&self, symbol: Symbol) -> String {
        self.interner.resolve(symbol).to_string()
    }

    fn analyze_decl(&mut self, decl: &Decl) -> Result<(), SemaError> {
        match decl {
            Decl::Function(f) => self.analyze_function(f),
            Decl::Variable(v) => self.analyze_variable_decl(v),
        }
    }

    fn analyze_function(&mut self, f: &FunctionDecl) -> Result<(), SemaError> {
        let return_ty = TypeKind::from_type_name(f.return_type);
        let param_types: Vec<TypeKind> = f.params.iter().map(|p| TypeKind::from_type_name(p.ty)).collect();
        if !self.scopes.declare(f.name, SymbolEntry::function(return_ty, param_types)) {
            return Err(SemaError::Redeclaration { name: self.name_of(f.name) });
        }

        let Some(body) = &f.body else { return Ok(()) };

        self.scopes.enter_scope(RibKind::Function);
        let result = self.analyze_function_body(f, body);
        self.scopes.exit_scope();
        result
    }

    fn analyze_function_body(&mut self, f: &FunctionDecl, body: &[Stmt]) -> Result<(), SemaError> {
        for p in &f.params {
            let ty = TypeKind::from_type_name(p.ty);
            if !self.scopes.declare(p.name, SymbolEntry::parameter(ty)) {
                return Err(SemaError::Redeclaration { name: self.name_of(p.name) });
            }
        }
        self.analyze_block(body)
    }

    fn analyze_block(&mut self, block: &[Stmt]) -> Result<(), SemaError> {
        self.scopes.enter_scope(RibKind::Block);
        let result = (|| {
            for stmt in block {
                self.analyze_stmt(stmt)?;
            }
            Ok(())
        })();
        self.scopes.exit_scope();
        result
    }

    fn analyze_variable_decl(&mut self, v: &VariableDecl) -> Result<(), SemaError> {
        if let Some(init) = &v.init {
            self.analyze_expr(init)?;
        }
        let ty = TypeKind::from_type_name(v.ty);
        if !self.scopes.declare(v.name, SymbolEntry::variable(ty)) {
            return Err(SemaError::Redeclaration { name: self.name_of(v.name) });
        }
        Ok(())
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<(), SemaError> {
        match stmt {
            Stmt::Compound(block) => self.analyze_block(block),
            Stmt::Expr(Some(expr)) => self.analyze_expr(expr).map(|_| ()),
            Stmt::Expr(None) => Ok(()),
            Stmt::If(s) => {
                self.analyze_expr(&s.cond)?;
                self.analyze_stmt(&s.then_branch)?;
                if let Some(else_branch) = &s.else_branch {
                    self.analyze_stmt(else_branch)?;
                }
                Ok(())
            }
            Stmt::While(s) => {
                self.analyze_expr(&s.cond)?;
                self.analyze_stmt(&s.body)
            }
            Stmt::For(s) => {
                self.scopes.enter_scope(RibKind::For);
                let result = (|| {
                    match &s.init {
                        ForInit::Decl(d) => self.analyze_variable_decl(d)?,
                        ForInit::Expr(e) => self.analyze_expr(e).map(|_| ())?,
                        ForInit::Empty => {}
                    }
                    if let Some(cond) = &s.cond {
                        self.analyze_expr(cond)?;
                    }
                    if let Some(incr) = &s.incr {
                        self.analyze_expr(incr)?;
                    }
                    self.analyze_stmt(&s.body)
                })();
                self.scopes.exit_scope();
                result
            }
            Stmt::Return(Some(expr), _) => self.analyze_expr(expr).map(|_| ()),
            Stmt::Return(None, _) => Ok(()),
            Stmt::Decl(v) => self.analyze_variable_decl(v),
        }
    }

    fn analyze_expr(&mut self, expr: &Expr) -> Result<TypeKind, SemaError> {
        match expr {
            Expr::Number(..) => Ok(TypeKind::Int),
            Expr::String(..) => Ok(TypeKind::Char),
            Expr::Identifier(name, _) => self
                .scopes
                .resolve(*name)
                .map(|entry| entry.ty)
                .ok_or_else(|| SemaError::UndeclaredIdentifier { name: self.name_of(*name) }),
            Expr::Unary(u) => self.analyze_expr(&u.operand),
            Expr::Binary(b) => {
                self.analyze_expr(&b.left)?;
                self.analyze_expr(&b.right)
            }
            Expr::Call(c) => {
                let entry = self
                    .scopes
                    .resolve(c.callee)
                    .cloned()
                    .ok_or_else(|| SemaError::UndeclaredIdentifier { name: self.name_of(c.callee) })?;
                if entry.kind != SymbolKind::Function {
                    return Err(SemaError::NotAFunction { name: self.name_of(c.callee) });
                }
                if entry.param_types.len() != c.args.len() {
                    return Err(SemaError::ArityMismatch {
                        name: self.name_of(c.callee),
                        expected: entry.param_types.len(),
                        found: c.args.len(),
                    });
                }
                for arg in &c.args {
                    self.analyze_expr(arg)?;
                }
                Ok(entry.ty)
            }
            Expr::Assignment(a) => {
                let entry = self
                    .scopes
                    .resolve(a.target)
                    .cloned()
                    .ok_or_else(|| SemaError::UndeclaredIdentifier { name: self.name_of(a.target) })?;
                self.analyze_expr(&a.value)?;
                // Declarations are always recorded as initialized (see
                // SymbolEntry's constructors), so there is no flag left to
                // flip here on a successful assignment target.
                Ok(entry.ty)
            }
        }
    }
}
