use crate::types::basic_type;
use crate::{llvm_err, CodeGen, FunctionMeta, LocalSlot, Result};
use faxc_par::{FunctionDecl, VariableDecl};
use faxc_sem::TypeKind;
use inkwell::module::Linkage;
use inkwell::types::BasicMetadataTypeEnum;

impl<'ctx, 'i> CodeGen<'ctx, 'i> {
    /// Registers a function's signature so both forward and backward
    /// calls resolve against the same [`FunctionMeta`], independent of
    /// source order.
    pub(crate) fn declare_function(&mut self, f: &FunctionDecl) -> Result<()> {
        if self.functions.contains_key(&f.name) {
            return Ok(());
        }
        let return_type = TypeKind::from_type_name(f.return_type);
        let param_types: Result<Vec<BasicMetadataTypeEnum>> =
            f.params.iter().map(|p| basic_type(self.context, TypeKind::from_type_name(p.ty)).map(Into::into)).collect();
        let param_types = param_types?;

        let fn_type = match return_type {
            TypeKind::Void => self.context.void_type().fn_type(&param_types, false),
            other => basic_type(self.context, other)?.fn_type(&param_types, false),
        };
        let value = self.module.add_function(&self.name_of(f.name), fn_type, Some(Linkage::External));
        self.functions.insert(f.name, FunctionMeta { return_type, value });
        Ok(())
    }

    /// `FunctionDecl` lowering: a fresh entry block, parameters bound by
    /// value under their source names, the body, and a trailing default
    /// return appended if control can still fall off the end.
    pub(crate) fn lower_function(&mut self, f: &FunctionDecl) -> Result<()> {
        self.locals.clear();
        let meta = *self.functions.get(&f.name).expect("declare_function ran for every FunctionDecl before lower_function");

        let entry = self.context.append_basic_block(meta.value, "entry");
        self.builder.position_at_end(entry);

        for (index, param) in f.params.iter().enumerate() {
            let value = meta.value.get_nth_param(index as u32).expect("parameter count matches the declared signature");
            let param_name = self.name_of(param.name);
            value.set_name(&param_name);

            let ty = basic_type(self.context, TypeKind::from_type_name(param.ty))?;
            let ptr = self.builder.build_alloca(ty, &param_name).map_err(llvm_err)?;
            self.builder.build_store(ptr, value).map_err(llvm_err)?;
            self.locals.insert(param.name, LocalSlot { ptr, ty });
        }

        let body = f.body.as_ref().expect("lower_function is only called for definitions");
        self.lower_block(body, meta.return_type)?;
        self.append_default_return(meta.return_type)
    }

    fn append_default_return(&mut self, return_type: TypeKind) -> Result<()> {
        let current = self.builder.get_insert_block().expect("builder has a current block after lowering a function body");
        if current.get_terminator().is_some() {
            return Ok(());
        }
        match return_type {
            TypeKind::Void => self.builder.build_return(None).map_err(llvm_err)?,
            other => {
                let zero = basic_type(self.context, other)?.into_int_type().const_zero();
                self.builder.build_return(Some(&zero)).map_err(llvm_err)?
            }
        };
        Ok(())
    }

    /// Top-level `VariableDecl`s become module-level globals. Only a
    /// constant number or an implicit zero are supported initializers —
    /// the lowering table's `alloca`/`store` model is for function
    /// locals and has no analogue at module scope.
    pub(crate) fn lower_global_variable(&mut self, v: &VariableDecl) -> Result<()> {
        let ty = basic_type(self.context, TypeKind::from_type_name(v.ty))?;
        let global = self.module.add_global(ty, None, &self.name_of(v.name));
        global.set_linkage(Linkage::Internal);

        let init = match &v.init {
            None => ty.into_int_type().const_zero(),
            Some(faxc_par::Expr::Number(lexeme, _)) => {
                let text = self.interner.resolve(*lexeme);
                let value: u64 = text
                    .parse()
                    .map_err(|_| crate::CodeGenError::UnsupportedConstruct(format!("malformed number literal '{text}'")))?;
                ty.into_int_type().const_int(value, false)
            }
            Some(_) => return Err(crate::CodeGenError::UnsupportedConstruct("non-constant global initializer".to_string())),
        };
        global.set_initializer(&init);
        Ok(())
    }
}
