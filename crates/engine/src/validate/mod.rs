//! The validator: a decoupled type checker.
//!
//! [`validate`] performs the module-level structural checks described by
//! the engine's type taxonomy, then hands each function body to
//! [`func::validate_func`], which walks it on its own type stack with a
//! polymorphic-unreachable mode. Validation never mutates the [`Module`];
//! a successful run is the compiler's only precondition.

mod func;

use crate::{
    alloc::vec::Vec,
    error::{ValidationError, ValidationErrorKind as Kind},
    module::{ConstExpr, DataMode, ElementMode, ExternVal, Module},
};
use wasm5_core::ValType;

pub(crate) use func::FuncValidation;

type VResult<T> = Result<T, ValidationError>;

fn err(kind: Kind, detail: &str) -> ValidationError {
    ValidationError::new(kind, detail)
}

/// Validates an entire module: structural well-formedness of the
/// import/export/table/memory/global/element/data sections, then every
/// function body. Returns the first violation encountered.
pub fn validate(module: &Module) -> VResult<()> {
    if module.num_memories() > 1 {
        return Err(err(Kind::MultipleMemories, "at most one memory is permitted"));
    }
    for mem in &module.memories {
        if let Some(max) = mem.max {
            if mem.min > max {
                return Err(err(Kind::SizeMinimumGreaterThanMaximum, "memory min > max"));
            }
        }
    }
    for table in &module.tables {
        if let Some(max) = table.max {
            if table.min > max {
                return Err(err(Kind::SizeMinimumGreaterThanMaximum, "table min > max"));
            }
        }
    }

    validate_exports(module)?;

    for global in &module.globals {
        validate_const_expr(module, &global.init, global.val_type)?;
    }

    for elem in &module.elements {
        for item in &elem.items {
            if let Some(func_idx) = item {
                check_func_idx(module, *func_idx)?;
            }
        }
        if let ElementMode::Active { table_idx, offset } = &elem.mode {
            if *table_idx >= module.num_tables() {
                return Err(err(Kind::UnknownTable, "active element segment: unknown table"));
            }
            validate_const_expr(module, offset, ValType::I32)?;
        }
    }

    for data in &module.data {
        if let DataMode::Active { mem_idx, offset } = &data.mode {
            if *mem_idx >= module.num_memories() {
                return Err(err(Kind::UnknownMemory, "active data segment: unknown memory"));
            }
            validate_const_expr(module, offset, ValType::I32)?;
        }
    }

    if let Some(start) = module.start {
        let ty = module
            .func_type(start)
            .ok_or_else(|| err(Kind::UnknownFunction, "unknown start function"))?;
        if !ty.params().is_empty() || !ty.results().is_empty() {
            return Err(err(Kind::InvalidResultArity, "start function must be `() -> ()`"));
        }
    }

    for func in &module.funcs {
        func::validate_func(module, func)?;
    }

    Ok(())
}

fn validate_exports(module: &Module) -> VResult<()> {
    let mut seen = Vec::with_capacity(module.exports.len());
    for export in &module.exports {
        if seen.contains(&export.name) {
            return Err(err(Kind::DuplicateExport, &export.name));
        }
        seen.push(export.name.clone());
        match export.desc {
            ExternVal::Func(idx) => check_func_idx(module, idx)?,
            ExternVal::Table(idx) => {
                if idx >= module.num_tables() {
                    return Err(err(Kind::UnknownTable, "export: unknown table"));
                }
            }
            ExternVal::Memory(idx) => {
                if idx >= module.num_memories() {
                    return Err(err(Kind::UnknownMemory, "export: unknown memory"));
                }
            }
            ExternVal::Global(idx) => {
                if idx >= module.num_globals() {
                    return Err(err(Kind::UnknownGlobal, "export: unknown global"));
                }
            }
        }
    }
    Ok(())
}

fn check_func_idx(module: &Module, idx: u32) -> VResult<()> {
    if idx >= module.num_funcs() {
        Err(err(Kind::UnknownFunction, "unknown function index"))
    } else {
        Ok(())
    }
}

/// Checks that a constant expression consists only of `*.const`,
/// `ref.null`, `ref.func` (of a function that exists), or `global.get` of
/// an *immutable imported* global, and that its static type matches
/// `expected`.
fn validate_const_expr(module: &Module, expr: &ConstExpr, expected: ValType) -> VResult<()> {
    let actual = match expr {
        ConstExpr::I32(_) => ValType::I32,
        ConstExpr::I64(_) => ValType::I64,
        ConstExpr::F32(_) => ValType::F32,
        ConstExpr::F64(_) => ValType::F64,
        ConstExpr::RefNull(rt) => ValType::from(*rt),
        ConstExpr::RefFunc(idx) => {
            check_func_idx(module, *idx)?;
            ValType::FuncRef
        }
        ConstExpr::GlobalGet(idx) => {
            if *idx >= module.num_imported_globals {
                return Err(err(
                    Kind::ConstantExpressionRequired,
                    "global.get in a constant expression must reference an imported global",
                ));
            }
            let global = module
                .globals
                .get(*idx as usize)
                .ok_or_else(|| err(Kind::UnknownGlobal, "unknown global"))?;
            if global.mutable {
                return Err(err(
                    Kind::MutableGlobalInConstExpr,
                    "constant expression may not read a mutable global",
                ));
            }
            global.val_type
        }
    };
    if actual != expected {
        return Err(err(Kind::TypeMismatch, "constant expression type mismatch"));
    }
    Ok(())
}
