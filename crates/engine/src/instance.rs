use crate::{
    alloc::{string::String, sync::Arc, vec::Vec},
    compile::CompiledModule,
    error::{Error, LoadError, LoadErrorKind},
    global::Global,
    interp,
    linker::{Extern, HostFunc, Linker},
    memory::Memory,
    module::{ConstExpr, DataMode, ElementMode, ExternVal, Module},
    table::Table,
};
use wasm5_core::{FuncType, Slot, TrapCode};

/// A module bound to host state: its own memories, tables, globals, and the
/// host functions satisfying its imports.
///
/// Imported memories/tables/globals are copied out of the [`Linker`] at
/// instantiation time rather than shared by reference — this engine has no
/// notion of two instances observing the same live memory, which the
/// original multi-instance linking model supports and this one does not.
pub struct Instance {
    module: Module,
    compiled: CompiledModule,
    pub(crate) memories: Vec<Memory>,
    pub(crate) tables: Vec<Table>,
    pub(crate) globals: Vec<Global>,
    pub(crate) imported_funcs: Vec<(FuncType, HostFunc)>,
    pub(crate) elements: Vec<Option<Vec<Option<u32>>>>,
    pub(crate) data: Vec<Option<Arc<[u8]>>>,
}

impl Instance {
    pub fn new(module: Module, compiled: CompiledModule, linker: &Linker) -> Result<Self, Error> {
        let mut imported_funcs = Vec::new();
        let mut memories = Vec::new();
        let mut tables = Vec::new();
        let mut globals = Vec::new();

        for import in &module.imports {
            let ext = linker.get(&import.module, &import.name).ok_or_else(|| {
                Error::Load(LoadError::new(
                    LoadErrorKind::MismatchedImportType,
                    alloc_string(&import.module, &import.name),
                ))
            })?;
            match (import.desc, ext) {
                (ExternVal::Func(type_idx), Extern::Func(ty, f)) => {
                    let expected = &module.types[type_idx as usize];
                    if expected != ty {
                        return Err(mismatched_import(import));
                    }
                    imported_funcs.push((ty.clone(), f.clone()));
                }
                (ExternVal::Memory(mem_idx), Extern::Memory(mem)) => {
                    let expected = &module.memories[mem_idx as usize];
                    if mem.size_pages() < expected.min {
                        return Err(mismatched_import(import));
                    }
                    memories.push(mem.clone());
                }
                (ExternVal::Table(table_idx), Extern::Table(table)) => {
                    let expected = &module.tables[table_idx as usize];
                    if table.elem_type() != expected.elem || table.size() < expected.min {
                        return Err(mismatched_import(import));
                    }
                    tables.push(table.clone());
                }
                (ExternVal::Global(global_idx), Extern::Global(global)) => {
                    let expected = &module.globals[global_idx as usize];
                    if global.val_type() != expected.val_type || global.is_mutable() != expected.mutable {
                        return Err(mismatched_import(import));
                    }
                    globals.push(*global);
                }
                _ => return Err(mismatched_import(import)),
            }
        }

        for mem in &module.memories {
            memories.push(Memory::new(mem.min, mem.max));
        }
        for table in &module.tables {
            tables.push(Table::new(table.elem, table.min, table.max));
        }
        for decl in &module.globals {
            let value = eval_const(&decl.init, &globals);
            globals.push(Global::new(decl.val_type, decl.mutable, value));
        }

        let mut instance = Self {
            module,
            compiled,
            memories,
            tables,
            globals,
            imported_funcs,
            elements: Vec::new(),
            data: Vec::new(),
        };

        instance.elements = instance
            .module
            .elements
            .iter()
            .map(|elem| {
                let resolved: Vec<Option<u32>> = elem.items.iter().copied().collect();
                match elem.mode {
                    ElementMode::Declarative => None,
                    _ => Some(resolved),
                }
            })
            .collect();

        instance.data = instance
            .module
            .data
            .iter()
            .map(|d| Some(d.bytes.clone()))
            .collect();

        for (i, elem) in instance.module.elements.iter().enumerate() {
            if let ElementMode::Active { table_idx, offset } = &elem.mode {
                let base = eval_const(offset, &instance.globals).to_u32();
                let items = instance.elements[i].clone().expect("active segment kept");
                let len = items.len() as u32;
                instance.tables[*table_idx as usize]
                    .init_from(base, &items, 0, len)
                    .map_err(Error::Trap)?;
            }
        }

        for data in &instance.module.data {
            if let DataMode::Active { mem_idx, offset } = &data.mode {
                let base = eval_const(offset, &instance.globals).to_u64();
                instance.memories[*mem_idx as usize]
                    .write(base, &data.bytes)
                    .map_err(Error::Trap)?;
            }
        }

        if let Some(start) = instance.module.start {
            instance.call(start, &[]).map_err(Error::Trap)?;
        }

        Ok(instance)
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn compiled(&self) -> &CompiledModule {
        &self.compiled
    }

    /// Invokes a function by its module-global index (spanning imports then
    /// defined functions), dispatching to either a host call or the
    /// threaded-code interpreter.
    pub fn call(&mut self, func_idx: u32, args: &[Slot]) -> Result<Vec<Slot>, TrapCode> {
        interp::call(self, func_idx, args, 0)
    }

    /// Invokes an exported function by name.
    pub fn call_export(&mut self, name: &str, args: &[Slot]) -> Result<Vec<Slot>, Error> {
        let export = self
            .module
            .exports
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::Load(LoadError::new(LoadErrorKind::Other, alloc_str(name))))?;
        let ExternVal::Func(idx) = export.desc else {
            return Err(Error::Load(LoadError::new(LoadErrorKind::Other, alloc_str(name))));
        };
        self.call(idx, args).map_err(Error::Trap)
    }

    pub fn get_export_memory(&self, name: &str) -> Option<&Memory> {
        let export = self.module.exports.iter().find(|e| e.name == name)?;
        match export.desc {
            ExternVal::Memory(idx) => self.memories.get(idx as usize),
            _ => None,
        }
    }

    pub fn get_export_memory_mut(&mut self, name: &str) -> Option<&mut Memory> {
        let idx = match self.module.exports.iter().find(|e| e.name == name)?.desc {
            ExternVal::Memory(idx) => idx,
            _ => return None,
        };
        self.memories.get_mut(idx as usize)
    }
}

fn mismatched_import(import: &crate::module::Import) -> Error {
    Error::Load(LoadError::new(
        LoadErrorKind::MismatchedImportType,
        alloc_string(&import.module, &import.name),
    ))
}

fn alloc_string(module: &str, name: &str) -> String {
    let mut s = String::from(module);
    s.push('.');
    s.push_str(name);
    s
}

fn alloc_str(s: &str) -> String {
    String::from(s)
}

pub(crate) fn eval_const(expr: &ConstExpr, globals: &[Global]) -> Slot {
    match expr {
        ConstExpr::I32(v) => Slot::from_i32(*v),
        ConstExpr::I64(v) => Slot::from_i64(*v),
        ConstExpr::F32(v) => Slot::from_f32(*v),
        ConstExpr::F64(v) => Slot::from_f64(*v),
        ConstExpr::RefNull(_) => Slot::NULL,
        ConstExpr::RefFunc(idx) => Slot::from_ref_index(Some(*idx)),
        ConstExpr::GlobalGet(idx) => globals[*idx as usize].get(),
    }
}
