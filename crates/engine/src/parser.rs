//! Binary decoding: turns a `.wasm` byte string into a [`Module`] tree.
//!
//! This is the "external collaborator" the core specification treats as
//! out of scope for the engine triad — it does no type checking of its
//! own beyond what's needed to build the tree (arities, section shapes).
//! All genuine Wasm validation happens afterwards in [`crate::validate`].

use crate::{
    alloc::{string::String, sync::Arc, vec::Vec},
    error::{LoadError, LoadErrorKind},
    module::{
        ConstExpr, DataMode, DataSegment, ElementMode, ElementSegment, Export, ExternVal, FuncDecl,
        GlobalDecl, Import, MemoryType, Module, TableType,
    },
};
use wasm5_core::{FuncType, RefType, ValType};
use wasm5_ir::{BlockType, Instruction, MemArg};
use wasmparser::{Operator, Parser, Payload, TypeRef};

pub fn parse(bytes: &[u8]) -> Result<Module, LoadError> {
    let mut module = Module::default();
    let mut func_bodies = Vec::new();

    for payload in Parser::new(0).parse_all(bytes) {
        let payload = payload.map_err(map_wasmparser_err)?;
        match payload {
            Payload::Version { .. } => {}
            Payload::TypeSection(reader) => {
                for group in reader {
                    let group = group.map_err(map_wasmparser_err)?;
                    for sub in group.into_types() {
                        let wasmparser::CompositeType::Func(ft) = sub.composite_type
                        else {
                            return Err(LoadError::new(
                                LoadErrorKind::Other,
                                "only function types are supported",
                            ));
                        };
                        let params = ft.params().iter().map(map_val_type).collect::<Result<Vec<_>, _>>()?;
                        let results = ft.results().iter().map(map_val_type).collect::<Result<Vec<_>, _>>()?;
                        module.types.push(FuncType::new(params, results));
                    }
                }
            }
            Payload::ImportSection(reader) => {
                for import in reader {
                    let import = import.map_err(map_wasmparser_err)?;
                    let desc = match import.ty {
                        TypeRef::Func(idx) => {
                            module.func_types.push(idx);
                            module.num_imported_funcs += 1;
                            ExternVal::Func(module.num_imported_funcs - 1)
                        }
                        TypeRef::Table(t) => {
                            module.num_imported_tables += 1;
                            ExternVal::Table(module.num_imported_tables - 1)
                        }
                        TypeRef::Memory(_) => {
                            module.num_imported_memories += 1;
                            ExternVal::Memory(module.num_imported_memories - 1)
                        }
                        TypeRef::Global(g) => {
                            module.globals.push(GlobalDecl {
                                val_type: map_val_type(&g.content_type)?,
                                mutable: g.mutable,
                                init: ConstExpr::I32(0),
                            });
                            module.num_imported_globals += 1;
                            ExternVal::Global(module.num_imported_globals - 1)
                        }
                        TypeRef::Tag(_) => {
                            return Err(LoadError::new(
                                LoadErrorKind::Other,
                                "exception-handling tags are out of scope",
                            ))
                        }
                    };
                    module.imports.push(Import {
                        module: import.module.into(),
                        name: import.name.into(),
                        desc,
                    });
                }
            }
            Payload::FunctionSection(reader) => {
                for type_idx in reader {
                    module.func_types.push(type_idx.map_err(map_wasmparser_err)?);
                }
            }
            Payload::TableSection(reader) => {
                for table in reader {
                    let table = table.map_err(map_wasmparser_err)?;
                    module.tables.push(TableType {
                        elem: map_ref_type(&table.ty.element_type)?,
                        min: u32::try_from(table.ty.initial).unwrap_or(u32::MAX),
                        max: table.ty.maximum.map(|m| u32::try_from(m).unwrap_or(u32::MAX)),
                    });
                }
            }
            Payload::MemorySection(reader) => {
                for memory in reader {
                    let memory = memory.map_err(map_wasmparser_err)?;
                    module.memories.push(MemoryType {
                        min: u32::try_from(memory.initial).unwrap_or(u32::MAX),
                        max: memory.maximum.map(|m| u32::try_from(m).unwrap_or(u32::MAX)),
                    });
                }
            }
            Payload::GlobalSection(reader) => {
                for global in reader {
                    let global = global.map_err(map_wasmparser_err)?;
                    let init = const_expr(&global.init_expr)?;
                    module.globals.push(GlobalDecl {
                        val_type: map_val_type(&global.ty.content_type)?,
                        mutable: global.ty.mutable,
                        init,
                    });
                }
            }
            Payload::ExportSection(reader) => {
                for export in reader {
                    let export = export.map_err(map_wasmparser_err)?;
                    let desc = match export.kind {
                        wasmparser::ExternalKind::Func => ExternVal::Func(export.index),
                        wasmparser::ExternalKind::Table => ExternVal::Table(export.index),
                        wasmparser::ExternalKind::Memory => ExternVal::Memory(export.index),
                        wasmparser::ExternalKind::Global => ExternVal::Global(export.index),
                        wasmparser::ExternalKind::Tag => {
                            return Err(LoadError::new(LoadErrorKind::Other, "tag exports unsupported"))
                        }
                    };
                    module.exports.push(Export { name: export.name.into(), desc });
                }
            }
            Payload::StartSection { func, .. } => {
                module.start = Some(func);
            }
            Payload::ElementSection(reader) => {
                for elem in reader {
                    let elem = elem.map_err(map_wasmparser_err)?;
                    let mode = match &elem.kind {
                        wasmparser::ElementKind::Active { table_index, offset_expr } => {
                            ElementMode::Active {
                                table_idx: table_index.unwrap_or(0),
                                offset: const_expr(offset_expr)?,
                            }
                        }
                        wasmparser::ElementKind::Passive => ElementMode::Passive,
                        wasmparser::ElementKind::Declared => ElementMode::Declarative,
                    };
                    let (ty, items) = match elem.items {
                        wasmparser::ElementItems::Functions(fs) => (
                            RefType::Func,
                            fs.into_iter()
                                .map(|f| f.map(Some).map_err(map_wasmparser_err))
                                .collect::<Result<Vec<_>, _>>()?,
                        ),
                        wasmparser::ElementItems::Expressions(ref_ty, exprs) => (
                            map_ref_type(&ref_ty)?,
                            exprs
                                .into_iter()
                                .map(|e| {
                                    let e = e.map_err(map_wasmparser_err)?;
                                    match const_expr(&e)? {
                                        ConstExpr::RefFunc(idx) => Ok(Some(idx)),
                                        ConstExpr::RefNull(_) => Ok(None),
                                        _ => Err(LoadError::new(
                                            LoadErrorKind::InvalidInitializerType,
                                            "element expression must be ref.func or ref.null",
                                        )),
                                    }
                                })
                                .collect::<Result<Vec<_>, _>>()?,
                        ),
                    };
                    module.elements.push(ElementSegment { ty, mode, items });
                }
            }
            Payload::DataSection(reader) => {
                for data in reader {
                    let data = data.map_err(map_wasmparser_err)?;
                    let mode = match data.kind {
                        wasmparser::DataKind::Active { memory_index, offset_expr } => DataMode::Active {
                            mem_idx: memory_index,
                            offset: const_expr(&offset_expr)?,
                        },
                        wasmparser::DataKind::Passive => DataMode::Passive,
                    };
                    module.data.push(DataSegment { mode, bytes: Arc::from(data.data) });
                }
            }
            Payload::CodeSectionEntry(body) => {
                func_bodies.push(body);
            }
            Payload::End(_) => {}
            _ => {}
        }
    }

    for body in func_bodies {
        let mut locals = Vec::new();
        let mut locals_reader = body.get_locals_reader().map_err(map_wasmparser_err)?;
        for _ in 0..locals_reader.get_count() {
            let (count, ty) = locals_reader.read().map_err(map_wasmparser_err)?;
            let ty = map_val_type(&ty)?;
            for _ in 0..count {
                locals.push(ty);
            }
        }
        let ops_reader = body.get_operators_reader().map_err(map_wasmparser_err)?;
        let instrs = ops_reader.into_iter();
        let func_idx = module.num_imported_funcs as usize + module.funcs.len();
        let type_idx = *module
            .func_types
            .get(func_idx)
            .ok_or_else(|| LoadError::new(LoadErrorKind::Other, "code/function section length mismatch"))?;
        let body = parse_body(instrs, &module.types)?;
        module.funcs.push(FuncDecl { type_idx, locals, body });
    }

    Ok(module)
}

fn map_wasmparser_err(e: wasmparser::BinaryReaderError) -> LoadError {
    LoadError::new(LoadErrorKind::MalformedLeb128, alloc::format!("{e}"))
}

fn map_val_type(ty: &wasmparser::ValType) -> Result<ValType, LoadError> {
    Ok(match ty {
        wasmparser::ValType::I32 => ValType::I32,
        wasmparser::ValType::I64 => ValType::I64,
        wasmparser::ValType::F32 => ValType::F32,
        wasmparser::ValType::F64 => ValType::F64,
        wasmparser::ValType::Ref(r) if r.is_func_ref() => ValType::FuncRef,
        wasmparser::ValType::Ref(r) if r.is_extern_ref() => ValType::ExternRef,
        wasmparser::ValType::V128 | wasmparser::ValType::Ref(_) => {
            return Err(LoadError::new(LoadErrorKind::Other, "value type not supported"))
        }
    })
}

fn map_ref_type(ty: &wasmparser::RefType) -> Result<RefType, LoadError> {
    if ty.is_func_ref() {
        Ok(RefType::Func)
    } else if ty.is_extern_ref() {
        Ok(RefType::Extern)
    } else {
        Err(LoadError::new(LoadErrorKind::Other, "reference type not supported"))
    }
}

fn const_expr(expr: &wasmparser::ConstExpr) -> Result<ConstExpr, LoadError> {
    let mut reader = expr.get_operators_reader();
    let op = reader.read().map_err(map_wasmparser_err)?;
    let value = match op {
        Operator::I32Const { value } => ConstExpr::I32(value),
        Operator::I64Const { value } => ConstExpr::I64(value),
        Operator::F32Const { value } => ConstExpr::F32(f32::from_bits(value.bits())),
        Operator::F64Const { value } => ConstExpr::F64(f64::from_bits(value.bits())),
        Operator::RefNull { hty } => {
            let ty = if hty == wasmparser::HeapType::Func {
                RefType::Func
            } else {
                RefType::Extern
            };
            ConstExpr::RefNull(ty)
        }
        Operator::RefFunc { function_index } => ConstExpr::RefFunc(function_index),
        Operator::GlobalGet { global_index } => ConstExpr::GlobalGet(global_index),
        _ => return Err(LoadError::new(LoadErrorKind::InvalidInitializerType, "unsupported constant instruction")),
    };
    match reader.read().map_err(map_wasmparser_err)? {
        Operator::End => Ok(value),
        _ => Err(LoadError::new(LoadErrorKind::InvalidInitializerType, "constant expression must end with `end`")),
    }
}

/// Resolves a `blockty` immediate against the module's already-parsed type
/// section. The type section always precedes the code section in a binary
/// module, so by the time function bodies are walked every `typeidx` form
/// has a real [`FuncType`] to look up — mirroring how the teacher resolves
/// `wasmparser::BlockType::FuncType` at construction time rather than
/// deferring it to a later pass.
fn map_block_type(bt: &wasmparser::BlockType, types: &[FuncType]) -> Result<BlockType, LoadError> {
    Ok(match bt {
        wasmparser::BlockType::Empty => BlockType::Empty,
        wasmparser::BlockType::Type(ty) => BlockType::Result(map_val_type(ty)?),
        wasmparser::BlockType::FuncType(idx) => {
            let ty = types.get(*idx as usize).ok_or_else(|| {
                LoadError::new(LoadErrorKind::Other, "block type references an out-of-range function type")
            })?;
            BlockType::FuncType { params: ty.params().to_vec(), results: ty.results().to_vec() }
        }
    })
}

/// A block body under construction: its already-emitted instructions plus,
/// for `if`, whichever arm is currently being filled.
enum OpenBlock {
    Block(BlockType, Vec<Instruction>),
    Loop(BlockType, Vec<Instruction>),
    If(BlockType, Vec<Instruction>, Vec<Instruction>, bool /* in_else */),
}

fn parse_body<'a>(
    ops: impl Iterator<Item = Result<Operator<'a>, wasmparser::BinaryReaderError>>,
    types: &[FuncType],
) -> Result<Vec<Instruction>, LoadError> {
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut top = Vec::new();

    macro_rules! push {
        ($instr:expr) => {{
            let instr = $instr;
            match stack.last_mut() {
                None => top.push(instr),
                Some(OpenBlock::Block(_, body)) | Some(OpenBlock::Loop(_, body)) => body.push(instr),
                Some(OpenBlock::If(_, then_body, else_body, in_else)) => {
                    if *in_else { else_body.push(instr) } else { then_body.push(instr) }
                }
            }
        }};
    }

    for op in ops {
        let op = op.map_err(map_wasmparser_err)?;
        match op {
            Operator::Block { blockty } => {
                stack.push(OpenBlock::Block(map_block_type(&blockty, types)?, Vec::new()))
            }
            Operator::Loop { blockty } => {
                stack.push(OpenBlock::Loop(map_block_type(&blockty, types)?, Vec::new()))
            }
            Operator::If { blockty } => {
                stack.push(OpenBlock::If(map_block_type(&blockty, types)?, Vec::new(), Vec::new(), false))
            }
            Operator::Else => {
                if let Some(OpenBlock::If(_, _, _, in_else)) = stack.last_mut() {
                    *in_else = true;
                } else {
                    return Err(LoadError::new(LoadErrorKind::Other, "`else` without matching `if`"));
                }
            }
            Operator::End => match stack.pop() {
                None => break, // function-level `end`
                Some(OpenBlock::Block(bt, body)) => push!(Instruction::Block(bt, body)),
                Some(OpenBlock::Loop(bt, body)) => push!(Instruction::Loop(bt, body)),
                Some(OpenBlock::If(bt, then_body, else_body, _)) => {
                    push!(Instruction::If(bt, then_body, else_body))
                }
            },
            other => push!(translate_operator(other)?),
        }
    }
    Ok(top)
}

fn mem_arg(arg: wasmparser::MemArg) -> MemArg {
    MemArg { align: arg.align as u32, offset: arg.offset, mem_idx: arg.memory }
}

fn translate_operator(op: Operator<'_>) -> Result<Instruction, LoadError> {
    use Instruction as I;
    Ok(match op {
        Operator::Unreachable => I::Unreachable,
        Operator::Nop => I::Nop,
        Operator::Br { relative_depth } => I::Br(relative_depth),
        Operator::BrIf { relative_depth } => I::BrIf(relative_depth),
        Operator::BrTable { targets } => {
            let default = targets.default();
            let labels = targets.targets().collect::<Result<Vec<_>, _>>().map_err(map_wasmparser_err)?;
            I::BrTable(labels, default)
        }
        Operator::Return => I::Return,
        Operator::Call { function_index } => I::Call(function_index),
        Operator::CallIndirect { type_index, table_index, .. } => I::CallIndirect(type_index, table_index),
        Operator::ReturnCall { function_index } => I::ReturnCall(function_index),
        Operator::ReturnCallIndirect { type_index, table_index } => {
            I::ReturnCallIndirect(type_index, table_index)
        }
        Operator::Drop => I::Drop,
        Operator::Select => I::Select(None),
        Operator::TypedSelect { ty } => I::Select(Some(map_val_type(&ty)?)),
        Operator::LocalGet { local_index } => I::LocalGet(local_index),
        Operator::LocalSet { local_index } => I::LocalSet(local_index),
        Operator::LocalTee { local_index } => I::LocalTee(local_index),
        Operator::GlobalGet { global_index } => I::GlobalGet(global_index),
        Operator::GlobalSet { global_index } => I::GlobalSet(global_index),
        Operator::RefNull { hty } => {
            let ty = if hty == wasmparser::HeapType::Func { ValType::FuncRef } else { ValType::ExternRef };
            I::RefNull(ty)
        }
        Operator::RefIsNull => I::RefIsNull,
        Operator::RefFunc { function_index } => I::RefFunc(function_index),
        Operator::TableGet { table } => I::TableGet(table),
        Operator::TableSet { table } => I::TableSet(table),
        Operator::TableSize { table } => I::TableSize(table),
        Operator::TableGrow { table } => I::TableGrow(table),
        Operator::TableFill { table } => I::TableFill(table),
        Operator::TableCopy { dst_table, src_table } => I::TableCopy { dst: dst_table, src: src_table },
        Operator::TableInit { elem_index, table } => I::TableInit { table, elem: elem_index },
        Operator::ElemDrop { elem_index } => I::ElemDrop(elem_index),

        Operator::I32Load { memarg } => I::I32Load(mem_arg(memarg)),
        Operator::I64Load { memarg } => I::I64Load(mem_arg(memarg)),
        Operator::F32Load { memarg } => I::F32Load(mem_arg(memarg)),
        Operator::F64Load { memarg } => I::F64Load(mem_arg(memarg)),
        Operator::I32Load8S { memarg } => I::I32Load8S(mem_arg(memarg)),
        Operator::I32Load8U { memarg } => I::I32Load8U(mem_arg(memarg)),
        Operator::I32Load16S { memarg } => I::I32Load16S(mem_arg(memarg)),
        Operator::I32Load16U { memarg } => I::I32Load16U(mem_arg(memarg)),
        Operator::I64Load8S { memarg } => I::I64Load8S(mem_arg(memarg)),
        Operator::I64Load8U { memarg } => I::I64Load8U(mem_arg(memarg)),
        Operator::I64Load16S { memarg } => I::I64Load16S(mem_arg(memarg)),
        Operator::I64Load16U { memarg } => I::I64Load16U(mem_arg(memarg)),
        Operator::I64Load32S { memarg } => I::I64Load32S(mem_arg(memarg)),
        Operator::I64Load32U { memarg } => I::I64Load32U(mem_arg(memarg)),
        Operator::I32Store { memarg } => I::I32Store(mem_arg(memarg)),
        Operator::I64Store { memarg } => I::I64Store(mem_arg(memarg)),
        Operator::F32Store { memarg } => I::F32Store(mem_arg(memarg)),
        Operator::F64Store { memarg } => I::F64Store(mem_arg(memarg)),
        Operator::I32Store8 { memarg } => I::I32Store8(mem_arg(memarg)),
        Operator::I32Store16 { memarg } => I::I32Store16(mem_arg(memarg)),
        Operator::I64Store8 { memarg } => I::I64Store8(mem_arg(memarg)),
        Operator::I64Store16 { memarg } => I::I64Store16(mem_arg(memarg)),
        Operator::I64Store32 { memarg } => I::I64Store32(mem_arg(memarg)),
        Operator::MemorySize { .. } => I::MemorySize,
        Operator::MemoryGrow { .. } => I::MemoryGrow,
        Operator::MemoryFill { .. } => I::MemoryFill,
        Operator::MemoryCopy { .. } => I::MemoryCopy,
        Operator::MemoryInit { data_index, .. } => I::MemoryInit(data_index),
        Operator::DataDrop { data_index } => I::DataDrop(data_index),

        Operator::I32Const { value } => I::I32Const(value),
        Operator::I64Const { value } => I::I64Const(value),
        Operator::F32Const { value } => I::F32Const(f32::from_bits(value.bits())),
        Operator::F64Const { value } => I::F64Const(f64::from_bits(value.bits())),

        Operator::I32Eqz => I::I32Eqz,
        Operator::I32Eq => I::I32Eq,
        Operator::I32Ne => I::I32Ne,
        Operator::I32LtS => I::I32LtS,
        Operator::I32LtU => I::I32LtU,
        Operator::I32GtS => I::I32GtS,
        Operator::I32GtU => I::I32GtU,
        Operator::I32LeS => I::I32LeS,
        Operator::I32LeU => I::I32LeU,
        Operator::I32GeS => I::I32GeS,
        Operator::I32GeU => I::I32GeU,
        Operator::I64Eqz => I::I64Eqz,
        Operator::I64Eq => I::I64Eq,
        Operator::I64Ne => I::I64Ne,
        Operator::I64LtS => I::I64LtS,
        Operator::I64LtU => I::I64LtU,
        Operator::I64GtS => I::I64GtS,
        Operator::I64GtU => I::I64GtU,
        Operator::I64LeS => I::I64LeS,
        Operator::I64LeU => I::I64LeU,
        Operator::I64GeS => I::I64GeS,
        Operator::I64GeU => I::I64GeU,
        Operator::F32Eq => I::F32Eq,
        Operator::F32Ne => I::F32Ne,
        Operator::F32Lt => I::F32Lt,
        Operator::F32Gt => I::F32Gt,
        Operator::F32Le => I::F32Le,
        Operator::F32Ge => I::F32Ge,
        Operator::F64Eq => I::F64Eq,
        Operator::F64Ne => I::F64Ne,
        Operator::F64Lt => I::F64Lt,
        Operator::F64Gt => I::F64Gt,
        Operator::F64Le => I::F64Le,
        Operator::F64Ge => I::F64Ge,

        Operator::I32Clz => I::I32Clz,
        Operator::I32Ctz => I::I32Ctz,
        Operator::I32Popcnt => I::I32Popcnt,
        Operator::I32Add => I::I32Add,
        Operator::I32Sub => I::I32Sub,
        Operator::I32Mul => I::I32Mul,
        Operator::I32DivS => I::I32DivS,
        Operator::I32DivU => I::I32DivU,
        Operator::I32RemS => I::I32RemS,
        Operator::I32RemU => I::I32RemU,
        Operator::I32And => I::I32And,
        Operator::I32Or => I::I32Or,
        Operator::I32Xor => I::I32Xor,
        Operator::I32Shl => I::I32Shl,
        Operator::I32ShrS => I::I32ShrS,
        Operator::I32ShrU => I::I32ShrU,
        Operator::I32Rotl => I::I32Rotl,
        Operator::I32Rotr => I::I32Rotr,
        Operator::I64Clz => I::I64Clz,
        Operator::I64Ctz => I::I64Ctz,
        Operator::I64Popcnt => I::I64Popcnt,
        Operator::I64Add => I::I64Add,
        Operator::I64Sub => I::I64Sub,
        Operator::I64Mul => I::I64Mul,
        Operator::I64DivS => I::I64DivS,
        Operator::I64DivU => I::I64DivU,
        Operator::I64RemS => I::I64RemS,
        Operator::I64RemU => I::I64RemU,
        Operator::I64And => I::I64And,
        Operator::I64Or => I::I64Or,
        Operator::I64Xor => I::I64Xor,
        Operator::I64Shl => I::I64Shl,
        Operator::I64ShrS => I::I64ShrS,
        Operator::I64ShrU => I::I64ShrU,
        Operator::I64Rotl => I::I64Rotl,
        Operator::I64Rotr => I::I64Rotr,

        Operator::F32Abs => I::F32Abs,
        Operator::F32Neg => I::F32Neg,
        Operator::F32Ceil => I::F32Ceil,
        Operator::F32Floor => I::F32Floor,
        Operator::F32Trunc => I::F32Trunc,
        Operator::F32Nearest => I::F32Nearest,
        Operator::F32Sqrt => I::F32Sqrt,
        Operator::F32Add => I::F32Add,
        Operator::F32Sub => I::F32Sub,
        Operator::F32Mul => I::F32Mul,
        Operator::F32Div => I::F32Div,
        Operator::F32Min => I::F32Min,
        Operator::F32Max => I::F32Max,
        Operator::F32Copysign => I::F32Copysign,
        Operator::F64Abs => I::F64Abs,
        Operator::F64Neg => I::F64Neg,
        Operator::F64Ceil => I::F64Ceil,
        Operator::F64Floor => I::F64Floor,
        Operator::F64Trunc => I::F64Trunc,
        Operator::F64Nearest => I::F64Nearest,
        Operator::F64Sqrt => I::F64Sqrt,
        Operator::F64Add => I::F64Add,
        Operator::F64Sub => I::F64Sub,
        Operator::F64Mul => I::F64Mul,
        Operator::F64Div => I::F64Div,
        Operator::F64Min => I::F64Min,
        Operator::F64Max => I::F64Max,
        Operator::F64Copysign => I::F64Copysign,

        Operator::I32WrapI64 => I::I32WrapI64,
        Operator::I32TruncF32S => I::I32TruncF32S,
        Operator::I32TruncF32U => I::I32TruncF32U,
        Operator::I32TruncF64S => I::I32TruncF64S,
        Operator::I32TruncF64U => I::I32TruncF64U,
        Operator::I64ExtendI32S => I::I64ExtendI32S,
        Operator::I64ExtendI32U => I::I64ExtendI32U,
        Operator::I64TruncF32S => I::I64TruncF32S,
        Operator::I64TruncF32U => I::I64TruncF32U,
        Operator::I64TruncF64S => I::I64TruncF64S,
        Operator::I64TruncF64U => I::I64TruncF64U,
        Operator::F32ConvertI32S => I::F32ConvertI32S,
        Operator::F32ConvertI32U => I::F32ConvertI32U,
        Operator::F32ConvertI64S => I::F32ConvertI64S,
        Operator::F32ConvertI64U => I::F32ConvertI64U,
        Operator::F32DemoteF64 => I::F32DemoteF64,
        Operator::F64ConvertI32S => I::F64ConvertI32S,
        Operator::F64ConvertI32U => I::F64ConvertI32U,
        Operator::F64ConvertI64S => I::F64ConvertI64S,
        Operator::F64ConvertI64U => I::F64ConvertI64U,
        Operator::F64PromoteF32 => I::F64PromoteF32,
        Operator::I32ReinterpretF32 => I::I32ReinterpretF32,
        Operator::I64ReinterpretF64 => I::I64ReinterpretF64,
        Operator::F32ReinterpretI32 => I::F32ReinterpretI32,
        Operator::F64ReinterpretI64 => I::F64ReinterpretI64,

        Operator::I32Extend8S => I::I32Extend8S,
        Operator::I32Extend16S => I::I32Extend16S,
        Operator::I64Extend8S => I::I64Extend8S,
        Operator::I64Extend16S => I::I64Extend16S,
        Operator::I64Extend32S => I::I64Extend32S,

        Operator::I32TruncSatF32S => I::I32TruncSatF32S,
        Operator::I32TruncSatF32U => I::I32TruncSatF32U,
        Operator::I32TruncSatF64S => I::I32TruncSatF64S,
        Operator::I32TruncSatF64U => I::I32TruncSatF64U,
        Operator::I64TruncSatF32S => I::I64TruncSatF32S,
        Operator::I64TruncSatF32U => I::I64TruncSatF32U,
        Operator::I64TruncSatF64S => I::I64TruncSatF64S,
        Operator::I64TruncSatF64U => I::I64TruncSatF64U,

        other => {
            return Err(LoadError::new(
                LoadErrorKind::Other,
                alloc::format!("unsupported instruction: {other:?}"),
            ))
        }
    })
}
