use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow, bail};
use wasm5::{ExternVal, Instance, Linker, Slot, ValType};

use crate::args::RunArgs;

/// Runs the `run` subcommand, returning the process exit code.
pub fn execute(args: &RunArgs) -> Result<i32> {
    let wasm = std::fs::read(args.module())
        .with_context(|| format!("failed to read Wasm file {:?}", args.module()))?;

    let wasi_ctx = Arc::new(Mutex::new(wasm5_wasi::WasiCtx::new()));
    if let Some(dir) = &args.dir {
        wasi_ctx.lock().expect("wasi ctx mutex poisoned").push_preopen_dir(dir.clone(), "/");
    }

    let mut linker = Linker::new();
    wasm5_wasi::add_to_linker(&mut linker, wasi_ctx.clone());

    let mut instance = wasm5::instantiate(&wasm, &linker)
        .map_err(|error| anyhow!("failed to instantiate {:?}: {error}", args.module()))?;

    let (func_name, ty) = invoked_name_and_type(&instance, args.invoke.as_deref())?;
    let func_args = decode_func_args(&ty, args.args())?;

    match instance.call_export(&func_name, &func_args) {
        Ok(results) => {
            for (result, val_type) in results.iter().zip(ty.results()) {
                println!("{}", display_value(*result, *val_type));
            }
            Ok(wasi_ctx.lock().expect("wasi ctx mutex poisoned").exit_code().unwrap_or(0))
        }
        Err(error) => {
            if let Some(code) = wasi_ctx.lock().expect("wasi ctx mutex poisoned").exit_code() {
                return Ok(code);
            }
            bail!("failed during execution of {func_name}: {error}")
        }
    }
}

/// Resolves either the explicitly `--invoke`d export or, failing that, the
/// conventional WASI entry points `""` and `_start`.
fn invoked_name_and_type(instance: &Instance, invoke: Option<&str>) -> Result<(String, wasm5::FuncType)> {
    let lookup = |name: &str| -> Option<(String, wasm5::FuncType)> {
        let export = instance.module().exports.iter().find(|e| e.name == name)?;
        let ExternVal::Func(idx) = export.desc else { return None };
        Some((name.to_string(), instance.module().func_type(idx)?.clone()))
    };
    if let Some(name) = invoke {
        return lookup(name).ok_or_else(|| anyhow!("no exported function named {name:?}"));
    }
    lookup("").or_else(|| lookup("_start")).ok_or_else(|| {
        anyhow!("did not specify --invoke and could not find a WASI entry point (`_start`)")
    })
}

fn decode_func_args(ty: &wasm5::FuncType, args: &[String]) -> Result<Vec<Slot>> {
    if args.len() != ty.params().len() {
        bail!("expected {} argument(s), got {}", ty.params().len(), args.len());
    }
    ty.params()
        .iter()
        .zip(args)
        .map(|(param_type, arg)| {
            let err = || anyhow!("failed to parse argument {arg:?} as {param_type:?}");
            match param_type {
                ValType::I32 => arg.parse::<i32>().map(Slot::from_i32).map_err(|_| err()),
                ValType::I64 => arg.parse::<i64>().map(Slot::from_i64).map_err(|_| err()),
                ValType::F32 => arg.parse::<f32>().map(Slot::from_f32).map_err(|_| err()),
                ValType::F64 => arg.parse::<f64>().map(Slot::from_f64).map_err(|_| err()),
                ValType::FuncRef | ValType::ExternRef => Err(anyhow!("cannot pass a reference-typed argument on the command line")),
            }
        })
        .collect()
}

fn display_value(slot: Slot, val_type: ValType) -> String {
    match val_type {
        ValType::I32 => slot.to_i32().to_string(),
        ValType::I64 => slot.to_i64().to_string(),
        ValType::F32 => slot.to_f32().to_string(),
        ValType::F64 => slot.to_f64().to_string(),
        ValType::FuncRef | ValType::ExternRef => match slot.as_ref_index() {
            Some(idx) => format!("ref({idx})"),
            None => "ref(null)".to_string(),
        },
    }
}
