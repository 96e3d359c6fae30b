//! A minimal `wasi_snapshot_preview1` host for the `wasm5` engine.
//!
//! This crate is one of the "external collaborators" the engine itself
//! treats as opaque: it binds a [`wasm5::Linker`] with the preview-1
//! functions a `_start`-style module imports from the `wasi_snapshot_preview1`
//! module name, backed by real file descriptors and the host clock.
//!
//! ```no_run
//! let mut ctx = wasm5_wasi::WasiCtx::new();
//! ctx.push_preopen_dir(".", "/");
//! let ctx = std::sync::Arc::new(std::sync::Mutex::new(ctx));
//!
//! let mut linker = wasm5::Linker::new();
//! wasm5_wasi::add_to_linker(&mut linker, ctx.clone());
//! ```

mod ctx;
mod errno;
mod snapshot;

pub use crate::ctx::WasiCtx;

use std::sync::{Arc, Mutex};

use wasm5::{FuncType, Linker, Memory, Slot, TrapCode, ValType};

const I32: ValType = ValType::I32;
const I64: ValType = ValType::I64;

/// Registers every supported `wasi_snapshot_preview1` import on `linker`,
/// dispatching each call against the shared `ctx`.
///
/// `ctx` is an `Arc<Mutex<_>>` rather than a bare `&mut WasiCtx` because
/// [`wasm5::linker::HostFunc`] closures must be `Fn + Send + Sync`: the
/// engine calls imports through a shared reference, so interior mutability
/// is how the host state gets mutated from inside one.
pub fn add_to_linker(linker: &mut Linker, ctx: Arc<Mutex<WasiCtx>>) {
    const MODULE: &str = "wasi_snapshot_preview1";

    // Most preview-1 calls address guest memory directly and trap with
    // `MemoryOutOfBounds` if the module has none; a few (`proc_exit`,
    // `fd_close`) take no pointers and must not require memory to exist.
    macro_rules! def {
        ($name:literal, ($($p:expr),* $(,)?) -> ($($r:expr),* $(,)?), |$c:ident, $m:ident, $args:ident| $body:expr) => {
            let ctx = ctx.clone();
            linker.define_func(
                MODULE,
                $name,
                FuncType::new([$($p),*], [$($r),*]),
                move |$args: &[Slot], $m: Option<&mut Memory>| -> Result<Vec<Slot>, TrapCode> {
                    let $c = &mut *ctx.lock().expect("wasi ctx mutex poisoned");
                    $body
                },
            );
        };
    }

    macro_rules! req_mem {
        ($mem:expr) => {
            $mem.ok_or(TrapCode::MemoryOutOfBounds)?
        };
    }

    def!("args_sizes_get", (I32, I32) -> (I32), |_c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::args_sizes_get(mem, p32(a, 0), p32(a, 1)).map(ret_errno)
    });
    def!("args_get", (I32, I32) -> (I32), |_c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::args_get(mem, p32(a, 0), p32(a, 1)).map(ret_errno)
    });
    def!("environ_sizes_get", (I32, I32) -> (I32), |_c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::environ_sizes_get(mem, p32(a, 0), p32(a, 1)).map(ret_errno)
    });
    def!("environ_get", (I32, I32) -> (I32), |_c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::environ_get(mem, p32(a, 0), p32(a, 1)).map(ret_errno)
    });
    def!("clock_time_get", (I32, I64, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::clock_time_get(c, mem, p32(a, 0), p32(a, 2)).map(ret_errno)
    });
    def!("proc_exit", (I32) -> (), |c, _mem, a| {
        snapshot::proc_exit(c, p32(a, 0)).map(|_| Vec::new())
    });
    def!("fd_close", (I32) -> (I32), |c, _mem, a| {
        snapshot::fd_close(c, p32(a, 0)).map(ret_errno)
    });
    def!("fd_write", (I32, I32, I32, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_write(c, mem, p32(a, 0), p32(a, 1), p32(a, 2), p32(a, 3)).map(ret_errno)
    });
    def!("fd_read", (I32, I32, I32, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_read(c, mem, p32(a, 0), p32(a, 1), p32(a, 2), p32(a, 3)).map(ret_errno)
    });
    def!("fd_seek", (I32, I64, I32, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_seek(c, mem, p32(a, 0), a[1].to_i64(), p32(a, 2), p32(a, 3)).map(ret_errno)
    });
    def!("fd_prestat_get", (I32, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_prestat_get(c, mem, p32(a, 0), p32(a, 1)).map(ret_errno)
    });
    def!("fd_prestat_dir_name", (I32, I32, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_prestat_dir_name(c, mem, p32(a, 0), p32(a, 1), p32(a, 2)).map(ret_errno)
    });
    def!("fd_fdstat_get", (I32, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_fdstat_get(c, mem, p32(a, 0), p32(a, 1)).map(ret_errno)
    });
    def!("fd_filestat_get", (I32, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_filestat_get(c, mem, p32(a, 0), p32(a, 1)).map(ret_errno)
    });
    // `dirflags` (arg 1) and `fs_rights_inheriting` (arg 6) are accepted for
    // ABI compatibility with real wasi-libc callers but unused: this host
    // has no symlinks to (not) follow and does not separately enforce
    // inherited rights on sub-opens.
    def!(
        "path_open",
        (I32, I32, I32, I32, I32, I64, I64, I32, I32) -> (I32),
        |c, mem, a| {
            let mem = req_mem!(mem);
            snapshot::path_open(
                c, mem,
                p32(a, 0),
                p32(a, 2),
                p32(a, 3),
                p32(a, 4),
                a[5].to_i64() as u64,
                p32(a, 7),
                p32(a, 8),
            )
            .map(ret_errno)
        }
    );
    def!("fd_readdir", (I32, I32, I32, I64, I32) -> (I32), |c, mem, a| {
        let mem = req_mem!(mem);
        snapshot::fd_readdir(c, mem, p32(a, 0), p32(a, 1), p32(a, 2), a[3].to_i64() as u64, p32(a, 4)).map(ret_errno)
    });
}

fn p32(args: &[Slot], idx: usize) -> u32 {
    args[idx].to_i32() as u32
}

fn ret_errno(errno: u32) -> Vec<Slot> {
    vec![Slot::from_i32(errno as i32)]
}
