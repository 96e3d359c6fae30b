use std::sync::{Arc, Mutex};

use wasm5::Linker;
use wasm5_wasi::WasiCtx;

#[test]
fn fd_write_round_trip_to_preopen() {
    let dir = std::env::temp_dir().join(format!("wasm5-wasi-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.txt");
    let file = std::fs::OpenOptions::new().create(true).write(true).truncate(true).open(&path).unwrap();

    let mut ctx = WasiCtx::new();
    let fd = ctx.push_preopen_file(file, false);
    assert_eq!(fd, 3, "the seed scenario writes to fd 3");
    let ctx = Arc::new(Mutex::new(ctx));

    let mut linker = Linker::new();
    wasm5_wasi::add_to_linker(&mut linker, ctx.clone());

    let wat = r#"
        (module
            (import "wasi_snapshot_preview1" "fd_write"
                (func $fd_write (param i32 i32 i32 i32) (result i32)))
            (memory (export "memory") 1)
            (data (i32.const 8) "Hello, WASI!")
            (func (export "_start")
                (i32.store (i32.const 0) (i32.const 8))
                (i32.store (i32.const 4) (i32.const 12))
                (call $fd_write
                    (i32.const 3)
                    (i32.const 0)
                    (i32.const 1)
                    (i32.const 20))
                drop))
    "#;
    let wasm = wat::parse_str(wat).unwrap();
    let mut instance = wasm5::instantiate(&wasm, &linker).unwrap();
    instance.call_export("_start", &[]).expect("no trap expected");

    drop(instance);
    assert_eq!(std::fs::read(&path).unwrap(), b"Hello, WASI!");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn path_open_rejects_escaping_the_preopen() {
    let dir = std::env::temp_dir().join(format!("wasm5-wasi-test-escape-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut ctx = WasiCtx::new();
    ctx.push_preopen_dir(&dir, "/");
    let ctx = Arc::new(Mutex::new(ctx));

    let mut linker = Linker::new();
    wasm5_wasi::add_to_linker(&mut linker, ctx.clone());

    let wat = r#"
        (module
            (import "wasi_snapshot_preview1" "path_open"
                (func $path_open (param i32 i32 i32 i32 i32 i64 i64 i32 i32) (result i32)))
            (memory (export "memory") 1)
            (data (i32.const 0) "../escape")
            (func (export "_start") (result i32)
                (call $path_open
                    (i32.const 3)
                    (i32.const 0)
                    (i32.const 0) (i32.const 9)
                    (i32.const 0)
                    (i64.const 0) (i64.const 0)
                    (i32.const 0)
                    (i32.const 100))))
    "#;
    let wasm = wat::parse_str(wat).unwrap();
    let mut instance = wasm5::instantiate(&wasm, &linker).unwrap();
    let results = instance.call_export("_start", &[]).unwrap();
    let errno = results[0].to_i32();
    assert_eq!(errno, 63, "expected errno::PERM (63) for a path escaping the preopen");

    std::fs::remove_dir_all(&dir).ok();
}
