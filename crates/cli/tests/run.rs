use std::path::PathBuf;

use assert_cmd::Command;

#[test]
fn runs_an_invoked_export_and_prints_its_result() {
    let wasm = write_fixture(
        "add",
        r#"
        (module
            (func (export "add") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.add))
        "#,
    );
    let assert = get_cmd().arg("--invoke").arg("add").arg(&wasm).arg("3").arg("4").assert();
    assert.success().stdout("7\n");
}

#[test]
fn defaults_to_the_start_export_and_exits_clean() {
    let wasm = write_fixture(
        "start",
        r#"
        (module
            (func (export "_start")))
        "#,
    );
    let assert = get_cmd().arg(&wasm).assert();
    assert.success();
}

#[test]
fn a_trap_exits_nonzero() {
    let wasm = write_fixture(
        "trap",
        r#"
        (module
            (func (export "_start") unreachable))
        "#,
    );
    let assert = get_cmd().arg(&wasm).assert();
    assert.failure();
}

fn write_fixture(name: &str, wat: &str) -> PathBuf {
    let wasm = wat::parse_str(wat).expect("malformed test wat");
    let path = std::env::temp_dir().join(format!("wasm5-cli-test-{name}-{}.wasm", std::process::id()));
    std::fs::write(&path, wasm).unwrap();
    path
}

fn get_cmd() -> Command {
    Command::cargo_bin("wasm5").expect("could not create wasm5 command")
}
