//! End-to-end scenarios exercising the full `bytes -> validate -> compile ->
//! execute` pipeline through the public API only.

use wasm5::{Error, Linker, Slot, TrapCode};

fn run(wat: &str, func: &str, args: &[Slot]) -> Result<Vec<Slot>, Error> {
    let wasm = wat::parse_str(wat).expect("malformed test wat");
    let linker = Linker::new();
    let mut instance = wasm5::instantiate(&wasm, &linker).expect("instantiate failed");
    instance.call_export(func, args)
}

#[test]
fn arithmetic_correctness() {
    let wat = r#"
        (module
            (func (export "add") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.add))
    "#;
    let results = run(wat, "add", &[Slot::from_i32(3), Slot::from_i32(4)]).unwrap();
    assert_eq!(results, vec![Slot::from_i32(7)]);
}

#[test]
fn control_flow_factorial() {
    let wat = r#"
        (module
            (func (export "fact") (param $n i32) (result i32)
                (local $acc i32)
                (local.set $acc (i32.const 1))
                (block $done
                    (loop $again
                        (br_if $done (i32.eqz (local.get $n)))
                        (local.set $acc (i32.mul (local.get $acc) (local.get $n)))
                        (local.set $n (i32.sub (local.get $n) (i32.const 1)))
                        (br $again)))
                (local.get $acc)))
    "#;
    let results = run(wat, "fact", &[Slot::from_i32(10)]).unwrap();
    assert_eq!(results, vec![Slot::from_i32(3_628_800)]);
}

#[test]
fn trap_on_divide_by_zero() {
    let wat = r#"
        (module
            (func (export "div_s") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.div_s))
    "#;
    let err = run(wat, "div_s", &[Slot::from_i32(1), Slot::from_i32(0)]).unwrap_err();
    match err {
        Error::Trap(code) => assert_eq!(code, TrapCode::DivisionByZero),
        other => panic!("expected a trap, got {other:?}"),
    }
}

#[test]
fn unreachable_after_br_validates_and_evaluates() {
    // The `i32.add` after the unconditional `br` is dead code: the validator
    // must accept it under the polymorphic-unreachable typing rule rather
    // than rejecting it as a stack-height mismatch.
    let wat = r#"
        (module
            (func (export "run") (result i32)
                (block (result i32)
                    (br 0 (i32.const 10))
                    (i32.add (i32.const 5) (i32.const 2)))))
    "#;
    let results = run(wat, "run", &[]).unwrap();
    assert_eq!(results, vec![Slot::from_i32(10)]);
}

#[test]
fn indirect_call_type_mismatch_traps() {
    let wat = r#"
        (module
            (type $i_to_i (func (param i32) (result i32)))
            (type $f_to_f (func (param f32) (result f32)))
            (func $f0 (type $i_to_i) (param i32) (result i32) local.get 0)
            (func $f1 (type $f_to_f) (param f32) (result f32) local.get 0)
            (table funcref (elem $f0 $f1))
            (func (export "call_one") (param i32) (result i32)
                (call_indirect (type $i_to_i) (local.get 0) (i32.const 1))))
    "#;
    let err = run(wat, "call_one", &[Slot::from_i32(1)]).unwrap_err();
    match err {
        Error::Trap(code) => assert_eq!(code, TrapCode::IndirectCallTypeMismatch),
        other => panic!("expected a trap, got {other:?}"),
    }
}
