use jackc_bytecode::{compiler::Compiler, config::CompileConfig, instr};
use std::fs::File;

const INPUT_PATH: &str = "./tests/compiler/inputs";

macro_rules! compile_test {
    ($test_name:ident, $expected:expr) => {
        #[test]
        fn $test_name() {
            // Open input file, which is a single Jack class.
            let path = format!("{}/{}.jack", INPUT_PATH, stringify!($test_name));
            let infile = File::open(path).unwrap();

            // Compile to VM code, ensuring no errors.
            let compiler = Compiler::new(infile, CompileConfig::default());
            let compile_result = compiler.compile();
            assert!(compile_result.err.is_none(), "{:?}", compile_result.err);

            let mut output = String::from("\n");
            output.push_str(&instr::prog_to_string(&compile_result.program));
            assert_eq!(output, $expected);
        }
    };
}

compile_test! {
    main_round_trip,
    r"
function Main.main 0
push constant 0
return
"
}

compile_test! {
    let_add,
    r"
function Main.main 1
push constant 1
push constant 2
add
pop local 0
push constant 0
return
"
}

compile_test! {
    if_no_else,
    r"
function Main.sign 0
push argument 0
push constant 0
lt
not
if-goto IF_ELSE_0
push constant 1
neg
return
goto IF_END_1
label IF_ELSE_0
label IF_END_1
push constant 1
return
"
}

compile_test! {
    method_on_var,
    r"
function Main.main 1
push local 0
call Foo.run 1
pop temp 0
push constant 0
return
"
}

compile_test! {
    method_on_field,
    r"
function Main.go 0
push argument 0
pop pointer 0
push this 0
call Foo.run 1
pop temp 0
push constant 0
return
"
}

compile_test! {
    point,
    r"
function Point.new 0
push constant 2
call Memory.alloc 1
pop pointer 0
push argument 0
pop this 0
push argument 1
pop this 1
push static 0
push constant 1
add
pop static 0
push pointer 0
return
function Point.getx 0
push argument 0
pop pointer 0
push this 0
return
function Point.move 0
push argument 0
pop pointer 0
push this 0
push argument 1
add
pop this 0
push pointer 0
call Point.draw 1
pop temp 0
push constant 0
return
"
}

compile_test! {
    arrays,
    r"
function Main.main 2
push constant 3
call Array.new 1
pop local 0
push local 1
push local 0
add
push local 1
push constant 1
add
push local 0
add
pop pointer 1
push that 0
pop temp 0
pop pointer 1
push temp 0
pop that 0
push constant 0
return
"
}

compile_test! {
    strings,
    r"
function Main.main 0
push constant 2
call String.new 1
push constant 72
call String.appendChar 2
push constant 105
call String.appendChar 2
call Output.printString 1
pop temp 0
push constant 0
return
"
}

compile_test! {
    nested_labels,
    r"
function Main.main 1
label WHILE_EXP_0
push local 0
push constant 10
lt
not
if-goto WHILE_END_1
push local 0
push constant 5
eq
not
if-goto IF_ELSE_2
push local 0
push constant 2
add
pop local 0
goto IF_END_3
label IF_ELSE_2
push local 0
push constant 1
add
pop local 0
label IF_END_3
goto WHILE_EXP_0
label WHILE_END_1
push constant 0
return
"
}

compile_test! {
    labels_across_subs,
    r"
function Main.f 0
push constant 1
neg
not
if-goto IF_ELSE_0
goto IF_END_1
label IF_ELSE_0
label IF_END_1
push constant 0
return
function Main.g 0
push constant 0
not
if-goto IF_ELSE_2
goto IF_END_3
label IF_ELSE_2
label IF_END_3
push constant 0
return
"
}

compile_test! {
    keyword_consts,
    r"
function Main.main 2
push constant 0
not
pop local 0
push constant 1
neg
pop local 0
push constant 0
pop local 1
push constant 2
push constant 2
call Math.divide 2
neg
pop local 0
push constant 0
return
"
}

compile_test! {
    shadowing,
    r"
function Main.f 0
push argument 0
pop pointer 0
push argument 1
return
"
}

#[test]
fn header_comment() {
    let src = "class Main { function void main() { return; } }";
    let conf = CompileConfig {
        header_comment: true,
        ..CompileConfig::default()
    };

    let result = Compiler::new(src.as_bytes(), conf).compile();
    let program = result.into_result().unwrap();

    assert_eq!(
        instr::prog_to_string(&program),
        "// Compiled Main.jack\nfunction Main.main 0\npush constant 0\nreturn\n"
    );
}

#[test]
fn class_name_reported() {
    let path = format!("{}/point.jack", INPUT_PATH);
    let result = Compiler::new(File::open(path).unwrap(), CompileConfig::default()).compile();

    assert_eq!(result.class_name.as_deref(), Some("Point"));
}
