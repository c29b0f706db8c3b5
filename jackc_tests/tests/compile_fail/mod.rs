use jackc_bytecode::{compiler::Compiler, config::CompileConfig};
use jackc_err::compile_err::ErrKind;
use std::fs::File;

macro_rules! compile_fail_test {
    ($test_name:ident, $kind:expr, $line:expr) => {
        #[test]
        fn $test_name() {
            let path = format!(
                "./tests/compile_fail/inputs/{}.jack",
                stringify!($test_name)
            );
            let infile = File::open(&path).unwrap();

            let result = Compiler::new(infile, CompileConfig::default()).compile();
            assert_eq!(true, result.has_err());

            let err = result.err.unwrap();
            assert_eq!(err.kind(), $kind, "{}", err);
            assert_eq!(err.line(), $line, "{}", err);
        }
    };
}

compile_fail_test!(unknown_symbol, ErrKind::UnknownSymbol, 4);
compile_fail_test!(unknown_in_expr, ErrKind::UnknownSymbol, 3);
compile_fail_test!(duplicate_local, ErrKind::DuplicateDeclaration, 4);
compile_fail_test!(duplicate_class_var, ErrKind::DuplicateDeclaration, 3);
compile_fail_test!(duplicate_param, ErrKind::DuplicateDeclaration, 2);
compile_fail_test!(missing_semicolon, ErrKind::UnexpectedToken, 4);
compile_fail_test!(invalid_type, ErrKind::UnexpectedToken, 2);
compile_fail_test!(unterminated_string, ErrKind::Lexical, 3);
compile_fail_test!(unterminated_comment, ErrKind::Lexical, 2);
compile_fail_test!(int_out_of_range, ErrKind::Lexical, 3);
compile_fail_test!(bare_callee, ErrKind::InvalidCallShape, 3);
compile_fail_test!(primitive_receiver, ErrKind::InvalidCallShape, 4);
compile_fail_test!(trailing_tokens, ErrKind::UnexpectedToken, 3);
compile_fail_test!(missing_class, ErrKind::UnexpectedToken, 1);
compile_fail_test!(empty_unit, ErrKind::UnexpectedToken, 1);

#[test]
fn partial_output_kept() {
    let src = "class Main { function void main() { var int x; let x = 1; let q = 2; return; } }";
    let result = Compiler::new(src.as_bytes(), CompileConfig::default()).compile();

    // Output emitted before the failing statement is still available.
    assert!(result.has_err());
    assert_eq!(result.program.len(), 3);
    assert!(result.into_result().is_err());
}

#[test]
fn error_message() {
    let src = "class Main {\n  function void main() {\n    do x.y(;\n  }\n}\n";
    let result = Compiler::new(src.as_bytes(), CompileConfig::default()).compile();

    let msg = result.err.unwrap().to_string();
    assert_eq!(msg, "[Line 3:11] A term cannot start with ';'");
}
