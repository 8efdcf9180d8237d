use std::{error::Error, fs};

use lumen::{
    error::{ParseError, RuntimeError},
    run_with_output,
};
use walkdir::WalkDir;

#[test]
fn scripts_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "lum"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                               panic!("Failed to read {expected_path:?}: {e}")
                                                           });

        count += 1;
        match run(&source, true) {
            Ok(output) => assert_eq!(output, expected, "Output of {path:?} differs"),
            Err(e) => panic!("Script {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn run(source: &str, prelude: bool) -> Result<String, Box<dyn Error>> {
    let out = run_with_output(source, prelude, Vec::<u8>::new())?;
    Ok(String::from_utf8(out)?)
}

fn assert_output(src: &str, expected: &str) {
    match run(src, true) {
        Ok(output) => assert_eq!(output, expected, "Unexpected output of:\n{src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src, true) {
        Ok(_) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(e) => e.downcast_ref::<RuntimeError>()
                   .unwrap_or_else(|| panic!("Expected a runtime error, got: {e}"))
                   .clone(),
    }
}

#[test]
fn arithmetic_precedence() {
    assert_output("println(1 + 2 * 3)", "7\n");
    assert_output("println(2 ^ 3 ^ 2)", "512\n");
    assert_output("println(-2 - -2)", "0\n");
    assert_output("println(10 - 4 - 3)", "3\n");
    assert_output("println(2 * (3 + 4))", "14\n");
    assert_output("println(1 / 0)", "inf\n");
}

#[test]
fn logic_and_grouping() {
    assert_output("println(not true or true)", "true\n");
    assert_output("println(not (true or true))", "false\n");
    assert_output("println(((1 + 2)) = 3)", "true\n");
    assert_output("println(1 < 2 = true)", "true\n");
    assert_output("println(false and x)", "false\n");
    assert_output("println(true or x)", "true\n");
}

#[test]
fn comparisons_print_booleans() {
    assert_output("println(3 < 5)\nprintln(3 >= 5)", "true\nfalse\n");
    assert_output("println(2 <= 2)\nprintln(2 > 2)", "true\nfalse\n");
}

#[test]
fn equality_is_structural_and_tolerant() {
    assert_output("println([1, [2, 'a']] = [1, [2, 'a']])", "true\n");
    assert_output("println([1, 2] = [1, 2, 3])", "false\n");
    assert_output("println(0 = 0)", "true\n");
    assert_output("println(1 = 1.0000000001)", "true\n");
    assert_output("println(1 = 1.001)", "false\n");
    assert_output("println(1 = '1')", "false\n");
}

#[test]
fn inner_declarations_do_not_escape_their_block() {
    assert!(matches!(runtime_error("{ let inner := 1 }\nprintln(inner)"),
                     RuntimeError::UnknownVariable { .. }));
    assert_output("let x := 1\n{ let x := 2 }\nprintln(x)", "1\n");
}

#[test]
fn assignment_reaches_the_nearest_binding() {
    assert_output("let x := 1\n{ { x := 5 } }\nprintln(x)", "5\n");
    assert_output("let x := 1\nlet y := x := 3\nprintln(y + x)", "6\n");
}

#[test]
fn lambdas_see_the_callers_frames() {
    assert_output("let show := () -> println(secret)\n{ let secret := 42; show() }",
                  "42\n");
}

#[test]
fn return_unwinds_through_loops() {
    let src = "
        let find := (list, target) -> {
            for (let item : list)
                if (item = target) return 'found'
            'missing'
        }
        println(find([1, 2, 3], 2))
        println(find([1, 2, 3], 9))
    ";
    assert_output(src, "found\nmissing\n");

    let src = "
        let first_over := (limit) -> {
            let i := 0
            loop (true) {
                if (i * i > limit) return i
                i := i + 1
            }
        }
        println(first_over(50))
    ";
    assert_output(src, "8\n");
}

#[test]
fn block_without_value_returns_null() {
    assert_output("let f := () -> { let a := 1 }\nprintln(f())", "null\n");
}

#[test]
fn top_level_return_stops_the_program() {
    assert_output("println(1)\nreturn 0\nprintln(2)", "1\n");
}

#[test]
fn lists_are_shared_between_aliases() {
    assert_output("let list := [1, 2, 3]\nset(push(list, 4), 0, 99)\nprintln(list)",
                  "[ 99, 2, 3, 4 ]\n");
    assert_output("let a := []\nlet b := [a, a]\npush(a, 1)\nprintln(b)",
                  "[ [ 1 ], [ 1 ] ]\n");
}

#[test]
fn iteration_uses_a_snapshot() {
    let src = "
        let list := [1, 2]
        for (let x : list) push(list, x)
        println(list)
    ";
    assert_output(src, "[ 1, 2, 1, 2 ]\n");
    assert_output("for (let c : 'abc') print(c)\nprintln()", "abc\n");
    assert_output("for (let x : []) print(x)\nlet x := 1\nprintln(x)", "1\n");
}

#[test]
fn self_containing_list_prints_with_a_cutoff() {
    let output = run("let a := []\npush(a, a)\nprintln(a)", false).unwrap();

    assert!(output.contains("..."));
}

#[test]
fn recursion() {
    assert_output("let fac := n -> { if (n = 0) return 1\nreturn n * fac(n - 1) }\nprintln(fac(5))",
                  "120\n");
    assert_output("let fib := n -> { if (n < 2) return n\nfib(n - 1) + fib(n - 2) }\nprintln(fib(15))",
                  "610\n");
}

#[test]
fn trailing_expression_may_share_a_line_with_return() {
    assert_output("let fac := n -> { if(n <= 2) return n  n * fac(n - 1) }\nprint(fac(5))",
                  "120");
}

#[test]
fn redundant_parentheses_collapse() {
    assert_output("println((((( (true) )))))", "true\n");
    assert_output("println(not (((( (false) )))))", "true\n");
}

#[test]
fn prelude_can_be_shadowed_or_skipped() {
    assert_output("let range := 3\nprintln(range)", "3\n");
    assert!(matches!(run("range(0, 3)", false)
                         .unwrap_err()
                         .downcast_ref::<RuntimeError>(),
                     Some(RuntimeError::UnknownVariable { .. })));
}

#[test]
fn natives_are_values() {
    assert_output("println(get)", "get(list, idx)\n");
    assert_output("let p := println\np('via alias')", "via alias\n");
    assert_output("println(x -> x)", "λ(x)\n");
}

#[test]
fn unknown_variable_is_error() {
    assert!(matches!(runtime_error("print(y)"), RuntimeError::UnknownVariable { .. }));
    assert!(matches!(runtime_error("y := 1"), RuntimeError::UnknownVariable { .. }));
    assert!(matches!(runtime_error("nothing(1)"), RuntimeError::UnknownVariable { .. }));
}

#[test]
fn redeclaration_in_the_same_frame_is_error() {
    assert!(matches!(runtime_error("let x := 1\nlet x := 2"),
                     RuntimeError::AlreadyDefined { line: 2, .. }));
    assert!(matches!(runtime_error("let x := 1\nfor (let x : [1]) print(x)"),
                     RuntimeError::AlreadyDefined { .. }));
}

#[test]
fn conditions_must_be_booleans() {
    assert!(matches!(runtime_error("if (1) println(1)"), RuntimeError::ExpectedBoolean { .. }));
    assert!(matches!(runtime_error("loop ('yes') println(1)"),
                     RuntimeError::ExpectedBoolean { .. }));
    assert!(matches!(runtime_error("println(not 1)"), RuntimeError::ExpectedBoolean { .. }));
}

#[test]
fn arity_is_checked() {
    assert!(matches!(runtime_error("let f := (a, b) -> a + b\nf(1)"),
                     RuntimeError::ArgumentCountMismatch { found: 1, .. }));
    assert!(matches!(runtime_error("len()"), RuntimeError::ArgumentCountMismatch { found: 0, .. }));
    assert!(matches!(runtime_error("println(1, 2)"),
                     RuntimeError::ArgumentCountMismatch { found: 2, .. }));
}

#[test]
fn operand_types_are_checked() {
    assert!(matches!(runtime_error("println(1 + 'a')"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("println([1] < [2])"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("println(-'a')"), RuntimeError::ExpectedNumber { .. }));
    assert!(matches!(runtime_error("let x := 1\nx()"), RuntimeError::NotCallable { .. }));
    assert!(matches!(runtime_error("for (let x : 5) print(x)"), RuntimeError::NotIterable { .. }));
}

#[test]
fn index_errors() {
    assert!(matches!(runtime_error("get([1], 1)"),
                     RuntimeError::IndexOutOfBounds { len: 1, found: 1, .. }));
    assert!(matches!(runtime_error("get([1], -1)"), RuntimeError::InvalidIndex { .. }));
    assert!(matches!(runtime_error("set([1], 0.5, 2)"), RuntimeError::InvalidIndex { .. }));
}

#[test]
fn oversized_repeat_is_an_evaluation_error() {
    assert!(matches!(runtime_error("let l := repeat(1000000000000000)"),
                     RuntimeError::InvalidArgument { line: 1, .. }));
}

#[test]
fn valueless_block_is_not_an_expression() {
    let error = run("println({ let a := 1 })", true).unwrap_err();

    assert!(error.downcast_ref::<ParseError>().is_some());
}

#[test]
fn syntax_error_prevents_any_output() {
    let error = run("println(1)\nlet := 2", true).unwrap_err();

    assert!(error.downcast_ref::<ParseError>().is_some());
}
