use std::time::{Duration, Instant};

use lumen::{
    ast::{Expr, LambdaBody, Literal, Statement},
    error::ParseError,
    parse,
};

fn single_statement(source: &str) -> Statement {
    let mut program = parse(source).unwrap_or_else(|e| panic!("Failed to parse {source:?}: {e}"));
    assert_eq!(program.statements.len(), 1, "Expected one statement in {source:?}");
    program.statements.remove(0)
}

#[test]
fn separators_are_optional() {
    assert_eq!(parse("let a := 1; let b := 2;").unwrap().statements.len(), 2);
    assert_eq!(parse("let a := 1\nlet b := 2").unwrap().statements.len(), 2);
    assert_eq!(parse(";;\n;").unwrap().statements.len(), 0);
}

#[test]
fn statements_carry_their_line() {
    let Statement::Initialization { name, line, .. } = single_statement("\n\nlet x := 1") else {
        panic!("Expected an initialization");
    };

    assert_eq!(name, "x");
    assert_eq!(line, 3);
}

#[test]
fn else_attaches_to_the_nearest_if() {
    let Statement::SingleConditional { body, .. } = single_statement("if (a) if (b) x else y")
    else {
        panic!("Expected the outer if to have no else");
    };

    assert!(matches!(*body, Statement::DoubleConditional { .. }));
}

#[test]
fn trailing_expression_becomes_the_block_result() {
    let Statement::Block(block) = single_statement("{ let a := 1\n a }") else {
        panic!("Expected a block");
    };
    assert_eq!(block.statements.len(), 1);
    assert!(block.yields_value());

    let Statement::Block(block) = single_statement("{ a\n let b := 1 }") else {
        panic!("Expected a block");
    };
    assert_eq!(block.statements.len(), 2);
    assert!(!block.yields_value());
}

#[test]
fn lambda_forms() {
    let Statement::Expression(Expr::Lambda { params, body, .. }) = single_statement("x -> x + 1")
    else {
        panic!("Expected a lambda");
    };
    assert_eq!(params, ["x"]);
    assert!(matches!(*body, LambdaBody::Expression(Expr::BinaryOp { .. })));

    let Statement::Expression(Expr::Lambda { params, body, .. }) =
        single_statement("(a, b) -> { return a }")
    else {
        panic!("Expected a lambda");
    };
    assert_eq!(params, ["a", "b"]);
    assert!(matches!(*body, LambdaBody::Block(_)));

    assert!(matches!(single_statement("() -> 1"),
                     Statement::Expression(Expr::Lambda { ref params, .. }) if params.is_empty()));
}

#[test]
fn value_block_is_an_expression() {
    let Statement::Initialization { value, .. } = single_statement("let a := { let b := 1; b }")
    else {
        panic!("Expected an initialization");
    };

    assert!(matches!(value, Expr::Block { .. }));
}

#[test]
fn calls_take_expressions() {
    let Statement::Expression(Expr::Call { name, arguments, .. }) =
        single_statement("f(1 + 2, [3], g(), x -> x)")
    else {
        panic!("Expected a call");
    };

    assert_eq!(name, "f");
    assert_eq!(arguments.len(), 4);
    assert!(matches!(arguments[3], Expr::Lambda { .. }));
}

#[test]
fn unclosed_group_reports_end_of_input() {
    let error = parse("let x := (1 + 2").unwrap_err();

    let ParseError::UnexpectedEndOfInput { index, line, trace } = error else {
        panic!("Expected an end of input error, got {error:?}");
    };
    assert_eq!(index, 7);
    assert_eq!(line, 1);
    assert!(trace.contains(&"let"));
    assert_eq!(trace.last(), Some(&"program"));
}

#[test]
fn stray_token_is_reported_by_index() {
    let error = parse("print(1)\nprint(2))").unwrap_err();

    let ParseError::UnexpectedToken { token, index, line, .. } = error else {
        panic!("Expected an unexpected token error, got {error:?}");
    };
    assert_eq!(token, ")");
    assert_eq!(index, 8);
    assert_eq!(line, 2);
}

#[test]
fn furthest_failure_wins() {
    // `if` gets past its condition before failing; the other alternatives
    // stop at the keyword.
    let error = parse("if (true) ]").unwrap_err();

    assert_eq!(error.index(), 4);
    assert!(error.to_string().contains("']'"));
}

#[test]
fn invalid_character_is_rejected() {
    assert!(matches!(parse("let x := 1 $"), Err(ParseError::InvalidCharacter { ref text, line: 1 }) if text == "$"));
    assert!(matches!(parse("print('open"), Err(ParseError::InvalidCharacter { .. })));
}

#[test]
fn duplicate_parameters_are_rejected() {
    assert!(matches!(parse("let f := (a, b, a) -> a"),
                     Err(ParseError::DuplicateParameter { ref name, .. }) if name == "a"));
}

#[test]
fn incomplete_operator_expressions_fail() {
    for source in ["1 +", "* 2", "1 + * 2", "not", "(1 + 2", "[1, 2", "f(1,"] {
        assert!(parse(source).is_err(), "{source:?} should not parse");
    }
}

#[test]
fn redundant_parentheses_leave_the_bare_value() {
    assert!(matches!(single_statement("(((( (true) ))))"),
                     Statement::Expression(Expr::Literal { value: Literal::Bool(true), .. })));
}

#[test]
fn deeply_nested_invalid_block_fails_quickly() {
    let depth = 64;
    let source = format!("{}){}", "{".repeat(depth), "}".repeat(depth));

    let start = Instant::now();
    let error = parse(&source).unwrap_err();

    assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());
    assert_eq!(error.index(), depth);
}

#[test]
fn programs_print_back_as_source() {
    let source = "let f := (a, b) -> { if (a < b) return a\n b * 2 + 1 }\n\
                  for (let x : [1, 'two']) println(x)\n\
                  loop (not done) { }\n\
                  let g := x -> y := -x ^ 2";
    let printed = parse(source).unwrap().to_string();

    assert_eq!(printed,
               "let f := (a, b) -> { if (a < b) return a; (b * 2) + 1 }\n\
                for (let x : [1, 'two']) println(x)\n\
                loop (not done) { }\n\
                let g := x -> y := (-x) ^ 2");
    assert_eq!(parse(&printed).unwrap().to_string(), printed);
}

/// Small deterministic generator so the garbage inputs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> usize {
        self.0 = self.0
                     .wrapping_mul(6_364_136_223_846_793_005)
                     .wrapping_add(1_442_695_040_888_963_407);
        usize::try_from(self.0 >> 33).unwrap()
    }
}

#[test]
fn garbage_input_never_panics() {
    const FRAGMENTS: &[&str] = &["let", "x", "y", ":=", "(", ")", "{", "}", "[", "]", ",", ";", "->",
                                 "+", "-", "*", "/", "^", "=", "<", ">=", "not", "and", "or",
                                 "if", "else", "for", "loop", "return", ":", "1", "2.5", "'s'",
                                 "true", "\n"];
    let mut rng = Lcg(0x5eed);

    for _ in 0..2_000 {
        let length = rng.next() % 24;
        let source = (0..length).map(|_| FRAGMENTS[rng.next() % FRAGMENTS.len()])
                                .collect::<Vec<_>>()
                                .join(" ");

        // Either outcome is fine; only a panic fails the test.
        let _ = parse(&source);
    }
}
