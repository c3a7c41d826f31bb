use quill::ast::{Expression, Statement};
use quill::lexer::Lexer;
use quill::parser::Parser;

fn parse(input: &str) -> Vec<Statement> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    assert!(
        parser.errors.is_empty(),
        "parser errors for {:?}: {:?}",
        input,
        parser.errors
    );
    program
}

fn parse_to_string(input: &str) -> String {
    parse(input)
        .iter()
        .map(|statement| statement.to_string())
        .collect()
}

fn parse_errors(input: &str) -> Vec<String> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse_program();
    parser.errors.into_iter().map(|e| e.message).collect()
}

fn single_expression(input: &str) -> Expression {
    let program = parse(input);
    assert_eq!(program.len(), 1, "expected one statement for {:?}", input);
    match program.into_iter().next().unwrap() {
        Statement::Expression(expression) => expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn let_statements() {
    let program = parse("let x = 5; let y = true; let foobar = y;");
    assert_eq!(program.len(), 3);
    assert_eq!(
        program[0],
        Statement::Let {
            name: "x".to_string(),
            value: Expression::Integer(5),
        }
    );
    assert_eq!(
        program[1],
        Statement::Let {
            name: "y".to_string(),
            value: Expression::Boolean(true),
        }
    );
    assert_eq!(
        program[2],
        Statement::Let {
            name: "foobar".to_string(),
            value: Expression::Identifier("y".to_string()),
        }
    );
}

#[test]
fn return_statements() {
    let program = parse("return 5; return foobar;");
    assert_eq!(
        program,
        vec![
            Statement::Return(Expression::Integer(5)),
            Statement::Return(Expression::Identifier("foobar".to_string())),
        ]
    );
}

#[test]
fn semicolons_are_optional() {
    assert_eq!(parse("5").len(), 1);
    assert_eq!(parse("let x = 5").len(), 1);
    assert_eq!(parse("return 5").len(), 1);
}

#[test]
fn identifier_and_literal_expressions() {
    assert_eq!(
        single_expression("foobar;"),
        Expression::Identifier("foobar".to_string())
    );
    assert_eq!(single_expression("5;"), Expression::Integer(5));
    assert_eq!(single_expression("true;"), Expression::Boolean(true));
    assert_eq!(
        single_expression("\"hello world\";"),
        Expression::String("hello world".to_string())
    );
}

#[test]
fn operator_precedence_printing() {
    let tests = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true", "true"),
        ("false", "false"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (input, expected) in tests {
        assert_eq!(parse_to_string(input), expected, "input: {:?}", input);
    }
}

#[test]
fn let_statement_printing() {
    assert_eq!(
        parse_to_string("let myVar = anotherVar;"),
        "let myVar = anotherVar;"
    );
}

#[test]
fn if_expression() {
    let expression = single_expression("if (x < y) { x }");
    match expression {
        Expression::If { condition, consequence, alternative } => {
            assert_eq!(condition.to_string(), "(x < y)");
            assert_eq!(consequence.statements.len(), 1);
            assert!(alternative.is_none());
        }
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn if_else_expression_printing() {
    assert_eq!(
        parse_to_string("if (x < y) { x } else { y }"),
        "if (x < y) { x } else { y }"
    );
}

#[test]
fn function_literal() {
    let expression = single_expression("fn(x, y) { x + y; }");
    match expression {
        Expression::Function { params, body } => {
            assert_eq!(params, vec!["x".to_string(), "y".to_string()]);
            assert_eq!(body.statements.len(), 1);
            assert_eq!(body.to_string(), "(x + y)");
        }
        other => panic!("expected function literal, got {:?}", other),
    }
}

#[test]
fn function_parameter_lists() {
    let tests = [
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];

    for (input, expected) in tests {
        match single_expression(input) {
            Expression::Function { params, .. } => {
                assert_eq!(params, expected, "input: {:?}", input);
            }
            other => panic!("expected function literal, got {:?}", other),
        }
    }
}

#[test]
fn call_expression() {
    let expression = single_expression("add(1, 2 * 3, 4 + 5);");
    match expression {
        Expression::Call { function, arguments } => {
            assert_eq!(function.to_string(), "add");
            assert_eq!(arguments.len(), 3);
            assert_eq!(arguments[0], Expression::Integer(1));
            assert_eq!(arguments[1].to_string(), "(2 * 3)");
            assert_eq!(arguments[2].to_string(), "(4 + 5)");
        }
        other => panic!("expected call expression, got {:?}", other),
    }
}

#[test]
fn array_literal() {
    let expression = single_expression("[1, 2 * 2, 3 + 3]");
    match expression {
        Expression::Array(elements) => {
            assert_eq!(elements.len(), 3);
            assert_eq!(elements[0], Expression::Integer(1));
            assert_eq!(elements[1].to_string(), "(2 * 2)");
            assert_eq!(elements[2].to_string(), "(3 + 3)");
        }
        other => panic!("expected array literal, got {:?}", other),
    }
}

#[test]
fn empty_array_literal() {
    assert_eq!(single_expression("[]"), Expression::Array(vec![]));
}

#[test]
fn index_expression() {
    let expression = single_expression("myArray[1 + 1]");
    match expression {
        Expression::Index { object, index } => {
            assert_eq!(object.to_string(), "myArray");
            assert_eq!(index.to_string(), "(1 + 1)");
        }
        other => panic!("expected index expression, got {:?}", other),
    }
}

#[test]
fn hash_literal_with_string_keys() {
    let expression = single_expression("{\"one\": 1, \"two\": 2, \"three\": 3}");
    match expression {
        Expression::Hash(pairs) => {
            assert_eq!(pairs.len(), 3);
            assert_eq!(pairs[0].0, Expression::String("one".to_string()));
            assert_eq!(pairs[0].1, Expression::Integer(1));
            assert_eq!(pairs[2].0, Expression::String("three".to_string()));
            assert_eq!(pairs[2].1, Expression::Integer(3));
        }
        other => panic!("expected hash literal, got {:?}", other),
    }
}

#[test]
fn empty_hash_literal() {
    assert_eq!(single_expression("{}"), Expression::Hash(vec![]));
}

#[test]
fn hash_literal_with_expression_values() {
    let expression = single_expression("{\"one\": 0 + 1, \"two\": 10 - 8, \"three\": 15 / 5}");
    match expression {
        Expression::Hash(pairs) => {
            assert_eq!(pairs[0].1.to_string(), "(0 + 1)");
            assert_eq!(pairs[1].1.to_string(), "(10 - 8)");
            assert_eq!(pairs[2].1.to_string(), "(15 / 5)");
        }
        other => panic!("expected hash literal, got {:?}", other),
    }
}

#[test]
fn missing_token_is_recorded() {
    let errors = parse_errors("let x 5;");
    assert_eq!(errors[0], "expected next token to be =, got INT instead");
}

#[test]
fn missing_prefix_parselet_is_recorded() {
    let errors = parse_errors("5 +");
    assert_eq!(errors[0], "no prefix parse function for EOF found");
}

#[test]
fn integer_overflow_is_recorded() {
    let errors = parse_errors("92233720368547758070");
    assert_eq!(
        errors[0],
        "could not parse 92233720368547758070 as integer"
    );
}

#[test]
fn errors_accumulate_instead_of_aborting() {
    let errors = parse_errors("let x 5; let y 10;");
    assert!(errors.len() >= 2, "errors: {:?}", errors);
    assert_eq!(errors[0], "expected next token to be =, got INT instead");
}

#[test]
fn parse_errors_carry_spans() {
    let lexer = Lexer::new("let x 5;");
    let mut parser = Parser::new(lexer);
    parser.parse_program();
    // The offending token is `5` at bytes 6..7.
    assert_eq!(parser.errors[0].span.start, 6);
    assert_eq!(parser.errors[0].span.end, 7);
}
