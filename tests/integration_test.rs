// Integration tests for the scrawl front end

use scrawl::config::Config;
use scrawl::parser::ast::{AddOp, AstNode, MulOp, NodeKind, SourceLocation};
use scrawl::parser::lexer::{LexError, Lexer, Symbol};
use scrawl::parser::{parse, ParseError, Parser};
use scrawl::printer::render;
use scrawl::trace::RecordingTrace;

#[test]
fn test_representative_program_round_trip() {
    let source = r#"
        var limit = 10;
        if limit > 0 {
            while limit > 0 {
                limit = limit - 1;
            }
        }
        fn add(a, b) {
            return a + b;
        }
        print add(limit, 2);
    "#;

    let mut parser = Parser::new(source).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");

    assert_eq!(
        render(&program),
        concat!(
            "(block ",
            "(decl limit (num 10)) ",
            "(if (bool (id limit) > (num 0)) ",
            "(block (while (bool (id limit) > (num 0)) ",
            "(block (assignment limit (logOp (id limit) - (num 1))))))) ",
            "(func add a b (block (return (logOp (id a) + (id b))))) ",
            "(print (call add (id limit) (num 2))))"
        )
    );
}

#[test]
fn test_render_is_stable_across_parses() {
    let source = r#"
        fn fib(n) {
            if n < 2 { return n; }
            return fib(n - 1) + fib(n - 2);
        }
        var i = 0;
        while not (i >= 10) or false {
            print fib(i);
            i = i + 1;
            continue;
        }
    "#;

    let first = render(&parse(source).expect("Parsing failed"));
    let second = render(&parse(source).expect("Parsing failed"));
    assert_eq!(first, second);
}

#[test]
fn test_statement_count_matches_source() {
    let source: String = (0..50).map(|i| format!("print {};\n", i)).collect();
    let program = parse(&source).expect("Parsing failed");

    let statements = program.statements();
    assert_eq!(statements.len(), 50);
    for (i, statement) in statements.iter().enumerate() {
        match statement {
            AstNode::PrintStatement { expr, location } => {
                assert!(matches!(expr.as_ref(), AstNode::NumberLiteral(v, _) if *v == i.to_string()));
                assert_eq!(location.line, i + 1);
            }
            other => panic!("Expected print statement, got {:?}", other),
        }
    }
}

#[test]
fn test_precedence_shapes() {
    let program = parse("print 1 + 2 * 3; print 1 * 2 + 3;").expect("Parsing failed");
    let statements = program.statements();

    match &statements[0] {
        AstNode::PrintStatement { expr, .. } => match expr.as_ref() {
            AstNode::LogicalOperand { op: AddOp::Add, right, .. } => {
                assert!(matches!(right.as_ref(), AstNode::Term { op: MulOp::Mul, .. }));
            }
            other => panic!("Expected logical operand, got {:?}", other),
        },
        other => panic!("Expected print, got {:?}", other),
    }

    assert_eq!(
        render(&statements[1]),
        "(print (logOp (term (num 1) * (num 2)) + (num 3)))"
    );
}

#[test]
fn test_left_associativity() {
    let program = parse("print a - b - c;").expect("Parsing failed");
    assert_eq!(
        render(&program.statements()[0]),
        "(print (logOp (logOp (id a) - (id b)) - (id c)))"
    );
}

#[test]
fn test_tokenization_through_public_api() {
    let tokens = Lexer::new("if a >= 3 { }").tokenize().expect("Lexing failed");

    let symbols: Vec<Symbol> = tokens.iter().map(|t| t.symbol).collect();
    assert_eq!(
        symbols,
        vec![
            Symbol::If,
            Symbol::Id,
            Symbol::Ge,
            Symbol::Number,
            Symbol::LBrace,
            Symbol::RBrace,
            Symbol::Eof
        ]
    );
    assert_eq!(tokens[1].value, "a");
    assert_eq!(tokens[3].value, "3");
}

#[test]
fn test_lexical_error_is_fatal() {
    let err = parse("var x = 1;\nvar y = x @ 2;").unwrap_err();

    match err {
        ParseError::Lex(LexError::UnexpectedCharacter { ch, location }) => {
            assert_eq!(ch, '@');
            assert_eq!(location, SourceLocation::new(2, 11));
        }
        other => panic!("Expected lexical error, got {:?}", other),
    }
}

#[test]
fn test_missing_brace_reports_expected_symbol() {
    let err = parse("if a { ").unwrap_err();

    match &err {
        ParseError::Syntax {
            expected, found, ..
        } => {
            assert_eq!(expected, &vec![Symbol::RBrace]);
            assert_eq!(*found, Symbol::Eof);
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "Parse error at line 1, column 8: expected '}', got 'eof'"
    );
}

#[test]
fn test_strict_config_rejects_ambiguities() {
    let strict = Config::default().strict();

    let err = Parser::with_config("print \"open", &strict)
        .err()
        .expect("Expected lexical error");
    assert!(matches!(err, ParseError::Lex(LexError::UnterminatedString { .. })));

    let err = Parser::with_config("x;", &strict)
        .expect("Parser creation failed")
        .parse_program()
        .unwrap_err();
    assert!(matches!(err, ParseError::Syntax { found: Symbol::Semicolon, .. }));

    // By default the string is cut at end of input and the parser then
    // misses the ';', and the bare identifier is dropped
    let err = parse("print \"open").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { found: Symbol::Eof, .. }));
    assert_eq!(render(&parse("x;").expect("Parsing failed")), "(block nil)");
}

#[test]
fn test_token_trace_through_parser() {
    let trace = RecordingTrace::new();
    let lexer = Lexer::new("var n = 1;").with_trace(Box::new(trace.clone()));

    let mut parser = Parser::from_lexer(lexer, &Config::default()).expect("Parser creation failed");
    parser.parse_program().expect("Parsing failed");

    assert_eq!(
        trace.lines(),
        vec!["var 1 1 var", "id 1 5 n", "= 1 7 =", "number 1 9 1", "; 1 10 ;", "eof 1 11 eof"]
    );
}

#[test]
fn test_deep_nesting_is_bounded() {
    let depth = 10_000;
    let source = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err, ParseError::NestingTooDeep { .. }));

    let source = format!("print {}x;", "not ".repeat(depth));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err, ParseError::NestingTooDeep { .. }));
}

#[test]
fn test_long_chains_do_not_nest_the_parser() {
    // Left-associative chains are built in a loop, not by recursion
    let terms = 100_000;
    let source = format!("print 1{};", " + 1".repeat(terms));
    let program = parse(&source).expect("Parsing failed");

    let mut count = 0;
    program.walk(&mut |node, _| {
        if node.kind() == NodeKind::LogicalOperand {
            count += 1;
        }
    });
    assert_eq!(count, terms);

    let rendered = render(&program);
    assert!(rendered.starts_with("(block (print (logOp (logOp "));
    assert!(rendered.ends_with(" + (num 1)))"));
    assert_eq!(rendered.matches("(logOp ").count(), terms);

    drop(program);
}

#[test]
fn test_long_chain_without_semicolon_is_a_syntax_error() {
    let source = format!("print x{} and y", " * 2".repeat(100_000));
    let err = parse(&source).unwrap_err();

    match err {
        ParseError::Syntax {
            expected, found, ..
        } => {
            assert_eq!(expected, vec![Symbol::Semicolon]);
            assert_eq!(found, Symbol::Eof);
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}
