//! Snapshot tests for the signature tokenizer
//!
//! These tests tokenize real-world signatures and snapshot the canonical
//! text form to detect unintended changes in grouping behavior.

use lua_type::{Token, TokenizeError, parse, tokenize};

fn canonical(source: &str) -> String {
    parse(source).expect("Failed to tokenize signature").to_string()
}

macro_rules! snapshot_test {
    ($name:ident, $source:expr, @$snapshot:literal) => {
        #[test]
        fn $name() {
            insta::assert_snapshot!(canonical($source), @$snapshot);
        }
    };
}

snapshot_test!(callback_tuple, "(number, string) -> boolean", @"(number, string) -> boolean");
snapshot_test!(indexer_table, "{ [string]: number }", @"{[string]: number}");
snapshot_test!(
    generic_table,
    "Roact.Element<{ oh_no: string -> coroutine }>",
    @"Roact.Element<{oh_no: string -> coroutine}>"
);
snapshot_test!(
    method_signature,
    "(self: Signal,   callback: (...any) -> ()) -> Connection",
    @"(self: Signal, callback: (...any) -> ()) -> Connection"
);
snapshot_test!(optional_union, "string | number | nil", @"string | number | nil");
snapshot_test!(map_or_nil, "{ [K]: V } | nil", @"{[K]: V} | nil");
snapshot_test!(variadic_generic, "Promise<T...>", @"Promise<T...>");

#[test]
fn scenario_single_builtin() {
    assert_eq!(
        tokenize("string").unwrap(),
        vec![Token::AtomType("string".to_string())]
    );
}

#[test]
fn scenario_tuple_arrow_atom() {
    let tokens = tokenize("(number, string) -> boolean").unwrap();
    assert_eq!(tokens.len(), 3);

    let Token::Tuple(groups) = &tokens[0] else {
        panic!("Expected Tuple token, got {:?}", tokens[0]);
    };
    assert_eq!(
        groups,
        &vec![
            vec![Token::AtomType("number".to_string())],
            vec![Token::AtomType("string".to_string())],
        ]
    );
    assert_eq!(tokens[1], Token::Arrow);
    assert_eq!(tokens[2], Token::AtomType("boolean".to_string()));
}

#[test]
fn scenario_table_with_identifier() {
    assert_eq!(
        tokenize("{string: number}").unwrap(),
        vec![Token::Table(vec![vec![
            Token::Identifier("string".to_string()),
            Token::AtomType("number".to_string()),
        ]])]
    );
}

#[test]
fn map_key_colon_is_identifier() {
    assert_eq!(
        tokenize("{[string]: number}").unwrap(),
        vec![Token::Table(vec![vec![
            Token::Indexer(vec![Token::AtomType("string".to_string())]),
            Token::Identifier(String::new()),
            Token::AtomType("number".to_string()),
        ]])]
    );
}

#[test]
fn scenario_union() {
    assert_eq!(
        tokenize("Foo | Bar").unwrap(),
        vec![
            Token::AtomType("Foo".to_string()),
            Token::Union,
            Token::AtomType("Bar".to_string()),
        ]
    );
}

#[test]
fn scenario_unterminated_group() {
    let err = tokenize("(number, string -> boolean").unwrap_err();
    assert!(matches!(err, TokenizeError::NoProgress { found: '(', .. }));
}

#[test]
fn separators_never_survive() {
    fn contains_separator(tokens: &[Token]) -> bool {
        tokens.iter().any(|t| match t {
            Token::Separator => true,
            Token::Tuple(groups) | Token::Table(groups) => {
                groups.iter().any(|g| contains_separator(g))
            }
            Token::Indexer(inner) => contains_separator(inner),
            _ => false,
        })
    }

    for source in [
        "(a, b, (c, d))",
        "{ x: (a, b), y: { z, w } }",
        "[(a, b)] -> ((c, d), e)",
    ] {
        let tokens = tokenize(source).unwrap();
        assert!(!contains_separator(&tokens), "separator left in {source}");
    }
}

#[test]
fn tokenize_is_deterministic() {
    let source = "(self: Foo, ...any) -> (boolean, { [string]: Bar | nil })";
    assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}
