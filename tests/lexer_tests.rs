// tests/lexer_tests.rs

use statscript::ast::TokenKind;
use statscript::lexer::{LexError, Lexer};

// ============================================================================
// Single Character Scripts
// ============================================================================

#[test]
fn test_single_char_scripts() {
    let test_cases = vec![
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("*", TokenKind::Star),
        ("#", TokenKind::Hash),
        ("0", TokenKind::Number("0".to_string())),
        ("a", TokenKind::Identifier("a".to_string())),
    ];

    for (input, expected) in test_cases {
        let tokens = Lexer::scan(input).unwrap();
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, expected, "Failed for input: {}", input);
        assert_eq!(tokens[0].offset, 0, "Failed for input: {}", input);
    }
}

// ============================================================================
// The Example Formula
// ============================================================================

#[test]
fn test_example_formula_kinds_and_offsets() {
    let tokens = Lexer::scan("(add 35 (mul *statName 3))").unwrap();

    let expected = vec![
        (TokenKind::LParen, 0),
        (TokenKind::Identifier("add".to_string()), 1),
        (TokenKind::Number("35".to_string()), 5),
        (TokenKind::LParen, 8),
        (TokenKind::Identifier("mul".to_string()), 9),
        (TokenKind::Star, 13),
        (TokenKind::Identifier("statName".to_string()), 14),
        (TokenKind::Number("3".to_string()), 23),
        (TokenKind::RParen, 24),
        (TokenKind::RParen, 25),
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, offset)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.offset, offset);
    }
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_integer_lexeme() {
    let tokens = Lexer::scan("35").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number("35".to_string()));
}

#[test]
fn test_fractional_lexeme() {
    let tokens = Lexer::scan("1.5").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number("1.5".to_string()));
}

#[test]
fn test_number_run_is_maximal() {
    let tokens = Lexer::scan("123 456").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Number("123".to_string()));
    assert_eq!(tokens[1].kind, TokenKind::Number("456".to_string()));
    assert_eq!(tokens[1].offset, 4);
}

#[test]
fn test_trailing_point_is_not_part_of_the_number() {
    // "3." is a number followed by a stray '.', which is not a legal
    // character anywhere in the grammar.
    let result = Lexer::scan("3.");
    assert_eq!(
        result,
        Err(LexError::UnexpectedCharacter {
            found: '.',
            offset: 1
        })
    );
}

#[test]
fn test_only_one_point_per_number() {
    // The second point stops the run and then fails as a stray character.
    let result = Lexer::scan("1.2.3");
    assert_eq!(
        result,
        Err(LexError::UnexpectedCharacter {
            found: '.',
            offset: 3
        })
    );
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    let test_cases = vec!["strength", "hp_max", "_private", "tier2bonus"];

    for input in test_cases {
        let tokens = Lexer::scan(input).unwrap();
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Identifier(input.to_string()),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_identifiers_split_at_star() {
    let tokens = Lexer::scan("*strength*agility").unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Star);
    assert_eq!(tokens[1].kind, TokenKind::Identifier("strength".to_string()));
    assert_eq!(tokens[2].kind, TokenKind::Star);
    assert_eq!(tokens[3].kind, TokenKind::Identifier("agility".to_string()));
}

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn test_whitespace_is_skipped_not_tokenized() {
    let tokens = Lexer::scan("  (\n\tadd\r\n 1   2 )  ").unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LParen,
            TokenKind::Identifier("add".to_string()),
            TokenKind::Number("1".to_string()),
            TokenKind::Number("2".to_string()),
            TokenKind::RParen,
        ]
    );
}

// ============================================================================
// Lexical Errors
// ============================================================================

#[test]
fn test_empty_script() {
    assert_eq!(Lexer::scan(""), Err(LexError::EmptyScript));
}

#[test]
fn test_blank_script() {
    assert_eq!(Lexer::scan(" \t\r\n "), Err(LexError::EmptyScript));
}

#[test]
fn test_unexpected_character() {
    let test_cases = vec![
        ("+", '+', 0),
        ("(add 1 2) %", '%', 10),
        ("a ? b", '?', 2),
    ];

    for (input, found, offset) in test_cases {
        assert_eq!(
            Lexer::scan(input),
            Err(LexError::UnexpectedCharacter { found, offset }),
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Streaming Interface
// ============================================================================

#[test]
fn test_next_token_streams_until_none() {
    let mut lexer = Lexer::new("(max *hp 1)");

    let mut kinds = Vec::new();
    while let Some(token) = lexer.next_token().unwrap() {
        kinds.push(token.kind);
    }

    assert_eq!(
        kinds,
        vec![
            TokenKind::LParen,
            TokenKind::Identifier("max".to_string()),
            TokenKind::Star,
            TokenKind::Identifier("hp".to_string()),
            TokenKind::Number("1".to_string()),
            TokenKind::RParen,
        ]
    );
    // Exhausted lexers keep answering None.
    assert_eq!(lexer.next_token().unwrap(), None);
}
