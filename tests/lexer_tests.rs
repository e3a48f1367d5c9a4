use njie::error::ErrorKind;
use njie::lexer::{tokenize, Keyword, Token, TokenType, TokenValue};
use njie::position::{Position, SourceFile};
use pretty_assertions::assert_eq;

fn types(source: &str) -> Vec<TokenType> {
    tokenize("<test>", source)
        .unwrap()
        .into_iter()
        .map(|token| token.token_type)
        .collect()
}

fn values(source: &str) -> Vec<Option<TokenValue>> {
    tokenize("<test>", source)
        .unwrap()
        .into_iter()
        .map(|token| token.value)
        .collect()
}

#[test]
fn integers_and_floats() {
    assert_eq!(
        values("42 3.25 7."),
        vec![
            Some(TokenValue::Int(42)),
            Some(TokenValue::Float(3.25)),
            Some(TokenValue::Float(7.0)),
            None,
        ]
    );
    assert_eq!(
        types("42 3.25"),
        vec![TokenType::Int, TokenType::Float, TokenType::Eof]
    );
}

#[test]
fn second_dot_ends_the_number() {
    let tokens = tokenize("<test>", "1.2.3").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].value, Some(TokenValue::Float(1.2)));
    assert_eq!(tokens[1].value, Some(TokenValue::Float(0.3)));
    assert_eq!(tokens[1].span.start.index, 3);
    assert_eq!(tokens[1].span.text(), ".3");
}

#[test]
fn single_character_operators() {
    assert_eq!(
        types("+-*/^()"),
        vec![
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Caret,
            TokenType::LeftParen,
            TokenType::RightParen,
            TokenType::Eof,
        ]
    );
}

#[test]
fn two_character_operators_and_their_plain_forms() {
    assert_eq!(
        types("== != <= >= = < >"),
        vec![
            TokenType::EqualEqual,
            TokenType::BangEqual,
            TokenType::LessEqual,
            TokenType::GreaterEqual,
            TokenType::Equal,
            TokenType::Less,
            TokenType::Greater,
            TokenType::Eof,
        ]
    );
    // No whitespace needed between operands
    assert_eq!(
        types("1<=2"),
        vec![TokenType::Int, TokenType::LessEqual, TokenType::Int, TokenType::Eof]
    );
}

#[test]
fn lone_bang_expects_equals() {
    let error = tokenize("<test>", "1 ! 2").unwrap_err();
    assert_eq!(error.kind, ErrorKind::ExpectedCharacter);
    assert_eq!(error.details, "'=' (after '!')");
    assert_eq!(error.span.start.index, 2);
    assert_eq!(error.span.end.index, 3);

    assert!(tokenize("<test>", "!").is_err());
}

#[test]
fn illegal_character_spans_one_character() {
    let error = tokenize("<test>", "5 $ 3").unwrap_err();
    assert_eq!(error.kind, ErrorKind::IllegalCharacter);
    assert_eq!(error.details, "'$'");
    assert_eq!(error.span.text(), "$");

    let error = tokenize("<test>", "a_b").unwrap_err();
    assert_eq!(error.details, "'_'");

    let error = tokenize("<test>", "1 . 2").unwrap_err();
    assert_eq!(error.details, "'.'");
}

#[test]
fn keywords_are_case_sensitive() {
    assert_eq!(
        types("VAR x AND OR NOT var"),
        vec![
            TokenType::Keyword(Keyword::Var),
            TokenType::Identifier,
            TokenType::Keyword(Keyword::And),
            TokenType::Keyword(Keyword::Or),
            TokenType::Keyword(Keyword::Not),
            TokenType::Identifier,
            TokenType::Eof,
        ]
    );
    let tokens = tokenize("<test>", "abc1 var").unwrap();
    assert_eq!(tokens[0].name(), Some("abc1"));
    assert_eq!(tokens[1].name(), Some("var"));
}

#[test]
fn oversized_integer_is_rejected() {
    let error = tokenize("<test>", "99999999999999999999").unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidSyntax);
}

#[test]
fn token_equality_ignores_position() {
    let near = tokenize("<a>", "7").unwrap();
    let far = tokenize("<b>", "     7").unwrap();
    assert_eq!(near[0], far[0]);
    assert_ne!(near[0].span.start.index, far[0].span.start.index);

    let other = tokenize("<a>", "8").unwrap();
    assert_ne!(near[0], other[0]);

    let x = tokenize("<a>", "x").unwrap();
    let y = tokenize("<a>", "y").unwrap();
    assert_ne!(x[0], y[0]);
}

#[test]
fn token_display() {
    let tokens: Vec<String> = tokenize("<test>", "VAR x = 1.5 + 2")
        .unwrap()
        .iter()
        .map(Token::to_string)
        .collect();
    assert_eq!(
        tokens,
        vec!["KEYWORD:VAR", "IDENTIFIER:x", "=", "FLOAT:1.5", "+", "INT:2", "EOF"]
    );
}

#[test]
fn eof_sits_after_the_input() {
    let tokens = tokenize("<test>", "12 ").unwrap();
    let eof = tokens.last().unwrap();
    assert_eq!(eof.token_type, TokenType::Eof);
    assert_eq!(eof.span.start.index, 3);
}

#[test]
fn position_tracks_lines_and_columns() {
    let mut pos = Position::start_of(SourceFile::new("<test>", "ab\ncd"));
    pos.advance();
    assert_eq!((pos.index, pos.line, pos.column), (1, 0, 1));

    let snapshot = pos.copy();
    pos.advance();
    // Landing on the newline resets the column and bumps the line
    assert_eq!((pos.index, pos.line, pos.column), (2, 1, 0));
    pos.advance();
    assert_eq!((pos.index, pos.line, pos.column), (3, 1, 1));

    assert_eq!((snapshot.index, snapshot.line, snapshot.column), (1, 0, 1));
    assert_eq!(snapshot.source_name(), "<test>");
}
