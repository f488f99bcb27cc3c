#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use wacccode_core::SyntaxError;
use wacccode_highlight::{
    Anchor, Construct, ParseFailure, ParseNode, ParseOutput, ParseService, Token,
};
use wacccode_lang::LanguageConfig;

pub const UNTERMINATED_STRING: &str = "token recognition error at: '\"'";

/// A word-level stand-in for the WACC parser.
///
/// Every token becomes its own child of a `Program` node: reserved words are statement keywords,
/// digits are integer literals, quoted text is a string literal, other words are identifiers and
/// any other symbol is a binary operator. `#` starts a comment. An unterminated string is
/// reported at its opening quote.
pub struct WordParser {
    calls: Rc<Cell<usize>>,
}

impl WordParser {
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }
}

impl ParseService for WordParser {
    fn parse(&mut self, text: &str) -> Result<ParseOutput, ParseFailure> {
        self.calls.set(self.calls.get() + 1);
        Ok(lex(text))
    }
}

pub fn lex(text: &str) -> ParseOutput {
    let chars: Vec<char> = text.chars().collect();
    let mut root = ParseNode::new(Construct::Program);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let (mut i, mut line, mut column) = (0, 1, 0);

    let advance = |i: &mut usize, column: &mut usize| {
        *i += 1;
        *column += 1;
    };

    while i < chars.len() {
        let c = chars[i];
        if c == '\n' {
            i += 1;
            line += 1;
            column = 0;
            continue;
        }
        if c.is_whitespace() {
            advance(&mut i, &mut column);
            continue;
        }
        if c == '#' {
            while i < chars.len() && chars[i] != '\n' {
                advance(&mut i, &mut column);
            }
            continue;
        }

        let (start, start_column) = (i, column);
        let (construct, anchor) = if c == '"' {
            advance(&mut i, &mut column);
            while i < chars.len() && chars[i] != '"' && chars[i] != '\n' {
                advance(&mut i, &mut column);
            }
            if i < chars.len() && chars[i] == '"' {
                advance(&mut i, &mut column);
                (Construct::LiteralString, Anchor::Literal)
            } else {
                errors.push(SyntaxError::new(line, start_column, UNTERMINATED_STRING));
                continue;
            }
        } else if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                advance(&mut i, &mut column);
            }
            (Construct::LiteralInteger, Anchor::Literal)
        } else if c.is_alphanumeric() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                advance(&mut i, &mut column);
            }
            let word: String = chars[start..i].iter().collect();
            if LanguageConfig::is_keyword(&word) {
                (Construct::StatSkip, Anchor::Keyword)
            } else {
                (Construct::ExprIdentifier, Anchor::Identifier)
            }
        } else {
            advance(&mut i, &mut column);
            (Construct::ExprBinary, Anchor::Operator)
        };

        let token = Token::new(line, start_column, start, i - 1);
        tokens.push(token);
        root = root.with_child(ParseNode::new(construct).with_terminal(anchor, token));
    }

    ParseOutput {
        tree: Some(root),
        tokens,
        errors,
    }
}

/// A parser that always returns the same output.
pub fn fixed(output: ParseOutput) -> impl FnMut(&str) -> Result<ParseOutput, ParseFailure> {
    move |_text: &str| Ok(output.clone())
}

/// A parser that always gives up.
pub fn failing(errors: Vec<SyntaxError>) -> impl FnMut(&str) -> Result<ParseOutput, ParseFailure> {
    move |_text: &str| {
        Err(ParseFailure {
            message: "parser aborted".to_string(),
            errors: errors.clone(),
        })
    }
}
