//! Token painting: turn one parse of the full text into a decoration batch.
//!
//! Two passes contribute commands:
//!
//! - the syntactic pass walks the parse tree in pre-order and emits one command per terminal
//!   whose construct maps its anchor to a class (see [`Construct::rules`](crate::parse::Construct::rules));
//! - the comment pass scans each line for the line-comment marker, independent of the parse.
//!
//! Comment commands are emitted last so that they also win the application-order tie-break,
//! on top of their higher display priority.

use crate::parse::{ParseNode, ParseService, Token};
use log::{debug, trace, warn};
use wacccode_core::{DecorationCommand, LineIndex, Position, Span, SyntaxError, VisualClass};
use wacccode_lang::CommentConfig;

/// How the parse behind a [`PaintResult`] went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The parser produced a tree.
    Parsed,
    /// The parser reported errors but no tree.
    NoTree,
    /// The parser gave up; only comments were painted.
    Failed,
}

/// Output of one painting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintResult {
    /// Complete decoration batch, comments last.
    pub commands: Vec<DecorationCommand>,
    /// Syntax errors in parser order.
    pub errors: Vec<SyntaxError>,
    /// Parse outcome.
    pub outcome: ParseOutcome,
}

/// Paints the full buffer text using a [`ParseService`].
pub struct TokenPainter<P> {
    parser: P,
    comments: CommentConfig,
}

impl<P: ParseService> TokenPainter<P> {
    /// Create a painter with WACC `#` comments.
    pub fn new(parser: P) -> Self {
        Self::with_comments(parser, CommentConfig::line("#"))
    }

    /// Create a painter with a custom comment marker.
    pub fn with_comments(parser: P, comments: CommentConfig) -> Self {
        Self { parser, comments }
    }

    /// The comment configuration.
    pub fn comments(&self) -> &CommentConfig {
        &self.comments
    }

    /// Parse `full_text` and produce the complete decoration batch plus syntax errors.
    ///
    /// Never fails: a parser failure degrades to a comment-only batch.
    pub fn paint(&mut self, full_text: &str) -> PaintResult {
        let index = LineIndex::from_text(full_text);

        let (mut commands, errors, outcome) = match self.parser.parse(full_text) {
            Ok(output) => {
                trace!(tokens = output.tokens.len(); "parser returned");
                match output.tree {
                    Some(tree) => (
                        syntactic_commands(&tree, &index),
                        output.errors,
                        ParseOutcome::Parsed,
                    ),
                    None => (Vec::new(), output.errors, ParseOutcome::NoTree),
                }
            }
            Err(failure) => {
                warn!(err:% = failure; "parse failed, painting comments only");
                (Vec::new(), failure.errors, ParseOutcome::Failed)
            }
        };

        let syntactic = commands.len();
        commands.extend(comment_commands(&self.comments, &index));

        debug!(
            syntactic = syntactic,
            comments = commands.len() - syntactic,
            errors = errors.len(),
            outcome:? = outcome;
            "painted buffer"
        );

        PaintResult {
            commands,
            errors,
            outcome,
        }
    }
}

/// Walk `tree` in pre-order and emit one command per classified terminal.
pub fn syntactic_commands(tree: &ParseNode, index: &LineIndex) -> Vec<DecorationCommand> {
    let mut commands = Vec::new();
    let mut stack = vec![tree];

    while let Some(node) = stack.pop() {
        for terminal in &node.terminals {
            if terminal.token.is_empty() {
                continue;
            }
            if let Some(class) = node.construct.class_for(terminal.anchor) {
                commands.push(DecorationCommand::new(
                    class,
                    token_span(&terminal.token, index),
                ));
            }
        }
        stack.extend(node.children.iter().rev());
    }

    commands
}

/// One comment command per line holding the comment marker, from the marker to end of line.
pub fn comment_commands(comments: &CommentConfig, index: &LineIndex) -> Vec<DecorationCommand> {
    if !comments.has_line() {
        return Vec::new();
    }

    (1..=index.line_count())
        .filter_map(|line| {
            let text = index.line_text(line)?;
            let column = comments.line_comment_column(&text)?;
            let end = text.chars().count();
            Some(DecorationCommand::new(
                VisualClass::Comment,
                Span::new(Position::new(line, column), Position::new(line, end)),
            ))
        })
        .collect()
}

/// The on-screen span of `token`.
///
/// [`Token::span`] assumes a single line. Tokens crossing a line break (unterminated strings
/// recovered by the lexer) are resolved against the text so the span ends where the token does.
fn token_span(token: &Token, index: &LineIndex) -> Span {
    let span = token.span();
    let Some(start) = index.position_to_char_offset(span.start) else {
        return span;
    };

    let end = start + token.len();
    if end > index.char_count() || !index.slice(start, end).contains('\n') {
        return span;
    }

    Span::new(span.start, index.char_offset_to_position(end))
}
