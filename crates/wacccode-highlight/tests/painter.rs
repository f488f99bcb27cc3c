mod common;

use common::{UNTERMINATED_STRING, WordParser, failing, fixed};
use pretty_assertions::assert_eq;
use wacccode_core::{
    CodeBuffer, DecorationApplier, DecorationCommand, Position, Span, SyntaxError, VisualClass,
};
use wacccode_highlight::{
    Anchor, Construct, ErrorSurface, ParseNode, ParseOutcome, ParseOutput, Token, TokenPainter,
};

fn span(line: usize, start: usize, end: usize) -> Span {
    Span::new(Position::new(line, start), Position::new(line, end))
}

#[test]
fn test_while_loop_keywords() {
    let text = "while true do skip done";
    let tree = ParseNode::new(Construct::StatWhileDo)
        .with_terminal(Anchor::Keyword, Token::new(1, 0, 0, 4))
        .with_terminal(Anchor::Keyword, Token::new(1, 11, 11, 12))
        .with_terminal(Anchor::Keyword, Token::new(1, 19, 19, 22));
    let mut painter = TokenPainter::new(fixed(ParseOutput {
        tree: Some(tree),
        ..ParseOutput::default()
    }));

    let result = painter.paint(text);

    assert_eq!(
        result.commands,
        vec![
            DecorationCommand::new(VisualClass::Keyword, span(1, 0, 5)),
            DecorationCommand::new(VisualClass::Keyword, span(1, 11, 13)),
            DecorationCommand::new(VisualClass::Keyword, span(1, 19, 23)),
        ]
    );
    assert!(result.errors.is_empty());

    let mut buffer = CodeBuffer::new(text);
    let mut surface = ErrorSurface::default();
    surface.sync(&mut buffer, result.errors);
    assert!(surface.log().is_clean());
    assert!(surface.markers().is_empty());
}

#[test]
fn test_unterminated_string_reports_one_error() {
    let text = "begin\n  print \"hello\n  skip\nend";
    let (parser, _calls) = WordParser::new();
    let mut painter = TokenPainter::new(parser);

    let result = painter.paint(text);
    assert_eq!(
        result.errors,
        vec![SyntaxError::new(2, 8, UNTERMINATED_STRING)]
    );

    let mut buffer = CodeBuffer::new(text);
    let mut surface = ErrorSurface::default();
    surface.sync(&mut buffer, result.errors);

    assert_eq!(
        surface.log().lines(),
        [format!("Line 2:8 {UNTERMINATED_STRING}")]
    );
    assert_eq!(surface.markers().len(), 1);
    assert_eq!(surface.markers()[0].anchor(), Position::new(2, 8));
    assert_eq!(
        buffer.background_at(Position::new(2, 8)),
        Some(VisualClass::Error)
    );
}

#[test]
fn test_comments_emitted_last_and_dominate() {
    let text = "int x = 5 # x is five\nprint x";
    let (parser, _calls) = WordParser::new();
    let mut painter = TokenPainter::new(parser);

    let result = painter.paint(text);
    let last = result.commands.last().copied();
    assert_eq!(
        last,
        Some(DecorationCommand::new(VisualClass::Comment, span(1, 10, 21)))
    );

    let mut buffer = CodeBuffer::new(text);
    DecorationApplier::new().apply(&mut buffer, &result.commands);
    assert_eq!(
        buffer.foreground_at(Position::new(2, 0)),
        Some(VisualClass::Keyword)
    );
    assert_eq!(
        buffer.foreground_at(Position::new(1, 6)),
        Some(VisualClass::Operator)
    );
    assert_eq!(
        buffer.foreground_at(Position::new(1, 8)),
        Some(VisualClass::Int)
    );
    assert_eq!(
        buffer.foreground_at(Position::new(1, 12)),
        Some(VisualClass::Comment)
    );
    assert_eq!(
        buffer.foreground_at(Position::new(2, 6)),
        Some(VisualClass::MainText)
    );
}

#[test]
fn test_hash_inside_string_still_starts_comment() {
    // The comment pass is line based and ignores lexical context.
    let text = "print \"#1\"";
    let (parser, _calls) = WordParser::new();
    let mut painter = TokenPainter::new(parser);

    let result = painter.paint(text);
    assert_eq!(
        result.commands.last().copied(),
        Some(DecorationCommand::new(VisualClass::Comment, span(1, 7, 10)))
    );
}

#[test]
fn test_parse_failure_degrades_to_comments() {
    let mut painter = TokenPainter::new(failing(vec![SyntaxError::new(
        1,
        0,
        "no viable alternative",
    )]));

    let result = painter.paint("skip\n# trailing\n");
    assert_eq!(result.outcome, ParseOutcome::Failed);
    assert_eq!(
        result.commands,
        vec![DecorationCommand::new(VisualClass::Comment, span(2, 0, 10))]
    );
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_errors_without_tree() {
    let mut painter = TokenPainter::new(fixed(ParseOutput {
        tree: None,
        tokens: Vec::new(),
        errors: vec![
            SyntaxError::new(1, 0, "missing 'begin'"),
            SyntaxError::new(1, 5, "extraneous input"),
        ],
    }));

    let result = painter.paint("skip end");
    assert_eq!(result.outcome, ParseOutcome::NoTree);
    assert!(result.commands.is_empty());
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].message, "missing 'begin'");
}
