use pretty_assertions::assert_eq;
use wacccode_core::{
    CodeBuffer, DecorationApplier, DecorationCommand, Position, Span, TextBuffer, VisualClass,
};

fn command(class: VisualClass, line: usize, start: usize, end: usize) -> DecorationCommand {
    DecorationCommand::new(
        class,
        Span::new(Position::new(line, start), Position::new(line, end)),
    )
}

fn snapshot(buffer: &CodeBuffer) -> Vec<(VisualClass, Vec<Span>)> {
    VisualClass::ALL
        .into_iter()
        .map(|class| (class, buffer.tagged_spans(class)))
        .filter(|(_, spans)| !spans.is_empty())
        .collect()
}

#[test]
fn test_apply_twice_is_idempotent() {
    let mut buffer = CodeBuffer::new("int x = 5 ;\nprint x # show\n");
    let mut applier = DecorationApplier::new();
    let batch = vec![
        command(VisualClass::Type, 1, 0, 3),
        command(VisualClass::Declaration, 1, 4, 5),
        command(VisualClass::Operator, 1, 6, 7),
        command(VisualClass::Int, 1, 8, 9),
        command(VisualClass::Keyword, 2, 0, 5),
        command(VisualClass::Comment, 2, 8, 14),
    ];

    applier.apply(&mut buffer, &batch);
    let once = snapshot(&buffer);
    let count_once = buffer.tag_count();

    applier.apply(&mut buffer, &batch);
    assert_eq!(snapshot(&buffer), once);
    assert_eq!(buffer.tag_count(), count_once);
    assert_eq!(applier.batches_applied(), 2);
}

#[test]
fn test_full_repaint_drops_stale_tags_when_code_shrinks() {
    let mut buffer = CodeBuffer::new("while true do skip done");
    let mut applier = DecorationApplier::new();

    applier.apply(
        &mut buffer,
        &[
            command(VisualClass::Keyword, 1, 0, 5),
            command(VisualClass::Keyword, 1, 11, 13),
            command(VisualClass::Keyword, 1, 19, 23),
        ],
    );
    applier.apply(&mut buffer, &[command(VisualClass::Keyword, 1, 0, 5)]);

    assert_eq!(
        buffer.tagged_spans(VisualClass::Keyword),
        vec![Span::new(Position::new(1, 0), Position::new(1, 5))]
    );
}

#[test]
fn test_empty_batch_clears_everything_but_errors() {
    let mut buffer = CodeBuffer::new("skip");
    let mut applier = DecorationApplier::new();
    applier.apply(&mut buffer, &[command(VisualClass::Keyword, 1, 0, 4)]);
    buffer
        .tag(Span::single_char(Position::new(1, 0)), VisualClass::Error)
        .unwrap();

    let report = applier.apply(&mut buffer, &[]);

    assert_eq!(report.applied, 0);
    assert!(buffer.tagged_spans(VisualClass::Keyword).is_empty());
    assert_eq!(buffer.tagged_spans(VisualClass::Error).len(), 1);
}

#[test]
fn test_comment_dominates_regardless_of_order() {
    let mut buffer = CodeBuffer::new("x = y # y is used");
    let mut applier = DecorationApplier::new();

    // Comment first, syntactic tags afterwards over the same range.
    applier.apply(
        &mut buffer,
        &[
            command(VisualClass::Comment, 1, 6, 17),
            command(VisualClass::MainText, 1, 8, 9),
            command(VisualClass::Keyword, 1, 10, 12),
        ],
    );

    for column in 6..17 {
        assert_eq!(
            buffer.foreground_at(Position::new(1, column)),
            Some(VisualClass::Comment),
            "column {column}"
        );
    }
}

#[test]
fn test_stale_commands_are_skipped() {
    let mut buffer = CodeBuffer::new("skip");
    let mut applier = DecorationApplier::new();

    let report = applier.apply(
        &mut buffer,
        &[
            command(VisualClass::Keyword, 1, 0, 4),
            command(VisualClass::Keyword, 3, 0, 4),
            command(VisualClass::Int, 1, 10, 12),
        ],
    );

    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped, 2);
}
