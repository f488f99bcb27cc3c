//! The parser-facing data model.
//!
//! The grammar itself lives outside this crate. A [`ParseService`] turns source text into a
//! [`ParseNode`] tree whose nodes are tagged with the grammar [`Construct`] they represent and
//! carry the terminal tokens that belong directly to that construct, each labelled with its
//! lexical [`Anchor`] role.

use wacccode_core::{Position, Span, SyntaxError};

/// A lexical token as reported by the parser.
///
/// Offsets are char offsets into the parsed text; `stop_offset` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// 1-based line the token starts on.
    pub line: usize,
    /// 0-based column the token starts at.
    pub start_column: usize,
    /// Offset of the first char.
    pub start_offset: usize,
    /// Offset of the last char (inclusive).
    pub stop_offset: usize,
}

impl Token {
    /// Create a token.
    pub fn new(line: usize, start_column: usize, start_offset: usize, stop_offset: usize) -> Self {
        Self {
            line,
            start_column,
            start_offset,
            stop_offset,
        }
    }

    /// Length in chars. Zero for synthetic tokens whose stop precedes their start (EOF).
    pub fn len(&self) -> usize {
        (self.stop_offset + 1).saturating_sub(self.start_offset)
    }

    /// Returns `true` for zero-length tokens.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The token's span, assuming it does not cross a line break.
    pub fn span(&self) -> Span {
        let start = Position::new(self.line, self.start_column);
        Span::new(start, start.offset_columns(self.len()))
    }
}

/// The lexical role of a terminal inside its construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// A reserved word.
    Keyword,
    /// An operator symbol or word operator (`+`, `len`, `=`).
    Operator,
    /// A literal value.
    Literal,
    /// A built-in type name.
    TypeName,
    /// A user identifier.
    Identifier,
    /// Brackets, commas, semicolons and dots.
    Punctuation,
}

/// Grammar constructs of the WACC language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// `begin func* stat end`
    Program,
    /// `type ident ( params ) is stat end`
    Func,
    /// `param (, param)*`
    ParamList,
    /// `type ident`
    Param,
    /// `struct ident { fields }`
    StructDeclaration,
    /// `type ident` inside a struct declaration.
    StructField,

    /// `skip`
    StatSkip,
    /// `type ident = rhs`
    StatInit,
    /// `lhs = rhs`
    StatStore,
    /// `read lhs`
    StatRead,
    /// `free expr`
    StatFree,
    /// `return expr`
    StatReturn,
    /// `exit expr`
    StatExit,
    /// `print expr`
    StatPrint,
    /// `println expr`
    StatPrintln,
    /// `if expr then stat else stat fi`
    StatIfThenElse,
    /// `while expr do stat done`
    StatWhileDo,
    /// `begin stat end`
    StatBeginEnd,
    /// `stat ; stat`
    StatJoin,

    /// Identifier on the left of an assignment.
    AssignLhsExpr,
    /// Array element on the left of an assignment.
    AssignLhsArrayElem,
    /// Pair element on the left of an assignment.
    AssignLhsPairElem,
    /// Expression on the right of an assignment.
    AssignRhsExpr,
    /// Array literal on the right of an assignment.
    AssignRhsArrayLiter,
    /// `newpair ( expr , expr )`
    AssignRhsNewPair,
    /// Pair element on the right of an assignment.
    AssignRhsPairElem,
    /// `call ident ( args )`
    AssignRhsCall,
    /// `expr (, expr)*`
    ArgList,

    /// `ident [ expr ]+`
    ArrayElem,
    /// `[ expr (, expr)* ]`
    ArrayLiter,
    /// `fst expr`
    PairElemFst,
    /// `snd expr`
    PairElemSnd,

    /// Base type in type position.
    TypeBaseType,
    /// Array type in type position.
    TypeArrayType,
    /// Pair type in type position.
    TypePairType,
    /// User struct type in type position.
    TypeStructType,
    /// `type [ ]`
    ArrayType,
    /// `pair ( elem , elem )`
    PairType,
    /// Base type inside a pair type.
    PairElemTypeBaseType,
    /// Array type inside a pair type.
    PairElemTypeArrayType,
    /// Bare `pair` inside a pair type.
    PairElemTypeKwPair,
    /// `int`
    BaseTypeInt,
    /// `bool`
    BaseTypeBool,
    /// `char`
    BaseTypeChar,
    /// `string`
    BaseTypeString,
    /// Name of a declared struct used as a type.
    StructType,

    /// Integer literal (sign included).
    LiteralInteger,
    /// `true` / `false`
    LiteralBoolean,
    /// Char literal.
    LiteralChar,
    /// String literal.
    LiteralString,
    /// `null`
    LiteralPair,

    /// Literal in expression position.
    ExprLiteral,
    /// Identifier in expression position.
    ExprIdentifier,
    /// Array element in expression position.
    ExprArrayElem,
    /// Unary operator application.
    ExprUnary,
    /// Binary operator application.
    ExprBinary,
    /// `( expr )`
    ExprBracket,
    /// `expr . ident`
    StructFieldAccess,
}

/// A terminal token owned by a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Terminal {
    /// Lexical role.
    pub anchor: Anchor,
    /// The token.
    pub token: Token,
}

/// One node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    /// The construct this node represents.
    pub construct: Construct,
    /// Terminals belonging directly to this construct, in source order.
    pub terminals: Vec<Terminal>,
    /// Child constructs, in source order.
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// Create a node without terminals or children.
    pub fn new(construct: Construct) -> Self {
        Self {
            construct,
            terminals: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a terminal.
    pub fn with_terminal(mut self, anchor: Anchor, token: Token) -> Self {
        self.terminals.push(Terminal { anchor, token });
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: ParseNode) -> Self {
        self.children.push(child);
        self
    }

}

/// Everything a parse produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOutput {
    /// The parse tree; `None` if the parser recovered errors but built no tree.
    pub tree: Option<ParseNode>,
    /// The raw token stream.
    pub tokens: Vec<Token>,
    /// Syntax errors, in the order the parser reported them.
    pub errors: Vec<SyntaxError>,
}

/// The parser gave up entirely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parser aborted: {message}")]
pub struct ParseFailure {
    /// Why the parse was aborted.
    pub message: String,
    /// Whatever errors were reported before aborting.
    pub errors: Vec<SyntaxError>,
}

impl ParseFailure {
    /// Create a failure without diagnostics.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

/// A parser for full buffer text.
///
/// Implementations are called synchronously on the editor's event-loop thread and should be fast
/// enough for interactive use.
pub trait ParseService {
    /// Parse `text`. Syntax errors belong in [`ParseOutput::errors`]; `Err` is reserved for parses
    /// that produced nothing usable.
    fn parse(&mut self, text: &str) -> Result<ParseOutput, ParseFailure>;
}

impl<F> ParseService for F
where
    F: FnMut(&str) -> Result<ParseOutput, ParseFailure>,
{
    fn parse(&mut self, text: &str) -> Result<ParseOutput, ParseFailure> {
        self(text)
    }
}
