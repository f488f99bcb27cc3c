//! Semantic highlighting categories.

use std::fmt;
use std::str::FromStr;

/// The closed set of highlighting categories a buffer range can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisualClass {
    /// Reserved words (`while`, `begin`, `call`, ...).
    Keyword,
    /// Type names (`int`, `pair`, array brackets, struct types).
    Type,
    /// Names at their declaration site.
    Declaration,
    /// Unary and binary operators, assignment.
    Operator,
    /// String and char literals.
    String,
    /// Integer literals.
    Int,
    /// Line comments.
    Comment,
    /// Function names at a call site.
    Function,
    /// Struct fields accessed with `.`.
    Attribute,
    /// Plain identifiers in expression position.
    MainText,
    /// Error underline (background channel).
    Error,
}

/// Which visual channel a class paints.
///
/// Foreground classes compete with each other for a char; the background channel is independent
/// and only carries [`VisualClass::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Text colour.
    Foreground,
    /// Background colour.
    Background,
}

impl VisualClass {
    /// Every class, in declaration order.
    pub const ALL: [VisualClass; 11] = [
        VisualClass::Keyword,
        VisualClass::Type,
        VisualClass::Declaration,
        VisualClass::Operator,
        VisualClass::String,
        VisualClass::Int,
        VisualClass::Comment,
        VisualClass::Function,
        VisualClass::Attribute,
        VisualClass::MainText,
        VisualClass::Error,
    ];

    /// Stable tag name, as used by themes and configuration files.
    pub fn tag_name(self) -> &'static str {
        match self {
            VisualClass::Keyword => "keyword",
            VisualClass::Type => "type",
            VisualClass::Declaration => "declaration",
            VisualClass::Operator => "operator",
            VisualClass::String => "string",
            VisualClass::Int => "int",
            VisualClass::Comment => "comment",
            VisualClass::Function => "function",
            VisualClass::Attribute => "attribute",
            VisualClass::MainText => "main_text",
            VisualClass::Error => "error",
        }
    }

    /// The channel this class paints.
    pub fn layer(self) -> Layer {
        match self {
            VisualClass::Error => Layer::Background,
            _ => Layer::Foreground,
        }
    }

    /// Fixed display priority within the class's layer.
    ///
    /// When tagged ranges overlap, the higher priority wins; equal priorities fall back to
    /// application order (later wins). Comments outrank every code class so commented-out code
    /// never shows syntax colours.
    pub fn display_priority(self) -> u8 {
        match self {
            VisualClass::MainText => 0,
            VisualClass::Comment => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for VisualClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Returned when a tag name does not name a [`VisualClass`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visual class '{0}'")]
pub struct UnknownVisualClass(pub String);

impl FromStr for VisualClass {
    type Err = UnknownVisualClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisualClass::ALL
            .into_iter()
            .find(|class| class.tag_name() == s)
            .ok_or_else(|| UnknownVisualClass(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_round_trip() {
        for class in VisualClass::ALL {
            assert_eq!(class.tag_name().parse::<VisualClass>(), Ok(class));
        }
        assert!("bogus".parse::<VisualClass>().is_err());
    }

    #[test]
    fn test_comment_outranks_code_classes() {
        for class in VisualClass::ALL {
            if class != VisualClass::Comment && class.layer() == Layer::Foreground {
                assert!(VisualClass::Comment.display_priority() > class.display_priority());
            }
        }
    }

    #[test]
    fn test_error_is_the_only_background_class() {
        let background: Vec<_> = VisualClass::ALL
            .into_iter()
            .filter(|c| c.layer() == Layer::Background)
            .collect();
        assert_eq!(background, vec![VisualClass::Error]);
    }
}
