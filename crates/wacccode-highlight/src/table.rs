//! Construct → visual class table.
//!
//! Each grammar construct names the anchors worth highlighting and the class each of them gets.
//! Constructs that only wrap other constructs have no rules; their children carry the tokens.
//! An anchor that a construct does not list (brackets, commas, `;`) is left uncoloured.

use crate::parse::{Anchor, Construct};
use wacccode_core::VisualClass;

type Rule = (Anchor, VisualClass);

const NONE: &[Rule] = &[];
const KEYWORD: &[Rule] = &[(Anchor::Keyword, VisualClass::Keyword)];
const OPERATOR: &[Rule] = &[(Anchor::Operator, VisualClass::Operator)];
const MAIN_TEXT: &[Rule] = &[(Anchor::Identifier, VisualClass::MainText)];
const TYPE_NAME: &[Rule] = &[
    (Anchor::TypeName, VisualClass::Type),
    (Anchor::Keyword, VisualClass::Type),
];

impl Construct {
    /// The anchor → class rules of this construct.
    pub fn rules(self) -> &'static [(Anchor, VisualClass)] {
        use Construct::*;

        match self {
            Program | StatSkip | StatRead | StatFree | StatReturn | StatExit | StatPrint
            | StatPrintln | StatIfThenElse | StatWhileDo | StatBeginEnd | PairElemFst
            | PairElemSnd => KEYWORD,

            Func | StructDeclaration => &[
                (Anchor::Keyword, VisualClass::Keyword),
                (Anchor::Identifier, VisualClass::Declaration),
            ],
            Param => &[(Anchor::Identifier, VisualClass::Declaration)],
            StructField => &[(Anchor::Identifier, VisualClass::Attribute)],
            StatInit => &[
                (Anchor::Identifier, VisualClass::Declaration),
                (Anchor::Operator, VisualClass::Operator),
            ],
            StatStore | ExprUnary | ExprBinary => OPERATOR,

            AssignRhsNewPair => KEYWORD,
            AssignRhsCall => &[
                (Anchor::Keyword, VisualClass::Keyword),
                (Anchor::Identifier, VisualClass::Function),
            ],
            AssignLhsExpr | ExprIdentifier | ArrayElem => MAIN_TEXT,
            StructFieldAccess => &[(Anchor::Identifier, VisualClass::Attribute)],

            BaseTypeInt | BaseTypeBool | BaseTypeChar | BaseTypeString | PairElemTypeKwPair => {
                TYPE_NAME
            }
            ArrayType => &[(Anchor::Punctuation, VisualClass::Type)],
            PairType => TYPE_NAME,
            StructType => &[(Anchor::Identifier, VisualClass::Type)],

            LiteralInteger => &[
                (Anchor::Literal, VisualClass::Int),
                (Anchor::Operator, VisualClass::Int),
            ],
            LiteralChar | LiteralString => &[(Anchor::Literal, VisualClass::String)],
            LiteralBoolean | LiteralPair => &[
                (Anchor::Literal, VisualClass::Keyword),
                (Anchor::Keyword, VisualClass::Keyword),
            ],

            ParamList | StatJoin | AssignLhsArrayElem | AssignLhsPairElem | AssignRhsExpr
            | AssignRhsArrayLiter | AssignRhsPairElem | ArgList | ArrayLiter | TypeBaseType
            | TypeArrayType | TypePairType | TypeStructType | PairElemTypeBaseType
            | PairElemTypeArrayType | ExprLiteral | ExprArrayElem | ExprBracket => NONE,
        }
    }

    /// The class of a terminal with the given anchor inside this construct, if any.
    pub fn class_for(self, anchor: Anchor) -> Option<VisualClass> {
        self.rules()
            .iter()
            .find(|(rule_anchor, _)| *rule_anchor == anchor)
            .map(|(_, class)| *class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_keywords() {
        for construct in [
            Construct::StatWhileDo,
            Construct::StatIfThenElse,
            Construct::StatSkip,
            Construct::Program,
        ] {
            assert_eq!(
                construct.class_for(Anchor::Keyword),
                Some(VisualClass::Keyword)
            );
            assert_eq!(construct.class_for(Anchor::Punctuation), None);
        }
    }

    #[test]
    fn test_identifier_roles() {
        assert_eq!(
            Construct::Func.class_for(Anchor::Identifier),
            Some(VisualClass::Declaration)
        );
        assert_eq!(
            Construct::StatInit.class_for(Anchor::Identifier),
            Some(VisualClass::Declaration)
        );
        assert_eq!(
            Construct::AssignRhsCall.class_for(Anchor::Identifier),
            Some(VisualClass::Function)
        );
        assert_eq!(
            Construct::AssignRhsCall.class_for(Anchor::Keyword),
            Some(VisualClass::Keyword)
        );
        assert_eq!(
            Construct::ExprIdentifier.class_for(Anchor::Identifier),
            Some(VisualClass::MainText)
        );
        assert_eq!(
            Construct::StructFieldAccess.class_for(Anchor::Identifier),
            Some(VisualClass::Attribute)
        );
    }

    #[test]
    fn test_literals_and_types() {
        assert_eq!(
            Construct::LiteralInteger.class_for(Anchor::Literal),
            Some(VisualClass::Int)
        );
        assert_eq!(
            Construct::LiteralString.class_for(Anchor::Literal),
            Some(VisualClass::String)
        );
        assert_eq!(
            Construct::LiteralChar.class_for(Anchor::Literal),
            Some(VisualClass::String)
        );
        assert_eq!(
            Construct::BaseTypeInt.class_for(Anchor::TypeName),
            Some(VisualClass::Type)
        );
        assert_eq!(
            Construct::PairType.class_for(Anchor::Keyword),
            Some(VisualClass::Type)
        );
    }

    #[test]
    fn test_wrappers_have_no_rules() {
        assert!(Construct::ExprLiteral.rules().is_empty());
        assert!(Construct::StatJoin.rules().is_empty());
        assert_eq!(Construct::ExprBracket.class_for(Anchor::Punctuation), None);
    }
}
