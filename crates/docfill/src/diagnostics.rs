//! User-facing diagnostics for declarations that need documentation.

use miette::{Diagnostic, SourceSpan};
use serde::Serialize;
use thiserror::Error;

use crate::classify::Classification;
use crate::symbol::SymbolFacts;
use crate::syntax::SyntaxTree;

/// Rule id for declarations missing a documentation block.
pub const MISSING_DOCUMENTATION: &str = "DOC001";
/// Rule id for declarations that should carry an inheritance marker.
pub const MISSING_INHERIT_DOC: &str = "DOC002";

/// One finding per declaration that needs an edit.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DocDiagnostic {
    #[error("public {member} '{name}' is missing documentation")]
    #[diagnostic(
        code(DOC001),
        severity(Warning),
        help("add a documentation block describing the {member}")
    )]
    MissingDocumentation {
        member: &'static str,
        name: String,
        #[label("undocumented {member}")]
        #[serde(skip)]
        span: SourceSpan,
    },

    #[error("{member} '{name}' should inherit its documentation")]
    #[diagnostic(
        code(DOC002),
        severity(Warning),
        help("add <inheritdoc/> to reuse the base or interface documentation")
    )]
    MissingInheritDoc {
        member: &'static str,
        name: String,
        #[label("documentation can be inherited")]
        #[serde(skip)]
        span: SourceSpan,
    },
}

impl DocDiagnostic {
    /// Diagnostic for `symbol`, or `None` when the classification needs no edit.
    ///
    /// The span covers the declaration's name token, or is empty at offset 0
    /// when the node marks no name.
    pub fn for_symbol(
        symbol: &SymbolFacts,
        classification: &Classification,
        tree: &SyntaxTree,
    ) -> Option<Self> {
        let target = classification.target()?;
        let span: SourceSpan = tree
            .name_range(target)
            .map_or_else(|| (0, 0).into(), Into::into);
        let member = symbol.kind.member_word();
        let name = symbol.name.clone();

        match classification {
            Classification::Undocumented { .. } => Some(Self::MissingDocumentation {
                member,
                name,
                span,
            }),
            Classification::InheritCandidate { .. } => Some(Self::MissingInheritDoc {
                member,
                name,
                span,
            }),
            Classification::Satisfied { .. } | Classification::Excluded { .. } => None,
        }
    }

    /// Stable rule id (`DOC001`, `DOC002`).
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::MissingDocumentation { .. } => MISSING_DOCUMENTATION,
            Self::MissingInheritDoc { .. } => MISSING_INHERIT_DOC,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::MissingDocumentation { name, .. } | Self::MissingInheritDoc { name, .. } => name,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            Self::MissingDocumentation { span, .. } | Self::MissingInheritDoc { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{InheritReason, SatisfiedReason};
    use crate::symbol::SymbolKind;
    use crate::syntax::TreeBuilder;

    fn tree() -> (SyntaxTree, crate::syntax::NodeId) {
        let mut b = TreeBuilder::new();
        let decl = b
            .declaration()
            .token("public void ")
            .name("Flush")
            .token("() {}");
        let id = decl.id();
        (SyntaxTree::new(b.root().child(decl.build()).build()), id)
    }

    #[test]
    fn missing_documentation_points_at_name() {
        let (tree, id) = tree();
        let symbol = SymbolFacts::new("Flush", SymbolKind::Method);
        let diagnostic =
            DocDiagnostic::for_symbol(&symbol, &Classification::Undocumented { target: id }, &tree)
                .expect("undocumented symbols get a diagnostic");

        assert_eq!(diagnostic.rule_id(), "DOC001");
        assert_eq!(
            diagnostic.to_string(),
            "public method 'Flush' is missing documentation"
        );
        assert_eq!(diagnostic.span(), SourceSpan::from((12, 5)));
        assert_eq!(
            diagnostic.code().map(|code| code.to_string()).as_deref(),
            Some("DOC001")
        );
    }

    #[test]
    fn inherit_candidate_uses_second_rule() {
        let (tree, id) = tree();
        let symbol = SymbolFacts::new("Flush", SymbolKind::Method);
        let classification = Classification::InheritCandidate {
            target: id,
            reason: InheritReason::Override,
        };
        let diagnostic =
            DocDiagnostic::for_symbol(&symbol, &classification, &tree).expect("diagnostic");
        assert_eq!(diagnostic.rule_id(), "DOC002");
        assert_eq!(diagnostic.name(), "Flush");
    }

    #[test]
    fn satisfied_symbols_have_no_diagnostic() {
        let (tree, _) = tree();
        let symbol = SymbolFacts::new("Flush", SymbolKind::Method);
        let classification = Classification::Satisfied {
            reason: SatisfiedReason::AlreadyDocumented,
        };
        assert!(DocDiagnostic::for_symbol(&symbol, &classification, &tree).is_none());
    }
}
