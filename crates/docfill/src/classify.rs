//! Documentation obligation classification.
//!
//! [`Classifier::classify`] decides, per declaration, whether a documentation
//! block is required, whether an inheritance marker is enough, or whether
//! nothing needs to happen. Rules are evaluated in a fixed order and the
//! first one that applies decides:
//!
//! 1. not publicly visible, implicitly declared or generated: excluded
//! 2. namespaces: excluded
//! 3. static non-const fields: excluded
//! 4. property and event accessors: excluded
//! 5. no source declaration, or documentation already present: satisfied
//! 6. overrides and interface implementations: inherit candidate
//! 7. everything else: undocumented
//!
//! Inheritance is checked before anything name-based, so an override named
//! like a getter still only receives a marker.

use serde::Serialize;

use crate::annotation;
use crate::symbol::{Accessibility, ContainingType, SymbolFacts, SymbolKind};
use crate::syntax::{NodeId, SyntaxTree, Trivia};

/// Outcome of classifying one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    /// Needs a synthesized documentation block.
    Undocumented { target: NodeId },
    /// Needs a single inheritance marker.
    InheritCandidate {
        target: NodeId,
        reason: InheritReason,
    },
    Satisfied { reason: SatisfiedReason },
    Excluded { reason: ExclusionReason },
}

impl Classification {
    /// Declaration to edit, for classifications that require an edit.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Classification::Undocumented { target }
            | Classification::InheritCandidate { target, .. } => Some(*target),
            Classification::Satisfied { .. } | Classification::Excluded { .. } => None,
        }
    }

    pub fn needs_edit(&self) -> bool {
        self.target().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritReason {
    Override,
    ExplicitInterfaceImplementation,
    InterfaceImplementation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfiedReason {
    /// Metadata-only symbol; nothing to edit.
    NoDeclaration,
    /// A documentation block or inheritance marker is already attached.
    AlreadyDocumented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    NotPublic,
    Implicit,
    Generated,
    Namespace,
    StaticField,
    Accessor,
}

/// Answers whether a member implements some interface member of its containing type.
pub trait InterfaceResolver {
    fn resolves_interface_member(&self, containing: &ContainingType, member: &SymbolFacts) -> bool;
}

/// Matches members against interface signatures by kind, name and parameter types.
///
/// Static and non-public members never implement an interface member.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralResolver;

impl InterfaceResolver for StructuralResolver {
    fn resolves_interface_member(&self, containing: &ContainingType, member: &SymbolFacts) -> bool {
        if member.modifiers.is_static || member.accessibility != Accessibility::Public {
            return false;
        }
        containing
            .all_interfaces
            .iter()
            .flat_map(|interface| interface.members.iter())
            .any(|candidate| {
                candidate.kind == member.kind
                    && candidate.name == member.name
                    && candidate
                        .parameter_types
                        .iter()
                        .map(String::as_str)
                        .eq(member.parameter_types())
            })
    }
}

impl<R: InterfaceResolver + ?Sized> InterfaceResolver for &R {
    fn resolves_interface_member(&self, containing: &ContainingType, member: &SymbolFacts) -> bool {
        (**self).resolves_interface_member(containing, member)
    }
}

/// Applies the classification rules with a pluggable interface resolver.
#[derive(Debug, Clone, Default)]
pub struct Classifier<R = StructuralResolver> {
    resolver: R,
}

impl Classifier<StructuralResolver> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: InterfaceResolver> Classifier<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Classifies `symbol` given the leading trivia of its declaration.
    ///
    /// `leading` is ignored when the symbol has no declaration.
    pub fn classify(&self, symbol: &SymbolFacts, leading: &[Trivia]) -> Classification {
        let classification = self.decide(symbol, leading);
        tracing::debug!(
            symbol = %symbol.name,
            kind = symbol.kind.member_word(),
            ?classification,
            "classified symbol"
        );
        classification
    }

    /// Classifies `symbol` against the declaration node it references in `tree`.
    ///
    /// A declaration id missing from the tree is treated like a metadata-only symbol.
    pub fn classify_in(&self, symbol: &SymbolFacts, tree: &SyntaxTree) -> Classification {
        match symbol.declaration.and_then(|id| tree.find(id)) {
            Some(node) => self.classify(symbol, node.leading_trivia()),
            None if symbol.declaration.is_some() => {
                tracing::debug!(symbol = %symbol.name, "declaration not found in tree");
                self.classify(&without_declaration(symbol), &[])
            }
            None => self.classify(symbol, &[]),
        }
    }

    fn decide(&self, symbol: &SymbolFacts, leading: &[Trivia]) -> Classification {
        if let Some(reason) = exclusion(symbol) {
            return Classification::Excluded { reason };
        }

        let Some(target) = symbol.declaration else {
            return Classification::Satisfied {
                reason: SatisfiedReason::NoDeclaration,
            };
        };
        if annotation::is_documented(leading) {
            return Classification::Satisfied {
                reason: SatisfiedReason::AlreadyDocumented,
            };
        }

        if let Some(reason) = self.inherit_reason(symbol) {
            return Classification::InheritCandidate { target, reason };
        }

        Classification::Undocumented { target }
    }

    fn inherit_reason(&self, symbol: &SymbolFacts) -> Option<InheritReason> {
        if symbol.modifiers.is_override {
            return Some(InheritReason::Override);
        }
        if symbol.explicit_interface_implementation {
            return Some(InheritReason::ExplicitInterfaceImplementation);
        }
        let containing = symbol.containing_type.as_ref()?;
        self.resolver
            .resolves_interface_member(containing, symbol)
            .then_some(InheritReason::InterfaceImplementation)
    }
}

fn exclusion(symbol: &SymbolFacts) -> Option<ExclusionReason> {
    if !symbol.is_publicly_visible() {
        return Some(ExclusionReason::NotPublic);
    }
    if symbol.is_implicit {
        return Some(ExclusionReason::Implicit);
    }
    if symbol.is_generated {
        return Some(ExclusionReason::Generated);
    }
    if symbol.kind == SymbolKind::Namespace {
        return Some(ExclusionReason::Namespace);
    }
    if symbol.kind == SymbolKind::Field && symbol.modifiers.is_static && !symbol.modifiers.is_const
    {
        return Some(ExclusionReason::StaticField);
    }
    if symbol.is_accessor {
        return Some(ExclusionReason::Accessor);
    }
    None
}

fn without_declaration(symbol: &SymbolFacts) -> SymbolFacts {
    SymbolFacts {
        declaration: None,
        ..symbol.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{
        InterfaceFacts, InterfaceMember, Modifiers, Parameter, ReturnClass, TypeKind,
    };
    use crate::syntax::lex_trivia;

    fn declared(name: &str, kind: SymbolKind) -> SymbolFacts {
        SymbolFacts::new(name, kind).with_declaration(NodeId::new(7))
    }

    fn store_type() -> ContainingType {
        ContainingType::new("UserStore", TypeKind::Class).with_interface(InterfaceFacts {
            name: "IUserStore".into(),
            members: vec![InterfaceMember::new(
                "Find",
                SymbolKind::Method,
                vec!["int".into()],
            )],
        })
    }

    #[test]
    fn public_undocumented_method() {
        let symbol = declared("GetUser", SymbolKind::Method);
        assert_eq!(
            Classifier::new().classify(&symbol, &[]),
            Classification::Undocumented {
                target: NodeId::new(7)
            }
        );
    }

    #[test]
    fn exclusions_come_first() {
        let classifier = Classifier::new();
        let documented = lex_trivia("/// <summary>x</summary>\n");

        let private = declared("Run", SymbolKind::Method).with_accessibility(Accessibility::Private);
        assert_eq!(
            classifier.classify(&private, &documented),
            Classification::Excluded {
                reason: ExclusionReason::NotPublic
            }
        );

        let mut generated = declared("Run", SymbolKind::Method);
        generated.is_generated = true;
        assert_eq!(
            classifier.classify(&generated, &[]),
            Classification::Excluded {
                reason: ExclusionReason::Generated
            }
        );

        let namespace = declared("Contoso", SymbolKind::Namespace);
        assert_eq!(
            classifier.classify(&namespace, &[]),
            Classification::Excluded {
                reason: ExclusionReason::Namespace
            }
        );

        let mut accessor = declared("get_Name", SymbolKind::Method);
        accessor.is_accessor = true;
        assert_eq!(
            classifier.classify(&accessor, &[]),
            Classification::Excluded {
                reason: ExclusionReason::Accessor
            }
        );
    }

    #[test]
    fn static_fields_are_excluded_unless_const() {
        let classifier = Classifier::new();
        let statics = Modifiers {
            is_static: true,
            ..Modifiers::default()
        };
        let field = declared("Instance", SymbolKind::Field).with_modifiers(statics);
        assert_eq!(
            classifier.classify(&field, &[]),
            Classification::Excluded {
                reason: ExclusionReason::StaticField
            }
        );

        let constant = declared("MaxSize", SymbolKind::Field).with_modifiers(Modifiers {
            is_const: true,
            ..statics
        });
        assert!(classifier.classify(&constant, &[]).needs_edit());
    }

    #[test]
    fn metadata_only_symbol_is_satisfied() {
        let symbol = SymbolFacts::new("GetUser", SymbolKind::Method);
        assert_eq!(
            Classifier::new().classify(&symbol, &[]),
            Classification::Satisfied {
                reason: SatisfiedReason::NoDeclaration
            }
        );
    }

    #[test]
    fn existing_documentation_is_satisfied() {
        let leading = lex_trivia("    /// <inheritdoc/>\n    ");
        let mut symbol = declared("ToString", SymbolKind::Method);
        symbol.modifiers.is_override = true;
        assert_eq!(
            Classifier::new().classify(&symbol, &leading),
            Classification::Satisfied {
                reason: SatisfiedReason::AlreadyDocumented
            }
        );
    }

    #[test]
    fn override_wins_over_name_patterns() {
        let mut symbol = declared("GetHashCode", SymbolKind::Method).with_returns(ReturnClass::Plain);
        symbol.modifiers.is_override = true;
        assert_eq!(
            Classifier::new().classify(&symbol, &[]),
            Classification::InheritCandidate {
                target: NodeId::new(7),
                reason: InheritReason::Override
            }
        );
    }

    #[test]
    fn explicit_interface_implementation_inherits() {
        let mut symbol = declared("Dispose", SymbolKind::Method);
        symbol.explicit_interface_implementation = true;
        assert!(matches!(
            Classifier::new().classify(&symbol, &[]),
            Classification::InheritCandidate {
                reason: InheritReason::ExplicitInterfaceImplementation,
                ..
            }
        ));
    }

    #[test]
    fn structural_interface_match() {
        let classifier = Classifier::new();
        let symbol = declared("Find", SymbolKind::Method)
            .with_parameter(Parameter::new("id", "int", ReturnClass::Plain))
            .with_containing_type(store_type());
        assert!(matches!(
            classifier.classify(&symbol, &[]),
            Classification::InheritCandidate {
                reason: InheritReason::InterfaceImplementation,
                ..
            }
        ));

        let overload = declared("Find", SymbolKind::Method)
            .with_parameter(Parameter::new("name", "string", ReturnClass::Plain))
            .with_containing_type(store_type());
        assert!(matches!(
            classifier.classify(&overload, &[]),
            Classification::Undocumented { .. }
        ));
    }

    #[test]
    fn static_members_never_implement_interfaces() {
        let symbol = SymbolFacts::new("Find", SymbolKind::Method)
            .with_parameter(Parameter::new("id", "int", ReturnClass::Plain))
            .with_modifiers(Modifiers {
                is_static: true,
                ..Modifiers::default()
            });
        assert!(!StructuralResolver.resolves_interface_member(&store_type(), &symbol));
    }

    #[test]
    fn custom_resolver_is_consulted() {
        struct Everything;
        impl InterfaceResolver for Everything {
            fn resolves_interface_member(&self, _: &ContainingType, _: &SymbolFacts) -> bool {
                true
            }
        }

        let symbol = declared("Anything", SymbolKind::Property)
            .with_containing_type(ContainingType::new("Widget", TypeKind::Class));
        assert!(matches!(
            Classifier::with_resolver(Everything).classify(&symbol, &[]),
            Classification::InheritCandidate { .. }
        ));
    }
}
