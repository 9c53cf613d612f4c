//! Ordering synthesized phrases into documentation blocks.

use std::fmt;

use serde::Serialize;

use crate::classify::Classification;
use crate::phrase::PhraseBuilder;
use crate::symbol::{SymbolFacts, SymbolKind};

/// The closed set of tags this crate emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagName {
    Summary,
    TypeParam,
    Param,
    Returns,
    Value,
}

impl TagName {
    pub fn as_str(self) -> &'static str {
        match self {
            TagName::Summary => "summary",
            TagName::TypeParam => "typeparam",
            TagName::Param => "param",
            TagName::Returns => "returns",
            TagName::Value => "value",
        }
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a documentation block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: TagName,
    /// `name` attribute of `param` and `typeparam` tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    pub text: String,
}

impl Tag {
    pub fn new(name: TagName, text: impl Into<String>) -> Self {
        Self {
            name,
            attribute: None,
            text: text.into(),
        }
    }

    pub fn named(name: TagName, attribute: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name,
            attribute: Some(attribute.into()),
            text: text.into(),
        }
    }
}

/// Ordered tags for one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentationBlock {
    tags: Vec<Tag>,
}

impl DocumentationBlock {
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn summary(&self) -> Option<&str> {
        self.first(TagName::Summary)
    }

    pub fn returns(&self) -> Option<&str> {
        self.first(TagName::Returns)
    }

    pub fn value(&self) -> Option<&str> {
        self.first(TagName::Value)
    }

    /// `(name, text)` of every `param` tag, in order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named(TagName::Param)
    }

    /// `(name, text)` of every `typeparam` tag, in order.
    pub fn type_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named(TagName::TypeParam)
    }

    fn first(&self, name: TagName) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.text.as_str())
    }

    fn named(&self, name: TagName) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().filter(move |tag| tag.name == name).map(|tag| {
            (
                tag.attribute.as_deref().unwrap_or_default(),
                tag.text.as_str(),
            )
        })
    }

    fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }
}

/// What gets written above a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "block", rename_all = "snake_case")]
pub enum DocContent {
    Block(DocumentationBlock),
    /// The single inheritance marker line.
    InheritMarker,
}

/// Builds [`DocumentationBlock`]s from symbol facts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockAssembler {
    phrases: PhraseBuilder,
}

impl BlockAssembler {
    pub fn new(phrases: PhraseBuilder) -> Self {
        Self { phrases }
    }

    pub fn phrases(&self) -> &PhraseBuilder {
        &self.phrases
    }

    /// Full block for `symbol`: summary, typeparams, params, returns, value.
    pub fn assemble(&self, symbol: &SymbolFacts) -> DocumentationBlock {
        let mut block = DocumentationBlock::default();
        block.push(Tag::new(TagName::Summary, self.phrases.summary(symbol)));

        if takes_type_parameters(&symbol.kind) {
            for name in &symbol.type_parameters {
                block.push(Tag::named(
                    TagName::TypeParam,
                    name,
                    self.phrases.type_parameter(name),
                ));
            }
        }

        if takes_parameters(&symbol.kind) {
            for parameter in &symbol.parameters {
                block.push(Tag::named(
                    TagName::Param,
                    &parameter.name,
                    self.phrases.parameter(parameter),
                ));
            }
        }

        if let Some(text) = self.phrases.returns(symbol) {
            block.push(Tag::new(TagName::Returns, text));
        }

        if let Some(text) = self.phrases.value(symbol) {
            block.push(Tag::new(TagName::Value, text));
        }

        block
    }

    /// Content for a classification, or `None` when no edit is needed.
    pub fn content_for(
        &self,
        symbol: &SymbolFacts,
        classification: &Classification,
    ) -> Option<DocContent> {
        match classification {
            Classification::Undocumented { .. } => Some(DocContent::Block(self.assemble(symbol))),
            Classification::InheritCandidate { .. } => Some(DocContent::InheritMarker),
            Classification::Satisfied { .. } | Classification::Excluded { .. } => None,
        }
    }
}

fn takes_type_parameters(kind: &SymbolKind) -> bool {
    matches!(
        kind,
        SymbolKind::Type(_) | SymbolKind::Delegate | SymbolKind::Method
    )
}

fn takes_parameters(kind: &SymbolKind) -> bool {
    match kind {
        SymbolKind::Method
        | SymbolKind::Constructor
        | SymbolKind::Operator(_)
        | SymbolKind::Delegate
        | SymbolKind::Indexer => true,
        SymbolKind::Type(_)
        | SymbolKind::Property
        | SymbolKind::Field
        | SymbolKind::Event
        | SymbolKind::Namespace => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{ContainingType, OperatorKind, Parameter, ReturnClass, TypeKind};
    use crate::syntax::NodeId;

    fn names(block: &DocumentationBlock) -> Vec<TagName> {
        block.tags().iter().map(|tag| tag.name).collect()
    }

    #[test]
    fn generic_method_orders_tags() {
        let symbol = SymbolFacts::new("Convert", SymbolKind::Method)
            .with_type_parameter("TResult")
            .with_parameter(Parameter::new("source", "object", ReturnClass::Plain))
            .with_parameter(Parameter::new("cancellationToken", "CancellationToken", ReturnClass::Plain))
            .with_returns(ReturnClass::Generic);
        let block = BlockAssembler::default().assemble(&symbol);

        assert_eq!(
            names(&block),
            [
                TagName::Summary,
                TagName::TypeParam,
                TagName::Param,
                TagName::Param,
                TagName::Returns
            ]
        );
        let params: Vec<_> = block.params().map(|(name, _)| name).collect();
        assert_eq!(params, ["source", "cancellationToken"]);
    }

    #[test]
    fn void_method_has_no_returns() {
        let symbol = SymbolFacts::new("Reset", SymbolKind::Method);
        let block = BlockAssembler::default().assemble(&symbol);
        assert_eq!(names(&block), [TagName::Summary]);
        assert_eq!(block.summary(), Some("Performs reset."));
    }

    #[test]
    fn property_gets_value_not_returns() {
        let symbol = SymbolFacts::new("UserName", SymbolKind::Property).with_returns(ReturnClass::Plain);
        let block = BlockAssembler::default().assemble(&symbol);
        assert_eq!(names(&block), [TagName::Summary, TagName::Value]);
        assert_eq!(block.summary(), Some("Gets or sets the user name."));
        assert_eq!(block.value(), Some("The user name."));
    }

    #[test]
    fn indexer_returns_follow_params() {
        let symbol = SymbolFacts::new("this[]", SymbolKind::Indexer)
            .with_parameter(Parameter::new("index", "int", ReturnClass::Plain))
            .with_returns(ReturnClass::Plain);
        let block = BlockAssembler::default().assemble(&symbol);
        assert_eq!(
            names(&block),
            [TagName::Summary, TagName::Param, TagName::Returns, TagName::Value]
        );
        assert_eq!(block.returns(), Some("The value at the specified index."));
    }

    #[test]
    fn constructor_never_returns() {
        let symbol = SymbolFacts::new(".ctor", SymbolKind::Constructor)
            .with_containing_type(ContainingType::new("Widget", TypeKind::Class))
            .with_parameter(Parameter::new("width", "int", ReturnClass::Plain))
            .with_returns(ReturnClass::Plain);
        let block = BlockAssembler::default().assemble(&symbol);
        assert_eq!(names(&block), [TagName::Summary, TagName::Param]);
    }

    #[test]
    fn events_and_fields_are_summary_only() {
        let assembler = BlockAssembler::default();
        for kind in [SymbolKind::Event, SymbolKind::Field] {
            let symbol = SymbolFacts::new("Changed", kind).with_returns(ReturnClass::Plain);
            assert_eq!(names(&assembler.assemble(&symbol)), [TagName::Summary]);
        }
    }

    #[test]
    fn delegate_and_generic_type() {
        let assembler = BlockAssembler::default();
        let delegate = SymbolFacts::new("Mapper", SymbolKind::Delegate)
            .with_type_parameter("T")
            .with_parameter(Parameter::new("item", "T", ReturnClass::Generic))
            .with_returns(ReturnClass::Boolean);
        assert_eq!(
            names(&assembler.assemble(&delegate)),
            [
                TagName::Summary,
                TagName::TypeParam,
                TagName::Param,
                TagName::Returns
            ]
        );

        let ty = SymbolFacts::new("Cache", SymbolKind::Type(TypeKind::Class))
            .with_type_parameter("TKey")
            .with_type_parameter("TValue");
        let block = assembler.assemble(&ty);
        let type_params: Vec<_> = block.type_params().collect();
        assert_eq!(
            type_params,
            [
                ("TKey", "The type of the key."),
                ("TValue", "The value type.")
            ]
        );
    }

    #[test]
    fn binary_operator_params_and_returns() {
        let symbol = SymbolFacts::new("op_Addition", SymbolKind::Operator(OperatorKind::Addition))
            .with_parameter(Parameter::new("left", "Money", ReturnClass::Plain))
            .with_parameter(Parameter::new("right", "Money", ReturnClass::Plain))
            .with_returns(ReturnClass::Plain);
        let block = BlockAssembler::default().assemble(&symbol);
        assert_eq!(block.params().count(), 2);
        assert_eq!(block.returns(), Some("The result of the operation."));
    }

    #[test]
    fn content_follows_classification() {
        let assembler = BlockAssembler::default();
        let symbol = SymbolFacts::new("GetHashCode", SymbolKind::Method);
        let target = NodeId::new(1);

        assert_eq!(
            assembler.content_for(
                &symbol,
                &Classification::InheritCandidate {
                    target,
                    reason: crate::classify::InheritReason::Override
                }
            ),
            Some(DocContent::InheritMarker)
        );
        assert!(matches!(
            assembler.content_for(&symbol, &Classification::Undocumented { target }),
            Some(DocContent::Block(_))
        ));
        assert!(
            assembler
                .content_for(
                    &symbol,
                    &Classification::Satisfied {
                        reason: crate::classify::SatisfiedReason::AlreadyDocumented
                    }
                )
                .is_none()
        );
    }
}
