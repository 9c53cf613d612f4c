//! Phrase synthesis: drafting natural-language documentation from names.
//!
//! Dispatch is by [`SymbolKind`] first, then by the ordered prefix rules in
//! [`tables::METHOD_RULES`]; the first rule that matches wins. Every phrase is
//! a pure function of the symbol's kind, name and signature shape.
//!
//! ```
//! use docfill::phrase::PhraseBuilder;
//! use docfill::symbol::{Parameter, ReturnClass, SymbolFacts, SymbolKind};
//!
//! let method = SymbolFacts::new("GetUserById", SymbolKind::Method)
//!     .with_parameter(Parameter::new("id", "int", ReturnClass::Plain))
//!     .with_returns(ReturnClass::Plain);
//!
//! let phrases = PhraseBuilder::default();
//! assert_eq!(phrases.summary(&method), "Gets the user by id.");
//! assert_eq!(phrases.parameter(&method.parameters[0]), "The identifier.");
//! assert_eq!(phrases.returns(&method).as_deref(), Some("The user by id."));
//! ```

pub mod tables;

use docfill_config::SynthesisOptions;

use crate::naming::NameTokens;
use crate::symbol::{OperatorKind, Parameter, ReturnClass, SymbolFacts, SymbolKind, TypeKind};
use tables::{
    BOOLEAN_PREFIXES, BOOLEAN_RETURN, CONVERSION_RETURN, DEFAULT_RETURN, INDEXER_RETURN,
    INDEXER_SUMMARY, INDEXER_VALUE, METHOD_RULES, PARAMETER_PHRASES, PhraseRule, SignatureShape,
    TASK_RETURN, TRY_RETURN, operator_summary,
};

const ASYNC_SUFFIX: &str = "Async";
const ID_SUFFIX: &str = "Id";

/// Synthesizes the phrases of a documentation block.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseBuilder {
    options: SynthesisOptions,
}

impl PhraseBuilder {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SynthesisOptions {
        self.options
    }

    /// Summary sentence for `symbol`.
    pub fn summary(&self, symbol: &SymbolFacts) -> String {
        let tokens = NameTokens::parse(&symbol.name);
        match &symbol.kind {
            SymbolKind::Type(kind) => self.type_summary(*kind, &tokens),
            SymbolKind::Delegate => format!("A {} delegate.", tokens.humanize()),
            SymbolKind::Constructor => {
                let type_name = symbol
                    .containing_type
                    .as_ref()
                    .map_or(symbol.name.as_str(), |ty| ty.name.as_str());
                format!("Initializes a new instance of the {type_name} class.")
            }
            SymbolKind::Operator(kind) => operator_summary(kind).to_string(),
            SymbolKind::Method => self.method_summary(&tokens, shape_of(symbol)),
            SymbolKind::Property => member_phrase(&tokens, MemberStyle::Property),
            SymbolKind::Field => member_phrase(&tokens, MemberStyle::Field),
            SymbolKind::Indexer => INDEXER_SUMMARY.to_string(),
            SymbolKind::Event => format!("Occurs when {}.", tokens.humanize()),
            SymbolKind::Namespace => format!("The {} namespace.", tokens.humanize()),
        }
    }

    /// Description of one parameter.
    pub fn parameter(&self, parameter: &Parameter) -> String {
        if let Some(phrase) = PARAMETER_PHRASES.get(parameter.name.to_lowercase().as_str()) {
            return (*phrase).to_string();
        }

        let tokens = NameTokens::parse(&parameter.name);
        if let Some(prefix) = tokens.strip_suffix(ID_SUFFIX) {
            return format!("The {} identifier.", prefix.humanize());
        }
        if let Some(rest) = strip_boolean_prefix(&tokens) {
            return format!("A value indicating whether {}.", rest.humanize());
        }
        format!("The {}.", tokens.humanize())
    }

    /// `returns` text for method-like symbols.
    ///
    /// `None` when the kind never carries a returns tag or the return is void.
    /// Indexers always get their fixed text.
    pub fn returns(&self, symbol: &SymbolFacts) -> Option<String> {
        match &symbol.kind {
            SymbolKind::Indexer => Some(INDEXER_RETURN.to_string()),
            SymbolKind::Method | SymbolKind::Delegate | SymbolKind::Operator(_)
                if symbol.returns == ReturnClass::Void =>
            {
                None
            }
            SymbolKind::Operator(kind) => Some(operator_return(kind, symbol.returns).to_string()),
            SymbolKind::Method | SymbolKind::Delegate => {
                let tokens = NameTokens::parse(&symbol.name);
                Some(self.method_return(&tokens, symbol.returns))
            }
            SymbolKind::Type(_)
            | SymbolKind::Constructor
            | SymbolKind::Property
            | SymbolKind::Field
            | SymbolKind::Event
            | SymbolKind::Namespace => None,
        }
    }

    /// `value` text for properties and indexers.
    pub fn value(&self, symbol: &SymbolFacts) -> Option<String> {
        match symbol.kind {
            SymbolKind::Property => {
                let tokens = NameTokens::parse(&symbol.name);
                Some(member_phrase(&tokens, MemberStyle::Value))
            }
            SymbolKind::Indexer => Some(INDEXER_VALUE.to_string()),
            _ => None,
        }
    }

    /// Description of a generic type parameter.
    pub fn type_parameter(&self, name: &str) -> String {
        match name {
            "T" => "The type of the value.".to_string(),
            "TKey" => "The type of the key.".to_string(),
            _ => {
                let tokens = NameTokens::parse(name);
                let tokens = tokens.strip_prefix("T").unwrap_or(tokens);
                format!("The {} type.", tokens.humanize())
            }
        }
    }

    fn type_summary(&self, kind: TypeKind, tokens: &NameTokens) -> String {
        let tokens = match kind {
            TypeKind::Interface if self.options.strip_interface_prefix => {
                tokens.strip_prefix("I").unwrap_or_else(|| tokens.clone())
            }
            _ => tokens.clone(),
        };
        let name = tokens.humanize();
        match kind {
            TypeKind::Class => format!("A class that represents {name}."),
            TypeKind::Interface => format!("An {name} interface."),
            TypeKind::Struct => format!("A {name} structure."),
            TypeKind::Enum => format!("An {name} enumeration."),
        }
    }

    fn method_summary(&self, tokens: &NameTokens, shape: SignatureShape) -> String {
        if let Some(base) = tokens.strip_suffix(ASYNC_SUFFIX) {
            let base_shape = SignatureShape {
                returns: unwrap_task(shape.returns),
            };
            let summary = self.method_summary(&base, base_shape);
            let trimmed = summary.strip_suffix('.').unwrap_or(&summary);
            return format!("{trimmed} asynchronously.");
        }

        if let Some((rule, rest)) = self.match_rule(tokens, shape.returns) {
            tracing::trace!(prefix = rule.prefix, name = %tokens, "method rule matched");
            return (rule.summary)(&rest.humanize(), &shape);
        }

        let name = tokens.humanize();
        match shape.returns {
            ReturnClass::Void => format!("Performs {name}."),
            ReturnClass::Boolean => format!("Determines {name}."),
            ReturnClass::TaskWrapped | ReturnClass::Generic | ReturnClass::Plain => {
                format!("Gets {name}.")
            }
        }
    }

    fn method_return(&self, tokens: &NameTokens, returns: ReturnClass) -> String {
        if returns == ReturnClass::TaskWrapped {
            let base = tokens
                .strip_suffix(ASYNC_SUFFIX)
                .unwrap_or_else(|| tokens.clone());
            return match self.rule_return(&base, ReturnClass::TaskWrapped) {
                Some(phrase) => format!(
                    "{TASK_RETURN} The task result contains {}",
                    lower_first(&phrase)
                ),
                None => TASK_RETURN.to_string(),
            };
        }
        self.rule_return(tokens, returns)
            .unwrap_or_else(|| DEFAULT_RETURN.to_string())
    }

    /// Return phrase of the first matching rule, if that rule has one.
    fn rule_return(&self, tokens: &NameTokens, returns: ReturnClass) -> Option<String> {
        let (rule, rest) = self.match_rule(tokens, returns)?;
        if rule.boolean {
            return Some(BOOLEAN_RETURN.to_string());
        }
        if rule.prefix == "Try" {
            return Some(TRY_RETURN.to_string());
        }
        rule.returns.map(|template| template(&rest.humanize()))
    }

    fn match_rule(
        &self,
        tokens: &NameTokens,
        returns: ReturnClass,
    ) -> Option<(&'static PhraseRule, NameTokens)> {
        METHOD_RULES.iter().find_map(|rule| {
            let rest = tokens.strip_prefix(rule.prefix)?;
            if rule.boolean && self.options.gate_boolean_prefixes && !is_boolean(returns) {
                return None;
            }
            Some((rule, rest))
        })
    }
}

#[derive(Clone, Copy)]
enum MemberStyle {
    Property,
    Field,
    Value,
}

/// Property, field and value phrasing share one rule ladder.
fn member_phrase(tokens: &NameTokens, style: MemberStyle) -> String {
    if let Some(rest) = strip_boolean_prefix(tokens) {
        let r = rest.humanize();
        return match style {
            MemberStyle::Property => format!("Gets or sets a value indicating whether {r}."),
            MemberStyle::Field => format!("A value indicating whether {r}."),
            MemberStyle::Value => format!("true if {r}; otherwise, false."),
        };
    }
    if let Some(prefix) = tokens.strip_suffix(ID_SUFFIX) {
        let p = prefix.humanize();
        return match style {
            MemberStyle::Property => format!("Gets or sets the {p} identifier."),
            MemberStyle::Field | MemberStyle::Value => format!("The {p} identifier."),
        };
    }
    let name = tokens.humanize();
    match style {
        MemberStyle::Property => format!("Gets or sets the {name}."),
        MemberStyle::Field | MemberStyle::Value => format!("The {name}."),
    }
}

fn strip_boolean_prefix(tokens: &NameTokens) -> Option<NameTokens> {
    BOOLEAN_PREFIXES
        .iter()
        .find_map(|prefix| tokens.strip_prefix(prefix))
}

fn operator_return(kind: &OperatorKind, returns: ReturnClass) -> &'static str {
    if kind.is_conversion() {
        CONVERSION_RETURN
    } else if returns == ReturnClass::Boolean {
        BOOLEAN_RETURN
    } else {
        DEFAULT_RETURN
    }
}

fn shape_of(symbol: &SymbolFacts) -> SignatureShape {
    SignatureShape {
        returns: symbol.returns,
    }
}

fn is_boolean(returns: ReturnClass) -> bool {
    returns == ReturnClass::Boolean
}

/// The base name of an `…Async` method is phrased as if it returned nothing.
fn unwrap_task(returns: ReturnClass) -> ReturnClass {
    match returns {
        ReturnClass::TaskWrapped => ReturnClass::Void,
        other => other,
    }
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
