//! Symbol facts supplied by the enumeration host.
//!
//! The core performs no semantic analysis of its own: accessibility, override
//! status, containing type and implemented interfaces all arrive precomputed.

use serde::{Deserialize, Serialize};

use crate::syntax::NodeId;

/// Declaration kind.
///
/// Closed set; every phrase and assembly rule matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum SymbolKind {
    Type(TypeKind),
    Method,
    Constructor,
    Operator(OperatorKind),
    Property,
    Indexer,
    Field,
    Event,
    Delegate,
    /// Container without a documentable surface of its own.
    Namespace,
}

impl SymbolKind {
    /// Word used in diagnostic messages ("method", "property", ...).
    pub fn member_word(&self) -> &'static str {
        match self {
            SymbolKind::Type(kind) => kind.keyword(),
            SymbolKind::Method => "method",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Operator(_) => "operator",
            SymbolKind::Property => "property",
            SymbolKind::Indexer => "indexer",
            SymbolKind::Field => "field",
            SymbolKind::Event => "event",
            SymbolKind::Delegate => "delegate",
            SymbolKind::Namespace => "namespace",
        }
    }
}

/// Flavour of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
        }
    }
}

/// Operator identity, named after the metadata names hosts emit (`op_Addition`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Addition,
    Subtraction,
    Multiply,
    Division,
    Modulus,
    UnaryPlus,
    UnaryNegation,
    LogicalNot,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    OnesComplement,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Increment,
    Decrement,
    True,
    False,
    Implicit,
    Explicit,
    /// Anything the lookup table does not know.
    Other(String),
}

impl OperatorKind {
    /// Maps a metadata operator name such as `op_Addition` to its identity.
    pub fn from_metadata_name(name: &str) -> Self {
        let bare = name.strip_prefix("op_").unwrap_or(name);
        match bare {
            "Addition" => OperatorKind::Addition,
            "Subtraction" => OperatorKind::Subtraction,
            "Multiply" => OperatorKind::Multiply,
            "Division" => OperatorKind::Division,
            "Modulus" => OperatorKind::Modulus,
            "UnaryPlus" => OperatorKind::UnaryPlus,
            "UnaryNegation" => OperatorKind::UnaryNegation,
            "LogicalNot" => OperatorKind::LogicalNot,
            "Equality" => OperatorKind::Equality,
            "Inequality" => OperatorKind::Inequality,
            "LessThan" => OperatorKind::LessThan,
            "GreaterThan" => OperatorKind::GreaterThan,
            "LessThanOrEqual" => OperatorKind::LessThanOrEqual,
            "GreaterThanOrEqual" => OperatorKind::GreaterThanOrEqual,
            "BitwiseAnd" => OperatorKind::BitwiseAnd,
            "BitwiseOr" => OperatorKind::BitwiseOr,
            "ExclusiveOr" => OperatorKind::ExclusiveOr,
            "OnesComplement" => OperatorKind::OnesComplement,
            "LeftShift" => OperatorKind::LeftShift,
            "RightShift" => OperatorKind::RightShift,
            "UnsignedRightShift" => OperatorKind::UnsignedRightShift,
            "Increment" => OperatorKind::Increment,
            "Decrement" => OperatorKind::Decrement,
            "True" => OperatorKind::True,
            "False" => OperatorKind::False,
            "Implicit" => OperatorKind::Implicit,
            "Explicit" => OperatorKind::Explicit,
            other => OperatorKind::Other(other.to_string()),
        }
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, OperatorKind::Implicit | OperatorKind::Explicit)
    }
}

/// Declared accessibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Protected,
    ProtectedInternal,
    Internal,
    PrivateProtected,
    #[default]
    Private,
}

/// Coarse shape of a return (or parameter) type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnClass {
    #[default]
    Void,
    Boolean,
    /// `Task`, `Task<T>`, `ValueTask<T>` and friends.
    TaskWrapped,
    /// An open type parameter such as `T`.
    Generic,
    Plain,
}

/// Declaration modifiers relevant to classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_const: bool,
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Display name of the parameter type, used for interface signature matching.
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub class: ReturnClass,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, class: ReturnClass) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            class,
        }
    }
}

/// Signature of one interface member, as seen from an implementing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceMember {
    pub name: String,
    pub kind: SymbolKind,
    /// Parameter type names in declaration order.
    #[serde(default)]
    pub parameter_types: Vec<String>,
}

impl InterfaceMember {
    pub fn new(name: impl Into<String>, kind: SymbolKind, parameter_types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            parameter_types,
        }
    }
}

/// An interface with the members an implementer must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceFacts {
    pub name: String,
    #[serde(default)]
    pub members: Vec<InterfaceMember>,
}

/// The type that declares a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainingType {
    pub name: String,
    pub kind: TypeKind,
    /// Accessibility after folding in every enclosing type.
    pub effective_accessibility: Accessibility,
    /// Every interface the type implements, directly or through bases and other interfaces.
    #[serde(default)]
    pub all_interfaces: Vec<InterfaceFacts>,
}

impl ContainingType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            effective_accessibility: Accessibility::Public,
            all_interfaces: Vec::new(),
        }
    }

    pub fn with_interface(mut self, interface: InterfaceFacts) -> Self {
        self.all_interfaces.push(interface);
        self
    }
}

/// Everything the core knows about one declared symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolFacts {
    pub name: String,
    pub kind: SymbolKind,
    pub accessibility: Accessibility,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub returns: ReturnClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing_type: Option<ContainingType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub explicit_interface_implementation: bool,
    /// Declared by the compiler rather than in source.
    #[serde(default)]
    pub is_implicit: bool,
    /// Flagged by the host as generated code.
    #[serde(default)]
    pub is_generated: bool,
    /// A `get`/`set`/`add`/`remove` accessor method.
    #[serde(default)]
    pub is_accessor: bool,
    /// Declaration node in the syntax tree; `None` for metadata-only symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<NodeId>,
}

impl SymbolFacts {
    /// Creates a public symbol with no parameters and a void return.
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            accessibility: Accessibility::Public,
            modifiers: Modifiers::default(),
            parameters: Vec::new(),
            returns: ReturnClass::Void,
            containing_type: None,
            type_parameters: Vec::new(),
            explicit_interface_implementation: false,
            is_implicit: false,
            is_generated: false,
            is_accessor: false,
            declaration: None,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_returns(mut self, returns: ReturnClass) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_containing_type(mut self, containing: ContainingType) -> Self {
        self.containing_type = Some(containing);
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    pub fn with_declaration(mut self, node: NodeId) -> Self {
        self.declaration = Some(node);
        self
    }

    /// Declared accessibility is public and so is every enclosing type.
    pub fn is_publicly_visible(&self) -> bool {
        let containing_public = self
            .containing_type
            .as_ref()
            .is_none_or(|ty| ty.effective_accessibility == Accessibility::Public);
        self.accessibility == Accessibility::Public && containing_public
    }

    /// Parameter type names, in order, for signature matching.
    pub fn parameter_types(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.type_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_metadata_names_resolve() {
        assert_eq!(
            OperatorKind::from_metadata_name("op_Addition"),
            OperatorKind::Addition
        );
        assert_eq!(
            OperatorKind::from_metadata_name("Implicit"),
            OperatorKind::Implicit
        );
        assert_eq!(
            OperatorKind::from_metadata_name("op_Spaceship"),
            OperatorKind::Other("Spaceship".to_string())
        );
    }

    #[test]
    fn visibility_folds_containing_type() {
        let mut hidden = ContainingType::new("Hidden", TypeKind::Class);
        hidden.effective_accessibility = Accessibility::Internal;

        let symbol = SymbolFacts::new("Run", SymbolKind::Method).with_containing_type(hidden);
        assert!(!symbol.is_publicly_visible());

        let symbol = SymbolFacts::new("Run", SymbolKind::Method)
            .with_containing_type(ContainingType::new("Shown", TypeKind::Class));
        assert!(symbol.is_publicly_visible());
    }

    #[test]
    fn symbol_facts_deserialize_with_defaults() {
        let json = r#"{
            "name": "GetUser",
            "kind": { "kind": "method" },
            "accessibility": "public",
            "returns": "plain",
            "parameters": [{ "name": "id", "type_name": "int", "class": "plain" }]
        }"#;
        let symbol: SymbolFacts = serde_json::from_str(json).expect("valid symbol json");
        assert_eq!(symbol.kind, SymbolKind::Method);
        assert_eq!(symbol.parameters.len(), 1);
        assert!(symbol.declaration.is_none());
        assert!(!symbol.modifiers.is_override);
    }
}
