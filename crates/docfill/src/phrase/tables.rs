//! Static rule tables for phrase synthesis.
//!
//! Tables are immutable process-wide data; ordering inside [`METHOD_RULES`]
//! is significant because the first matching prefix wins.

use phf::phf_map;

use crate::symbol::{OperatorKind, ReturnClass};

/// Signature facts a template may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureShape {
    pub returns: ReturnClass,
}

/// A prefix pattern and the templates it selects.
pub struct PhraseRule {
    /// Leading word the name must start with (whole word, case-insensitive).
    pub prefix: &'static str,
    /// Members of the Is/Has/Can family get boolean phrasing.
    pub boolean: bool,
    /// Summary template over the humanized remainder.
    pub summary: fn(&str, &SignatureShape) -> String,
    /// Object-specific `returns` template, if the prefix has one.
    pub returns: Option<fn(&str) -> String>,
}

pub const BOOLEAN_RETURN: &str = "true if the condition is met; otherwise, false.";
pub const TRY_RETURN: &str = "true if the operation succeeded; otherwise, false.";
pub const DEFAULT_RETURN: &str = "The result of the operation.";
pub const TASK_RETURN: &str = "A task that represents the asynchronous operation.";
pub const CONVERSION_RETURN: &str = "The converted value.";
pub const INDEXER_SUMMARY: &str = "Gets or sets the element at the specified index.";
pub const INDEXER_RETURN: &str = "The value at the specified index.";
pub const INDEXER_VALUE: &str = "The element at the specified index.";
pub const CUSTOM_OPERATOR: &str = "Defines a custom operator.";

pub static METHOD_RULES: &[PhraseRule] = &[
    PhraseRule {
        prefix: "Get",
        boolean: false,
        summary: gets,
        returns: Some(the),
    },
    PhraseRule {
        prefix: "Set",
        boolean: false,
        summary: sets,
        returns: None,
    },
    PhraseRule {
        prefix: "Create",
        boolean: false,
        summary: creates,
        returns: Some(the_created),
    },
    PhraseRule {
        prefix: "Delete",
        boolean: false,
        summary: deletes,
        returns: None,
    },
    PhraseRule {
        prefix: "Remove",
        boolean: false,
        summary: removes,
        returns: None,
    },
    PhraseRule {
        prefix: "Update",
        boolean: false,
        summary: updates,
        returns: None,
    },
    PhraseRule {
        prefix: "Find",
        boolean: false,
        summary: finds,
        returns: Some(the_found),
    },
    PhraseRule {
        prefix: "Calculate",
        boolean: false,
        summary: calculates,
        returns: Some(the_calculated),
    },
    PhraseRule {
        prefix: "Compute",
        boolean: false,
        summary: computes,
        returns: Some(the_computed),
    },
    PhraseRule {
        prefix: "Validate",
        boolean: false,
        summary: validates,
        returns: None,
    },
    PhraseRule {
        prefix: "Initialize",
        boolean: false,
        summary: initializes,
        returns: None,
    },
    PhraseRule {
        prefix: "Process",
        boolean: false,
        summary: processes,
        returns: None,
    },
    PhraseRule {
        prefix: "Is",
        boolean: true,
        summary: determines_whether,
        returns: None,
    },
    PhraseRule {
        prefix: "Has",
        boolean: true,
        summary: determines_whether,
        returns: None,
    },
    PhraseRule {
        prefix: "Can",
        boolean: true,
        summary: determines_whether,
        returns: None,
    },
    PhraseRule {
        prefix: "Try",
        boolean: false,
        summary: attempts,
        returns: None,
    },
];

/// Boolean-family prefixes for properties, fields and parameters.
pub const BOOLEAN_PREFIXES: &[&str] = &["Is", "Has", "Can"];

/// Conventional parameter names, keyed by lower-cased name.
pub static PARAMETER_PHRASES: phf::Map<&'static str, &'static str> = phf_map! {
    "cancellationtoken" => "The cancellation token.",
    "ct" => "The cancellation token.",
    "id" => "The identifier.",
    "sender" => "The source of the event.",
    "index" => "The zero-based index.",
    "count" => "The number of elements.",
    "length" => "The length.",
    "width" => "The width.",
    "height" => "The height.",
    "x" => "The x-coordinate.",
    "y" => "The y-coordinate.",
    "z" => "The z-coordinate.",
    "e" => "The event data.",
    "eventargs" => "The event data.",
    "args" => "The arguments.",
};

/// Fixed summary for each known operator.
pub fn operator_summary(kind: &OperatorKind) -> &'static str {
    match kind {
        OperatorKind::Addition => "Adds two values together.",
        OperatorKind::Subtraction => "Subtracts one value from another.",
        OperatorKind::Multiply => "Multiplies two values.",
        OperatorKind::Division => "Divides one value by another.",
        OperatorKind::Modulus => "Computes the remainder of dividing one value by another.",
        OperatorKind::UnaryPlus => "Returns the value unchanged.",
        OperatorKind::UnaryNegation => "Negates the value.",
        OperatorKind::LogicalNot => "Computes the logical negation of the value.",
        OperatorKind::Equality => "Determines whether two values are equal.",
        OperatorKind::Inequality => "Determines whether two values are not equal.",
        OperatorKind::LessThan => "Determines whether one value is less than another.",
        OperatorKind::GreaterThan => "Determines whether one value is greater than another.",
        OperatorKind::LessThanOrEqual => {
            "Determines whether one value is less than or equal to another."
        }
        OperatorKind::GreaterThanOrEqual => {
            "Determines whether one value is greater than or equal to another."
        }
        OperatorKind::BitwiseAnd => "Computes the bitwise AND of two values.",
        OperatorKind::BitwiseOr => "Computes the bitwise OR of two values.",
        OperatorKind::ExclusiveOr => "Computes the bitwise exclusive OR of two values.",
        OperatorKind::OnesComplement => "Computes the bitwise complement of the value.",
        OperatorKind::LeftShift => "Shifts the value left by the specified number of bits.",
        OperatorKind::RightShift => "Shifts the value right by the specified number of bits.",
        OperatorKind::UnsignedRightShift => {
            "Shifts the value right by the specified number of bits, filling with zeros."
        }
        OperatorKind::Increment => "Increments the value by one.",
        OperatorKind::Decrement => "Decrements the value by one.",
        OperatorKind::True => "Determines whether the value is true.",
        OperatorKind::False => "Determines whether the value is false.",
        OperatorKind::Implicit => "Implicitly converts the value.",
        OperatorKind::Explicit => "Explicitly converts the value.",
        OperatorKind::Other(_) => CUSTOM_OPERATOR,
    }
}

fn gets(r: &str, _: &SignatureShape) -> String {
    format!("Gets the {r}.")
}

fn sets(r: &str, _: &SignatureShape) -> String {
    format!("Sets the {r}.")
}

fn creates(r: &str, _: &SignatureShape) -> String {
    format!("Creates a new {r}.")
}

fn deletes(r: &str, _: &SignatureShape) -> String {
    format!("Deletes the {r}.")
}

fn removes(r: &str, _: &SignatureShape) -> String {
    format!("Removes the {r}.")
}

fn updates(r: &str, _: &SignatureShape) -> String {
    format!("Updates the {r}.")
}

fn finds(r: &str, _: &SignatureShape) -> String {
    format!("Finds the {r}.")
}

fn calculates(r: &str, _: &SignatureShape) -> String {
    format!("Calculates the {r}.")
}

fn computes(r: &str, _: &SignatureShape) -> String {
    format!("Computes the {r}.")
}

fn validates(r: &str, _: &SignatureShape) -> String {
    format!("Validates the {r}.")
}

fn initializes(r: &str, _: &SignatureShape) -> String {
    format!("Initializes the {r}.")
}

fn processes(r: &str, _: &SignatureShape) -> String {
    format!("Processes the {r}.")
}

fn determines_whether(r: &str, _: &SignatureShape) -> String {
    format!("Determines whether {r}.")
}

fn attempts(r: &str, shape: &SignatureShape) -> String {
    if shape.returns == ReturnClass::Boolean {
        format!("Returns true if able to {r}, otherwise false.")
    } else {
        format!("Attempts to {r}.")
    }
}

fn the(r: &str) -> String {
    format!("The {r}.")
}

fn the_created(r: &str) -> String {
    format!("The created {r}.")
}

fn the_found(r: &str) -> String {
    format!("The {r}, if found.")
}

fn the_calculated(r: &str) -> String {
    format!("The calculated {r}.")
}

fn the_computed(r: &str) -> String {
    format!("The computed {r}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_puts_try_last() {
        let prefixes: Vec<_> = METHOD_RULES.iter().map(|rule| rule.prefix).collect();
        assert_eq!(prefixes.first(), Some(&"Get"));
        assert_eq!(prefixes.last(), Some(&"Try"));
        let is_pos = prefixes.iter().position(|p| *p == "Is");
        let process_pos = prefixes.iter().position(|p| *p == "Process");
        assert!(process_pos < is_pos);
    }

    #[test]
    fn parameter_table_keys_are_lower_case() {
        for key in PARAMETER_PHRASES.keys() {
            assert_eq!(*key, key.to_lowercase());
        }
    }

    #[test]
    fn unknown_operator_gets_custom_phrase() {
        assert_eq!(
            operator_summary(&OperatorKind::Other("Spaceship".into())),
            CUSTOM_OPERATOR
        );
    }
}
