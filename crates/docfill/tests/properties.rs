//! Property-based tests for decomposition and synthesis.

use docfill::{
    BlockAssembler, Classifier, NameTokens, Parameter, ReturnClass, SymbolFacts, SymbolKind,
    TagName, decompose,
};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,24}"
}

fn return_class() -> impl Strategy<Value = ReturnClass> {
    prop_oneof![
        Just(ReturnClass::Void),
        Just(ReturnClass::Boolean),
        Just(ReturnClass::TaskWrapped),
        Just(ReturnClass::Generic),
        Just(ReturnClass::Plain),
    ]
}

fn method() -> impl Strategy<Value = SymbolFacts> {
    (
        identifier(),
        prop::collection::vec(identifier(), 0..6),
        return_class(),
    )
        .prop_map(|(name, params, returns)| {
            params
                .into_iter()
                .fold(SymbolFacts::new(name, SymbolKind::Method), |symbol, p| {
                    symbol.with_parameter(Parameter::new(p, "object", ReturnClass::Plain))
                })
                .with_returns(returns)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Words only ever drop separators: letters and digits survive in order.
    #[test]
    fn prop_decompose_keeps_alphanumerics(name in identifier()) {
        let words = decompose(&name);
        let joined: String = words.concat();
        let expected: String = name.chars().filter(|c| c.is_alphanumeric()).collect();
        if expected.is_empty() {
            prop_assert_eq!(words, vec![name]);
        } else {
            prop_assert_eq!(joined, expected);
            prop_assert!(words.iter().all(|w| !w.is_empty()));
        }
    }

    #[test]
    fn prop_decompose_is_deterministic(name in identifier()) {
        prop_assert_eq!(NameTokens::parse(&name), NameTokens::parse(&name));
    }

    /// N parameters give N param tags in order, and a returns tag iff non-void.
    #[test]
    fn prop_block_mirrors_signature(symbol in method()) {
        let block = BlockAssembler::default().assemble(&symbol);

        let params: Vec<&str> = block.params().map(|(name, _)| name).collect();
        let declared: Vec<&str> = symbol.parameters.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(params, declared);

        prop_assert_eq!(block.returns().is_some(), symbol.returns != ReturnClass::Void);
        prop_assert_eq!(block.tags()[0].name, TagName::Summary);
        prop_assert_eq!(
            block.tags().iter().filter(|t| t.name == TagName::Summary).count(),
            1
        );
    }

    #[test]
    fn prop_synthesis_is_deterministic(symbol in method()) {
        let assembler = BlockAssembler::default();
        prop_assert_eq!(assembler.assemble(&symbol), assembler.assemble(&symbol.clone()));
    }

    #[test]
    fn prop_classification_is_deterministic(symbol in method()) {
        let classifier = Classifier::new();
        prop_assert_eq!(classifier.classify(&symbol, &[]), classifier.classify(&symbol, &[]));
    }
}
