//! Documentation obligation classifier and synthesis engine.
//!
//! `docfill` decides which public declarations of a program need a
//! documentation comment, drafts one from the declaration's name and
//! signature, and writes it into an immutable syntax tree without touching
//! any other text.
//!
//! The pipeline, leaf first:
//!
//! - [`naming`] splits identifiers into words.
//! - [`phrase`] turns words and signature shape into sentences.
//! - [`classify`] decides whether a declaration needs a block, an
//!   inheritance marker, or nothing.
//! - [`assemble`] orders phrases into a [`DocumentationBlock`].
//! - [`insert`] renders the block as comment lines above the declaration.
//!
//! [`DocumentAnalyzer`] runs the whole pipeline over a document and
//! [`apply_fixes`] writes the results.
//!
//! ```
//! use docfill::{CancellationFlag, DocumentAnalyzer, SymbolFacts, SymbolKind, TreeBuilder, SyntaxTree};
//!
//! let mut b = TreeBuilder::new();
//! let decl = b.declaration().token("public void ").name("Flush").token("() {}").trailing("\n");
//! let symbol = SymbolFacts::new("Flush", SymbolKind::Method).with_declaration(decl.id());
//! let tree = SyntaxTree::new(b.root().child(decl.build()).build());
//!
//! let fixed = DocumentAnalyzer::default()
//!     .fix_all(&tree, &[symbol], &CancellationFlag::new())
//!     .unwrap();
//! assert_eq!(
//!     fixed.text(),
//!     "/// <summary>Performs flush.</summary>\npublic void Flush() {}\n"
//! );
//! ```

pub mod analyzer;
pub mod annotation;
pub mod assemble;
pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod insert;
#[cfg(feature = "logging")]
pub mod logging;
pub mod naming;
pub mod phrase;
pub mod symbol;
pub mod syntax;

pub use analyzer::{Analysis, CancellationFlag, DocumentAnalyzer, DocumentFix, apply_fixes};
pub use assemble::{BlockAssembler, DocContent, DocumentationBlock, Tag, TagName};
pub use classify::{
    Classification, Classifier, ExclusionReason, InheritReason, InterfaceResolver,
    SatisfiedReason, StructuralResolver,
};
pub use diagnostics::DocDiagnostic;
pub use error::{DocfillError, Result};
pub use insert::insert_documentation;
pub use naming::{NameTokens, decompose};
pub use phrase::PhraseBuilder;
pub use symbol::{
    Accessibility, ContainingType, InterfaceFacts, InterfaceMember, Modifiers, OperatorKind,
    Parameter, ReturnClass, SymbolFacts, SymbolKind, TypeKind,
};
pub use syntax::{NodeId, SyntaxNode, SyntaxTree, TreeBuilder, Trivia, TriviaKind};

pub use docfill_config::{DocfillConfig, RenderOptions, SynthesisOptions};
