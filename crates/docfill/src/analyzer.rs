//! Per-document analysis passes and batch fixes.
//!
//! [`DocumentAnalyzer::analyze`] classifies every symbol of a document in
//! parallel, drafts content for the ones that need an edit and reports one
//! diagnostic each. [`apply_fixes`] then writes the edits into the tree one
//! after another; node ids survive every edit, so later fixes still find
//! their targets.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use docfill_config::{DocfillConfig, RenderOptions};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rustc_hash::FxHashSet;

use crate::assemble::{BlockAssembler, DocContent};
use crate::classify::{Classification, Classifier, InterfaceResolver, StructuralResolver};
use crate::diagnostics::DocDiagnostic;
use crate::error::{DocfillError, Result};
use crate::insert::insert_documentation;
use crate::phrase::PhraseBuilder;
use crate::symbol::SymbolFacts;
use crate::syntax::{NodeId, SyntaxTree};

/// Cooperative cancellation, checked between symbols.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A single pending edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFix {
    pub target: NodeId,
    pub content: DocContent,
    pub diagnostic: DocDiagnostic,
}

/// Result of one analysis pass over a document.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// One classification per input symbol, in input order.
    pub classifications: Vec<Classification>,
    /// Edits in input order, at most one per declaration.
    pub fixes: Vec<DocumentFix>,
}

impl Analysis {
    pub fn diagnostics(&self) -> impl Iterator<Item = &DocDiagnostic> {
        self.fixes.iter().map(|fix| &fix.diagnostic)
    }
}

/// Drives classification, synthesis and diagnostics for whole documents.
#[derive(Debug, Clone)]
pub struct DocumentAnalyzer<R = StructuralResolver> {
    classifier: Classifier<R>,
    assembler: BlockAssembler,
    render: RenderOptions,
    /// Sized pool from `settings.parallel_jobs`; the global pool otherwise.
    pool: Option<Arc<ThreadPool>>,
}

impl Default for DocumentAnalyzer<StructuralResolver> {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            assembler: BlockAssembler::default(),
            render: RenderOptions::default(),
            pool: None,
        }
    }
}

impl DocumentAnalyzer<StructuralResolver> {
    pub fn new(config: &DocfillConfig) -> Result<Self> {
        Self::with_resolver(config, StructuralResolver)
    }
}

impl<R> DocumentAnalyzer<R>
where
    R: InterfaceResolver + Sync,
{
    /// Builds an analyzer for `config`.
    ///
    /// When `settings.parallel_jobs` is set, the sized thread pool is built
    /// here once and reused by every pass.
    pub fn with_resolver(config: &DocfillConfig, resolver: R) -> Result<Self> {
        let pool = config
            .settings
            .parallel_jobs
            .map(|jobs| {
                ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .map(Arc::new)
                    .map_err(|e| DocfillError::ThreadPool(e.to_string()))
            })
            .transpose()?;

        Ok(Self {
            classifier: Classifier::with_resolver(resolver),
            assembler: BlockAssembler::new(PhraseBuilder::new(config.synthesis)),
            render: config.render.clone(),
            pool,
        })
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render
    }

    /// Threads a pass runs on.
    pub fn worker_count(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }

    /// Classifies `symbols` and drafts a fix for each one that needs an edit.
    ///
    /// Returns [`DocfillError::Cancelled`] if `cancel` is raised before every
    /// symbol has been visited.
    pub fn analyze(
        &self,
        tree: &SyntaxTree,
        symbols: &[SymbolFacts],
        cancel: &CancellationFlag,
    ) -> Result<Analysis> {
        let outcomes = match &self.pool {
            Some(pool) => pool.install(|| self.analyze_all(tree, symbols, cancel))?,
            None => self.analyze_all(tree, symbols, cancel)?,
        };

        let mut analysis = Analysis::default();
        let mut seen = FxHashSet::default();
        for (classification, fix) in outcomes {
            if let Some(fix) = fix.filter(|fix| seen.insert(fix.target)) {
                analysis.fixes.push(fix);
            }
            analysis.classifications.push(classification);
        }

        tracing::info!(
            symbols = symbols.len(),
            fixes = analysis.fixes.len(),
            "documentation analysis complete"
        );
        Ok(analysis)
    }

    /// Analyzes and applies every fix, returning the documented tree.
    pub fn fix_all(
        &self,
        tree: &SyntaxTree,
        symbols: &[SymbolFacts],
        cancel: &CancellationFlag,
    ) -> Result<SyntaxTree> {
        let analysis = self.analyze(tree, symbols, cancel)?;
        apply_fixes(tree, &analysis.fixes, &self.render)
    }

    fn analyze_all(
        &self,
        tree: &SyntaxTree,
        symbols: &[SymbolFacts],
        cancel: &CancellationFlag,
    ) -> Result<Vec<(Classification, Option<DocumentFix>)>> {
        symbols
            .par_iter()
            .map(|symbol| {
                if cancel.is_cancelled() {
                    return Err(DocfillError::Cancelled);
                }
                Ok(self.analyze_symbol(tree, symbol))
            })
            .collect()
    }

    fn analyze_symbol(
        &self,
        tree: &SyntaxTree,
        symbol: &SymbolFacts,
    ) -> (Classification, Option<DocumentFix>) {
        let classification = self.classifier.classify_in(symbol, tree);
        let fix = classification.target().and_then(|target| {
            let content = self.assembler.content_for(symbol, &classification)?;
            let diagnostic = DocDiagnostic::for_symbol(symbol, &classification, tree)?;
            Some(DocumentFix {
                target,
                content,
                diagnostic,
            })
        });
        (classification, fix)
    }
}

/// Applies `fixes` to `tree` in order.
///
/// Each fix sees the tree produced by the previous one. A fix whose target
/// was already documented by an earlier fix leaves the tree unchanged.
pub fn apply_fixes(
    tree: &SyntaxTree,
    fixes: &[DocumentFix],
    options: &RenderOptions,
) -> Result<SyntaxTree> {
    fixes.iter().try_fold(tree.clone(), |current, fix| {
        insert_documentation(&current, fix.target, &fix.content, options)
    })
}
