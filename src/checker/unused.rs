use crate::corpus::SourceCorpus;
use crate::model::DependencySet;

/// Flags dependencies that no source file appears to reference.
///
/// A dependency counts as referenced when some file contains one of the
/// tokens from [`reference_tokens`] as a literal substring. Nothing is
/// parsed, so re-exports, aliases, and computed module names are missed and
/// the result should be verified by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedChecker;

impl UnusedChecker {
    pub fn new() -> Self {
        Self
    }

    /// Returns the names with no reference anywhere in `corpus`, in declaration order.
    pub fn check(&self, deps: &DependencySet, corpus: &SourceCorpus) -> Vec<String> {
        deps.names()
            .filter(|name| !is_referenced(name, corpus))
            .map(String::from)
            .collect()
    }
}

fn is_referenced(name: &str, corpus: &SourceCorpus) -> bool {
    let tokens = reference_tokens(name);
    corpus
        .files()
        .iter()
        .any(|file| tokens.iter().any(|token| file.content.contains(token.as_str())))
}

/// Module-reference tokens that count as a use of `name`.
///
/// Covers `require('name')`, `from 'name'`, `import 'name'`, `import('name')`
/// with single or double quotes, plus `require('name/…` and `from 'name/…`
/// subpath imports.
pub fn reference_tokens(name: &str) -> Vec<String> {
    let mut tokens = Vec::with_capacity(14);

    for quote in ['\'', '"'] {
        tokens.push(format!("require({quote}{name}{quote})"));
        tokens.push(format!("require({quote}{name}/"));
        tokens.push(format!("from {quote}{name}{quote}"));
        tokens.push(format!("from {quote}{name}/"));
        tokens.push(format!("import {quote}{name}{quote}"));
        tokens.push(format!("import({quote}{name}{quote})"));
        tokens.push(format!("import({quote}{name}/"));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(files: &[&str]) -> SourceCorpus {
        SourceCorpus::from_texts(
            files
                .iter()
                .enumerate()
                .map(|(i, content)| (format!("src/file{i}.js"), *content)),
        )
    }

    fn deps(names: &[&str]) -> DependencySet {
        names.iter().map(|n| (*n, "^1.0.0")).collect()
    }

    #[test]
    fn test_require_call_counts_as_use() {
        let corpus = corpus(&["const chalk = require('chalk');"]);
        let unused = UnusedChecker::new().check(&deps(&["chalk", "left-pad"]), &corpus);
        assert_eq!(unused, vec!["left-pad"]);
    }

    #[test]
    fn test_double_quotes_and_subpaths() {
        let corpus = corpus(&[
            r#"const get = require("lodash/get");"#,
            r#"const express = require("express");"#,
        ]);
        let unused = UnusedChecker::new().check(&deps(&["lodash", "express"]), &corpus);
        assert!(unused.is_empty());
    }

    #[test]
    fn test_import_forms() {
        let corpus = corpus(&[
            "import React from 'react';",
            "import 'reflect-metadata';",
            "const mod = await import(\"dayjs\");",
            "import { z } from \"zod/v4\";",
            "export { default } from '@scope/pkg';",
        ]);
        let names = ["react", "reflect-metadata", "dayjs", "zod", "@scope/pkg"];
        let unused = UnusedChecker::new().check(&deps(&names), &corpus);
        assert!(unused.is_empty(), "unexpected unused: {unused:?}");
    }

    #[test]
    fn test_prefix_names_do_not_match() {
        // `chalk-template` must not count as a use of `chalk`.
        let corpus = corpus(&["require('chalk-template')"]);
        let unused = UnusedChecker::new().check(&deps(&["chalk"]), &corpus);
        assert_eq!(unused, vec!["chalk"]);
    }

    #[test]
    fn test_bare_mentions_are_not_references() {
        let corpus = corpus(&["// we used to depend on moment here", "const moment = 1;"]);
        let unused = UnusedChecker::new().check(&deps(&["moment"]), &corpus);
        assert_eq!(unused, vec!["moment"]);
    }

    #[test]
    fn test_empty_corpus_flags_everything_in_order() {
        let unused =
            UnusedChecker::new().check(&deps(&["b", "a", "c"]), &SourceCorpus::default());
        assert_eq!(unused, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_check_is_idempotent() {
        let corpus = corpus(&["require('a')", "import x from 'c'"]);
        let deps = deps(&["a", "b", "c", "d"]);
        let checker = UnusedChecker::new();

        let first = checker.check(&deps, &corpus);
        let second = checker.check(&deps, &corpus);
        assert_eq!(first, second);
        assert_eq!(first, vec!["b", "d"]);
    }

    #[test]
    fn test_reference_tokens() {
        let tokens = reference_tokens("chalk");
        assert!(tokens.contains(&"require('chalk')".to_string()));
        assert!(tokens.contains(&"from \"chalk\"".to_string()));
        assert!(tokens.contains(&"import('chalk/".to_string()));
        assert_eq!(tokens.len(), 14);
    }
}
