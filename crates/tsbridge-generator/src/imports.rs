//! Per-file import bookkeeping
//!
//! Every imported binding and every module-level function gets a local name
//! of the form `{name}_{n}`, numbered per base name in request order. The
//! suffix keeps imported names from clashing with declarations of the file
//! itself and with TypeScript keywords (`delete_1`, `function_1`).

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    local: String,
    type_only: bool,
}

/// Imports requested while building one module
#[derive(Debug, Default)]
pub struct ImportManager {
    counters: HashMap<String, usize>,
    defaults: BTreeMap<String, Binding>,
    named: BTreeMap<String, BTreeMap<String, Binding>>,
    namespaces: BTreeMap<String, String>,
}

impl ImportManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh local name derived from `base`
    pub fn unique(&mut self, base: &str) -> String {
        let counter = self.counters.entry(base.to_string()).or_insert(0);
        *counter += 1;
        format!("{base}_{counter}")
    }

    /// Local name for the default export of `path`.
    ///
    /// Requesting the same module again returns the same name; a value
    /// request upgrades an earlier type-only one.
    pub fn default_import(&mut self, path: &str, name: &str, type_only: bool) -> String {
        if let Some(binding) = self.defaults.get_mut(path) {
            binding.type_only &= type_only;
            return binding.local.clone();
        }
        let local = self.unique(name);
        self.defaults.insert(
            path.to_string(),
            Binding {
                local: local.clone(),
                type_only,
            },
        );
        local
    }

    /// Local name for the named export `specifier` of `path`
    pub fn named_import(&mut self, path: &str, specifier: &str, type_only: bool) -> String {
        if let Some(binding) = self
            .named
            .get_mut(path)
            .and_then(|specifiers| specifiers.get_mut(specifier))
        {
            binding.type_only &= type_only;
            return binding.local.clone();
        }
        let local = self.unique(specifier);
        self.named.entry(path.to_string()).or_default().insert(
            specifier.to_string(),
            Binding {
                local: local.clone(),
                type_only,
            },
        );
        local
    }

    /// Local name for `import * as name from path`
    pub fn namespace_import(&mut self, path: &str, name: &str) -> String {
        if let Some(local) = self.namespaces.get(path) {
            return local.clone();
        }
        let local = self.unique(name);
        self.namespaces.insert(path.to_string(), local.clone());
        local
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.named.is_empty() && self.namespaces.is_empty()
    }

    /// Import statements sorted by module path
    pub fn render(&self) -> String {
        let mut paths: Vec<&String> = self
            .defaults
            .keys()
            .chain(self.named.keys())
            .chain(self.namespaces.keys())
            .collect();
        paths.sort();
        paths.dedup();

        let mut out = String::new();
        for path in paths {
            let quoted = crate::naming::string_literal(path);
            if let Some(binding) = self.defaults.get(path) {
                let keyword = if binding.type_only { "import type" } else { "import" };
                out.push_str(&format!("{keyword} {} from {quoted};\n", binding.local));
            }
            if let Some(specifiers) = self.named.get(path) {
                out.push_str(&render_named(specifiers, &quoted));
            }
            if let Some(local) = self.namespaces.get(path) {
                out.push_str(&format!("import * as {local} from {quoted};\n"));
            }
        }
        out
    }
}

fn render_named(specifiers: &BTreeMap<String, Binding>, quoted: &str) -> String {
    let all_types = specifiers.values().all(|b| b.type_only);
    let parts: Vec<String> = specifiers
        .iter()
        .map(|(specifier, binding)| {
            let modifier = if binding.type_only && !all_types {
                "type "
            } else {
                ""
            };
            format!("{modifier}{specifier} as {}", binding.local)
        })
        .collect();
    let keyword = if all_types { "import type" } else { "import" };
    format!("{keyword} {{ {} }} from {quoted};\n", parts.join(", "))
}

#[cfg(test)]
#[path = "imports/imports_tests.rs"]
mod imports_tests;
