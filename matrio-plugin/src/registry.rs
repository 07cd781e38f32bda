//! Plugin Registry

use crate::{EvalContext, FunctionPlugin};
use matrio_core::{CalcError, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Central operation registry
///
/// Lookup is case-insensitive; the legacy UI sent operation ids in mixed
/// case.
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        match self.get_function(name) {
            Some(f) => f.call(args, ctx),
            None => {
                let similar = self.find_similar(name);
                let mut err = CalcError::undefined_func(name);
                if !similar.is_empty() {
                    err = err.with_suggestion(format!("Similar: {}", similar.join(", ")));
                }
                Value::Error(err)
            }
        }
    }

    /// Operation names close to the given one, for error suggestions.
    fn find_similar(&self, name: &str) -> Vec<String> {
        let query = name.to_lowercase();
        let mut matches: Vec<(&String, usize)> = self
            .functions
            .keys()
            .filter_map(|candidate| {
                let score = Self::similarity_score(&query, candidate);
                (score > 0).then_some((candidate, score))
            })
            .collect();
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        matches.into_iter().take(3).map(|(n, _)| n.clone()).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        if candidate.starts_with(query) || query.starts_with(candidate) {
            return 10;
        }
        if candidate.contains(query) || query.contains(candidate) {
            return 5;
        }
        0
    }

    /// Summaries of every registered operation, optionally by category.
    pub fn list_functions(&self, category: Option<&str>) -> Value {
        let mut funcs: Vec<(&'static str, Value)> = self
            .functions
            .values()
            .filter(|f| category.map_or(true, |c| f.meta().category == c))
            .map(|f| {
                let meta = f.meta();
                let mut obj = HashMap::new();
                obj.insert("name".to_string(), Value::Text(meta.name.to_string()));
                obj.insert(
                    "description".to_string(),
                    Value::Text(meta.description.to_string()),
                );
                obj.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
                obj.insert("category".to_string(), Value::Text(meta.category.to_string()));
                (meta.name, Value::Object(obj))
            })
            .collect();
        funcs.sort_by_key(|(name, _)| *name);
        Value::List(funcs.into_iter().map(|(_, v)| v).collect())
    }

    /// Detailed help for one operation.
    pub fn help(&self, name: &str) -> Value {
        let Some(f) = self.get_function(name) else {
            return Value::Error(CalcError::undefined_func(name));
        };
        let meta = f.meta();
        let mut obj = HashMap::new();
        obj.insert("name".to_string(), Value::Text(meta.name.to_string()));
        obj.insert(
            "description".to_string(),
            Value::Text(meta.description.to_string()),
        );
        obj.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
        obj.insert("returns".to_string(), Value::Text(meta.returns.to_string()));
        obj.insert(
            "args".to_string(),
            Value::List(
                meta.args
                    .iter()
                    .map(|a| {
                        let mut arg = HashMap::new();
                        arg.insert("name".to_string(), Value::Text(a.name.to_string()));
                        arg.insert("type".to_string(), Value::Text(a.typ.to_string()));
                        arg.insert(
                            "description".to_string(),
                            Value::Text(a.description.to_string()),
                        );
                        arg.insert("optional".to_string(), Value::Bool(a.optional));
                        Value::Object(arg)
                    })
                    .collect(),
            ),
        );
        obj.insert(
            "examples".to_string(),
            Value::List(meta.examples.iter().map(|e| Value::Text(e.to_string())).collect()),
        );
        obj.insert(
            "related".to_string(),
            Value::List(meta.related.iter().map(|r| Value::Text(r.to_string())).collect()),
        );
        Value::Object(obj)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
