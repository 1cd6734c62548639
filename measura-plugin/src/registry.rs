//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use measura_core::{codes, MeasuraError, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Central plugin registry
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
            Some(f) => {
                let meta = f.meta();
                if args.len() < meta.required_args() {
                    return Value::Error(MeasuraError::arg_count(meta.name, meta.required_args(), args.len()));
                }
                f.call(args, ctx)
            }
            None => Value::Error(self.with_similar(MeasuraError::undefined_func(name), name)),
        }
    }

    /// Attach "Similar: ..." to an unknown-name error when anything is close
    fn with_similar(&self, err: MeasuraError, name: &str) -> MeasuraError {
        let similar = self.find_similar_functions(name);
        if similar.is_empty() {
            return err;
        }
        let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
        err.with_suggestion(format!("Similar: {}. Use help() for full list.", suggestions.join(", ")))
    }

    /// Find function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.functions.keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, func_name);
                if score > 0 {
                    Some((func_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // Higher score first, name breaks ties so suggestions are stable
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        score += common * 2;

        let len_diff = (query.len() as i32 - candidate.len() as i32).unsigned_abs() as usize;
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> Value {
        match self.functions.get(&name.to_lowercase()) {
            Some(f) => Value::Object(Self::function_to_help(f.meta())),
            None => Value::Error(self.with_similar(
                MeasuraError::new(codes::NOT_FOUND, format!("No function named '{}'", name)),
                name,
            )),
        }
    }

    fn general_help(&self) -> Value {
        let mut help = HashMap::new();

        let mut funcs_by_cat: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, f) in &self.functions {
            let cat = f.meta().category.to_string();
            funcs_by_cat.entry(cat).or_default().push(name.clone());
        }
        help.insert("functions".to_string(),
            Value::Object(funcs_by_cat.into_iter()
                .map(|(k, mut v)| {
                    v.sort();
                    (k, Value::List(v.into_iter().map(Value::Text).collect()))
                })
                .collect()));

        help.insert("usage".to_string(),
            Value::Text("Call help('function_name') for detailed help.".to_string()));

        Value::Object(help)
    }

    fn function_to_help(meta: FunctionMeta) -> HashMap<String, Value> {
        let mut help = HashMap::new();
        help.insert("name".to_string(), Value::Text(meta.name.to_string()));
        help.insert("description".to_string(), Value::Text(meta.description.to_string()));
        help.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
        help.insert("returns".to_string(), Value::Text(meta.returns.to_string()));
        help.insert("category".to_string(), Value::Text(meta.category.to_string()));
        help.insert("args".to_string(), Value::List(
            meta.args.iter().map(|a| {
                let mut arg = HashMap::new();
                arg.insert("name".to_string(), Value::Text(a.name.to_string()));
                arg.insert("type".to_string(), Value::Text(a.typ.to_string()));
                arg.insert("description".to_string(), Value::Text(a.description.to_string()));
                arg.insert("optional".to_string(), Value::Bool(a.optional));
                if let Some(d) = a.default {
                    arg.insert("default".to_string(), Value::Text(d.to_string()));
                }
                Value::Object(arg)
            }).collect()
        ));
        help.insert("examples".to_string(), Value::List(
            meta.examples.iter().map(|e| Value::Text(e.to_string())).collect()
        ));
        help.insert("related".to_string(), Value::List(
            meta.related.iter().map(|r| Value::Text(r.to_string())).collect()
        ));
        help
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgMeta;

    struct Double;

    static DOUBLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Number", "Value to double")];

    impl FunctionPlugin for Double {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "double",
                description: "Double a number",
                usage: "double(value)",
                args: &DOUBLE_ARGS,
                returns: "Number",
                examples: &[],
                category: "test",
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            match args[0].as_number() {
                Some(n) => Value::Number(n * 2.0),
                None => Value::Error(MeasuraError::arg_type("double", "value", "Number", args[0].type_name())),
            }
        }
    }

    fn registry() -> PluginRegistry {
        PluginRegistry::new().with_function(Double)
    }

    #[test]
    fn test_call_is_case_insensitive() {
        let ctx = EvalContext::new();
        assert_eq!(registry().call_function("DOUBLE", &[Value::Number(2.5)], &ctx), Value::Number(5.0));
    }

    #[test]
    fn test_missing_args_rejected_before_call() {
        let ctx = EvalContext::new();
        let result = registry().call_function("double", &[], &ctx);
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::ARG_COUNT));
    }

    #[test]
    fn test_unknown_function_suggests_similar() {
        let ctx = EvalContext::new();
        let result = registry().call_function("doubel", &[], &ctx);
        let err = result.as_error().expect("expected error");
        assert_eq!(err.code, codes::UNDEFINED_FUNC);
        assert!(err.suggestion.as_deref().unwrap_or("").contains("double"));
    }

    #[test]
    fn test_help_for_function() {
        let help = registry().help(Some("double"));
        assert_eq!(help.get("usage"), Value::Text("double(value)".to_string()));
        assert!(registry().help(Some("triple")).is_error());
    }

    #[test]
    fn test_help_for_misspelled_name_suggests_similar() {
        let help = registry().help(Some("dubble"));
        let err = help.as_error().expect("expected error");
        assert_eq!(err.code, codes::NOT_FOUND);
        assert_eq!(err.suggestion.as_deref(), Some("Similar: double. Use help() for full list."));
    }
}
