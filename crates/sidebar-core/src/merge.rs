//! Deep merge of a freshly generated sidebar into the persisted one.
//!
//! Merge rules, applied recursively from the root:
//! - object into object: every source key is merged into the target's value
//!   at that key, or inserted (after existing keys) if the target lacks it
//! - array into array: elements are paired according to [`MergeStrategy`]
//! - anything else: the source value replaces the target value
//!
//! Target keys the source does not mention are left untouched, which is how
//! hand-written additions survive regeneration.

use serde_json::{Map, Value};

use crate::config::MergeStrategy;

/// Merge `source` into `target` in place.
pub fn merge_into(target: &mut Value, source: &Value, strategy: MergeStrategy) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => merge_objects(target, source, strategy),
        (Value::Array(target), Value::Array(source)) => match strategy {
            MergeStrategy::Positional => merge_positional(target, source, strategy),
            MergeStrategy::ByText => merge_by_text(target, source, strategy),
        },
        (target, source) => *target = source.clone(),
    }
}

fn merge_objects(target: &mut Map<String, Value>, source: &Map<String, Value>, strategy: MergeStrategy) {
    for (key, value) in source {
        match target.get_mut(key) {
            Some(existing) => merge_into(existing, value, strategy),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Element `i` merges into element `i`; extra source elements are appended,
/// extra target elements are kept.
fn merge_positional(target: &mut Vec<Value>, source: &[Value], strategy: MergeStrategy) {
    for (i, value) in source.iter().enumerate() {
        match target.get_mut(i) {
            Some(existing) => merge_into(existing, value, strategy),
            None => target.push(value.clone()),
        }
    }
}

fn text_of(value: &Value) -> Option<&str> {
    value.get("text").and_then(Value::as_str)
}

/// Source elements merge into the first unclaimed target element with the
/// same `text`. Elements without `text` pair positionally. Anything left
/// unpaired is appended.
fn merge_by_text(target: &mut Vec<Value>, source: &[Value], strategy: MergeStrategy) {
    let mut claimed = vec![false; target.len()];

    for (i, value) in source.iter().enumerate() {
        let slot = match text_of(value) {
            Some(text) => (0..target.len()).find(|&j| !claimed[j] && text_of(&target[j]) == Some(text)),
            None => (i < target.len() && !claimed[i]).then_some(i),
        };

        match slot {
            Some(j) => {
                claimed[j] = true;
                merge_into(&mut target[j], value, strategy);
            }
            None => {
                target.push(value.clone());
                claimed.push(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(mut target: Value, source: Value, strategy: MergeStrategy) -> Value {
        merge_into(&mut target, &source, strategy);
        target
    }

    #[test]
    fn test_merge_into_empty() {
        let source = json!({ "/guide/": [{ "text": "Guide", "items": [] }] });
        assert_eq!(merged(json!({}), source.clone(), MergeStrategy::Positional), source);
    }

    #[test]
    fn test_manual_entry_beyond_generated_positions_is_kept() {
        let persisted = json!({
            "/guide/": [{
                "text": "Guide",
                "items": [
                    { "text": "intro", "link": "/guide/intro.md" },
                    { "text": "Changelog", "link": "https://example.com/changelog" }
                ]
            }]
        });
        let generated = json!({
            "/guide/": [{
                "text": "Guide",
                "items": [{ "text": "intro", "link": "/guide/intro.md" }]
            }]
        });

        assert_eq!(merged(persisted.clone(), generated, MergeStrategy::Positional), persisted);
    }

    #[test]
    fn test_positional_collision_overwrites_manual_entry() {
        let persisted = json!([
            { "text": "intro", "link": "/guide/intro.md" },
            { "text": "Changelog", "link": "https://example.com/changelog" }
        ]);
        let generated = json!([
            { "text": "intro", "link": "/guide/intro.md" },
            { "text": "setup", "link": "/guide/setup.md" }
        ]);

        let result = merged(persisted, generated.clone(), MergeStrategy::Positional);
        assert_eq!(result, generated);
    }

    #[test]
    fn test_by_text_keeps_colliding_manual_entry() {
        let persisted = json!([
            { "text": "intro", "link": "/guide/intro.md" },
            { "text": "Changelog", "link": "https://example.com/changelog" }
        ]);
        let generated = json!([
            { "text": "intro", "link": "/guide/intro.md" },
            { "text": "setup", "link": "/guide/setup.md" }
        ]);

        let result = merged(persisted, generated, MergeStrategy::ByText);
        assert_eq!(
            result,
            json!([
                { "text": "intro", "link": "/guide/intro.md" },
                { "text": "Changelog", "link": "https://example.com/changelog" },
                { "text": "setup", "link": "/guide/setup.md" }
            ])
        );
    }

    #[test]
    fn test_by_text_merges_reordered_entries() {
        let persisted = json!([
            { "text": "Setup", "items": [], "collapsed": false },
            { "text": "intro", "link": "/old/intro.md" }
        ]);
        let generated = json!([
            { "text": "intro", "link": "/guide/intro.md" },
            { "text": "Setup", "items": [{ "text": "install", "link": "/guide/setup/install.md" }], "collapsed": true }
        ]);

        let result = merged(persisted, generated, MergeStrategy::ByText);
        assert_eq!(
            result,
            json!([
                { "text": "Setup", "items": [{ "text": "install", "link": "/guide/setup/install.md" }], "collapsed": true },
                { "text": "intro", "link": "/guide/intro.md" }
            ])
        );
    }

    #[test]
    fn test_primitives_overwrite() {
        let persisted = json!({ "text": "Old", "collapsed": true });
        let generated = json!({ "text": "New", "collapsed": false });

        assert_eq!(merged(persisted, generated.clone(), MergeStrategy::Positional), generated);
    }

    #[test]
    fn test_keys_missing_from_source_are_kept() {
        let persisted = json!({ "text": "Guide", "collapsed": true, "base": "/guide/" });
        let generated = json!({ "text": "Guide", "items": [] });

        assert_eq!(
            merged(persisted, generated, MergeStrategy::Positional),
            json!({ "text": "Guide", "collapsed": true, "base": "/guide/", "items": [] })
        );
    }

    #[test]
    fn test_new_keys_appended_after_existing() {
        let persisted: Value = serde_json::from_str(r#"{ "/zeta/": [], "/alpha/": [] }"#).unwrap();
        let generated = json!({ "/alpha/": [], "/beta/": [] });

        let result = merged(persisted, generated, MergeStrategy::Positional);
        let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["/zeta/", "/alpha/", "/beta/"]);
    }

    #[test]
    fn test_shape_mismatch_is_replaced() {
        let persisted = json!({ "/guide/": { "text": "manual object" }, "items": "oops" });
        let generated = json!({ "/guide/": [{ "text": "Guide" }], "items": [] });

        assert_eq!(merged(persisted, generated.clone(), MergeStrategy::Positional), generated);
    }
}
