mod common;

use common::{object, partial, response};
use pretty_assertions::assert_eq;
use serde_json::json;
use shapekit_formatter::{
    EntityFormatter, Formatter, FormatterConfig, FormatterFn, InclusionStrategy, Response,
};
use std::sync::Arc;
use std::thread;

fn whitelist(paths: &[&str]) -> Formatter {
    Formatter::new(&FormatterConfig::default().with_whitelist(paths.iter().copied()))
}

fn blacklist(paths: &[&str]) -> Formatter {
    Formatter::new(&FormatterConfig::default().with_blacklist(paths.iter().copied()))
}

// ── Scenarios ────────────────────────────────────────────────────

#[test]
fn inclusion_keeps_declared_leaf() {
    let out = whitelist(&["a.b"]).format(response(json!({"a": {"b": 1, "c": 2}, "d": 3})));
    assert_eq!(out.data, object(json!({"a": {"b": 1}})));
}

#[test]
fn inclusion_without_match_is_empty() {
    let out = whitelist(&["a.b"]).format(response(json!({"x": 1})));
    assert!(out.data.is_empty());
}

#[test]
fn exclusion_removes_one_level_down() {
    let out = blacklist(&["a.b"]).format(response(json!({"a": {"b": 1, "c": 2}})));
    assert_eq!(out.data, object(json!({"a": {"c": 2}})));
}

#[test]
fn exclusion_removes_whole_field() {
    let out = blacklist(&["a"]).format(response(json!({"a": 1, "b": 2})));
    assert_eq!(out.data, object(json!({"b": 2})));
}

#[test]
fn target_rename_and_group_compose() {
    let config = FormatterConfig::default()
        .with_target("t")
        .with_mapping("x", "y")
        .with_group("g");
    let out = Formatter::new(&config).format(response(json!({"t": {"x": 1}})));
    assert_eq!(out.data, object(json!({"g": {"y": 1}})));
}

// ── Pipeline ─────────────────────────────────────────────────────

#[test]
fn default_config_is_identity() {
    let input = json!({"a": {"b": [1, 2]}, "c": null});
    let out = Formatter::new(&FormatterConfig::default()).format(response(input.clone()));
    assert_eq!(out.into_value(), input);
}

#[test]
fn whitelist_takes_precedence_over_blacklist() {
    let config = FormatterConfig::default()
        .with_whitelist(["a"])
        .with_blacklist(["a"]);
    let out = Formatter::new(&config).format(response(json!({"a": 1, "b": 2})));
    assert_eq!(out.data, object(json!({"a": 1})));
}

#[test]
fn missing_target_with_group_yields_empty_group() {
    let config = FormatterConfig::default().with_target("t").with_group("g");
    let out = Formatter::new(&config).format(response(json!({"a": 1})));
    assert_eq!(out.data, object(json!({"g": {}})));
}

#[test]
fn group_alone_wraps_empty_data() {
    let formatter = Formatter::new(&FormatterConfig::default().with_group("g"));
    let out = formatter.format(Response::empty());
    assert_eq!(out.data, object(json!({"g": {}})));
}

#[test]
fn filter_runs_on_extracted_target() {
    let config = FormatterConfig::default()
        .with_target("body")
        .with_whitelist(["user.name", "total"]);
    let out = Formatter::new(&config).format(response(json!({
        "status": 200,
        "body": {"user": {"name": "Ada", "id": 3}, "total": 9, "page": 1}
    })));
    assert_eq!(out.data, object(json!({"user": {"name": "Ada"}, "total": 9})));
}

#[test]
fn rename_applies_after_filtering() {
    let config = FormatterConfig::default()
        .with_blacklist(["internal"])
        .with_mapping("internal", "public")
        .with_mapping("id", "identifier");
    let out = Formatter::new(&config).format(response(json!({"internal": 1, "id": 2})));
    assert_eq!(out.data, object(json!({"identifier": 2})));
}

#[test]
fn self_rename_drops_field() {
    let formatter = Formatter::new(&FormatterConfig::default().with_mapping("x", "x.sub"));
    let out = formatter.format(response(json!({"x": 1, "k": 2})));
    assert_eq!(out.data, object(json!({"k": 2})));
}

#[test]
fn rebuild_strategy_matches_prune_on_disjoint_paths() {
    let input = json!({"a": {"b": 1, "c": {"d": 2, "e": 3}}, "f": [1], "g": 4});
    let paths = ["a.b", "a.c.d", "g", "missing.path"];
    let prune = Formatter::new(&FormatterConfig::default().with_whitelist(paths));
    let rebuild = Formatter::new(
        &FormatterConfig::default()
            .with_whitelist(paths)
            .with_inclusion_strategy(InclusionStrategy::Rebuild),
    );
    let pruned = prune.format(response(input.clone()));
    let rebuilt = rebuild.format(response(input));
    assert_eq!(pruned, rebuilt);
    assert_eq!(pruned.data, object(json!({"a": {"b": 1, "c": {"d": 2}}, "g": 4})));
}

#[test]
fn completeness_flag_passes_through() {
    let formatter = Formatter::new(
        &FormatterConfig::default()
            .with_target("t")
            .with_whitelist(["x"])
            .with_group("g"),
    );
    assert!(!formatter.format(partial(json!({"t": {"x": 1}}))).is_complete);
    assert!(formatter.format(response(json!({"t": 1}))).is_complete);
}

#[test]
fn formatting_twice_is_stable() {
    let config = FormatterConfig::default()
        .with_blacklist(["a.x", "d"])
        .with_mapping("c", "renamed");
    let formatter = Formatter::new(&config);
    let once = formatter.format(response(json!({"a": {"b": 1, "x": 2}, "c": 3, "d": 4})));
    let twice = formatter.format(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn accessors_report_compiled_keys() {
    let formatter = Formatter::new(&FormatterConfig::default().with_target("t"));
    assert_eq!(formatter.target(), Some("t"));
    assert_eq!(formatter.group(), None);
}

// ── Trait objects & adapters ─────────────────────────────────────

#[test]
fn formatter_fn_wraps_closure() {
    let formatter = FormatterFn::new(|mut entity: Response| {
        entity.data.insert("seen".to_string(), json!(true));
        entity
    });
    let out = formatter.format(response(json!({})));
    assert_eq!(out.data, object(json!({"seen": true})));
}

#[test]
fn boxed_formatters_can_be_mixed() {
    let formatters: Vec<Box<dyn EntityFormatter>> = vec![
        Box::new(blacklist(&["a"])),
        Box::new(FormatterFn::new(|entity: Response| entity)),
    ];
    let out = formatters
        .iter()
        .fold(response(json!({"a": 1, "b": 2})), |entity, f| f.format(entity));
    assert_eq!(out.data, object(json!({"b": 2})));
}

#[test]
fn shared_formatter_across_threads() {
    let formatter: Arc<dyn EntityFormatter> = Arc::new(whitelist(&["keep"]));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let formatter = Arc::clone(&formatter);
            thread::spawn(move || formatter.format(response(json!({"keep": i, "drop": i}))))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out.data, object(json!({ "keep": i })));
    }
}
