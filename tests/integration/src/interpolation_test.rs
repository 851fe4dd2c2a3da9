//! Interpolation-driven pipeline tests: documents resolve against a runtime
//! context before the workspace extracts and decodes them.

use plan_engine::Workspace;
use plan_resolve::{Context, ContextValue, Members, Resolver};
use plan_test_utils::specs::{action_log, fixture_registry};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn references_resolve_before_decoding() {
    let resolver = Resolver::new(Context::new().with_value("region", "us-east-1"));
    let mut ws: Workspace = Workspace::new(fixture_registry(action_log()));
    ws.load_resolved(
        &json!({
            "blueprint": [{
                "net": {"ensure": [{"widget": {"region": "${region}"}}]},
            }],
            "project": [{"app": {"use": ["net"]}}],
        }),
        &resolver,
    )
    .unwrap();

    let project = ws.project("app").unwrap();
    assert_eq!(project.blueprints.len(), 1);
    let rendered = format!("{:?}", project.blueprints[0].ops()[0].spec());
    assert!(rendered.contains("us-east-1"));
    assert!(!rendered.contains("${"));
}

#[test]
fn type_preserving_and_mixed_references() {
    let resolver = Resolver::new(
        Context::new()
            .with_value("replicas", 3)
            .with_value("name", "svc"),
    );
    let doc = json!({
        "project": [{
            "app": {
                "count": "${replicas}",
                "unit": "${name}-${replicas}",
            },
        }],
    });
    let mut ws: Workspace = Workspace::new(fixture_registry(action_log()));
    ws.load_resolved(&doc, &resolver).unwrap();

    let project = ws.project("app").unwrap();
    assert_eq!(project.attrs.get("count"), Some(&json!(3)));
    assert_eq!(project.attrs.get("unit"), Some(&json!("svc-3")));
}

#[test]
fn member_objects_and_thunks_supply_values() {
    struct Deploy;

    impl Members for Deploy {
        fn member(&self, name: &str) -> Option<ContextValue> {
            match name {
                "target" => Some(ContextValue::Value(json!("staging"))),
                _ => None,
            }
        }
    }

    let resolver = Resolver::new(
        Context::new()
            .with_object("deploy", Deploy)
            .with_thunk("stamp", || json!("build-42")),
    );
    let mut ws: Workspace = Workspace::new(fixture_registry(action_log()));
    ws.load_resolved(
        &json!({
            "project": [{
                "app": {"env": "${deploy.target}", "tag": "${stamp}"},
            }],
        }),
        &resolver,
    )
    .unwrap();

    let project = ws.project("app").unwrap();
    assert_eq!(project.attrs.get("env"), Some(&json!("staging")));
    assert_eq!(project.attrs.get("tag"), Some(&json!("build-42")));
}

#[test]
fn escapes_survive_into_decoded_attributes() {
    let resolver = Resolver::new(Context::new());
    let mut ws: Workspace = Workspace::new(fixture_registry(action_log()));
    ws.load_resolved(
        &json!({
            "project": [{
                "app": {
                    "template": "$${HOME}/bin",
                    "ci": "${{ github.sha }}",
                },
            }],
        }),
        &resolver,
    )
    .unwrap();

    let project = ws.project("app").unwrap();
    assert_eq!(project.attrs.get("template"), Some(&json!("${HOME}/bin")));
    assert_eq!(project.attrs.get("ci"), Some(&json!("${{ github.sha }}")));
}

#[test]
fn undefined_reference_fails_the_load() {
    let resolver = Resolver::new(Context::new());
    let mut ws: Workspace = Workspace::new(fixture_registry(action_log()));
    let err = ws
        .load_resolved(
            &json!({"project": [{"app": {"env": "${deploy.target}"}}]}),
            &resolver,
        )
        .unwrap_err();
    assert!(err.to_string().contains("deploy.target"));
}
