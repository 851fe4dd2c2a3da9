//! End-to-end pipeline tests: parsed document → workspace → typed project
//! → build.

use plan_engine::{
    Blueprint, BuildContext, Error, Project, ProjectParts, ProjectType, Result, Workspace,
};
use plan_test_utils::specs::{ProbeSpec, WidgetSpec, action_log, fixture_registry};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

fn drain(log: &plan_test_utils::specs::ActionLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[test]
fn full_pipeline_builds_composed_project() {
    plan_test_utils::init_tracing();

    let log = action_log();
    let mut ws: Workspace = Workspace::new(fixture_registry(log.clone()));
    ws.load(&json!({
        "blueprint": [{
            "base": {
                "ensure": [
                    {"probe": {"id": "1"}},
                    {"probe": {"id": "2"}},
                ],
            },
        }],
        "project": [{
            "myapp": {
                "description": "Test app",
                "use": ["base"],
                "ensure": [{"probe": {"id": "3"}}],
            },
        }],
    }))
    .unwrap();

    let project = ws.project("myapp").unwrap();
    assert_eq!(project.description, "Test app");
    let blueprint_names: Vec<_> = project.blueprints.iter().map(|bp| bp.name()).collect();
    assert_eq!(blueprint_names, vec!["base", "myapp:inline"]);

    project.build(false).unwrap();
    assert_eq!(drain(&log), vec!["apply:1", "apply:2", "apply:3"]);
}

#[test]
fn dry_run_applies_nothing() {
    let log = action_log();
    let mut ws: Workspace = Workspace::new(fixture_registry(log.clone()));
    ws.load(&json!({
        "blueprint": [{"base": {"ensure": [{"probe": {"id": "1"}}]}}],
        "project": [{"myapp": {"use": ["base"]}}],
    }))
    .unwrap();

    ws.project("myapp").unwrap().build(true).unwrap();
    assert!(drain(&log).is_empty());
}

#[test]
fn strategies_consult_checks_at_build_time() {
    let log = action_log();
    let mut ws: Workspace = Workspace::new(fixture_registry(log.clone()));
    ws.load(&json!({
        "project": [{
            "p": {
                "present": [{"probe": {"id": "skip", "exists": true}}],
                "ensure": [{"probe": {"id": "fix", "equals": false}}],
                "absent": [{"probe": {"id": "gone", "exists": true}}],
            },
        }],
    }))
    .unwrap();

    ws.project("p").unwrap().build(false).unwrap();
    assert_eq!(drain(&log), vec!["apply:fix", "remove:gone"]);
}

#[test]
fn diamond_includes_execute_once_per_path() {
    let log = action_log();
    let mut ws: Workspace = Workspace::new(fixture_registry(log.clone()));
    ws.load(&json!({
        "blueprint": [
            {"a": {"ensure": [{"probe": {"id": "a"}}]}},
            {"b": {"include": ["a"], "ensure": [{"probe": {"id": "b"}}]}},
            {"c": {"include": ["a"], "ensure": [{"probe": {"id": "c"}}]}},
            {"d": {"include": ["b", "c"]}},
        ],
        "project": [{"p": {"use": ["d"]}}],
    }))
    .unwrap();

    ws.project("p").unwrap().build(false).unwrap();
    assert_eq!(
        drain(&log),
        vec!["apply:a", "apply:b", "apply:a", "apply:c"]
    );
}

#[test]
fn toml_documents_feed_the_same_pipeline() {
    let log = action_log();
    let mut ws: Workspace = Workspace::new(fixture_registry(log));

    let unit: Value = toml::from_str(
        r#"
        [[blueprint]]
        [blueprint.net]
        [[blueprint.net.ensure]]
        [blueprint.net.ensure.widget]
        color = "red"

        [[project]]
        [project.app]
        description = "from toml"
        use = ["net"]
        "#,
    )
    .unwrap();
    ws.load(&unit).unwrap();

    let project = ws.project("app").unwrap();
    assert_eq!(project.description, "from toml");
    assert_eq!(project.blueprints[0].name(), "net");
    assert_eq!(project.blueprints[0].len(), 1);
}

#[test]
fn custom_project_type_round_trip() {
    #[derive(Debug)]
    struct AppProject {
        name: String,
        repo: String,
        blueprints: Vec<Blueprint<AppProject>>,
    }

    #[derive(Debug, Deserialize)]
    struct AppAttrs {
        #[serde(default)]
        repo: String,
    }

    impl ProjectType for AppProject {
        fn assemble(parts: ProjectParts<Self>) -> Result<Self> {
            let attrs: AppAttrs = serde_json::from_value(Value::Object(parts.attrs)).map_err(
                |source| Error::ProjectDecode {
                    name: parts.name.clone(),
                    source,
                },
            )?;
            Ok(Self {
                name: parts.name,
                repo: attrs.repo,
                blueprints: parts.blueprints,
            })
        }
    }

    let log = action_log();
    let mut ws: Workspace<AppProject> = Workspace::new(fixture_registry(log.clone()));
    ws.load(&json!({
        "blueprint": [{"base": {"ensure": [{"probe": {"id": "base"}}]}}],
        "project": [{
            "myapp": {"repo": "owner/myapp", "use": ["base"]},
        }],
    }))
    .unwrap();

    let project = ws.project("myapp").unwrap();
    assert_eq!(project.name, "myapp");
    assert_eq!(project.repo, "owner/myapp");

    let ctx = BuildContext::new(&project);
    for blueprint in &project.blueprints {
        blueprint.build(&ctx).unwrap();
    }
    assert_eq!(drain(&log), vec!["apply:base"]);
}

#[test]
fn programmatic_assembly_without_documents() {
    use plan_engine::{Operation, Spec, Strategy};

    let log = action_log();
    let spec = ProbeSpec::new("manual", log.clone());
    let op = Operation::new(
        Strategy::Ensure,
        "probe",
        Arc::new(spec) as Arc<dyn Spec<Project>>,
    );
    let project = Project::assemble(ProjectParts {
        name: "manual-proj".to_string(),
        blueprints: vec![Blueprint::new("manual-bp", vec![op])],
        attrs: serde_json::Map::new(),
    })
    .unwrap();

    project.build(false).unwrap();
    assert_eq!(drain(&log), vec!["apply:manual"]);
}

#[test]
fn widget_attributes_survive_decode() {
    let log = action_log();
    let mut registry = fixture_registry::<Project>(log);
    registry.register::<WidgetSpec>("vpc");
    let mut ws = Workspace::new(registry);
    ws.load(&json!({
        "project": [{"p": {"ensure": [{"vpc": {"region": "us-east-1", "cidr": "10.0.0.0/16"}}]}}],
    }))
    .unwrap();

    let project = ws.project("p").unwrap();
    let rendered = format!("{:?}", project.blueprints[0].ops()[0].spec());
    assert!(rendered.contains("us-east-1"));
    assert!(rendered.contains("10.0.0.0/16"));
}
