use std::fs;
use std::path::Path;

use apireg_cli::{run_generate, run_plan, PlanArgs};
use apireg_gen::FALLBACK_HEADER;
use tempfile::TempDir;

const TWO_VERSIONS: &str = r#"{
  "types": [
    {"package": "example.io/shop/pkg/apis/orders/v1beta1", "name": "Order", "comment_lines": ["+resource:path=orders"]},
    {"package": "example.io/shop/pkg/apis/orders/v1", "name": "OrderSpec"},
    {"package": "example.io/shop/pkg/apis/orders/v1", "name": "Order", "comment_lines": ["+resource:path=orders"]},
    {"package": "example.io/shop/pkg/util", "name": "Helper"}
  ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn args(input: &str) -> PlanArgs {
    PlanArgs {
        input_file: input.into(),
        output_base: Some("out".into()),
        ..PlanArgs::default()
    }
}

fn generated(root: &Path, package: &str) -> String {
    fs::read_to_string(root.join("out").join(package).join("zz_generated.api.register.go"))
        .unwrap()
}

#[test]
fn generate_writes_one_file_per_package() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "types.json", TWO_VERSIONS);

    let report = run_generate(&args("types.json"), dir.path()).unwrap();
    assert_eq!(report.files.len(), 6);

    for package in [
        "example.io/shop/pkg/apis/orders/v1",
        "example.io/shop/pkg/apis/orders/v1beta1",
        "example.io/shop/pkg/apis/orders",
        "example.io/shop/pkg/apis/orders/install",
        "example.io/shop/pkg/apis",
        "example.io/shop/plugin/admission/install",
    ] {
        let contents = generated(dir.path(), package);
        assert!(
            contents.starts_with(FALLBACK_HEADER),
            "missing header in {package}"
        );
    }

    let v1 = generated(dir.path(), "example.io/shop/pkg/apis/orders/v1");
    assert!(v1.contains("package v1\n"));
    assert!(v1.contains("&Order{},"));
    assert!(!v1.contains("OrderSpec{}"));
}

#[test]
fn config_file_and_header_are_honoured() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "types.json", &TWO_VERSIONS.replace("+resource", "+kind"));
    write(dir.path(), "boilerplate.go.txt", "// Copyright Example Shop");
    write(
        dir.path(),
        "apireg.toml",
        r#"
output_file_base_name = "zz_generated.register"
go_header_file = "boilerplate.go.txt"

[classifier]
marker = "+kind"
"#,
    );

    let report = run_generate(&args("types.json"), dir.path()).unwrap();
    assert_eq!(report.files.len(), 6);

    let group = fs::read_to_string(
        dir.path()
            .join("out/example.io/shop/pkg/apis/orders/zz_generated.register.go"),
    )
    .unwrap();
    assert!(group.starts_with("// Copyright Example Shop\n\npackage orders\n"));
}

#[test]
fn conflicting_apis_roots_write_nothing() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "types.json",
        r#"{"types": [
  {"package": "a.io/x/pkg/apis/g/v1", "name": "Foo", "comment_lines": ["+resource"]},
  {"package": "b.io/y/pkg/apis/g/v1", "name": "Bar", "comment_lines": ["+resource"]}
]}"#,
    );

    let error = run_generate(&args("types.json"), dir.path()).unwrap_err();
    assert!(format!("{error:#}").contains("found multiple apis directory paths"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn universe_without_resources_generates_nothing() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "types.json",
        r#"{"types": [{"package": "example.io/shop/pkg/util", "name": "Helper"}]}"#,
    );

    let report = run_generate(&args("types.json"), dir.path()).unwrap();
    assert!(report.files.is_empty());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn plan_lists_packages_without_writing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "types.json", TWO_VERSIONS);

    let json = run_plan(&args("types.json"), true, dir.path()).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = entries.as_array().unwrap();

    let layout: Vec<(&str, &str, u64)> = entries
        .iter()
        .map(|e| {
            (
                e["role"].as_str().unwrap(),
                e["name"].as_str().unwrap(),
                e["members"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        layout,
        vec![
            ("versioned", "v1", 2),
            ("versioned", "v1beta1", 1),
            ("unversioned", "orders", 0),
            ("install", "install", 0),
            ("apis", "apis", 2),
            ("admission-install", "install", 2),
        ]
    );
    assert!(!dir.path().join("out").exists());

    let table = run_plan(&args("types.json"), false, dir.path()).unwrap();
    assert_eq!(table.lines().count(), 6);
    assert!(table.lines().next().unwrap().starts_with("versioned "));
}

#[test]
fn missing_input_is_reported_with_its_path() {
    let dir = TempDir::new().unwrap();
    let error = run_plan(&args("absent.json"), false, dir.path()).unwrap_err();
    assert!(format!("{error:#}").contains("absent.json"));
}
