//! End-to-end build pipeline tests over temporary project trees.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use litegen_lib::toolchain::ir::IrToolchain;
use litegen_lib::build::BuildSummary;
use litegen_lib::{BuildConfig, BuildError, Target, build};

const WIDGET: &str = r#"{
  name: 'Widget',
  meta: { registerComponent: { foo: 1 } },
  template: '<div>hello</div>',
}"#;

fn write(root: &Path, rel: &str, contents: &str) {
  let path = root.join(rel);
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, contents).unwrap();
}

fn config(root: &Path, targets: &[Target]) -> BuildConfig {
  let mut config = BuildConfig::default();
  config.root = root.to_path_buf();
  config.dest = root.join("out");
  config.targets = targets.to_vec();
  config
}

async fn run(config: BuildConfig) -> BuildSummary {
  build(config, Arc::new(IrToolchain::new())).await.unwrap()
}

/// Snapshot an output tree as relative path -> contents.
fn tree(dir: &Path) -> BTreeMap<PathBuf, String> {
  fn visit(base: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, String>) {
    for entry in std::fs::read_dir(dir).unwrap() {
      let path = entry.unwrap().path();
      if path.is_dir() {
        visit(base, &path, out);
      } else {
        let contents = std::fs::read_to_string(&path).unwrap();
        out.insert(path.strip_prefix(base).unwrap().to_path_buf(), contents);
      }
    }
  }
  let mut out = BTreeMap::new();
  if dir.exists() {
    visit(dir, dir, &mut out);
  }
  out
}

#[tokio::test]
async fn react_build_writes_final_and_original_forms() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);

  let summary = run(config(root, &[Target::React])).await;
  assert_eq!(summary.components, 1);
  assert_eq!(summary.files_written, 2);

  let lowered = std::fs::read_to_string(root.join("out/react/widget.js")).unwrap();
  assert!(lowered.contains("import { registerComponent } from '../functions/register-component';"));
  assert!(lowered.contains("registerComponent(Widget, "));
  assert!(lowered.contains("foo"));
  assert!(lowered.contains("require('react')"));

  let original = std::fs::read_to_string(root.join("out/react/widget.original.js")).unwrap();
  assert!(original.contains("import * as React from 'react';"));
  assert!(!original.contains("registerComponent("));
}

#[tokio::test]
async fn vue_build_writes_only_the_sub_compiled_file_set() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(
    root,
    "src/widget.lite.tsx",
    r#"{ name: 'Widget', template: '<div />', style: 'div { color: red; }' }"#,
  );

  run(config(root, &[Target::Vue])).await;

  assert!(root.join("out/vue/widget.js").exists());
  assert!(root.join("out/vue/widget.css").exists());
  assert!(!root.join("out/vue/widget.original.js").exists());
}

#[tokio::test]
async fn solid_build_passes_generator_output_through() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);

  run(config(root, &[Target::Solid])).await;

  let final_form = std::fs::read_to_string(root.join("out/solid/widget.js")).unwrap();
  let original = std::fs::read_to_string(root.join("out/solid/widget.original.js")).unwrap();
  assert_eq!(final_form, original);
  assert!(!final_form.contains("registerComponent"));
}

#[tokio::test]
async fn plain_modules_are_lowered_per_target() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/util/math.ts", "import { add } from './add';\nexport const two = add(1, 1);\n");

  run(config(root, &[Target::React, Target::Solid])).await;

  for target in ["react", "solid"] {
    let contents = std::fs::read_to_string(root.join(format!("out/{target}/util/math.js"))).unwrap();
    assert!(contents.contains("const { add } = require('./add');"), "{target}: {contents}");
  }
}

#[tokio::test]
async fn override_wins_over_generated_output_at_the_same_path() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);
  // Derived override path: out/react/widget.js, the generated component path.
  write(root, "overrides/react/react/widget.tsx", "export const handWritten = true;\n");

  run(config(root, &[Target::React])).await;

  let contents = std::fs::read_to_string(root.join("out/react/widget.js")).unwrap();
  assert!(contents.contains("handWritten"));
  assert!(!contents.contains("registerComponent"));
  // The original form is untouched by the override.
  assert!(root.join("out/react/widget.original.js").exists());
}

#[tokio::test]
async fn non_lowerable_overrides_copy_through_verbatim() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "overrides/react/assets/logo.svg", "<svg />");

  let summary = run(config(root, &[Target::React])).await;
  assert_eq!(summary.overrides_applied, 1);
  assert_eq!(
    std::fs::read_to_string(root.join("out/assets/logo.svg")).unwrap(),
    "<svg />"
  );
}

#[tokio::test]
async fn binary_overrides_survive_a_full_build() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);

  let png: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0xff, 0x00];
  let asset = root.join("overrides/react/assets/logo.png");
  std::fs::create_dir_all(asset.parent().unwrap()).unwrap();
  std::fs::write(&asset, png).unwrap();

  let summary = run(config(root, &[Target::React])).await;
  assert_eq!(summary.overrides_applied, 1);
  assert_eq!(std::fs::read(root.join("out/assets/logo.png")).unwrap(), png);
}

#[tokio::test]
async fn empty_sources_yield_only_override_outputs() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "overrides/react/helpers/x.ts", "export const x = 1;\n");

  let summary = run(config(root, &[Target::React])).await;
  assert_eq!(summary.components, 0);
  assert_eq!(summary.files_written, 0);

  let snapshot = tree(&root.join("out"));
  assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec![Path::new("helpers/x.js")]);
}

#[tokio::test]
async fn rebuild_is_idempotent() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);
  write(root, "src/util/math.ts", "export const two = 2;\n");
  write(root, "overrides/react/helpers/x.ts", "export const x = 1;\n");

  run(config(root, &[Target::React, Target::Solid])).await;
  let first = tree(&root.join("out"));

  run(config(root, &[Target::React, Target::Solid])).await;
  let second = tree(&root.join("out"));

  assert_eq!(first, second);
  assert!(!first.is_empty());
}

#[tokio::test]
async fn stale_output_is_cleaned_before_generation() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);
  write(root, "out/react/stale.js", "left over from a previous build");

  run(config(root, &[Target::React])).await;

  assert!(!root.join("out/react/stale.js").exists());
  assert!(root.join("out/react/widget.js").exists());
}

#[tokio::test]
async fn multi_target_build_is_the_union_of_single_target_builds() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);
  write(root, "src/util/math.ts", "export const two = 2;\n");

  let mut both = config(root, &[Target::React, Target::Solid]);
  both.dest = root.join("out-both");
  run(both).await;

  let mut react_only = config(root, &[Target::React]);
  react_only.dest = root.join("out-react");
  run(react_only).await;

  let mut solid_only = config(root, &[Target::Solid]);
  solid_only.dest = root.join("out-solid");
  run(solid_only).await;

  let mut union = tree(&root.join("out-react"));
  union.extend(tree(&root.join("out-solid")));
  assert_eq!(tree(&root.join("out-both")), union);
}

#[tokio::test]
async fn malformed_component_fails_the_build() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/good.lite.tsx", "{ name: 'Good' }");
  write(root, "src/bad.lite.tsx", "definitely not a component");

  let err = build(config(root, &[Target::React]), Arc::new(IrToolchain::new()))
    .await
    .unwrap_err();
  assert!(matches!(err, BuildError::Parse { .. }), "{err}");
}

#[tokio::test]
async fn no_targets_builds_nothing_but_succeeds() {
  let tmp = tempfile::TempDir::new().unwrap();
  let root = tmp.path();
  write(root, "src/widget.lite.tsx", WIDGET);

  let summary = run(config(root, &[])).await;
  assert_eq!(summary.components, 1);
  assert_eq!(summary.files_written, 0);
  assert!(tree(&root.join("out")).is_empty());
}
