//! Development toolchain backend over JSON5 IR documents.
//!
//! Component-definition files handled by this backend are JSON5 documents of
//! the shape `{ name, meta?, template?, style? }`. The production framework
//! generators live outside this repository and plug in through [`Toolchain`];
//! this backend gives the CLI and the test suite a complete, deterministic
//! implementation of the same contracts:
//!
//! - `generate` renders a small framework-flavored module per target,
//! - `lower_module` rewrites ESM imports to `require` calls,
//! - `sub_compile` splits a Vue single-file component into script and style
//!   outputs.

use std::fs;

use serde_json::Value;

use crate::output;
use crate::target::Target;
use crate::toolchain::{
  ComponentMeta, LowerRequest, OutputFile, ParseOptions, ParsedComponent, SubCompileRequest,
  Toolchain, ToolchainError,
};

/// Deterministic [`Toolchain`] over JSON5 component IR documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrToolchain;

impl IrToolchain {
  pub fn new() -> Self {
    IrToolchain
  }
}

impl Toolchain for IrToolchain {
  fn parse(&self, source: &str, options: &ParseOptions) -> Result<ParsedComponent, ToolchainError> {
    let ir: Value = json5::from_str(source).map_err(|e| ToolchainError::Parse { message: e.to_string() })?;

    let name = ir
      .get("name")
      .and_then(Value::as_str)
      .ok_or_else(|| ToolchainError::Parse {
        message: "component is missing a string `name` field".to_string(),
      })?
      .to_string();

    let register_component_hook = options
      .hook_names
      .iter()
      .find_map(|hook| ir.get("meta").and_then(|meta| meta.get(hook)).cloned());

    Ok(ParsedComponent {
      name,
      meta: ComponentMeta { register_component_hook },
      ir,
    })
  }

  fn generate(&self, target: Target, component: &ParsedComponent) -> Result<String, ToolchainError> {
    let template = component
      .ir
      .get("template")
      .and_then(Value::as_str)
      .unwrap_or("<div />");
    let name = &component.name;

    let code = match target {
      Target::React => format!(
        "import * as React from 'react';\n\n\
         export default function {name}(props) {{\n  return (\n    {template}\n  );\n}}\n"
      ),
      Target::ReactNative => format!(
        "import * as React from 'react';\nimport {{ View, Text }} from 'react-native';\n\n\
         export default function {name}(props) {{\n  return (\n    {template}\n  );\n}}\n"
      ),
      Target::Solid => format!(
        "export default function {name}(props) {{\n  return (\n    {template}\n  );\n}}\n"
      ),
      Target::Vue => {
        let style = component.ir.get("style").and_then(Value::as_str);
        let mut sfc = format!(
          "<template>\n  {template}\n</template>\n\n\
           <script>\nexport default {{\n  name: '{name}',\n}};\n</script>\n"
        );
        if let Some(style) = style {
          sfc.push_str(&format!("\n<style scoped>\n{style}\n</style>\n"));
        }
        sfc
      }
    };

    Ok(code)
  }

  fn sub_compile(&self, request: SubCompileRequest<'_>) -> Result<Vec<OutputFile>, ToolchainError> {
    let template = extract_block(request.code, "template").unwrap_or_default();
    let script = extract_block(request.code, "script").ok_or_else(|| ToolchainError::SubCompile {
      message: format!("missing <script> block in generated code for {}", request.component.name),
    })?;

    let template_literal =
      serde_json::to_string(template.trim()).map_err(|e| ToolchainError::SubCompile { message: e.to_string() })?;
    let js = format!("{}\n\nexport const template = {};\n", script.trim(), template_literal);

    let mut files = vec![OutputFile {
      path: output::component_final_path(request.dest, Target::Vue, request.path),
      contents: js,
    }];

    if let Some(style) = extract_block(request.code, "style") {
      files.push(OutputFile {
        path: output::component_style_path(request.dest, Target::Vue, request.path),
        contents: format!("{}\n", style.trim()),
      });
    }

    Ok(files)
  }

  fn lower_module(&self, request: LowerRequest<'_>) -> Result<String, ToolchainError> {
    let owned;
    let source = match request.content {
      Some(content) => content,
      None => {
        owned = fs::read_to_string(request.path)?;
        &owned
      }
    };
    Ok(lower_imports(source))
  }
}

/// Extract the inner text of a `<tag>...</tag>` block, ignoring attributes on
/// the opening tag.
fn extract_block<'a>(code: &'a str, tag: &str) -> Option<&'a str> {
  let open = format!("<{tag}");
  let close = format!("</{tag}>");
  let start = code.find(&open)?;
  let body_start = start + code[start..].find('>')? + 1;
  let end = body_start + code[body_start..].find(&close)?;
  Some(&code[body_start..end])
}

/// Rewrite top-level ESM import lines to `require` calls, leaving everything
/// else untouched.
fn lower_imports(source: &str) -> String {
  let mut out = String::with_capacity(source.len());
  for line in source.lines() {
    match lower_import_line(line) {
      Some(lowered) => out.push_str(&lowered),
      None => out.push_str(line),
    }
    out.push('\n');
  }
  out
}

fn lower_import_line(line: &str) -> Option<String> {
  let rest = line.trim().strip_prefix("import ")?;
  let rest = rest.strip_suffix(';').unwrap_or(rest);
  let (binding, module) = rest.split_once(" from ")?;
  let binding = binding.trim();
  let module = module.trim();

  if let Some(name) = binding.strip_prefix("* as ") {
    return Some(format!("const {name} = require({module});"));
  }
  if binding.starts_with('{') {
    return Some(format!("const {binding} = require({module});"));
  }
  Some(format!("const {binding} = require({module}).default;"))
}
