//! File-layout conventions shared across the pipeline.

/// Filename suffix that marks a component-definition file.
pub const COMPONENT_SUFFIX: &str = ".lite.tsx";

/// Recursive pattern matching component-definition files anywhere in the tree.
pub const COMPONENT_GLOB: &str = "**/*.lite.tsx";

/// Recursive pattern matching plain source modules.
pub const MODULE_GLOB: &str = "src/**/*.ts";

/// Extension applied to every lowered output file.
pub const OUTPUT_EXT: &str = "js";

/// Suffix inserted before the extension of the pre-lowering output copy.
pub const ORIGINAL_SUFFIX: &str = "original";

/// Leading path segment stripped when mapping source paths into the output tree.
pub const SOURCE_ROOT: &str = "src";

/// Root directory holding hand-written per-target override trees.
pub const OVERRIDES_DIR: &str = "overrides";

/// Dependency directory excluded from override discovery.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Import path of the registration runtime helper, valid in every output tree.
pub const REGISTER_HELPER_IMPORT: &str = "../functions/register-component";

/// Hook name the parser is asked to recognize and capture into component meta.
pub const REGISTER_HOOK_NAME: &str = "registerComponent";
