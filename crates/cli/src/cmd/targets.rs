//! Implementation of the `litegen targets` command.

use anyhow::Result;
use litegen_lib::Target;

/// Print the supported target identifiers, one per line.
pub fn cmd_targets() -> Result<()> {
  for target in Target::ALL {
    println!("{target}");
  }
  Ok(())
}
