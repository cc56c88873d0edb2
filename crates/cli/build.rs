//! Build script for the cmdgram CLI binary.
//!
//! Embeds `command_tables.json` into the binary so that `cmdgram parse` and
//! friends work out of the box with the bundled table set, no `--tables`
//! flag needed.
//!
//! Table resolution order:
//!   1. `../../generated/command_tables.json` — workspace-level generated copy
//!   2. `data/command_tables.json` — committed in-crate copy (works from a
//!      crates.io tarball)
//!
//! If neither exists the binary is built without tables and every subcommand
//! that needs them requires `--tables <PATH>` at runtime.

use std::path::Path;

fn main() {
    // Declare the custom cfg so cargo check-cfg doesn't warn.
    println!("cargo::rustc-check-cfg=cfg(has_embedded_tables)");

    let workspace = Path::new("../../generated/command_tables.json");
    let in_crate = Path::new("data/command_tables.json");

    println!("cargo:rerun-if-changed=../../generated/command_tables.json");
    println!("cargo:rerun-if-changed=data/command_tables.json");

    let tables_path = if workspace.exists() {
        workspace
    } else if in_crate.exists() {
        in_crate
    } else {
        return;
    };

    println!("cargo:rustc-cfg=has_embedded_tables");

    // Copy into OUT_DIR so include_str! has a stable, absolute path.
    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("command_tables.json");
    std::fs::copy(tables_path, &dest).expect("failed to copy command_tables.json to OUT_DIR");
}
