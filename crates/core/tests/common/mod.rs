//! Shared test helpers for `cmdgram_core` integration tests.

#![allow(unreachable_pub)]

use std::sync::LazyLock;

use cmdgram_core::{
    ArgType, CommandFlags, CommandOrigin, CommandParameterData, CommandRegistry, CommandTables,
    Permission, VersionWindow,
};

/// Tables loaded once per test binary to avoid repeated disk I/O.
pub static TABLES: LazyLock<CommandTables> = LazyLock::new(|| {
    let path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../cli/data/command_tables.json");
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    CommandTables::from_json(&json)
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", path.display(), e))
});

/// A registry loaded from the bundled demo tables.
#[allow(dead_code)]
pub fn tables_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .load_tables(&TABLES)
        .expect("demo tables should load");
    registry
}

/// A small registry built through the registration API directly.
#[allow(dead_code)]
pub fn demo_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.add_enum_values("Color", &["red", "green", "blue"]);
    registry.add_soft_enum_values("TagName", &["friendly", "hostile"]);

    registry.register_command(
        "paint",
        "Paints a block.",
        Permission::Any,
        CommandFlags::NOT_CHEAT,
    );
    registry
        .register_overload("paint", VersionWindow::any(), vec![
            CommandParameterData::with_enum("color", "Color", 0),
            CommandParameterData::basic("strength", ArgType::Int, 1).optional(),
        ])
        .expect("paint overload");

    registry.register_command(
        "tag",
        "Tags an entity.",
        Permission::GameDirectors,
        CommandFlags::NOT_CHEAT,
    );
    registry
        .register_overload("tag", VersionWindow::any(), vec![
            CommandParameterData::basic("target", ArgType::Target, 0),
            CommandParameterData::with_soft_enum("name", "TagName", 1),
        ])
        .expect("tag overload");

    registry
}

/// A player origin at the given permission level.
#[allow(dead_code)]
pub fn player(permission: Permission) -> CommandOrigin {
    CommandOrigin {
        name: "Steve".into(),
        permission,
        ..CommandOrigin::default()
    }
}

/// The default full-permission server origin.
#[allow(dead_code)]
pub fn server() -> CommandOrigin {
    CommandOrigin::default()
}
