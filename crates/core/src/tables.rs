//! Loading declarative command tables into a registry.

use crate::registry::CommandRegistry;
use crate::signature::{CommandFlags, CommandParameterData};
use cmdgram_spec_tables::{CommandTables, ParamEntry, TABLE_FORMAT_VERSION};
use thiserror::Error;

/// A table file that cannot be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The schema version does not match this build.
    #[error("unsupported table format version {found:?}, expected {TABLE_FORMAT_VERSION:?}")]
    FormatVersion {
        /// The version string found in the file.
        found: String,
    },
    /// A command name appears twice.
    #[error("duplicate command {name:?}")]
    DuplicateCommand {
        /// The duplicated name.
        name: String,
    },
    /// An alias collides with a command or another alias.
    #[error("alias {alias:?} of {command:?} conflicts with an existing name")]
    AliasConflict {
        /// The conflicting alias.
        alias: String,
        /// The command declaring it.
        command: String,
    },
    /// A constrained value references an enum it is not a member of.
    #[error("constrained value {value:?} is not a member of enum {enum_name:?}")]
    UnknownConstraintTarget {
        /// The owning enum named in the table.
        enum_name: String,
        /// The value text.
        value: String,
    },
}

fn param_data(entry: &ParamEntry, slot: usize) -> CommandParameterData {
    let mut param = if let Some(name) = &entry.r#enum {
        CommandParameterData::with_enum(&entry.name, name, slot)
    } else if let Some(name) = &entry.soft_enum {
        CommandParameterData::with_soft_enum(&entry.name, name, slot)
    } else if let Some(postfix) = &entry.postfix {
        CommandParameterData::with_postfix(&entry.name, postfix, slot)
    } else if let Some(group) = &entry.chained_subcommand {
        CommandParameterData::with_chained_subcommand(&entry.name, group, slot)
    } else {
        CommandParameterData::basic(&entry.name, entry.r#type, slot)
    };
    if entry.optional {
        param = param.optional();
    }
    if let Some(id) = entry.group {
        param = param.in_group(id);
    }
    param
}

impl CommandRegistry {
    /// Load a parsed table file, registering everything it declares.
    ///
    /// Pools are populated before commands so that overloads referencing
    /// them pick up the declared values; chained-subcommand targets may
    /// still be declared later in the same file.
    pub fn load_tables(&mut self, tables: &CommandTables) -> Result<(), LoadError> {
        if tables.format_version != TABLE_FORMAT_VERSION {
            return Err(LoadError::FormatVersion {
                found: tables.format_version.clone(),
            });
        }

        for e in &tables.enums {
            let values: Vec<&str> = e.values.iter().map(String::as_str).collect();
            self.add_enum_values(&e.name, &values);
        }
        for e in &tables.soft_enums {
            let values: Vec<&str> = e.values.iter().map(String::as_str).collect();
            self.add_soft_enum_values(&e.name, &values);
        }
        for g in &tables.chained_subcommands {
            let entries: Vec<(&str, &str)> = g
                .entries
                .iter()
                .map(|e| (e.value.as_str(), e.command.as_str()))
                .collect();
            self.add_chained_subcommand(&g.name, &entries);
        }

        for cmd in &tables.commands {
            if !self.register_command(
                &cmd.name,
                &cmd.description,
                cmd.permission,
                CommandFlags::from_names(&cmd.flags),
            ) {
                return Err(LoadError::DuplicateCommand {
                    name: cmd.name.clone(),
                });
            }
            for overload in &cmd.overloads {
                let params = overload
                    .params
                    .iter()
                    .enumerate()
                    .map(|(slot, p)| param_data(p, slot))
                    .collect();
                // The command was just registered, so this cannot fail.
                self.register_overload(&cmd.name, overload.version, params);
            }
        }
        // Aliases after all commands, so an alias never shadows a later
        // declaration.
        for cmd in &tables.commands {
            for alias in &cmd.aliases {
                if !self.register_alias(&cmd.name, alias) {
                    return Err(LoadError::AliasConflict {
                        alias: alias.clone(),
                        command: cmd.name.clone(),
                    });
                }
            }
        }

        for cv in &tables.constrained_values {
            let constraints: Vec<_> = cv.constraints.iter().map(|&c| c.into()).collect();
            if !self.add_constrained_value(&cv.r#enum, &cv.value, &constraints) {
                return Err(LoadError::UnknownConstraintTarget {
                    enum_name: cv.r#enum.clone(),
                    value: cv.value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::CommandOrigin;
    use crate::value::Value;

    const SAMPLE: &str = r#"{
        "formatVersion": "1.0.0",
        "version": "2026-08",
        "enums": [
            { "name": "GameMode", "values": ["survival", "creative"] }
        ],
        "softEnums": [
            { "name": "Objective", "values": ["sidebar"] }
        ],
        "chainedSubcommands": [
            { "name": "ExecuteChain", "entries": [
                { "value": "run", "command": "execute_run" }
            ] }
        ],
        "commands": [
            {
                "name": "gamemode",
                "description": "Sets a player's game mode.",
                "permission": "any",
                "flags": ["not_cheat"],
                "aliases": ["gm"],
                "overloads": [
                    { "params": [
                        { "name": "mode", "type": "value", "enum": "GameMode" },
                        { "name": "player", "type": "target", "optional": true }
                    ] }
                ]
            },
            {
                "name": "execute_run",
                "permission": "game_directors",
                "flags": ["not_cheat"],
                "overloads": [
                    { "params": [ { "name": "count", "type": "int" } ] }
                ]
            }
        ],
        "constrainedValues": [
            { "enum": "GameMode", "value": "creative",
              "constraints": ["requires_cheats_enabled"] }
        ]
    }"#;

    #[test]
    fn sample_table_loads_and_parses() {
        let tables = CommandTables::from_json(SAMPLE).unwrap();
        let mut reg = CommandRegistry::new();
        reg.load_tables(&tables).unwrap();

        let inv = reg
            .parse_command("gm creative @p", &CommandOrigin::default(), 1)
            .unwrap();
        assert_eq!(inv.command, "gamemode");
        assert_eq!(
            inv.get("mode"),
            Some(&Value::Enum {
                enum_name: "GameMode".into(),
                value: "creative".into()
            })
        );
    }

    #[test]
    fn format_version_is_enforced() {
        let tables = CommandTables {
            format_version: "2.0.0".into(),
            ..CommandTables::default()
        };
        let err = CommandRegistry::new().load_tables(&tables).unwrap_err();
        assert!(matches!(err, LoadError::FormatVersion { found } if found == "2.0.0"));
    }

    #[test]
    fn duplicate_command_is_rejected() {
        let mut json: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        let cmds = json["commands"].as_array_mut().unwrap();
        let dup = cmds[0].clone();
        cmds.push(dup);
        let tables = CommandTables::from_json(&json.to_string()).unwrap();
        let err = CommandRegistry::new().load_tables(&tables).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateCommand { name } if name == "gamemode"));
    }

    #[test]
    fn bad_constraint_target_is_rejected() {
        let mut json: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        json["constrainedValues"][0]["value"] = "spectator".into();
        let tables = CommandTables::from_json(&json.to_string()).unwrap();
        let err = CommandRegistry::new().load_tables(&tables).unwrap_err();
        assert!(matches!(err, LoadError::UnknownConstraintTarget { .. }));
    }

    #[test]
    fn constrained_value_from_table_gates_parsing() {
        let tables = CommandTables::from_json(SAMPLE).unwrap();
        let mut reg = CommandRegistry::new();
        reg.load_tables(&tables).unwrap();
        let no_cheats = CommandOrigin {
            cheats_enabled: false,
            ..CommandOrigin::default()
        };
        assert!(reg.parse_command("gamemode survival", &no_cheats, 1).is_ok());
        assert!(reg.parse_command("gamemode creative", &no_cheats, 1).is_err());
    }

    #[test]
    fn chained_subcommand_from_table() {
        let mut json: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        json["commands"].as_array_mut().unwrap().push(serde_json::json!({
            "name": "execute",
            "permission": "game_directors",
            "flags": ["not_cheat"],
            "overloads": [
                { "params": [
                    { "name": "next", "type": "value", "chainedSubcommand": "ExecuteChain" }
                ] }
            ]
        }));
        let tables = CommandTables::from_json(&json.to_string()).unwrap();
        let mut reg = CommandRegistry::new();
        reg.load_tables(&tables).unwrap();
        let inv = reg
            .parse_command("execute run 3", &CommandOrigin::default(), 1)
            .unwrap();
        let Some(Value::Subcommand(sub)) = inv.get("next") else {
            panic!();
        };
        assert_eq!(sub.invocation.command, "execute_run");
        assert_eq!(sub.invocation.get("count"), Some(&Value::Int(3)));
    }
}
