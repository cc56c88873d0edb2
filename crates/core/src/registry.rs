//! The command registry: value pools, signatures, and compiled grammar state.
//!
//! Structural mutation (commands, overloads, hard enums, postfixes, chained
//! subcommands) takes `&mut self` and happens during startup registration.
//! Value-pool mutation that is legal at runtime (soft-enum values, aliases,
//! constrained values) takes `&self` behind narrow locks, so parse calls on
//! other threads proceed against consistent snapshots.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::grammar::{Factorization, OptionalParameterChain, ParseRule, ParseTable};
use crate::origin::{SemanticConstraint, SemanticConstraints};
use crate::signature::{
    AllocFn, CommandFlags, CommandParameterData, Overload, OverloadRef, Signature,
};
use crate::symbol::{Symbol, Terminal};
use crate::value::CommandInvocation;
use cmdgram_spec_tables::{Permission, VersionWindow};
use cmdgram_wire::{
    ChainedSubcommandDescriptor, CommandDescriptor, ConstrainedValueDescriptor, Descriptor,
    EncodeError, EnumDescriptor, OverloadDescriptor, ParamDescriptor, SoftEnumDescriptor,
};

/// A hard enum: a name plus half-open ranges into the shared value pool.
///
/// Ranges preserve registration order; a value appended right after the
/// previous one extends the last range instead of opening a new one.
#[derive(Debug)]
pub(crate) struct CommandEnum {
    pub(crate) name: String,
    pub(crate) ranges: Vec<(u32, u32)>,
}

impl CommandEnum {
    pub(crate) fn value_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|&(start, end)| start..end)
    }

    pub(crate) fn contains_index(&self, index: u32) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| (start..end).contains(&index))
    }
}

/// A soft enum. Values sit behind a lock as a shared snapshot: runtime
/// updates swap the `Arc`, parsers clone it and read lock-free.
#[derive(Debug)]
pub(crate) struct SoftEnum {
    pub(crate) name: String,
    pub(crate) values: RwLock<Arc<Vec<String>>>,
}

/// One chained-subcommand group: value → target command.
#[derive(Debug)]
pub(crate) struct ChainedSubcommandGroup {
    pub(crate) name: String,
    pub(crate) entries: Vec<ChainedEntry>,
}

#[derive(Debug)]
pub(crate) struct ChainedEntry {
    /// Index into the chained-subcommand value pool.
    pub(crate) value_index: u32,
    /// Target command name. Resolved lazily so chain groups may be
    /// registered before their target commands.
    pub(crate) command: String,
}

#[derive(Debug, Default)]
struct AliasState {
    /// alias → canonical name.
    canonical: BTreeMap<String, String>,
    /// canonical name → aliases in registration order.
    by_command: BTreeMap<String, Vec<String>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// The registry. See the module docs for the mutability split.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    // Compiled grammar artifacts; append-only.
    pub(crate) rules: Vec<ParseRule>,
    pub(crate) parse_tables: BTreeMap<u32, ParseTable>,
    pub(crate) optionals: Vec<OptionalParameterChain>,
    pub(crate) factorizations: Vec<Factorization>,

    // Shared value pools.
    pub(crate) enum_values: Vec<String>,
    enum_value_lookup: BTreeMap<String, u32>,
    pub(crate) enums: Vec<CommandEnum>,
    enum_lookup: BTreeMap<String, u32>,
    pub(crate) soft_enums: Vec<SoftEnum>,
    soft_enum_lookup: BTreeMap<String, u32>,
    pub(crate) postfixes: Vec<String>,
    postfix_lookup: BTreeMap<String, u32>,
    pub(crate) chained_subcommand_values: Vec<String>,
    chained_value_lookup: BTreeMap<String, u32>,
    pub(crate) chained_subcommands: Vec<ChainedSubcommandGroup>,
    chained_lookup: BTreeMap<String, u32>,

    // Signatures, keyed by canonical name.
    pub(crate) signatures: BTreeMap<String, Signature>,
    next_signature: u32,

    // Runtime-mutable pools.
    aliases: RwLock<AliasState>,
    constrained: RwLock<BTreeMap<(u32, u32), SemanticConstraints>>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command signature. Returns `false` when the name is
    /// already registered (the call is then a no-op, including the
    /// description and flags).
    ///
    /// Panics on names that are not lowercase identifiers; those are
    /// registration-time programmer errors.
    pub fn register_command(
        &mut self,
        name: &str,
        description: &str,
        permission: Permission,
        flags: CommandFlags,
    ) -> bool {
        assert!(
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "invalid command name {name:?}"
        );
        if self.signatures.contains_key(name) {
            return false;
        }
        let command_symbol = Symbol::dynamic_non_terminal(self.next_signature);
        self.next_signature += 1;
        self.signatures.insert(name.to_string(), Signature {
            name: name.to_string(),
            description: description.to_string(),
            permission,
            flags,
            command_symbol,
            overloads: Vec::new(),
            first_rule: -1,
            first_factorization: -1,
            first_optional: -1,
            rule_counter: 0,
        });
        true
    }

    /// Register an alias for an existing command. Returns `false` when the
    /// target is unknown or the alias name is already taken by a command or
    /// another alias.
    pub fn register_alias(&self, name: &str, alias: &str) -> bool {
        let Some(canonical) = self.resolve_name(name) else {
            return false;
        };
        if self.signatures.contains_key(alias) {
            return false;
        }
        let mut state = write(&self.aliases);
        if state.canonical.contains_key(alias) {
            return false;
        }
        state.canonical.insert(alias.to_string(), canonical.clone());
        state
            .by_command
            .entry(canonical)
            .or_default()
            .push(alias.to_string());
        true
    }

    /// Aliases registered for a command, in registration order.
    pub fn aliases_of(&self, name: &str) -> Vec<String> {
        let Some(canonical) = self.resolve_name(name) else {
            return Vec::new();
        };
        read(&self.aliases)
            .by_command
            .get(&canonical)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve a command or alias name to the canonical command name.
    pub fn resolve_name(&self, name: &str) -> Option<String> {
        if self.signatures.contains_key(name) {
            return Some(name.to_string());
        }
        read(&self.aliases).canonical.get(name).cloned()
    }

    /// Look up a signature by command or alias name.
    pub fn find_signature(&self, name: &str) -> Option<&Signature> {
        let canonical = self.resolve_name(name)?;
        self.signatures.get(&canonical)
    }

    /// Iterate all signatures in canonical-name order.
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.values()
    }

    /// Register an overload with the default instance allocator.
    pub fn register_overload(
        &mut self,
        name: &str,
        version: VersionWindow,
        params: Vec<CommandParameterData>,
    ) -> Option<OverloadRef> {
        self.register_overload_with_alloc(name, version, CommandInvocation::new, params)
    }

    /// Register an overload, compiling it into the grammar immediately.
    /// Returns `None` when the command is unknown; the registry is then
    /// unchanged.
    pub fn register_overload_with_alloc(
        &mut self,
        name: &str,
        version: VersionWindow,
        alloc: AllocFn,
        params: Vec<CommandParameterData>,
    ) -> Option<OverloadRef> {
        let canonical = self.resolve_name(name)?;
        let signature = self.signatures.get(&canonical)?;
        let command_symbol = signature.command_symbol;
        let index = signature.overloads.len();
        let mut overload = Overload::with_alloc(version, alloc, params);
        overload.param_symbols =
            self.compile_overload(&canonical, command_symbol, index, &overload.params);
        if let Some(signature) = self.signatures.get_mut(&canonical) {
            signature.overloads.push(overload);
        }
        Some(OverloadRef {
            command: canonical,
            index,
        })
    }

    fn intern_enum_value(&mut self, value: &str) -> u32 {
        if let Some(&i) = self.enum_value_lookup.get(value) {
            return i;
        }
        let i = u32::try_from(self.enum_values.len()).expect("enum value pool overflow");
        self.enum_values.push(value.to_string());
        self.enum_value_lookup.insert(value.to_string(), i);
        i
    }

    /// Create or extend a hard enum, returning its index. Values are
    /// deduplicated against the shared pool; re-adding an existing member is
    /// a no-op.
    pub fn add_enum_values(&mut self, name: &str, values: &[&str]) -> u32 {
        let idx = match self.enum_lookup.get(name) {
            Some(&i) => i,
            None => {
                let i = u32::try_from(self.enums.len()).expect("enum table overflow");
                self.enums.push(CommandEnum {
                    name: name.to_string(),
                    ranges: Vec::new(),
                });
                self.enum_lookup.insert(name.to_string(), i);
                i
            }
        };
        for value in values {
            let vi = self.intern_enum_value(value);
            let ranges = &mut self.enums[idx as usize].ranges;
            if ranges
                .iter()
                .any(|&(start, end)| (start..end).contains(&vi))
            {
                continue;
            }
            match ranges.last_mut() {
                Some(last) if last.1 == vi => last.1 = vi + 1,
                _ => ranges.push((vi, vi + 1)),
            }
        }
        idx
    }

    /// Create or extend a soft enum during registration, returning its index.
    pub fn add_soft_enum_values(&mut self, name: &str, values: &[&str]) -> u32 {
        let idx = match self.soft_enum_lookup.get(name) {
            Some(&i) => i,
            None => {
                let i = u32::try_from(self.soft_enums.len()).expect("soft enum table overflow");
                self.soft_enums.push(SoftEnum {
                    name: name.to_string(),
                    values: RwLock::new(Arc::new(Vec::new())),
                });
                self.soft_enum_lookup.insert(name.to_string(), i);
                i
            }
        };
        let current = self.soft_enums[idx as usize]
            .values
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let set = Arc::make_mut(current);
        for value in values {
            if !set.iter().any(|v| v == value) {
                set.push((*value).to_string());
            }
        }
        idx
    }

    /// Add values to an existing soft enum at runtime. Returns `false` when
    /// the soft enum is unknown. In-flight parses keep their snapshot; new
    /// parses see the updated set.
    pub fn soft_enum_add_values(&self, name: &str, values: &[&str]) -> bool {
        let Some(&i) = self.soft_enum_lookup.get(name) else {
            return false;
        };
        let mut guard = write(&self.soft_enums[i as usize].values);
        let mut next = (**guard).clone();
        for value in values {
            if !next.iter().any(|v| v == value) {
                next.push((*value).to_string());
            }
        }
        *guard = Arc::new(next);
        true
    }

    /// Remove values from an existing soft enum at runtime. Returns `false`
    /// when the soft enum is unknown.
    pub fn soft_enum_remove_values(&self, name: &str, values: &[&str]) -> bool {
        let Some(&i) = self.soft_enum_lookup.get(name) else {
            return false;
        };
        let mut guard = write(&self.soft_enums[i as usize].values);
        let mut next = (**guard).clone();
        next.retain(|v| !values.iter().any(|r| r == v));
        *guard = Arc::new(next);
        true
    }

    /// The current value snapshot of a soft enum by table index.
    pub(crate) fn soft_enum_snapshot(&self, index: u32) -> Arc<Vec<String>> {
        Arc::clone(&read(&self.soft_enums[index as usize].values))
    }

    /// Register a numeric postfix, returning its pool index.
    pub fn add_postfix(&mut self, text: &str) -> u32 {
        if let Some(&i) = self.postfix_lookup.get(text) {
            return i;
        }
        let i = u32::try_from(self.postfixes.len()).expect("postfix pool overflow");
        self.postfixes.push(text.to_string());
        self.postfix_lookup.insert(text.to_string(), i);
        i
    }

    /// Create or extend a chained-subcommand group, returning its index.
    /// Each entry maps a subcommand value to a target command name; targets
    /// may be registered later.
    pub fn add_chained_subcommand(&mut self, name: &str, entries: &[(&str, &str)]) -> u32 {
        let idx = match self.chained_lookup.get(name) {
            Some(&i) => i,
            None => {
                let i = u32::try_from(self.chained_subcommands.len())
                    .expect("chained subcommand table overflow");
                self.chained_subcommands.push(ChainedSubcommandGroup {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.chained_lookup.insert(name.to_string(), i);
                i
            }
        };
        for (value, command) in entries {
            let vi = match self.chained_value_lookup.get(*value) {
                Some(&i) => i,
                None => {
                    let i = u32::try_from(self.chained_subcommand_values.len())
                        .expect("chained value pool overflow");
                    self.chained_subcommand_values.push((*value).to_string());
                    self.chained_value_lookup.insert((*value).to_string(), i);
                    i
                }
            };
            let group = &mut self.chained_subcommands[idx as usize];
            if !group.entries.iter().any(|e| e.value_index == vi) {
                group.entries.push(ChainedEntry {
                    value_index: vi,
                    command: (*command).to_string(),
                });
            }
        }
        idx
    }

    /// The entry of a chained-subcommand group matching `value`, if any.
    pub(crate) fn chained_entry(&self, group: u32, value: &str) -> Option<&ChainedEntry> {
        let &vi = self.chained_value_lookup.get(value)?;
        self.chained_subcommands[group as usize]
            .entries
            .iter()
            .find(|e| e.value_index == vi)
    }

    /// Attach semantic constraints to one hard-enum value. Returns `false`
    /// when the enum is unknown or the value is not one of its members.
    /// Constraints accumulate across calls.
    pub fn add_constrained_value(
        &self,
        enum_name: &str,
        value: &str,
        constraints: &[SemanticConstraint],
    ) -> bool {
        let Some(&enum_index) = self.enum_lookup.get(enum_name) else {
            return false;
        };
        let Some(&value_index) = self.enum_value_lookup.get(value) else {
            return false;
        };
        if !self.enums[enum_index as usize].contains_index(value_index) {
            return false;
        }
        let merged = SemanticConstraints::from_iter(constraints.iter().copied());
        let mut pool = write(&self.constrained);
        let entry = pool
            .entry((value_index, enum_index))
            .or_insert(SemanticConstraints::NONE);
        *entry = *entry | merged;
        true
    }

    /// The constraints attached to one enum value, by pool indices.
    pub(crate) fn constraints_for(&self, enum_index: u32, value_index: u32) -> SemanticConstraints {
        read(&self.constrained)
            .get(&(value_index, enum_index))
            .copied()
            .unwrap_or(SemanticConstraints::NONE)
    }

    /// Index of a value in the shared enum value pool, if interned.
    pub(crate) fn enum_value_index(&self, value: &str) -> Option<u32> {
        self.enum_value_lookup.get(value).copied()
    }

    /// Flatten the registry into a wire descriptor.
    ///
    /// The snapshot is deterministic: commands in name order, pools in
    /// registration order, alias enums appended after hard enums in
    /// canonical-name order. Two registries built by the same registration
    /// sequence produce identical descriptors.
    pub fn serialize_available_commands(&self) -> Descriptor {
        let mut enum_values = self.enum_values.clone();
        let mut intern = |pool: &mut Vec<String>, value: &str| -> u32 {
            if let Some(&i) = self.enum_value_lookup.get(value) {
                return i;
            }
            // Alias names live outside the structural pool; extend the
            // snapshot copy only.
            if let Some(pos) = pool[self.enum_values.len()..]
                .iter()
                .position(|v| v == value)
            {
                return u32::try_from(self.enum_values.len() + pos).expect("enum value overflow");
            }
            let i = u32::try_from(pool.len()).expect("enum value overflow");
            pool.push(value.to_string());
            i
        };

        let mut enums: Vec<EnumDescriptor> = self
            .enums
            .iter()
            .map(|e| EnumDescriptor {
                name: e.name.clone(),
                value_indices: e.value_indices().collect(),
            })
            .collect();

        let alias_state = read(&self.aliases);
        let mut alias_enum_index: BTreeMap<&str, i32> = BTreeMap::new();
        for (canonical, aliases) in &alias_state.by_command {
            if aliases.is_empty() {
                continue;
            }
            let mut value_indices = vec![intern(&mut enum_values, canonical)];
            for alias in aliases {
                value_indices.push(intern(&mut enum_values, alias));
            }
            alias_enum_index.insert(
                canonical,
                i32::try_from(enums.len()).expect("enum table overflow"),
            );
            enums.push(EnumDescriptor {
                name: format!("{canonical}Aliases"),
                value_indices,
            });
        }

        let soft_enums = self
            .soft_enums
            .iter()
            .map(|s| SoftEnumDescriptor {
                name: s.name.clone(),
                values: (*read(&s.values)).as_ref().clone(),
            })
            .collect();

        let chained_subcommands = self
            .chained_subcommands
            .iter()
            .map(|g| ChainedSubcommandDescriptor {
                name: g.name.clone(),
                entries: g
                    .entries
                    .iter()
                    .map(|e| {
                        let symbol = self
                            .signatures
                            .get(&e.command)
                            .map_or(Symbol::Terminal(Terminal::Epsilon), |s| s.command_symbol);
                        (e.value_index, symbol.value())
                    })
                    .collect(),
            })
            .collect();

        let commands = self
            .signatures
            .values()
            .map(|sig| CommandDescriptor {
                name: sig.name.clone(),
                description: sig.description.clone(),
                flags: sig.flags.bits(),
                permission: sig.permission.to_u8(),
                alias_enum: alias_enum_index
                    .get(sig.name.as_str())
                    .copied()
                    .unwrap_or(-1),
                overloads: sig
                    .overloads
                    .iter()
                    .map(|o| OverloadDescriptor {
                        chaining: o.is_chaining,
                        params: o
                            .params
                            .iter()
                            .zip(&o.param_symbols)
                            .map(|(p, sym)| ParamDescriptor {
                                name: p.name.clone(),
                                symbol: sym.value(),
                                optional: p.is_optional,
                                options: p.options.bits(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let constrained_values = read(&self.constrained)
            .iter()
            .map(|(&(value_index, enum_index), set)| ConstrainedValueDescriptor {
                enum_value_index: value_index,
                enum_index,
                constraints: set.codes(),
            })
            .collect();

        Descriptor {
            enum_values,
            postfixes: self.postfixes.clone(),
            enums,
            soft_enums,
            chained_subcommand_values: self.chained_subcommand_values.clone(),
            chained_subcommands,
            commands,
            constrained_values,
        }
    }

    /// Serialize and encode the available-commands snapshot in one step.
    pub fn encode_available_commands(&self) -> Result<Vec<u8>, EncodeError> {
        cmdgram_wire::encode(&self.serialize_available_commands())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgram_spec_tables::ArgType;

    #[test]
    fn command_registration_is_idempotent() {
        let mut reg = CommandRegistry::new();
        assert!(reg.register_command("tp", "Teleports", Permission::GameDirectors, CommandFlags::NONE));
        assert!(!reg.register_command("tp", "Other text", Permission::Any, CommandFlags::ASYNC));
        let sig = reg.find_signature("tp").unwrap();
        assert_eq!(sig.description, "Teleports");
        assert_eq!(sig.permission, Permission::GameDirectors);
    }

    #[test]
    #[should_panic(expected = "invalid command name")]
    fn uppercase_command_name_panics() {
        CommandRegistry::new().register_command("Tp", "", Permission::Any, CommandFlags::NONE);
    }

    #[test]
    fn enum_values_share_one_pool() {
        let mut reg = CommandRegistry::new();
        let a = reg.add_enum_values("GameMode", &["survival", "creative"]);
        let b = reg.add_enum_values("DefaultGameMode", &["survival", "adventure"]);
        assert_ne!(a, b);
        // "survival" interned once
        assert_eq!(reg.enum_values, vec!["survival", "creative", "adventure"]);
        assert_eq!(
            reg.enums[a as usize].value_indices().collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert_eq!(
            reg.enums[b as usize].value_indices().collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn readding_enum_value_is_a_noop() {
        let mut reg = CommandRegistry::new();
        let e = reg.add_enum_values("Mode", &["a", "b"]);
        reg.add_enum_values("Mode", &["a"]);
        assert_eq!(
            reg.enums[e as usize].value_indices().collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn contiguous_values_extend_the_last_range() {
        let mut reg = CommandRegistry::new();
        let e = reg.add_enum_values("Mode", &["a", "b", "c"]);
        assert_eq!(reg.enums[e as usize].ranges, vec![(0, 3)]);
        reg.add_enum_values("Other", &["x"]);
        reg.add_enum_values("Mode", &["y"]);
        assert_eq!(reg.enums[e as usize].ranges, vec![(0, 3), (4, 5)]);
    }

    #[test]
    fn alias_resolution_and_conflicts() {
        let mut reg = CommandRegistry::new();
        reg.register_command("teleport", "", Permission::Any, CommandFlags::NONE);
        reg.register_command("gamemode", "", Permission::Any, CommandFlags::NONE);
        assert!(reg.register_alias("teleport", "tp"));
        assert_eq!(reg.resolve_name("tp").as_deref(), Some("teleport"));
        // alias of an alias resolves to the canonical name
        assert!(reg.register_alias("tp", "tele"));
        assert_eq!(reg.resolve_name("tele").as_deref(), Some("teleport"));
        // taken by a command
        assert!(!reg.register_alias("teleport", "gamemode"));
        // taken by an alias
        assert!(!reg.register_alias("gamemode", "tp"));
        // unknown target
        assert!(!reg.register_alias("nope", "n"));
        assert_eq!(reg.aliases_of("teleport"), vec!["tp", "tele"]);
    }

    #[test]
    fn soft_enum_updates_through_shared_reference() {
        let mut reg = CommandRegistry::new();
        reg.add_soft_enum_values("ObjectiveName", &["sidebar"]);
        let reg = &reg; // runtime mutation needs no exclusive access
        assert!(reg.soft_enum_add_values("ObjectiveName", &["list", "sidebar"]));
        assert_eq!(*reg.soft_enum_snapshot(0), vec!["sidebar", "list"]);
        assert!(reg.soft_enum_remove_values("ObjectiveName", &["sidebar"]));
        assert_eq!(*reg.soft_enum_snapshot(0), vec!["list"]);
        assert!(!reg.soft_enum_add_values("Unknown", &["x"]));
    }

    #[test]
    fn snapshots_are_isolated_from_later_updates() {
        let mut reg = CommandRegistry::new();
        reg.add_soft_enum_values("Names", &["a"]);
        let before = reg.soft_enum_snapshot(0);
        reg.soft_enum_add_values("Names", &["b"]);
        assert_eq!(*before, vec!["a"]);
        assert_eq!(*reg.soft_enum_snapshot(0), vec!["a", "b"]);
    }

    #[test]
    fn postfixes_deduplicate() {
        let mut reg = CommandRegistry::new();
        assert_eq!(reg.add_postfix("L"), 0);
        assert_eq!(reg.add_postfix("x"), 1);
        assert_eq!(reg.add_postfix("L"), 0);
    }

    #[test]
    fn chained_subcommand_pools() {
        let mut reg = CommandRegistry::new();
        let g = reg.add_chained_subcommand("ExecuteChain", &[("run", "execute_run"), ("if", "execute_if")]);
        reg.add_chained_subcommand("OtherChain", &[("run", "other_run")]);
        assert_eq!(reg.chained_subcommand_values, vec!["run", "if"]);
        assert_eq!(reg.chained_subcommands[g as usize].entries.len(), 2);
    }

    #[test]
    fn constrained_values_validate_membership() {
        let mut reg = CommandRegistry::new();
        reg.add_enum_values("Mode", &["survival", "creative"]);
        reg.add_enum_values("Other", &["spectator"]);
        assert!(reg.add_constrained_value("Mode", "creative", &[
            SemanticConstraint::RequiresCheatsEnabled
        ]));
        // value exists in the pool but not in this enum
        assert!(!reg.add_constrained_value("Mode", "spectator", &[
            SemanticConstraint::RequiresCheatsEnabled
        ]));
        assert!(!reg.add_constrained_value("Nope", "survival", &[]));
        let set = reg.constraints_for(0, reg.enum_value_index("creative").unwrap());
        assert!(set.contains(SemanticConstraint::RequiresCheatsEnabled));
    }

    #[test]
    fn constraints_accumulate() {
        let mut reg = CommandRegistry::new();
        reg.add_enum_values("Mode", &["a"]);
        reg.add_constrained_value("Mode", "a", &[SemanticConstraint::RequiresCheatsEnabled]);
        reg.add_constrained_value("Mode", "a", &[SemanticConstraint::RequiresHostPermissions]);
        let set = reg.constraints_for(0, 0);
        assert_eq!(set.codes(), vec![1, 4]);
    }

    #[test]
    fn descriptor_is_deterministic_and_ordered() {
        let build = || {
            let mut reg = CommandRegistry::new();
            reg.register_command("zeta", "", Permission::Any, CommandFlags::NONE);
            reg.register_command("alpha", "", Permission::Any, CommandFlags::NONE);
            reg.add_enum_values("Mode", &["x", "y"]);
            reg.register_overload("alpha", VersionWindow::any(), vec![
                CommandParameterData::basic("n", ArgType::Int, 0),
            ]);
            reg.register_alias("zeta", "z");
            reg.serialize_available_commands()
        };
        let a = build();
        let b = build();
        assert_eq!(a, b);
        assert_eq!(a.commands[0].name, "alpha");
        assert_eq!(a.commands[1].name, "zeta");
    }

    #[test]
    fn alias_enum_is_appended_to_the_snapshot() {
        let mut reg = CommandRegistry::new();
        reg.register_command("teleport", "", Permission::Any, CommandFlags::NONE);
        reg.add_enum_values("Mode", &["teleport"]); // canonical name already interned
        reg.register_alias("teleport", "tp");
        let desc = reg.serialize_available_commands();
        assert_eq!(desc.enums.len(), 2);
        let alias_enum = &desc.enums[1];
        assert_eq!(alias_enum.name, "teleportAliases");
        // first index reuses the interned value, second is appended
        assert_eq!(alias_enum.value_indices, vec![0, 1]);
        assert_eq!(desc.enum_values, vec!["teleport", "tp"]);
        assert_eq!(desc.commands[0].alias_enum, 1);
        // the structural pool is untouched
        assert_eq!(reg.enum_values, vec!["teleport"]);
    }

    #[test]
    fn chained_targets_resolve_to_command_symbols() {
        let mut reg = CommandRegistry::new();
        reg.add_chained_subcommand("Chain", &[("run", "execute_run"), ("bad", "missing")]);
        reg.register_command("execute_run", "", Permission::Any, CommandFlags::NONE);
        let desc = reg.serialize_available_commands();
        let entries = &desc.chained_subcommands[0].entries;
        let sym = reg.find_signature("execute_run").unwrap().command_symbol;
        assert_eq!(entries[0], (0, sym.value()));
        // unregistered target serializes as epsilon
        assert_eq!(
            entries[1],
            (1, Symbol::Terminal(Terminal::Epsilon).value())
        );
    }

    #[test]
    fn overload_params_carry_packed_symbols() {
        let mut reg = CommandRegistry::new();
        reg.register_command("gamemode", "", Permission::Any, CommandFlags::NONE);
        reg.add_enum_values("GameMode", &["survival", "creative"]);
        reg.register_overload("gamemode", VersionWindow::any(), vec![
            CommandParameterData::with_enum("mode", "GameMode", 0),
        ]);
        let desc = reg.serialize_available_commands();
        let param = &desc.commands[0].overloads[0].params[0];
        assert_eq!(Symbol::from_value(param.symbol), Some(Symbol::Enum(0)));
    }
}
