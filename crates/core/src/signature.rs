//! Per-command registration state: flags, parameters, overloads, signatures.

use crate::symbol::Symbol;
use crate::value::CommandInvocation;
use cmdgram_spec_tables::{ArgType, FlagName, Permission, VersionWindow};
use serde::Serialize;

/// Behavior flags of a command, stored as a bitset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommandFlags(u16);

impl CommandFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Usable in test automation only.
    pub const TEST_USAGE: Self = Self(0x01);
    /// Hidden from command-block autocompletion.
    pub const HIDDEN_FROM_BLOCKS: Self = Self(0x02);
    /// Hidden from player autocompletion.
    pub const HIDDEN_FROM_PLAYERS: Self = Self(0x04);
    /// Not classified as a cheat.
    pub const NOT_CHEAT: Self = Self(0x08);
    /// Executes asynchronously on the host side.
    pub const ASYNC: Self = Self(0x10);
    /// Accepts message-style final arguments.
    pub const MESSAGE: Self = Self(0x20);

    /// Whether every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The raw bitset.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Rebuild from a raw bitset (wire decoding).
    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Fold table-file flag names into a bitset.
    pub fn from_names(names: &[FlagName]) -> Self {
        names.iter().fold(Self::NONE, |acc, n| {
            acc | match n {
                FlagName::TestUsage => Self::TEST_USAGE,
                FlagName::HiddenFromBlocks => Self::HIDDEN_FROM_BLOCKS,
                FlagName::HiddenFromPlayers => Self::HIDDEN_FROM_PLAYERS,
                FlagName::NotCheat => Self::NOT_CHEAT,
                FlagName::Async => Self::ASYNC,
                FlagName::Message => Self::MESSAGE,
            }
        })
    }
}

impl std::ops::BitOr for CommandFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Parameter kind: how the parameter's grammar symbol is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamKind {
    /// A plain typed terminal.
    Basic,
    /// A hard enum reference.
    Enum,
    /// A soft enum reference.
    SoftEnum,
    /// A numeric postfix reference.
    Postfix,
    /// A chained-subcommand reference.
    ChainedSubcommand,
}

/// Parameter option bits carried to the remote client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParamOptions(u8);

impl ParamOptions {
    /// No options.
    pub const NONE: Self = Self(0);
    /// Expand the enum inline in autocompletion.
    pub const ENUM_AUTOCOMPLETE_EXPANSION: Self = Self(1);
    /// At least one of the enum's values carries a semantic constraint.
    pub const HAS_SEMANTIC_CONSTRAINT: Self = Self(2);
    /// Present the enum as a chained command in completion hints.
    pub const ENUM_AS_CHAINED_COMMAND: Self = Self(4);

    /// The raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for ParamOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One formal parameter of an overload.
#[derive(Debug, Clone, Serialize)]
pub struct CommandParameterData {
    /// Native type tag; selects the parse capability.
    pub arg_type: ArgType,
    /// Parameter name, used in diagnostics and as the invocation slot key.
    pub name: String,
    /// Parameter kind.
    pub kind: ParamKind,
    /// Enum or soft-enum name for `Enum`/`SoftEnum` kinds.
    pub enum_name: Option<String>,
    /// Postfix text for `Postfix` kind.
    pub postfix: Option<String>,
    /// Chained-subcommand group name for `ChainedSubcommand` kind.
    pub chained_subcommand: Option<String>,
    /// Whether the parameter may be omitted.
    pub is_optional: bool,
    /// Index of the value slot this parameter populates in the built
    /// invocation.
    pub slot: usize,
    /// Unordered-group id; parameters sharing one may permute.
    pub group: Option<u32>,
    /// Option bits for the remote client.
    pub options: ParamOptions,
}

impl CommandParameterData {
    fn new(name: &str, arg_type: ArgType, kind: ParamKind, slot: usize) -> Self {
        Self {
            arg_type,
            name: name.to_string(),
            kind,
            enum_name: None,
            postfix: None,
            chained_subcommand: None,
            is_optional: false,
            slot,
            group: None,
            options: ParamOptions::NONE,
        }
    }

    /// A plain typed parameter.
    pub fn basic(name: &str, arg_type: ArgType, slot: usize) -> Self {
        Self::new(name, arg_type, ParamKind::Basic, slot)
    }

    /// A hard-enum parameter.
    pub fn with_enum(name: &str, enum_name: &str, slot: usize) -> Self {
        let mut p = Self::new(name, ArgType::Value, ParamKind::Enum, slot);
        p.enum_name = Some(enum_name.to_string());
        p
    }

    /// A soft-enum parameter.
    pub fn with_soft_enum(name: &str, enum_name: &str, slot: usize) -> Self {
        let mut p = Self::new(name, ArgType::Value, ParamKind::SoftEnum, slot);
        p.enum_name = Some(enum_name.to_string());
        p
    }

    /// An integer parameter with a required postfix suffix.
    pub fn with_postfix(name: &str, postfix: &str, slot: usize) -> Self {
        let mut p = Self::new(name, ArgType::Int, ParamKind::Postfix, slot);
        p.postfix = Some(postfix.to_string());
        p
    }

    /// A chained-subcommand parameter.
    pub fn with_chained_subcommand(name: &str, group: &str, slot: usize) -> Self {
        let mut p = Self::new(name, ArgType::Value, ParamKind::ChainedSubcommand, slot);
        p.chained_subcommand = Some(group.to_string());
        p
    }

    /// Mark the parameter optional (builder pattern).
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Place the parameter in an unordered group (builder pattern).
    pub fn in_group(mut self, id: u32) -> Self {
        self.group = Some(id);
        self
    }
}

/// Allocator producing a fresh command instance for an overload.
pub type AllocFn = fn() -> CommandInvocation;

/// One versioned parameter-list variant of a command.
#[derive(Debug, Clone)]
pub struct Overload {
    /// Protocol versions this overload accepts.
    pub version: VersionWindow,
    /// Produces the fresh instance the builder populates.
    pub alloc: AllocFn,
    /// Ordered formal parameters.
    pub params: Vec<CommandParameterData>,
    /// Symbol sequence derived from `params` by the grammar compiler.
    pub param_symbols: Vec<Symbol>,
    /// Whether the overload embeds a chained subcommand.
    pub is_chaining: bool,
}

impl Overload {
    /// Create an overload with the default allocator.
    pub fn new(version: VersionWindow, params: Vec<CommandParameterData>) -> Self {
        Self::with_alloc(version, CommandInvocation::new, params)
    }

    /// Create an overload with a custom instance allocator.
    pub fn with_alloc(
        version: VersionWindow,
        alloc: AllocFn,
        params: Vec<CommandParameterData>,
    ) -> Self {
        let is_chaining = params
            .iter()
            .any(|p| p.kind == ParamKind::ChainedSubcommand);
        Self {
            version,
            alloc,
            params,
            param_symbols: Vec::new(),
            is_chaining,
        }
    }
}

/// All registered state for one command name.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Canonical command name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Required permission level.
    pub permission: Permission,
    /// Behavior flags.
    pub flags: CommandFlags,
    /// The signature's own grammar symbol.
    pub command_symbol: Symbol,
    /// Ordered overload list.
    pub overloads: Vec<Overload>,
    /// Index of this signature's first compiled rule, or -1.
    pub first_rule: i32,
    /// Index of this signature's first factorization, or -1.
    pub first_factorization: i32,
    /// Index of this signature's first optional chain node, or -1.
    pub first_optional: i32,
    /// Number of rules compiled for this signature.
    pub rule_counter: u32,
}

/// Stable reference to a registered overload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadRef {
    /// Canonical command name.
    pub command: String,
    /// Index into the signature's overload list.
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_compose() {
        let f = CommandFlags::NOT_CHEAT | CommandFlags::HIDDEN_FROM_BLOCKS;
        assert!(f.contains(CommandFlags::NOT_CHEAT));
        assert!(!f.contains(CommandFlags::ASYNC));
        assert_eq!(CommandFlags::from_bits(f.bits()), f);
    }

    #[test]
    fn flags_from_names() {
        let f = CommandFlags::from_names(&[FlagName::TestUsage, FlagName::Message]);
        assert_eq!(f, CommandFlags::TEST_USAGE | CommandFlags::MESSAGE);
    }

    #[test]
    fn chaining_is_derived_from_params() {
        let plain = Overload::new(VersionWindow::any(), vec![CommandParameterData::basic(
            "n",
            ArgType::Int,
            0,
        )]);
        assert!(!plain.is_chaining);
        let chained = Overload::new(VersionWindow::any(), vec![
            CommandParameterData::with_chained_subcommand("next", "Chain", 0),
        ]);
        assert!(chained.is_chaining);
    }

    #[test]
    fn param_builders_set_kind() {
        let p = CommandParameterData::with_enum("mode", "GameMode", 0).optional();
        assert_eq!(p.kind, ParamKind::Enum);
        assert_eq!(p.enum_name.as_deref(), Some("GameMode"));
        assert!(p.is_optional);
        let g = CommandParameterData::basic("x", ArgType::Int, 1).in_group(2);
        assert_eq!(g.group, Some(2));
    }
}
