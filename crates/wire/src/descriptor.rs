//! The descriptor model: a flattened snapshot of registry state.
//!
//! Field order here mirrors the wire layout. All cross-references are
//! indices: enums reference the shared value pool, chained subcommands
//! reference their own value pool, and parameters carry the packed symbol
//! value assigned by the grammar compiler.

use serde::{Deserialize, Serialize};

/// A complete available-commands snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Shared pool of deduplicated enum value strings.
    pub enum_values: Vec<String>,
    /// Registered numeric postfix strings.
    pub postfixes: Vec<String>,
    /// Hard enums, referencing `enum_values` by index.
    pub enums: Vec<EnumDescriptor>,
    /// Soft enums; their values are carried inline because the remote client
    /// must be able to patch them independently of the shared pool.
    pub soft_enums: Vec<SoftEnumDescriptor>,
    /// Pool of chained-subcommand value strings.
    pub chained_subcommand_values: Vec<String>,
    /// Chained-subcommand groups.
    pub chained_subcommands: Vec<ChainedSubcommandDescriptor>,
    /// Command signatures.
    pub commands: Vec<CommandDescriptor>,
    /// Semantic constraints attached to specific enum values.
    pub constrained_values: Vec<ConstrainedValueDescriptor>,
}

/// One hard enum: a name plus indices into the shared value pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Unique enum name.
    pub name: String,
    /// Indices into [`Descriptor::enum_values`].
    pub value_indices: Vec<u32>,
}

/// One soft enum with its current value set inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftEnumDescriptor {
    /// Unique soft-enum name.
    pub name: String,
    /// The value set at snapshot time.
    pub values: Vec<String>,
}

/// One chained-subcommand group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainedSubcommandDescriptor {
    /// Unique group name.
    pub name: String,
    /// Pairs of (index into `chained_subcommand_values`, packed target symbol).
    pub entries: Vec<(u32, u32)>,
}

/// One command signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Canonical command name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Behavior flags bitset.
    pub flags: u16,
    /// Required permission level.
    pub permission: u8,
    /// Index of the alias enum in [`Descriptor::enums`], or -1 when the
    /// command has no aliases.
    pub alias_enum: i32,
    /// Parameter-list variants.
    pub overloads: Vec<OverloadDescriptor>,
}

/// One overload's parameter-type sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadDescriptor {
    /// Whether the overload embeds a chained subcommand.
    pub chaining: bool,
    /// Ordered parameters.
    pub params: Vec<ParamDescriptor>,
}

/// One parameter as the remote client sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name shown in completion hints.
    pub name: String,
    /// Packed symbol value: tag bits plus a table index (see the core
    /// crate's symbol model for the bit layout).
    pub symbol: u32,
    /// Whether the parameter may be omitted.
    pub optional: bool,
    /// Parameter option bits (autocomplete expansion, semantic constraint,
    /// enum-as-chained-command).
    pub options: u8,
}

/// A semantic constraint on one enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstrainedValueDescriptor {
    /// Index into [`Descriptor::enum_values`] of the constrained value.
    pub enum_value_index: u32,
    /// Index into [`Descriptor::enums`] of the owning enum.
    pub enum_index: u32,
    /// Constraint codes the origin must satisfy.
    pub constraints: Vec<u8>,
}
