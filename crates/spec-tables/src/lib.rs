//! Command table data structures.
//!
//! Defines the serde model for declaring commands, enums, soft enums, and
//! chained subcommands in JSON. These tables are the declarative front door
//! to the registry: the core crate's loader replays a [`CommandTables`] value
//! through the registration API, and the CLI reads table files from disk.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Current format version for the command table JSON schema.
pub const TABLE_FORMAT_VERSION: &str = "1.0.0";

/// Permission level required to see and run a command.
///
/// The numeric discriminants are the values carried in the wire descriptor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Permission {
    /// Any origin may run the command.
    #[default]
    Any = 0,
    /// Game directors (e.g., world builders) and above.
    GameDirectors = 1,
    /// Server administrators and above.
    Admin = 2,
    /// The hosting player only.
    Host = 3,
    /// The server owner only.
    Owner = 4,
    /// Internal origins (scripts, command blocks acting as the server).
    Internal = 5,
}

impl Permission {
    /// Wire encoding of this permission level.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire permission level.
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Permission::Any,
            1 => Permission::GameDirectors,
            2 => Permission::Admin,
            3 => Permission::Host,
            4 => Permission::Owner,
            5 => Permission::Internal,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Any => write!(f, "any"),
            Permission::GameDirectors => write!(f, "game_directors"),
            Permission::Admin => write!(f, "admin"),
            Permission::Host => write!(f, "host"),
            Permission::Owner => write!(f, "owner"),
            Permission::Internal => write!(f, "internal"),
        }
    }
}

/// Behavior flag names accepted in command tables.
///
/// The core crate folds these into its `CommandFlags` bitset; the names here
/// exist so table files stay readable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlagName {
    /// Usable in test automation only.
    TestUsage,
    /// Hidden from command-block autocompletion.
    HiddenFromBlocks,
    /// Hidden from player autocompletion.
    HiddenFromPlayers,
    /// Not classified as a cheat; usable with cheats disabled.
    NotCheat,
    /// Executes asynchronously on the host side.
    Async,
    /// Accepts message-style (unquoted, greedy) final arguments.
    Message,
}

/// Native type tag for a command parameter.
///
/// Selects the parse capability used to convert the matched token text into
/// a typed value, and the terminal symbol the grammar compiler emits for
/// `basic`-kind parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArgType {
    /// Signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// A single word or double-quoted string.
    Value,
    /// An integer or the wildcard `*`.
    WildcardInt,
    /// A target selector (`@a`, `@p[...]`, or a plain name).
    Target,
    /// A three-component coordinate handled one component at a time;
    /// accepts absolute, relative (`~`), and local (`^`) forms. Absolute
    /// components must be whole numbers.
    Position,
    /// Like `Position`, but absolute components may be fractional.
    PositionFloat,
    /// Greedy message text: everything to the end of the line.
    Message,
    /// Greedy raw text, no quote processing.
    RawText,
    /// A JSON value.
    Json,
    /// A block-state literal (`["facing"="north", ...]`).
    BlockState,
    /// A namespaced identifier (`minecraft:stone`).
    Id,
    /// An integer range (`3..10`, `..5`, `7..`, or a single value).
    IntegerRange,
    /// A rational range with floating-point endpoints.
    RationalRange,
    /// A scoreboard mutation operator (`=`, `+=`, `><`, ...).
    Operator,
    /// A comparison operator (`<`, `<=`, `=`, `>=`, `>`).
    CompareOperator,
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Value => "value",
            ArgType::WildcardInt => "wildcard_int",
            ArgType::Target => "target",
            ArgType::Position => "position",
            ArgType::PositionFloat => "position_float",
            ArgType::Message => "message",
            ArgType::RawText => "raw_text",
            ArgType::Json => "json",
            ArgType::BlockState => "block_state",
            ArgType::Id => "id",
            ArgType::IntegerRange => "integer_range",
            ArgType::RationalRange => "rational_range",
            ArgType::Operator => "operator",
            ArgType::CompareOperator => "compare_operator",
        };
        write!(f, "{s}")
    }
}

/// Semantic constraint names attachable to enum values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintName {
    /// The value is usable only while cheats are enabled.
    RequiresCheatsEnabled,
    /// The value requires an elevated permission level.
    RequiresElevatedPermissions,
    /// The value requires host permissions.
    RequiresHostPermissions,
    /// The value is usable only where aliases are allowed.
    RequiresAllowAliases,
}

/// A protocol version window. Both endpoints are inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionWindow {
    /// Lowest protocol version this overload accepts.
    #[serde(default = "VersionWindow::default_min")]
    pub min: u32,
    /// Highest protocol version this overload accepts.
    #[serde(default = "VersionWindow::default_max")]
    pub max: u32,
}

impl VersionWindow {
    fn default_min() -> u32 {
        1
    }

    fn default_max() -> u32 {
        u32::MAX
    }

    /// The window covering every protocol version.
    pub fn any() -> Self {
        Self {
            min: Self::default_min(),
            max: Self::default_max(),
        }
    }

    /// Whether `version` falls inside this window.
    pub fn contains(&self, version: u32) -> bool {
        self.min <= version && version <= self.max
    }
}

impl Default for VersionWindow {
    fn default() -> Self {
        Self::any()
    }
}

/// One enum declaration: a name and its ordered value list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumEntry {
    /// Unique enum name.
    pub name: String,
    /// Ordered value texts. Deduplicated case-sensitively by the registry.
    pub values: Vec<String>,
}

/// One chained-subcommand table entry: a value and the command it chains into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainedValueEntry {
    /// The subcommand value text matched in the input.
    pub value: String,
    /// The registered command the remainder of the line is parsed as.
    pub command: String,
}

/// A named chained-subcommand group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainedSubcommandEntry {
    /// Unique group name.
    pub name: String,
    /// The value → command mapping.
    pub entries: Vec<ChainedValueEntry>,
}

/// A semantic constraint attached to one enum value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConstrainedValueEntry {
    /// The owning enum's name.
    pub r#enum: String,
    /// The constrained value's text.
    pub value: String,
    /// The constraints the origin must satisfy to use the value.
    pub constraints: Vec<ConstraintName>,
}

/// One formal parameter of an overload.
///
/// The parameter kind is implied by which reference field is set: `enum`
/// beats `soft_enum` beats `postfix` beats `chained_subcommand`; when none is
/// set the parameter is `basic` and `type` selects the terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParamEntry {
    /// Parameter name, used in diagnostics and as the invocation slot key.
    pub name: String,
    /// Native type tag.
    pub r#type: ArgType,
    /// Enum reference for `enum`-kind parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<String>,
    /// Soft-enum reference for `soft_enum`-kind parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_enum: Option<String>,
    /// Postfix reference for `postfix`-kind parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postfix: Option<String>,
    /// Chained-subcommand reference for `chained_subcommand`-kind parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chained_subcommand: Option<String>,
    /// Whether the parameter may be omitted.
    #[serde(default)]
    pub optional: bool,
    /// Unordered-group id: parameters of one overload sharing a group id may
    /// appear in any relative order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,
}

/// One versioned overload of a command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverloadEntry {
    /// Protocol version window. Defaults to every version.
    #[serde(default)]
    pub version: VersionWindow,
    /// Ordered formal parameter list.
    #[serde(default)]
    pub params: Vec<ParamEntry>,
}

/// One command declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandEntry {
    /// Canonical command name.
    pub name: String,
    /// Short human-readable description.
    #[serde(default)]
    pub description: String,
    /// Required permission level.
    #[serde(default)]
    pub permission: Permission,
    /// Behavior flags.
    #[serde(default)]
    pub flags: Vec<FlagName>,
    /// Secondary lookup names resolving to this command.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Parameter-list variants.
    #[serde(default)]
    pub overloads: Vec<OverloadEntry>,
}

/// A complete command table file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandTables {
    /// Content version of this particular table (free-form).
    #[serde(default)]
    pub version: String,
    /// Schema version; must equal [`TABLE_FORMAT_VERSION`].
    pub format_version: String,
    /// Enum declarations.
    #[serde(default)]
    pub enums: Vec<EnumEntry>,
    /// Soft-enum declarations (initial value sets; mutable at runtime).
    #[serde(default)]
    pub soft_enums: Vec<EnumEntry>,
    /// Chained-subcommand groups.
    #[serde(default)]
    pub chained_subcommands: Vec<ChainedSubcommandEntry>,
    /// Command declarations.
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
    /// Semantic constraints on enum values.
    #[serde(default)]
    pub constrained_values: Vec<ConstrainedValueEntry>,
}

impl CommandTables {
    /// Parse a command table from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
