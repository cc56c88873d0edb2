//! Grammar symbol model.
//!
//! Every element of the compiled grammar is a [`Symbol`]: a tagged variant
//! carrying the index of the table it points into. On the wire a symbol is a
//! single `u32` with disjoint high tag bits over a 20-bit index; the variant
//! form keeps cheap equality and ordering while removing manual bit masking.

use serde::Serialize;

/// Low 20 bits of a packed symbol: the index payload.
pub const INDEX_MASK: u32 = 0x000F_FFFF;

const NON_TERMINAL_BIT: u32 = 0x0010_0000;
const ENUM_BIT: u32 = 0x0020_0000;
const OPTIONAL_BIT: u32 = 0x0040_0000;
const FACTORIZATION_BIT: u32 = 0x0080_0000;
const POSTFIX_BIT: u32 = 0x0100_0000;
const ENUM_VALUE_BIT: u32 = 0x0200_0000;
const SOFT_ENUM_BIT: u32 = 0x0400_0000;
const CHAINED_SUBCOMMAND_BIT: u32 = 0x0800_0000;
const CHAINED_SUBCOMMAND_VALUE_BIT: u32 = 0x1000_0000;

/// First index available to dynamically allocated nonterminals; lower
/// nonterminal indices are the fixed [`Terminal`] token classes.
pub const FIRST_DYNAMIC_NON_TERMINAL: u32 = 0x100;

/// Token-class terminals of the grammar.
///
/// These are the fixed leaves every `basic` parameter compiles to. The
/// discriminants are stable: they are the low index bits of the packed
/// symbol value carried in the wire descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u32)]
pub enum Terminal {
    /// Matches the empty string; used for skipped optional parameters and
    /// for error-branch tokens.
    Epsilon = 0x00,
    /// A signed integer.
    Int = 0x01,
    /// A floating-point number.
    Float = 0x02,
    /// A single word or double-quoted string.
    Val = 0x03,
    /// A relaxed value: any single token.
    RVal = 0x04,
    /// An integer or the wildcard `*`.
    WildcardInt = 0x05,
    /// A target selector.
    Selection = 0x06,
    /// An integer range literal.
    IntegerRange = 0x07,
    /// A rational range literal.
    RationalRange = 0x08,
    /// A three-component coordinate with whole-number absolutes.
    Position = 0x09,
    /// A three-component coordinate whose absolutes may be fractional.
    PositionFloat = 0x0a,
    /// Greedy message text to end of line.
    Message = 0x0b,
    /// Greedy raw text to end of line, no quote processing.
    RawText = 0x0c,
    /// A JSON value.
    JsonValue = 0x0d,
    /// A block-state literal.
    BlockState = 0x0e,
    /// A namespaced identifier.
    Id = 0x0f,
    /// The whole command line, optionally `/`-prefixed. Root of every
    /// token tree.
    SlashCommand = 0x10,
    /// A scoreboard mutation operator (`=`, `+=`, `><`, ...).
    Operator = 0x11,
    /// A comparison operator (`<`, `<=`, `=`, `>=`, `>`).
    CompareOperator = 0x12,
}

impl Terminal {
    fn from_index(index: u32) -> Option<Self> {
        Some(match index {
            0x00 => Terminal::Epsilon,
            0x01 => Terminal::Int,
            0x02 => Terminal::Float,
            0x03 => Terminal::Val,
            0x04 => Terminal::RVal,
            0x05 => Terminal::WildcardInt,
            0x06 => Terminal::Selection,
            0x07 => Terminal::IntegerRange,
            0x08 => Terminal::RationalRange,
            0x09 => Terminal::Position,
            0x0a => Terminal::PositionFloat,
            0x0b => Terminal::Message,
            0x0c => Terminal::RawText,
            0x0d => Terminal::JsonValue,
            0x0e => Terminal::BlockState,
            0x0f => Terminal::Id,
            0x10 => Terminal::SlashCommand,
            0x11 => Terminal::Operator,
            0x12 => Terminal::CompareOperator,
            _ => None?,
        })
    }
}

/// One grammar symbol.
///
/// Equality and ordering follow the packed value exactly: two symbols are
/// equal iff their full packed encodings are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Symbol {
    /// A fixed token-class terminal.
    Terminal(Terminal),
    /// A dynamically allocated nonterminal (one per command signature).
    NonTerminal(u32),
    /// Reference into the enum table.
    Enum(u32),
    /// Reference into the soft-enum table.
    SoftEnum(u32),
    /// Reference into the shared enum value pool.
    EnumValue(u32),
    /// Reference into the chained-subcommand table.
    ChainedSubcommand(u32),
    /// Reference into the chained-subcommand value pool.
    ChainedSubcommandValue(u32),
    /// Reference into the postfix pool.
    Postfix(u32),
    /// Head of an optional-parameter chain.
    Optional(u32),
    /// Reference into the factorization table.
    Factorization(u32),
}

/// Asserts an index fits the 20-bit payload. Exceeding it means the registry
/// has outgrown the symbol space, which is a defect, not a runtime condition.
fn checked_index(index: u32, what: &str) -> u32 {
    assert!(
        index <= INDEX_MASK,
        "symbol space overflow: {what} index {index:#x} exceeds {INDEX_MASK:#x}"
    );
    index
}

impl Symbol {
    /// Allocate a dynamic nonterminal symbol for the `n`-th signature.
    pub(crate) fn dynamic_non_terminal(n: u32) -> Self {
        Symbol::NonTerminal(checked_index(
            FIRST_DYNAMIC_NON_TERMINAL + n,
            "nonterminal",
        ))
    }

    /// The index payload, with all tag bits masked off.
    pub fn index(self) -> u32 {
        match self {
            Symbol::Terminal(t) => t as u32,
            Symbol::NonTerminal(i)
            | Symbol::Enum(i)
            | Symbol::SoftEnum(i)
            | Symbol::EnumValue(i)
            | Symbol::ChainedSubcommand(i)
            | Symbol::ChainedSubcommandValue(i)
            | Symbol::Postfix(i)
            | Symbol::Optional(i)
            | Symbol::Factorization(i) => i,
        }
    }

    /// The packed wire encoding: tag bits plus the 20-bit index.
    pub fn value(self) -> u32 {
        let (bit, index) = match self {
            Symbol::Terminal(t) => (NON_TERMINAL_BIT, t as u32),
            Symbol::NonTerminal(i) => (NON_TERMINAL_BIT, i),
            Symbol::Enum(i) => (ENUM_BIT, i),
            Symbol::SoftEnum(i) => (SOFT_ENUM_BIT, i),
            Symbol::EnumValue(i) => (ENUM_VALUE_BIT, i),
            Symbol::ChainedSubcommand(i) => (CHAINED_SUBCOMMAND_BIT, i),
            Symbol::ChainedSubcommandValue(i) => (CHAINED_SUBCOMMAND_VALUE_BIT, i),
            Symbol::Postfix(i) => (POSTFIX_BIT, i),
            Symbol::Optional(i) => (OPTIONAL_BIT, i),
            Symbol::Factorization(i) => (FACTORIZATION_BIT, i),
        };
        bit | checked_index(index, "symbol")
    }

    /// Decode a packed symbol value. Returns `None` for overlapping or
    /// unknown tag bits.
    pub fn from_value(value: u32) -> Option<Self> {
        let index = value & INDEX_MASK;
        let tag = value & !INDEX_MASK;
        Some(match tag {
            NON_TERMINAL_BIT => {
                if index < FIRST_DYNAMIC_NON_TERMINAL {
                    Symbol::Terminal(Terminal::from_index(index)?)
                } else {
                    Symbol::NonTerminal(index)
                }
            }
            ENUM_BIT => Symbol::Enum(index),
            SOFT_ENUM_BIT => Symbol::SoftEnum(index),
            ENUM_VALUE_BIT => Symbol::EnumValue(index),
            CHAINED_SUBCOMMAND_BIT => Symbol::ChainedSubcommand(index),
            CHAINED_SUBCOMMAND_VALUE_BIT => Symbol::ChainedSubcommandValue(index),
            POSTFIX_BIT => Symbol::Postfix(index),
            OPTIONAL_BIT => Symbol::Optional(index),
            FACTORIZATION_BIT => Symbol::Factorization(index),
            _ => None?,
        })
    }
}
