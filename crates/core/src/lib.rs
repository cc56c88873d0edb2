//! Command grammar compilation, parsing, and command building.
//!
//! The centerpiece is [`CommandRegistry`]: commands, overloads, and value
//! pools are registered into it, each overload is compiled into grammar
//! rules on the spot, and command lines are then parsed against the
//! compiled tables into typed [`CommandInvocation`]s. The registry also
//! flattens itself into the wire descriptor defined by `cmdgram_wire` for
//! transmission to remote clients.
//!
//! ```
//! use cmdgram_core::{
//!     ArgType, CommandFlags, CommandOrigin, CommandParameterData, CommandRegistry,
//!     Permission, Value, VersionWindow,
//! };
//!
//! let mut reg = CommandRegistry::new();
//! reg.register_command("tp", "Teleports a player.", Permission::Any, CommandFlags::NOT_CHEAT);
//! reg.register_overload("tp", VersionWindow::any(), vec![
//!     CommandParameterData::basic("victim", ArgType::Target, 0),
//! ])
//! .unwrap();
//!
//! let inv = reg.parse_command("tp Steve", &CommandOrigin::default(), 1).unwrap();
//! assert_eq!(inv.command, "tp");
//! assert!(matches!(inv.get("victim"), Some(Value::Target(_))));
//! ```

#![warn(missing_docs)]

mod argparse;
mod grammar;
mod lexer;
mod origin;
mod parser;
mod registry;
mod signature;
mod symbol;
mod tables;
mod token_tree;
mod value;

pub use argparse::{ArgParser, parser_for};
pub use grammar::{
    Factorization, MAX_FACTORIZATION_GROUP, OptionalParameterChain, ParseRule, ParseTable,
    terminal_for,
};
pub use lexer::{TokKind, Token, tokenize};
pub use origin::{CommandOrigin, SemanticConstraint, SemanticConstraints};
pub use registry::CommandRegistry;
pub use signature::{
    AllocFn, CommandFlags, CommandParameterData, Overload, OverloadRef, ParamKind, ParamOptions,
    Signature,
};
pub use symbol::{FIRST_DYNAMIC_NON_TERMINAL, INDEX_MASK, Symbol, Terminal};
pub use tables::LoadError;
pub use token_tree::{ParseToken, TokenId, TokenTree};
pub use value::{
    CommandInvocation, Coordinate, CoordinateKind, IntRange, Position, RationalRange,
    SelectorVariable, Slot, SubcommandValue, TargetSelector, Value,
};

pub use cmdgram_diagnostics::{ParseFailure, Span, keys};
pub use cmdgram_spec_tables::{
    ArgType, CommandTables, ConstraintName, FlagName, Permission, TABLE_FORMAT_VERSION,
    VersionWindow,
};
pub use cmdgram_wire::{Descriptor, EncodeError, WIRE_FORMAT_VERSION, decode, encode};
