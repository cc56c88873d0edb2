//! Message key constants.
//!
//! Every failure the parser or builder can report uses one of these keys.
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. The keys follow the `commands.generic.*` namespace
//! consumed by the remote client's localization tables.

/// The first token does not name any registered command or alias.
pub const UNKNOWN_COMMAND: &str = "commands.generic.unknown";

/// Catch-all grammar failure. Params: the offending text.
pub const SYNTAX: &str = "commands.generic.syntax";

/// Input continued past the last parameter of every candidate overload.
/// Params: the trailing text.
pub const TRAILING_ARGUMENT: &str = "commands.generic.trailing";

/// A required parameter was absent. Params: the parameter name.
pub const MISSING_PARAMETER: &str = "commands.generic.parameter.missing";

/// No overload's version window covers the requested protocol version.
/// Params: the requested version.
pub const VERSION_MISMATCH: &str = "commands.generic.version";

/// Text could not be read as an integer. Params: the text.
pub const INVALID_INT: &str = "commands.generic.num.invalid";

/// Text could not be read as a floating-point number. Params: the text.
pub const INVALID_FLOAT: &str = "commands.generic.double.invalid";

/// Text did not match any value of the parameter's enum or soft enum.
/// Params: the text, the parameter name.
pub const INVALID_ENUM_VALUE: &str = "commands.generic.parameter.invalid";

/// A target selector was malformed or used an unknown selector variable.
/// Params: the selector text.
pub const INVALID_SELECTOR: &str = "commands.generic.noTargetMatch";

/// A coordinate component was malformed. Params: the text.
pub const INVALID_COORDINATE: &str = "commands.generic.position.invalid";

/// An integer or rational range literal was malformed. Params: the text.
pub const INVALID_RANGE: &str = "commands.generic.range.invalid";

/// A JSON-typed parameter failed to deserialize. Params: the text.
pub const INVALID_JSON: &str = "commands.generic.json.invalid";

/// A block-state literal (`["key"="value", ...]`) was malformed.
/// Params: the text.
pub const INVALID_BLOCK_STATE: &str = "commands.generic.blockstate.invalid";

/// A numeric postfix parameter was missing its required suffix.
/// Params: the text, the expected postfix.
pub const INVALID_POSTFIX: &str = "commands.generic.postfix.invalid";

/// The matched enum value requires cheats to be enabled for the origin.
/// Params: the value text.
pub const REQUIRES_CHEATS: &str = "commands.generic.disabled";

/// The matched enum value requires a permission the origin lacks.
/// Params: the value text.
pub const REQUIRES_PERMISSION: &str = "commands.generic.permission";

/// A chained subcommand named a command that is not registered.
/// Params: the subcommand value text.
pub const UNKNOWN_SUBCOMMAND: &str = "commands.generic.chained.unknown";

/// Returns the human-readable explanation for a message key, if known.
pub fn explain(key: &str) -> Option<&'static str> {
    Some(match key {
        UNKNOWN_COMMAND => "the first word of the input does not name a registered command or alias",
        SYNTAX => "the input does not match the grammar of any overload of the command",
        TRAILING_ARGUMENT => {
            "input continued past the final parameter; every candidate overload was already complete"
        }
        MISSING_PARAMETER => "a required parameter was not supplied",
        VERSION_MISMATCH => {
            "the command exists but no overload's version window covers the requested protocol version"
        }
        INVALID_INT => "expected an integer",
        INVALID_FLOAT => "expected a number",
        INVALID_ENUM_VALUE => "the argument is not one of the parameter's allowed values",
        INVALID_SELECTOR => "the target selector is malformed or matches nothing",
        INVALID_COORDINATE => "expected a coordinate (absolute, relative `~`, or local `^`)",
        INVALID_RANGE => "expected a range literal such as `3..10`, `..5`, or `7..`",
        INVALID_JSON => "the argument is not valid JSON",
        INVALID_BLOCK_STATE => "expected a block-state literal such as `[\"facing\"=\"north\"]`",
        INVALID_POSTFIX => "the numeric argument is missing its required suffix",
        REQUIRES_CHEATS => "this value can only be used while cheats are enabled",
        REQUIRES_PERMISSION => "this value requires a permission level the origin does not have",
        UNKNOWN_SUBCOMMAND => "the chained subcommand does not name a registered command",
        _ => return None,
    })
}
