//! Typed argument values and built command invocations.

use serde::Serialize;

/// Selector variable of a target selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorVariable {
    /// `@a` — all players.
    AllPlayers,
    /// `@p` — nearest player.
    NearestPlayer,
    /// `@r` — random player.
    RandomPlayer,
    /// `@e` — all entities.
    AllEntities,
    /// `@s` — the executing origin.
    Executor,
    /// A plain player name.
    Name(String),
}

/// A parsed target selector: a variable plus its bracket arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSelector {
    /// The selector variable.
    pub variable: SelectorVariable,
    /// Bracket arguments in source order (`key`, `value` pairs).
    pub args: Vec<(String, String)>,
}

/// How one coordinate component is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateKind {
    /// A world-absolute value.
    Absolute,
    /// `~` — offset from the origin's position.
    Relative,
    /// `^` — offset along the origin's view axes.
    Local,
}

/// One coordinate component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    /// Anchoring of the component.
    pub kind: CoordinateKind,
    /// Numeric value; `0.0` for a bare `~` or `^`.
    pub value: f64,
}

/// A full three-component position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// X component.
    pub x: Coordinate,
    /// Y component.
    pub y: Coordinate,
    /// Z component.
    pub z: Coordinate,
}

/// An integer range. Open endpoints are `None`; `!` inverts the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntRange {
    /// Inclusive lower bound.
    pub min: Option<i64>,
    /// Inclusive upper bound.
    pub max: Option<i64>,
    /// Whether the range is negated.
    pub inverted: bool,
}

/// A rational range with floating-point endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RationalRange {
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Whether the range is negated.
    pub inverted: bool,
}

/// A chained subcommand: the matched value plus the embedded invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcommandValue {
    /// The subcommand value text that selected the target command.
    pub value: String,
    /// The nested, fully built invocation.
    pub invocation: CommandInvocation,
}

/// One typed argument value produced by a parse capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Word or quoted string.
    String(String),
    /// The wildcard `*` of a wildcard-int parameter.
    Wildcard,
    /// Target selector.
    Target(TargetSelector),
    /// Three-component position.
    Position(Position),
    /// Greedy message text.
    Message(String),
    /// Greedy raw text.
    RawText(String),
    /// JSON value.
    Json(serde_json::Value),
    /// Block-state key/value pairs in source order.
    BlockState(Vec<(String, String)>),
    /// Namespaced identifier.
    Id(String),
    /// A matched operator token such as `+=` or `<=`.
    Operator(String),
    /// Integer range.
    IntRange(IntRange),
    /// Rational range.
    RationalRange(RationalRange),
    /// A matched enum value.
    Enum {
        /// The owning enum's name.
        enum_name: String,
        /// The matched value text.
        value: String,
    },
    /// A matched soft-enum value.
    SoftEnum {
        /// The owning soft enum's name.
        enum_name: String,
        /// The matched value text.
        value: String,
    },
    /// A chained subcommand with its nested invocation.
    Subcommand(Box<SubcommandValue>),
}

/// One named value slot of an invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    /// The parameter name that populates this slot.
    pub name: String,
    /// The parsed value; `None` for omitted optional parameters.
    pub value: Option<Value>,
}

/// A ready-to-run command invocation.
///
/// Produced only when every required parameter parsed successfully; a
/// partially populated invocation is never returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandInvocation {
    /// The canonical command name (aliases already resolved).
    pub command: String,
    /// Index of the overload that matched.
    pub overload: usize,
    /// Value slots in parameter order.
    pub slots: Vec<Slot>,
}

impl CommandInvocation {
    /// Fresh empty invocation; the builder fills in name and slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parsed value by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.value.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_get_by_name() {
        let inv = CommandInvocation {
            command: "tp".into(),
            overload: 0,
            slots: vec![
                Slot {
                    name: "victim".into(),
                    value: Some(Value::String("Steve".into())),
                },
                Slot {
                    name: "checkForBlocks".into(),
                    value: None,
                },
            ],
        };
        assert_eq!(inv.get("victim"), Some(&Value::String("Steve".into())));
        assert_eq!(inv.get("checkForBlocks"), None);
        assert_eq!(inv.get("nope"), None);
    }

    #[test]
    fn values_serialize_to_tagged_json() {
        let v = Value::Target(TargetSelector {
            variable: SelectorVariable::AllPlayers,
            args: vec![("r".into(), "5".into())],
        });
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("target"), "{json}");
        assert!(json.contains("all_players"), "{json}");
    }
}
