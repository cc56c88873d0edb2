//! Parse capabilities: text → typed [`Value`], one implementation per
//! parameter type tag.
//!
//! Every capability implements [`ArgParser`] and is looked up by
//! [`parser_for`]. Failures are always a message key plus the offending
//! text, never a rendered string.

use crate::value::{
    Coordinate, CoordinateKind, IntRange, Position, RationalRange, SelectorVariable,
    TargetSelector, Value,
};
use cmdgram_diagnostics::{ParseFailure, keys};
use cmdgram_spec_tables::ArgType;

/// A parse capability for one parameter type tag.
pub trait ArgParser: Sync {
    /// Convert the matched token text into a typed value.
    fn parse(&self, text: &str) -> Result<Value, ParseFailure>;
}

/// Look up the capability for a type tag.
pub fn parser_for(ty: ArgType) -> &'static dyn ArgParser {
    match ty {
        ArgType::Int => &IntParser,
        ArgType::Float => &FloatParser,
        ArgType::Value => &ValueParser,
        ArgType::WildcardInt => &WildcardIntParser,
        ArgType::Target => &TargetParser,
        ArgType::Position => &PositionParser { fractional: false },
        ArgType::PositionFloat => &PositionParser { fractional: true },
        ArgType::Message => &MessageParser,
        ArgType::RawText => &RawTextParser,
        ArgType::Json => &JsonParser,
        ArgType::BlockState => &BlockStateParser,
        ArgType::Id => &IdParser,
        ArgType::IntegerRange => &IntegerRangeParser,
        ArgType::RationalRange => &RationalRangeParser,
        ArgType::Operator => &OperatorParser,
        ArgType::CompareOperator => &CompareOperatorParser,
    }
}

struct IntParser;

impl ArgParser for IntParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        text.parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ParseFailure::with_param(keys::INVALID_INT, text))
    }
}

struct FloatParser;

impl ArgParser for FloatParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        // `parse::<f64>` accepts "inf"/"NaN"; the grammar does not.
        if !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            return Err(ParseFailure::with_param(keys::INVALID_FLOAT, text));
        }
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ParseFailure::with_param(keys::INVALID_FLOAT, text))
    }
}

struct ValueParser;

impl ArgParser for ValueParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        Ok(Value::String(text.to_string()))
    }
}

struct WildcardIntParser;

impl ArgParser for WildcardIntParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        if text == "*" {
            return Ok(Value::Wildcard);
        }
        text.parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ParseFailure::with_param(keys::INVALID_INT, text))
    }
}

struct TargetParser;

impl ArgParser for TargetParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        let fail = || ParseFailure::with_param(keys::INVALID_SELECTOR, text);
        if let Some(rest) = text.strip_prefix('@') {
            let mut chars = rest.chars();
            let variable = match chars.next() {
                Some('a') => SelectorVariable::AllPlayers,
                Some('p') => SelectorVariable::NearestPlayer,
                Some('r') => SelectorVariable::RandomPlayer,
                Some('e') => SelectorVariable::AllEntities,
                Some('s') => SelectorVariable::Executor,
                _ => return Err(fail()),
            };
            let tail = chars.as_str();
            let args = if tail.is_empty() {
                Vec::new()
            } else {
                let inner = tail
                    .strip_prefix('[')
                    .and_then(|t| t.strip_suffix(']'))
                    .ok_or_else(fail)?;
                parse_selector_args(inner).ok_or_else(fail)?
            };
            Ok(Value::Target(TargetSelector { variable, args }))
        } else if text.is_empty() {
            Err(fail())
        } else {
            Ok(Value::Target(TargetSelector {
                variable: SelectorVariable::Name(text.to_string()),
                args: Vec::new(),
            }))
        }
    }
}

/// Split `k=v,k=v` selector arguments. Empty input yields no args.
fn parse_selector_args(inner: &str) -> Option<Vec<(String, String)>> {
    if inner.is_empty() {
        return Some(Vec::new());
    }
    let mut args = Vec::new();
    for pair in inner.split(',') {
        let (k, v) = pair.split_once('=')?;
        if k.is_empty() {
            return None;
        }
        args.push((k.trim().to_string(), v.trim().to_string()));
    }
    Some(args)
}

/// Position capability shared by the block and float coordinate forms.
/// `fractional` controls whether absolute components may carry a fraction;
/// `~`/`^` offsets always may.
struct PositionParser {
    fractional: bool,
}

impl PositionParser {
    fn component(text: &str, fractional: bool) -> Result<Coordinate, ParseFailure> {
        let fail = || ParseFailure::with_param(keys::INVALID_COORDINATE, text);
        let (kind, rest) = if let Some(r) = text.strip_prefix('~') {
            (CoordinateKind::Relative, r)
        } else if let Some(r) = text.strip_prefix('^') {
            (CoordinateKind::Local, r)
        } else {
            (CoordinateKind::Absolute, text)
        };
        let value = if rest.is_empty() {
            if kind == CoordinateKind::Absolute {
                return Err(fail());
            }
            0.0
        } else {
            rest.parse::<f64>().map_err(|_| fail())?
        };
        if !fractional && kind == CoordinateKind::Absolute && value.fract() != 0.0 {
            return Err(fail());
        }
        Ok(Coordinate { kind, value })
    }
}

impl ArgParser for PositionParser {
    /// The matched span is the three components joined by the original
    /// whitespace; split them back apart here.
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        let parts: Vec<&str> = text.split_ascii_whitespace().collect();
        let [x, y, z] = parts[..] else {
            return Err(ParseFailure::with_param(keys::INVALID_COORDINATE, text));
        };
        Ok(Value::Position(Position {
            x: Self::component(x, self.fractional)?,
            y: Self::component(y, self.fractional)?,
            z: Self::component(z, self.fractional)?,
        }))
    }
}

/// Scoreboard mutation operators, the full set the operation parameter
/// accepts.
const OPERATORS: [&str; 9] = ["=", "+=", "-=", "*=", "/=", "%=", "<", ">", "><"];

struct OperatorParser;

impl ArgParser for OperatorParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        if OPERATORS.contains(&text) {
            Ok(Value::Operator(text.to_string()))
        } else {
            Err(ParseFailure::with_param(keys::SYNTAX, text))
        }
    }
}

/// Comparison operators accepted by conditional parameters.
const COMPARE_OPERATORS: [&str; 5] = ["<", "<=", "=", ">=", ">"];

struct CompareOperatorParser;

impl ArgParser for CompareOperatorParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        if COMPARE_OPERATORS.contains(&text) {
            Ok(Value::Operator(text.to_string()))
        } else {
            Err(ParseFailure::with_param(keys::SYNTAX, text))
        }
    }
}

struct MessageParser;

impl ArgParser for MessageParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        Ok(Value::Message(text.to_string()))
    }
}

struct RawTextParser;

impl ArgParser for RawTextParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        Ok(Value::RawText(text.to_string()))
    }
}

struct JsonParser;

impl ArgParser for JsonParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        serde_json::from_str(text)
            .map(Value::Json)
            .map_err(|_| ParseFailure::with_param(keys::INVALID_JSON, text))
    }
}

struct BlockStateParser;

impl BlockStateParser {
    /// Scan `["k"="v","k2"=v2]`, honoring commas inside quoted values.
    fn scan(text: &str) -> Option<Vec<(String, String)>> {
        let inner = text.strip_prefix('[')?.strip_suffix(']')?;
        if inner.trim().is_empty() {
            return Some(Vec::new());
        }
        let mut states = Vec::new();
        let mut entry = String::new();
        let mut in_quotes = false;
        let mut entries = Vec::new();
        for c in inner.chars() {
            match c {
                '"' => {
                    in_quotes = !in_quotes;
                    entry.push(c);
                }
                ',' if !in_quotes => {
                    entries.push(std::mem::take(&mut entry));
                }
                _ => entry.push(c),
            }
        }
        if in_quotes {
            return None;
        }
        entries.push(entry);
        for e in entries {
            let (k, v) = e.split_once('=')?;
            let k = k.trim().trim_matches('"');
            let v = v.trim().trim_matches('"');
            if k.is_empty() || v.is_empty() {
                return None;
            }
            states.push((k.to_string(), v.to_string()));
        }
        Some(states)
    }
}

impl ArgParser for BlockStateParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        Self::scan(text)
            .map(Value::BlockState)
            .ok_or_else(|| ParseFailure::with_param(keys::INVALID_BLOCK_STATE, text))
    }
}

struct IdParser;

impl ArgParser for IdParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        let fail = || ParseFailure::with_param(keys::SYNTAX, text);
        let (ns, name) = match text.split_once(':') {
            Some((ns, name)) => (ns, name),
            None => ("", text),
        };
        let valid = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        };
        if (!ns.is_empty() && !valid(ns)) || !valid(name) || name.contains(':') {
            return Err(fail());
        }
        Ok(Value::Id(text.to_string()))
    }
}

struct IntegerRangeParser;

impl ArgParser for IntegerRangeParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        let (min, max, inverted) =
            parse_range(text, |s| s.parse::<i64>().ok())
                .ok_or_else(|| ParseFailure::with_param(keys::INVALID_RANGE, text))?;
        Ok(Value::IntRange(IntRange { min, max, inverted }))
    }
}

struct RationalRangeParser;

impl ArgParser for RationalRangeParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        let (min, max, inverted) =
            parse_range(text, |s| s.parse::<f64>().ok())
                .ok_or_else(|| ParseFailure::with_param(keys::INVALID_RANGE, text))?;
        Ok(Value::RationalRange(RationalRange { min, max, inverted }))
    }
}

/// Shared range grammar: `N`, `N..`, `..N`, `N..M`, all optionally prefixed
/// with `!`. At least one endpoint is required.
fn parse_range<T: Copy>(
    text: &str,
    num: impl Fn(&str) -> Option<T>,
) -> Option<(Option<T>, Option<T>, bool)> {
    let (inverted, body) = match text.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if let Some((lo, hi)) = body.split_once("..") {
        let min = if lo.is_empty() { None } else { Some(num(lo)?) };
        let max = if hi.is_empty() { None } else { Some(num(hi)?) };
        if min.is_none() && max.is_none() {
            return None;
        }
        Some((min, max, inverted))
    } else {
        let v = num(body)?;
        Some((Some(v), Some(v), inverted))
    }
}

/// Cheap shape test used by the overload matcher to decide whether a token
/// could belong to a terminal at all, before any overload is committed to.
/// For the position forms the test runs per component, since the matcher
/// gathers the three components one token at a time.
pub(crate) fn matches_component(ty: ArgType, text: &str) -> bool {
    match ty {
        ArgType::Position => PositionParser::component(text, false).is_ok(),
        ArgType::PositionFloat => PositionParser::component(text, true).is_ok(),
        _ => parser_for(ty).parse(text).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(ty: ArgType, text: &str) -> Result<Value, ParseFailure> {
        parser_for(ty).parse(text)
    }

    // ── Scalars ─────────────────────────────────────────────────────────

    #[test]
    fn int_ok_and_err() {
        assert_eq!(parse(ArgType::Int, "-42").unwrap(), Value::Int(-42));
        let err = parse(ArgType::Int, "4.5").unwrap_err();
        assert_eq!(err.message_key, keys::INVALID_INT);
        assert_eq!(err.params, vec!["4.5"]);
    }

    #[test]
    fn float_accepts_int_text() {
        assert_eq!(parse(ArgType::Float, "3").unwrap(), Value::Float(3.0));
        assert_eq!(parse(ArgType::Float, "-0.5").unwrap(), Value::Float(-0.5));
    }

    #[test]
    fn float_rejects_inf_and_nan() {
        assert!(parse(ArgType::Float, "inf").is_err());
        assert!(parse(ArgType::Float, "NaN").is_err());
    }

    #[test]
    fn wildcard_int() {
        assert_eq!(parse(ArgType::WildcardInt, "*").unwrap(), Value::Wildcard);
        assert_eq!(parse(ArgType::WildcardInt, "7").unwrap(), Value::Int(7));
        assert!(parse(ArgType::WildcardInt, "x").is_err());
    }

    // ── Selectors ───────────────────────────────────────────────────────

    #[test]
    fn selector_variables() {
        for (text, var) in [
            ("@a", SelectorVariable::AllPlayers),
            ("@p", SelectorVariable::NearestPlayer),
            ("@r", SelectorVariable::RandomPlayer),
            ("@e", SelectorVariable::AllEntities),
            ("@s", SelectorVariable::Executor),
        ] {
            match parse(ArgType::Target, text).unwrap() {
                Value::Target(t) => assert_eq!(t.variable, var),
                other => panic!("expected target, got {other:?}"),
            }
        }
    }

    #[test]
    fn selector_with_args() {
        let Value::Target(t) = parse(ArgType::Target, "@e[type=cow,r=10]").unwrap() else {
            panic!()
        };
        assert_eq!(t.variable, SelectorVariable::AllEntities);
        assert_eq!(t.args, vec![
            ("type".to_string(), "cow".to_string()),
            ("r".to_string(), "10".to_string())
        ]);
    }

    #[test]
    fn plain_name_is_a_selector() {
        let Value::Target(t) = parse(ArgType::Target, "Steve").unwrap() else {
            panic!()
        };
        assert_eq!(t.variable, SelectorVariable::Name("Steve".into()));
    }

    #[test]
    fn bad_selectors_fail_with_key() {
        for text in ["@x", "@e[type]", "@e[=v]", "@a[r=5", ""] {
            let err = parse(ArgType::Target, text).unwrap_err();
            assert_eq!(err.message_key, keys::INVALID_SELECTOR, "{text:?}");
        }
    }

    // ── Positions ───────────────────────────────────────────────────────

    #[test]
    fn absolute_relative_local_components() {
        let Value::Position(p) = parse(ArgType::Position, "10 ~ ^-1.5").unwrap() else {
            panic!()
        };
        assert_eq!(p.x.kind, CoordinateKind::Absolute);
        assert_eq!(p.x.value, 10.0);
        assert_eq!(p.y.kind, CoordinateKind::Relative);
        assert_eq!(p.y.value, 0.0);
        assert_eq!(p.z.kind, CoordinateKind::Local);
        assert_eq!(p.z.value, -1.5);
    }

    #[test]
    fn position_needs_three_components() {
        assert!(parse(ArgType::Position, "1 2").is_err());
        assert!(parse(ArgType::Position, "1 2 3 4").is_err());
        assert!(parse(ArgType::Position, "1 2 up").is_err());
    }

    // ── Ranges ──────────────────────────────────────────────────────────

    #[test]
    fn integer_ranges() {
        let cases: [(&str, Option<i64>, Option<i64>, bool); 5] = [
            ("3..10", Some(3), Some(10), false),
            ("..5", None, Some(5), false),
            ("7..", Some(7), None, false),
            ("4", Some(4), Some(4), false),
            ("!2..6", Some(2), Some(6), true),
        ];
        for (text, min, max, inverted) in cases {
            let Value::IntRange(r) = parse(ArgType::IntegerRange, text).unwrap() else {
                panic!()
            };
            assert_eq!((r.min, r.max, r.inverted), (min, max, inverted), "{text}");
        }
    }

    #[test]
    fn bare_dots_is_not_a_range() {
        assert!(parse(ArgType::IntegerRange, "..").is_err());
        assert!(parse(ArgType::IntegerRange, "!").is_err());
    }

    #[test]
    fn rational_range() {
        let Value::RationalRange(r) = parse(ArgType::RationalRange, "0.5..1.5").unwrap() else {
            panic!()
        };
        assert_eq!(r.min, Some(0.5));
        assert_eq!(r.max, Some(1.5));
    }

    // ── Structured ──────────────────────────────────────────────────────

    #[test]
    fn json_value() {
        let Value::Json(v) = parse(ArgType::Json, r#"{"a":[1,2]}"#).unwrap() else {
            panic!()
        };
        assert_eq!(v["a"][1], 2);
        assert_eq!(
            parse(ArgType::Json, "{nope").unwrap_err().message_key,
            keys::INVALID_JSON
        );
    }

    #[test]
    fn block_state() {
        let Value::BlockState(s) =
            parse(ArgType::BlockState, r#"["facing"="north","age"=2]"#).unwrap()
        else {
            panic!()
        };
        assert_eq!(s, vec![
            ("facing".to_string(), "north".to_string()),
            ("age".to_string(), "2".to_string())
        ]);
    }

    #[test]
    fn block_state_empty_and_malformed() {
        assert_eq!(
            parse(ArgType::BlockState, "[]").unwrap(),
            Value::BlockState(vec![])
        );
        for text in ["[facing]", "facing=north", r#"["a"="b"#] {
            assert!(parse(ArgType::BlockState, text).is_err(), "{text:?}");
        }
    }

    #[test]
    fn namespaced_id() {
        assert_eq!(
            parse(ArgType::Id, "minecraft:stone").unwrap(),
            Value::Id("minecraft:stone".into())
        );
        assert_eq!(
            parse(ArgType::Id, "stone").unwrap(),
            Value::Id("stone".into())
        );
        assert!(parse(ArgType::Id, "a:b:c").is_err());
        assert!(parse(ArgType::Id, "bad id").is_err());
    }

    // ── Operators ───────────────────────────────────────────────────────

    #[test]
    fn operator_set_is_closed() {
        for text in ["=", "+=", "-=", "*=", "/=", "%=", "<", ">", "><"] {
            assert_eq!(
                parse(ArgType::Operator, text).unwrap(),
                Value::Operator(text.into())
            );
        }
        for text in ["==", "+", "<>", "swap", ""] {
            let err = parse(ArgType::Operator, text).unwrap_err();
            assert_eq!(err.message_key, keys::SYNTAX, "{text:?}");
        }
    }

    #[test]
    fn compare_operator_set_is_closed() {
        for text in ["<", "<=", "=", ">=", ">"] {
            assert_eq!(
                parse(ArgType::CompareOperator, text).unwrap(),
                Value::Operator(text.into())
            );
        }
        assert!(parse(ArgType::CompareOperator, "><").is_err());
        assert!(parse(ArgType::CompareOperator, "+=").is_err());
    }

    // ── Shape checks ────────────────────────────────────────────────────

    #[test]
    fn shape_check_mirrors_parse() {
        assert!(matches_component(ArgType::Int, "5"));
        assert!(!matches_component(ArgType::Int, "five"));
        assert!(matches_component(ArgType::Target, "@a"));
    }

    #[test]
    fn component_check_respects_coordinate_form() {
        assert!(matches_component(ArgType::Position, "64"));
        assert!(matches_component(ArgType::Position, "~1.5"));
        assert!(matches_component(ArgType::Position, "^-0.5"));
        assert!(!matches_component(ArgType::Position, "0.5"));
        assert!(matches_component(ArgType::PositionFloat, "0.5"));
        assert!(!matches_component(ArgType::PositionFloat, "up"));
    }

    #[test]
    fn float_position_allows_fractional_absolutes() {
        let Value::Position(p) = parse(ArgType::PositionFloat, "0.5 64.25 ~1.5").unwrap() else {
            panic!()
        };
        assert_eq!(p.x.value, 0.5);
        assert_eq!(p.y.value, 64.25);
        let err = parse(ArgType::Position, "0.5 64 70").unwrap_err();
        assert_eq!(err.message_key, keys::INVALID_COORDINATE);
    }
}
