//! End-to-end parsing tests over a table-loaded registry.

mod common;

use cmdgram_core::{Permission, Value, keys};
use common::{player, server, tables_registry};

#[test]
fn full_pipeline_builds_typed_invocation() {
    let registry = tables_registry();
    let inv = registry
        .parse_command("give @p diamond 64", &server(), 1)
        .expect("give should parse");

    assert_eq!(inv.command, "give");
    assert!(matches!(inv.get("player"), Some(Value::Target(_))));
    assert_eq!(inv.get("item"), Some(&Value::Id("diamond".into())));
    assert_eq!(inv.get("amount"), Some(&Value::Int(64)));
    assert_eq!(inv.get("data"), None, "omitted optional stays empty");
}

#[test]
fn tp_overloads_disambiguate_by_token_shape() {
    let registry = tables_registry();

    let by_target = registry
        .parse_command("tp @a", &server(), 1)
        .expect("selector overload");
    assert_eq!(by_target.overload, 0);

    let by_position = registry
        .parse_command("tp 10 ~5 ^-3", &server(), 1)
        .expect("position overload");
    assert_eq!(by_position.overload, 1);
    assert!(matches!(
        by_position.get("destination"),
        Some(Value::Position(_))
    ));
}

#[test]
fn postfix_overload_beats_plain_int_on_suffixed_token() {
    let registry = tables_registry();

    let plain = registry
        .parse_command("xp 100", &server(), 1)
        .expect("plain int overload");
    assert_eq!(plain.overload, 0);
    assert_eq!(plain.get("amount"), Some(&Value::Int(100)));

    let levels = registry
        .parse_command("xp 100L", &server(), 1)
        .expect("postfix overload");
    assert_eq!(levels.overload, 1);
    assert_eq!(levels.get("levels"), Some(&Value::Int(100)));
}

#[test]
fn message_parameter_consumes_rest_of_line() {
    let registry = tables_registry();
    let inv = registry
        .parse_command("say hello brave new world", &server(), 1)
        .expect("say should parse");
    assert_eq!(
        inv.get("message"),
        Some(&Value::Message("hello brave new world".into()))
    );
}

#[test]
fn wildcard_int_accepts_star() {
    let registry = tables_registry();
    let inv = registry
        .parse_command("scoreboard sidebar *", &server(), 1)
        .expect("scoreboard should parse");
    assert_eq!(inv.get("score"), Some(&Value::Wildcard));
}

#[test]
fn chained_subcommand_builds_nested_invocation() {
    let registry = tables_registry();
    let inv = registry
        .parse_command("execute run 5", &server(), 1)
        .expect("execute chain should parse");

    let Some(Value::Subcommand(sub)) = inv.get("next") else {
        panic!("expected subcommand value, got {:?}", inv.get("next"));
    };
    assert_eq!(sub.value, "run");
    assert_eq!(sub.invocation.command, "execute_run");
    assert_eq!(sub.invocation.get("count"), Some(&Value::Int(5)));
}

#[test]
fn chained_subcommand_error_propagates_from_nested_parse() {
    let registry = tables_registry();
    let err = registry
        .parse_command("execute run notanint", &server(), 1)
        .expect_err("nested int should fail");
    assert_eq!(err.message_key, keys::INVALID_INT);
}

#[test]
fn alias_resolves_to_canonical_command() {
    let registry = tables_registry();
    let direct = registry
        .parse_command("gamemode survival", &server(), 1)
        .expect("canonical name");
    let aliased = registry
        .parse_command("gm survival", &server(), 1)
        .expect("alias");
    assert_eq!(direct, aliased);
    assert_eq!(aliased.command, "gamemode");
}

#[test]
fn unknown_command_names_the_offender() {
    let registry = tables_registry();
    let err = registry
        .parse_command("bogus 1 2 3", &server(), 1)
        .expect_err("unknown command");
    assert_eq!(err.message_key, keys::UNKNOWN_COMMAND);
    assert_eq!(err.params, vec!["bogus"]);
}

#[test]
fn trailing_input_is_reported_with_span() {
    let registry = tables_registry();
    let err = registry
        .parse_command("list extra", &server(), 1)
        .expect_err("trailing token");
    assert_eq!(err.message_key, keys::TRAILING_ARGUMENT);
    let span = err.span.expect("trailing failure should carry a span");
    assert_eq!(&"list extra"[span.start..span.end], "extra");
}

#[test]
fn permission_gate_rejects_underprivileged_origin() {
    let registry = tables_registry();
    let err = registry
        .parse_command("tp @p", &player(Permission::Any), 1)
        .expect_err("tp needs game_directors");
    assert_eq!(err.message_key, keys::REQUIRES_PERMISSION);

    registry
        .parse_command("tp @p", &player(Permission::GameDirectors), 1)
        .expect("game_directors may tp");
}

#[test]
fn cheats_gate_applies_to_non_cheat_flagged_commands_only() {
    let registry = tables_registry();
    let mut origin = server();
    origin.cheats_enabled = false;

    // `list` carries not_cheat, so it stays usable.
    registry
        .parse_command("list", &origin, 1)
        .expect("not_cheat command with cheats off");

    // `give` does not, so it is disabled.
    let err = registry
        .parse_command("give @p diamond", &origin, 1)
        .expect_err("cheat command with cheats off");
    assert_eq!(err.message_key, keys::REQUIRES_CHEATS);
}

#[test]
fn constrained_enum_value_is_gated_by_origin() {
    let registry = tables_registry();
    let mut origin = server();
    origin.cheats_enabled = false;

    registry
        .parse_command("gamemode survival", &origin, 1)
        .expect("unconstrained value");
    let err = registry
        .parse_command("gamemode creative", &origin, 1)
        .expect_err("creative requires cheats");
    assert_eq!(err.message_key, keys::REQUIRES_CHEATS);
}

#[test]
fn single_quoted_message_token_sheds_its_quotes() {
    let registry = tables_registry();
    let inv = registry
        .parse_command(r#"say "hello world""#, &server(), 1)
        .expect("quoted message");
    assert_eq!(inv.get("message"), Some(&Value::Message("hello world".into())));
}

#[test]
fn failure_never_yields_partial_invocation() {
    let registry = tables_registry();
    // First parameter is fine, second is garbage; no invocation escapes.
    let result = registry.parse_command("give @p !!bad-id!!", &server(), 1);
    assert!(result.is_err());
}
