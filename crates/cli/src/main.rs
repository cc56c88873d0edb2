mod render;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cmdgram_core::{CommandOrigin, CommandRegistry, Permission};
use cmdgram_diagnostics::keys;
use cmdgram_spec_tables::CommandTables;

use crate::render::{Format, render_failure_pretty};

// ── Embedded tables ─────────────────────────────────────────────────────

/// Command tables baked into the binary at compile time.
/// Present when `data/command_tables.json` existed during `cargo build`.
#[cfg(has_embedded_tables)]
const EMBEDDED_TABLES_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/command_tables.json"));

#[cfg(not(has_embedded_tables))]
const EMBEDDED_TABLES_JSON: &str = "";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cmdgram",
    version,
    about = "cmdgram: load command tables, parse command lines, and encode available-commands descriptors"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a command line and print the built invocation.
    Parse {
        line: String,
        /// Path to a command tables JSON file. When omitted, uses tables
        /// embedded at compile time (if available).
        #[arg(long)]
        tables: Option<String>,
        /// Also print the parse token tree to stderr.
        #[arg(long)]
        tree: bool,
        #[command(flatten)]
        origin: OriginArgs,
    },

    /// Check a command line without printing the invocation.
    Check {
        line: String,
        /// Path to a command tables JSON file (see `parse --help`).
        #[arg(long)]
        tables: Option<String>,
        #[command(flatten)]
        origin: OriginArgs,
    },

    /// List the registered commands.
    Commands {
        /// Path to a command tables JSON file (see `parse --help`).
        #[arg(long)]
        tables: Option<String>,
    },

    /// Encode the available-commands descriptor.
    Encode {
        /// Path to a command tables JSON file (see `parse --help`).
        #[arg(long)]
        tables: Option<String>,
        /// Write the binary descriptor to this file; hex to stdout when
        /// omitted.
        #[arg(long, short)]
        out: Option<String>,
    },

    /// Decode a binary descriptor file back to JSON.
    Dump { file: String },

    /// Explain a message key (e.g. commands.generic.syntax).
    Explain { key: String },
}

/// Issuer identity flags shared by `parse` and `check`.
#[derive(Args, Debug)]
struct OriginArgs {
    /// Permission level of the issuing origin.
    #[arg(long, value_enum, default_value_t = PermissionLevel::Internal)]
    permission: PermissionLevel,

    /// Parse as if cheats were disabled in the issuing world.
    #[arg(long)]
    no_cheats: bool,

    /// Protocol version to parse against.
    #[arg(long, default_value_t = 1)]
    game_version: u32,
}

impl OriginArgs {
    fn origin(&self) -> CommandOrigin {
        CommandOrigin {
            permission: self.permission.into(),
            cheats_enabled: !self.no_cheats,
            ..CommandOrigin::default()
        }
    }
}

/// Permission level as a CLI flag value.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PermissionLevel {
    Any,
    GameDirectors,
    Admin,
    Host,
    Owner,
    Internal,
}

impl From<PermissionLevel> for Permission {
    fn from(level: PermissionLevel) -> Self {
        match level {
            PermissionLevel::Any => Permission::Any,
            PermissionLevel::GameDirectors => Permission::GameDirectors,
            PermissionLevel::Admin => Permission::Admin,
            PermissionLevel::Host => Permission::Host,
            PermissionLevel::Owner => Permission::Owner,
            PermissionLevel::Internal => Permission::Internal,
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse {
            line,
            tables,
            tree,
            origin,
        } => cmd_parse(&line, tables.as_deref(), tree, &origin, format)?,
        Cmd::Check {
            line,
            tables,
            origin,
        } => cmd_check(&line, tables.as_deref(), &origin, format)?,
        Cmd::Commands { tables } => cmd_commands(tables.as_deref(), format)?,
        Cmd::Encode { tables, out } => cmd_encode(tables.as_deref(), out.as_deref(), format)?,
        Cmd::Dump { file } => cmd_dump(&file)?,
        Cmd::Explain { key } => cmd_explain(&key, format)?,
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(
    line: &str,
    tables_path: Option<&str>,
    tree: bool,
    origin: &OriginArgs,
    format: Format,
) -> Result<()> {
    let registry = load_registry(tables_path)?;
    let mut token_tree = registry.parse(line);
    let result = registry.create_command(&mut token_tree, &origin.origin(), origin.game_version);

    if tree {
        // Diagnostic output goes to stderr; stdout carries the invocation.
        eprint!("{token_tree}");
    }

    match format {
        Format::Json => {
            let out = match &result {
                Ok(invocation) => serde_json::json!({
                    "ok": true,
                    "invocation": invocation,
                }),
                Err(failure) => serde_json::json!({
                    "ok": false,
                    "error": failure,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => match &result {
            Ok(invocation) => println!("{}", serde_json::to_string_pretty(invocation)?),
            Err(failure) => render_failure_pretty(line, "<line>", failure),
        },
    }

    if result.is_err() {
        process::exit(1);
    }
    Ok(())
}

fn cmd_check(
    line: &str,
    tables_path: Option<&str>,
    origin: &OriginArgs,
    format: Format,
) -> Result<()> {
    let registry = load_registry(tables_path)?;
    let result = registry.parse_command(line, &origin.origin(), origin.game_version);

    match format {
        Format::Json => {
            let out = match &result {
                Ok(_) => serde_json::json!({ "ok": true }),
                Err(failure) => serde_json::json!({ "ok": false, "error": failure }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => match &result {
            Ok(_) => eprintln!("ok"),
            Err(failure) => render_failure_pretty(line, "<line>", failure),
        },
    }

    if result.is_err() {
        process::exit(1);
    }
    Ok(())
}

fn cmd_commands(tables_path: Option<&str>, format: Format) -> Result<()> {
    let registry = load_registry(tables_path)?;
    let rows: Vec<serde_json::Value> = registry
        .signatures()
        .map(|sig| {
            serde_json::json!({
                "name": sig.name,
                "description": sig.description,
                "permission": sig.permission.to_string(),
                "aliases": registry.aliases_of(&sig.name),
                "overloads": sig.overloads.len(),
            })
        })
        .collect();

    match format {
        Format::Json => {
            let out = serde_json::json!({ "commands": rows });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for sig in registry.signatures() {
                let aliases = registry.aliases_of(&sig.name);
                let alias_note = if aliases.is_empty() {
                    String::new()
                } else {
                    format!(" (aliases: {})", aliases.join(", "))
                };
                println!(
                    "{:<16} {}{} [{} overload(s), {}]",
                    sig.name,
                    sig.description,
                    alias_note,
                    sig.overloads.len(),
                    sig.permission,
                );
            }
        }
    }
    Ok(())
}

fn cmd_encode(tables_path: Option<&str>, out: Option<&str>, format: Format) -> Result<()> {
    let registry = load_registry(tables_path)?;
    let bytes = registry
        .encode_available_commands()
        .context("descriptor exceeds wire limits")?;

    match out {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write descriptor to '{path}'"))?;
            match format {
                Format::Json => {
                    let out = serde_json::json!({ "file": path, "bytes": bytes.len() });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Format::Pretty => eprintln!("wrote {} bytes to {}", bytes.len(), path),
            }
        }
        None => {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            match format {
                Format::Json => {
                    let out = serde_json::json!({ "bytes": bytes.len(), "hex": hex });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Format::Pretty => println!("{hex}"),
            }
        }
    }
    Ok(())
}

fn cmd_dump(file: &str) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read '{file}'"))?;
    let descriptor =
        cmdgram_wire::decode(&bytes).with_context(|| format!("'{file}' is not a valid descriptor"))?;
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

fn cmd_explain(key: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let text = keys::explain(key);
            let out = serde_json::json!({
                "key": key,
                "explanation": text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = keys::explain(key) {
                use ariadne::Fmt;
                println!("{}: {}", key.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{key}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Resolve command tables from (in priority order):
///   1. Explicit `--tables` path
///   2. Tables embedded into the binary at build time
fn resolve_tables(explicit_path: Option<&str>) -> Result<CommandTables> {
    if let Some(path) = explicit_path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read tables file '{path}'"))?;
        return CommandTables::from_json(&json)
            .with_context(|| format!("failed to parse tables file '{path}'"));
    }
    if EMBEDDED_TABLES_JSON.is_empty() {
        anyhow::bail!(
            "no command tables available; pass --tables <PATH> or rebuild with embedded tables"
        );
    }
    CommandTables::from_json(EMBEDDED_TABLES_JSON).context("embedded tables are invalid")
}

/// Build a registry from the best available tables.
fn load_registry(tables_path: Option<&str>) -> Result<CommandRegistry> {
    let tables = resolve_tables(tables_path)?;
    let mut registry = CommandRegistry::new();
    registry.load_tables(&tables)?;
    Ok(registry)
}
