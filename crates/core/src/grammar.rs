//! Grammar compiler — turns overload parameter lists into rules, optional
//! chains, factorizations, and per-nonterminal parse tables.
//!
//! Compilation is monotonic: registering an overload only appends table
//! entries, never rewrites entries produced for earlier overloads.

use crate::registry::CommandRegistry;
use crate::signature::{CommandParameterData, ParamKind};
use crate::symbol::{Symbol, Terminal};
use cmdgram_spec_tables::ArgType;

/// The terminal a `basic` parameter of the given type compiles to.
pub fn terminal_for(ty: ArgType) -> Terminal {
    match ty {
        ArgType::Int => Terminal::Int,
        ArgType::Float => Terminal::Float,
        ArgType::Value => Terminal::Val,
        ArgType::WildcardInt => Terminal::WildcardInt,
        ArgType::Target => Terminal::Selection,
        ArgType::Position => Terminal::Position,
        ArgType::PositionFloat => Terminal::PositionFloat,
        ArgType::Message => Terminal::Message,
        ArgType::RawText => Terminal::RawText,
        ArgType::Json => Terminal::JsonValue,
        ArgType::BlockState => Terminal::BlockState,
        ArgType::Id => Terminal::Id,
        ArgType::IntegerRange => Terminal::IntegerRange,
        ArgType::RationalRange => Terminal::RationalRange,
        ArgType::Operator => Terminal::Operator,
        ArgType::CompareOperator => Terminal::CompareOperator,
    }
}

/// One compiled production: nonterminal → derivation.
#[derive(Debug, Clone)]
pub struct ParseRule {
    /// The signature nonterminal this rule belongs to.
    pub non_terminal: Symbol,
    /// Symbol sequence the rule derives. `Optional` and `Factorization`
    /// symbols stand in for their expanded parameter runs.
    pub derivation: Vec<Symbol>,
    /// Canonical name of the owning command.
    pub command: String,
    /// Index of the overload this rule was compiled from.
    pub overload_index: usize,
}

/// One node of an optional-parameter chain.
///
/// The parser walks the chain greedily: at each node it either matches the
/// node's symbol and continues at `next`, or stops without consuming input
/// when the token stream is exhausted.
#[derive(Debug, Clone)]
pub struct OptionalParameterChain {
    /// The symbol this node matches.
    pub symbol: Symbol,
    /// Index of the parameter this node binds, relative to the overload.
    pub param_index: usize,
    /// Next node in the chain, if any.
    pub next: Option<u32>,
}

/// A run of parameters whose relative order is insignificant.
#[derive(Debug, Clone)]
pub struct Factorization {
    /// The group's match symbols, in declaration order.
    pub symbols: Vec<Symbol>,
    /// Index of the first grouped parameter, relative to the overload.
    pub first_param_index: usize,
}

/// Per-nonterminal transition data: the rule indices to try, in
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct ParseTable {
    /// Indices into the registry's rule list.
    pub rules: Vec<u32>,
}

/// Largest unordered group the compiler accepts. Factorization tries
/// permutations at parse time, so the group size is capped.
pub const MAX_FACTORIZATION_GROUP: usize = 5;

impl CommandRegistry {
    /// The match symbol for one parameter. Referenced enums, soft enums,
    /// postfixes, and chained subcommands are created on first use so that
    /// registration order across call sites does not matter.
    pub(crate) fn param_symbol(&mut self, param: &CommandParameterData) -> Symbol {
        match param.kind {
            ParamKind::Basic => Symbol::Terminal(terminal_for(param.arg_type)),
            ParamKind::Enum => {
                let name = param.enum_name.as_deref().unwrap_or(&param.name);
                Symbol::Enum(self.add_enum_values(name, &[]))
            }
            ParamKind::SoftEnum => {
                let name = param.enum_name.as_deref().unwrap_or(&param.name);
                Symbol::SoftEnum(self.add_soft_enum_values(name, &[]))
            }
            ParamKind::Postfix => {
                let text = param.postfix.as_deref().unwrap_or_default();
                Symbol::Postfix(self.add_postfix(text))
            }
            ParamKind::ChainedSubcommand => {
                let name = param.chained_subcommand.as_deref().unwrap_or(&param.name);
                Symbol::ChainedSubcommand(self.add_chained_subcommand(name, &[]))
            }
        }
    }

    /// Compile one overload into grammar artifacts.
    ///
    /// Returns the per-parameter match symbols (stored on the overload) after
    /// appending the derivation rule, any optional chain, and any
    /// factorizations. Panics on parameter lists the grammar cannot express;
    /// those are registration-time programmer errors, not input errors.
    pub(crate) fn compile_overload(
        &mut self,
        command: &str,
        command_symbol: Symbol,
        overload_index: usize,
        params: &[CommandParameterData],
    ) -> Vec<Symbol> {
        let symbols: Vec<Symbol> = params.iter().map(|p| self.param_symbol(p)).collect();

        // Optional parameters must form a suffix: the optional chain lets the
        // parser stop early, which is meaningless for a required parameter
        // that follows an omitted one.
        let first_optional = params
            .iter()
            .position(|p| p.is_optional)
            .unwrap_or(params.len());
        for (i, p) in params.iter().enumerate().skip(first_optional) {
            assert!(
                p.is_optional,
                "command {command}: required parameter {:?} follows optional parameter(s)",
                params[i].name
            );
        }

        // A chained subcommand hands the rest of the line to the nested
        // command, so nothing can come after it.
        if let Some(i) = params
            .iter()
            .position(|p| matches!(p.kind, ParamKind::ChainedSubcommand))
        {
            assert!(
                i == params.len() - 1,
                "command {command}: chained subcommand parameter {:?} must be last",
                params[i].name
            );
        }

        let mut derivation = Vec::new();
        let mut first_factorization = -1i32;
        let mut i = 0;
        while i < first_optional {
            let group = params[i].group;
            let run_end = match group {
                Some(g) => {
                    let mut j = i;
                    while j < first_optional && params[j].group == Some(g) {
                        j += 1;
                    }
                    j
                }
                None => i + 1,
            };
            if run_end - i > 1 {
                assert!(
                    run_end - i <= MAX_FACTORIZATION_GROUP,
                    "command {command}: unordered group of {} exceeds {MAX_FACTORIZATION_GROUP}",
                    run_end - i
                );
                let idx = u32::try_from(self.factorizations.len()).expect("factorization overflow");
                self.factorizations.push(Factorization {
                    symbols: symbols[i..run_end].to_vec(),
                    first_param_index: i,
                });
                if first_factorization < 0 {
                    first_factorization = idx as i32;
                }
                derivation.push(Symbol::Factorization(idx));
            } else {
                derivation.push(symbols[i]);
            }
            i = run_end;
        }

        let mut first_optional_node = -1i32;
        if first_optional < params.len() {
            let base = u32::try_from(self.optionals.len()).expect("optional chain overflow");
            let last = params.len() - 1;
            for (j, &sym) in symbols.iter().enumerate().skip(first_optional) {
                self.optionals.push(OptionalParameterChain {
                    symbol: sym,
                    param_index: j,
                    next: (j < last).then(|| base + (j - first_optional) as u32 + 1),
                });
            }
            first_optional_node = base as i32;
            derivation.push(Symbol::Optional(base));
        }

        let rule_index = u32::try_from(self.rules.len()).expect("rule overflow");
        self.rules.push(ParseRule {
            non_terminal: command_symbol,
            derivation,
            command: command.to_string(),
            overload_index,
        });
        self.parse_tables
            .entry(command_symbol.index())
            .or_default()
            .rules
            .push(rule_index);

        let signature = self
            .signatures
            .get_mut(command)
            .expect("compile_overload on unregistered command");
        if signature.first_rule < 0 {
            signature.first_rule = rule_index as i32;
        }
        if signature.first_factorization < 0 && first_factorization >= 0 {
            signature.first_factorization = first_factorization;
        }
        if signature.first_optional < 0 && first_optional_node >= 0 {
            signature.first_optional = first_optional_node;
        }
        signature.rule_counter += 1;

        symbols
    }
}
