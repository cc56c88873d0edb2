//! Parsing and command building.
//!
//! [`CommandRegistry::parse`] tokenizes a line into a [`TokenTree`];
//! [`CommandRegistry::create_command`] matches the tokens against the
//! compiled grammar and either returns a fully populated
//! [`CommandInvocation`] or a localizable [`ParseFailure`]. No partially
//! populated invocation ever escapes.

use std::sync::Arc;

use crate::argparse::{matches_component, parser_for};
use crate::grammar::Factorization;
use crate::lexer::tokenize;
use crate::origin::{CommandOrigin, SemanticConstraint};
use crate::registry::CommandRegistry;
use crate::signature::{CommandFlags, Overload, Signature};
use crate::symbol::{Symbol, Terminal};
use crate::token_tree::{TokenId, TokenTree};
use crate::value::{CommandInvocation, Slot, SubcommandValue, Value};
use cmdgram_diagnostics::{ParseFailure, Span, keys};
use cmdgram_spec_tables::ArgType;

/// A lexed token as the matcher sees it. Quoted tokens have their quotes
/// stripped from `text` while the span still covers them.
#[derive(Debug, Clone, Copy)]
struct Tok<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl Tok<'_> {
    fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    fn quoted(&self) -> bool {
        self.text.len() != self.end - self.start
    }
}

fn arg_type_for(t: Terminal) -> Option<ArgType> {
    Some(match t {
        Terminal::Int => ArgType::Int,
        Terminal::Float => ArgType::Float,
        Terminal::Val | Terminal::RVal => ArgType::Value,
        Terminal::WildcardInt => ArgType::WildcardInt,
        Terminal::Operator => ArgType::Operator,
        Terminal::CompareOperator => ArgType::CompareOperator,
        Terminal::Selection => ArgType::Target,
        Terminal::IntegerRange => ArgType::IntegerRange,
        Terminal::RationalRange => ArgType::RationalRange,
        Terminal::Position => ArgType::Position,
        Terminal::PositionFloat => ArgType::PositionFloat,
        Terminal::Message => ArgType::Message,
        Terminal::RawText => ArgType::RawText,
        Terminal::JsonValue => ArgType::Json,
        Terminal::BlockState => ArgType::BlockState,
        Terminal::Id => ArgType::Id,
        Terminal::Epsilon | Terminal::SlashCommand => None?,
    })
}

/// Specificity of one matched symbol. An overload that matched more
/// specific symbols wins disambiguation.
fn score_for(sym: Symbol) -> u32 {
    match sym {
        Symbol::Enum(_)
        | Symbol::SoftEnum(_)
        | Symbol::EnumValue(_)
        | Symbol::Postfix(_)
        | Symbol::ChainedSubcommand(_)
        | Symbol::ChainedSubcommandValue(_) => 3,
        Symbol::Terminal(t) => match t {
            Terminal::Val | Terminal::RVal | Terminal::Message | Terminal::RawText => 1,
            Terminal::Epsilon | Terminal::SlashCommand => 0,
            _ => 2,
        },
        Symbol::NonTerminal(_) | Symbol::Optional(_) | Symbol::Factorization(_) => 0,
    }
}

/// A successful overload match: per-parameter token ranges plus the
/// disambiguation score.
struct Outcome {
    /// Token range `[start, end)` per parameter; `None` for omitted
    /// optionals.
    bindings: Vec<Option<(usize, usize)>>,
    score: u32,
    consumed: usize,
}

/// A failed overload match, ranked by how many tokens the candidate
/// engaged before faulting.
struct Fault {
    consumed: usize,
    failure: ParseFailure,
}

enum SymFault {
    /// The token stream ran out before a required symbol.
    Missing,
    Mismatch(ParseFailure),
    /// A multi-token symbol failed partway in; the count is the leading
    /// tokens that did fit before the bad one.
    MismatchAfter(usize, ParseFailure),
}

impl CommandRegistry {
    /// Tokenize one command line into a parse token tree.
    ///
    /// The root spans the whole line; its first child is the command token,
    /// labeled with the matched command's grammar symbol, or epsilon when
    /// the command is unknown. Argument tokens hang off the command token
    /// in source order, initially labeled as relaxed values until
    /// [`create_command`](Self::create_command) rebinds them.
    pub fn parse<'a>(&self, line: &'a str) -> TokenTree<'a> {
        let mut tree = TokenTree::new(line);
        let toks = tokenize(line);
        let Some(first) = toks.first() else {
            return tree;
        };
        let name = first.text.strip_prefix('/').unwrap_or(first.text);
        let symbol = self
            .find_signature(name)
            .map_or(Symbol::Terminal(Terminal::Epsilon), |s| s.command_symbol);
        let root = tree.root();
        let cmd = tree.push_child(root, symbol, first.text, Span::new(first.start, first.end));
        for tok in &toks[1..] {
            tree.push_child(
                cmd,
                Symbol::Terminal(Terminal::RVal),
                tok.text,
                Span::new(tok.start, tok.end),
            );
        }
        tree
    }

    /// Match a parsed token tree against the grammar and build the typed
    /// invocation.
    ///
    /// On success the argument tokens are rebound to the symbols the winning
    /// overload matched them with. On trailing input an epsilon error-branch
    /// token covering the unconsumed text is appended to the tree.
    pub fn create_command(
        &self,
        tree: &mut TokenTree<'_>,
        origin: &CommandOrigin,
        version: u32,
    ) -> Result<CommandInvocation, ParseFailure> {
        let root = tree.root();
        let Some(cmd_id) = tree.children(root).next() else {
            return Err(ParseFailure::with_param(keys::UNKNOWN_COMMAND, ""));
        };
        let cmd = tree.get(cmd_id);
        let name = cmd.text.strip_prefix('/').unwrap_or(cmd.text).to_string();
        let cmd_span = cmd.span;
        let Some(canonical) = self.resolve_name(&name) else {
            return Err(ParseFailure::with_param(keys::UNKNOWN_COMMAND, name).at(cmd_span));
        };

        let arg_ids: Vec<TokenId> = tree.children(cmd_id).collect();
        let tokens: Vec<Tok<'_>> = arg_ids
            .iter()
            .map(|&id| {
                let node = tree.get(id);
                Tok {
                    text: node.text,
                    start: node.span.start,
                    end: node.span.end,
                }
            })
            .collect();

        match self.build_invocation(&canonical, &tokens, tree.source, origin, version) {
            Ok((invocation, symbols)) => {
                for (&id, sym) in arg_ids.iter().zip(symbols) {
                    tree.get_mut(id).symbol = sym;
                }
                Ok(invocation)
            }
            Err(failure) => {
                if failure.message_key == keys::TRAILING_ARGUMENT {
                    if let Some(span) = failure.span {
                        let text = &tree.source[span.start..span.end];
                        tree.push_child(
                            cmd_id,
                            Symbol::Terminal(Terminal::Epsilon),
                            text,
                            span,
                        );
                    }
                }
                Err(failure)
            }
        }
    }

    /// Parse and build in one call.
    pub fn parse_command(
        &self,
        line: &str,
        origin: &CommandOrigin,
        version: u32,
    ) -> Result<CommandInvocation, ParseFailure> {
        let mut tree = self.parse(line);
        self.create_command(&mut tree, origin, version)
    }

    /// Core matcher shared by top-level commands and chained subcommands.
    /// Returns the invocation plus the per-token matched symbols.
    fn build_invocation(
        &self,
        canonical: &str,
        tokens: &[Tok<'_>],
        source: &str,
        origin: &CommandOrigin,
        version: u32,
    ) -> Result<(CommandInvocation, Vec<Symbol>), ParseFailure> {
        let Some(sig) = self.signatures.get(canonical) else {
            return Err(ParseFailure::with_param(keys::UNKNOWN_COMMAND, canonical));
        };
        self.check_availability(sig, origin)?;

        if !sig.overloads.is_empty()
            && !sig.overloads.iter().any(|o| o.version.contains(version))
        {
            return Err(ParseFailure::with_param(
                keys::VERSION_MISMATCH,
                version.to_string(),
            ));
        }

        let rule_ids = self
            .parse_tables
            .get(&sig.command_symbol.index())
            .map(|t| t.rules.as_slice())
            .unwrap_or_default();

        let mut best: Option<(u32, Outcome)> = None; // (rule id, outcome)
        let mut trailing: Option<usize> = None; // consumed
        let mut fault: Option<Fault> = None;

        for &rule_id in rule_ids {
            let rule = &self.rules[rule_id as usize];
            let overload = &sig.overloads[rule.overload_index];
            if !overload.version.contains(version) {
                continue;
            }
            match self.match_overload(overload, &rule.derivation, tokens, source) {
                Ok(outcome) if outcome.consumed == tokens.len() => {
                    let better = match &best {
                        Some((_, b)) => outcome.score > b.score,
                        None => true,
                    };
                    if better {
                        best = Some((rule_id, outcome));
                    }
                }
                Ok(outcome) => {
                    if trailing.is_none_or(|c| outcome.consumed > c) {
                        trailing = Some(outcome.consumed);
                    }
                }
                Err(f) => {
                    if fault.as_ref().is_none_or(|b| f.consumed > b.consumed) {
                        fault = Some(f);
                    }
                }
            }
        }

        if let Some((rule_id, outcome)) = best {
            let rule = &self.rules[rule_id as usize];
            return self.finish_invocation(sig, rule.overload_index, &outcome, tokens, source, origin, version);
        }
        if sig.overloads.is_empty() && tokens.is_empty() {
            let mut invocation = CommandInvocation::new();
            invocation.command = canonical.to_string();
            return Ok((invocation, Vec::new()));
        }
        // Report whichever candidate engaged more of the input: a precise
        // parameter fault from a deeper overload outranks a shallower
        // overload's trailing-argument complaint.
        let fault_reach = fault.as_ref().map_or(0, |f| f.consumed);
        if let Some(consumed) = trailing {
            if fault_reach <= consumed {
                let start = tokens[consumed].start;
                let text = source[start..].trim_end();
                return Err(ParseFailure::with_param(keys::TRAILING_ARGUMENT, text)
                    .at(Span::new(start, start + text.len())));
            }
        }
        if let Some(fault) = fault {
            return Err(fault.failure);
        }
        // No overloads but trailing tokens.
        let start = tokens.first().map_or(source.len(), |t| t.start);
        let text = source[start..].trim_end();
        Err(ParseFailure::with_param(keys::TRAILING_ARGUMENT, text)
            .at(Span::new(start, start + text.len())))
    }

    /// Command-level gates applied before any overload is tried.
    fn check_availability(
        &self,
        sig: &Signature,
        origin: &CommandOrigin,
    ) -> Result<(), ParseFailure> {
        if origin.permission < sig.permission {
            return Err(ParseFailure::with_param(
                keys::REQUIRES_PERMISSION,
                sig.name.clone(),
            ));
        }
        if !origin.cheats_enabled && !sig.flags.contains(CommandFlags::NOT_CHEAT) {
            return Err(ParseFailure::with_param(
                keys::REQUIRES_CHEATS,
                sig.name.clone(),
            ));
        }
        Ok(())
    }

    fn match_overload(
        &self,
        overload: &Overload,
        derivation: &[Symbol],
        tokens: &[Tok<'_>],
        source: &str,
    ) -> Result<Outcome, Fault> {
        let mut bindings: Vec<Option<(usize, usize)>> = vec![None; overload.params.len()];
        let mut score = 0u32;
        let mut pos = 0usize;
        let mut cursor = 0usize; // next parameter index

        let fault = |pos: usize, param: usize, kind: SymFault| {
            let (reach, failure) = match kind {
                SymFault::Missing => (
                    0,
                    ParseFailure::with_param(
                        keys::MISSING_PARAMETER,
                        overload.params[param].name.clone(),
                    )
                    .at(Span::empty(source.len())),
                ),
                SymFault::Mismatch(f) => (0, f),
                SymFault::MismatchAfter(n, f) => (n, f),
            };
            Fault {
                consumed: pos + reach,
                failure,
            }
        };

        for &sym in derivation {
            match sym {
                Symbol::Optional(head) => {
                    let mut node = Some(head);
                    while let Some(n) = node {
                        let chain = &self.optionals[n as usize];
                        if pos >= tokens.len() {
                            break;
                        }
                        match self.match_symbol(chain.symbol, tokens, pos, source) {
                            Ok(consumed) => {
                                bindings[chain.param_index] = Some((pos, pos + consumed));
                                score += score_for(chain.symbol);
                                pos += consumed;
                            }
                            Err(kind) => return Err(fault(pos, chain.param_index, kind)),
                        }
                        node = chain.next;
                    }
                    cursor = overload.params.len();
                }
                Symbol::Factorization(f) => {
                    let fact = &self.factorizations[f as usize];
                    let (assignment, new_pos, fact_score) =
                        self.match_factorization(fact, tokens, pos, source)?;
                    for (offset, range) in assignment {
                        bindings[fact.first_param_index + offset] = Some(range);
                    }
                    score += fact_score;
                    pos = new_pos;
                    cursor = fact.first_param_index + fact.symbols.len();
                }
                _ => {
                    match self.match_symbol(sym, tokens, pos, source) {
                        Ok(consumed) => {
                            bindings[cursor] = Some((pos, pos + consumed));
                            score += score_for(sym);
                            pos += consumed;
                        }
                        Err(kind) => return Err(fault(pos, cursor, kind)),
                    }
                    cursor += 1;
                }
            }
        }

        Ok(Outcome {
            bindings,
            score,
            consumed: pos,
        })
    }

    /// Try the group's symbols in every order, declaration order first, and
    /// keep the first assignment that matches. Depth is bounded by the
    /// compiler's group-size cap.
    fn match_factorization(
        &self,
        fact: &Factorization,
        tokens: &[Tok<'_>],
        pos: usize,
        source: &str,
    ) -> Result<(Vec<(usize, (usize, usize))>, usize, u32), Fault> {
        fn search(
            reg: &CommandRegistry,
            symbols: &[Symbol],
            taken: &mut Vec<bool>,
            tokens: &[Tok<'_>],
            pos: usize,
            source: &str,
            assignment: &mut Vec<(usize, (usize, usize))>,
            score: u32,
        ) -> Option<(usize, u32)> {
            if taken.iter().all(|&t| t) {
                return Some((pos, score));
            }
            for i in 0..symbols.len() {
                if taken[i] {
                    continue;
                }
                if let Ok(consumed) = reg.match_symbol(symbols[i], tokens, pos, source) {
                    taken[i] = true;
                    assignment.push((i, (pos, pos + consumed)));
                    let next_score = score + score_for(symbols[i]);
                    if let Some(done) = search(
                        reg,
                        symbols,
                        taken,
                        tokens,
                        pos + consumed,
                        source,
                        assignment,
                        next_score,
                    ) {
                        return Some(done);
                    }
                    assignment.pop();
                    taken[i] = false;
                }
            }
            None
        }

        let mut taken = vec![false; fact.symbols.len()];
        let mut assignment = Vec::new();
        match search(
            self,
            &fact.symbols,
            &mut taken,
            tokens,
            pos,
            source,
            &mut assignment,
            0,
        ) {
            Some((new_pos, score)) => Ok((assignment, new_pos, score)),
            None => {
                // Report against the first symbol in declaration order.
                let kind = match self.match_symbol(fact.symbols[0], tokens, pos, source) {
                    Err(kind) => kind,
                    Ok(_) => SymFault::Missing,
                };
                let failure = match kind {
                    SymFault::Missing => ParseFailure::new(
                        keys::SYNTAX,
                        [tokens.get(pos).map_or("", |t| t.text).to_string()],
                    )
                    .at(Span::empty(source.len())),
                    SymFault::Mismatch(f) | SymFault::MismatchAfter(_, f) => f,
                };
                Err(Fault {
                    consumed: pos,
                    failure,
                })
            }
        }
    }

    /// Match one symbol at `pos`, returning the number of tokens consumed.
    fn match_symbol(
        &self,
        sym: Symbol,
        tokens: &[Tok<'_>],
        pos: usize,
        source: &str,
    ) -> Result<usize, SymFault> {
        let next = || tokens.get(pos).ok_or(SymFault::Missing);
        match sym {
            Symbol::Terminal(Terminal::Epsilon) => Ok(0),
            Symbol::Terminal(t @ (Terminal::Position | Terminal::PositionFloat)) => {
                if pos >= tokens.len() {
                    return Err(SymFault::Missing);
                }
                let ty = if t == Terminal::Position {
                    ArgType::Position
                } else {
                    ArgType::PositionFloat
                };
                let avail = tokens.len().min(pos + 3);
                let fit = tokens[pos..avail]
                    .iter()
                    .take_while(|tok| !tok.quoted() && matches_component(ty, tok.text))
                    .count();
                if fit == 3 {
                    return Ok(3);
                }
                let end = avail - 1;
                let text = &source[tokens[pos].start..tokens[end].end];
                Err(SymFault::MismatchAfter(
                    fit,
                    ParseFailure::with_param(keys::INVALID_COORDINATE, text)
                        .at(Span::new(tokens[pos].start, tokens[end].end)),
                ))
            }
            Symbol::Terminal(Terminal::Message | Terminal::RawText) => {
                next()?;
                Ok(tokens.len() - pos)
            }
            Symbol::Terminal(t) => {
                let tok = next()?;
                let Some(ty) = arg_type_for(t) else {
                    return Err(SymFault::Mismatch(ParseFailure::with_param(
                        keys::SYNTAX,
                        tok.text,
                    )));
                };
                if tok.quoted() && !matches!(t, Terminal::Val | Terminal::RVal) {
                    return Err(SymFault::Mismatch(
                        ParseFailure::with_param(keys::SYNTAX, tok.text).at(tok.span()),
                    ));
                }
                match parser_for(ty).parse(tok.text) {
                    Ok(_) => Ok(1),
                    Err(failure) => Err(SymFault::Mismatch(failure.at(tok.span()))),
                }
            }
            Symbol::Enum(i) => {
                let tok = next()?;
                let member = self
                    .enum_value_index(tok.text)
                    .is_some_and(|vi| self.enums[i as usize].contains_index(vi));
                if member {
                    Ok(1)
                } else {
                    Err(SymFault::Mismatch(
                        ParseFailure::new(keys::INVALID_ENUM_VALUE, [
                            tok.text.to_string(),
                            self.enums[i as usize].name.clone(),
                        ])
                        .at(tok.span()),
                    ))
                }
            }
            Symbol::EnumValue(i) => {
                let tok = next()?;
                if tok.text == self.enum_values[i as usize] {
                    Ok(1)
                } else {
                    Err(SymFault::Mismatch(
                        ParseFailure::with_param(keys::SYNTAX, tok.text).at(tok.span()),
                    ))
                }
            }
            Symbol::SoftEnum(i) => {
                let tok = next()?;
                let snapshot: Arc<Vec<String>> = self.soft_enum_snapshot(i);
                if snapshot.iter().any(|v| v == tok.text) {
                    Ok(1)
                } else {
                    Err(SymFault::Mismatch(
                        ParseFailure::new(keys::INVALID_ENUM_VALUE, [
                            tok.text.to_string(),
                            self.soft_enums[i as usize].name.clone(),
                        ])
                        .at(tok.span()),
                    ))
                }
            }
            Symbol::Postfix(i) => {
                let tok = next()?;
                let postfix = &self.postfixes[i as usize];
                let ok = !postfix.is_empty()
                    && tok
                        .text
                        .strip_suffix(postfix.as_str())
                        .is_some_and(|n| n.parse::<i64>().is_ok());
                if ok {
                    Ok(1)
                } else {
                    Err(SymFault::Mismatch(
                        ParseFailure::new(keys::INVALID_POSTFIX, [
                            tok.text.to_string(),
                            postfix.clone(),
                        ])
                        .at(tok.span()),
                    ))
                }
            }
            Symbol::ChainedSubcommand(i) => {
                let tok = next()?;
                if self.chained_entry(i, tok.text).is_some() {
                    // The subcommand swallows the rest of the line; the
                    // builder parses it recursively.
                    Ok(tokens.len() - pos)
                } else {
                    Err(SymFault::Mismatch(
                        ParseFailure::with_param(keys::UNKNOWN_SUBCOMMAND, tok.text)
                            .at(tok.span()),
                    ))
                }
            }
            Symbol::ChainedSubcommandValue(_)
            | Symbol::NonTerminal(_)
            | Symbol::Optional(_)
            | Symbol::Factorization(_) => Err(SymFault::Mismatch(ParseFailure::with_param(
                keys::SYNTAX,
                next().map(|t| t.text).unwrap_or_default(),
            ))),
        }
    }

    /// Convert the winning match into typed slot values.
    #[allow(clippy::too_many_arguments)]
    fn finish_invocation(
        &self,
        sig: &Signature,
        overload_index: usize,
        outcome: &Outcome,
        tokens: &[Tok<'_>],
        source: &str,
        origin: &CommandOrigin,
        version: u32,
    ) -> Result<(CommandInvocation, Vec<Symbol>), ParseFailure> {
        let overload = &sig.overloads[overload_index];
        let mut invocation = (overload.alloc)();
        invocation.command = sig.name.clone();
        invocation.overload = overload_index;

        let slot_count = overload
            .params
            .iter()
            .map(|p| p.slot + 1)
            .max()
            .unwrap_or(0);
        invocation.slots = vec![
            Slot {
                name: String::new(),
                value: None,
            };
            slot_count
        ];
        let mut token_symbols = vec![Symbol::Terminal(Terminal::Epsilon); tokens.len()];

        for (i, param) in overload.params.iter().enumerate() {
            invocation.slots[param.slot].name.clone_from(&param.name);
            let Some((start, end)) = outcome.bindings[i] else {
                continue;
            };
            let sym = overload.param_symbols[i];
            for ts in &mut token_symbols[start..end] {
                *ts = sym;
            }
            let range = &tokens[start..end];
            // A single quoted token contributes its unquoted text; any
            // multi-token match takes the raw source slice.
            let text = if end - start == 1 {
                range[0].text
            } else {
                &source[range[0].start..range[end - start - 1].end]
            };
            let span = Span::new(range[0].start, range[end - start - 1].end);
            let value = self.value_for(sym, text, range, source, origin, version, span)?;
            invocation.slots[param.slot].value = Some(value);
        }

        Ok((invocation, token_symbols))
    }

    #[allow(clippy::too_many_arguments)]
    fn value_for(
        &self,
        sym: Symbol,
        text: &str,
        range: &[Tok<'_>],
        source: &str,
        origin: &CommandOrigin,
        version: u32,
        span: Span,
    ) -> Result<Value, ParseFailure> {
        match sym {
            Symbol::Terminal(t) => {
                let Some(ty) = arg_type_for(t) else {
                    return Err(ParseFailure::with_param(keys::SYNTAX, text).at(span));
                };
                parser_for(ty).parse(text).map_err(|f| f.at(span))
            }
            Symbol::Enum(i) => {
                let cmd_enum = &self.enums[i as usize];
                if let Some(vi) = self.enum_value_index(text) {
                    let constraints = self.constraints_for(i, vi);
                    if !origin.satisfies(constraints) {
                        let key = if constraints
                            .contains(SemanticConstraint::RequiresCheatsEnabled)
                            && !origin.cheats_enabled
                        {
                            keys::REQUIRES_CHEATS
                        } else {
                            keys::REQUIRES_PERMISSION
                        };
                        return Err(ParseFailure::with_param(key, text).at(span));
                    }
                }
                Ok(Value::Enum {
                    enum_name: cmd_enum.name.clone(),
                    value: text.to_string(),
                })
            }
            Symbol::SoftEnum(i) => Ok(Value::SoftEnum {
                enum_name: self.soft_enums[i as usize].name.clone(),
                value: text.to_string(),
            }),
            Symbol::Postfix(i) => {
                let postfix = &self.postfixes[i as usize];
                let digits = text.strip_suffix(postfix.as_str()).unwrap_or(text);
                digits.parse::<i64>().map(Value::Int).map_err(|_| {
                    ParseFailure::new(keys::INVALID_POSTFIX, [
                        text.to_string(),
                        postfix.clone(),
                    ])
                    .at(span)
                })
            }
            Symbol::ChainedSubcommand(i) => {
                let value_tok = range[0];
                let entry = self.chained_entry(i, value_tok.text).ok_or_else(|| {
                    ParseFailure::with_param(keys::UNKNOWN_SUBCOMMAND, value_tok.text)
                        .at(value_tok.span())
                })?;
                let target = entry.command.clone();
                let canonical = self.resolve_name(&target).ok_or_else(|| {
                    ParseFailure::with_param(keys::UNKNOWN_SUBCOMMAND, value_tok.text)
                        .at(value_tok.span())
                })?;
                let (invocation, _) =
                    self.build_invocation(&canonical, &range[1..], source, origin, version)?;
                Ok(Value::Subcommand(Box::new(SubcommandValue {
                    value: value_tok.text.to_string(),
                    invocation,
                })))
            }
            _ => Err(ParseFailure::with_param(keys::SYNTAX, text).at(span)),
        }
    }
}
