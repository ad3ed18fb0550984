//! Textual prerequisite syntax.
//!
//! ```text
//! PRESPELLSCHOOLSUB:3,Fire=2,Useful=2    threshold 3, two capped categories
//! !PRECLASS:1,Wizard                     negation
//! PREMULT:2,[PRECLASS:1,Wizard],[...]    at least 2 of the bracketed children
//! ```
//!
//! The leading number is the total threshold; a non-numeric threshold names a
//! registered term or else a character counter. Parsed leaves compare with `GTEQ`. Nesting deeper than
//! 64 levels is rejected.

use tabula_foundation::{Error, Result};
use tracing::trace;

use crate::kinds::KindRegistry;
use crate::node::{Item, Operand, Prerequisite};
use crate::operator::Operator;

const NEGATION: char = '!';
const PREFIX: &str = "PRE";
const MULT: &str = "MULT";

/// Deepest accepted nesting of negations and `PREMULT` children.
const MAX_DEPTH: usize = 64;

fn malformed(text: &str, reason: &str) -> Error {
    Error::configuration(format!("malformed prerequisite '{text}': {reason}"))
}

impl Prerequisite {
    /// Parses a prerequisite, resolving kind tags against `registry`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed text or an unknown kind.
    pub fn parse(registry: &KindRegistry, text: &str) -> Result<Self> {
        let node = parse_node(registry, text.trim(), 0)?;
        trace!(text, ?node, "parsed prerequisite");
        Ok(node)
    }
}

fn parse_node(registry: &KindRegistry, text: &str, depth: usize) -> Result<Prerequisite> {
    if depth > MAX_DEPTH {
        return Err(malformed(text, "nested too deeply"));
    }
    if let Some(inner) = text.strip_prefix(NEGATION) {
        return Ok(parse_node(registry, inner, depth + 1)?.negate());
    }
    let body = text
        .get(..PREFIX.len())
        .filter(|p| p.eq_ignore_ascii_case(PREFIX))
        .map(|_| &text[PREFIX.len()..])
        .ok_or_else(|| malformed(text, "expected PRE prefix"))?;
    let (tag, args) = body
        .split_once(':')
        .ok_or_else(|| malformed(text, "expected ':' after the kind"))?;
    if tag.is_empty() {
        return Err(malformed(text, "missing kind"));
    }

    let parts = split_top_level(text, args)?;
    let Some((first, rest)) = parts.split_first() else {
        return Err(malformed(text, "missing threshold"));
    };

    if tag.eq_ignore_ascii_case(MULT) {
        let n = first
            .parse::<usize>()
            .map_err(|_| malformed(text, "PREMULT count must be a number"))?;
        let children = rest
            .iter()
            .map(|child| {
                child
                    .strip_prefix('[')
                    .and_then(|c| c.strip_suffix(']'))
                    .ok_or_else(|| malformed(text, "PREMULT children must be bracketed"))
                    .and_then(|inner| parse_node(registry, inner, depth + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        return Prerequisite::at_least(n, children);
    }

    let operand = parse_operand(registry, text, first)?;
    let items = rest
        .iter()
        .map(|item| parse_item(text, item))
        .collect::<Result<Vec<_>>>()?;
    Prerequisite::threshold(registry, tag, Operator::Gteq, operand, items)
}

fn parse_operand(registry: &KindRegistry, text: &str, part: &str) -> Result<Operand> {
    if let Ok(n) = part.parse::<i64>() {
        return Ok(Operand::Number(n));
    }
    let valid = part
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(Operand::named(registry, part))
    } else {
        Err(malformed(text, "threshold must be a number or a counter name"))
    }
}

fn parse_item(text: &str, part: &str) -> Result<Item> {
    match part.split_once('=') {
        None => Ok(Item::new(part, None)),
        Some((key, _)) if key.is_empty() => Err(malformed(text, "empty category")),
        Some((key, cap)) => cap
            .parse::<u32>()
            .map(|cap| Item::new(key, Some(cap)))
            .map_err(|_| malformed(text, "category cap must be a non-negative number")),
    }
}

/// Splits on commas that are not inside brackets.
fn split_top_level<'a>(text: &str, args: &'a str) -> Result<Vec<&'a str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(text, "unbalanced ']'"))?;
            }
            ',' if depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(malformed(text, "unbalanced '['"));
    }
    parts.push(&args[start..]);
    if parts.iter().any(|p| p.is_empty()) {
        return Err(malformed(text, "empty element"));
    }
    Ok(parts)
}
