//! Command grammar.
//!
//! An ordered list of anchored, case-insensitive patterns. The first pattern
//! that matches the whole line wins; later patterns are never consulted.
//! Numeric captures accept a leading minus so that negative values reach the
//! validator instead of falling through to the help text.

use regex::{Captures, Regex, RegexBuilder};

use crate::domain::error::ChattraderError;
use crate::domain::intent::{Classification, RawCommand};

const QTY: &str = r"(?P<qty>-?[0-9]+)";
const SYMBOL: &str = r"(?P<sym>[a-z]+)";
const PRICE: &str = r"(?P<price>-?[0-9]+(?:\.[0-9]+)?)";

type Builder = fn(&Captures<'_>) -> RawCommand;

struct Rule {
    pattern: Regex,
    build: Builder,
}

pub struct Grammar {
    rules: Vec<Rule>,
}

fn field(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn buy(c: &Captures<'_>) -> RawCommand {
    RawCommand::Buy {
        quantity: field(c, "qty"),
        symbol: field(c, "sym"),
    }
}

fn sell_all(c: &Captures<'_>) -> RawCommand {
    RawCommand::SellAll {
        symbol: field(c, "sym"),
    }
}

fn sell_quantity(c: &Captures<'_>) -> RawCommand {
    RawCommand::SellQuantity {
        quantity: field(c, "qty"),
        symbol: field(c, "sym"),
    }
}

fn limit_sell_all(c: &Captures<'_>) -> RawCommand {
    RawCommand::LimitSellAll {
        symbol: field(c, "sym"),
        price: field(c, "price"),
    }
}

fn limit_sell_quantity(c: &Captures<'_>) -> RawCommand {
    RawCommand::LimitSellQuantity {
        quantity: field(c, "qty"),
        symbol: field(c, "sym"),
        price: field(c, "price"),
    }
}

fn portfolio(_: &Captures<'_>) -> RawCommand {
    RawCommand::Portfolio
}

/// Rule bodies in match order. A shorter shape never shadows a longer one
/// because every body is anchored to the whole line.
fn rule_table() -> [(String, Builder); 6] {
    [
        (format!(r"buy\s+{QTY}\s+{SYMBOL}"), buy),
        (format!(r"sell\s+{SYMBOL}"), sell_all),
        (format!(r"sell\s+{QTY}\s+{SYMBOL}"), sell_quantity),
        (format!(r"sell\s+{SYMBOL}\s+limit\s+{PRICE}"), limit_sell_all),
        (
            format!(r"sell\s+{QTY}\s+{SYMBOL}\s+limit\s+{PRICE}"),
            limit_sell_quantity,
        ),
        ("portfolio".to_string(), portfolio),
    ]
}

impl Grammar {
    pub fn new() -> Result<Self, ChattraderError> {
        let rules = rule_table()
            .into_iter()
            .map(|(body, build)| -> Result<Rule, ChattraderError> {
                let pattern = RegexBuilder::new(&format!(r"^{body}$"))
                    .case_insensitive(true)
                    .build()?;
                Ok(Rule { pattern, build })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn classify(&self, line: &str) -> Classification {
        self.rules
            .iter()
            .find_map(|rule| rule.pattern.captures(line).map(|c| (rule.build)(&c)))
            .map(Classification::Command)
            .unwrap_or(Classification::Unrecognized)
    }
}
