//! SimpleMRS reader and writer.
//!
//! The format is a flat bracketed text form, e.g.
//! `[ TOP: h0 INDEX: e2 RELS: < [ _sleep_v_1_rel<8:15> LBL: h1 ARG0: e2 ARG1: x3 ] > HCONS: < h0 qeq h1 > ]`.
//! Variable properties appear in square brackets after the first mention of
//! the variable and are collected into the [`Mrs`] variable table.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::mrs::{self, Constraint, Ep, Mrs, Pred, CONSTARG_ROLE};

/// Nodeids are assigned to elementary predications in order of appearance,
/// starting from this value.
pub const FIRST_NODEID: u32 = 10000;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""[^"\\]*(?:\\.[^"\\]*)*"|[^\s:#@\[\]<>"]+|[:#@\[\]<>]"#)
        .expect("token pattern is valid")
});

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MrsParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected token `{0}`, expected {1}")]
    Unexpected(String, &'static str),
    #[error("malformed character span around `{0}`")]
    BadSpan(String),
}

struct Tokens<'a> {
    toks: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        let toks = TOKEN_RE.find_iter(input).map(|m| m.as_str()).collect();
        Tokens { toks, pos: 0 }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.toks.len()
    }

    fn peek(&self) -> Result<&'a str, MrsParseError> {
        self.toks
            .get(self.pos)
            .copied()
            .ok_or(MrsParseError::UnexpectedEof)
    }

    /// Lookahead without consuming; `None` past the end of input.
    fn peek_at(&self, offset: usize) -> Option<&'a str> {
        self.toks.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Result<&'a str, MrsParseError> {
        let tok = self.peek()?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, tok: &str, what: &'static str) -> Result<(), MrsParseError> {
        let found = self.advance()?;
        if found == tok {
            Ok(())
        } else {
            Err(MrsParseError::Unexpected(found.to_string(), what))
        }
    }

    /// Consume the next token if it equals `tok`.
    fn eat(&mut self, tok: &str) -> bool {
        if self.peek_at(0) == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

/// Parse a single MRS from SimpleMRS text.
pub fn parse_mrs(input: &str) -> Result<Mrs, MrsParseError> {
    let mut toks = Tokens::new(input);
    read_mrs(&mut toks)
}

/// Parse a sequence of MRSs, e.g. one per line.
pub fn parse_all(input: &str) -> Result<Vec<Mrs>, MrsParseError> {
    let mut toks = Tokens::new(input);
    let mut out = Vec::new();
    while !toks.is_done() {
        out.push(read_mrs(&mut toks)?);
    }
    Ok(out)
}

fn read_mrs(toks: &mut Tokens) -> Result<Mrs, MrsParseError> {
    toks.expect("[", "`[` opening an MRS")?;
    let mut m = Mrs::default();
    m.lnk = read_lnk(toks)?;
    m.surface = read_surface(toks);
    if toks.eat("LTOP") || toks.eat("TOP") {
        toks.expect(":", "`:` after TOP")?;
        let top = toks.advance()?;
        m.variables.entry(top.to_string()).or_default();
        m.top = Some(top.to_string());
    }
    if toks.eat("INDEX") {
        toks.expect(":", "`:` after INDEX")?;
        let index = toks.advance()?;
        let props = read_props(toks)?;
        let entry = m.variables.entry(index.to_string()).or_default();
        for (key, val) in props {
            entry.insert(key, val);
        }
        m.index = Some(index.to_string());
    }
    if toks.eat("RELS") {
        toks.expect(":", "`:` after RELS")?;
        toks.expect("<", "`<` opening the RELS list")?;
        let mut nodeid = FIRST_NODEID;
        while toks.peek()? != ">" {
            m.rels.push(read_ep(toks, nodeid, &mut m.variables)?);
            nodeid += 1;
        }
        toks.expect(">", "`>` closing the RELS list")?;
    }
    m.hcons = read_cons(toks, "HCONS", &mut m.variables)?;
    m.icons = read_cons(toks, "ICONS", &mut m.variables)?;
    toks.expect("]", "`]` closing the MRS")?;
    Ok(m)
}

fn read_ep(
    toks: &mut Tokens,
    nodeid: u32,
    vars: &mut IndexMap<String, IndexMap<String, String>>,
) -> Result<Ep, MrsParseError> {
    toks.expect("[", "`[` opening an EP")?;
    let pred = Pred::parse(toks.advance()?);
    let lnk = read_lnk(toks)?;
    let surface = read_surface(toks);
    toks.expect("LBL", "`LBL` in an EP")?;
    toks.expect(":", "`:` after LBL")?;
    let label = toks.advance()?.to_string();
    vars.entry(label.clone()).or_default();
    let mut args = IndexMap::new();
    while toks.peek()? != "]" {
        let role = toks.advance()?.to_string();
        toks.expect(":", "`:` after a role name")?;
        let val = toks.advance()?.to_string();
        if mrs::is_var(&val) && !role.eq_ignore_ascii_case(CONSTARG_ROLE) {
            let props = read_props(toks)?;
            let entry = vars.entry(val.clone()).or_default();
            for (key, pval) in props {
                entry.insert(key, pval);
            }
        }
        args.insert(role, val);
    }
    toks.expect("]", "`]` closing an EP")?;
    Ok(Ep {
        nodeid,
        pred,
        label,
        args,
        lnk,
        surface,
    })
}

/// Variable properties: `[ sort KEY: val ... ]`. The leading sort token is
/// dropped since it is recoverable from the variable name itself.
fn read_props(toks: &mut Tokens) -> Result<Vec<(String, String)>, MrsParseError> {
    let mut props = Vec::new();
    if !toks.eat("[") {
        return Ok(props);
    }
    toks.advance()?; // variable sort
    while toks.peek()? != "]" {
        let key = toks.advance()?.to_string();
        toks.expect(":", "`:` after a property name")?;
        let val = toks.advance()?.to_string();
        props.push((key, val));
    }
    toks.expect("]", "`]` closing a property list")?;
    Ok(props)
}

fn read_cons(
    toks: &mut Tokens,
    name: &str,
    vars: &mut IndexMap<String, IndexMap<String, String>>,
) -> Result<Vec<Constraint>, MrsParseError> {
    let mut cons = Vec::new();
    if !toks.eat(name) {
        return Ok(cons);
    }
    toks.expect(":", "`:` after a constraint list name")?;
    toks.expect("<", "`<` opening a constraint list")?;
    while toks.peek()? != ">" {
        let left = toks.advance()?.to_string();
        let relation = toks.advance()?.to_string();
        let right = toks.advance()?.to_string();
        vars.entry(left.clone()).or_default();
        vars.entry(right.clone()).or_default();
        cons.push(Constraint::new(left, relation, right));
    }
    toks.expect(">", "`>` closing a constraint list")?;
    Ok(cons)
}

/// Character spans like `<0:3>`. An empty `<>` yields no span; other lnk
/// variants are skipped without being recorded.
fn read_lnk(toks: &mut Tokens) -> Result<Option<(i32, i32)>, MrsParseError> {
    if !toks.eat("<") {
        return Ok(None);
    }
    let mut lnk = None;
    if toks.peek()? == ">" {
        // empty lnk
    } else if toks.peek_at(1) == Some(":") {
        let cfrom = read_span_offset(toks)?;
        toks.expect(":", "`:` inside a character span")?;
        let cto = read_span_offset(toks)?;
        lnk = Some((cfrom, cto));
    } else {
        while toks.peek()? != ">" {
            toks.advance()?;
        }
    }
    toks.expect(">", "`>` closing a lnk")?;
    Ok(lnk)
}

fn read_span_offset(toks: &mut Tokens) -> Result<i32, MrsParseError> {
    let tok = toks.advance()?;
    tok.parse()
        .map_err(|_| MrsParseError::BadSpan(tok.to_string()))
}

fn read_surface(toks: &mut Tokens) -> Option<String> {
    let tok = toks.peek_at(0)?;
    if tok.starts_with('"') {
        toks.pos += 1;
        Some(tok.trim_matches('"').to_string())
    } else {
        None
    }
}

/// Serialize an MRS to a single line of SimpleMRS text.
pub fn serialize_mrs(m: &Mrs) -> String {
    // Properties are printed at the first mention of each variable.
    let mut varprops: IndexMap<&str, &IndexMap<String, String>> = m
        .variables
        .iter()
        .filter(|(_, props)| !props.is_empty())
        .map(|(var, props)| (var.as_str(), props))
        .collect();
    let mut toks = Vec::new();
    if let Some(lnk) = m.lnk {
        toks.push(serialize_lnk(lnk));
    }
    if let Some(surface) = &m.surface {
        toks.push(format!("\"{surface}\""));
    }
    if let Some(top) = &m.top {
        toks.push(format!("TOP: {top}"));
    }
    if let Some(index) = &m.index {
        toks.push(serialize_argument("INDEX", index, &mut varprops));
    }
    let eps: Vec<String> = m
        .rels
        .iter()
        .map(|ep| serialize_ep(ep, &mut varprops))
        .collect();
    toks.push(format!("RELS: < {} >", eps.join(" ")));
    toks.push(format!("HCONS: < {} >", serialize_cons(&m.hcons)));
    if !m.icons.is_empty() {
        toks.push(format!("ICONS: < {} >", serialize_cons(&m.icons)));
    }
    format!("[ {} ]", toks.join(" "))
}

/// Serialize several MRSs, one per line.
pub fn serialize_all<'a, I>(mrss: I) -> String
where
    I: IntoIterator<Item = &'a Mrs>,
{
    mrss.into_iter()
        .map(serialize_mrs)
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_ep(ep: &Ep, varprops: &mut IndexMap<&str, &IndexMap<String, String>>) -> String {
    let mut parts = Vec::new();
    let mut head = ep.pred.string.clone();
    if let Some(lnk) = ep.lnk {
        head.push_str(&serialize_lnk(lnk));
    }
    parts.push(head);
    if let Some(surface) = &ep.surface {
        parts.push(format!("\"{surface}\""));
    }
    parts.push(format!("LBL: {}", ep.label));
    let mut roles: Vec<&String> = ep.args.keys().collect();
    roles.sort_by_key(|role| mrs::rargname_sortkey(role));
    for role in roles {
        parts.push(serialize_argument(role, &ep.args[role], varprops));
    }
    format!("[ {} ]", parts.join(" "))
}

fn serialize_argument(
    role: &str,
    value: &str,
    varprops: &mut IndexMap<&str, &IndexMap<String, String>>,
) -> String {
    match varprops.shift_remove(value) {
        Some(props) => {
            let sort = mrs::var_parts(value).map(|(sort, _)| sort).unwrap_or("u");
            let pairs: Vec<String> = props
                .iter()
                .map(|(key, val)| format!("{key}: {val}"))
                .collect();
            format!("{role}: {value} [ {sort} {} ]", pairs.join(" "))
        }
        None => format!("{role}: {value}"),
    }
}

fn serialize_cons(cons: &[Constraint]) -> String {
    cons.iter()
        .map(|c| format!("{} {} {}", c.left, c.relation, c.right))
        .collect::<Vec<_>>()
        .join(" ")
}

fn serialize_lnk((cfrom, cto): (i32, i32)) -> String {
    format!("<{cfrom}:{cto}>")
}
