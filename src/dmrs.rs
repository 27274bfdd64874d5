//! DMRS extraction from an MRS structure.
//!
//! A DMRS graph has one node per elementary predication and one link per
//! resolved argument. Non-scopal arguments point at the predication whose
//! intrinsic variable they select; scopal arguments are resolved through
//! handle constraints to the head of the target labelset.

use std::cmp::Reverse;

use indexmap::IndexMap;
use tracing::debug;

use crate::ir::{Graph, Link, Node, TOP_NODEID};
use crate::mrs::{self, Mrs, IVARG_ROLE};

/// Convert an MRS into the graph document used by layout and rendering.
pub fn extract(m: &Mrs) -> Graph {
    Graph {
        nodes: nodes(m),
        links: links(m),
    }
}

fn nodes(m: &Mrs) -> Vec<Node> {
    m.rels
        .iter()
        .map(|ep| {
            let mut node = Node::new(ep.nodeid, ep.pred.short_form());
            if let Some(iv) = ep.iv() {
                if let Some(props) = m.properties(iv) {
                    node.varprops = props.clone();
                }
                if let Some((sort, _)) = mrs::var_parts(iv) {
                    node.varprops
                        .insert("cvarsort".to_string(), sort.to_string());
                }
            }
            if let Some((cfrom, cto)) = ep.lnk {
                node.cfrom = cfrom;
                node.cto = cto;
            }
            node.carg = ep.carg().map(str::to_string);
            node
        })
        .collect()
}

fn links(m: &Mrs) -> Vec<Link> {
    let mut lblheads: IndexMap<&str, Vec<u32>> = IndexMap::new();
    for var in m.variables.keys() {
        if !m.labelset(var).is_empty() {
            lblheads.insert(var.as_str(), labelset_heads(m, var));
        }
    }

    // (source nodeid, source label, role, argument value)
    let mut prelinks: Vec<(u32, &str, Option<&str>, &str)> = Vec::new();
    if let Some(top) = &m.top {
        prelinks.push((TOP_NODEID, top, None, top));
    }
    for ep in &m.rels {
        for (role, val) in &ep.args {
            if role == IVARG_ROLE || !m.is_variable(val) {
                continue;
            }
            prelinks.push((ep.nodeid, &ep.label, Some(role), val));
        }
    }

    let mut links = Vec::new();
    for (src, srclbl, role, val) in prelinks {
        let rargname = role.unwrap_or("");
        let referents = m.iv_referents(val);
        if !referents.is_empty() {
            let tgt = referents
                .into_iter()
                .find(|&n| m.ep(n).is_some_and(|ep| !ep.pred.is_quantifier()));
            let Some(tgt) = tgt else {
                // nothing but quantifiers bind this variable
                continue;
            };
            let tgtlbl = m.ep(tgt).map(|ep| ep.label.as_str()).unwrap_or("");
            let post = if srclbl == tgtlbl { "EQ" } else { "NEQ" };
            links.push(Link::new(src, tgt, rargname, post));
        } else if let Some(hc) = m.hcon(val) {
            match lblheads.get(hc.right.as_str()).and_then(|heads| heads.first()) {
                Some(&tgt) => links.push(Link::new(src, tgt, rargname, "H")),
                None => debug!(
                    hole = val,
                    lo = %hc.right,
                    "dropping argument: constrained label has no head"
                ),
            }
        } else if let Some(heads) = lblheads.get(val) {
            match heads.first() {
                Some(&tgt) => links.push(Link::new(src, tgt, rargname, "HEQ")),
                None => debug!(label = val, "dropping argument: labelset has no head"),
            }
        }
        // remaining values are constants or dangling handles
    }

    // equality links for labelset heads not already joined by an argument
    for heads in lblheads.values() {
        if let Some((&first, rest)) = heads.split_first() {
            for &other in rest {
                links.push(Link::new(first, other, "", "EQ"));
            }
        }
    }

    links.sort_by(|a, b| {
        (a.start, a.end, &a.rargname, &a.post).cmp(&(b.start, b.end, &b.rargname, &b.post))
    });
    links
}

/// Representative nodes of a labelset, most head-like first.
///
/// A head takes no arguments within its own labelset (beyond its intrinsic
/// variable) and is the most referenced by its labelmates. Quantifiers win
/// ties so that compound quantifiers resolve to the quantifier itself.
pub(crate) fn labelset_heads(m: &Mrs, label: &str) -> Vec<u32> {
    let members = m.labelset(label);
    if members.len() <= 1 {
        return members;
    }

    let ivs: IndexMap<&str, u32> = members
        .iter()
        .filter_map(|&n| m.ep(n).and_then(|ep| ep.iv()).map(|iv| (iv, n)))
        .collect();

    // arguments of n bound within the labelset; 1 for the intrinsic
    // variable itself, though some predications lack even that
    let out: IndexMap<u32, usize> = members
        .iter()
        .map(|&n| {
            let arity = m.ep(n).map_or(0, |ep| {
                ep.args
                    .values()
                    .filter(|v| ivs.contains_key(v.as_str()))
                    .count()
            });
            (n, arity)
        })
        .collect();

    let mut candidates: Vec<u32> = members.iter().copied().filter(|n| out[n] <= 1).collect();
    candidates.sort_by_key(|&n| {
        let in_deg = m.ep(n).and_then(|ep| ep.iv()).map_or(0, |iv| {
            m.references(iv)
                .iter()
                .filter(|(s, _)| members.contains(s))
                .count()
        });
        let quantifier = m.ep(n).is_some_and(|ep| ep.pred.is_quantifier());
        (out[&n], Reverse(in_deg), Reverse(quantifier), n)
    });
    candidates
}
