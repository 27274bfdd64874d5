use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Role holding an EP's intrinsic variable.
pub const IVARG_ROLE: &str = "ARG0";
/// Role holding an EP's constant argument.
pub const CONSTARG_ROLE: &str = "CARG";
/// `pos` letter identifying quantifier predicates.
pub const QUANTIFIER_POS: char = 'q';

static VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w*\D)(\d+)$").expect("var pattern"));

static PRED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)_?(?P<lemma>.*?)_((?P<pos>[a-z])_)?((?P<sense>([^_\\]|(?:\\.))+)_)?(?P<end>rel(ation)?)$",
    )
    .expect("pred pattern")
});

/// True when `name` has the shape of an MRS variable (`h0`, `e2`, `x3`, ...).
pub fn is_var(name: &str) -> bool {
    VAR_RE.is_match(name)
}

/// Splits a variable name into its sort prefix and id, e.g. `x3` -> (`x`, 3).
pub fn var_parts(name: &str) -> Option<(&str, u32)> {
    let caps = VAR_RE.captures(name)?;
    let sort = caps.get(1)?.as_str();
    let vid = caps.get(2)?.as_str().parse().ok()?;
    Some((sort, vid))
}

/// A predicate symbol, kept verbatim alongside its parsed parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pred {
    pub string: String,
    pub lemma: String,
    pub pos: Option<char>,
    pub sense: Option<String>,
}

impl Pred {
    /// Parses either a string pred (leading `_`, possibly quoted) or a
    /// grammar pred. Strings that do not end in `_rel`/`_relation` keep the
    /// whole input as their lemma.
    pub fn parse(predstr: &str) -> Self {
        let bare = predstr.trim_matches('"').trim_start_matches('\'');
        match PRED_RE.captures(bare) {
            Some(caps) => Self {
                string: predstr.to_string(),
                lemma: caps.name("lemma").map(|m| m.as_str()).unwrap_or("").to_string(),
                pos: caps
                    .name("pos")
                    .and_then(|m| m.as_str().chars().next()),
                sense: caps.name("sense").map(|m| m.as_str().to_string()),
            },
            None => Self {
                string: predstr.to_string(),
                lemma: bare.to_string(),
                pos: None,
                sense: None,
            },
        }
    }

    /// Unquoted form with the final underscore segment (`_rel`) dropped.
    pub fn short_form(&self) -> &str {
        let bare = self.string.trim_matches('"').trim_start_matches('\'');
        match bare.rfind('_') {
            Some(idx) => &bare[..idx],
            None => bare,
        }
    }

    pub fn is_quantifier(&self) -> bool {
        self.pos == Some(QUANTIFIER_POS)
    }
}

impl std::fmt::Display for Pred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.string)
    }
}

/// An elementary predication.
#[derive(Debug, Clone, PartialEq)]
pub struct Ep {
    pub nodeid: u32,
    pub pred: Pred,
    pub label: String,
    pub args: IndexMap<String, String>,
    pub lnk: Option<(i32, i32)>,
    pub surface: Option<String>,
}

impl Ep {
    /// Intrinsic variable (the `ARG0` value), when present.
    pub fn iv(&self) -> Option<&str> {
        self.args.get(IVARG_ROLE).map(String::as_str)
    }

    /// Constant argument with surrounding quotes removed.
    pub fn carg(&self) -> Option<&str> {
        self.args
            .get(CONSTARG_ROLE)
            .map(|value| value.trim_matches('"'))
    }
}

/// A handle or individual constraint triple, e.g. `h0 qeq h1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub left: String,
    pub relation: String,
    pub right: String,
}

impl Constraint {
    pub fn new(
        left: impl Into<String>,
        relation: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            relation: relation.into(),
            right: right.into(),
        }
    }
}

/// A minimal recursion semantics structure as read from SimpleMRS.
///
/// `variables` is the per-variable property table in first-mention order;
/// it also registers property-less variables (labels, holes) so membership
/// doubles as the "is this token a known variable" check during extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mrs {
    pub top: Option<String>,
    pub index: Option<String>,
    pub rels: Vec<Ep>,
    pub hcons: Vec<Constraint>,
    pub icons: Vec<Constraint>,
    pub variables: IndexMap<String, IndexMap<String, String>>,
    pub lnk: Option<(i32, i32)>,
    pub surface: Option<String>,
}

impl Mrs {
    pub fn ep(&self, nodeid: u32) -> Option<&Ep> {
        self.rels.iter().find(|ep| ep.nodeid == nodeid)
    }

    /// Handle constraint whose hole (left side) is `hi`.
    pub fn hcon(&self, hi: &str) -> Option<&Constraint> {
        self.hcons.iter().find(|hc| hc.left == hi)
    }

    pub fn is_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn properties(&self, var: &str) -> Option<&IndexMap<String, String>> {
        self.variables.get(var)
    }

    /// Nodeids of the EPs sharing `label`, in rels order.
    pub fn labelset(&self, label: &str) -> Vec<u32> {
        self.rels
            .iter()
            .filter(|ep| ep.label == label)
            .map(|ep| ep.nodeid)
            .collect()
    }

    /// EPs referencing `var` through any argument role, as (nodeid, role)
    /// pairs in rels order.
    pub fn references(&self, var: &str) -> Vec<(u32, &str)> {
        let mut refs = Vec::new();
        for ep in &self.rels {
            for (role, value) in &ep.args {
                if value == var {
                    refs.push((ep.nodeid, role.as_str()));
                }
            }
        }
        refs
    }

    /// Nodeids whose intrinsic variable is `var`, in rels order.
    pub fn iv_referents(&self, var: &str) -> Vec<u32> {
        self.rels
            .iter()
            .filter(|ep| ep.iv() == Some(var))
            .map(|ep| ep.nodeid)
            .collect()
    }
}

/// Canonical role order for serialization: LBL first, plain roles
/// alphabetically, then *-HNDL roles, with BODY and CARG last.
pub fn rargname_sortkey(rargname: &str) -> (bool, bool, bool, String) {
    let upper = rargname.to_uppercase();
    (
        upper != "LBL",
        upper == "BODY" || upper == "CARG",
        upper.ends_with("HNDL"),
        upper,
    )
}
