//! Parsing of reaction equations such as `2OH(+M)<=>H2O2(+M)` or `H + O2 => O + OH`.
//!
//! `<=>` and `=` denote reversible reactions, `=>` irreversible ones. Coefficients may be
//! fractional (`0.5O2`). A standalone `M` term on both sides marks a third-body reaction,
//! `(+M)` on both sides marks a falloff reaction. Repeated species on one side are merged.
use crate::Kinetics::mechanism::MechanismError;
use regex::Regex;

/// bath marker found in an equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirdBodyMarker {
    None,
    /// `+ M`
    ThirdBody,
    /// `(+M)`
    Falloff,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEquation {
    /// (species, stoichiometric coefficient) in order of first appearance
    pub reactants: Vec<(String, f64)>,
    pub products: Vec<(String, f64)>,
    pub reversible: bool,
    pub marker: ThirdBodyMarker,
}

/// Equation parser holding its compiled patterns; build it once per mechanism load.
#[derive(Debug, Clone)]
pub struct StoichAnalyzer {
    arrow: Regex,
    falloff: Regex,
    term: Regex,
}

impl StoichAnalyzer {
    pub fn new() -> Result<Self, MechanismError> {
        Ok(Self {
            arrow: Regex::new(r"<=>|=>|=")?,
            falloff: Regex::new(r"\(\s*\+\s*([A-Za-z0-9_]+)\s*\)")?,
            term: Regex::new(r"^(\d+\.?\d*|\.\d+)?\s*([A-Za-z][A-Za-z0-9_*\-,()]*)$")?,
        })
    }

    pub fn parse(&self, eq: &str) -> Result<ParsedEquation, MechanismError> {
        let malformed = |reason: &str| MechanismError::MalformedEquation {
            eq: eq.to_string(),
            reason: reason.to_string(),
        };
        let arrows: Vec<_> = self.arrow.find_iter(eq).collect();
        if arrows.len() != 1 {
            return Err(malformed("expected exactly one of '<=>', '=>' or '='"));
        }
        let arrow = arrows[0];
        let reversible = arrow.as_str() != "=>";
        let (lhs, rhs) = (&eq[..arrow.start()], &eq[arrow.end()..]);

        let (lhs, lhs_falloff) = self.strip_falloff(lhs, eq)?;
        let (rhs, rhs_falloff) = self.strip_falloff(rhs, eq)?;
        if lhs_falloff != rhs_falloff {
            return Err(malformed("'(+M)' must appear on both sides"));
        }
        let (reactants, lhs_m) = self.parse_side(&lhs, eq)?;
        let (products, rhs_m) = self.parse_side(&rhs, eq)?;
        if lhs_m != rhs_m {
            return Err(malformed("third body 'M' must appear on both sides"));
        }
        if reactants.is_empty() || products.is_empty() {
            return Err(malformed("both sides need at least one species"));
        }
        let marker = match (lhs_falloff, lhs_m) {
            (true, true) => return Err(malformed("both '(+M)' and '+ M' given")),
            (true, false) => ThirdBodyMarker::Falloff,
            (false, true) => ThirdBodyMarker::ThirdBody,
            (false, false) => ThirdBodyMarker::None,
        };
        Ok(ParsedEquation {
            reactants,
            products,
            reversible,
            marker,
        })
    }

    /// removes a `(+M)` group; returns the remaining side and whether one was present
    fn strip_falloff(&self, side: &str, eq: &str) -> Result<(String, bool), MechanismError> {
        let groups: Vec<_> = self.falloff.captures_iter(side).collect();
        match groups.len() {
            0 => Ok((side.to_string(), false)),
            1 => {
                let collider = &groups[0][1];
                if collider != "M" {
                    return Err(MechanismError::MalformedEquation {
                        eq: eq.to_string(),
                        reason: format!("specific collider '(+{})' is not supported", collider),
                    });
                }
                Ok((self.falloff.replace(side, "").into_owned(), true))
            }
            _ => Err(MechanismError::MalformedEquation {
                eq: eq.to_string(),
                reason: "more than one '(+M)' on one side".to_string(),
            }),
        }
    }

    /// splits one side into merged (species, coefficient) terms; reports a standalone `M`
    fn parse_side(&self, side: &str, eq: &str) -> Result<(Vec<(String, f64)>, bool), MechanismError> {
        let mut terms: Vec<(String, f64)> = Vec::new();
        let mut third_body = false;
        for raw in side.split('+') {
            let term = raw.trim();
            if term.is_empty() {
                return Err(MechanismError::MalformedEquation {
                    eq: eq.to_string(),
                    reason: "empty term".to_string(),
                });
            }
            let Some(caps) = self.term.captures(term) else {
                return Err(MechanismError::MalformedEquation {
                    eq: eq.to_string(),
                    reason: format!("cannot parse term '{}'", term),
                });
            };
            let name = &caps[2];
            let coeff = match caps.get(1) {
                Some(c) => c.as_str().parse::<f64>().map_err(|_| MechanismError::MalformedEquation {
                    eq: eq.to_string(),
                    reason: format!("bad coefficient in '{}'", term),
                })?,
                None => 1.0,
            };
            if name == "M" {
                if third_body || caps.get(1).is_some() {
                    return Err(MechanismError::MalformedEquation {
                        eq: eq.to_string(),
                        reason: "third body 'M' must appear once with unit coefficient".to_string(),
                    });
                }
                third_body = true;
                continue;
            }
            if coeff <= 0.0 {
                return Err(MechanismError::MalformedEquation {
                    eq: eq.to_string(),
                    reason: format!("non-positive coefficient in '{}'", term),
                });
            }
            match terms.iter_mut().find(|(s, _)| s == name) {
                Some((_, c)) => *c += coeff,
                None => terms.push((name.to_string(), coeff)),
            }
        }
        Ok((terms, third_body))
    }
}
