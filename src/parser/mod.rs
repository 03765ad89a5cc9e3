//! Algebraic expression parser
//!
//! Turns cell text such as `+3X1 - 2X2 + X3` into a coefficient per variable.

use crate::error::ParseError;
use crate::types::Term;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Signed optional coefficient followed by `X` and a variable index.
/// ASCII digits only; `\d` would also match other scripts' digits.
const TERM_PATTERN: &str = r"([+-]?[0-9]*\.?[0-9]*)X([0-9]+)";

fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TERM_PATTERN).expect("term pattern is a valid regex"))
}

/// Coefficients keyed by 1-based variable index (`X1` → 1)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coefficients {
    map: BTreeMap<u32, f64>,
}

impl Coefficients {
    pub fn get(&self, index: u32) -> f64 {
        self.map.get(&index).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Highest variable index referenced
    pub fn max_index(&self) -> u32 {
        self.map.keys().next_back().copied().unwrap_or(0)
    }

    /// Coefficients of X1..Xn, zero where the expression omits a variable
    pub fn dense(&self, n: usize) -> Vec<f64> {
        (1..=n as u32).map(|i| self.get(i)).collect()
    }

    /// Terms ordered by variable, with 0-based positions
    pub fn terms(&self) -> Vec<Term> {
        self.map
            .iter()
            .map(|(&index, &coefficient)| Term::new(coefficient, (index - 1) as usize))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.map.iter().map(|(&i, &c)| (i, c))
    }

    fn add(&mut self, index: u32, coefficient: f64) {
        *self.map.entry(index).or_insert(0.0) += coefficient;
    }
}

/// Canonical text form, e.g. `+3X1-2X2+X3`. Parsing it back yields the
/// same coefficients.
impl fmt::Display for Coefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, coefficient) in self.iter() {
            if coefficient == 1.0 {
                write!(f, "+X{}", index)?;
            } else if coefficient == -1.0 {
                write!(f, "-X{}", index)?;
            } else if coefficient.is_sign_negative() {
                write!(f, "{}X{}", coefficient, index)?;
            } else {
                write!(f, "+{}X{}", coefficient, index)?;
            }
        }
        Ok(())
    }
}

/// Parse an objective or constraint expression.
///
/// Whitespace is removed, then every `[sign][coefficient]X<index>` term is
/// collected left to right. A missing coefficient means 1 (or -1 after a
/// lone `-`). Repeated variables accumulate.
///
/// # Example
/// ```
/// use lpsheet::parser::parse_expression;
///
/// let coefficients = parse_expression("+3X1 - 2X2 + X3")?;
/// assert_eq!(coefficients.get(1), 3.0);
/// assert_eq!(coefficients.get(2), -2.0);
/// assert_eq!(coefficients.get(3), 1.0);
/// # Ok::<(), lpsheet::error::ParseError>(())
/// ```
pub fn parse_expression(text: &str) -> Result<Coefficients, ParseError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(digit) = compact.chars().find(|c| c.is_numeric() && !c.is_ascii_digit()) {
        return Err(ParseError::NonAsciiDigit { digit });
    }
    let mut coefficients = Coefficients::default();

    for caps in term_pattern().captures_iter(&compact) {
        let coefficient_text = &caps[1];
        let index_text = &caps[2];

        let index: u32 = index_text.parse().map_err(|_| ParseError::InvalidIndex {
            index: index_text.to_string(),
        })?;
        if index == 0 {
            return Err(ParseError::ZeroIndex);
        }

        coefficients.add(index, parse_coefficient(coefficient_text, index_text)?);
    }

    if coefficients.is_empty() {
        return Err(ParseError::Empty {
            text: text.to_string(),
        });
    }

    Ok(coefficients)
}

fn parse_coefficient(text: &str, index: &str) -> Result<f64, ParseError> {
    match text {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        _ => text
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidCoefficient {
                coefficient: text.to_string(),
                index: index.to_string(),
            }),
    }
}
