//! Symbolic element targets.
//!
//! A [`Target`] names one element through exactly one addressing mode. The
//! wire shape used by flow files and agents is `{type, value, index?,
//! elementType?}`; it is converted into the [`Address`] sum type at the
//! boundary so coordinates and indices are parsed once.
//!
//! Targets also round-trip through the compact notation produced by
//! [`format_target`]:
//!
//! | Mode        | Notation          |
//! |-------------|-------------------|
//! | identifier  | `#login-button`   |
//! | label       | `"Login"`         |
//! | text        | `text:"Welcome"`  |
//! | predicate   | `predicate(label CONTAINS "Log")` |
//! | coordinates | `(120,440)`       |
//! | type        | `button`, `button[2]` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use crate::element::{ElementNode, Point};
use crate::result::{ApuntarError, ApuntarResult};

/// Addressing mode discriminator as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Exact accessibility identifier
    Identifier,
    /// Exact accessibility label
    Label,
    /// Value, label or title text
    Text,
    /// Predicate expression
    Predicate,
    /// Screen point `"x,y"`
    Coordinates,
    /// Element type name, optionally indexed
    Type,
}

impl TargetType {
    /// Wire name of this mode
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Label => "label",
            Self::Text => "text",
            Self::Predicate => "predicate",
            Self::Coordinates => "coordinates",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = ApuntarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identifier" => Ok(Self::Identifier),
            "label" => Ok(Self::Label),
            "text" => Ok(Self::Text),
            "predicate" => Ok(Self::Predicate),
            "coordinates" => Ok(Self::Coordinates),
            "type" => Ok(Self::Type),
            other => Err(ApuntarError::invalid_target(format!(
                "unknown target type '{other}'"
            ))),
        }
    }
}

/// How a target addresses its element
#[derive(Debug, Clone, PartialEq)]
pub enum Address {
    /// Exact, case-sensitive identifier match
    Identifier(String),
    /// Exact, case-sensitive label match
    Label(String),
    /// Exact match against value, then label, then title
    Text(String),
    /// Raw predicate expression, parsed when resolved
    Predicate(String),
    /// Screen point hit test
    Coordinates(Point),
    /// N-th element of a type (case-insensitive type name)
    Type {
        /// Type name
        name: String,
        /// Zero-based index among elements of this type
        index: Option<usize>,
    },
}

/// A symbolic element address plus an optional element-type hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireTarget", into = "WireTarget")]
pub struct Target {
    /// The addressing mode and its operand
    pub address: Address,
    /// Preferred element type, used to bias suggestions
    pub element_type: Option<String>,
}

impl Target {
    /// Create a target from an address
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            element_type: None,
        }
    }

    /// Target an accessibility identifier
    #[must_use]
    pub fn identifier(value: impl Into<String>) -> Self {
        Self::new(Address::Identifier(value.into()))
    }

    /// Target an accessibility label
    #[must_use]
    pub fn label(value: impl Into<String>) -> Self {
        Self::new(Address::Label(value.into()))
    }

    /// Target visible text (value, label or title)
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Address::Text(value.into()))
    }

    /// Target via predicate expression
    #[must_use]
    pub fn predicate(expression: impl Into<String>) -> Self {
        Self::new(Address::Predicate(expression.into()))
    }

    /// Target a screen point
    #[must_use]
    pub const fn coordinates(x: f64, y: f64) -> Self {
        Self::new(Address::Coordinates(Point::new(x, y)))
    }

    /// Target the first element of a type
    #[must_use]
    pub fn of_type(name: impl Into<String>) -> Self {
        Self::new(Address::Type {
            name: name.into(),
            index: None,
        })
    }

    /// Target the n-th element of a type
    #[must_use]
    pub fn of_type_at(name: impl Into<String>, index: usize) -> Self {
        Self::new(Address::Type {
            name: name.into(),
            index: Some(index),
        })
    }

    /// Attach an element-type hint
    #[must_use]
    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// The addressing mode
    #[must_use]
    pub const fn kind(&self) -> TargetType {
        match self.address {
            Address::Identifier(_) => TargetType::Identifier,
            Address::Label(_) => TargetType::Label,
            Address::Text(_) => TargetType::Text,
            Address::Predicate(_) => TargetType::Predicate,
            Address::Coordinates(_) => TargetType::Coordinates,
            Address::Type { .. } => TargetType::Type,
        }
    }

    /// The operand in its wire form (`"x,y"` for coordinates)
    #[must_use]
    pub fn value(&self) -> String {
        match &self.address {
            Address::Identifier(v)
            | Address::Label(v)
            | Address::Text(v)
            | Address::Predicate(v)
            | Address::Type { name: v, .. } => v.clone(),
            Address::Coordinates(point) => format!("{},{}", point.x, point.y),
        }
    }

    /// Convert from the wire representation
    pub fn from_wire(wire: WireTarget) -> ApuntarResult<Self> {
        let kind: TargetType = wire.target_type.parse()?;
        let address = match kind {
            TargetType::Identifier => Address::Identifier(wire.value),
            TargetType::Label => Address::Label(wire.value),
            TargetType::Text => Address::Text(wire.value),
            TargetType::Predicate => Address::Predicate(wire.value),
            TargetType::Coordinates => Address::Coordinates(parse_coordinates(&wire.value)?),
            TargetType::Type => Address::Type {
                name: wire.value,
                index: wire.index,
            },
        };
        Ok(Self {
            address,
            element_type: wire.element_type,
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_target(self))
    }
}

impl FromStr for Target {
    type Err = ApuntarError;

    /// Parse the notation produced by [`format_target`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ApuntarError::invalid_target("empty target"));
        }

        if let Some(id) = s.strip_prefix('#') {
            if id.is_empty() {
                return Err(ApuntarError::invalid_target("identifier after '#' is empty"));
            }
            return Ok(Self::identifier(id));
        }
        if let Some(text) = s.strip_prefix("text:") {
            return Ok(Self::text(strip_quotes(text).unwrap_or(text)));
        }
        if let Some(expr) = s.strip_prefix("predicate(").and_then(|r| r.strip_suffix(')')) {
            return Ok(Self::predicate(expr));
        }
        if let Some(label) = strip_quotes(s) {
            return Ok(Self::label(label));
        }
        if let Some(point) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            let point = parse_coordinates(point)?;
            return Ok(Self::coordinates(point.x, point.y));
        }
        if let Some((name, rest)) = s.split_once('[') {
            let index = rest
                .strip_suffix(']')
                .and_then(|i| i.trim().parse::<usize>().ok())
                .ok_or_else(|| ApuntarError::invalid_target(format!("bad index in '{s}'")))?;
            if name.is_empty() {
                return Err(ApuntarError::invalid_target(format!("missing type name in '{s}'")));
            }
            return Ok(Self::of_type_at(name, index));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(ApuntarError::invalid_target(format!(
                "'{s}' is not a recognised target; quote labels as \"{s}\""
            )));
        }
        Ok(Self::of_type(s))
    }
}

fn strip_quotes(s: &str) -> Option<&str> {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Parse `"x,y"` into a point
pub fn parse_coordinates(value: &str) -> ApuntarResult<Point> {
    let mut parts = value.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ApuntarError::invalid_target(format!(
            "coordinates must be \"x,y\", got \"{value}\""
        )));
    };
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| {
                ApuntarError::invalid_target(format!("'{}' is not a number in \"{value}\"", part.trim()))
            })
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

/// Pretty-print a target in its compact notation
#[must_use]
pub fn format_target(target: &Target) -> String {
    match &target.address {
        Address::Identifier(v) => format!("#{v}"),
        Address::Label(v) => format!("\"{v}\""),
        Address::Text(v) => format!("text:\"{v}\""),
        Address::Predicate(v) => format!("predicate({v})"),
        Address::Coordinates(p) => format!("({},{})", p.x, p.y),
        Address::Type { name, index: None } => name.clone(),
        Address::Type {
            name,
            index: Some(i),
        } => format!("{name}[{i}]"),
    }
}

/// Target as exchanged with flow files and agents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTarget {
    /// Addressing mode name
    #[serde(rename = "type")]
    pub target_type: String,
    /// Operand
    pub value: String,
    /// Index for type addressing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Element-type hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
}

impl TryFrom<WireTarget> for Target {
    type Error = ApuntarError;

    fn try_from(wire: WireTarget) -> Result<Self, Self::Error> {
        Self::from_wire(wire)
    }
}

impl From<Target> for WireTarget {
    fn from(target: Target) -> Self {
        let index = match target.address {
            Address::Type { index, .. } => index,
            _ => None,
        };
        Self {
            target_type: target.kind().as_str().to_string(),
            value: target.value(),
            index,
            element_type: target.element_type,
        }
    }
}

// ============================================================================
// Predicate expressions
// ============================================================================

/// Element attribute a predicate can test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateField {
    /// `label`
    Label,
    /// `identifier`
    Identifier,
    /// `value`
    Value,
    /// `type`
    Type,
    /// `title`
    Title,
    /// `hint`
    Hint,
}

impl PredicateField {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "label" => Some(Self::Label),
            "identifier" => Some(Self::Identifier),
            "value" => Some(Self::Value),
            "type" => Some(Self::Type),
            "title" => Some(Self::Title),
            "hint" => Some(Self::Hint),
            _ => None,
        }
    }

    fn read(self, element: &ElementNode) -> Option<&str> {
        match self {
            Self::Label => element.label.as_deref(),
            Self::Identifier => element.identifier.as_deref(),
            Self::Value => element.value.as_deref(),
            Self::Type => Some(element.element_type.as_str()),
            Self::Title => element.title.as_deref(),
            Self::Hint => element.hint.as_deref(),
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOp {
    /// `CONTAINS`, case-insensitive substring
    Contains,
    /// `==`, case-insensitive equality
    Equals,
}

/// A parsed `<field> CONTAINS "<value>"` or `<field> == "<value>"` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Attribute under test
    pub field: PredicateField,
    /// Operator
    pub op: PredicateOp,
    /// Operand, unquoted
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    EqEq,
    Quoted(String),
}

fn tokenize(input: &str) -> ApuntarResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<CharIndices<'_>> = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '=' {
            chars.next();
            match chars.next() {
                Some((_, '=')) => tokens.push(Token::EqEq),
                _ => {
                    return Err(ApuntarError::invalid_predicate(format!(
                        "expected '==' at position {pos}"
                    )))
                }
            }
        } else if c == '"' || c == '\'' {
            chars.next();
            tokens.push(Token::Quoted(read_quoted(&mut chars, c, pos)?));
        } else if c.is_alphanumeric() || c == '_' {
            let mut word = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    word.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Word(word));
        } else {
            return Err(ApuntarError::invalid_predicate(format!(
                "unexpected '{c}' at position {pos}"
            )));
        }
    }
    Ok(tokens)
}

fn read_quoted(chars: &mut Peekable<CharIndices<'_>>, quote: char, start: usize) -> ApuntarResult<String> {
    let mut out = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            c if c == quote => return Ok(out),
            c => out.push(c),
        }
    }
    Err(ApuntarError::invalid_predicate(format!(
        "unterminated string starting at position {start}"
    )))
}

impl Predicate {
    /// Parse a predicate expression
    ///
    /// Anything outside the two supported forms is rejected rather than
    /// silently matching nothing.
    pub fn parse(input: &str) -> ApuntarResult<Self> {
        let mut tokens = tokenize(input)?.into_iter();

        let field = match tokens.next() {
            Some(Token::Word(name)) => PredicateField::from_name(&name).ok_or_else(|| {
                ApuntarError::invalid_predicate(format!(
                    "unknown field '{name}' (expected label, identifier, value, type, title or hint)"
                ))
            })?,
            _ => return Err(ApuntarError::invalid_predicate("expected a field name")),
        };

        let op = match tokens.next() {
            Some(Token::EqEq) => PredicateOp::Equals,
            Some(Token::Word(word)) if word.eq_ignore_ascii_case("contains") => PredicateOp::Contains,
            _ => return Err(ApuntarError::invalid_predicate("expected CONTAINS or ==")),
        };

        let value = match tokens.next() {
            Some(Token::Quoted(value)) => value,
            _ => return Err(ApuntarError::invalid_predicate("expected a quoted value")),
        };

        if tokens.next().is_some() {
            return Err(ApuntarError::invalid_predicate(format!(
                "unexpected input after the value in '{input}'"
            )));
        }

        Ok(Self { field, op, value })
    }

    /// Test an element
    #[must_use]
    pub fn matches(&self, element: &ElementNode) -> bool {
        let Some(actual) = self.field.read(element) else {
            return false;
        };
        let actual = actual.to_lowercase();
        let expected = self.value.to_lowercase();
        match self.op {
            PredicateOp::Contains => actual.contains(&expected),
            PredicateOp::Equals => actual == expected,
        }
    }
}

impl FromStr for Predicate {
    type Err = ApuntarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
