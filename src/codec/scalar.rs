//! Typed interpretation of bare option strings.
//!
//! Recognizes data literals only: `None`, `True`, `False`, integers, floats,
//! quoted strings, and list/tuple/set/dict displays built from them. Anything
//! else, including text that merely starts like a literal, comes back as the
//! original string.

use crate::value::{Map, Value};

/// Maximum container nesting accepted by the literal parser.
const MAX_DEPTH: usize = 128;

/// Interprets `raw` as a literal value, falling back to the string itself.
///
/// The input is not trimmed: surrounding whitespace makes the text a plain
/// string, so callers strip it first when they want the literal.
///
/// ```
/// use ini_nest::{codec::evaluate, Value};
///
/// assert_eq!(evaluate("None"), Value::Null);
/// assert_eq!(evaluate("False"), Value::Bool(false));
/// assert_eq!(evaluate("Hello world"), Value::from("Hello world"));
/// assert_eq!(evaluate("[1, 2, 3]"), Value::from(vec![1, 2, 3]));
/// ```
pub fn evaluate(raw: &str) -> Value {
    if let Some(value) = keyword(raw).or_else(|| parse_number(raw)) {
        return value;
    }

    LiteralParser::new(raw)
        .parse_document()
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

fn keyword(token: &str) -> Option<Value> {
    match token {
        "None" => Some(Value::Null),
        "True" => Some(Value::Bool(true)),
        "False" => Some(Value::Bool(false)),
        _ => None,
    }
}

/// Parses an integer or float literal, rejecting anything `str::parse` would
/// accept beyond literal syntax (`inf`, `nan`, leading zeros, ...).
fn parse_number(token: &str) -> Option<Value> {
    let (negative, body) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    let sign = if negative { "-" } else { "" };

    let radix = match body.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &body[2..];
        if !valid_digits(digits, radix) {
            return None;
        }
        let digits = format!("{sign}{}", digits.replace('_', ""));
        return i64::from_str_radix(&digits, radix).ok().map(Value::Int);
    }

    if valid_digits(body, 10) {
        let digits = body.replace('_', "");
        if digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
            return None;
        }
        return format!("{sign}{digits}").parse().ok().map(Value::Int);
    }

    if is_float_literal(body) {
        return format!("{sign}{}", body.replace('_', ""))
            .parse()
            .ok()
            .filter(|f: &f64| f.is_finite())
            .map(Value::Float);
    }

    None
}

/// Digits of `radix`, with single underscores allowed between digits.
fn valid_digits(s: &str, radix: u32) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars().all(|c| c == '_' || c.is_digit(radix))
}

fn is_float_literal(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            !(int.is_empty() && frac.is_empty())
                && (int.is_empty() || valid_digits(int, 10))
                && (frac.is_empty() || valid_digits(frac, 10))
        }
        None => exponent.is_some() && valid_digits(mantissa, 10),
    };

    let exponent_ok = exponent.map_or(true, |exp| {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        valid_digits(exp, 10)
    });

    mantissa_ok && exponent_ok
}

/// Characters that end a bare token inside a literal.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ':' | '[' | ']' | '(' | ')' | '{' | '}' | '\'' | '"')
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    /// Parses exactly one literal spanning the whole input, with no
    /// surrounding whitespace.
    fn parse_document(&mut self) -> Option<Value> {
        let value = self.parse_value()?;
        (self.pos == self.src.len()).then_some(value)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        match self.peek()? {
            '[' | '(' | '{' => {
                if self.depth >= MAX_DEPTH {
                    return None;
                }
                self.depth += 1;
                let value = match self.bump()? {
                    '[' => self.parse_items(']').map(|(items, _)| Value::List(items)),
                    '(' => self.parse_tuple(),
                    _ => self.parse_braces(),
                };
                self.depth -= 1;
                value
            }
            quote @ ('\'' | '"') => {
                self.bump();
                self.parse_string(quote).map(Value::String)
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Option<Value> {
        let start = self.pos;
        while self.peek().is_some_and(|c| !is_delimiter(c)) {
            self.bump();
        }
        let token = &self.src[start..self.pos];
        keyword(token).or_else(|| parse_number(token))
    }

    /// Comma-separated values up to `close`. Also reports whether any comma
    /// was seen, which distinguishes `(1,)` from `(1)`.
    fn parse_items(&mut self, close: char) -> Option<(Vec<Value>, bool)> {
        let mut items = Vec::new();
        let mut saw_comma = false;
        loop {
            self.skip_whitespace();
            if self.eat(close) {
                return Some((items, saw_comma));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            if self.eat(',') {
                saw_comma = true;
            } else if self.eat(close) {
                return Some((items, saw_comma));
            } else {
                return None;
            }
        }
    }

    fn parse_tuple(&mut self) -> Option<Value> {
        let (mut items, saw_comma) = self.parse_items(')')?;
        if items.len() == 1 && !saw_comma {
            return items.pop();
        }
        Some(Value::List(items))
    }

    /// `{}` and `{k: v, ...}` become maps, `{a, b}` a list.
    fn parse_braces(&mut self) -> Option<Value> {
        self.skip_whitespace();
        if self.eat('}') {
            return Some(Value::Map(Map::new()));
        }

        let first = self.parse_value()?;
        self.skip_whitespace();
        if self.peek() != Some(':') {
            let mut items = vec![first];
            if self.eat(',') {
                items.extend(self.parse_items('}')?.0);
            } else if !self.eat('}') {
                return None;
            }
            return Some(Value::List(items));
        }

        let mut map = Map::new();
        let mut key = first;
        loop {
            self.skip_whitespace();
            if !self.eat(':') {
                return None;
            }
            self.skip_whitespace();
            let value = self.parse_value()?;
            map.insert(map_key(key)?, value);

            self.skip_whitespace();
            if self.eat('}') {
                return Some(Value::Map(map));
            }
            if !self.eat(',') {
                return None;
            }
            self.skip_whitespace();
            if self.eat('}') {
                return Some(Value::Map(map));
            }
            key = self.parse_value()?;
        }
    }

    /// Body of a quoted string; the opening quote is already consumed.
    fn parse_string(&mut self, quote: char) -> Option<String> {
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\n' => return None,
                '\\' => match self.bump()? {
                    '\n' => {}
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    'x' => out.push(self.parse_hex_escape(2)?),
                    'u' => out.push(self.parse_hex_escape(4)?),
                    'U' => out.push(self.parse_hex_escape(8)?),
                    c @ ('\\' | '\'' | '"') => out.push(c),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                c => out.push(c),
            }
        }
    }

    fn parse_hex_escape(&mut self, len: usize) -> Option<char> {
        let digits = self.src.get(self.pos..self.pos + len)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        self.pos += len;
        char::from_u32(u32::from_str_radix(digits, 16).ok()?)
    }
}

/// Dict keys must be scalars; non-string scalars use their display form.
fn map_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::List(_) | Value::Map(_) => None,
        scalar => Some(scalar.to_string()),
    }
}
