//! Reading script calls from text, one per line.
//!
//! A line is a call name followed by its arguments, separated by whitespace:
//!
//! ```text
//! pdata-add offset v
//! pdata-set! offset 1 0,1,0
//! pdata-op + p "offset"
//! pdata-ref p -1
//! ```
//!
//! Arguments are numbers, comma-separated lists of numbers, or strings; a string may be quoted so
//! that it isn't read as a number. Blank lines and anything after `;` are ignored.

use pdata::script::{Call, ScriptValue};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown call: {0:?}")]
    UnknownCall(String),
    #[error("{call} takes {expected} arguments, found {found}")]
    Arguments {
        call: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("expected an integer index, found {0:?}")]
    Index(String),
    #[error("invalid list component: {0:?}")]
    List(String),
    #[error("unterminated string")]
    Unterminated,
}

/// A whitespace-separated word, remembering whether it was quoted.
#[derive(Debug, Clone, PartialEq)]
struct Token<'s> {
    text: &'s str,
    quoted: bool,
}

fn tokenize(line: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = line.trim_start();
    while !rest.is_empty() {
        if rest.starts_with(';') {
            break;
        }
        if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted.find('"').ok_or(ParseError::Unterminated)?;
            tokens.push(Token {
                text: &quoted[..end],
                quoted: true,
            });
            rest = quoted[end + 1..].trim_start();
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == ';')
                .unwrap_or(rest.len());
            tokens.push(Token {
                text: &rest[..end],
                quoted: false,
            });
            rest = rest[end..].trim_start();
        }
    }
    Ok(tokens)
}

fn value(token: &Token<'_>) -> Result<ScriptValue, ParseError> {
    let text = token.text;
    if token.quoted {
        return Ok(ScriptValue::Str(text.to_owned()));
    }
    if text.contains(',') {
        return text
            .split(',')
            .map(|c| c.trim().parse::<f64>().map_err(|_| ParseError::List(c.to_owned())))
            .collect::<Result<Vec<_>, _>>()
            .map(ScriptValue::Floats);
    }
    if let Ok(i) = text.parse::<i64>() {
        return Ok(ScriptValue::Integer(i));
    }
    if let Ok(n) = text.parse::<f64>() {
        return Ok(ScriptValue::Number(n));
    }
    Ok(ScriptValue::Str(text.to_owned()))
}

fn index(token: &Token<'_>) -> Result<i64, ParseError> {
    token
        .text
        .parse()
        .map_err(|_| ParseError::Index(token.text.to_owned()))
}

/// Parse one line into a call, or `None` if there's nothing on it.
pub fn parse_line(line: &str) -> Result<Option<Call>, ParseError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };
    let arity = |call: &'static str, expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ParseError::Arguments {
                call,
                expected,
                found: args.len(),
            })
        }
    };
    let owned = |i: usize| args[i].text.to_owned();

    let call = match head.text {
        "pdata-ref" => {
            arity("pdata-ref", 2)?;
            Call::Ref {
                name: owned(0),
                index: index(&args[1])?,
            }
        }
        "pdata-set!" | "pdata-set" => {
            arity("pdata-set!", 3)?;
            Call::Set {
                name: owned(0),
                index: index(&args[1])?,
                value: value(&args[2])?,
            }
        }
        "pdata-add" => {
            arity("pdata-add", 2)?;
            Call::Add {
                name: owned(0),
                type_code: owned(1),
            }
        }
        "pdata-op" => {
            arity("pdata-op", 3)?;
            Call::Op {
                op: owned(0),
                name: owned(1),
                operand: value(&args[2])?,
            }
        }
        "pdata-copy" => {
            arity("pdata-copy", 2)?;
            Call::Copy {
                source: owned(0),
                dest: owned(1),
            }
        }
        "pdata-size" => {
            arity("pdata-size", 0)?;
            Call::Size
        }
        other => return Err(ParseError::UnknownCall(other.to_owned())),
    };
    Ok(Some(call))
}
