//! parse task documents with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4":
//! titles followed by pairs key - list of values. Sections and keys listed in a template but absent from the
//! document end up in the resulting map as key: None.
//!
//! ```
//! use RiemannSums::Utils::task_parser::{parse_task_document, Value};
//! let doc = parse_task_document("interval\nlower_lim: -1 upper_lim: 1", None).unwrap();
//! assert_eq!(doc["interval"]["upper_lim"], Some(vec![Value::Integer(1)]));
//! ```
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Option<Vec<Value>>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// numeric value; integers are widened to f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// identifier: letter or underscore, then letters, digits, underscores.
/// Used for both section titles and keys.
pub(crate) fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// single value, typed as integer, float, bool or string (in that order)
pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    let token = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r'));
    let mut parser = map(token, |s: &str| {
        if let Ok(val) = s.parse::<i64>() {
            Value::Integer(val)
        } else if let Ok(val) = s.parse::<f64>() {
            Value::Float(val)
        } else if let Ok(val) = s.parse::<bool>() {
            Value::Boolean(val)
        } else {
            Value::String(s.to_string())
        }
    });
    parser.parse(input)
}

/// key: value1, value2, ... (the values may start on the next line)
pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon = delimited(space0, tag(":"), multispace0);
    let comma = delimited(space0, tag(","), space0);
    let mut parser = separated_pair(parse_identifier, colon, separated_list1(comma, parse_value));
    parser.parse(input)
}

/// title followed by one or more key-value pairs, each pair may be followed by whitespace
pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let pairs = many1(terminated(parse_key_value_pair, multispace0));
    let mut parser = separated_pair(parse_identifier, multispace0, pairs);
    let (input, (title, pairs)) = parser.parse(input)?;
    let section = pairs
        .into_iter()
        .map(|(key, values)| (key, Some(values)))
        .collect();
    Ok((input, (title, section)))
}

const COMMENT_PREFIXES: [&str; 4] = ["//", "#", "%", ";"];

/// Removes comment lines (starting with //, #, % or ;) and blank lines
pub(crate) fn filter_comments(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !COMMENT_PREFIXES.iter().any(|p| line.starts_with(*p)))
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the sections of a comment-free document
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = preceded(multispace0, many1(terminated(parse_section, multispace0)));
    let (input, sections) = parser.parse(input)?;
    Ok((input, sections.into_iter().collect()))
}

/// Full entry point: strips comments, requires the whole input to be consumed and, if a template
/// is given, inserts every section and key of the template that the document does not mention.
pub fn parse_task_document(input: &str, template: Option<&DocumentMap>) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    if filtered.trim().is_empty() {
        let mut empty = DocumentMap::new();
        if let Some(template) = template {
            merge_template(&mut empty, template);
        }
        return Ok(empty);
    }
    let (remaining, mut parsed) =
        parse_document(&filtered).map_err(|e| format!("Parsing error: {:?}", e))?;
    if !remaining.trim().is_empty() {
        return Err(format!(
            "Failed to parse entire document. Remaining: '{}'",
            remaining
        ));
    }
    if let Some(template) = template {
        merge_template(&mut parsed, template);
    }
    Ok(parsed)
}

fn merge_template(parsed: &mut DocumentMap, template: &DocumentMap) {
    for (title, keys_map) in template {
        let section_map = parsed.entry(title.clone()).or_default();
        for key in keys_map.keys() {
            section_map.entry(key.clone()).or_insert(None);
        }
    }
}

pub fn parse_task_file<P: AsRef<Path>>(
    path: P,
    template: Option<&DocumentMap>,
) -> Result<DocumentMap, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read task file {}: {}", path.display(), e))?;
    parse_task_document(&content, template)
}

/// Builds a template from (section, keys) pairs
pub fn template_from(sections: &[(&str, &[&str])]) -> DocumentMap {
    sections
        .iter()
        .map(|(title, keys)| {
            let section: SectionMap = keys.iter().map(|k| (k.to_string(), None)).collect();
            (title.to_string(), section)
        })
        .collect()
}
