//! XML via quick-xml
//!
//! Element trees map onto the value model with a fixed convention:
//!
//! - the document becomes `{ <root tag>: <root value> }`
//! - an element with neither attributes nor children becomes its text (a String)
//! - attributes become keys prefixed with `@`
//! - text next to attributes or children goes under `#text`
//! - repeated sibling tags become an array
//!
//! The writer inverts the same convention, so parse → stringify → parse is
//! stable for parsed documents.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::StringifyOptions;
use crate::error::{Error, Result, SyntaxError};
use crate::format::Format;
use crate::value::{Map, Value};

/// Prefix marking attribute keys
pub const ATTRIBUTE_PREFIX: &str = "@";
/// Key holding element text when the element also has attributes or children
pub const TEXT_KEY: &str = "#text";

/// Tag used when the value has no single natural root element
const WRAPPER_TAG: &str = "root";
/// Tag used for the elements of a top-level array
const ITEM_TAG: &str = "item";

// ============================================================================
// Parsing
// ============================================================================

/// An element whose end tag has not been seen yet
struct OpenElement {
    name: String,
    attributes: Map,
    children: Map,
    text: Vec<String>,
}

impl OpenElement {
    fn from_start(
        start: &BytesStart<'_>,
        source: &str,
        offset: usize,
    ) -> std::result::Result<Self, SyntaxError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| syntax(e.to_string()).at_offset(source, offset))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| syntax(e.to_string()).at_offset(source, offset))?
                .into_owned();
            attributes.insert(format!("{}{}", ATTRIBUTE_PREFIX, key), Value::String(value));
        }
        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: Vec::new(),
        })
    }

    fn into_value(self) -> Value {
        let text = self.text.join(" ");
        if self.attributes.is_empty() && self.children.is_empty() {
            return Value::String(text);
        }
        let mut map = self.attributes;
        if !text.is_empty() {
            map.insert(TEXT_KEY.to_string(), Value::String(text));
        }
        map.extend(self.children);
        Value::Object(map)
    }

    fn add_child(&mut self, name: String, value: Value) {
        // Element values are never arrays, so an existing array means repetition
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

fn syntax(message: impl Into<String>) -> SyntaxError {
    SyntaxError::new(Format::Xml, message)
}

pub(super) fn parse(text: &str) -> std::result::Result<Value, SyntaxError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            syntax(e.to_string()).at_offset(text, reader.error_position() as usize)
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(syntax("multiple root elements").at_offset(text, offset));
                }
                stack.push(OpenElement::from_start(&start, text, offset)?);
            }
            Event::Empty(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(syntax("multiple root elements").at_offset(text, offset));
                }
                let element = OpenElement::from_start(&start, text, offset)?;
                close(element, &mut stack, &mut root);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let Some(element) = stack.pop() else {
                    return Err(syntax(format!("unexpected closing tag </{}>", name))
                        .at_offset(text, offset));
                };
                if element.name != name {
                    return Err(syntax(format!(
                        "expected </{}>, found </{}>",
                        element.name, name
                    ))
                    .at_offset(text, offset));
                }
                close(element, &mut stack, &mut root);
            }
            Event::Text(content) => {
                let content = content
                    .unescape()
                    .map_err(|e| syntax(e.to_string()).at_offset(text, offset))?;
                push_text(content.trim(), &mut stack, text, offset)?;
            }
            Event::CData(content) => {
                let content = String::from_utf8_lossy(&content.into_inner()).into_owned();
                push_text(content.trim(), &mut stack, text, offset)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no data
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(syntax(format!("unclosed tag <{}>", open.name))
            .at_offset(text, reader.buffer_position() as usize));
    }

    Ok(match root {
        Some((name, value)) => Value::object([(name, value)]),
        None => Value::empty_object(),
    })
}

fn close(element: OpenElement, stack: &mut [OpenElement], root: &mut Option<(String, Value)>) {
    let name = element.name.clone();
    let value = element.into_value();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *root = Some((name, value)),
    }
}

fn push_text(
    content: &str,
    stack: &mut [OpenElement],
    source: &str,
    offset: usize,
) -> std::result::Result<(), SyntaxError> {
    if content.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(element) => {
            element.text.push(content.to_string());
            Ok(())
        }
        None => Err(syntax("text outside the root element").at_offset(source, offset)),
    }
}

// ============================================================================
// Writing
// ============================================================================

pub(super) fn stringify(value: &Value, options: StringifyOptions) -> Result<String> {
    if matches!(value, Value::Object(map) if map.is_empty()) {
        return Ok(String::new());
    }

    let mut writer = if options.minify {
        Writer::new(Vec::new())
    } else {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    };
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    match natural_root(value) {
        Some((name, child)) => write_node(&mut writer, name, child)?,
        None => {
            let body = match value {
                Value::Array(_) => Value::object([(ITEM_TAG, value.clone())]),
                other => other.clone(),
            };
            write_node(&mut writer, WRAPPER_TAG, &body)?;
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| Error::shape(Format::Xml, e.to_string()))
}

/// The single element a value maps onto, if it is `{ name: non-array }`
fn natural_root(value: &Value) -> Option<(&str, &Value)> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let (name, child) = map.get_index(0)?;
    let is_element = !name.starts_with(ATTRIBUTE_PREFIX)
        && name != TEXT_KEY
        && !matches!(child, Value::Array(_));
    is_element.then_some((name.as_str(), child))
}

fn write_node(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    let tag = xml_name(name);
    match value {
        Value::Array(items) => {
            for item in items {
                write_node(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            let mut start = BytesStart::new(tag.as_str());
            let mut text = String::new();
            let mut children = Vec::new();
            for (key, child) in map {
                match (key.strip_prefix(ATTRIBUTE_PREFIX), child.leaf_text()) {
                    (Some(attr), Some(attr_value)) => {
                        start.push_attribute((xml_name(attr).as_str(), attr_value.as_str()));
                    }
                    (None, Some(leaf)) if key == TEXT_KEY => text = leaf,
                    _ => children.push((key.as_str(), child)),
                }
            }

            if children.is_empty() && text.is_empty() {
                return emit(writer, Event::Empty(start));
            }
            emit(writer, Event::Start(start))?;
            if !text.is_empty() {
                emit(writer, Event::Text(BytesText::new(&text)))?;
            }
            for (key, child) in children {
                write_node(writer, key, child)?;
            }
            emit(writer, Event::End(BytesEnd::new(tag.as_str())))
        }
        leaf => {
            let text = leaf.leaf_text().unwrap_or_default();
            if text.is_empty() {
                return emit(writer, Event::Empty(BytesStart::new(tag.as_str())));
            }
            emit(writer, Event::Start(BytesStart::new(tag.as_str())))?;
            emit(writer, Event::Text(BytesText::new(&text)))?;
            emit(writer, Event::End(BytesEnd::new(tag.as_str())))
        }
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::shape(Format::Xml, e.to_string()))
}

/// Coerce an arbitrary key into a valid XML name
///
/// Invalid characters become `_`; names that cannot start an element get a
/// leading `_`.
fn xml_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}
