//! XML deserialization

use super::{
    COLOR_ATTRS, DURATION_ATTRS, ENTRY_ELEMENT, KEY_ATTR, NAME_ATTR, POINT_ATTRS, ROOT_ELEMENT,
    TYPE_ATTR,
};
use crate::error::XmlError;
use crate::parser::MAX_DEPTH;
use crate::types::{Color, DataContainer, DateTime, Duration, Point, Value, ValueTag};
use log::trace;
use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use std::str::FromStr;

/// Parse an XML document into a container
pub fn from_str(xml: &str) -> Result<DataContainer, XmlError> {
    trace!("xml::from_str: {} bytes", xml.len());

    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut tree = TreeBuilder::default();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(parse_error)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                tree.open(e, is_empty)?;
            }
            Event::End(_) => tree.close()?,
            Event::Text(e) => {
                let text = e.decode().map_err(parse_error)?;
                tree.text(&text)?;
            }
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(parse_error)?;
                tree.text(&resolve_entity(&raw)?)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(parse_error)?;
                tree.text(text)?;
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctypes
            _ => {}
        }
        buf.clear();
    }

    tree.finish()
}

/// Container element still waiting for its end tag
struct OpenContainer {
    /// Key in the parent; `None` for the root
    key: Option<String>,
    container: DataContainer,
}

/// Entry element whose text is still being collected
struct OpenScalar {
    key: String,
    kind: ValueTag,
    /// Already decoded from attributes for Duration, Point and Color
    value: Option<Value>,
    text: String,
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<OpenContainer>,
    scalar: Option<OpenScalar>,
    root: Option<DataContainer>,
}

impl TreeBuilder {
    fn open(&mut self, e: &BytesStart<'_>, is_empty: bool) -> Result<(), XmlError> {
        let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        if self.root.is_some() || self.scalar.is_some() {
            return Err(XmlError::UnexpectedElement { name: element });
        }
        let attrs = collect_attributes(e)?;

        if self.stack.is_empty() {
            if element != ROOT_ELEMENT {
                return Err(XmlError::UnexpectedElement { name: element });
            }
            let name = find_attribute(&attrs, NAME_ATTR).unwrap_or_default();
            let open = OpenContainer {
                key: None,
                container: DataContainer::with_name(name),
            };
            if is_empty {
                self.close_container(open);
            } else {
                self.stack.push(open);
            }
            return Ok(());
        }

        if element != ENTRY_ELEMENT {
            return Err(XmlError::UnexpectedElement { name: element });
        }
        let key = require_attribute(&attrs, KEY_ATTR)?;
        let type_name = require_attribute(&attrs, TYPE_ATTR)?;
        let kind = ValueTag::from_name(type_name).ok_or_else(|| XmlError::UnknownType {
            name: type_name.to_string(),
        })?;

        if kind == ValueTag::Container {
            if self.stack.len() > MAX_DEPTH {
                return Err(XmlError::Parse(format!(
                    "container nesting exceeded (max={MAX_DEPTH})"
                )));
            }
            let name = find_attribute(&attrs, NAME_ATTR).unwrap_or_default();
            let open = OpenContainer {
                key: Some(key.to_string()),
                container: DataContainer::with_name(name),
            };
            if is_empty {
                self.close_container(open);
            } else {
                self.stack.push(open);
            }
            return Ok(());
        }

        let open = OpenScalar {
            key: key.to_string(),
            kind,
            value: attribute_value(key, kind, &attrs)?,
            text: String::new(),
        };
        if is_empty {
            self.close_scalar(open)
        } else {
            self.scalar = Some(open);
            Ok(())
        }
    }

    fn text(&mut self, text: &str) -> Result<(), XmlError> {
        match &mut self.scalar {
            Some(open) => open.text.push_str(text),
            None if text.trim().is_empty() => {}
            None => {
                return Err(XmlError::Parse(format!(
                    "unexpected text outside a value: {:?}",
                    text.trim()
                )));
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), XmlError> {
        if let Some(open) = self.scalar.take() {
            return self.close_scalar(open);
        }
        // unmatched end tags are rejected by the tokenizer
        if let Some(open) = self.stack.pop() {
            self.close_container(open);
        }
        Ok(())
    }

    fn close_scalar(&mut self, open: OpenScalar) -> Result<(), XmlError> {
        let value = match open.value {
            Some(value) => value,
            None => text_value(&open.key, open.kind, &open.text)?,
        };
        if let Some(parent) = self.stack.last_mut() {
            parent.container.put(open.key, value);
        }
        Ok(())
    }

    fn close_container(&mut self, open: OpenContainer) {
        match (open.key, self.stack.last_mut()) {
            (Some(key), Some(parent)) => parent.container.put(key, open.container),
            _ => self.root = Some(open.container),
        }
    }

    fn finish(self) -> Result<DataContainer, XmlError> {
        if !self.stack.is_empty() || self.scalar.is_some() {
            return Err(XmlError::UnexpectedEof);
        }
        self.root.ok_or(XmlError::MissingRoot)
    }
}

fn parse_error(e: impl std::fmt::Display) -> XmlError {
    XmlError::Parse(e.to_string())
}

fn collect_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, XmlError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(parse_error)?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(parse_error)?;
        let value = attr.unescape_value().map_err(parse_error)?;
        attrs.push((key.to_string(), value.into_owned()));
    }
    Ok(attrs)
}

fn find_attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn require_attribute<'a>(
    attrs: &'a [(String, String)],
    name: &'static str,
) -> Result<&'a str, XmlError> {
    find_attribute(attrs, name).ok_or(XmlError::MissingAttribute {
        element: ENTRY_ELEMENT,
        attribute: name,
    })
}

/// Decode the attribute-carried kinds; `None` for kinds stored as text
fn attribute_value(
    key: &str,
    kind: ValueTag,
    attrs: &[(String, String)],
) -> Result<Option<Value>, XmlError> {
    let value = match kind {
        ValueTag::Duration => {
            let [days, hours, minutes, seconds, milliseconds] =
                numeric_attributes(key, kind, attrs, DURATION_ATTRS)?;
            Value::Duration(Duration::new(days, hours, minutes, seconds, milliseconds))
        }
        ValueTag::Point => {
            let [x, y] = numeric_attributes(key, kind, attrs, POINT_ATTRS)?;
            Value::Point(Point::new(x, y))
        }
        ValueTag::Color => {
            let [r, g, b] = numeric_attributes(key, kind, attrs, COLOR_ATTRS)?;
            Value::Color(Color::new(r, g, b))
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn numeric_attributes<T: FromStr + Default + Copy, const N: usize>(
    key: &str,
    kind: ValueTag,
    attrs: &[(String, String)],
    names: [&'static str; N],
) -> Result<[T; N], XmlError> {
    let mut out = [T::default(); N];
    for (slot, name) in out.iter_mut().zip(names) {
        let text = require_attribute(attrs, name)?;
        *slot = parse_text(key, kind, text)?;
    }
    Ok(out)
}

fn parse_text<T: FromStr>(key: &str, kind: ValueTag, text: &str) -> Result<T, XmlError> {
    text.trim()
        .parse()
        .map_err(|_| invalid_value(key, kind, text))
}

fn invalid_value(key: &str, kind: ValueTag, text: &str) -> XmlError {
    XmlError::InvalidValue {
        key: key.to_string(),
        kind,
        text: text.to_string(),
    }
}

/// Decode the element text of a scalar kind
fn text_value(key: &str, kind: ValueTag, text: &str) -> Result<Value, XmlError> {
    let value = match kind {
        ValueTag::Int16 => Value::Int16(parse_text(key, kind, text)?),
        ValueTag::Int32 => Value::Int32(parse_text(key, kind, text)?),
        ValueTag::Int64 => Value::Int64(parse_text(key, kind, text)?),
        ValueTag::UInt16 => Value::UInt16(parse_text(key, kind, text)?),
        ValueTag::UInt32 => Value::UInt32(parse_text(key, kind, text)?),
        ValueTag::UInt64 => Value::UInt64(parse_text(key, kind, text)?),
        ValueTag::Float32 => Value::Float32(parse_text(key, kind, text)?),
        ValueTag::Float64 => Value::Float64(parse_text(key, kind, text)?),
        ValueTag::Bool => Value::Bool(parse_text(key, kind, text)?),
        ValueTag::String => Value::String(text.to_string()),
        ValueTag::DateTime => match DateTime::parse(text) {
            Some(dt) => Value::DateTime(dt),
            None => return Err(invalid_value(key, kind, text)),
        },
        // decoded from attributes or child elements, never from text
        ValueTag::Duration | ValueTag::Point | ValueTag::Color | ValueTag::Container => {
            return Err(invalid_value(key, kind, text));
        }
    };
    Ok(value)
}

/// Resolve a general entity reference reported outside of attribute values
fn resolve_entity(raw: &str) -> Result<String, XmlError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
        } else {
            rest.parse::<u32>()
        }
        .map_err(|_| XmlError::Parse(format!("invalid character reference: &{raw};")))?;

        let ch = char::from_u32(code)
            .ok_or_else(|| XmlError::Parse(format!("invalid unicode scalar: {code}")))?;
        return Ok(ch.to_string());
    }

    Err(XmlError::Parse(format!("unknown entity: &{raw};")))
}
