//! Value types - owned and view variants

use std::fmt;

use super::{Color, DataContainer, DateTime, Duration, Point};

/// Value type tags
///
/// The discriminant doubles as the one-byte tag in the binary format, the
/// name as the `type` attribute in XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueTag {
    Int16 = 0x01,
    Int32 = 0x02,
    Int64 = 0x03,
    UInt16 = 0x04,
    UInt32 = 0x05,
    UInt64 = 0x06,
    Float32 = 0x07,
    Float64 = 0x08,
    Bool = 0x09,
    String = 0x0A,
    DateTime = 0x0B,
    Duration = 0x0C,
    Point = 0x0D,
    Color = 0x0E,
    Container = 0x0F,
}

impl ValueTag {
    pub const ALL: [ValueTag; 15] = [
        ValueTag::Int16,
        ValueTag::Int32,
        ValueTag::Int64,
        ValueTag::UInt16,
        ValueTag::UInt32,
        ValueTag::UInt64,
        ValueTag::Float32,
        ValueTag::Float64,
        ValueTag::Bool,
        ValueTag::String,
        ValueTag::DateTime,
        ValueTag::Duration,
        ValueTag::Point,
        ValueTag::Color,
        ValueTag::Container,
    ];

    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(ValueTag::Int16),
            0x02 => Some(ValueTag::Int32),
            0x03 => Some(ValueTag::Int64),
            0x04 => Some(ValueTag::UInt16),
            0x05 => Some(ValueTag::UInt32),
            0x06 => Some(ValueTag::UInt64),
            0x07 => Some(ValueTag::Float32),
            0x08 => Some(ValueTag::Float64),
            0x09 => Some(ValueTag::Bool),
            0x0A => Some(ValueTag::String),
            0x0B => Some(ValueTag::DateTime),
            0x0C => Some(ValueTag::Duration),
            0x0D => Some(ValueTag::Point),
            0x0E => Some(ValueTag::Color),
            0x0F => Some(ValueTag::Container),
            _ => None,
        }
    }

    /// Stable kind name, used as the XML `type` attribute
    pub fn name(self) -> &'static str {
        match self {
            ValueTag::Int16 => "Int16",
            ValueTag::Int32 => "Int32",
            ValueTag::Int64 => "Int64",
            ValueTag::UInt16 => "UInt16",
            ValueTag::UInt32 => "UInt32",
            ValueTag::UInt64 => "UInt64",
            ValueTag::Float32 => "Float32",
            ValueTag::Float64 => "Float64",
            ValueTag::Bool => "Bool",
            ValueTag::String => "String",
            ValueTag::DateTime => "DateTime",
            ValueTag::Duration => "Duration",
            ValueTag::Point => "Point",
            ValueTag::Color => "Color",
            ValueTag::Container => "Container",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owned container value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    String(String),
    DateTime(DateTime),
    Duration(Duration),
    Point(Point),
    Color(Color),
    Container(DataContainer),
}

impl Value {
    /// Get the tag for this value
    pub fn tag(&self) -> ValueTag {
        match self {
            Value::Int16(_) => ValueTag::Int16,
            Value::Int32(_) => ValueTag::Int32,
            Value::Int64(_) => ValueTag::Int64,
            Value::UInt16(_) => ValueTag::UInt16,
            Value::UInt32(_) => ValueTag::UInt32,
            Value::UInt64(_) => ValueTag::UInt64,
            Value::Float32(_) => ValueTag::Float32,
            Value::Float64(_) => ValueTag::Float64,
            Value::Bool(_) => ValueTag::Bool,
            Value::String(_) => ValueTag::String,
            Value::DateTime(_) => ValueTag::DateTime,
            Value::Duration(_) => ValueTag::Duration,
            Value::Point(_) => ValueTag::Point,
            Value::Color(_) => ValueTag::Color,
            Value::Container(_) => ValueTag::Container,
        }
    }

    /// Copy out the payload if this value is exactly of kind `T`
    pub fn extract<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as nested container
    pub fn as_container(&self) -> Option<&DataContainer> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut DataContainer> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Native types that map one-to-one onto a value kind.
///
/// Implemented only for the closed set of kinds; extraction never converts
/// between kinds, so an `Int32` value is not readable as `i64`.
pub trait FromValue: sealed::Sealed + Sized {
    const TAG: ValueTag;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! value_kind {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl sealed::Sealed for $ty {}

            impl FromValue for $ty {
                const TAG: ValueTag = ValueTag::$variant;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

value_kind! {
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    String => String,
    DateTime => DateTime,
    Duration => Duration,
    Point => Point,
    Color => Color,
    DataContainer => Container,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

/// Parsed container - keys and strings borrow from the underlying buffer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContainerView<'a> {
    pub name: &'a str,
    pub entries: Vec<(&'a str, ValueView<'a>)>,
}

impl<'a> ContainerView<'a> {
    /// Convert to an owned container
    pub fn to_owned(&self) -> DataContainer {
        let mut container = DataContainer::with_name(self.name);
        for (key, value) in &self.entries {
            container.put(*key, value.to_owned());
        }
        container
    }

    /// Get a nested value by dot-separated path (e.g., "window.size")
    pub fn get(&self, path: &str) -> Option<&ValueView<'a>> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.entries.iter().find(|(k, _)| *k == first).map(|(_, v)| v)?;
        for key in segments {
            match current {
                ValueView::Container(inner) => {
                    current = inner.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)?;
                }
                _ => return None,
            }
        }
        Some(current)
    }
}

/// Parsed value - references string data in the underlying buffer (zero-copy)
#[derive(Debug, Clone, PartialEq)]
pub enum ValueView<'a> {
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    String(&'a str),
    DateTime(DateTime),
    Duration(Duration),
    Point(Point),
    Color(Color),
    Container(ContainerView<'a>),
}

impl<'a> ValueView<'a> {
    /// Convert to owned Value
    pub fn to_owned(&self) -> Value {
        match self {
            ValueView::Int16(v) => Value::Int16(*v),
            ValueView::Int32(v) => Value::Int32(*v),
            ValueView::Int64(v) => Value::Int64(*v),
            ValueView::UInt16(v) => Value::UInt16(*v),
            ValueView::UInt32(v) => Value::UInt32(*v),
            ValueView::UInt64(v) => Value::UInt64(*v),
            ValueView::Float32(v) => Value::Float32(*v),
            ValueView::Float64(v) => Value::Float64(*v),
            ValueView::Bool(v) => Value::Bool(*v),
            ValueView::String(s) => Value::String((*s).to_string()),
            ValueView::DateTime(v) => Value::DateTime(*v),
            ValueView::Duration(v) => Value::Duration(*v),
            ValueView::Point(v) => Value::Point(*v),
            ValueView::Color(v) => Value::Color(*v),
            ValueView::Container(c) => Value::Container(c.to_owned()),
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            ValueView::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as nested container
    pub fn as_container(&self) -> Option<&ContainerView<'a>> {
        match self {
            ValueView::Container(c) => Some(c),
            _ => None,
        }
    }
}
