use crate::constant_pool::{ConstantPool, CpInfo};
use crate::error::{Error, Result};
use crate::reader::Reader;

/// A runtime-visible or -invisible annotation as stored in the class file.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Field descriptor of the annotation type, e.g. `Ljavax/inject/Named;`.
    pub type_descriptor: String,
    pub elements: Vec<(String, ElementValue)>,
}

impl Annotation {
    pub(crate) fn parse(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<Self> {
        let type_descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();

        let pairs = reader.read_u2()? as usize;
        let mut elements = Vec::with_capacity(pairs);
        for _ in 0..pairs {
            let name = cp.get_utf8(reader.read_u2()?)?.to_string();
            elements.push((name, ElementValue::parse(reader, cp)?));
        }

        Ok(Self {
            type_descriptor,
            elements,
        })
    }

    /// Internal name of the annotation type (`javax/inject/Named`), if the
    /// descriptor has the expected `L...;` shape.
    pub fn type_internal_name(&self) -> Option<&str> {
        self.type_descriptor
            .strip_prefix('L')
            .and_then(|rest| rest.strip_suffix(';'))
    }

    /// The value of a named element, if present and a string constant.
    pub fn string_element(&self, name: &str) -> Option<&str> {
        self.elements.iter().find_map(|(element, value)| {
            if element != name {
                return None;
            }
            match value {
                ElementValue::Const(ConstValue::String(s)) => Some(s.as_str()),
                _ => None,
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Const(ConstValue),
    Enum {
        type_descriptor: String,
        const_name: String,
    },
    Class(String),
    Annotation(Box<Annotation>),
    Array(Vec<ElementValue>),
}

impl ElementValue {
    fn parse(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<Self> {
        let tag = reader.read_u1()? as char;
        match tag {
            'B' | 'C' | 'I' | 'S' | 'Z' => {
                let value = expect_integer(cp, reader.read_u2()?)?;
                let cv = match tag {
                    'B' => ConstValue::Byte(value as i8),
                    'C' => ConstValue::Char(
                        char::from_u32(value as u32)
                            .ok_or(Error::MalformedAttribute("annotation"))?,
                    ),
                    'I' => ConstValue::Int(value),
                    'S' => ConstValue::Short(value as i16),
                    'Z' => ConstValue::Boolean(value != 0),
                    _ => unreachable!(),
                };
                Ok(ElementValue::Const(cv))
            }
            'D' => {
                let index = reader.read_u2()?;
                match cp.get(index)? {
                    CpInfo::Double(v) => Ok(ElementValue::Const(ConstValue::Double(*v))),
                    other => Err(mismatch(index, "Double", other)),
                }
            }
            'F' => {
                let index = reader.read_u2()?;
                match cp.get(index)? {
                    CpInfo::Float(v) => Ok(ElementValue::Const(ConstValue::Float(*v))),
                    other => Err(mismatch(index, "Float", other)),
                }
            }
            'J' => {
                let index = reader.read_u2()?;
                match cp.get(index)? {
                    CpInfo::Long(v) => Ok(ElementValue::Const(ConstValue::Long(*v))),
                    other => Err(mismatch(index, "Long", other)),
                }
            }
            's' => {
                let value = cp.get_utf8(reader.read_u2()?)?.to_string();
                Ok(ElementValue::Const(ConstValue::String(value)))
            }
            'e' => Ok(ElementValue::Enum {
                type_descriptor: cp.get_utf8(reader.read_u2()?)?.to_string(),
                const_name: cp.get_utf8(reader.read_u2()?)?.to_string(),
            }),
            'c' => Ok(ElementValue::Class(
                cp.get_utf8(reader.read_u2()?)?.to_string(),
            )),
            '@' => Ok(ElementValue::Annotation(Box::new(Annotation::parse(
                reader, cp,
            )?))),
            '[' => {
                let len = reader.read_u2()? as usize;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(ElementValue::parse(reader, cp)?);
                }
                Ok(ElementValue::Array(values))
            }
            _ => Err(Error::MalformedAttribute("annotation")),
        }
    }
}

fn expect_integer(cp: &ConstantPool, index: u16) -> Result<i32> {
    match cp.get(index)? {
        CpInfo::Integer(v) => Ok(*v),
        other => Err(mismatch(index, "Integer", other)),
    }
}

fn mismatch(index: u16, expected: &'static str, found: &CpInfo) -> Error {
    Error::ConstantPoolTypeMismatch {
        index,
        expected,
        found: found.kind(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}
