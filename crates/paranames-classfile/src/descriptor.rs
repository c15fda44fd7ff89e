use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    pub fn source_name(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Base(BaseType),
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Render the type the way it is written in Java source:
    /// `int`, `java.lang.String`, `byte[][]`.
    pub fn source_name(&self) -> String {
        match self {
            FieldType::Base(base) => base.source_name().to_string(),
            FieldType::Object(internal) => internal.replace('/', "."),
            FieldType::Array(component) => format!("{}[]", component.source_name()),
        }
    }

    /// Number of local-variable slots a value of this type occupies.
    pub fn slot_width(&self) -> u16 {
        match self {
            FieldType::Base(BaseType::Long | BaseType::Double) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: ReturnType,
}

impl MethodDescriptor {
    /// The local-variable slot of each formal parameter.
    ///
    /// Instance methods reserve slot 0 for `this`; `long` and `double`
    /// parameters occupy two slots.
    pub fn parameter_slots(&self, is_static: bool) -> Vec<u16> {
        let mut slot = if is_static { 0 } else { 1 };
        self.params
            .iter()
            .map(|param| {
                let current = slot;
                slot += param.slot_width();
                current
            })
            .collect()
    }
}

pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let (ty, rest) = parse_field_type(desc)
        .ok_or_else(|| Error::InvalidDescriptor(desc.to_string()))?;
    if !rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let invalid = || Error::InvalidDescriptor(desc.to_string());

    let mut rest = desc.strip_prefix('(').ok_or_else(invalid)?;
    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            rest = after;
            break;
        }
        let (param, after) = parse_field_type(rest).ok_or_else(invalid)?;
        params.push(param);
        rest = after;
    }

    let return_type = if let Some(after) = rest.strip_prefix('V') {
        rest = after;
        ReturnType::Void
    } else {
        let (ty, after) = parse_field_type(rest).ok_or_else(invalid)?;
        rest = after;
        ReturnType::Type(ty)
    };

    if !rest.is_empty() {
        return Err(invalid());
    }
    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

fn parse_field_type(input: &str) -> Option<(FieldType, &str)> {
    let first = *input.as_bytes().first()?;
    match first {
        b'B' => Some((FieldType::Base(BaseType::Byte), &input[1..])),
        b'C' => Some((FieldType::Base(BaseType::Char), &input[1..])),
        b'D' => Some((FieldType::Base(BaseType::Double), &input[1..])),
        b'F' => Some((FieldType::Base(BaseType::Float), &input[1..])),
        b'I' => Some((FieldType::Base(BaseType::Int), &input[1..])),
        b'J' => Some((FieldType::Base(BaseType::Long), &input[1..])),
        b'S' => Some((FieldType::Base(BaseType::Short), &input[1..])),
        b'Z' => Some((FieldType::Base(BaseType::Boolean), &input[1..])),
        b'L' => {
            let end = input.find(';')?;
            let name = input[1..end].to_string();
            Some((FieldType::Object(name), &input[end + 1..]))
        }
        b'[' => {
            let (component, rest) = parse_field_type(&input[1..])?;
            Some((FieldType::Array(Box::new(component)), rest))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_descriptor_primitives_and_arrays() {
        assert_eq!(
            parse_field_descriptor("I").unwrap(),
            FieldType::Base(BaseType::Int)
        );
        assert_eq!(
            parse_field_descriptor("[[Ljava/lang/String;").unwrap(),
            FieldType::Array(Box::new(FieldType::Array(Box::new(FieldType::Object(
                "java/lang/String".to_string()
            )))))
        );
        assert!(parse_field_descriptor("II").is_err());
        assert!(parse_field_descriptor("Ljava/lang/String").is_err());
    }

    #[test]
    fn parse_method_descriptor_basic() {
        let desc = parse_method_descriptor("(ILjava/lang/String;)[I").unwrap();
        assert_eq!(
            desc.params,
            vec![
                FieldType::Base(BaseType::Int),
                FieldType::Object("java/lang/String".to_string())
            ]
        );
        assert_eq!(
            desc.return_type,
            ReturnType::Type(FieldType::Array(Box::new(FieldType::Base(BaseType::Int))))
        );
        assert!(parse_method_descriptor("()").is_err());
        assert!(parse_method_descriptor("(I").is_err());
    }

    #[test]
    fn source_names_match_java_spelling() {
        let desc = parse_method_descriptor("(J[BLjava/util/List;)V").unwrap();
        let names: Vec<String> = desc.params.iter().map(FieldType::source_name).collect();
        assert_eq!(names, ["long", "byte[]", "java.util.List"]);
    }

    #[test]
    fn parameter_slots_account_for_this_and_wide_types() {
        let desc = parse_method_descriptor("(JILjava/lang/String;D)V").unwrap();
        assert_eq!(desc.parameter_slots(true), [0, 2, 3, 4]);
        assert_eq!(desc.parameter_slots(false), [1, 3, 4, 5]);
    }
}
