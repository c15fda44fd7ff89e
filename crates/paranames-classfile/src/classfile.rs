use crate::annotation::Annotation;
use crate::constant_pool::ConstantPool;
use crate::error::{Error, Result};
use crate::reader::Reader;

pub const ACC_STATIC: u16 = 0x0008;

#[derive(Debug, Clone)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub access_flags: u16,
    pub this_class: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    /// Entries of the `MethodParameters` attribute, empty when absent.
    pub parameters: Vec<MethodParameter>,
    /// Entries of the `LocalVariableTable` debug attribute, empty when
    /// the method has no `Code` attribute or was compiled without `-g`.
    pub local_variables: Vec<LocalVariable>,
    /// Per-parameter annotations, visible then invisible; each outer
    /// vector is either empty or has one entry per declared parameter.
    pub visible_parameter_annotations: Vec<Vec<Annotation>>,
    pub invisible_parameter_annotations: Vec<Vec<Annotation>>,
}

impl MethodInfo {
    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    /// Whether the class file recorded any parameter-name metadata for
    /// this method.
    pub fn has_debug_metadata(&self) -> bool {
        !self.parameters.is_empty() || !self.local_variables.is_empty()
    }
}

/// One entry of the `MethodParameters` attribute. The name is optional:
/// a zero name index marks a parameter with no recorded name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParameter {
    pub name: Option<String>,
    pub access_flags: u16,
}

/// One entry of a `LocalVariableTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    pub start_pc: u16,
    pub length: u16,
    pub name: String,
    pub descriptor: String,
    pub slot: u16,
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let magic = reader.read_u4()?;
        if magic != 0xCAFEBABE {
            return Err(Error::InvalidMagic(magic));
        }

        let minor_version = reader.read_u2()?;
        let major_version = reader.read_u2()?;
        let cp = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.read_u2()?;
        let this_class = cp.get_class_name(reader.read_u2()?)?;
        let super_class_index = reader.read_u2()?;
        let super_class = if super_class_index == 0 {
            None
        } else {
            Some(cp.get_class_name(super_class_index)?)
        };

        let interfaces_count = reader.read_u2()? as usize;
        let mut interfaces = Vec::with_capacity(interfaces_count);
        for _ in 0..interfaces_count {
            interfaces.push(cp.get_class_name(reader.read_u2()?)?);
        }

        let fields_count = reader.read_u2()? as usize;
        let mut fields = Vec::with_capacity(fields_count);
        for _ in 0..fields_count {
            fields.push(parse_field(&mut reader, &cp)?);
        }

        let methods_count = reader.read_u2()? as usize;
        let mut methods = Vec::with_capacity(methods_count);
        for _ in 0..methods_count {
            methods.push(parse_method(&mut reader, &cp)?);
        }

        skip_attributes(&mut reader)?;
        reader.ensure_empty()?;

        Ok(Self {
            minor_version,
            major_version,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
        })
    }
}

fn parse_field(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<FieldInfo> {
    let access_flags = reader.read_u2()?;
    let name = cp.get_utf8(reader.read_u2()?)?.to_string();
    let descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();
    skip_attributes(reader)?;
    Ok(FieldInfo {
        access_flags,
        name,
        descriptor,
    })
}

fn parse_method(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<MethodInfo> {
    let access_flags = reader.read_u2()?;
    let name = cp.get_utf8(reader.read_u2()?)?.to_string();
    let descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();

    let mut method = MethodInfo {
        access_flags,
        name,
        descriptor,
        parameters: Vec::new(),
        local_variables: Vec::new(),
        visible_parameter_annotations: Vec::new(),
        invisible_parameter_annotations: Vec::new(),
    };

    let attributes_count = reader.read_u2()? as usize;
    for _ in 0..attributes_count {
        let name_index = reader.read_u2()?;
        let length = reader.read_u4()? as usize;
        let info = reader.read_bytes(length)?;
        let attr_name = cp.get_utf8(name_index)?;

        let mut sub = Reader::new(info);
        match attr_name {
            "MethodParameters" => {
                let count = sub.read_u1()? as usize;
                let mut parameters = Vec::with_capacity(count);
                for _ in 0..count {
                    let param_name_index = sub.read_u2()?;
                    let param_name = if param_name_index == 0 {
                        None
                    } else {
                        Some(cp.get_utf8(param_name_index)?.to_string())
                    };
                    parameters.push(MethodParameter {
                        name: param_name,
                        access_flags: sub.read_u2()?,
                    });
                }
                sub.ensure_empty()?;
                method.parameters = parameters;
            }
            "Code" => {
                method
                    .local_variables
                    .extend(parse_code_local_variables(&mut sub, cp)?);
            }
            "RuntimeVisibleParameterAnnotations" => {
                method.visible_parameter_annotations = parse_parameter_annotations(&mut sub, cp)?;
                sub.ensure_empty()?;
            }
            "RuntimeInvisibleParameterAnnotations" => {
                method.invisible_parameter_annotations =
                    parse_parameter_annotations(&mut sub, cp)?;
                sub.ensure_empty()?;
            }
            _ => {
                // Unknown attribute: intentionally skipped.
            }
        }
    }

    Ok(method)
}

/// Walk a `Code` attribute and collect its `LocalVariableTable` entries,
/// skipping the bytecode itself.
fn parse_code_local_variables(
    reader: &mut Reader<'_>,
    cp: &ConstantPool,
) -> Result<Vec<LocalVariable>> {
    reader.read_u2()?; // max_stack
    reader.read_u2()?; // max_locals
    let code_length = reader.read_u4()? as usize;
    reader.skip(code_length)?;
    let exception_table_length = reader.read_u2()? as usize;
    reader.skip(exception_table_length * 8)?;

    let mut variables = Vec::new();
    let attributes_count = reader.read_u2()? as usize;
    for _ in 0..attributes_count {
        let name_index = reader.read_u2()?;
        let length = reader.read_u4()? as usize;
        let info = reader.read_bytes(length)?;

        if cp.get_utf8(name_index)? != "LocalVariableTable" {
            continue;
        }
        let mut sub = Reader::new(info);
        let entries = sub.read_u2()? as usize;
        for _ in 0..entries {
            let start_pc = sub.read_u2()?;
            let length = sub.read_u2()?;
            let name = cp.get_utf8(sub.read_u2()?)?.to_string();
            let descriptor = cp.get_utf8(sub.read_u2()?)?.to_string();
            let slot = sub.read_u2()?;
            variables.push(LocalVariable {
                start_pc,
                length,
                name,
                descriptor,
                slot,
            });
        }
        sub.ensure_empty()?;
    }
    reader.ensure_empty()?;
    Ok(variables)
}

fn parse_parameter_annotations(
    reader: &mut Reader<'_>,
    cp: &ConstantPool,
) -> Result<Vec<Vec<Annotation>>> {
    let num_parameters = reader.read_u1()? as usize;
    let mut per_parameter = Vec::with_capacity(num_parameters);
    for _ in 0..num_parameters {
        let num_annotations = reader.read_u2()? as usize;
        let mut annotations = Vec::with_capacity(num_annotations);
        for _ in 0..num_annotations {
            annotations.push(Annotation::parse(reader, cp)?);
        }
        per_parameter.push(annotations);
    }
    Ok(per_parameter)
}

fn skip_attributes(reader: &mut Reader<'_>) -> Result<()> {
    let attributes_count = reader.read_u2()? as usize;
    for _ in 0..attributes_count {
        reader.read_u2()?; // attribute_name_index
        let length = reader.read_u4()? as usize;
        reader.skip(length)?;
    }
    Ok(())
}
