use crate::error::{Error, Result};
use crate::reader::Reader;

#[derive(Debug, Clone)]
pub(crate) enum CpInfo {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class(u16),
    String(u16),
    Fieldref { class: u16, name_and_type: u16 },
    Methodref { class: u16, name_and_type: u16 },
    InterfaceMethodref { class: u16, name_and_type: u16 },
    NameAndType { name: u16, descriptor: u16 },
    MethodHandle { kind: u8, reference: u16 },
    MethodType(u16),
    Dynamic { bootstrap: u16, name_and_type: u16 },
    InvokeDynamic { bootstrap: u16, name_and_type: u16 },
    Module(u16),
    Package(u16),
    /// Index 0 and the phantom slot after a Long/Double entry.
    Unusable,
}

impl CpInfo {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            CpInfo::Utf8(_) => "Utf8",
            CpInfo::Integer(_) => "Integer",
            CpInfo::Float(_) => "Float",
            CpInfo::Long(_) => "Long",
            CpInfo::Double(_) => "Double",
            CpInfo::Class(_) => "Class",
            CpInfo::String(_) => "String",
            CpInfo::Fieldref { .. } => "Fieldref",
            CpInfo::Methodref { .. } => "Methodref",
            CpInfo::InterfaceMethodref { .. } => "InterfaceMethodref",
            CpInfo::NameAndType { .. } => "NameAndType",
            CpInfo::MethodHandle { .. } => "MethodHandle",
            CpInfo::MethodType(_) => "MethodType",
            CpInfo::Dynamic { .. } => "Dynamic",
            CpInfo::InvokeDynamic { .. } => "InvokeDynamic",
            CpInfo::Module(_) => "Module",
            CpInfo::Package(_) => "Package",
            CpInfo::Unusable => "Unusable",
        }
    }
}

pub(crate) struct ConstantPool {
    entries: Vec<CpInfo>,
}

impl ConstantPool {
    pub(crate) fn parse(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(CpInfo::Unusable);

        while entries.len() < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let len = reader.read_u2()? as usize;
                    let bytes = reader.read_bytes(len)?;
                    CpInfo::Utf8(decode_modified_utf8(bytes)?)
                }
                3 => CpInfo::Integer(reader.read_u4()? as i32),
                4 => CpInfo::Float(f32::from_bits(reader.read_u4()?)),
                5 => {
                    let high = reader.read_u4()? as u64;
                    let low = reader.read_u4()? as u64;
                    CpInfo::Long(((high << 32) | low) as i64)
                }
                6 => {
                    let high = reader.read_u4()? as u64;
                    let low = reader.read_u4()? as u64;
                    CpInfo::Double(f64::from_bits((high << 32) | low))
                }
                7 => CpInfo::Class(reader.read_u2()?),
                8 => CpInfo::String(reader.read_u2()?),
                9 => CpInfo::Fieldref {
                    class: reader.read_u2()?,
                    name_and_type: reader.read_u2()?,
                },
                10 => CpInfo::Methodref {
                    class: reader.read_u2()?,
                    name_and_type: reader.read_u2()?,
                },
                11 => CpInfo::InterfaceMethodref {
                    class: reader.read_u2()?,
                    name_and_type: reader.read_u2()?,
                },
                12 => CpInfo::NameAndType {
                    name: reader.read_u2()?,
                    descriptor: reader.read_u2()?,
                },
                15 => CpInfo::MethodHandle {
                    kind: reader.read_u1()?,
                    reference: reader.read_u2()?,
                },
                16 => CpInfo::MethodType(reader.read_u2()?),
                17 => CpInfo::Dynamic {
                    bootstrap: reader.read_u2()?,
                    name_and_type: reader.read_u2()?,
                },
                18 => CpInfo::InvokeDynamic {
                    bootstrap: reader.read_u2()?,
                    name_and_type: reader.read_u2()?,
                },
                19 => CpInfo::Module(reader.read_u2()?),
                20 => CpInfo::Package(reader.read_u2()?),
                other => return Err(Error::InvalidConstantPoolTag(other)),
            };

            let two_slots = matches!(entry, CpInfo::Long(_) | CpInfo::Double(_));
            entries.push(entry);
            if two_slots {
                if entries.len() == count {
                    return Err(Error::InvalidConstantPoolIndex(count as u16));
                }
                entries.push(CpInfo::Unusable);
            }
        }

        Ok(Self { entries })
    }

    pub(crate) fn get(&self, index: u16) -> Result<&CpInfo> {
        match self.entries.get(index as usize) {
            Some(CpInfo::Unusable) | None => Err(Error::InvalidConstantPoolIndex(index)),
            Some(entry) => Ok(entry),
        }
    }

    pub(crate) fn get_utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            CpInfo::Utf8(s) => Ok(s),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Utf8",
                found: other.kind(),
            }),
        }
    }

    pub(crate) fn get_class_name(&self, index: u16) -> Result<String> {
        match self.get(index)? {
            CpInfo::Class(name_index) => Ok(self.get_utf8(*name_index)?.to_string()),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Class",
                found: other.kind(),
            }),
        }
    }

}

/// Decode the JVM's modified UTF-8: no embedded NUL bytes, NUL encoded as
/// `C0 80`, and supplementary characters stored as surrogate pairs of
/// 3-byte sequences.
fn decode_modified_utf8(bytes: &[u8]) -> Result<String> {
    fn continuation(byte: Option<&u8>) -> Result<u32> {
        match byte {
            Some(&b) if b & 0xC0 == 0x80 => Ok(u32::from(b & 0x3F)),
            _ => Err(Error::InvalidModifiedUtf8),
        }
    }

    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let a = bytes[i];
        if a != 0 && a < 0x80 {
            out.push(a as char);
            i += 1;
        } else if a & 0xE0 == 0xC0 {
            let b = continuation(bytes.get(i + 1))?;
            let cp = (u32::from(a & 0x1F) << 6) | b;
            out.push(char::from_u32(cp).ok_or(Error::InvalidModifiedUtf8)?);
            i += 2;
        } else if a & 0xF0 == 0xE0 {
            let b = continuation(bytes.get(i + 1))?;
            let c = continuation(bytes.get(i + 2))?;
            let unit = (u32::from(a & 0x0F) << 12) | (b << 6) | c;
            i += 3;
            if (0xD800..=0xDBFF).contains(&unit) {
                // High surrogate: the low half must follow as another
                // 3-byte sequence.
                let d = *bytes.get(i).ok_or(Error::InvalidModifiedUtf8)?;
                if d & 0xF0 != 0xE0 {
                    return Err(Error::InvalidModifiedUtf8);
                }
                let e = continuation(bytes.get(i + 1))?;
                let f = continuation(bytes.get(i + 2))?;
                let low = (u32::from(d & 0x0F) << 12) | (e << 6) | f;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(Error::InvalidModifiedUtf8);
                }
                let cp = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                out.push(char::from_u32(cp).ok_or(Error::InvalidModifiedUtf8)?);
                i += 3;
            } else if (0xDC00..=0xDFFF).contains(&unit) {
                return Err(Error::InvalidModifiedUtf8);
            } else {
                out.push(char::from_u32(unit).ok_or(Error::InvalidModifiedUtf8)?);
            }
        } else {
            return Err(Error::InvalidModifiedUtf8);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ascii_and_two_byte_sequences() {
        assert_eq!(decode_modified_utf8(b"hello").unwrap(), "hello");
        // NUL is encoded as C0 80 in modified UTF-8.
        assert_eq!(decode_modified_utf8(&[0xC0, 0x80]).unwrap(), "\0");
        assert_eq!(decode_modified_utf8(&[0xC3, 0xA9]).unwrap(), "\u{e9}");
    }

    #[test]
    fn decodes_surrogate_pairs() {
        // U+1F600 as a modified-UTF-8 surrogate pair.
        let bytes = [0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80];
        assert_eq!(decode_modified_utf8(&bytes).unwrap(), "\u{1f600}");
    }

    #[test]
    fn rejects_raw_nul_and_lone_surrogates() {
        assert!(decode_modified_utf8(&[0x00]).is_err());
        assert!(decode_modified_utf8(&[0xED, 0xA0, 0xBD]).is_err());
        assert!(decode_modified_utf8(&[0xED, 0xB8, 0x80]).is_err());
    }

    #[test]
    fn long_entries_occupy_two_slots() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&4u16.to_be_bytes()); // count
        bytes.push(5); // CONSTANT_Long
        bytes.extend_from_slice(&0x1_0000_0001u64.to_be_bytes());
        bytes.push(1); // CONSTANT_Utf8
        bytes.extend_from_slice(&2u16.to_be_bytes());
        bytes.extend_from_slice(b"ok");

        let mut reader = Reader::new(&bytes);
        let cp = ConstantPool::parse(&mut reader).unwrap();
        assert!(matches!(cp.get(1), Ok(CpInfo::Long(0x1_0000_0001))));
        assert!(cp.get(2).is_err());
        assert_eq!(cp.get_utf8(3).unwrap(), "ok");
    }
}
