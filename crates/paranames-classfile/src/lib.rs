#![forbid(unsafe_code)]

//! Minimal JVM class file reader.
//!
//! Parses just enough of the class file format to recover member
//! signatures and the metadata that records formal parameter names:
//! the `MethodParameters` attribute, the `LocalVariableTable` debug
//! attribute inside `Code`, and per-parameter runtime annotations.

mod annotation;
mod classfile;
mod constant_pool;
mod descriptor;
mod error;
mod reader;

pub use crate::annotation::{Annotation, ConstValue, ElementValue};
pub use crate::classfile::{
    ClassFile, FieldInfo, LocalVariable, MethodInfo, MethodParameter, ACC_STATIC,
};
pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
