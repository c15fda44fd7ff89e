use paranames_classfile::{parse_field_descriptor, FieldType, MethodDescriptor, MethodInfo};

use crate::member::{ConstructorRef, LoadedClass, MethodRef};
use crate::registry::ClassRegistry;
use crate::resolver::availability_in_class;
use crate::{Availability, ParameterNameResolver};

/// Reads parameter names from class file debug metadata: the
/// `MethodParameters` attribute when it names every parameter (javac
/// `-parameters`), otherwise the `LocalVariableTable` (javac `-g`),
/// matching parameters to locals by JVM slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugInfoResolver;

impl DebugInfoResolver {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn debug_names(
    info: &MethodInfo,
    descriptor: &MethodDescriptor,
) -> Option<Vec<String>> {
    let arity = descriptor.params.len();
    if arity == 0 {
        return Some(Vec::new());
    }

    if info.parameters.len() == arity {
        let named: Option<Vec<String>> =
            info.parameters.iter().map(|p| p.name.clone()).collect();
        if let Some(names) = named {
            return Some(names);
        }
    }

    if info.local_variables.is_empty() {
        return None;
    }
    descriptor
        .parameter_slots(info.is_static())
        .into_iter()
        .zip(&descriptor.params)
        .map(|(slot, param_type)| {
            // A slot can be reused later in the method body, possibly
            // with a different type; the earliest entry whose
            // descriptor is the parameter's own is the parameter.
            info.local_variables
                .iter()
                .filter(|var| var.slot == slot && local_has_type(&var.descriptor, param_type))
                .min_by_key(|var| var.start_pc)
                .map(|var| var.name.clone())
        })
        .collect()
}

fn local_has_type(local_descriptor: &str, param_type: &FieldType) -> bool {
    parse_field_descriptor(local_descriptor).is_ok_and(|ty| ty == *param_type)
}

impl ParameterNameResolver for DebugInfoResolver {
    fn method_parameter_names(&self, method: &MethodRef) -> Option<Vec<String>> {
        debug_names(method.info(), method.parsed_descriptor())
    }

    fn constructor_parameter_names(&self, constructor: &ConstructorRef) -> Option<Vec<String>> {
        debug_names(constructor.info(), constructor.parsed_descriptor())
    }

    fn availability(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        member_name: &str,
    ) -> Availability {
        availability_in_class(
            registry,
            class_name,
            member_name,
            |info, descriptor| debug_names(info, descriptor).is_some(),
            LoadedClass::has_debug_metadata,
        )
    }
}
