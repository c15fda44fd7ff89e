use crate::member::{ConstructorRef, MethodRef};
use crate::registry::ClassRegistry;
use crate::{Availability, ParameterNameResolver};

/// Resolves nothing and names nothing. Useful as a stand-in where a
/// resolver is required but parameter names are deliberately disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl NullResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ParameterNameResolver for NullResolver {
    fn resolve_method(
        &self,
        _registry: &ClassRegistry,
        _class_name: &str,
        _method_name: &str,
        _parameter_types_csv: &str,
    ) -> Option<MethodRef> {
        None
    }

    fn resolve_constructor(
        &self,
        _registry: &ClassRegistry,
        _class_name: &str,
        _parameter_types_csv: &str,
    ) -> Option<ConstructorRef> {
        None
    }

    fn method_parameter_names(&self, _method: &MethodRef) -> Option<Vec<String>> {
        None
    }

    fn constructor_parameter_names(&self, _constructor: &ConstructorRef) -> Option<Vec<String>> {
        None
    }

    fn availability(
        &self,
        _registry: &ClassRegistry,
        _class_name: &str,
        _member_name: &str,
    ) -> Availability {
        Availability::NoNamesList
    }
}
