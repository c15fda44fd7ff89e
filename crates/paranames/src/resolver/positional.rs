use crate::member::{ConstructorRef, MethodRef};
use crate::registry::ClassRegistry;
use crate::resolver::availability_in_class;
use crate::{Availability, ParameterNameResolver};

/// Synthesizes positional parameter names (`arg0`, `arg1`, ...) from the
/// member's descriptor. A last-resort fallback: names are available for
/// any member that resolves at all.
#[derive(Debug, Clone)]
pub struct PositionalResolver {
    prefix: String,
}

impl Default for PositionalResolver {
    fn default() -> Self {
        Self::with_prefix("arg")
    }
}

impl PositionalResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn synthesize(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{}{i}", self.prefix)).collect()
    }
}

impl ParameterNameResolver for PositionalResolver {
    fn method_parameter_names(&self, method: &MethodRef) -> Option<Vec<String>> {
        Some(self.synthesize(method.parameter_count()))
    }

    fn constructor_parameter_names(&self, constructor: &ConstructorRef) -> Option<Vec<String>> {
        Some(self.synthesize(constructor.parameter_count()))
    }

    fn availability(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        member_name: &str,
    ) -> Availability {
        availability_in_class(registry, class_name, member_name, |_, _| true, |_| true)
    }
}
