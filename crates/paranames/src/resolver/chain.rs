use crate::member::{ConstructorRef, MethodRef};
use crate::registry::ClassRegistry;
use crate::resolver::{AnnotationResolver, DebugInfoResolver};
use crate::{Availability, ParameterNameResolver};

/// Ordered fallback over several resolvers: the first non-`None` answer
/// wins, and availability is the most specific status any delegate
/// reports.
pub struct ChainedResolver {
    delegates: Vec<Box<dyn ParameterNameResolver>>,
}

impl Default for ChainedResolver {
    /// Debug attributes first, `@Named`-style annotations second.
    fn default() -> Self {
        Self::new(vec![
            Box::new(DebugInfoResolver::new()),
            Box::new(AnnotationResolver::new()),
        ])
    }
}

impl ChainedResolver {
    pub fn new(delegates: Vec<Box<dyn ParameterNameResolver>>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, delegate: Box<dyn ParameterNameResolver>) {
        self.delegates.push(delegate);
    }
}

impl ParameterNameResolver for ChainedResolver {
    fn resolve_method(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        method_name: &str,
        parameter_types_csv: &str,
    ) -> Option<MethodRef> {
        self.delegates.iter().find_map(|delegate| {
            delegate.resolve_method(registry, class_name, method_name, parameter_types_csv)
        })
    }

    fn resolve_constructor(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        parameter_types_csv: &str,
    ) -> Option<ConstructorRef> {
        self.delegates.iter().find_map(|delegate| {
            delegate.resolve_constructor(registry, class_name, parameter_types_csv)
        })
    }

    fn method_parameter_names(&self, method: &MethodRef) -> Option<Vec<String>> {
        self.delegates
            .iter()
            .find_map(|delegate| delegate.method_parameter_names(method))
    }

    fn constructor_parameter_names(&self, constructor: &ConstructorRef) -> Option<Vec<String>> {
        self.delegates
            .iter()
            .find_map(|delegate| delegate.constructor_parameter_names(constructor))
    }

    fn availability(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        member_name: &str,
    ) -> Availability {
        let mut best = Availability::NoNamesList;
        for delegate in &self.delegates {
            let status = delegate.availability(registry, class_name, member_name);
            if status.specificity() > best.specificity() {
                best = status;
            }
            if best == Availability::Found {
                break;
            }
        }
        best
    }
}
