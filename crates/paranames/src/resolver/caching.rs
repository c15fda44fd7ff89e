use std::collections::HashMap;
use std::sync::RwLock;

use crate::member::{ConstructorRef, MethodRef};
use crate::registry::ClassRegistry;
use crate::{Availability, ParameterNameResolver, CONSTRUCTOR_NAME};

/// Memoizes name lookups of another resolver, including negative
/// results, keyed by class identity, member name, and descriptor.
/// Keying on identity rather than the binary name keeps same-named
/// classes loaded from different registries apart. Resolution and
/// availability pass straight through.
pub struct CachingResolver<R> {
    inner: R,
    cache: RwLock<HashMap<MemberKey, Option<Vec<String>>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemberKey {
    class: usize,
    name: String,
    descriptor: String,
}

impl<R: ParameterNameResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn cached(
        &self,
        key: MemberKey,
        compute: impl FnOnce() -> Option<Vec<String>>,
    ) -> Option<Vec<String>> {
        if let Some(hit) = self.cache.read().expect("name cache lock poisoned").get(&key) {
            return hit.clone();
        }
        let value = compute();
        self.cache
            .write()
            .expect("name cache lock poisoned")
            .insert(key, value.clone());
        value
    }
}

impl<R: ParameterNameResolver> ParameterNameResolver for CachingResolver<R> {
    fn resolve_method(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        method_name: &str,
        parameter_types_csv: &str,
    ) -> Option<MethodRef> {
        self.inner
            .resolve_method(registry, class_name, method_name, parameter_types_csv)
    }

    fn resolve_constructor(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        parameter_types_csv: &str,
    ) -> Option<ConstructorRef> {
        self.inner
            .resolve_constructor(registry, class_name, parameter_types_csv)
    }

    fn method_parameter_names(&self, method: &MethodRef) -> Option<Vec<String>> {
        let key = MemberKey {
            class: method.class_token(),
            name: method.name().to_string(),
            descriptor: method.descriptor().to_string(),
        };
        self.cached(key, || self.inner.method_parameter_names(method))
    }

    fn constructor_parameter_names(&self, constructor: &ConstructorRef) -> Option<Vec<String>> {
        let key = MemberKey {
            class: constructor.class_token(),
            name: CONSTRUCTOR_NAME.to_string(),
            descriptor: constructor.descriptor().to_string(),
        };
        self.cached(key, || self.inner.constructor_parameter_names(constructor))
    }

    fn availability(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        member_name: &str,
    ) -> Availability {
        self.inner.availability(registry, class_name, member_name)
    }
}
