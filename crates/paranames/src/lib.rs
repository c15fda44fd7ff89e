#![forbid(unsafe_code)]

//! Lookup of JVM method and constructor parameter names.
//!
//! The entry point is the [`ParameterNameResolver`] trait: resolve a
//! member by class name, member name, and a comma-separated list of
//! source-level parameter types within a [`ClassRegistry`], then ask for
//! the member's formal parameter names or pre-check [`Availability`].
//!
//! Absence of parameter-name metadata is a normal, queryable state: a
//! query with no match returns `None`, and availability is reported
//! through the four-valued [`Availability`] enum rather than an error.
//!
//! Several implementations are provided: [`DebugInfoResolver`] (class
//! file debug attributes), [`AnnotationResolver`] (`@Named`-style
//! parameter annotations), [`PositionalResolver`] (synthesized
//! `arg0..argN`), [`NullResolver`], the memoizing [`CachingResolver`],
//! and [`ChainedResolver`] for fallback stacks.

use std::fmt;

mod member;
mod registry;
mod resolver;

pub use crate::member::{ConstructorRef, LoadedClass, MethodRef};
pub use crate::registry::{ClassRegistry, RegistryEntry, RegistryError};
pub use crate::resolver::{
    AnnotationResolver, CachingResolver, ChainedResolver, DebugInfoResolver, NullResolver,
    PositionalResolver,
};

/// The member name under which constructors appear in class files.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// How specifically parameter-name metadata is known to be present or
/// absent. The ordering is specificity, not severity: callers use it to
/// decide whether to retry at a coarser or finer granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// Names are available for this exact class and member.
    Found,
    /// No metadata source is available at all.
    NoNamesList,
    /// Metadata exists in general, but not for this class.
    NoNamesForClass,
    /// The class has metadata, but not this specific member.
    NoNamesForClassAndMember,
}

impl Availability {
    /// Rank by specificity; higher means closer to `Found`.
    pub(crate) fn specificity(self) -> u8 {
        match self {
            Availability::NoNamesList => 0,
            Availability::NoNamesForClass => 1,
            Availability::NoNamesForClassAndMember => 2,
            Availability::Found => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Found => "found",
            Availability::NoNamesList => "no-names-list",
            Availability::NoNamesForClass => "no-names-for-class",
            Availability::NoNamesForClassAndMember => "no-names-for-class-and-member",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameter-name lookup contract.
///
/// Every operation is a stateless query: identical inputs over unchanged
/// class data return identical results, in any call order, from any
/// thread. Malformed identifiers (an empty class name, a type list that
/// matches no overload) follow the same policy as "no match": the `None`
/// sentinel, never an error. I/O failures during resolution are logged
/// at `debug` level and reported as `None`; use [`ClassRegistry::load`]
/// directly when the underlying error matters.
pub trait ParameterNameResolver {
    /// Resolve a method by owner class, name, and comma-separated
    /// source-level parameter types (`"java.lang.String,int"`; empty for
    /// a zero-argument method). Overloads are disambiguated by the full
    /// ordered type list.
    fn resolve_method(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        method_name: &str,
        parameter_types_csv: &str,
    ) -> Option<MethodRef> {
        member::resolve_method(registry, class_name, method_name, parameter_types_csv)
    }

    /// Resolve a constructor; same contract as [`resolve_method`] minus
    /// the name, since constructors are unnamed.
    ///
    /// [`resolve_method`]: ParameterNameResolver::resolve_method
    fn resolve_constructor(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        parameter_types_csv: &str,
    ) -> Option<ConstructorRef> {
        member::resolve_constructor(registry, class_name, parameter_types_csv)
    }

    /// The method's formal parameter names, declaration order, one per
    /// parameter, or `None` when this resolver has no names for it.
    fn method_parameter_names(&self, method: &MethodRef) -> Option<Vec<String>>;

    /// Constructor counterpart of
    /// [`method_parameter_names`](ParameterNameResolver::method_parameter_names).
    fn constructor_parameter_names(&self, constructor: &ConstructorRef) -> Option<Vec<String>>;

    /// Cheap pre-check: how available are names for the members of
    /// `class_name` called `member_name` (pass [`CONSTRUCTOR_NAME`] for
    /// constructors)? Never errors for well-formed but non-existent
    /// classes or members; it reports the appropriate coarser status.
    fn availability(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        member_name: &str,
    ) -> Availability;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_specificity_orders_found_highest() {
        let mut statuses = [
            Availability::Found,
            Availability::NoNamesList,
            Availability::NoNamesForClassAndMember,
            Availability::NoNamesForClass,
        ];
        statuses.sort_by_key(|s| s.specificity());
        assert_eq!(
            statuses,
            [
                Availability::NoNamesList,
                Availability::NoNamesForClass,
                Availability::NoNamesForClassAndMember,
                Availability::Found,
            ]
        );
    }

    #[test]
    fn availability_display_is_kebab_case() {
        assert_eq!(Availability::Found.to_string(), "found");
        assert_eq!(
            Availability::NoNamesForClassAndMember.to_string(),
            "no-names-for-class-and-member"
        );
    }
}
