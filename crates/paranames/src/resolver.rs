use paranames_classfile::{MethodDescriptor, MethodInfo};

use crate::member::{self, LoadedClass};
use crate::registry::ClassRegistry;
use crate::Availability;

mod annotation;
mod caching;
mod chain;
mod debug;
mod null;
mod positional;

pub use annotation::AnnotationResolver;
pub use caching::CachingResolver;
pub use chain::ChainedResolver;
pub use debug::DebugInfoResolver;
pub use null::NullResolver;
pub use positional::PositionalResolver;

/// Shared availability walk for resolvers whose metadata lives in the
/// class itself. `names_available` decides per member; `class_has_metadata`
/// distinguishes "this class was compiled without the metadata" from
/// "the metadata exists but not for this member".
fn availability_in_class(
    registry: &ClassRegistry,
    class_name: &str,
    member_name: &str,
    mut names_available: impl FnMut(&MethodInfo, &MethodDescriptor) -> bool,
    class_has_metadata: impl FnOnce(&LoadedClass) -> bool,
) -> Availability {
    if registry.is_empty() {
        return Availability::NoNamesList;
    }
    let Some(class) = member::load_for_lookup(registry, class_name) else {
        return Availability::NoNamesForClass;
    };

    let mut matched = false;
    let mut all_named = true;
    for index in class.member_indices(member_name) {
        matched = true;
        let (info, descriptor) = class.method(index);
        if !names_available(info, descriptor) {
            all_named = false;
        }
    }

    if !matched {
        return Availability::NoNamesForClassAndMember;
    }
    if all_named {
        return Availability::Found;
    }
    if class_has_metadata(&class) {
        Availability::NoNamesForClassAndMember
    } else {
        Availability::NoNamesForClass
    }
}
