use std::fmt;
use std::sync::Arc;

use paranames_classfile::{
    parse_method_descriptor, ClassFile, FieldType, MethodDescriptor, MethodInfo,
};

use crate::registry::ClassRegistry;
use crate::CONSTRUCTOR_NAME;

/// A class loaded and parsed through a [`ClassRegistry`], with every
/// method descriptor parsed eagerly so member handles can answer
/// signature questions without re-parsing.
#[derive(Debug)]
pub struct LoadedClass {
    binary_name: String,
    file: ClassFile,
    descriptors: Vec<MethodDescriptor>,
}

impl LoadedClass {
    pub(crate) fn new(
        binary_name: String,
        file: ClassFile,
    ) -> paranames_classfile::Result<Self> {
        let descriptors = file
            .methods
            .iter()
            .map(|m| parse_method_descriptor(&m.descriptor))
            .collect::<paranames_classfile::Result<Vec<_>>>()?;
        Ok(Self {
            binary_name,
            file,
            descriptors,
        })
    }

    /// The class name in binary form, e.g. `com.example.Sample`.
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub(crate) fn method(&self, index: usize) -> (&MethodInfo, &MethodDescriptor) {
        (&self.file.methods[index], &self.descriptors[index])
    }

    pub(crate) fn member_indices<'a>(
        &'a self,
        member_name: &'a str,
    ) -> impl Iterator<Item = usize> + 'a {
        self.file
            .methods
            .iter()
            .enumerate()
            .filter(move |(_, m)| m.name == member_name)
            .map(|(index, _)| index)
    }

    pub(crate) fn has_debug_metadata(&self) -> bool {
        self.file.methods.iter().any(MethodInfo::has_debug_metadata)
    }

    pub(crate) fn has_parameter_annotations(&self) -> bool {
        self.file.methods.iter().any(|m| {
            !m.visible_parameter_annotations.is_empty()
                || !m.invisible_parameter_annotations.is_empty()
        })
    }
}

#[derive(Clone)]
struct MemberRef {
    class: Arc<LoadedClass>,
    index: usize,
}

impl MemberRef {
    fn info(&self) -> &MethodInfo {
        &self.class.file.methods[self.index]
    }

    /// Identity of the parsed class behind this handle. Two handles
    /// agree only when they hold the same cached load, so classes with
    /// equal binary names from different registries stay distinct.
    fn class_token(&self) -> usize {
        Arc::as_ptr(&self.class) as usize
    }

    fn parsed_descriptor(&self) -> &MethodDescriptor {
        &self.class.descriptors[self.index]
    }
}

/// A resolved method handle. Holds the parsed owning class, so name
/// lookups on it need no further I/O.
#[derive(Clone)]
pub struct MethodRef(MemberRef);

impl MethodRef {
    /// Binary name of the owning class.
    pub fn owner(&self) -> &str {
        self.0.class.binary_name()
    }

    pub fn name(&self) -> &str {
        &self.0.info().name
    }

    /// Raw JVM descriptor, e.g. `(Ljava/lang/String;I)V`.
    pub fn descriptor(&self) -> &str {
        &self.0.info().descriptor
    }

    pub fn parameter_count(&self) -> usize {
        self.0.parsed_descriptor().params.len()
    }

    /// Parameter types as written in Java source, declaration order.
    pub fn parameter_types(&self) -> Vec<String> {
        source_types(self.0.parsed_descriptor())
    }

    pub(crate) fn info(&self) -> &MethodInfo {
        self.0.info()
    }

    pub(crate) fn parsed_descriptor(&self) -> &MethodDescriptor {
        self.0.parsed_descriptor()
    }

    pub(crate) fn class_token(&self) -> usize {
        self.0.class_token()
    }
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodRef({}.{}{})", self.owner(), self.name(), self.descriptor())
    }
}

/// A resolved constructor handle. Constructors carry no user-facing
/// name; internally they are the `<init>` members of the class.
#[derive(Clone)]
pub struct ConstructorRef(MemberRef);

impl ConstructorRef {
    /// Binary name of the owning class.
    pub fn owner(&self) -> &str {
        self.0.class.binary_name()
    }

    /// Raw JVM descriptor, e.g. `(Ljava/lang/String;I)V`.
    pub fn descriptor(&self) -> &str {
        &self.0.info().descriptor
    }

    pub fn parameter_count(&self) -> usize {
        self.0.parsed_descriptor().params.len()
    }

    /// Parameter types as written in Java source, declaration order.
    pub fn parameter_types(&self) -> Vec<String> {
        source_types(self.0.parsed_descriptor())
    }

    pub(crate) fn info(&self) -> &MethodInfo {
        self.0.info()
    }

    pub(crate) fn parsed_descriptor(&self) -> &MethodDescriptor {
        self.0.parsed_descriptor()
    }

    pub(crate) fn class_token(&self) -> usize {
        self.0.class_token()
    }
}

impl fmt::Debug for ConstructorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstructorRef({}{})", self.owner(), self.descriptor())
    }
}

fn source_types(descriptor: &MethodDescriptor) -> Vec<String> {
    descriptor.params.iter().map(FieldType::source_name).collect()
}

pub(crate) fn resolve_method(
    registry: &ClassRegistry,
    class_name: &str,
    method_name: &str,
    parameter_types_csv: &str,
) -> Option<MethodRef> {
    // Constructors are only reachable through resolve_constructor.
    if method_name.is_empty() || method_name == CONSTRUCTOR_NAME {
        return None;
    }
    let class = load_for_lookup(registry, class_name)?;
    let wanted = parse_type_csv(parameter_types_csv);
    let index = find_member(&class, method_name, &wanted)?;
    Some(MethodRef(MemberRef { class, index }))
}

pub(crate) fn resolve_constructor(
    registry: &ClassRegistry,
    class_name: &str,
    parameter_types_csv: &str,
) -> Option<ConstructorRef> {
    let class = load_for_lookup(registry, class_name)?;
    let wanted = parse_type_csv(parameter_types_csv);
    let index = find_member(&class, CONSTRUCTOR_NAME, &wanted)?;
    Some(ConstructorRef(MemberRef { class, index }))
}

/// Load a class for a query that must not error: failures are logged
/// and reported as "not found".
pub(crate) fn load_for_lookup(
    registry: &ClassRegistry,
    class_name: &str,
) -> Option<Arc<LoadedClass>> {
    match registry.load(class_name) {
        Ok(class) => class,
        Err(err) => {
            tracing::debug!(
                class = class_name,
                error = %err,
                "class load failed; treating as not found"
            );
            None
        }
    }
}

fn parse_type_csv(csv: &str) -> Vec<String> {
    let trimmed = csv.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(',').map(|ty| ty.trim().to_string()).collect()
}

fn find_member(class: &LoadedClass, member_name: &str, wanted: &[String]) -> Option<usize> {
    class.member_indices(member_name).find(|&index| {
        let (_, descriptor) = class.method(index);
        descriptor.params.len() == wanted.len()
            && descriptor
                .params
                .iter()
                .zip(wanted)
                .all(|(ty, want)| ty.source_name() == *want)
    })
}
