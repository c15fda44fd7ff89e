use paranames_classfile::{Annotation, MethodDescriptor, MethodInfo};

use crate::member::{ConstructorRef, LoadedClass, MethodRef};
use crate::registry::ClassRegistry;
use crate::resolver::availability_in_class;
use crate::{Availability, ParameterNameResolver};

/// Reads parameter names from per-parameter annotations such as
/// `@javax.inject.Named("name")`. Every parameter must carry the
/// annotation with a string element, otherwise the lookup reports the
/// names as unavailable.
#[derive(Debug, Clone)]
pub struct AnnotationResolver {
    /// Accepted annotation types, as internal names.
    annotation_types: Vec<String>,
    /// The annotation element holding the parameter name.
    element: String,
}

impl Default for AnnotationResolver {
    fn default() -> Self {
        Self {
            annotation_types: vec![
                "javax/inject/Named".to_string(),
                "jakarta/inject/Named".to_string(),
            ],
            element: "value".to_string(),
        }
    }
}

impl AnnotationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a custom annotation type (binary name) and element.
    pub fn with_annotation(binary_name: &str, element: &str) -> Self {
        Self {
            annotation_types: vec![binary_name.replace('.', "/")],
            element: element.to_string(),
        }
    }

    fn annotated_names(
        &self,
        info: &MethodInfo,
        descriptor: &MethodDescriptor,
    ) -> Option<Vec<String>> {
        let arity = descriptor.params.len();
        if arity == 0 {
            return Some(Vec::new());
        }

        let visible = (info.visible_parameter_annotations.len() == arity)
            .then_some(&info.visible_parameter_annotations);
        let invisible = (info.invisible_parameter_annotations.len() == arity)
            .then_some(&info.invisible_parameter_annotations);
        if visible.is_none() && invisible.is_none() {
            return None;
        }

        (0..arity)
            .map(|i| {
                visible
                    .and_then(|per_param| self.named_value(&per_param[i]))
                    .or_else(|| invisible.and_then(|per_param| self.named_value(&per_param[i])))
            })
            .collect()
    }

    fn named_value(&self, annotations: &[Annotation]) -> Option<String> {
        annotations.iter().find_map(|annotation| {
            let internal = annotation.type_internal_name()?;
            if !self.annotation_types.iter().any(|ty| ty == internal) {
                return None;
            }
            annotation.string_element(&self.element).map(str::to_string)
        })
    }
}

impl ParameterNameResolver for AnnotationResolver {
    fn method_parameter_names(&self, method: &MethodRef) -> Option<Vec<String>> {
        self.annotated_names(method.info(), method.parsed_descriptor())
    }

    fn constructor_parameter_names(&self, constructor: &ConstructorRef) -> Option<Vec<String>> {
        self.annotated_names(constructor.info(), constructor.parsed_descriptor())
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
            |info, descriptor| self.annotated_names(info, descriptor).is_some(),
            LoadedClass::has_parameter_annotations,
        )
    }
}
