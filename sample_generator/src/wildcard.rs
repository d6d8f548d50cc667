use crate::attribute_generator::AttributeGenerator;
use crate::builder::TemplateBuilder;
use crate::element_generator::ElementGenerator;
use crate::generate::ValueGenerator;
use crate::names::{OTHER_NAMESPACE, QualifiedName};
use crate::schema_model::{
    AttributeDecl, AttributeUse, AttributeUseKind, ElementId, ProcessContents, Wildcard,
};
use crate::template::{ElementIndex, TemplateNode};
use log::warn;

const ANY_ELEMENT_NAME: &str = "any_element";
const ANY_ATTRIBUTE_NAME: &str = "any_Attr";

const ELEMENT_WILDCARD_COMMENT: &str =
    " Element wildcard could not be matched. Generated XML may not be valid. ";
const ATTRIBUTE_WILDCARD_COMMENT: &str =
    " Attribute wildcard could not be matched. Generated XML may not be valid. ";

/// Namespace searched for one entry of a wildcard's namespace constraint
#[derive(Debug, Clone, Copy)]
enum NamespaceMatch<'n> {
    Exactly(&'n str),
    /// Any namespace other than the given one and the empty namespace
    OtherThan(&'n str),
}

impl<'s> TemplateBuilder<'s> {
    /// Namespace of a placeholder node, for lax and skip wildcards constrained
    /// by a single keyword
    fn placeholder_namespace(&self, wildcard: &Wildcard) -> Option<String> {
        if wildcard.process_contents == ProcessContents::Strict {
            return None;
        }

        match wildcard.namespace.as_str() {
            "##any" | "##targetNamespace" => Some(self.root_namespace.clone()),
            "##local" => Some(String::new()),
            "##other" => Some(OTHER_NAMESPACE.to_string()),
            _ => None,
        }
    }

    fn namespace_matches<'w>(&'w self, wildcard: &'w Wildcard) -> Vec<NamespaceMatch<'w>> {
        match wildcard.namespace.as_str() {
            "##any" | "##targetNamespace" => vec![NamespaceMatch::Exactly(&self.root_namespace)],
            "##local" => vec![NamespaceMatch::Exactly("")],
            "##other" => vec![NamespaceMatch::OtherThan(&wildcard.schema_namespace)],
            list => list
                .split_whitespace()
                .map(|entry| match entry {
                    "##targetNamespace" => NamespaceMatch::Exactly(self.root_namespace.as_str()),
                    "##local" => NamespaceMatch::Exactly(""),
                    namespace => NamespaceMatch::Exactly(namespace),
                })
                .collect(),
        }
    }

    /// First global element matching the constraint, abstract or not. The root
    /// is never an exact-namespace match.
    fn find_wildcard_element(&self, wildcard: &Wildcard) -> Option<ElementId> {
        let schema = self.schema;
        for namespace_match in self.namespace_matches(wildcard) {
            let found = schema.global_elements().find(|(name, id)| match namespace_match {
                NamespaceMatch::Exactly(namespace) => {
                    name.namespace == namespace && Some(*id) != self.root_element
                }
                NamespaceMatch::OtherThan(namespace) => {
                    name.has_namespace() && name.namespace != namespace
                }
            });

            if let Some((_, id)) = found {
                return Some(id);
            }
        }

        None
    }

    fn find_wildcard_attribute(
        &self,
        wildcard: &Wildcard,
        uses: &[AttributeUse],
    ) -> Option<&'s AttributeDecl> {
        let schema = self.schema;
        for namespace_match in self.namespace_matches(wildcard) {
            let found = schema.global_attributes().find(|declaration| {
                let name = &declaration.name;
                if uses.iter().any(|attribute_use| &attribute_use.declaration.name == name) {
                    return false;
                }

                match namespace_match {
                    NamespaceMatch::Exactly(namespace) => name.namespace == namespace,
                    NamespaceMatch::OtherThan(namespace) => {
                        name.has_namespace() && name.namespace != namespace
                    }
                }
            });

            if found.is_some() {
                return found;
            }
        }

        None
    }

    fn add_wildcard_comment(&mut self, owner: Option<ElementIndex>, comment: &str) {
        let Some(owner) = owner else {
            return;
        };

        if self.commented.insert(owner) {
            let element = self.template.element_mut(owner);
            warn!("Wildcard in {} could not be matched", element.name);
            element.comment = Some(comment.to_string());
        }
    }

    pub(crate) fn expand_wildcard(&mut self, wildcard: &Wildcard, parent: TemplateNode) {
        if let Some(namespace) = self.placeholder_namespace(wildcard) {
            let name = QualifiedName::new(namespace, ANY_ELEMENT_NAME);
            let mut element = ElementGenerator::new(name, self.count(wildcard.occurs));
            element.value_generator = Some(ValueGenerator::any_content().with_label(ANY_ELEMENT_NAME));
            self.template.add_element(Some(parent), element);
            return;
        }

        let owner = self.element_stack.last().copied();
        let built = match self.find_wildcard_element(wildcard) {
            Some(id) => self.build_element(id, wildcard.occurs, Some(parent), true),
            None => false,
        };

        if !built {
            self.add_wildcard_comment(owner, ELEMENT_WILDCARD_COMMENT);
        }
    }

    pub(crate) fn expand_attribute_wildcard(
        &mut self,
        index: ElementIndex,
        wildcard: &Wildcard,
        uses: &[AttributeUse],
    ) {
        if let Some(namespace) = self.placeholder_namespace(wildcard) {
            let name = QualifiedName::new(namespace, ANY_ATTRIBUTE_NAME);
            let mut attribute = AttributeGenerator::new(name, AttributeUseKind::Optional);
            attribute.value_generator =
                Some(ValueGenerator::any_simple_content().with_label(ANY_ATTRIBUTE_NAME));
            self.template.element_mut(index).attributes.push(attribute);
            return;
        }

        let Some(declaration) = self.find_wildcard_attribute(wildcard, uses) else {
            self.add_wildcard_comment(Some(index), ATTRIBUTE_WILDCARD_COMMENT);
            return;
        };

        let Some(simple_type) = &declaration.simple_type else {
            return;
        };

        let mut attribute = AttributeGenerator::new(declaration.name.clone(), AttributeUseKind::Optional);
        attribute.default_value = declaration.default_value.clone();
        attribute.fixed_value = declaration.fixed_value.clone();
        attribute.value_generator = Some(
            ValueGenerator::simple(simple_type.clone(), self.options.list_length)
                .with_label(&declaration.name.name),
        );
        self.template.element_mut(index).attributes.push(attribute);
    }
}
