//! Instance template tree
//!
//! The tree produced by the template builder and replayed by the serializer.
//! Nodes live in two arenas owned by [`InstanceTemplate`]; children are kept
//! as ordered handles into those arenas.

use crate::attribute_generator::AttributeGenerator;
use crate::element_generator::ElementGenerator;
use crate::group_generator::GroupGenerator;
use crate::names::{QualifiedName, XML_NAMESPACE};

pub type ElementIndex = usize;
pub type GroupIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateNode {
    Element(ElementIndex),
    Group(GroupIndex),
}

#[derive(Debug, Clone, Default)]
pub struct InstanceTemplate {
    pub(crate) elements: Vec<ElementGenerator>,
    pub(crate) groups: Vec<GroupGenerator>,
    pub(crate) root: Option<ElementIndex>,
}

impl InstanceTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<ElementIndex> {
        self.root
    }

    pub fn element(&self, index: ElementIndex) -> &ElementGenerator {
        &self.elements[index]
    }

    pub fn group(&self, index: GroupIndex) -> &GroupGenerator {
        &self.groups[index]
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn element_mut(&mut self, index: ElementIndex) -> &mut ElementGenerator {
        &mut self.elements[index]
    }

    /// Store `element` and append it to `parent`; without a parent it becomes the root
    pub(crate) fn add_element(
        &mut self,
        parent: Option<TemplateNode>,
        element: ElementGenerator,
    ) -> ElementIndex {
        let index = self.elements.len();
        self.elements.push(element);
        self.attach(parent, TemplateNode::Element(index));

        index
    }

    pub(crate) fn add_group(&mut self, parent: Option<TemplateNode>, group: GroupGenerator) -> GroupIndex {
        let index = self.groups.len();
        self.groups.push(group);
        self.attach(parent, TemplateNode::Group(index));

        index
    }

    fn attach(&mut self, parent: Option<TemplateNode>, node: TemplateNode) {
        match parent {
            Some(TemplateNode::Element(parent)) => self.elements[parent].children.push(node),
            Some(TemplateNode::Group(parent)) => self.groups[parent].children.push(node),
            None => {
                if let TemplateNode::Element(index) = node {
                    self.root = Some(index);
                }
            }
        }
    }

    /// Node holding the content of `index`, which differs from `index` for
    /// shared re-occurrences of a recursive declaration
    pub fn content_source(&self, index: ElementIndex) -> ElementIndex {
        let mut current = index;
        for _ in 0..self.elements.len() {
            match self.elements[current].shared_from {
                Some(source) => current = source,
                None => break,
            }
        }

        current
    }

    /// Namespaces of attributes and type substitutes that need a prefix on the root
    pub(crate) fn prefixed_namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = vec![];
        let mut add = |namespace: &str| {
            if !namespace.is_empty()
                && namespace != XML_NAMESPACE
                && !namespaces.iter().any(|known| known == namespace)
            {
                namespaces.push(namespace.to_string());
            }
        };

        for element in &self.elements {
            if let Some(QualifiedName { namespace, .. }) = &element.type_substitute {
                add(namespace);
            }
            for attribute in &element.attributes {
                add(&attribute.name.namespace);
            }
        }

        namespaces
    }

    pub(crate) fn attributes(&self, index: ElementIndex) -> &[AttributeGenerator] {
        &self.elements[self.content_source(index)].attributes
    }
}
