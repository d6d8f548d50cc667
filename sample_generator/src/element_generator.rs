use crate::attribute_generator::AttributeGenerator;
use crate::generate::ValueGenerator;
use crate::names::QualifiedName;
use crate::template::{ElementIndex, TemplateNode};

/// Element node of the instance template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementGenerator {
    pub name: QualifiedName,
    /// Number of times the element is written, already capped
    pub occurs: usize,
    pub nillable: bool,
    pub default_value: Option<String>,
    pub fixed_value: Option<String>,
    pub mixed: bool,
    /// Concrete type written as `xsi:type` in place of an abstract one
    pub type_substitute: Option<QualifiedName>,
    /// Present for simple content only
    pub value_generator: Option<ValueGenerator>,
    pub attributes: Vec<AttributeGenerator>,
    pub children: Vec<TemplateNode>,
    pub comment: Option<String>,
    /// Earlier node of the same declaration whose content this one repeats
    pub shared_from: Option<ElementIndex>,
}

impl ElementGenerator {
    pub(crate) fn new(name: QualifiedName, occurs: usize) -> Self {
        ElementGenerator {
            name,
            occurs,
            nillable: false,
            default_value: None,
            fixed_value: None,
            mixed: false,
            type_substitute: None,
            value_generator: None,
            attributes: vec![],
            children: vec![],
            comment: None,
            shared_from: None,
        }
    }

    /// Re-occurrence of `source` with its own count
    pub(crate) fn shared(source_index: ElementIndex, source: &ElementGenerator, occurs: usize) -> Self {
        let mut element = ElementGenerator::new(source.name.clone(), occurs);
        element.nillable = source.nillable;
        element.default_value = source.default_value.clone();
        element.fixed_value = source.fixed_value.clone();
        element.shared_from = Some(source_index);

        element
    }

    pub fn is_shared(&self) -> bool {
        self.shared_from.is_some()
    }

    /// Text written when the element has simple content: fixed, then default
    pub(crate) fn preset_value(&self) -> Option<&str> {
        self.fixed_value
            .as_deref()
            .or(self.default_value.as_deref())
    }
}
