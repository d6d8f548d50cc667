use crate::element_generator::ElementGenerator;
use crate::find_root::find_root_element;
use crate::generate::ValueGenerator;
use crate::group_generator::{GroupGenerator, GroupKind};
use crate::options::GeneratorOptions;
use crate::schema_model::{ElementId, MaxOccurs, Occurs, Particle, SchemaSet, TypeDef};
use crate::substitution::SubstitutionGroups;
use crate::template::{ElementIndex, InstanceTemplate, TemplateNode};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Builds the instance template for one run
///
/// The builder owns every per-run table: the memo of expanded declarations,
/// the stack of elements whose content is being expanded and the set of
/// elements that already carry a wildcard comment.
pub(crate) struct TemplateBuilder<'s> {
    pub(crate) schema: &'s SchemaSet,
    pub(crate) options: &'s GeneratorOptions,
    pub(crate) template: InstanceTemplate,
    substitution_groups: SubstitutionGroups,
    processed: HashMap<ElementId, ElementIndex>,
    pub(crate) root_element: Option<ElementId>,
    pub(crate) root_namespace: String,
    pub(crate) element_stack: Vec<ElementIndex>,
    pub(crate) commented: HashSet<ElementIndex>,
}

impl<'s> TemplateBuilder<'s> {
    pub(crate) fn new(schema: &'s SchemaSet, options: &'s GeneratorOptions) -> Self {
        TemplateBuilder {
            schema,
            options,
            template: InstanceTemplate::new(),
            substitution_groups: SubstitutionGroups::new(schema),
            processed: HashMap::new(),
            root_element: None,
            root_namespace: String::new(),
            element_stack: vec![],
            commented: HashSet::new(),
        }
    }

    pub(crate) fn build(mut self) -> InstanceTemplate {
        let Some(root) = find_root_element(self.schema, self.options.root_element.as_ref()) else {
            return self.template;
        };

        self.root_element = Some(root);
        self.root_namespace = self.schema.element(root).name.namespace.clone();
        self.build_element(root, Occurs::ONCE, None, false);

        debug!(
            "Instance template has {} element nodes",
            self.template.element_count()
        );

        self.template
    }

    pub(crate) fn count(&self, occurs: Occurs) -> usize {
        occurs.count(self.options.occurs_threshold)
    }

    /// Materialize `id` under `parent`, or as root without one. Returns whether
    /// a new node with its own content was created.
    pub(crate) fn build_element(
        &mut self,
        id: ElementId,
        occurs: Occurs,
        parent: Option<TemplateNode>,
        under_wildcard: bool,
    ) -> bool {
        let schema = self.schema;
        let declaration = schema.element(id);
        if declaration.is_abstract {
            debug!("Skipping abstract element {}", declaration.name);
            return false;
        }

        if let Some(&existing) = self.processed.get(&id) {
            if parent.is_some() && !under_wildcard && occurs.min > 0 {
                debug!("Sharing content of recursive element {}", declaration.name);
                let shared =
                    ElementGenerator::shared(existing, self.template.element(existing), self.count(occurs));
                self.template.add_element(parent, shared);
            }
            return false;
        }

        let occurrences = if parent.is_some() { self.count(occurs) } else { 1 };
        let mut element = ElementGenerator::new(declaration.name.clone(), occurrences);
        element.nillable = declaration.nillable;
        element.default_value = declaration.default_value.clone();
        element.fixed_value = declaration.fixed_value.clone();
        let index = self.template.add_element(parent, element);

        match schema.type_def(declaration.type_id) {
            TypeDef::AnyType => {
                self.template.element_mut(index).value_generator = Some(ValueGenerator::any_content());
            }
            TypeDef::Simple(simple_type) => {
                self.template.element_mut(index).value_generator = Some(ValueGenerator::simple(
                    simple_type.clone(),
                    self.options.list_length,
                ));
            }
            TypeDef::Complex(complex) => {
                self.processed.insert(id, index);
                if complex.is_abstract {
                    self.expand_abstract_type(index, declaration.type_id);
                } else {
                    self.template.element_mut(index).mixed = complex.mixed;
                    self.expand_complex_type(index, complex);
                }
            }
        }

        let element = self.template.element_mut(index);
        if let Some(generator) = element.value_generator.take() {
            element.value_generator = Some(generator.with_label(&declaration.name.name));
        }

        true
    }

    pub(crate) fn expand_particle(&mut self, particle: &Particle, parent: TemplateNode) {
        match particle {
            Particle::Sequence { occurs, items } => {
                let group = GroupGenerator::new(GroupKind::Sequence, self.count(*occurs));
                let group = TemplateNode::Group(self.template.add_group(Some(parent), group));
                for item in items {
                    self.expand_particle(item, group);
                }
            }
            Particle::Choice { occurs, items } if occurs.max == MaxOccurs::Bounded(1) => {
                if let Some(first) = items.first() {
                    self.expand_particle(first, parent);
                }
            }
            Particle::Choice { occurs, items } => {
                let group = GroupGenerator::new(GroupKind::Choice, self.count(*occurs));
                let group = TemplateNode::Group(self.template.add_group(Some(parent), group));
                for item in items {
                    self.expand_particle(item, group);
                }
            }
            Particle::All { items, .. } => {
                for item in items.iter().rev() {
                    self.expand_particle(item, parent);
                }
            }
            Particle::Element(element) => {
                let choice = if element.is_reference {
                    self.substitution_groups
                        .substitution_choice(self.schema, element)
                } else {
                    None
                };

                match choice {
                    Some(choice) => self.expand_particle(&choice, parent),
                    None => {
                        self.build_element(element.element, element.occurs, Some(parent), false);
                    }
                }
            }
            Particle::Any(wildcard) => {
                if wildcard.occurs.min > 0 {
                    self.expand_wildcard(wildcard, parent);
                }
            }
        }
    }
}
