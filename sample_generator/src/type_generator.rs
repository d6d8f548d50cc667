use crate::attribute_generator::AttributeGenerator;
use crate::builder::TemplateBuilder;
use crate::generate::ValueGenerator;
use crate::schema_model::{AttributeUseKind, ComplexContent, ComplexType, TypeDef, TypeId};
use crate::template::{ElementIndex, TemplateNode};
use log::debug;

impl<'s> TemplateBuilder<'s> {
    pub(crate) fn expand_complex_type(&mut self, index: ElementIndex, complex: &'s ComplexType) {
        self.element_stack.push(index);

        match &complex.content {
            ComplexContent::Simple(simple_type) => {
                self.template.element_mut(index).value_generator = Some(ValueGenerator::simple(
                    simple_type.clone(),
                    self.options.list_length,
                ));
            }
            ComplexContent::Particle(particle) => {
                self.expand_particle(particle, TemplateNode::Element(index));
            }
            ComplexContent::Empty => {}
        }

        self.expand_attributes(index, complex);
        self.element_stack.pop();
    }

    /// First concrete complex type, in declaration order, derived from `base`
    fn find_derived_type(&self, base: TypeId) -> Option<(TypeId, &'s ComplexType)> {
        let schema = self.schema;
        schema.global_types().find_map(|(_, id)| match schema.type_def(id) {
            TypeDef::Complex(complex)
                if id != base && !complex.is_abstract && schema.is_derived_from(id, base) =>
            {
                Some((id, complex))
            }
            _ => None,
        })
    }

    /// Expand an element declared with an abstract complex type through a
    /// concrete derivation, recorded as the element's type substitute
    pub(crate) fn expand_abstract_type(&mut self, index: ElementIndex, base: TypeId) {
        let Some((_, derived)) = self.find_derived_type(base) else {
            debug!(
                "No concrete type derives from the abstract type of {}",
                self.template.element(index).name
            );
            return;
        };

        let element = self.template.element_mut(index);
        element.type_substitute = derived.name.clone();
        element.mixed = derived.mixed;
        self.expand_complex_type(index, derived);
    }

    fn expand_attributes(&mut self, index: ElementIndex, complex: &'s ComplexType) {
        if let Some(wildcard) = &complex.attribute_wildcard {
            self.expand_attribute_wildcard(index, wildcard, &complex.attribute_uses);
        }

        for attribute_use in &complex.attribute_uses {
            if attribute_use.use_kind == AttributeUseKind::Prohibited {
                continue;
            }

            let declaration = &attribute_use.declaration;
            let Some(simple_type) = &declaration.simple_type else {
                debug!("Skipping attribute {} without a usable type", declaration.name);
                continue;
            };

            let mut attribute = AttributeGenerator::new(declaration.name.clone(), attribute_use.use_kind);
            attribute.default_value = declaration.default_value.clone();
            attribute.fixed_value = declaration.fixed_value.clone();
            attribute.value_generator = Some(
                ValueGenerator::simple(simple_type.clone(), self.options.list_length)
                    .with_label(&declaration.name.name),
            );

            self.template.element_mut(index).attributes.push(attribute);
        }
    }
}
