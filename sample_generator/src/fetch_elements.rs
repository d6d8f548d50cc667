use crate::fetch_types::{BuildState, SchemaCompiler, is_true, xs_children};
use crate::names::QualifiedName;
use crate::schema_model::{ANY_TYPE, ElementDecl, ElementId, ElementParticle, TypeId};
use roxmltree::Node;

impl<'a, 'input> SchemaCompiler<'a, 'input> {
    /// Build a registered global element declaration if still pending
    pub(crate) fn ensure_element(&mut self, id: ElementId) {
        if self.element_states.get(&id) != Some(&BuildState::Pending) {
            return;
        }

        self.element_states.insert(id, BuildState::Building);
        let (doc, node) = self.element_nodes[&id];
        let name = self.set.elements[id].name.clone();
        let declaration = self.element_declaration(doc, node, name, true);
        self.set.elements[id] = declaration;
        self.element_states.insert(id, BuildState::Done);
    }

    fn element_declaration(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
        name: QualifiedName,
        global: bool,
    ) -> ElementDecl {
        let mut declaration = ElementDecl::new(name, global);
        declaration.nillable = is_true(node, "nillable");
        declaration.is_abstract = is_true(node, "abstract");
        declaration.default_value = node.attribute("default").map(str::to_string);
        declaration.fixed_value = node.attribute("fixed").map(str::to_string);
        declaration.substitution_group = node
            .attribute("substitutionGroup")
            .and_then(|heads| heads.split_whitespace().next())
            .map(|head| self.resolve_qname(doc, node, head));

        let inline = xs_children(node)
            .find(|child| matches!(child.tag_name().name(), "complexType" | "simpleType"));

        let head_type = match &declaration.substitution_group {
            Some(head) => self.substitution_head_type(head),
            None => None,
        };

        declaration.type_id = if let Some(type_name) = node.attribute("type") {
            self.type_reference(doc, node, type_name)
                .unwrap_or(ANY_TYPE)
        } else if let Some(inline) = inline {
            self.anonymous_type(doc, inline)
        } else {
            head_type.unwrap_or(ANY_TYPE)
        };

        declaration
    }

    fn substitution_head_type(&mut self, head: &QualifiedName) -> Option<TypeId> {
        let Some(id) = self.set.global_element(head) else {
            self.diagnostics
                .push(format!("Substitution group head '{}' is not declared", head));
            return None;
        };

        self.ensure_element(id);
        if self.element_states.get(&id) != Some(&BuildState::Done) {
            return None;
        }

        Some(self.set.elements[id].type_id)
    }

    pub(crate) fn element_particle(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
    ) -> Option<ElementParticle> {
        let occurs = self.occurs(node);

        if let Some(reference) = node.attribute("ref") {
            let name = self.resolve_qname(doc, node, reference);
            let Some(element) = self.set.global_element(&name) else {
                self.diagnostics
                    .push(format!("Element '{}' is not declared", name));
                return None;
            };

            return Some(ElementParticle {
                element,
                occurs,
                is_reference: true,
            });
        }

        let Some(local_name) = node.attribute("name") else {
            self.diagnostics
                .push("Local element has neither a name nor a ref".to_string());
            return None;
        };

        let schema = &self.documents[doc];
        let qualified = match node.attribute("form").map(str::trim) {
            Some("qualified") => true,
            Some("unqualified") => false,
            _ => schema.element_qualified,
        };
        let namespace = if qualified {
            schema.target_namespace.clone()
        } else {
            String::new()
        };

        let declaration =
            self.element_declaration(doc, node, QualifiedName::new(namespace, local_name), false);
        let element = self.set.elements.len();
        self.set.elements.push(declaration);

        Some(ElementParticle {
            element,
            occurs,
            is_reference: false,
        })
    }
}
