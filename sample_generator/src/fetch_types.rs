use crate::names::{QualifiedName, XML_NAMESPACE, XS_NAMESPACE};
use crate::restriction_generator::RestrictionGenerator;
use crate::schema_model::{
    ANY_TYPE, AttributeDecl, AttributeUse, AttributeUseKind, ComplexContent, ComplexType,
    ElementDecl, ElementId, MaxOccurs, Occurs, Particle, ProcessContents, SchemaSet, SimpleType, SimpleVariety,
    TypeDef, TypeId, Wildcard,
};
use indexmap::IndexMap;
use log::debug;
use roxmltree::{Document, Node};
use std::collections::HashMap;

const BUILTIN_SIMPLE_TYPES: &[&str] = &[
    "anySimpleType",
    "anyAtomicType",
    "string",
    "normalizedString",
    "token",
    "language",
    "Name",
    "NCName",
    "ID",
    "IDREF",
    "IDREFS",
    "ENTITY",
    "ENTITIES",
    "NMTOKEN",
    "NMTOKENS",
    "QName",
    "NOTATION",
    "anyURI",
    "boolean",
    "decimal",
    "integer",
    "nonPositiveInteger",
    "negativeInteger",
    "nonNegativeInteger",
    "positiveInteger",
    "long",
    "int",
    "short",
    "byte",
    "unsignedLong",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
    "float",
    "double",
    "duration",
    "dayTimeDuration",
    "yearMonthDuration",
    "dateTime",
    "dateTimeStamp",
    "time",
    "date",
    "gYearMonth",
    "gYear",
    "gMonthDay",
    "gDay",
    "gMonth",
    "hexBinary",
    "base64Binary",
];

/// A schema document together with the defaults its declarations inherit
pub(crate) struct SchemaDocument<'input> {
    pub(crate) document: Document<'input>,
    pub(crate) target_namespace: String,
    /// Included without a target namespace of its own, unqualified references
    /// resolve into the including schema's namespace
    pub(crate) chameleon: bool,
    pub(crate) element_qualified: bool,
    pub(crate) attribute_qualified: bool,
}

impl<'input> SchemaDocument<'input> {
    pub(crate) fn new(document: Document<'input>, inherited_namespace: Option<String>) -> Self {
        let root = document.root_element();
        let declared = root.attribute("targetNamespace").map(str::to_string);
        let chameleon =
            declared.is_none() && inherited_namespace.as_deref().is_some_and(|ns| !ns.is_empty());
        let target_namespace = declared.or(inherited_namespace).unwrap_or_default();
        let element_qualified = root.attribute("elementFormDefault") == Some("qualified");
        let attribute_qualified = root.attribute("attributeFormDefault") == Some("qualified");

        SchemaDocument {
            document,
            target_namespace,
            chameleon,
            element_qualified,
            attribute_qualified,
        }
    }
}

/// Document index and node of a declaration
pub(crate) type SchemaNode<'a, 'input> = (usize, Node<'a, 'input>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildState {
    Pending,
    Building,
    Done,
}

pub(crate) fn xs_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(|child| child.is_element() && child.tag_name().namespace() == Some(XS_NAMESPACE))
}

pub(crate) fn is_true(node: Node, attribute: &str) -> bool {
    matches!(node.attribute(attribute).map(str::trim), Some("true") | Some("1"))
}

fn merge_uses(base: Vec<AttributeUse>, own: Vec<AttributeUse>) -> Vec<AttributeUse> {
    let mut uses = base;
    for attribute_use in own {
        insert_use(&mut uses, attribute_use);
    }

    uses
}

fn insert_use(uses: &mut Vec<AttributeUse>, attribute_use: AttributeUse) {
    let name = &attribute_use.declaration.name;
    match uses.iter().position(|existing| &existing.declaration.name == name) {
        Some(position) => uses[position] = attribute_use,
        None => uses.push(attribute_use),
    }
}

fn xml_attribute_type(local_name: &str) -> &'static str {
    match local_name {
        "lang" => "language",
        "space" => "NCName",
        "base" => "anyURI",
        "id" => "ID",
        _ => "string",
    }
}

fn facets(node: Node) -> RestrictionGenerator {
    let mut generator = RestrictionGenerator::new();
    for child in xs_children(node) {
        if let Some(value) = child.attribute("value") {
            generator.add_facet(child.tag_name().name(), value);
        }
    }

    generator
}

/// Compiles parsed schema documents into a [`SchemaSet`]
///
/// Global declarations are registered first, in document order, so that
/// references can be resolved regardless of where they are declared. Named
/// types and global elements are then built on demand; a type is only
/// required to be complete when it is used as a derivation base.
pub(crate) struct SchemaCompiler<'a, 'input> {
    pub(crate) documents: &'a [SchemaDocument<'input>],
    pub(crate) set: SchemaSet,
    pub(crate) diagnostics: Vec<String>,
    pub(crate) element_nodes: HashMap<ElementId, SchemaNode<'a, 'input>>,
    pub(crate) element_states: HashMap<ElementId, BuildState>,
    type_nodes: HashMap<TypeId, SchemaNode<'a, 'input>>,
    type_states: HashMap<TypeId, BuildState>,
    group_nodes: HashMap<QualifiedName, SchemaNode<'a, 'input>>,
    attribute_group_nodes: HashMap<QualifiedName, SchemaNode<'a, 'input>>,
    attribute_nodes: IndexMap<QualifiedName, SchemaNode<'a, 'input>>,
    builtin_types: HashMap<String, TypeId>,
    active_groups: Vec<QualifiedName>,
}

impl<'a, 'input> SchemaCompiler<'a, 'input> {
    pub(crate) fn new(documents: &'a [SchemaDocument<'input>]) -> Self {
        SchemaCompiler {
            documents,
            set: SchemaSet::default(),
            diagnostics: vec![],
            element_nodes: HashMap::new(),
            element_states: HashMap::new(),
            type_nodes: HashMap::new(),
            type_states: HashMap::new(),
            group_nodes: HashMap::new(),
            attribute_group_nodes: HashMap::new(),
            attribute_nodes: IndexMap::new(),
            builtin_types: HashMap::new(),
            active_groups: vec![],
        }
    }

    pub(crate) fn compile(mut self) -> (SchemaSet, Vec<String>) {
        let documents = self.documents;
        for (doc, schema) in documents.iter().enumerate() {
            let root = schema.document.root_element();
            if root.tag_name().name() != "schema" || root.tag_name().namespace() != Some(XS_NAMESPACE)
            {
                self.diagnostics
                    .push(format!("Document {} is not an XML schema", doc));
                continue;
            }

            self.register_globals(doc, root);
        }

        let attribute_names: Vec<QualifiedName> = self.attribute_nodes.keys().cloned().collect();
        for name in attribute_names {
            let (doc, node) = self.attribute_nodes[&name];
            let declaration = self.attribute_declaration(doc, node, name.clone());
            self.set.global_attributes.insert(name, declaration);
        }

        let type_ids: Vec<TypeId> = self.set.global_types.values().copied().collect();
        for id in type_ids {
            self.ensure_type(id);
        }

        let element_ids: Vec<ElementId> = self.set.global_elements.values().copied().collect();
        for id in element_ids {
            self.ensure_element(id);
        }

        debug!(
            "Compiled {} global elements, {} global types, {} global attributes",
            self.set.global_elements.len(),
            self.set.global_types.len(),
            self.set.global_attributes.len()
        );

        (self.set, self.diagnostics)
    }

    fn register_globals(&mut self, doc: usize, parent: Node<'a, 'input>) {
        for node in xs_children(parent) {
            let kind = node.tag_name().name();
            if kind == "override" {
                self.register_globals(doc, node);
                continue;
            }

            let Some(local_name) = node.attribute("name") else {
                continue;
            };
            let name = QualifiedName::new(self.documents[doc].target_namespace.clone(), local_name);

            match kind {
                "element" => {
                    if self.set.global_elements.contains_key(&name) {
                        continue;
                    }
                    let id = self.set.elements.len();
                    self.set
                        .elements
                        .push(ElementDecl::new(name.clone(), true));
                    self.set.global_elements.insert(name, id);
                    self.element_nodes.insert(id, (doc, node));
                    self.element_states.insert(id, BuildState::Pending);
                }
                "complexType" | "simpleType" => {
                    if self.set.global_types.contains_key(&name) {
                        continue;
                    }
                    let id = self.set.types.len();
                    self.set.types.push(TypeDef::AnyType);
                    self.set.global_types.insert(name, id);
                    self.type_nodes.insert(id, (doc, node));
                    self.type_states.insert(id, BuildState::Pending);
                }
                "group" => {
                    self.group_nodes.entry(name).or_insert((doc, node));
                }
                "attributeGroup" => {
                    self.attribute_group_nodes.entry(name).or_insert((doc, node));
                }
                "attribute" => {
                    self.attribute_nodes.entry(name).or_insert((doc, node));
                }
                _ => {}
            }
        }
    }

    pub(crate) fn resolve_qname(&self, doc: usize, node: Node, value: &str) -> QualifiedName {
        let value = value.trim();
        let (prefix, local_name) = match value.split_once(':') {
            Some((prefix, local_name)) => (Some(prefix), local_name),
            None => (None, value),
        };

        let namespace = if prefix == Some("xml") {
            XML_NAMESPACE
        } else {
            node.lookup_namespace_uri(prefix).unwrap_or("")
        };

        let schema = &self.documents[doc];
        if namespace.is_empty() && schema.chameleon {
            return QualifiedName::new(schema.target_namespace.clone(), local_name);
        }

        QualifiedName::new(namespace, local_name)
    }

    pub(crate) fn type_by_name(&mut self, name: &QualifiedName) -> Option<TypeId> {
        if name.namespace == XS_NAMESPACE {
            return self.builtin_type(&name.name);
        }

        self.set.global_types.get(name).copied()
    }

    fn builtin_type(&mut self, local_name: &str) -> Option<TypeId> {
        if local_name == "anyType" {
            return Some(ANY_TYPE);
        }

        if !BUILTIN_SIMPLE_TYPES.contains(&local_name) {
            return None;
        }

        if let Some(id) = self.builtin_types.get(local_name) {
            return Some(*id);
        }

        let id = self.set.types.len();
        self.set
            .types
            .push(TypeDef::Simple(SimpleType::builtin(local_name)));
        self.builtin_types.insert(local_name.to_string(), id);

        Some(id)
    }

    pub(crate) fn type_reference(&mut self, doc: usize, node: Node, value: &str) -> Option<TypeId> {
        let name = self.resolve_qname(doc, node, value);
        let id = self.type_by_name(&name);
        if id.is_none() {
            self.diagnostics
                .push(format!("Type '{}' is not declared", name));
        }

        id
    }

    /// Build a named type if it has not been built yet. Returns false when the
    /// type is part of its own derivation chain.
    pub(crate) fn ensure_type(&mut self, id: TypeId) -> bool {
        match self.type_states.get(&id) {
            Some(BuildState::Building) => return false,
            Some(BuildState::Pending) => {}
            _ => return true,
        }

        self.type_states.insert(id, BuildState::Building);
        let (doc, node) = self.type_nodes[&id];
        let name = node
            .attribute("name")
            .map(|local_name| QualifiedName::new(self.documents[doc].target_namespace.clone(), local_name));

        let type_def = if node.tag_name().name() == "complexType" {
            TypeDef::Complex(self.complex_type(doc, node, name))
        } else {
            let simple = self
                .simple_type(doc, node, name)
                .unwrap_or_else(SimpleType::any_simple_type);
            TypeDef::Simple(simple)
        };

        self.set.types[id] = type_def;
        self.type_states.insert(id, BuildState::Done);

        true
    }

    fn complete_type(&mut self, id: TypeId) -> Option<TypeDef> {
        if !self.ensure_type(id) {
            let name = self
                .set
                .global_types
                .iter()
                .find(|(_, type_id)| **type_id == id)
                .map(|(name, _)| name.to_string())
                .unwrap_or_default();
            self.diagnostics
                .push(format!("Type '{}' is derived from itself", name));
            return None;
        }

        Some(self.set.types[id].clone())
    }

    pub(crate) fn simple_type_of(&mut self, id: TypeId) -> Option<SimpleType> {
        match self.complete_type(id)? {
            TypeDef::AnyType => Some(SimpleType::any_simple_type()),
            TypeDef::Simple(simple) => Some(simple),
            TypeDef::Complex(complex) => match complex.content {
                ComplexContent::Simple(simple) => Some(simple),
                _ => {
                    let name = complex.name.map(|name| name.to_string()).unwrap_or_default();
                    self.diagnostics
                        .push(format!("Type '{}' is not a simple type", name));
                    None
                }
            },
        }
    }

    pub(crate) fn anonymous_type(&mut self, doc: usize, node: Node<'a, 'input>) -> TypeId {
        let type_def = if node.tag_name().name() == "complexType" {
            TypeDef::Complex(self.complex_type(doc, node, None))
        } else {
            let simple = self
                .simple_type(doc, node, None)
                .unwrap_or_else(SimpleType::any_simple_type);
            TypeDef::Simple(simple)
        };

        let id = self.set.types.len();
        self.set.types.push(type_def);

        id
    }

    fn complex_type(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
        name: Option<QualifiedName>,
    ) -> ComplexType {
        let mut complex = ComplexType::new(name);
        complex.is_abstract = is_true(node, "abstract");
        complex.mixed = is_true(node, "mixed");
        self.complex_children(doc, node, &mut complex);

        complex
    }

    fn complex_children(&mut self, doc: usize, node: Node<'a, 'input>, complex: &mut ComplexType) {
        for child in xs_children(node) {
            match child.tag_name().name() {
                "sequence" | "choice" | "all" | "group" => {
                    if let Some(particle) = self.particle(doc, child) {
                        complex.content = ComplexContent::Particle(particle);
                    }
                }
                "attribute" | "attributeGroup" | "anyAttribute" => self.attribute_content(
                    doc,
                    child,
                    &mut complex.attribute_uses,
                    &mut complex.attribute_wildcard,
                ),
                "simpleContent" => self.simple_content(doc, child, complex),
                "complexContent" => self.complex_content(doc, child, complex),
                _ => {}
            }
        }
    }

    fn derivation_base(&mut self, doc: usize, derivation: Node<'a, 'input>) -> Option<(TypeId, TypeDef)> {
        let base = derivation.attribute("base")?;
        let id = self.type_reference(doc, derivation, base)?;
        let type_def = self.complete_type(id)?;

        Some((id, type_def))
    }

    fn complex_content(&mut self, doc: usize, node: Node<'a, 'input>, complex: &mut ComplexType) {
        if node.attribute("mixed").is_some() {
            complex.mixed = is_true(node, "mixed");
        }

        for derivation in xs_children(node) {
            let kind = derivation.tag_name().name();
            if kind != "extension" && kind != "restriction" {
                continue;
            }

            let mut own = ComplexType::new(None);
            self.complex_children(doc, derivation, &mut own);

            let base = self.derivation_base(doc, derivation);
            if let Some((id, _)) = &base {
                complex.base = Some(*id);
            }

            match (kind, base.map(|(_, type_def)| type_def)) {
                ("extension", Some(TypeDef::Complex(base))) => {
                    complex.content = match (base.content, own.content) {
                        (ComplexContent::Particle(inherited), ComplexContent::Particle(added)) => {
                            ComplexContent::Particle(Particle::Sequence {
                                occurs: Occurs::ONCE,
                                items: vec![inherited, added],
                            })
                        }
                        (inherited @ ComplexContent::Particle(_), ComplexContent::Empty) => {
                            inherited
                        }
                        (_, added) => added,
                    };
                    complex.attribute_uses = merge_uses(base.attribute_uses, own.attribute_uses);
                    complex.attribute_wildcard = own.attribute_wildcard.or(base.attribute_wildcard);
                }
                ("restriction", Some(TypeDef::Complex(base))) => {
                    complex.content = own.content;
                    complex.attribute_uses = merge_uses(base.attribute_uses, own.attribute_uses);
                    complex.attribute_wildcard = own.attribute_wildcard;
                }
                _ => {
                    complex.content = own.content;
                    complex.attribute_uses = own.attribute_uses;
                    complex.attribute_wildcard = own.attribute_wildcard;
                }
            }
        }
    }

    fn simple_content(&mut self, doc: usize, node: Node<'a, 'input>, complex: &mut ComplexType) {
        for derivation in xs_children(node) {
            let kind = derivation.tag_name().name();
            if kind != "extension" && kind != "restriction" {
                continue;
            }

            let mut own = ComplexType::new(None);
            self.complex_children(doc, derivation, &mut own);

            let base = self.derivation_base(doc, derivation);
            if let Some((id, _)) = &base {
                complex.base = Some(*id);
            }

            let (mut simple, base_uses, base_wildcard) = match base.map(|(_, type_def)| type_def) {
                Some(TypeDef::Simple(simple)) => (simple, vec![], None),
                Some(TypeDef::Complex(base)) => {
                    let simple = match base.content {
                        ComplexContent::Simple(simple) => simple,
                        _ => SimpleType::any_simple_type(),
                    };
                    (simple, base.attribute_uses, base.attribute_wildcard)
                }
                _ => (SimpleType::any_simple_type(), vec![], None),
            };

            if kind == "restriction" {
                let inline = xs_children(derivation).find(|child| child.tag_name().name() == "simpleType");
                if let Some(inline) = inline {
                    if let Some(inline_type) = self.simple_type(doc, inline, None) {
                        simple = inline_type;
                    }
                }
                simple.facets = simple.facets.restrict(&facets(derivation));
            }

            complex.content = ComplexContent::Simple(simple);
            complex.attribute_uses = merge_uses(base_uses, own.attribute_uses);
            complex.attribute_wildcard = if kind == "extension" {
                own.attribute_wildcard.or(base_wildcard)
            } else {
                own.attribute_wildcard
            };
        }
    }

    pub(crate) fn simple_type(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
        name: Option<QualifiedName>,
    ) -> Option<SimpleType> {
        for child in xs_children(node) {
            match child.tag_name().name() {
                "restriction" => {
                    let base = self.referenced_or_inline(doc, child, "base")?;
                    return Some(SimpleType {
                        name,
                        builtin: base.builtin,
                        variety: base.variety,
                        facets: base.facets.restrict(&facets(child)),
                    });
                }
                "list" => {
                    let item = self.referenced_or_inline(doc, child, "itemType")?;
                    return Some(SimpleType {
                        name,
                        builtin: item.builtin.clone(),
                        variety: SimpleVariety::List(Box::new(item)),
                        facets: RestrictionGenerator::new(),
                    });
                }
                "union" => {
                    let mut members = vec![];
                    if let Some(member_types) = child.attribute("memberTypes") {
                        for member in member_types.split_whitespace() {
                            if let Some(simple) = self
                                .type_reference(doc, child, member)
                                .and_then(|id| self.simple_type_of(id))
                            {
                                members.push(simple);
                            }
                        }
                    }
                    for inline in xs_children(child).filter(|inline| inline.tag_name().name() == "simpleType") {
                        if let Some(simple) = self.simple_type(doc, inline, None) {
                            members.push(simple);
                        }
                    }

                    let Some(first) = members.first() else {
                        self.diagnostics
                            .push("Union type has no member types".to_string());
                        return None;
                    };

                    return Some(SimpleType {
                        name,
                        builtin: first.builtin.clone(),
                        variety: SimpleVariety::Union(members),
                        facets: RestrictionGenerator::new(),
                    });
                }
                _ => {}
            }
        }

        self.diagnostics
            .push("Simple type has no restriction, list or union".to_string());
        None
    }

    fn referenced_or_inline(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
        attribute: &str,
    ) -> Option<SimpleType> {
        if let Some(reference) = node.attribute(attribute) {
            let id = self.type_reference(doc, node, reference)?;
            return self.simple_type_of(id);
        }

        let inline = xs_children(node).find(|child| child.tag_name().name() == "simpleType");
        match inline {
            Some(inline) => self.simple_type(doc, inline, None),
            None => {
                self.diagnostics.push(format!(
                    "Simple type derivation is missing its '{}'",
                    attribute
                ));
                None
            }
        }
    }

    pub(crate) fn occurs(&mut self, node: Node) -> Occurs {
        let min = match node.attribute("minOccurs").map(str::trim) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                self.diagnostics
                    .push(format!("Invalid minOccurs value '{}'", value));
                1
            }),
            None => 1,
        };

        let max = match node.attribute("maxOccurs").map(str::trim) {
            Some("unbounded") => MaxOccurs::Unbounded,
            Some(value) => MaxOccurs::Bounded(value.parse().unwrap_or_else(|_| {
                self.diagnostics
                    .push(format!("Invalid maxOccurs value '{}'", value));
                1
            })),
            None => MaxOccurs::Bounded(1),
        };

        Occurs::new(min, max)
    }

    fn wildcard(&self, doc: usize, node: Node, occurs: Occurs) -> Wildcard {
        let namespace = node
            .attribute("namespace")
            .map(str::trim)
            .filter(|namespace| !namespace.is_empty())
            .unwrap_or("##any")
            .to_string();

        let process_contents = match node.attribute("processContents").map(str::trim) {
            Some("lax") => ProcessContents::Lax,
            Some("skip") => ProcessContents::Skip,
            _ => ProcessContents::Strict,
        };

        Wildcard {
            namespace,
            process_contents,
            occurs,
            schema_namespace: self.documents[doc].target_namespace.clone(),
        }
    }

    fn particle(&mut self, doc: usize, node: Node<'a, 'input>) -> Option<Particle> {
        match node.tag_name().name() {
            "sequence" => {
                let occurs = self.occurs(node);
                let items = self.particles(doc, node);
                Some(Particle::Sequence { occurs, items })
            }
            "choice" => {
                let occurs = self.occurs(node);
                let items = self.particles(doc, node);
                Some(Particle::Choice { occurs, items })
            }
            "all" => {
                let occurs = self.occurs(node);
                let items = self.particles(doc, node);
                Some(Particle::All { occurs, items })
            }
            "element" => self.element_particle(doc, node).map(Particle::Element),
            "any" => {
                let occurs = self.occurs(node);
                Some(Particle::Any(self.wildcard(doc, node, occurs)))
            }
            "group" => self.group_reference(doc, node),
            _ => None,
        }
    }

    fn particles(&mut self, doc: usize, node: Node<'a, 'input>) -> Vec<Particle> {
        xs_children(node)
            .filter_map(|child| self.particle(doc, child))
            .collect()
    }

    fn group_reference(&mut self, doc: usize, node: Node<'a, 'input>) -> Option<Particle> {
        let occurs = self.occurs(node);
        let reference = node.attribute("ref")?;
        let name = self.resolve_qname(doc, node, reference);

        let Some((group_doc, group_node)) = self.group_nodes.get(&name).copied() else {
            self.diagnostics
                .push(format!("Group '{}' is not declared", name));
            return None;
        };

        if self.active_groups.contains(&name) {
            self.diagnostics
                .push(format!("Group '{}' references itself", name));
            return None;
        }

        let model = xs_children(group_node)
            .find(|child| matches!(child.tag_name().name(), "sequence" | "choice" | "all"));

        self.active_groups.push(name);
        let particle = match model {
            Some(model) => self.particle(group_doc, model),
            None => None,
        };
        self.active_groups.pop();

        particle.map(|particle| particle.with_occurs(occurs))
    }

    fn attribute_content(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
        uses: &mut Vec<AttributeUse>,
        wildcard: &mut Option<Wildcard>,
    ) {
        match node.tag_name().name() {
            "attribute" => {
                if let Some(attribute_use) = self.attribute_use(doc, node) {
                    insert_use(uses, attribute_use);
                }
            }
            "attributeGroup" => self.attribute_group_reference(doc, node, uses, wildcard),
            "anyAttribute" => *wildcard = Some(self.wildcard(doc, node, Occurs::ONCE)),
            _ => {}
        }
    }

    fn attribute_group_reference(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
        uses: &mut Vec<AttributeUse>,
        wildcard: &mut Option<Wildcard>,
    ) {
        let Some(reference) = node.attribute("ref") else {
            return;
        };
        let name = self.resolve_qname(doc, node, reference);

        let Some((group_doc, group_node)) = self.attribute_group_nodes.get(&name).copied() else {
            self.diagnostics
                .push(format!("Attribute group '{}' is not declared", name));
            return;
        };

        if self.active_groups.contains(&name) {
            self.diagnostics
                .push(format!("Attribute group '{}' references itself", name));
            return;
        }

        self.active_groups.push(name);
        for child in xs_children(group_node) {
            self.attribute_content(group_doc, child, uses, wildcard);
        }
        self.active_groups.pop();
    }

    fn attribute_use(&mut self, doc: usize, node: Node<'a, 'input>) -> Option<AttributeUse> {
        let use_kind = match node.attribute("use").map(str::trim) {
            Some("required") => AttributeUseKind::Required,
            Some("prohibited") => AttributeUseKind::Prohibited,
            _ => AttributeUseKind::Optional,
        };

        let mut declaration = if let Some(reference) = node.attribute("ref") {
            let name = self.resolve_qname(doc, node, reference);
            match self.set.global_attributes.get(&name) {
                Some(declaration) => declaration.clone(),
                None if name.namespace == XML_NAMESPACE => {
                    let simple_type = SimpleType::builtin(xml_attribute_type(&name.name));
                    AttributeDecl {
                        name,
                        simple_type: Some(simple_type),
                        default_value: None,
                        fixed_value: None,
                    }
                }
                None => {
                    self.diagnostics
                        .push(format!("Attribute '{}' is not declared", name));
                    return None;
                }
            }
        } else {
            let local_name = node.attribute("name")?;
            let schema = &self.documents[doc];
            let qualified = match node.attribute("form").map(str::trim) {
                Some("qualified") => true,
                Some("unqualified") => false,
                _ => schema.attribute_qualified,
            };
            let namespace = if qualified {
                schema.target_namespace.clone()
            } else {
                String::new()
            };

            self.attribute_declaration(doc, node, QualifiedName::new(namespace, local_name))
        };

        if let Some(default_value) = node.attribute("default") {
            declaration.default_value = Some(default_value.to_string());
        }
        if let Some(fixed_value) = node.attribute("fixed") {
            declaration.fixed_value = Some(fixed_value.to_string());
        }

        Some(AttributeUse {
            declaration,
            use_kind,
        })
    }

    fn attribute_declaration(
        &mut self,
        doc: usize,
        node: Node<'a, 'input>,
        name: QualifiedName,
    ) -> AttributeDecl {
        let simple_type = if let Some(type_name) = node.attribute("type") {
            self.type_reference(doc, node, type_name)
                .and_then(|id| self.simple_type_of(id))
        } else if let Some(inline) =
            xs_children(node).find(|child| child.tag_name().name() == "simpleType")
        {
            self.simple_type(doc, inline, None)
        } else {
            Some(SimpleType::any_simple_type())
        };

        AttributeDecl {
            name,
            simple_type,
            default_value: node.attribute("default").map(str::to_string),
            fixed_value: node.attribute("fixed").map(str::to_string),
        }
    }
}
