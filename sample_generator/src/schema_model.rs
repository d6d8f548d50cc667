//! Compiled schema components consumed by the template builder.
//!
//! Declarations live in arenas inside [`SchemaSet`] and refer to each other by
//! index, so recursive content models are plain data.

use crate::names::QualifiedName;
use crate::restriction_generator::RestrictionGenerator;
use indexmap::IndexMap;

pub type ElementId = usize;
pub type TypeId = usize;

/// Index of the built-in `xs:anyType` in every [`SchemaSet`]
pub const ANY_TYPE: TypeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOccurs {
    Bounded(usize),
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    pub min: usize,
    pub max: MaxOccurs,
}

impl Occurs {
    pub const ONCE: Occurs = Occurs {
        min: 1,
        max: MaxOccurs::Bounded(1),
    };

    pub fn new(min: usize, max: MaxOccurs) -> Self {
        Occurs { min, max }
    }

    /// Number of instances to generate: `maxOccurs` capped by the threshold,
    /// never below `minOccurs`
    pub fn count(&self, threshold: usize) -> usize {
        let capped = match self.max {
            MaxOccurs::Unbounded => threshold,
            MaxOccurs::Bounded(max) => max.min(threshold),
        };

        capped.max(self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessContents {
    Strict,
    Lax,
    Skip,
}

/// `xs:any` or `xs:anyAttribute`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcard {
    /// Raw namespace constraint, `##any` when the schema omits it
    pub namespace: String,
    pub process_contents: ProcessContents,
    pub occurs: Occurs,
    /// Target namespace of the schema document declaring the wildcard
    pub schema_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementParticle {
    pub element: ElementId,
    pub occurs: Occurs,
    /// The particle is `<xs:element ref="..."/>` rather than a local declaration
    pub is_reference: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Particle {
    Sequence { occurs: Occurs, items: Vec<Particle> },
    Choice { occurs: Occurs, items: Vec<Particle> },
    All { occurs: Occurs, items: Vec<Particle> },
    Element(ElementParticle),
    Any(Wildcard),
}

impl Particle {
    pub fn occurs(&self) -> Occurs {
        match self {
            Particle::Sequence { occurs, .. } => *occurs,
            Particle::Choice { occurs, .. } => *occurs,
            Particle::All { occurs, .. } => *occurs,
            Particle::Element(element) => element.occurs,
            Particle::Any(wildcard) => wildcard.occurs,
        }
    }

    pub(crate) fn with_occurs(mut self, new_occurs: Occurs) -> Particle {
        match &mut self {
            Particle::Sequence { occurs, .. } => *occurs = new_occurs,
            Particle::Choice { occurs, .. } => *occurs = new_occurs,
            Particle::All { occurs, .. } => *occurs = new_occurs,
            Particle::Element(element) => element.occurs = new_occurs,
            Particle::Any(wildcard) => wildcard.occurs = new_occurs,
        }

        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleVariety {
    Atomic,
    List(Box<SimpleType>),
    Union(Vec<SimpleType>),
}

/// A simple type flattened onto the built-in primitive it restricts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleType {
    pub name: Option<QualifiedName>,
    /// Local name of the XSD built-in type at the root of the restriction chain
    pub builtin: String,
    pub variety: SimpleVariety,
    pub facets: RestrictionGenerator,
}

impl SimpleType {
    pub fn builtin(local_name: &str) -> SimpleType {
        let variety = match local_name {
            "IDREFS" => SimpleVariety::List(Box::new(SimpleType::builtin("IDREF"))),
            "NMTOKENS" => SimpleVariety::List(Box::new(SimpleType::builtin("NMTOKEN"))),
            "ENTITIES" => SimpleVariety::List(Box::new(SimpleType::builtin("ENTITY"))),
            _ => SimpleVariety::Atomic,
        };

        SimpleType {
            name: Some(QualifiedName::new(crate::names::XS_NAMESPACE, local_name)),
            builtin: local_name.to_string(),
            variety,
            facets: RestrictionGenerator::new(),
        }
    }

    pub fn any_simple_type() -> SimpleType {
        SimpleType::builtin("anySimpleType")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeUseKind {
    Required,
    Optional,
    Prohibited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: QualifiedName,
    /// `None` when the declared type could not be resolved
    pub simple_type: Option<SimpleType>,
    pub default_value: Option<String>,
    pub fixed_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeUse {
    pub declaration: AttributeDecl,
    pub use_kind: AttributeUseKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexContent {
    Empty,
    Simple(SimpleType),
    Particle(Particle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexType {
    pub name: Option<QualifiedName>,
    pub is_abstract: bool,
    pub mixed: bool,
    pub base: Option<TypeId>,
    pub content: ComplexContent,
    pub attribute_uses: Vec<AttributeUse>,
    pub attribute_wildcard: Option<Wildcard>,
}

impl ComplexType {
    pub(crate) fn new(name: Option<QualifiedName>) -> Self {
        ComplexType {
            name,
            is_abstract: false,
            mixed: false,
            base: None,
            content: ComplexContent::Empty,
            attribute_uses: vec![],
            attribute_wildcard: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    AnyType,
    Simple(SimpleType),
    Complex(ComplexType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl {
    pub name: QualifiedName,
    pub type_id: TypeId,
    pub nillable: bool,
    pub is_abstract: bool,
    pub default_value: Option<String>,
    pub fixed_value: Option<String>,
    pub substitution_group: Option<QualifiedName>,
    pub global: bool,
}

impl ElementDecl {
    pub(crate) fn new(name: QualifiedName, global: bool) -> Self {
        ElementDecl {
            name,
            type_id: ANY_TYPE,
            nillable: false,
            is_abstract: false,
            default_value: None,
            fixed_value: None,
            substitution_group: None,
            global,
        }
    }
}

/// All components of a compiled schema and its includes/imports
#[derive(Debug, Clone)]
pub struct SchemaSet {
    pub(crate) elements: Vec<ElementDecl>,
    pub(crate) global_elements: IndexMap<QualifiedName, ElementId>,
    pub(crate) types: Vec<TypeDef>,
    pub(crate) global_types: IndexMap<QualifiedName, TypeId>,
    pub(crate) global_attributes: IndexMap<QualifiedName, AttributeDecl>,
}

impl Default for SchemaSet {
    fn default() -> Self {
        SchemaSet {
            elements: vec![],
            global_elements: IndexMap::new(),
            types: vec![TypeDef::AnyType],
            global_types: IndexMap::new(),
            global_attributes: IndexMap::new(),
        }
    }
}

impl SchemaSet {
    pub fn element(&self, id: ElementId) -> &ElementDecl {
        &self.elements[id]
    }

    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id]
    }

    pub fn global_element(&self, name: &QualifiedName) -> Option<ElementId> {
        self.global_elements.get(name).copied()
    }

    pub fn global_elements(&self) -> impl Iterator<Item = (&QualifiedName, ElementId)> {
        self.global_elements.iter().map(|(name, id)| (name, *id))
    }

    pub fn global_types(&self) -> impl Iterator<Item = (&QualifiedName, TypeId)> {
        self.global_types.iter().map(|(name, id)| (name, *id))
    }

    pub fn global_attributes(&self) -> impl Iterator<Item = &AttributeDecl> {
        self.global_attributes.values()
    }

    /// Whether `derived` is `base` or reaches it through its base type chain
    pub fn is_derived_from(&self, derived: TypeId, base: TypeId) -> bool {
        let mut current = Some(derived);
        let mut steps = 0;
        while let Some(id) = current {
            if id == base {
                return true;
            }

            steps += 1;
            if steps > self.types.len() {
                return false;
            }

            current = match &self.types[id] {
                TypeDef::Complex(complex) => complex.base,
                _ => None,
            };
        }

        false
    }
}
