use crate::schema_model::{ElementId, ElementParticle, Occurs, Particle, SchemaSet};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Transitively closed members of every substitution group head
#[derive(Debug, Clone, Default)]
pub(crate) struct SubstitutionGroups {
    members: HashMap<ElementId, Vec<ElementId>>,
}

fn push_unique(members: &mut Vec<ElementId>, id: ElementId) {
    if !members.contains(&id) {
        members.push(id);
    }
}

impl SubstitutionGroups {
    pub(crate) fn new(schema: &SchemaSet) -> Self {
        let mut direct: IndexMap<ElementId, Vec<ElementId>> = IndexMap::new();
        for (_, id) in schema.global_elements() {
            let Some(head) = &schema.element(id).substitution_group else {
                continue;
            };

            if let Some(head) = schema.global_element(head) {
                direct.entry(head).or_default().push(id);
            }
        }

        let mut members = HashMap::new();
        let mut visited = HashSet::new();
        for head in direct.keys() {
            resolve(*head, &direct, &mut members, &mut visited);
        }

        SubstitutionGroups { members }
    }

    /// Resolved members of `head` with the head itself last, if it heads a group
    pub(crate) fn members(&self, head: ElementId) -> Option<&[ElementId]> {
        self.members.get(&head).map(Vec::as_slice)
    }

    /// Virtual choice replacing a reference to a substitution group head
    ///
    /// The abstract head is left out and the choice takes over the occurrence
    /// range of the reference. Alternatives are marked as direct declarations,
    /// so they are not resolved as heads a second time.
    pub(crate) fn substitution_choice(
        &self,
        schema: &SchemaSet,
        reference: &ElementParticle,
    ) -> Option<Particle> {
        let members = self.members(reference.element)?;
        let items = members
            .iter()
            .filter(|member| !(**member == reference.element && schema.element(**member).is_abstract))
            .map(|member| {
                Particle::Element(ElementParticle {
                    element: *member,
                    occurs: Occurs::ONCE,
                    is_reference: false,
                })
            })
            .collect();

        Some(Particle::Choice {
            occurs: reference.occurs,
            items,
        })
    }
}

fn resolve(
    head: ElementId,
    direct: &IndexMap<ElementId, Vec<ElementId>>,
    resolved: &mut HashMap<ElementId, Vec<ElementId>>,
    visited: &mut HashSet<ElementId>,
) -> Vec<ElementId> {
    if let Some(members) = resolved.get(&head) {
        return members.clone();
    }

    visited.insert(head);
    let direct_members = direct.get(&head).cloned().unwrap_or_default();
    let mut members = vec![];
    for member in &direct_members {
        push_unique(&mut members, *member);
    }

    for member in &direct_members {
        if !direct.contains_key(member) || (visited.contains(member) && !resolved.contains_key(member)) {
            continue;
        }

        for nested in resolve(*member, direct, resolved, visited) {
            if nested != *member {
                push_unique(&mut members, nested);
            }
        }
    }

    push_unique(&mut members, head);
    resolved.insert(head, members.clone());

    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::QualifiedName;
    use crate::schema_model::{ElementDecl, MaxOccurs};

    fn schema(declarations: &[(&str, Option<&str>, bool)]) -> SchemaSet {
        let mut schema = SchemaSet::default();
        for (name, head, is_abstract) in declarations {
            let mut declaration = ElementDecl::new(QualifiedName::local(*name), true);
            declaration.substitution_group = head.map(QualifiedName::local);
            declaration.is_abstract = *is_abstract;

            let id = schema.elements.len();
            schema.elements.push(declaration);
            schema.global_elements.insert(QualifiedName::local(*name), id);
        }

        schema
    }

    fn names(schema: &SchemaSet, ids: &[ElementId]) -> Vec<String> {
        ids.iter()
            .map(|id| schema.element(*id).name.name.clone())
            .collect()
    }

    #[test]
    fn members_are_closed_transitively() {
        let schema = schema(&[
            ("animal", None, true),
            ("dog", Some("animal"), false),
            ("cat", Some("animal"), false),
            ("puppy", Some("dog"), false),
        ]);
        let groups = SubstitutionGroups::new(&schema);

        let animal = schema.global_element(&QualifiedName::local("animal")).unwrap();
        let dog = schema.global_element(&QualifiedName::local("dog")).unwrap();
        assert_eq!(
            names(&schema, groups.members(animal).unwrap()),
            vec!["dog", "cat", "puppy", "animal"]
        );
        assert_eq!(names(&schema, groups.members(dog).unwrap()), vec!["puppy", "dog"]);

        let cat = schema.global_element(&QualifiedName::local("cat")).unwrap();
        assert!(groups.members(cat).is_none());
    }

    #[test]
    fn choice_drops_abstract_head_and_keeps_occurs() {
        let schema = schema(&[
            ("animal", None, true),
            ("dog", Some("animal"), false),
            ("cat", Some("animal"), false),
        ]);
        let groups = SubstitutionGroups::new(&schema);
        let animal = schema.global_element(&QualifiedName::local("animal")).unwrap();
        let occurs = Occurs::new(0, MaxOccurs::Unbounded);

        let reference = ElementParticle {
            element: animal,
            occurs,
            is_reference: true,
        };
        let Some(Particle::Choice { occurs: choice_occurs, items }) =
            groups.substitution_choice(&schema, &reference)
        else {
            panic!("expected a choice");
        };

        assert_eq!(choice_occurs, occurs);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn substitution_cycles_terminate() {
        let schema = schema(&[("a", Some("b"), false), ("b", Some("a"), false)]);
        let groups = SubstitutionGroups::new(&schema);

        let a = schema.global_element(&QualifiedName::local("a")).unwrap();
        let b = schema.global_element(&QualifiedName::local("b")).unwrap();
        assert_eq!(names(&schema, groups.members(a).unwrap()), vec!["b", "a"]);
        assert_eq!(names(&schema, groups.members(b).unwrap()), vec!["a", "b"]);
    }
}
