use crate::names::QualifiedName;
use crate::schema_model::{ElementId, SchemaSet};
use log::{info, warn};

/// Pick the global element the document is generated for
///
/// A preferred name is matched exactly first, then by local name alone.
/// Otherwise, or when nothing matches, the first non-abstract global element
/// in declaration order is used.
pub(crate) fn find_root_element(
    schema: &SchemaSet,
    preferred: Option<&QualifiedName>,
) -> Option<ElementId> {
    if let Some(name) = preferred {
        if let Some(id) = schema.global_element(name) {
            info!("Using root element {}", name);
            return Some(id);
        }

        let by_local_name = schema
            .global_elements()
            .find(|(candidate, _)| candidate.name == name.name);
        if let Some((candidate, id)) = by_local_name {
            info!("Using root element {} for requested {}", candidate, name);
            return Some(id);
        }

        warn!("Root element {} is not declared in the schema", name);
    }

    let root = schema
        .global_elements()
        .find(|(_, id)| !schema.element(*id).is_abstract);

    match root {
        Some((name, id)) => {
            info!("Using root element {}", name);
            Some(id)
        }
        None => {
            warn!("Schema has no global element that can be used as root");
            None
        }
    }
}
