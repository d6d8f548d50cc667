use std::fmt;
use std::str::FromStr;

pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace given to placeholder nodes created for `##other` wildcards
pub const OTHER_NAMESPACE: &str = "otherNS";

/// Namespace qualified name of a schema component or instance node
///
/// An empty `namespace` means the name is not in any namespace. The textual
/// form uses Clark notation, `{namespace}name`, or just `name` when there is no
/// namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedName {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        QualifiedName::new("", name)
    }

    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.name)
        }
    }
}

impl FromStr for QualifiedName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err("Qualified name is empty".to_string());
        }

        let Some(rest) = value.strip_prefix('{') else {
            return Ok(QualifiedName::local(value));
        };

        match rest.split_once('}') {
            Some((namespace, name)) if !name.is_empty() => Ok(QualifiedName::new(namespace, name)),
            _ => Err(format!("Invalid qualified name: {}", value)),
        }
    }
}
