use crate::generate::ValueGenerator;
use crate::names::QualifiedName;
use crate::schema_model::AttributeUseKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGenerator {
    pub name: QualifiedName,
    pub default_value: Option<String>,
    pub fixed_value: Option<String>,
    pub use_kind: AttributeUseKind,
    pub value_generator: Option<ValueGenerator>,
}

impl AttributeGenerator {
    pub(crate) fn new(name: QualifiedName, use_kind: AttributeUseKind) -> Self {
        AttributeGenerator {
            name,
            default_value: None,
            fixed_value: None,
            use_kind,
            value_generator: None,
        }
    }

    pub(crate) fn preset_value(&self) -> Option<&str> {
        self.fixed_value
            .as_deref()
            .or(self.default_value.as_deref())
    }
}
