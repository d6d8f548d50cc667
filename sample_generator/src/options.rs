use crate::error::XMLGeneratorError;
use crate::names::QualifiedName;

/// Options controlling the shape of the generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Cap applied to unbounded or large `maxOccurs` values
    pub occurs_threshold: usize,
    /// Number of items generated for list datatypes
    pub list_length: usize,
    /// Preferred root element; the first non-abstract global element is used
    /// when it is absent or cannot be found
    pub root_element: Option<QualifiedName>,
    /// Seed of the random generator used for sample values
    pub seed: u64,
    /// Spaces per nesting level in the output, 0 writes everything on one line
    pub indent: usize,
}

pub const DEFAULT_OCCURS_THRESHOLD: usize = 5;
pub const DEFAULT_LIST_LENGTH: usize = 3;
pub const DEFAULT_SEED: u64 = 0x5eed_1e55_c0ff_ee00;
pub const DEFAULT_INDENT: usize = 2;

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            occurs_threshold: DEFAULT_OCCURS_THRESHOLD,
            list_length: DEFAULT_LIST_LENGTH,
            root_element: None,
            seed: DEFAULT_SEED,
            indent: DEFAULT_INDENT,
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occurs_threshold(mut self, occurs_threshold: usize) -> Self {
        self.occurs_threshold = occurs_threshold;
        self
    }

    pub fn with_list_length(mut self, list_length: usize) -> Self {
        self.list_length = list_length;
        self
    }

    pub fn with_root_element(mut self, root_element: QualifiedName) -> Self {
        self.root_element = Some(root_element);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), XMLGeneratorError> {
        if self.occurs_threshold == 0 {
            return Err(XMLGeneratorError::ConfigurationError(
                "Occurs threshold must be a positive integer".to_string(),
            ));
        }

        if self.list_length == 0 {
            return Err(XMLGeneratorError::ConfigurationError(
                "List length must be a positive integer".to_string(),
            ));
        }

        Ok(())
    }
}
