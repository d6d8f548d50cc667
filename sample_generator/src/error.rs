use thiserror::Error;

/// XML generator error
///
/// Enum which manages errors in the XMLSampleGenerator crate. Gaps found while
/// resolving the schema (unmatched wildcards, abstract types without a
/// concrete derivation, no usable root) are not errors: they are reported as
/// comments inside the generated document.
#[derive(Debug, Error)]
pub enum XMLGeneratorError {
    /// The generator was called with an empty schema or invalid options
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
    /// Error parsing the input XSD file contents
    #[error("XSD Parser encountered an error: {0}")]
    XSDParserError(String),
    /// The schema could not be compiled into a usable component model
    #[error("Schema compilation failed: {}", .0.join("; "))]
    SchemaCompileError(Vec<String>),
    /// Error reading a schema document or writing the output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error generating the output XML structure
    #[error("XML writer encountered an error: {0}")]
    XMLBuilderError(String),
}
