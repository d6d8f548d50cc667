mod attribute_generator;
mod builder;
mod element_generator;
mod error;
mod fetch_elements;
mod fetch_types;
mod find_root;
mod generate;
mod generate_output;
mod generate_schema;
mod group_generator;
mod names;
mod options;
mod restriction_generator;
mod schema_model;
mod substitution;
mod template;
mod type_generator;
mod wildcard;

use crate::builder::TemplateBuilder;
use crate::generate_output::OutputWriter;
use crate::generate_schema::{check_schema, compile_schema};
use log::warn;
use std::io::Write;
use std::path::Path;

pub use crate::attribute_generator::AttributeGenerator;
pub use crate::element_generator::ElementGenerator;
pub use crate::error::XMLGeneratorError;
pub use crate::generate::{ANY_SIMPLE_TYPE_VALUE, ANY_TYPE_VALUE, ValueGenerator, ValueKind};
pub use crate::generate_schema::SchemaSource;
pub use crate::group_generator::{GroupGenerator, GroupKind};
pub use crate::names::{OTHER_NAMESPACE, QualifiedName, XML_NAMESPACE, XS_NAMESPACE, XSI_NAMESPACE};
pub use crate::options::{
    DEFAULT_INDENT, DEFAULT_LIST_LENGTH, DEFAULT_OCCURS_THRESHOLD, DEFAULT_SEED, GeneratorOptions,
};
pub use crate::restriction_generator::RestrictionGenerator;
pub use crate::schema_model::{
    ANY_TYPE, AttributeDecl, AttributeUse, AttributeUseKind, ComplexContent, ComplexType,
    ElementDecl, ElementId, ElementParticle, MaxOccurs, Occurs, Particle, ProcessContents,
    SchemaSet, SimpleType, SimpleVariety, TypeDef, TypeId, Wildcard,
};
pub use crate::template::{ElementIndex, GroupIndex, InstanceTemplate, TemplateNode};

/// Sample XML generator for a compiled schema
///
/// The schema is loaded, checked and compiled once; every call to
/// [`XmlGenerator::write_xml`] then builds a fresh instance template and
/// serializes it, so repeated calls with the same options produce identical
/// documents.
#[derive(Debug, Clone)]
pub struct XmlGenerator {
    schema: SchemaSet,
    options: GeneratorOptions,
}

impl XmlGenerator {
    /// Compile `source`, logging schema diagnostics as warnings
    pub fn new(source: &SchemaSource, options: GeneratorOptions) -> Result<Self, XMLGeneratorError> {
        Self::with_validation_handler(source, options, |message| {
            warn!("Schema validation: {}", message)
        })
    }

    /// Compile `source`, passing every schema diagnostic to `handler`
    ///
    /// The handler is called before a [`XMLGeneratorError::SchemaCompileError`]
    /// carrying the same messages is returned.
    pub fn with_validation_handler(
        source: &SchemaSource,
        options: GeneratorOptions,
        mut handler: impl FnMut(&str),
    ) -> Result<Self, XMLGeneratorError> {
        options.validate()?;
        source.validate()?;
        check_schema(source)?;

        let schema = compile_schema(source, &mut handler)?;

        Ok(XmlGenerator { schema, options })
    }

    pub fn schema(&self) -> &SchemaSet {
        &self.schema
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build the instance template for the configured root element
    pub fn build_template(&self) -> InstanceTemplate {
        TemplateBuilder::new(&self.schema, &self.options).build()
    }

    /// Write a sample document to `sink` and hand the sink back once flushed
    pub fn write_xml<W: Write>(&self, sink: W) -> Result<W, XMLGeneratorError> {
        let template = self.build_template();
        OutputWriter::new(&template, sink, &self.options).write_document()
    }

    pub fn generate_string(&self) -> Result<String, XMLGeneratorError> {
        let output = self.write_xml(Vec::new())?;
        String::from_utf8(output).map_err(|err| XMLGeneratorError::XMLBuilderError(err.to_string()))
    }
}

/// Generate an XML string containing fake data
///
/// Using an XSD file contents as a string, generate an XML document of the
/// same format with sample data and default options.
///
/// The input is first read by the `xsd_parser` crate. If this library returns
/// an error, then the function returns an `XMLGeneratorError::XSDParserError`.
/// The schema is then compiled into a component model; unresolved references
/// and circular definitions produce an `XMLGeneratorError::SchemaCompileError`.
///
/// From the first non-abstract global element an instance template is built,
/// bounding repetitions and recursion, and written with `quick_xml`. If the
/// writer fails, an `XMLGeneratorError::XMLBuilderError` is returned.
pub fn generate_xml(xsd_string: &str) -> Result<String, XMLGeneratorError> {
    generate_xml_with_options(xsd_string, GeneratorOptions::default())
}

pub fn generate_xml_with_options(
    xsd_string: &str,
    options: GeneratorOptions,
) -> Result<String, XMLGeneratorError> {
    let source = SchemaSource::Text(xsd_string.to_string());
    XmlGenerator::new(&source, options)?.generate_string()
}

/// Generate an XML string from a schema file; includes and imports are
/// resolved relative to the file
pub fn generate_xml_from_file(
    path: impl AsRef<Path>,
    options: GeneratorOptions,
) -> Result<String, XMLGeneratorError> {
    let source = SchemaSource::File(path.as_ref().to_path_buf());
    XmlGenerator::new(&source, options)?.generate_string()
}
