use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use xmlsamplegenerator::{
    DEFAULT_LIST_LENGTH, DEFAULT_OCCURS_THRESHOLD, GeneratorOptions, QualifiedName, SchemaSource,
    XMLGeneratorError, XmlGenerator,
};

fn runtime_error(prefix: &str, message: String) -> PyErr {
    PyRuntimeError::new_err(format!("{}\n{}", prefix, message))
}

fn get_error(error: XMLGeneratorError) -> PyErr {
    match error {
        XMLGeneratorError::ConfigurationError(x) => runtime_error("Invalid configuration.", x),
        XMLGeneratorError::XSDParserError(x) => {
            runtime_error("XSD Parser encountered an error.", x)
        }
        XMLGeneratorError::SchemaCompileError(x) => {
            runtime_error("Schema could not be compiled:", x.join("\n"))
        }
        XMLGeneratorError::IoError(x) => runtime_error("I/O error:", x.to_string()),
        XMLGeneratorError::XMLBuilderError(x) => {
            runtime_error("XML writer encountered an error.", x)
        }
    }
}

/// Generate a sample XML document from the contents of an XSD file.
#[pyfunction]
#[pyo3(signature = (xsd_string, root_element=None, occurs_threshold=DEFAULT_OCCURS_THRESHOLD, list_length=DEFAULT_LIST_LENGTH))]
fn generate(
    xsd_string: String,
    root_element: Option<String>,
    occurs_threshold: usize,
    list_length: usize,
) -> PyResult<String> {
    let mut options = GeneratorOptions::new()
        .with_occurs_threshold(occurs_threshold)
        .with_list_length(list_length);

    if let Some(root_element) = root_element {
        let root: QualifiedName = root_element
            .parse()
            .map_err(|err: String| runtime_error("Invalid root element.", err))?;
        options = options.with_root_element(root);
    }

    let source = SchemaSource::Text(xsd_string);
    let result = XmlGenerator::new(&source, options).and_then(|generator| generator.generate_string());
    match result {
        Ok(xml_string) => Ok(xml_string),
        Err(e) => Err(get_error(e)),
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn pyxmlsamplegenerator(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    Ok(())
}
