use crate::error::XMLGeneratorError;
use crate::fetch_types::{SchemaCompiler, SchemaDocument, xs_children};
use crate::schema_model::SchemaSet;
use log::{debug, warn};
use roxmltree::{Document, ParsingOptions};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use xsd_parser::Parser;
use xsd_parser::pipeline::parser::resolver::FileResolver;

/// Where the schema text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Schema text; relative `schemaLocation`s resolve against the working directory
    Text(String),
    /// Schema file; relative `schemaLocation`s resolve against its directory
    File(PathBuf),
}

impl SchemaSource {
    pub(crate) fn validate(&self) -> Result<(), XMLGeneratorError> {
        match self {
            SchemaSource::Text(text) if text.trim().is_empty() => {
                Err(XMLGeneratorError::ConfigurationError(
                    "Provided schema is empty".to_string(),
                ))
            }
            SchemaSource::File(path) if path.as_os_str().is_empty() => {
                Err(XMLGeneratorError::ConfigurationError(
                    "No schema file provided".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Run the schema through `xsd_parser`, rejecting anything it cannot read
pub(crate) fn check_schema(source: &SchemaSource) -> Result<(), XMLGeneratorError> {
    let parser = Parser::new()
        .with_resolver(FileResolver::new())
        .with_default_namespaces();

    let schemas = match source {
        SchemaSource::Text(text) => parser.add_schema_from_str(text),
        SchemaSource::File(path) => parser.add_schema_from_file(path.canonicalize()?),
    };

    match schemas {
        Ok(parser) => {
            // Only acceptance is used here; components are compiled from the
            // roxmltree documents loaded by `load_schema_texts`
            parser.finish();
            debug!("Schema accepted by xsd-parser");
            Ok(())
        }
        Err(err) => Err(XMLGeneratorError::XSDParserError(err.to_string())),
    }
}

pub(crate) fn parse_document(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    Document::parse_with_options(text, options)
}

struct SchemaText {
    text: String,
    location: Option<PathBuf>,
    inherited_namespace: Option<String>,
}

/// Locations referenced by `include`, `redefine`, `override` and `import`,
/// paired with the namespace an included document adopts
fn schema_references(schema: &SchemaText) -> Result<Vec<(String, Option<String>)>, roxmltree::Error> {
    let document = parse_document(&schema.text)?;
    let root = document.root_element();
    let namespace = root
        .attribute("targetNamespace")
        .map(str::to_string)
        .or_else(|| schema.inherited_namespace.clone());

    let mut references = vec![];
    for child in xs_children(root) {
        let Some(location) = child.attribute("schemaLocation") else {
            continue;
        };

        match child.tag_name().name() {
            "include" | "redefine" | "override" => {
                references.push((location.trim().to_string(), namespace.clone()))
            }
            "import" => references.push((location.trim().to_string(), None)),
            _ => {}
        }
    }

    Ok(references)
}

fn resolve_location(base: Option<&Path>, location: &str) -> PathBuf {
    let location = location.strip_prefix("file://").unwrap_or(location);
    match base.and_then(Path::parent) {
        Some(directory) => directory.join(location),
        None => PathBuf::from(location),
    }
}

/// Read the schema and every document it includes or imports, main schema first
fn load_schema_texts(
    source: &SchemaSource,
    diagnostics: &mut Vec<String>,
) -> Result<Vec<SchemaText>, XMLGeneratorError> {
    let main = match source {
        SchemaSource::Text(text) => SchemaText {
            text: text.clone(),
            location: None,
            inherited_namespace: None,
        },
        SchemaSource::File(path) => SchemaText {
            text: fs::read_to_string(path)?,
            location: Some(path.canonicalize()?),
            inherited_namespace: None,
        },
    };

    let mut loaded: HashSet<PathBuf> = main.location.iter().cloned().collect();
    let mut texts = vec![main];
    let mut index = 0;
    while index < texts.len() {
        let references = match schema_references(&texts[index]) {
            Ok(references) => references,
            Err(err) if index == 0 => return Err(XMLGeneratorError::XSDParserError(err.to_string())),
            Err(err) => {
                diagnostics.push(format!("Unable to parse included schema: {}", err));
                index += 1;
                continue;
            }
        };

        for (location, inherited_namespace) in references {
            if location.starts_with("http://") || location.starts_with("https://") {
                warn!("Skipping remote schema location {}", location);
                continue;
            }

            let path = resolve_location(texts[index].location.as_deref(), &location);
            let Ok(path) = path.canonicalize() else {
                diagnostics.push(format!("Schema location '{}' could not be resolved", location));
                continue;
            };

            if !loaded.insert(path.clone()) {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(text) => {
                    debug!("Loaded schema document {}", path.display());
                    texts.push(SchemaText {
                        text,
                        location: Some(path),
                        inherited_namespace,
                    });
                }
                Err(err) => diagnostics.push(format!(
                    "Unable to read schema '{}': {}",
                    path.display(),
                    err
                )),
            }
        }

        index += 1;
    }

    Ok(texts)
}

/// Load and compile the schema into a [`SchemaSet`]
///
/// Every diagnostic found while loading or compiling is passed to `handler`;
/// if there is at least one, no schema set is returned.
pub(crate) fn compile_schema(
    source: &SchemaSource,
    handler: &mut dyn FnMut(&str),
) -> Result<SchemaSet, XMLGeneratorError> {
    let mut diagnostics = vec![];
    let texts = load_schema_texts(source, &mut diagnostics)?;

    let mut documents = vec![];
    for schema in &texts {
        match parse_document(&schema.text) {
            Ok(document) => documents.push(SchemaDocument::new(
                document,
                schema.inherited_namespace.clone(),
            )),
            Err(err) => diagnostics.push(format!("Unable to parse schema document: {}", err)),
        }
    }

    let (schema, compile_diagnostics) = SchemaCompiler::new(&documents).compile();
    diagnostics.extend(compile_diagnostics);

    if !diagnostics.is_empty() {
        for diagnostic in &diagnostics {
            handler(diagnostic);
        }

        return Err(XMLGeneratorError::SchemaCompileError(diagnostics));
    }

    Ok(schema)
}
