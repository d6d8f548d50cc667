use crate::error::XMLGeneratorError;
use crate::generate::ValueFactory;
use crate::group_generator::GroupKind;
use crate::names::{QualifiedName, XML_NAMESPACE, XSI_NAMESPACE};
use crate::options::GeneratorOptions;
use crate::schema_model::AttributeUseKind;
use crate::template::{ElementIndex, InstanceTemplate, TemplateNode};
use indexmap::IndexMap;
use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

pub(crate) const NO_ROOT_COMMENT: &str =
    "Schema did not lead to generation of a valid XML document";

/// Token written at the start of mixed content
const MIXED_TEXT: &str = "text";

/// Serialization session replaying an [`InstanceTemplate`]
///
/// Holds the replay state of one document: the value factory, the nil
/// toggle of every element node, the nodes on the current descent path and
/// the stack of in-scope default namespaces.
pub(crate) struct OutputWriter<'t, W: Write> {
    template: &'t InstanceTemplate,
    writer: Writer<W>,
    values: ValueFactory,
    write_nil: Vec<bool>,
    active: Vec<bool>,
    prefixes: IndexMap<String, String>,
    default_namespaces: Vec<String>,
}

impl<'t, W: Write> OutputWriter<'t, W> {
    pub(crate) fn new(template: &'t InstanceTemplate, sink: W, options: &GeneratorOptions) -> Self {
        let writer = if options.indent > 0 {
            Writer::new_with_indent(sink, b' ', options.indent)
        } else {
            Writer::new(sink)
        };

        let prefixes = template
            .prefixed_namespaces()
            .into_iter()
            .enumerate()
            .map(|(position, namespace)| (namespace, format!("q{}", position + 1)))
            .collect();

        OutputWriter {
            template,
            writer,
            values: ValueFactory::new(options.seed),
            write_nil: vec![false; template.element_count()],
            active: vec![false; template.element_count()],
            prefixes,
            default_namespaces: vec![],
        }
    }

    fn write<'e>(&mut self, event: Event<'e>) -> Result<(), XMLGeneratorError> {
        self.writer
            .write_event(event)
            .map_err(|err| XMLGeneratorError::XMLBuilderError(err.to_string()))
    }

    pub(crate) fn write_document(mut self) -> Result<W, XMLGeneratorError> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        match self.template.root() {
            Some(root) => {
                self.active[root] = true;
                self.write_occurrence(root, true)?;
            }
            None => {
                debug!("No root element, writing an empty document");
                self.write(Event::Comment(BytesText::from_escaped(NO_ROOT_COMMENT)))?;
            }
        }

        let mut sink = self.writer.into_inner();
        sink.flush()?;

        Ok(sink)
    }

    /// Lexical attribute name for `name`, prefixed unless it has no namespace
    fn attribute_name(&self, name: &QualifiedName) -> String {
        if !name.has_namespace() {
            return name.name.clone();
        }

        if name.namespace == XML_NAMESPACE {
            return format!("xml:{}", name.name);
        }

        match self.prefixes.get(&name.namespace) {
            Some(prefix) => format!("{}:{}", prefix, name.name),
            None => name.name.clone(),
        }
    }

    fn write_node(&mut self, node: TemplateNode) -> Result<(), XMLGeneratorError> {
        let template = self.template;
        match node {
            TemplateNode::Element(index) => self.write_element(index),
            TemplateNode::Group(index) => {
                let group = template.group(index);
                match group.kind {
                    GroupKind::Sequence => {
                        for _ in 0..group.occurs {
                            for child in &group.children {
                                self.write_node(*child)?;
                            }
                        }
                    }
                    GroupKind::Choice => {
                        if group.children.is_empty() {
                            return Ok(());
                        }
                        for occurrence in 0..group.occurs {
                            self.write_node(group.children[occurrence % group.children.len()])?;
                        }
                    }
                }

                Ok(())
            }
        }
    }

    fn write_element(&mut self, index: ElementIndex) -> Result<(), XMLGeneratorError> {
        if self.active[index] {
            return Ok(());
        }

        self.active[index] = true;
        for _ in 0..self.template.element(index).occurs {
            self.write_occurrence(index, false)?;
        }
        self.active[index] = false;

        Ok(())
    }

    fn write_occurrence(&mut self, index: ElementIndex, is_root: bool) -> Result<(), XMLGeneratorError> {
        let template = self.template;
        let element = template.element(index);
        let source = template.element(template.content_source(index));

        let mut start = BytesStart::new(element.name.name.as_str());
        let in_scope = self.default_namespaces.last().cloned().unwrap_or_default();
        if element.name.namespace != in_scope {
            start.push_attribute(("xmlns", element.name.namespace.as_str()));
        }
        self.default_namespaces.push(element.name.namespace.clone());

        if is_root {
            start.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
            for (namespace, prefix) in &self.prefixes {
                let declaration = format!("xmlns:{}", prefix);
                start.push_attribute((declaration.as_str(), namespace.as_str()));
            }
        }

        if let Some(substitute) = &source.type_substitute {
            let type_name = self.attribute_name(substitute);
            start.push_attribute(("xsi:type", type_name.as_str()));
        }

        for attribute in &source.attributes {
            if attribute.use_kind == AttributeUseKind::Prohibited {
                continue;
            }

            let value = match (attribute.preset_value(), &attribute.value_generator) {
                (Some(value), _) => value.to_string(),
                (None, Some(generator)) => self.values.generate(generator),
                (None, None) => continue,
            };
            let name = self.attribute_name(&attribute.name);
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if element.nillable && !is_root {
            let nil = self.write_nil[index];
            self.write_nil[index] = !nil;
            if nil {
                start.push_attribute(("xsi:nil", "true"));
                self.write(Event::Empty(start))?;
                self.default_namespaces.pop();
                return Ok(());
            }
        }

        let has_content = source.comment.is_some()
            || source.mixed
            || source.value_generator.is_some()
            || !source.children.is_empty();
        if !has_content {
            self.write(Event::Empty(start))?;
            self.default_namespaces.pop();
            return Ok(());
        }

        self.write(Event::Start(start))?;

        if let Some(comment) = &source.comment {
            self.write(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
        }

        if source.mixed {
            self.write(Event::Text(BytesText::new(MIXED_TEXT)))?;
        }

        if let Some(generator) = &source.value_generator {
            let value = match element.preset_value() {
                Some(value) => value.to_string(),
                None => self.values.generate(generator),
            };
            self.write(Event::Text(BytesText::new(&value)))?;
        } else {
            for child in &source.children {
                self.write_node(*child)?;
            }
        }

        self.write(Event::End(BytesEnd::new(element.name.name.as_str())))?;
        self.default_namespaces.pop();

        Ok(())
    }
}
