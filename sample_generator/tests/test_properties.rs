#[cfg(test)]
mod tests {
    use roxmltree::{Document, Node};
    use xmlsamplegenerator::{
        GeneratorOptions, QualifiedName, SchemaSource, XMLGeneratorError, XSI_NAMESPACE,
        XmlGenerator, generate_xml, generate_xml_with_options,
    };

    fn schema(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <xs:schema xmlns:xs=\"http://www.w3.org/2001/XMLSchema\">{}</xs:schema>",
            body
        )
    }

    fn generate(body: &str) -> String {
        let xml = generate_xml(&schema(body)).unwrap();
        println!("{}", xml);
        xml
    }

    fn generate_with_root(body: &str, root: &str) -> String {
        let options = GeneratorOptions::new().with_root_element(QualifiedName::local(root));
        let xml = generate_xml_with_options(&schema(body), options).unwrap();
        println!("{}", xml);
        xml
    }

    fn child_names<'a>(node: Node<'a, 'a>) -> Vec<&'a str> {
        node.children()
            .filter(|child| child.is_element())
            .map(|child| child.tag_name().name())
            .collect()
    }

    fn count_named(document: &Document, name: &str) -> usize {
        document
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == name)
            .count()
    }

    #[test]
    fn occurrences_are_bounded_by_threshold() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="many" type="xs:string" maxOccurs="unbounded"/>
                    <xs:element name="few" type="xs:string" minOccurs="2" maxOccurs="3"/>
                    <xs:element name="lots" type="xs:string" minOccurs="7" maxOccurs="10"/>
                    <xs:element name="none" type="xs:string" minOccurs="0" maxOccurs="0"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(count_named(&document, "many"), 5);
        assert_eq!(count_named(&document, "few"), 3);
        assert_eq!(count_named(&document, "lots"), 7);
        assert_eq!(count_named(&document, "none"), 0);
    }

    #[test]
    fn threshold_option_changes_counts() {
        let body = r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="item" type="xs:string" maxOccurs="unbounded"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#;
        let options = GeneratorOptions::new().with_occurs_threshold(2);
        let xml = generate_xml_with_options(&schema(body), options).unwrap();
        let document = Document::parse(&xml).unwrap();

        assert_eq!(count_named(&document, "item"), 2);
    }

    #[test]
    fn list_length_option_sets_item_count() {
        let body = r#"<xs:element name="numbers">
                <xs:simpleType>
                  <xs:list itemType="xs:int"/>
                </xs:simpleType>
              </xs:element>"#;

        let xml = generate(body);
        let document = Document::parse(&xml).unwrap();
        let text = document.root_element().text().unwrap();
        assert_eq!(text.split_whitespace().count(), 3);

        let options = GeneratorOptions::new().with_list_length(4);
        let xml = generate_xml_with_options(&schema(body), options).unwrap();
        let document = Document::parse(&xml).unwrap();
        let items: Vec<&str> = document
            .root_element()
            .text()
            .unwrap()
            .split_whitespace()
            .collect();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.parse::<i32>().is_ok()));
    }

    #[test]
    fn single_choice_writes_first_alternative() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:choice>
                    <xs:element name="a" type="xs:string"/>
                    <xs:element name="b" type="xs:string"/>
                  </xs:choice>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(child_names(document.root_element()), ["a"]);
    }

    #[test]
    fn repeated_choice_cycles_alternatives() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:choice maxOccurs="unbounded">
                      <xs:element name="a" type="xs:string"/>
                      <xs:element name="b" type="xs:string"/>
                    </xs:choice>
                    <xs:choice minOccurs="4" maxOccurs="4">
                      <xs:element name="x" type="xs:string"/>
                      <xs:element name="y" type="xs:string"/>
                      <xs:element name="z" type="xs:string"/>
                    </xs:choice>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(
            child_names(document.root_element()),
            ["a", "b", "a", "b", "a", "x", "y", "z", "x"]
        );
    }

    #[test]
    fn repeated_sequence_repeats_all_items() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence minOccurs="2" maxOccurs="2">
                    <xs:element name="key" type="xs:string"/>
                    <xs:element name="value" type="xs:string"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(
            child_names(document.root_element()),
            ["key", "value", "key", "value"]
        );
    }

    #[test]
    fn all_group_is_written_in_reverse() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:all>
                    <xs:element name="a" type="xs:string"/>
                    <xs:element name="b" type="xs:string"/>
                    <xs:element name="c" type="xs:string"/>
                  </xs:all>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(child_names(document.root_element()), ["c", "b", "a"]);
    }

    #[test]
    fn nillable_occurrences_alternate() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="item" type="xs:int" nillable="true" maxOccurs="4"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let nils: Vec<Option<&str>> = document
            .root_element()
            .children()
            .filter(|node| node.is_element())
            .map(|node| node.attribute((XSI_NAMESPACE, "nil")))
            .collect();
        assert_eq!(nils, [None, Some("true"), None, Some("true")]);

        let items: Vec<_> = document
            .root_element()
            .children()
            .filter(|node| node.is_element())
            .collect();
        assert!(items[0].text().unwrap().parse::<i32>().is_ok());
        assert!(items[1].text().is_none());
    }

    #[test]
    fn nillable_root_is_written_once() {
        let xml = generate(r#"<xs:element name="root" type="xs:string" nillable="true"/>"#);
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        assert!(root.attribute((XSI_NAMESPACE, "nil")).is_none());
        assert_eq!(root.text(), Some("root1"));
    }

    #[test]
    fn same_options_same_document() {
        let body = r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="when" type="xs:dateTime" maxOccurs="3"/>
                    <xs:element name="amount" type="xs:decimal" maxOccurs="3"/>
                    <xs:element name="flag" type="xs:boolean" maxOccurs="3"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#;

        let source = SchemaSource::Text(schema(body));
        let generator = XmlGenerator::new(&source, GeneratorOptions::default()).unwrap();
        let first = generator.generate_string().unwrap();
        let second = generator.generate_string().unwrap();
        assert_eq!(first, second);

        assert_eq!(first, generate_xml(&schema(body)).unwrap());
    }

    #[test]
    fn seed_is_configurable() {
        let body = r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="number" type="xs:long" maxOccurs="5"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#;

        let first = generate_xml_with_options(&schema(body), GeneratorOptions::new().with_seed(1))
            .unwrap();
        let again = generate_xml_with_options(&schema(body), GeneratorOptions::new().with_seed(1))
            .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn optional_recursion_stops() {
        let xml = generate(
            r#"<xs:element name="Node">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="value" type="xs:string"/>
                    <xs:element ref="Node" minOccurs="0"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(count_named(&document, "Node"), 1);
        assert_eq!(child_names(document.root_element()), ["value"]);
    }

    #[test]
    fn required_recursion_is_written_one_level_deep() {
        let xml = generate_with_root(
            r#"<xs:complexType name="TreeType">
                <xs:sequence>
                  <xs:element name="child" type="TreeType"/>
                </xs:sequence>
              </xs:complexType>
              <xs:element name="tree" type="TreeType"/>"#,
            "tree",
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(count_named(&document, "tree"), 1);
        assert_eq!(count_named(&document, "child"), 2);
    }

    #[test]
    fn strict_wildcard_without_match_is_commented() {
        let xml = generate(
            r###"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="known" type="xs:string"/>
                    <xs:any namespace="##other" processContents="strict"/>
                    <xs:any namespace="##other" processContents="strict"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"###,
        );
        let document = Document::parse(&xml).unwrap();

        let comments: Vec<&str> = document
            .root_element()
            .children()
            .filter(|node| node.is_comment())
            .filter_map(|node| node.text())
            .collect();
        assert_eq!(
            comments,
            [" Element wildcard could not be matched. Generated XML may not be valid. "]
        );
        assert_eq!(child_names(document.root_element()), ["known"]);
    }

    #[test]
    fn strict_wildcard_uses_global_element() {
        let xml = generate(
            r###"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:any namespace="##local" processContents="strict" minOccurs="2" maxOccurs="2"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>
              <xs:element name="entry" type="xs:string"/>"###,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(child_names(document.root_element()), ["entry", "entry"]);
    }

    #[test]
    fn namespace_list_wildcard_skips_root() {
        let xsd = r#"<?xml version="1.0" encoding="UTF-8"?>
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                       targetNamespace="urn:a" xmlns="urn:a" elementFormDefault="qualified">
              <xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:any namespace="urn:a" processContents="strict"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>
              <xs:element name="other" type="xs:string"/>
            </xs:schema>"#;
        let xml = generate_xml(xsd).unwrap();
        println!("{}", xml);
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        assert!(root.has_tag_name(("urn:a", "root")));
        assert_eq!(child_names(root), ["other"]);
        let other = root.first_element_child().unwrap();
        assert_eq!(other.tag_name().namespace(), Some("urn:a"));
        assert!(root.children().all(|node| !node.is_comment()));
    }

    #[test]
    fn wildcard_matching_abstract_element_is_commented() {
        let xml = generate(
            r###"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:any namespace="##local" processContents="strict"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>
              <xs:element name="base" type="xs:string" abstract="true"/>
              <xs:element name="concrete" type="xs:string"/>"###,
        );
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        assert!(child_names(root).is_empty());
        let comment = root.children().find(|node| node.is_comment()).unwrap();
        assert_eq!(
            comment.text(),
            Some(" Element wildcard could not be matched. Generated XML may not be valid. ")
        );
    }

    #[test]
    fn optional_wildcard_is_skipped() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="known" type="xs:string"/>
                    <xs:any minOccurs="0" processContents="lax"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(child_names(document.root_element()), ["known"]);
    }

    #[test]
    fn lax_attribute_wildcard_adds_placeholder() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:anyAttribute processContents="lax"/>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        assert_eq!(root.attribute("any_Attr"), Some("anySimpleType"));
        assert!(root.children().all(|node| !node.is_element()));
    }

    #[test]
    fn strict_attribute_wildcard_without_match_is_commented() {
        let xml = generate(
            r###"<xs:element name="root">
                <xs:complexType>
                  <xs:anyAttribute namespace="##other" processContents="strict"/>
                </xs:complexType>
              </xs:element>"###,
        );
        let document = Document::parse(&xml).unwrap();

        let comment = document
            .root_element()
            .children()
            .find(|node| node.is_comment())
            .unwrap();
        assert_eq!(
            comment.text(),
            Some(" Attribute wildcard could not be matched. Generated XML may not be valid. ")
        );
    }

    #[test]
    fn abstract_type_uses_derived_type() {
        let xml = generate(
            r#"<xs:complexType name="Shape" abstract="true">
                <xs:sequence>
                  <xs:element name="id" type="xs:string"/>
                </xs:sequence>
              </xs:complexType>
              <xs:complexType name="Circle">
                <xs:complexContent>
                  <xs:extension base="Shape">
                    <xs:sequence>
                      <xs:element name="radius" type="xs:double"/>
                    </xs:sequence>
                  </xs:extension>
                </xs:complexContent>
              </xs:complexType>
              <xs:element name="shape" type="Shape"/>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let shape = document.root_element();
        assert_eq!(shape.attribute((XSI_NAMESPACE, "type")), Some("Circle"));
        assert_eq!(child_names(shape), ["id", "radius"]);
        assert!(shape.children().find(|node| node.has_tag_name("radius")).unwrap()
            .text()
            .unwrap()
            .parse::<f64>()
            .is_ok());
    }

    #[test]
    fn namespaced_type_substitute_is_prefixed() {
        let xsd = r#"<?xml version="1.0" encoding="UTF-8"?>
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                       xmlns:tns="urn:shapes"
                       targetNamespace="urn:shapes"
                       elementFormDefault="qualified">
              <xs:complexType name="Shape" abstract="true"/>
              <xs:complexType name="Square">
                <xs:complexContent>
                  <xs:extension base="tns:Shape">
                    <xs:sequence>
                      <xs:element name="side" type="xs:float"/>
                    </xs:sequence>
                  </xs:extension>
                </xs:complexContent>
              </xs:complexType>
              <xs:element name="shape" type="tns:Shape"/>
            </xs:schema>"#;
        let xml = generate_xml(xsd).unwrap();
        let document = Document::parse(&xml).unwrap();

        let shape = document.root_element();
        assert!(shape.has_tag_name(("urn:shapes", "shape")));
        let type_name = shape.attribute((XSI_NAMESPACE, "type")).unwrap();
        let (prefix, local) = type_name.split_once(':').unwrap();
        assert_eq!(local, "Square");
        assert_eq!(shape.lookup_namespace_uri(Some(prefix)), Some("urn:shapes"));

        let side = shape.first_element_child().unwrap();
        assert!(side.has_tag_name(("urn:shapes", "side")));
    }

    #[test]
    fn abstract_type_without_derivation_is_empty() {
        let xml = generate(
            r#"<xs:complexType name="Shape" abstract="true">
                <xs:sequence>
                  <xs:element name="id" type="xs:string"/>
                </xs:sequence>
              </xs:complexType>
              <xs:element name="shape" type="Shape"/>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let shape = document.root_element();
        assert!(shape.attribute((XSI_NAMESPACE, "type")).is_none());
        assert!(shape.children().all(|node| !node.is_element()));
    }

    #[test]
    fn substitution_group_members_replace_head() {
        let xml = generate_with_root(
            r#"<xs:element name="animal" type="xs:string" abstract="true"/>
              <xs:element name="dog" type="xs:string" substitutionGroup="animal"/>
              <xs:element name="cat" type="xs:string" substitutionGroup="animal"/>
              <xs:element name="zoo">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element ref="animal" maxOccurs="4"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
            "zoo",
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(
            child_names(document.root_element()),
            ["dog", "cat", "dog", "cat"]
        );
    }

    #[test]
    fn substitution_groups_are_transitive() {
        let xml = generate_with_root(
            r#"<xs:element name="animal" type="xs:string" abstract="true"/>
              <xs:element name="dog" type="xs:string" substitutionGroup="animal"/>
              <xs:element name="cat" type="xs:string" substitutionGroup="animal"/>
              <xs:element name="puppy" substitutionGroup="dog"/>
              <xs:element name="zoo">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element ref="animal" maxOccurs="3"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
            "zoo",
        );
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        assert_eq!(child_names(root), ["dog", "cat", "puppy"]);
        assert_eq!(root.last_element_child().unwrap().text(), Some("puppy1"));
    }

    #[test]
    fn concrete_head_is_kept_last() {
        let xml = generate_with_root(
            r#"<xs:element name="vehicle" type="xs:string"/>
              <xs:element name="car" type="xs:string" substitutionGroup="vehicle"/>
              <xs:element name="garage">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element ref="vehicle" maxOccurs="2"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
            "garage",
        );
        let document = Document::parse(&xml).unwrap();

        assert_eq!(child_names(document.root_element()), ["car", "vehicle"]);
    }

    #[test]
    fn fixed_and_default_values_are_used() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="fixedValue" type="xs:string" fixed="F"/>
                    <xs:element name="defaultValue" type="xs:string" default="D"/>
                    <xs:element name="plain" type="xs:string"/>
                  </xs:sequence>
                  <xs:attribute name="version" type="xs:string" fixed="1.0"/>
                  <xs:attribute name="lang" type="xs:string" default="en-GB"/>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        assert_eq!(root.attribute("version"), Some("1.0"));
        assert_eq!(root.attribute("lang"), Some("en-GB"));

        let texts: Vec<&str> = root
            .children()
            .filter(|node| node.is_element())
            .filter_map(|node| node.text())
            .collect();
        assert_eq!(texts, ["F", "D", "plain1"]);
    }

    #[test]
    fn prohibited_attribute_is_not_written() {
        let xml = generate(
            r#"<xs:complexType name="Base">
                <xs:attribute name="keep" type="xs:string"/>
                <xs:attribute name="drop" type="xs:string"/>
              </xs:complexType>
              <xs:complexType name="Restricted">
                <xs:complexContent>
                  <xs:restriction base="Base">
                    <xs:attribute name="drop" use="prohibited"/>
                  </xs:restriction>
                </xs:complexContent>
              </xs:complexType>
              <xs:element name="root" type="Restricted"/>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        assert_eq!(root.attribute("keep"), Some("keep1"));
        assert!(root.attribute("drop").is_none());
    }

    #[test]
    fn mixed_content_starts_with_text() {
        let xml = generate(
            r#"<xs:element name="root">
                <xs:complexType mixed="true">
                  <xs:sequence>
                    <xs:element name="b" type="xs:string"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let root = document.root_element();
        let first = root.first_child().unwrap();
        assert!(first.is_text());
        assert_eq!(first.text(), Some("text"));
        assert_eq!(child_names(root), ["b"]);
    }

    #[test]
    fn simple_content_keeps_attributes() {
        let xml = generate(
            r#"<xs:complexType name="Measure">
                <xs:simpleContent>
                  <xs:extension base="xs:decimal">
                    <xs:attribute name="unit" type="xs:string" fixed="cm"/>
                  </xs:extension>
                </xs:simpleContent>
              </xs:complexType>
              <xs:element name="width" type="Measure"/>"#,
        );
        let document = Document::parse(&xml).unwrap();

        let width = document.root_element();
        assert_eq!(width.attribute("unit"), Some("cm"));
        assert!(width.text().unwrap().parse::<f64>().is_ok());
    }

    #[test]
    fn unqualified_local_elements_reset_namespace() {
        let xsd = r#"<?xml version="1.0" encoding="UTF-8"?>
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                       targetNamespace="urn:orders">
              <xs:element name="order">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="line" type="xs:string"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>
            </xs:schema>"#;
        let xml = generate_xml(xsd).unwrap();
        let document = Document::parse(&xml).unwrap();

        let order = document.root_element();
        assert!(order.has_tag_name(("urn:orders", "order")));
        let line = order.first_element_child().unwrap();
        assert_eq!(line.tag_name().namespace(), None);
        assert_eq!(line.tag_name().name(), "line");
    }

    #[test]
    fn requested_root_is_used() {
        let body = r#"<xs:element name="first" type="xs:string"/>
              <xs:element name="second" type="xs:int"/>"#;

        let document_xml = generate(body);
        let document = Document::parse(&document_xml).unwrap();
        assert_eq!(document.root_element().tag_name().name(), "first");

        let document_xml = generate_with_root(body, "second");
        let document = Document::parse(&document_xml).unwrap();
        assert_eq!(document.root_element().tag_name().name(), "second");

        let document_xml = generate_with_root(body, "missing");
        let document = Document::parse(&document_xml).unwrap();
        assert_eq!(document.root_element().tag_name().name(), "first");
    }

    #[test]
    fn no_usable_root_writes_comment() {
        let xml = generate(
            r#"<xs:complexType name="Unused"/>
              <xs:element name="only" type="Unused" abstract="true"/>"#,
        );

        assert!(xml.contains("<!--Schema did not lead to generation of a valid XML document-->"));
        assert!(!xml.contains("<only"));
    }

    #[test]
    fn empty_schema_is_a_configuration_error() {
        match generate_xml("  \n ").unwrap_err() {
            XMLGeneratorError::ConfigurationError(_) => {}
            err => panic!("Unexpected error: {:?}", err),
        }
    }

    #[test]
    fn zero_threshold_is_a_configuration_error() {
        let options = GeneratorOptions::new().with_occurs_threshold(0);
        let result =
            generate_xml_with_options(&schema(r#"<xs:element name="root" type="xs:string"/>"#), options);

        match result.unwrap_err() {
            XMLGeneratorError::ConfigurationError(_) => {}
            err => panic!("Unexpected error: {:?}", err),
        }
    }

    #[test]
    fn compile_errors_reach_the_handler() {
        let source = SchemaSource::Text(schema(
            r#"<xs:element name="root" type="Missing"/>
              <xs:element name="other">
                <xs:complexType>
                  <xs:group ref="NoSuchGroup"/>
                </xs:complexType>
              </xs:element>"#,
        ));

        let mut reported: Vec<String> = vec![];
        let result = XmlGenerator::with_validation_handler(&source, GeneratorOptions::default(), |message| {
            reported.push(message.to_string())
        });

        match result.unwrap_err() {
            XMLGeneratorError::SchemaCompileError(messages) => {
                assert_eq!(messages, reported);
                assert!(messages.iter().any(|message| message.contains("Missing")));
                assert!(messages.iter().any(|message| message.contains("NoSuchGroup")));
            }
            err => panic!("Unexpected error: {:?}", err),
        }
    }

    #[test]
    fn unindented_output_is_one_line() {
        let body = r#"<xs:element name="root">
                <xs:complexType>
                  <xs:sequence>
                    <xs:element name="a" type="xs:string"/>
                  </xs:sequence>
                </xs:complexType>
              </xs:element>"#;
        let options = GeneratorOptions::new().with_indent(0);
        let xml = generate_xml_with_options(&schema(body), options).unwrap();

        assert!(!xml.contains('\n'));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<a>a1</a>"));
    }
}
