#[cfg(test)]
mod tests {
    use roxmltree::Document;
    use std::fs::ReadDir;
    use std::path::PathBuf;
    use std::{fs, path};
    use workspace_root::get_workspace_root;
    use xmlsamplegenerator::{
        GeneratorOptions, XMLGeneratorError, generate_xml, generate_xml_from_file,
    };

    fn fetch_test_files(directory: &str) -> ReadDir {
        let root: PathBuf = get_workspace_root();

        let mut schema_dir = path::PathBuf::from(root);
        schema_dir.push("schemas");
        schema_dir.push(directory);
        let paths = fs::read_dir(schema_dir).unwrap();

        paths
    }

    fn read_file(path: &PathBuf) -> String {
        let path_str = path.to_str().unwrap();
        let message = format!("Could not read file: {}", path_str);
        fs::read_to_string(path).expect(&message)
    }

    fn is_schema(path: &PathBuf) -> bool {
        path.extension().is_some_and(|extension| extension == "xsd")
    }

    fn test_compile_error(filename: &str, expected: &str) {
        let files = fetch_test_files("invalid");

        let mut found = false;
        for file in files {
            let filepath = file.unwrap().path();
            if !filepath.ends_with(filename) {
                continue;
            }

            found = true;
            let contents = read_file(&filepath);
            match generate_xml(&contents).unwrap_err() {
                XMLGeneratorError::SchemaCompileError(messages) => assert!(
                    messages.iter().any(|message| message.contains(expected)),
                    "{:?}",
                    messages
                ),
                err => panic!("Unexpected error: {:?}", err),
            }
        }

        assert!(found, "Missing test file {}", filename);
    }

    fn check_result(result: &str) {
        println!("{}", result);
        Document::parse(result).unwrap();
    }

    fn working_file(filename: &str) -> PathBuf {
        let mut filepath = get_workspace_root();
        filepath.push("schemas");
        filepath.push("working");
        filepath.push(filename);
        filepath
    }

    #[test]
    fn test_working_schemas() {
        let files = fetch_test_files("working");

        for file in files {
            let filepath = file.unwrap().path();
            if !is_schema(&filepath) {
                continue;
            }
            println!("{}", filepath.display());

            let xml = generate_xml_from_file(&filepath, GeneratorOptions::default());

            match xml {
                Ok(result) => check_result(&result),
                Err(err) => panic!("{:?}", err),
            }
        }
    }

    #[test]
    fn test_working_schemas_are_deterministic() {
        let files = fetch_test_files("working");

        for file in files {
            let filepath = file.unwrap().path();
            if !is_schema(&filepath) {
                continue;
            }

            let first = generate_xml_from_file(&filepath, GeneratorOptions::default()).unwrap();
            let second = generate_xml_from_file(&filepath, GeneratorOptions::default()).unwrap();
            assert_eq!(first, second, "{}", filepath.display());
        }
    }

    #[test]
    fn test_books() {
        let xml = generate_xml_from_file(working_file("books.xsd"), GeneratorOptions::default())
            .unwrap();
        let document = Document::parse(&xml).unwrap();

        let catalog = document.root_element();
        assert_eq!(catalog.tag_name().name(), "catalog");
        assert_eq!(catalog.tag_name().namespace(), Some("urn:books"));

        let books: Vec<_> = catalog.children().filter(|node| node.is_element()).collect();
        assert_eq!(books.len(), 5);

        for book in books {
            assert_eq!(book.tag_name().namespace(), Some("urn:books"));

            let isbn = book.attribute("isbn").unwrap();
            assert_eq!(isbn.len(), 14);
            assert_eq!(isbn.chars().nth(3), Some('-'));
            assert!(isbn.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));

            let in_stock = book.attribute("inStock").unwrap();
            assert!(in_stock == "true" || in_stock == "false");

            let genre = book
                .children()
                .find(|node| node.has_tag_name(("urn:books", "genre")))
                .unwrap();
            assert!(["fiction", "poetry", "history"].contains(&genre.text().unwrap()));

            let keywords = book
                .children()
                .find(|node| node.has_tag_name(("urn:books", "keywords")))
                .unwrap();
            assert_eq!(keywords.text().unwrap().split_whitespace().count(), 3);

            let price = book
                .children()
                .find(|node| node.has_tag_name(("urn:books", "price")))
                .unwrap();
            let price: f64 = price.text().unwrap().parse().unwrap();
            assert!(price >= 0.0);

            let authors = book
                .children()
                .filter(|node| node.has_tag_name(("urn:books", "author")))
                .count();
            assert_eq!(authors, 5);

            let summaries: Vec<_> = book
                .children()
                .filter(|node| node.has_tag_name(("urn:books", "summary")))
                .collect();
            assert_eq!(summaries.len(), 2);
            assert!(summaries[0].text().is_some());
            assert_eq!(
                summaries[1].attribute(("http://www.w3.org/2001/XMLSchema-instance", "nil")),
                Some("true")
            );
        }
    }

    #[test]
    fn test_include() {
        let xml = generate_xml_from_file(working_file("library.xsd"), GeneratorOptions::default())
            .unwrap();
        let document = Document::parse(&xml).unwrap();

        let library = document.root_element();
        assert!(library.has_tag_name(("urn:library", "library")));

        let shelves: Vec<_> = library.children().filter(|node| node.is_element()).collect();
        assert_eq!(shelves.len(), 2);
        for shelf in shelves {
            assert!(shelf.attribute("room").is_some());
            assert!(shelf.attribute("floor").is_some());

            let names: Vec<&str> = shelf
                .children()
                .filter(|node| node.is_element())
                .map(|node| node.tag_name().name())
                .collect();
            assert_eq!(names, ["label", "volume", "volume", "volume"]);
        }
    }

    #[test]
    fn test_wildcards() {
        let xml = generate_xml_from_file(working_file("wildcards.xsd"), GeneratorOptions::default())
            .unwrap();
        let document = Document::parse(&xml).unwrap();

        let envelope = document.root_element();
        assert_eq!(
            envelope.attribute(("urn:wildcards", "any_Attr")),
            Some("anySimpleType")
        );

        let children: Vec<_> = envelope.children().filter(|node| node.is_element()).collect();
        assert_eq!(children.len(), 4);
        assert!(children[0].has_tag_name(("urn:wildcards", "header")));
        for placeholder in &children[1..3] {
            assert!(placeholder.has_tag_name(("otherNS", "any_element")));
            assert_eq!(placeholder.text(), Some("anyType"));
        }
        assert!(children[3].has_tag_name(("urn:wildcards", "payload")));
        assert!(children[3].text().unwrap().parse::<i32>().is_ok());
    }

    #[test]
    fn test_invalid_file() {
        test_compile_error("undefined_type.xsd", "Type 'Missing' is not declared");
        test_compile_error("circular_group.xsd", "Group 'Loop' references itself");
    }

    #[test]
    fn test_unclosed_file() {
        let files = fetch_test_files("invalid");

        for file in files {
            let filepath = file.unwrap().path();
            if filepath.ends_with("unclosed.xsd") {
                let contents = read_file(&filepath);
                match generate_xml(&contents).unwrap_err() {
                    XMLGeneratorError::XSDParserError(_) => {}
                    err => panic!("Unexpected error: {:?}", err),
                }
            }
        }
    }

    #[test]
    fn test_invalid_xml() {
        let empty_xml_string = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>".to_string();

        let xml = generate_xml(&empty_xml_string);
        assert!(xml.is_err());
        match xml.unwrap_err() {
            XMLGeneratorError::XSDParserError(_) => {}
            err => panic!("Unexpected error: {:?}", err),
        }
    }

    #[test]
    fn test_missing_file() {
        let mut filepath = get_workspace_root();
        filepath.push("schemas");
        filepath.push("missing.xsd");

        let xml = generate_xml_from_file(filepath, GeneratorOptions::default());
        assert!(xml.is_err());
    }
}
