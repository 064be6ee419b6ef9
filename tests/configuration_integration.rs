//! Integration tests for parser configuration
//!
//! Covers the accepted-types filter and per-property transforms.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use html_microdata::test_utils::items_to_json;
use html_microdata::{Error, MicrodataNode, MicrodataParser, ParserConfig, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

const RECIPE_PAGE: &str = r#"
    <div itemscope itemtype="Person"><span itemprop="name">Site Owner</span></div>
    <div itemscope itemtype="Recipe">
        <h1 itemprop="name">Brownie</h1>
        <div itemprop="author" itemscope itemtype="Person">
            <span itemprop="name">Chef</span>
        </div>
        <ul>
            <li data-ingredient-object='{"name": "cocoa", "amount": "50 g"}'>
                <span><span itemprop="recipeIngredient">Cocoa powder</span></span>
            </li>
            <li data-ingredient-object='{"name": "butter", "amount": "100 g"}'>
                <span><span itemprop="recipeIngredient">Butter</span></span>
            </li>
        </ul>
    </div>
"#;

#[test]
fn test_type_filter() {
    let parser = MicrodataParser::with_config(ParserConfig::new().with_accepted_types(["Recipe"]));

    let items = parser.parse(RECIPE_PAGE).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["@type"], "Recipe");
    assert_eq!(items[0]["author"], json!({"@type": "Person", "name": "Chef"}));
}

#[test]
fn test_type_filter_with_several_types() {
    let parser = MicrodataParser::with_config(ParserConfig::new().accept_type("Recipe").accept_type("Person"));

    let items = parser.parse(RECIPE_PAGE).unwrap();
    let types: Vec<_> = items.iter().map(|item| item["@type"].clone()).collect();
    assert_eq!(types, vec![json!("Person"), json!("Recipe")]);
}

#[test]
fn test_rejected_wrapper_exposes_inner_items() {
    let html = r#"
        <div itemscope itemtype="WebPage">
            <span itemprop="name">Page</span>
            <div itemscope itemtype="Recipe"><span itemprop="name">Soup</span></div>
        </div>
    "#;

    let unfiltered = MicrodataParser::new().parse(html).unwrap();
    assert_eq!(unfiltered.len(), 1);
    assert_eq!(unfiltered[0]["@type"], "WebPage");

    let filtered = MicrodataParser::with_config(ParserConfig::new().accept_type("Recipe"))
        .parse(html)
        .unwrap();
    assert_eq!(items_to_json(filtered), json!([{"@type": "Recipe", "name": "Soup"}]));
}

#[test]
fn test_transform_reads_ancestor_data() {
    let config = ParserConfig::new()
        .accept_type("Recipe")
        .with_transform("recipeIngredient", |node: &dyn MicrodataNode, _value: &Value| {
            let raw = match node.closest_attr("data-ingredient-object") {
                Some(raw) => raw,
                None => return Ok(None),
            };
            let ingredient: serde_json::Value = serde_json::from_str(&raw)?;
            Ok(Some(json!({
                "name": ingredient["name"],
                "amount": ingredient["amount"],
            })))
        });

    let items = MicrodataParser::with_config(config).parse(RECIPE_PAGE).unwrap();
    assert_eq!(
        items[0]["recipeIngredient"],
        json!([
            {"name": "cocoa", "amount": "50 g"},
            {"name": "butter", "amount": "100 g"}
        ])
    );
    assert_eq!(items[0]["name"], "Brownie");
}

#[test]
fn test_transform_for_price() {
    let html = r#"
        <div itemscope itemtype="Product">
            <span itemprop="price" data-currency="USD">10</span>
            <span itemprop="name">Widget</span>
        </div>
    "#;

    let config = ParserConfig::new().with_transform("price", |node, value| {
        Ok(Some(json!({
            "amount": value.as_text(),
            "currency": node.attr("data-currency"),
        })))
    });

    let items = MicrodataParser::with_config(config).parse(html).unwrap();
    assert_eq!(
        items_to_json(items),
        json!([{
            "@type": "Product",
            "price": {"amount": "10", "currency": "USD"},
            "name": "Widget"
        }])
    );
}

#[test]
fn test_transform_declining_keeps_default_value() {
    let html = r#"<div itemscope><meta itemprop="price" content="10"></div>"#;

    let config = ParserConfig::new().with_transform("price", |_node, _value| Ok(None));
    let items = MicrodataParser::with_config(config).parse(html).unwrap();
    assert_eq!(items_to_json(items), json!([{"price": "10"}]));
}

#[test]
fn test_transform_runs_once_per_occurrence() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let html = r#"
        <div itemscope itemref="more"><i itemprop="n">1</i><i itemprop="n">2</i></div>
        <div id="more"><i itemprop="n">3</i></div>
    "#;
    let config = ParserConfig::new().with_transform("n", move |_node, _value| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    });

    let items = MicrodataParser::with_config(config).parse(html).unwrap();
    assert_eq!(items[0]["n"], json!(["1", "2", "3"]));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_transform_failure_aborts_parse() {
    let html = r#"<div itemscope><span itemprop="data">{not json</span></div>"#;

    let config = ParserConfig::new().with_transform("data", |_node, value| {
        let parsed: serde_json::Value = serde_json::from_str(value.as_text().unwrap_or_default())?;
        Ok(Some(parsed))
    });

    let err = MicrodataParser::with_config(config).parse(html).unwrap_err();
    assert!(err.is_structural());
    assert!(matches!(err, Error::TransformError { ref property, .. } if property == "data"));
}

#[test]
fn test_parser_is_shareable_across_threads() {
    let config = ParserConfig::new()
        .accept_type("Book")
        .with_transform("title", |_node, value| {
            Ok(value.as_text().map(|title| json!(title.to_uppercase())))
        });
    let parser = Arc::new(MicrodataParser::with_config(config));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = Arc::clone(&parser);
            std::thread::spawn(move || {
                let html = format!(
                    r#"<div itemscope itemtype="Book"><span itemprop="title">book {}</span></div>"#,
                    i
                );
                parser.parse(&html).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let items = handle.join().unwrap();
        assert_eq!(items[0]["title"], json!(format!("BOOK {}", i)));
    }
}
