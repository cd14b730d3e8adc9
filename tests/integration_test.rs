use openapi_from_actions::{
    descriptor::HttpMethod,
    model::{ActionModel, ModelLoader},
    openapi_builder::{build_document, Info, OpenApiDocument},
    serializer::{serialize_json, serialize_yaml},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

const RESPONSE_MODEL: &str = "TestWebApi_Controllers_TestController3_ResponseModel";
const REQUEST_MODEL: &str = "TestWebApi_Controllers_TestController3_RequestModel";

fn load_fixture() -> ActionModel {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/TestWebApi.actions.json");
    ModelLoader::load_file(&path).expect("Failed to load fixture model")
}

fn fixture_document() -> OpenApiDocument {
    build_document(
        &load_fixture(),
        Info {
            title: "TestWebApi".to_string(),
            version: "1.0".to_string(),
        },
    )
}

fn operation_json(doc: &OpenApiDocument, path: &str, method: HttpMethod) -> serde_json::Value {
    let operation = doc.paths[path]
        .operation(method)
        .unwrap_or_else(|| panic!("Missing {} {}", method, path));
    serde_json::to_value(operation).expect("Failed to encode operation")
}

#[test]
fn test_end_to_end_generation() {
    // Step 1: Load the model
    let model = load_fixture();
    assert_eq!(model.actions.len(), 15);
    assert_eq!(model.types.len(), 2);

    // Step 2: Build the document
    let doc = build_document(&model, Info::default());

    // Step 3: Verify paths, in first-seen order, without the verb-less actions
    let paths: Vec<_> = doc.paths.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "get",
            "put",
            "post",
            "patch",
            "delete",
            "Test3",
            "Test3/test/{id}",
            "Test3/1",
            "Test3/2",
            "Test3/3",
            "Test3/4",
            "Test3/5",
            "Test3/6",
        ]
    );
    assert!(!doc.paths.keys().any(|p| p.starts_with("Test2")));

    // Step 4: Verify schemas, in registration order
    let schemas: Vec<_> = doc.components.schemas.keys().map(String::as_str).collect();
    assert_eq!(schemas, vec![RESPONSE_MODEL, REQUEST_MODEL]);
}

#[test]
fn test_each_verb_lands_in_its_own_slot() {
    let doc = fixture_document();

    let cases = [
        ("get", HttpMethod::Get, "TestController1_ValidEndpointGet"),
        ("put", HttpMethod::Put, "TestController1_ValidEndpointPutAndPost"),
        ("post", HttpMethod::Post, "TestController1_ValidEndpointPutAndPost"),
        ("patch", HttpMethod::Patch, "TestController1_ValidEndpointPatchWithRoute"),
        ("delete", HttpMethod::Delete, "TestController1_ValidEndpointDeleteWithRoute"),
    ];

    for (path, method, operation_id) in cases {
        let item = &doc.paths[path];
        let op = item
            .operation(method)
            .unwrap_or_else(|| panic!("Missing {} {}", method, path));
        assert_eq!(op.operation_id, operation_id);

        // no other verb is populated on these paths
        let populated = [
            item.get.is_some(),
            item.put.is_some(),
            item.post.is_some(),
            item.delete.is_some(),
            item.options.is_some(),
            item.head.is_some(),
            item.patch.is_some(),
            item.trace.is_some(),
        ];
        assert_eq!(populated.iter().filter(|p| **p).count(), 1, "path {}", path);
    }
}

#[test]
fn test_string_response() {
    let doc = fixture_document();

    assert_eq!(
        operation_json(&doc, "get", HttpMethod::Get),
        json!({
            "operationId": "TestController1_ValidEndpointGet",
            "responses": {
                "200": {
                    "description": "Success",
                    "content": {
                        "application/json": { "schema": { "type": "string" } }
                    }
                }
            }
        })
    );
}

#[test]
fn test_query_and_route_parameters() {
    let doc = fixture_document();

    let query = operation_json(&doc, "Test3", HttpMethod::Get);
    assert_eq!(
        query["parameters"],
        json!([{ "name": "input", "in": "query", "required": true, "schema": { "type": "string" } }])
    );

    let route = operation_json(&doc, "Test3/test/{id}", HttpMethod::Get);
    assert_eq!(
        route["parameters"],
        json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }])
    );
}

#[test]
fn test_complex_input_and_output() {
    let doc = fixture_document();

    assert_eq!(
        operation_json(&doc, "Test3/3", HttpMethod::Get),
        json!({
            "operationId": "TestController3_ValidEndpointWithComplexTypeInputAndOutput",
            "parameters": [
                {
                    "name": "input",
                    "in": "query",
                    "required": true,
                    "schema": { "$ref": format!("#/components/schemas/{}", REQUEST_MODEL) }
                }
            ],
            "responses": {
                "200": {
                    "description": "Success",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": format!("#/components/schemas/{}", RESPONSE_MODEL) }
                        }
                    }
                }
            }
        })
    );

    let schema = serde_json::to_value(&doc.components.schemas[RESPONSE_MODEL]).unwrap();
    assert_eq!(
        schema,
        json!({
            "type": "object",
            "properties": {
                "Value1": { "type": "string" },
                "Value2": { "type": "integer", "format": "int32" }
            },
            "required": ["Value2"]
        })
    );
}

#[test]
fn test_body_parameter_on_get_is_ignored() {
    let doc = fixture_document();
    let op = operation_json(&doc, "Test3/4", HttpMethod::Get);

    assert!(op.get("parameters").is_none());
    assert!(op.get("requestBody").is_none());
}

#[test]
fn test_untyped_result_has_no_content() {
    let doc = fixture_document();

    for path in ["Test3/5", "Test3/6"] {
        let op = operation_json(&doc, path, HttpMethod::Get);
        assert_eq!(op["responses"], json!({ "200": { "description": "Success" } }));
    }
}

#[test]
fn test_serialized_outputs_agree() {
    let doc = fixture_document();

    let json_text = serialize_json(&doc).expect("Failed to serialize JSON");
    let yaml_text = serialize_yaml(&doc).expect("Failed to serialize YAML");

    let from_json: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    let from_yaml: serde_json::Value = serde_yaml::from_str(&yaml_text).unwrap();
    assert_eq!(from_json, from_yaml);
    assert_eq!(from_json["info"]["title"], "TestWebApi");
    assert!(from_json["components"]["schemas"][REQUEST_MODEL].is_object());
}

#[test]
fn test_concurrent_builds_are_independent() {
    let model = load_fixture();
    let expected = build_document(&model, Info::default());

    let documents: Vec<OpenApiDocument> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| build_document(&model, Info::default())))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("Build thread panicked"))
            .collect()
    });

    for doc in documents {
        assert_eq!(doc, expected);
    }
}
