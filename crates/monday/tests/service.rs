use std::collections::HashMap;
use std::sync::Mutex;

use monday::{
    Board, Client, ColumnValues, DecodeOptions, Error, GraphqlRequest, Monday, Result, Service,
    Transport,
};
use monday_core::decode::Problem;
use serde_json::{json, Value};

/// Answers each operation with a fixed `data` payload and records the requests.
#[derive(Default)]
struct ScriptedTransport {
    responses: HashMap<&'static str, Value>,
    requests: Mutex<Vec<GraphqlRequest>>,
}

impl ScriptedTransport {
    fn with(mut self, operation: &'static str, data: Value) -> Self {
        self.responses.insert(operation, data);
        self
    }

    fn operations(&self) -> Vec<&'static str> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.operation)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value> {
        let response = self.responses.get(request.operation).cloned();
        let operation = request.operation;
        self.requests.lock().unwrap().push(request);

        response.ok_or_else(|| Error::Transport(format!("no script for {operation}")))
    }
}

fn board_data() -> Value {
    json!({
        "boards": [{
            "id": "1234567890",
            "name": "Propiedades",
            "columns": [
                {"id": "name", "title": "Name", "type": "name", "settings_str": "{}"},
                {
                    "id": "estado2",
                    "title": "Estado",
                    "type": "color",
                    "settings_str": "{\"labels\":{\"0\":\"Disponible\",\"1\":\"Escriturado\"},\"labels_positions_v2\":{\"0\":1,\"1\":0}}"
                },
                {
                    "id": "tags",
                    "title": "Tags",
                    "type": "dropdown",
                    "settings_str": "{\"labels\":[{\"id\":12,\"name\":\"Alpha\"},{\"id\":34,\"name\":\"Beta\"}]}"
                },
                {"id": "notes", "title": "Notes", "type": "text", "settings_str": "{}"}
            ]
        }]
    })
}

fn items_data() -> Value {
    json!({
        "items_by_column_values": [
            {
                "id": "111",
                "name": "Casa 1",
                "column_values": [
                    {"id": "estado2", "title": "status", "value": "{\"index\":0}", "type": "color"},
                    {"id": "tags", "title": "tags", "value": "{\"ids\":[34,12]}", "type": "dropdown"},
                    {"id": "notes", "title": "notes", "value": "\"hello\"", "type": "text"}
                ],
                "assets": [{
                    "id": "9",
                    "name": "plano.pdf",
                    "public_url": "https://files.example.com/plano.pdf",
                    "file_size": 2048,
                    "uploaded_by": {"id": "5", "email": "owner@example.com"}
                }]
            },
            {
                "id": "112",
                "name": "Casa 2",
                "column_values": [
                    {"id": "estado2", "title": "status", "value": "{\"index\":7}", "type": "color"},
                    {"id": "removed", "title": "Old", "value": "\"x\"", "type": "text"}
                ]
            }
        ]
    })
}

fn service(api: ScriptedTransport) -> Monday<ScriptedTransport> {
    Monday::with_client(Client::with_transports(api, ScriptedTransport::default()))
}

async fn fetch_board(monday: &Monday<ScriptedTransport>) -> Board {
    monday.get_board(1234567890).await.unwrap()
}

#[tokio::test]
async fn decodes_status_and_dropdown_labels() {
    // Arrange
    let monday = service(
        ScriptedTransport::default()
            .with("get_board", board_data())
            .with("items_by_column_values", items_data()),
    );
    let board = fetch_board(&monday).await;

    // Act
    let decoded = monday
        .get_decoded_items_by_column_values(
            &board,
            "estado2",
            "Disponible",
            &DecodeOptions::default(),
        )
        .await
        .unwrap();

    // Assert
    let first = &decoded.items[0];
    assert_eq!(first.column_values[0].title, "Estado");
    assert_eq!(first.column_values[0].value, "Disponible");
    assert_eq!(first.column_values[1].value, "Beta, Alpha");
    assert_eq!(first.column_values[2].value, "\"hello\"");
    assert_eq!(first.assets[0].file_size, "2048");
    assert_eq!(first.assets[0].uploaded_by.email, "owner@example.com");

    assert_eq!(
        monday.client().api_transport().operations(),
        vec!["get_board", "items_by_column_values"]
    );
}

#[tokio::test]
async fn lenient_decoding_reports_each_problem() {
    // Arrange
    let monday = service(
        ScriptedTransport::default()
            .with("get_board", board_data())
            .with("items_by_column_values", items_data()),
    );
    let board = fetch_board(&monday).await;

    // Act
    let decoded = monday
        .get_decoded_items_by_column_values(
            &board,
            "estado2",
            "Disponible",
            &DecodeOptions::default(),
        )
        .await
        .unwrap();

    // Assert: raw values are kept where resolution failed
    assert!(!decoded.is_clean());
    let second = &decoded.items[1];
    assert_eq!(second.column_values[0].value, "{\"index\":7}");
    assert_eq!(second.column_values[1].value, "\"x\"");
    assert_eq!(second.column_values[1].title, "Old");

    assert!(matches!(
        decoded.diagnostic("112", "estado2").map(|d| &d.problem),
        Some(Problem::Unresolved(_))
    ));
    assert!(matches!(
        decoded.diagnostic("112", "removed").map(|d| &d.problem),
        Some(Problem::UnknownColumn)
    ));
    assert!(decoded.diagnostic("111", "estado2").is_none());
}

#[tokio::test]
async fn strict_decoding_fails_on_unknown_label() {
    let monday = service(
        ScriptedTransport::default()
            .with("get_board", board_data())
            .with("items_by_column_values", items_data()),
    );
    let board = fetch_board(&monday).await;

    let err = monday
        .get_decoded_items_by_column_values(
            &board,
            "estado2",
            "Disponible",
            &DecodeOptions::strict(),
        )
        .await
        .unwrap_err();

    match err {
        Error::Decode(err) => {
            assert_eq!(err.item_id, "112");
            assert_eq!(err.column_id, "estado2");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn decodes_every_item_of_a_board() {
    // Arrange
    let monday = service(
        ScriptedTransport::default()
            .with("get_board", board_data())
            .with(
                "get_items",
                json!({"boards": [{"items": [{
                    "id": "111",
                    "name": "Casa 1",
                    "group": {"id": "topics", "title": "Disponibles"},
                    "column_values": [
                        {"id": "estado2", "title": "", "value": "{\"index\":1}", "type": "color"},
                        {"id": "tags", "title": "", "value": null, "type": "dropdown"}
                    ]
                }]}]}),
            ),
    );
    let board = fetch_board(&monday).await;

    // Act
    let decoded = monday
        .get_decoded_items(&board, &DecodeOptions::default())
        .await
        .unwrap();

    // Assert: unset dropdown stays empty without a diagnostic
    assert!(decoded.is_clean());
    let item = &decoded.items[0];
    assert_eq!(item.group.as_ref().unwrap().title, "Disponibles");
    assert_eq!(item.column_values[0].value, "Escriturado");
    assert_eq!(item.column_values[1].value, "");
}

#[tokio::test]
async fn empty_filter_result_is_not_an_error() {
    let monday = service(
        ScriptedTransport::default()
            .with("get_board", board_data())
            .with("items_by_column_values", json!({"items_by_column_values": []})),
    );
    let board = fetch_board(&monday).await;

    let decoded = monday
        .get_decoded_items_by_column_values(
            &board,
            "estado2",
            "Vendido",
            &DecodeOptions::default(),
        )
        .await
        .unwrap();

    assert!(decoded.items.is_empty());
    assert!(decoded.is_clean());
}

#[tokio::test]
async fn invalid_item_id_makes_no_request() {
    // Arrange
    let monday = service(ScriptedTransport::default());

    // Act
    let err = monday.add_item_update("abc", "hello").await.unwrap_err();

    // Assert
    assert!(matches!(err, Error::InvalidItemId(_)));
    assert!(monday.client().api_transport().operations().is_empty());
    assert!(monday.client().files_transport().operations().is_empty());
}

#[tokio::test]
async fn writes_pass_through_to_the_client() {
    // Arrange
    let monday = service(
        ScriptedTransport::default()
            .with("create_item", json!({"create_item": {"id": "200"}}))
            .with("create_subitem", json!({"create_subitem": {"id": "201"}}))
            .with(
                "change_multiple_column_values",
                json!({"change_multiple_column_values": {"id": "200"}}),
            )
            .with("delete_item", json!({"delete_item": {"id": "200"}})),
    );
    let values = ColumnValues::new().text("notes", "hola");

    // Act
    let created = monday
        .add_item(1234567890, "Casa 3", Some(&values))
        .await
        .unwrap();
    let child = monday.add_subitem(200, "Cocina", &values).await.unwrap();
    let changed = monday
        .change_multiple_column_values(1234567890, 200, &values)
        .await
        .unwrap();
    let deleted = monday.delete_item(200).await.unwrap();

    // Assert
    assert_eq!((created.as_str(), child.as_str()), ("200", "201"));
    assert_eq!((changed.as_str(), deleted.as_str()), ("200", "200"));
    assert_eq!(
        monday.client().api_transport().operations(),
        vec![
            "create_item",
            "create_subitem",
            "change_multiple_column_values",
            "delete_item"
        ]
    );
}

#[tokio::test]
async fn non_numeric_board_id_is_rejected() {
    let monday = service(ScriptedTransport::default());
    let board = Board {
        id: "not-a-number".to_string(),
        ..Board::default()
    };

    let err = monday
        .get_decoded_items(&board, &DecodeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidBoardId(ref id) if id == "not-a-number"));
    assert!(monday.client().api_transport().operations().is_empty());
}
