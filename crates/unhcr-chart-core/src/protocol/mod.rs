pub mod capabilities;
pub mod constants;
pub mod error;
pub mod message;
pub mod result;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::protocol::{
        error::ErrorData,
        message::{JsonRpcError, JsonRpcMessage, JsonRpcRaw, JsonRpcResponse, RequestId},
    };

    #[test]
    fn test_notification_conversion() {
        let raw = JsonRpcRaw {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: Some("notifications/initialized".to_string()),
            params: Some(json!({"key": "value"})),
            result: None,
            error: None,
        };

        let message = JsonRpcMessage::try_from(raw).unwrap();
        match message {
            JsonRpcMessage::Notification(n) => {
                assert_eq!(n.jsonrpc, "2.0");
                assert_eq!(n.method, "notifications/initialized");
                assert_eq!(n.params.unwrap(), json!({"key": "value"}));
            }
            _ => panic!("Expected Notification"),
        }
    }

    #[test]
    fn test_request_conversion() {
        let raw = JsonRpcRaw {
            jsonrpc: "2.0".to_string(),
            id: Some(RequestId::Number(1)),
            method: Some("tools/call".to_string()),
            params: Some(json!({"name": "generate_unhcr_graph"})),
            result: None,
            error: None,
        };

        let message = JsonRpcMessage::try_from(raw).unwrap();
        match message {
            JsonRpcMessage::Request(r) => {
                assert_eq!(r.jsonrpc, "2.0");
                assert_eq!(r.id, Some(RequestId::Number(1)));
                assert_eq!(r.method, "tools/call");
                assert_eq!(r.params.unwrap(), json!({"name": "generate_unhcr_graph"}));
            }
            _ => panic!("Expected Request"),
        }
    }

    #[test]
    fn string_ids_survive_deserialization() {
        let message: JsonRpcMessage =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":"abc-1","method":"ping"}"#).unwrap();
        match message {
            JsonRpcMessage::Request(r) => assert_eq!(r.id, Some(RequestId::from("abc-1"))),
            _ => panic!("Expected Request"),
        }
    }

    #[test]
    fn negative_ids_are_numbers() {
        let message: JsonRpcMessage =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":-1,"method":"ping"}"#).unwrap();
        match message {
            JsonRpcMessage::Request(r) => assert_eq!(r.id, Some(RequestId::Number(-1))),
            _ => panic!("Expected Request"),
        }
    }

    #[test]
    fn error_without_id_serializes_null_id() {
        let error = JsonRpcError {
            jsonrpc: "2.0".to_string(),
            id: None,
            error: ErrorData::new(-32700, "bad json"),
        };
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["id"], serde_json::Value::Null);
        assert!(value.as_object().unwrap().contains_key("id"));
    }

    #[test]
    fn error_field_wins_over_result() {
        let message: JsonRpcMessage = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "error": {"code": -32601, "message": "nope"}
        }))
        .unwrap();
        assert!(matches!(message, JsonRpcMessage::Error(e) if e.error.code == -32601));
    }

    #[test]
    fn response_serializes_without_empty_fields() {
        let response = JsonRpcResponse::with_result(Some(RequestId::Number(3)), json!({}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 3, "result": {}}));
    }

    #[test]
    fn initialize_result_from_response() {
        use crate::protocol::result::InitializeResult;

        let response = JsonRpcMessage::Response(JsonRpcResponse::with_result(
            Some(RequestId::Number(1)),
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {"listChanged": false}},
                "serverInfo": {"name": "unhcr-chart", "version": "0.1.0"}
            }),
        ));
        let result = InitializeResult::try_from(response).unwrap();
        assert_eq!(result.server_info.name, "unhcr-chart");
        assert!(result.instructions.is_none());

        let not_a_response = JsonRpcMessage::Nil;
        assert!(InitializeResult::try_from(not_a_response).is_err());
    }
}
