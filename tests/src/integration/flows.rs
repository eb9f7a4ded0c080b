//! # Integration Test Flows
//!
//! Drives `RecordChaincode` through `init`/`invoke` against an in-memory
//! ledger, exactly as a peer would: positional string arguments in, a
//! byte payload or a JSON error value out.
//!
//! ## Flows Tested:
//!
//! 1. **Create → Get**: stored record equals input plus `documentType`
//! 2. **Update**: merge semantics and missing-key handling
//! 3. **GetAllByFilter**: rich query scoped to the document type
//! 4. **Dispatch failures**: unknown operation kind, category, method

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use record_chaincode::prelude::*;
    use serde_json::{json, Value};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Peer {
        chaincode: RecordChaincode,
        ledger: InMemoryLedger,
    }

    impl Peer {
        fn new() -> Self {
            Self::with_ledger(InMemoryLedger::new())
        }

        fn with_ledger(ledger: InMemoryLedger) -> Self {
            let catalog = Arc::new(ErrorCatalog::builtin().unwrap());
            Self {
                chaincode: RecordChaincode::new(catalog),
                ledger,
            }
        }

        async fn invoke(&self, args: &[&str]) -> ChaincodeResponse {
            let args = args.iter().map(|s| (*s).to_string()).collect();
            self.chaincode.invoke(&self.ledger.stub(args)).await
        }

        async fn create(&self, record: Value) -> ChaincodeResponse {
            self.invoke(&["invoke", "sampleData", "create", &record.to_string()])
                .await
        }

        async fn get(&self, id: &str) -> ChaincodeResponse {
            self.invoke(&["query", "sampleData", "get", id]).await
        }
    }

    fn record_of(response: &ChaincodeResponse) -> Value {
        serde_json::from_slice(response.payload().expect("success payload")).unwrap()
    }

    fn error_of(response: &ChaincodeResponse) -> ChaincodeError {
        serde_json::from_str(response.message().expect("error message")).unwrap()
    }

    // =============================================================================
    // CREATE / GET
    // =============================================================================

    #[tokio::test]
    async fn test_init_needs_no_setup() {
        let peer = Peer::new();
        let response = peer.chaincode.init(&peer.ledger.stub(Vec::new())).await;
        assert!(response.is_success());
        assert!(peer.ledger.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_returns_stamped_record() {
        let peer = Peer::new();

        let response = peer.create(json!({"id": 7, "firstName": "Ann"})).await;
        assert_eq!(response.payload(), Some(&b"success"[..]));
        assert!(peer.ledger.contains_key("sampleData7"));

        // Operation kind is only checked for membership; "invoke" reads too.
        let response = peer.invoke(&["invoke", "sampleData", "get", "7"]).await;
        assert_eq!(
            record_of(&response),
            json!({"id": 7, "firstName": "Ann", "documentType": "sampleData"})
        );
    }

    #[tokio::test]
    async fn test_create_trims_and_coerces() {
        let peer = Peer::new();

        peer.create(json!({"id": "12", "lastName": "  Lovelace  "}))
            .await;

        let record = record_of(&peer.get("12").await);
        assert_eq!(record["id"], 12);
        assert_eq!(record["lastName"], "Lovelace");
    }

    #[tokio::test]
    async fn test_create_overwrites_existing_record() {
        let peer = Peer::new();

        peer.create(json!({"id": 1, "firstName": "Ann", "lastName": "Lee"}))
            .await;
        peer.create(json!({"id": 1, "firstName": "Bo"})).await;

        assert_eq!(
            record_of(&peer.get("1").await),
            json!({"id": 1, "firstName": "Bo", "documentType": "sampleData"})
        );
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let peer = Peer::new();

        let err = error_of(&peer.get("99").await);
        assert!(err.is(ErrorKind::KeyNotFound));
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.object["documentType"], "Sample data");
        assert_eq!(err.object["key"], 99);
    }

    #[tokio::test]
    async fn test_create_reports_every_violation() {
        let peer = Peer::new();
        let long = "x".repeat(256);

        let err = error_of(
            &peer
                .create(json!({"firstName": long, "lastName": 5, "age": 40}))
                .await,
        );

        assert!(err.is(ErrorKind::ValidationErrors));
        assert_eq!(
            err.object["message"],
            "The following fields are missing or have been entered with invalid data:"
        );
        assert_eq!(
            err.object["errors"],
            json!([
                " id is required at id",
                " firstName length must be less than or equal to 255 characters long at firstName",
                " lastName must be a string at lastName",
                " age is not allowed at age",
            ])
        );
        assert!(peer.ledger.is_empty());
    }

    // =============================================================================
    // UPDATE
    // =============================================================================

    #[tokio::test]
    async fn test_update_merges_fields() {
        let peer = Peer::new();
        peer.create(json!({"id": 3, "firstName": "Ann", "lastName": "Lee"}))
            .await;

        let response = peer
            .invoke(&[
                "invoke",
                "sampleData",
                "update",
                r#"{"id": 3, "lastName": "Smith"}"#,
            ])
            .await;
        assert_eq!(response.payload(), Some(&b"success"[..]));

        assert_eq!(
            record_of(&peer.get("3").await),
            json!({
                "id": 3,
                "firstName": "Ann",
                "lastName": "Smith",
                "documentType": "sampleData",
            })
        );
    }

    #[tokio::test]
    async fn test_update_missing_key() {
        let peer = Peer::new();

        let response = peer
            .invoke(&["invoke", "sampleData", "update", r#"{"id": 4}"#])
            .await;
        let err = error_of(&response);
        assert!(err.is(ErrorKind::KeyNotFound));
        assert_eq!(err.object["key"], 4);
        assert!(peer.ledger.is_empty());
    }

    #[tokio::test]
    async fn test_update_without_id_is_validation_error() {
        let peer = Peer::new();
        peer.create(json!({"id": 3, "firstName": "Ann"})).await;

        let response = peer
            .invoke(&["invoke", "sampleData", "update", r#"{"lastName": "Smith"}"#])
            .await;
        let err = error_of(&response);
        assert!(err.is(ErrorKind::ValidationErrors));
        assert_eq!(err.object["errors"], json!([" id is required at id"]));
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_field_and_keeps_record() {
        let peer = Peer::new();
        peer.create(json!({"id": 3, "firstName": "Ann"})).await;

        let response = peer
            .invoke(&["invoke", "sampleData", "update", r#"{"id": 3, "nick": "A"}"#])
            .await;
        let err = error_of(&response);
        assert!(err.is(ErrorKind::ValidationErrors));
        assert_eq!(err.object["errors"], json!([" nick is not allowed at nick"]));

        assert_eq!(record_of(&peer.get("3").await)["firstName"], "Ann");
    }

    // =============================================================================
    // GET ALL BY FILTER
    // =============================================================================

    #[tokio::test]
    async fn test_get_all_by_filter_scopes_to_document_type() {
        let ledger = InMemoryLedger::new();
        let mut foreign = serde_json::Map::new();
        foreign.insert("otherType5".to_string(), json!({"id": 5}));
        ledger.load_snapshot(&foreign).unwrap();

        let peer = Peer::with_ledger(ledger);
        peer.create(json!({"id": 5, "firstName": "Ann"})).await;
        peer.create(json!({"id": 6, "firstName": "Bo"})).await;

        let response = peer
            .invoke(&["query", "sampleData", "getAllByFilter", "5"])
            .await;
        assert_eq!(
            record_of(&response),
            json!([{"id": 5, "firstName": "Ann", "documentType": "sampleData"}])
        );
        assert_eq!(peer.ledger.open_cursors(), 0);
    }

    #[tokio::test]
    async fn test_float_form_id_reaches_the_same_record() {
        let peer = Peer::new();
        peer.create(json!({"id": 7, "firstName": "Ann"})).await;

        assert_eq!(record_of(&peer.get("7.0").await)["firstName"], "Ann");

        let response = peer
            .invoke(&["query", "sampleData", "getAllByFilter", "7.0"])
            .await;
        assert_eq!(record_of(&response).as_array().unwrap().len(), 1);

        let response = peer
            .invoke(&["invoke", "sampleData", "update", r#"{"id": 7.0, "lastName": "Lee"}"#])
            .await;
        assert!(response.is_success());
        assert_eq!(peer.ledger.len(), 1);
        assert_eq!(record_of(&peer.get("7").await)["lastName"], "Lee");
    }

    #[tokio::test]
    async fn test_get_all_by_filter_no_match_is_empty_list() {
        let peer = Peer::new();

        let response = peer
            .invoke(&["query", "sampleData", "getAllByFilter", "42"])
            .await;
        assert_eq!(response.payload(), Some(&b"[]"[..]));
        assert_eq!(peer.ledger.open_cursors(), 0);
    }

    #[tokio::test]
    async fn test_get_all_by_filter_without_rich_queries() {
        let peer = Peer::with_ledger(InMemoryLedger::without_rich_queries());

        let response = peer
            .invoke(&["query", "sampleData", "getAllByFilter", "5"])
            .await;
        let err = error_of(&response);
        assert!(err.is(ErrorKind::Chaincode));
        assert_eq!(err.status_code, Some(500));
    }

    // =============================================================================
    // DISPATCH FAILURES
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_operation_type() {
        let peer = Peer::new();

        let err = error_of(&peer.invoke(&["delete", "sampleData", "get", "1"]).await);
        assert!(err.is(ErrorKind::UnknownOperationType));
        assert_eq!(err.status_code, Some(400));
    }

    #[tokio::test]
    async fn test_unknown_document_type() {
        let peer = Peer::new();

        let err = error_of(&peer.invoke(&["query", "invoices", "get", "1"]).await);
        assert!(err.is(ErrorKind::UnknownDataCategory));
    }

    #[tokio::test]
    async fn test_unknown_method_carries_name() {
        let peer = Peer::new();

        let err = error_of(&peer.invoke(&["invoke", "sampleData", "remove", "1"]).await);
        assert!(err.is(ErrorKind::UnknownMethod));
        assert_eq!(err.object["methodName"], "remove");
    }

    #[tokio::test]
    async fn test_error_response_wire_shape() {
        let peer = Peer::new();

        let response = peer.get("8").await;
        let raw: Value = serde_json::from_str(response.message().unwrap()).unwrap();
        let keys: Vec<&str> = raw.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["name", "message", "statusCode", "status", "object"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(raw["status"], raw["statusCode"]);
    }
}
