//! # Runtime Line Protocol
//!
//! Scripted sessions through the development runtime's line shim.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chaincode_runtime::{run_line, RuntimeConfig};
    use record_chaincode::prelude::*;
    use serde_json::{json, Value};

    async fn session(ledger: &InMemoryLedger, lines: &[&str]) -> Vec<Value> {
        let catalog = Arc::new(RuntimeConfig::default().load_catalog().unwrap());
        let chaincode = RecordChaincode::new(catalog);

        let mut out = Vec::new();
        for line in lines {
            let rendered = run_line(&chaincode, ledger, line).await.unwrap();
            out.push(serde_json::from_str(&rendered).unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let ledger = InMemoryLedger::new();
        let out = session(
            &ledger,
            &[
                r#"["invoke", "sampleData", "create", {"id": 7, "firstName": "Ann"}]"#,
                r#"["invoke", "sampleData", "get", 7]"#,
                r#"["invoke", "sampleData", "update", {"id": 7, "lastName": "Lee"}]"#,
                r#"["query", "sampleData", "getAllByFilter", 7]"#,
            ],
        )
        .await;

        assert_eq!(out[0], json!({"status": 200, "payload": "success"}));

        let record: Value = serde_json::from_str(out[1]["payload"].as_str().unwrap()).unwrap();
        assert_eq!(
            record,
            json!({"id": 7, "firstName": "Ann", "documentType": "sampleData"})
        );

        assert_eq!(out[2]["status"], 200);

        let list: Value = serde_json::from_str(out[3]["payload"].as_str().unwrap()).unwrap();
        assert_eq!(
            list,
            json!([{"id": 7, "firstName": "Ann", "lastName": "Lee", "documentType": "sampleData"}])
        );
    }

    #[tokio::test]
    async fn test_errors_render_as_json_messages() {
        let ledger = InMemoryLedger::new();
        let out = session(&ledger, &[r#"["query", "unknownType", "get", 1]"#]).await;

        assert_eq!(out[0]["status"], 500);
        let err: Value = serde_json::from_str(out[0]["message"].as_str().unwrap()).unwrap();
        assert_eq!(err["name"], "UNKNOWN_DATA_CATEGORY");
        assert_eq!(err["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_bad_line_is_rejected_without_touching_state() {
        let ledger = InMemoryLedger::new();
        let catalog = Arc::new(ErrorCatalog::builtin().unwrap());
        let chaincode = RecordChaincode::new(catalog);

        assert!(run_line(&chaincode, &ledger, "not json").await.is_err());
        assert!(run_line(&chaincode, &ledger, r#"{"id": 1}"#).await.is_err());
        assert!(ledger.is_empty());
    }
}
