//! # Sample Data Handler
//!
//! Records with an integer `id` and optional first/last names.

use super::{validate_data, HandlerContext, Method, RecordHandler, SUCCESS};
use crate::domain::entities::{key_id, stamp_document_type, Document, DocumentType};
use crate::domain::query::RichQuery;
use crate::domain::schema::{FieldRule, Schema};
use crate::errors::{ErrorKind, InvokeError};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

const DOCUMENT_TYPE: DocumentType = DocumentType::SampleData;

/// Label reported by `update` when the record is missing. `get` reports
/// `DocumentType::label`; the two differ in capitalization on the wire.
const UPDATE_NOT_FOUND_LABEL: &str = "Sample Data";

/// Schema for sample data records.
pub const SAMPLE_DATA_SCHEMA: Schema = Schema::new(&[
    FieldRule::integer("id", 0, 65535).required(),
    FieldRule::text("firstName", 255),
    FieldRule::text("lastName", 255),
]);

/// Handler for `sampleData` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleDataHandler;

impl SampleDataHandler {
    /// Validate and store a new record.
    async fn create(&self, ctx: &HandlerContext<'_>, data: Value) -> Result<Vec<u8>, InvokeError> {
        info!("Starting add data transaction");

        let validated = validate_data(ctx.catalog, &SAMPLE_DATA_SCHEMA, &data)?;
        let id = validated.get("id").map(key_id).unwrap_or_default();
        let mut record = Value::Object(validated);
        stamp_document_type(DOCUMENT_TYPE, &mut record);

        ctx.state.put_data(DOCUMENT_TYPE, &id, &record).await?;

        info!(id = %id, "Ending add data transaction");
        Ok(SUCCESS.to_vec())
    }

    /// Stored bytes for the record with id `key`.
    async fn get(&self, ctx: &HandlerContext<'_>, key: Value) -> Result<Vec<u8>, InvokeError> {
        let results = ctx.state.get_data(DOCUMENT_TYPE, &key_id(&key)).await?;
        if results.is_empty() {
            return Err(not_found(ctx, DOCUMENT_TYPE.label(), key));
        }
        Ok(results)
    }

    /// Merge the validated fields of `updated_info` into the stored record.
    ///
    /// The payload is checked against the full schema, so `id` is required
    /// here as well.
    async fn update(
        &self,
        ctx: &HandlerContext<'_>,
        updated_info: Value,
    ) -> Result<Vec<u8>, InvokeError> {
        info!("Starting update data transaction");

        // No id means no record to address: report the payload's violations.
        if updated_info.get("id").is_none() {
            validate_data(ctx.catalog, &SAMPLE_DATA_SCHEMA, &updated_info)?;
        }
        let id = updated_info.get("id").cloned().unwrap_or(Value::Null);

        let found = ctx.state.get_data(DOCUMENT_TYPE, &key_id(&id)).await?;
        if found.is_empty() {
            return Err(not_found(ctx, UPDATE_NOT_FOUND_LABEL, id));
        }

        let mut original = Document::from_bytes(&found)?;
        let validated = validate_data(ctx.catalog, &SAMPLE_DATA_SCHEMA, &updated_info)?;
        original.merge(validated);

        let stored_id = original.id().map(key_id).unwrap_or_default();
        ctx.state.put_data(DOCUMENT_TYPE, &stored_id, &original).await?;

        info!(id = %stored_id, "Ending update data transaction");
        Ok(SUCCESS.to_vec())
    }

    /// Every record of this type whose `id` equals `filter_value`.
    ///
    /// Needs a host store with rich-query support.
    async fn get_all_by_filter(
        &self,
        ctx: &HandlerContext<'_>,
        filter_value: Value,
    ) -> Result<Vec<u8>, InvokeError> {
        let query = RichQuery::by_id(DOCUMENT_TYPE, filter_value);
        ctx.state.get_data_by_query(&query).await
    }

}

fn not_found(ctx: &HandlerContext<'_>, label: &str, key: Value) -> InvokeError {
    ctx.catalog
        .error_with(
            ErrorKind::KeyNotFound,
            &json!({ "documentType": label, "key": key }),
        )
        .into()
}

#[async_trait]
impl RecordHandler for SampleDataHandler {
    fn document_type(&self) -> DocumentType {
        DOCUMENT_TYPE
    }

    fn methods(&self) -> &'static [Method] {
        &Method::ALL
    }

    async fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        method: Method,
        payload: Value,
    ) -> Result<Vec<u8>, InvokeError> {
        match method {
            Method::Create => self.create(ctx, payload).await,
            Method::Get => self.get(ctx, payload).await,
            Method::Update => self.update(ctx, payload).await,
            Method::GetAllByFilter => self.get_all_by_filter(ctx, payload).await,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
