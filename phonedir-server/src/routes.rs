//! Contact API routes and handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use phonedir_core::{render_csv, Contact, ContactStore, NewContact};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/export", get(export_contacts))
        .route(
            "/api/contacts/{id}",
            put(update_contact).delete(delete_contact),
        )
}

// ============================================================================
// Health
// ============================================================================

async fn health(State(state): State<AppState>) -> Response {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "unhealthy", "error": err.to_string() })),
        )
            .into_response(),
    }
}

// ============================================================================
// Contacts
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListParams {
    search: Option<String>,
}

/// Contact as listed by the API; `created_at` stays internal.
#[derive(Debug, Serialize)]
struct ContactBody {
    id: i64,
    name: String,
    phone: String,
    address: String,
}

impl From<Contact> for ContactBody {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone: contact.phone,
            address: contact.address,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContactPayload {
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
}

impl ContactPayload {
    /// Reject missing or empty name/phone before any store call.
    fn into_draft(self) -> Result<NewContact, ApiError> {
        let name = self.name.unwrap_or_default();
        let phone = self.phone.unwrap_or_default();
        if name.trim().is_empty() || phone.trim().is_empty() {
            return Err(ApiError::validation("Name and phone are required"));
        }
        Ok(NewContact::new(name, phone, self.address.unwrap_or_default()))
    }
}

async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<ContactBody>>> {
    let store = ContactStore::new(state.pool());
    let contacts = match params.search.as_deref() {
        Some(term) if !term.is_empty() => store.search(term).await?,
        _ => store.list_all().await?,
    };

    Ok(Json(contacts.into_iter().map(ContactBody::from).collect()))
}

async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let draft = payload.into_draft()?;
    let store = ContactStore::new(state.pool());
    let id = store.add(&draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": "Contact added successfully!" })),
    ))
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ContactPayload>,
) -> ApiResult<Json<serde_json::Value>> {
    let draft = payload.into_draft()?;
    let store = ContactStore::new(state.pool());
    store.update(id, &draft).await?;

    Ok(Json(json!({ "message": "Contact updated successfully!" })))
}

async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let store = ContactStore::new(state.pool());
    store.delete(id).await?;

    Ok(Json(json!({ "message": "Contact deleted successfully!" })))
}

async fn export_contacts(State(state): State<AppState>) -> ApiResult<Response> {
    let store = ContactStore::new(state.pool());
    let contacts = store.list_all().await?;
    let bytes = render_csv(&contacts)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"contacts_export.csv\"",
        ),
    ];
    Ok((headers, bytes).into_response())
}
