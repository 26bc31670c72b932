//! Defines the endpoint for registering a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{CreateTransactionRequest, Transaction, service},
};

/// The state needed to register a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for registering a new transaction.
///
/// Responds with the persisted record, including its generated ID. Malformed
/// bodies never reach this handler: the [Json] extractor rejects them with a
/// client error.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Json<Transaction>, Error> {
    let connection = state.db_connection.lock().unwrap();

    service::create(request, &connection).map(Json)
}
