//! Maps inbound registration requests into persisted transactions.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    transaction::{NewTransaction, Transaction, TransactionType, core::create_transaction},
};

/// The payload for registering a financial transaction.
///
/// Same shape as [Transaction] minus the ID. Every field is optional,
/// including the amount: a missing amount is rejected by the database's
/// NOT NULL column, not by application code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// The kind of financial movement.
    #[serde(rename = "tipoTransacao")]
    pub transaction_type: Option<TransactionType>,
    /// The amount of money moved. Accepts a JSON number or a decimal string.
    #[serde(rename = "valor")]
    pub amount: Option<Decimal>,
    /// The PIX key identifying the payment recipient.
    #[serde(rename = "chavePix")]
    pub pix_key: Option<String>,
    /// The calendar date of the transaction, as `YYYY-MM-DD`.
    #[serde(rename = "data")]
    pub date: Option<Date>,
    /// The bank branch identifier.
    #[serde(rename = "agencia")]
    pub agency: Option<String>,
    /// The bank account identifier.
    #[serde(rename = "numeroConta")]
    pub account_number: Option<String>,
    /// Free-form text describing the transaction.
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

/// Register a new transaction from `request`.
///
/// Each field is copied verbatim into the new record: no transformation, no
/// defaulting, no validation. Failures from the database layer propagate
/// unchanged.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingAmount] if the request has no amount,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create(
    request: CreateTransactionRequest,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let new = NewTransaction {
        transaction_type: request.transaction_type,
        amount: request.amount,
        pix_key: request.pix_key,
        date: request.date,
        agency: request.agency,
        account_number: request.account_number,
        description: request.description,
    };

    create_transaction(new, connection)
}
