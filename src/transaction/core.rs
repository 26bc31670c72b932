//! Defines the core data models and database queries for financial transactions.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::DatabaseId};

// ============================================================================
// MODELS
// ============================================================================

/// The kind of financial movement a transaction records.
///
/// The set is closed: values outside it are rejected at deserialization.
/// Stored in the database as the variant's textual name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money paid into an account.
    Deposito,
    /// Money withdrawn from an account.
    Saque,
    /// A transfer between bank accounts.
    Transferencia,
    /// An instant payment routed through a PIX key.
    Pix,
}

impl TransactionType {
    /// The textual name used for storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposito => "DEPOSITO",
            TransactionType::Saque => "SAQUE",
            TransactionType::Transferencia => "TRANSFERENCIA",
            TransactionType::Pix => "PIX",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "DEPOSITO" => Some(TransactionType::Deposito),
            "SAQUE" => Some(TransactionType::Saque),
            "TRANSFERENCIA" => Some(TransactionType::Transferencia),
            "PIX" => Some(TransactionType::Pix),
            _ => None,
        }
    }
}

/// A registered financial transaction.
///
/// The ID is assigned by the database on insert; every other field is a
/// verbatim copy of what the client submitted. Serialized field names match
/// the public JSON contract (`tipoTransacao`, `valor`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The kind of financial movement.
    #[serde(rename = "tipoTransacao")]
    pub transaction_type: Option<TransactionType>,
    /// The amount of money moved. Fixed-point decimal, never a float.
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// The PIX key identifying the payment recipient, treated as an opaque string.
    #[serde(rename = "chavePix")]
    pub pix_key: Option<String>,
    /// The calendar date of the transaction, with no time component.
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

/// A transaction that has not been persisted yet, i.e. has no ID.
///
/// The amount is optional here so that a request without one reaches the
/// database and fails on the NOT NULL column, rather than being validated in
/// application code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTransaction {
    /// The kind of financial movement.
    pub transaction_type: Option<TransactionType>,
    /// The amount of money moved.
    pub amount: Option<Decimal>,
    /// The PIX key identifying the payment recipient.
    pub pix_key: Option<String>,
    /// The calendar date of the transaction.
    pub date: Option<Date>,
    /// The bank branch identifier.
    pub agency: Option<String>,
    /// The bank account identifier.
    pub account_number: Option<String>,
    /// Free-form text describing the transaction.
    pub description: Option<String>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a new transaction into the database and return the stored row,
/// including its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingAmount] if `new` has no amount (NOT NULL constraint),
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transacoes_financeiras
             (tipo_transacao, valor, chave_pix, data, agencia, numero_conta, descricao)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, tipo_transacao, valor, chave_pix, data, agencia, numero_conta, descricao",
        )?
        .query_row(
            (
                new.transaction_type.map(|kind| kind.as_str()),
                new.amount.map(|amount| amount.to_string()),
                new.pix_key,
                new.date,
                new.agency,
                new.account_number,
                new.description,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL,
                },
                _,
            ) => Error::MissingAmount,
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transacoes_financeiras;", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // valor holds a fixed-point decimal rendered as text. A REAL column
    // would not preserve exact scale.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transacoes_financeiras (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tipo_transacao TEXT,
                valor TEXT NOT NULL,
                chave_pix TEXT,
                data TEXT,
                agencia TEXT,
                numero_conta TEXT,
                descricao TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
///
/// **Note:** This function expects the row to contain all the table columns
/// in the order they were defined.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;

    let transaction_type = row
        .get::<_, Option<String>>(1)?
        .map(|name| {
            TransactionType::from_name(&name).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    Type::Text,
                    format!("unknown transaction type: {name}").into(),
                )
            })
        })
        .transpose()?;

    let amount = row.get::<_, String>(2)?;
    let amount = Decimal::from_str(&amount)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;

    Ok(Transaction {
        id,
        transaction_type,
        amount,
        pix_key: row.get(3)?,
        date: row.get(4)?,
        agency: row.get(5)?,
        account_number: row.get(6)?,
        description: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
