//! The API endpoint URIs.

/// The route to register a financial transaction (POST) and to probe the
/// service (GET).
pub const TRANSACTIONS: &str = "/api/v1/financeiro/transacao";
