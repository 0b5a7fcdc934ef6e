//! Error types for the ledger layer.

/// Errors a [`LedgerClient`](crate::LedgerClient) can report.
///
/// These are raw ledger-side failures. The session layer never lets them
/// escape to the game: it folds them into its own failure contract.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The wallet could not authenticate any account (user cancelled the
    /// account picker, provider unavailable, unknown selector...).
    #[error("authentication rejected: {0}")]
    AuthenticationRejected(String),

    /// The transaction could not be handed to the ledger at all.
    /// Chain-side rejections are reported in the
    /// [`TransactionOutcome`](crate::TransactionOutcome) instead.
    #[error("transaction submission failed: {0}")]
    SubmissionFailed(String),

    /// A transaction argument could not be encoded as JSON-Cadence.
    #[error("argument encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Bytes did not decode into a JSON-Cadence value.
    #[error("argument decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
