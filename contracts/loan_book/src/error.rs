use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller not authorized (owner may not borrow from itself)
    Unauthorized = 10,

    // ============================================
    // RECORD STATE ERRORS (20-29)
    // ============================================
    /// No pending proposal for this borrower
    NoPendingProposal = 20,
    /// No active loan for this borrower
    NoActiveLoan = 21,

    // ============================================
    // AMOUNT ERRORS (30-39)
    // ============================================
    /// Previous loan not fully repaid
    OutstandingBalance = 30,
    /// Requested principal above the configured maximum
    AmountExceedsLimit = 31,
    /// Payment must equal the amount due exactly
    PaymentMismatch = 32,
    /// Amount negative, rate out of range, or arithmetic overflow
    InvalidAmount = 33,

    // ============================================
    // DEADLINE ERRORS (40-49)
    // ============================================
    /// Cannot send reminder: loan not yet past its end time
    NotYetDue = 40,

    // ============================================
    // OPERATIONAL ERRORS (50-59)
    // ============================================
    /// Ledger is Paused where Open is required, or vice versa
    InvalidLedgerState = 50,

    // ============================================
    // INDEX ERRORS (60-69)
    // ============================================
    /// Pending index access beyond bounds
    IndexOutOfRange = 60,
}
