use soroban_sdk::{contracttype, Address, Env};

// Constants
pub const RATE_DENOMINATOR: i128 = 100_000; // 100% for a x1000-scaled rate
pub const MAX_RATE_X1000: u32 = 65_535; // rate is conceptually a u16

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerState {
    /// Proposals, approvals and repayments are accepted
    Open = 0,
    /// Only owner configuration changes are accepted
    Paused = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoanState {
    /// No proposal and nothing owed
    NoLoan = 0,
    /// Proposal queued, awaiting owner decision
    Proposed = 1,
    /// Principal disbursed, repayment outstanding
    Active = 2,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanRecord {
    /// Borrower address
    pub borrower: Address,
    /// Principal requested in the current proposal
    pub amount_proposed: i128,
    /// Principal plus interest owed on the active loan
    pub amount_due: i128,
    /// Repayment deadline of the active loan
    pub end_time: u64,
    /// Current lifecycle state
    pub state: LoanState,
    /// Earned by repaying before end_time; discounts the next loan
    pub early_pay: bool,
    /// Position in the pending index, valid only while Proposed
    pub pending_key: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Token,
    MaxPrincipal,
    InterestRateX1000, // scaled x1000 (e.g. 5000 = 5%)
    PaybackPeriod,     // seconds
    State,
    Loan(Address), // borrower → LoanRecord
    Pending,       // Vec<Address> of queued proposals
    Initialized,
}

/// Fetch a borrower's record, creating a zeroed `NoLoan` default if the
/// borrower has never interacted with the ledger. Records are never
/// deleted, only reset to this shape.
pub fn loan_or_default(env: &Env, borrower: &Address) -> LoanRecord {
    env.storage()
        .instance()
        .get(&DataKey::Loan(borrower.clone()))
        .unwrap_or(LoanRecord {
            borrower: borrower.clone(),
            amount_proposed: 0,
            amount_due: 0,
            end_time: 0,
            state: LoanState::NoLoan,
            early_pay: false,
            pending_key: 0,
        })
}

pub fn save_loan(env: &Env, record: &LoanRecord) {
    env.storage()
        .instance()
        .set(&DataKey::Loan(record.borrower.clone()), record);
}
