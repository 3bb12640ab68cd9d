use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanProposalEvent {
    pub borrower: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanGrantedEvent {
    pub borrower: Address,
    pub principal: i128,
    pub amount_due: i128,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanRejectedEvent {
    pub borrower: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanPaidBackEvent {
    pub borrower: Address,
    pub amount: i128,
    pub early: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReminderToPayEvent {
    pub borrower: Address,
    pub amount_due: i128,
    pub end_time: u64,
}
