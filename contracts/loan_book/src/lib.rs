#![no_std]

mod accounting;
mod error;
mod events;
mod pending;
mod storage;

use error::Error;
use events::*;
use storage::{DataKey, LedgerState, LoanRecord, LoanState, MAX_RATE_X1000};

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol};

#[contract]
pub struct LoanBook;

#[contractimpl]
impl LoanBook {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the loan book. The ledger starts Paused; the owner
    /// must open it before any borrowing can occur.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidAmount`: Negative max principal or rate above u16 range
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        max_principal: i128,
        interest_rate_x1000: u32,
        payback_period: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        if max_principal < 0 || interest_rate_x1000 > MAX_RATE_X1000 {
            return Err(Error::InvalidAmount);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::MaxPrincipal, &max_principal);
        env.storage()
            .instance()
            .set(&DataKey::InterestRateX1000, &interest_rate_x1000);
        env.storage().instance().set(&DataKey::PaybackPeriod, &payback_period);
        env.storage().instance().set(&DataKey::State, &LedgerState::Paused);

        Ok(())
    }

    // ============================================
    // LOAN LIFECYCLE
    // ============================================

    /// Propose a loan of `amount`, queueing it for an owner decision.
    ///
    /// A second proposal from the same borrower overwrites the first in
    /// place, reusing its pending slot. Proposing zero cancels a pending
    /// proposal. A borrower with an unpaid balance may not propose.
    ///
    /// # Errors
    /// - `InvalidLedgerState`: Ledger is not Open
    /// - `Unauthorized`: The owner may not borrow from itself
    /// - `InvalidAmount`: Amount is negative
    /// - `AmountExceedsLimit`: Amount above the configured maximum
    /// - `OutstandingBalance`: Previous loan not fully repaid
    pub fn propose_loan(env: Env, borrower: Address, amount: i128) -> Result<(), Error> {
        Self::require_open(&env)?;

        borrower.require_auth();

        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;
        if borrower == owner {
            return Err(Error::Unauthorized);
        }

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let max_principal: i128 = env
            .storage()
            .instance()
            .get(&DataKey::MaxPrincipal)
            .unwrap_or(0);
        if amount > max_principal {
            return Err(Error::AmountExceedsLimit);
        }

        let mut record = storage::loan_or_default(&env, &borrower);
        if record.amount_due > 0 {
            return Err(Error::OutstandingBalance);
        }

        if record.state == LoanState::Proposed {
            if amount == 0 {
                // Cancellation: leave the queue, reset the slot.
                pending::remove_at(&env, record.pending_key)?;
                record.pending_key = 0;
                record.state = LoanState::NoLoan;
            }
        } else if amount > 0 {
            record.pending_key = pending::insert(&env, &borrower);
            record.state = LoanState::Proposed;
        }

        // early_pay is deliberately untouched: an earned discount is
        // carried into the next approval.
        record.amount_proposed = amount;
        storage::save_loan(&env, &record);

        env.events().publish(
            (Symbol::new(&env, "loan_proposed"), borrower.clone()),
            LoanProposalEvent { borrower: borrower.clone(), amount },
        );

        Ok(())
    }

    /// Approve a pending proposal, disbursing the principal (Owner only).
    ///
    /// The amount due includes interest, discounted if the borrower
    /// earned an early-payback discount on their previous loan.
    ///
    /// # Errors
    /// - `InvalidLedgerState`: Ledger is not Open
    /// - `NoPendingProposal`: Borrower has no pending proposal
    /// - `InvalidAmount`: Interest or end-time computation overflowed
    pub fn approve_loan(env: Env, borrower: Address) -> Result<(), Error> {
        Self::require_open(&env)?;
        Self::require_owner(&env)?;

        let mut record = storage::loan_or_default(&env, &borrower);
        if record.state != LoanState::Proposed {
            return Err(Error::NoPendingProposal);
        }

        let token: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &borrower,
            &record.amount_proposed,
        );

        pending::remove_at(&env, record.pending_key)?;

        let rate: u32 = env
            .storage()
            .instance()
            .get(&DataKey::InterestRateX1000)
            .unwrap_or(0);
        let period: u64 = env
            .storage()
            .instance()
            .get(&DataKey::PaybackPeriod)
            .unwrap_or(0);

        let amount_due = accounting::amount_due(record.amount_proposed, rate, record.early_pay)
            .ok_or(Error::InvalidAmount)?;

        record.amount_due = amount_due;
        record.end_time = env
            .ledger()
            .timestamp()
            .checked_add(period)
            .ok_or(Error::InvalidAmount)?;
        record.early_pay = false;
        record.pending_key = 0;
        record.state = LoanState::Active;
        storage::save_loan(&env, &record);

        env.events().publish(
            (Symbol::new(&env, "loan_granted"), borrower.clone()),
            LoanGrantedEvent {
                borrower: borrower.clone(),
                principal: record.amount_proposed,
                amount_due,
                end_time: record.end_time,
            },
        );

        Ok(())
    }

    /// Reject a pending proposal (Owner only).
    ///
    /// # Errors
    /// - `InvalidLedgerState`: Ledger is not Open
    /// - `NoPendingProposal`: Borrower has no pending proposal
    pub fn reject_loan(env: Env, borrower: Address) -> Result<(), Error> {
        Self::require_open(&env)?;
        Self::require_owner(&env)?;
        Self::reject_record(&env, &borrower)
    }

    /// Reject every pending proposal (Owner only). A no-op when the
    /// pending index is already empty.
    pub fn reject_all_pending(env: Env) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Self::drain_pending(&env)
    }

    /// Repay an active loan in full. The payment must equal the amount
    /// due exactly; partial repayment is not supported. Repaying before
    /// the end time earns a discount on the borrower's next loan.
    ///
    /// # Errors
    /// - `NoActiveLoan`: Borrower has a pending proposal, not a loan
    /// - `PaymentMismatch`: Payment differs from the amount due
    pub fn repay(env: Env, borrower: Address, payment: i128) -> Result<(), Error> {
        borrower.require_auth();

        let mut record = storage::loan_or_default(&env, &borrower);
        // A Proposed record has nothing due; resetting it here would
        // strand the borrower in the pending index.
        if record.state == LoanState::Proposed {
            return Err(Error::NoActiveLoan);
        }
        if payment != record.amount_due {
            return Err(Error::PaymentMismatch);
        }

        let early = env.ledger().timestamp() < record.end_time;

        if payment > 0 {
            let owner: Address = env
                .storage()
                .instance()
                .get(&DataKey::Owner)
                .ok_or(Error::NotInitialized)?;
            let token: Address = env
                .storage()
                .instance()
                .get(&DataKey::Token)
                .ok_or(Error::NotInitialized)?;
            token::Client::new(&env, &token).transfer(&borrower, &owner, &payment);
        }

        if early {
            record.early_pay = true;
        }
        record.amount_due = 0;
        record.end_time = 0;
        record.state = LoanState::NoLoan;
        storage::save_loan(&env, &record);

        env.events().publish(
            (Symbol::new(&env, "loan_paid_back"), borrower.clone()),
            LoanPaidBackEvent {
                borrower: borrower.clone(),
                amount: payment,
                early,
            },
        );

        Ok(())
    }

    /// Emit a payment reminder for an overdue loan (Owner only).
    /// No state change.
    ///
    /// # Errors
    /// - `NoActiveLoan`: Borrower has no active loan
    /// - `NotYetDue`: Loan end time has not passed yet
    pub fn send_reminder(env: Env, borrower: Address) -> Result<(), Error> {
        Self::require_owner(&env)?;

        let record = storage::loan_or_default(&env, &borrower);
        if record.state != LoanState::Active {
            return Err(Error::NoActiveLoan);
        }
        if env.ledger().timestamp() <= record.end_time {
            return Err(Error::NotYetDue);
        }

        env.events().publish(
            (Symbol::new(&env, "reminder_to_pay"), borrower.clone()),
            ReminderToPayEvent {
                borrower: borrower.clone(),
                amount_due: record.amount_due,
                end_time: record.end_time,
            },
        );

        Ok(())
    }

    /// Toggle the ledger between Paused and Open (Owner only). Closing
    /// an Open ledger first rejects every pending proposal.
    pub fn pause_or_open(env: Env) -> Result<(), Error> {
        Self::require_owner(&env)?;

        match Self::ledger_state(&env) {
            LedgerState::Paused => {
                env.storage().instance().set(&DataKey::State, &LedgerState::Open);
            }
            LedgerState::Open => {
                Self::drain_pending(&env)?;
                env.storage().instance().set(&DataKey::State, &LedgerState::Paused);
            }
        }

        Ok(())
    }

    /// Sweep the book's entire token balance to the owner (Owner only).
    pub fn withdraw(env: Env) -> Result<(), Error> {
        let owner = Self::require_owner(&env)?;

        let token: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        let client = token::Client::new(&env, &token);

        let balance = client.balance(&env.current_contract_address());
        if balance > 0 {
            client.transfer(&env.current_contract_address(), &owner, &balance);
        }

        Ok(())
    }

    // ============================================
    // CONFIGURATION (Owner only, Paused only)
    // ============================================

    /// Update the interest rate, scaled x1000 (e.g. 5000 = 5%).
    ///
    /// # Errors
    /// - `InvalidLedgerState`: Ledger is not Paused
    /// - `InvalidAmount`: Rate above u16 range
    pub fn update_interest(env: Env, rate_x1000: u32) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Self::require_paused(&env)?;

        if rate_x1000 > MAX_RATE_X1000 {
            return Err(Error::InvalidAmount);
        }

        env.storage()
            .instance()
            .set(&DataKey::InterestRateX1000, &rate_x1000);
        Ok(())
    }

    /// Update the maximum principal a single proposal may request.
    ///
    /// # Errors
    /// - `InvalidLedgerState`: Ledger is not Paused
    /// - `InvalidAmount`: Amount is negative
    pub fn update_max_principal(env: Env, amount: i128) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Self::require_paused(&env)?;

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        env.storage().instance().set(&DataKey::MaxPrincipal, &amount);
        Ok(())
    }

    /// Update the payback period, in seconds.
    ///
    /// # Errors
    /// - `InvalidLedgerState`: Ledger is not Paused
    pub fn update_payback_period(env: Env, period: u64) -> Result<(), Error> {
        Self::require_owner(&env)?;
        Self::require_paused(&env)?;

        env.storage().instance().set(&DataKey::PaybackPeriod, &period);
        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Borrower queued at `index` in the pending index.
    pub fn get_pending_at(env: Env, index: u32) -> Result<Address, Error> {
        pending::get(&env, index)
    }

    /// Number of proposals awaiting a decision.
    pub fn pending_count(env: Env) -> u32 {
        pending::len(&env)
    }

    /// Amount that would be owed on a loan of `amount` at the configured
    /// rate, optionally with the early-payback discount.
    pub fn calculate_amount_due(env: Env, amount: i128, early_discount: bool) -> Result<i128, Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        let rate: u32 = env
            .storage()
            .instance()
            .get(&DataKey::InterestRateX1000)
            .unwrap_or(0);
        accounting::amount_due(amount, rate, early_discount).ok_or(Error::InvalidAmount)
    }

    /// Borrower's loan record; a zeroed record if they have none.
    pub fn get_loan(env: Env, borrower: Address) -> LoanRecord {
        storage::loan_or_default(&env, &borrower)
    }

    pub fn get_ledger_state(env: Env) -> LedgerState {
        Self::ledger_state(&env)
    }

    pub fn get_max_principal(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::MaxPrincipal)
            .unwrap_or(0)
    }

    pub fn get_interest_rate(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::InterestRateX1000)
            .unwrap_or(0)
    }

    pub fn get_payback_period(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::PaybackPeriod)
            .unwrap_or(0)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_owner(env: &Env) -> Result<Address, Error> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;
        owner.require_auth();
        Ok(owner)
    }

    fn ledger_state(env: &Env) -> LedgerState {
        env.storage()
            .instance()
            .get(&DataKey::State)
            .unwrap_or(LedgerState::Paused)
    }

    fn require_open(env: &Env) -> Result<(), Error> {
        if Self::ledger_state(env) != LedgerState::Open {
            return Err(Error::InvalidLedgerState);
        }
        Ok(())
    }

    fn require_paused(env: &Env) -> Result<(), Error> {
        if Self::ledger_state(env) != LedgerState::Paused {
            return Err(Error::InvalidLedgerState);
        }
        Ok(())
    }

    fn reject_record(env: &Env, borrower: &Address) -> Result<(), Error> {
        let mut record = storage::loan_or_default(env, borrower);
        if record.state != LoanState::Proposed {
            return Err(Error::NoPendingProposal);
        }

        pending::remove_at(env, record.pending_key)?;

        let amount = record.amount_proposed;
        record.amount_proposed = 0;
        record.pending_key = 0;
        record.state = LoanState::NoLoan;
        storage::save_loan(env, &record);

        env.events().publish(
            (Symbol::new(env, "loan_rejected"), borrower.clone()),
            LoanRejectedEvent {
                borrower: borrower.clone(),
                amount,
            },
        );

        Ok(())
    }

    // Always rejects whatever currently sits at position 0: swap-remove
    // reorders the queue on every pass, so a snapshot would go stale.
    // Each pass shrinks the queue by one, which bounds the loop.
    fn drain_pending(env: &Env) -> Result<(), Error> {
        while pending::len(env) > 0 {
            let borrower = pending::get(env, 0)?;
            Self::reject_record(env, &borrower)?;
        }
        Ok(())
    }
}
