use soroban_sdk::{Address, Env, Vec};

use crate::error::Error;
use crate::storage::{self, DataKey};

fn load(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Pending)
        .unwrap_or(Vec::new(env))
}

fn store(env: &Env, queue: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Pending, queue);
}

/// Append a borrower to the pending index, returning its position as
/// the key the borrower's record must carry.
pub fn insert(env: &Env, borrower: &Address) -> u32 {
    let mut queue = load(env);
    queue.push_back(borrower.clone());
    store(env, &queue);
    queue.len() - 1
}

/// Remove the entry at `key` by swapping the last entry into its slot.
///
/// The moved borrower's stored `pending_key` is rewritten so that every
/// queue position keeps matching the key held by its record. Order is
/// not preserved; only membership is meaningful.
pub fn remove_at(env: &Env, key: u32) -> Result<(), Error> {
    let mut queue = load(env);
    let len = queue.len();
    if key >= len {
        return Err(Error::IndexOutOfRange);
    }

    let last = len - 1;
    if key != last {
        let moved = queue.get(last).ok_or(Error::IndexOutOfRange)?;
        queue.set(key, moved.clone());
        let mut record = storage::loan_or_default(env, &moved);
        record.pending_key = key;
        storage::save_loan(env, &record);
    }

    queue.pop_back();
    store(env, &queue);
    Ok(())
}

/// Positional read of the pending index.
pub fn get(env: &Env, index: u32) -> Result<Address, Error> {
    load(env).get(index).ok_or(Error::IndexOutOfRange)
}

pub fn len(env: &Env) -> u32 {
    load(env).len()
}
