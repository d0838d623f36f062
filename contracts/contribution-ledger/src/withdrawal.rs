use crate::storage as Storage;
use soroban_sdk::Env;

/// How the reset loop reaches the contributor list.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContributorAccess {
    /// Re-read the list length and each entry from storage on every iteration.
    Direct,
    /// Load the list once and iterate the local copy.
    Cached,
}

/// Outcome of a ledger reset.
pub struct Settlement {
    pub amount: i128,
    pub contributors: u32,
}

/// Zeroes every contributor record, empties the list and the ledger balance.
///
/// Must run before the balance leaves the contract. Callers return an error
/// when the outward transfer fails so every write made here is rolled back.
pub fn reset_ledger(e: &Env, access: ContributorAccess) -> Settlement {
    let contributors = match access {
        ContributorAccess::Direct => reset_contributions_direct(e),
        ContributorAccess::Cached => reset_contributions_cached(e),
    };
    Storage::clear_contributors(e);

    let amount = Storage::get_ledger_balance(e);
    Storage::set_ledger_balance(e, 0);

    Settlement {
        amount,
        contributors,
    }
}

fn reset_contributions_direct(e: &Env) -> u32 {
    let mut index: u32 = 0;
    while index < Storage::contributor_count(e) {
        if let Some(contributor) = Storage::contributor_at(e, index) {
            Storage::reset_contribution(e, &contributor);
        }
        index += 1;
    }
    index
}

fn reset_contributions_cached(e: &Env) -> u32 {
    let contributors = Storage::get_contributors(e);
    for contributor in contributors.iter() {
        Storage::reset_contribution(e, &contributor);
    }
    contributors.len()
}
