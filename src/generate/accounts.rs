//! Synthetic account provisioning.
//!
//! A deployment against a development substrate would draw voter identities
//! from its account pool; for in-process runs we mint fresh addresses
//! instead.

use rand::Rng;

use crate::model::Address;

/// Issues unique synthetic substrate addresses.
#[derive(Debug)]
pub struct AccountPool<R> {
    rng: R,
    issued: u64,
}

impl<R: Rng> AccountPool<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, issued: 0 }
    }

    /// Mint the next address. The serial component keeps addresses unique
    /// even if the entropy repeats.
    pub fn next_account(&mut self) -> Address {
        let serial = self.issued;
        self.issued += 1;
        let entropy: u128 = self.rng.gen();
        Address::new(format!("0x{serial:08x}{entropy:032x}"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn addresses_are_unique() {
        let mut pool = AccountPool::new(StdRng::seed_from_u64(7));
        let minted: HashSet<Address> = (0..500).map(|_| pool.next_account()).collect();
        assert_eq!(minted.len(), 500);
    }
}
