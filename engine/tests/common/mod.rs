//! Shared fixtures: a committee of validators over in-memory infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use hotstuff_crypto::{BlsSecretKey, BlsSignature, LeaderKey};
use hotstuff_engine::{BlsSigner, Config, HotStuffEngine, LeaderSigner, Signer};
use hotstuff_nullables::{NullChain, NullClock, NullKeyStore};
use hotstuff_store::ConsensusKeyStore;
use hotstuff_types::{empty_uncle_hash, Address, Header, HOTSTUFF_DIGEST};
use hotstuff_validator::ValidatorSet;

pub const GENESIS_TIME: u64 = 1_000;
pub const NOW: u64 = 10_000;

pub struct Member {
    pub leader_key: [u8; 32],
    pub bls_ikm: [u8; 32],
    pub address: Address,
}

pub struct Committee {
    /// Sorted by address, so `members[i]` is validator index `i`.
    pub members: Vec<Member>,
    pub store: Arc<NullKeyStore>,
    pub chain: Arc<NullChain>,
    pub clock: Arc<NullClock>,
    pub validators: Arc<ValidatorSet>,
    pub genesis: Header,
}

impl Committee {
    /// `n` validators with keys registered in a shared key store and a
    /// genesis header in the chain.
    pub fn new(n: u8) -> Self {
        let store = Arc::new(NullKeyStore::new());
        Self::with_store(n, store, true)
    }

    pub fn with_store(n: u8, store: Arc<NullKeyStore>, register: bool) -> Self {
        let mut members: Vec<Member> = (1..=n)
            .map(|i| {
                let leader_key = [i; 32];
                let address = LeaderKey::from_bytes(&leader_key).unwrap().address();
                Member {
                    leader_key,
                    bls_ikm: [i.wrapping_add(100); 32],
                    address,
                }
            })
            .collect();
        members.sort_by_key(|m| m.address);

        if register {
            for (index, m) in members.iter().enumerate() {
                let pk = BlsSecretKey::from_ikm(&m.bls_ikm).unwrap().public_key();
                store.put_validator_address(index as u32, &m.address).unwrap();
                store.put_bls_public_key(index as u32, &pk.to_bytes()).unwrap();
            }
        }

        let validators = Arc::new(
            Config::basic().validator_set(members.iter().map(|m| m.address)),
        );

        let mut genesis = Header {
            number: 0,
            time: GENESIS_TIME,
            difficulty: 1,
            mix_digest: HOTSTUFF_DIGEST,
            uncle_hash: empty_uncle_hash(),
            ..Default::default()
        };
        genesis.fill_with_validators(validators.address_list());

        let chain = Arc::new(NullChain::new());
        chain.insert(genesis.clone());

        Self {
            members,
            store,
            chain,
            clock: Arc::new(NullClock::new(NOW)),
            validators,
            genesis,
        }
    }

    pub fn signer(&self, i: usize) -> Signer {
        self.signer_with_store(i, self.store.clone())
    }

    pub fn signer_with_store(&self, i: usize, store: Arc<dyn ConsensusKeyStore>) -> Signer {
        let m = &self.members[i];
        Signer::new(
            LeaderSigner::new(LeaderKey::from_bytes(&m.leader_key).unwrap(), Arc::clone(&store)),
            BlsSigner::new(BlsSecretKey::from_ikm(&m.bls_ikm).unwrap(), store),
        )
    }

    pub fn engine(&self, i: usize) -> HotStuffEngine {
        self.engine_with(i, Config::basic())
    }

    pub fn engine_with(&self, i: usize, config: Config) -> HotStuffEngine {
        HotStuffEngine::new(
            self.signer(i),
            config,
            Arc::clone(&self.validators),
            self.chain.clone(),
        )
        .with_clock(self.clock.clone())
    }

    /// A prepared, finalized and leader-sealed child of `parent`, proposed by
    /// validator `proposer`.
    pub fn propose(&self, proposer: usize, parent: &Header) -> Header {
        let engine = self.engine(proposer);
        let mut header = Header {
            parent_hash: parent.hash(),
            number: parent.number + 1,
            ..Default::default()
        };
        self.chain.insert(parent.clone());
        engine.prepare(&mut header).unwrap();
        engine.finalize(&mut header);
        engine.seal(&mut header).unwrap();
        header
    }

    /// Seals of validators `indices` over `header`.
    pub fn seals(&self, header: &Header, indices: &[usize]) -> Vec<(Address, BlsSignature)> {
        indices
            .iter()
            .map(|&i| {
                let signer = self.signer(i);
                (signer.address(), signer.bls.sign_header(header).unwrap())
            })
            .collect()
    }

    /// Write an aggregate of `indices`' seals without the quorum check that
    /// `commit_seals` performs, as a faulty or malicious finalizer might.
    pub fn force_certificate(&self, header: &mut Header, indices: &[usize]) {
        let sigs: Vec<BlsSignature> = self
            .seals(header, indices)
            .into_iter()
            .map(|(_, sig)| sig)
            .collect();
        let aggregated = hotstuff_crypto::aggregate(&sigs).unwrap();
        let mut extra = header.extract_extra().unwrap();
        extra.aggregated_validators_seal = aggregated.to_bytes().to_vec();
        extra.participants_index = indices.iter().map(|&i| i as u32).collect();
        header.set_extra(&extra);
    }
}
