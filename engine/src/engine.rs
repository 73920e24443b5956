//! The consensus engine entry points used by the chain layer.

use std::sync::Arc;
use std::time::Instant;

use hotstuff_crypto::BlsSignature;
use hotstuff_store::HeaderReader;
use hotstuff_types::{
    empty_uncle_hash, Address, BlockNonce, Clock, Hash, Header, SystemClock, DEFAULT_DIFFICULTY,
    HOTSTUFF_DIGEST,
};
use hotstuff_validator::ValidatorSet;
use tracing::{debug, info, warn};

use crate::metrics::EngineMetrics;
use crate::{leader, Config, EngineError, Signer};

pub struct HotStuffEngine {
    signer: Signer,
    config: Config,
    validators: Arc<ValidatorSet>,
    chain: Arc<dyn HeaderReader>,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<EngineMetrics>>,
}

impl HotStuffEngine {
    pub fn new(
        signer: Signer,
        config: Config,
        validators: Arc<ValidatorSet>,
        chain: Arc<dyn HeaderReader>,
    ) -> Self {
        if validators.policy() != config.leader_policy {
            warn!(
                configured = %config.leader_policy,
                active = %validators.policy(),
                "validator set runs a different proposer policy than configured"
            );
        }
        Self {
            signer,
            config,
            validators,
            chain,
            clock: Arc::new(SystemClock),
            metrics: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<EngineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn validators(&self) -> &Arc<ValidatorSet> {
        &self.validators
    }

    /// Address that produced the header's leader seal.
    pub fn author(&self, header: &Header) -> Result<Address, EngineError> {
        leader::recover(header)
    }

    /// Digest the leader signs for `header`.
    pub fn seal_hash(&self, header: &Header) -> Result<Hash, EngineError> {
        leader::sig_hash(header)
    }

    /// Check `header` against the consensus rules, looking its parent up in
    /// the chain. `seal` additionally requires a valid quorum seal.
    pub fn verify_header(&self, header: &Header, seal: bool) -> Result<(), EngineError> {
        self.check_header(header, &[], seal)
    }

    /// Verify `header` with `parents` (ascending, ending at the header's
    /// parent) standing in for chain lookups, recording metrics.
    pub(crate) fn check_header(
        &self,
        header: &Header,
        parents: &[Header],
        seal: bool,
    ) -> Result<(), EngineError> {
        let started = Instant::now();
        let result = self.verify_cascading(header, parents, seal);

        if let Some(metrics) = &self.metrics {
            metrics
                .verify_time_ms
                .observe(started.elapsed().as_secs_f64() * 1000.0);
            match &result {
                Ok(()) => metrics.headers_verified.inc(),
                Err(_) => metrics.headers_rejected.inc(),
            }
        }
        match &result {
            Ok(()) => debug!(number = header.number, seal, "header verified"),
            Err(e) => warn!(number = header.number, seal, error = %e, "header rejected"),
        }
        result
    }

    fn verify_cascading(
        &self,
        header: &Header,
        parents: &[Header],
        seal: bool,
    ) -> Result<(), EngineError> {
        if header.mix_digest != HOTSTUFF_DIGEST {
            return Err(EngineError::InvalidMixDigest);
        }
        if header.uncle_hash != empty_uncle_hash() {
            return Err(EngineError::InvalidUncleHash);
        }
        if header.difficulty != DEFAULT_DIFFICULTY {
            return Err(EngineError::InvalidDifficulty(header.difficulty));
        }
        if header.number == 0 {
            return Ok(());
        }

        let parent = match parents.last() {
            Some(parent) => Some(parent.clone()),
            None => self.chain.get_header(&header.parent_hash, header.number - 1),
        };
        let parent = match parent {
            Some(p) if p.number == header.number - 1 && p.hash() == header.parent_hash => p,
            _ => return Err(EngineError::UnknownAncestor(header.number)),
        };

        if !self.config.test
            && header.time > parent.time.saturating_add(self.config.block_period)
            && header.time > self.clock.now()
        {
            return Err(EngineError::InvalidTimestamp {
                time: header.time,
                parent_time: parent.time,
            });
        }

        self.signer.verify_header(header, &self.validators, seal)
    }

    /// Blocks carry no uncles.
    pub fn verify_uncles(&self, uncles: &[Header]) -> Result<(), EngineError> {
        if uncles.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InvalidUncleHash)
        }
    }

    /// Fill the consensus fields of a header this node is about to propose.
    pub fn prepare(&self, header: &mut Header) -> Result<(), EngineError> {
        header.coinbase = self.signer.address();
        header.nonce = BlockNonce::EMPTY;
        header.mix_digest = HOTSTUFF_DIGEST;

        let parent = header
            .number
            .checked_sub(1)
            .and_then(|number| self.chain.get_header(&header.parent_hash, number))
            .ok_or(EngineError::UnknownAncestor(header.number))?;

        header.difficulty = self.calc_difficulty();
        header.time = parent
            .time
            .saturating_add(self.config.block_period)
            .max(self.clock.now());
        header.fill_with_validators(self.validators.address_list());
        Ok(())
    }

    /// Write this node's leader seal into `header`.
    pub fn seal(&self, header: &mut Header) -> Result<(), EngineError> {
        self.signer.leader.seal_before_commit(header)?;
        if let Some(metrics) = &self.metrics {
            metrics.leader_seals.inc();
        }
        info!(number = header.number, proposer = %self.signer.address(), "block sealed");
        Ok(())
    }

    /// Attach the quorum certificate built from `seals`.
    pub fn commit(
        &self,
        header: &mut Header,
        seals: &[(Address, BlsSignature)],
    ) -> Result<(), EngineError> {
        self.signer.commit_seals(header, &self.validators, seals)?;
        if let Some(metrics) = &self.metrics {
            metrics.quorum_certificates.inc();
        }
        Ok(())
    }

    pub fn calc_difficulty(&self) -> u64 {
        DEFAULT_DIFFICULTY
    }

    pub fn finalize(&self, header: &mut Header) {
        header.uncle_hash = empty_uncle_hash();
    }
}
