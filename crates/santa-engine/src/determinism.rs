use santa_core::derive_substream_seed;

/// Derives the seed used for a given exchange round.
///
/// Round zero uses the master seed as-is, so a single draw is reproducible
/// from the seed a user typed in. Later rounds branch into substreams.
pub fn round_seed(master_seed: u64, round: usize) -> u64 {
    if round == 0 {
        master_seed
    } else {
        derive_substream_seed(master_seed, round as u64)
    }
}

/// Derives the master seed for one whole-plan attempt.
///
/// Attempt zero keeps the configured master seed. Restarts take substreams
/// numbered past the last round so they never reuse a round's seed.
pub fn plan_seed(master_seed: u64, rounds: usize, restart: usize) -> u64 {
    if restart == 0 {
        master_seed
    } else {
        derive_substream_seed(master_seed, (rounds + restart) as u64)
    }
}
