//! Passcode generation.
//!
//! Codes come from the operating system CSPRNG when it is available. A
//! generator probes the CSPRNG once at construction; if the probe fails it
//! runs on a PRNG seeded once from the wall clock, and an individual failed
//! draw also falls back for that call. Generated codes are never logged.

use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use tracing::warn;

use crate::domain::entities::otp::{CODE_MAX, CODE_MIN};

/// Source of 4-digit verification codes.
///
/// Every code is uniformly distributed over `[CODE_MIN, CODE_MAX]`.
pub struct CodeGenerator {
    secure: bool,
    fallback: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator, probing the system CSPRNG once.
    pub fn new() -> Self {
        let mut probe = [0u8; 4];
        let secure = OsRng.try_fill_bytes(&mut probe).is_ok();
        if !secure {
            warn!("system CSPRNG unavailable, codes will use a time-seeded PRNG");
        }

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        Self {
            secure,
            fallback: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Creates a generator that only uses a PRNG with the given seed.
    ///
    /// Deterministic; intended for tests that need a known code sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            secure: false,
            fallback: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generates a 4-digit code in `[1000, 9999]`.
    pub fn generate(&self) -> String {
        let value = if self.secure {
            match Self::secure_draw() {
                Ok(value) => value,
                Err(err) => {
                    warn!(error = %err, "CSPRNG draw failed, using seeded fallback for this code");
                    self.fallback_draw()
                }
            }
        } else {
            self.fallback_draw()
        };
        format!("{:04}", value)
    }

    fn secure_draw() -> Result<u32, rand::Error> {
        const RANGE: u32 = CODE_MAX - CODE_MIN + 1;
        // Largest multiple of RANGE representable in u32; draws above it are
        // re-rolled so every code stays equally likely.
        const ZONE: u32 = u32::MAX - (u32::MAX % RANGE);

        loop {
            let mut buf = [0u8; 4];
            OsRng.try_fill_bytes(&mut buf)?;
            let draw = u32::from_le_bytes(buf);
            if draw < ZONE {
                return Ok(CODE_MIN + draw % RANGE);
            }
        }
    }

    fn fallback_draw(&self) -> u32 {
        let mut rng = self
            .fallback
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(CODE_MIN..=CODE_MAX)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
