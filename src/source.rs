//! Secret generation.
//!
//! A [`SequenceSource`] asks an external random-integer service first,
//! retrying transient failures with a fixed delay, and falls back to a local
//! generator that cannot fail.

use crate::games::mastermind::Sequence;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default endpoint of the random-integer service.
pub const DEFAULT_PROVIDER_URL: &str = "https://www.random.org/integers/";

/// Shown to the player when a secret came from the fallback generator.
pub const FALLBACK_NOTICE: &str =
    "The random number service is unavailable; using the built-in generator for this code.";

/// Failure talking to the random-integer service.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ProviderError {
    /// Connection, timeout or body-read failure.
    #[display("Transport error: {}", _0)]
    Transport(String),

    /// Non-success HTTP status.
    #[display("Provider returned HTTP {}", _0)]
    Status(u16),

    /// The body did not contain the requested integers.
    #[display("Malformed provider response: {}", _0)]
    Malformed(String),
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Transport(err.to_string()),
        }
    }
}

/// External source of random integers.
pub trait RandomProvider {
    /// Returns `count` integers, each in `min..=max`.
    ///
    /// # Errors
    ///
    /// Any transport, status or parse failure.
    fn fetch(&mut self, count: usize, min: u32, max: u32) -> Result<Vec<u32>, ProviderError>;
}

/// HTTP client for the random.org plain-text integer API.
#[derive(Debug, Clone)]
pub struct RandomOrgProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RandomOrgProvider {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_ref().to_string(),
        })
    }

    /// Request URL for `count` integers in `min..=max`.
    pub fn request_url(&self, count: usize, min: u32, max: u32) -> String {
        format!(
            "{}?num={}&min={}&max={}&col=1&base=10&format=plain&rnd=new",
            self.base_url, count, min, max
        )
    }
}

impl RandomProvider for RandomOrgProvider {
    #[instrument(skip(self))]
    fn fetch(&mut self, count: usize, min: u32, max: u32) -> Result<Vec<u32>, ProviderError> {
        let url = self.request_url(count, min, max);
        debug!(%url, "Requesting random integers");
        let body = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .text()?;
        parse_integers(&body)
    }
}

/// Parses whitespace-separated integers.
///
/// # Errors
///
/// Returns [`ProviderError::Malformed`] on the first token that is not an
/// unsigned integer.
pub fn parse_integers(body: &str) -> Result<Vec<u32>, ProviderError> {
    body.split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| ProviderError::Malformed(format!("'{}' is not an integer", token)))
        })
        .collect()
}

/// Local uniform generator used when the provider is unavailable.
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    rng: StdRng,
}

impl FallbackGenerator {
    /// Seeded from the OS, or from `seed` for reproducible games.
    #[instrument]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Uniform integer in `min..=max`; returns `min` when the range is empty.
    pub fn next_int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// A sequence of `length` digits below `range`.
    ///
    /// A range of 0 or 1 yields all zeros without touching the generator.
    #[instrument(skip(self))]
    pub fn sequence(&mut self, length: usize, range: u8) -> Sequence {
        let upper = u32::from(range.clamp(1, 10)) - 1;
        let digits = (0..length)
            .map(|_| self.next_int(0, upper) as u8)
            .collect();
        Sequence::from_trusted(digits, range.max(1))
    }
}

/// Fixed pause between provider attempts, bounded attempt count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first.
    pub attempts: usize,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(3),
        }
    }
}

/// Where a secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SecretOrigin {
    /// The external provider.
    #[display("provider")]
    Provider,
    /// The local generator after the provider failed.
    #[display("fallback")]
    Fallback,
    /// The local generator by choice (offline mode or an empty code).
    #[display("local")]
    Local,
}

/// A generated secret and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSecret {
    /// The secret.
    pub sequence: Sequence,
    /// Which generator produced it.
    pub origin: SecretOrigin,
}

/// Anything that can produce a valid secret. Must not fail.
pub trait SecretSource {
    /// A valid sequence of `length` digits below `range`.
    fn generate(&mut self, length: usize, range: u8) -> GeneratedSecret;
}

impl<S: SecretSource + ?Sized> SecretSource for Box<S> {
    fn generate(&mut self, length: usize, range: u8) -> GeneratedSecret {
        (**self).generate(length, range)
    }
}

/// Provider-first secret source with retry and local fallback.
pub struct SequenceSource {
    provider: Option<Box<dyn RandomProvider>>,
    fallback: FallbackGenerator,
    retry: RetryPolicy,
}

impl std::fmt::Debug for SequenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceSource")
            .field("provider", &self.provider.is_some())
            .field("retry", &self.retry)
            .finish()
    }
}

impl SequenceSource {
    /// Uses `provider` with the given retry policy before falling back.
    pub fn new(
        provider: Box<dyn RandomProvider>,
        fallback: FallbackGenerator,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider: Some(provider),
            fallback,
            retry,
        }
    }

    /// Never contacts a provider.
    pub fn offline(fallback: FallbackGenerator) -> Self {
        Self {
            provider: None,
            fallback,
            retry: RetryPolicy::default(),
        }
    }

    #[instrument(skip(self))]
    fn from_provider(&mut self, length: usize, range: u8) -> Option<Sequence> {
        let provider = self.provider.as_mut()?;
        let max = u32::from(range.saturating_sub(1));
        let attempts = self.retry.attempts.max(1);

        for attempt in 1..=attempts {
            let result = provider
                .fetch(length, 0, max)
                .and_then(|values| to_sequence(&values, length, range));
            match result {
                Ok(sequence) => {
                    debug!(attempt, "Provider produced secret");
                    return Some(sequence);
                }
                Err(error) => {
                    warn!(attempt, attempts, %error, "Random provider request failed");
                    if attempt < attempts && !self.retry.delay.is_zero() {
                        std::thread::sleep(self.retry.delay);
                    }
                }
            }
        }
        None
    }
}

impl SecretSource for SequenceSource {
    #[instrument(skip(self))]
    fn generate(&mut self, length: usize, range: u8) -> GeneratedSecret {
        if length == 0 {
            return GeneratedSecret {
                sequence: Sequence::from_trusted(Vec::new(), range.max(1)),
                origin: SecretOrigin::Local,
            };
        }
        if let Some(sequence) = self.from_provider(length, range) {
            return GeneratedSecret {
                sequence,
                origin: SecretOrigin::Provider,
            };
        }
        let origin = if self.provider.is_some() {
            info!("Provider retries exhausted; using fallback generator");
            SecretOrigin::Fallback
        } else {
            SecretOrigin::Local
        };
        GeneratedSecret {
            sequence: self.fallback.sequence(length, range),
            origin,
        }
    }
}

fn to_sequence(values: &[u32], length: usize, range: u8) -> Result<Sequence, ProviderError> {
    if values.len() != length {
        return Err(ProviderError::Malformed(format!(
            "expected {} integers, got {}",
            length,
            values.len()
        )));
    }
    let digits = values
        .iter()
        .map(|&v| {
            u8::try_from(v).map_err(|_| ProviderError::Malformed(format!("{} out of range", v)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Sequence::from_digits(digits, range).map_err(|e| ProviderError::Malformed(e.to_string()))
}

/// Hands out preset secrets in order; falls back to zeros when empty.
///
/// Deterministic stand-in for tests and scripted sessions.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    secrets: VecDeque<Sequence>,
}

impl FixedSource {
    /// Queues `secrets` to be returned by successive `generate` calls.
    pub fn new(secrets: impl IntoIterator<Item = Sequence>) -> Self {
        Self {
            secrets: secrets.into_iter().collect(),
        }
    }
}

impl SecretSource for FixedSource {
    fn generate(&mut self, length: usize, range: u8) -> GeneratedSecret {
        let sequence = self
            .secrets
            .pop_front()
            .unwrap_or_else(|| Sequence::from_trusted(vec![0; length], range.max(1)));
        GeneratedSecret {
            sequence,
            origin: SecretOrigin::Provider,
        }
    }
}
