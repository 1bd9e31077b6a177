//! Ordered-candidate capability resolution.
//!
//! A capability is resolved by trying each registered candidate in order and
//! keeping the first one that loads. When every candidate fails, the caller's
//! fallback constructor supplies a synthetic implementation and a single
//! warning records the aggregated reason. Resolution never fails outward:
//! an unavailable optional capability must not abort the host's setup.

/// Why a single candidate could not satisfy a capability.
#[derive(Debug)]
pub enum CandidateError {
    Unavailable { source: String, reason: String },

    MissingExport { source: String, export: String },
}

impl std::fmt::Display for CandidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { source, reason } => {
                write!(f, "failed to load \"{source}\": {reason}")
            }
            Self::MissingExport { source, export } => {
                write!(f, "\"{source}\" does not provide \"{export}\"")
            }
        }
    }
}

impl std::error::Error for CandidateError {}

/// A named, lazily-constructed capability source.
pub struct Candidate<T> {
    source: String,
    load: Box<dyn FnOnce() -> Result<T, CandidateError> + Send>,
}

impl<T> Candidate<T> {
    pub fn new(
        source: impl Into<String>,
        load: impl FnOnce() -> Result<T, CandidateError> + Send + 'static,
    ) -> Self {
        Self {
            source: source.into(),
            load: Box::new(load),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Which source ended up satisfying a capability. Diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilitySource {
    Candidate(String),
    Fallback,
}

/// A resolved capability, held for the process lifetime.
pub struct Resolved<T> {
    pub value: T,
    pub source: CapabilitySource,
}

/// Resolve `identifier` from `candidates`, degrading to `fallback`.
///
/// The first candidate that loads wins and no further candidates are tried.
/// Exhaustion logs one warning with the last failure reason and substitutes
/// the fallback. Never panics, never returns an error.
pub fn resolve<T>(
    identifier: &str,
    candidates: Vec<Candidate<T>>,
    fallback: impl FnOnce() -> T,
) -> Resolved<T> {
    let mut last_failure: Option<CandidateError> = None;

    for candidate in candidates {
        let source = candidate.source;
        match (candidate.load)() {
            Ok(value) => {
                log::debug!("capability \"{}\" resolved from \"{}\"", identifier, source);
                return Resolved {
                    value,
                    source: CapabilitySource::Candidate(source),
                };
            }
            Err(err) => last_failure = Some(err),
        }
    }

    let reason = match last_failure {
        Some(err) => err.to_string(),
        None => "no candidates were registered".to_string(),
    };
    log::warn!(
        "Optional capability \"{}\" unavailable ({}). Using fallback implementation.",
        identifier,
        reason
    );

    Resolved {
        value: fallback(),
        source: CapabilitySource::Fallback,
    }
}
