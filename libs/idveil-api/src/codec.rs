use crate::error::TranscodeError;

/// External token codec — the transcoder's only collaborator.
///
/// The engine always encodes exactly one id per call; the slice signature
/// matches codecs that pack multiple ids into one token. `decode` has no
/// error channel: a malformed or foreign token yields an empty vec, which
/// the engine reports as an invalid-token failure.
pub trait TokenCodec: Send + Sync {
    fn encode(&self, ids: &[u64]) -> Result<String, TranscodeError>;
    fn decode(&self, token: &str) -> Vec<u64>;
}
