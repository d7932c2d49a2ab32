use idveil_api::codec::TokenCodec;
use idveil_api::error::TranscodeError;
use idveil_api::schema::Op;
use idveil_api::value::{Kind, Value};

/// Convert one leaf value through the codec.
///
/// Forward requires a u64 id and a text destination; reverse requires a
/// text token and a u64 destination. Only the first id of a multi-id
/// token is consumed.
pub(crate) fn scalar(
    codec: &dyn TokenCodec,
    src: &Value,
    dst: &Value,
    op: Op,
) -> Result<Value, TranscodeError> {
    match op {
        Op::Encode => {
            let Value::Uint(id) = src else {
                return Err(TranscodeError::type_error(format!(
                    "cannot encode {}: an id field must be u64",
                    src.kind()
                )));
            };
            let token = codec.encode(&[*id])?;
            assign(Value::Text(token), dst)
        }
        Op::Decode => {
            let Value::Text(token) = src else {
                return Err(TranscodeError::type_error(format!(
                    "cannot decode {}: a token field must be text",
                    src.kind()
                )));
            };
            let ids = codec.decode(token);
            let Some(id) = ids.first() else {
                return Err(TranscodeError::invalid_token(token));
            };
            assign(Value::Uint(*id), dst)
        }
    }
}

/// Compatibility-checked assignment: `value` may replace `dst` only when
/// their kinds are equal. Returns the value for the caller to store.
pub(crate) fn assign(value: Value, dst: &Value) -> Result<Value, TranscodeError> {
    let have = value.kind();
    let want = dst.kind();
    if have == want {
        return Ok(value);
    }

    let hint = match (&have, &want) {
        (Kind::Uint, Kind::Text) => " (is this field missing an `encode` tag?)",
        (Kind::Text, Kind::Uint) => " (is this field missing a `decode` tag?)",
        _ => "",
    };

    Err(TranscodeError::type_error(format!(
        "{have} is not assignable to {want}{hint}"
    )))
}

#[cfg(test)]
mod tests {
    use idveil_api::error::ErrorKind;

    use super::*;

    struct StubCodec;

    impl TokenCodec for StubCodec {
        fn encode(&self, ids: &[u64]) -> Result<String, TranscodeError> {
            Ok(format!("tok-{:x}", ids[0]))
        }

        fn decode(&self, token: &str) -> Vec<u64> {
            token
                .strip_prefix("tok-")
                .and_then(|body| u64::from_str_radix(body, 16).ok())
                .map(|id| vec![id])
                .unwrap_or_default()
        }
    }

    #[test]
    fn assign_rejects_mismatched_kinds_with_hint() {
        let err = assign(Value::Uint(1), &Value::Text(String::new())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert!(err.message.contains("`encode` tag"));

        let err = assign(Value::Text("x".into()), &Value::Uint(0)).unwrap_err();
        assert!(err.message.contains("`decode` tag"));

        let err = assign(Value::Bool(true), &Value::Uint(0)).unwrap_err();
        assert!(!err.message.contains("tag"));
    }

    #[test]
    fn assign_passes_matching_kinds() {
        let out = assign(Value::Text("hello".into()), &Value::Text(String::new())).unwrap();
        assert_eq!(out, Value::Text("hello".into()));
    }

    #[test]
    fn encode_requires_uint_source() {
        let err = scalar(
            &StubCodec,
            &Value::Text("1".into()),
            &Value::Text(String::new()),
            Op::Encode,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn decode_requires_text_source() {
        let err = scalar(&StubCodec, &Value::Uint(1), &Value::Uint(0), Op::Decode).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn decode_of_unknown_token_fails() {
        let err = scalar(
            &StubCodec,
            &Value::Text("garbage".into()),
            &Value::Uint(0),
            Op::Decode,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn scalar_round_trip() {
        let token = scalar(
            &StubCodec,
            &Value::Uint(42),
            &Value::Text(String::new()),
            Op::Encode,
        )
        .unwrap();
        let back = scalar(&StubCodec, &token, &Value::Uint(0), Op::Decode).unwrap();
        assert_eq!(back, Value::Uint(42));
    }
}
