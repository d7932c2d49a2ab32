use std::sync::Arc;

use idveil_api::codec::TokenCodec;
use idveil_api::error::TranscodeError;
use idveil_api::record::Record;
use idveil_api::schema::{Op, TagSchema};
use idveil_api::value::{Kind, Seq, Value};

use crate::convert;

/// Record-to-record id transcoder.
///
/// Walks a source record field by field, converts tagged id fields through
/// the codec, recurses into nested records and sequences, and copies
/// everything else after a compatibility check. The destination is a
/// zero-valued record of the structurally parallel shape, mutated in
/// place. On any error the destination holds partial state and must be
/// discarded by the caller.
pub struct Transcoder {
    codec: Arc<dyn TokenCodec>,
}

impl Transcoder {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }

    /// Forward conversion: fields tagged `encode` become tokens.
    pub fn encode(
        &self,
        src: &Record,
        dst: &mut Record,
        tags: &TagSchema,
    ) -> Result<(), TranscodeError> {
        tracing::debug!(fields = src.len(), "encoding record");
        self.walk(src, dst, tags, Op::Encode)
    }

    /// Reverse conversion: fields tagged `decode` become ids again.
    pub fn decode(
        &self,
        src: &Record,
        dst: &mut Record,
        tags: &TagSchema,
    ) -> Result<(), TranscodeError> {
        tracing::debug!(fields = src.len(), "decoding record");
        self.walk(src, dst, tags, Op::Decode)
    }

    /// Visit every source field in declaration order. First error wins:
    /// the walk aborts immediately and later fields are not touched.
    fn walk(
        &self,
        src: &Record,
        dst: &mut Record,
        tags: &TagSchema,
        op: Op,
    ) -> Result<(), TranscodeError> {
        for field in src.iter() {
            let name = field.name.as_str();
            let Some(dst_val) = dst.get(name) else {
                return Err(
                    TranscodeError::shape("field is missing on the destination record")
                        .with_field(name),
                );
            };

            let produced = if tags.op(name) == Some(op) {
                self.dispatch(&field.value, dst_val, tags.nested(name), op)
                    .map_err(|e| e.with_field(name))?
            } else if let Value::Record(src_rec) = &field.value {
                // Untagged nested record: recurse with the same operation.
                // Conversion inside is driven by the nested fields' own tags.
                let nested = tags.nested(name).unwrap_or(TagSchema::empty());
                self.walk_nested(src_rec, dst_val, nested, op)
                    .map_err(|e| e.with_field(name))?
            } else {
                convert::assign(field.value.clone(), dst_val).map_err(|e| e.with_field(name))?
            };

            dst.set(name, produced);
        }
        Ok(())
    }

    /// Walk a nested source record into a fresh zero-valued instance of
    /// the destination's record shape.
    fn walk_nested(
        &self,
        src: &Record,
        dst_val: &Value,
        tags: &TagSchema,
        op: Op,
    ) -> Result<Value, TranscodeError> {
        let Value::Record(dst_rec) = dst_val else {
            return Err(TranscodeError::shape(format!(
                "source is a record but destination is {}",
                dst_val.kind()
            )));
        };
        let mut fresh = dst_rec.zeroed();
        self.walk(src, &mut fresh, tags, op)?;
        Ok(Value::Record(fresh))
    }

    /// Route a tagged field by its runtime shape: sequence, record, or
    /// scalar leaf.
    fn dispatch(
        &self,
        src_val: &Value,
        dst_val: &Value,
        nested: Option<&TagSchema>,
        op: Op,
    ) -> Result<Value, TranscodeError> {
        match src_val {
            Value::Seq(seq) => self.convert_seq(seq, dst_val, nested, op),
            Value::Record(rec) => {
                self.walk_nested(rec, dst_val, nested.unwrap_or(TagSchema::empty()), op)
            }
            _ => convert::scalar(self.codec.as_ref(), src_val, dst_val, op),
        }
    }

    /// Convert a sequence pairwise, preserving order. The destination
    /// sequence length always equals the source length; on the first
    /// element failure the whole sequence is abandoned.
    fn convert_seq(
        &self,
        src: &Seq,
        dst_val: &Value,
        nested: Option<&TagSchema>,
        op: Op,
    ) -> Result<Value, TranscodeError> {
        let Value::Seq(dst_seq) = dst_val else {
            return Err(TranscodeError::type_error(format!(
                "source is a sequence but destination is {}",
                dst_val.kind()
            )));
        };

        let elem_proto = dst_seq.elem.zero();
        let mut out = Seq::new(dst_seq.elem.clone());

        match &src.elem {
            Kind::Uint | Kind::Text => {
                for (i, item) in src.items.iter().enumerate() {
                    let converted = convert::scalar(self.codec.as_ref(), item, &elem_proto, op)
                        .map_err(|e| e.with_index(i))?;
                    out.items.push(converted);
                }
            }
            Kind::Record(_) => {
                let nested = nested.unwrap_or(TagSchema::empty());
                for (i, item) in src.items.iter().enumerate() {
                    let Value::Record(src_rec) = item else {
                        return Err(TranscodeError::type_error(format!(
                            "sequence declares record elements but item is {}",
                            item.kind()
                        ))
                        .with_index(i));
                    };
                    let converted = self
                        .walk_nested(src_rec, &elem_proto, nested, op)
                        .map_err(|e| e.with_index(i))?;
                    out.items.push(converted);
                }
            }
            other => {
                return Err(TranscodeError::shape(format!(
                    "unsupported element kind {other}"
                )));
            }
        }

        Ok(Value::Seq(out))
    }
}
