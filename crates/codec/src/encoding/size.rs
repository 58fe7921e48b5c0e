use crate::compiler::{Catalogue, FieldDescriptor, FieldKind, MessageDescriptor, Repetition};
use crate::utils::varint::VarUInt64;
use crate::value::Value;
use crate::wire::Tag;

pub(crate) static NONE: Value<'static> = Value::None;

#[inline(always)]
pub(crate) fn varint_len(v: u64) -> usize {
    VarUInt64(v).encoded_len()
}

#[inline(always)]
pub(crate) fn len_prefixed(len: usize) -> usize {
    varint_len(len as u64) + len
}

/// Whether a field contributes nothing to the stream.
#[inline]
pub(crate) fn is_omitted(field: &FieldDescriptor, value: &Value) -> bool {
    match field.repetition {
        // embedded records are written even when empty
        Repetition::Singular => {
            !matches!(field.kind, FieldKind::Message(_)) && value.is_default()
        }
        Repetition::Optional => matches!(value, Value::None),
        Repetition::Repeated | Repetition::Packed => value.is_default(),
    }
}

/// Varint carried by a scalar value, if it is one.
#[inline]
pub(crate) fn as_varint(value: &Value) -> Option<u64> {
    match value {
        Value::Bool(b) => Some(*b as u64),
        Value::UInt(n) => Some(*n),
        Value::Int(n) => Some(*n as u64),
        _ => None,
    }
}

/// Bytes of a packed run, without tag and length prefix.
pub(crate) fn packed_run_size(values: &[Value]) -> usize {
    values.iter().filter_map(as_varint).map(varint_len).sum()
}

pub fn message_size(catalogue: &Catalogue, desc: &MessageDescriptor, slots: &[Value]) -> usize {
    let program = catalogue.program(desc);
    program
        .order
        .iter()
        .map(|&slot| {
            let value = slots.get(slot).unwrap_or(&NONE);
            field_size(catalogue, &desc.fields[slot], value)
        })
        .sum()
}

pub fn field_size(catalogue: &Catalogue, field: &FieldDescriptor, value: &Value) -> usize {
    if is_omitted(field, value) {
        return 0;
    }
    let tag_len = Tag::new(field.number, field.wire_kind()).encoded_len();
    match (field.repetition, value) {
        (Repetition::Packed, Value::Array(vals)) => tag_len + len_prefixed(packed_run_size(vals)),
        (Repetition::Repeated, Value::Array(vals)) => vals
            .iter()
            .map(|v| tag_len + payload_size(catalogue, field.kind, v))
            .sum(),
        (_, v) => tag_len + payload_size(catalogue, field.kind, v),
    }
}

pub fn payload_size(catalogue: &Catalogue, kind: FieldKind, value: &Value) -> usize {
    match value {
        Value::Bool(_) => 1,
        Value::UInt(n) => varint_len(*n),
        Value::Int(n) => varint_len(*n as u64),
        Value::BigInt(n) => len_prefixed(n.encoded_len()),
        Value::Bytes(b) => len_prefixed(b.len()),
        Value::String(s) => len_prefixed(s.len()),
        Value::Message(slots) => match kind {
            FieldKind::Message(desc) => len_prefixed(message_size(catalogue, desc, slots)),
            _ => 0,
        },
        Value::None | Value::Array(_) => 0,
    }
}
