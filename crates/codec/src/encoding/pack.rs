use crate::compiler::{Catalogue, FieldDescriptor, FieldKind, MessageDescriptor, Repetition};
use crate::encoding::size::{as_varint, is_omitted, message_size, packed_run_size, NONE};
use crate::utils::varint::VarUInt64;
use crate::value::Value;
use crate::wire::Tag;

/// Append raw bytes behind their varint length.
macro_rules! pack_len_prefixed {
    ($out:ident, $bytes:expr) => {{
        let bytes: &[u8] = $bytes;
        VarUInt64(bytes.len() as u64).write($out);
        $out.extend_from_slice(bytes);
    }};
}

/// Appends every present field of `slots`, in ascending field number order.
pub fn pack_message(
    catalogue: &Catalogue,
    desc: &MessageDescriptor,
    slots: &[Value],
    out: &mut Vec<u8>,
) {
    let program = catalogue.program(desc);
    for &slot in &program.order {
        let value = slots.get(slot).unwrap_or(&NONE);
        pack_field(catalogue, &desc.fields[slot], value, out);
    }
}

#[inline]
fn pack_field(catalogue: &Catalogue, field: &FieldDescriptor, value: &Value, out: &mut Vec<u8>) {
    if is_omitted(field, value) {
        return;
    }
    let tag = Tag::new(field.number, field.wire_kind());
    match (field.repetition, value) {
        (Repetition::Packed, Value::Array(vals)) => {
            tag.write(out);
            VarUInt64(packed_run_size(vals) as u64).write(out);
            for n in vals.iter().filter_map(as_varint) {
                VarUInt64(n).write(out);
            }
        }
        (Repetition::Repeated, Value::Array(vals)) => {
            for v in vals {
                tag.write(out);
                pack_payload(catalogue, field.kind, v, out);
            }
        }
        (_, v) => {
            tag.write(out);
            pack_payload(catalogue, field.kind, v, out);
        }
    }
}

fn pack_payload(catalogue: &Catalogue, kind: FieldKind, value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Bool(b) => out.push(*b as u8),
        Value::UInt(n) => VarUInt64(*n).write(out),
        // int32 values were widened to i64, the cast sign-extends them
        Value::Int(n) => VarUInt64(*n as u64).write(out),
        Value::BigInt(n) => pack_len_prefixed!(out, &n.to_payload()),
        Value::Bytes(b) => pack_len_prefixed!(out, b),
        Value::String(s) => pack_len_prefixed!(out, s.as_bytes()),
        Value::Message(slots) => {
            debug_assert!(matches!(kind, FieldKind::Message(_)), "record value for {kind:?}");
            if let FieldKind::Message(desc) = kind {
                VarUInt64(message_size(catalogue, desc, slots) as u64).write(out);
                pack_message(catalogue, desc, slots, out);
            }
        }
        Value::None | Value::Array(_) => {}
    }
}
