use std::borrow::Cow;

use crate::compiler::{Catalogue, FieldDescriptor, FieldKind, MessageDescriptor, Repetition};
use crate::encoding::skip::skip_field;
use crate::utils::numbers::Int;
use crate::utils::varint::{read_len_delimited, VarUInt64};
use crate::utils::DecodeError;
use crate::value::Value;
use crate::wire::{Tag, WireKind};
use crate::debug_log;

/// Merges the fields found in `buf` into `slots`: scalars are overwritten,
/// repeated fields appended and embedded records merged recursively. Unknown
/// field numbers are skipped.
pub fn unpack_message<'a>(
    catalogue: &Catalogue,
    desc: &'static MessageDescriptor,
    buf: &'a [u8],
    slots: &mut Vec<Value<'a>>,
) -> Result<(), DecodeError> {
    for field in &desc.fields[slots.len().min(desc.fields.len())..] {
        slots.push(field.default_value());
    }

    let program = catalogue.program(desc);
    let mut pos = 0;
    while pos < buf.len() {
        let (tag, next) = Tag::read(buf, pos)?;
        pos = next;

        if tag.wire == WireKind::EndGroup {
            return Err(DecodeError::UnexpectedEndOfGroup);
        }

        let Some(slot) = program.slot_of(tag.field) else {
            debug_log!("{}: skipping unknown field {} at {}", desc.name, tag, pos);
            pos = skip_field(buf, pos, tag.wire)?;
            continue;
        };

        let field = &desc.fields[slot];
        if !field.accepts(tag.wire) {
            return Err(DecodeError::WireTypeMismatch {
                record: desc.name,
                field: field.name,
                expected: field.wire_kind(),
                found: tag.wire,
            });
        }
        pos = unpack_field(catalogue, desc, field, tag.wire, buf, pos, &mut slots[slot])?;
    }
    Ok(())
}

fn unpack_field<'a>(
    catalogue: &Catalogue,
    record: &'static MessageDescriptor,
    field: &'static FieldDescriptor,
    wire: WireKind,
    buf: &'a [u8],
    pos: usize,
    dst: &mut Value<'a>,
) -> Result<usize, DecodeError> {
    match field.repetition {
        Repetition::Packed if wire == WireKind::LengthDelimited => {
            let (start, end) = read_len_delimited(buf, pos)?;
            let run = &buf[start..end];
            let mut at = 0;
            while at < run.len() {
                let (raw, next) = VarUInt64::read(run, at)?;
                push(dst, from_varint(field.kind, raw));
                at = next;
            }
            Ok(end)
        }
        Repetition::Packed | Repetition::Repeated => {
            let (value, next) = unpack_value(catalogue, record, field, buf, pos)?;
            push(dst, value);
            Ok(next)
        }
        Repetition::Singular | Repetition::Optional => match field.kind {
            FieldKind::Message(nested) => {
                let (start, end) = read_len_delimited(buf, pos)?;
                if !matches!(dst, Value::Message(_)) {
                    *dst = nested.default_value();
                }
                if let Value::Message(slots) = dst {
                    unpack_message(catalogue, nested, &buf[start..end], slots)?;
                }
                Ok(end)
            }
            _ => {
                let (value, next) = unpack_value(catalogue, record, field, buf, pos)?;
                *dst = value;
                Ok(next)
            }
        },
    }
}

#[inline]
fn push<'a>(dst: &mut Value<'a>, value: Value<'a>) {
    match dst {
        Value::Array(vals) => vals.push(value),
        _ => *dst = Value::Array(vec![value]),
    }
}

#[inline(always)]
fn from_varint(kind: FieldKind, raw: u64) -> Value<'static> {
    match kind {
        FieldKind::Bool => Value::Bool(raw != 0),
        FieldKind::Int64 => Value::Int(raw as i64),
        FieldKind::Int32 => Value::Int(raw as i32 as i64),
        _ => Value::UInt(raw),
    }
}

/// Reads one occurrence of `field` starting at `pos`, the wire kind having
/// already been checked against the descriptor.
fn unpack_value<'a>(
    catalogue: &Catalogue,
    record: &'static MessageDescriptor,
    field: &'static FieldDescriptor,
    buf: &'a [u8],
    pos: usize,
) -> Result<(Value<'a>, usize), DecodeError> {
    if field.kind.is_varint() {
        let (raw, next) = VarUInt64::read(buf, pos)?;
        return Ok((from_varint(field.kind, raw), next));
    }

    let (start, end) = read_len_delimited(buf, pos)?;
    let raw = &buf[start..end];
    let value = match field.kind {
        FieldKind::String => {
            let s = std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8 {
                record: record.name,
                field: field.name,
            })?;
            Value::String(Cow::Borrowed(s))
        }
        FieldKind::Bytes => Value::Bytes(Cow::Borrowed(raw)),
        FieldKind::Int => Value::BigInt(Int::from_payload(raw)?),
        FieldKind::Message(nested) => {
            let mut value: Value<'a> = nested.default_value();
            if let Value::Message(slots) = &mut value {
                unpack_message(catalogue, nested, raw, slots)?;
            }
            value
        }
        FieldKind::Bool | FieldKind::UInt64 | FieldKind::Int64 | FieldKind::Int32 => {
            unreachable!("varint kinds handled above")
        }
    };
    Ok((value, end))
}
