use std::fmt::Write;

use crate::compiler::{Catalogue, FieldDescriptor, FieldKind, MessageDescriptor, CATALOGUE};
use crate::debug_log;
use crate::encoding::size::{is_omitted, NONE};
use crate::encoding::{message_size, pack_message, unpack_message};
use crate::utils::DecodeError;
use crate::value::{FromValue, IntoValue, Value};

/// Drives the encoder over a record value against a catalogue.
pub struct Packer<'c> {
    catalogue: &'c Catalogue,
}

impl<'c> Packer<'c> {
    pub fn new(catalogue: &'c Catalogue) -> Self {
        Self { catalogue }
    }

    /// Exact byte count `run` produces for `value`.
    pub fn size(&self, desc: &MessageDescriptor, value: &Value) -> usize {
        match value {
            Value::Message(slots) => message_size(self.catalogue, desc, slots),
            _ => 0,
        }
    }

    pub fn run(&self, desc: &MessageDescriptor, value: &Value) -> Vec<u8> {
        let size = self.size(desc, value);
        let mut buffer = Vec::with_capacity(size);
        self.run_into(desc, value, &mut buffer);
        debug_assert_eq!(buffer.len(), size, "{} size mismatch", desc.name);
        buffer
    }

    pub fn run_into(&self, desc: &MessageDescriptor, value: &Value, out: &mut Vec<u8>) {
        if let Value::Message(slots) = value {
            pack_message(self.catalogue, desc, slots, out);
        }
    }
}

/// Drives the decoder over a buffer against a catalogue. Strings and bytes
/// of the produced value borrow from the buffer.
pub struct Unpacker<'c> {
    catalogue: &'c Catalogue,
}

impl<'c> Unpacker<'c> {
    pub fn new(catalogue: &'c Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn run<'a>(
        &self,
        desc: &'static MessageDescriptor,
        buf: &'a [u8],
    ) -> Result<Value<'a>, DecodeError> {
        let mut value: Value<'a> = desc.default_value();
        self.run_into(desc, buf, &mut value)?;
        Ok(value)
    }

    /// Merges `buf` into an existing record value.
    pub fn run_into<'a>(
        &self,
        desc: &'static MessageDescriptor,
        buf: &'a [u8],
        value: &mut Value<'a>,
    ) -> Result<(), DecodeError> {
        if !matches!(value, Value::Message(_)) {
            *value = desc.default_value();
        }
        let Value::Message(slots) = value else {
            return Ok(());
        };
        unpack_message(self.catalogue, desc, buf, slots).map_err(|err| {
            debug_log!("{}: decode of {} bytes failed: {}", desc.name, buf.len(), err);
            err
        })
    }
}

/// A typed record of the catalogue, usually implemented through
/// `#[derive(Record)]`.
pub trait Record: IntoValue + FromValue + Default {
    fn descriptor() -> &'static MessageDescriptor;

    fn encoded_size(&self) -> usize {
        Packer::new(&CATALOGUE).size(Self::descriptor(), &self.to_value())
    }

    fn encode(&self) -> Vec<u8> {
        Packer::new(&CATALOGUE).run(Self::descriptor(), &self.to_value())
    }

    /// Appends the encoding to `out`, leaving what is already there intact.
    fn encode_to(&self, out: &mut Vec<u8>) {
        let value = self.to_value();
        let packer = Packer::new(&CATALOGUE);
        out.reserve(packer.size(Self::descriptor(), &value));
        packer.run_into(Self::descriptor(), &value, out);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let value = Unpacker::new(&CATALOGUE).run(Self::descriptor(), buf)?;
        Ok(Self::from_value(value))
    }

    /// Decodes `buf` on top of `self`. On failure `self` is left untouched.
    fn merge(&mut self, buf: &[u8]) -> Result<(), DecodeError> {
        let mut value: Value<'_> = self.to_value().into_owned();
        Unpacker::new(&CATALOGUE).run_into(Self::descriptor(), buf, &mut value)?;
        *self = Self::from_value(value);
        Ok(())
    }
}

/// Single line rendering of the fields that would go on the wire, e.g.
/// `key:"0xabc" value:"0x01"`. Nested records are wrapped in `<...>`.
pub fn compact_text<R: Record>(record: &R) -> String {
    let mut out = String::new();
    if let Value::Message(slots) = record.to_value() {
        write_message(&CATALOGUE, R::descriptor(), &slots, &mut out);
    }
    out
}

fn write_message(catalogue: &Catalogue, desc: &MessageDescriptor, slots: &[Value], out: &mut String) {
    for &slot in &catalogue.program(desc).order {
        let field = &desc.fields[slot];
        let value = slots.get(slot).unwrap_or(&NONE);
        if is_omitted(field, value) {
            continue;
        }
        match value {
            Value::Array(vals) => {
                for v in vals {
                    write_entry(catalogue, field, v, out);
                }
            }
            v => write_entry(catalogue, field, v, out),
        }
    }
}

fn write_entry(catalogue: &Catalogue, field: &FieldDescriptor, value: &Value, out: &mut String) {
    if !out.is_empty() && !out.ends_with('<') {
        out.push(' ');
    }
    out.push_str(field.name);
    out.push(':');
    match value {
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::UInt(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::BigInt(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Bytes(b) => write_quoted(b, out),
        Value::String(s) => write_quoted(s.as_bytes(), out),
        Value::Message(slots) => {
            out.push('<');
            if let FieldKind::Message(desc) = field.kind {
                write_message(catalogue, desc, slots, out);
            }
            out.push('>');
        }
        Value::None | Value::Array(_) => {}
    }
}

// octal escapes for anything outside printable ascii
fn write_quoted(bytes: &[u8], out: &mut String) {
    out.push('"');
    for &b in bytes {
        match b {
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'"' => out.push_str("\\\""),
            b'\'' => out.push_str("\\'"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out.push('"');
}
