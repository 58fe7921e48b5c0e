pub mod evm;

use std::error::Error;
use std::fmt;
use std::fmt::Debug;

use bimap::BiHashMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use crate::utils::TypeCompileError;
use crate::value::Value;
use crate::wire::{WireKind, MAX_FIELD_NUMBER};
use crate::{compiler_error, debug_log};

#[inline(always)]
pub fn ok_or_panic<T, E: Error>(maybe_err: Result<T, E>) -> T {
    {
        maybe_err.unwrap_or_else(|e| panic!("Compiler error:\n\t{e}"))
    }
}

/// What a field holds, which also fixes its wire kind.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Bool,
    UInt64,
    Int64,
    /// travels sign-extended to 64 bits, decodes truncated
    Int32,
    String,
    Bytes,
    /// extended-precision integer, see `utils::numbers::Int`
    Int,
    Message(&'static MessageDescriptor),
}

impl FieldKind {
    pub const fn wire_kind(&self) -> WireKind {
        match self {
            FieldKind::Bool | FieldKind::UInt64 | FieldKind::Int64 | FieldKind::Int32 => {
                WireKind::Varint
            }
            FieldKind::String | FieldKind::Bytes | FieldKind::Int | FieldKind::Message(_) => {
                WireKind::LengthDelimited
            }
        }
    }

    pub const fn is_varint(&self) -> bool {
        matches!(self.wire_kind(), WireKind::Varint)
    }

    fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::UInt64 => "uint64",
            FieldKind::Int64 => "int64",
            FieldKind::Int32 => "int32",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::Int => "int",
            FieldKind::Message(desc) => desc.name,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    /// left off the wire when default; embedded records are always written
    Singular = 0,
    /// presence tracked, written whenever set
    Optional = 1,
    /// one tag per element
    Repeated = 2,
    /// one length-delimited run of varints, unpacked form also accepted
    Packed = 3,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub number: u32,
    pub name: &'static str,
    pub kind: FieldKind,
    pub repetition: Repetition,
}

impl FieldDescriptor {
    pub const fn new(
        number: u32,
        name: &'static str,
        kind: FieldKind,
        repetition: Repetition,
    ) -> Self {
        Self { number, name, kind, repetition }
    }

    /// Wire kind the encoder emits for this field.
    pub const fn wire_kind(&self) -> WireKind {
        match self.repetition {
            Repetition::Packed => WireKind::LengthDelimited,
            _ => self.kind.wire_kind(),
        }
    }

    /// Whether a tag with wire kind `wire` may carry this field.
    pub fn accepts(&self, wire: WireKind) -> bool {
        match self.repetition {
            Repetition::Packed => {
                wire == WireKind::LengthDelimited || wire == self.kind.wire_kind()
            }
            _ => wire == self.kind.wire_kind(),
        }
    }

    /// Slot a field starts out with before any occurrence is decoded.
    pub fn default_value(&self) -> Value<'static> {
        match self.repetition {
            Repetition::Optional => Value::None,
            Repetition::Repeated | Repetition::Packed => Value::Array(Vec::new()),
            Repetition::Singular => match self.kind {
                FieldKind::Bool => Value::Bool(false),
                FieldKind::UInt64 => Value::UInt(0),
                FieldKind::Int64 | FieldKind::Int32 => Value::Int(0),
                FieldKind::String => Value::String(Default::default()),
                FieldKind::Bytes => Value::Bytes(Default::default()),
                FieldKind::Int => Value::BigInt(Default::default()),
                FieldKind::Message(desc) => desc.default_value(),
            },
        }
    }
}

/// Field table of one record type.
#[derive(Debug)]
pub struct MessageDescriptor {
    /// index into the catalogue's programs
    pub id: usize,
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    pub fn default_value(&self) -> Value<'static> {
        Value::Message(self.fields.iter().map(FieldDescriptor::default_value).collect())
    }
}

/// Lookup structures compiled from a `MessageDescriptor`.
pub struct Program {
    pub descriptor: &'static MessageDescriptor,

    /// field number -> slot index, dense up to the highest known number
    slots: Vec<Option<usize>>,

    /// slot indices in ascending field number order
    pub order: Vec<usize>,

    /// field number <-> field name
    pub names: BiHashMap<u32, &'static str>,
}

impl Program {
    #[inline]
    pub fn slot_of(&self, number: u32) -> Option<usize> {
        self.slots.get(number as usize).copied().flatten()
    }

    pub fn field_by_number(&self, number: u32) -> Option<&'static FieldDescriptor> {
        self.slot_of(number).map(|slot| &self.descriptor.fields[slot])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.names
            .get_by_right(name)
            .and_then(|number| self.field_by_number(*number))
    }
}

impl Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program {}:", self.descriptor.name)?;
        for &slot in &self.order {
            let field = &self.descriptor.fields[slot];
            writeln!(
                f,
                "\t{:3}: {:<24} {:?} {:?} {}",
                field.number,
                field.name,
                field.repetition,
                field.wire_kind(),
                field.kind.type_name(),
            )?;
        }
        Ok(())
    }
}

pub fn compile_program(desc: &'static MessageDescriptor) -> Result<Program, TypeCompileError> {
    if let Some(dup) = desc.fields.iter().map(|f| f.number).duplicates().next() {
        return Err(compiler_error!("{}: duplicate field number {}", desc.name, dup));
    }
    if let Some(dup) = desc.fields.iter().map(|f| f.name).duplicates().next() {
        return Err(compiler_error!("{}: duplicate field name {}", desc.name, dup));
    }

    let mut names = BiHashMap::new();
    let max = desc.fields.iter().map(|f| f.number).max().unwrap_or(0);
    let mut slots = vec![None; max as usize + 1];

    for (slot, field) in desc.fields.iter().enumerate() {
        if field.number == 0 || field.number > MAX_FIELD_NUMBER {
            return Err(compiler_error!(
                "{}.{}: field number {} out of range",
                desc.name, field.name, field.number
            ));
        }
        if field.repetition == Repetition::Packed && !field.kind.is_varint() {
            return Err(compiler_error!(
                "{}.{}: only varint scalars can be packed",
                desc.name, field.name
            ));
        }
        slots[field.number as usize] = Some(slot);
        names.insert(field.number, field.name);
    }

    let order = desc
        .fields
        .iter()
        .enumerate()
        .sorted_by_key(|(_, f)| f.number)
        .map(|(slot, _)| slot)
        .collect();

    Ok(Program { descriptor: desc, slots, order, names })
}

/// Compiled programs of every record type, indexed by descriptor id.
pub struct Catalogue {
    programs: Vec<Program>,
}

impl Catalogue {
    pub fn compile(descriptors: &[&'static MessageDescriptor]) -> Result<Self, TypeCompileError> {
        let mut programs = Vec::with_capacity(descriptors.len());
        for (id, desc) in descriptors.iter().enumerate() {
            if desc.id != id {
                return Err(compiler_error!(
                    "{}: descriptor id {} registered at position {}",
                    desc.name, desc.id, id
                ));
            }
            let program = compile_program(desc)?;
            debug_log!("{:?}", program);
            programs.push(program);
        }

        // nested records must be part of the same catalogue
        for program in &programs {
            for field in program.descriptor.fields {
                if let FieldKind::Message(nested) = field.kind {
                    let known = programs
                        .get(nested.id)
                        .is_some_and(|p| std::ptr::eq(p.descriptor, nested));
                    if !known {
                        return Err(compiler_error!(
                            "{}.{}: record {} missing from catalogue",
                            program.descriptor.name, field.name, nested.name
                        ));
                    }
                }
            }
        }

        Ok(Self { programs })
    }

    #[inline]
    pub fn program(&self, desc: &MessageDescriptor) -> &Program {
        let program = &self.programs[desc.id];
        debug_assert!(
            std::ptr::eq(program.descriptor, desc),
            "{} is not the record registered under id {}",
            desc.name, desc.id
        );
        program
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// SHA-256 over every table: record names, then per field its number,
    /// name, type and repetition, in ascending field order.
    pub fn checksum(&self) -> [u8; 32] {
        let mut h = Sha256::new();

        for program in &self.programs {
            h.update(program.descriptor.name.as_bytes());

            for &slot in &program.order {
                let f = &program.descriptor.fields[slot];
                h.update(f.number.to_le_bytes());
                h.update(f.name.as_bytes());
                h.update(f.kind.type_name().as_bytes());
                h.update([f.repetition as u8]);
            }
        }

        h.finalize().into()
    }
}

/// The process-wide catalogue of the EVM module's records, compiled on first
/// use and read-only afterwards.
pub static CATALOGUE: Lazy<Catalogue> =
    Lazy::new(|| ok_or_panic(Catalogue::compile(evm::DESCRIPTORS)));
