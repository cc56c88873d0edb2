//! Little-endian wire codec for [`Descriptor`].
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! u16  format version (WIRE_FORMAT_VERSION)
//! enum value pool:           u32 count, then strings
//! postfix pool:              u32 count, then strings
//! enums:                     u32 count, then { string name, u32 count,
//!                            value indices at pool width }
//! soft enums:                u32 count, then { string name, u32 count, strings }
//! chained subcommand values: u32 count, then strings
//! chained subcommands:       u32 count, then { string name, u32 count,
//!                            { value index at pool width, u32 symbol } }
//! commands:                  u32 count, then { string name, string description,
//!                            u16 flags, u8 permission, i32 alias enum,
//!                            u32 overloads: { u8 chaining, u32 params:
//!                            { string name, u32 symbol, u8 optional, u8 options } } }
//! constrained values:        u32 count, then { value index at enum-value pool
//!                            width, u32 enum index, u8 count, u8 codes }
//! ```
//!
//! Strings are a u16 byte length followed by UTF-8 bytes. Pool indices are
//! narrowed to 1, 2, or 4 bytes depending on the pool size at snapshot time;
//! a pool that has outgrown 4-byte indexing, a string longer than `u16::MAX`
//! bytes, or an index pointing past its pool all fail loudly.

use crate::descriptor::{
    ChainedSubcommandDescriptor, CommandDescriptor, ConstrainedValueDescriptor, Descriptor,
    EnumDescriptor, OverloadDescriptor, ParamDescriptor, SoftEnumDescriptor,
};
use crate::error::{DecodeError, EncodeError};

/// Wire format version emitted and accepted by this codec.
pub const WIRE_FORMAT_VERSION: u16 = 1;

/// Number of bytes used for an index into a pool of `len` entries.
fn index_width(len: usize) -> usize {
    if len <= usize::from(u8::MAX) + 1 {
        1
    } else if len <= usize::from(u16::MAX) + 1 {
        2
    } else {
        4
    }
}

// ─── Writer ─────────────────────────────────────────────────────────────────

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn count(&mut self, what: &'static str, n: usize) -> Result<(), EncodeError> {
        let v: u32 = n.try_into().map_err(|_| EncodeError::LimitExceeded {
            what,
            value: n as u64,
            max: u64::from(u32::MAX),
        })?;
        self.u32(v);
        Ok(())
    }

    fn string(&mut self, s: &str) -> Result<(), EncodeError> {
        let len: u16 = s
            .len()
            .try_into()
            .map_err(|_| EncodeError::LimitExceeded {
                what: "string length",
                value: s.len() as u64,
                max: u64::from(u16::MAX),
            })?;
        self.u16(len);
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Write a pool index at the width dictated by the pool size, after
    /// checking the index actually points inside the pool.
    fn index(
        &mut self,
        what: &'static str,
        idx: u32,
        pool_len: usize,
    ) -> Result<(), EncodeError> {
        if idx as usize >= pool_len {
            return Err(EncodeError::DanglingIndex {
                what,
                index: u64::from(idx),
                len: pool_len as u64,
            });
        }
        match index_width(pool_len) {
            1 => self.u8(idx as u8),
            2 => self.u16(idx as u16),
            _ => self.u32(idx),
        }
        Ok(())
    }
}

// ─── Reader ─────────────────────────────────────────────────────────────────

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&e| e <= self.bytes.len())
            .ok_or(DecodeError::UnexpectedEof { offset: self.pos })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> Result<i32, DecodeError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn string(&mut self) -> Result<String, DecodeError> {
        let len = usize::from(self.u16()?);
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    fn index(&mut self, pool_len: usize) -> Result<u32, DecodeError> {
        Ok(match index_width(pool_len) {
            1 => u32::from(self.u8()?),
            2 => u32::from(self.u16()?),
            _ => self.u32()?,
        })
    }
}

// ─── Encode ─────────────────────────────────────────────────────────────────

/// Encode a descriptor into its wire form.
///
/// Pure: the same descriptor always yields byte-identical output.
pub fn encode(d: &Descriptor) -> Result<Vec<u8>, EncodeError> {
    let mut w = Writer::new();
    w.u16(WIRE_FORMAT_VERSION);

    w.count("enum value pool size", d.enum_values.len())?;
    for v in &d.enum_values {
        w.string(v)?;
    }

    w.count("postfix pool size", d.postfixes.len())?;
    for p in &d.postfixes {
        w.string(p)?;
    }

    w.count("enum count", d.enums.len())?;
    for e in &d.enums {
        w.string(&e.name)?;
        w.count("enum value index count", e.value_indices.len())?;
        for &idx in &e.value_indices {
            w.index("enum value index", idx, d.enum_values.len())?;
        }
    }

    w.count("soft enum count", d.soft_enums.len())?;
    for s in &d.soft_enums {
        w.string(&s.name)?;
        w.count("soft enum value count", s.values.len())?;
        for v in &s.values {
            w.string(v)?;
        }
    }

    w.count(
        "chained subcommand value pool size",
        d.chained_subcommand_values.len(),
    )?;
    for v in &d.chained_subcommand_values {
        w.string(v)?;
    }

    w.count("chained subcommand count", d.chained_subcommands.len())?;
    for c in &d.chained_subcommands {
        w.string(&c.name)?;
        w.count("chained subcommand entry count", c.entries.len())?;
        for &(value_idx, symbol) in &c.entries {
            w.index(
                "chained subcommand value index",
                value_idx,
                d.chained_subcommand_values.len(),
            )?;
            w.u32(symbol);
        }
    }

    w.count("command count", d.commands.len())?;
    for cmd in &d.commands {
        w.string(&cmd.name)?;
        w.string(&cmd.description)?;
        w.u16(cmd.flags);
        w.u8(cmd.permission);
        if cmd.alias_enum >= 0 && cmd.alias_enum as usize >= d.enums.len() {
            return Err(EncodeError::DanglingIndex {
                what: "alias enum index",
                index: cmd.alias_enum as u64,
                len: d.enums.len() as u64,
            });
        }
        w.i32(cmd.alias_enum);
        w.count("overload count", cmd.overloads.len())?;
        for ov in &cmd.overloads {
            w.u8(u8::from(ov.chaining));
            w.count("parameter count", ov.params.len())?;
            for p in &ov.params {
                w.string(&p.name)?;
                w.u32(p.symbol);
                w.u8(u8::from(p.optional));
                w.u8(p.options);
            }
        }
    }

    w.count("constrained value count", d.constrained_values.len())?;
    for cv in &d.constrained_values {
        w.index(
            "constrained enum value index",
            cv.enum_value_index,
            d.enum_values.len(),
        )?;
        if cv.enum_index as usize >= d.enums.len() {
            return Err(EncodeError::DanglingIndex {
                what: "constrained enum index",
                index: u64::from(cv.enum_index),
                len: d.enums.len() as u64,
            });
        }
        w.u32(cv.enum_index);
        let n: u8 = cv
            .constraints
            .len()
            .try_into()
            .map_err(|_| EncodeError::LimitExceeded {
                what: "constraint count",
                value: cv.constraints.len() as u64,
                max: u64::from(u8::MAX),
            })?;
        w.u8(n);
        for &c in &cv.constraints {
            w.u8(c);
        }
    }

    Ok(w.buf)
}

// ─── Decode ─────────────────────────────────────────────────────────────────

/// Decode a wire descriptor back into its model form.
///
/// Rejects unknown format versions and trailing bytes.
pub fn decode(bytes: &[u8]) -> Result<Descriptor, DecodeError> {
    let mut r = Reader::new(bytes);

    let version = r.u16()?;
    if version != WIRE_FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            expected: WIRE_FORMAT_VERSION,
        });
    }

    let mut d = Descriptor::default();

    for _ in 0..r.u32()? {
        d.enum_values.push(r.string()?);
    }
    for _ in 0..r.u32()? {
        d.postfixes.push(r.string()?);
    }

    for _ in 0..r.u32()? {
        let name = r.string()?;
        let n = r.u32()?;
        let mut value_indices = Vec::with_capacity(n as usize);
        for _ in 0..n {
            value_indices.push(r.index(d.enum_values.len())?);
        }
        d.enums.push(EnumDescriptor {
            name,
            value_indices,
        });
    }

    for _ in 0..r.u32()? {
        let name = r.string()?;
        let n = r.u32()?;
        let mut values = Vec::with_capacity(n as usize);
        for _ in 0..n {
            values.push(r.string()?);
        }
        d.soft_enums.push(SoftEnumDescriptor { name, values });
    }

    for _ in 0..r.u32()? {
        d.chained_subcommand_values.push(r.string()?);
    }
    for _ in 0..r.u32()? {
        let name = r.string()?;
        let n = r.u32()?;
        let mut entries = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let value_idx = r.index(d.chained_subcommand_values.len())?;
            let symbol = r.u32()?;
            entries.push((value_idx, symbol));
        }
        d.chained_subcommands
            .push(ChainedSubcommandDescriptor { name, entries });
    }

    for _ in 0..r.u32()? {
        let name = r.string()?;
        let description = r.string()?;
        let flags = r.u16()?;
        let permission = r.u8()?;
        let alias_enum = r.i32()?;
        let n_overloads = r.u32()?;
        let mut overloads = Vec::with_capacity(n_overloads as usize);
        for _ in 0..n_overloads {
            let chaining = r.u8()? != 0;
            let n_params = r.u32()?;
            let mut params = Vec::with_capacity(n_params as usize);
            for _ in 0..n_params {
                params.push(ParamDescriptor {
                    name: r.string()?,
                    symbol: r.u32()?,
                    optional: r.u8()? != 0,
                    options: r.u8()?,
                });
            }
            overloads.push(OverloadDescriptor { chaining, params });
        }
        d.commands.push(CommandDescriptor {
            name,
            description,
            flags,
            permission,
            alias_enum,
            overloads,
        });
    }

    for _ in 0..r.u32()? {
        let enum_value_index = r.index(d.enum_values.len())?;
        let enum_index = r.u32()?;
        let n = r.u8()?;
        let mut constraints = Vec::with_capacity(usize::from(n));
        for _ in 0..n {
            constraints.push(r.u8()?);
        }
        d.constrained_values.push(ConstrainedValueDescriptor {
            enum_value_index,
            enum_index,
            constraints,
        });
    }

    if r.pos != bytes.len() {
        return Err(DecodeError::TrailingBytes {
            count: bytes.len() - r.pos,
        });
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Descriptor {
        Descriptor {
            enum_values: vec!["survival".into(), "creative".into()],
            postfixes: vec!["L".into()],
            enums: vec![EnumDescriptor {
                name: "GameMode".into(),
                value_indices: vec![0, 1],
            }],
            soft_enums: vec![SoftEnumDescriptor {
                name: "ObjectiveName".into(),
                values: vec!["deaths".into()],
            }],
            chained_subcommand_values: vec!["run".into()],
            chained_subcommands: vec![ChainedSubcommandDescriptor {
                name: "ExecuteChain".into(),
                entries: vec![(0, 0x0004_2000)],
            }],
            commands: vec![CommandDescriptor {
                name: "gamemode".into(),
                description: "Sets a player's game mode".into(),
                flags: 0x0008,
                permission: 1,
                alias_enum: 0,
                overloads: vec![OverloadDescriptor {
                    chaining: false,
                    params: vec![ParamDescriptor {
                        name: "mode".into(),
                        symbol: 0x0020_0000,
                        optional: false,
                        options: 0,
                    }],
                }],
            }],
            constrained_values: vec![ConstrainedValueDescriptor {
                enum_value_index: 1,
                enum_index: 0,
                constraints: vec![1],
            }],
        }
    }

    #[test]
    fn roundtrip() {
        let d = sample();
        let bytes = encode(&d).unwrap();
        let back = decode(&bytes).unwrap();
        assert_eq!(d, back);
    }

    #[test]
    fn encoding_is_deterministic() {
        let d = sample();
        assert_eq!(encode(&d).unwrap(), encode(&d).unwrap());
    }

    #[test]
    fn empty_descriptor_roundtrips() {
        let d = Descriptor::default();
        let bytes = encode(&d).unwrap();
        assert_eq!(decode(&bytes).unwrap(), d);
    }

    #[test]
    fn version_prefix_is_checked() {
        let mut bytes = encode(&Descriptor::default()).unwrap();
        bytes[0] = 0xFF;
        bytes[1] = 0xFF;
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::UnsupportedVersion { found: 0xFFFF, .. })
        ));
    }

    #[test]
    fn truncated_input_is_rejected() {
        let bytes = encode(&sample()).unwrap();
        for cut in [1, 2, 10, bytes.len() - 1] {
            assert!(
                matches!(
                    decode(&bytes[..cut]),
                    Err(DecodeError::UnexpectedEof { .. })
                ),
                "cut at {cut} should fail"
            );
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::TrailingBytes { count: 1 })
        ));
    }

    #[test]
    fn dangling_enum_value_index_fails_loudly() {
        let mut d = sample();
        d.enums[0].value_indices.push(99);
        assert!(matches!(
            encode(&d),
            Err(EncodeError::DanglingIndex {
                what: "enum value index",
                index: 99,
                ..
            })
        ));
    }

    #[test]
    fn dangling_alias_enum_fails_loudly() {
        let mut d = sample();
        d.commands[0].alias_enum = 7;
        assert!(matches!(
            encode(&d),
            Err(EncodeError::DanglingIndex {
                what: "alias enum index",
                ..
            })
        ));
    }

    #[test]
    fn oversized_string_fails_loudly() {
        let mut d = Descriptor::default();
        d.enum_values.push("x".repeat(usize::from(u16::MAX) + 1));
        assert!(matches!(
            encode(&d),
            Err(EncodeError::LimitExceeded {
                what: "string length",
                ..
            })
        ));
    }

    #[test]
    fn small_pool_uses_one_byte_indices() {
        // 2-entry pool: the single value index should occupy 1 byte.
        let d = Descriptor {
            enum_values: vec!["a".into(), "b".into()],
            enums: vec![EnumDescriptor {
                name: "E".into(),
                value_indices: vec![1],
            }],
            ..Descriptor::default()
        };
        let small = encode(&d).unwrap();

        // Same shape but a pool wide enough to force 2-byte indices.
        let mut wide = d.clone();
        for i in 0..300 {
            wide.enum_values.push(format!("v{i}"));
        }
        let wide_bytes = encode(&wide).unwrap();

        let small_overhead: usize = d.enum_values.iter().map(|s| 2 + s.len()).sum();
        let wide_overhead: usize = wide.enum_values.iter().map(|s| 2 + s.len()).sum();
        // Strip the variable-size pools; the remaining difference is exactly
        // the extra index byte.
        assert_eq!(
            (wide_bytes.len() - wide_overhead) - (small.len() - small_overhead),
            1
        );
    }

    #[test]
    fn negative_alias_enum_means_absent() {
        let mut d = sample();
        d.commands[0].alias_enum = -1;
        let back = decode(&encode(&d).unwrap()).unwrap();
        assert_eq!(back.commands[0].alias_enum, -1);
    }
}
