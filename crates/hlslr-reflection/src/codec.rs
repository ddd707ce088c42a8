//! Binary container codec.
//!
//! Dump computes the total size by walking the fixed section list once,
//! writes the header and every section with natural-alignment padding, and
//! must land exactly on the computed size. Load is the strict inverse over
//! untrusted bytes: every read is bounds-checked, strings must be UTF-8,
//! and any bytes left after the last section fail the load. A loaded
//! instance is validated before it is returned.
//!
//! Section order:
//! strings_debug, strings_non_debug, sources, nodes, node_symbols*,
//! registers, functions, enums, enum_values, annotations, array_sizes,
//! arrays, member_type_ids, member_name_ids*, types, type_name_ids*,
//! buffers (* = symbol info only).

use crate::error::ReflectError;
use crate::features::Features;
use crate::header::{Header, HEADER_SIZE, MAGIC, VERSION};
use crate::records::{
    Annotation, ArrayDesc, Buffer, EnumDesc, EnumValue, Function, Node, NodeSymbol, Register,
    TypeDesc,
};
use crate::reflection::Reflection;
use crate::strings::{SourceTable, StringPool, MAX_STRING_LEN};

const U32_SIZE: usize = 4;
const U32_ALIGN: usize = 4;

fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) / align * align
}

fn encoded_str_len(s: &str) -> usize {
    s.len() + if s.len() >= 128 { 2 } else { 1 }
}

// ---- dump ---------------------------------------------------------------

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn align_to(&mut self, align: usize) {
        let target = align_up(self.buf.len(), align);
        self.buf.resize(target, 0);
    }

    fn put_str(&mut self, s: &str) {
        debug_assert!(s.len() <= MAX_STRING_LEN);
        if s.len() >= 128 {
            self.buf.push((s.len() & 0x7F) as u8 | 0x80);
            self.buf.push((s.len() >> 7) as u8);
        } else {
            self.buf.push(s.len() as u8);
        }
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn put_u32s(&mut self, values: &[u32]) {
        self.align_to(U32_ALIGN);
        for value in values {
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    }

    fn put_records<const N: usize>(&mut self, align: usize, records: &[[u8; N]]) {
        self.align_to(align);
        for record in records {
            self.buf.extend_from_slice(record);
        }
    }
}

fn pod_section(offset: usize, align: usize, size: usize, count: usize) -> usize {
    align_up(offset, align) + size * count
}

/// Total dump size of an instance, walking the section list once.
fn compute_size(refl: &Reflection) -> usize {
    let has_symbols = refl.has_symbol_info();

    let mut offset = HEADER_SIZE;
    offset += refl.strings().iter().map(encoded_str_len).sum::<usize>();
    offset += refl
        .strings_non_debug()
        .iter()
        .map(encoded_str_len)
        .sum::<usize>();
    offset = pod_section(offset, U32_ALIGN, U32_SIZE, refl.sources().len());
    offset = pod_section(offset, Node::ALIGN, Node::SIZE, refl.nodes().len());
    if has_symbols {
        offset = pod_section(
            offset,
            NodeSymbol::ALIGN,
            NodeSymbol::SIZE,
            refl.node_symbols().len(),
        );
    }
    offset = pod_section(offset, Register::ALIGN, Register::SIZE, refl.registers().len());
    offset = pod_section(offset, Function::ALIGN, Function::SIZE, refl.functions().len());
    offset = pod_section(offset, EnumDesc::ALIGN, EnumDesc::SIZE, refl.enums().len());
    offset = pod_section(
        offset,
        EnumValue::ALIGN,
        EnumValue::SIZE,
        refl.enum_values().len(),
    );
    offset = pod_section(
        offset,
        Annotation::ALIGN,
        Annotation::SIZE,
        refl.annotations().len(),
    );
    offset = pod_section(offset, U32_ALIGN, U32_SIZE, refl.array_sizes().len());
    offset = pod_section(offset, ArrayDesc::ALIGN, ArrayDesc::SIZE, refl.arrays().len());
    offset = pod_section(offset, U32_ALIGN, U32_SIZE, refl.member_type_ids().len());
    if has_symbols {
        offset = pod_section(offset, U32_ALIGN, U32_SIZE, refl.member_name_ids().len());
    }
    offset = pod_section(offset, TypeDesc::ALIGN, TypeDesc::SIZE, refl.types().len());
    if has_symbols {
        offset = pod_section(offset, U32_ALIGN, U32_SIZE, refl.type_name_ids().len());
    }
    offset = pod_section(offset, Buffer::ALIGN, Buffer::SIZE, refl.buffers().len());
    offset
}

impl Reflection {
    /// Serialize to the binary container format.
    pub fn dump(&self) -> Vec<u8> {
        let total = compute_size(self);
        let has_symbols = self.has_symbol_info();

        let header = Header {
            magic: MAGIC,
            version: VERSION,
            sources: self.sources().len() as u16,
            features: self.features().bits(),
            strings_non_debug: self.strings_non_debug().len() as u32,
            strings: self.strings().len() as u32,
            nodes: self.nodes().len() as u32,
            registers: self.registers().len() as u32,
            functions: self.functions().len() as u32,
            enums: self.enums().len() as u32,
            enum_values: self.enum_values().len() as u32,
            annotations: self.annotations().len() as u32,
            arrays: self.arrays().len() as u32,
            array_sizes: self.array_sizes().len() as u32,
            members: self.member_type_ids().len() as u32,
            types: self.types().len() as u32,
            buffers: self.buffers().len() as u32,
        };

        let mut w = Writer {
            buf: Vec::with_capacity(total),
        };
        w.buf.extend_from_slice(&header.to_bytes());

        for s in self.strings().iter() {
            w.put_str(s);
        }
        for s in self.strings_non_debug().iter() {
            w.put_str(s);
        }
        let sources: Vec<u32> = self.sources().iter().collect();
        w.put_u32s(&sources);

        let nodes: Vec<_> = self.nodes().iter().map(Node::to_bytes).collect();
        w.put_records(Node::ALIGN, &nodes);
        if has_symbols {
            let symbols: Vec<_> = self.node_symbols().iter().map(NodeSymbol::to_bytes).collect();
            w.put_records(NodeSymbol::ALIGN, &symbols);
        }
        let registers: Vec<_> = self.registers().iter().map(Register::to_bytes).collect();
        w.put_records(Register::ALIGN, &registers);
        let functions: Vec<_> = self.functions().iter().map(Function::to_bytes).collect();
        w.put_records(Function::ALIGN, &functions);
        let enums: Vec<_> = self.enums().iter().map(EnumDesc::to_bytes).collect();
        w.put_records(EnumDesc::ALIGN, &enums);
        let enum_values: Vec<_> = self.enum_values().iter().map(EnumValue::to_bytes).collect();
        w.put_records(EnumValue::ALIGN, &enum_values);
        let annotations: Vec<_> = self.annotations().iter().map(Annotation::to_bytes).collect();
        w.put_records(Annotation::ALIGN, &annotations);
        w.put_u32s(self.array_sizes());
        let arrays: Vec<_> = self.arrays().iter().map(ArrayDesc::to_bytes).collect();
        w.put_records(ArrayDesc::ALIGN, &arrays);
        w.put_u32s(self.member_type_ids());
        if has_symbols {
            w.put_u32s(self.member_name_ids());
        }
        let types: Vec<_> = self.types().iter().map(TypeDesc::to_bytes).collect();
        w.put_records(TypeDesc::ALIGN, &types);
        if has_symbols {
            w.put_u32s(self.type_name_ids());
        }
        let buffers: Vec<_> = self.buffers().iter().map(Buffer::to_bytes).collect();
        w.put_records(Buffer::ALIGN, &buffers);

        assert_eq!(w.buf.len(), total, "dump size mismatch");
        w.buf
    }
}

// ---- load ---------------------------------------------------------------

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn align_to(&mut self, align: usize) {
        // May step past the end for malformed input; the next take reports it.
        self.offset = align_up(self.offset, align);
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ReflectError> {
        let end = self.offset.saturating_add(len);
        if end > self.bytes.len() {
            return Err(ReflectError::UnexpectedEof {
                offset: self.offset,
                needed: end - self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, ReflectError> {
        Ok(self.take(1)?[0])
    }

    /// Checked section read: `count` records of `size` bytes after aligning.
    fn section(&mut self, count: u32, size: usize, align: usize) -> Result<&'a [u8], ReflectError> {
        self.align_to(align);
        let total = u64::from(count) * size as u64;
        let remaining = (self.bytes.len() - self.offset.min(self.bytes.len())) as u64;
        if total > remaining {
            return Err(ReflectError::UnexpectedEof {
                offset: self.offset,
                needed: (total - remaining) as usize,
            });
        }
        self.take(total as usize)
    }
}

fn read_strings(r: &mut Reader<'_>, count: u32) -> Result<Vec<String>, ReflectError> {
    let mut strings = Vec::with_capacity(count.min(1 << 16) as usize);
    for index in 0..count {
        let mut len = usize::from(r.byte()?);
        if len >> 7 != 0 {
            len = (len & 0x7F) | (usize::from(r.byte()?) << 7);
        }
        let bytes = r.take(len)?;
        let s = std::str::from_utf8(bytes)
            .map_err(|_| ReflectError::InvalidUtf8 { index })?
            .to_owned();
        strings.push(s);
    }
    Ok(strings)
}

fn read_u32s(r: &mut Reader<'_>, count: u32) -> Result<Vec<u32>, ReflectError> {
    let bytes = r.section(count, U32_SIZE, U32_ALIGN)?;
    Ok(bytes
        .chunks_exact(U32_SIZE)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn read_records<T>(
    r: &mut Reader<'_>,
    count: u32,
    size: usize,
    align: usize,
    decode: fn(&[u8]) -> T,
) -> Result<Vec<T>, ReflectError> {
    let bytes = r.section(count, size, align)?;
    Ok(bytes.chunks_exact(size).map(decode).collect())
}

impl Reflection {
    /// Deserialize and validate a reflection container.
    ///
    /// The input is untrusted: all cross-references and enum discriminants
    /// are checked before the instance is returned, and trailing bytes are
    /// rejected. With `make_name_lookup`, the name-lookup tables are built
    /// when symbol info is present.
    pub fn from_bytes(bytes: &[u8], make_name_lookup: bool) -> Result<Self, ReflectError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ReflectError::TooSmall(bytes.len()));
        }
        let header = Header::from_bytes(bytes);
        if !header.validate_magic() {
            return Err(ReflectError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ReflectError::UnsupportedVersion(header.version));
        }
        let features = Features::from_bits(header.features)
            .ok_or(ReflectError::UnknownFeatures(header.features))?;
        let has_symbols = features.has_symbol_info();
        if !has_symbols && (header.sources != 0 || header.strings != 0) {
            return Err(ReflectError::DebugWithoutSymbols);
        }

        let mut r = Reader {
            bytes,
            offset: HEADER_SIZE,
        };

        let strings = read_strings(&mut r, header.strings)?;
        let strings_non_debug = read_strings(&mut r, header.strings_non_debug)?;
        let sources = read_u32s(&mut r, u32::from(header.sources))?;

        let nodes = read_records(&mut r, header.nodes, Node::SIZE, Node::ALIGN, Node::from_bytes)?;
        let node_symbols = if has_symbols {
            read_records(
                &mut r,
                header.nodes,
                NodeSymbol::SIZE,
                NodeSymbol::ALIGN,
                NodeSymbol::from_bytes,
            )?
        } else {
            Vec::new()
        };
        let registers = read_records(
            &mut r,
            header.registers,
            Register::SIZE,
            Register::ALIGN,
            Register::from_bytes,
        )?;
        let functions = read_records(
            &mut r,
            header.functions,
            Function::SIZE,
            Function::ALIGN,
            Function::from_bytes,
        )?;
        let enums = read_records(
            &mut r,
            header.enums,
            EnumDesc::SIZE,
            EnumDesc::ALIGN,
            EnumDesc::from_bytes,
        )?;
        let enum_values = read_records(
            &mut r,
            header.enum_values,
            EnumValue::SIZE,
            EnumValue::ALIGN,
            EnumValue::from_bytes,
        )?;
        let annotations = read_records(
            &mut r,
            header.annotations,
            Annotation::SIZE,
            Annotation::ALIGN,
            Annotation::from_bytes,
        )?;
        let array_sizes = read_u32s(&mut r, header.array_sizes)?;
        let arrays = read_records(
            &mut r,
            header.arrays,
            ArrayDesc::SIZE,
            ArrayDesc::ALIGN,
            ArrayDesc::from_bytes,
        )?;
        let member_type_ids = read_u32s(&mut r, header.members)?;
        let member_name_ids = if has_symbols {
            read_u32s(&mut r, header.members)?
        } else {
            Vec::new()
        };
        let types = read_records(
            &mut r,
            header.types,
            TypeDesc::SIZE,
            TypeDesc::ALIGN,
            TypeDesc::from_bytes,
        )?;
        let type_name_ids = if has_symbols {
            read_u32s(&mut r, header.types)?
        } else {
            Vec::new()
        };
        let buffers = read_records(
            &mut r,
            header.buffers,
            Buffer::SIZE,
            Buffer::ALIGN,
            Buffer::from_bytes,
        )?;

        if r.offset != bytes.len() {
            return Err(ReflectError::TrailingBytes {
                consumed: r.offset,
                total: bytes.len(),
            });
        }

        let mut refl = Reflection::from_tables(
            features,
            StringPool::from_entries(strings),
            StringPool::from_entries(strings_non_debug),
            SourceTable::from_entries(sources),
            nodes,
            registers,
            functions,
            enums,
            enum_values,
            annotations,
            arrays,
            array_sizes,
            member_type_ids,
            types,
            buffers,
            node_symbols,
            member_name_ids,
            type_name_ids,
        );

        crate::validate::validate(&refl)?;

        if make_name_lookup {
            refl.generate_name_lookup_table();
        }
        Ok(refl)
    }
}
