use super::{ProtocolError, TType, WireProtocol};
use crate::constants::{MAX_LENGTH_PREFIX, MAX_NESTING_DEPTH};
use crate::schema::{FieldType, StructSchema, StructValue, Value};
use bytes::{Buf, BufMut};

/// The classic Thrift binary protocol, applied to bare structs.
///
/// Only the struct encoding is used: the RPC method name travels in the URL,
/// so no message envelope (`writeMessageBegin`) is ever written. The output is
/// byte-for-byte what a reference Thrift binary serializer produces for the
/// same struct, which keeps existing clients and servers interoperable.
///
/// Layout summary:
/// - field header: 1-byte type tag, 2-byte big-endian field id
/// - struct end: a single `Stop` (0) byte
/// - integers and doubles: big-endian, fixed width
/// - string / binary: 4-byte length, raw bytes
/// - list / set: 1-byte element tag, 4-byte size, elements
/// - map: 1-byte key tag, 1-byte value tag, 4-byte size, entries
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryProtocol;

impl BinaryProtocol {
    pub fn new() -> Self {
        Self
    }
}

impl WireProtocol for BinaryProtocol {
    fn encode_struct(
        &self,
        schema: &StructSchema,
        value: &StructValue,
    ) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = Vec::with_capacity(64);
        write_struct(&mut buf, schema, value, 0)?;
        Ok(buf)
    }

    fn decode_struct(
        &self,
        schema: &StructSchema,
        bytes: &[u8],
    ) -> Result<StructValue, ProtocolError> {
        let mut reader = Reader { buf: bytes };
        read_struct(&mut reader, schema, 0)
    }
}

fn check_depth(depth: usize) -> Result<(), ProtocolError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ProtocolError::DepthLimitExceeded(MAX_NESTING_DEPTH));
    }
    Ok(())
}

fn write_struct(
    buf: &mut Vec<u8>,
    schema: &StructSchema,
    value: &StructValue,
    depth: usize,
) -> Result<(), ProtocolError> {
    check_depth(depth)?;

    // `StructValue` iterates in ascending id order, matching the reference
    // serializer's field order.
    for (id, field_value) in value.iter() {
        let field = schema
            .field_by_id(id)
            .ok_or_else(|| ProtocolError::UnknownFieldId {
                schema: schema.name().to_string(),
                id,
            })?;

        buf.put_u8(field.ty.ttype().into());
        buf.put_i16(field.id);
        write_value(buf, &field.name, &field.ty, field_value, depth)?;
    }

    buf.put_u8(TType::Stop.into());
    Ok(())
}

/// Writes a length or size prefix, refusing anything a decoder would reject.
fn write_len(buf: &mut Vec<u8>, len: usize) -> Result<(), ProtocolError> {
    if len > MAX_LENGTH_PREFIX {
        return Err(ProtocolError::InvalidLength(len as i64));
    }
    let len = i32::try_from(len).map_err(|_| ProtocolError::InvalidLength(len as i64))?;
    buf.put_i32(len);
    Ok(())
}

fn write_value(
    buf: &mut Vec<u8>,
    field_name: &str,
    ty: &FieldType,
    value: &Value,
    depth: usize,
) -> Result<(), ProtocolError> {
    match (ty, value) {
        (FieldType::Bool, Value::Bool(v)) => buf.put_u8(u8::from(*v)),
        (FieldType::Byte, Value::Byte(v)) => buf.put_i8(*v),
        (FieldType::I16, Value::I16(v)) => buf.put_i16(*v),
        (FieldType::I32, Value::I32(v)) => buf.put_i32(*v),
        (FieldType::I64, Value::I64(v)) => buf.put_i64(*v),
        (FieldType::Double, Value::Double(v)) => buf.put_f64(*v),
        (FieldType::String, Value::String(v)) => {
            write_len(buf, v.len())?;
            buf.put_slice(v.as_bytes());
        }
        (FieldType::Binary, Value::Binary(v)) => {
            write_len(buf, v.len())?;
            buf.put_slice(v);
        }
        (FieldType::Struct(schema), Value::Struct(v)) => {
            write_struct(buf, schema, v, depth + 1)?;
        }
        (
            FieldType::List(elem) | FieldType::Set(elem),
            Value::List(items) | Value::Set(items),
        ) => {
            check_depth(depth + 1)?;
            buf.put_u8(elem.ttype().into());
            write_len(buf, items.len())?;
            for item in items {
                write_value(buf, field_name, elem, item, depth + 1)?;
            }
        }
        (FieldType::Map(key_ty, value_ty), Value::Map(entries)) => {
            check_depth(depth + 1)?;
            buf.put_u8(key_ty.ttype().into());
            buf.put_u8(value_ty.ttype().into());
            write_len(buf, entries.len())?;
            for (key, entry_value) in entries {
                write_value(buf, field_name, key_ty, key, depth + 1)?;
                write_value(buf, field_name, value_ty, entry_value, depth + 1)?;
            }
        }
        _ => {
            return Err(ProtocolError::TypeMismatch {
                field: field_name.to_string(),
                expected: ty.ttype(),
                found: value.kind(),
            });
        }
    }
    Ok(())
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl Reader<'_> {
    fn ensure(&self, len: usize, context: &'static str) -> Result<(), ProtocolError> {
        if self.buf.remaining() < len {
            return Err(ProtocolError::UnexpectedEof { context });
        }
        Ok(())
    }

    fn read_u8(&mut self, context: &'static str) -> Result<u8, ProtocolError> {
        self.ensure(1, context)?;
        Ok(self.buf.get_u8())
    }

    fn read_ttype(&mut self, context: &'static str) -> Result<TType, ProtocolError> {
        let tag = self.read_u8(context)?;
        TType::try_from(tag).map_err(|_| ProtocolError::InvalidType(tag))
    }

    fn read_i16(&mut self) -> Result<i16, ProtocolError> {
        self.ensure(2, "i16")?;
        Ok(self.buf.get_i16())
    }

    fn read_i32(&mut self) -> Result<i32, ProtocolError> {
        self.ensure(4, "i32")?;
        Ok(self.buf.get_i32())
    }

    fn read_i64(&mut self) -> Result<i64, ProtocolError> {
        self.ensure(8, "i64")?;
        Ok(self.buf.get_i64())
    }

    fn read_f64(&mut self) -> Result<f64, ProtocolError> {
        self.ensure(8, "double")?;
        Ok(self.buf.get_f64())
    }

    /// Reads a length or container size prefix.
    fn read_size(&mut self) -> Result<usize, ProtocolError> {
        let size = self.read_i32()?;
        if size < 0 || size as usize > MAX_LENGTH_PREFIX {
            return Err(ProtocolError::InvalidLength(i64::from(size)));
        }
        Ok(size as usize)
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, ProtocolError> {
        let len = self.read_size()?;
        self.ensure(len, "string body")?;
        let bytes = self.buf[..len].to_vec();
        self.buf.advance(len);
        Ok(bytes)
    }

    fn skip_bytes(&mut self, len: usize, context: &'static str) -> Result<(), ProtocolError> {
        self.ensure(len, context)?;
        self.buf.advance(len);
        Ok(())
    }
}

fn read_struct(
    reader: &mut Reader<'_>,
    schema: &StructSchema,
    depth: usize,
) -> Result<StructValue, ProtocolError> {
    check_depth(depth)?;

    let mut value = StructValue::new();
    loop {
        let ttype = reader.read_ttype("field header")?;
        if ttype == TType::Stop {
            break;
        }
        let id = reader.read_i16()?;

        match schema.field_by_id(id) {
            Some(field) if field.ty.ttype() == ttype => {
                let field_value = read_value(reader, &field.ty, depth)?;
                value.set(id, field_value);
            }
            _ => {
                tracing::trace!(
                    "Skipping field {} ({:?}) not declared by `{}`",
                    id,
                    ttype,
                    schema.name()
                );
                skip(reader, ttype, depth)?;
            }
        }
    }
    Ok(value)
}

fn expect_element(expected: &FieldType, found: TType, size: usize) -> Result<(), ProtocolError> {
    // Empty containers are accepted whatever their advertised element type.
    if size > 0 && expected.ttype() != found {
        return Err(ProtocolError::ElementTypeMismatch {
            expected: expected.ttype(),
            found,
        });
    }
    Ok(())
}

fn read_value(
    reader: &mut Reader<'_>,
    ty: &FieldType,
    depth: usize,
) -> Result<Value, ProtocolError> {
    let value = match ty {
        FieldType::Bool => Value::Bool(reader.read_u8("bool")? != 0),
        FieldType::Byte => Value::Byte(reader.read_u8("byte")? as i8),
        FieldType::I16 => Value::I16(reader.read_i16()?),
        FieldType::I32 => Value::I32(reader.read_i32()?),
        FieldType::I64 => Value::I64(reader.read_i64()?),
        FieldType::Double => Value::Double(reader.read_f64()?),
        FieldType::String => {
            let bytes = reader.read_bytes()?;
            Value::String(String::from_utf8(bytes).map_err(|_| ProtocolError::InvalidUtf8)?)
        }
        FieldType::Binary => Value::Binary(reader.read_bytes()?),
        FieldType::Struct(schema) => Value::Struct(read_struct(reader, schema, depth + 1)?),
        FieldType::List(elem) | FieldType::Set(elem) => {
            check_depth(depth + 1)?;
            let elem_type = reader.read_ttype("element type")?;
            let size = reader.read_size()?;
            expect_element(elem, elem_type, size)?;

            // Every element takes at least one byte, which bounds the
            // allocation by what was actually received.
            let mut items = Vec::with_capacity(size.min(reader.buf.remaining()));
            for _ in 0..size {
                items.push(read_value(reader, elem, depth + 1)?);
            }
            if matches!(ty, FieldType::Set(_)) {
                Value::Set(items)
            } else {
                Value::List(items)
            }
        }
        FieldType::Map(key_ty, value_ty) => {
            check_depth(depth + 1)?;
            let key_type = reader.read_ttype("map key type")?;
            let value_type = reader.read_ttype("map value type")?;
            let size = reader.read_size()?;
            expect_element(key_ty, key_type, size)?;
            expect_element(value_ty, value_type, size)?;

            let mut entries = Vec::with_capacity(size.min(reader.buf.remaining()));
            for _ in 0..size {
                let key = read_value(reader, key_ty, depth + 1)?;
                let entry_value = read_value(reader, value_ty, depth + 1)?;
                entries.push((key, entry_value));
            }
            Value::Map(entries)
        }
    };
    Ok(value)
}

/// Consumes one value of wire type `ttype` without interpreting it.
fn skip(reader: &mut Reader<'_>, ttype: TType, depth: usize) -> Result<(), ProtocolError> {
    check_depth(depth)?;

    match ttype {
        TType::Stop | TType::Void => return Err(ProtocolError::InvalidType(ttype.into())),
        TType::Bool | TType::Byte => reader.skip_bytes(1, "byte")?,
        TType::I16 => reader.skip_bytes(2, "i16")?,
        TType::I32 => reader.skip_bytes(4, "i32")?,
        TType::I64 | TType::Double => reader.skip_bytes(8, "i64")?,
        TType::String => {
            let len = reader.read_size()?;
            reader.skip_bytes(len, "string body")?;
        }
        TType::Struct => loop {
            let field_type = reader.read_ttype("field header")?;
            if field_type == TType::Stop {
                break;
            }
            reader.read_i16()?;
            skip(reader, field_type, depth + 1)?;
        },
        TType::Map => {
            let key_type = reader.read_ttype("map key type")?;
            let value_type = reader.read_ttype("map value type")?;
            let size = reader.read_size()?;
            for _ in 0..size {
                skip(reader, key_type, depth + 1)?;
                skip(reader, value_type, depth + 1)?;
            }
        }
        TType::Set | TType::List => {
            let elem_type = reader.read_ttype("element type")?;
            let size = reader.read_size()?;
            for _ in 0..size {
                skip(reader, elem_type, depth + 1)?;
            }
        }
    }
    Ok(())
}
