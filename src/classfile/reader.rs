//! Linear class-file parser producing a [`ClassSummary`].
//!
//! Follows the canonical layout: magic, versions, constant pool, access
//! flags, this/super class, interfaces, fields, methods, class attributes.
//! Only `ConstantValue`, `Exceptions` and the runtime annotation attributes
//! are interpreted; everything else (including method bodies) is skipped by
//! its declared length.

use super::bytes::ByteReader;
use super::constant_pool::{Constant, ConstantPool};
use super::descriptor;
use super::flags::{ACC_PRIVATE, ACC_PROTECTED, ACC_PUBLIC};
use crate::error::ClassFileErrorKind;
use crate::model::{ClassSummary, ComparisonOptions, ConstantValue, FieldSummary, MethodSummary};

/// Four-byte prefix every class file starts with.
pub const CLASS_FILE_MAGIC: u32 = 0xCAFE_BABE;

/// Parse a class-file payload into a summary.
///
/// Returns `Ok(None)` when the class is filtered out by the visibility
/// policy (package-private class with `include_package_classes` off) — the
/// payload was valid, just not of interest.
pub fn read_class_summary(
    data: &[u8],
    options: &ComparisonOptions,
) -> Result<Option<ClassSummary>, ClassFileErrorKind> {
    let mut r = ByteReader::new(data);

    let magic = r.read_u32()?;
    if magic != CLASS_FILE_MAGIC {
        return Err(ClassFileErrorKind::BadMagic { found: magic });
    }
    let _minor = r.read_u16()?;
    let _major = r.read_u16()?;

    let pool_count = r.read_u16()?;
    let pool = ConstantPool::parse(&mut r, pool_count)?;

    let access = r.read_u16()?;
    let this_class = r.read_u16()?;
    let name = internal_to_dot(pool.class_name(this_class)?);

    // super_class index 0 is permitted for the root type only
    let super_index = r.read_u16()?;
    let super_name = if super_index == 0 {
        None
    } else {
        Some(internal_to_dot(pool.class_name(super_index)?))
    };

    let keep_class = options.include_package_classes || access & (ACC_PUBLIC | ACC_PROTECTED) != 0;

    let interfaces_count = r.read_u16()?;
    let mut interfaces = Vec::with_capacity(interfaces_count as usize);
    for _ in 0..interfaces_count {
        let index = r.read_u16()?;
        interfaces.push(internal_to_dot(pool.class_name(index)?));
    }

    // Member tables must be walked even for a filtered-out class or a
    // disabled category, to keep the reader positioned; collection is
    // what the policy gates.
    let fields_count = r.read_u16()?;
    let mut fields: Vec<FieldSummary> = Vec::new();
    for _ in 0..fields_count {
        let field = read_field(&mut r, &pool, options)?;
        let keep = keep_class
            && options.analyze_field_changes
            && (options.include_private_members || field.access & ACC_PRIVATE == 0);
        if keep {
            if fields.iter().any(|f| f.name == field.name) {
                tracing::debug!(class = %name, field = %field.name, "duplicate field entry skipped");
            } else {
                fields.push(field);
            }
        }
    }

    let methods_count = r.read_u16()?;
    let mut methods: Vec<MethodSummary> = Vec::new();
    for _ in 0..methods_count {
        let method = read_method(&mut r, &pool, options)?;
        let keep =
            keep_class && (options.include_private_members || method.access & ACC_PRIVATE == 0);
        if keep {
            if methods
                .iter()
                .any(|m| m.name == method.name && m.descriptor == method.descriptor)
            {
                tracing::debug!(class = %name, method = %method.name, "duplicate method entry skipped");
            } else {
                methods.push(method);
            }
        }
    }

    let mut annotations = Vec::new();
    read_attributes(&mut r, &pool, |attr_name, payload| {
        if options.analyze_annotations && is_annotation_attribute(attr_name) {
            parse_annotation_list(payload, &pool, &mut annotations)?;
        }
        Ok(())
    })?;

    if !keep_class {
        return Ok(None);
    }
    annotations.sort();
    annotations.dedup();

    let mut summary = ClassSummary {
        name,
        access,
        super_name,
        interfaces,
        methods,
        fields,
        annotations,
        content_hash: 0,
    };
    summary.compute_content_hash();
    Ok(Some(summary))
}

fn read_field(
    r: &mut ByteReader<'_>,
    pool: &ConstantPool,
    options: &ComparisonOptions,
) -> Result<FieldSummary, ClassFileErrorKind> {
    let access = r.read_u16()?;
    let name = pool.utf8(r.read_u16()?)?.to_string();
    let descriptor = pool.utf8(r.read_u16()?)?.to_string();
    if !descriptor::is_valid_field_descriptor(&descriptor) {
        return Err(ClassFileErrorKind::BadDescriptor { descriptor });
    }

    let mut constant_value = None;
    let mut annotations = Vec::new();
    read_attributes(r, pool, |attr_name, payload| {
        match attr_name {
            "ConstantValue" => {
                let mut ar = ByteReader::new(payload);
                constant_value = Some(resolve_constant_value(pool, ar.read_u16()?)?);
            }
            _ if options.analyze_annotations && is_annotation_attribute(attr_name) => {
                parse_annotation_list(payload, pool, &mut annotations)?;
            }
            _ => {}
        }
        Ok(())
    })?;
    annotations.sort();
    annotations.dedup();

    Ok(FieldSummary {
        name,
        descriptor,
        access,
        constant_value,
        annotations,
    })
}

fn read_method(
    r: &mut ByteReader<'_>,
    pool: &ConstantPool,
    options: &ComparisonOptions,
) -> Result<MethodSummary, ClassFileErrorKind> {
    let access = r.read_u16()?;
    let name = pool.utf8(r.read_u16()?)?.to_string();
    let descriptor = pool.utf8(r.read_u16()?)?.to_string();
    if !descriptor::is_valid_method_descriptor(&descriptor) {
        return Err(ClassFileErrorKind::BadDescriptor { descriptor });
    }

    let mut exceptions = Vec::new();
    let mut annotations = Vec::new();
    read_attributes(r, pool, |attr_name, payload| {
        match attr_name {
            "Exceptions" => {
                let mut ar = ByteReader::new(payload);
                let count = ar.read_u16()?;
                for _ in 0..count {
                    exceptions.push(internal_to_dot(pool.class_name(ar.read_u16()?)?));
                }
            }
            _ if options.analyze_annotations && is_annotation_attribute(attr_name) => {
                parse_annotation_list(payload, pool, &mut annotations)?;
            }
            _ => {}
        }
        Ok(())
    })?;
    annotations.sort();
    annotations.dedup();

    Ok(MethodSummary {
        name,
        descriptor,
        access,
        exceptions,
        annotations,
    })
}

/// Walk an attribute table, handing each attribute's name and payload to
/// the callback. Unknown attributes are consumed by their declared length.
fn read_attributes(
    r: &mut ByteReader<'_>,
    pool: &ConstantPool,
    mut on_attribute: impl FnMut(&str, &[u8]) -> Result<(), ClassFileErrorKind>,
) -> Result<(), ClassFileErrorKind> {
    let count = r.read_u16()?;
    for _ in 0..count {
        let name = pool.utf8(r.read_u16()?)?;
        let length = r.read_u32()? as usize;
        let payload = r.read_bytes(length)?;
        on_attribute(name, payload)?;
    }
    Ok(())
}

fn is_annotation_attribute(name: &str) -> bool {
    name == "RuntimeVisibleAnnotations" || name == "RuntimeInvisibleAnnotations"
}

/// Parse a `Runtime(In)VisibleAnnotations` payload, collecting top-level
/// annotation type names.
fn parse_annotation_list(
    payload: &[u8],
    pool: &ConstantPool,
    out: &mut Vec<String>,
) -> Result<(), ClassFileErrorKind> {
    let mut r = ByteReader::new(payload);
    let count = r.read_u16()?;
    for _ in 0..count {
        let type_descriptor = pool.utf8(r.read_u16()?)?;
        out.push(annotation_type_name(type_descriptor));
        skip_element_value_pairs(&mut r, pool)?;
    }
    Ok(())
}

fn skip_element_value_pairs(
    r: &mut ByteReader<'_>,
    pool: &ConstantPool,
) -> Result<(), ClassFileErrorKind> {
    let pairs = r.read_u16()?;
    for _ in 0..pairs {
        let _element_name = r.read_u16()?;
        skip_element_value(r, pool)?;
    }
    Ok(())
}

/// Skip one element_value. Annotation values are not compared, but the
/// recursive structure must still be walked to reach sibling annotations.
fn skip_element_value(
    r: &mut ByteReader<'_>,
    pool: &ConstantPool,
) -> Result<(), ClassFileErrorKind> {
    let tag = r.read_u8()?;
    match tag {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b's' | b'c' => r.skip(2),
        b'e' => r.skip(4),
        b'@' => {
            let _type_index = r.read_u16()?;
            skip_element_value_pairs(r, pool)
        }
        b'[' => {
            let count = r.read_u16()?;
            for _ in 0..count {
                skip_element_value(r, pool)?;
            }
            Ok(())
        }
        _ => Err(ClassFileErrorKind::BadAnnotationTag { tag }),
    }
}

fn resolve_constant_value(
    pool: &ConstantPool,
    index: u16,
) -> Result<ConstantValue, ClassFileErrorKind> {
    match pool.get(index)? {
        Constant::Integer(v) => Ok(ConstantValue::Int(*v)),
        Constant::Long(v) => Ok(ConstantValue::Long(*v)),
        Constant::Float(v) => Ok(ConstantValue::Float(*v)),
        Constant::Double(v) => Ok(ConstantValue::Double(*v)),
        Constant::String(string_index) => Ok(ConstantValue::Str(pool.utf8(*string_index)?.to_string())),
        _ => Err(ClassFileErrorKind::WrongConstantKind {
            index,
            expected: "loadable constant",
        }),
    }
}

/// Convert the class-file internal (slash-separated) form to the canonical
/// dot-separated form.
fn internal_to_dot(internal: &str) -> String {
    internal.replace('/', ".")
}

/// Convert an annotation type descriptor (`Lcom/foo/Bar;`) to a dot name.
fn annotation_type_name(descriptor: &str) -> String {
    descriptor
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
        .map_or_else(|| internal_to_dot(descriptor), internal_to_dot)
}
