//! Test fixture builders: synthesize class-file payloads and in-memory
//! ZIP archives so integration tests can exercise the whole pipeline
//! without binary fixtures on disk.

use std::collections::HashMap;
use std::io::{Cursor, Write};

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SUPER: u16 = 0x0020;

// ============================================================================
// Constant pool assembly
// ============================================================================

#[derive(Default)]
struct PoolBuilder {
    entries: Vec<Vec<u8>>,
    utf8_cache: HashMap<String, u16>,
    class_cache: HashMap<String, u16>,
}

impl PoolBuilder {
    fn next_index(&self) -> u16 {
        (self.entries.len() + 1) as u16
    }

    fn utf8(&mut self, s: &str) -> u16 {
        if let Some(&idx) = self.utf8_cache.get(s) {
            return idx;
        }
        let mut entry = vec![1u8];
        entry.extend_from_slice(&(s.len() as u16).to_be_bytes());
        entry.extend_from_slice(s.as_bytes());
        let idx = self.next_index();
        self.entries.push(entry);
        self.utf8_cache.insert(s.to_string(), idx);
        idx
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(&idx) = self.class_cache.get(internal_name) {
            return idx;
        }
        let name_idx = self.utf8(internal_name);
        let mut entry = vec![7u8];
        entry.extend_from_slice(&name_idx.to_be_bytes());
        let idx = self.next_index();
        self.entries.push(entry);
        self.class_cache.insert(internal_name.to_string(), idx);
        idx
    }

    fn integer(&mut self, v: i32) -> u16 {
        let mut entry = vec![3u8];
        entry.extend_from_slice(&v.to_be_bytes());
        let idx = self.next_index();
        self.entries.push(entry);
        idx
    }

    fn long(&mut self, v: i64) -> u16 {
        let mut entry = vec![5u8];
        entry.extend_from_slice(&v.to_be_bytes());
        let idx = self.next_index();
        self.entries.push(entry);
        // Wide entries occupy two slots
        self.entries.push(Vec::new());
        idx
    }

    fn count(&self) -> u16 {
        (self.entries.len() + 1) as u16
    }

    fn bytes(&self) -> Vec<u8> {
        self.entries.concat()
    }
}

// ============================================================================
// Class-file builder
// ============================================================================

#[derive(Clone)]
struct MemberDef {
    name: String,
    descriptor: String,
    access: u16,
    /// Annotation type descriptors, e.g. "Lpkg/Stable;"
    annotations: Vec<String>,
    /// Thrown exception internal names (methods only)
    exceptions: Vec<String>,
    /// Integer ConstantValue (fields only)
    const_int: Option<i32>,
    /// Long ConstantValue (fields only)
    const_long: Option<i64>,
}

impl MemberDef {
    fn new(name: &str, descriptor: &str, access: u16) -> Self {
        Self {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access,
            annotations: Vec::new(),
            exceptions: Vec::new(),
            const_int: None,
            const_long: None,
        }
    }
}

/// Builds a minimal but well-formed class-file payload.
pub struct ClassFileBuilder {
    name: String,
    access: u16,
    super_name: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<MemberDef>,
    methods: Vec<MemberDef>,
    annotations: Vec<String>,
}

impl ClassFileBuilder {
    /// `internal_name` uses slash separators, e.g. "pkg/A".
    pub fn new(internal_name: &str) -> Self {
        Self {
            name: internal_name.to_string(),
            access: ACC_PUBLIC | ACC_SUPER,
            super_name: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn access(mut self, access: u16) -> Self {
        self.access = access;
        self
    }

    pub fn superclass(mut self, internal_name: &str) -> Self {
        self.super_name = Some(internal_name.to_string());
        self
    }

    pub fn no_superclass(mut self) -> Self {
        self.super_name = None;
        self
    }

    pub fn interface(mut self, internal_name: &str) -> Self {
        self.interfaces.push(internal_name.to_string());
        self
    }

    pub fn method(mut self, name: &str, descriptor: &str, access: u16) -> Self {
        self.methods.push(MemberDef::new(name, descriptor, access));
        self
    }

    pub fn method_annotated(
        mut self,
        name: &str,
        descriptor: &str,
        access: u16,
        annotation_descriptors: &[&str],
    ) -> Self {
        let mut def = MemberDef::new(name, descriptor, access);
        def.annotations = annotation_descriptors.iter().map(|s| s.to_string()).collect();
        self.methods.push(def);
        self
    }

    pub fn method_throws(
        mut self,
        name: &str,
        descriptor: &str,
        access: u16,
        exceptions: &[&str],
    ) -> Self {
        let mut def = MemberDef::new(name, descriptor, access);
        def.exceptions = exceptions.iter().map(|s| s.to_string()).collect();
        self.methods.push(def);
        self
    }

    pub fn field(mut self, name: &str, descriptor: &str, access: u16) -> Self {
        self.fields.push(MemberDef::new(name, descriptor, access));
        self
    }

    pub fn field_annotated(
        mut self,
        name: &str,
        descriptor: &str,
        access: u16,
        annotation_descriptors: &[&str],
    ) -> Self {
        let mut def = MemberDef::new(name, descriptor, access);
        def.annotations = annotation_descriptors.iter().map(|s| s.to_string()).collect();
        self.fields.push(def);
        self
    }

    pub fn field_const_int(mut self, name: &str, descriptor: &str, access: u16, value: i32) -> Self {
        let mut def = MemberDef::new(name, descriptor, access);
        def.const_int = Some(value);
        self.fields.push(def);
        self
    }

    pub fn field_const_long(mut self, name: &str, descriptor: &str, access: u16, value: i64) -> Self {
        let mut def = MemberDef::new(name, descriptor, access);
        def.const_long = Some(value);
        self.fields.push(def);
        self
    }

    pub fn annotation(mut self, descriptor: &str) -> Self {
        self.annotations.push(descriptor.to_string());
        self
    }

    /// Assemble the payload.
    pub fn build(self) -> Vec<u8> {
        let mut pool = PoolBuilder::default();

        let this_class = pool.class(&self.name);
        let super_class = self.super_name.as_deref().map(|s| pool.class(s)).unwrap_or(0);
        let interface_indices: Vec<u16> =
            self.interfaces.iter().map(|i| pool.class(i)).collect();

        let field_blobs: Vec<Vec<u8>> = self
            .fields
            .iter()
            .map(|f| encode_member(f, &mut pool, false))
            .collect();
        let method_blobs: Vec<Vec<u8>> = self
            .methods
            .iter()
            .map(|m| encode_member(m, &mut pool, true))
            .collect();

        let class_attrs = encode_annotation_attr(&self.annotations, &mut pool);

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // minor
        out.extend_from_slice(&52u16.to_be_bytes()); // major (Java 8)
        out.extend_from_slice(&pool.count().to_be_bytes());
        out.extend_from_slice(&pool.bytes());
        out.extend_from_slice(&self.access.to_be_bytes());
        out.extend_from_slice(&this_class.to_be_bytes());
        out.extend_from_slice(&super_class.to_be_bytes());
        out.extend_from_slice(&(interface_indices.len() as u16).to_be_bytes());
        for idx in interface_indices {
            out.extend_from_slice(&idx.to_be_bytes());
        }
        out.extend_from_slice(&(field_blobs.len() as u16).to_be_bytes());
        for blob in field_blobs {
            out.extend_from_slice(&blob);
        }
        out.extend_from_slice(&(method_blobs.len() as u16).to_be_bytes());
        for blob in method_blobs {
            out.extend_from_slice(&blob);
        }
        out.extend_from_slice(&(class_attrs.len() as u16).to_be_bytes());
        for (name_idx, payload) in class_attrs {
            out.extend_from_slice(&name_idx.to_be_bytes());
            out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            out.extend_from_slice(&payload);
        }
        out
    }
}

fn encode_member(def: &MemberDef, pool: &mut PoolBuilder, is_method: bool) -> Vec<u8> {
    let name_idx = pool.utf8(&def.name);
    let desc_idx = pool.utf8(&def.descriptor);

    let mut attrs: Vec<(u16, Vec<u8>)> = Vec::new();

    if is_method && !def.exceptions.is_empty() {
        let attr_name = pool.utf8("Exceptions");
        let mut payload = (def.exceptions.len() as u16).to_be_bytes().to_vec();
        for exception in &def.exceptions {
            payload.extend_from_slice(&pool.class(exception).to_be_bytes());
        }
        attrs.push((attr_name, payload));
    }

    if let Some(v) = def.const_int {
        let attr_name = pool.utf8("ConstantValue");
        let value_idx = pool.integer(v);
        attrs.push((attr_name, value_idx.to_be_bytes().to_vec()));
    }
    if let Some(v) = def.const_long {
        let attr_name = pool.utf8("ConstantValue");
        let value_idx = pool.long(v);
        attrs.push((attr_name, value_idx.to_be_bytes().to_vec()));
    }

    attrs.extend(encode_annotation_attr(&def.annotations, pool));

    let mut out = Vec::new();
    out.extend_from_slice(&def.access.to_be_bytes());
    out.extend_from_slice(&name_idx.to_be_bytes());
    out.extend_from_slice(&desc_idx.to_be_bytes());
    out.extend_from_slice(&(attrs.len() as u16).to_be_bytes());
    for (attr_name_idx, payload) in attrs {
        out.extend_from_slice(&attr_name_idx.to_be_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&payload);
    }
    out
}

fn encode_annotation_attr(descriptors: &[String], pool: &mut PoolBuilder) -> Vec<(u16, Vec<u8>)> {
    if descriptors.is_empty() {
        return Vec::new();
    }
    let attr_name = pool.utf8("RuntimeVisibleAnnotations");
    let mut payload = (descriptors.len() as u16).to_be_bytes().to_vec();
    for descriptor in descriptors {
        payload.extend_from_slice(&pool.utf8(descriptor).to_be_bytes());
        payload.extend_from_slice(&0u16.to_be_bytes()); // no element-value pairs
    }
    vec![(attr_name, payload)]
}

// ============================================================================
// Archive assembly
// ============================================================================

/// Build an in-memory ZIP archive from (entry name, payload) pairs.
pub fn build_jar(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, data) in entries {
        writer
            .start_file(name.to_string(), options)
            .expect("start zip entry");
        writer.write_all(data).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Build a jar containing the given class payloads under conventional
/// entry names derived from each class's internal name.
pub fn jar_of_classes(classes: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let named: Vec<(String, &[u8])> = classes
        .iter()
        .map(|(internal, data)| (format!("{internal}.class"), data.as_slice()))
        .collect();
    let refs: Vec<(&str, &[u8])> = named.iter().map(|(n, d)| (n.as_str(), *d)).collect();
    build_jar(&refs)
}
