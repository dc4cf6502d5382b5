//! This crate contains a direct binary representation of a class file, for writing only.
//!
//! It's meant for building test inputs, so no format checking is done when creating a `Vec<u8>`: any index,
//! length or tag can be written, including ones a reader has to reject.
//!
//! The [PoolBuilder] hands out constant pool indices, so that the class can be built without counting:
//! ```
//! use raw_class_file::{AttributeInfo, ClassFile, FieldInfo, flags, PoolBuilder};
//!
//! let mut pool = PoolBuilder::new();
//! let this_class = pool.class("org/example/Limits");
//! let super_class = pool.class("java/lang/Object");
//! let name = pool.utf8("MAX");
//! let descriptor = pool.utf8("J");
//! let constant_value = pool.utf8("ConstantValue");
//! let max = pool.long(i64::MAX);
//! assert_eq!(pool.next_index(), max + 2);
//!
//! let class = ClassFile {
//!     minor_version: 3,
//!     major_version: 45,
//!     constant_pool: pool.build(),
//!     access_flags: flags::ACC_PUBLIC | flags::ACC_SUPER,
//!     this_class,
//!     super_class,
//!     interfaces: vec![],
//!     fields: vec![FieldInfo {
//!         access_flags: flags::ACC_PUBLIC | flags::ACC_STATIC | flags::ACC_FINAL,
//!         name_index: name,
//!         descriptor_index: descriptor,
//!         attributes: vec![AttributeInfo::ConstantValue { attribute_name_index: constant_value, constantvalue_index: max }],
//!     }],
//!     methods: vec![],
//!     attributes: vec![],
//! };
//!
//! let bytes = class.to_bytes();
//! assert_eq!(bytes.len(), class.length());
//! assert_eq!(&bytes[..4], &0xCAFEBABEu32.to_be_bytes());
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

pub const MAGIC: u32 = 0xCAFEBABE;

pub mod flags {
	pub const ACC_PUBLIC: u16       = 0x0001; // class, field, method, inner class
	pub const ACC_PRIVATE: u16      = 0x0002; // field, method, inner class
	pub const ACC_PROTECTED: u16    = 0x0004; // field, method, inner class
	pub const ACC_STATIC: u16       = 0x0008; // field, method, inner class
	pub const ACC_FINAL: u16        = 0x0010; // class, field, method, inner class
	pub const ACC_SUPER: u16        = 0x0020; // class
	pub const ACC_SYNCHRONIZED: u16 = 0x0020; // method
	pub const ACC_VOLATILE: u16     = 0x0040; // field
	pub const ACC_TRANSIENT: u16    = 0x0080; // field
	pub const ACC_NATIVE: u16       = 0x0100; // method
	pub const ACC_INTERFACE: u16    = 0x0200; // class, inner class
	pub const ACC_ABSTRACT: u16     = 0x0400; // class, method, inner class
	pub const ACC_STRICT: u16       = 0x0800; // method
}

/// The tags of the constant pool entries.
pub mod tag {
	pub const UTF8: u8 = 1;
	pub const INTEGER: u8 = 3;
	pub const FLOAT: u8 = 4;
	pub const LONG: u8 = 5;
	pub const DOUBLE: u8 = 6;
	pub const CLASS: u8 = 7;
	pub const STRING: u8 = 8;
	pub const FIELD_REF: u8 = 9;
	pub const METHOD_REF: u8 = 10;
	pub const INTERFACE_METHOD_REF: u8 = 11;
	pub const NAME_AND_TYPE: u8 = 12;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
	pub minor_version: u16,
	pub major_version: u16,
	/// The entries, in order. [CpInfo::Long] and [CpInfo::Double] take up two indices, see [ClassFile::constant_pool_count].
	pub constant_pool: Vec<CpInfo>,
	pub access_flags: u16,
	pub this_class: u16,
	pub super_class: u16,
	pub interfaces: Vec<u16>,
	pub fields: Vec<FieldInfo>,
	pub methods: Vec<MethodInfo>,
	pub attributes: Vec<AttributeInfo>,
}

impl ClassFile {
	/// The value written as `constant_pool_count`.
	pub fn constant_pool_count(&self) -> u16 {
		1 + self.constant_pool.iter().map(CpInfo::slots).sum::<u16>()
	}

	/// Converts the class file to binary representation.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut vec = Vec::new();
		self.write_to(&mut vec);
		vec
	}

	pub fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
		writer.write_all(&self.to_bytes())
	}

	/// The length of the class file produced by [`Self::to_bytes`], in bytes.
	pub fn length(&self) -> usize {
		4 + 2 + 2 + 2
			+ self.constant_pool.iter().map(CpInfo::length).sum::<usize>()
			+ 2 + 2 + 2
			+ 2 + 2 * self.interfaces.len()
			+ 2 + self.fields.iter().map(FieldInfo::length).sum::<usize>()
			+ 2 + self.methods.iter().map(MethodInfo::length).sum::<usize>()
			+ attributes_length(&self.attributes)
	}

	fn write_to(&self, out: &mut Vec<u8>) {
		put_u32(out, MAGIC);
		put_u16(out, self.minor_version);
		put_u16(out, self.major_version);
		put_u16(out, self.constant_pool_count());
		for entry in &self.constant_pool {
			entry.write_to(out);
		}
		put_u16(out, self.access_flags);
		put_u16(out, self.this_class);
		put_u16(out, self.super_class);
		put_u16(out, self.interfaces.len() as u16);
		for interface in &self.interfaces {
			put_u16(out, *interface);
		}
		put_u16(out, self.fields.len() as u16);
		for field in &self.fields {
			field.write_to(out);
		}
		put_u16(out, self.methods.len() as u16);
		for method in &self.methods {
			method.write_to(out);
		}
		write_attributes(out, &self.attributes);
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum CpInfo {
	Utf8 { bytes: Vec<u8> },
	Integer { bytes: u32 },
	Float { bytes: u32 },
	Long { high_bytes: u32, low_bytes: u32 },
	Double { high_bytes: u32, low_bytes: u32 },
	Class { name_index: u16 },
	String { string_index: u16 },
	Fieldref { class_index: u16, name_and_type_index: u16 },
	Methodref { class_index: u16, name_and_type_index: u16 },
	InterfaceMethodref { class_index: u16, name_and_type_index: u16 },
	NameAndType { name_index: u16, descriptor_index: u16 },
	/// Any tag followed by any bytes, for entries a reader doesn't know.
	Raw { tag: u8, info: Vec<u8> },
}

impl CpInfo {
	/// The number of constant pool indices this entry takes up.
	pub fn slots(&self) -> u16 {
		match self {
			CpInfo::Long { .. } | CpInfo::Double { .. } => 2,
			_ => 1,
		}
	}

	fn length(&self) -> usize {
		1 + match self {
			CpInfo::Utf8 { bytes } => 2 + bytes.len(),
			CpInfo::Integer { .. } | CpInfo::Float { .. } => 4,
			CpInfo::Long { .. } | CpInfo::Double { .. } => 8,
			CpInfo::Class { .. } | CpInfo::String { .. } => 2,
			CpInfo::Fieldref { .. } | CpInfo::Methodref { .. } | CpInfo::InterfaceMethodref { .. } | CpInfo::NameAndType { .. } => 4,
			CpInfo::Raw { info, .. } => info.len(),
		}
	}

	fn write_to(&self, out: &mut Vec<u8>) {
		match self {
			CpInfo::Utf8 { bytes } => {
				out.push(tag::UTF8);
				put_u16(out, bytes.len() as u16);
				out.extend_from_slice(bytes);
			},
			CpInfo::Integer { bytes } => {
				out.push(tag::INTEGER);
				put_u32(out, *bytes);
			},
			CpInfo::Float { bytes } => {
				out.push(tag::FLOAT);
				put_u32(out, *bytes);
			},
			CpInfo::Long { high_bytes, low_bytes } => {
				out.push(tag::LONG);
				put_u32(out, *high_bytes);
				put_u32(out, *low_bytes);
			},
			CpInfo::Double { high_bytes, low_bytes } => {
				out.push(tag::DOUBLE);
				put_u32(out, *high_bytes);
				put_u32(out, *low_bytes);
			},
			CpInfo::Class { name_index } => {
				out.push(tag::CLASS);
				put_u16(out, *name_index);
			},
			CpInfo::String { string_index } => {
				out.push(tag::STRING);
				put_u16(out, *string_index);
			},
			CpInfo::Fieldref { class_index, name_and_type_index } => {
				out.push(tag::FIELD_REF);
				put_u16(out, *class_index);
				put_u16(out, *name_and_type_index);
			},
			CpInfo::Methodref { class_index, name_and_type_index } => {
				out.push(tag::METHOD_REF);
				put_u16(out, *class_index);
				put_u16(out, *name_and_type_index);
			},
			CpInfo::InterfaceMethodref { class_index, name_and_type_index } => {
				out.push(tag::INTERFACE_METHOD_REF);
				put_u16(out, *class_index);
				put_u16(out, *name_and_type_index);
			},
			CpInfo::NameAndType { name_index, descriptor_index } => {
				out.push(tag::NAME_AND_TYPE);
				put_u16(out, *name_index);
				put_u16(out, *descriptor_index);
			},
			CpInfo::Raw { tag, info } => {
				out.push(*tag);
				out.extend_from_slice(info);
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
	pub access_flags: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: Vec<AttributeInfo>,
}

impl FieldInfo {
	fn length(&self) -> usize {
		6 + attributes_length(&self.attributes)
	}

	fn write_to(&self, out: &mut Vec<u8>) {
		put_u16(out, self.access_flags);
		put_u16(out, self.name_index);
		put_u16(out, self.descriptor_index);
		write_attributes(out, &self.attributes);
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
	pub access_flags: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: Vec<AttributeInfo>,
}

impl MethodInfo {
	fn length(&self) -> usize {
		6 + attributes_length(&self.attributes)
	}

	fn write_to(&self, out: &mut Vec<u8>) {
		put_u16(out, self.access_flags);
		put_u16(out, self.name_index);
		put_u16(out, self.descriptor_index);
		write_attributes(out, &self.attributes);
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionTableEntry {
	pub start_pc: u16,
	pub end_pc: u16,
	pub handler_pc: u16,
	pub catch_type: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassesEntry {
	pub inner_class_info_index: u16,
	pub outer_class_info_index: u16,
	pub inner_name_index: u16,
	pub inner_class_access_flags: u16,
}

/// An attribute. The `attribute_length` is always computed from the content, use [AttributeInfo::Other]
/// to write a wrong one.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeInfo {
	ConstantValue {
		attribute_name_index: u16,
		constantvalue_index: u16,
	},
	Code {
		attribute_name_index: u16,
		max_stack: u16,
		max_locals: u16,
		code: Vec<u8>,
		exception_table: Vec<ExceptionTableEntry>,
		attributes: Vec<AttributeInfo>,
	},
	Exceptions {
		attribute_name_index: u16,
		exception_index_table: Vec<u16>,
	},
	InnerClasses {
		attribute_name_index: u16,
		classes: Vec<InnerClassesEntry>,
	},
	SourceFile {
		attribute_name_index: u16,
		sourcefile_index: u16,
	},
	Deprecated {
		attribute_name_index: u16,
	},
	Other {
		attribute_name_index: u16,
		info: Vec<u8>,
	},
}

impl AttributeInfo {
	/// The value written as `attribute_length`.
	pub fn attribute_length(&self) -> usize {
		match self {
			AttributeInfo::ConstantValue { .. } => 2,
			AttributeInfo::Code { code, exception_table, attributes, .. } => {
				2 + 2 + 4 + code.len() + 2 + 8 * exception_table.len() + attributes_length(attributes)
			},
			AttributeInfo::Exceptions { exception_index_table, .. } => 2 + 2 * exception_index_table.len(),
			AttributeInfo::InnerClasses { classes, .. } => 2 + 8 * classes.len(),
			AttributeInfo::SourceFile { .. } => 2,
			AttributeInfo::Deprecated { .. } => 0,
			AttributeInfo::Other { info, .. } => info.len(),
		}
	}

	fn attribute_name_index(&self) -> u16 {
		match self {
			AttributeInfo::ConstantValue { attribute_name_index, .. } |
			AttributeInfo::Code { attribute_name_index, .. } |
			AttributeInfo::Exceptions { attribute_name_index, .. } |
			AttributeInfo::InnerClasses { attribute_name_index, .. } |
			AttributeInfo::SourceFile { attribute_name_index, .. } |
			AttributeInfo::Deprecated { attribute_name_index } |
			AttributeInfo::Other { attribute_name_index, .. } => *attribute_name_index,
		}
	}

	fn write_to(&self, out: &mut Vec<u8>) {
		put_u16(out, self.attribute_name_index());
		put_u32(out, self.attribute_length() as u32);
		match self {
			AttributeInfo::ConstantValue { constantvalue_index, .. } => put_u16(out, *constantvalue_index),
			AttributeInfo::Code { max_stack, max_locals, code, exception_table, attributes, .. } => {
				put_u16(out, *max_stack);
				put_u16(out, *max_locals);
				put_u32(out, code.len() as u32);
				out.extend_from_slice(code);
				put_u16(out, exception_table.len() as u16);
				for entry in exception_table {
					put_u16(out, entry.start_pc);
					put_u16(out, entry.end_pc);
					put_u16(out, entry.handler_pc);
					put_u16(out, entry.catch_type);
				}
				write_attributes(out, attributes);
			},
			AttributeInfo::Exceptions { exception_index_table, .. } => {
				put_u16(out, exception_index_table.len() as u16);
				for index in exception_index_table {
					put_u16(out, *index);
				}
			},
			AttributeInfo::InnerClasses { classes, .. } => {
				put_u16(out, classes.len() as u16);
				for entry in classes {
					put_u16(out, entry.inner_class_info_index);
					put_u16(out, entry.outer_class_info_index);
					put_u16(out, entry.inner_name_index);
					put_u16(out, entry.inner_class_access_flags);
				}
			},
			AttributeInfo::SourceFile { sourcefile_index, .. } => put_u16(out, *sourcefile_index),
			AttributeInfo::Deprecated { .. } => {},
			AttributeInfo::Other { info, .. } => out.extend_from_slice(info),
		}
	}
}

fn attributes_length(attributes: &[AttributeInfo]) -> usize {
	2 + attributes.iter().map(|attribute| 6 + attribute.attribute_length()).sum::<usize>()
}

fn write_attributes(out: &mut Vec<u8>, attributes: &[AttributeInfo]) {
	put_u16(out, attributes.len() as u16);
	for attribute in attributes {
		attribute.write_to(out);
	}
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
	out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
	out.extend_from_slice(&value.to_be_bytes());
}

/// Collects constant pool entries, giving out their indices.
///
/// Equal entries are only added once. Use [PoolBuilder::push] to add an entry unconditionally.
#[derive(Debug, Clone)]
pub struct PoolBuilder {
	/// The index the next entry gets.
	///
	/// We start at `1` and increment this twice for [`CpInfo::Long`] and [`CpInfo::Double`].
	count: u16,
	inner: Vec<CpInfo>,
	map: HashMap<Key, u16>,
}

/// [CpInfo] can't be hashed because of the floats, so entries are looked up by their bytes.
type Key = Vec<u8>;

impl Default for PoolBuilder {
	fn default() -> Self {
		PoolBuilder::new()
	}
}

impl PoolBuilder {
	pub fn new() -> PoolBuilder {
		PoolBuilder {
			count: 1, // first index given out is 1
			inner: Vec::new(),
			map: HashMap::new(),
		}
	}

	/// Adds an entry, even if an equal one exists already, and returns its index.
	pub fn push(&mut self, entry: CpInfo) -> u16 {
		let index = self.count;
		self.count += entry.slots();
		self.inner.push(entry);
		index
	}

	fn put(&mut self, entry: CpInfo) -> u16 {
		let mut key = Vec::new();
		entry.write_to(&mut key);
		match self.map.entry(key) {
			Entry::Occupied(occupied) => *occupied.get(),
			Entry::Vacant(vacant) => {
				let index = self.count;
				self.count += entry.slots();
				self.inner.push(entry);
				vacant.insert(index);
				index
			},
		}
	}

	/// The index the next new entry will get.
	pub fn next_index(&self) -> u16 {
		self.count
	}

	pub fn utf8(&mut self, string: &str) -> u16 {
		self.put(CpInfo::Utf8 { bytes: string.as_bytes().to_vec() })
	}

	/// Takes the internal form of the name, like `java/lang/Object`.
	pub fn class(&mut self, name: &str) -> u16 {
		let name_index = self.utf8(name);
		self.put(CpInfo::Class { name_index })
	}

	pub fn string(&mut self, string: &str) -> u16 {
		let string_index = self.utf8(string);
		self.put(CpInfo::String { string_index })
	}

	pub fn integer(&mut self, value: i32) -> u16 {
		self.put(CpInfo::Integer { bytes: value as u32 })
	}

	pub fn float(&mut self, value: f32) -> u16 {
		self.put(CpInfo::Float { bytes: value.to_bits() })
	}

	pub fn long(&mut self, value: i64) -> u16 {
		let bits = value as u64;
		self.put(CpInfo::Long { high_bytes: (bits >> 32) as u32, low_bytes: bits as u32 })
	}

	pub fn double(&mut self, value: f64) -> u16 {
		let bits = value.to_bits();
		self.put(CpInfo::Double { high_bytes: (bits >> 32) as u32, low_bytes: bits as u32 })
	}

	pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
		let name_index = self.utf8(name);
		let descriptor_index = self.utf8(descriptor);
		self.put(CpInfo::NameAndType { name_index, descriptor_index })
	}

	pub fn field_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
		let class_index = self.class(class);
		let name_and_type_index = self.name_and_type(name, descriptor);
		self.put(CpInfo::Fieldref { class_index, name_and_type_index })
	}

	pub fn method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
		let class_index = self.class(class);
		let name_and_type_index = self.name_and_type(name, descriptor);
		self.put(CpInfo::Methodref { class_index, name_and_type_index })
	}

	pub fn interface_method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
		let class_index = self.class(class);
		let name_and_type_index = self.name_and_type(name, descriptor);
		self.put(CpInfo::InterfaceMethodref { class_index, name_and_type_index })
	}

	pub fn build(self) -> Vec<CpInfo> {
		self.inner
	}
}
