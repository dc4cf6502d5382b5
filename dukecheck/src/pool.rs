//! The constant pool, loaded in two passes.
//!
//! The first pass reads every entry as it's stored, with indices into the pool left as they are. Entries
//! may reference entries further ahead, so nothing can be resolved while reading. The second pass walks
//! the table in ascending order and turns every entry into a [`Constant`], looking up the raw text of the
//! entries it references and validating names and descriptors on the way.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use anyhow::{anyhow, bail, Context, Result};
use log::trace;
use crate::cursor::{ByteCursor, ClassRead};
use crate::descriptor;
use crate::intern::Interner;

mod tag {
	pub(super) const UTF8: u8 = 1;
	pub(super) const INTEGER: u8 = 3;
	pub(super) const FLOAT: u8 = 4;
	pub(super) const LONG: u8 = 5;
	pub(super) const DOUBLE: u8 = 6;
	pub(super) const CLASS: u8 = 7;
	pub(super) const STRING: u8 = 8;
	pub(super) const FIELD_REF: u8 = 9;
	pub(super) const METHOD_REF: u8 = 10;
	pub(super) const INTERFACE_METHOD_REF: u8 = 11;
	pub(super) const NAME_AND_TYPE: u8 = 12;
}

/// An entry as stored in the class file.
#[derive(Debug, Clone, PartialEq)]
enum RawEntry {
	Utf8(Arc<str>),
	Integer(i32),
	Float(f32),
	Long(i64),
	Double(f64),
	Class { name_index: u16 },
	String { string_index: u16 },
	FieldRef { class_index: u16, name_and_type_index: u16 },
	MethodRef { class_index: u16, name_and_type_index: u16 },
	InterfaceMethodRef { class_index: u16, name_and_type_index: u16 },
	NameAndType { name_index: u16, descriptor_index: u16 },
}

/// The kinds of constant pool entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
	Utf8,
	Integer,
	Float,
	Long,
	Double,
	Class,
	String,
	FieldRef,
	MethodRef,
	InterfaceMethodRef,
	NameAndType,
}

/// A field, method or interface method reference, with everything looked up.
///
/// `class` is in dotted form, just like the class names in the `descriptor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
	pub class: Arc<str>,
	pub name: Arc<str>,
	pub descriptor: Arc<str>,
}

/// A resolved constant pool entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
	Utf8(Arc<str>),
	Integer(i32),
	Float(f32),
	Long(i64),
	Double(f64),
	/// The class name, in dotted form (`java.lang.Object`, or `[Ljava.lang.Object;` for arrays).
	Class(Arc<str>),
	String(Arc<str>),
	FieldRef(MemberRef),
	MethodRef(MemberRef),
	InterfaceMethodRef(MemberRef),
	/// The name and the descriptor, as stored.
	NameAndType { name: Arc<str>, descriptor: Arc<str> },
}

impl Constant {
	pub fn kind(&self) -> ConstantKind {
		match self {
			Constant::Utf8(_) => ConstantKind::Utf8,
			Constant::Integer(_) => ConstantKind::Integer,
			Constant::Float(_) => ConstantKind::Float,
			Constant::Long(_) => ConstantKind::Long,
			Constant::Double(_) => ConstantKind::Double,
			Constant::Class(_) => ConstantKind::Class,
			Constant::String(_) => ConstantKind::String,
			Constant::FieldRef(_) => ConstantKind::FieldRef,
			Constant::MethodRef(_) => ConstantKind::MethodRef,
			Constant::InterfaceMethodRef(_) => ConstantKind::InterfaceMethodRef,
			Constant::NameAndType { .. } => ConstantKind::NameAndType,
		}
	}
}

/// The resolved constant pool of a class file.
///
/// Index `0` is never valid, and neither is the slot after a `Long` or `Double` entry.
#[derive(Clone, PartialEq)]
pub struct ConstantPool {
	entries: Vec<Option<Constant>>,
}

impl Default for ConstantPool {
	fn default() -> Self {
		ConstantPool { entries: vec![None] }
	}
}

impl ConstantPool {
	pub(crate) fn read(reader: &mut ByteCursor<'_>, interner: &dyn Interner) -> Result<ConstantPool> {
		let raw = read_raw(reader, interner)?;
		trace!("read {} constant pool slots", raw.len());

		let entries = raw.iter()
			.enumerate()
			.map(|(index, entry)| {
				entry.as_ref()
					.map(|entry| {
						resolve(&raw, entry, interner)
							.with_context(|| anyhow!("invalid constant pool item #{index}"))
					})
					.transpose()
			})
			.collect::<Result<_>>()?;

		Ok(ConstantPool { entries })
	}

	/// The number of slots, including the unused slot `0`.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.len() <= 1
	}

	pub fn get(&self, index: u16) -> Result<&Constant> {
		self.entries.get(index as usize)
			.and_then(Option::as_ref)
			.ok_or_else(|| anyhow!("bad constant pool index #{index}"))
	}

	pub fn constant_kind(&self, index: u16) -> Result<ConstantKind> {
		Ok(self.get(index)?.kind())
	}

	pub fn get_utf8(&self, index: u16) -> Result<&Arc<str>> {
		match self.get(index)? {
			Constant::Utf8(string) => Ok(string),
			other => bail!("constant pool item #{index} is not Utf8, but {:?}", other.kind()),
		}
	}

	/// Gets the dotted class name of the `Class` entry at `index`.
	pub fn get_class(&self, index: u16) -> Result<&Arc<str>> {
		match self.get(index)? {
			Constant::Class(name) => Ok(name),
			other => bail!("constant pool item #{index} is not Class, but {:?}", other.kind()),
		}
	}

	/// Like [`ConstantPool::get_class`], but `0` gives `None`.
	pub fn get_optional_class(&self, index: u16) -> Result<Option<&Arc<str>>> {
		if index == 0 {
			Ok(None)
		} else {
			self.get_class(index).map(Some)
		}
	}

	pub fn get_string(&self, index: u16) -> Result<&Arc<str>> {
		match self.get(index)? {
			Constant::String(string) => Ok(string),
			other => bail!("constant pool item #{index} is not String, but {:?}", other.kind()),
		}
	}

	pub fn get_integer(&self, index: u16) -> Result<i32> {
		match self.get(index)? {
			Constant::Integer(value) => Ok(*value),
			other => bail!("constant pool item #{index} is not Integer, but {:?}", other.kind()),
		}
	}

	pub fn get_float(&self, index: u16) -> Result<f32> {
		match self.get(index)? {
			Constant::Float(value) => Ok(*value),
			other => bail!("constant pool item #{index} is not Float, but {:?}", other.kind()),
		}
	}

	pub fn get_long(&self, index: u16) -> Result<i64> {
		match self.get(index)? {
			Constant::Long(value) => Ok(*value),
			other => bail!("constant pool item #{index} is not Long, but {:?}", other.kind()),
		}
	}

	pub fn get_double(&self, index: u16) -> Result<f64> {
		match self.get(index)? {
			Constant::Double(value) => Ok(*value),
			other => bail!("constant pool item #{index} is not Double, but {:?}", other.kind()),
		}
	}

	pub fn get_field_ref(&self, index: u16) -> Result<&MemberRef> {
		match self.get(index)? {
			Constant::FieldRef(member) => Ok(member),
			other => bail!("constant pool item #{index} is not FieldRef, but {:?}", other.kind()),
		}
	}

	pub fn get_method_ref(&self, index: u16) -> Result<&MemberRef> {
		match self.get(index)? {
			Constant::MethodRef(member) => Ok(member),
			other => bail!("constant pool item #{index} is not MethodRef, but {:?}", other.kind()),
		}
	}

	pub fn get_interface_method_ref(&self, index: u16) -> Result<&MemberRef> {
		match self.get(index)? {
			Constant::InterfaceMethodRef(member) => Ok(member),
			other => bail!("constant pool item #{index} is not InterfaceMethodRef, but {:?}", other.kind()),
		}
	}

	/// Gets the name and the descriptor of the `NameAndType` entry at `index`.
	pub fn get_name_and_type(&self, index: u16) -> Result<(&Arc<str>, &Arc<str>)> {
		match self.get(index)? {
			Constant::NameAndType { name, descriptor } => Ok((name, descriptor)),
			other => bail!("constant pool item #{index} is not NameAndType, but {:?}", other.kind()),
		}
	}
}

impl Debug for ConstantPool {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries(self.entries.iter()
				.enumerate()
				.filter_map(|(index, entry)| entry.as_ref().map(|entry| (index, entry)))
			)
			.finish()
	}
}

/// First pass: read the entries as they are stored.
fn read_raw(reader: &mut ByteCursor<'_>, interner: &dyn Interner) -> Result<Vec<Option<RawEntry>>> {
	let count = reader.read_u16_as_usize()?;

	let mut pool = Vec::with_capacity(count.max(1));
	pool.push(None);

	while pool.len() < count {
		let index = pool.len();
		let entry = match reader.read_u8()? {
			tag::UTF8 => {
				let length = reader.read_u16_as_usize()?;
				let bytes = reader.take(length)?;
				let string = cesu8::from_java_cesu8(bytes)
					.map_err(|_| anyhow!("malformed modified utf-8 text at pool index {index}"))?;
				RawEntry::Utf8(interner.intern(&string))
			},
			tag::INTEGER => RawEntry::Integer(reader.read_i32()?),
			tag::FLOAT => RawEntry::Float(reader.read_f32()?),
			tag::LONG => RawEntry::Long(reader.read_i64()?),
			tag::DOUBLE => RawEntry::Double(reader.read_f64()?),
			tag::CLASS => RawEntry::Class { name_index: reader.read_u16()? },
			tag::STRING => RawEntry::String { string_index: reader.read_u16()? },
			tag::FIELD_REF => RawEntry::FieldRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::METHOD_REF => RawEntry::MethodRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::INTERFACE_METHOD_REF => RawEntry::InterfaceMethodRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag::NAME_AND_TYPE => RawEntry::NameAndType {
				name_index: reader.read_u16()?,
				descriptor_index: reader.read_u16()?,
			},
			tag => bail!("illegal constant pool type 0x{tag:02X} at pool index {index}"),
		};

		let is_wide = matches!(entry, RawEntry::Long(_) | RawEntry::Double(_));
		pool.push(Some(entry));
		// long and double take up two slots, the second one stays empty
		if is_wide && pool.len() < count {
			pool.push(None);
		}
	}

	Ok(pool)
}

fn raw_utf8(raw: &[Option<RawEntry>], index: u16) -> Result<&Arc<str>> {
	match raw.get(index as usize) {
		Some(Some(RawEntry::Utf8(string))) => Ok(string),
		Some(Some(other)) => bail!("bad constant pool index #{index}: expected Utf8, got {other:?}"),
		_ => bail!("bad constant pool index #{index}"),
	}
}

/// Validates the internal name at `name_index` and returns its dotted form.
fn resolve_class_name(raw: &[Option<RawEntry>], name_index: u16, interner: &dyn Interner) -> Result<Arc<str>> {
	let name = raw_utf8(raw, name_index)?;
	if !descriptor::is_valid_class_name(name) {
		bail!("invalid class name {name:?}");
	}
	Ok(interner.intern(&descriptor::to_dotted(name)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberKind {
	Field,
	Method,
}

fn resolve_member(
	raw: &[Option<RawEntry>],
	class_index: u16,
	name_and_type_index: u16,
	kind: MemberKind,
	interner: &dyn Interner,
) -> Result<MemberRef> {
	let class = match raw.get(class_index as usize) {
		Some(Some(RawEntry::Class { name_index })) => resolve_class_name(raw, *name_index, interner)?,
		_ => bail!("bad index in constant pool: #{class_index} is not a Class"),
	};
	let (name_index, descriptor_index) = match raw.get(name_and_type_index as usize) {
		Some(Some(RawEntry::NameAndType { name_index, descriptor_index })) => (*name_index, *descriptor_index),
		_ => bail!("bad index in constant pool: #{name_and_type_index} is not a NameAndType"),
	};

	let name = raw_utf8(raw, name_index)?;
	let descriptor = raw_utf8(raw, descriptor_index)?;

	match kind {
		MemberKind::Field => {
			if !descriptor::is_valid_field_descriptor(descriptor) {
				bail!("invalid field signature {descriptor:?}");
			}
			if !descriptor::is_valid_identifier(name) {
				bail!("invalid field name {name:?}");
			}
		},
		MemberKind::Method => {
			if !descriptor::is_valid_method_descriptor(descriptor) {
				bail!("invalid method signature {descriptor:?}");
			}
			if descriptor::is_special_method_name(name) {
				if !descriptor::returns_void(descriptor) {
					bail!("method {name:?} must return void, but has signature {descriptor:?}");
				}
			} else if !descriptor::is_valid_identifier(name) {
				bail!("invalid method name {name:?}");
			}
		},
	}

	Ok(MemberRef {
		class,
		name: name.clone(),
		descriptor: interner.intern(&descriptor::to_dotted(descriptor)),
	})
}

/// Second pass: resolve one entry against the fully read table.
fn resolve(raw: &[Option<RawEntry>], entry: &RawEntry, interner: &dyn Interner) -> Result<Constant> {
	Ok(match entry {
		RawEntry::Utf8(string) => Constant::Utf8(string.clone()),
		RawEntry::Integer(value) => Constant::Integer(*value),
		RawEntry::Float(value) => Constant::Float(*value),
		RawEntry::Long(value) => Constant::Long(*value),
		RawEntry::Double(value) => Constant::Double(*value),
		RawEntry::Class { name_index } => Constant::Class(resolve_class_name(raw, *name_index, interner)?),
		RawEntry::String { string_index } => Constant::String(raw_utf8(raw, *string_index)?.clone()),
		RawEntry::FieldRef { class_index, name_and_type_index } =>
			Constant::FieldRef(resolve_member(raw, *class_index, *name_and_type_index, MemberKind::Field, interner)?),
		RawEntry::MethodRef { class_index, name_and_type_index } =>
			Constant::MethodRef(resolve_member(raw, *class_index, *name_and_type_index, MemberKind::Method, interner)?),
		RawEntry::InterfaceMethodRef { class_index, name_and_type_index } =>
			Constant::InterfaceMethodRef(resolve_member(raw, *class_index, *name_and_type_index, MemberKind::Method, interner)?),
		RawEntry::NameAndType { name_index, descriptor_index } => Constant::NameAndType {
			name: raw_utf8(raw, *name_index)?.clone(),
			descriptor: raw_utf8(raw, *descriptor_index)?.clone(),
		},
	})
}
