use std::sync::Arc;
use anyhow::{anyhow, bail, Context, Result};
use fnv::FnvHashSet;
use log::{debug, trace, warn};
use crate::access::{ClassAccess, FieldAccess, InnerClassAccess, MethodAccess};
use crate::class::{ClassFile, ConstantValue, Field, InnerClass, JAVA_LANG_OBJECT, Method, MethodBody};
use crate::code::read_code;
use crate::cursor::{ByteCursor, ClassRead};
use crate::descriptor::{self, CLINIT, INIT};
use crate::error::ClassFileError;
use crate::intern::Interner;
use crate::options::ReadOptions;
use crate::pool::{Constant, ConstantPool};
use crate::version::Version;

pub const MAGIC: u32 = 0xCAFEBABE;

/// The names of the attributes that aren't skipped.
pub mod attribute {
	pub const CODE: &str = "Code";
	pub const CONSTANT_VALUE: &str = "ConstantValue";
	pub const DEPRECATED: &str = "Deprecated";
	pub const EXCEPTIONS: &str = "Exceptions";
	pub const INNER_CLASSES: &str = "InnerClasses";
	pub const SOURCE_FILE: &str = "SourceFile";
	/// Marks class files generated from assemblies by the IKVM.NET tools, holding the assembly name.
	pub const ORIGIN: &str = "IKVM.NET.Assembly";
}

/// Reads the `attribute_name_index` and `attribute_length` items.
fn read_attribute_header<'p>(reader: &mut ByteCursor<'_>, pool: &'p ConstantPool) -> Result<(&'p Arc<str>, usize)> {
	let name_index = reader.read_u16()?;
	let name = pool.get_utf8(name_index)
		.with_context(|| anyhow!("bad attribute name index #{name_index}"))?;
	let length = reader.read_u32_as_usize()?;
	Ok((name, length))
}

/// Skips the `attributes_count` and `attributes` items, still checking that every attribute has a name.
pub(crate) fn skip_attributes(reader: &mut ByteCursor<'_>, pool: &ConstantPool) -> Result<()> {
	let attributes_count = reader.read_u16()?;

	for _ in 0..attributes_count {
		let (_, length) = read_attribute_header(reader, pool)?;
		reader.skip(length)?;
	}

	Ok(())
}

fn expect_length(attribute: &str, length: usize, expected: usize) -> Result<()> {
	if length != expected {
		bail!("{attribute} attribute has incorrect length {length}, expected {expected}");
	}
	Ok(())
}

/// Reads class files into [`ClassFile`]s.
///
/// A reader holds no state of its own apart from the configuration, so one reader can be used from many threads
/// at once if the interner allows it.
#[derive(Clone, Copy)]
pub struct ClassFileReader<'i> {
	options: ReadOptions,
	interner: &'i dyn Interner,
}

impl<'i> ClassFileReader<'i> {
	pub fn new(options: ReadOptions, interner: &'i dyn Interner) -> ClassFileReader<'i> {
		ClassFileReader { options, interner }
	}

	pub fn options(&self) -> &ReadOptions {
		&self.options
	}

	/// Reads the class file stored in `buf[offset..offset + length]`.
	///
	/// `label` names the input in error messages until the name of the class is known. If `allow_root_class`
	/// is set, `java.lang.Object` may come without a superclass.
	pub fn read(&self, buf: &[u8], offset: usize, length: usize, label: &str, allow_root_class: bool) -> Result<ClassFile, ClassFileError> {
		debug!("reading class file {label} ({length} bytes)");

		let mut name = None;
		let result = ByteCursor::new(buf, offset, length)
			.map_err(anyhow::Error::from)
			.and_then(|mut reader| self.read_class(&mut reader, label, allow_root_class, &mut name));

		match result {
			Ok(class) => {
				debug!("read class {} from {label}", class.name);
				Ok(class)
			},
			Err(error) => Err(ClassFileError::classify(error, name.as_deref().unwrap_or(label))),
		}
	}

	fn read_class(&self, reader: &mut ByteCursor<'_>, label: &str, allow_root_class: bool, name: &mut Option<Arc<str>>) -> Result<ClassFile> {
		let magic = reader.read_u32()?;
		if magic != MAGIC {
			bail!("bad magic number 0x{magic:08X}");
		}

		let minor = reader.read_u16()?;
		let major = reader.read_u16()?;
		let version = Version::new(major, minor);
		if !version.is_supported(self.options.experimental_versions) {
			return Err(ClassFileError::UnsupportedVersion { label: label.to_owned(), major, minor }.into());
		}

		let pool = ConstantPool::read(reader, self.interner)?;

		let access_flags = reader.read_u16()?;
		let access = ClassAccess::from(access_flags);
		if !access.is_legal() {
			bail!("illegal class modifiers 0x{access_flags:X}");
		}

		let this_class = reader.read_u16()?;
		let class_name = pool.get_class(this_class)
			.with_context(|| anyhow!("bad constant pool index #{this_class} for this class"))?
			.clone();
		*name = Some(class_name.clone());
		trace!("reading class {class_name}");

		let super_class = reader.read_u16()?;
		let super_class_name = if super_class == 0 {
			if !(allow_root_class && &*class_name == JAVA_LANG_OBJECT) {
				bail!("bad superclass index #0");
			}
			None
		} else {
			Some(pool.get_class(super_class)
				.with_context(|| anyhow!("bad superclass index #{super_class}"))?
				.clone())
		};

		if access.is_interface && super_class_name.as_deref() != Some(JAVA_LANG_OBJECT) {
			bail!("interfaces must have java.lang.Object as superclass");
		}
		if class_name.starts_with('[') {
			bail!("bad name {class_name:?}");
		}

		let interfaces = self.read_interfaces(reader, &pool)?;

		let fields_count = reader.read_u16()?;
		let mut fields = Vec::with_capacity(fields_count as usize);
		let mut seen_fields = FnvHashSet::default();
		for index in 0..fields_count {
			let field = self.read_field(reader, &pool, access)
				.with_context(|| anyhow!("while reading field #{index}"))?;
			if !seen_fields.insert((field.name.clone(), field.descriptor.clone())) {
				bail!("repetitive field name/signature {:?} {:?}", field.name, field.descriptor);
			}
			fields.push(field);
		}

		let methods_count = reader.read_u16()?;
		let mut methods = Vec::with_capacity(methods_count as usize);
		let mut seen_methods = FnvHashSet::default();
		for index in 0..methods_count {
			let method = self.read_method(reader, &pool, access, &class_name)
				.with_context(|| anyhow!("while reading method #{index}"))?;
			if !seen_methods.insert((method.name.clone(), method.descriptor.clone())) {
				bail!("repetitive method name/signature {:?} {:?}", method.name, method.descriptor);
			}
			methods.push(method);
		}

		let mut source_file = None;
		let mut origin = None;
		let mut inner_classes = None;
		let mut deprecated = false;

		let attributes_count = reader.read_u16()?;
		for _ in 0..attributes_count {
			let (attribute_name, length) = read_attribute_header(reader, &pool)?;
			match &**attribute_name {
				attribute::DEPRECATED => {
					self.read_deprecated(reader, length)?;
					deprecated = true;
				},
				attribute::SOURCE_FILE => {
					expect_length(attribute::SOURCE_FILE, length, 2)?;
					source_file = Some(pool.get_utf8(reader.read_u16()?)?.clone());
				},
				attribute::INNER_CLASSES => {
					inner_classes = Some(self.read_inner_classes(reader, &pool, length)?);
				},
				attribute::ORIGIN => {
					expect_length(attribute::ORIGIN, length, 2)?;
					origin = Some(pool.get_utf8(reader.read_u16()?)?.clone());
				},
				_ => reader.skip(length)?,
			}
		}

		if !reader.is_at_end() {
			bail!("extra bytes at end of the class file: {} unread", reader.remaining());
		}

		Ok(ClassFile {
			version,
			access,
			this_class,
			super_class,
			name: class_name,
			super_class_name,
			interfaces,
			fields,
			methods,
			source_file,
			origin,
			inner_classes,
			deprecated,
			pool,
		})
	}

	fn read_interfaces(&self, reader: &mut ByteCursor<'_>, pool: &ConstantPool) -> Result<Vec<Arc<str>>> {
		let mut seen = FnvHashSet::default();
		reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| {
				let index = r.read_u16()?;
				if index == 0 || index as usize >= pool.len() {
					bail!("illegal constant pool index #{index} for an interface");
				}
				let name = match pool.get(index) {
					Ok(Constant::Class(name)) => name.clone(),
					_ => bail!("interface name has bad constant type (index #{index})"),
				};
				if !seen.insert(name.clone()) {
					bail!("repetitive interface name {name}");
				}
				Ok(name)
			}
		)
	}

	/// Reads a `Deprecated` attribute, which has to be empty unless the options are lenient.
	fn read_deprecated(&self, reader: &mut ByteCursor<'_>, length: usize) -> Result<()> {
		if length != 0 {
			if !self.options.is_lenient() {
				bail!("Deprecated attribute has non-zero length {length}");
			}
			warn!("ignoring {length} bytes of content in a Deprecated attribute");
			reader.skip(length)?;
		}
		Ok(())
	}

	fn read_field(&self, reader: &mut ByteCursor<'_>, pool: &ConstantPool, class_access: ClassAccess) -> Result<Field> {
		let access_flags = reader.read_u16()?;
		let access = FieldAccess::from(access_flags);
		let name = pool.get_utf8(reader.read_u16()?)?.clone();
		let descriptor = pool.get_utf8(reader.read_u16()?)?;

		if !descriptor::is_valid_field_descriptor(descriptor) {
			bail!("field {name:?} has invalid signature {descriptor:?}");
		}
		let descriptor = self.interner.intern(&descriptor::to_dotted(descriptor));

		if !descriptor::is_valid_identifier(&name) {
			bail!("illegal field name {name:?}");
		}
		if !access.is_legal(class_access.is_interface) {
			bail!("illegal field modifiers: 0x{access_flags:X}");
		}
		trace!("reading field {name} {descriptor}");

		let mut deprecated = false;
		let mut constant_value = None;

		let attributes_count = reader.read_u16()?;
		for _ in 0..attributes_count {
			let (attribute_name, length) = read_attribute_header(reader, pool)?;
			match &**attribute_name {
				attribute::DEPRECATED => {
					self.read_deprecated(reader, length)?;
					deprecated = true;
				},
				attribute::CONSTANT_VALUE => {
					expect_length(attribute::CONSTANT_VALUE, length, 2)?;
					let index = reader.read_u16()?;
					constant_value = Some(read_constant_value(pool, index, &descriptor)?);
				},
				_ => reader.skip(length)?,
			}
		}

		Ok(Field { access, name, descriptor, deprecated, constant_value })
	}

	fn read_method(&self, reader: &mut ByteCursor<'_>, pool: &ConstantPool, class_access: ClassAccess, class_name: &str) -> Result<Method> {
		let access_flags = reader.read_u16()?;
		let mut access = MethodAccess::from(access_flags);
		let name = pool.get_utf8(reader.read_u16()?)?.clone();
		let descriptor = pool.get_utf8(reader.read_u16()?)?;

		if !descriptor::is_valid_method_descriptor(descriptor) {
			bail!("method {name:?} has invalid signature {descriptor:?}");
		}
		let descriptor = self.interner.intern(&descriptor::to_dotted(descriptor));

		let is_special = descriptor::is_special_method_name(&name);
		if !is_special && !descriptor::is_valid_identifier(&name) {
			bail!("illegal method name {name:?}");
		}
		if is_special && !descriptor::returns_void(&descriptor) {
			bail!("method {name:?} has illegal signature {descriptor:?}");
		}

		if &*name == CLINIT && &*descriptor == "()V" {
			access = access.for_static_initializer();
		} else if !access.is_legal(class_access.is_interface, &*name == INIT) {
			bail!("illegal method modifiers: 0x{access_flags:X}");
		}
		trace!("reading method {name}{descriptor}");

		let mut deprecated = false;
		let mut body = None;
		let mut exceptions = None;

		let attributes_count = reader.read_u16()?;
		for _ in 0..attributes_count {
			let (attribute_name, length) = read_attribute_header(reader, pool)?;
			match &**attribute_name {
				attribute::DEPRECATED => {
					self.read_deprecated(reader, length)?;
					deprecated = true;
				},
				attribute::CODE => {
					if body.is_some() {
						bail!("duplicate Code attribute");
					}
					let mut section = reader.section(length)?;
					let code = read_code(&mut section, pool, &descriptor, access.is_static)
						.with_context(|| anyhow!("failed to read code of method {name:?} {descriptor:?}"))?;
					if !section.is_at_end() {
						bail!("Code attribute has wrong length");
					}
					body = Some(code);
				},
				attribute::EXCEPTIONS => {
					if exceptions.is_some() {
						bail!("duplicate Exceptions attribute");
					}
					let mut section = reader.section(length)?;
					let classes = section.read_vec(
						|r| r.read_u16_as_usize(),
						|r| Ok(pool.get_class(r.read_u16()?)?.clone())
					)?;
					if !section.is_at_end() {
						bail!("Exceptions attribute has wrong length");
					}
					exceptions = Some(classes);
				},
				_ => reader.skip(length)?,
			}
		}

		let body = if access.is_abstract || access.is_native {
			if body.is_some() {
				bail!("abstract or native method cannot have a Code attribute");
			}
			MethodBody::Absent
		} else {
			match body {
				Some(body) => body,
				None if &*name == CLINIT && self.options.is_lenient() => {
					warn!("static initializer of {class_name} has no Code attribute");
					MethodBody::VerifyError(format!("class {class_name}, method {name} signature {descriptor}: no Code attribute"))
				},
				None => bail!("method has no Code attribute"),
			}
		};

		if let MethodBody::VerifyError(message) = &body {
			debug!("method {name}{descriptor} of {class_name} can't be verified: {message}");
		}

		Ok(Method { access, name, descriptor, deprecated, body, exceptions })
	}

	fn read_inner_classes(&self, reader: &mut ByteCursor<'_>, pool: &ConstantPool, length: usize) -> Result<Vec<InnerClass>> {
		if self.options.is_lenient() {
			// the declared length is ignored, the table is as long as its count says
			let start = reader.position();
			let inner_classes = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| read_inner_class(r, pool)
			)?;
			let read = reader.position() - start;
			if read != length {
				warn!("InnerClasses attribute declares length {length}, but its table takes {read} bytes");
			}
			return Ok(inner_classes);
		}

		let mut section = reader.section(length)?;

		let inner_classes = section.read_vec(
			|r| r.read_u16_as_usize(),
			|r| read_inner_class(r, pool)
		)?;

		if !section.is_at_end() {
			bail!("InnerClasses attribute has wrong length");
		}

		Ok(inner_classes)
	}
}

fn read_inner_class(reader: &mut ByteCursor<'_>, pool: &ConstantPool) -> Result<InnerClass> {
	let inner_class_index = reader.read_u16()?;
	let outer_class_index = reader.read_u16()?;
	let name_index = reader.read_u16()?;
	let access = InnerClassAccess::from(reader.read_u16()?);

	let inner_class = pool.get_optional_class(inner_class_index)
		.with_context(|| anyhow!("bad inner class index #{inner_class_index}"))?
		.cloned();
	let outer_class = pool.get_optional_class(outer_class_index)
		.with_context(|| anyhow!("bad outer class index #{outer_class_index}"))?
		.cloned();
	let name = if name_index == 0 {
		None
	} else {
		Some(pool.get_utf8(name_index)
			.with_context(|| anyhow!("bad inner class name index #{name_index}"))?
			.clone())
	};

	if inner_class_index == outer_class_index {
		bail!("class is both inner and outer class (index #{inner_class_index})");
	}

	Ok(InnerClass { inner_class_index, outer_class_index, name_index, access, inner_class, outer_class, name })
}

/// Gets the constant of a `ConstantValue` attribute, which must fit the descriptor of the field.
fn read_constant_value(pool: &ConstantPool, index: u16, descriptor: &str) -> Result<ConstantValue> {
	let value = match descriptor {
		"I" | "S" | "B" | "C" | "Z" => pool.get_integer(index).map(ConstantValue::Integer),
		"J" => pool.get_long(index).map(ConstantValue::Long),
		"F" => pool.get_float(index).map(ConstantValue::Float),
		"D" => pool.get_double(index).map(ConstantValue::Double),
		"Ljava.lang.String;" => pool.get_string(index).cloned().map(ConstantValue::String),
		_ => bail!("invalid signature for constant: {descriptor:?}"),
	};
	value.with_context(|| anyhow!("bad index into constant pool #{index} for a constant of type {descriptor:?}"))
}
