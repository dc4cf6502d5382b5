//! The validated model of a class file.
//!
//! Everything in here is only built by [`ClassFileReader`](crate::ClassFileReader), and can't be changed
//! afterwards. Class names are in dotted form, and so are the class names in descriptors.

use std::sync::Arc;
use crate::access::{ClassAccess, FieldAccess, InnerClassAccess, MethodAccess};
use crate::code::Code;
use crate::pool::ConstantPool;
use crate::version::Version;

/// The universal superclass, the only class allowed to have no superclass.
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
	pub(crate) version: Version,
	pub(crate) access: ClassAccess,
	pub(crate) this_class: u16,
	pub(crate) super_class: u16,
	pub(crate) name: Arc<str>,
	pub(crate) super_class_name: Option<Arc<str>>,
	pub(crate) interfaces: Vec<Arc<str>>,
	pub(crate) fields: Vec<Field>,
	pub(crate) methods: Vec<Method>,
	pub(crate) source_file: Option<Arc<str>>,
	pub(crate) origin: Option<Arc<str>>,
	pub(crate) inner_classes: Option<Vec<InnerClass>>,
	pub(crate) deprecated: bool,
	pub(crate) pool: ConstantPool,
}

impl ClassFile {
	pub fn version(&self) -> Version {
		self.version
	}

	pub fn access(&self) -> ClassAccess {
		self.access
	}

	/// The index of the `Class` entry naming this class.
	pub fn this_class(&self) -> u16 {
		self.this_class
	}

	/// The index of the `Class` entry naming the superclass, `0` only for `java.lang.Object`.
	pub fn super_class(&self) -> u16 {
		self.super_class
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn super_class_name(&self) -> Option<&str> {
		self.super_class_name.as_deref()
	}

	pub fn interfaces(&self) -> &[Arc<str>] {
		&self.interfaces
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn methods(&self) -> &[Method] {
		&self.methods
	}

	pub fn field(&self, name: &str, descriptor: &str) -> Option<&Field> {
		self.fields.iter().find(|field| &*field.name == name && &*field.descriptor == descriptor)
	}

	pub fn method(&self, name: &str, descriptor: &str) -> Option<&Method> {
		self.methods.iter().find(|method| &*method.name == name && &*method.descriptor == descriptor)
	}

	/// The file name from the `SourceFile` attribute.
	pub fn source_file(&self) -> Option<&str> {
		self.source_file.as_deref()
	}

	/// The text of the vendor origin attribute, see [`attribute::ORIGIN`](crate::attribute::ORIGIN).
	pub fn origin(&self) -> Option<&str> {
		self.origin.as_deref()
	}

	/// The entries of the `InnerClasses` attribute, if there is one.
	pub fn inner_classes(&self) -> Option<&[InnerClass]> {
		self.inner_classes.as_deref()
	}

	pub fn is_deprecated(&self) -> bool {
		self.deprecated
	}

	pub fn constant_pool(&self) -> &ConstantPool {
		&self.pool
	}
}

/// The value of a `ConstantValue` attribute.
///
/// `int`, `short`, `char`, `byte` and `boolean` fields all take their value from an `Integer` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
	Integer(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	String(Arc<str>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	pub(crate) access: FieldAccess,
	pub(crate) name: Arc<str>,
	pub(crate) descriptor: Arc<str>,
	pub(crate) deprecated: bool,
	pub(crate) constant_value: Option<ConstantValue>,
}

impl Field {
	pub fn access(&self) -> FieldAccess {
		self.access
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn descriptor(&self) -> &str {
		&self.descriptor
	}

	pub fn is_deprecated(&self) -> bool {
		self.deprecated
	}

	pub fn constant_value(&self) -> Option<&ConstantValue> {
		self.constant_value.as_ref()
	}
}

/// What the `Code` attribute of a method turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
	/// An `abstract` or `native` method.
	Absent,
	Code(Code),
	/// The instruction stream couldn't be decoded.
	///
	/// This doesn't fail the class, but whoever executes or translates the method must report it.
	VerifyError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
	pub(crate) access: MethodAccess,
	pub(crate) name: Arc<str>,
	pub(crate) descriptor: Arc<str>,
	pub(crate) deprecated: bool,
	pub(crate) body: MethodBody,
	pub(crate) exceptions: Option<Vec<Arc<str>>>,
}

impl Method {
	pub fn access(&self) -> MethodAccess {
		self.access
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn descriptor(&self) -> &str {
		&self.descriptor
	}

	pub fn is_deprecated(&self) -> bool {
		self.deprecated
	}

	pub fn body(&self) -> &MethodBody {
		&self.body
	}

	/// The decoded code, `None` for abstract and native methods, and for ones with a verify error.
	pub fn code(&self) -> Option<&Code> {
		match &self.body {
			MethodBody::Code(code) => Some(code),
			_ => None,
		}
	}

	pub fn verify_error(&self) -> Option<&str> {
		match &self.body {
			MethodBody::VerifyError(message) => Some(message),
			_ => None,
		}
	}

	/// The class names from the `Exceptions` attribute, if there is one.
	pub fn exceptions(&self) -> Option<&[Arc<str>]> {
		self.exceptions.as_deref()
	}
}

/// An entry of the `InnerClasses` attribute.
///
/// The indices are kept as stored, `0` meaning absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClass {
	pub inner_class_index: u16,
	pub outer_class_index: u16,
	pub name_index: u16,
	pub access: InnerClassAccess,
	pub inner_class: Option<Arc<str>>,
	pub outer_class: Option<Arc<str>>,
	pub name: Option<Arc<str>>,
}
