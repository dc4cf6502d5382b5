//! Reading and structural validation of class files, for major versions 45 up to 48 (optionally 49).
//!
//! A class file is read in one pass:
//! - the constant pool is loaded in two phases, first the raw entries, then the cross references between them,
//! - the header, fields, methods and the class attributes are checked against the format rules,
//! - the `Code` attribute of every method is decoded into [`code::Instruction`]s with normalized opcodes.
//!
//! Structural errors fail the whole class with a [`ClassFileError`]. A method whose instruction stream can't
//! be decoded only gets a [`MethodBody::VerifyError`], so that the rest of the class stays usable.
//!
//! ```no_run
//! # fn main() -> Result<(), dukecheck::ClassFileError> {
//! let bytes = std::fs::read("Foo.class").unwrap_or_default();
//! let class = dukecheck::read_class(&bytes, "Foo.class")?;
//! println!("{} extends {:?}", class.name(), class.super_class_name());
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod class;
pub mod code;
mod cursor;
pub mod descriptor;
pub mod error;
pub mod intern;
pub mod opcode;
pub mod options;
pub mod pool;
mod reader;
pub mod version;

pub use class::{ClassFile, ConstantValue, Field, InnerClass, Method, MethodBody};
pub use error::ClassFileError;
pub use intern::{Interner, NoInterning, SharedInterner};
pub use options::{AttributeMode, ReadOptions};
pub use reader::{attribute, ClassFileReader, MAGIC};

/// Reads a whole buffer as a class file, with the default (strict) options and without interning.
///
/// `label` names the input in error messages. Use a [`ClassFileReader`] for anything else.
pub fn read_class(bytes: &[u8], label: &str) -> Result<ClassFile, ClassFileError> {
	ClassFileReader::new(ReadOptions::default(), &NoInterning)
		.read(bytes, 0, bytes.len(), label, false)
}
