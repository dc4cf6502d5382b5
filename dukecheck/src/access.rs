//! Access flag sets of classes, fields, methods and inner classes, and the rules for legal combinations.
//!
//! Bits without a meaning for the respective kind are dropped on conversion.

use std::fmt::{Debug, Formatter};

pub mod flags {
	pub const ACC_PUBLIC: u16       = 0x0001; // class, field, method, inner class
	pub const ACC_PRIVATE: u16      = 0x0002; // field, method, inner class
	pub const ACC_PROTECTED: u16    = 0x0004; // field, method, inner class
	pub const ACC_STATIC: u16       = 0x0008; // field, method, inner class
	pub const ACC_FINAL: u16        = 0x0010; // class, field, method, inner class
	pub const ACC_SUPER: u16        = 0x0020; // class
	pub const ACC_SYNCHRONIZED: u16 = 0x0020; // method
	pub const ACC_VOLATILE: u16     = 0x0040; // field
	pub const ACC_BRIDGE: u16       = 0x0040; // method
	pub const ACC_TRANSIENT: u16    = 0x0080; // field
	pub const ACC_VARARGS: u16      = 0x0080; // method
	pub const ACC_NATIVE: u16       = 0x0100; // method
	pub const ACC_INTERFACE: u16    = 0x0200; // class, inner class
	pub const ACC_ABSTRACT: u16     = 0x0400; // class, method, inner class
	pub const ACC_STRICT: u16       = 0x0800; // method
	pub const ACC_SYNTHETIC: u16    = 0x1000; // class, field, method, inner class
	pub const ACC_ANNOTATION: u16   = 0x2000; // class, inner class
	pub const ACC_ENUM: u16         = 0x4000; // class, field, inner class
}

use flags::*;

/// Checks that at most one of public, private and protected is set.
fn at_most_one_visibility(is_public: bool, is_private: bool, is_protected: bool) -> bool {
	(is_public as u8 + is_private as u8 + is_protected as u8) <= 1
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassAccess {
	pub is_public: bool,
	pub is_final: bool,
	pub is_super: bool,
	pub is_interface: bool,
	pub is_abstract: bool,
	pub is_synthetic: bool,
	pub is_annotation: bool,
	pub is_enum: bool,
}

impl ClassAccess {
	/// An interface is implicitly abstract, and nothing abstract may be final.
	pub fn is_legal(&self) -> bool {
		!((self.is_interface || self.is_abstract) && self.is_final)
	}
}

impl From<u16> for ClassAccess {
	fn from(access_flags: u16) -> Self {
		ClassAccess {
			is_public:     access_flags & ACC_PUBLIC != 0,
			is_final:      access_flags & ACC_FINAL != 0,
			is_super:      access_flags & ACC_SUPER != 0,
			is_interface:  access_flags & ACC_INTERFACE != 0,
			is_abstract:   access_flags & ACC_ABSTRACT != 0,
			is_synthetic:  access_flags & ACC_SYNTHETIC != 0,
			is_annotation: access_flags & ACC_ANNOTATION != 0,
			is_enum:       access_flags & ACC_ENUM != 0,
		}
	}
}

impl From<ClassAccess> for u16 {
	fn from(value: ClassAccess) -> Self {
		(if value.is_public     { ACC_PUBLIC     } else { 0 }) |
		(if value.is_final      { ACC_FINAL      } else { 0 }) |
		(if value.is_super      { ACC_SUPER      } else { 0 }) |
		(if value.is_interface  { ACC_INTERFACE  } else { 0 }) |
		(if value.is_abstract   { ACC_ABSTRACT   } else { 0 }) |
		(if value.is_synthetic  { ACC_SYNTHETIC  } else { 0 }) |
		(if value.is_annotation { ACC_ANNOTATION } else { 0 }) |
		(if value.is_enum       { ACC_ENUM       } else { 0 })
	}
}

impl Debug for ClassAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("ClassAccess { ")?;
		if self.is_public     { f.write_str("public ")?; }
		if self.is_final      { f.write_str("final ")?; }
		if self.is_super      { f.write_str("super ")?; }
		if self.is_interface  { f.write_str("interface ")?; }
		if self.is_abstract   { f.write_str("abstract ")?; }
		if self.is_synthetic  { f.write_str("synthetic ")?; }
		if self.is_annotation { f.write_str("annotation ")?; }
		if self.is_enum       { f.write_str("enum ")?; }
		f.write_str("}")
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_volatile: bool,
	pub is_transient: bool,
	pub is_synthetic: bool,
	pub is_enum: bool,
}

impl FieldAccess {
	/// Fields of interfaces must be `public static final` and not `transient`.
	pub fn is_legal(&self, in_interface: bool) -> bool {
		if !at_most_one_visibility(self.is_public, self.is_private, self.is_protected) {
			return false;
		}
		if self.is_final && self.is_volatile {
			return false;
		}
		if in_interface && !(self.is_public && self.is_static && self.is_final && !self.is_transient) {
			return false;
		}
		true
	}
}

impl From<u16> for FieldAccess {
	fn from(access_flags: u16) -> Self {
		FieldAccess {
			is_public:    access_flags & ACC_PUBLIC != 0,
			is_private:   access_flags & ACC_PRIVATE != 0,
			is_protected: access_flags & ACC_PROTECTED != 0,
			is_static:    access_flags & ACC_STATIC != 0,
			is_final:     access_flags & ACC_FINAL != 0,
			is_volatile:  access_flags & ACC_VOLATILE != 0,
			is_transient: access_flags & ACC_TRANSIENT != 0,
			is_synthetic: access_flags & ACC_SYNTHETIC != 0,
			is_enum:      access_flags & ACC_ENUM != 0,
		}
	}
}

impl From<FieldAccess> for u16 {
	fn from(value: FieldAccess) -> Self {
		(if value.is_public    { ACC_PUBLIC    } else { 0 }) |
		(if value.is_private   { ACC_PRIVATE   } else { 0 }) |
		(if value.is_protected { ACC_PROTECTED } else { 0 }) |
		(if value.is_static    { ACC_STATIC    } else { 0 }) |
		(if value.is_final     { ACC_FINAL     } else { 0 }) |
		(if value.is_volatile  { ACC_VOLATILE  } else { 0 }) |
		(if value.is_transient { ACC_TRANSIENT } else { 0 }) |
		(if value.is_synthetic { ACC_SYNTHETIC } else { 0 }) |
		(if value.is_enum      { ACC_ENUM      } else { 0 })
	}
}

impl Debug for FieldAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("FieldAccess { ")?;
		if self.is_public    { f.write_str("public ")?; }
		if self.is_private   { f.write_str("private ")?; }
		if self.is_protected { f.write_str("protected ")?; }
		if self.is_static    { f.write_str("static ")?; }
		if self.is_final     { f.write_str("final ")?; }
		if self.is_volatile  { f.write_str("volatile ")?; }
		if self.is_transient { f.write_str("transient ")?; }
		if self.is_synthetic { f.write_str("synthetic ")?; }
		if self.is_enum      { f.write_str("enum ")?; }
		f.write_str("}")
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_synchronized: bool,
	pub is_bridge: bool,
	pub is_varargs: bool,
	pub is_native: bool,
	pub is_abstract: bool,
	pub is_strict: bool,
	pub is_synthetic: bool,
}

impl MethodAccess {
	/// The flags a static initializer ends up with: `private static`, keeping only `strict` of the given flags.
	pub fn for_static_initializer(self) -> MethodAccess {
		MethodAccess {
			is_private: true,
			is_static: true,
			is_strict: self.is_strict,
			..MethodAccess::default()
		}
	}

	pub fn is_legal(&self, in_interface: bool, is_constructor: bool) -> bool {
		if is_constructor && (self.is_static || self.is_synchronized || self.is_final || self.is_abstract || self.is_native) {
			return false;
		}
		if !at_most_one_visibility(self.is_public, self.is_private, self.is_protected) {
			return false;
		}
		if self.is_abstract && (self.is_final || self.is_native || self.is_private || self.is_static || self.is_synchronized) {
			return false;
		}
		if in_interface && !(self.is_public && self.is_abstract) {
			return false;
		}
		true
	}
}

impl From<u16> for MethodAccess {
	fn from(access_flags: u16) -> Self {
		MethodAccess {
			is_public:       access_flags & ACC_PUBLIC != 0,
			is_private:      access_flags & ACC_PRIVATE != 0,
			is_protected:    access_flags & ACC_PROTECTED != 0,
			is_static:       access_flags & ACC_STATIC != 0,
			is_final:        access_flags & ACC_FINAL != 0,
			is_synchronized: access_flags & ACC_SYNCHRONIZED != 0,
			is_bridge:       access_flags & ACC_BRIDGE != 0,
			is_varargs:      access_flags & ACC_VARARGS != 0,
			is_native:       access_flags & ACC_NATIVE != 0,
			is_abstract:     access_flags & ACC_ABSTRACT != 0,
			is_strict:       access_flags & ACC_STRICT != 0,
			is_synthetic:    access_flags & ACC_SYNTHETIC != 0,
		}
	}
}

impl From<MethodAccess> for u16 {
	fn from(value: MethodAccess) -> Self {
		(if value.is_public       { ACC_PUBLIC       } else { 0 }) |
		(if value.is_private      { ACC_PRIVATE      } else { 0 }) |
		(if value.is_protected    { ACC_PROTECTED    } else { 0 }) |
		(if value.is_static       { ACC_STATIC       } else { 0 }) |
		(if value.is_final        { ACC_FINAL        } else { 0 }) |
		(if value.is_synchronized { ACC_SYNCHRONIZED } else { 0 }) |
		(if value.is_bridge       { ACC_BRIDGE       } else { 0 }) |
		(if value.is_varargs      { ACC_VARARGS      } else { 0 }) |
		(if value.is_native       { ACC_NATIVE       } else { 0 }) |
		(if value.is_abstract     { ACC_ABSTRACT     } else { 0 }) |
		(if value.is_strict       { ACC_STRICT       } else { 0 }) |
		(if value.is_synthetic    { ACC_SYNTHETIC    } else { 0 })
	}
}

impl Debug for MethodAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("MethodAccess { ")?;
		if self.is_public       { f.write_str("public ")?; }
		if self.is_private      { f.write_str("private ")?; }
		if self.is_protected    { f.write_str("protected ")?; }
		if self.is_static       { f.write_str("static ")?; }
		if self.is_final        { f.write_str("final ")?; }
		if self.is_synchronized { f.write_str("synchronized ")?; }
		if self.is_bridge       { f.write_str("bridge ")?; }
		if self.is_varargs      { f.write_str("varargs ")?; }
		if self.is_native       { f.write_str("native ")?; }
		if self.is_abstract     { f.write_str("abstract ")?; }
		if self.is_strict       { f.write_str("strict ")?; }
		if self.is_synthetic    { f.write_str("synthetic ")?; }
		f.write_str("}")
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct InnerClassAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_interface: bool,
	pub is_abstract: bool,
	pub is_synthetic: bool,
	pub is_annotation: bool,
	pub is_enum: bool,
}

impl From<u16> for InnerClassAccess {
	fn from(access_flags: u16) -> Self {
		InnerClassAccess {
			is_public:     access_flags & ACC_PUBLIC != 0,
			is_private:    access_flags & ACC_PRIVATE != 0,
			is_protected:  access_flags & ACC_PROTECTED != 0,
			is_static:     access_flags & ACC_STATIC != 0,
			is_final:      access_flags & ACC_FINAL != 0,
			is_interface:  access_flags & ACC_INTERFACE != 0,
			is_abstract:   access_flags & ACC_ABSTRACT != 0,
			is_synthetic:  access_flags & ACC_SYNTHETIC != 0,
			is_annotation: access_flags & ACC_ANNOTATION != 0,
			is_enum:       access_flags & ACC_ENUM != 0,
		}
	}
}

impl From<InnerClassAccess> for u16 {
	fn from(value: InnerClassAccess) -> Self {
		(if value.is_public     { ACC_PUBLIC     } else { 0 }) |
		(if value.is_private    { ACC_PRIVATE    } else { 0 }) |
		(if value.is_protected  { ACC_PROTECTED  } else { 0 }) |
		(if value.is_static     { ACC_STATIC     } else { 0 }) |
		(if value.is_final      { ACC_FINAL      } else { 0 }) |
		(if value.is_interface  { ACC_INTERFACE  } else { 0 }) |
		(if value.is_abstract   { ACC_ABSTRACT   } else { 0 }) |
		(if value.is_synthetic  { ACC_SYNTHETIC  } else { 0 }) |
		(if value.is_annotation { ACC_ANNOTATION } else { 0 }) |
		(if value.is_enum       { ACC_ENUM       } else { 0 })
	}
}

impl Debug for InnerClassAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("InnerClassAccess { ")?;
		if self.is_public     { f.write_str("public ")?; }
		if self.is_private    { f.write_str("private ")?; }
		if self.is_protected  { f.write_str("protected ")?; }
		if self.is_static     { f.write_str("static ")?; }
		if self.is_final      { f.write_str("final ")?; }
		if self.is_interface  { f.write_str("interface ")?; }
		if self.is_abstract   { f.write_str("abstract ")?; }
		if self.is_synthetic  { f.write_str("synthetic ")?; }
		if self.is_annotation { f.write_str("annotation ")?; }
		if self.is_enum       { f.write_str("enum ")?; }
		f.write_str("}")
	}
}
