//! Grammar checks for identifiers, class names and descriptors.
//!
//! The grammar for descriptors is:
//! ```txt
//! FieldDescriptor:
//!     FieldType
//! FieldType:
//!     BaseType
//!     ObjectType
//!     ArrayType
//! BaseType:
//!     (one of)
//!     B C D F I J S Z
//! ObjectType:
//!     L ClassName ;
//! ArrayType:
//!     [ ComponentType
//! ComponentType:
//!     FieldType
//!
//! MethodDescriptor:
//!     ( {ParameterDescriptor} ) ReturnDescriptor
//! ParameterDescriptor:
//!     FieldType
//! ReturnDescriptor:
//!     FieldType
//!     VoidDescriptor
//! VoidDescriptor:
//!     V
//! ```
//!
//! The `ClassName` inside of an `ObjectType` is only required to be non-empty here, the class names
//! themselves get checked when the `Class` constant pool entries are resolved.

pub const INIT: &str = "<init>";
pub const CLINIT: &str = "<clinit>";

/// Checks if `name` is a valid simple name: a letter, `$` or `_`, followed by letters, digits, `$` or `_`.
///
/// Letters and digits are taken as [`char::is_alphabetic`] and [`char::is_alphanumeric`], that is the unicode
/// `Alphabetic` and `Numeric` properties. These are a bit wider than the general letter and digit categories:
/// letter numbers like `Ⅻ` (U+216B) and combining marks like the `ं` in `कं` count as letters too.
pub fn is_valid_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) if first.is_alphabetic() || first == '$' || first == '_' => {},
		_ => return false,
	}
	chars.all(|c| c.is_alphanumeric() || c == '$' || c == '_')
}

/// Checks if `name` is one of the two names for initializer methods, `<init>` and `<clinit>`.
pub fn is_special_method_name(name: &str) -> bool {
	name == INIT || name == CLINIT
}

/// Checks if `name` is a valid class name in internal form, so with `/` separating the packages.
///
/// Array classes are named by their field descriptor, like `[Ljava/lang/String;`.
/// Each package segment follows the same letter rules as [`is_valid_identifier`].
pub fn is_valid_class_name(name: &str) -> bool {
	let Some(first) = name.chars().next() else {
		return false;
	};

	let body = if first == '[' {
		if !is_valid_field_descriptor(name) {
			return false;
		}
		let element = name.trim_start_matches('[');
		element.strip_suffix(';').unwrap_or(element)
	} else if first.is_alphabetic() || first == '$' || first == '_' {
		name
	} else {
		return false;
	};

	body.split('/')
		.all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '$' || c == '_'))
}

/// Converts an internal name (or descriptor) to the dotted form, `java/lang/Object` to `java.lang.Object`.
pub fn to_dotted(internal: &str) -> String {
	internal.replace('/', ".")
}

/// Strips one `FieldType` from the start of `s`, and returns the rest.
fn strip_field_type(s: &str) -> Option<&str> {
	let s = s.trim_start_matches('[');
	let mut chars = s.chars();
	match chars.next()? {
		'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' => Some(chars.as_str()),
		'L' => {
			let rest = chars.as_str();
			match rest.find(';')? {
				0 => None,
				end => Some(&rest[end + 1..]),
			}
		},
		_ => None,
	}
}

pub fn is_valid_field_descriptor(descriptor: &str) -> bool {
	strip_field_type(descriptor) == Some("")
}

pub fn is_valid_method_descriptor(descriptor: &str) -> bool {
	let Some(mut rest) = descriptor.strip_prefix('(') else {
		return false;
	};
	loop {
		if let Some(return_type) = rest.strip_prefix(')') {
			return return_type == "V" || is_valid_field_descriptor(return_type);
		}
		match strip_field_type(rest) {
			Some(next) => rest = next,
			None => return false,
		}
	}
}

/// Checks if a method descriptor returns `void`.
pub fn returns_void(descriptor: &str) -> bool {
	descriptor.ends_with(")V")
}

/// How many local variable slots a value takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	/// Everything except `long` and `double`.
	One,
	/// `long` and `double`.
	Two,
}

/// Lists the categories of the parameters of a method descriptor, from left to right.
///
/// Returns `None` if the parameter list isn't well-formed.
pub fn parameter_categories(descriptor: &str) -> Option<Vec<Category>> {
	let mut rest = descriptor.strip_prefix('(')?;
	let mut categories = Vec::new();
	while !rest.starts_with(')') {
		let next = strip_field_type(rest)?;
		categories.push(match rest.as_bytes()[0] {
			b'J' | b'D' => Category::Two,
			_ => Category::One,
		});
		rest = next;
	}
	Some(categories)
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::descriptor::{Category, is_valid_identifier, parameter_categories, returns_void, to_dotted};

	#[test]
	fn identifiers() {
		assert!(is_valid_identifier("foo"));
		assert!(is_valid_identifier("$jacocoData"));
		assert!(is_valid_identifier("_1"));
		assert!(is_valid_identifier("ähm"));
		assert!(!is_valid_identifier(""));
		assert!(!is_valid_identifier("1a"));
		assert!(!is_valid_identifier("a-b"));
		assert!(!is_valid_identifier("<init>"));
	}

	#[test]
	fn categories() {
		assert_eq!(parameter_categories("()V"), Some(vec![]));
		assert_eq!(
			parameter_categories("(DI[JLjava.lang.String;J)V"),
			Some(vec![Category::Two, Category::One, Category::One, Category::One, Category::Two])
		);
		assert_eq!(parameter_categories("(Q)V"), None);
		assert_eq!(parameter_categories("I"), None);
	}

	#[test]
	fn void() {
		assert!(returns_void("(I)V"));
		assert!(!returns_void("(V)I"));
		assert!(!returns_void("()LV;"));
	}

	#[test]
	fn dotted() {
		assert_eq!(to_dotted("java/lang/Object"), "java.lang.Object");
		assert_eq!(to_dotted("(Ljava/lang/String;)V"), "(Ljava.lang.String;)V");
	}
}
