use anyhow::Result;
use dukecheck::descriptor::{is_special_method_name, is_valid_class_name, is_valid_identifier, to_dotted};

#[test]
fn valid_class_names() -> Result<()> {
	let valid_class_names = [
		"foo",
		"foo$bar",
		"_",
		"java/lang/Object",
		"org/example/MyClassName",
		"org/example/Main$1",
		"[[[D",
		"[[Ljava/lang/Integer;",
	];

	for i in valid_class_names {
		assert!(
			is_valid_class_name(i),
			"{:?} is a valid class name", i
		);
	}

	Ok(())
}

#[test]
fn invalid_class_names() -> Result<()> {
	let invalid_class_names = [
		"",
		".",
		"/",
		";",
		"[",
		"a/",
		"/a",
		"[V",
		"[L;",
		"//a",
		"a//",
		"a.b",
		"a;b",
		"a[b",
		"a-b",
		"L;DV",
		"a//a",
		"1234",
		"java/lang/",
	];

	for i in invalid_class_names {
		assert!(
			!is_valid_class_name(i),
			"{:?} is an invalid class name", i
		);
	}

	Ok(())
}

#[test]
fn valid_identifiers() -> Result<()> {
	let valid_identifiers = [
		"foo",
		"bar",
		"$",
		"_1",
		"do",
		"while",
		"größe",
	];

	for i in valid_identifiers {
		assert!(
			is_valid_identifier(i),
			"{:?} is a valid identifier", i
		);
	}

	Ok(())
}

#[test]
fn invalid_identifiers() -> Result<()> {
	let invalid_identifiers = [
		"",
		".",
		";",
		"[",
		"/",
		"1234",
		"a b",
		"<init>",
		"<clinit>",
	];

	for i in invalid_identifiers {
		assert!(
			!is_valid_identifier(i),
			"{:?} is an invalid identifier", i
		);
	}

	Ok(())
}

#[test]
fn special_method_names() -> Result<()> {
	assert!(is_special_method_name("<init>"));
	assert!(is_special_method_name("<clinit>"));
	assert!(!is_special_method_name("<main>"));
	assert!(!is_special_method_name("init"));

	Ok(())
}

#[test]
fn dotted_names() -> Result<()> {
	assert_eq!(to_dotted("java/lang/Object"), "java.lang.Object");
	assert_eq!(to_dotted("[Ljava/lang/String;"), "[Ljava.lang.String;");
	assert_eq!(to_dotted("Main"), "Main");

	Ok(())
}

#[test]
fn unicode_letters() -> Result<()> {
	assert!(is_valid_identifier("größe"));
	assert!(is_valid_identifier("\u{2160}"));
	assert!(is_valid_identifier("x\u{0967}"));
	assert!(is_valid_class_name("org/\u{00e9}t\u{00e9}/\u{2160}"));

	assert!(!is_valid_identifier("\u{0967}"));
	assert!(!is_valid_identifier("a\u{2009}b"));
	assert!(!is_valid_class_name("org/\u{00b7}"));

	Ok(())
}
