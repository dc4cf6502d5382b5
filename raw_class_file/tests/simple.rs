use pretty_assertions::assert_eq;
use raw_class_file::{AttributeInfo, ClassFile, CpInfo, FieldInfo, flags, MethodInfo, PoolBuilder};

#[test]
fn test() {
	let class = ClassFile {
		minor_version: 3,
		major_version: 45,
		constant_pool: vec![
			CpInfo::Utf8 { bytes: b"ThisClass".to_vec() },
			CpInfo::Class { name_index: 1 },
			CpInfo::Utf8 { bytes: b"ThatClass".to_vec() },
			CpInfo::Class { name_index: 3 },
			CpInfo::Utf8 { bytes: b"thisField".to_vec() },
			CpInfo::Utf8 { bytes: b"I".to_vec() },
			CpInfo::Utf8 { bytes: b"ConstantValue".to_vec() },
			CpInfo::Integer { bytes: 42 },
			CpInfo::Utf8 { bytes: b"thisMethod".to_vec() },
			CpInfo::Utf8 { bytes: b"()I".to_vec() },
		],
		access_flags: flags::ACC_ABSTRACT,
		this_class: 2,
		super_class: 4,
		interfaces: vec![],
		fields: vec![
			FieldInfo {
				access_flags: flags::ACC_STATIC,
				name_index: 5,
				descriptor_index: 6,
				attributes: vec![
					AttributeInfo::ConstantValue {
						attribute_name_index: 7,
						constantvalue_index: 8,
					}
				],
			},
		],
		methods: vec![
			MethodInfo {
				access_flags: flags::ACC_ABSTRACT,
				name_index: 9,
				descriptor_index: 10,
				attributes: vec![],
			},
		],
		attributes: vec![],
	};

	let bytes = class.to_bytes();

	let parts: &[&[u8]] = &[
		&[0xCA, 0xFE, 0xBA, 0xBE, 0, 3, 0, 45, 0, 11],
		&[1, 0, 9], b"ThisClass",
		&[7, 0, 1],
		&[1, 0, 9], b"ThatClass",
		&[7, 0, 3],
		&[1, 0, 9], b"thisField",
		&[1, 0, 1], b"I",
		&[1, 0, 13], b"ConstantValue",
		&[3, 0, 0, 0, 42],
		&[1, 0, 10], b"thisMethod",
		&[1, 0, 3], b"()I",
		&[0x04, 0x00, 0, 2, 0, 4],
		&[0, 0],
		&[0, 1, 0, 8, 0, 5, 0, 6, 0, 1, 0, 7, 0, 0, 0, 2, 0, 8],
		&[0, 1, 0x04, 0x00, 0, 9, 0, 10, 0, 0],
		&[0, 0],
	];
	let expected = parts.concat();

	assert_eq!(bytes, expected);
	assert_eq!(bytes.len(), class.length());
}

#[test]
fn wide_entries_take_two_slots() {
	let mut pool = PoolBuilder::new();
	assert_eq!(pool.long(1), 1);
	assert_eq!(pool.double(2.0), 3);
	assert_eq!(pool.utf8("x"), 5);
	assert_eq!(pool.long(1), 1);
	assert_eq!(pool.next_index(), 6);

	let class = ClassFile {
		minor_version: 0,
		major_version: 45,
		constant_pool: pool.build(),
		access_flags: 0,
		this_class: 0,
		super_class: 0,
		interfaces: vec![],
		fields: vec![],
		methods: vec![],
		attributes: vec![],
	};
	assert_eq!(class.constant_pool_count(), 6);
}

#[test]
fn pool_builder_reuses_entries() {
	let mut pool = PoolBuilder::new();
	let a = pool.method_ref("A", "run", "()V");
	let b = pool.method_ref("A", "run", "()V");
	let c = pool.interface_method_ref("A", "run", "()V");
	assert_eq!(a, b);
	assert_ne!(a, c);
	// utf8 "A", class, utf8 "run", utf8 "()V", name and type, method ref, interface method ref
	assert_eq!(pool.build().len(), 7);
}

#[test]
fn attribute_lengths() {
	let code = AttributeInfo::Code {
		attribute_name_index: 1,
		max_stack: 0,
		max_locals: 0,
		code: vec![0xb1],
		exception_table: vec![],
		attributes: vec![AttributeInfo::Deprecated { attribute_name_index: 2 }],
	};
	assert_eq!(code.attribute_length(), 2 + 2 + 4 + 1 + 2 + 2 + 6);

	let other = AttributeInfo::Other { attribute_name_index: 1, info: vec![1, 2, 3] };
	assert_eq!(other.attribute_length(), 3);
}
