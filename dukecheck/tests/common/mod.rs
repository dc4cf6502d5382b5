#![allow(dead_code)]

use raw_class_file::{AttributeInfo, ClassFile, ExceptionTableEntry, flags, MethodInfo, PoolBuilder};

/// A class `org/example/Main` extending `java/lang/Object`, version 45.3, with nothing in it.
///
/// The constant pool is only set by [`finish`].
pub fn empty_class(pool: &mut PoolBuilder) -> ClassFile {
	ClassFile {
		minor_version: 3,
		major_version: 45,
		constant_pool: vec![],
		access_flags: flags::ACC_PUBLIC | flags::ACC_SUPER,
		this_class: pool.class("org/example/Main"),
		super_class: pool.class("java/lang/Object"),
		interfaces: vec![],
		fields: vec![],
		methods: vec![],
		attributes: vec![],
	}
}

pub fn finish(mut class: ClassFile, pool: PoolBuilder) -> Vec<u8> {
	class.constant_pool = pool.build();
	class.to_bytes()
}

pub fn code_method(
	pool: &mut PoolBuilder,
	access_flags: u16,
	name: &str,
	descriptor: &str,
	max_locals: u16,
	code: Vec<u8>,
	exception_table: Vec<ExceptionTableEntry>,
) -> MethodInfo {
	MethodInfo {
		access_flags,
		name_index: pool.utf8(name),
		descriptor_index: pool.utf8(descriptor),
		attributes: vec![
			AttributeInfo::Code {
				attribute_name_index: pool.utf8("Code"),
				max_stack: 4,
				max_locals,
				code,
				exception_table,
				attributes: vec![],
			},
		],
	}
}

/// A class with a single static method `run` with the given descriptor and code.
pub fn class_with_code(descriptor: &str, max_locals: u16, code: Vec<u8>) -> Vec<u8> {
	let mut pool = PoolBuilder::new();
	let mut class = empty_class(&mut pool);
	class.methods.push(code_method(&mut pool, flags::ACC_STATIC, "run", descriptor, max_locals, code, vec![]));
	finish(class, pool)
}

pub fn u16_bytes(value: u16) -> [u8; 2] {
	value.to_be_bytes()
}

pub fn i32_bytes(value: i32) -> [u8; 4] {
	value.to_be_bytes()
}
