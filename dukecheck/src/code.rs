//! Decoding of `Code` attributes into instructions.

use anyhow::{anyhow, bail, Context, Result};
use thiserror::Error;
use crate::class::MethodBody;
use crate::cursor::{ByteCursor, ClassRead};
use crate::descriptor::{self, Category};
use crate::opcode::{self, Mode, Normalized, WideMode};
use crate::pool::ConstantPool;
use crate::reader::skip_attributes;

/// The largest `code_length` accepted.
pub const MAX_CODE_LENGTH: u32 = 65536;
/// The largest number of entries a `tableswitch` or `lookupswitch` may have.
pub const MAX_SWITCH_ENTRIES: i64 = 16384;

/// Problems inside of the instruction stream that still fail the whole class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
enum IllegalInstruction {
	#[error("incorrect tableswitch: low {low}, high {high}")]
	TableSwitch { low: i32, high: i32 },
	#[error("incorrect lookupswitch: {count} pairs")]
	LookupSwitch { count: i32 },
	#[error("invokeinterface filler must be zero, got {0}")]
	InvokeInterfaceFiller(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchEntry {
	pub value: i32,
	/// Relative to the pc of the switch instruction.
	pub target_offset: i32,
}

/// A decoded instruction.
///
/// What `arg1` and `arg2` mean depends on the opcode:
/// - constant pool and local variable indices, branch offsets and immediates go into `arg1`,
/// - the count of `invokeinterface`, the dimensions of `multianewarray` and the increment of `iinc` go into `arg2`,
/// - for the switches `arg1` is the default offset and the pairs are in `switch_entries`.
///
/// For the short forms `arg1` is the argument implied by the opcode, so `iload_2` has `arg1 == 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
	pub pc: u32,
	/// The raw opcode, for `wide` instructions the one after the prefix.
	pub opcode: u8,
	pub normalized: Normalized,
	pub arg1: i32,
	pub arg2: i16,
	pub switch_entries: Vec<SwitchEntry>,
}

impl Instruction {
	fn new(pc: u32, opcode: u8, normalized: Normalized) -> Instruction {
		Instruction { pc, opcode, normalized, arg1: 0, arg2: 0, switch_entries: Vec::new() }
	}

	fn end(pc: u32) -> Instruction {
		Instruction::new(pc, opcode::opcodes::NOP, Normalized::End)
	}

	pub fn is_end(&self) -> bool {
		self.normalized == Normalized::End
	}

	/// The absolute pcs this instruction may jump to.
	pub fn targets(&self) -> Vec<i64> {
		let pc = self.pc as i64;
		if self.normalized.is_branch() {
			vec![pc + self.arg1 as i64]
		} else if self.normalized.is_switch() {
			std::iter::once(self.arg1)
				.chain(self.switch_entries.iter().map(|entry| entry.target_offset))
				.map(|offset| pc + offset as i64)
				.collect()
		} else {
			Vec::new()
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionTableEntry {
	pub start_pc: u16,
	pub end_pc: u16,
	pub handler_pc: u16,
	/// `0` catches everything.
	pub catch_type: u16,
	/// The position in the exception table as stored.
	pub ordinal: usize,
}

/// A decoded method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
	max_stack: u16,
	max_locals: u16,
	instructions: Vec<Instruction>,
	exception_table: Vec<ExceptionTableEntry>,
	pc_index_map: Vec<Option<u32>>,
	arg_map: Vec<Option<u16>>,
}

impl Code {
	pub fn max_stack(&self) -> u16 {
		self.max_stack
	}

	pub fn max_locals(&self) -> u16 {
		self.max_locals
	}

	/// The instructions, always ending with the [`Normalized::End`] instruction at the pc after the last real one.
	pub fn instructions(&self) -> &[Instruction] {
		&self.instructions
	}

	pub fn exception_table(&self) -> &[ExceptionTableEntry] {
		&self.exception_table
	}

	/// Maps every pc up to and including the one of the end instruction to the index of the instruction starting there.
	///
	/// The end instruction itself is not in the map.
	pub fn pc_index_map(&self) -> &[Option<u32>] {
		&self.pc_index_map
	}

	pub fn index_of_pc(&self, pc: u32) -> Option<usize> {
		self.pc_index_map.get(pc as usize).copied().flatten().map(|index| index as usize)
	}

	pub fn instruction_at(&self, pc: u32) -> Option<&Instruction> {
		self.index_of_pc(pc).and_then(|index| self.instructions.get(index))
	}

	/// Maps local variable slots holding arguments to the ordinal of the argument, with the receiver being ordinal `0`
	/// for non-static methods.
	///
	/// The second slot of a `long` or `double` argument is `None`.
	pub fn arg_map(&self) -> &[Option<u16>] {
		&self.arg_map
	}
}

/// Reads the contents of a `Code` attribute (everything after `attribute_length`).
///
/// Problems within the instruction stream give [`MethodBody::VerifyError`], except for those in
/// [`IllegalInstruction`]. Everything else is an error.
pub(crate) fn read_code(reader: &mut ByteCursor<'_>, pool: &ConstantPool, descriptor: &str, is_static: bool) -> Result<MethodBody> {
	let max_stack = reader.read_u16()?;
	let max_locals = reader.read_u16()?;

	let code_length = reader.read_u32()?;
	if code_length > MAX_CODE_LENGTH {
		bail!("invalid Code length {code_length}");
	}
	let mut code_reader = reader.section(code_length as usize)?;

	let instructions = match read_instructions(&mut code_reader) {
		Ok(instructions) => Ok(instructions),
		Err(error) if error.downcast_ref::<IllegalInstruction>().is_some() => return Err(error),
		Err(error) => Err(format!("{error:#}")),
	};

	let exception_table = read_exception_table(reader, pool)?;

	skip_attributes(reader, pool)?;

	let arg_map = build_arg_map(descriptor, is_static)?;
	if arg_map.len() > max_locals as usize {
		bail!("arguments can't fit into locals: {} slots needed, but max_locals is {max_locals}", arg_map.len());
	}

	let instructions = match instructions {
		Ok(instructions) => instructions,
		Err(message) => return Ok(MethodBody::VerifyError(message)),
	};

	let pc_index_map = build_pc_index_map(&instructions);

	if let Err(message) = check_targets(&instructions, &pc_index_map, &exception_table) {
		return Ok(MethodBody::VerifyError(message));
	}

	Ok(MethodBody::Code(Code {
		max_stack,
		max_locals,
		instructions,
		exception_table,
		pc_index_map,
		arg_map,
	}))
}

fn read_instructions(reader: &mut ByteCursor<'_>) -> Result<Vec<Instruction>> {
	let start = reader.position();

	let mut instructions = Vec::new();
	while !reader.is_at_end() {
		let pc = (reader.position() - start) as u32;
		let instruction = read_instruction(reader, pc)
			.with_context(|| anyhow!("at bytecode offset {pc}"))?;
		instructions.push(instruction);
	}
	instructions.push(Instruction::end((reader.position() - start) as u32));

	Ok(instructions)
}

/// Skips the padding after a switch opcode, so that the next read starts at a multiple of four from the start of the code.
fn skip_switch_padding(reader: &mut ByteCursor<'_>, pc: u32) -> Result<()> {
	let after_opcode = pc as usize + 1;
	reader.skip((4 - after_opcode % 4) % 4)?;
	Ok(())
}

fn read_instruction(reader: &mut ByteCursor<'_>, pc: u32) -> Result<Instruction> {
	let opcode = reader.read_u8()?;
	let mut info = opcode::info(opcode);
	let mut instruction = Instruction::new(pc, opcode, info.normalized);

	match info.mode {
		Mode::Simple => {},
		Mode::Constant1 | Mode::Local1 => {
			instruction.arg1 = reader.read_u8()? as i32;
		},
		Mode::Constant2 => {
			instruction.arg1 = reader.read_u16()? as i32;
		},
		Mode::Branch2 | Mode::Immediate2 => {
			instruction.arg1 = reader.read_i16()? as i32;
		},
		Mode::Branch4 => {
			instruction.arg1 = reader.read_i32()?;
		},
		Mode::Immediate1 => {
			instruction.arg1 = reader.read_i8()? as i32;
		},
		Mode::Constant2Count1 => {
			instruction.arg1 = reader.read_u16()? as i32;
			instruction.arg2 = reader.read_u8()? as i16;
			let filler = reader.read_u8()?;
			if filler != 0 {
				return Err(IllegalInstruction::InvokeInterfaceFiller(filler).into());
			}
		},
		Mode::Local1Immediate1 => {
			instruction.arg1 = reader.read_u8()? as i32;
			instruction.arg2 = reader.read_i8()? as i16;
		},
		Mode::Constant2Immediate1 => {
			instruction.arg1 = reader.read_u16()? as i32;
			instruction.arg2 = reader.read_i8()? as i16;
		},
		Mode::TableSwitch => {
			skip_switch_padding(reader, pc)?;
			instruction.arg1 = reader.read_i32()?;
			let low = reader.read_i32()?;
			let high = reader.read_i32()?;
			if low > high || high as i64 - low as i64 + 1 > MAX_SWITCH_ENTRIES {
				return Err(IllegalInstruction::TableSwitch { low, high }.into());
			}
			for value in low..=high {
				let target_offset = reader.read_i32()?;
				instruction.switch_entries.push(SwitchEntry { value, target_offset });
			}
		},
		Mode::LookupSwitch => {
			skip_switch_padding(reader, pc)?;
			instruction.arg1 = reader.read_i32()?;
			let count = reader.read_i32()?;
			if count < 0 || count as i64 > MAX_SWITCH_ENTRIES {
				return Err(IllegalInstruction::LookupSwitch { count }.into());
			}
			// the pairs are taken in the order they're stored in, sorted or not
			for _ in 0..count {
				let value = reader.read_i32()?;
				let target_offset = reader.read_i32()?;
				instruction.switch_entries.push(SwitchEntry { value, target_offset });
			}
		},
		Mode::WidePrefix => {
			let wide_opcode = reader.read_u8()?;
			info = opcode::info(wide_opcode);
			instruction.opcode = wide_opcode;
			instruction.normalized = info.normalized;
			match info.wide_mode {
				WideMode::Local2 => {
					instruction.arg1 = reader.read_u16()? as i32;
				},
				WideMode::Local2Immediate2 => {
					instruction.arg1 = reader.read_u16()? as i32;
					instruction.arg2 = reader.read_i16()?;
				},
				WideMode::Unused => bail!("invalid wide prefix on opcode 0x{wide_opcode:02x}"),
			}
		},
		Mode::Unused => bail!("invalid opcode 0x{opcode:02x}"),
	}

	instruction.arg1 = info.transform_arg(instruction.arg1);
	Ok(instruction)
}

fn read_exception_table(reader: &mut ByteCursor<'_>, pool: &ConstantPool) -> Result<Vec<ExceptionTableEntry>> {
	let mut ordinal = 0;
	reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| {
			let entry = ExceptionTableEntry {
				start_pc: r.read_u16()?,
				end_pc: r.read_u16()?,
				handler_pc: r.read_u16()?,
				catch_type: r.read_u16()?,
				ordinal,
			};
			ordinal += 1;

			pool.get_optional_class(entry.catch_type)
				.with_context(|| anyhow!("bad catch type in exception table entry {}", entry.ordinal))?;

			Ok(entry)
		}
	)
}

fn build_pc_index_map(instructions: &[Instruction]) -> Vec<Option<u32>> {
	let Some((end, instructions)) = instructions.split_last() else {
		return Vec::new();
	};

	let mut map = vec![None; end.pc as usize + 1];
	for (index, instruction) in instructions.iter().enumerate() {
		if let Some(slot) = map.get_mut(instruction.pc as usize) {
			*slot = Some(index as u32);
		}
	}
	map
}

fn build_arg_map(descriptor: &str, is_static: bool) -> Result<Vec<Option<u16>>> {
	let categories = descriptor::parameter_categories(descriptor)
		.ok_or_else(|| anyhow!("invalid method descriptor {descriptor:?}"))?;

	let mut arg_map = Vec::with_capacity(categories.len() * 2 + 1);
	let mut ordinal = 0;
	if !is_static {
		arg_map.push(Some(ordinal));
		ordinal += 1;
	}
	for category in categories {
		arg_map.push(Some(ordinal));
		ordinal += 1;
		if category == Category::Two {
			arg_map.push(None);
		}
	}
	Ok(arg_map)
}

/// Checks that all branch, switch and exception handler targets point at the start of an instruction.
fn check_targets(instructions: &[Instruction], pc_index_map: &[Option<u32>], exception_table: &[ExceptionTableEntry]) -> Result<(), String> {
	let is_instruction = |pc: i64| {
		usize::try_from(pc).ok()
			.and_then(|pc| pc_index_map.get(pc))
			.is_some_and(Option::is_some)
	};
	let end_pc = instructions.last().map_or(0, |end| end.pc as i64);

	for instruction in instructions {
		for target in instruction.targets() {
			if !is_instruction(target) {
				return Err(format!("at bytecode offset {}: branch target {target} is not the start of an instruction", instruction.pc));
			}
		}
	}

	for entry in exception_table {
		let start = entry.start_pc as i64;
		let end = entry.end_pc as i64;
		if !is_instruction(start) || !(is_instruction(end) || end == end_pc) || start >= end {
			return Err(format!("exception table entry {} has an illegal range {start}..{end}", entry.ordinal));
		}
		if !is_instruction(entry.handler_pc as i64) {
			return Err(format!("exception table entry {} has an illegal handler pc {}", entry.ordinal, entry.handler_pc));
		}
	}

	Ok(())
}
