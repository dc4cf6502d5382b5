//! The static description of every opcode: how its operands are laid out, and what it normalizes to.
//!
//! Look opcodes up with [`info`].

/// The raw opcode bytes.
pub mod opcodes {
	pub const NOP: u8 = 0x00;
	pub const ACONST_NULL: u8 = 0x01;
	pub const ICONST_M1: u8 = 0x02;
	pub const ICONST_0: u8 = 0x03;
	pub const ICONST_1: u8 = 0x04;
	pub const ICONST_2: u8 = 0x05;
	pub const ICONST_3: u8 = 0x06;
	pub const ICONST_4: u8 = 0x07;
	pub const ICONST_5: u8 = 0x08;
	pub const LCONST_0: u8 = 0x09;
	pub const LCONST_1: u8 = 0x0a;
	pub const FCONST_0: u8 = 0x0b;
	pub const FCONST_1: u8 = 0x0c;
	pub const FCONST_2: u8 = 0x0d;
	pub const DCONST_0: u8 = 0x0e;
	pub const DCONST_1: u8 = 0x0f;
	pub const BIPUSH: u8 = 0x10;
	pub const SIPUSH: u8 = 0x11;
	pub const LDC: u8 = 0x12;
	pub const LDC_W: u8 = 0x13;
	pub const LDC2_W: u8 = 0x14;
	pub const ILOAD: u8 = 0x15;
	pub const LLOAD: u8 = 0x16;
	pub const FLOAD: u8 = 0x17;
	pub const DLOAD: u8 = 0x18;
	pub const ALOAD: u8 = 0x19;
	pub const ILOAD_0: u8 = 0x1a;
	pub const ILOAD_1: u8 = 0x1b;
	pub const ILOAD_2: u8 = 0x1c;
	pub const ILOAD_3: u8 = 0x1d;
	pub const LLOAD_0: u8 = 0x1e;
	pub const LLOAD_1: u8 = 0x1f;
	pub const LLOAD_2: u8 = 0x20;
	pub const LLOAD_3: u8 = 0x21;
	pub const FLOAD_0: u8 = 0x22;
	pub const FLOAD_1: u8 = 0x23;
	pub const FLOAD_2: u8 = 0x24;
	pub const FLOAD_3: u8 = 0x25;
	pub const DLOAD_0: u8 = 0x26;
	pub const DLOAD_1: u8 = 0x27;
	pub const DLOAD_2: u8 = 0x28;
	pub const DLOAD_3: u8 = 0x29;
	pub const ALOAD_0: u8 = 0x2a;
	pub const ALOAD_1: u8 = 0x2b;
	pub const ALOAD_2: u8 = 0x2c;
	pub const ALOAD_3: u8 = 0x2d;
	pub const IALOAD: u8 = 0x2e;
	pub const LALOAD: u8 = 0x2f;
	pub const FALOAD: u8 = 0x30;
	pub const DALOAD: u8 = 0x31;
	pub const AALOAD: u8 = 0x32;
	pub const BALOAD: u8 = 0x33;
	pub const CALOAD: u8 = 0x34;
	pub const SALOAD: u8 = 0x35;
	pub const ISTORE: u8 = 0x36;
	pub const LSTORE: u8 = 0x37;
	pub const FSTORE: u8 = 0x38;
	pub const DSTORE: u8 = 0x39;
	pub const ASTORE: u8 = 0x3a;
	pub const ISTORE_0: u8 = 0x3b;
	pub const ISTORE_1: u8 = 0x3c;
	pub const ISTORE_2: u8 = 0x3d;
	pub const ISTORE_3: u8 = 0x3e;
	pub const LSTORE_0: u8 = 0x3f;
	pub const LSTORE_1: u8 = 0x40;
	pub const LSTORE_2: u8 = 0x41;
	pub const LSTORE_3: u8 = 0x42;
	pub const FSTORE_0: u8 = 0x43;
	pub const FSTORE_1: u8 = 0x44;
	pub const FSTORE_2: u8 = 0x45;
	pub const FSTORE_3: u8 = 0x46;
	pub const DSTORE_0: u8 = 0x47;
	pub const DSTORE_1: u8 = 0x48;
	pub const DSTORE_2: u8 = 0x49;
	pub const DSTORE_3: u8 = 0x4a;
	pub const ASTORE_0: u8 = 0x4b;
	pub const ASTORE_1: u8 = 0x4c;
	pub const ASTORE_2: u8 = 0x4d;
	pub const ASTORE_3: u8 = 0x4e;
	pub const IASTORE: u8 = 0x4f;
	pub const LASTORE: u8 = 0x50;
	pub const FASTORE: u8 = 0x51;
	pub const DASTORE: u8 = 0x52;
	pub const AASTORE: u8 = 0x53;
	pub const BASTORE: u8 = 0x54;
	pub const CASTORE: u8 = 0x55;
	pub const SASTORE: u8 = 0x56;
	pub const POP: u8 = 0x57;
	pub const POP2: u8 = 0x58;
	pub const DUP: u8 = 0x59;
	pub const DUP_X1: u8 = 0x5a;
	pub const DUP_X2: u8 = 0x5b;
	pub const DUP2: u8 = 0x5c;
	pub const DUP2_X1: u8 = 0x5d;
	pub const DUP2_X2: u8 = 0x5e;
	pub const SWAP: u8 = 0x5f;
	pub const IADD: u8 = 0x60;
	pub const LADD: u8 = 0x61;
	pub const FADD: u8 = 0x62;
	pub const DADD: u8 = 0x63;
	pub const ISUB: u8 = 0x64;
	pub const LSUB: u8 = 0x65;
	pub const FSUB: u8 = 0x66;
	pub const DSUB: u8 = 0x67;
	pub const IMUL: u8 = 0x68;
	pub const LMUL: u8 = 0x69;
	pub const FMUL: u8 = 0x6a;
	pub const DMUL: u8 = 0x6b;
	pub const IDIV: u8 = 0x6c;
	pub const LDIV: u8 = 0x6d;
	pub const FDIV: u8 = 0x6e;
	pub const DDIV: u8 = 0x6f;
	pub const IREM: u8 = 0x70;
	pub const LREM: u8 = 0x71;
	pub const FREM: u8 = 0x72;
	pub const DREM: u8 = 0x73;
	pub const INEG: u8 = 0x74;
	pub const LNEG: u8 = 0x75;
	pub const FNEG: u8 = 0x76;
	pub const DNEG: u8 = 0x77;
	pub const ISHL: u8 = 0x78;
	pub const LSHL: u8 = 0x79;
	pub const ISHR: u8 = 0x7a;
	pub const LSHR: u8 = 0x7b;
	pub const IUSHR: u8 = 0x7c;
	pub const LUSHR: u8 = 0x7d;
	pub const IAND: u8 = 0x7e;
	pub const LAND: u8 = 0x7f;
	pub const IOR: u8 = 0x80;
	pub const LOR: u8 = 0x81;
	pub const IXOR: u8 = 0x82;
	pub const LXOR: u8 = 0x83;
	pub const IINC: u8 = 0x84;
	pub const I2L: u8 = 0x85;
	pub const I2F: u8 = 0x86;
	pub const I2D: u8 = 0x87;
	pub const L2I: u8 = 0x88;
	pub const L2F: u8 = 0x89;
	pub const L2D: u8 = 0x8a;
	pub const F2I: u8 = 0x8b;
	pub const F2L: u8 = 0x8c;
	pub const F2D: u8 = 0x8d;
	pub const D2I: u8 = 0x8e;
	pub const D2L: u8 = 0x8f;
	pub const D2F: u8 = 0x90;
	pub const I2B: u8 = 0x91;
	pub const I2C: u8 = 0x92;
	pub const I2S: u8 = 0x93;
	pub const LCMP: u8 = 0x94;
	pub const FCMPL: u8 = 0x95;
	pub const FCMPG: u8 = 0x96;
	pub const DCMPL: u8 = 0x97;
	pub const DCMPG: u8 = 0x98;
	pub const IFEQ: u8 = 0x99;
	pub const IFNE: u8 = 0x9a;
	pub const IFLT: u8 = 0x9b;
	pub const IFGE: u8 = 0x9c;
	pub const IFGT: u8 = 0x9d;
	pub const IFLE: u8 = 0x9e;
	pub const IF_ICMPEQ: u8 = 0x9f;
	pub const IF_ICMPNE: u8 = 0xa0;
	pub const IF_ICMPLT: u8 = 0xa1;
	pub const IF_ICMPGE: u8 = 0xa2;
	pub const IF_ICMPGT: u8 = 0xa3;
	pub const IF_ICMPLE: u8 = 0xa4;
	pub const IF_ACMPEQ: u8 = 0xa5;
	pub const IF_ACMPNE: u8 = 0xa6;
	pub const GOTO: u8 = 0xa7;
	pub const JSR: u8 = 0xa8;
	pub const RET: u8 = 0xa9;
	pub const TABLESWITCH: u8 = 0xaa;
	pub const LOOKUPSWITCH: u8 = 0xab;
	pub const IRETURN: u8 = 0xac;
	pub const LRETURN: u8 = 0xad;
	pub const FRETURN: u8 = 0xae;
	pub const DRETURN: u8 = 0xaf;
	pub const ARETURN: u8 = 0xb0;
	pub const RETURN: u8 = 0xb1;
	pub const GETSTATIC: u8 = 0xb2;
	pub const PUTSTATIC: u8 = 0xb3;
	pub const GETFIELD: u8 = 0xb4;
	pub const PUTFIELD: u8 = 0xb5;
	pub const INVOKEVIRTUAL: u8 = 0xb6;
	pub const INVOKESPECIAL: u8 = 0xb7;
	pub const INVOKESTATIC: u8 = 0xb8;
	pub const INVOKEINTERFACE: u8 = 0xb9;
	pub const NEW: u8 = 0xbb;
	pub const NEWARRAY: u8 = 0xbc;
	pub const ANEWARRAY: u8 = 0xbd;
	pub const ARRAYLENGTH: u8 = 0xbe;
	pub const ATHROW: u8 = 0xbf;
	pub const CHECKCAST: u8 = 0xc0;
	pub const INSTANCEOF: u8 = 0xc1;
	pub const MONITORENTER: u8 = 0xc2;
	pub const MONITOREXIT: u8 = 0xc3;
	pub const WIDE: u8 = 0xc4;
	pub const MULTIANEWARRAY: u8 = 0xc5;
	pub const IFNULL: u8 = 0xc6;
	pub const IFNONNULL: u8 = 0xc7;
	pub const GOTO_W: u8 = 0xc8;
	pub const JSR_W: u8 = 0xc9;
}

use opcodes::*;

/// How the operands following an opcode are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// No operands.
	Simple,
	/// An unsigned 1-byte constant pool index.
	Constant1,
	/// An unsigned 1-byte local variable index.
	Local1,
	/// An unsigned 2-byte constant pool index.
	Constant2,
	/// A signed 2-byte branch offset.
	Branch2,
	/// A signed 4-byte branch offset.
	Branch4,
	/// A 2-byte constant pool index, a 1-byte count, and a zero byte.
	Constant2Count1,
	/// A signed 1-byte immediate.
	Immediate1,
	/// A signed 2-byte immediate.
	Immediate2,
	/// An unsigned 1-byte local variable index and a signed 1-byte immediate.
	Local1Immediate1,
	/// A 2-byte constant pool index and a signed 1-byte immediate.
	Constant2Immediate1,
	TableSwitch,
	LookupSwitch,
	/// The next opcode is read in its [`WideMode`].
	WidePrefix,
	/// Not an opcode.
	Unused,
}

/// How the operands of an opcode following the `wide` prefix are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WideMode {
	/// An unsigned 2-byte local variable index.
	Local2,
	/// An unsigned 2-byte local variable index and a signed 2-byte immediate.
	Local2Immediate2,
	/// The opcode can't be prefixed with `wide`.
	Unused,
}

/// The opcodes with aliases collapsed into one.
///
/// The short forms like `iload_1` normalize to their long form (`iload` with argument `1`), `iconst_<n>`,
/// `bipush` and `sipush` to [`Normalized::Iconst`], and the `_w` variants of `ldc`, `goto` and `jsr` to
/// the plain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {
	Nop, AconstNull,
	Iconst, Lconst0, Lconst1, Fconst0, Fconst1, Fconst2, Dconst0, Dconst1,
	Ldc, Ldc2W,
	Iload, Lload, Fload, Dload, Aload,
	Iaload, Laload, Faload, Daload, Aaload, Baload, Caload, Saload,
	Istore, Lstore, Fstore, Dstore, Astore,
	Iastore, Lastore, Fastore, Dastore, Aastore, Bastore, Castore, Sastore,
	Pop, Pop2, Dup, DupX1, DupX2, Dup2, Dup2X1, Dup2X2, Swap,
	Iadd, Ladd, Fadd, Dadd, Isub, Lsub, Fsub, Dsub,
	Imul, Lmul, Fmul, Dmul, Idiv, Ldiv, Fdiv, Ddiv,
	Irem, Lrem, Frem, Drem, Ineg, Lneg, Fneg, Dneg,
	Ishl, Lshl, Ishr, Lshr, Iushr, Lushr, Iand, Land, Ior, Lor, Ixor, Lxor,
	Iinc,
	I2l, I2f, I2d, L2i, L2f, L2d, F2i, F2l, F2d, D2i, D2l, D2f, I2b, I2c, I2s,
	Lcmp, Fcmpl, Fcmpg, Dcmpl, Dcmpg,
	Ifeq, Ifne, Iflt, Ifge, Ifgt, Ifle,
	IfIcmpeq, IfIcmpne, IfIcmplt, IfIcmpge, IfIcmpgt, IfIcmple, IfAcmpeq, IfAcmpne,
	Goto, Jsr, Ret,
	Tableswitch, Lookupswitch,
	Ireturn, Lreturn, Freturn, Dreturn, Areturn, Return,
	Getstatic, Putstatic, Getfield, Putfield,
	Invokevirtual, Invokespecial, Invokestatic, Invokeinterface,
	New, Newarray, Anewarray, Arraylength, Athrow, Checkcast, Instanceof,
	Monitorenter, Monitorexit, Multianewarray,
	Ifnull, Ifnonnull,
	/// The synthetic instruction marking the end of a method body.
	End,
	/// Unused opcodes and the `wide` prefix itself.
	Invalid,
}

impl Normalized {
	pub fn is_branch(self) -> bool {
		use Normalized::*;
		matches!(self,
			Ifeq | Ifne | Iflt | Ifge | Ifgt | Ifle |
			IfIcmpeq | IfIcmpne | IfIcmplt | IfIcmpge | IfIcmpgt | IfIcmple | IfAcmpeq | IfAcmpne |
			Goto | Jsr | Ifnull | Ifnonnull
		)
	}

	pub fn is_switch(self) -> bool {
		matches!(self, Normalized::Tableswitch | Normalized::Lookupswitch)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
	pub mode: Mode,
	pub wide_mode: WideMode,
	pub normalized: Normalized,
	/// The argument the short forms carry in their opcode, like the `2` of `istore_2`.
	implicit_arg: Option<i32>,
}

impl OpcodeInfo {
	/// Maps the raw operand to the argument of the normalized opcode.
	pub fn transform_arg(&self, raw: i32) -> i32 {
		self.implicit_arg.unwrap_or(raw)
	}
}

const UNUSED: OpcodeInfo = with(Mode::Unused, Normalized::Invalid);

const fn with(mode: Mode, normalized: Normalized) -> OpcodeInfo {
	OpcodeInfo { mode, wide_mode: WideMode::Unused, normalized, implicit_arg: None }
}

const fn simple(normalized: Normalized) -> OpcodeInfo {
	with(Mode::Simple, normalized)
}

const fn implicit(normalized: Normalized, arg: i32) -> OpcodeInfo {
	OpcodeInfo { mode: Mode::Simple, wide_mode: WideMode::Unused, normalized, implicit_arg: Some(arg) }
}

/// Loads, stores and `ret`, which may be prefixed with `wide`.
const fn local(normalized: Normalized) -> OpcodeInfo {
	OpcodeInfo { mode: Mode::Local1, wide_mode: WideMode::Local2, normalized, implicit_arg: None }
}

const fn describe(opcode: u8) -> OpcodeInfo {
	use Normalized::*;
	match opcode {
		NOP => simple(Nop),
		ACONST_NULL => simple(AconstNull),
		ICONST_M1 => implicit(Iconst, -1),
		ICONST_0 => implicit(Iconst, 0),
		ICONST_1 => implicit(Iconst, 1),
		ICONST_2 => implicit(Iconst, 2),
		ICONST_3 => implicit(Iconst, 3),
		ICONST_4 => implicit(Iconst, 4),
		ICONST_5 => implicit(Iconst, 5),
		LCONST_0 => simple(Lconst0),
		LCONST_1 => simple(Lconst1),
		FCONST_0 => simple(Fconst0),
		FCONST_1 => simple(Fconst1),
		FCONST_2 => simple(Fconst2),
		DCONST_0 => simple(Dconst0),
		DCONST_1 => simple(Dconst1),
		BIPUSH => with(Mode::Immediate1, Iconst),
		SIPUSH => with(Mode::Immediate2, Iconst),
		LDC => with(Mode::Constant1, Ldc),
		LDC_W => with(Mode::Constant2, Ldc),
		LDC2_W => with(Mode::Constant2, Ldc2W),
		ILOAD => local(Iload),
		LLOAD => local(Lload),
		FLOAD => local(Fload),
		DLOAD => local(Dload),
		ALOAD => local(Aload),
		ILOAD_0 => implicit(Iload, 0),
		ILOAD_1 => implicit(Iload, 1),
		ILOAD_2 => implicit(Iload, 2),
		ILOAD_3 => implicit(Iload, 3),
		LLOAD_0 => implicit(Lload, 0),
		LLOAD_1 => implicit(Lload, 1),
		LLOAD_2 => implicit(Lload, 2),
		LLOAD_3 => implicit(Lload, 3),
		FLOAD_0 => implicit(Fload, 0),
		FLOAD_1 => implicit(Fload, 1),
		FLOAD_2 => implicit(Fload, 2),
		FLOAD_3 => implicit(Fload, 3),
		DLOAD_0 => implicit(Dload, 0),
		DLOAD_1 => implicit(Dload, 1),
		DLOAD_2 => implicit(Dload, 2),
		DLOAD_3 => implicit(Dload, 3),
		ALOAD_0 => implicit(Aload, 0),
		ALOAD_1 => implicit(Aload, 1),
		ALOAD_2 => implicit(Aload, 2),
		ALOAD_3 => implicit(Aload, 3),
		IALOAD => simple(Iaload),
		LALOAD => simple(Laload),
		FALOAD => simple(Faload),
		DALOAD => simple(Daload),
		AALOAD => simple(Aaload),
		BALOAD => simple(Baload),
		CALOAD => simple(Caload),
		SALOAD => simple(Saload),
		ISTORE => local(Istore),
		LSTORE => local(Lstore),
		FSTORE => local(Fstore),
		DSTORE => local(Dstore),
		ASTORE => local(Astore),
		ISTORE_0 => implicit(Istore, 0),
		ISTORE_1 => implicit(Istore, 1),
		ISTORE_2 => implicit(Istore, 2),
		ISTORE_3 => implicit(Istore, 3),
		LSTORE_0 => implicit(Lstore, 0),
		LSTORE_1 => implicit(Lstore, 1),
		LSTORE_2 => implicit(Lstore, 2),
		LSTORE_3 => implicit(Lstore, 3),
		FSTORE_0 => implicit(Fstore, 0),
		FSTORE_1 => implicit(Fstore, 1),
		FSTORE_2 => implicit(Fstore, 2),
		FSTORE_3 => implicit(Fstore, 3),
		DSTORE_0 => implicit(Dstore, 0),
		DSTORE_1 => implicit(Dstore, 1),
		DSTORE_2 => implicit(Dstore, 2),
		DSTORE_3 => implicit(Dstore, 3),
		ASTORE_0 => implicit(Astore, 0),
		ASTORE_1 => implicit(Astore, 1),
		ASTORE_2 => implicit(Astore, 2),
		ASTORE_3 => implicit(Astore, 3),
		IASTORE => simple(Iastore),
		LASTORE => simple(Lastore),
		FASTORE => simple(Fastore),
		DASTORE => simple(Dastore),
		AASTORE => simple(Aastore),
		BASTORE => simple(Bastore),
		CASTORE => simple(Castore),
		SASTORE => simple(Sastore),
		POP => simple(Pop),
		POP2 => simple(Pop2),
		DUP => simple(Dup),
		DUP_X1 => simple(DupX1),
		DUP_X2 => simple(DupX2),
		DUP2 => simple(Dup2),
		DUP2_X1 => simple(Dup2X1),
		DUP2_X2 => simple(Dup2X2),
		SWAP => simple(Swap),
		IADD => simple(Iadd),
		LADD => simple(Ladd),
		FADD => simple(Fadd),
		DADD => simple(Dadd),
		ISUB => simple(Isub),
		LSUB => simple(Lsub),
		FSUB => simple(Fsub),
		DSUB => simple(Dsub),
		IMUL => simple(Imul),
		LMUL => simple(Lmul),
		FMUL => simple(Fmul),
		DMUL => simple(Dmul),
		IDIV => simple(Idiv),
		LDIV => simple(Ldiv),
		FDIV => simple(Fdiv),
		DDIV => simple(Ddiv),
		IREM => simple(Irem),
		LREM => simple(Lrem),
		FREM => simple(Frem),
		DREM => simple(Drem),
		INEG => simple(Ineg),
		LNEG => simple(Lneg),
		FNEG => simple(Fneg),
		DNEG => simple(Dneg),
		ISHL => simple(Ishl),
		LSHL => simple(Lshl),
		ISHR => simple(Ishr),
		LSHR => simple(Lshr),
		IUSHR => simple(Iushr),
		LUSHR => simple(Lushr),
		IAND => simple(Iand),
		LAND => simple(Land),
		IOR => simple(Ior),
		LOR => simple(Lor),
		IXOR => simple(Ixor),
		LXOR => simple(Lxor),
		IINC => OpcodeInfo {
			mode: Mode::Local1Immediate1,
			wide_mode: WideMode::Local2Immediate2,
			normalized: Iinc,
			implicit_arg: None,
		},
		I2L => simple(I2l),
		I2F => simple(I2f),
		I2D => simple(I2d),
		L2I => simple(L2i),
		L2F => simple(L2f),
		L2D => simple(L2d),
		F2I => simple(F2i),
		F2L => simple(F2l),
		F2D => simple(F2d),
		D2I => simple(D2i),
		D2L => simple(D2l),
		D2F => simple(D2f),
		I2B => simple(I2b),
		I2C => simple(I2c),
		I2S => simple(I2s),
		LCMP => simple(Lcmp),
		FCMPL => simple(Fcmpl),
		FCMPG => simple(Fcmpg),
		DCMPL => simple(Dcmpl),
		DCMPG => simple(Dcmpg),
		IFEQ => with(Mode::Branch2, Ifeq),
		IFNE => with(Mode::Branch2, Ifne),
		IFLT => with(Mode::Branch2, Iflt),
		IFGE => with(Mode::Branch2, Ifge),
		IFGT => with(Mode::Branch2, Ifgt),
		IFLE => with(Mode::Branch2, Ifle),
		IF_ICMPEQ => with(Mode::Branch2, IfIcmpeq),
		IF_ICMPNE => with(Mode::Branch2, IfIcmpne),
		IF_ICMPLT => with(Mode::Branch2, IfIcmplt),
		IF_ICMPGE => with(Mode::Branch2, IfIcmpge),
		IF_ICMPGT => with(Mode::Branch2, IfIcmpgt),
		IF_ICMPLE => with(Mode::Branch2, IfIcmple),
		IF_ACMPEQ => with(Mode::Branch2, IfAcmpeq),
		IF_ACMPNE => with(Mode::Branch2, IfAcmpne),
		GOTO => with(Mode::Branch2, Goto),
		JSR => with(Mode::Branch2, Jsr),
		RET => local(Ret),
		TABLESWITCH => with(Mode::TableSwitch, Tableswitch),
		LOOKUPSWITCH => with(Mode::LookupSwitch, Lookupswitch),
		IRETURN => simple(Ireturn),
		LRETURN => simple(Lreturn),
		FRETURN => simple(Freturn),
		DRETURN => simple(Dreturn),
		ARETURN => simple(Areturn),
		RETURN => simple(Return),
		GETSTATIC => with(Mode::Constant2, Getstatic),
		PUTSTATIC => with(Mode::Constant2, Putstatic),
		GETFIELD => with(Mode::Constant2, Getfield),
		PUTFIELD => with(Mode::Constant2, Putfield),
		INVOKEVIRTUAL => with(Mode::Constant2, Invokevirtual),
		INVOKESPECIAL => with(Mode::Constant2, Invokespecial),
		INVOKESTATIC => with(Mode::Constant2, Invokestatic),
		INVOKEINTERFACE => with(Mode::Constant2Count1, Invokeinterface),
		NEW => with(Mode::Constant2, New),
		NEWARRAY => with(Mode::Immediate1, Newarray),
		ANEWARRAY => with(Mode::Constant2, Anewarray),
		ARRAYLENGTH => simple(Arraylength),
		ATHROW => simple(Athrow),
		CHECKCAST => with(Mode::Constant2, Checkcast),
		INSTANCEOF => with(Mode::Constant2, Instanceof),
		MONITORENTER => simple(Monitorenter),
		MONITOREXIT => simple(Monitorexit),
		WIDE => with(Mode::WidePrefix, Invalid),
		MULTIANEWARRAY => with(Mode::Constant2Immediate1, Multianewarray),
		IFNULL => with(Mode::Branch2, Ifnull),
		IFNONNULL => with(Mode::Branch2, Ifnonnull),
		GOTO_W => with(Mode::Branch4, Goto),
		JSR_W => with(Mode::Branch4, Jsr),
		_ => UNUSED,
	}
}

const fn build_table() -> [OpcodeInfo; 256] {
	let mut table = [UNUSED; 256];
	let mut opcode = 0;
	while opcode < 256 {
		table[opcode] = describe(opcode as u8);
		opcode += 1;
	}
	table
}

static TABLE: [OpcodeInfo; 256] = build_table();

/// Looks up the description of a raw opcode.
pub fn info(opcode: u8) -> &'static OpcodeInfo {
	&TABLE[opcode as usize]
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::opcode::{info, Mode, Normalized, WideMode};
	use crate::opcode::opcodes::*;

	#[test]
	fn aliases_collapse() {
		assert_eq!(info(ILOAD_2).normalized, Normalized::Iload);
		assert_eq!(info(ILOAD_2).transform_arg(0), 2);
		assert_eq!(info(ILOAD).transform_arg(7), 7);

		assert_eq!(info(ICONST_M1).normalized, Normalized::Iconst);
		assert_eq!(info(ICONST_M1).transform_arg(0), -1);
		assert_eq!(info(BIPUSH).normalized, Normalized::Iconst);
		assert_eq!(info(SIPUSH).transform_arg(-300), -300);

		assert_eq!(info(LDC_W).normalized, Normalized::Ldc);
		assert_eq!(info(GOTO_W).normalized, Normalized::Goto);
		assert_eq!(info(JSR_W).normalized, Normalized::Jsr);
		assert_eq!(info(ASTORE_3).normalized, Normalized::Astore);
	}

	#[test]
	fn modes() {
		assert_eq!(info(NOP).mode, Mode::Simple);
		assert_eq!(info(LDC).mode, Mode::Constant1);
		assert_eq!(info(GOTO_W).mode, Mode::Branch4);
		assert_eq!(info(INVOKEINTERFACE).mode, Mode::Constant2Count1);
		assert_eq!(info(MULTIANEWARRAY).mode, Mode::Constant2Immediate1);
		assert_eq!(info(TABLESWITCH).mode, Mode::TableSwitch);
		assert_eq!(info(WIDE).mode, Mode::WidePrefix);
		assert_eq!(info(0xba).mode, Mode::Unused);
		assert_eq!(info(0xff).mode, Mode::Unused);
	}

	#[test]
	fn wide_modes() {
		assert_eq!(info(ILOAD).wide_mode, WideMode::Local2);
		assert_eq!(info(RET).wide_mode, WideMode::Local2);
		assert_eq!(info(IINC).wide_mode, WideMode::Local2Immediate2);
		assert_eq!(info(ILOAD_0).wide_mode, WideMode::Unused);
		assert_eq!(info(GOTO).wide_mode, WideMode::Unused);
	}

	#[test]
	fn every_used_opcode_has_a_normalized_form() {
		for opcode in 0..=u8::MAX {
			let info = info(opcode);
			match info.mode {
				Mode::Unused | Mode::WidePrefix => assert_eq!(info.normalized, Normalized::Invalid, "{opcode:#04x}"),
				_ => assert!(info.normalized != Normalized::Invalid, "{opcode:#04x}"),
			}
		}
	}
}
