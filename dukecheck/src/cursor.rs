//! The bounds-checked big-endian reader every other part of the crate reads through.

use anyhow::{Context, Result};
use thiserror::Error;

/// A read went past the end of the buffer or of the current section.
///
/// This is the only way reading raw bytes can fail. At the parse boundary it turns into the
/// generic "truncated class file" format error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tried to read {wanted} bytes at offset {position}, but only {available} are left")]
pub struct Overflow {
	pub position: usize,
	pub wanted: usize,
	pub available: usize,
}

/// A cursor over a window `[position, end)` of a byte slice.
///
/// Positions are always absolute offsets into the underlying slice, also for sections.
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
	data: &'a [u8],
	position: usize,
	end: usize,
}

impl<'a> ByteCursor<'a> {
	pub(crate) fn new(data: &'a [u8], offset: usize, length: usize) -> Result<ByteCursor<'a>, Overflow> {
		match offset.checked_add(length) {
			Some(end) if end <= data.len() => Ok(ByteCursor { data, position: offset, end }),
			_ => Err(Overflow { position: offset, wanted: length, available: data.len().saturating_sub(offset) }),
		}
	}

	pub(crate) fn position(&self) -> usize {
		self.position
	}

	pub(crate) fn end(&self) -> usize {
		self.end
	}

	pub(crate) fn remaining(&self) -> usize {
		self.end - self.position
	}

	pub(crate) fn is_at_end(&self) -> bool {
		self.position == self.end
	}

	/// Returns the next `n` bytes and moves past them.
	pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], Overflow> {
		if n > self.remaining() {
			return Err(Overflow { position: self.position, wanted: n, available: self.remaining() });
		}
		let slice = &self.data[self.position..self.position + n];
		self.position += n;
		Ok(slice)
	}

	pub(crate) fn skip(&mut self, n: usize) -> Result<(), Overflow> {
		self.take(n).map(|_| ())
	}

	/// Splits off the next `n` bytes as their own cursor, and moves this one past them.
	///
	/// The section keeps reporting absolute positions.
	pub(crate) fn section(&mut self, n: usize) -> Result<ByteCursor<'a>, Overflow> {
		let start = self.position;
		self.skip(n)?;
		Ok(ByteCursor { data: self.data, position: start, end: start + n })
	}
}

pub(crate) trait ClassRead {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]>;

	fn read_u8(&mut self) -> Result<u8> {
		Ok(u8::from_be_bytes(self.read_n().context("couldn't read u8, perhaps the data's end is reached?")?))
	}
	fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_n().context("couldn't read u16, perhaps the data's end is reached?")?))
	}
	fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_n().context("couldn't read u32, perhaps the data's end is reached?")?))
	}
	fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.read_n().context("couldn't read i8, perhaps the data's end is reached?")?))
	}
	fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.read_n().context("couldn't read i16, perhaps the data's end is reached?")?))
	}
	fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_n().context("couldn't read i32, perhaps the data's end is reached?")?))
	}
	fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_n().context("couldn't read i64, perhaps the data's end is reached?")?))
	}
	fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_be_bytes(self.read_n().context("couldn't read f32, perhaps the data's end is reached?")?))
	}
	fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_be_bytes(self.read_n().context("couldn't read f64, perhaps the data's end is reached?")?))
	}

	fn read_u16_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u16()? as usize)
	}
	fn read_u32_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u32()? as usize)
	}

	fn read_vec<T, S, E>(&mut self, get_size: S, mut get_element: E) -> Result<Vec<T>>
		where
			S: FnOnce(&mut Self) -> Result<usize>,
			E: FnMut(&mut Self) -> Result<T>
	{
		let size = get_size(self)?;
		let mut vec = Vec::with_capacity(size);
		for _ in 0..size {
			vec.push(get_element(self)?);
		}
		Ok(vec)
	}
}

impl ClassRead for ByteCursor<'_> {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut buf = [0u8; N];
		buf.copy_from_slice(self.take(N)?);
		Ok(buf)
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::cursor::{ByteCursor, ClassRead, Overflow};

	#[test]
	fn big_endian_reads() -> Result<()> {
		let data = [0x00, 0x01, 0x02, 0x03, 0xff, 0xfe, 0x3f, 0x80, 0x00, 0x00];
		let mut cursor = ByteCursor::new(&data, 0, data.len())?;

		assert_eq!(cursor.read_u16()?, 0x0001);
		assert_eq!(cursor.read_u16()?, 0x0203);
		assert_eq!(cursor.read_i16()?, -2);
		assert_eq!(cursor.read_f32()?, 1.0);
		assert!(cursor.is_at_end());

		Ok(())
	}

	#[test]
	fn window_and_sections() -> Result<()> {
		let data = [9, 9, 1, 2, 3, 4, 5, 9];
		let mut cursor = ByteCursor::new(&data, 2, 5)?;
		assert_eq!(cursor.position(), 2);
		assert_eq!(cursor.end(), 7);

		let mut section = cursor.section(3)?;
		assert_eq!(cursor.position(), 5);
		assert_eq!(section.position(), 2);
		assert_eq!(section.read_u8()?, 1);
		assert_eq!(section.read_u16()?, 0x0203);
		assert!(section.is_at_end());

		let err = section.read_u8().unwrap_err();
		assert!(err.downcast_ref::<Overflow>().is_some());

		assert_eq!(cursor.take(2)?, &[4, 5]);
		assert!(cursor.is_at_end());

		Ok(())
	}

	#[test]
	fn overflowing_window() {
		let data = [0u8; 4];
		assert_eq!(
			ByteCursor::new(&data, 2, 3).unwrap_err(),
			Overflow { position: 2, wanted: 3, available: 2 }
		);
		assert!(ByteCursor::new(&data, usize::MAX, 2).is_err());
	}

	#[test]
	fn section_past_end() -> Result<()> {
		let data = [0u8; 4];
		let mut cursor = ByteCursor::new(&data, 0, 4)?;
		cursor.skip(1)?;
		assert_eq!(
			cursor.section(4).unwrap_err(),
			Overflow { position: 1, wanted: 4, available: 3 }
		);
		assert_eq!(cursor.position(), 1);
		Ok(())
	}
}
