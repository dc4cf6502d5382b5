use thiserror::Error;
use crate::cursor::Overflow;

/// The message of every format error caused by reading past the end of the data.
pub const TRUNCATED: &str = "truncated class file (or section)";

/// The ways reading a class file can fail.
///
/// Both variants abort the whole parse. Problems confined to a single method body are not reported
/// here, see [`MethodBody::VerifyError`](crate::class::MethodBody::VerifyError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassFileError {
	/// The major version lies outside of the supported range.
	#[error("{label} ({major}.{minor}): unsupported class file version")]
	UnsupportedVersion {
		label: String,
		major: u16,
		minor: u16,
	},
	/// Any other structural or semantic violation.
	///
	/// `class` is the dotted name of the class once it's known, and the input label before that.
	#[error("{class} ({message})")]
	Format {
		class: String,
		message: String,
	},
}

impl ClassFileError {
	/// Turns an internal error into the public error type.
	///
	/// Errors that already are a [`ClassFileError`] are passed through, any overflow anywhere in the chain
	/// becomes the generic truncation message, and everything else keeps its full context chain.
	pub(crate) fn classify(error: anyhow::Error, class: &str) -> ClassFileError {
		let error = match error.downcast::<ClassFileError>() {
			Ok(error) => return error,
			Err(error) => error,
		};

		let message = if error.chain().any(|cause| cause.is::<Overflow>()) {
			TRUNCATED.to_owned()
		} else {
			format!("{error:#}")
		};

		ClassFileError::Format { class: class.to_owned(), message }
	}

	/// The message of a format error, without the class.
	pub fn message(&self) -> Option<&str> {
		match self {
			ClassFileError::UnsupportedVersion { .. } => None,
			ClassFileError::Format { message, .. } => Some(message),
		}
	}
}
