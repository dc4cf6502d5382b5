use std::env;

/// How attributes whose length is fixed by the format are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeMode {
	/// Enforce the exact length of `Deprecated` and `InnerClasses` attributes, and require every
	/// non-abstract, non-native method to have a `Code` attribute.
	#[default]
	Strict,
	/// Skip the content of a non-empty `Deprecated` attribute, and read the `InnerClasses` table by its count,
	/// ignoring the declared attribute length. A static initializer without a `Code` attribute becomes a
	/// verification error of that method instead of failing the whole class.
	Lenient,
}

/// Knobs for [`ClassFileReader`](crate::ClassFileReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
	pub attribute_mode: AttributeMode,
	/// Accept one major version past [`Version::MAX_MAJOR`](crate::version::Version::MAX_MAJOR).
	pub experimental_versions: bool,
}

impl ReadOptions {
	/// If set (to anything), [`ReadOptions::from_env`] enables [`ReadOptions::experimental_versions`].
	pub const EXPERIMENTAL_VERSIONS_VAR: &'static str = "DUKECHECK_EXPERIMENTAL_VERSIONS";
	/// If set (to anything), [`ReadOptions::from_env`] selects [`AttributeMode::Lenient`].
	pub const LENIENT_ATTRIBUTES_VAR: &'static str = "DUKECHECK_LENIENT_ATTRIBUTES";

	pub fn strict() -> ReadOptions {
		ReadOptions::default()
	}

	pub fn lenient() -> ReadOptions {
		ReadOptions { attribute_mode: AttributeMode::Lenient, ..ReadOptions::default() }
	}

	pub fn with_experimental_versions(self, experimental_versions: bool) -> ReadOptions {
		ReadOptions { experimental_versions, ..self }
	}

	pub fn from_env() -> ReadOptions {
		ReadOptions {
			attribute_mode: if env::var_os(Self::LENIENT_ATTRIBUTES_VAR).is_some() {
				AttributeMode::Lenient
			} else {
				AttributeMode::Strict
			},
			experimental_versions: env::var_os(Self::EXPERIMENTAL_VERSIONS_VAR).is_some(),
		}
	}

	pub fn is_lenient(&self) -> bool {
		self.attribute_mode == AttributeMode::Lenient
	}
}
