use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A class file version, as `major.minor`.
///
/// Only the major version decides whether a class file can be read, see [`Version::is_supported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
	pub major: u16,
	pub minor: u16,
}

impl Version {
	pub const V1_1: Version = Version::new(45, 3);
	pub const V1_2: Version = Version::new(46, 0);
	pub const V1_3: Version = Version::new(47, 0);
	pub const V1_4: Version = Version::new(48, 0);
	pub const V1_5: Version = Version::new(49, 0);

	/// Lowest readable major version.
	pub const MIN_MAJOR: u16 = Version::V1_1.major;
	/// Highest readable major version, unless experimental versions are enabled.
	pub const MAX_MAJOR: u16 = Version::V1_4.major;

	pub const fn new(major: u16, minor: u16) -> Version {
		Version { major, minor }
	}

	/// The highest readable major version. `experimental` accepts one more.
	pub const fn max_major(experimental: bool) -> u16 {
		if experimental {
			Self::MAX_MAJOR + 1
		} else {
			Self::MAX_MAJOR
		}
	}

	pub fn is_supported(&self, experimental: bool) -> bool {
		(Self::MIN_MAJOR..=Self::max_major(experimental)).contains(&self.major)
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> Ordering {
		self.major.cmp(&other.major)
			.then_with(|| self.minor.cmp(&other.minor))
	}
}

impl Display for Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.major, self.minor)
	}
}
