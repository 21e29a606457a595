//! Partition key derivation from a module path.

/// Key for resources declared outside any module.
pub const ROOT_KEY: &str = "root";
/// Key for resources whose path names no module boundary.
pub const MISC_KEY: &str = "misc";

const MODULE_TOKEN: &str = "module";

/// Derive the group key for a module path.
///
/// Paths embed module boundaries as `module.<name>`. The name following the
/// first such boundary wins; nested modules are folded into their top-level
/// module. A `module` segment with nothing after it does not count.
pub fn key_of(module_path: Option<&str>) -> String {
	let Some(path) = module_path.filter(|p| !p.is_empty()) else {
		return ROOT_KEY.to_string();
	};

	let mut segments = path.split('.').peekable();
	while let Some(segment) = segments.next() {
		if segment != MODULE_TOKEN {
			continue;
		}
		if let Some(name) = segments.peek().filter(|s| !s.is_empty()) {
			return name.to_string();
		}
	}
	MISC_KEY.to_string()
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(None, "root")]
	#[case(Some(""), "root")]
	#[case(Some("foo.module.vpc.bar"), "vpc")]
	#[case(Some("module.eks"), "eks")]
	#[case(Some("foo.bar"), "misc")]
	#[case(Some("a.module.x.module.y"), "x")]
	#[case(Some("a.module"), "misc")]
	#[case(Some("module..module.db"), "db")]
	#[case(Some("modules.vpc"), "misc")]
	fn derives_key(#[case] path: Option<&str>, #[case] expected: &str) {
		assert_eq!(key_of(path), expected);
	}

	#[test]
	fn adjacent_module_tokens_take_the_second_as_name() {
		// "module" followed by "module": the follower is a non-empty segment.
		assert_eq!(key_of(Some("module.module.x")), "module");
	}

	proptest! {
		#[test]
		fn first_module_boundary_wins(
			prefix in "[a-z_]{1,8}(\\.[a-z_]{1,8}){0,3}",
			name in "[a-z0-9_-]{1,12}",
			rest in "(\\.module\\.[a-z]{1,6}){0,2}"
		) {
			prop_assume!(!prefix.split('.').any(|s| s == MODULE_TOKEN));
			let path = format!("{prefix}.module.{name}{rest}");
			prop_assert_eq!(key_of(Some(&path)), name);
		}

		#[test]
		fn paths_without_module_token_are_misc(path in "[a-z]{1,8}(\\.[a-z]{1,8}){0,4}") {
			prop_assume!(!path.split('.').any(|s| s == MODULE_TOKEN));
			prop_assert_eq!(key_of(Some(&path)), MISC_KEY);
		}
	}
}
