use std::rc::Rc;

use ::installer_set::*;
use ::installer_set::package::{PackageVersion, Platform};
use installer_set_test_utils::*;

fn empty_set() -> InstallerSet {
	InstallerSet::new(Domain::Remote, Rc::new(FakeInstalled::default()), Rc::new(FakeRemote::default()))
}

fn version(s: &str) -> PackageVersion {
	PackageVersion::new(s).unwrap()
}

#[test]
fn load_spec_fetches_each_tuple_once() {
	let mut set = empty_set();
	let source = CountingSource::default();

	let first = set.load_spec("foo", &version("1.0"), &Platform::PORTABLE, &source).unwrap();
	let second = set.load_spec("foo", &version("1.0"), &Platform::PORTABLE, &source).unwrap();
	assert_eq!(source.fetch_count(), 1);
	assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn load_spec_keys_include_platform() {
	let mut set = empty_set();
	let source = CountingSource::default();

	set.load_spec("foo", &version("1.0"), &Platform::PORTABLE, &source).unwrap();
	let java = set.load_spec("foo", &version("1.0"), &Platform::from("java"), &source).unwrap();
	assert_eq!(source.fetch_count(), 2);
	assert_eq!(java.full_name(), "foo-1.0-java");

	let debug = format!("{:?}", set);
	assert!(debug.contains("foo-1.0-any"));
	assert!(debug.contains("foo-1.0-java"));
}

#[test]
fn load_spec_cache_is_shared_between_sources() {
	let mut set = empty_set();
	let a = CountingSource::default();
	let b = CountingSource::default();

	set.load_spec("foo", &version("1.0"), &Platform::PORTABLE, &a).unwrap();
	set.load_spec("foo", &version("1.0"), &Platform::PORTABLE, &b).unwrap();
	assert_eq!(a.fetch_count(), 1);
	assert_eq!(b.fetch_count(), 0);
}

#[test]
fn load_spec_failures_are_not_cached() {
	let mut set = empty_set();
	let source = FakeRemote::failing();

	assert!(matches!(set.load_spec("foo", &version("1.0"), &Platform::PORTABLE, &source), Err(Error::Source(_))));
	assert!(set.load_spec("foo", &version("1.0"), &Platform::PORTABLE, &source).is_err());
	assert_eq!(source.fetch_calls.get(), 2);
}

#[test]
fn index_candidates_materialize_through_the_set() {
	let remote = Rc::new(FakeRemote::new(vec![spec("foo", "1.0", "any").with_dependency(dependency("bar >= 2.0"))]));
	let mut set = InstallerSet::new(Domain::Remote, Rc::new(FakeInstalled::default()), remote.clone());

	let found = set.find_all(&request("foo")).unwrap();
	assert_eq!(found.len(), 1);
	assert!(found[0].is_index());
	assert_eq!(remote.fetch_calls.get(), 0);

	let spec = found[0].spec(&mut set).unwrap();
	assert_eq!(spec.dependencies, vec![dependency("bar >= 2.0")]);
	found[0].spec(&mut set).unwrap();
	assert_eq!(remote.fetch_calls.get(), 1);
}

#[test]
fn installed_candidates_need_no_fetch() {
	let installed = FakeInstalled::new(vec![spec("foo", "1.0", "any")]);
	let mut set = InstallerSet::new(Domain::None, Rc::new(installed), Rc::new(FakeRemote::default()));

	let found = set.find_all(&request("foo")).unwrap();
	assert!(found[0].is_installed());
	assert!(found[0].source().is_none());
	assert_eq!(found[0].spec(&mut set).unwrap().full_name(), "foo-1.0");
	assert_eq!(format!("{:?}", set).matches("foo-1.0").count(), 0);
}
