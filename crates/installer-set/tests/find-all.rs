use std::rc::Rc;

use ::installer_set::*;
use ::installer_set::source::LocalFileSource;
use installer_set_test_utils::*;

struct Fixture {
	set: InstallerSet,
	installed: Rc<FakeInstalled>,
	local: Rc<FakeLocal>,
	remote: Rc<FakeRemote>,
}

fn fixture(domain: Domain, installed: FakeInstalled, local: FakeLocal, remote: FakeRemote) -> Fixture {
	let _ = env_logger::builder().is_test(true).try_init();

	let installed = Rc::new(installed);
	let local = Rc::new(local);
	let remote = Rc::new(remote);

	let factory_local = local.clone();
	let set = InstallerSet::new(domain, installed.clone(), remote.clone())
		.with_local_source(Box::new(move || -> Rc<dyn LocalFileSource> { factory_local.clone() }));

	Fixture { set, installed, local, remote }
}

fn describe(candidates: &[Candidate]) -> Vec<String> {
	candidates.iter().map(|c| c.to_string()).collect()
}

#[test]
fn installed_candidates_come_before_remote_ones() {
	let f = fixture(
		Domain::Both,
		FakeInstalled::new(vec![spec("foo", "1.0", "any")]),
		FakeLocal::default(),
		FakeRemote::new(vec![spec("foo", "2.0", "any")]),
	);

	let found = f.set.find_all(&request("foo >= 1.0")).unwrap();
	assert_eq!(describe(&found), vec!["foo-1.0-any (installed)", "foo-2.0-any (index)"]);
}

#[test]
fn candidates_are_ordered_by_source() {
	let mut f = fixture(
		Domain::Both,
		FakeInstalled::new(vec![spec("foo", "1.0", "any"), spec("foo", "1.1", "any")]),
		FakeLocal::new(vec![spec("foo", "1.4", "any"), spec("foo", "1.5", "any")]),
		FakeRemote::new(vec![spec("foo", "3.0", "any"), spec("foo", "2.0", "any")]),
	);
	let source = Rc::new(CountingSource::default());
	f.set.add_local_entry("foo-b", Rc::new(spec("foo", "1.3", "any")), source.clone());
	f.set.add_local_entry("foo-a", Rc::new(spec("foo", "1.2", "any")), source.clone());

	let found = f.set.find_all(&request("foo")).unwrap();
	assert_eq!(describe(&found), vec![
		"foo-1.0-any (installed)",
		"foo-1.1-any (installed)",
		"foo-1.3-any (local)",
		"foo-1.2-any (local)",
		"foo-1.5-any (index)",
		"foo-3.0-any (index)",
		"foo-2.0-any (index)",
	]);
}

#[test]
fn local_entries_are_filtered_by_request() {
	let mut f = fixture(Domain::Local, FakeInstalled::default(), FakeLocal::default(), FakeRemote::default());
	let source = Rc::new(CountingSource::default());
	f.set.add_local_entry("foo", Rc::new(spec("foo", "1.0", "any")), source.clone());
	f.set.add_local_entry("bar", Rc::new(spec("bar", "1.0", "any")), source.clone());

	let found = f.set.find_all(&request("foo >= 0.5")).unwrap();
	assert_eq!(describe(&found), vec!["foo-1.0-any (local)"]);
	assert!(found[0].is_local());
	assert_eq!(source.fetch_count(), 0);
}

#[test]
fn readding_a_local_entry_replaces_it_in_place() {
	let mut f = fixture(Domain::Local, FakeInstalled::default(), FakeLocal::default(), FakeRemote::default());
	let source = Rc::new(CountingSource::default());
	f.set.add_local_entry("first", Rc::new(spec("foo", "1.0", "any")), source.clone());
	f.set.add_local_entry("second", Rc::new(spec("foo", "2.0", "any")), source.clone());
	f.set.add_local_entry("first", Rc::new(spec("foo", "3.0", "any")), source.clone());

	assert!(f.set.has_local_entry("first"));
	assert!(!f.set.has_local_entry("third"));
	assert_eq!(f.set.local_spec("first").unwrap().full_name(), "foo-3.0");

	let found = f.set.find_all(&request("foo")).unwrap();
	assert_eq!(describe(&found), vec!["foo-3.0-any (local)", "foo-2.0-any (local)"]);
}

#[test]
fn ignore_installed_skips_installed_source() {
	let mut f = fixture(
		Domain::Both,
		FakeInstalled::new(vec![spec("foo", "1.0", "any")]),
		FakeLocal::default(),
		FakeRemote::new(vec![spec("foo", "1.0", "any")]),
	);
	f.set.set_ignore_installed(true);

	let found = f.set.find_all(&request("foo")).unwrap();
	assert_eq!(describe(&found), vec!["foo-1.0-any (index)"]);
	assert_eq!(f.installed.calls.get(), 0);
}

#[test]
fn ignore_dependencies_without_pins_queries_nothing() {
	let mut f = fixture(
		Domain::Both,
		FakeInstalled::new(vec![spec("foo", "1.0", "any")]),
		FakeLocal::new(vec![spec("foo", "1.0", "any")]),
		FakeRemote::new(vec![spec("foo", "1.0", "any")]),
	);
	f.set.set_ignore_dependencies(true);

	assert!(f.set.find_all(&request("foo")).unwrap().is_empty());
	assert_eq!(f.installed.calls.get(), 0);
	assert_eq!(f.local.find_calls.get(), 0);
	assert_eq!(f.remote.find_calls.get(), 0);
}

#[test]
fn ignore_dependencies_only_allows_pinned_packages() {
	let mut f = fixture(
		Domain::Remote,
		FakeInstalled::default(),
		FakeLocal::default(),
		FakeRemote::new(vec![spec("foo", "1.0", "any"), spec("bar", "1.0", "any")]),
	);
	f.set.add_always_install(dependency("foo")).unwrap();
	f.set.set_ignore_dependencies(true);

	assert_eq!(describe(&f.set.find_all(&request("foo")).unwrap()), vec!["foo-1.0-any (index)"]);
	assert!(f.set.find_all(&request("bar")).unwrap().is_empty());
}

#[test]
fn pinned_packages_are_not_repeated_as_installed() {
	let mut f = fixture(
		Domain::None,
		FakeInstalled::new(vec![spec("foo", "1.0", "any"), spec("foo", "2.0", "any")]),
		FakeLocal::default(),
		FakeRemote::default(),
	);
	f.set.add_always_install(dependency("foo")).unwrap();
	let pinned = f.installed.get("foo-2.0").unwrap();
	assert_eq!(f.set.always_install().to_vec(), vec![pinned]);

	let found = f.set.find_all(&request("foo")).unwrap();
	assert_eq!(describe(&found), vec!["foo-1.0-any (installed)"]);
}

#[test]
fn domain_limits_queried_sources() {
	let sources = || (
		FakeInstalled::new(vec![spec("foo", "1.0", "any")]),
		FakeLocal::new(vec![spec("foo", "2.0", "any")]),
		FakeRemote::new(vec![spec("foo", "3.0", "any")]),
	);

	let (installed, local, remote) = sources();
	let f = fixture(Domain::Local, installed, local, remote);
	assert_eq!(describe(&f.set.find_all(&request("foo")).unwrap()), vec!["foo-1.0-any (installed)", "foo-2.0-any (index)"]);
	assert_eq!(f.remote.find_calls.get(), 0);

	let (installed, local, remote) = sources();
	let f = fixture(Domain::Remote, installed, local, remote);
	assert_eq!(describe(&f.set.find_all(&request("foo")).unwrap()), vec!["foo-1.0-any (installed)", "foo-3.0-any (index)"]);
	assert_eq!(f.local.find_calls.get(), 0);

	let (installed, local, remote) = sources();
	let f = fixture(Domain::None, installed, local, remote);
	assert_eq!(describe(&f.set.find_all(&request("foo")).unwrap()), vec!["foo-1.0-any (installed)"]);
	assert_eq!(f.local.find_calls.get(), 0);
	assert_eq!(f.remote.find_calls.get(), 0);
}

#[test]
fn local_file_candidate_respects_requirement() {
	let f = fixture(
		Domain::Local,
		FakeInstalled::default(),
		FakeLocal::new(vec![spec("foo", "1.0", "any"), spec("foo", "2.0", "any")]),
		FakeRemote::default(),
	);

	assert_eq!(describe(&f.set.find_all(&request("foo <= 1.5")).unwrap()), vec!["foo-1.0-any (index)"]);
	assert!(f.set.find_all(&request("foo >= 3.0")).unwrap().is_empty());
}

#[test]
fn no_candidates_is_not_an_error() {
	let f = fixture(Domain::Both, FakeInstalled::default(), FakeLocal::default(), FakeRemote::default());
	assert!(f.set.find_all(&request("missing")).unwrap().is_empty());
}

#[test]
fn remote_failures_are_returned_unchanged() {
	let f = fixture(Domain::Both, FakeInstalled::default(), FakeLocal::default(), FakeRemote::failing());
	match f.set.find_all(&request("foo")) {
		Err(Error::Source(e)) => assert!(e.to_string().contains("find_all")),
		other => panic!("expected source error, got {:?}", other),
	}
}

#[test]
fn set_remote_follows_domain_transitions() {
	let mut f = fixture(Domain::Local, FakeInstalled::default(), FakeLocal::default(), FakeRemote::default());
	f.set.set_remote(true);
	assert_eq!(f.set.domain(), Domain::Both);
	f.set.set_remote(false);
	assert_eq!(f.set.domain(), Domain::Local);

	let mut f = fixture(Domain::Remote, FakeInstalled::default(), FakeLocal::default(), FakeRemote::default());
	f.set.set_remote(false);
	assert_eq!(f.set.domain(), Domain::None);
	assert!(!f.set.considers_local() && !f.set.considers_remote());
	f.set.set_remote(true);
	assert_eq!(f.set.domain(), Domain::None);
}
