use installer_set::{Dependency, DependencyRequest, Domain, InstallerOptions, InstallerSet};

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",                "Show help");
		opts.optflag( "v", "verbose",             "Increased vebosity");
		opts.optopt(  "c", "config",              "Read options from a JSON file", "FILE");
		opts.optopt(  "d", "domain",              "Where to look for packages: none, local, remote or both", "DOMAIN");
		opts.optopt(  "",  "installed",           "Directory of installed specifications", "DIR");
		opts.optopt(  "",  "local",               "Directory of package files", "DIR");
		opts.optopt(  "",  "index",               "JSON package index", "FILE");
		opts.optflag( "",  "ignore-installed",    "Don't offer installed packages");
		opts.optflag( "",  "ignore-dependencies", "Only offer packages given with --pin");
		opts.optmulti("",  "pin",                 "Always install the newest package for a dependency", "DEP");
		opts.optmulti("",  "file",                "Add a package file", "PATH");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: installer-set [options] DEPENDENCY..."));
			return;
		}

		parsed_options
	};

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
		if parsed_options.opt_present("v") { "debug" } else { "warn" }
	)).init();

	let options = match build_options(&parsed_options) {
		Ok(options) => options,
		Err(e) => { log::error!("Invalid options: {}", e); std::process::exit(2) },
	};

	if let Err(e) = run(&options, &parsed_options) {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

fn build_options(parsed_options: &getopts::Matches) -> Result<InstallerOptions, Error> {
	let mut options = match parsed_options.opt_str("c") {
		Some(path) => InstallerOptions::load_from_file(path)?,
		None => InstallerOptions::default(),
	};

	if let Some(domain) = parsed_options.opt_str("d") {
		options.set_domain(domain.parse::<Domain>()?);
	}
	if let Some(dir) = parsed_options.opt_str("installed") {
		if !options.set_specifications_dir(dir.clone().into()) {
			return Err(Error::InvalidPath(dir));
		}
	}
	if let Some(dir) = parsed_options.opt_str("local") {
		if !options.set_local_package_dir(dir.clone().into()) {
			return Err(Error::InvalidPath(dir));
		}
	}
	if let Some(file) = parsed_options.opt_str("index") {
		if !options.set_index_file(Some(file.clone().into())) {
			return Err(Error::InvalidPath(file));
		}
	}
	if parsed_options.opt_present("ignore-installed") {
		options.set_ignore_installed(true);
	}
	if parsed_options.opt_present("ignore-dependencies") {
		options.set_ignore_dependencies(true);
	}

	Ok(options)
}

fn run(options: &InstallerOptions, parsed_options: &getopts::Matches) -> Result<(), Error> {
	if parsed_options.free.is_empty() {
		return Err(Error::MissingArgument);
	}

	let mut set = InstallerSet::from_options(options)?;
	log::debug!("Using options {:?}", options);

	for path in parsed_options.opt_strs("file") {
		let spec = set.add_local_file(&path)?;
		log::info!("Added package file {} as {}", path, spec.full_name());
	}

	for dep in parsed_options.opt_strs("pin") {
		set.add_always_install(dep.parse::<Dependency>()?)?;
	}

	for dep in &parsed_options.free {
		let request = DependencyRequest::new(dep.parse::<Dependency>()?, None);
		let candidates = set.find_all(&request)?;

		println!("{}:", request);
		if candidates.is_empty() {
			println!("\tno candidates");
		}
		for candidate in candidates {
			println!("\t{}", candidate);
		}
	}

	log::debug!("Finished with {:?}", set);
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("installer-set error: {0}")]
	InstallerSet(#[from] installer_set::Error),
	#[error("not a valid path: {0}")]
	InvalidPath(String),
	#[error("no dependencies given")]
	MissingArgument,
}
