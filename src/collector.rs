//! Assembles the set of modules a pass scans.

use std::collections::BTreeMap ;
use std::path::{ Path, PathBuf, MAIN_SEPARATOR };
use std::sync::Arc ;
use globset::{ GlobBuilder, GlobMatcher };
use itertools::Itertools ;
use pipe_trait::Pipe ;
use thiserror::Error ;
use tracing::{ debug, warn };
use walkdir::WalkDir ;

use crate::{ Module, ModuleId, ModuleLoader, ModuleRegistry, LoadError };
use crate::utils::PartialSuccess ;



/// Recoverable problems met while collecting modules. None of them stops a pass.
#[derive( Error, Debug )]
pub enum CollectError {
	#[error( "Invalid file pattern '{pattern}': {source}" )]
	InvalidPattern { pattern: String, source: globset::Error },
	#[error( "Cannot search '{}' for pattern '{pattern}': {source}", .directory.display() )]
	Search { pattern: String, directory: PathBuf, source: walkdir::Error },
	#[error( "No files match pattern '{pattern}' under '{}'", .directory.display() )]
	NoMatches { pattern: String, directory: PathBuf },
	#[error( "Load Error: {0}" )] Load( #[from] LoadError ),
	#[error( "No loaded module is named '{0}'" )] UnknownModule( String ),
}

/// Modules deduplicated by id, iterated in id order.
#[derive( Debug, Clone, Default )]
pub struct ModuleSet {
	modules: BTreeMap<ModuleId, Arc<dyn Module>>,
}

impl ModuleSet {

	pub fn new() -> Self { Self::default() }

	#[inline] pub fn len( &self ) -> usize { self.modules.len() }
	#[inline] pub fn is_empty( &self ) -> bool { self.modules.is_empty() }
	#[inline] pub fn contains( &self, id: &ModuleId ) -> bool { self.modules.contains_key( id ) }
	#[inline] pub fn ids( &self ) -> impl Iterator<Item = &ModuleId> { self.modules.keys() }
	#[inline] pub fn iter( &self ) -> impl Iterator<Item = &Arc<dyn Module>> { self.modules.values() }

	/// Adds `module` unless a module with the same id is already present.
	pub fn insert( &mut self, module: Arc<dyn Module> ) -> bool {
		match self.modules.contains_key( module.id() ) {
			true => false,
			false => {
				self.modules.insert( module.id().clone(), module );
				true
			}
		}
	}

}

impl Extend<Arc<dyn Module>> for ModuleSet {
	fn extend<T: IntoIterator<Item = Arc<dyn Module>>>( &mut self, modules: T ) {
		modules.into_iter().for_each(| module | { self.insert( module ); });
	}
}

impl FromIterator<Arc<dyn Module>> for ModuleSet {
	fn from_iter<T: IntoIterator<Item = Arc<dyn Module>>>( modules: T ) -> Self {
		let mut set = Self::new();
		set.extend( modules );
		set
	}
}

/// Gathers modules from explicit handles, file patterns and, failing both, every
/// module already registered with the process.
pub struct ModuleCollector<'a> {
	registry: &'a ModuleRegistry,
	loader: &'a dyn ModuleLoader,
	base_directory: PathBuf,
}

impl<'a> ModuleCollector<'a> {

	/// Patterns are resolved recursively below `base_directory`; files are loaded
	/// with `loader` and registered with `registry`.
	pub fn new( registry: &'a ModuleRegistry, loader: &'a dyn ModuleLoader, base_directory: impl Into<PathBuf> ) -> Self {
		Self { registry, loader, base_directory: base_directory.into() }
	}

	#[inline] pub fn base_directory( &self ) -> &Path { &self.base_directory }

	/// Builds the working set of a pass.
	///
	/// `explicit` modules and modules loaded from `patterns` are always combined.
	/// Explicit modules are taken as given and never registered; files loaded
	/// from patterns are registered the way any loaded module is. Only when both
	/// yield nothing are all registered modules used instead.
	pub fn collect(
		&self,
		explicit: impl IntoIterator<Item = Arc<dyn Module>>,
		patterns: &[String],
	) -> PartialSuccess<ModuleSet, CollectError> {

		let mut modules = explicit.into_iter().collect::<ModuleSet>();
		let mut errors = Vec::new();

		patterns.iter().for_each(| pattern | {
			let ( loaded, pattern_errors ) = self.load_pattern( pattern );
			modules.extend( loaded );
			errors.extend( pattern_errors );
		});

		if modules.is_empty() {
			debug!( "no modules requested, scanning every loaded module" );
			modules.extend( self.registry.loaded() );
		}

		debug!( modules = modules.len(), "collected modules" );
		( modules, errors )

	}

	fn load_pattern( &self, pattern: &str ) -> PartialSuccess<Vec<Arc<dyn Module>>, CollectError> {

		let files = match find_matching_files( &self.base_directory, pattern ) {
			Ok( files ) => files,
			Err( err ) => {
				warn!( pattern = %pattern, error = %err, "skipping file pattern" );
				return ( Vec::with_capacity( 0 ), vec![ err ] )
			},
		};

		files.iter()
			.map(| file | self.loader.load( file )
				.map(| module | self.registry.insert( module ))
				.map_err(| err | {
					warn!( file = %file.display(), error = %err, "skipping file that is not a module" );
					CollectError::from( err )
				})
			)
			.partition_result::<Vec<_>, Vec<_>, _, _>()
			.pipe(|( modules, errors )| {
				debug!( pattern = %pattern, loaded = modules.len(), failed = errors.len(), "resolved file pattern" );
				( modules, errors )
			})

	}

}

/// Files below `base` matching `pattern`, in file-name order.
///
/// A pattern without a path separator is matched against file names at any depth;
/// one with a separator is matched against the path relative to `base`.
///
/// # Errors
/// Fails if the pattern is malformed, `base` cannot be read, or nothing matches.
pub fn find_matching_files( base: &Path, pattern: &str ) -> Result<Vec<PathBuf>, CollectError> {

	let matcher = GlobBuilder::new( pattern )
		.literal_separator( true )
		.build()
		.map_err(| source | CollectError::InvalidPattern { pattern: pattern.to_string(), source })?
		.compile_matcher();
	let match_relative_path = pattern.contains( '/' ) || pattern.contains( MAIN_SEPARATOR );

	let mut files = Vec::new();
	for entry in WalkDir::new( base ).sort_by_file_name() {
		let entry = match entry {
			Ok( entry ) => entry,
			Err( source ) if source.depth() == 0 => return Err( CollectError::Search {
				pattern: pattern.to_string(),
				directory: base.to_path_buf(),
				source,
			}),
			Err( err ) => {
				debug!( error = %err, "skipping unreadable directory entry" );
				continue
			},
		};
		if entry.file_type().is_file() && is_match( &matcher, base, entry.path(), match_relative_path ) {
			files.push( entry.into_path() );
		}
	}

	match files.is_empty() {
		true => Err( CollectError::NoMatches { pattern: pattern.to_string(), directory: base.to_path_buf() }),
		false => Ok( files ),
	}

}

fn is_match( matcher: &GlobMatcher, base: &Path, path: &Path, match_relative_path: bool ) -> bool {
	match match_relative_path {
		true => path.strip_prefix( base ).is_ok_and(| relative | matcher.is_match( relative )),
		false => path.file_name().is_some_and(| name | matcher.is_match( name )),
	}
}
