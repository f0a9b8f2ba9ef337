//! The host-facing entry point of an attachment pass.

use std::path::{ Path, PathBuf };
use std::sync::Arc ;
use pipe_trait::Pipe ;
use thiserror::Error ;
use tracing::{ info, warn };

use crate::{ ComponentRegistry, ConfigSection, Module, ModuleRegistry, ModuleLoader, ManifestLoader };
use crate::config::join_path ;
use crate::attach::{ attach, Attachment, AttachError };
use crate::collector::{ ModuleCollector, CollectError };
use crate::extractor::{ extract, ExtractError };



/// Root section of everything the engine reads from configuration.
pub const ROOT_SECTION: &str = "Hitch" ;

/// Section below [`ROOT_SECTION`] holding the engine's own options.
pub const CONFIGURATION_SECTION: &str = "Configuration" ;

/// A recoverable problem encountered during a pass.
#[derive( Error, Debug )]
pub enum DiscoveryWarning {
	#[error( "Collect Warning: {0}" )] Collect( #[from] CollectError ),
	#[error( "Extract Warning: {0}" )] Extract( #[from] ExtractError ),
}

/// Summary of a completed pass.
#[derive( Debug, Default )]
pub struct AttachReport {
	/// Provider instances attached, in attach order.
	pub attachments: Vec<Attachment>,
	/// Everything that was skipped along the way.
	pub warnings: Vec<DiscoveryWarning>,
}

/// Configures and runs one attachment pass.
///
/// Options given through [`HitchBuilder::load_from_configuration`] and through the
/// `with_*` methods are additive.
///
/// ```
/// use hitch::{ ConfigSection, HitchBuilder, ModuleRegistry, ServiceCollection };
///
/// let configuration = ConfigSection::from_pairs([
/// 	( "Hitch:Configuration:FilePatterns:0", "*.hitch.toml" ),
/// ]);
/// let modules = ModuleRegistry::new();
/// let mut services = ServiceCollection::new();
///
/// let report = HitchBuilder::new( &configuration )
/// 	.with_module_registry( &modules )
/// 	.with_base_directory( std::env::temp_dir().join( "no-plugins-here" ))
/// 	.load_from_configuration()
/// 	.build( &mut services )?;
///
/// assert!( report.attachments.is_empty() );
/// # Ok::<(), hitch::AttachError>(())
/// ```
pub struct HitchBuilder<'a> {
	configuration: &'a ConfigSection,
	registry: &'a ModuleRegistry,
	loader: Box<dyn ModuleLoader + 'a>,
	modules: Vec<Arc<dyn Module>>,
	module_names: Vec<String>,
	file_patterns: Vec<String>,
	base_directory: Option<PathBuf>,
}

impl<'a> HitchBuilder<'a> {

	/// A builder reading the `Hitch` section of `configuration` and using the
	/// process-wide [`ModuleRegistry`].
	pub fn new( configuration: &'a ConfigSection ) -> Self {
		Self {
			configuration,
			registry: ModuleRegistry::global(),
			loader: Box::new( ManifestLoader ),
			modules: Vec::new(),
			module_names: Vec::new(),
			file_patterns: Vec::new(),
			base_directory: None,
		}
	}

	/// Uses `registry` instead of the process-wide one.
	pub fn with_module_registry( mut self, registry: &'a ModuleRegistry ) -> Self {
		self.registry = registry ;
		self
	}

	/// Loads files matched by patterns with `loader` instead of [`ManifestLoader`].
	pub fn with_loader( mut self, loader: impl ModuleLoader + 'a ) -> Self {
		self.loader = Box::new( loader );
		self
	}

	/// Adds modules to scan.
	pub fn with_modules( mut self, modules: impl IntoIterator<Item = Arc<dyn Module>> ) -> Self {
		self.modules.extend( modules );
		self
	}

	/// Adds modules to scan by name. Names are looked up in the module registry
	/// when the pass runs.
	pub fn with_module_names<S: Into<String>>( mut self, names: impl IntoIterator<Item = S> ) -> Self {
		self.module_names.extend( names.into_iter().map( Into::into ));
		self
	}

	/// Adds a file pattern (e.g. `*.hitch.toml`). Blank patterns are ignored.
	pub fn with_file_pattern( mut self, pattern: impl Into<String> ) -> Self {
		let pattern = pattern.into();
		if !pattern.trim().is_empty() { self.file_patterns.push( pattern ); }
		self
	}

	/// Directory searched by file patterns. Defaults to the directory of the running
	/// executable.
	pub fn with_base_directory( mut self, directory: impl Into<PathBuf> ) -> Self {
		self.base_directory = Some( directory.into() );
		self
	}

	/// Adds the module names and file patterns listed under
	/// `Hitch:Configuration:Assemblies` and `Hitch:Configuration:FilePatterns`.
	pub fn load_from_configuration( self ) -> Self {
		let options = self.configuration.section( &join_path( ROOT_SECTION, CONFIGURATION_SECTION ));
		let names = options.get_strings( "Assemblies" ).into_iter()
			.filter(| name | !name.trim().is_empty() )
			.collect::<Vec<_>>();
		options.get_strings( "FilePatterns" ).into_iter()
			.fold( self.with_module_names( names ), | builder, pattern | builder.with_file_pattern( pattern ))
	}

	#[inline] pub fn file_patterns( &self ) -> &[String] { &self.file_patterns }
	#[inline] pub fn module_names( &self ) -> &[String] { &self.module_names }

	/// Runs the pass: collects modules, reads their descriptors and attaches every
	/// configured provider instance to `registry`.
	///
	/// # Errors
	/// Returns the first provider that cannot be constructed or fails to attach.
	/// Everything attached before it stays registered.
	pub fn build( self, registry: &mut dyn ComponentRegistry ) -> Result<AttachReport, AttachError> {

		let mut warnings = Vec::new();

		let ( named, unknown ) = self.lookup_module_names();
		warnings.extend( unknown.into_iter().map( DiscoveryWarning::from ));

		let base_directory = self.base_directory.clone().unwrap_or_else( default_base_directory );
		let collector = ModuleCollector::new( self.registry, self.loader.as_ref(), base_directory );
		let ( modules, collect_errors ) = collector.collect( self.modules.iter().cloned().chain( named ), &self.file_patterns );
		warnings.extend( collect_errors.into_iter().map( DiscoveryWarning::from ));

		let ( descriptors, extract_errors ) = extract( &modules );
		warnings.extend( extract_errors.into_iter().map( DiscoveryWarning::from ));

		let root = self.configuration.section( ROOT_SECTION );
		let providers = self.registry.catalog_for( modules.iter() );
		let attachments = attach( &descriptors, &root, registry, &providers )?;

		info!( modules = modules.len(), attached = attachments.len(), warnings = warnings.len(), "plugin attachment pass complete" );
		Ok( AttachReport { attachments, warnings })

	}

	fn lookup_module_names( &self ) -> ( Vec<Arc<dyn Module>>, Vec<CollectError> ) {
		let mut found = Vec::new();
		let mut unknown = Vec::new();
		for name in &self.module_names {
			match self.registry.find( name ) {
				Some( module ) => found.push( module ),
				None => {
					warn!( module = %name, "skipping unknown module" );
					unknown.push( CollectError::UnknownModule( name.clone() ));
				},
			}
		}
		( found, unknown )
	}

}

/// Runs a pass the way a host normally does: options from configuration first,
/// then whatever `configure` adds.
///
/// # Errors
/// Returns the first construction or attach failure.
pub fn attach_plugins<'a>(
	registry: &mut dyn ComponentRegistry,
	configuration: &'a ConfigSection,
	configure: impl FnOnce( HitchBuilder<'a> ) -> HitchBuilder<'a>,
) -> Result<AttachReport, AttachError> {
	HitchBuilder::new( configuration )
		.load_from_configuration()
		.pipe( configure )
		.build( registry )
}

/// Directory of the running executable, or the working directory if that is unknown.
pub fn default_base_directory() -> PathBuf {
	std::env::current_exe().ok()
		.and_then(| exe | exe.parent().map( Path::to_path_buf ))
		.or_else(|| std::env::current_dir().ok() )
		.unwrap_or_else(|| PathBuf::from( "." ))
}
