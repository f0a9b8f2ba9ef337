//! Modules: units that declare plugin providers.
//!
//! A module exposes a list of [`PluginDescriptor`]s. Two kinds ship with the crate:
//!
//! - [`StaticModule`] is declared in code and also carries the factories of the
//! 	providers it declares.
//! - [`ManifestModule`] is loaded from a TOML manifest on disk by [`ManifestLoader`].
//! 	It only names its provider types; their factories must be registered with the
//! 	[`ModuleRegistry`](crate::ModuleRegistry) by the host.
//!
//! A manifest looks like this:
//!
//! ```toml
//! [module]
//! name = "weather"
//!
//! [[plugin]]
//! provider = "weather::HealthProvider"
//!
//! [[plugin]]
//! category = "Service"
//! sub_category = "SampleWeather"
//! provider = "weather::ForecastProvider"
//! ```

use std::path::{ Path, PathBuf };
use std::sync::Arc ;
use serde::Deserialize ;
use thiserror::Error ;

use crate::{ PluginDescriptor, PluginProvider, ProviderType, MetadataError };
use crate::provider::{ ProviderFactory, default_factory };



/// Identity of a module. Two handles with the same id are the same module.
#[derive( Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub struct ModuleId( String );

impl ModuleId {
	pub fn new( id: impl Into<String> ) -> Self { Self( id.into() ) }
	#[inline] pub fn as_str( &self ) -> &str { &self.0 }
}

impl std::fmt::Display for ModuleId {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{}", self.0 )}
}

impl From<&str> for ModuleId {
	fn from( id: &str ) -> Self { Self( id.to_string() ) }
}

/// A unit that declares plugin providers.
pub trait Module: Send + Sync {

	/// Identity used for deduplication.
	fn id( &self ) -> &ModuleId ;

	/// Human readable name, used when modules are requested by name.
	fn name( &self ) -> &str { self.id().as_str() }

	/// Reads the plugin descriptors this module declares.
	///
	/// # Errors
	/// Fails if the module's metadata cannot be read. The module then contributes
	/// nothing to the pass.
	fn descriptors( &self ) -> Result<Vec<PluginDescriptor>, MetadataError> ;

	/// Factories for the providers this module carries. Added to the provider
	/// catalog when the module is registered.
	fn providers( &self ) -> Vec<( ProviderType, ProviderFactory )> { Vec::with_capacity( 0 ) }

}

impl std::fmt::Debug for dyn Module {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Module" ).field( "id", self.id() ).finish_non_exhaustive()
	}
}

#[derive( Clone )]
struct StaticEntry {
	provider: ProviderType,
	category: Option<String>,
	sub_category: Option<String>,
}

/// A module declared in code.
///
/// ```
/// # use hitch::{ ComponentRegistry, ConfigSection, PluginProvider, ProviderError, StaticModule };
/// # #[derive( Default )] struct Health ;
/// # impl PluginProvider for Health {
/// # 	fn attach( &self, _: &mut dyn ComponentRegistry, _: &ConfigSection, _: Option<&str> ) -> Result<(), ProviderError> { Ok(()) }
/// # }
/// # #[derive( Default )] struct Postgres ;
/// # impl PluginProvider for Postgres {
/// # 	fn attach( &self, _: &mut dyn ComponentRegistry, _: &ConfigSection, _: Option<&str> ) -> Result<(), ProviderError> { Ok(()) }
/// # }
/// let module = StaticModule::new( "storage" )
/// 	.plugin::<Health>()
/// 	.categorized_plugin::<Postgres>( "Database", "Postgres" );
/// ```
#[derive( Clone )]
pub struct StaticModule {
	id: ModuleId,
	entries: Vec<StaticEntry>,
	factories: Vec<( ProviderType, ProviderFactory )>,
}

impl StaticModule {

	pub fn new( id: impl Into<String> ) -> Self {
		Self { id: ModuleId::new( id ), entries: Vec::new(), factories: Vec::new() }
	}

	/// Declares an uncategorized plugin constructed through [`Default`].
	pub fn plugin<P: PluginProvider + Default + 'static>( self ) -> Self {
		self.declare::<P>( None, None )
	}

	/// Declares a categorized plugin constructed through [`Default`].
	pub fn categorized_plugin<P: PluginProvider + Default + 'static>(
		self,
		category: impl Into<String>,
		sub_category: impl Into<String>,
	) -> Self {
		self.declare::<P>( Some( category.into() ), Some( sub_category.into() ))
	}

	/// Declares a plugin by raw metadata fields and an explicit factory.
	///
	/// Nothing is validated here; invalid metadata surfaces when descriptors are read.
	pub fn with_entry(
		mut self,
		provider: ProviderType,
		category: Option<String>,
		sub_category: Option<String>,
		factory: ProviderFactory,
	) -> Self {
		self.factories.push(( provider.clone(), factory ));
		self.entries.push( StaticEntry { provider, category, sub_category });
		self
	}

	fn declare<P: PluginProvider + Default + 'static>(
		self,
		category: Option<String>,
		sub_category: Option<String>,
	) -> Self {
		self.with_entry( ProviderType::of::<P>(), category, sub_category, default_factory::<P>() )
	}

}

impl Module for StaticModule {

	fn id( &self ) -> &ModuleId { &self.id }

	fn descriptors( &self ) -> Result<Vec<PluginDescriptor>, MetadataError> {
		self.entries.iter()
			.map(| entry | PluginDescriptor::from_parts(
				entry.provider.clone(),
				entry.category.clone(),
				entry.sub_category.clone(),
			))
			.collect()
	}

	fn providers( &self ) -> Vec<( ProviderType, ProviderFactory )> { self.factories.clone() }

}

impl std::fmt::Debug for StaticModule {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "StaticModule" )
			.field( "id", &self.id )
			.field( "providers", &self.entries.iter().map(| entry | &entry.provider ).collect::<Vec<_>>() )
			.finish_non_exhaustive()
	}
}

/// Errors raised when a file cannot be loaded as a module.
#[derive( Error, Debug )]
pub enum LoadError {
	#[error( "IO error reading '{path}': {source}" )]
	Io { path: PathBuf, source: std::io::Error },
	#[error( "'{path}' is not a module manifest: {source}" )]
	InvalidManifest { path: PathBuf, source: toml::de::Error },
	#[error( "Failed to load '{path}': {reason}" )]
	Rejected { path: PathBuf, reason: String },
}

/// Turns a file on disk into a module.
pub trait ModuleLoader {
	/// # Errors
	/// Fails if the file is not a loadable module.
	fn load( &self, path: &Path ) -> Result<Arc<dyn Module>, LoadError> ;
}

/// Loads [`ManifestModule`]s from TOML files.
#[derive( Debug, Clone, Copy, Default )]
pub struct ManifestLoader ;

impl ModuleLoader for ManifestLoader {
	fn load( &self, path: &Path ) -> Result<Arc<dyn Module>, LoadError> {
		Ok( Arc::new( ManifestModule::load( path )? ))
	}
}

#[derive( Deserialize )]
struct ManifestFile {
	#[serde( default, rename = "plugin" )] plugins: Vec<ManifestEntry>,
}

#[derive( Deserialize )]
#[serde( deny_unknown_fields )]
struct ManifestEntry {
	provider: String,
	category: Option<String>,
	sub_category: Option<String>,
}

/// A module described by a TOML manifest.
///
/// The file is parsed as TOML when loaded; the plugin entries are only
/// interpreted when descriptors are read.
#[derive( Debug, Clone )]
pub struct ManifestModule {
	id: ModuleId,
	name: String,
	path: PathBuf,
	document: toml::Table,
}

impl ManifestModule {

	/// Reads and parses the manifest at `path`.
	///
	/// The module id is the canonical path of the file, so the same file reached
	/// through different patterns is the same module.
	///
	/// # Errors
	/// Fails if the file cannot be read or is not a TOML document.
	pub fn load( path: &Path ) -> Result<Self, LoadError> {
		let io_error = | source | LoadError::Io { path: path.to_path_buf(), source };
		let path = path.canonicalize().map_err( io_error )?;
		let text = std::fs::read_to_string( &path ).map_err( io_error )?;
		Self::parse( path, &text )
	}

	/// Parses manifest text as if it had been read from `path`.
	///
	/// # Errors
	/// Fails if `text` is not a TOML document.
	pub fn parse( path: PathBuf, text: &str ) -> Result<Self, LoadError> {
		let document = text.parse::<toml::Table>()
			.map_err(| source | LoadError::InvalidManifest { path: path.clone(), source })?;
		let name = document.get( "module" )
			.and_then(| module | module.get( "name" ))
			.and_then( toml::Value::as_str )
			.map( str::to_string )
			.or_else(|| path.file_stem().map(| stem | stem.to_string_lossy().into_owned() ))
			.unwrap_or_default();
		Ok( Self { id: ModuleId::new( path.display().to_string() ), name, path, document })
	}

	#[inline] pub fn path( &self ) -> &Path { &self.path }

}

impl Module for ManifestModule {

	fn id( &self ) -> &ModuleId { &self.id }

	fn name( &self ) -> &str { &self.name }

	fn descriptors( &self ) -> Result<Vec<PluginDescriptor>, MetadataError> {
		let manifest: ManifestFile = toml::Value::Table( self.document.clone() ).try_into()?;
		manifest.plugins.into_iter()
			.map(| entry | PluginDescriptor::from_parts(
				ProviderType::named( entry.provider ),
				entry.category,
				entry.sub_category,
			))
			.collect()
	}

}
