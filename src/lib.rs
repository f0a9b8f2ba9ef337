//! Plugin discovery and attachment for modular applications.
//!
//! Modules declare plugin providers; `hitch` finds those declarations, works out how
//! many instances of each provider the configuration asks for, and lets every
//! instance register its components into the host's registry. The host never
//! references a plugin at compile time.
//!
//! # Core Concepts
//!
//! - [`Module`]: A unit that declares plugin providers through a list of
//! 	[`PluginDescriptor`]s. [`StaticModule`] is declared in code; [`ManifestModule`] is
//! 	a TOML manifest on disk, loaded by a [`ModuleLoader`].
//!
//! - [`PluginDescriptor`]: A provider type plus an optional [`Category`]. An
//! 	uncategorized plugin is attached exactly once, without a name. A categorized plugin
//! 	is attached once for every instance configured under
//! 	`Hitch:Plugins:<category>:<sub_category>`, possibly zero times.
//!
//! - [`PluginProvider`]: The attach contract. Each instance gets a freshly constructed
//! 	provider, the configuration scoped to that instance and the instance name.
//!
//! - [`ModuleRegistry`]: Modules known to the process and the factories that construct
//! 	providers by [`ProviderType`]. A pass that is given no modules scans all of them.
//!
//! - [`ComponentRegistry`]: Where providers register their components.
//! 	[`ServiceCollection`] is a small in-memory implementation.
//!
//! # A Pass
//!
//! 1. **Collect**: explicit modules, modules named in configuration and modules loaded
//! 	from file patterns are combined and deduplicated ([`ModuleCollector`]).
//! 2. **Extract**: every module's descriptors are read ([`extract`]).
//! 3. **Resolve**: categorized descriptors are expanded into named instances
//! 	([`resolve`]).
//! 4. **Attach**: providers are constructed and attached ([`attach`]).
//!
//! Failures in the first two steps are skipped, logged and returned as warnings. A
//! provider that cannot be constructed or fails to attach ends the pass with an
//! [`AttachError`]; whatever was attached before it stays registered.
//!
//! # Configuration
//!
//! Instances may be listed as an array of names or as a map keyed by name. Both of
//! these attach `Primary` and `Replica`:
//!
//! ```json
//! { "Hitch": { "Plugins": { "Database": { "Postgres": [ "Primary", "Replica" ] } } } }
//! ```
//!
//! ```json
//! { "Hitch": { "Plugins": { "Database": { "Postgres": { "Primary": { "Pool": 8 }, "Replica": {} } } } } }
//! ```
//!
//! In the keyed form each instance receives its own section (`{ "Pool": 8 }` for
//! `Primary`); otherwise it receives an empty one.
//!
//! # Example
//!
//! ```
//! use hitch::{
//! 	ComponentRegistry, ConfigSection, ModuleRegistry, PluginProvider, ProviderError,
//! 	RegistryExt, ServiceCollection, StaticModule, attach_plugins,
//! };
//!
//! struct Connection { name: String, pool: Option<String> }
//!
//! #[derive( Default )]
//! struct PostgresProvider ;
//!
//! impl PluginProvider for PostgresProvider {
//! 	fn attach(
//! 		&self,
//! 		registry: &mut dyn ComponentRegistry,
//! 		configuration: &ConfigSection,
//! 		name: Option<&str>,
//! 	) -> Result<(), ProviderError> {
//! 		let name = name.ok_or( "postgres instances must be named" )?;
//! 		registry.add_named( name, Connection {
//! 			name: name.to_string(),
//! 			pool: configuration.child( "Pool" ).and_then(| pool | pool.value() ).map( str::to_string ),
//! 		});
//! 		Ok(())
//! 	}
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let modules = ModuleRegistry::new();
//! modules.register( StaticModule::new( "storage" )
//! 	.categorized_plugin::<PostgresProvider>( "Database", "Postgres" ));
//!
//! let configuration = ConfigSection::from_json_str( r#"{
//! 	"Hitch": { "Plugins": { "Database": { "Postgres": {
//! 		"Primary": { "Pool": "8" },
//! 		"Replica": {}
//! 	}}}}
//! }"# )?;
//!
//! let mut services = ServiceCollection::new();
//! let report = attach_plugins( &mut services, &configuration, | builder | builder
//! 	.with_module_registry( &modules )
//! )?;
//!
//! assert_eq!( report.attachments.len(), 2 );
//! let primary = services.get_named::<Connection>( "Primary" ).ok_or( "missing" )?;
//! assert_eq!( primary.pool.as_deref(), Some( "8" ));
//! assert!( services.get_named::<Connection>( "Replica" ).is_some() );
//! # Ok(())
//! # }
//! ```

mod utils ;
mod config ;
mod descriptor ;
mod registry ;
mod provider ;
mod module ;
mod module_registry ;
mod collector ;
mod extractor ;
mod resolver ;
mod attach ;
mod builder ;

pub use config::{ ConfigSection, ConfigError, KEY_DELIMITER };
pub use descriptor::{ PluginDescriptor, ProviderType, Category, MetadataError };
pub use registry::{ Component, ComponentRegistry, RegistryExt, ServiceCollection };
pub use provider::{ PluginProvider, ProviderError, ProviderFactory, ProviderCatalog, InstantiationError, default_factory };
pub use module::{ Module, ModuleId, StaticModule, ManifestModule, ModuleLoader, ManifestLoader, LoadError };
pub use module_registry::ModuleRegistry ;
pub use collector::{ ModuleCollector, ModuleSet, CollectError, find_matching_files };
pub use extractor::{ extract, ExtractError };
pub use resolver::{ resolve, ResolvedInstance, PLUGINS_SECTION };
pub use attach::{ attach, attach_instance, Attachment, AttachError, AttachFailure, AttachOutcome };
pub use builder::{ HitchBuilder, AttachReport, DiscoveryWarning, attach_plugins, default_base_directory, ROOT_SECTION, CONFIGURATION_SECTION };
pub use utils::PartialSuccess ;
