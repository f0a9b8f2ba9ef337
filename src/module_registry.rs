//! The process-wide set of loaded modules and the provider catalog fed by them.

use std::collections::BTreeMap ;
use std::sync::{ Arc, PoisonError, RwLock };
use once_cell::sync::Lazy ;

use crate::{ Module, ModuleId, PluginProvider, ProviderType };
use crate::provider::{ ProviderCatalog, ProviderFactory };



static GLOBAL: Lazy<ModuleRegistry> = Lazy::new( ModuleRegistry::new );

/// Modules known to the process, and the factories of the providers they declare.
///
/// Modules enter the registry when the host registers them or when the collector
/// loads them from disk. The engine never removes anything. When a pass is given
/// neither explicit modules nor matching files, it scans every registered module.
#[derive( Debug, Default )]
pub struct ModuleRegistry {
	modules: RwLock<BTreeMap<ModuleId, Arc<dyn Module>>>,
	catalog: RwLock<ProviderCatalog>,
}

impl ModuleRegistry {

	pub fn new() -> Self { Self::default() }

	/// The registry shared by the whole process.
	pub fn global() -> &'static ModuleRegistry { &GLOBAL }

	/// Registers `module`. See [`ModuleRegistry::insert`].
	pub fn register( &self, module: impl Module + 'static ) -> Arc<dyn Module> {
		self.insert( Arc::new( module ))
	}

	/// Adds `module` and its provider factories.
	///
	/// If a module with the same id is already present, that module is kept and
	/// returned instead.
	pub fn insert( &self, module: Arc<dyn Module> ) -> Arc<dyn Module> {

		let mut modules = self.modules.write().unwrap_or_else( PoisonError::into_inner );
		if let Some( existing ) = modules.get( module.id() ) { return Arc::clone( existing ) }

		let mut catalog = self.catalog.write().unwrap_or_else( PoisonError::into_inner );
		module.providers().into_iter()
			.for_each(|( provider, factory )| catalog.register_factory( provider, factory ));

		modules.insert( module.id().clone(), Arc::clone( &module ));
		module

	}

	/// The module registered under `id`.
	pub fn get( &self, id: &ModuleId ) -> Option<Arc<dyn Module>> {
		self.modules.read().unwrap_or_else( PoisonError::into_inner ).get( id ).cloned()
	}

	/// The module whose id or name equals `name`.
	pub fn find( &self, name: &str ) -> Option<Arc<dyn Module>> {
		let modules = self.modules.read().unwrap_or_else( PoisonError::into_inner );
		modules.get( &ModuleId::from( name ))
			.or_else(|| modules.values().find(| module | module.name() == name ))
			.cloned()
	}

	#[inline] pub fn contains( &self, id: &ModuleId ) -> bool {
		self.modules.read().unwrap_or_else( PoisonError::into_inner ).contains_key( id )
	}

	/// Snapshot of every registered module, ordered by id.
	pub fn loaded( &self ) -> Vec<Arc<dyn Module>> {
		self.modules.read().unwrap_or_else( PoisonError::into_inner ).values().cloned().collect()
	}

	#[inline] pub fn len( &self ) -> usize {
		self.modules.read().unwrap_or_else( PoisonError::into_inner ).len()
	}

	#[inline] pub fn is_empty( &self ) -> bool { self.len() == 0 }

	/// Makes `P` constructible by type name. Needed for providers named by
	/// manifests on disk.
	pub fn register_provider<P>( &self )
	where
		P: PluginProvider + Default + 'static,
	{
		self.catalog.write().unwrap_or_else( PoisonError::into_inner ).register_provider::<P>();
	}

	/// Registers `factory` under `provider`.
	pub fn register_factory( &self, provider: ProviderType, factory: ProviderFactory ) {
		self.catalog.write().unwrap_or_else( PoisonError::into_inner ).register_factory( provider, factory );
	}

	/// Snapshot of every registered factory.
	pub fn catalog( &self ) -> ProviderCatalog {
		self.catalog.read().unwrap_or_else( PoisonError::into_inner ).clone()
	}

	/// The factories a pass over `modules` constructs providers from: every
	/// registered factory, overlaid with the factories `modules` carry. Nothing
	/// is written back to the registry.
	pub fn catalog_for<'m>( &self, modules: impl IntoIterator<Item = &'m Arc<dyn Module>> ) -> ProviderCatalog {
		let mut catalog = self.catalog();
		modules.into_iter().for_each(| module | catalog.extend( module.providers() ));
		catalog
	}

}
