//! The provider contract and the catalog used to construct providers by type.

use std::collections::HashMap ;
use std::sync::Arc ;
use thiserror::Error ;

use crate::{ ComponentRegistry, ConfigSection, ProviderType };



/// Error type returned by provider code.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static> ;

/// Zero-argument construction function for a provider type.
pub type ProviderFactory = Arc<dyn Fn() -> Result<Box<dyn PluginProvider>, ProviderError> + Send + Sync> ;

/// Implemented by every plugin provider.
///
/// A provider is constructed once per attached instance and then asked to
/// register its components.
///
/// ```
/// use hitch::{ ComponentRegistry, ConfigSection, PluginProvider, ProviderError, RegistryExt };
///
/// struct Forecast { service: String }
///
/// #[derive( Default )]
/// struct ForecastProvider ;
///
/// impl PluginProvider for ForecastProvider {
/// 	fn attach(
/// 		&self,
/// 		registry: &mut dyn ComponentRegistry,
/// 		_configuration: &ConfigSection,
/// 		name: Option<&str>,
/// 	) -> Result<(), ProviderError> {
/// 		if let Some( name ) = name {
/// 			registry.add_named( name, Forecast { service: name.to_string() });
/// 		}
/// 		Ok(())
/// 	}
/// }
/// ```
pub trait PluginProvider {
	/// Registers this provider's components.
	///
	/// `configuration` is the section configured for this instance (empty when
	/// there is none) and `name` is the instance name, absent for uncategorized
	/// plugins. Components should be keyed by `name` when it is present.
	///
	/// # Errors
	/// Any error aborts the attachment pass.
	fn attach(
		&self,
		registry: &mut dyn ComponentRegistry,
		configuration: &ConfigSection,
		name: Option<&str>,
	) -> Result<(), ProviderError> ;
}

/// Errors raised while constructing a provider.
#[derive( Error, Debug )]
pub enum InstantiationError {
	#[error( "No factory is registered for provider type '{0}'" )] UnknownProvider( ProviderType ),
	#[error( "Provider construction failed: {0}" )] ConstructionFailed( ProviderError ),
}

/// Maps provider types to their factories.
#[derive( Clone, Default )]
pub struct ProviderCatalog {
	factories: HashMap<ProviderType, ProviderFactory>,
}

impl ProviderCatalog {

	pub fn new() -> Self { Self::default() }

	/// Registers the [`Default`] constructor of `P` under [`ProviderType::of::<P>`].
	pub fn register_provider<P>( &mut self )
	where
		P: PluginProvider + Default + 'static,
	{
		self.register_factory( ProviderType::of::<P>(), default_factory::<P>() );
	}

	/// Registers `factory` under `provider`, replacing any previous factory.
	pub fn register_factory( &mut self, provider: ProviderType, factory: ProviderFactory ) {
		self.factories.insert( provider, factory );
	}

	#[inline] pub fn get( &self, provider: &ProviderType ) -> Option<ProviderFactory> { self.factories.get( provider ).cloned() }
	#[inline] pub fn contains( &self, provider: &ProviderType ) -> bool { self.factories.contains_key( provider ) }

	/// Constructs a provider through its registered factory.
	///
	/// # Errors
	/// Fails if no factory is known for `provider` or the factory fails.
	pub fn instantiate( &self, provider: &ProviderType ) -> Result<Box<dyn PluginProvider>, InstantiationError> {
		let factory = self.factories.get( provider )
			.ok_or_else(|| InstantiationError::UnknownProvider( provider.clone() ))?;
		factory().map_err( InstantiationError::ConstructionFailed )
	}

}

impl Extend<( ProviderType, ProviderFactory )> for ProviderCatalog {
	fn extend<T: IntoIterator<Item = ( ProviderType, ProviderFactory )>>( &mut self, factories: T ) {
		factories.into_iter().for_each(|( provider, factory )| self.register_factory( provider, factory ));
	}
}

impl std::fmt::Debug for ProviderCatalog {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ProviderCatalog" )
			.field( "factories", &self.factories.keys().collect::<Vec<_>>() )
			.finish()
	}
}

/// Factory for a provider constructed through [`Default`].
pub fn default_factory<P>() -> ProviderFactory
where
	P: PluginProvider + Default + 'static,
{
	Arc::new(|| -> Result<Box<dyn PluginProvider>, ProviderError> { Ok( Box::new( P::default() )) })
}
