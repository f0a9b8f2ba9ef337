//! Instantiates plugin providers and attaches them to a component registry.

use std::sync::Arc ;
use thiserror::Error ;
use tracing::{ error, info };

use crate::{ Category, ComponentRegistry, ConfigSection, Module, ModuleId, PluginDescriptor, ProviderCatalog, ProviderError, ProviderType };
use crate::provider::InstantiationError ;
use crate::resolver::{ resolve, ResolvedInstance };



/// A provider instance that attached successfully.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Attachment {
	pub provider: ProviderType,
	pub module: ModuleId,
	pub instance: Option<String>,
}

/// Why a provider instance failed to attach.
#[derive( Error, Debug )]
pub enum AttachFailure {
	#[error( "Instantiation Error: {0}" )] Instantiation( #[from] InstantiationError ),
	#[error( "Attach Error: {0}" )] Attach( ProviderError ),
}

/// A provider instance failed to be constructed or attached. Ends the pass it
/// occurred in.
#[derive( Error, Debug )]
#[error( "Failed to attach plugin of type '{}' with name '{}'", .descriptor.provider(), .instance.as_deref().unwrap_or( "(null)" ))]
pub struct AttachError {
	pub descriptor: PluginDescriptor,
	pub instance: Option<String>,
	#[source] pub cause: AttachFailure,
}

impl AttachError {
	#[inline] pub fn provider( &self ) -> &ProviderType { self.descriptor.provider() }
	#[inline] pub fn category( &self ) -> Option<&Category> { self.descriptor.category() }
}

/// The result of attaching one provider instance.
pub type AttachOutcome = Result<Attachment, AttachError> ;

/// Attaches every descriptor in order.
///
/// Uncategorized descriptors attach once without a name. Categorized descriptors
/// attach once per instance configured below `root`, possibly not at all.
/// Providers are constructed through the factories in `providers`.
///
/// # Errors
/// The first provider that cannot be constructed or fails to attach ends the
/// pass. Components registered before that point stay registered.
pub fn attach(
	descriptors: &[( PluginDescriptor, Arc<dyn Module> )],
	root: &ConfigSection,
	registry: &mut dyn ComponentRegistry,
	providers: &ProviderCatalog,
) -> Result<Vec<Attachment>, AttachError> {

	let mut attachments = Vec::new();

	for ( descriptor, module ) in descriptors {
		let instances = match descriptor.category() {
			None => vec![ ResolvedInstance::unnamed( root ) ],
			Some( category ) => resolve( category.category(), category.sub_category(), root ),
		};
		for instance in instances {
			attachments.push( attach_instance( descriptor, module.id(), instance, registry, providers )? );
		}
	}

	Ok( attachments )

}

/// Constructs the provider of `descriptor` and attaches a single instance.
///
/// # Errors
/// Fails if the provider cannot be constructed or its attach call fails.
pub fn attach_instance(
	descriptor: &PluginDescriptor,
	module: &ModuleId,
	instance: ResolvedInstance,
	registry: &mut dyn ComponentRegistry,
	providers: &ProviderCatalog,
) -> AttachOutcome {

	let provider_type = descriptor.provider();
	let fail = | cause: AttachFailure | {
		let err = AttachError { descriptor: descriptor.clone(), instance: instance.name.clone(), cause };
		error!( module = %module, error = %err, cause = %err.cause, "plugin attachment failed" );
		err
	};

	let provider = providers.instantiate( provider_type )
		.map_err(| err | fail( AttachFailure::from( err )))?;
	provider.attach( registry, &instance.config_scope, instance.name() )
		.map_err(| err | fail( AttachFailure::Attach( err )))?;

	info!( provider = %provider_type, instance = instance.name().unwrap_or( "(null)" ), module = %module, "attached plugin" );
	Ok( Attachment { provider: provider_type.clone(), module: module.clone(), instance: instance.name })

}
