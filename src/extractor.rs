//! Reads the plugin descriptors declared by a set of modules.

use std::sync::Arc ;
use thiserror::Error ;
use tracing::{ debug, warn };

use crate::{ Module, ModuleId, ModuleSet, PluginDescriptor, MetadataError };
use crate::utils::PartialSuccess ;



/// A module's metadata could not be read; the module was skipped.
#[derive( Error, Debug )]
#[error( "Failed to read plugin metadata of module '{module}': {source}" )]
pub struct ExtractError {
	pub module: ModuleId,
	pub source: MetadataError,
}

/// Reads the descriptors of every module in `modules`.
///
/// Descriptors come out grouped by module in the set's order and in declaration
/// order within a module. A module whose metadata fails to read contributes
/// nothing and is reported next to the result.
pub fn extract( modules: &ModuleSet ) -> PartialSuccess<Vec<( PluginDescriptor, Arc<dyn Module> )>, ExtractError> {

	let mut descriptors = Vec::new();
	let mut errors = Vec::new();

	for module in modules.iter() {
		match module.descriptors() {
			Ok( declared ) => {
				debug!( module = %module.id(), descriptors = declared.len(), "read plugin metadata" );
				descriptors.extend( declared.into_iter().map(| descriptor | ( descriptor, Arc::clone( module ))));
			},
			Err( source ) => {
				warn!( module = %module.id(), error = %source, "skipping module with unreadable plugin metadata" );
				errors.push( ExtractError { module: module.id().clone(), source });
			},
		}
	}

	( descriptors, errors )

}
